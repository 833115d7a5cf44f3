//! Windows Credential Manager store implementation.

use super::{records, script};
use crate::cli::run_powershell;
use crate::query::StoreFilter;
use crate::{Config, CredentialStore, CredentialType, CredfetchError, Result, StoredCredential};
use async_trait::async_trait;
use tracing::debug;

/// Windows Credential Manager store.
///
/// Uses PowerShell and the `CredentialManager` module to read credentials.
pub struct WincredStore {
    powershell: String,
    module: String,
    install_scope: String,
}

impl WincredStore {
    /// Creates a new Windows Credential Manager store from configuration.
    pub fn new(config: Config) -> Self {
        let install_scope = config
            .get_option("install_scope")
            .cloned()
            .unwrap_or_else(|| "CurrentUser".to_string());

        Self {
            powershell: config.powershell,
            module: config.module_name,
            install_scope,
        }
    }

    async fn lookup(&self, filter: StoreFilter) -> Result<Vec<StoredCredential>> {
        debug!(%filter, "running Get-StoredCredential");
        let output = run_powershell(&self.powershell, &script::lookup(&self.module, &filter)).await?;
        records::parse_credentials(&output)
    }
}

#[async_trait]
impl CredentialStore for WincredStore {
    fn name(&self) -> &str {
        "wincred"
    }

    async fn init(&mut self) -> Result<()> {
        run_powershell(&self.powershell, &script::import_module(&self.module))
            .await
            .map(|_| ())
            .map_err(|e| match e {
                CredfetchError::DependencyMissing(_) => e,
                other => CredfetchError::DependencyMissing(other.to_string()),
            })
    }

    async fn install(&mut self) -> Result<()> {
        run_powershell(
            &self.powershell,
            &script::install_module(&self.module, &self.install_scope),
        )
        .await
        .map(|_| ())
    }

    async fn find_all(&self) -> Result<Vec<StoredCredential>> {
        self.lookup(StoreFilter::All).await
    }

    async fn find_by_target(&self, target: &str) -> Result<Vec<StoredCredential>> {
        self.lookup(StoreFilter::Target(target.to_string())).await
    }

    async fn find_by_type(
        &self,
        credential_type: CredentialType,
    ) -> Result<Vec<StoredCredential>> {
        self.lookup(StoreFilter::Type(credential_type)).await
    }

    async fn find_by_target_and_type(
        &self,
        target: &str,
        credential_type: CredentialType,
    ) -> Result<Vec<StoredCredential>> {
        self.lookup(StoreFilter::TargetAndType(target.to_string(), credential_type))
            .await
    }
}
