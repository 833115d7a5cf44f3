//! Stub implementation for non-Windows platforms.

use crate::{Config, CredentialStore, CredentialType, CredfetchError, Result, StoredCredential};
use async_trait::async_trait;

const WINDOWS_ONLY: &str = "Windows Credential Manager is only available on Windows";

/// Stub Windows Credential Manager store for non-Windows platforms.
///
/// The store never becomes available, so lookups end with the module-missing
/// failure.
pub struct WincredStore {}

impl WincredStore {
    /// Creates a new stub store.
    pub fn new(_config: Config) -> Self {
        Self {}
    }
}

#[async_trait]
impl CredentialStore for WincredStore {
    fn name(&self) -> &str {
        "wincred"
    }

    async fn init(&mut self) -> Result<()> {
        Err(CredfetchError::DependencyMissing(WINDOWS_ONLY.to_string()))
    }

    async fn install(&mut self) -> Result<()> {
        Err(CredfetchError::DependencyMissing(WINDOWS_ONLY.to_string()))
    }

    async fn find_all(&self) -> Result<Vec<StoredCredential>> {
        Err(CredfetchError::Other(anyhow::anyhow!(WINDOWS_ONLY)))
    }

    async fn find_by_target(&self, _target: &str) -> Result<Vec<StoredCredential>> {
        Err(CredfetchError::Other(anyhow::anyhow!(WINDOWS_ONLY)))
    }

    async fn find_by_type(
        &self,
        _credential_type: CredentialType,
    ) -> Result<Vec<StoredCredential>> {
        Err(CredfetchError::Other(anyhow::anyhow!(WINDOWS_ONLY)))
    }

    async fn find_by_target_and_type(
        &self,
        _target: &str,
        _credential_type: CredentialType,
    ) -> Result<Vec<StoredCredential>> {
        Err(CredfetchError::Other(anyhow::anyhow!(WINDOWS_ONLY)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoreKind;

    #[tokio::test]
    async fn test_stub_is_never_available() {
        let mut store = WincredStore::new(Config::new(StoreKind::WindowsCredentialManager));
        assert!(matches!(
            store.init().await,
            Err(CredfetchError::DependencyMissing(_))
        ));
        assert!(store.install().await.is_err());
    }
}
