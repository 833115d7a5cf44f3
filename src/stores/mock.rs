//! Mock store for testing.
//!
//! This store keeps credentials in memory, can pretend its access module is
//! missing, and records every call so tests can check which lookup overload
//! ran.

use crate::*;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A call made against a [`MockStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    /// `init()`
    Init,
    /// `install()`
    Install,
    /// `find_all()`
    FindAll,
    /// `find_by_target(target)`
    FindByTarget(String),
    /// `find_by_type(type)`
    FindByType(CredentialType),
    /// `find_by_target_and_type(target, type)`
    FindByTargetAndType(String, CredentialType),
}

/// Shared handle to a mock store's call log.
pub type CallLog = Arc<RwLock<Vec<StoreCall>>>;

/// Mock store for testing.
///
/// # Example
///
/// ```
/// use credfetch::stores::mock::{MockStore, StoreCall};
/// use credfetch::{CredentialStore, CredfetchError, StoredCredential};
///
/// #[tokio::main]
/// async fn main() -> credfetch::Result<()> {
///     let mut store = MockStore::new();
///     store.init().await?;
///
///     // Pre-populate with test data
///     store.insert(StoredCredential::new("host", "alice", "pw")).await;
///     assert_eq!(store.find_by_target("host").await?.len(), 1);
///
///     // Test error conditions
///     store.query_error = Some(CredfetchError::CommandFailed("denied".to_string()));
///     assert!(store.find_all().await.is_err());
///
///     assert_eq!(
///         store.calls().await,
///         vec![StoreCall::Init, StoreCall::FindByTarget("host".to_string()), StoreCall::FindAll]
///     );
///     Ok(())
/// }
/// ```
pub struct MockStore {
    credentials: Arc<RwLock<Vec<StoredCredential>>>,
    calls: CallLog,

    /// Whether `init()` succeeds. `install()` sets this on success.
    pub available: bool,
    /// Error to return from `install()`
    pub install_error: Option<CredfetchError>,
    /// Error to return from every lookup
    pub query_error: Option<CredfetchError>,
}

impl MockStore {
    /// Creates an available, empty mock store.
    pub fn new() -> Self {
        Self {
            credentials: Arc::new(RwLock::new(Vec::new())),
            calls: Arc::new(RwLock::new(Vec::new())),
            available: true,
            install_error: None,
            query_error: None,
        }
    }

    /// Creates a mock store whose access module is not loaded yet.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Creates an available mock store holding `credentials` in order.
    pub fn with_credentials(credentials: Vec<StoredCredential>) -> Self {
        Self {
            credentials: Arc::new(RwLock::new(credentials)),
            ..Self::new()
        }
    }

    /// Appends a credential.
    pub async fn insert(&self, credential: StoredCredential) {
        self.credentials.write().await.push(credential);
    }

    /// Returns a snapshot of the calls made so far.
    pub async fn calls(&self) -> Vec<StoreCall> {
        self.calls.read().await.clone()
    }

    /// Returns a handle to the call log that outlives moving the store.
    pub fn call_log(&self) -> CallLog {
        Arc::clone(&self.calls)
    }

    async fn record(&self, call: StoreCall) {
        self.calls.write().await.push(call);
    }

    async fn select<F>(&self, keep: F) -> Result<Vec<StoredCredential>>
    where
        F: Fn(&StoredCredential) -> bool,
    {
        if let Some(ref err) = self.query_error {
            return Err(CredfetchError::Other(anyhow::anyhow!("{}", err)));
        }

        let credentials = self.credentials.read().await;
        Ok(credentials.iter().filter(|c| keep(c)).cloned().collect())
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for MockStore {
    fn name(&self) -> &str {
        "mock"
    }

    async fn init(&mut self) -> Result<()> {
        self.record(StoreCall::Init).await;
        if self.available {
            Ok(())
        } else {
            Err(CredfetchError::DependencyMissing(
                "mock credential module is not loaded".to_string(),
            ))
        }
    }

    async fn install(&mut self) -> Result<()> {
        self.record(StoreCall::Install).await;
        if let Some(ref err) = self.install_error {
            return Err(CredfetchError::Other(anyhow::anyhow!("{}", err)));
        }
        self.available = true;
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<StoredCredential>> {
        self.record(StoreCall::FindAll).await;
        self.select(|_| true).await
    }

    async fn find_by_target(&self, target: &str) -> Result<Vec<StoredCredential>> {
        self.record(StoreCall::FindByTarget(target.to_string())).await;
        self.select(|c| c.target_name.eq_ignore_ascii_case(target)).await
    }

    async fn find_by_type(
        &self,
        credential_type: CredentialType,
    ) -> Result<Vec<StoredCredential>> {
        self.record(StoreCall::FindByType(credential_type)).await;
        self.select(|c| c.credential_type == credential_type).await
    }

    async fn find_by_target_and_type(
        &self,
        target: &str,
        credential_type: CredentialType,
    ) -> Result<Vec<StoredCredential>> {
        self.record(StoreCall::FindByTargetAndType(
            target.to_string(),
            credential_type,
        ))
        .await;
        self.select(|c| {
            c.target_name.eq_ignore_ascii_case(target) && c.credential_type == credential_type
        })
        .await
    }
}

/// Registers the mock store with the factory.
pub fn register() {
    crate::factory::register_store("mock", |_cfg| Ok(Box::new(MockStore::new())));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> Vec<StoredCredential> {
        vec![
            StoredCredential::new("web", "alice", "1"),
            StoredCredential::new("web", "bob", "2").with_type(CredentialType::DomainPassword),
            StoredCredential::new("files", "carol", "3").with_type(CredentialType::DomainPassword),
        ]
    }

    #[tokio::test]
    async fn test_filters() {
        let store = MockStore::with_credentials(fixtures());

        assert_eq!(store.find_all().await.unwrap().len(), 3);
        assert_eq!(store.find_by_target("WEB").await.unwrap().len(), 2);
        assert_eq!(
            store
                .find_by_type(CredentialType::DomainPassword)
                .await
                .unwrap()
                .len(),
            2
        );

        let both = store
            .find_by_target_and_type("web", CredentialType::DomainPassword)
            .await
            .unwrap();
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].user_name, "bob");
    }

    #[tokio::test]
    async fn test_unavailable_until_installed() {
        let mut store = MockStore::unavailable();
        assert!(matches!(
            store.init().await,
            Err(CredfetchError::DependencyMissing(_))
        ));

        store.install().await.unwrap();
        store.init().await.unwrap();
    }

    #[tokio::test]
    async fn test_error_injection() {
        let mut store = MockStore::unavailable();
        store.install_error = Some(CredfetchError::CommandFailed("offline".to_string()));
        store.query_error = Some(CredfetchError::CommandFailed("denied".to_string()));

        assert!(store.install().await.unwrap_err().to_string().contains("offline"));
        assert!(!store.available);
        assert!(store.find_all().await.unwrap_err().to_string().contains("denied"));
    }

    #[tokio::test]
    async fn test_call_log_handle() {
        let store = MockStore::new();
        let log = store.call_log();

        store.find_by_type(CredentialType::Generic).await.unwrap();
        assert_eq!(
            *log.read().await,
            vec![StoreCall::FindByType(CredentialType::Generic)]
        );
    }
}
