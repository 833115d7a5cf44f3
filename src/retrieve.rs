//! The credential lookup pipeline.
//!
//! [`Retriever::retrieve`] runs validation, the dependency bootstrap, the
//! store dispatch and the user name filter in order. The first failing step
//! ends the lookup; every failure becomes a line in the returned
//! [`FailureInfo`]'s error log.

use crate::bootstrap::ensure_available;
use crate::query::{select_user, StoreFilter};
use crate::response::{FailureInfo, LookupResult};
use crate::{factory, Config, CredentialQuery, CredentialStore, CredfetchError, Result};
use tracing::{debug, info, instrument, warn};

/// Appended after the underlying error when the store module is unavailable.
pub const MODULE_MISSING_MESSAGE: &str =
    "The retrieval failed. The CredentialManager module is missing.";

/// Reported when no candidate matches the requested user name.
pub const NOT_FOUND_MESSAGE: &str = "No credential exists for the given user.";

/// Looks up single credentials in a store.
///
/// # Example
///
/// ```
/// use credfetch::stores::mock::MockStore;
/// use credfetch::{Config, CredentialQuery, Retriever, StoreKind, StoredCredential};
///
/// #[tokio::main]
/// async fn main() {
///     let store = MockStore::with_credentials(vec![StoredCredential::new(
///         "www.sampledomain.com",
///         "stevejoseph@sampledomain.com",
///         "p@ss",
///     )]);
///     let mut retriever = Retriever::with_store(Box::new(store), Config::new(StoreKind::Mock));
///
///     let query = CredentialQuery::new("stevejoseph@sampledomain.com")
///         .with_target("www.sampledomain.com");
///
///     let cred = retriever.retrieve(&query).await.unwrap();
///     assert_eq!(cred.password, "p@ss");
/// }
/// ```
pub struct Retriever {
    store: Box<dyn CredentialStore>,
    config: Config,
}

impl Retriever {
    /// Creates a retriever for the store named in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is not registered or fails to build.
    pub fn new(config: Config) -> Result<Self> {
        crate::init();
        let store = factory::new_store(config.clone())?;
        Ok(Self { store, config })
    }

    /// Creates a retriever around an existing store.
    pub fn with_store(store: Box<dyn CredentialStore>, config: Config) -> Self {
        Self { store, config }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &dyn CredentialStore {
        &*self.store
    }

    /// Finds the credential `query` describes.
    ///
    /// Never returns a Rust error and never panics on store failures: every
    /// problem ends up in the [`FailureInfo`] error log.
    #[instrument(skip(self), fields(store = self.store.name()))]
    pub async fn retrieve(&mut self, query: &CredentialQuery) -> LookupResult {
        let mut failure = FailureInfo::new();

        if let Err(e) = query.validate() {
            warn!(error = %e, "rejected query");
            failure.push(e.to_string());
            return Err(failure);
        }

        if let Err(e) = ensure_available(&mut *self.store, self.config.auto_install).await {
            failure.push(underlying_message(&e));
            failure.push(MODULE_MISSING_MESSAGE);
            return Err(failure);
        }

        let filter = StoreFilter::from_query(query);
        debug!(operation = filter.operation(), %filter, "querying store");

        let candidates = match filter.fetch(&*self.store).await {
            Ok(candidates) => candidates,
            Err(e) => {
                let e = CredfetchError::store_op(
                    self.store.name(),
                    filter.operation(),
                    filter.to_string(),
                    e,
                );
                warn!(error = %e, "store query failed");
                failure.push(e.to_string());
                return Err(failure);
            }
        };

        debug!(candidates = candidates.len(), "filtering by user name");
        match select_user(candidates, &query.user_name) {
            Some(credential) => {
                info!(target_name = %credential.target_name, credential_type = %credential.credential_type, "credential found");
                Ok(credential)
            }
            None => {
                info!("no credential for user");
                failure.push(NOT_FOUND_MESSAGE);
                Err(failure)
            }
        }
    }
}

/// Text of the error that made the store unavailable, without the wrapper
/// prefix added by the bootstrap.
fn underlying_message(err: &CredfetchError) -> String {
    match err {
        CredfetchError::DependencyMissing(msg) => msg.clone(),
        other => other.to_string(),
    }
}

#[cfg(all(test, feature = "mock"))]
mod tests {
    use super::*;
    use crate::stores::mock::{MockStore, StoreCall};
    use crate::{CredentialType, StoreKind, StoredCredential};

    fn retriever(store: MockStore) -> Retriever {
        Retriever::with_store(Box::new(store), Config::new(StoreKind::Mock))
    }

    #[tokio::test]
    async fn test_empty_store_reports_not_found() {
        let mut r = retriever(MockStore::new());
        let failure = r
            .retrieve(&CredentialQuery::new("alice").with_target("host"))
            .await
            .unwrap_err();

        assert_eq!(failure.error_log, vec![NOT_FOUND_MESSAGE.to_string()]);
    }

    #[tokio::test]
    async fn test_invalid_user_name_skips_store() {
        let store = MockStore::new();
        let calls = store.call_log();
        let mut r = retriever(store);

        let failure = r.retrieve(&CredentialQuery::new("")).await.unwrap_err();

        assert_eq!(failure.error_log.len(), 1);
        assert!(failure.error_log[0].contains("user name cannot be empty"));
        assert!(calls.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_query_error_is_logged_without_not_found() {
        let mut store = MockStore::with_credentials(vec![StoredCredential::new("host", "alice", "pw")]);
        store.query_error = Some(CredfetchError::CommandFailed("access denied".to_string()));
        let mut r = retriever(store);

        let failure = r.retrieve(&CredentialQuery::new("alice")).await.unwrap_err();

        assert_eq!(failure.error_log.len(), 1);
        assert!(failure.error_log[0].contains("access denied"));
        assert!(failure.error_log[0].contains("find_by_type"));
    }

    #[tokio::test]
    async fn test_missing_module_messages() {
        let mut store = MockStore::unavailable();
        store.install_error = Some(CredfetchError::CommandFailed("gallery unreachable".to_string()));
        let mut r = retriever(store);

        let failure = r
            .retrieve(&CredentialQuery::new("alice").with_type(CredentialType::Generic))
            .await
            .unwrap_err();

        assert_eq!(failure.error_log.len(), 2);
        assert!(failure.error_log[0].contains("gallery unreachable"));
        assert_eq!(failure.error_log[1], MODULE_MISSING_MESSAGE);
    }

    #[tokio::test]
    async fn test_installed_store_is_queried() {
        let store = MockStore::unavailable();
        store.insert(StoredCredential::new("host", "alice", "pw")).await;
        let calls = store.call_log();
        let mut r = retriever(store);

        let cred = r
            .retrieve(&CredentialQuery::new("alice").with_target("host"))
            .await
            .unwrap();

        assert_eq!(cred.password, "pw");
        assert_eq!(
            *calls.read().await,
            vec![
                StoreCall::Init,
                StoreCall::Install,
                StoreCall::Init,
                StoreCall::FindByTargetAndType("host".to_string(), CredentialType::Generic),
            ]
        );
    }
}
