//! Makes sure a store's access capability is loaded before any lookup.

use crate::{CredentialStore, CredfetchError, Result};
use tracing::{debug, info, warn};

/// Checks that `store` is usable, installing its capability once if needed.
///
/// The sequence is `init`, then on failure (and only when `auto_install` is
/// set) a single `install` followed by a second `init`. There are no further
/// retries.
///
/// # Errors
///
/// Returns [`CredfetchError::DependencyMissing`] carrying the text of the last
/// underlying failure.
pub async fn ensure_available(store: &mut dyn CredentialStore, auto_install: bool) -> Result<()> {
    let first = match store.init().await {
        Ok(()) => {
            debug!(store = store.name(), "credential store available");
            return Ok(());
        }
        Err(e) => e,
    };

    if !auto_install {
        warn!(store = store.name(), error = %first, "credential store unavailable, auto-install disabled");
        return Err(missing(first));
    }

    info!(store = store.name(), "credential store unavailable, attempting install for current user");
    if let Err(e) = store.install().await {
        warn!(store = store.name(), error = %e, "install failed");
        return Err(missing(e));
    }

    store.init().await.map_err(|e| {
        warn!(store = store.name(), error = %e, "store still unavailable after install");
        missing(e)
    })?;

    info!(store = store.name(), "credential store installed");
    Ok(())
}

fn missing(err: CredfetchError) -> CredfetchError {
    match err {
        CredfetchError::DependencyMissing(_) => err,
        other => CredfetchError::DependencyMissing(other.to_string()),
    }
}

#[cfg(all(test, feature = "mock"))]
mod tests {
    use super::*;
    use crate::stores::mock::{MockStore, StoreCall};

    #[tokio::test]
    async fn test_available_store_skips_install() {
        let mut store = MockStore::new();
        ensure_available(&mut store, true).await.unwrap();

        assert_eq!(store.calls().await, vec![StoreCall::Init]);
    }

    #[tokio::test]
    async fn test_missing_store_is_installed() {
        let mut store = MockStore::unavailable();
        ensure_available(&mut store, true).await.unwrap();

        assert_eq!(
            store.calls().await,
            vec![StoreCall::Init, StoreCall::Install, StoreCall::Init]
        );
    }

    #[tokio::test]
    async fn test_install_failure_is_reported() {
        let mut store = MockStore::unavailable();
        store.install_error = Some(CredfetchError::CommandFailed("no repository".to_string()));

        let err = ensure_available(&mut store, true).await.unwrap_err();
        assert!(matches!(err, CredfetchError::DependencyMissing(_)));
        assert!(err.to_string().contains("no repository"));
        assert_eq!(store.calls().await, vec![StoreCall::Init, StoreCall::Install]);
    }

    #[tokio::test]
    async fn test_auto_install_disabled() {
        let mut store = MockStore::unavailable();

        let err = ensure_available(&mut store, false).await.unwrap_err();
        assert!(matches!(err, CredfetchError::DependencyMissing(_)));
        assert_eq!(store.calls().await, vec![StoreCall::Init]);
    }
}
