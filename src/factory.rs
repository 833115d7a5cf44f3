//! Name-keyed registry of store constructors.
//!
//! Each enabled store module adds itself in [`crate::init`]; [`new_store`]
//! picks the constructor matching [`Config::store`].

use crate::{Config, CredentialStore, CredfetchError, Result};
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

/// Builds a store from its configuration.
pub type StoreFactory = fn(Config) -> Result<Box<dyn CredentialStore>>;

static STORE_REGISTRY: OnceLock<RwLock<HashMap<String, StoreFactory>>> = OnceLock::new();

fn registry() -> &'static RwLock<HashMap<String, StoreFactory>> {
    STORE_REGISTRY.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Registers the factory used for a [`StoreKind`](crate::StoreKind).
///
/// `name` is the kind's display name (`"wincred"`, `"mock"`). Registering a
/// name again replaces the earlier factory, which lets callers swap in a
/// preloaded mock store after [`crate::init`].
///
/// # Example
///
/// ```
/// use credfetch::factory::{new_store, register_store};
/// use credfetch::stores::mock::MockStore;
/// use credfetch::{Config, CredentialStore, Result, StoreKind, StoredCredential};
///
/// fn seeded(_config: Config) -> Result<Box<dyn CredentialStore>> {
///     let cred = StoredCredential::new("www.example.com", "alice", "pw");
///     Ok(Box::new(MockStore::with_credentials(vec![cred])))
/// }
///
/// credfetch::init();
/// register_store("mock", seeded);
///
/// let store = new_store(Config::new(StoreKind::Mock)).unwrap();
/// assert_eq!(store.name(), "mock");
/// ```
pub fn register_store(name: &str, factory: StoreFactory) {
    let mut reg = registry().write().unwrap_or_else(|e| e.into_inner());
    reg.insert(name.to_string(), factory);
}

/// Builds the store selected by `config.store`.
///
/// # Errors
///
/// Fails when nothing is registered under the store's name, which happens
/// when its Cargo feature is off or [`crate::init`] has not run. Errors from
/// the factory itself are returned unchanged.
///
/// # Example
///
/// ```
/// use credfetch::{factory, Config, CredentialStore, StoreKind};
///
/// credfetch::init();
/// let store = factory::new_store(Config::new(StoreKind::Mock)).unwrap();
/// assert_eq!(store.name(), "mock");
/// ```
pub fn new_store(config: Config) -> Result<Box<dyn CredentialStore>> {
    let name = config.store.to_string();
    let factory = registry()
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .get(&name)
        .copied();

    match factory {
        Some(factory) => factory(config),
        None => Err(CredfetchError::Other(anyhow::anyhow!(
            "unknown store: {} (is the '{}' feature flag enabled?)",
            name,
            name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failing_factory(_cfg: Config) -> Result<Box<dyn CredentialStore>> {
        Err(CredfetchError::Other(anyhow::anyhow!("failing factory")))
    }

    #[test]
    fn test_store_registration() {
        register_store("test-store", failing_factory);

        let reg = registry().read().unwrap();
        assert!(reg.contains_key("test-store"));
    }

    #[test]
    fn test_register_replaces_factory() {
        fn replacement(_cfg: Config) -> Result<Box<dyn CredentialStore>> {
            Err(CredfetchError::Other(anyhow::anyhow!("replacement factory")))
        }

        register_store("replaced-store", failing_factory);
        register_store("replaced-store", replacement);

        let factory = *registry().read().unwrap().get("replaced-store").unwrap();
        let err = factory(Config::new(crate::StoreKind::Mock)).err().unwrap();
        assert_eq!(err.to_string(), "replacement factory");
    }

    #[test]
    #[cfg(not(feature = "mock"))]
    fn test_unknown_store_error() {
        let result = new_store(Config::new(crate::StoreKind::Mock));

        let err_msg = result.err().unwrap().to_string();
        assert!(err_msg.contains("unknown store"));
        assert!(err_msg.contains("feature flag"));
    }
}
