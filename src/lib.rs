//! credfetch - look up a single stored credential in Windows Credential Manager.
//!
//! Given a user name and optional target and type filters, credfetch asks the
//! credential store for candidates, keeps the one whose user name matches
//! (case-insensitively) and returns it. Every failure, from a missing
//! `CredentialManager` PowerShell module to an empty result, comes back as a
//! [`FailureInfo`] with an ordered error log instead of a panic or an early
//! `?` return.
//!
//! # Quick Start
//!
//! ```no_run
//! use credfetch::{Config, CredentialQuery, Retriever, StoreKind};
//!
//! #[tokio::main]
//! async fn main() -> credfetch::Result<()> {
//!     let mut retriever = Retriever::new(Config::new(StoreKind::WindowsCredentialManager))?;
//!
//!     let query = CredentialQuery::new("stevejoseph@sampledomain.com")
//!         .with_target("www.sampledomain.com");
//!
//!     match retriever.retrieve(&query).await {
//!         Ok(cred) => println!("found {} for {}", cred.user_name, cred.target_name),
//!         Err(failure) => eprintln!("{}", failure),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Lookup Steps
//!
//! 1. **Validation**: user name and target are checked before anything runs.
//! 2. **Bootstrap**: the store's access module is loaded, or installed once for
//!    the current user.
//! 3. **Dispatch**: one of four store lookups runs depending on which of
//!    target/type were given.
//! 4. **Filter**: the first candidate with a matching user name wins.
//!
//! # Supported Stores
//!
//! | Store | Feature Flag | Requires | Notes |
//! |-------|-------------|----------|-------|
//! | Mock | `mock` (default) | None | In-memory testing store |
//! | Windows Credential Manager | `wincred` (default) | PowerShell | Windows only |

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod credential;
pub mod error;
pub mod factory;
pub mod query;
pub mod response;
pub mod retrieve;
pub mod store;
pub mod stores;
pub mod validation;

pub use config::{Config, StoreKind};
pub use credential::{CredentialType, PersistScope, StoredCredential};
pub use error::{CredfetchError, Result};
pub use query::{CredentialQuery, StoreFilter};
pub use response::{FailureInfo, LookupResult, Status};
pub use retrieve::{Retriever, MODULE_MISSING_MESSAGE, NOT_FOUND_MESSAGE};
pub use store::CredentialStore;

use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the credfetch library.
///
/// This registers all compiled stores with the factory. [`Retriever::new`]
/// calls it, and it is idempotent.
pub fn init() {
    INIT.call_once(stores::register_all);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_initialization() {
        init();
        init();
    }

    #[test]
    #[cfg(feature = "mock")]
    fn test_mock_store_from_factory() {
        init();

        let store = factory::new_store(Config::new(StoreKind::Mock)).unwrap();
        assert_eq!(store.name(), "mock");
    }
}
