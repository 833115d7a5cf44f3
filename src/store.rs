//! Credential store trait.
//!
//! This module defines the [`CredentialStore`] trait every store implementation
//! satisfies: an availability check, a one-shot install, and the four lookup
//! overloads the dispatcher chooses between.

use crate::{CredentialType, Result, StoredCredential};
use async_trait::async_trait;

/// A source of stored credentials.
///
/// All implementations must be `Send + Sync` so a store can be moved across
/// async tasks.
///
/// # Implementations
///
/// - **OS-native**: Windows Credential Manager through the PowerShell
///   `CredentialManager` module
/// - **Testing**: Mock store with error injection and a call log
///
/// # Example
///
/// ```no_run
/// use credfetch::{factory, Config, CredentialStore, StoreKind};
///
/// #[tokio::main]
/// async fn main() -> credfetch::Result<()> {
///     credfetch::init();
///     let mut store = factory::new_store(Config::new(StoreKind::WindowsCredentialManager))?;
///
///     store.init().await?;
///     for cred in store.find_by_target("www.example.com").await? {
///         println!("{} ({})", cred.user_name, cred.credential_type);
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait CredentialStore: Send + Sync {
    // ========================================================================
    // Metadata
    // ========================================================================

    /// Returns the store name (e.g., "wincred", "mock").
    fn name(&self) -> &str;

    // ========================================================================
    // Availability
    // ========================================================================

    /// Checks that the store access capability is loaded.
    ///
    /// For Windows Credential Manager this imports the `CredentialManager`
    /// PowerShell module.
    ///
    /// # Errors
    ///
    /// Returns [`CredfetchError::DependencyMissing`](crate::CredfetchError::DependencyMissing)
    /// if the capability is not available.
    async fn init(&mut self) -> Result<()>;

    /// Installs the store access capability for the current user.
    ///
    /// Called at most once per lookup, after [`init`](Self::init) failed.
    ///
    /// # Errors
    ///
    /// Returns an error describing why the install failed (no package source,
    /// no network, policy restrictions, ...).
    async fn install(&mut self) -> Result<()>;

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Lists every credential in the store.
    async fn find_all(&self) -> Result<Vec<StoredCredential>>;

    /// Lists credentials stored under `target`.
    async fn find_by_target(&self, target: &str) -> Result<Vec<StoredCredential>>;

    /// Lists credentials of one type.
    async fn find_by_type(&self, credential_type: CredentialType)
        -> Result<Vec<StoredCredential>>;

    /// Lists credentials stored under `target` with the given type.
    async fn find_by_target_and_type(
        &self,
        target: &str,
        credential_type: CredentialType,
    ) -> Result<Vec<StoredCredential>>;
}
