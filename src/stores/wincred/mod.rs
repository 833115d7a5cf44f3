//! Windows Credential Manager store.
//!
//! This store reads credentials through the PowerShell `CredentialManager`
//! module (`Get-StoredCredential`). When the module is missing it can be
//! installed for the current user with `Install-Module`.
//!
//! # Platform Support
//!
//! Only available on Windows. On other platforms a stub is compiled whose
//! `init` always reports the module as missing.
//!
//! # Configuration
//!
//! - `Config::powershell`: executable to run (default: "powershell.exe")
//! - `Config::module_name`: module to import (default: "CredentialManager")
//! - `install_scope` option: `Install-Module` scope (default: "CurrentUser")
//!
//! # Example
//!
//! ```no_run
//! use credfetch::{Config, StoreKind};
//!
//! let config = Config::new(StoreKind::WindowsCredentialManager)
//!     .with_powershell("pwsh");
//! ```

pub mod records;
pub mod script;

#[cfg(target_os = "windows")]
mod store;
#[cfg(target_os = "windows")]
pub use store::WincredStore;

#[cfg(not(target_os = "windows"))]
mod store_stub;
#[cfg(not(target_os = "windows"))]
pub use store_stub::WincredStore;

use crate::factory;

/// Registers the Windows Credential Manager store with the factory.
pub fn register() {
    factory::register_store("wincred", |config| Ok(Box::new(WincredStore::new(config))));
}
