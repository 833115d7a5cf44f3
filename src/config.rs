//! Configuration types for store creation and lookups.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::CredfetchError;

/// Store type identifier.
///
/// Each variant corresponds to a store implementation. Stores must be enabled
/// via Cargo feature flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKind {
    /// Windows Credential Manager through PowerShell
    WindowsCredentialManager,
    /// In-memory store for tests and demos
    Mock,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WindowsCredentialManager => write!(f, "wincred"),
            Self::Mock => write!(f, "mock"),
        }
    }
}

impl FromStr for StoreKind {
    type Err = CredfetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wincred" | "windowscredentialmanager" => Ok(Self::WindowsCredentialManager),
            "mock" => Ok(Self::Mock),
            other => Err(CredfetchError::Other(anyhow::anyhow!(
                "unknown store: {} (expected 'wincred' or 'mock')",
                other
            ))),
        }
    }
}

/// Configuration for creating a store and running lookups.
///
/// ```
/// use credfetch::{Config, StoreKind};
///
/// let config = Config::new(StoreKind::WindowsCredentialManager)
///     .with_auto_install(false)
///     .with_powershell("pwsh");
///
/// assert!(!config.auto_install);
/// assert_eq!(config.powershell, "pwsh");
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Store type
    pub store: StoreKind,

    /// Install the store module for the current user when it is missing
    /// (default: true)
    pub auto_install: bool,

    /// PowerShell module providing store access (default: "CredentialManager")
    pub module_name: String,

    /// PowerShell executable (default: "powershell.exe")
    pub powershell: String,

    /// Store-specific options
    pub options: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreKind::WindowsCredentialManager,
            auto_install: true,
            module_name: "CredentialManager".to_string(),
            powershell: "powershell.exe".to_string(),
            options: HashMap::new(),
        }
    }
}

impl Config {
    /// Creates a new configuration for the specified store.
    pub fn new(store: StoreKind) -> Self {
        Self {
            store,
            ..Default::default()
        }
    }

    /// Enables or disables the install attempt for a missing module.
    pub fn with_auto_install(mut self, auto_install: bool) -> Self {
        self.auto_install = auto_install;
        self
    }

    /// Sets the PowerShell module name.
    pub fn with_module_name(mut self, module_name: impl Into<String>) -> Self {
        self.module_name = module_name.into();
        self
    }

    /// Sets the PowerShell executable.
    ///
    /// Use `pwsh` for PowerShell 7 installs without Windows PowerShell.
    pub fn with_powershell(mut self, program: impl Into<String>) -> Self {
        self.powershell = program.into();
        self
    }

    /// Adds a store-specific option.
    ///
    /// **Windows Credential Manager:**
    /// - `install_scope`: scope passed to `Install-Module` (default: "CurrentUser")
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Gets a store-specific option value.
    pub fn get_option(&self, key: &str) -> Option<&String> {
        self.options.get(key)
    }
}
