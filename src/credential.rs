//! Credential records as returned by a credential store.

use crate::CredfetchError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A credential stored in the Windows Credential Manager.
///
/// Only `user_name` takes part in the lookup. Everything else is passed
/// through untouched from the store.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct StoredCredential {
    /// Account the credential belongs to
    pub user_name: String,

    /// Secret value
    #[serde(default)]
    pub password: String,

    /// Resource the credential applies to (host name, server path, ...)
    pub target_name: String,

    /// Credential classification
    #[serde(rename = "Type")]
    pub credential_type: CredentialType,

    /// Persistence scope
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persist: Option<PersistScope>,

    /// Free-form comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// When the credential was last written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_written: Option<DateTime<Utc>>,
}

impl StoredCredential {
    /// Creates a generic credential with no metadata.
    ///
    /// # Example
    ///
    /// ```
    /// use credfetch::{CredentialType, StoredCredential};
    ///
    /// let cred = StoredCredential::new("www.example.com", "alice@example.com", "hunter2");
    /// assert_eq!(cred.target_name, "www.example.com");
    /// assert_eq!(cred.credential_type, CredentialType::Generic);
    /// ```
    pub fn new(
        target_name: impl Into<String>,
        user_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            user_name: user_name.into(),
            password: password.into(),
            target_name: target_name.into(),
            credential_type: CredentialType::default(),
            persist: None,
            comment: None,
            last_written: None,
        }
    }

    /// Sets the credential type.
    pub fn with_type(mut self, credential_type: CredentialType) -> Self {
        self.credential_type = credential_type;
        self
    }

    /// Sets the persistence scope.
    pub fn with_persist(mut self, persist: PersistScope) -> Self {
        self.persist = Some(persist);
        self
    }

    /// Sets the comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

impl fmt::Debug for StoredCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredCredential")
            .field("user_name", &self.user_name)
            .field("password", &"<redacted>")
            .field("target_name", &self.target_name)
            .field("credential_type", &self.credential_type)
            .field("persist", &self.persist)
            .field("comment", &self.comment)
            .field("last_written", &self.last_written)
            .finish()
    }
}

/// Credential type as understood by Windows Credential Manager.
///
/// Exactly these eight literals are accepted; parsing anything else fails
/// with [`CredfetchError::InvalidCredentialType`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CredentialType {
    /// Generic credential (web sites, applications)
    #[default]
    Generic,
    /// Domain password credential
    DomainPassword,
    /// Domain certificate credential
    DomainCertificate,
    /// Domain password readable by the owning application
    DomainVisiblePassword,
    /// Generic certificate credential
    GenericCertificate,
    /// Extended domain credential
    DomainExtended,
    /// Upper bound marker of the native enumeration
    Maximum,
    /// Extended upper bound marker of the native enumeration
    MaximumEx,
}

impl CredentialType {
    /// All supported types, in native enumeration order.
    pub const ALL: [CredentialType; 8] = [
        Self::Generic,
        Self::DomainPassword,
        Self::DomainCertificate,
        Self::DomainVisiblePassword,
        Self::GenericCertificate,
        Self::DomainExtended,
        Self::Maximum,
        Self::MaximumEx,
    ];

    /// Returns the literal used on the command line and by PowerShell.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generic => "GENERIC",
            Self::DomainPassword => "DOMAIN_PASSWORD",
            Self::DomainCertificate => "DOMAIN_CERTIFICATE",
            Self::DomainVisiblePassword => "DOMAIN_VISIBLE_PASSWORD",
            Self::GenericCertificate => "GENERIC_CERTIFICATE",
            Self::DomainExtended => "DOMAIN_EXTENDED",
            Self::Maximum => "MAXIMUM",
            Self::MaximumEx => "MAXIMUM_EX",
        }
    }
}

impl fmt::Display for CredentialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CredentialType {
    type Err = CredfetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CredfetchError::InvalidCredentialType(s.to_string()))
    }
}

/// Where a credential persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PersistScope {
    /// Lives for the current logon session
    Session,
    /// Persists across logons on this machine
    LocalMachine,
    /// Roams with the user profile
    Enterprise,
}

impl fmt::Display for PersistScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Session => write!(f, "SESSION"),
            Self::LocalMachine => write!(f, "LOCAL_MACHINE"),
            Self::Enterprise => write!(f, "ENTERPRISE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_literals() {
        for t in CredentialType::ALL {
            assert_eq!(t.as_str().parse::<CredentialType>().unwrap(), t);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            "domain_password".parse::<CredentialType>().unwrap(),
            CredentialType::DomainPassword
        );
    }

    #[test]
    fn test_parse_rejects_unknown_literals() {
        for bad in ["", "WEB", "GENERIC ", "DOMAIN-PASSWORD", "CRED_TYPE_GENERIC"] {
            let result = bad.parse::<CredentialType>();
            assert!(
                matches!(result, Err(CredfetchError::InvalidCredentialType(_))),
                "expected '{}' to be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_default_type_is_generic() {
        assert_eq!(CredentialType::default(), CredentialType::Generic);
        assert_eq!(StoredCredential::new("u", "p", "t").credential_type, CredentialType::Generic);
    }

    #[test]
    fn test_debug_redacts_password() {
        let cred = StoredCredential::new("host", "alice", "s3cr3t");
        let debug = format!("{:?}", cred);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("s3cr3t"));
    }

    #[test]
    fn test_serializes_with_pascal_case_keys() {
        let cred = StoredCredential::new("www.example.com", "alice", "pw")
            .with_type(CredentialType::DomainPassword)
            .with_persist(PersistScope::LocalMachine);
        let json = serde_json::to_value(&cred).unwrap();

        assert_eq!(json["UserName"], "alice");
        assert_eq!(json["TargetName"], "www.example.com");
        assert_eq!(json["Type"], "DOMAIN_PASSWORD");
        assert_eq!(json["Persist"], "LOCAL_MACHINE");
        assert!(json.get("Comment").is_none());
    }
}
