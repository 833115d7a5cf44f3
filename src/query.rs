//! Lookup queries, store dispatch and user name matching.

use crate::validation::{validate_target, validate_user_name};
use crate::{CredentialStore, CredentialType, Result, StoredCredential};
use std::fmt;

/// What to look up.
///
/// The target and type filters are independent options: `None` means the
/// filter is not applied at all.
///
/// # Example
///
/// ```
/// use credfetch::{CredentialQuery, CredentialType};
///
/// let query = CredentialQuery::new("alice@example.com")
///     .with_target("www.example.com");
///
/// assert_eq!(query.target.as_deref(), Some("www.example.com"));
/// assert_eq!(query.credential_type, Some(CredentialType::Generic));
///
/// let any_type = query.without_type_filter();
/// assert_eq!(any_type.credential_type, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialQuery {
    /// Owner of the credential, matched case-insensitively
    pub user_name: String,
    /// Store target filter
    pub target: Option<String>,
    /// Credential type filter (default: `GENERIC`)
    pub credential_type: Option<CredentialType>,
}

impl CredentialQuery {
    /// Creates a query for `user_name` with no target filter and the
    /// `GENERIC` type filter.
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            target: None,
            credential_type: Some(CredentialType::default()),
        }
    }

    /// Restricts the lookup to one target.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Restricts the lookup to one credential type.
    pub fn with_type(mut self, credential_type: CredentialType) -> Self {
        self.credential_type = Some(credential_type);
        self
    }

    /// Removes the type filter so credentials of every type are considered.
    pub fn without_type_filter(mut self) -> Self {
        self.credential_type = None;
        self
    }

    /// Checks the user name and target before any store work.
    ///
    /// # Errors
    ///
    /// Returns [`CredfetchError::InvalidQuery`](crate::CredfetchError::InvalidQuery)
    /// for an empty or malformed user name or target.
    pub fn validate(&self) -> Result<()> {
        validate_user_name(&self.user_name)?;
        if let Some(target) = &self.target {
            validate_target(target)?;
        }
        Ok(())
    }
}

/// The store filter a query resolves to.
///
/// Each variant maps to exactly one [`CredentialStore`] lookup method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreFilter {
    /// Both a target and a type were given.
    TargetAndType(String, CredentialType),
    /// Only a target was given.
    Target(String),
    /// Only a type was given.
    Type(CredentialType),
    /// No filter at all.
    All,
}

impl StoreFilter {
    /// Picks the filter for a query.
    pub fn from_query(query: &CredentialQuery) -> Self {
        match (&query.target, query.credential_type) {
            (Some(target), Some(ty)) => Self::TargetAndType(target.clone(), ty),
            (Some(target), None) => Self::Target(target.clone()),
            (None, Some(ty)) => Self::Type(ty),
            (None, None) => Self::All,
        }
    }

    /// Name of the store operation this filter runs.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::TargetAndType(..) => "find_by_target_and_type",
            Self::Target(_) => "find_by_target",
            Self::Type(_) => "find_by_type",
            Self::All => "find_all",
        }
    }

    /// Runs the matching lookup against `store`.
    ///
    /// # Errors
    ///
    /// Propagates whatever the store reports.
    pub async fn fetch(&self, store: &dyn CredentialStore) -> Result<Vec<StoredCredential>> {
        match self {
            Self::TargetAndType(target, ty) => store.find_by_target_and_type(target, *ty).await,
            Self::Target(target) => store.find_by_target(target).await,
            Self::Type(ty) => store.find_by_type(*ty).await,
            Self::All => store.find_all().await,
        }
    }
}

impl fmt::Display for StoreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TargetAndType(target, ty) => write!(f, "target={} type={}", target, ty),
            Self::Target(target) => write!(f, "target={}", target),
            Self::Type(ty) => write!(f, "type={}", ty),
            Self::All => write!(f, "all"),
        }
    }
}

/// Returns the first candidate owned by `user_name`.
///
/// The comparison is an exact match after lower-casing both sides. There is no
/// wildcard or partial matching.
///
/// # Example
///
/// ```
/// use credfetch::{query::select_user, StoredCredential};
///
/// let candidates = vec![
///     StoredCredential::new("host", "bob@x.com", "1"),
///     StoredCredential::new("host", "Alpha@x.com", "2"),
/// ];
///
/// let found = select_user(candidates, "alpha@X.COM").unwrap();
/// assert_eq!(found.password, "2");
/// ```
pub fn select_user(
    candidates: impl IntoIterator<Item = StoredCredential>,
    user_name: &str,
) -> Option<StoredCredential> {
    let wanted = user_name.to_lowercase();
    candidates
        .into_iter()
        .find(|cred| cred.user_name.to_lowercase() == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_selection() {
        let base = CredentialQuery::new("alice");

        assert_eq!(
            StoreFilter::from_query(&base.clone().with_target("host")),
            StoreFilter::TargetAndType("host".to_string(), CredentialType::Generic)
        );
        assert_eq!(
            StoreFilter::from_query(&base.clone().with_target("host").without_type_filter()),
            StoreFilter::Target("host".to_string())
        );
        assert_eq!(
            StoreFilter::from_query(&base.clone().with_type(CredentialType::DomainPassword)),
            StoreFilter::Type(CredentialType::DomainPassword)
        );
        assert_eq!(
            StoreFilter::from_query(&base.without_type_filter()),
            StoreFilter::All
        );
    }

    #[test]
    fn test_filter_display() {
        let filter = StoreFilter::TargetAndType("host".to_string(), CredentialType::Generic);
        assert_eq!(filter.to_string(), "target=host type=GENERIC");
        assert_eq!(filter.operation(), "find_by_target_and_type");
        assert_eq!(StoreFilter::All.to_string(), "all");
    }

    #[test]
    fn test_select_user_is_exact() {
        let candidates = vec![
            StoredCredential::new("host", "alice.smith", "1"),
            StoredCredential::new("host", "alic", "2"),
        ];
        assert!(select_user(candidates.clone(), "alice").is_none());
        assert!(select_user(candidates, "alic*").is_none());
    }

    #[test]
    fn test_select_user_returns_first_match() {
        let candidates = vec![
            StoredCredential::new("a", "alice", "first"),
            StoredCredential::new("b", "ALICE", "second"),
        ];
        assert_eq!(select_user(candidates, "Alice").unwrap().password, "first");
    }

    #[test]
    fn test_validate_rejects_empty_target() {
        let query = CredentialQuery::new("alice").with_target("");
        assert!(query.validate().is_err());
        assert!(CredentialQuery::new("alice").validate().is_ok());
    }
}
