//! Input validation for lookup parameters.
//!
//! Values end up inside PowerShell scripts, so anything that cannot be a real
//! credential field is rejected before a store is touched.

use crate::{CredfetchError, Result};

/// Longest user name Credential Manager accepts (`CRED_MAX_USERNAME_LENGTH`).
pub const MAX_USER_NAME_LENGTH: usize = 513;

/// Longest generic target name (`CRED_MAX_GENERIC_TARGET_NAME_LENGTH`).
pub const MAX_TARGET_LENGTH: usize = 32767;

/// Validates the user name of a lookup.
///
/// # Errors
///
/// Returns [`CredfetchError::InvalidQuery`] if the name is empty, too long, or
/// contains NUL or control characters.
///
/// # Example
///
/// ```
/// use credfetch::validation::validate_user_name;
///
/// assert!(validate_user_name("stevejoseph@sampledomain.com").is_ok());
/// assert!(validate_user_name(r"CORP\svc-build").is_ok());
///
/// assert!(validate_user_name("").is_err());
/// assert!(validate_user_name("name\0").is_err());
/// ```
pub fn validate_user_name(name: &str) -> Result<()> {
    validate_field("user name", name, MAX_USER_NAME_LENGTH)
}

/// Validates a target filter.
///
/// Uses the same rules as [`validate_user_name`] with the target length limit.
pub fn validate_target(target: &str) -> Result<()> {
    validate_field("target", target, MAX_TARGET_LENGTH)
}

fn validate_field(field: &str, value: &str, max_len: usize) -> Result<()> {
    if value.is_empty() {
        return Err(CredfetchError::InvalidQuery(format!(
            "{} cannot be empty",
            field
        )));
    }

    if value.chars().count() > max_len {
        return Err(CredfetchError::InvalidQuery(format!(
            "{} exceeds maximum length of {} characters",
            field, max_len
        )));
    }

    if value.contains('\0') {
        return Err(CredfetchError::InvalidQuery(format!(
            "{} contains null byte",
            field
        )));
    }

    if value.chars().any(char::is_control) {
        return Err(CredfetchError::InvalidQuery(format!(
            "{} contains control characters",
            field
        )));
    }

    Ok(())
}

/// Escapes a value for use inside a PowerShell single-quoted string.
///
/// Single-quoted strings are not interpolated, so doubling the quote is the
/// only escape needed.
pub fn escape_powershell_string(s: &str) -> String {
    s.replace('\'', "''")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_user_names() {
        assert!(validate_user_name("alice").is_ok());
        assert!(validate_user_name("Alpha@x.com").is_ok());
        assert!(validate_user_name(r"DOMAIN\user").is_ok());
        assert!(validate_user_name("o'brien").is_ok());
    }

    #[test]
    fn test_empty_user_name() {
        let result = validate_user_name("");
        assert!(result.unwrap_err().to_string().contains("user name cannot be empty"));
    }

    #[test]
    fn test_user_name_too_long() {
        let long_name = "a".repeat(MAX_USER_NAME_LENGTH + 1);
        let result = validate_user_name(&long_name);
        assert!(result.unwrap_err().to_string().contains("maximum length"));

        assert!(validate_user_name(&"a".repeat(MAX_USER_NAME_LENGTH)).is_ok());
    }

    #[test]
    fn test_null_byte() {
        let result = validate_target("www\0example");
        assert!(result.unwrap_err().to_string().contains("null byte"));
    }

    #[test]
    fn test_control_characters() {
        let result = validate_target("www.example.com\r\nRemove-Item");
        assert!(result.unwrap_err().to_string().contains("control"));
    }

    #[test]
    fn test_targets() {
        assert!(validate_target("www.sampledomain.com").is_ok());
        assert!(validate_target("Domain:target=fileserver01").is_ok());
        assert!(validate_target(r"\\server\share").is_ok());
        assert!(validate_target("").is_err());
    }

    #[test]
    fn test_escape_powershell_string() {
        assert_eq!(escape_powershell_string("it's a test"), "it''s a test");
        assert_eq!(escape_powershell_string("no quotes"), "no quotes");
    }
}
