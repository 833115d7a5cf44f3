//! Parsing of `Get-StoredCredential` output.

use crate::{CredentialType, CredfetchError, PersistScope, Result, StoredCredential};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CredentialRow {
    #[serde(default)]
    user_name: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    target_name: Option<String>,
    /// Enum name, or the numeric value on older module versions.
    #[serde(default, rename = "Type")]
    credential_type: Option<serde_json::Value>,
    #[serde(default)]
    persist: Option<String>,
    #[serde(default)]
    comment: Option<String>,
    #[serde(default)]
    last_written: Option<String>,
}

/// Parses the JSON printed by the lookup script.
///
/// PowerShell prints nothing, a single object or an array depending on how
/// many credentials matched and which version runs the script; all three are
/// accepted.
///
/// # Errors
///
/// Returns [`CredfetchError::Other`] when the output is not valid JSON. Rows
/// whose credential type is not recognised are skipped with a warning so the
/// remaining rows stay usable.
pub fn parse_credentials(output: &str) -> Result<Vec<StoredCredential>> {
    let output = output.trim();
    if output.is_empty() || output == "null" {
        return Ok(Vec::new());
    }

    let rows: Vec<CredentialRow> = if output.starts_with('[') {
        serde_json::from_str(output).map_err(|e| {
            CredfetchError::Other(anyhow::anyhow!("Failed to parse credential list: {}", e))
        })?
    } else {
        let single: CredentialRow = serde_json::from_str(output).map_err(|e| {
            CredfetchError::Other(anyhow::anyhow!("Failed to parse credential: {}", e))
        })?;
        vec![single]
    };

    Ok(rows.into_iter().filter_map(into_credential).collect())
}

fn into_credential(row: CredentialRow) -> Option<StoredCredential> {
    let raw_type = match row.credential_type {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    };
    let credential_type = match non_empty(raw_type) {
        Some(raw) => match parse_type(&raw) {
            Some(ty) => ty,
            None => {
                warn!(
                    target_name = row.target_name.as_deref().unwrap_or_default(),
                    credential_type = %raw,
                    "skipping credential with unknown type"
                );
                return None;
            }
        },
        None => CredentialType::Generic,
    };

    Some(StoredCredential {
        user_name: row.user_name.unwrap_or_default(),
        password: row.password.unwrap_or_default(),
        target_name: row.target_name.unwrap_or_default(),
        credential_type,
        persist: non_empty(row.persist).and_then(|raw| parse_persist(&raw)),
        comment: non_empty(row.comment),
        last_written: non_empty(row.last_written).and_then(|raw| {
            DateTime::parse_from_rfc3339(&raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        }),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Folds `DOMAIN_PASSWORD`, `DomainPassword` and `domainpassword` together.
fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Accepts the enum name in any casing, or the native `CRED_TYPE_*` value.
fn parse_type(raw: &str) -> Option<CredentialType> {
    if let Ok(code) = raw.trim().parse::<u32>() {
        return match code {
            1 => Some(CredentialType::Generic),
            2 => Some(CredentialType::DomainPassword),
            3 => Some(CredentialType::DomainCertificate),
            4 => Some(CredentialType::DomainVisiblePassword),
            5 => Some(CredentialType::GenericCertificate),
            6 => Some(CredentialType::DomainExtended),
            7 => Some(CredentialType::Maximum),
            1007 => Some(CredentialType::MaximumEx),
            _ => None,
        };
    }

    let wanted = normalize(raw);
    CredentialType::ALL
        .iter()
        .copied()
        .find(|t| normalize(t.as_str()) == wanted)
}

fn parse_persist(raw: &str) -> Option<PersistScope> {
    match normalize(raw).as_str() {
        "SESSION" => Some(PersistScope::Session),
        "LOCALMACHINE" => Some(PersistScope::LocalMachine),
        "ENTERPRISE" => Some(PersistScope::Enterprise),
        _ => None,
    }
}
