//! Profile selection and validation (Functional Core - no I/O).

use super::error::{ConfigError, Result};
use super::types::{ConnectionProfile, ResolvedProfile, DEFAULT_PROFILE};

/// Parses the profile configuration file contents.
///
/// The file holds a JSON array of profile records.
pub fn parse_profiles(contents: &str) -> Result<Vec<ConnectionProfile>> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
}

/// Selects the profile called `name` and validates it.
///
/// An entry labeled `name` always wins. For the default profile, the first
/// unlabeled entry is used when nothing is labeled `"default"`.
pub fn resolve_profile(profiles: &[ConnectionProfile], name: &str) -> Result<ResolvedProfile> {
    let profile = find_profile(profiles, name)
        .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))?;

    let region = non_empty(&profile.region)
        .ok_or_else(|| ConfigError::MissingRegion(name.to_string()))?;

    Ok(ResolvedProfile {
        name: name.to_string(),
        region,
        access_key_id: non_empty(&profile.access_key_id),
        secret_access_key: non_empty(&profile.secret_access_key),
        endpoint: non_empty(&profile.dynamo_db_endpoint),
        mode: profile.mode.unwrap_or_default(),
    })
}

fn find_profile<'a>(profiles: &'a [ConnectionProfile], name: &str) -> Option<&'a ConnectionProfile> {
    let labeled = profiles
        .iter()
        .find(|p| p.profile.as_deref() == Some(name));

    if labeled.is_some() || name != DEFAULT_PROFILE {
        return labeled;
    }

    profiles.iter().find(|p| p.profile.is_none())
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
