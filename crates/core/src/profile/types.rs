use serde::{Deserialize, Serialize};

/// Name of the profile used when none is requested.
pub const DEFAULT_PROFILE: &str = "default";

/// How the connector should treat credentials for a profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionMode {
    /// Local emulator. Requests are never signed.
    Local,
    /// Any other value, including an absent `mode` key.
    #[default]
    #[serde(other)]
    Remote,
}

/// A single record of the profile configuration file.
///
/// Every field is optional on disk; `region` is checked when the profile is
/// resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_access_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamo_db_endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ConnectionMode>,
}

impl ConnectionProfile {
    /// Creates an unlabeled profile for the given region.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: Some(region.into()),
            ..Self::default()
        }
    }

    /// Sets the profile name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.profile = Some(name.into());
        self
    }

    /// Sets explicit access keys.
    pub fn with_keys(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self.secret_access_key = Some(secret_access_key.into());
        self
    }

    /// Sets a custom DynamoDB endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.dynamo_db_endpoint = Some(endpoint.into());
        self
    }

    /// Sets the connection mode.
    pub fn with_mode(mut self, mode: ConnectionMode) -> Self {
        self.mode = Some(mode);
        self
    }
}

/// Where the connector gets request credentials from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Unsigned requests (local mode).
    Disabled,
    /// Keys taken verbatim from the profile.
    Static {
        access_key_id: String,
        secret_access_key: String,
    },
    /// Shared credentials discovery, scoped to `profile` when set.
    Ambient { profile: Option<String> },
}

/// A profile that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProfile {
    pub name: String,
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub endpoint: Option<String>,
    pub mode: ConnectionMode,
}

impl ResolvedProfile {
    /// Returns true if this is the default profile.
    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_PROFILE
    }

    /// Decides how requests made with this profile are authenticated.
    ///
    /// Local mode wins over everything else. Explicit keys are only used when
    /// both halves are present.
    pub fn credential_source(&self) -> CredentialSource {
        if self.mode == ConnectionMode::Local {
            return CredentialSource::Disabled;
        }

        match (&self.access_key_id, &self.secret_access_key) {
            (Some(access_key_id), Some(secret_access_key)) => CredentialSource::Static {
                access_key_id: access_key_id.clone(),
                secret_access_key: secret_access_key.clone(),
            },
            _ => CredentialSource::Ambient {
                profile: (!self.is_default()).then(|| self.name.clone()),
            },
        }
    }
}
