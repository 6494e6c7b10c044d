//! Builds DynamoDB client handles from connection profiles (Imperative Shell).

use std::fmt;

use aws_config::profile::ProfileFileCredentialsProvider;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::SharedCredentialsProvider;
use aws_credential_types::Credentials;
use aws_sdk_dynamodb::Client;
use dynamigrate_core::profile::{
    resolve_profile, CredentialSource, ResolvedProfile, Result, DEFAULT_PROFILE,
};

use crate::config::ProfileSource;
use crate::storage::WaitPolicy;

/// Provider name attached to credentials taken from the profile file.
pub const STATIC_PROVIDER_NAME: &str = "DynamigrateProfile";

/// Provider name of the placeholder keys used to sign local-mode requests.
pub const LOCAL_PROVIDER_NAME: &str = "DynamigrateLocal";

/// Fixed keys for local endpoints, which accept any signature.
///
/// Never exposed through [`ClientHandle::credentials`]; without an identity
/// the SDK refuses to sign, and so to send, any request.
fn local_placeholder() -> SharedCredentialsProvider {
    SharedCredentialsProvider::new(Credentials::new(
        "local",
        "local",
        None,
        None,
        LOCAL_PROVIDER_NAME,
    ))
}

/// Ambient credential discovery, used when a profile carries no keys.
pub trait AmbientCredentials: Send + Sync {
    /// Returns a provider for the given named profile, or for the default
    /// profile when `profile` is `None`.
    fn provider(&self, profile: Option<&str>) -> SharedCredentialsProvider;
}

/// Reads credentials from the shared AWS credentials file.
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedCredentialsFile;

impl AmbientCredentials for SharedCredentialsFile {
    fn provider(&self, profile: Option<&str>) -> SharedCredentialsProvider {
        let mut builder = ProfileFileCredentialsProvider::builder();
        if let Some(name) = profile {
            builder = builder.profile_name(name);
        }
        SharedCredentialsProvider::new(builder.build())
    }
}

/// A DynamoDB client plus the settings it was built with.
#[derive(Clone)]
pub struct ClientHandle {
    pub(crate) client: Client,
    pub(crate) wait: WaitPolicy,
    profile: String,
    region: String,
    endpoint: Option<String>,
    credentials: Option<SharedCredentialsProvider>,
}

impl ClientHandle {
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn profile_name(&self) -> &str {
        &self.profile
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Custom endpoint, if the profile set one.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Credentials taken from the profile or ambient discovery. `None` in
    /// local mode, where requests carry placeholder keys.
    pub fn credentials(&self) -> Option<&SharedCredentialsProvider> {
        self.credentials.as_ref()
    }

    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint {
            Some(url) => format!("DynamoDB at {} (profile: {})", url, self.profile),
            None => format!(
                "AWS DynamoDB (region: {}, profile: {})",
                self.region, self.profile
            ),
        }
    }

    /// Overrides how long `wait_until_active` polls.
    pub fn with_wait_policy(mut self, wait: WaitPolicy) -> Self {
        self.wait = wait;
        self
    }
}

impl fmt::Debug for ClientHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientHandle")
            .field("profile", &self.profile)
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("has_credentials", &self.credentials.is_some())
            .finish()
    }
}

/// Resolves a profile and builds a client for it.
pub struct Connector<S, A = SharedCredentialsFile> {
    source: S,
    ambient: A,
}

impl<S: ProfileSource> Connector<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            ambient: SharedCredentialsFile,
        }
    }
}

impl<S: ProfileSource, A: AmbientCredentials> Connector<S, A> {
    /// Replaces the ambient credential discovery.
    pub fn with_ambient_credentials<B: AmbientCredentials>(self, ambient: B) -> Connector<S, B> {
        Connector {
            source: self.source,
            ambient,
        }
    }

    /// Loads the profiles, resolves `profile_name` (default: `"default"`) and
    /// builds a client for it.
    ///
    /// Only profile loading and validation can fail.
    pub async fn connect(&self, profile_name: Option<&str>) -> Result<ClientHandle> {
        let name = profile_name.unwrap_or(DEFAULT_PROFILE);
        let profiles = self.source.load_profiles().await?;
        let profile = resolve_profile(&profiles, name)?;

        Ok(self.build(&profile).await)
    }

    /// Builds a client for an already resolved profile.
    pub async fn build(&self, profile: &ResolvedProfile) -> ClientHandle {
        let credentials = match profile.credential_source() {
            CredentialSource::Disabled => None,
            CredentialSource::Static {
                access_key_id,
                secret_access_key,
            } => Some(SharedCredentialsProvider::new(Credentials::new(
                access_key_id,
                secret_access_key,
                None,
                None,
                STATIC_PROVIDER_NAME,
            ))),
            CredentialSource::Ambient { profile } => {
                Some(self.ambient.provider(profile.as_deref()))
            }
        };

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(profile.region.clone()));

        if let Some(endpoint) = &profile.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        loader = match &credentials {
            Some(provider) => loader.credentials_provider(provider.clone()),
            None => loader.credentials_provider(local_placeholder()),
        };

        let sdk_config = loader.load().await;

        tracing::debug!(
            profile = %profile.name,
            region = %profile.region,
            endpoint = ?profile.endpoint,
            has_credentials = credentials.is_some(),
            "Built DynamoDB client"
        );

        ClientHandle {
            client: Client::new(&sdk_config),
            wait: WaitPolicy::default(),
            profile: profile.name.clone(),
            region: profile.region.clone(),
            endpoint: profile.endpoint.clone(),
            credentials,
        }
    }
}
