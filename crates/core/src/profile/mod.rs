mod error;
mod resolve;
mod types;

pub use error::{ConfigError, Result};
pub use resolve::{parse_profiles, resolve_profile};
pub use types::{
    ConnectionMode, ConnectionProfile, CredentialSource, ResolvedProfile, DEFAULT_PROFILE,
};
