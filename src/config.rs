//! Connection configuration for the Lattice platform client.

use std::env;
use std::process;

use tracing::error;

/// Target address of the platform API (`host:port`).
pub const ENV_API_TARGET: &str = "LATTICE_API_TARGET";

/// Long-lived bootstrap token exchanged for a short-lived access token.
pub const ENV_API_CUSTOM_TOKEN: &str = "LATTICE_API_CUSTOM_TOKEN";

/// Transport security flag (boolean, default `true`).
pub const ENV_API_SECURE: &str = "LATTICE_API_SECURE";

/// Immutable connection configuration, read once from the environment.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Network address of the platform API (`host:port`).
    pub target: String,

    /// Bootstrap token used for the sign-in exchange.
    pub custom_token: String,

    /// Whether to use TLS for both the token exchange and the final channel.
    pub secure: bool,
}

/// Malformed transport-security flag value.
#[derive(Debug, PartialEq)]
struct InvalidSecureFlag(String);

impl ConnectionConfig {
    /// Read configuration from the process environment.
    ///
    /// Returns `None` when the target or the bootstrap token is missing or
    /// empty; no client can be constructed without them. A malformed
    /// transport-security flag is a broken deployment and terminates the
    /// process.
    pub fn from_env() -> Option<Self> {
        match Self::from_lookup(|key| env::var(key).ok()) {
            Ok(config) => config,
            Err(InvalidSecureFlag(value)) => {
                error!(
                    value = %value,
                    variable = ENV_API_SECURE,
                    "invalid transport security flag, expected a boolean"
                );
                process::exit(1);
            }
        }
    }

    fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Option<Self>, InvalidSecureFlag> {
        let Some(target) = lookup(ENV_API_TARGET).filter(|v| !v.is_empty()) else {
            return Ok(None);
        };
        let Some(custom_token) = lookup(ENV_API_CUSTOM_TOKEN).filter(|v| !v.is_empty()) else {
            return Ok(None);
        };
        let secure = match lookup(ENV_API_SECURE) {
            None => true,
            Some(value) => parse_bool(&value).ok_or(InvalidSecureFlag(value))?,
        };
        Ok(Some(Self {
            target,
            custom_token,
            secure,
        }))
    }
}

/// Parse a boolean environment value. Accepts `true`/`false` in any case
/// plus the `1`/`0` shorthand.
fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
