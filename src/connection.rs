//! Authenticated channel construction.
//!
//! The factory performs a two-step connect: exchange the bootstrap token for
//! a short-lived access token over a transient channel, then dial the final
//! channel with the same transport security mode and attach the access token
//! as per-call credentials.

use tonic::service::interceptor::InterceptedService;
use tonic::transport::{ClientTlsConfig, Endpoint};
use tracing::debug;

use crate::config::ConnectionConfig;
use crate::credentials::{AuthChannel, BearerAuth};
use crate::error::Result;
use crate::proto::{AuthServiceClient, SignInWithCustomTokenRequest};

/// Factory for authenticated channels to the platform API.
///
/// Holds immutable configuration; construct once per process.
#[derive(Debug, Clone)]
pub struct ConnectionFactory {
    config: ConnectionConfig,
}

impl ConnectionFactory {
    /// Build a factory from the process environment.
    ///
    /// Returns `None` when the environment does not provide a target and a
    /// bootstrap token; see [`ConnectionConfig::from_env`].
    pub fn from_env() -> Option<Self> {
        ConnectionConfig::from_env().map(Self::new)
    }

    pub fn new(config: ConnectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Open an authenticated channel to the configured target.
    ///
    /// # Errors
    ///
    /// Token-exchange and dial failures propagate unmodified; there is no
    /// retry. The transient sign-in channel is released before returning on
    /// every path.
    pub async fn connect(&self) -> Result<AuthChannel> {
        let access_token = self.fetch_access_token().await?;
        let auth = if self.config.secure {
            BearerAuth::new(&access_token)?
        } else {
            BearerAuth::insecure(&access_token)?
        };
        let channel = self.endpoint()?.connect().await?;
        debug!(endpoint = %self.config.target, secure = self.config.secure, "channel established");
        Ok(InterceptedService::new(channel, auth))
    }

    /// Exchange the bootstrap token for a short-lived access token.
    ///
    /// The channel opened here lives only for this call; it is dropped when
    /// the function returns, success or error.
    async fn fetch_access_token(&self) -> Result<String> {
        let channel = self.endpoint()?.connect().await?;
        let mut client = AuthServiceClient::new(channel);
        let response = client
            .sign_in_with_custom_token(SignInWithCustomTokenRequest {
                token: self.config.custom_token.clone(),
            })
            .await?;
        debug!(endpoint = %self.config.target, "access token obtained");
        Ok(response.into_inner().token)
    }

    fn endpoint(&self) -> Result<Endpoint> {
        let mut endpoint = Endpoint::from_shared(self.target_uri())?;
        if self.config.secure {
            endpoint = endpoint.tls_config(ClientTlsConfig::new().with_native_roots())?;
        }
        Ok(endpoint)
    }

    /// URI for the configured target; the scheme follows the transport
    /// security mode.
    fn target_uri(&self) -> String {
        let scheme = if self.config.secure { "https" } else { "http" };
        format!("{}://{}", scheme, self.config.target)
    }
}
