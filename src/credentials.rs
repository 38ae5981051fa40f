//! Per-call bearer credentials.
//!
//! A [`tonic`] interceptor that attaches `authorization: Bearer <token>` to
//! every outbound call on a channel. The secure constructor marks the
//! credential as requiring transport security; the insecure constructor
//! exists for local and test use over plaintext connections, where the
//! application layer still authenticates even though the transport does not.

use tonic::metadata::{Ascii, MetadataValue};
use tonic::service::interceptor::InterceptedService;
use tonic::service::Interceptor;
use tonic::transport::Channel;
use tonic::{Request, Status};

use crate::error::{Error, Result};

/// Metadata key carrying the access token.
pub const AUTHORIZATION_METADATA_KEY: &str = "authorization";

/// Token type prefix for the authorization value.
pub const BEARER_PREFIX: &str = "Bearer ";

/// A channel with per-call bearer credentials attached.
pub type AuthChannel = InterceptedService<Channel, BearerAuth>;

/// Per-call credentials injecting a bearer access token.
#[derive(Debug, Clone)]
pub struct BearerAuth {
    header: MetadataValue<Ascii>,
    requires_tls: bool,
}

impl BearerAuth {
    /// Credentials for TLS channels.
    pub fn new(access_token: &str) -> Result<Self> {
        Self::build(access_token, true)
    }

    /// Credentials for plaintext channels.
    ///
    /// Does not require transport security itself, so the access token is
    /// sent in the clear; intended for local and test scenarios only.
    pub fn insecure(access_token: &str) -> Result<Self> {
        Self::build(access_token, false)
    }

    fn build(access_token: &str, requires_tls: bool) -> Result<Self> {
        let header = MetadataValue::try_from(format!("{}{}", BEARER_PREFIX, access_token))
            .map_err(|_| Error::InvalidAccessToken)?;
        Ok(Self {
            header,
            requires_tls,
        })
    }

    /// Whether these credentials may only be attached to a TLS channel.
    pub fn requires_transport_security(&self) -> bool {
        self.requires_tls
    }
}

impl Interceptor for BearerAuth {
    fn call(&mut self, mut request: Request<()>) -> std::result::Result<Request<()>, Status> {
        request
            .metadata_mut()
            .insert(AUTHORIZATION_METADATA_KEY, self.header.clone());
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interceptor_attaches_bearer_header() {
        let mut auth = BearerAuth::new("access-token").unwrap();
        let request = auth.call(Request::new(())).unwrap();

        let value = request
            .metadata()
            .get(AUTHORIZATION_METADATA_KEY)
            .and_then(|v| v.to_str().ok())
            .unwrap();
        assert_eq!(value, "Bearer access-token");
    }

    #[test]
    fn test_secure_credentials_require_tls() {
        let auth = BearerAuth::new("t").unwrap();
        assert!(auth.requires_transport_security());
    }

    #[test]
    fn test_insecure_credentials_do_not_require_tls() {
        let auth = BearerAuth::insecure("t").unwrap();
        assert!(!auth.requires_transport_security());
    }

    #[test]
    fn test_non_ascii_token_rejected() {
        let result = BearerAuth::new("jeton-d'accès-\u{00e9}");
        assert!(matches!(result, Err(Error::InvalidAccessToken)));
    }

    #[test]
    fn test_token_with_control_characters_rejected() {
        let result = BearerAuth::insecure("line\nbreak");
        assert!(matches!(result, Err(Error::InvalidAccessToken)));
    }
}
