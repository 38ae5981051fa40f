//! Error types for the Lattice platform client.

use thiserror::Error;

/// Error type for connection factory operations.
///
/// Token-exchange and dial failures propagate the underlying transport or
/// RPC error unmodified; this path is single-shot, with no retry.
#[derive(Debug, Error)]
pub enum Error {
    /// Channel configuration or dialing failed.
    #[error("transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    /// The sign-in RPC was rejected.
    #[error("sign-in failed: {0}")]
    SignIn(#[from] tonic::Status),

    /// The access token cannot be carried as ASCII header metadata.
    #[error("access token is not valid ASCII header data")]
    InvalidAccessToken,
}

/// Result type alias for connection factory operations.
pub type Result<T> = std::result::Result<T, Error>;
