//! Lattice Platform Client Utilities
//!
//! Two small conveniences for clients of the Lattice platform API:
//!
//! 1. **Structured statuses**: convert any failure into a gRPC status with
//!    machine-readable diagnostics (reason code, correlation id, stack
//!    excerpt, remediation suggestion) and serialize it as a JSON failure
//!    report for pipeline artifacts.
//! 2. **Authenticated channels**: exchange a long-lived bootstrap token for
//!    a short-lived access token and open a channel that attaches it as an
//!    `authorization` header on every call.
//!
//! # Quick Start
//!
//! ```no_run
//! use lattice_client::{failure_report, to_status, ConnectionFactory};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Status construction and reporting.
//!     let status = to_status("disk full");
//!     let report = failure_report(status);
//!
//!     // Authenticated channel from LATTICE_API_* environment variables.
//!     if let Some(factory) = ConnectionFactory::from_env() {
//!         let channel = factory.connect().await?;
//!         let _ = channel;
//!     }
//!     Ok(())
//! }
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]

mod config;
mod connection;
mod credentials;
mod error;
mod proto;
mod report;
mod status;

pub use config::{ConnectionConfig, ENV_API_CUSTOM_TOKEN, ENV_API_SECURE, ENV_API_TARGET};
pub use connection::ConnectionFactory;
pub use credentials::{AuthChannel, BearerAuth, AUTHORIZATION_METADATA_KEY, BEARER_PREFIX};
pub use error::{Error, Result};
pub use proto::{
    AuthServiceClient, DebugInfo, ErrorInfo, SignInWithCustomTokenRequest,
    SignInWithCustomTokenResponse, SuggestionInfo,
};
pub use report::{failure_report, status_report};
pub use status::{
    to_status, to_status_with_depth, DetailRecord, Failure, StructuredStatus, DEFAULT_STACK_LINES,
    INTERNAL_ERROR_REASON, PLATFORM_ERROR_DOMAIN,
};
