//! Wire types for the Lattice platform API.
//!
//! These are hand-maintained prost messages for the handful of proto schemas
//! this crate exchanges: the `google.rpc` status/detail messages carried in
//! the `grpc-status-details-bin` metadata, the platform's own
//! `lattice.v1.SuggestionInfo` detail, and the sign-in RPC pair.
//!
//! The serde derives mirror protojson output (camelCase field names) so the
//! same types back both the wire encoding and JSON failure reports.

use tonic::codegen::*;

/// Any type URL for [`ErrorInfo`].
pub const ERROR_INFO_TYPE_URL: &str = "type.googleapis.com/google.rpc.ErrorInfo";
/// Any type URL for [`DebugInfo`].
pub const DEBUG_INFO_TYPE_URL: &str = "type.googleapis.com/google.rpc.DebugInfo";
/// Any type URL for [`SuggestionInfo`].
pub const SUGGESTION_INFO_TYPE_URL: &str = "type.googleapis.com/lattice.v1.SuggestionInfo";

/// `google.rpc.ErrorInfo`: machine-readable cause of an error.
#[derive(Clone, PartialEq, ::prost::Message, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorInfo {
    /// Stable, UPPER_SNAKE_CASE reason code.
    #[prost(string, tag = "1")]
    pub reason: ::prost::alloc::string::String,

    /// Logical grouping for the reason, typically the service domain.
    #[prost(string, tag = "2")]
    pub domain: ::prost::alloc::string::String,

    /// Additional structured context about the error.
    #[prost(map = "string, string", tag = "3")]
    pub metadata: ::std::collections::HashMap<
        ::prost::alloc::string::String,
        ::prost::alloc::string::String,
    >,
}

/// `google.rpc.DebugInfo`: stack excerpt and free-form detail for debugging.
#[derive(Clone, PartialEq, ::prost::Message, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugInfo {
    /// Call-stack excerpt, oldest entry first.
    #[prost(string, repeated, tag = "1")]
    pub stack_entries: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,

    /// Free-form debugging detail.
    #[prost(string, tag = "2")]
    pub detail: ::prost::alloc::string::String,
}

/// `lattice.v1.SuggestionInfo`: human-readable remediation hint.
#[derive(Clone, PartialEq, ::prost::Message, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionInfo {
    /// Suggested next step for the end user.
    #[prost(string, tag = "1")]
    pub suggestion: ::prost::alloc::string::String,
}

/// `google.rpc.Status`: the canonical wire form of a rich status, carried in
/// the `grpc-status-details-bin` metadata entry of a gRPC response.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RpcStatus {
    /// Numeric status code (`google.rpc.Code`).
    #[prost(int32, tag = "1")]
    pub code: i32,

    /// Developer-facing message.
    #[prost(string, tag = "2")]
    pub message: ::prost::alloc::string::String,

    /// Detail records, each packed as `google.protobuf.Any`.
    #[prost(message, repeated, tag = "3")]
    pub details: ::prost::alloc::vec::Vec<::prost_types::Any>,
}

/// `lattice.v1.SignInWithCustomTokenRequest`.
#[derive(Clone, PartialEq, ::prost::Message, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInWithCustomTokenRequest {
    /// Long-lived bootstrap token to exchange.
    #[prost(string, tag = "1")]
    pub token: ::prost::alloc::string::String,
}

/// `lattice.v1.SignInWithCustomTokenResponse`.
#[derive(Clone, PartialEq, ::prost::Message, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInWithCustomTokenResponse {
    /// Short-lived access token for subsequent calls.
    #[prost(string, tag = "1")]
    pub token: ::prost::alloc::string::String,
}

/// Client for `lattice.v1.AuthService`.
///
/// Mirrors the shape tonic generates for a unary client, specialized to
/// [`tonic::transport::Channel`]; the sign-in exchange is the only method
/// this crate calls.
#[derive(Debug, Clone)]
pub struct AuthServiceClient {
    inner: tonic::client::Grpc<tonic::transport::Channel>,
}

impl AuthServiceClient {
    pub fn new(channel: tonic::transport::Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    /// Exchange a bootstrap token for a short-lived access token.
    pub async fn sign_in_with_custom_token(
        &mut self,
        request: impl tonic::IntoRequest<SignInWithCustomTokenRequest>,
    ) -> std::result::Result<tonic::Response<SignInWithCustomTokenResponse>, tonic::Status> {
        self.inner.ready().await.map_err(|e| {
            tonic::Status::new(
                tonic::Code::Unknown,
                format!("Service was not ready: {}", e),
            )
        })?;
        let codec = tonic::codec::ProstCodec::default();
        let path =
            http::uri::PathAndQuery::from_static("/lattice.v1.AuthService/SignInWithCustomToken");
        let mut req = request.into_request();
        req.extensions_mut().insert(GrpcMethod::new(
            "lattice.v1.AuthService",
            "SignInWithCustomToken",
        ));
        self.inner.unary(req, path, codec).await
    }
}
