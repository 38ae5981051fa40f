//! Structured gRPC status construction.
//!
//! Converts arbitrary failures into a [`StructuredStatus`] carrying a
//! machine-readable reason, a random correlation id for support tickets, a
//! call-stack excerpt, and a remediation suggestion. Values that already
//! carry status information pass through unchanged.

use std::backtrace::Backtrace;
use std::collections::HashMap;

use prost::Message;
use prost_types::Any;
use uuid::Uuid;

use crate::proto::{
    DebugInfo, ErrorInfo, RpcStatus, SuggestionInfo, DEBUG_INFO_TYPE_URL, ERROR_INFO_TYPE_URL,
    SUGGESTION_INFO_TYPE_URL,
};

/// Reason code attached to generic internal failures.
pub const INTERNAL_ERROR_REASON: &str = "INTERNAL_ERROR";

/// Error domain identifying the Lattice platform API.
pub const PLATFORM_ERROR_DOMAIN: &str = "api.lattice.dev";

/// Default number of stack lines kept in the debug excerpt.
pub const DEFAULT_STACK_LINES: usize = 5;

/// A single detail record attached to a [`StructuredStatus`].
#[derive(Debug, Clone, PartialEq)]
pub enum DetailRecord {
    /// Machine-readable error cause (`google.rpc.ErrorInfo`).
    Error(ErrorInfo),
    /// Human-readable remediation hint (`lattice.v1.SuggestionInfo`).
    Suggestion(SuggestionInfo),
    /// Stack excerpt and detail for debugging (`google.rpc.DebugInfo`).
    Debug(DebugInfo),
}

impl DetailRecord {
    /// Pack this record as a `google.protobuf.Any`.
    fn to_any(&self) -> Any {
        match self {
            DetailRecord::Error(m) => pack(ERROR_INFO_TYPE_URL, m),
            DetailRecord::Suggestion(m) => pack(SUGGESTION_INFO_TYPE_URL, m),
            DetailRecord::Debug(m) => pack(DEBUG_INFO_TYPE_URL, m),
        }
    }

    /// Unpack a known detail schema from a `google.protobuf.Any`.
    ///
    /// Returns `None` for unknown type URLs or undecodable payloads; foreign
    /// detail schemas are dropped rather than carried opaquely.
    fn from_any(any: &Any) -> Option<Self> {
        match any.type_url.as_str() {
            ERROR_INFO_TYPE_URL => ErrorInfo::decode(any.value.as_slice())
                .ok()
                .map(DetailRecord::Error),
            SUGGESTION_INFO_TYPE_URL => SuggestionInfo::decode(any.value.as_slice())
                .ok()
                .map(DetailRecord::Suggestion),
            DEBUG_INFO_TYPE_URL => DebugInfo::decode(any.value.as_slice())
                .ok()
                .map(DetailRecord::Debug),
            _ => None,
        }
    }
}

fn pack(type_url: &str, message: &impl Message) -> Any {
    Any {
        type_url: type_url.to_string(),
        value: message.encode_to_vec(),
    }
}

/// A structured RPC status with attached detail records.
///
/// Built once and immutable thereafter; convert to the transport
/// representation with [`StructuredStatus::to_grpc_status`].
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredStatus {
    /// RPC outcome code.
    pub code: tonic::Code,
    /// Developer-facing message.
    pub message: String,
    /// Ordered detail records.
    pub details: Vec<DetailRecord>,
}

impl StructuredStatus {
    /// Build a status with an explicit code, reason, and message.
    ///
    /// Attaches only an [`ErrorInfo`] detail (empty metadata); used when the
    /// caller synthesizes a status directly rather than wrapping a failure.
    pub fn with_reason(code: tonic::Code, reason: &str, message: &str) -> Self {
        Self {
            code,
            message: message.to_string(),
            details: vec![DetailRecord::Error(ErrorInfo {
                reason: reason.to_string(),
                domain: PLATFORM_ERROR_DOMAIN.to_string(),
                metadata: HashMap::new(),
            })],
        }
    }

    /// Convert to the transport status, packing the detail records into the
    /// `grpc-status-details-bin` payload as an encoded `google.rpc.Status`.
    pub fn to_grpc_status(&self) -> tonic::Status {
        let pb = RpcStatus {
            code: self.code as i32,
            message: self.message.clone(),
            details: self.details.iter().map(DetailRecord::to_any).collect(),
        };
        tonic::Status::with_details(self.code, self.message.clone(), pb.encode_to_vec().into())
    }
}

impl From<StructuredStatus> for tonic::Status {
    fn from(status: StructuredStatus) -> Self {
        status.to_grpc_status()
    }
}

impl From<tonic::Status> for StructuredStatus {
    fn from(status: tonic::Status) -> Self {
        let details = RpcStatus::decode(status.details())
            .map(|pb| pb.details.iter().filter_map(DetailRecord::from_any).collect())
            .unwrap_or_default();
        Self {
            code: status.code(),
            message: status.message().to_string(),
            details,
        }
    }
}

/// Input to the status builder: either a value that already carries status
/// information, or a generic failure to be wrapped.
#[derive(Debug)]
pub enum Failure {
    /// Already carries a structured status; passed through unchanged.
    Status(StructuredStatus),
    /// A generic error value.
    Error(Box<dyn std::error::Error + Send + Sync>),
    /// A non-error value, coerced to its textual representation.
    Text(String),
}

impl Failure {
    /// Wrap any error value.
    pub fn from_error(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Failure::Error(Box::new(err))
    }
}

impl From<StructuredStatus> for Failure {
    fn from(status: StructuredStatus) -> Self {
        Failure::Status(status)
    }
}

impl From<tonic::Status> for Failure {
    fn from(status: tonic::Status) -> Self {
        Failure::Status(status.into())
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for Failure {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Failure::Error(err)
    }
}

impl From<String> for Failure {
    fn from(text: String) -> Self {
        Failure::Text(text)
    }
}

impl From<&str> for Failure {
    fn from(text: &str) -> Self {
        Failure::Text(text.to_string())
    }
}

/// Convert any failure into a [`StructuredStatus`].
///
/// Status-bearing inputs pass through unchanged. Everything else is wrapped
/// into a generic internal status with a fresh correlation id and exactly
/// three details, in order: [`ErrorInfo`], [`SuggestionInfo`], [`DebugInfo`].
/// This function is total; it always returns a status.
pub fn to_status(failure: impl Into<Failure>) -> StructuredStatus {
    to_status_with_depth(failure, DEFAULT_STACK_LINES)
}

/// Like [`to_status`], with a configurable stack-excerpt depth.
pub fn to_status_with_depth(failure: impl Into<Failure>, max_stack_lines: usize) -> StructuredStatus {
    match failure.into() {
        Failure::Status(status) => status,
        Failure::Error(err) => internal_status(&err.to_string(), max_stack_lines),
        Failure::Text(text) => internal_status(&text, max_stack_lines),
    }
}

fn internal_status(detail: &str, max_stack_lines: usize) -> StructuredStatus {
    let error_number = Uuid::new_v4().to_string();
    let message = format!(
        "An unexpected error occurred. Please contact us for support and refer this error number: {}.",
        error_number
    );
    let suggestion = format!(
        "Please contact us for support and refer this error number: {}",
        error_number
    );
    let mut metadata = HashMap::new();
    metadata.insert("error_number".to_string(), error_number);

    StructuredStatus {
        code: tonic::Code::Internal,
        message,
        details: vec![
            DetailRecord::Error(ErrorInfo {
                reason: INTERNAL_ERROR_REASON.to_string(),
                domain: PLATFORM_ERROR_DOMAIN.to_string(),
                metadata,
            }),
            DetailRecord::Suggestion(SuggestionInfo { suggestion }),
            DetailRecord::Debug(DebugInfo {
                stack_entries: stack_excerpt(max_stack_lines, detail),
                detail: detail.to_string(),
            }),
        ],
    }
}

/// Capture the current call stack and keep the last `max_lines` lines,
/// oldest-to-newest, with the failure description appended as the final
/// entry. The tail of the stack is where the failure originated.
fn stack_excerpt(max_lines: usize, detail: &str) -> Vec<String> {
    let stack = Backtrace::force_capture().to_string();
    let lines: Vec<&str> = stack.lines().collect();
    let start = lines.len().saturating_sub(max_lines);
    let mut entries: Vec<String> = lines[start..].iter().map(|l| l.to_string()).collect();
    entries.push(detail.to_string());
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn correlation_id(status: &StructuredStatus) -> String {
        match &status.details[0] {
            DetailRecord::Error(info) => info.metadata["error_number"].clone(),
            other => panic!("expected ErrorInfo first, got {:?}", other),
        }
    }

    #[test]
    fn test_generic_failure_has_three_details_in_order() {
        let status = to_status("disk full");
        assert_eq!(status.code, tonic::Code::Internal);
        assert_eq!(status.details.len(), 3);
        assert!(matches!(status.details[0], DetailRecord::Error(_)));
        assert!(matches!(status.details[1], DetailRecord::Suggestion(_)));
        assert!(matches!(status.details[2], DetailRecord::Debug(_)));
    }

    #[test]
    fn test_disk_full_scenario() {
        let status = to_status("disk full");

        let DetailRecord::Error(info) = &status.details[0] else {
            panic!("expected ErrorInfo");
        };
        assert_eq!(info.reason, INTERNAL_ERROR_REASON);
        assert_eq!(info.domain, PLATFORM_ERROR_DOMAIN);

        let DetailRecord::Debug(debug) = &status.details[2] else {
            panic!("expected DebugInfo");
        };
        assert_eq!(debug.detail, "disk full");

        // Message embeds a UUID-formatted correlation id.
        let id = correlation_id(&status);
        assert!(Uuid::parse_str(&id).is_ok());
        assert!(status.message.contains(&id));
    }

    #[test]
    fn test_correlation_id_consistent_within_one_invocation() {
        let status = to_status("boom");
        let id = correlation_id(&status);

        let DetailRecord::Suggestion(suggestion) = &status.details[1] else {
            panic!("expected SuggestionInfo");
        };
        assert!(suggestion.suggestion.contains(&id));
        assert!(status.message.contains(&id));
    }

    #[test]
    fn test_correlation_id_differs_across_invocations() {
        let a = to_status("boom");
        let b = to_status("boom");
        assert_ne!(correlation_id(&a), correlation_id(&b));
    }

    #[test]
    fn test_error_input_uses_description() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "socket hangup");
        let status = to_status(Failure::from_error(err));

        let DetailRecord::Debug(debug) = &status.details[2] else {
            panic!("expected DebugInfo");
        };
        assert_eq!(debug.detail, "socket hangup");
    }

    #[test]
    fn test_status_bearing_input_passes_through() {
        let original = StructuredStatus::with_reason(
            tonic::Code::NotFound,
            "DATASET_NOT_FOUND",
            "dataset missing",
        );
        let status = to_status(original.clone());
        assert_eq!(status, original);
    }

    #[test]
    fn test_grpc_status_round_trip() {
        let original = to_status("round trip");
        let wire = original.to_grpc_status();
        let decoded = StructuredStatus::from(wire);
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_grpc_status_input_passes_through() {
        let original = to_status("wire pass-through");
        let wire = original.to_grpc_status();
        let rebuilt = to_status(wire);
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn test_plain_grpc_status_keeps_code_and_message() {
        let wire = tonic::Status::not_found("no such dataset");
        let status = to_status(wire);
        assert_eq!(status.code, tonic::Code::NotFound);
        assert_eq!(status.message, "no such dataset");
        assert!(status.details.is_empty());
    }

    #[test]
    fn test_stack_excerpt_final_entry_is_description() {
        let entries = stack_excerpt(5, "the failure");
        assert_eq!(entries.last().map(String::as_str), Some("the failure"));
    }

    #[test]
    fn test_stack_excerpt_length_bounded() {
        let entries = stack_excerpt(3, "x");
        // Up to 3 stack lines plus the description.
        assert!(entries.len() <= 4);
        assert!(!entries.is_empty());
    }

    #[test]
    fn test_stack_excerpt_keeps_all_when_shallow_limit_exceeds_stack() {
        let stack_lines = Backtrace::force_capture().to_string().lines().count();
        let entries = stack_excerpt(usize::MAX, "y");
        // Whole stack plus the description; captured depth may differ by a
        // frame between the two captures, so allow slack.
        assert!(entries.len() >= stack_lines.saturating_sub(2));
    }

    #[test]
    fn test_with_reason_attaches_only_error_info() {
        let status =
            StructuredStatus::with_reason(tonic::Code::InvalidArgument, "BAD_INPUT", "bad input");
        assert_eq!(status.code, tonic::Code::InvalidArgument);
        assert_eq!(status.message, "bad input");
        assert_eq!(status.details.len(), 1);

        let DetailRecord::Error(info) = &status.details[0] else {
            panic!("expected ErrorInfo");
        };
        assert_eq!(info.reason, "BAD_INPUT");
        assert_eq!(info.domain, PLATFORM_ERROR_DOMAIN);
        assert!(info.metadata.is_empty());
    }

    #[test]
    fn test_unknown_detail_schema_dropped_on_decode() {
        let pb = RpcStatus {
            code: tonic::Code::Internal as i32,
            message: "mixed details".to_string(),
            details: vec![
                Any {
                    type_url: "type.googleapis.com/other.v1.Unknown".to_string(),
                    value: vec![1, 2, 3],
                },
                pack(
                    SUGGESTION_INFO_TYPE_URL,
                    &SuggestionInfo {
                        suggestion: "try again".to_string(),
                    },
                ),
            ],
        };
        let wire = tonic::Status::with_details(
            tonic::Code::Internal,
            "mixed details",
            pb.encode_to_vec().into(),
        );
        let status = StructuredStatus::from(wire);
        assert_eq!(status.details.len(), 1);
        assert!(matches!(status.details[0], DetailRecord::Suggestion(_)));
    }
}
