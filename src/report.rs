//! Failure report serialization.
//!
//! Flattens a [`StructuredStatus`] into a JSON document wrapped under a
//! single `"error"` key, suitable for writing as a pipeline failure report
//! artifact. This is a best-effort reporting path: callers always receive a
//! string, possibly empty, and never an error.

use serde_json::{json, Value};
use tracing::warn;

use crate::proto::{DEBUG_INFO_TYPE_URL, ERROR_INFO_TYPE_URL, SUGGESTION_INFO_TYPE_URL};
use crate::status::{to_status, DetailRecord, Failure, StructuredStatus};

/// Build a status from any failure and serialize it as a report document.
pub fn failure_report(failure: impl Into<Failure>) -> String {
    let status = to_status(failure);
    status_report(Some(&status))
}

/// Serialize a status as `{"error": {"code": ..., "message": ..., "details": [...]}}`.
///
/// An absent status yields an empty string immediately. Serialization
/// failures degrade to an empty string; downstream reporting pipelines
/// depend on always receiving a string.
pub fn status_report(status: Option<&StructuredStatus>) -> String {
    let Some(status) = status else {
        return String::new();
    };
    match status_value(status) {
        Ok(value) => serde_json::to_string(&json!({ "error": value })).unwrap_or_else(|e| {
            warn!(error = %e, "unable to serialize failure report");
            String::new()
        }),
        Err(e) => {
            warn!(error = %e, "unable to convert status to a report document");
            String::new()
        }
    }
}

fn status_value(status: &StructuredStatus) -> Result<Value, serde_json::Error> {
    let details = status
        .details
        .iter()
        .map(detail_value)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(json!({
        "code": status.code as i32,
        "message": status.message,
        "details": details,
    }))
}

/// Render a detail record in protojson style: the message fields plus an
/// `"@type"` discriminator carrying the Any type URL.
fn detail_value(record: &DetailRecord) -> Result<Value, serde_json::Error> {
    let (type_url, mut value) = match record {
        DetailRecord::Error(m) => (ERROR_INFO_TYPE_URL, serde_json::to_value(m)?),
        DetailRecord::Suggestion(m) => (SUGGESTION_INFO_TYPE_URL, serde_json::to_value(m)?),
        DetailRecord::Debug(m) => (DEBUG_INFO_TYPE_URL, serde_json::to_value(m)?),
    };
    if let Value::Object(map) = &mut value {
        map.insert("@type".to_string(), Value::String(type_url.to_string()));
    }
    Ok(value)
}
