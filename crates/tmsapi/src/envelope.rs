//! Response envelope normalization.
//!
//! TMS wraps object responses in a top-level `meta` key carrying the result
//! count. Callers only see the payload.

use serde_json::{Map, Value};

use crate::error::Result;

/// Top-level key holding response metadata.
const META_KEY: &str = "meta";

/// A response body with its envelope removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Payload without the `meta` key.
    pub data: Value,
    /// Result count reported in `meta.count`, if any.
    pub count: Option<u64>,
}

/// Returns `true` for JSON values that carry no data (`null`, `0`, `""`, `[]`, ...).
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() < f64::EPSILON),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Parses `body` and strips the `meta` envelope key.
///
/// Empty bodies and falsy JSON values normalize to an empty object.
/// Non-object payloads (e.g. a top-level array) are returned unchanged.
///
/// # Errors
///
/// Returns `TmsError::Decode` if the body is not valid JSON.
pub fn normalize(body: &str) -> Result<Normalized> {
    if body.trim().is_empty() {
        tracing::trace!("empty response body");
        return Ok(Normalized {
            data: Value::Object(Map::new()),
            count: None,
        });
    }

    let value: Value = serde_json::from_str(body)?;
    if is_falsy(&value) {
        tracing::trace!("empty response body");
        return Ok(Normalized {
            data: Value::Object(Map::new()),
            count: None,
        });
    }

    let mut object = match value {
        Value::Object(object) => object,
        other => {
            return Ok(Normalized {
                data: other,
                count: None,
            });
        }
    };

    let count = object
        .remove(META_KEY)
        .as_ref()
        .and_then(|meta| meta.get("count"))
        .and_then(Value::as_u64);
    tracing::trace!(?count, "stripped response envelope");

    Ok(Normalized {
        data: Value::Object(object),
        count,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;
    use tracing::subscriber::with_default;
    use tracing_mock::{expect, subscriber};

    use super::*;

    #[test]
    fn test_strips_meta_and_reads_count() {
        // Arrange
        let body = r#"{"meta":{"count":5},"lineups":[{"lineupId":"USA-TX42500-X"}]}"#;

        // Act
        let normalized = normalize(body).unwrap();

        // Assert
        assert_eq!(
            normalized.data,
            json!({"lineups":[{"lineupId":"USA-TX42500-X"}]})
        );
        assert!(normalized.data.get("meta").is_none());
        assert_eq!(normalized.count, Some(5));
    }

    #[test]
    fn test_empty_body_is_empty_object() {
        // Arrange & Act
        let normalized = normalize("").unwrap();

        // Assert
        assert_eq!(normalized.data, json!({}));
        assert_eq!(normalized.count, None);
    }

    #[test]
    fn test_falsy_json_is_empty_object() {
        // Arrange & Act & Assert
        for body in ["null", "false", "0", "[]", "{}", "\"\""] {
            assert_eq!(normalize(body).unwrap().data, json!({}), "body: {body}");
        }
    }

    #[test]
    fn test_top_level_array_passes_through() {
        // Arrange
        let body = r#"[{"lineupId":"USA-DTVNOW-DEFAULT"}]"#;

        // Act
        let normalized = normalize(body).unwrap();

        // Assert
        assert_eq!(normalized.data, json!([{"lineupId":"USA-DTVNOW-DEFAULT"}]));
        assert_eq!(normalized.count, None);
    }

    #[test]
    fn test_meta_without_count() {
        // Arrange & Act
        let normalized = normalize(r#"{"meta":{},"hits":[]}"#).unwrap();

        // Assert
        assert_eq!(normalized.data, json!({"hits":[]}));
        assert_eq!(normalized.count, None);
    }

    #[test]
    fn test_invalid_json_is_decode_error() {
        // Arrange & Act
        let result = normalize("<html>Gateway Timeout</html>");

        // Assert
        assert!(matches!(result, Err(crate::TmsError::Decode(_))));
    }

    #[test]
    fn test_emits_trace_event() {
        // Arrange
        let (subscriber, handle) = subscriber::mock()
            .event(expect::event().with_fields(expect::msg("stripped response envelope")))
            .only()
            .run_with_handle();

        // Act
        with_default(subscriber, || {
            normalize(r#"{"meta":{"count":1},"hits":[{}]}"#).unwrap();
        });

        // Assert
        handle.assert_finished();
    }
}
