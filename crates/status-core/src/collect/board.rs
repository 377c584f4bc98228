//! Board and OS release facts from the `system board` bus method

use serde_json::{Map, Value};
use std::time::Duration;

use crate::error::{Error, Result};
use status_model::{BoardInfo, ReleaseInfo};
use status_ubus::RpcBus;

pub const BOARD_OBJECT: &str = "system";
pub const BOARD_METHOD: &str = "board";

/// Fetch board facts, logging and swallowing every failure.
///
/// Returns `None` on timeout, bus failure or a malformed response.
pub fn fetch_board(bus: &dyn RpcBus, timeout: Duration) -> Option<BoardInfo> {
    match try_fetch_board(bus, timeout) {
        Ok(board) => board,
        Err(e) => {
            tracing::warn!(error = %e, "Board facts unavailable");
            None
        }
    }
}

/// Fetch board facts, reporting why they are unavailable.
///
/// A timeout is `Ok(None)`; bus failures and responses that are not JSON
/// objects are errors.
pub fn try_fetch_board(bus: &dyn RpcBus, timeout: Duration) -> Result<Option<BoardInfo>> {
    let payload = Value::Object(Map::new());
    let Some(response) = bus.invoke(BOARD_OBJECT, BOARD_METHOD, &payload, timeout)? else {
        tracing::warn!(timeout_ms = timeout.as_millis() as u64, "No response from system board");
        return Ok(None);
    };
    parse_board(&response).map(Some)
}

/// Extract board facts from a `system board` response.
///
/// Missing keys stay `None`. A missing or non-object `release` yields an
/// empty [`ReleaseInfo`].
pub fn parse_board(response: &Value) -> Result<BoardInfo> {
    let object = response.as_object().ok_or_else(|| Error::MalformedResponse {
        object: BOARD_OBJECT.to_string(),
        method: BOARD_METHOD.to_string(),
        reason: format!("expected a JSON object, got {}", kind_of(response)),
    })?;

    let mut board = BoardInfo::default();
    for key in BoardInfo::KEYS {
        board.set_field(key, object.get(key).and_then(scalar_text));
    }

    match object.get("release") {
        Some(Value::Object(release)) => {
            for key in ReleaseInfo::KEYS {
                board.release.set_field(key, release.get(key).and_then(scalar_text));
            }
        }
        Some(other) => {
            tracing::warn!(kind = kind_of(other), "Ignoring non-object release in board response");
        }
        None => tracing::debug!("Board response has no release object"),
    }

    Ok(board)
}

/// Text of a scalar JSON value.
///
/// Strings lose one layer of surrounding double quotes; numbers and booleans
/// use their JSON text; null, arrays and objects have no text.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let unquoted = s
                .strip_prefix('"')
                .and_then(|rest| rest.strip_suffix('"'))
                .unwrap_or(s);
            Some(unquoted.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn parses_full_response() {
        let response = json!({
            "kernel": "5.4.188",
            "hostname": "OpenWrt",
            "system": "ARMv7 Processor rev 5 (v7l)",
            "release": {
                "distribution": "OpenWrt",
                "version": "21.02.3",
                "revision": "r16554-1d4dea6d4f",
                "codename": "",
                "target": "ipq40xx/generic",
                "description": "OpenWrt 21.02.3 r16554-1d4dea6d4f"
            }
        });

        let board = parse_board(&response).unwrap();

        assert_eq!(board.kernel.as_deref(), Some("5.4.188"));
        assert_eq!(board.hostname.as_deref(), Some("OpenWrt"));
        assert_eq!(board.release.version.as_deref(), Some("21.02.3"));
        assert_eq!(board.release.codename.as_deref(), Some(""));
        assert_eq!(
            board.release.description.as_deref(),
            Some("OpenWrt 21.02.3 r16554-1d4dea6d4f")
        );
    }

    #[rstest]
    #[case(json!("\"5.4\""), Some("5.4"))]
    #[case(json!("5.4"), Some("5.4"))]
    #[case(json!("\"\"x\"\""), Some("\"x\""))]
    #[case(json!(42), Some("42"))]
    #[case(json!(true), Some("true"))]
    #[case(json!(null), None)]
    #[case(json!(["a"]), None)]
    fn scalar_text_cases(#[case] value: Value, #[case] expected: Option<&str>) {
        assert_eq!(scalar_text(&value).as_deref(), expected);
    }

    #[test]
    fn non_object_release_is_empty() {
        let board = parse_board(&json!({ "kernel": "5.4", "release": "21.02" })).unwrap();
        assert_eq!(board.kernel.as_deref(), Some("5.4"));
        assert_eq!(board.release, ReleaseInfo::default());
    }

    #[test]
    fn non_object_response_is_malformed() {
        let result = parse_board(&json!(["kernel"]));
        assert!(matches!(result, Err(Error::MalformedResponse { .. })));
    }
}
