//! Bus access through the `ubus` command-line client

use serde_json::Value;
use std::process::Command;
use std::time::Duration;

use crate::bus::RpcBus;
use crate::error::{Error, Result};

/// `ubus` exit status for a missing object or method.
const STATUS_NOT_FOUND: i32 = 4;
/// `ubus` exit status for a request that timed out.
const STATUS_TIMEOUT: i32 = 7;

/// Runs `ubus -t <secs> call <object> <method> <json>` per invocation.
#[derive(Debug, Clone)]
pub struct UbusCli {
    program: String,
}

impl Default for UbusCli {
    fn default() -> Self {
        Self::new("ubus")
    }
}

impl UbusCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

/// `ubus -t` takes whole seconds; round up so short timeouts are not zero.
fn timeout_secs(timeout: Duration) -> u64 {
    let secs = timeout.as_secs();
    if timeout.subsec_nanos() > 0 || secs == 0 {
        secs + 1
    } else {
        secs
    }
}

impl RpcBus for UbusCli {
    fn invoke(
        &self,
        object: &str,
        method: &str,
        payload: &Value,
        timeout: Duration,
    ) -> Result<Option<Value>> {
        let secs = timeout_secs(timeout).to_string();
        let payload = payload.to_string();

        tracing::debug!(object, method, timeout_secs = %secs, "Calling bus method");

        let output = Command::new(&self.program)
            .args(["-t", &secs, "call", object, method, &payload])
            .output()
            .map_err(|source| Error::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let status = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return match status {
                STATUS_TIMEOUT => {
                    tracing::warn!(object, method, "Bus call timed out");
                    Ok(None)
                }
                STATUS_NOT_FOUND if stderr.contains("Method") => Err(Error::MethodNotFound {
                    object: object.to_string(),
                    method: method.to_string(),
                }),
                STATUS_NOT_FOUND => Err(Error::ObjectNotFound {
                    object: object.to_string(),
                }),
                _ => Err(Error::CallFailed {
                    object: object.to_string(),
                    method: method.to_string(),
                    status,
                    stderr,
                }),
            };
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if stdout.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&stdout)
            .map(Some)
            .map_err(|source| Error::InvalidJson {
                object: object.to_string(),
                method: method.to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Duration::from_millis(5000), 5)]
    #[case(Duration::from_millis(5500), 6)]
    #[case(Duration::from_millis(100), 1)]
    #[case(Duration::ZERO, 1)]
    fn timeout_rounds_up_to_whole_seconds(#[case] timeout: Duration, #[case] expected: u64) {
        assert_eq!(timeout_secs(timeout), expected);
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let bus = UbusCli::new("/nonexistent/bin/ubus");
        let result = bus.invoke(
            "system",
            "board",
            &Value::Object(Default::default()),
            Duration::from_secs(1),
        );
        assert!(matches!(result, Err(Error::Spawn { .. })));
    }
}
