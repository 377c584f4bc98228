//! Scripted RPC bus

use serde_json::Value;
use status_ubus::{Error, Result, RpcBus};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
enum Reply {
    Value(Value),
    Timeout,
}

/// A bus that answers from a fixed table.
///
/// Unknown object/method pairs fail with `ObjectNotFound`. Every call is
/// recorded, and clones share the record.
#[derive(Debug, Clone, Default)]
pub struct StaticBus {
    replies: HashMap<(String, String), Reply>,
    calls: Arc<Mutex<Vec<(String, String, Duration)>>>,
}

impl StaticBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `object.method` with `response`.
    pub fn with_reply(mut self, object: &str, method: &str, response: Value) -> Self {
        self.replies
            .insert((object.to_string(), method.to_string()), Reply::Value(response));
        self
    }

    /// Let `object.method` time out.
    pub fn with_timeout(mut self, object: &str, method: &str) -> Self {
        self.replies
            .insert((object.to_string(), method.to_string()), Reply::Timeout);
        self
    }

    /// Calls made so far as `(object, method, timeout)`.
    pub fn calls(&self) -> Vec<(String, String, Duration)> {
        self.calls.lock().unwrap().clone()
    }
}

impl RpcBus for StaticBus {
    fn invoke(
        &self,
        object: &str,
        method: &str,
        _payload: &Value,
        timeout: Duration,
    ) -> Result<Option<Value>> {
        self.calls
            .lock()
            .unwrap()
            .push((object.to_string(), method.to_string(), timeout));

        match self.replies.get(&(object.to_string(), method.to_string())) {
            Some(Reply::Value(value)) => Ok(Some(value.clone())),
            Some(Reply::Timeout) => Ok(None),
            None => Err(Error::ObjectNotFound {
                object: object.to_string(),
            }),
        }
    }
}
