//! The RPC bus contract

use serde_json::Value;
use std::time::Duration;

use crate::error::Result;

/// Synchronous request/response calls on named bus objects.
pub trait RpcBus: Send {
    /// Invoke `object.method` with a JSON payload.
    ///
    /// Returns `Ok(None)` when no response arrived within `timeout`.
    fn invoke(
        &self,
        object: &str,
        method: &str,
        payload: &Value,
        timeout: Duration,
    ) -> Result<Option<Value>>;
}

impl<T: RpcBus + ?Sized> RpcBus for Box<T> {
    fn invoke(
        &self,
        object: &str,
        method: &str,
        payload: &Value,
        timeout: Duration,
    ) -> Result<Option<Value>> {
        (**self).invoke(object, method, payload, timeout)
    }
}
