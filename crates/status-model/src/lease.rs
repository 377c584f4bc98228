//! DHCP lease records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the DHCP lease table.
///
/// Leases are a process-lifetime snapshot taken at startup; they are
/// read-only in the datastore and never written back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhcpLease {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl DhcpLease {
    /// Build a lease from the five positional fields of a lease-file line.
    pub fn new(
        expiry: impl Into<String>,
        mac: impl Into<String>,
        ip: impl Into<String>,
        hostname: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            expiry: Some(expiry.into()),
            mac: Some(mac.into()),
            ip: Some(ip.into()),
            hostname: Some(hostname.into()),
            id: Some(id.into()),
        }
    }

    /// The identity key, if non-empty.
    pub fn key(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Datastore leaf names paired with their values.
    ///
    /// The identity key is carried by the list predicate, not as a leaf.
    pub fn leaves(&self) -> [(&'static str, Option<&str>); 4] {
        [
            ("lease-expirey", self.expiry.as_deref()),
            ("mac", self.mac.as_deref()),
            ("ip", self.ip.as_deref()),
            ("name", self.hostname.as_deref()),
        ]
    }

    /// Interpret the expiry field as Unix seconds.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let seconds = self.expiry.as_deref()?.parse::<i64>().ok()?;
        DateTime::from_timestamp(seconds, 0)
    }
}
