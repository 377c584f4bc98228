//! WiFi radio and interface records
//!
//! Field names double as native option keys and datastore leaf names, so the
//! same table drives parsing, projection and write-back.
//!
//! A record read from the native store remembers its section in `origin`,
//! so write-back addresses that section by name. `origin` is not a field:
//! it is neither serialized nor projected.

use serde::{Deserialize, Serialize};

/// A radio (`wifi-device` section).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiDevice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macaddr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hwmode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<String>,
    /// Native section the record was read from or last written to.
    #[serde(skip)]
    pub origin: Option<String>,
}

impl WifiDevice {
    /// Native section type.
    pub const SECTION_TYPE: &'static str = "wifi-device";

    pub const KEYS: [&'static str; 6] = ["name", "type", "channel", "macaddr", "hwmode", "disabled"];

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn key(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// All fields in native write order, `name` first.
    pub fn fields(&self) -> [(&'static str, Option<&str>); 6] {
        [
            ("name", self.name.as_deref()),
            ("type", self.device_type.as_deref()),
            ("channel", self.channel.as_deref()),
            ("macaddr", self.macaddr.as_deref()),
            ("hwmode", self.hwmode.as_deref()),
            ("disabled", self.disabled.as_deref()),
        ]
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields()
            .into_iter()
            .find(|(k, _)| *k == key)
            .and_then(|(_, v)| v)
    }

    /// Set a field by its option key. Returns false for unknown keys.
    pub fn set_field(&mut self, key: &str, value: Option<String>) -> bool {
        let slot = match key {
            "name" => &mut self.name,
            "type" => &mut self.device_type,
            "channel" => &mut self.channel,
            "macaddr" => &mut self.macaddr,
            "hwmode" => &mut self.hwmode,
            "disabled" => &mut self.disabled,
            _ => return false,
        };
        *slot = value;
        true
    }
}

/// A wireless network (`wifi-iface` section).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiInterface {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maclist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macfilter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip)]
    pub origin: Option<String>,
}

impl WifiInterface {
    pub const SECTION_TYPE: &'static str = "wifi-iface";

    pub const KEYS: [&'static str; 9] = [
        "name",
        "device",
        "network",
        "mode",
        "ssid",
        "encryption",
        "maclist",
        "macfilter",
        "key",
    ];

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// The identity key (`name`), if non-empty.
    ///
    /// Not to be confused with the `key` field, which holds the passphrase.
    pub fn key(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    pub fn fields(&self) -> [(&'static str, Option<&str>); 9] {
        [
            ("name", self.name.as_deref()),
            ("device", self.device.as_deref()),
            ("network", self.network.as_deref()),
            ("mode", self.mode.as_deref()),
            ("ssid", self.ssid.as_deref()),
            ("encryption", self.encryption.as_deref()),
            ("maclist", self.maclist.as_deref()),
            ("macfilter", self.macfilter.as_deref()),
            ("key", self.key.as_deref()),
        ]
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields()
            .into_iter()
            .find(|(k, _)| *k == key)
            .and_then(|(_, v)| v)
    }

    pub fn set_field(&mut self, key: &str, value: Option<String>) -> bool {
        let slot = match key {
            "name" => &mut self.name,
            "device" => &mut self.device,
            "network" => &mut self.network,
            "mode" => &mut self.mode,
            "ssid" => &mut self.ssid,
            "encryption" => &mut self.encryption,
            "maclist" => &mut self.maclist,
            "macfilter" => &mut self.macfilter,
            "key" => &mut self.key,
            _ => return false,
        };
        *slot = value;
        true
    }
}

/// Devices and interfaces read from one wireless package, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirelessConfig {
    pub devices: Vec<WifiDevice>,
    pub interfaces: Vec<WifiInterface>,
}
