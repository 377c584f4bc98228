//! Agent configuration
//!
//! Every field has a default, so an empty file (or no file at all) yields
//! the stock device setup.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::Result;
use status_fs::{ConfigStore, NormalizedPath};

fn default_module() -> String {
    "status".to_string()
}

fn default_wireless_package() -> String {
    "wireless".to_string()
}

fn default_lease_file() -> String {
    "/tmp/dhcp.leases".to_string()
}

fn default_board_timeout_ms() -> u64 {
    5000
}

fn default_read_only_markers() -> Vec<String> {
    vec![
        "board".to_string(),
        "dhcp_leases".to_string(),
        "dhcp-leases".to_string(),
    ]
}

fn default_uci_binary() -> String {
    "uci".to_string()
}

fn default_ubus_binary() -> String {
    "ubus".to_string()
}

fn default_true() -> bool {
    true
}

fn default_reload_command() -> String {
    "/etc/init.d/network".to_string()
}

fn default_reload_args() -> Vec<String> {
    vec!["restart".to_string()]
}

/// How the network service is reloaded after a native commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReloadConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_reload_command")]
    pub command: String,

    #[serde(default = "default_reload_args")]
    pub args: Vec<String>,
}

impl Default for ReloadConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: default_reload_command(),
            args: default_reload_args(),
        }
    }
}

/// Agent settings loaded from TOML, JSON or YAML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Datastore module the agent projects into and subscribes to
    #[serde(default = "default_module")]
    pub module: String,

    /// Native package holding the WiFi sections
    #[serde(default = "default_wireless_package")]
    pub wireless_package: String,

    #[serde(default = "default_lease_file")]
    pub lease_file: String,

    #[serde(default = "default_board_timeout_ms")]
    pub board_timeout_ms: u64,

    /// Substrings that mark a datastore path as read-only
    #[serde(default = "default_read_only_markers")]
    pub read_only_markers: Vec<String>,

    #[serde(default)]
    pub reload: ReloadConfig,

    #[serde(default = "default_uci_binary")]
    pub uci_binary: String,

    /// Alternative configuration directory for the native store tool
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uci_config_dir: Option<String>,

    /// Alternative directory for staged native changes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uci_save_dir: Option<String>,

    #[serde(default = "default_ubus_binary")]
    pub ubus_binary: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            module: default_module(),
            wireless_package: default_wireless_package(),
            lease_file: default_lease_file(),
            board_timeout_ms: default_board_timeout_ms(),
            read_only_markers: default_read_only_markers(),
            reload: ReloadConfig::default(),
            uci_binary: default_uci_binary(),
            uci_config_dir: None,
            uci_save_dir: None,
            ubus_binary: default_ubus_binary(),
        }
    }
}

impl AgentConfig {
    /// Load a configuration file; the format follows the extension.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let config = ConfigStore::for_kind("agent config").load(path)?;
        tracing::debug!(path = %path, "Loaded agent configuration");
        Ok(config)
    }

    pub fn board_timeout(&self) -> Duration {
        Duration::from_millis(self.board_timeout_ms)
    }
}
