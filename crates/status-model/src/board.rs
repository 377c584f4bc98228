//! Board identity and OS release records

use serde::{Deserialize, Serialize};

/// OS release details reported by the board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ReleaseInfo {
    /// Field names in the order the board RPC reports them.
    pub const KEYS: [&'static str; 6] = [
        "distribution",
        "version",
        "revision",
        "codename",
        "target",
        "description",
    ];

    pub fn fields(&self) -> [(&'static str, Option<&str>); 6] {
        [
            ("distribution", self.distribution.as_deref()),
            ("version", self.version.as_deref()),
            ("revision", self.revision.as_deref()),
            ("codename", self.codename.as_deref()),
            ("target", self.target.as_deref()),
            ("description", self.description.as_deref()),
        ]
    }

    /// Set a field by name. Returns false for unknown names.
    pub fn set_field(&mut self, key: &str, value: Option<String>) -> bool {
        let slot = match key {
            "distribution" => &mut self.distribution,
            "version" => &mut self.version,
            "revision" => &mut self.revision,
            "codename" => &mut self.codename,
            "target" => &mut self.target,
            "description" => &mut self.description,
            _ => return false,
        };
        *slot = value;
        true
    }
}

/// Board identity, created once at startup and immutable thereafter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kernel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(default)]
    pub release: ReleaseInfo,
}

impl BoardInfo {
    pub const KEYS: [&'static str; 3] = ["kernel", "hostname", "system"];

    pub fn fields(&self) -> [(&'static str, Option<&str>); 3] {
        [
            ("kernel", self.kernel.as_deref()),
            ("hostname", self.hostname.as_deref()),
            ("system", self.system.as_deref()),
        ]
    }

    pub fn set_field(&mut self, key: &str, value: Option<String>) -> bool {
        let slot = match key {
            "kernel" => &mut self.kernel,
            "hostname" => &mut self.hostname,
            "system" => &mut self.system,
            _ => return false,
        };
        *slot = value;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_field_rejects_unknown_keys() {
        let mut board = BoardInfo::default();
        assert!(board.set_field("kernel", Some("5.4.0".into())));
        assert!(!board.set_field("uptime", Some("12".into())));
        assert_eq!(board.kernel.as_deref(), Some("5.4.0"));
    }

    #[test]
    fn release_fields_follow_key_order() {
        let release = ReleaseInfo {
            version: Some("21.02".into()),
            ..Default::default()
        };
        let keys: Vec<_> = release.fields().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, ReleaseInfo::KEYS);
        assert_eq!(release.fields()[1].1, Some("21.02"));
    }
}
