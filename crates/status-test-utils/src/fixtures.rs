//! Canned device data

use serde_json::{Value, json};
use status_uci::{Package, Section};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A `system board` response from a typical access point.
pub fn board_response() -> Value {
    json!({
        "kernel": "5.4.188",
        "hostname": "OpenWrt",
        "system": "ARMv7 Processor rev 5 (v7l)",
        "model": "GL.iNet GL-B1300",
        "release": {
            "distribution": "OpenWrt",
            "version": "21.02.3",
            "revision": "r16554-1d4dea6d4f",
            "codename": "",
            "target": "ipq40xx/generic",
            "description": "OpenWrt 21.02.3 r16554-1d4dea6d4f"
        }
    })
}

/// A wireless package with two radios and two interfaces.
///
/// `radio0` carries channel 11, `radio1` channel 36. The interfaces are
/// anonymous; the first is named `lan` through an explicit `name` option.
pub fn wireless_package() -> Package {
    Package::new("wireless")
        .with_section(
            Section::new("wifi-device", "radio0")
                .with_option("type", "mac80211")
                .with_option("channel", "11")
                .with_option("hwmode", "11g")
                .with_option("macaddr", "00:11:22:33:44:55")
                .with_option("disabled", "0"),
        )
        .with_section(
            Section::new("wifi-device", "radio1")
                .with_option("type", "mac80211")
                .with_option("channel", "36")
                .with_option("hwmode", "11a"),
        )
        .with_section(
            Section::anonymous("wifi-iface", "cfg033579")
                .with_option("name", "lan")
                .with_option("device", "radio0")
                .with_option("network", "lan")
                .with_option("mode", "ap")
                .with_option("ssid", "OpenWrt")
                .with_option("encryption", "psk2")
                .with_option("key", "secret123"),
        )
        .with_section(
            Section::anonymous("wifi-iface", "cfg043579")
                .with_option("device", "radio1")
                .with_option("mode", "ap")
                .with_option("ssid", "Guest")
                .with_option("encryption", "none"),
        )
}

/// Lines of a lease file with two leases.
pub const LEASES: &str = "\
1700000000 00:11:22:33:44:55 192.168.1.100 laptop 01:00:11:22:33:44:55
1700003600 66:77:88:99:aa:bb 192.168.1.101 * 01:66:77:88:99:aa:bb
";

/// A lease file in a temporary directory.
pub struct LeaseFile {
    dir: TempDir,
    path: PathBuf,
}

impl LeaseFile {
    /// Write `content` to `dhcp.leases` in a fresh temporary directory.
    pub fn with_content(content: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dhcp.leases");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        Self { dir, path }
    }

    /// The two-lease file from [`LEASES`].
    pub fn standard() -> Self {
        Self::with_content(LEASES)
    }

    /// A path in a temporary directory that does not exist.
    pub fn missing() -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dhcp.leases");
        Self { dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn path_string(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}
