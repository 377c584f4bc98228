//! Datastore layout of the status module
//!
//! ```text
//! /<module>:board/{kernel,hostname,system}
//! /<module>:board/release/{distribution,version,revision,codename,target}
//! /<module>:dhcp/dhcp-leases[id='<id>']/{lease-expirey,mac,ip,name}
//! /<module>:wifi/wifi-device[name='<name>']/{type,channel,macaddr,hwmode,disabled}
//! /<module>:wifi/wifi-iface[name='<name>']/{device,network,mode,ssid,encryption,maclist,macfilter,key}
//! ```

use crate::Result;
use status_datastore::XPathBuilder;

pub const BOARD: &str = "board";
pub const RELEASE: &str = "release";
pub const DHCP: &str = "dhcp";
pub const LEASE_LIST: &str = "dhcp-leases";
pub const LEASE_KEY: &str = "id";
pub const WIFI: &str = "wifi";
pub const DEVICE_LIST: &str = "wifi-device";
pub const INTERFACE_LIST: &str = "wifi-iface";
pub const RECORD_KEY: &str = "name";

/// Release fields that have a datastore leaf.
pub const RELEASE_LEAVES: [&str; 5] = ["distribution", "version", "revision", "codename", "target"];

pub fn board_leaf(module: &str, leaf: &str) -> String {
    XPathBuilder::new(module, BOARD).child(leaf).build()
}

pub fn release_leaf(module: &str, leaf: &str) -> String {
    XPathBuilder::new(module, BOARD)
        .child(RELEASE)
        .child(leaf)
        .build()
}

pub fn lease_entry(module: &str, id: &str) -> Result<XPathBuilder> {
    Ok(XPathBuilder::new(module, DHCP).entry(LEASE_LIST, LEASE_KEY, id)?)
}

pub fn device_entry(module: &str, name: &str) -> Result<XPathBuilder> {
    Ok(XPathBuilder::new(module, WIFI).entry(DEVICE_LIST, RECORD_KEY, name)?)
}

pub fn interface_entry(module: &str, name: &str) -> Result<XPathBuilder> {
    Ok(XPathBuilder::new(module, WIFI).entry(INTERFACE_LIST, RECORD_KEY, name)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout() {
        assert_eq!(board_leaf("status", "kernel"), "/status:board/kernel");
        assert_eq!(release_leaf("status", "version"), "/status:board/release/version");
        assert_eq!(
            lease_entry("status", "01:aa").unwrap().child("mac").build(),
            "/status:dhcp/dhcp-leases[id='01:aa']/mac"
        );
        assert_eq!(
            interface_entry("status", "it's").unwrap().build(),
            "/status:wifi/wifi-iface[name=\"it's\"]"
        );
    }
}
