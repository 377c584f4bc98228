//! The canonical in-memory state model

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::{BoardInfo, DhcpLease, WifiDevice, WifiInterface, WirelessConfig};

/// Ordered record collections plus the board singleton.
///
/// Only records with a non-empty, unique identity key are ever stored, so
/// every record in a collection is valid for projection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    board: Option<BoardInfo>,
    #[serde(default)]
    leases: Vec<DhcpLease>,
    #[serde(default)]
    devices: Vec<WifiDevice>,
    #[serde(default)]
    interfaces: Vec<WifiInterface>,
}

impl StateModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_board(&mut self, board: BoardInfo) {
        self.board = Some(board);
    }

    pub fn board(&self) -> Option<&BoardInfo> {
        self.board.as_ref()
    }

    /// Append a lease, rejecting a missing or duplicate `id`.
    pub fn push_lease(&mut self, lease: DhcpLease) -> Result<()> {
        let key = lease
            .key()
            .ok_or(Error::MissingIdentity { kind: "dhcp-lease" })?;
        if self.leases.iter().any(|l| l.key() == Some(key)) {
            return Err(Error::DuplicateKey {
                kind: "dhcp-lease",
                key: key.to_string(),
            });
        }
        self.leases.push(lease);
        Ok(())
    }

    pub fn leases(&self) -> &[DhcpLease] {
        &self.leases
    }

    /// Append a radio, rejecting a missing or duplicate `name`.
    pub fn push_device(&mut self, device: WifiDevice) -> Result<()> {
        let key = device
            .key()
            .ok_or(Error::MissingIdentity { kind: "wifi-device" })?;
        if self.device(key).is_some() {
            return Err(Error::DuplicateKey {
                kind: "wifi-device",
                key: key.to_string(),
            });
        }
        self.devices.push(device);
        Ok(())
    }

    pub fn devices(&self) -> &[WifiDevice] {
        &self.devices
    }

    pub fn device(&self, name: &str) -> Option<&WifiDevice> {
        self.devices.iter().find(|d| d.key() == Some(name))
    }

    pub fn device_mut(&mut self, name: &str) -> Option<&mut WifiDevice> {
        self.devices.iter_mut().find(|d| d.key() == Some(name))
    }

    pub fn remove_device(&mut self, name: &str) -> Result<WifiDevice> {
        let pos = self
            .devices
            .iter()
            .position(|d| d.key() == Some(name))
            .ok_or_else(|| Error::RecordNotFound {
                kind: "wifi-device",
                key: name.to_string(),
            })?;
        Ok(self.devices.remove(pos))
    }

    /// Append an interface, rejecting a missing or duplicate `name`.
    pub fn push_interface(&mut self, iface: WifiInterface) -> Result<()> {
        let key = iface
            .key()
            .ok_or(Error::MissingIdentity { kind: "wifi-iface" })?;
        if self.interface(key).is_some() {
            return Err(Error::DuplicateKey {
                kind: "wifi-iface",
                key: key.to_string(),
            });
        }
        self.interfaces.push(iface);
        Ok(())
    }

    pub fn interfaces(&self) -> &[WifiInterface] {
        &self.interfaces
    }

    pub fn interface(&self, name: &str) -> Option<&WifiInterface> {
        self.interfaces.iter().find(|i| i.key() == Some(name))
    }

    pub fn interface_mut(&mut self, name: &str) -> Option<&mut WifiInterface> {
        self.interfaces.iter_mut().find(|i| i.key() == Some(name))
    }

    pub fn remove_interface(&mut self, name: &str) -> Result<WifiInterface> {
        let pos = self
            .interfaces
            .iter()
            .position(|i| i.key() == Some(name))
            .ok_or_else(|| Error::RecordNotFound {
                kind: "wifi-iface",
                key: name.to_string(),
            })?;
        Ok(self.interfaces.remove(pos))
    }

    /// Replace both WiFi collections.
    ///
    /// Records that fail the identity checks are skipped with a warning; the
    /// number of skipped records is returned.
    pub fn replace_wireless(&mut self, wireless: WirelessConfig) -> usize {
        self.devices.clear();
        self.interfaces.clear();
        let mut skipped = 0;

        for device in wireless.devices {
            if let Err(e) = self.push_device(device) {
                tracing::warn!(error = %e, "Skipping wifi-device record");
                skipped += 1;
            }
        }
        for iface in wireless.interfaces {
            if let Err(e) = self.push_interface(iface) {
                tracing::warn!(error = %e, "Skipping wifi-iface record");
                skipped += 1;
            }
        }

        skipped
    }

    /// Native sections the WiFi records were read from or written to.
    pub fn origins(&self) -> impl Iterator<Item = &str> {
        self.devices
            .iter()
            .filter_map(|d| d.origin.as_deref())
            .chain(self.interfaces.iter().filter_map(|i| i.origin.as_deref()))
    }

    /// Record the native section backing a WiFi record.
    ///
    /// Returns false when no record of `section_type` has the key `name`.
    pub fn set_origin(&mut self, section_type: &str, name: &str, section: impl Into<String>) -> bool {
        let slot = if section_type == WifiDevice::SECTION_TYPE {
            self.device_mut(name).map(|d| &mut d.origin)
        } else if section_type == WifiInterface::SECTION_TYPE {
            self.interface_mut(name).map(|i| &mut i.origin)
        } else {
            None
        };
        match slot {
            Some(slot) => {
                *slot = Some(section.into());
                true
            }
            None => false,
        }
    }

    /// True when nothing has been collected.
    pub fn is_empty(&self) -> bool {
        self.board.is_none()
            && self.leases.is_empty()
            && self.devices.is_empty()
            && self.interfaces.is_empty()
    }
}
