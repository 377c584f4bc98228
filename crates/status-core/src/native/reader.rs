//! Reads WiFi radios and interfaces out of the native store

use crate::Result;
use status_model::{WifiDevice, WifiInterface, WirelessConfig};
use status_uci::{NativeStore, Section};

/// Load `package` and classify its sections.
///
/// `wifi-device` sections become radios and `wifi-iface` sections become
/// interfaces, in declaration order. A record is named after its section
/// unless it carries an explicit `name` option, and remembers the section as
/// its origin. Other section types and unknown option keys are logged and
/// skipped.
pub fn read_wireless<S: NativeStore + ?Sized>(store: &mut S, package: &str) -> Result<WirelessConfig> {
    let loaded = store.load(package)?;
    let mut wireless = WirelessConfig::default();

    for section in &loaded.sections {
        if section.type_matches(WifiDevice::SECTION_TYPE) {
            let mut device = WifiDevice::named(section.name.as_str());
            device.origin = Some(section.name.clone());
            copy_options(section, |key, value| device.set_field(key, value));
            wireless.devices.push(device);
        } else if section.type_matches(WifiInterface::SECTION_TYPE) {
            let mut iface = WifiInterface::named(section.name.as_str());
            iface.origin = Some(section.name.clone());
            copy_options(section, |key, value| iface.set_field(key, value));
            wireless.interfaces.push(iface);
        } else {
            tracing::debug!(
                section = %section.name,
                section_type = %section.section_type,
                "Skipping unrecognized section"
            );
        }
    }

    tracing::debug!(
        package,
        devices = wireless.devices.len(),
        interfaces = wireless.interfaces.len(),
        "Read wireless configuration"
    );
    Ok(wireless)
}

fn copy_options(section: &Section, mut set: impl FnMut(&str, Option<String>) -> bool) {
    for (key, value) in &section.options {
        if !set(key, Some(value.clone())) {
            tracing::warn!(
                section = %section.name,
                key = %key,
                "Ignoring unrecognized option"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use status_uci::{Error as UciError, MemoryStore, Package};

    #[test]
    fn explicit_name_overrides_section_name() {
        let mut store = MemoryStore::with_package(
            Package::new("wireless").with_section(
                Section::anonymous("wifi-iface", "cfg033579")
                    .with_option("name", "lan")
                    .with_option("ssid", "OpenWrt"),
            ),
        );

        let wireless = read_wireless(&mut store, "wireless").unwrap();

        assert_eq!(wireless.interfaces[0].name.as_deref(), Some("lan"));
        assert_eq!(wireless.interfaces[0].ssid.as_deref(), Some("OpenWrt"));
        assert_eq!(wireless.interfaces[0].origin.as_deref(), Some("cfg033579"));
    }

    #[test]
    fn quoted_section_types_are_recognized() {
        let mut store = MemoryStore::with_package(
            Package::new("wireless")
                .with_section(Section::new("'wifi-device'", "radio0").with_option("channel", "11"))
                .with_section(Section::new("wifi-status", "other")),
        );

        let wireless = read_wireless(&mut store, "wireless").unwrap();

        assert_eq!(wireless.devices.len(), 1);
        assert_eq!(wireless.devices[0].channel.as_deref(), Some("11"));
        assert!(wireless.interfaces.is_empty());
    }

    #[test]
    fn missing_package_is_reported() {
        let mut store = MemoryStore::new();
        let result = read_wireless(&mut store, "wireless");
        assert!(matches!(
            result,
            Err(crate::Error::Uci(UciError::PackageNotFound { .. }))
        ));
    }
}
