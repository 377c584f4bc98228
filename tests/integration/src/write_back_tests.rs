//! End-to-end tests for writing WiFi edits back to the native store

use pretty_assertions::assert_eq;
use status_core::{
    Agent, AgentConfig, Error, NoopReloader, Result, ServiceReloader, read_wireless, write_wireless,
};
use status_datastore::{Datastore, Error as DatastoreError, MemoryDatastore};
use status_test_utils::{LeaseFile, StaticBus, board_response, wireless_package};
use status_model::WirelessConfig;
use status_uci::{MemoryStore, Package, Section};

struct FailingReloader;

impl ServiceReloader for FailingReloader {
    fn reload(&mut self) -> Result<()> {
        Err(Error::Reload {
            command: "/etc/init.d/network".into(),
            message: "exit status 1".into(),
        })
    }
}

fn boot_with<R: ServiceReloader + 'static>(
    reloader: R,
) -> (MemoryDatastore, MemoryStore, Agent, LeaseFile) {
    boot_on(wireless_package(), reloader)
}

fn boot_on<R: ServiceReloader + 'static>(
    package: Package,
    reloader: R,
) -> (MemoryDatastore, MemoryStore, Agent, LeaseFile) {
    let leases = LeaseFile::standard();
    let config = AgentConfig {
        lease_file: leases.path_string(),
        ..AgentConfig::default()
    };
    let datastore = MemoryDatastore::new();
    let bus = StaticBus::new().with_reply("system", "board", board_response());
    let store = MemoryStore::with_package(package);
    let agent = Agent::init(&datastore, &bus, store.clone(), reloader, &config).unwrap();
    (datastore, store, agent, leases)
}

fn wifi_iface_ssids(store: &MemoryStore) -> Vec<String> {
    store
        .committed("wireless")
        .unwrap()
        .sections_of_type("wifi-iface")
        .filter_map(|s| s.get("ssid").map(str::to_string))
        .collect()
}

#[test]
fn test_new_interface_appends_section() {
    let (datastore, store, _agent, _leases) = boot_with(NoopReloader::new());

    let mut session = datastore.start_session().unwrap();
    session
        .set_item("/status:wifi/wifi-iface[name='iot']/ssid", "IoT")
        .unwrap();
    session
        .set_item("/status:wifi/wifi-iface[name='iot']/device", "radio1")
        .unwrap();
    session.commit().unwrap();

    assert_eq!(wifi_iface_ssids(&store), vec!["OpenWrt", "Guest", "IoT"]);
    let committed = store.committed("wireless").unwrap();
    let added = committed.sections.last().unwrap();
    assert!(added.anonymous);
    assert_eq!(added.get("name"), Some("iot"));
    assert_eq!(added.get("device"), Some("radio1"));
}

#[test]
fn test_deleting_interface_removes_its_section() {
    let (datastore, store, _agent, _leases) = boot_with(NoopReloader::new());

    let mut session = datastore.start_session().unwrap();
    session
        .delete_item("/status:wifi/wifi-iface[name='lan']")
        .unwrap();
    session.commit().unwrap();

    assert_eq!(wifi_iface_ssids(&store), vec!["Guest"]);
    let committed = store.committed("wireless").unwrap();
    let remaining = committed.sections_of_type("wifi-iface").next().unwrap();
    assert_eq!(remaining.name, "cfg043579");
    assert!(!remaining.has_option("name"));
    assert_eq!(remaining.get("encryption"), Some("none"));
}

#[test]
fn test_section_skipped_at_collection_is_left_untouched() {
    let unnamed = Section::anonymous("wifi-iface", "cfg0a0002")
        .with_option("name", "")
        .with_option("ssid", "B")
        .with_option("device", "radio1");
    let package = Package::new("wireless")
        .with_section(
            Section::anonymous("wifi-iface", "cfg0a0001")
                .with_option("name", "lan")
                .with_option("ssid", "A")
                .with_option("device", "radio0"),
        )
        .with_section(unnamed.clone())
        .with_section(Section::new("wifi-iface", "guest").with_option("ssid", "C"));
    let (datastore, store, agent, _leases) = boot_on(package, NoopReloader::new());
    assert!(
        agent
            .collect_report()
            .warnings
            .iter()
            .any(|w| w.contains("skipped"))
    );

    let mut session = datastore.start_session().unwrap();
    session
        .set_item("/status:wifi/wifi-iface[name='lan']/ssid", "A2")
        .unwrap();
    session.commit().unwrap();

    let committed = store.committed("wireless").unwrap();
    assert_eq!(committed.sections.len(), 3);
    assert_eq!(committed.sections[0].get("name"), Some("lan"));
    assert_eq!(committed.sections[0].get("ssid"), Some("A2"));
    assert_eq!(committed.sections[0].get("device"), Some("radio0"));
    assert_eq!(committed.sections[1], unnamed);
    assert_eq!(committed.sections[2].name, "guest");
    assert_eq!(committed.sections[2].get("ssid"), Some("C"));
    assert!(!committed.sections[2].has_option("name"));
}

#[test]
fn test_deleting_leaf_removes_native_option() {
    let (datastore, store, _agent, _leases) = boot_with(NoopReloader::new());

    let mut session = datastore.start_session().unwrap();
    session
        .delete_item("/status:wifi/wifi-device[name='radio0']/macaddr")
        .unwrap();
    session.commit().unwrap();

    let committed = store.committed("wireless").unwrap();
    assert!(!committed.sections[0].has_option("macaddr"));
    assert_eq!(committed.sections[0].get("channel"), Some("11"));
}

#[test]
fn test_empty_value_fails_apply_and_leaves_native_untouched() {
    let (datastore, store, _agent, _leases) = boot_with(NoopReloader::new());

    let mut session = datastore.start_session().unwrap();
    session
        .set_item("/status:wifi/wifi-iface[name='lan']/ssid", "")
        .unwrap();
    let result = session.commit();

    assert!(matches!(result, Err(DatastoreError::CallbackFailed { .. })));
    assert!(store.commit_log().is_empty());
    assert!(!store.has_staged_changes("wireless"));
    assert_eq!(wifi_iface_ssids(&store), vec!["OpenWrt", "Guest"]);
}

#[test]
fn test_commit_failure_is_reported() {
    let (datastore, store, _agent, _leases) = boot_with(NoopReloader::new());
    store.fail_commits(Some("flash is read-only"));

    let mut session = datastore.start_session().unwrap();
    session
        .set_item("/status:wifi/wifi-device[name='radio1']/channel", "40")
        .unwrap();
    let result = session.commit();

    assert!(matches!(
        result,
        Err(DatastoreError::CallbackFailed { ref message, .. }) if message.contains("flash is read-only")
    ));
    assert!(!store.has_staged_changes("wireless"));
}

#[test]
fn test_reload_failure_does_not_fail_apply() {
    let (datastore, store, _agent, _leases) = boot_with(FailingReloader);

    let mut session = datastore.start_session().unwrap();
    session
        .set_item("/status:wifi/wifi-device[name='radio1']/channel", "40")
        .unwrap();
    session.commit().unwrap();

    let committed = store.committed("wireless").unwrap();
    assert_eq!(committed.sections[1].get("channel"), Some("40"));
}

fn without_origins(mut wireless: WirelessConfig) -> WirelessConfig {
    for device in &mut wireless.devices {
        device.origin = None;
    }
    for iface in &mut wireless.interfaces {
        iface.origin = None;
    }
    wireless
}

#[test]
fn test_written_records_read_back_unchanged() {
    let mut source = MemoryStore::with_package(wireless_package());
    let original = read_wireless(&mut source, "wireless").unwrap();

    let mut target = MemoryStore::with_package(Package::new("wireless"));
    let report = write_wireless(
        &mut target,
        "wireless",
        &original.devices,
        &original.interfaces,
        &[],
    )
    .unwrap();
    let reread = read_wireless(&mut target, "wireless").unwrap();

    assert_eq!(report.appended.len(), 4);
    assert_eq!(report.removed_sections, 0);
    assert_eq!(without_origins(reread.clone()), without_origins(original));

    let again = write_wireless(
        &mut target,
        "wireless",
        &reread.devices,
        &reread.interfaces,
        &[],
    )
    .unwrap();
    assert_eq!(again.written, 0);
    assert!(again.appended.is_empty());
}
