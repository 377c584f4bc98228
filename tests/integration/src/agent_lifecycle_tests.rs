//! End-to-end tests for the agent lifecycle
//!
//! These tests exercise the complete flow: collect -> project -> subscribe
//! -> verify/apply -> unsubscribe, over in-memory stores.

use pretty_assertions::assert_eq;
use rstest::rstest;
use status_core::{Agent, AgentConfig, NoopReloader};
use status_datastore::{Datastore, Error as DatastoreError, Item, MemoryDatastore};
use status_test_utils::{LeaseFile, StaticBus, board_response, wireless_package};
use status_uci::MemoryStore;

struct Device {
    datastore: MemoryDatastore,
    store: MemoryStore,
    reloader: NoopReloader,
    _leases: LeaseFile,
    agent: Agent,
}

fn boot() -> Device {
    let leases = LeaseFile::standard();
    let config = AgentConfig {
        lease_file: leases.path_string(),
        ..AgentConfig::default()
    };
    let datastore = MemoryDatastore::new();
    let bus = StaticBus::new().with_reply("system", "board", board_response());
    let store = MemoryStore::with_package(wireless_package());
    let reloader = NoopReloader::new();

    let agent = Agent::init(&datastore, &bus, store.clone(), reloader.clone(), &config).unwrap();

    Device {
        datastore,
        store,
        reloader,
        _leases: leases,
        agent,
    }
}

#[test]
fn test_init_projects_all_subtrees() {
    let device = boot();

    let report = device.agent.projection_report();
    assert_eq!(report.board, 7);
    assert_eq!(report.leases, 8);
    assert!(report.devices > 0);
    assert!(report.interfaces > 0);
    assert!(device.agent.is_active());
    assert_eq!(device.datastore.subscriber_count("status"), 1);

    assert_eq!(
        device.datastore.items("/status:board/release/version"),
        vec![Item::leaf("/status:board/release/version", "21.02.3")]
    );
    assert_eq!(
        device
            .datastore
            .items("/status:wifi/wifi-iface[name='lan']/ssid"),
        vec![Item::leaf("/status:wifi/wifi-iface[name='lan']/ssid", "OpenWrt")]
    );
    assert!(
        device
            .datastore
            .items("/status:board/release/description")
            .is_empty()
    );
    assert!(
        device
            .datastore
            .items("/status:board/release/codename")
            .is_empty()
    );
}

#[rstest]
#[case("/status:board/hostname")]
#[case("/status:board/release/version")]
#[case("/status:dhcp/dhcp-leases[id='01:00:11:22:33:44:55']/ip")]
fn test_read_only_edits_are_vetoed(#[case] path: &str) {
    let device = boot();
    let before = device.datastore.items("/status:");

    let mut session = device.datastore.start_session().unwrap();
    session.set_item(path, "changed").unwrap();
    let result = session.commit();

    assert!(matches!(result, Err(DatastoreError::ValidationFailed { .. })));
    assert_eq!(device.datastore.items("/status:"), before);
    assert!(device.store.commit_log().is_empty());
    assert_eq!(device.reloader.requests(), 0);
}

#[test]
fn test_deleting_a_lease_is_vetoed() {
    let device = boot();

    let mut session = device.datastore.start_session().unwrap();
    session
        .delete_item("/status:dhcp/dhcp-leases[id='01:00:11:22:33:44:55']")
        .unwrap();

    assert!(matches!(
        session.commit(),
        Err(DatastoreError::ValidationFailed { .. })
    ));
}

#[test]
fn test_wifi_edit_reaches_native_store() {
    let device = boot();

    let mut session = device.datastore.start_session().unwrap();
    session
        .set_item("/status:wifi/wifi-device[name='radio0']/channel", "6")
        .unwrap();
    session.commit().unwrap();

    let committed = device.store.committed("wireless").unwrap();
    assert_eq!(committed.sections[0].get("channel"), Some("6"));
    assert_eq!(committed.sections[1].get("channel"), Some("36"));
    assert_eq!(device.store.commit_log(), vec!["wireless".to_string()]);
    assert_eq!(device.reloader.requests(), 1);
}

#[test]
fn test_consecutive_transactions() {
    let device = boot();

    for channel in ["1", "6", "11"] {
        let mut session = device.datastore.start_session().unwrap();
        session
            .set_item("/status:wifi/wifi-device[name='radio0']/channel", channel)
            .unwrap();
        session.commit().unwrap();
    }

    let committed = device.store.committed("wireless").unwrap();
    assert_eq!(committed.sections[0].get("channel"), Some("11"));
    assert_eq!(device.reloader.requests(), 3);
}

#[test]
fn test_rejected_transaction_does_not_block_the_next() {
    let device = boot();

    let mut session = device.datastore.start_session().unwrap();
    session.set_item("/status:board/kernel", "6.1").unwrap();
    assert!(session.commit().is_err());
    session.discard_changes().unwrap();

    session
        .set_item("/status:wifi/wifi-iface[name='lan']/ssid", "Renamed")
        .unwrap();
    session.commit().unwrap();

    let committed = device.store.committed("wireless").unwrap();
    assert_eq!(committed.sections[2].get("ssid"), Some("Renamed"));
}

#[test]
fn test_cleanup_releases_subscription_once() {
    let mut device = boot();

    device.agent.cleanup();
    device.agent.cleanup();

    assert!(!device.agent.is_active());
    assert_eq!(device.datastore.subscriber_count("status"), 0);

    let mut session = device.datastore.start_session().unwrap();
    session.set_item("/status:board/kernel", "6.1").unwrap();
    session.commit().unwrap();
    assert!(device.store.commit_log().is_empty());
}

#[test]
fn test_drop_releases_subscription() {
    let device = boot();
    let datastore = device.datastore.clone();

    drop(device);

    assert_eq!(datastore.subscriber_count("status"), 0);
}

#[test]
fn test_degraded_startup_still_subscribes() {
    let leases = LeaseFile::missing();
    let config = AgentConfig {
        lease_file: leases.path_string(),
        ..AgentConfig::default()
    };
    let datastore = MemoryDatastore::new();
    let bus = StaticBus::new().with_timeout("system", "board");

    let agent = Agent::init(
        &datastore,
        &bus,
        MemoryStore::new(),
        NoopReloader::new(),
        &config,
    )
    .unwrap();

    assert_eq!(agent.collect_report().warnings.len(), 3);
    assert_eq!(agent.projection_report().total(), 0);
    assert!(agent.is_active());
    assert!(datastore.items("/").is_empty());
}
