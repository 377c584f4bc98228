//! Tests for projecting the state model into a datastore

use pretty_assertions::assert_eq;
use status_core::{Error, Projector, StateModel};
use status_datastore::{Datastore, Item, MemoryDatastore};
use status_model::{BoardInfo, DhcpLease, WifiDevice, WifiInterface};

fn model() -> StateModel {
    let mut model = StateModel::new();

    let mut board = BoardInfo::default();
    board.kernel = Some("5.4.188".into());
    board.release.version = Some("21.02.3".into());
    board.release.description = Some("OpenWrt 21.02.3".into());
    model.set_board(board);

    model
        .push_lease(DhcpLease::new("1700000000", "aa:bb", "10.0.0.2", "laptop", "01:aa"))
        .unwrap();

    let mut radio = WifiDevice::named("radio0");
    radio.channel = Some("11".into());
    model.push_device(radio).unwrap();

    let mut lan = WifiInterface::named("lan");
    lan.ssid = Some("OpenWrt".into());
    model.push_interface(lan).unwrap();

    model
}

#[test]
fn test_projects_every_present_leaf() {
    let store = MemoryDatastore::new();
    let mut session = store.start_session().unwrap();

    let report = Projector::new("status")
        .project(session.as_mut(), &model())
        .unwrap();

    assert_eq!(
        store.items("/status:"),
        vec![
            Item::leaf("/status:board/kernel", "5.4.188"),
            Item::leaf("/status:board/release/version", "21.02.3"),
            Item::leaf("/status:dhcp/dhcp-leases[id='01:aa']/ip", "10.0.0.2"),
            Item::leaf("/status:dhcp/dhcp-leases[id='01:aa']/lease-expirey", "1700000000"),
            Item::leaf("/status:dhcp/dhcp-leases[id='01:aa']/mac", "aa:bb"),
            Item::leaf("/status:dhcp/dhcp-leases[id='01:aa']/name", "laptop"),
            Item::leaf("/status:wifi/wifi-device[name='radio0']/channel", "11"),
            Item::leaf("/status:wifi/wifi-iface[name='lan']/ssid", "OpenWrt"),
        ]
    );
    assert_eq!(report.board, 2);
    assert_eq!(report.leases, 4);
    assert_eq!(report.devices, 1);
    assert_eq!(report.interfaces, 1);
    assert_eq!(report.total(), 8);
}

#[test]
fn test_empty_values_are_not_projected() {
    let mut model = StateModel::new();
    let mut board = BoardInfo::default();
    board.hostname = Some("OpenWrt".into());
    board.release.codename = Some(String::new());
    model.set_board(board);
    let mut lan = WifiInterface::named("lan");
    lan.ssid = Some("OpenWrt".into());
    lan.key = Some(String::new());
    model.push_interface(lan).unwrap();
    let store = MemoryDatastore::new();
    let mut session = store.start_session().unwrap();

    let report = Projector::new("status")
        .project(session.as_mut(), &model)
        .unwrap();

    assert_eq!(
        store.items("/status:"),
        vec![
            Item::leaf("/status:board/hostname", "OpenWrt"),
            Item::leaf("/status:wifi/wifi-iface[name='lan']/ssid", "OpenWrt"),
        ]
    );
    assert_eq!(report.board, 1);
    assert_eq!(report.interfaces, 1);
}

#[test]
fn test_missing_board_skips_subtree() {
    let mut model = StateModel::new();
    model.push_device(WifiDevice::named("radio0")).unwrap();
    let store = MemoryDatastore::new();
    let mut session = store.start_session().unwrap();

    let report = Projector::new("status")
        .project(session.as_mut(), &model)
        .unwrap();

    assert_eq!(report.total(), 0);
    assert!(store.items("/status:board").is_empty());
}

#[test]
fn test_unquotable_key_aborts_without_commit() {
    let mut model = model();
    model
        .push_interface(WifiInterface {
            ssid: Some("x".into()),
            ..WifiInterface::named("it's \"odd\"")
        })
        .unwrap();
    let store = MemoryDatastore::new();
    let mut session = store.start_session().unwrap();

    let result = Projector::new("status").project(session.as_mut(), &model);

    assert!(matches!(
        result,
        Err(Error::Datastore(status_datastore::Error::InvalidIdentifier { .. }))
    ));
    assert!(store.items("/").is_empty());
}
