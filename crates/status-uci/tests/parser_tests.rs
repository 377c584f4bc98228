//! Integration tests for `uci show` parsing

use pretty_assertions::assert_eq;
use status_uci::{Error, parse_show_output};

const SHOW_OUTPUT: &str = "\
wireless.radio0=wifi-device
wireless.radio0.type='mac80211'
wireless.radio0.channel='11'
wireless.radio0.hwmode='11g'
wireless.cfg033579=wifi-iface
wireless.cfg033579.device='radio0'
wireless.cfg033579.ssid='Joe'\\''s net'
wireless.cfg033579.maclist='00:11:22:33:44:55' '66:77:88:99:aa:bb'
";

#[test]
fn test_sections_in_declaration_order() {
    let package = parse_show_output("wireless", SHOW_OUTPUT).unwrap();

    let names: Vec<_> = package.sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["radio0", "cfg033579"]);
    assert_eq!(package.sections[0].section_type, "wifi-device");
    assert!(!package.sections[0].anonymous);
    assert!(package.sections[1].anonymous);
}

#[test]
fn test_option_values_are_unquoted() {
    let package = parse_show_output("wireless", SHOW_OUTPUT).unwrap();
    let iface = &package.sections[1];

    assert_eq!(iface.get("ssid"), Some("Joe's net"));
    assert_eq!(
        iface.get("maclist"),
        Some("00:11:22:33:44:55 66:77:88:99:aa:bb")
    );
}

#[test]
fn test_multi_value_option_is_a_list() {
    let package = parse_show_output("wireless", SHOW_OUTPUT).unwrap();
    let iface = &package.sections[1];

    assert!(iface.is_list("maclist"));
    assert!(!iface.is_list("ssid"));
    assert_eq!(iface.lists, vec!["maclist".to_string()]);
}

#[test]
fn test_options_keep_order() {
    let package = parse_show_output("wireless", SHOW_OUTPUT).unwrap();
    let keys: Vec<_> = package.sections[0]
        .options
        .iter()
        .map(|(k, _)| k.as_str())
        .collect();
    assert_eq!(keys, vec!["type", "channel", "hwmode"]);
}

#[test]
fn test_empty_output_is_empty_package() {
    let package = parse_show_output("wireless", "").unwrap();
    assert!(package.sections.is_empty());
}

#[test]
fn test_other_packages_are_ignored() {
    let output = "network.lan=interface\nwireless.radio0=wifi-device\n";
    let package = parse_show_output("wireless", output).unwrap();
    assert_eq!(package.sections.len(), 1);
}

#[test]
fn test_option_before_section_is_an_error() {
    let output = "wireless.radio0.channel='11'\n";
    let result = parse_show_output("wireless", output);
    assert!(matches!(result, Err(Error::Parse { line: 1, .. })));
}

#[test]
fn test_garbage_line_is_an_error() {
    let output = "wireless.radio0=wifi-device\nnot a uci line\n";
    let result = parse_show_output("wireless", output);
    assert!(matches!(result, Err(Error::Parse { line: 2, .. })));
}
