//! Writes WiFi records back to the native store
//!
//! A record that came from the native store is written to its origin
//! section by name. A record without an origin, or whose section has since
//! disappeared, gets a new anonymous section. Sections are only deleted when
//! the caller retires them, so native sections that never became records
//! (a duplicate or empty `name`) are left as they are.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use status_model::{WifiDevice, WifiInterface};
use status_uci::{NativeStore, Package, SectionRef, UciPath};

/// A section created for a record that had no native origin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendedSection {
    pub section_type: String,
    /// Identity key of the record
    pub name: String,
    /// Generated section name
    pub section: String,
}

/// Counts of native edits staged and committed by one write pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteReport {
    /// Options set
    pub written: usize,
    /// Options removed because the record field is unset
    pub cleared: usize,
    /// Sections appended for records without an origin
    #[serde(default)]
    pub appended: Vec<AppendedSection>,
    /// Retired sections deleted
    pub removed_sections: usize,
}

/// Write both collections into `package` and commit once.
///
/// `retired` names the sections of records removed since the last write;
/// they are deleted. Options whose value is already in place are not
/// rewritten. Any failure reverts the staged changes and is returned;
/// nothing is committed in that case.
pub fn write_wireless<S: NativeStore + ?Sized>(
    store: &mut S,
    package: &str,
    devices: &[WifiDevice],
    interfaces: &[WifiInterface],
    retired: &[String],
) -> Result<WriteReport> {
    match stage_and_commit(store, package, devices, interfaces, retired) {
        Ok(report) => {
            tracing::info!(
                package,
                written = report.written,
                cleared = report.cleared,
                added = report.appended.len(),
                removed = report.removed_sections,
                "Committed wireless configuration"
            );
            Ok(report)
        }
        Err(e) => {
            if let Err(revert) = store.revert(package) {
                tracing::warn!(package, error = %revert, "Failed to revert staged changes");
            }
            Err(e)
        }
    }
}

/// One record flattened for writing.
struct Record<'a> {
    section_type: &'static str,
    name: &'a str,
    origin: Option<&'a str>,
    fields: Vec<(&'static str, Option<&'a str>)>,
}

fn stage_and_commit<S: NativeStore + ?Sized>(
    store: &mut S,
    package: &str,
    devices: &[WifiDevice],
    interfaces: &[WifiInterface],
    retired: &[String],
) -> Result<WriteReport> {
    let existing = store.load(package)?;
    let mut report = WriteReport::default();

    let records = devices
        .iter()
        .filter_map(|d| {
            Some(Record {
                section_type: WifiDevice::SECTION_TYPE,
                name: d.key()?,
                origin: d.origin.as_deref(),
                fields: d.fields().to_vec(),
            })
        })
        .chain(interfaces.iter().filter_map(|i| {
            Some(Record {
                section_type: WifiInterface::SECTION_TYPE,
                name: i.key()?,
                origin: i.origin.as_deref(),
                fields: i.fields().to_vec(),
            })
        }));

    for record in records {
        stage_record(store, &existing, &record, &mut report)?;
    }

    for section in retired {
        if existing.find(&SectionRef::named(section.as_str())).is_none() {
            tracing::debug!(package, section = %section, "Retired section already gone");
            continue;
        }
        let path = UciPath::section(package, SectionRef::named(section.as_str()));
        store.delete(&path)?;
        tracing::debug!(path = %path, "Removed retired section");
        report.removed_sections += 1;
    }

    store.commit(package)?;
    Ok(report)
}

fn stage_record<S: NativeStore + ?Sized>(
    store: &mut S,
    existing: &Package,
    record: &Record<'_>,
    report: &mut WriteReport,
) -> Result<()> {
    let package = existing.name.as_str();
    let previous = record
        .origin
        .and_then(|origin| existing.find(&SectionRef::named(origin)))
        .filter(|section| section.type_matches(record.section_type));

    let section = match previous {
        Some(section) => section.name.clone(),
        None => {
            let section = store.add_section(package, record.section_type)?;
            tracing::debug!(
                package,
                section_type = record.section_type,
                section = %section,
                name = record.name,
                "Appended section"
            );
            report.appended.push(AppendedSection {
                section_type: record.section_type.to_string(),
                name: record.name.to_string(),
                section: section.clone(),
            });
            section
        }
    };

    for &(option, value) in &record.fields {
        let current = previous.and_then(|s| s.get(option));
        let path = UciPath::option(package, SectionRef::named(section.as_str()), option);
        match value {
            Some(value) if current == Some(value) => {}
            Some("") => {
                return Err(Error::InvalidArgument {
                    path: path.to_string(),
                    reason: "empty value".to_string(),
                });
            }
            // A record named after its section needs no `name` option.
            Some(value) if option == "name" && current.is_none() && value == section => {}
            Some(value) if previous.is_some_and(|s| s.is_list(option)) => {
                store.delete(&path)?;
                for item in value.split_whitespace() {
                    store.add_list(&path, item)?;
                }
                report.written += 1;
            }
            Some(value) => {
                store.set(&path, value)?;
                report.written += 1;
            }
            None if current.is_some() => {
                store.delete(&path)?;
                report.cleared += 1;
            }
            None => {}
        }
    }

    Ok(())
}
