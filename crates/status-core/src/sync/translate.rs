//! Maps WiFi datastore changes onto the state model

use status_datastore::{Change, ChangeOperation, DataPath};
use status_model::{StateModel, WifiDevice, WifiInterface};

use crate::Result;
use crate::projection::paths;

enum Record {
    Device,
    Interface,
}

/// Apply the WiFi part of a change set to `model`.
///
/// Creating or modifying a leaf sets the field, creating the record when it
/// is new. Deleting a leaf clears the field; deleting a list entry removes
/// the record. Moves and changes outside the WiFi subtree are ignored.
///
/// Returns the number of changes applied.
pub fn apply_changes(model: &mut StateModel, module: &str, changes: &[Change]) -> Result<usize> {
    let mut applied = 0;

    for change in changes {
        if change.operation == ChangeOperation::Moved {
            tracing::debug!(path = change.path(), "Ignoring move");
            continue;
        }

        let path = DataPath::parse(change.path())?;
        if path.module != module || path.segments.first().is_none_or(|s| s.name != paths::WIFI) {
            continue;
        }

        let Some(list) = path.segments.get(1) else {
            continue;
        };
        let record = match list.name.as_str() {
            paths::DEVICE_LIST => Record::Device,
            paths::INTERFACE_LIST => Record::Interface,
            other => {
                tracing::warn!(list = other, "Ignoring change to unknown WiFi list");
                continue;
            }
        };
        let Some(name) = list.predicate(paths::RECORD_KEY) else {
            tracing::warn!(path = change.path(), "Ignoring WiFi change without a record key");
            continue;
        };

        let outcome = match path.segments.get(2) {
            None => apply_entry(model, &record, name, change.operation)?,
            Some(leaf) => {
                let value = change.new.as_ref().and_then(|item| item.value.clone());
                apply_leaf(model, &record, name, &leaf.name, change.operation, value)
            }
        };
        if outcome {
            applied += 1;
        }
    }

    Ok(applied)
}

fn apply_entry(
    model: &mut StateModel,
    record: &Record,
    name: &str,
    operation: ChangeOperation,
) -> Result<bool> {
    match (record, operation) {
        (Record::Device, ChangeOperation::Created) => ensure_device(model, name).map(|_| true),
        (Record::Interface, ChangeOperation::Created) => ensure_interface(model, name).map(|_| true),
        (Record::Device, ChangeOperation::Deleted) => Ok(removed(name, model.remove_device(name))),
        (Record::Interface, ChangeOperation::Deleted) => {
            Ok(removed(name, model.remove_interface(name)))
        }
        _ => Ok(false),
    }
}

fn removed<T>(name: &str, result: status_model::Result<T>) -> bool {
    match result {
        Ok(_) => {
            tracing::debug!(name, "Removed WiFi record");
            true
        }
        Err(e) => {
            tracing::debug!(name, error = %e, "Nothing to remove");
            false
        }
    }
}

fn apply_leaf(
    model: &mut StateModel,
    record: &Record,
    name: &str,
    leaf: &str,
    operation: ChangeOperation,
    value: Option<String>,
) -> bool {
    if leaf == paths::RECORD_KEY {
        tracing::debug!(name, "Ignoring edit of the key leaf");
        return false;
    }

    let value = match operation {
        ChangeOperation::Created | ChangeOperation::Modified => value,
        ChangeOperation::Deleted => None,
        ChangeOperation::Moved => return false,
    };

    let recognized = match (record, operation) {
        (_, ChangeOperation::Deleted) => match record {
            Record::Device => model.device_mut(name).map(|d| d.set_field(leaf, value)),
            Record::Interface => model.interface_mut(name).map(|i| i.set_field(leaf, value)),
        },
        (Record::Device, _) => match ensure_device(model, name) {
            Ok(device) => Some(device.set_field(leaf, value)),
            Err(e) => {
                tracing::warn!(name, error = %e, "Cannot create wifi-device record");
                None
            }
        },
        (Record::Interface, _) => match ensure_interface(model, name) {
            Ok(iface) => Some(iface.set_field(leaf, value)),
            Err(e) => {
                tracing::warn!(name, error = %e, "Cannot create wifi-iface record");
                None
            }
        },
    };

    match recognized {
        Some(true) => true,
        Some(false) => {
            tracing::warn!(name, leaf, "Ignoring unrecognized WiFi leaf");
            false
        }
        None => false,
    }
}

fn ensure_device<'m>(model: &'m mut StateModel, name: &str) -> Result<&'m mut WifiDevice> {
    if model.device(name).is_none() {
        model.push_device(WifiDevice::named(name))?;
        tracing::debug!(name, "Created wifi-device record");
    }
    model.device_mut(name).ok_or_else(|| {
        status_model::Error::RecordNotFound {
            kind: "wifi-device",
            key: name.to_string(),
        }
        .into()
    })
}

fn ensure_interface<'m>(model: &'m mut StateModel, name: &str) -> Result<&'m mut WifiInterface> {
    if model.interface(name).is_none() {
        model.push_interface(WifiInterface::named(name))?;
        tracing::debug!(name, "Created wifi-iface record");
    }
    model.interface_mut(name).ok_or_else(|| {
        status_model::Error::RecordNotFound {
            kind: "wifi-iface",
            key: name.to_string(),
        }
        .into()
    })
}
