//! Writes the state model into a datastore session

use serde::{Deserialize, Serialize};

use super::paths;
use crate::Result;
use status_datastore::{Session, XPathBuilder};
use status_model::StateModel;

/// Leaves written per subtree by one projection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionReport {
    pub board: usize,
    pub leases: usize,
    pub devices: usize,
    pub interfaces: usize,
}

impl ProjectionReport {
    pub fn total(&self) -> usize {
        self.board + self.leases + self.devices + self.interfaces
    }
}

/// Projects a [`StateModel`] under one datastore module
#[derive(Debug, Clone)]
pub struct Projector {
    module: String,
}

impl Projector {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
        }
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    /// Write every present, non-empty field and commit the session once.
    ///
    /// The first failed write aborts the projection without committing.
    pub fn project(&self, session: &mut dyn Session, model: &StateModel) -> Result<ProjectionReport> {
        let mut report = ProjectionReport::default();
        let module = self.module.as_str();

        if let Some(board) = model.board() {
            for (leaf, value) in board.fields() {
                if let Some(value) = non_empty(value) {
                    session.set_item(&paths::board_leaf(module, leaf), value)?;
                    report.board += 1;
                }
            }
            for (leaf, value) in board.release.fields() {
                if !paths::RELEASE_LEAVES.contains(&leaf) {
                    continue;
                }
                if let Some(value) = non_empty(value) {
                    session.set_item(&paths::release_leaf(module, leaf), value)?;
                    report.board += 1;
                }
            }
        } else {
            tracing::debug!("No board facts to project");
        }

        for lease in model.leases() {
            let Some(id) = lease.key() else { continue };
            let entry = paths::lease_entry(module, id)?;
            report.leases += write_leaves(session, &entry, lease.leaves())?;
        }

        for device in model.devices() {
            let Some(name) = device.key() else { continue };
            let entry = paths::device_entry(module, name)?;
            report.devices += write_leaves(session, &entry, device.fields().into_iter().skip(1))?;
        }

        for iface in model.interfaces() {
            let Some(name) = iface.key() else { continue };
            let entry = paths::interface_entry(module, name)?;
            report.interfaces += write_leaves(session, &entry, iface.fields().into_iter().skip(1))?;
        }

        session.commit()?;

        tracing::info!(
            module,
            board = report.board,
            leases = report.leases,
            devices = report.devices,
            interfaces = report.interfaces,
            "Projected state into datastore"
        );
        Ok(report)
    }
}

/// An empty string is reported as absent.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Write the present leaves below a list entry.
fn write_leaves<'a>(
    session: &mut dyn Session,
    entry: &XPathBuilder,
    leaves: impl IntoIterator<Item = (&'static str, Option<&'a str>)>,
) -> Result<usize> {
    let mut written = 0;
    for (leaf, value) in leaves {
        if let Some(value) = non_empty(value) {
            session.set_item(&entry.clone().child(leaf).build(), value)?;
            written += 1;
        }
    }
    Ok(written)
}
