//! Startup collection of live state
//!
//! Each source degrades on its own: a missing board, lease file or wireless
//! package is recorded in the [`CollectReport`] and leaves the matching part
//! of the [`StateModel`] empty.

pub mod board;
pub mod leases;

use serde::{Deserialize, Serialize};

use crate::config::AgentConfig;
use crate::native::read_wireless;
use status_fs::NormalizedPath;
use status_model::StateModel;
use status_uci::NativeStore;
use status_ubus::RpcBus;

/// What startup collection found
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectReport {
    /// Whether board facts were collected
    pub board: bool,
    /// Leases stored in the model
    pub leases: usize,
    /// Radios stored in the model
    pub devices: usize,
    /// Interfaces stored in the model
    pub interfaces: usize,
    /// Degradations encountered along the way
    pub warnings: Vec<String>,
}

impl CollectReport {
    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }

    fn warn(&mut self, message: String) {
        tracing::warn!("{}", message);
        self.warnings.push(message);
    }
}

/// Run all collectors and build the state model.
///
/// Never fails; every problem ends up in the report.
pub fn collect<S: NativeStore + ?Sized>(
    bus: &dyn RpcBus,
    store: &mut S,
    config: &AgentConfig,
) -> (StateModel, CollectReport) {
    let mut model = StateModel::new();
    let mut report = CollectReport::default();

    match board::try_fetch_board(bus, config.board_timeout()) {
        Ok(Some(info)) => {
            model.set_board(info);
            report.board = true;
        }
        Ok(None) => report.warn("board facts: no response before timeout".to_string()),
        Err(e) => report.warn(format!("board facts: {}", e)),
    }

    let lease_path = NormalizedPath::new(&config.lease_file);
    match leases::read_lease_file(&lease_path) {
        Ok(leases) => {
            for lease in leases {
                if let Err(e) = model.push_lease(lease) {
                    report.warn(format!("lease skipped: {}", e));
                }
            }
        }
        Err(e) => report.warn(format!("leases: {}", e)),
    }

    match read_wireless(store, &config.wireless_package) {
        Ok(wireless) => {
            let skipped = model.replace_wireless(wireless);
            if skipped > 0 {
                report.warn(format!("wireless: {} record(s) skipped", skipped));
            }
        }
        Err(e) => report.warn(format!("wireless: {}", e)),
    }

    report.leases = model.leases().len();
    report.devices = model.devices().len();
    report.interfaces = model.interfaces().len();

    tracing::info!(
        board = report.board,
        leases = report.leases,
        devices = report.devices,
        interfaces = report.interfaces,
        "Collected live state"
    );

    (model, report)
}
