//! Configuration and adapters shared by the commands

use std::path::Path;

use status_core::{AgentConfig, CommandReloader, NoopReloader, ServiceReloader};
use status_fs::NormalizedPath;
use status_ubus::UbusCli;
use status_uci::UciCli;

use crate::error::{CliError, Result};

pub struct Context {
    pub config: AgentConfig,
}

impl Context {
    /// Load the configuration file, if any, and apply flag overrides.
    pub fn load(config_path: Option<&Path>, lease_file: Option<&str>) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::user(format!(
                        "Configuration file not found: {}",
                        path.display()
                    )));
                }
                AgentConfig::load(&NormalizedPath::new(path))?
            }
            None => AgentConfig::default(),
        };

        if let Some(lease_file) = lease_file {
            config.lease_file = lease_file.to_string();
        }

        Ok(Self { config })
    }

    pub fn bus(&self) -> UbusCli {
        UbusCli::new(self.config.ubus_binary.as_str())
    }

    pub fn native_store(&self) -> UciCli {
        let mut store = UciCli::new(self.config.uci_binary.as_str());
        if let Some(dir) = &self.config.uci_config_dir {
            store = store.with_config_dir(dir);
        }
        if let Some(dir) = &self.config.uci_save_dir {
            store = store.with_save_dir(dir);
        }
        store
    }

    pub fn reloader(&self, skip: bool) -> Box<dyn ServiceReloader> {
        if skip || !self.config.reload.enabled {
            Box::new(NoopReloader::new())
        } else {
            Box::new(CommandReloader::from(&self.config.reload))
        }
    }
}
