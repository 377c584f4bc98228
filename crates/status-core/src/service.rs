//! Network service reload after native commits

use std::process::Command;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::ReloadConfig;
use crate::error::{Error, Result};

/// Makes the running services pick up committed native configuration.
pub trait ServiceReloader: Send {
    fn reload(&mut self) -> Result<()>;
}

impl<T: ServiceReloader + ?Sized> ServiceReloader for Box<T> {
    fn reload(&mut self) -> Result<()> {
        (**self).reload()
    }
}

/// Runs an init script, `/etc/init.d/network restart` by default.
#[derive(Debug, Clone)]
pub struct CommandReloader {
    command: String,
    args: Vec<String>,
}

impl CommandReloader {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }
}

impl From<&ReloadConfig> for CommandReloader {
    fn from(config: &ReloadConfig) -> Self {
        Self::new(config.command.clone(), config.args.clone())
    }
}

impl ServiceReloader for CommandReloader {
    fn reload(&mut self) -> Result<()> {
        tracing::info!(command = %self.command, args = ?self.args, "Reloading network service");
        let status = Command::new(&self.command)
            .args(&self.args)
            .status()
            .map_err(|e| Error::Reload {
                command: self.command.clone(),
                message: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::Reload {
                command: self.command.clone(),
                message: format!("exit status {}", status.code().unwrap_or(-1)),
            })
        }
    }
}

/// Skips the reload and counts how often one was requested.
///
/// Clones share the counter.
#[derive(Debug, Clone, Default)]
pub struct NoopReloader {
    requests: Arc<AtomicUsize>,
}

impl NoopReloader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl ServiceReloader for NoopReloader {
    fn reload(&mut self) -> Result<()> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        tracing::debug!("Service reload skipped");
        Ok(())
    }
}
