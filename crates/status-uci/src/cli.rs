//! Native store backed by the device's `uci` command-line tool

use std::path::PathBuf;
use std::process::Command;

use crate::error::{Error, Result};
use crate::package::Package;
use crate::parser::parse_show_output;
use crate::path::UciPath;
use crate::store::NativeStore;

/// Runs one `uci` process per operation.
///
/// Staged changes live in the tool's own save directory, so they survive
/// between invocations until committed or reverted.
#[derive(Debug, Clone)]
pub struct UciCli {
    program: String,
    config_dir: Option<PathBuf>,
    save_dir: Option<PathBuf>,
}

impl Default for UciCli {
    fn default() -> Self {
        Self::new("uci")
    }
}

impl UciCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            config_dir: None,
            save_dir: None,
        }
    }

    /// Use an alternative configuration directory (`uci -c`).
    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = Some(dir.into());
        self
    }

    /// Use an alternative directory for staged changes (`uci -P`).
    pub fn with_save_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.save_dir = Some(dir.into());
        self
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        let mut command = Command::new(&self.program);
        if let Some(dir) = &self.config_dir {
            command.arg("-c").arg(dir);
        }
        if let Some(dir) = &self.save_dir {
            command.arg("-P").arg(dir);
        }
        command.args(args);

        let rendered = format!("{} {}", self.program, args.join(" "));
        tracing::debug!(command = %rendered, "Running uci");

        let output = command.output().map_err(|source| Error::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(Error::Command {
                command: rendered,
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

/// `uci` reports lookups of missing entries as "Entry not found".
fn is_missing_entry(error: &Error) -> bool {
    matches!(error, Error::Command { stderr, .. } if stderr.contains("Entry not found"))
}

impl NativeStore for UciCli {
    fn load(&mut self, package: &str) -> Result<Package> {
        let output = self.run(&["-X", "show", package]).map_err(|e| {
            if is_missing_entry(&e) {
                Error::PackageNotFound {
                    package: package.to_string(),
                }
            } else {
                e
            }
        })?;
        parse_show_output(package, &output)
    }

    fn set(&mut self, path: &UciPath, value: &str) -> Result<()> {
        let assignment = format!("{}={}", path, value);
        self.run(&["set", &assignment]).map_err(|e| {
            if is_missing_entry(&e) {
                Error::EntryNotFound {
                    path: path.to_string(),
                }
            } else {
                e
            }
        })?;
        Ok(())
    }

    fn delete(&mut self, path: &UciPath) -> Result<()> {
        let rendered = path.to_string();
        self.run(&["delete", &rendered]).map_err(|e| {
            if is_missing_entry(&e) {
                Error::EntryNotFound { path: rendered.clone() }
            } else {
                e
            }
        })?;
        Ok(())
    }

    fn add_list(&mut self, path: &UciPath, value: &str) -> Result<()> {
        let assignment = format!("{}={}", path, value);
        self.run(&["add_list", &assignment]).map_err(|e| {
            if is_missing_entry(&e) {
                Error::EntryNotFound {
                    path: path.to_string(),
                }
            } else {
                e
            }
        })?;
        Ok(())
    }

    fn add_section(&mut self, package: &str, section_type: &str) -> Result<String> {
        let output = self.run(&["add", package, section_type])?;
        Ok(output.trim().to_string())
    }

    fn commit(&mut self, package: &str) -> Result<()> {
        self.run(&["commit", package]).map_err(|e| Error::CommitFailed {
            package: package.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    fn revert(&mut self, package: &str) -> Result<()> {
        self.run(&["revert", package])?;
        Ok(())
    }
}
