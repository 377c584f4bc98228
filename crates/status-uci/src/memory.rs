//! In-memory native store

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{Error, Result};
use crate::package::{Package, Section};
use crate::path::{SectionRef, UciPath};
use crate::store::NativeStore;

#[derive(Debug, Default)]
struct Inner {
    committed: BTreeMap<String, Package>,
    staged: BTreeMap<String, Package>,
    commits: Vec<String>,
    next_anonymous: u32,
    commit_failure: Option<String>,
}

impl Inner {
    /// Staged copy of a package, created from the committed state on first write.
    fn staged_mut(&mut self, package: &str) -> Result<&mut Package> {
        if !self.staged.contains_key(package) {
            let base = self
                .committed
                .get(package)
                .cloned()
                .ok_or_else(|| Error::PackageNotFound {
                    package: package.to_string(),
                })?;
            self.staged.insert(package.to_string(), base);
        }
        self.staged
            .get_mut(package)
            .ok_or_else(|| Error::PackageNotFound {
                package: package.to_string(),
            })
    }
}

/// A native store kept in memory.
///
/// Clones share state, so a test can hand one clone to the engine and
/// inspect committed packages through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `package` as committed state.
    pub fn with_package(package: Package) -> Self {
        let store = Self::new();
        store.insert_package(package);
        store
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Replace a package's committed state and drop its staged changes.
    pub fn insert_package(&self, package: Package) {
        let mut inner = self.lock();
        inner.staged.remove(&package.name);
        inner.committed.insert(package.name.clone(), package);
    }

    /// Committed state of a package.
    pub fn committed(&self, package: &str) -> Option<Package> {
        self.lock().committed.get(package).cloned()
    }

    /// True when a package has uncommitted changes.
    pub fn has_staged_changes(&self, package: &str) -> bool {
        self.lock().staged.contains_key(package)
    }

    /// Packages committed so far, in commit order.
    pub fn commit_log(&self) -> Vec<String> {
        self.lock().commits.clone()
    }

    /// Make every following commit fail with `message`; `None` clears it.
    pub fn fail_commits(&self, message: Option<&str>) {
        self.lock().commit_failure = message.map(str::to_string);
    }
}

impl NativeStore for MemoryStore {
    fn load(&mut self, package: &str) -> Result<Package> {
        let inner = self.lock();
        inner
            .staged
            .get(package)
            .or_else(|| inner.committed.get(package))
            .cloned()
            .ok_or_else(|| Error::PackageNotFound {
                package: package.to_string(),
            })
    }

    fn set(&mut self, path: &UciPath, value: &str) -> Result<()> {
        let mut inner = self.lock();
        let package = inner.staged_mut(&path.package)?;

        match &path.option {
            Some(option) => {
                let section = package
                    .find_mut(&path.section)
                    .ok_or_else(|| Error::EntryNotFound {
                        path: path.to_string(),
                    })?;
                section.set(option.as_str(), value);
            }
            None => match &path.section {
                SectionRef::Named(name) => match package.find_mut(&path.section) {
                    Some(section) => section.section_type = value.to_string(),
                    None => package.sections.push(Section::new(value, name.as_str())),
                },
                SectionRef::Indexed { .. } => {
                    return Err(Error::invalid_path(
                        path.to_string(),
                        "cannot create a section by position",
                    ));
                }
            },
        }
        Ok(())
    }

    fn delete(&mut self, path: &UciPath) -> Result<()> {
        let mut inner = self.lock();
        let package = inner.staged_mut(&path.package)?;
        let position = package
            .position(&path.section)
            .ok_or_else(|| Error::EntryNotFound {
                path: path.to_string(),
            })?;

        match &path.option {
            Some(option) => {
                if !package.sections[position].remove(option) {
                    return Err(Error::EntryNotFound {
                        path: path.to_string(),
                    });
                }
            }
            None => {
                package.sections.remove(position);
            }
        }
        Ok(())
    }

    fn add_list(&mut self, path: &UciPath, value: &str) -> Result<()> {
        let mut inner = self.lock();
        let package = inner.staged_mut(&path.package)?;
        let option = path.option.as_deref().ok_or_else(|| {
            Error::invalid_path(path.to_string(), "a list needs an option name")
        })?;
        let section = package
            .find_mut(&path.section)
            .ok_or_else(|| Error::EntryNotFound {
                path: path.to_string(),
            })?;
        section.add_list(option, value);
        Ok(())
    }

    fn add_section(&mut self, package: &str, section_type: &str) -> Result<String> {
        let mut inner = self.lock();
        let staged = inner.staged_mut(package)?;
        let taken: Vec<String> = staged.sections.iter().map(|s| s.name.clone()).collect();
        let name = loop {
            inner.next_anonymous += 1;
            let candidate = format!("cfg{:06x}", inner.next_anonymous);
            if !taken.contains(&candidate) {
                break candidate;
            }
        };
        let staged = inner.staged_mut(package)?;
        staged
            .sections
            .push(Section::anonymous(section_type, name.as_str()));
        Ok(name)
    }

    fn commit(&mut self, package: &str) -> Result<()> {
        let mut inner = self.lock();
        if let Some(message) = inner.commit_failure.clone() {
            return Err(Error::CommitFailed {
                package: package.to_string(),
                message,
            });
        }
        if let Some(staged) = inner.staged.remove(package) {
            inner.committed.insert(package.to_string(), staged);
        } else if !inner.committed.contains_key(package) {
            return Err(Error::PackageNotFound {
                package: package.to_string(),
            });
        }
        inner.commits.push(package.to_string());
        Ok(())
    }

    fn revert(&mut self, package: &str) -> Result<()> {
        self.lock().staged.remove(package);
        Ok(())
    }
}
