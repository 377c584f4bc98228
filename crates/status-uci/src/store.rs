//! The native configuration store contract

use crate::error::Result;
use crate::package::Package;
use crate::path::UciPath;

/// Load/lookup/set/commit access to the native configuration store.
///
/// Writes are staged until [`NativeStore::commit`] is called for the
/// package; [`NativeStore::revert`] drops staged writes. A package commit is
/// its own transaction boundary.
pub trait NativeStore: Send {
    /// Load a package including any staged changes.
    ///
    /// Returns [`crate::Error::PackageNotFound`] when the package does not exist.
    fn load(&mut self, package: &str) -> Result<Package>;

    /// Set an option, or create a named section when the path has no option.
    fn set(&mut self, path: &UciPath, value: &str) -> Result<()>;

    /// Delete an option or a whole section.
    fn delete(&mut self, path: &UciPath) -> Result<()>;

    /// Append one item to a list option, creating the list if needed.
    fn add_list(&mut self, path: &UciPath, value: &str) -> Result<()>;

    /// Append an anonymous section and return its generated name.
    fn add_section(&mut self, package: &str, section_type: &str) -> Result<String>;

    /// Persist staged changes of a package.
    fn commit(&mut self, package: &str) -> Result<()>;

    /// Drop staged changes of a package.
    fn revert(&mut self, package: &str) -> Result<()>;
}

impl<T: NativeStore + ?Sized> NativeStore for Box<T> {
    fn load(&mut self, package: &str) -> Result<Package> {
        (**self).load(package)
    }

    fn set(&mut self, path: &UciPath, value: &str) -> Result<()> {
        (**self).set(path, value)
    }

    fn delete(&mut self, path: &UciPath) -> Result<()> {
        (**self).delete(path)
    }

    fn add_list(&mut self, path: &UciPath, value: &str) -> Result<()> {
        (**self).add_list(path, value)
    }

    fn add_section(&mut self, package: &str, section_type: &str) -> Result<String> {
        (**self).add_section(package, section_type)
    }

    fn commit(&mut self, package: &str) -> Result<()> {
        (**self).commit(package)
    }

    fn revert(&mut self, package: &str) -> Result<()> {
        (**self).revert(package)
    }
}
