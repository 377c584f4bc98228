//! Session and subscription contracts

use std::fmt;

use crate::change::{ChangeHandler, Item};
use crate::error::Result;

/// A connection to the running datastore with its own staged edits.
pub trait Session: Send {
    /// Stage a leaf value.
    fn set_item(&mut self, path: &str, value: &str) -> Result<()>;

    /// Stage removal of a node and everything below it.
    fn delete_item(&mut self, path: &str) -> Result<()>;

    /// Current value of a leaf, staged edits included.
    fn get_item(&mut self, path: &str) -> Result<Option<String>>;

    /// All leaves at or below `prefix`, in path order.
    fn get_items(&mut self, prefix: &str) -> Result<Vec<Item>>;

    /// Submit staged edits as one transaction.
    fn commit(&mut self) -> Result<()>;

    /// Drop staged edits.
    fn discard_changes(&mut self) -> Result<()>;
}

pub trait Datastore {
    fn start_session(&self) -> Result<Box<dyn Session>>;

    /// Deliver change events for `module` to `handler` until the returned
    /// subscription is released.
    fn subscribe_module_change(
        &self,
        module: &str,
        handler: Box<dyn ChangeHandler>,
    ) -> Result<Subscription>;
}

type Release = Box<dyn FnOnce() + Send>;

/// Handle for an active change subscription.
///
/// Released on [`Subscription::unsubscribe`] or on drop, whichever comes
/// first; the release runs exactly once.
pub struct Subscription {
    module: String,
    release: Option<Release>,
}

impl Subscription {
    pub fn new(module: impl Into<String>, release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            module: module.into(),
            release: Some(Box::new(release)),
        }
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    pub fn unsubscribe(&mut self) {
        if let Some(release) = self.release.take() {
            tracing::debug!(module = %self.module, "Releasing change subscription");
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("module", &self.module)
            .field("active", &self.is_active())
            .finish()
    }
}
