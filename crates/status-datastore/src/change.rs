//! Change sets delivered to subscribed modules

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of the two-phase change protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeEvent {
    /// The transaction is proposed; a handler error vetoes it.
    Verify,
    /// The transaction was accepted and is now in the running data.
    Apply,
    /// A verified transaction was rejected elsewhere.
    Abort,
    /// The subscription became active.
    Enabled,
}

impl fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Verify => "verify",
            Self::Apply => "apply",
            Self::Abort => "abort",
            Self::Enabled => "enabled",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeOperation {
    Created,
    Modified,
    Deleted,
    Moved,
}

/// A node at a datastore path.
///
/// Leaves carry a value; list entries and containers carry `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub path: String,
    pub value: Option<String>,
}

impl Item {
    pub fn leaf(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value: Some(value.into()),
        }
    }

    pub fn node(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value: None,
        }
    }
}

/// One entry of a change set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub operation: ChangeOperation,
    /// Previous node; absent for creations.
    pub old: Option<Item>,
    /// New node; absent for deletions.
    pub new: Option<Item>,
}

impl Change {
    pub fn created(item: Item) -> Self {
        Self {
            operation: ChangeOperation::Created,
            old: None,
            new: Some(item),
        }
    }

    pub fn modified(old: Item, new: Item) -> Self {
        Self {
            operation: ChangeOperation::Modified,
            old: Some(old),
            new: Some(new),
        }
    }

    pub fn deleted(item: Item) -> Self {
        Self {
            operation: ChangeOperation::Deleted,
            old: Some(item),
            new: None,
        }
    }

    /// Path of the affected node: the new one, or the old one for deletions.
    pub fn path(&self) -> &str {
        self.new
            .as_ref()
            .or(self.old.as_ref())
            .map(|item| item.path.as_str())
            .unwrap_or_default()
    }
}

/// Monotonic transaction identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TransactionId(pub u64);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "txn-{}", self.0)
    }
}

/// Everything a handler sees for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeContext {
    pub module: String,
    pub transaction: TransactionId,
    pub changes: Vec<Change>,
}

impl ChangeContext {
    /// Changes whose path matches `selector`.
    ///
    /// A trailing `*` makes the selector a prefix; otherwise it matches the
    /// node itself and everything below it.
    ///
    /// # Example
    /// ```
    /// use status_datastore::{Change, ChangeContext, Item, TransactionId};
    ///
    /// let ctx = ChangeContext {
    ///     module: "status".into(),
    ///     transaction: TransactionId(1),
    ///     changes: vec![Change::created(Item::leaf("/status:board/kernel", "5.4"))],
    /// };
    /// assert_eq!(ctx.changes_matching("/status:*").count(), 1);
    /// assert_eq!(ctx.changes_matching("/status:wifi").count(), 0);
    /// ```
    pub fn changes_matching<'a>(&'a self, selector: &'a str) -> impl Iterator<Item = &'a Change> + 'a {
        self.changes
            .iter()
            .filter(move |change| selector_matches(selector, change.path()))
    }
}

fn selector_matches(selector: &str, path: &str) -> bool {
    match selector.strip_suffix('*') {
        Some(prefix) => path.starts_with(prefix),
        None => {
            path == selector
                || path
                    .strip_prefix(selector)
                    .is_some_and(|rest| rest.starts_with('/') || rest.starts_with('['))
        }
    }
}

pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;
pub type HandlerResult = std::result::Result<(), HandlerError>;

/// Receives change events for a subscribed module.
pub trait ChangeHandler: Send {
    fn on_change(&mut self, event: ChangeEvent, ctx: &ChangeContext) -> HandlerResult;
}

impl<F> ChangeHandler for F
where
    F: FnMut(ChangeEvent, &ChangeContext) -> HandlerResult + Send,
{
    fn on_change(&mut self, event: ChangeEvent, ctx: &ChangeContext) -> HandlerResult {
        self(event, ctx)
    }
}
