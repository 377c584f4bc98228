//! In-process datastore engine
//!
//! Keeps the running data as a map of canonical leaf paths to values. List
//! entries exist implicitly while any leaf below them exists, and show up in
//! change sets as `Created`/`Deleted` nodes of their own.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::change::{Change, ChangeContext, ChangeEvent, ChangeHandler, Item, TransactionId};
use crate::datastore::{Datastore, Session, Subscription};
use crate::error::{Error, Result};
use crate::xpath::DataPath;

type Tree = BTreeMap<String, String>;

struct Slot {
    id: u64,
    module: String,
    /// `None` while the handler is out for dispatch.
    handler: Option<Box<dyn ChangeHandler>>,
}

#[derive(Default)]
struct Inner {
    running: Tree,
    slots: Vec<Slot>,
    next_subscription: u64,
    next_transaction: u64,
}

type Dispatch = Vec<(u64, String, Box<dyn ChangeHandler>)>;

impl Inner {
    fn take_handlers(&mut self, modules: &BTreeSet<String>) -> Dispatch {
        let mut taken = Vec::new();
        for slot in &mut self.slots {
            if !modules.contains(&slot.module) {
                continue;
            }
            match slot.handler.take() {
                Some(handler) => taken.push((slot.id, slot.module.clone(), handler)),
                None => tracing::debug!(
                    module = %slot.module,
                    "Handler busy, skipping nested transaction"
                ),
            }
        }
        taken
    }

    fn restore_handlers(&mut self, taken: Dispatch) {
        for (id, _, handler) in taken {
            if let Some(slot) = self.slots.iter_mut().find(|s| s.id == id) {
                slot.handler = Some(handler);
            }
        }
    }
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(|e| e.into_inner())
}

/// A datastore held in memory.
///
/// Clones share the same running data and subscriptions. Handlers run with
/// the internal lock released, so they may open sessions of their own.
#[derive(Clone, Default)]
pub struct MemoryDatastore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryDatastore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Running leaves at or below `prefix`.
    pub fn items(&self, prefix: &str) -> Vec<Item> {
        lock(&self.inner)
            .running
            .iter()
            .filter(|(path, _)| path.starts_with(prefix))
            .map(|(path, value)| Item::leaf(path.as_str(), value.as_str()))
            .collect()
    }

    pub fn subscriber_count(&self, module: &str) -> usize {
        lock(&self.inner)
            .slots
            .iter()
            .filter(|s| s.module == module)
            .count()
    }
}

impl fmt::Debug for MemoryDatastore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = lock(&self.inner);
        f.debug_struct("MemoryDatastore")
            .field("leaves", &inner.running.len())
            .field("subscriptions", &inner.slots.len())
            .finish()
    }
}

impl Datastore for MemoryDatastore {
    fn start_session(&self) -> Result<Box<dyn Session>> {
        Ok(Box::new(MemorySession {
            store: Arc::clone(&self.inner),
            candidate: None,
        }))
    }

    fn subscribe_module_change(
        &self,
        module: &str,
        handler: Box<dyn ChangeHandler>,
    ) -> Result<Subscription> {
        let id = {
            let mut inner = lock(&self.inner);
            inner.next_subscription += 1;
            let id = inner.next_subscription;
            inner.slots.push(Slot {
                id,
                module: module.to_string(),
                handler: Some(handler),
            });
            id
        };
        tracing::info!(module, "Subscribed to module changes");

        let weak = Arc::downgrade(&self.inner);
        Ok(Subscription::new(module, move || {
            if let Some(inner) = weak.upgrade() {
                lock(&inner).slots.retain(|s| s.id != id);
            }
        }))
    }
}

struct MemorySession {
    store: Arc<Mutex<Inner>>,
    /// Running data plus staged edits; `None` until the first edit.
    candidate: Option<Tree>,
}

impl MemorySession {
    fn candidate_mut(&mut self) -> &mut Tree {
        let store = &self.store;
        self.candidate
            .get_or_insert_with(|| lock(store).running.clone())
    }
}

fn module_of(path: &str) -> Option<&str> {
    path.strip_prefix('/')?.split_once(':').map(|(m, _)| m)
}

/// Leaves plus the list entry nodes they imply.
fn expand(tree: &Tree) -> BTreeMap<String, Option<String>> {
    let mut nodes = BTreeMap::new();
    for (path, value) in tree {
        if let Ok(parsed) = DataPath::parse(path) {
            for entry in parsed.entry_paths() {
                nodes.entry(entry).or_insert(None);
            }
        }
        nodes.insert(path.clone(), Some(value.clone()));
    }
    nodes
}

fn diff(old: &Tree, new: &Tree) -> Vec<Change> {
    let old = expand(old);
    let new = expand(new);
    let paths: BTreeSet<&String> = old.keys().chain(new.keys()).collect();

    paths
        .into_iter()
        .filter_map(|path| {
            let item = |value: &Option<String>| Item {
                path: path.clone(),
                value: value.clone(),
            };
            match (old.get(path), new.get(path)) {
                (None, Some(v)) => Some(Change::created(item(v))),
                (Some(v), None) => Some(Change::deleted(item(v))),
                (Some(a), Some(b)) if a != b => Some(Change::modified(item(a), item(b))),
                _ => None,
            }
        })
        .collect()
}

impl Session for MemorySession {
    fn set_item(&mut self, path: &str, value: &str) -> Result<()> {
        let parsed = DataPath::parse(path)?;
        if parsed.leaf().is_none() {
            return Err(Error::invalid_path(path, "not a leaf"));
        }
        self.candidate_mut()
            .insert(parsed.to_string(), value.to_string());
        Ok(())
    }

    fn delete_item(&mut self, path: &str) -> Result<()> {
        let canonical = DataPath::parse(path)?.to_string();
        let candidate = self.candidate_mut();
        let before = candidate.len();
        candidate.retain(|key, _| {
            let below = key
                .strip_prefix(canonical.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/') || rest.starts_with('['));
            !below
        });
        if candidate.len() == before {
            return Err(Error::NotFound {
                path: path.to_string(),
            });
        }
        Ok(())
    }

    fn get_item(&mut self, path: &str) -> Result<Option<String>> {
        let canonical = DataPath::parse(path)?.to_string();
        let value = match &self.candidate {
            Some(candidate) => candidate.get(&canonical).cloned(),
            None => lock(&self.store).running.get(&canonical).cloned(),
        };
        Ok(value)
    }

    fn get_items(&mut self, prefix: &str) -> Result<Vec<Item>> {
        let collect = |tree: &Tree| -> Vec<Item> {
            tree.iter()
                .filter(|(path, _)| path.starts_with(prefix))
                .map(|(path, value)| Item::leaf(path.as_str(), value.as_str()))
                .collect()
        };
        Ok(match &self.candidate {
            Some(candidate) => collect(candidate),
            None => collect(&lock(&self.store).running),
        })
    }

    fn commit(&mut self) -> Result<()> {
        let Some(candidate) = self.candidate.take() else {
            return Ok(());
        };

        let (transaction, contexts, mut taken) = {
            let mut inner = lock(&self.store);
            let changes = diff(&inner.running, &candidate);
            if changes.is_empty() {
                return Ok(());
            }
            inner.next_transaction += 1;
            let transaction = TransactionId(inner.next_transaction);

            let mut contexts: BTreeMap<String, ChangeContext> = BTreeMap::new();
            for change in changes {
                let Some(module) = module_of(change.path()).map(str::to_string) else {
                    continue;
                };
                contexts
                    .entry(module.clone())
                    .or_insert_with(|| ChangeContext {
                        module,
                        transaction,
                        changes: Vec::new(),
                    })
                    .changes
                    .push(change);
            }

            let modules: BTreeSet<String> = contexts.keys().cloned().collect();
            let taken = inner.take_handlers(&modules);
            (transaction, contexts, taken)
        };

        tracing::debug!(%transaction, handlers = taken.len(), "Committing transaction");

        let mut verified = Vec::new();
        let mut rejection = None;
        for (index, (_, module, handler)) in taken.iter_mut().enumerate() {
            let Some(ctx) = contexts.get(module.as_str()) else {
                continue;
            };
            match handler.on_change(ChangeEvent::Verify, ctx) {
                Ok(()) => verified.push(index),
                Err(e) => {
                    tracing::warn!(%transaction, module = %module, error = %e, "Transaction rejected");
                    rejection = Some(Error::ValidationFailed {
                        module: module.clone(),
                        message: e.to_string(),
                    });
                    break;
                }
            }
        }

        if let Some(error) = rejection {
            for index in verified {
                let (_, module, handler) = &mut taken[index];
                if let Some(ctx) = contexts.get(module.as_str()) {
                    if let Err(e) = handler.on_change(ChangeEvent::Abort, ctx) {
                        tracing::warn!(%transaction, module = %module, error = %e, "Abort handler failed");
                    }
                }
            }
            lock(&self.store).restore_handlers(taken);
            self.candidate = Some(candidate);
            return Err(error);
        }

        lock(&self.store).running = candidate;

        let mut apply_error = None;
        for (_, module, handler) in taken.iter_mut() {
            let Some(ctx) = contexts.get(module.as_str()) else {
                continue;
            };
            if let Err(e) = handler.on_change(ChangeEvent::Apply, ctx) {
                tracing::warn!(%transaction, module = %module, error = %e, "Apply handler failed");
                apply_error.get_or_insert(Error::CallbackFailed {
                    module: module.clone(),
                    message: e.to_string(),
                });
            }
        }

        lock(&self.store).restore_handlers(taken);

        match apply_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn discard_changes(&mut self) -> Result<()> {
        self.candidate = None;
        Ok(())
    }
}
