//! SyncEngine implementation
//!
//! The SyncEngine is the change handler of the status module. It owns the
//! [`StateModel`], vetoes edits to read-only state during verify, and on
//! apply writes the WiFi records back to the native store.

use serde::Serialize;

use super::phase::{Phase, PhaseTracker};
use super::translate::apply_changes;
use super::validator::ChangeValidator;
use crate::Result;
use crate::config::AgentConfig;
use crate::native::{WriteReport, write_wireless};
use crate::service::ServiceReloader;
use status_datastore::{ChangeContext, ChangeEvent, ChangeHandler, HandlerResult};
use status_model::StateModel;
use status_uci::NativeStore;

/// Options for the sync engine
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Datastore module whose changes are handled
    pub module: String,
    /// Native package the WiFi records are written to
    pub wireless_package: String,
    /// Substrings that mark a path as read-only
    pub read_only_markers: Vec<String>,
    /// Whether to reload the network service after a commit
    pub reload: bool,
}

impl From<&AgentConfig> for SyncOptions {
    fn from(config: &AgentConfig) -> Self {
        Self {
            module: config.module.clone(),
            wireless_package: config.wireless_package.clone(),
            read_only_markers: config.read_only_markers.clone(),
            reload: config.reload.enabled,
        }
    }
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self::from(&AgentConfig::default())
    }
}

/// Outcome of one apply
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    /// WiFi changes applied to the model
    pub changes: usize,
    /// Native write pass, when one ran
    pub write: Option<WriteReport>,
    /// Whether the service reload succeeded
    pub reloaded: bool,
}

/// Handles verify/apply events for the status module
pub struct SyncEngine<S, R> {
    model: StateModel,
    native: S,
    reloader: R,
    validator: ChangeValidator,
    phases: PhaseTracker,
    options: SyncOptions,
}

impl<S: NativeStore, R: ServiceReloader> SyncEngine<S, R> {
    pub fn new(model: StateModel, native: S, reloader: R, options: SyncOptions) -> Self {
        let validator = ChangeValidator::new(&options.module, options.read_only_markers.clone());
        Self {
            model,
            native,
            reloader,
            validator,
            phases: PhaseTracker::new(),
            options,
        }
    }

    pub fn model(&self) -> &StateModel {
        &self.model
    }

    pub fn phase(&self) -> Phase {
        self.phases.phase()
    }

    /// Validate a proposed change set.
    pub fn verify(&mut self, ctx: &ChangeContext) -> Result<()> {
        self.phases.begin_verify(ctx.transaction)?;
        if let Err(e) = self.validator.verify(ctx) {
            self.phases.finish(ctx.transaction);
            return Err(e);
        }
        Ok(())
    }

    /// Apply an accepted change set to the model and the native store.
    ///
    /// The model is only updated when the native write succeeds.
    pub fn apply(&mut self, ctx: &ChangeContext) -> Result<ApplyReport> {
        self.phases.begin_apply(ctx.transaction)?;
        let result = self.apply_inner(ctx);
        self.phases.finish(ctx.transaction);
        result
    }

    fn apply_inner(&mut self, ctx: &ChangeContext) -> Result<ApplyReport> {
        let mut report = ApplyReport::default();
        let mut candidate = self.model.clone();
        report.changes = apply_changes(&mut candidate, &self.options.module, &ctx.changes)?;

        if report.changes == 0 {
            tracing::debug!(transaction = %ctx.transaction, "No WiFi changes to write");
            return Ok(report);
        }

        let retired: Vec<String> = self
            .model
            .origins()
            .filter(|origin| !candidate.origins().any(|kept| kept == *origin))
            .map(str::to_string)
            .collect();
        let write = write_wireless(
            &mut self.native,
            &self.options.wireless_package,
            candidate.devices(),
            candidate.interfaces(),
            &retired,
        )?;
        for added in &write.appended {
            candidate.set_origin(&added.section_type, &added.name, added.section.as_str());
        }
        report.write = Some(write);
        self.model = candidate;

        if self.options.reload {
            match self.reloader.reload() {
                Ok(()) => report.reloaded = true,
                Err(e) => tracing::warn!(error = %e, "Network service reload failed"),
            }
        }

        tracing::info!(
            transaction = %ctx.transaction,
            changes = report.changes,
            reloaded = report.reloaded,
            "Applied WiFi changes"
        );
        Ok(report)
    }

    pub fn abort(&mut self, ctx: &ChangeContext) -> Result<()> {
        self.phases.abort(ctx.transaction)?;
        tracing::info!(transaction = %ctx.transaction, "Transaction aborted");
        Ok(())
    }

    /// Dispatch one change event.
    pub fn handle(&mut self, event: ChangeEvent, ctx: &ChangeContext) -> Result<()> {
        tracing::debug!(%event, transaction = %ctx.transaction, changes = ctx.changes.len(), "Change event");
        match event {
            ChangeEvent::Verify => self.verify(ctx),
            ChangeEvent::Apply => self.apply(ctx).map(|_| ()),
            ChangeEvent::Abort => self.abort(ctx),
            ChangeEvent::Enabled => Ok(()),
        }
    }
}

impl<S, R> ChangeHandler for SyncEngine<S, R>
where
    S: NativeStore,
    R: ServiceReloader,
{
    fn on_change(&mut self, event: ChangeEvent, ctx: &ChangeContext) -> HandlerResult {
        self.handle(event, ctx).map_err(Into::into)
    }
}
