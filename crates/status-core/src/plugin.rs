//! Agent lifecycle
//!
//! [`Agent::init`] collects live state, projects it into the datastore and
//! subscribes the [`SyncEngine`] to the module's changes. The subscription
//! is released by [`Agent::cleanup`] or when the agent is dropped.

use crate::Result;
use crate::collect::{CollectReport, collect};
use crate::config::AgentConfig;
use crate::projection::{ProjectionReport, Projector};
use crate::service::ServiceReloader;
use crate::sync::{SyncEngine, SyncOptions};
use status_datastore::{Datastore, Subscription};
use status_ubus::RpcBus;
use status_uci::NativeStore;

/// A running agent holding its change subscription
#[derive(Debug)]
pub struct Agent {
    module: String,
    subscription: Option<Subscription>,
    collected: CollectReport,
    projected: ProjectionReport,
}

impl Agent {
    /// Collect, project and subscribe.
    ///
    /// Collection problems only degrade the projected state. Projection or
    /// subscription failures are returned and leave nothing subscribed.
    pub fn init<S, R>(
        datastore: &dyn Datastore,
        bus: &dyn RpcBus,
        mut native: S,
        reloader: R,
        config: &AgentConfig,
    ) -> Result<Self>
    where
        S: NativeStore + 'static,
        R: ServiceReloader + 'static,
    {
        let (model, collected) = collect(bus, &mut native, config);

        let mut session = datastore.start_session()?;
        let projected = Projector::new(config.module.as_str()).project(session.as_mut(), &model)?;

        let engine = SyncEngine::new(model, native, reloader, SyncOptions::from(config));
        let subscription = datastore.subscribe_module_change(&config.module, Box::new(engine))?;

        tracing::info!(
            module = %config.module,
            leaves = projected.total(),
            degraded = collected.is_degraded(),
            "Agent initialized"
        );

        Ok(Self {
            module: config.module.clone(),
            subscription: Some(subscription),
            collected,
            projected,
        })
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn collect_report(&self) -> &CollectReport {
        &self.collected
    }

    pub fn projection_report(&self) -> &ProjectionReport {
        &self.projected
    }

    pub fn is_active(&self) -> bool {
        self.subscription.as_ref().is_some_and(Subscription::is_active)
    }

    /// Release the change subscription. Later calls do nothing.
    pub fn cleanup(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.unsubscribe();
            tracing::info!(module = %self.module, "Agent stopped");
        }
    }
}

impl Drop for Agent {
    fn drop(&mut self) {
        self.cleanup();
    }
}
