//! Event routing
//!
//! The router maps `(event kind, action)` pairs to handlers, plus any
//! number of catch-all handlers that observe every delivery. The table
//! is built once at startup and never mutated afterwards.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::event::WebhookEvent;
use crate::Result;

/// An event handler
#[async_trait]
pub trait Handler: Send + Sync {
    /// Handle one delivery
    async fn handle(&self, event: &WebhookEvent) -> Result<()>;
}

/// What dispatch did with an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A specific handler was registered for the pair and ran
    Handled,
    /// No specific handler; the event was acknowledged after catch-alls
    Unhandled,
}

/// Routes events to registered handlers
#[derive(Default)]
pub struct EventRouter {
    catch_all: Vec<Arc<dyn Handler>>,
    routes: HashMap<(String, String), Arc<dyn Handler>>,
}

impl EventRouter {
    /// Create an empty router
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for a `(kind, action)` pair
    ///
    /// At most one handler per pair; a second registration replaces the
    /// first.
    pub fn on(
        &mut self,
        kind: impl Into<String>,
        action: impl Into<String>,
        handler: Arc<dyn Handler>,
    ) {
        self.routes.insert((kind.into(), action.into()), handler);
    }

    /// Register a catch-all handler, invoked for every event
    ///
    /// Catch-alls run before the specific handler, in registration
    /// order.
    pub fn on_any(&mut self, handler: Arc<dyn Handler>) {
        self.catch_all.push(handler);
    }

    /// Dispatch one event: all catch-alls, then the specific handler
    ///
    /// A failing handler stops dispatch and the error propagates; an
    /// event with no specific handler is acknowledged as
    /// [`DispatchOutcome::Unhandled`].
    pub async fn dispatch(&self, event: &WebhookEvent) -> Result<DispatchOutcome> {
        for handler in &self.catch_all {
            handler.handle(event).await?;
        }

        let key = (event.kind.clone(), event.action.clone());
        match self.routes.get(&key) {
            Some(handler) => {
                handler.handle(event).await?;
                Ok(DispatchOutcome::Handled)
            }
            None => {
                debug!(event = %event.kind, action = %event.action, "No handler registered");
                Ok(DispatchOutcome::Unhandled)
            }
        }
    }
}

impl std::fmt::Debug for EventRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRouter")
            .field("catch_all", &self.catch_all.len())
            .field("routes", &self.routes.keys().collect::<Vec<_>>())
            .finish()
    }
}
