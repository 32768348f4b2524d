//! Event telemetry
//!
//! A catch-all handler that logs every delivery's kind and action. It is
//! infallible so it can never interfere with routing.

use async_trait::async_trait;
use tracing::info;

use crate::event::WebhookEvent;
use crate::router::Handler;
use crate::Result;

/// Logs `(kind, action)` for every event
#[derive(Debug, Clone, Copy, Default)]
pub struct TelemetryTap;

impl TelemetryTap {
    /// Create a telemetry tap
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Handler for TelemetryTap {
    async fn handle(&self, event: &WebhookEvent) -> Result<()> {
        info!(event = %event.kind, action = %event.action, "Received webhook event");
        Ok(())
    }
}
