use serde_json::Value;
use uuid::Uuid;

use crate::error::AnalyticsError;

/// Fire-and-forget destination for product analytics events
#[cfg_attr(test, mockall::automock)]
pub trait AnalyticsSink: Send + Sync {
    fn track_event(&self, name: &str, properties: &Value) -> Result<(), AnalyticsError>;
}

/// Sink that writes every event to the tracing pipeline
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnalytics;

impl AnalyticsSink for TracingAnalytics {
    fn track_event(&self, name: &str, properties: &Value) -> Result<(), AnalyticsError> {
        let event_id = Uuid::new_v4();
        tracing::info!(
            event_id = %event_id,
            event = %name,
            properties = %properties,
            "Analytics event"
        );
        Ok(())
    }
}

/// Sends an event and discards any failure
pub fn emit(sink: &dyn AnalyticsSink, name: &str, properties: &Value) {
    if let Err(e) = sink.track_event(name, properties) {
        tracing::debug!(error = %e, event = %name, "Analytics event dropped");
    }
}
