//! Analytics collaborator.
//!
//! The flow hands an analytics client to every pane. Delivery is owned by the
//! host application; this crate only defines the seam and a `tracing` sink.

use serde_json::{Map, Value};

use crate::auth_session::NextPane;

/// An analytics event raised by a pane.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsEvent {
    /// Event name, e.g. `"click.prepane.continue"`.
    pub name: String,
    /// Pane that raised the event.
    pub pane: Option<NextPane>,
    /// Extra event parameters.
    pub parameters: Map<String, Value>,
}

impl AnalyticsEvent {
    /// Create an event raised by `pane`.
    #[must_use]
    pub fn new(name: impl Into<String>, pane: Option<NextPane>) -> Self {
        Self {
            name: name.into(),
            pane,
            parameters: Map::new(),
        }
    }

    /// Attach a parameter.
    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }
}

/// Sink for analytics events.
pub trait AnalyticsClient: Send + Sync {
    /// Log an event. Must not block.
    fn log(&self, event: AnalyticsEvent);
}

/// Analytics client that writes events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnalyticsClient;

impl AnalyticsClient for TracingAnalyticsClient {
    fn log(&self, event: AnalyticsEvent) {
        let parameters = Value::Object(event.parameters);
        tracing::info!(
            event = %event.name,
            pane = ?event.pane,
            parameters = %parameters,
            "Financial Connections analytics event"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_builder() {
        let event = AnalyticsEvent::new("click.prepane.continue", Some(NextPane::PartnerAuth))
            .with_parameter("institution_id", "fcinst_1")
            .with_parameter("retry", 2);

        assert_eq!(event.parameters["institution_id"], "fcinst_1");
        assert_eq!(event.parameters["retry"], 2);
        TracingAnalyticsClient.log(event);
    }
}
