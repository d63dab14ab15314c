use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::BuilderEvent;

/// Fan-out of builder events to in-process listeners (loggers, live
/// previews). Lagging receivers drop the oldest events.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: Arc<broadcast::Sender<BuilderEvent>>,
}

impl EventBus {
    /// Create a new event bus holding up to `capacity` undelivered events
    /// (at least one).
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Publish an event and return how many subscribers received it.
    /// With nobody listening the event is dropped and 0 is returned.
    pub fn publish(&self, event: BuilderEvent) -> usize {
        match self.sender.send(event) {
            Ok(reached) => reached,
            Err(broadcast::error::SendError(event)) => {
                tracing::trace!(?event, "builder event dropped, no subscribers");
                0
            }
        }
    }

    /// Subscribe to the event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<BuilderEvent> {
        self.sender.subscribe()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::types::HistoryEvent;

    fn undone(cursor: usize) -> BuilderEvent {
        BuilderEvent::Undone(HistoryEvent {
            slug: "home".into(),
            cursor,
            timestamp: chrono::Utc::now(),
        })
    }

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        assert_eq!(bus.publish(undone(3)), 1);

        match rx.recv().await.unwrap() {
            BuilderEvent::Undone(e) => assert_eq!(e.cursor, 3),
            other => panic!("expected undone, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        assert_eq!(bus.subscriber_count(), 2);

        assert_eq!(bus.publish(undone(0)), 2);

        assert!(matches!(rx1.recv().await.unwrap(), BuilderEvent::Undone(_)));
        assert!(matches!(rx2.recv().await.unwrap(), BuilderEvent::Undone(_)));
    }

    #[test]
    fn publishing_without_subscribers_reaches_nobody() {
        let bus = EventBus::new(4);
        assert_eq!(bus.publish(undone(1)), 0);
    }

    #[tokio::test]
    async fn zero_capacity_still_delivers() {
        let bus = EventBus::new(0);
        let mut rx = bus.subscribe();
        assert_eq!(bus.publish(undone(4)), 1);
        assert!(matches!(rx.recv().await.unwrap(), BuilderEvent::Undone(_)));
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let json = serde_json::to_value(undone(2)).unwrap();
        assert_eq!(json["type"], "undone");
        assert_eq!(json["cursor"], 2);
    }
}
