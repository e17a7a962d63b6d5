//! In-process change propagation bus backed by a `tokio::sync::broadcast`
//! channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>`: the lifecycle controller
//! publishes, every open WebSocket subscription receives. Delivery is
//! at-most-once; a subscriber that lags past the buffer must trigger a full
//! re-query on its view (see the `resync` frame in [`super::ws`]).

use tokio::sync::broadcast;

use crate::features::events::model::ReportEvent;
use crate::shared::constants::EVENT_CHANNEL_CAPACITY;

pub struct EventBus {
    sender: broadcast::Sender<ReportEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped;
    /// views joining later recover state through their initial query.
    pub fn publish(&self, event: ReportEvent) {
        // Ignore the SendError — it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<ReportEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(EVENT_CHANNEL_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::events::model::{ReportEventKind, SubscriptionScope};
    use crate::features::reports::models::{Report, ReportStatus, ReportType};
    use chrono::Utc;
    use fake::faker::lorem::en::Sentence;
    use fake::Fake;
    use uuid::Uuid;

    fn sample_report(reporter_id: Uuid) -> Report {
        Report {
            id: Uuid::new_v4(),
            title: Sentence(1..4).fake(),
            description: Sentence(3..8).fake(),
            report_type: ReportType::NonEmergency,
            status: ReportStatus::Pending,
            category_id: Uuid::new_v4(),
            subcategory_id: None,
            location_address: Some("5th and Main".to_string()),
            location_lat: None,
            location_lng: None,
            image_refs: vec![],
            assigned_officer_id: None,
            resolution_details: None,
            reporter_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let reporter = Uuid::new_v4();
        bus.publish(ReportEvent::new(
            ReportEventKind::Created,
            sample_report(reporter),
        ));

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.kind, ReportEventKind::Created);
        assert_eq!(received.reporter_id(), reporter);
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(ReportEvent::new(
            ReportEventKind::StatusChanged,
            sample_report(Uuid::new_v4()),
        ));

        let e1 = rx1.recv().await.expect("subscriber 1 should receive");
        let e2 = rx2.recv().await.expect("subscriber 2 should receive");

        assert_eq!(e1.report_id(), e2.report_id());
    }

    #[tokio::test]
    async fn events_arrive_in_publish_order() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let report = sample_report(Uuid::new_v4());
        bus.publish(ReportEvent::new(ReportEventKind::Created, report.clone()));
        bus.publish(ReportEvent::new(
            ReportEventKind::StatusChanged,
            report.clone(),
        ));
        bus.publish(ReportEvent::new(ReportEventKind::OfficerAssigned, report));

        assert_eq!(rx.recv().await.unwrap().kind, ReportEventKind::Created);
        assert_eq!(
            rx.recv().await.unwrap().kind,
            ReportEventKind::StatusChanged
        );
        assert_eq!(
            rx.recv().await.unwrap().kind,
            ReportEventKind::OfficerAssigned
        );
    }

    #[tokio::test]
    async fn lagging_subscriber_observes_lagged_error() {
        let bus = EventBus::new(2);
        let mut rx = bus.subscribe();

        for _ in 0..4 {
            bus.publish(ReportEvent::new(
                ReportEventKind::Created,
                sample_report(Uuid::new_v4()),
            ));
        }

        match rx.recv().await {
            Err(broadcast::error::RecvError::Lagged(skipped)) => assert!(skipped >= 1),
            other => panic!("expected Lagged, got {:?}", other.map(|e| e.kind)),
        }
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        bus.publish(ReportEvent::new(
            ReportEventKind::Created,
            sample_report(Uuid::new_v4()),
        ));
    }

    #[tokio::test]
    async fn scope_filter_composes_with_bus() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let me = Uuid::new_v4();
        let scope = SubscriptionScope::Reporter(me);

        bus.publish(ReportEvent::new(
            ReportEventKind::Created,
            sample_report(Uuid::new_v4()),
        ));
        bus.publish(ReportEvent::new(
            ReportEventKind::Created,
            sample_report(me),
        ));

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert!(!scope.matches(&first));
        assert!(scope.matches(&second));
    }
}
