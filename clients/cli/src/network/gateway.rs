//! Fail-soft access to the remote data API.
//!
//! Every call reports its outcome as an activity event and never surfaces an
//! error to the caller: catalog failures degrade to an empty catalog, snapshot
//! failures to "nothing changed". No retries, no backoff, no caching.

use super::error_handler::{classify_error, clean_error_message};
use crate::api::DataSource;
use crate::cards::SnapshotTicket;
use crate::events::{Event, EventSender, EventType, Payload};
use crate::logging::LogLevel;
use crate::model::{Metric, SegmentGroup, SnapshotPoint};
use std::sync::Arc;

#[derive(Clone)]
pub struct Gateway {
    source: Arc<dyn DataSource>,
    event_sender: EventSender,
}

impl Gateway {
    pub fn new(source: Arc<dyn DataSource>, event_sender: EventSender) -> Self {
        Self {
            source,
            event_sender,
        }
    }

    /// Base URL of the API behind this gateway.
    pub fn api_url(&self) -> String {
        self.source.environment().api_url()
    }

    /// Fetch the metric catalog, or an empty one on failure.
    pub async fn fetch_metric_catalog(&self) -> Vec<Metric> {
        let (metrics, event) = match self.source.metric_catalog().await {
            Ok(metrics) => {
                let event = Event::catalog_with_level(
                    format!("Loaded {} metrics", metrics.len()),
                    EventType::Success,
                    LogLevel::Info,
                );
                (metrics, event)
            }
            Err(e) => {
                let event = Event::catalog_with_level(
                    format!("Failed to fetch metrics: {}", clean_error_message(&e)),
                    EventType::Error,
                    classify_error(&e),
                );
                (Vec::new(), event)
            }
        };
        self.event_sender
            .send_event(event.with_payload(Payload::Metrics(metrics.clone())))
            .await;
        metrics
    }

    /// Fetch the segment catalog, or an empty one on failure.
    pub async fn fetch_segment_catalog(&self) -> Vec<SegmentGroup> {
        let (groups, event) = match self.source.segment_catalog().await {
            Ok(groups) => {
                let event = Event::catalog_with_level(
                    format!("Loaded {} segment groups", groups.len()),
                    EventType::Success,
                    LogLevel::Info,
                );
                (groups, event)
            }
            Err(e) => {
                let event = Event::catalog_with_level(
                    format!("Failed to fetch segment groups: {}", clean_error_message(&e)),
                    EventType::Error,
                    classify_error(&e),
                );
                (Vec::new(), event)
            }
        };
        self.event_sender
            .send_event(event.with_payload(Payload::SegmentGroups(groups.clone())))
            .await;
        groups
    }

    /// Fetch the series a ticket asks for. A failure is logged only; the card
    /// keeps whatever it showed before.
    pub async fn fetch_snapshot(&self, ticket: SnapshotTicket) -> Option<Vec<SnapshotPoint>> {
        let request = &ticket.request;
        let label = format!(
            "{} / {}={}",
            request.metric, request.segment_key, request.segment_id
        );
        match self.source.snapshot(request).await {
            Ok(points) => {
                let event = Event::snapshot_with_level(
                    format!("Fetched {} points for {}", points.len(), label),
                    EventType::Refresh,
                    LogLevel::Debug,
                )
                .with_payload(Payload::Snapshot {
                    card: ticket.card,
                    generation: ticket.generation,
                    points: points.clone(),
                });
                self.event_sender.send_event(event).await;
                Some(points)
            }
            Err(e) => {
                let event = Event::snapshot_with_level(
                    format!(
                        "Error fetching snapshot for {}: {}",
                        label,
                        clean_error_message(&e)
                    ),
                    EventType::Error,
                    classify_error(&e),
                );
                self.event_sender.send_event(event).await;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockDataSource;
    use crate::api::error::ApiError;
    use crate::cards::CardList;
    use crate::model::SnapshotRequest;
    use crate::model::fixtures::{groups, metrics, points};
    use tokio::sync::mpsc;

    fn gateway(mock: MockDataSource) -> (Gateway, mpsc::Receiver<Event>) {
        let (tx, rx) = mpsc::channel(10);
        (Gateway::new(Arc::new(mock), EventSender::new(tx)), rx)
    }

    fn server_error() -> ApiError {
        ApiError::Http {
            status: 500,
            message: "boom".to_string(),
        }
    }

    fn ticket() -> SnapshotTicket {
        let mut list = CardList::new();
        let groups = groups();
        list.commit(
            0,
            Some(metrics()[0].clone()),
            Some(groups[0].clone()),
            Some(groups[0].values[0].clone()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn metric_catalog_is_delivered_with_success_event() {
        let mut mock = MockDataSource::new();
        mock.expect_metric_catalog()
            .times(1)
            .returning(|| Ok(metrics()));
        let (gateway, mut rx) = gateway(mock);

        assert_eq!(gateway.fetch_metric_catalog().await, metrics());
        let event = rx.try_recv().unwrap();
        assert_eq!(event.event_type, EventType::Success);
        assert_eq!(event.payload, Some(Payload::Metrics(metrics())));
    }

    #[tokio::test]
    async fn catalog_failure_degrades_to_empty() {
        let mut mock = MockDataSource::new();
        mock.expect_segment_catalog()
            .times(1)
            .returning(|| Err(server_error()));
        let (gateway, mut rx) = gateway(mock);

        assert!(gateway.fetch_segment_catalog().await.is_empty());
        let event = rx.try_recv().unwrap();
        assert_eq!(event.event_type, EventType::Error);
        assert_eq!(event.log_level, LogLevel::Warn);
        assert!(event.msg.contains("HTTP 500"));
        assert_eq!(event.payload, Some(Payload::SegmentGroups(Vec::new())));
    }

    #[tokio::test]
    async fn rate_limited_catalog_failure_is_displayed() {
        let mut mock = MockDataSource::new();
        mock.expect_metric_catalog().times(1).returning(|| {
            Err(ApiError::Http {
                status: 429,
                message: "slow down".to_string(),
            })
        });
        let (gateway, mut rx) = gateway(mock);

        assert!(gateway.fetch_metric_catalog().await.is_empty());
        let event = rx.try_recv().unwrap();
        assert_eq!(event.event_type, EventType::Error);
        assert_eq!(event.log_level, LogLevel::Warn);
        assert!(event.msg.contains("HTTP 429"));
        assert!(event.should_display());
    }

    #[tokio::test]
    async fn snapshot_success_is_tagged_with_ticket() {
        let ticket = ticket();
        let expected = ticket.request.clone();
        let mut mock = MockDataSource::new();
        mock.expect_snapshot()
            .withf(move |r: &SnapshotRequest| *r == expected)
            .times(1)
            .returning(|_| Ok(points(&[1.0, 2.0])));
        let (gateway, mut rx) = gateway(mock);

        let fetched = gateway.fetch_snapshot(ticket.clone()).await;
        assert_eq!(fetched, Some(points(&[1.0, 2.0])));
        match rx.try_recv().unwrap().payload {
            Some(Payload::Snapshot {
                card, generation, ..
            }) => {
                assert_eq!(card, ticket.card);
                assert_eq!(generation, ticket.generation);
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[tokio::test]
    async fn snapshot_failure_is_logged_without_payload() {
        let mut mock = MockDataSource::new();
        mock.expect_snapshot()
            .times(1)
            .returning(|_| Err(server_error()));
        let (gateway, mut rx) = gateway(mock);

        assert_eq!(gateway.fetch_snapshot(ticket()).await, None);
        let event = rx.try_recv().unwrap();
        assert_eq!(event.event_type, EventType::Error);
        assert!(event.payload.is_none());
    }
}
