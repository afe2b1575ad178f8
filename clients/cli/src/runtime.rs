//! Background fetch tasks
//!
//! Catalog loads start once per session; snapshot fetches start whenever a card
//! is committed. Every task stops early on the shutdown broadcast.

use crate::cards::SnapshotTicket;
use crate::network::Gateway;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Start the metric and segment catalog loads as two independent tasks.
pub fn start_catalog_loaders(
    gateway: &Gateway,
    shutdown: &broadcast::Sender<()>,
) -> Vec<JoinHandle<()>> {
    let metrics = {
        let gateway = gateway.clone();
        let mut shutdown = shutdown.subscribe();
        tokio::spawn(async move {
            tokio::select! {
                _ = shutdown.recv() => {}
                _ = gateway.fetch_metric_catalog() => {}
            }
        })
    };
    let segments = {
        let gateway = gateway.clone();
        let mut shutdown = shutdown.subscribe();
        tokio::spawn(async move {
            tokio::select! {
                _ = shutdown.recv() => {}
                _ = gateway.fetch_segment_catalog() => {}
            }
        })
    };
    vec![metrics, segments]
}

/// Fetch the series a committed card owes. The result arrives as an event.
pub fn spawn_snapshot_fetch(
    gateway: Gateway,
    ticket: SnapshotTicket,
    mut shutdown: broadcast::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            _ = shutdown.recv() => {}
            _ = gateway.fetch_snapshot(ticket) => {}
        }
    })
}
