//! Headless mode execution
//!
//! One-shot commands that fetch from the data API and print to stdout instead
//! of drawing the dashboard.

use super::SessionData;
use crate::cards::summary::{format_number, format_percentage_change};
use crate::cards::{CardList, SnapshotOutcome};
use crate::model::{Metric, SegmentGroup};
use crate::print_cmd_info;
use std::error::Error;

/// Print events queued by the gateway so far.
fn drain_events(session: &mut SessionData) {
    while let Ok(event) = session.event_receiver.try_recv() {
        if event.should_display() {
            println!("{}", event);
        }
    }
}

async fn load_catalogs(session: &mut SessionData) -> (Vec<Metric>, Vec<SegmentGroup>) {
    let gateway = session.gateway.clone();
    let catalogs = futures::join!(
        gateway.fetch_metric_catalog(),
        gateway.fetch_segment_catalog()
    );
    drain_events(session);
    catalogs
}

/// Fetch both catalogs in parallel and list them.
pub async fn run_catalog_command(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    let (metrics, groups) = load_catalogs(&mut session).await;

    print_cmd_info!("Metrics", "{} available", metrics.len());
    for metric in &metrics {
        let kind = if metric.is_percentage_metric {
            " (percentage)"
        } else {
            ""
        };
        println!("  {:<24} {}{}", metric.id, metric.display_name, kind);
    }

    print_cmd_info!("Segments", "{} groups available", groups.len());
    for group in &groups {
        println!("  {} [{}]", group.display_name, group.segment_key);
        for segment in &group.values {
            println!("    {:<22} {}", segment.segment_id, segment.display_name);
        }
    }
    Ok(())
}

/// Resolve one card's selection against the catalogs, fetch its series and
/// print the figures the card would show.
pub async fn run_snapshot_command(
    mut session: SessionData,
    metric_id: &str,
    segment_key: &str,
    segment_id: &str,
) -> Result<(), Box<dyn Error>> {
    let (metrics, groups) = load_catalogs(&mut session).await;

    let metric = metrics.into_iter().find(|m| m.id == metric_id);
    let group = groups.into_iter().find(|g| g.segment_key == segment_key);
    let segment = group
        .as_ref()
        .and_then(|g| g.find_segment(segment_id))
        .cloned();

    let mut cards = CardList::new();
    let ticket = cards
        .commit(0, metric, group, segment)
        .map_err(|e| e.to_string())?;

    let points = session.gateway.fetch_snapshot(ticket.clone()).await;
    drain_events(&mut session);
    let points = points.ok_or("Snapshot fetch failed")?;
    let count = points.len();

    if cards.apply_snapshot(ticket.card, ticket.generation, points) != SnapshotOutcome::Applied {
        return Err(Box::from("Snapshot could not be applied"));
    }
    let card = cards.get(0).ok_or("Card missing after commit")?;
    let title = match (&card.metric, &card.segment) {
        (Some(metric), Some(segment)) => format!("{}, {}", metric.display_name, segment.display_name),
        _ => String::new(),
    };

    print_cmd_info!(&title, "{} points", count);
    println!("  Total  {}", format_number(card.summary.total_value));
    println!(
        "  Change {}",
        format_percentage_change(card.summary.percentage_change)
    );
    Ok(())
}
