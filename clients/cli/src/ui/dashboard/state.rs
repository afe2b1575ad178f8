//! Dashboard state management
//!
//! Owns the catalogs, the card list and the activity log. Card list mutation
//! goes through the `CardList` operations only; snapshot fetches owed to
//! committed cards are queued here and spawned by the UI loop.

use crate::cards::{Card, CardList, SnapshotTicket};
use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::environment::Environment;
use crate::events::Event;
use crate::model::{Metric, SegmentGroup};
use crate::ui::app::UIConfig;

use std::collections::VecDeque;
use std::time::Instant;

#[derive(Debug)]
pub struct DashboardState {
    /// The API deployment the catalogs come from.
    pub environment: Environment,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    /// Metric catalog; empty until loaded or after a failed load.
    pub metrics: Vec<Metric>,
    /// Segment catalog; empty until loaded or after a failed load.
    pub segment_groups: Vec<SegmentGroup>,
    /// The dashboard's cards, in display order.
    pub cards: CardList,
    /// Shown alone while `cards` is empty. Always in edit mode, never cancellable.
    pub initial_card: Card,
    /// Position of the card receiving keyboard input.
    pub focus: usize,
    /// Position of the card under the mouse pointer.
    pub hover: Option<usize>,
    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<Event>,
    /// Activity logs for display
    pub activity_logs: VecDeque<Event>,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Animation tick counter
    pub tick: usize,

    /// Snapshot fetches not yet handed to the runtime
    pending_snapshots: VecDeque<SnapshotTicket>,
}

impl DashboardState {
    pub fn new(environment: Environment, start_time: Instant, ui_config: UIConfig) -> Self {
        let mut cards = CardList::new();
        let initial_card = cards.detached_card();
        Self {
            environment,
            start_time,
            metrics: Vec::new(),
            segment_groups: Vec::new(),
            cards,
            initial_card,
            focus: 0,
            hover: None,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            with_background_color: ui_config.with_background_color,
            tick: 0,
            pending_snapshots: VecDeque::new(),
        }
    }

    /// Both catalogs are non-empty. Until then every card shows a loading placeholder.
    pub fn catalogs_loaded(&self) -> bool {
        !self.metrics.is_empty() && !self.segment_groups.is_empty()
    }

    /// Number of cells the grid shows: the list, or the lone initial card.
    pub fn visible_card_count(&self) -> usize {
        self.cards.len().max(1)
    }

    /// Card rendered at `position`, standing in the initial card for an empty list.
    pub fn card_at(&self, position: usize) -> Option<&Card> {
        if self.cards.is_empty() {
            (position == 0).then_some(&self.initial_card)
        } else {
            self.cards.get(position)
        }
    }

    pub fn card_at_mut(&mut self, position: usize) -> Option<&mut Card> {
        if self.cards.is_empty() {
            (position == 0).then_some(&mut self.initial_card)
        } else {
            self.cards.get_mut(position)
        }
    }

    pub fn is_initial_card(&self, position: usize) -> bool {
        self.cards.is_empty() && position == 0
    }

    pub fn focused_card(&self) -> Option<&Card> {
        self.card_at(self.focus)
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: Event) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: Event) {
        self.pending_events.push_back(event);
    }

    pub(super) fn queue_snapshot(&mut self, ticket: SnapshotTicket) {
        self.pending_snapshots.push_back(ticket);
    }

    /// Hand over the snapshot fetches queued since the last call.
    pub fn take_snapshot_requests(&mut self) -> Vec<SnapshotTicket> {
        self.pending_snapshots.drain(..).collect()
    }
}
