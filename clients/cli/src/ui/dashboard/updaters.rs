//! Dashboard state update logic
//!
//! Event processing and the user-facing card operations.

use super::layout::grid_columns;
use super::state::DashboardState;

use crate::cards::{CardListError, EditField, SnapshotOutcome};
use crate::events::{Event, EventType, Payload};
use crate::logging::LogLevel;

impl DashboardState {
    /// Process queued events and advance the animation tick.
    pub fn update(&mut self) {
        self.tick += 1;

        while let Some(mut event) = self.pending_events.pop_front() {
            if let Some(payload) = event.payload.take() {
                self.process_payload(payload);
            }
            self.add_to_activity_log(event);
        }
    }

    fn process_payload(&mut self, payload: Payload) {
        match payload {
            Payload::Metrics(metrics) => {
                self.metrics = metrics;
                self.seed_defaults();
            }
            Payload::SegmentGroups(groups) => {
                self.segment_groups = groups;
                self.seed_defaults();
            }
            Payload::Snapshot {
                card,
                generation,
                points,
            } => match self.cards.apply_snapshot(card, generation, points) {
                SnapshotOutcome::Applied => {}
                SnapshotOutcome::Stale => self.log(
                    "Dropped snapshot for a superseded selection",
                    EventType::Refresh,
                    LogLevel::Debug,
                ),
                SnapshotOutcome::Missing => self.log(
                    "Dropped snapshot for a removed card",
                    EventType::Refresh,
                    LogLevel::Debug,
                ),
            },
        }
    }

    /// Pre-select the first metric and the first group's first segment on
    /// every card whose pickers are still unset.
    fn seed_defaults(&mut self) {
        let (metrics, groups) = (&self.metrics, &self.segment_groups);
        self.initial_card.draft.seed_defaults(metrics, groups);
        for card in self.cards.iter_mut() {
            card.draft.seed_defaults(metrics, groups);
        }
    }

    fn log(&mut self, msg: impl Into<String>, event_type: EventType, log_level: LogLevel) {
        let event = Event::dashboard_with_level(msg.into(), event_type, log_level);
        self.add_to_activity_log(event);
    }

    fn log_card_error(&mut self, error: CardListError) {
        self.log(error.to_string(), EventType::Error, LogLevel::Error);
    }

    /// Insert a blank edit-mode card at `position` and focus it.
    pub fn insert_card(&mut self, position: usize) {
        match self.cards.insert(position) {
            Ok(_) => {
                if let Some(card) = self.cards.get_mut(position) {
                    card.draft.seed_defaults(&self.metrics, &self.segment_groups);
                }
                self.focus = position;
                self.log(
                    format!("Inserted card at position {}", position),
                    EventType::Refresh,
                    LogLevel::Debug,
                );
            }
            Err(e) => self.log_card_error(e),
        }
    }

    /// Commit the edit form of the card at `position`. An incomplete selection
    /// is logged and the card stays in edit mode.
    pub fn save_card(&mut self, position: usize) {
        let Some(card) = self.card_at(position) else {
            return;
        };
        if !card.edit_mode {
            return;
        }
        let draft = card.draft.clone();
        let was_initial = self.is_initial_card(position);
        match self
            .cards
            .commit(position, draft.metric, draft.segment_group, draft.segment)
        {
            Ok(ticket) => {
                if was_initial {
                    self.initial_card = self.cards.detached_card();
                    self.initial_card
                        .draft
                        .seed_defaults(&self.metrics, &self.segment_groups);
                }
                self.log(
                    format!(
                        "Requesting snapshot {} / {}={}",
                        ticket.request.metric,
                        ticket.request.segment_key,
                        ticket.request.segment_id
                    ),
                    EventType::Waiting,
                    LogLevel::Debug,
                );
                self.queue_snapshot(ticket);
            }
            Err(e) => self.log_card_error(e),
        }
    }

    /// Remove the card at `position`. The initial card has no cancel affordance.
    pub fn cancel_card(&mut self, position: usize) {
        if self.is_initial_card(position) {
            return;
        }
        match self.cards.remove(position) {
            Ok(_) => self.focus = self.focus.min(self.visible_card_count() - 1),
            Err(e) => self.log_card_error(e),
        }
    }

    /// Re-open a view-mode card for editing.
    pub fn edit_card(&mut self, position: usize) {
        let in_view_mode = self.cards.get(position).is_some_and(|c| !c.edit_mode);
        if !in_view_mode {
            return;
        }
        if let Err(e) = self.cards.reopen(position) {
            self.log_card_error(e);
        }
        self.focus = position;
    }

    /// Move keyboard focus by `delta` cards, clamped.
    pub fn move_focus(&mut self, delta: isize) {
        let last = self.visible_card_count() - 1;
        self.focus = self.focus.saturating_add_signed(delta).min(last);
    }

    /// Move keyboard focus one grid row up or down.
    pub fn move_focus_row(&mut self, rows: isize) {
        let columns = grid_columns(self.cards.len()) as isize;
        let target = self.focus as isize + rows * columns;
        if (0..self.visible_card_count() as isize).contains(&target) {
            self.focus = target as usize;
        }
    }

    /// Switch the focused edit form between its metric and segment pickers.
    pub fn toggle_picker(&mut self) {
        if let Some(card) = self.card_at_mut(self.focus) {
            if card.edit_mode {
                card.field = card.field.toggle();
            }
        }
    }

    /// Move the active picker of the focused edit form by `delta` options.
    pub fn step_picker(&mut self, delta: isize) {
        let card = if self.cards.is_empty() {
            (self.focus == 0).then_some(&mut self.initial_card)
        } else {
            self.cards.get_mut(self.focus)
        };
        let Some(card) = card.filter(|c| c.edit_mode) else {
            return;
        };
        match card.field {
            EditField::Metric => card.draft.step_metric(&self.metrics, delta),
            EditField::Segment => card.draft.step_segment(&self.segment_groups, delta),
        }
    }
}
