//! Dashboard cards and the ordered card list.
//!
//! Position in the list is the only identity a user sees. Each card also
//! carries a process-local [`CardId`] and a fetch generation so that snapshot
//! responses find their card after the list has been re-indexed, and so a
//! response for a superseded selection is dropped.

pub mod selection;
pub mod summary;

pub use selection::{EditField, Selection};
pub use summary::Summary;

use crate::model::{Metric, Segment, SegmentGroup, SnapshotPoint, SnapshotRequest};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardId(u64);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardListError {
    #[error("Card position {position} is out of range for {len} cards")]
    OutOfRange { position: usize, len: usize },

    #[error("Save failed: missing data ({})", .missing.join(", "))]
    IncompleteSelection { missing: Vec<&'static str> },
}

/// One dashboard tile.
#[derive(Debug, Clone)]
pub struct Card {
    id: CardId,
    pub metric: Option<Metric>,
    pub segment_group: Option<SegmentGroup>,
    pub segment: Option<Segment>,
    pub edit_mode: bool,

    /// Picker state shown by the edit form.
    pub draft: Selection,
    /// Picker receiving Up/Down in the edit form.
    pub field: EditField,
    /// Last applied snapshot series.
    pub series: Vec<SnapshotPoint>,
    pub summary: Summary,
    generation: u64,
}

impl Card {
    fn empty(id: CardId) -> Self {
        Self {
            id,
            metric: None,
            segment_group: None,
            segment: None,
            edit_mode: true,
            draft: Selection::default(),
            field: EditField::default(),
            series: Vec::new(),
            summary: Summary::default(),
            generation: 0,
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_complete(&self) -> bool {
        self.metric.is_some() && self.segment_group.is_some() && self.segment.is_some()
    }

    /// Replace the committed selection, leave edit mode, and start a new fetch
    /// generation.
    fn commit(&mut self, metric: Metric, segment_group: SegmentGroup, segment: Segment) -> SnapshotTicket {
        let request = SnapshotRequest::new(&metric, &segment_group, &segment);
        self.draft = Selection {
            metric: Some(metric.clone()),
            segment_group: Some(segment_group.clone()),
            segment: Some(segment.clone()),
        };
        self.metric = Some(metric);
        self.segment_group = Some(segment_group);
        self.segment = Some(segment);
        self.edit_mode = false;
        self.generation += 1;
        SnapshotTicket {
            card: self.id,
            generation: self.generation,
            request,
        }
    }
}

/// A snapshot fetch owed to a card that just entered view mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotTicket {
    pub card: CardId,
    pub generation: u64,
    pub request: SnapshotRequest,
}

/// What happened to a snapshot response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOutcome {
    Applied,
    /// The card has been committed again since the request was issued.
    Stale,
    /// The card has been removed.
    Missing,
}

/// Ordered cards of the dashboard. All mutation goes through `insert`,
/// `commit`, `remove` and `reopen`.
#[derive(Debug, Default)]
pub struct CardList {
    cards: Vec<Card>,
    next_id: u64,
}

impl CardList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Card> {
        self.cards.get(position)
    }

    pub fn get_mut(&mut self, position: usize) -> Option<&mut Card> {
        self.cards.get_mut(position)
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Card> {
        self.cards.iter_mut()
    }

    pub fn position_of(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id() == id)
    }

    /// A blank edit-mode card that is not (yet) part of the list.
    pub fn detached_card(&mut self) -> Card {
        let id = CardId(self.next_id);
        self.next_id += 1;
        Card::empty(id)
    }

    /// Insert a blank edit-mode card at `position`, shifting later cards right.
    /// `position == len` appends.
    pub fn insert(&mut self, position: usize) -> Result<CardId, CardListError> {
        if position > self.cards.len() {
            return Err(self.out_of_range(position));
        }
        let card = self.detached_card();
        let id = card.id;
        self.cards.insert(position, card);
        Ok(id)
    }

    /// Commit a complete selection to the card at `position` and switch it to
    /// view mode. Committing at `position == len` appends a new card, which is
    /// how the dashboard's initial card is saved.
    ///
    /// Any missing argument rejects the commit and leaves the card untouched.
    pub fn commit(
        &mut self,
        position: usize,
        metric: Option<Metric>,
        segment_group: Option<SegmentGroup>,
        segment: Option<Segment>,
    ) -> Result<SnapshotTicket, CardListError> {
        if position > self.cards.len() {
            return Err(self.out_of_range(position));
        }
        let (metric, segment_group, segment) = match (metric, segment_group, segment) {
            (Some(m), Some(g), Some(s)) => (m, g, s),
            (metric, segment_group, segment) => {
                let missing = Selection {
                    metric,
                    segment_group,
                    segment,
                }
                .missing_fields();
                return Err(CardListError::IncompleteSelection { missing });
            }
        };
        if position == self.cards.len() {
            let card = self.detached_card();
            self.cards.push(card);
        }
        Ok(self.cards[position].commit(metric, segment_group, segment))
    }

    /// Remove the card at `position`, shifting later cards left.
    pub fn remove(&mut self, position: usize) -> Result<Card, CardListError> {
        if position >= self.cards.len() {
            return Err(self.out_of_range(position));
        }
        Ok(self.cards.remove(position))
    }

    /// Put the card at `position` back into edit mode with its committed
    /// selection pre-loaded into the pickers.
    pub fn reopen(&mut self, position: usize) -> Result<(), CardListError> {
        let len = self.cards.len();
        let card = self
            .cards
            .get_mut(position)
            .ok_or(CardListError::OutOfRange { position, len })?;
        card.edit_mode = true;
        card.draft = Selection {
            metric: card.metric.clone(),
            segment_group: card.segment_group.clone(),
            segment: card.segment.clone(),
        };
        card.field = EditField::default();
        Ok(())
    }

    /// Apply a snapshot response if it still belongs to the card's current selection.
    pub fn apply_snapshot(
        &mut self,
        card: CardId,
        generation: u64,
        points: Vec<SnapshotPoint>,
    ) -> SnapshotOutcome {
        let Some(position) = self.position_of(card) else {
            return SnapshotOutcome::Missing;
        };
        let card = &mut self.cards[position];
        if card.generation() != generation {
            return SnapshotOutcome::Stale;
        }
        card.summary.apply(&points);
        card.series = points;
        SnapshotOutcome::Applied
    }

    fn out_of_range(&self, position: usize) -> CardListError {
        CardListError::OutOfRange {
            position,
            len: self.cards.len(),
        }
    }
}
