//! Metric/segment picker state for a card in edit mode.

use crate::model::{Metric, Segment, SegmentGroup, resolve_segment};

/// The picker that receives Up/Down while a card is in edit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditField {
    #[default]
    Metric,
    Segment,
}

impl EditField {
    pub fn toggle(self) -> Self {
        match self {
            EditField::Metric => EditField::Segment,
            EditField::Segment => EditField::Metric,
        }
    }
}

/// A possibly partial metric + segment choice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub metric: Option<Metric>,
    pub segment_group: Option<SegmentGroup>,
    pub segment: Option<Segment>,
}

impl Selection {
    /// Names of the unset fields, in display order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.metric.is_none() {
            missing.push("metric");
        }
        if self.segment_group.is_none() {
            missing.push("segment group");
        }
        if self.segment.is_none() {
            missing.push("segment");
        }
        missing
    }

    /// Fill unset pickers from the catalogs: the first metric, and the first
    /// group's first segment. A first group with no values leaves the segment
    /// unset.
    pub fn seed_defaults(&mut self, metrics: &[Metric], groups: &[SegmentGroup]) {
        if self.metric.is_none() {
            self.metric = metrics.first().cloned();
        }
        if self.segment_group.is_none() {
            if let Some(first) = groups.first() {
                self.segment_group = Some(first.clone());
                self.segment = first.values.first().cloned();
            }
        }
    }

    /// Select a metric by id. An unknown id clears the metric.
    pub fn select_metric(&mut self, metrics: &[Metric], metric_id: &str) {
        self.metric = metrics.iter().find(|m| m.id == metric_id).cloned();
    }

    /// Select a segment by id, resolving its owning group by scanning the catalog.
    /// An unknown id clears both.
    pub fn select_segment(&mut self, groups: &[SegmentGroup], segment_id: &str) {
        match resolve_segment(groups, segment_id) {
            Some((group, segment)) => {
                self.segment_group = Some(group.clone());
                self.segment = Some(segment.clone());
            }
            None => {
                self.segment_group = None;
                self.segment = None;
            }
        }
    }

    /// Index of the selected metric in the catalog.
    pub fn metric_index(&self, metrics: &[Metric]) -> Option<usize> {
        let selected = self.metric.as_ref()?;
        metrics.iter().position(|m| m.id == selected.id)
    }

    /// Index of the selected segment among all options, groups flattened in order.
    pub fn segment_index(&self, groups: &[SegmentGroup]) -> Option<usize> {
        let selected = self.segment.as_ref()?;
        segment_options(groups).position(|s| s.segment_id == selected.segment_id)
    }

    /// Move the metric picker by `delta`, clamped to the catalog.
    pub fn step_metric(&mut self, metrics: &[Metric], delta: isize) {
        if metrics.is_empty() {
            return;
        }
        let next = step(self.metric_index(metrics), delta, metrics.len());
        let id = metrics[next].id.clone();
        self.select_metric(metrics, &id);
    }

    /// Move the segment picker by `delta` across all groups' options, clamped.
    pub fn step_segment(&mut self, groups: &[SegmentGroup], delta: isize) {
        let count = segment_options(groups).count();
        if count == 0 {
            return;
        }
        let next = step(self.segment_index(groups), delta, count);
        if let Some(segment) = segment_options(groups).nth(next) {
            let id = segment.segment_id.clone();
            self.select_segment(groups, &id);
        }
    }
}

/// Every segment of every group, in catalog order.
pub fn segment_options(groups: &[SegmentGroup]) -> impl Iterator<Item = &Segment> {
    groups.iter().flat_map(|g| g.values.iter())
}

fn step(current: Option<usize>, delta: isize, len: usize) -> usize {
    match current {
        Some(index) => index.saturating_add_signed(delta).min(len - 1),
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{group, groups, metrics};

    #[test]
    fn seed_defaults_picks_first_entries() {
        let mut selection = Selection::default();
        selection.seed_defaults(&metrics(), &groups());
        assert_eq!(selection.metric.as_ref().unwrap().id, "revenue");
        assert_eq!(selection.segment_group.as_ref().unwrap().segment_key, "region");
        assert_eq!(selection.segment.as_ref().unwrap().segment_id, "us");
        assert!(selection.missing_fields().is_empty());
    }

    #[test]
    fn seed_defaults_keeps_existing_choice() {
        let mut selection = Selection::default();
        selection.select_metric(&metrics(), "orders");
        selection.select_segment(&groups(), "web");
        selection.seed_defaults(&metrics(), &groups());
        assert_eq!(selection.metric.as_ref().unwrap().id, "orders");
        assert_eq!(selection.segment.as_ref().unwrap().segment_id, "web");
    }

    #[test]
    fn seed_defaults_with_empty_first_group_leaves_segment_unset() {
        let groups = vec![group("empty", "Empty", &[])];
        let mut selection = Selection::default();
        selection.seed_defaults(&metrics(), &groups);
        assert!(selection.segment_group.is_some());
        assert!(selection.segment.is_none());
        assert_eq!(selection.missing_fields(), vec!["segment"]);
    }

    #[test]
    fn segment_change_resolves_owning_group() {
        let mut selection = Selection::default();
        selection.select_segment(&groups(), "ios");
        assert_eq!(selection.segment_group.as_ref().unwrap().segment_key, "platform");

        selection.select_segment(&groups(), "nope");
        assert!(selection.segment_group.is_none());
        assert!(selection.segment.is_none());
    }

    #[test]
    fn stepping_crosses_group_boundaries_and_clamps() {
        let groups = groups();
        let mut selection = Selection::default();
        selection.seed_defaults(&metrics(), &groups);

        selection.step_segment(&groups, 2);
        assert_eq!(selection.segment.as_ref().unwrap().segment_id, "ios");
        assert_eq!(selection.segment_group.as_ref().unwrap().segment_key, "platform");

        selection.step_segment(&groups, 10);
        assert_eq!(selection.segment.as_ref().unwrap().segment_id, "web");

        selection.step_segment(&groups, -10);
        assert_eq!(selection.segment.as_ref().unwrap().segment_id, "us");

        selection.step_metric(&metrics(), 1);
        assert_eq!(selection.metric.as_ref().unwrap().id, "orders");
        selection.step_metric(&metrics(), 1);
        assert_eq!(selection.metric.as_ref().unwrap().id, "orders");
    }
}
