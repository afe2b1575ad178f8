//! Catalog and snapshot data types shared by the API client and the dashboard.

use serde::{Deserialize, Serialize};

/// A named quantity the dashboard can chart (e.g. revenue).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub id: String,
    pub display_name: String,
    pub is_percentage_metric: bool,
}

/// One value of a segment dimension (e.g. "US").
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub segment_id: String,
    pub display_name: String,
}

/// A segment dimension and its ordered values (e.g. "Region").
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SegmentGroup {
    pub segment_key: String,
    pub display_name: String,
    pub values: Vec<Segment>,
}

impl SegmentGroup {
    pub fn find_segment(&self, segment_id: &str) -> Option<&Segment> {
        self.values.iter().find(|s| s.segment_id == segment_id)
    }
}

/// Resolve a segment id to its owning group and the segment itself.
///
/// Segment ids are assumed unique across every group; if they are not, the
/// first group containing the id wins.
pub fn resolve_segment<'a>(
    groups: &'a [SegmentGroup],
    segment_id: &str,
) -> Option<(&'a SegmentGroup, &'a Segment)> {
    groups
        .iter()
        .find_map(|group| group.find_segment(segment_id).map(|s| (group, s)))
}

/// A single dated value of a snapshot series.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SnapshotPoint {
    pub date: String,
    pub value: f64,
}

/// Body of `POST /api/snapshot`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRequest {
    pub metric: String,
    pub segment_key: String,
    pub segment_id: String,
}

impl SnapshotRequest {
    pub fn new(metric: &Metric, segment_group: &SegmentGroup, segment: &Segment) -> Self {
        Self {
            metric: metric.id.clone(),
            segment_key: segment_group.segment_key.clone(),
            segment_id: segment.segment_id.clone(),
        }
    }
}

/// `{ "data": ... }` wrapper used by every endpoint.
#[derive(Deserialize, Debug)]
pub struct Envelope<T> {
    pub data: T,
}

#[derive(Deserialize, Debug)]
pub struct SnapshotSeries {
    pub values: Vec<SnapshotPoint>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn metric(id: &str, name: &str) -> Metric {
        Metric {
            id: id.to_string(),
            display_name: name.to_string(),
            is_percentage_metric: false,
        }
    }

    pub fn group(key: &str, name: &str, segments: &[(&str, &str)]) -> SegmentGroup {
        SegmentGroup {
            segment_key: key.to_string(),
            display_name: name.to_string(),
            values: segments
                .iter()
                .map(|(id, name)| Segment {
                    segment_id: id.to_string(),
                    display_name: name.to_string(),
                })
                .collect(),
        }
    }

    pub fn metrics() -> Vec<Metric> {
        vec![metric("revenue", "Revenue"), metric("orders", "Orders")]
    }

    pub fn groups() -> Vec<SegmentGroup> {
        vec![
            group("region", "Region", &[("us", "US"), ("eu", "EU")]),
            group("platform", "Platform", &[("ios", "iOS"), ("web", "Web")]),
        ]
    }

    pub fn points(values: &[f64]) -> Vec<SnapshotPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| SnapshotPoint {
                date: format!("2024-01-{:02}", i + 1),
                value: *v,
            })
            .collect()
    }
}
