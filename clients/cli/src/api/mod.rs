use crate::environment::Environment;
use crate::model::{Metric, SegmentGroup, SnapshotPoint, SnapshotRequest};

pub(crate) mod client;
pub use client::ApiClient;
pub mod error;

use error::ApiError;

#[cfg(test)]
use mockall::automock;

/// Read-only source of catalogs and snapshot series.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    fn environment(&self) -> &Environment;

    /// `GET /api/metrics`
    async fn metric_catalog(&self) -> Result<Vec<Metric>, ApiError>;

    /// `GET /api/segments`
    async fn segment_catalog(&self) -> Result<Vec<SegmentGroup>, ApiError>;

    /// `POST /api/snapshot`
    async fn snapshot(&self, request: &SnapshotRequest) -> Result<Vec<SnapshotPoint>, ApiError>;
}
