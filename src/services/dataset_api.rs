//! Trait for the remote tabular query service.

use crate::error::Result;
use crate::table::Table;

/// A remote service that answers filtered queries against a dataset.
///
/// Implementations must pass `filter` through unmodified and return the
/// complete result set; failures are returned as-is, without retrying.
#[async_trait::async_trait]
pub trait DatasetApi: Send + Sync {
    async fn query(&self, dataset_id: &str, filter: &str) -> Result<Table>;
}
