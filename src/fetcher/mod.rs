mod client;
mod error;
mod types;


pub use client::{ApiClient, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use error::FetchError;
pub use types::{ApiResult, ClusterResult, ClusteredPoint};

use crate::dataset::DatasetResult;
use async_trait::async_trait;

/// Source of clustering results
#[async_trait]
pub trait ResultFetcher: Send + Sync {
    /// Request aggregated cluster assignments for `k` clusters
    async fn aggregate(&self, k: u32) -> Result<Vec<DatasetResult>, FetchError>;

    /// Ask the server to regenerate its source data
    ///
    /// Carries no data back; callers re-pull with [`ResultFetcher::aggregate`].
    async fn generate(&self) -> Result<(), FetchError>;
}
