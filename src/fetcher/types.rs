// the aggregation API contract
use serde::{Deserialize, Serialize};

/// One element of the `/aggregate` response array
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResult {
    #[serde(default)]
    pub source: String,
    /// Server-side compute time in milliseconds
    #[serde(default)]
    pub delay: u64,
    pub result: ClusterResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterResult {
    #[serde(default)]
    pub k: u32,
    #[serde(default)]
    pub iterations: u32,
    pub points: Vec<ClusteredPoint>,
}

/// Coordinates may be absent or null; the point still travels through grouping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusteredPoint {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    pub cluster: u32,
}
