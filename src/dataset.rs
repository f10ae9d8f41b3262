use serde::Serialize;

use crate::fetcher::{ApiResult, ClusteredPoint};

/// Cluster label as sent by the aggregation API
pub type ClusterLabel = u32;

/// A single clustered observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub cluster: ClusterLabel,
}

impl Point {
    pub fn new(x: f64, y: f64, cluster: ClusterLabel) -> Self {
        Self { x, y, cluster }
    }

    /// True when a coordinate was missing on the wire
    pub fn is_degenerate(&self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }
}

impl From<ClusteredPoint> for Point {
    fn from(p: ClusteredPoint) -> Self {
        Self {
            x: p.x.unwrap_or(f64::NAN),
            y: p.y.unwrap_or(f64::NAN),
            cluster: p.cluster,
        }
    }
}

/// Metadata about the clustering run that produced a dataset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunInfo {
    /// Algorithm description, e.g. "KMeans Clustering"
    pub source: String,
    /// Server-side compute time in milliseconds
    pub delay_ms: u64,
    pub k: u32,
    pub iterations: u32,
}

/// One clustering run's output
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetResult {
    /// Position in the response (0-based)
    pub index: usize,
    /// Points in the order they were received
    pub points: Vec<Point>,
    pub run: RunInfo,
}

impl DatasetResult {
    pub fn new(index: usize, points: Vec<Point>) -> Self {
        Self {
            index,
            points,
            run: RunInfo::default(),
        }
    }

    pub fn with_run(mut self, run: RunInfo) -> Self {
        self.run = run;
        self
    }
}

/// Convert an aggregation response into datasets, preserving response order
pub fn datasets_from_response(results: Vec<ApiResult>) -> Vec<DatasetResult> {
    results
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let run = RunInfo {
                source: item.source,
                delay_ms: item.delay,
                k: item.result.k,
                iterations: item.result.iterations,
            };
            let points = item.result.points.into_iter().map(Point::from).collect();
            DatasetResult::new(index, points).with_run(run)
        })
        .collect()
}
