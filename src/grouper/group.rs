use std::collections::BTreeMap;

use crate::dataset::{ClusterLabel, Point};

/// Points of one dataset partitioned by cluster label
///
/// Iteration is ascending by label, so repeated builds over the same input
/// always visit clusters in the same order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterGroup {
    clusters: BTreeMap<ClusterLabel, Vec<Point>>,
}

impl ClusterGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point to its cluster, keeping arrival order within the cluster
    pub fn push(&mut self, point: Point) {
        self.clusters.entry(point.cluster).or_default().push(point);
    }

    pub fn get(&self, label: ClusterLabel) -> Option<&[Point]> {
        self.clusters.get(&label).map(Vec::as_slice)
    }

    /// Distinct labels present
    pub fn labels(&self) -> impl Iterator<Item = ClusterLabel> + '_ {
        self.clusters.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClusterLabel, &[Point])> {
        self.clusters.iter().map(|(label, points)| (*label, points.as_slice()))
    }

    /// Number of distinct clusters
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Total points across all clusters
    pub fn point_count(&self) -> usize {
        self.clusters.values().map(Vec::len).sum()
    }
}

impl FromIterator<Point> for ClusterGroup {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        let mut group = ClusterGroup::new();
        for point in iter {
            group.push(point);
        }
        group
    }
}

/// Stable partition of `points` by cluster label
pub fn group_points(points: &[Point]) -> ClusterGroup {
    points.iter().copied().collect()
}
