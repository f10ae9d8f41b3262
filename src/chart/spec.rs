use serde::Serialize;

use super::Palette;
use crate::dataset::{ClusterLabel, DatasetResult, Point};
use crate::grouper::{ClusterGroup, group_points};

/// Foreground color for every text element of a chart
pub const TEXT_COLOR: &str = "#cdd6f4";

/// Marker radius for scatter points
pub const POINT_RADIUS: f64 = 3.0;

/// Title and text color of one axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisSpec {
    pub title: String,
    pub color: String,
}

/// Presentation settings shared by all charts of a render pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    pub show_legend: bool,
    pub show_title: bool,
    /// Applied to legend labels and the chart title
    pub text_color: String,
}

impl ChartOptions {
    fn with_text_color(color: &str) -> Self {
        let axis = |title: &str| AxisSpec {
            title: title.to_string(),
            color: color.to_string(),
        };
        Self {
            x_axis: axis("X"),
            y_axis: axis("Y"),
            show_legend: true,
            show_title: true,
            text_color: color.to_string(),
        }
    }
}

/// One cluster's points with their label and color
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub cluster: ClusterLabel,
    pub label: String,
    pub color: String,
    pub point_radius: f64,
    pub points: Vec<Point>,
}

/// Renderer-agnostic description of one scatter chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub series: Vec<Series>,
    pub options: ChartOptions,
}

impl ChartSpec {
    /// Group a dataset's points and build its chart with default styling
    pub fn from_dataset(dataset: &DatasetResult) -> Self {
        ChartBuilder::default().build_dataset(dataset)
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

/// Builds chart specs from cluster groups
#[derive(Debug, Clone)]
pub struct ChartBuilder {
    palette: Palette,
    text_color: String,
    point_radius: f64,
}

impl ChartBuilder {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            text_color: TEXT_COLOR.to_string(),
            point_radius: POINT_RADIUS,
        }
    }

    pub fn text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = color.into();
        self
    }

    pub fn point_radius(mut self, radius: f64) -> Self {
        self.point_radius = radius;
        self
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Build the chart for the dataset at `index` (0-based)
    pub fn build(&self, group: &ClusterGroup, index: usize) -> ChartSpec {
        let series = group
            .iter()
            .map(|(label, points)| Series {
                cluster: label,
                label: series_label(label),
                color: self.palette.color_for(label).to_string(),
                point_radius: self.point_radius,
                points: points.to_vec(),
            })
            .collect();

        ChartSpec {
            title: chart_title(index),
            series,
            options: ChartOptions::with_text_color(&self.text_color),
        }
    }

    pub fn build_dataset(&self, dataset: &DatasetResult) -> ChartSpec {
        self.build(&group_points(&dataset.points), dataset.index)
    }
}

impl Default for ChartBuilder {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}

/// Build a chart spec with the default palette and styling
pub fn build_chart_spec(group: &ClusterGroup, index: usize) -> ChartSpec {
    ChartBuilder::default().build(group, index)
}

/// Display label of a cluster; labels are shown 1-based
pub fn series_label(label: ClusterLabel) -> String {
    format!("Cluster {}", u64::from(label) + 1)
}

pub fn chart_title(index: usize) -> String {
    format!("Dataset {}", index + 1)
}
