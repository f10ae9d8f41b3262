mod chartjs;
mod palette;
mod spec;


pub use palette::{DEFAULT_COLORS, Palette};
pub use spec::{
    AxisSpec, ChartBuilder, ChartOptions, ChartSpec, POINT_RADIUS, Series, TEXT_COLOR,
    build_chart_spec, chart_title, series_label,
};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChartError {
    #[error("palette must contain at least one color")]
    EmptyPalette,
}
