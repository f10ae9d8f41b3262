// Public API exports
pub mod chart;
pub mod config;
pub mod controller;
pub mod dataset;
pub mod fetcher;
pub mod grouper;
pub mod view;

// Re-export main types for convenience
pub use dataset::{ClusterLabel, DatasetResult, Point, RunInfo, datasets_from_response};

pub use fetcher::{ApiClient, FetchError, ResultFetcher};

pub use grouper::{ClusterGroup, group_points};

pub use chart::{ChartBuilder, ChartError, ChartSpec, Palette, Series, build_chart_spec};

pub use view::{AreaContent, ChartArea, HtmlArea, MemoryArea, RenderError};

pub use controller::{AreaState, Dispatch, Outcome, UiEvent, ViewController};

pub use config::Config;
