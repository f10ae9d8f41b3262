//! Chart areas: the container that chart surfaces are mounted into.
//!
//! An area holds either a single notice (loading or error text) or a list of
//! mounted charts, never both. Replacing the content always releases every
//! mounted chart first.

mod error;
mod html;
mod memory;


pub use error::RenderError;
pub use html::HtmlArea;
pub use memory::MemoryArea;

use crate::chart::ChartSpec;
use serde::Serialize;

/// Identifier of one mounted chart surface
pub type SurfaceId = u64;

/// A region that displays notices and hosts chart surfaces
pub trait ChartArea: Send {
    /// Replace the content with a loading placeholder
    fn show_loading(&mut self, message: &str);

    /// Replace the content with an error message
    fn show_error(&mut self, message: &str);

    /// Destroy every mounted chart and remove its surface
    fn clear(&mut self);

    /// Create a fresh surface and render `spec` on it
    fn mount(&mut self, spec: &ChartSpec) -> Result<SurfaceId, RenderError>;

    /// Blocking user notification outside the chart region
    fn alert(&mut self, message: &str);

    /// Number of live chart instances
    fn chart_count(&self) -> usize;

    /// Flush the current content to wherever it is displayed
    fn present(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Loading,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MountedChart {
    pub id: SurfaceId,
    pub spec: ChartSpec,
}

/// What an area currently shows
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AreaContent {
    #[default]
    Empty,
    Notice(Notice),
    Charts(Vec<MountedChart>),
}

impl AreaContent {
    pub fn charts(&self) -> &[MountedChart] {
        match self {
            AreaContent::Charts(charts) => charts,
            _ => &[],
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            AreaContent::Notice(notice) => Some(notice),
            _ => None,
        }
    }
}
