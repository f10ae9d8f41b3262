use super::{AreaContent, ChartArea, MountedChart, Notice, NoticeKind, RenderError, SurfaceId};
use crate::chart::ChartSpec;

/// Headless chart area that keeps mounted charts in memory
#[derive(Debug, Default)]
pub struct MemoryArea {
    content: AreaContent,
    alerts: Vec<String>,
    next_id: SurfaceId,
    /// Lifetime totals, used to check that nothing leaks
    created: usize,
    destroyed: usize,
    max_surfaces: Option<usize>,
}

impl MemoryArea {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of charts that may be mounted at once
    pub fn max_surfaces(mut self, limit: usize) -> Self {
        self.max_surfaces = Some(limit);
        self
    }

    pub fn content(&self) -> &AreaContent {
        &self.content
    }

    pub fn charts(&self) -> &[MountedChart] {
        self.content.charts()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.content.notice()
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Drain alerts raised since the last call
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    pub fn created(&self) -> usize {
        self.created
    }

    pub fn destroyed(&self) -> usize {
        self.destroyed
    }

    fn replace(&mut self, content: AreaContent) {
        self.destroyed += self.content.charts().len();
        self.content = content;
    }

    fn set_notice(&mut self, kind: NoticeKind, message: &str) {
        self.replace(AreaContent::Notice(Notice {
            kind,
            text: message.to_string(),
        }));
    }
}

impl ChartArea for MemoryArea {
    fn show_loading(&mut self, message: &str) {
        self.set_notice(NoticeKind::Loading, message);
    }

    fn show_error(&mut self, message: &str) {
        self.set_notice(NoticeKind::Error, message);
    }

    fn clear(&mut self) {
        self.replace(AreaContent::Empty);
    }

    fn mount(&mut self, spec: &ChartSpec) -> Result<SurfaceId, RenderError> {
        let live = self.content.charts().len();
        if let Some(limit) = self.max_surfaces {
            if live >= limit {
                return Err(RenderError::SurfaceLimit { limit });
            }
        }

        if !matches!(self.content, AreaContent::Charts(_)) {
            self.replace(AreaContent::Charts(Vec::new()));
        }

        let id = self.next_id;
        self.next_id += 1;
        self.created += 1;

        if let AreaContent::Charts(charts) = &mut self.content {
            charts.push(MountedChart {
                id,
                spec: spec.clone(),
            });
        }
        Ok(id)
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn chart_count(&self) -> usize {
        self.content.charts().len()
    }
}
