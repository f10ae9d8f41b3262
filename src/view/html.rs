use chrono::Utc;
use minijinja::{Environment, context};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use super::{ChartArea, MemoryArea, RenderError, SurfaceId};
use crate::chart::ChartSpec;

const PAGE_TEMPLATE: &str = include_str!("templates/page.html");

/// Default heading of the generated page
pub const DEFAULT_PAGE_TITLE: &str = "Cluster Visualization";

/// Chart area that renders to a standalone HTML page with Chart.js canvases
pub struct HtmlArea {
    inner: MemoryArea,
    path: PathBuf,
    title: String,
    /// Alerts shown on the next written page
    pending_alerts: Vec<String>,
}

impl HtmlArea {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            inner: MemoryArea::new(),
            path: path.into(),
            title: DEFAULT_PAGE_TITLE.to_string(),
            pending_alerts: Vec::new(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn take_alerts(&mut self) -> Vec<String> {
        self.inner.take_alerts()
    }

    /// Render the current content as an HTML document
    pub fn render_page(&self) -> Result<String, RenderError> {
        let charts = self.inner.charts();
        let surfaces: Vec<SurfaceId> = charts.iter().map(|c| c.id).collect();

        let mut configs = Map::new();
        for chart in charts {
            configs.insert(chart.id.to_string(), chart.spec.to_chartjs());
        }
        // Keep "</script>" inside a label from closing the script block
        let configs = serde_json::to_string(&Value::Object(configs))?.replace("</", "<\\/");

        let mut env = Environment::new();
        env.add_template("page.html", PAGE_TEMPLATE)?;
        let tmpl = env.get_template("page.html")?;

        Ok(tmpl.render(context! {
            title => self.title,
            notice => self.inner.notice(),
            surfaces => surfaces,
            configs => configs,
            alerts => self.pending_alerts,
            generated_at => Utc::now().to_rfc3339(),
        })?)
    }
}

impl ChartArea for HtmlArea {
    fn show_loading(&mut self, message: &str) {
        self.inner.show_loading(message);
    }

    fn show_error(&mut self, message: &str) {
        self.inner.show_error(message);
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    fn mount(&mut self, spec: &ChartSpec) -> Result<SurfaceId, RenderError> {
        self.inner.mount(spec)
    }

    fn alert(&mut self, message: &str) {
        self.pending_alerts.push(message.to_string());
        self.inner.alert(message);
    }

    fn chart_count(&self) -> usize {
        self.inner.chart_count()
    }

    fn present(&mut self) -> Result<(), RenderError> {
        let page = self.render_page()?;
        // Blocking write; the caller holds the controller's stage lock
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, page)?;
        self.pending_alerts.clear();

        tracing::debug!(path = %self.path.display(), charts = self.chart_count(), "wrote chart page");
        Ok(())
    }
}
