// Chart.js scatter configuration export
use serde_json::{Value, json};

use super::{AxisSpec, ChartSpec, Series};

impl ChartSpec {
    /// Chart.js `scatter` config for this chart
    ///
    /// Non-finite coordinates serialize as `null`, which Chart.js skips.
    pub fn to_chartjs(&self) -> Value {
        let datasets: Vec<Value> = self.series.iter().map(series_config).collect();
        let options = &self.options;

        json!({
            "type": "scatter",
            "data": { "datasets": datasets },
            "options": {
                "responsive": true,
                "maintainAspectRatio": false,
                "plugins": {
                    "legend": {
                        "display": options.show_legend,
                        "labels": { "color": options.text_color }
                    },
                    "title": {
                        "display": options.show_title,
                        "text": self.title,
                        "color": options.text_color
                    }
                },
                "scales": {
                    "x": axis_config(&options.x_axis),
                    "y": axis_config(&options.y_axis)
                }
            }
        })
    }
}

fn series_config(series: &Series) -> Value {
    let data: Vec<Value> = series
        .points
        .iter()
        .map(|p| json!({ "x": finite(p.x), "y": finite(p.y) }))
        .collect();

    json!({
        "label": series.label,
        "data": data,
        "backgroundColor": series.color,
        "pointRadius": series.point_radius
    })
}

fn axis_config(axis: &AxisSpec) -> Value {
    json!({
        "title": { "display": true, "text": axis.title, "color": axis.color },
        "ticks": { "color": axis.color }
    })
}

fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}
