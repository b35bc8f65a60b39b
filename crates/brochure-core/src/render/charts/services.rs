//! Service comparison: horizontal bars per metric for each checked service.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ports::{Canvas2d, Paint, TextAlign};
use crate::render::registry::{Frame, Visualization};

use super::clear;

/// Declaration order is checkbox order on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    Web,
    Mobile,
    Cloud,
}

impl Service {
    pub const ALL: [Service; 3] = [Service::Web, Service::Mobile, Service::Cloud];

    pub fn as_str(self) -> &'static str {
        match self {
            Service::Web => "web",
            Service::Mobile => "mobile",
            Service::Cloud => "cloud",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Service::Web => "Web Dev",
            Service::Mobile => "Mobile",
            Service::Cloud => "Cloud",
        }
    }

    /// Cost, time, complexity, maintenance (0–100).
    fn scores(self) -> [f64; 4] {
        match self {
            Service::Web => [70.0, 40.0, 50.0, 30.0],
            Service::Mobile => [90.0, 80.0, 70.0, 60.0],
            Service::Cloud => [80.0, 60.0, 80.0, 70.0],
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown service '{0}'")]
pub struct UnknownService(String);

impl FromStr for Service {
    type Err = UnknownService;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Service::ALL
            .into_iter()
            .find(|svc| svc.as_str() == s)
            .ok_or_else(|| UnknownService(s.to_string()))
    }
}

const METRICS: [&str; 4] = ["Chi phí", "Thời gian", "Độ phức tạp", "Bảo trì"];
const PLACEHOLDER: &str = "Chọn dịch vụ để so sánh";

const BAR_HEIGHT: f64 = 30.0;
const BAR_SPACING: f64 = 50.0;
const START_Y: f64 = 50.0;

pub struct ServiceComparisonChart;

impl Visualization for ServiceComparisonChart {
    fn kind(&self) -> &'static str {
        "service-comparison"
    }

    fn draw(&self, canvas: &mut dyn Canvas2d, frame: &Frame) {
        let (w, h) = (canvas.width(), canvas.height());
        let p = &frame.palette;
        clear(canvas);

        if frame.services.is_empty() {
            canvas.set_fill(Paint::solid(p.secondary));
            canvas.set_font("16px Roboto");
            canvas.set_text_align(TextAlign::Center);
            canvas.fill_text(PLACEHOLDER, w / 2.0, h / 2.0);
            return;
        }

        let colors = [p.primary, p.accent, p.success];
        canvas.set_text_align(TextAlign::Left);

        for (m, metric) in METRICS.iter().enumerate() {
            let y = START_Y + m as f64 * BAR_SPACING;

            canvas.set_fill(Paint::solid(p.primary));
            canvas.set_font("14px Roboto");
            canvas.fill_text(metric, 10.0, y + BAR_HEIGHT / 2.0 + 5.0);

            for (s, service) in frame.services.iter().enumerate() {
                let value = service.scores()[m];
                let bar_w = value / 100.0 * (w - 150.0);
                let x = 120.0 + s as f64 * 5.0;

                canvas.set_fill(Paint::solid(colors[s % colors.len()]));
                canvas.fill_rect(x, y, bar_w, BAR_HEIGHT - 10.0);

                canvas.set_fill(Paint::solid("#ffffff"));
                canvas.set_font("12px Roboto");
                canvas.fill_text(&format!("{value}%"), x + 10.0, y + BAR_HEIGHT / 2.0 + 3.0);
            }
        }

        // legend
        let legend_x = w - 150.0;
        for (s, service) in frame.services.iter().enumerate() {
            let y = START_Y + s as f64 * 25.0;
            canvas.set_fill(Paint::solid(colors[s % colors.len()]));
            canvas.fill_rect(legend_x, y, 15.0, 15.0);
            canvas.set_fill(Paint::solid(p.primary));
            canvas.set_font("12px Roboto");
            canvas.fill_text(service.label(), legend_x + 25.0, y + 12.0);
        }
    }
}
