//! Built-in charts with the site's hardcoded data.

mod about;
mod blog;
mod hero;
mod services;

use std::f64::consts::TAU;

use crate::ports::{Canvas2d, Paint};

pub use self::about::{MissionChart, ValuesChart, VisionChart};
pub use self::blog::{AiAdoptionChart, NeuralNetworkChart, WebPerformanceChart};
pub use self::hero::HeroChart;
pub use self::services::{Service, ServiceComparisonChart};

use super::registry::{RenderError, VisualizationRegistry};

/// Registry with every built-in chart.
pub fn builtin_registry() -> Result<VisualizationRegistry, RenderError> {
    let mut registry = VisualizationRegistry::new();
    registry.register(HeroChart)?;
    registry.register(VisionChart)?;
    registry.register(MissionChart)?;
    registry.register(ValuesChart)?;
    registry.register(ServiceComparisonChart)?;
    registry.register(AiAdoptionChart)?;
    registry.register(WebPerformanceChart)?;
    registry.register(NeuralNetworkChart)?;
    Ok(registry)
}

fn clear(canvas: &mut dyn Canvas2d) {
    let (w, h) = (canvas.width(), canvas.height());
    canvas.clear_rect(0.0, 0.0, w, h);
}

fn fill_circle(canvas: &mut dyn Canvas2d, x: f64, y: f64, radius: f64, color: &str) {
    canvas.set_fill(Paint::solid(color));
    canvas.begin_path();
    canvas.arc(x, y, radius, 0.0, TAU);
    canvas.fill();
}

fn stroke_circle(canvas: &mut dyn Canvas2d, x: f64, y: f64, radius: f64) {
    canvas.begin_path();
    canvas.arc(x, y, radius, 0.0, TAU);
    canvas.stroke();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::DisplayList;
    use crate::render::Frame;

    #[test]
    fn every_builtin_draws_something_and_starts_from_a_clear_surface() {
        let registry = builtin_registry().unwrap();
        assert_eq!(
            registry.registered_kinds(),
            vec![
                "ai-adoption",
                "hero",
                "mission",
                "neural-network",
                "service-comparison",
                "values",
                "vision",
                "web-performance",
            ]
        );

        for kind in registry.registered_kinds() {
            let chart = registry.get(kind).unwrap();
            let mut list = DisplayList::new(600.0, 400.0);
            chart.draw(&mut list, &Frame::at(1.5));
            chart.draw(&mut list, &Frame::at(1.5));
            let once = list.commands().len();
            assert!(once > 0, "{kind} drew nothing");

            // a repaint replaces the previous frame rather than stacking on it
            let mut fresh = DisplayList::new(600.0, 400.0);
            chart.draw(&mut fresh, &Frame::at(1.5));
            assert_eq!(fresh.commands().len(), once, "{kind} accumulated commands");
        }
    }
}
