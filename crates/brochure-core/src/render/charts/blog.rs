//! Blog illustrations.

use crate::ports::{Canvas2d, Paint, TextAlign};
use crate::render::palette::with_alpha;
use crate::render::registry::{Frame, Visualization};

use super::{clear, fill_circle, stroke_circle};

/// Post illustrations share a faint diagonal wash.
fn post_background(canvas: &mut dyn Canvas2d, frame: &Frame) {
    let (w, h) = (canvas.width(), canvas.height());
    clear(canvas);
    canvas.set_fill(Paint::linear(
        0.0,
        0.0,
        w,
        h,
        with_alpha(frame.palette.primary, "10"),
        with_alpha(frame.palette.secondary, "05"),
    ));
    canvas.fill_rect(0.0, 0.0, w, h);
}

fn adoption_y(progress: f64, h: f64) -> f64 {
    h - progress.powf(0.7) * (h - 40.0) - 20.0
}

pub struct AiAdoptionChart;

impl Visualization for AiAdoptionChart {
    fn kind(&self) -> &'static str {
        "ai-adoption"
    }

    fn draw(&self, canvas: &mut dyn Canvas2d, frame: &Frame) {
        let (w, h) = (canvas.width(), canvas.height());
        let p = &frame.palette;
        post_background(canvas, frame);

        canvas.set_stroke(Paint::solid(p.gradient1));
        canvas.set_line_width(3.0);
        canvas.begin_path();
        let mut x = 0.0;
        while x <= w {
            let y = adoption_y(x / w, h);
            if x == 0.0 {
                canvas.move_to(x, y);
            } else {
                canvas.line_to(x, y);
            }
            x += 5.0;
        }
        canvas.stroke();

        for point in [0.2, 0.4, 0.6, 0.8] {
            fill_circle(canvas, w * point, adoption_y(point, h), 6.0, p.accent);
        }

        canvas.set_fill(Paint::solid(p.primary));
        canvas.set_font("12px Roboto");
        canvas.set_text_align(TextAlign::Center);
        canvas.fill_text("AI Adoption Growth", w / 2.0, 20.0);
    }
}

/// Core Web Vitals: measured value against the "good" threshold.
const VITALS: [(&str, f64, f64); 4] = [
    ("LCP", 2.1, 2.5),
    ("FID", 0.08, 0.1),
    ("CLS", 0.05, 0.1),
    ("FCP", 1.2, 1.8),
];

pub struct WebPerformanceChart;

impl Visualization for WebPerformanceChart {
    fn kind(&self) -> &'static str {
        "web-performance"
    }

    fn draw(&self, canvas: &mut dyn Canvas2d, frame: &Frame) {
        let (w, h) = (canvas.width(), canvas.height());
        let p = &frame.palette;
        post_background(canvas, frame);

        let slot = w / VITALS.len() as f64;
        let bar_w = slot - 40.0;
        let max_h = h - 60.0;
        let scale = VITALS.iter().map(|(_, _, target)| *target).fold(f64::MIN, f64::max);

        canvas.set_font("12px Roboto");
        canvas.set_text_align(TextAlign::Center);
        for (i, (metric, value, target)) in VITALS.iter().enumerate() {
            let x = i as f64 * slot + 20.0;

            let target_h = target / scale * max_h;
            canvas.set_fill(Paint::solid(with_alpha(p.secondary, "30")));
            canvas.fill_rect(x, h - 30.0 - target_h, bar_w, target_h);

            let value_h = value / scale * max_h;
            let color = if value <= target { p.success } else { p.warning };
            canvas.set_fill(Paint::solid(color));
            canvas.fill_rect(x, h - 30.0 - value_h, bar_w, value_h);

            canvas.set_fill(Paint::solid(p.primary));
            canvas.fill_text(metric, x + bar_w / 2.0, h - 10.0);
        }
    }
}

const LAYERS: [usize; 4] = [4, 6, 6, 3];
const NODE_RADIUS: f64 = 8.0;

pub struct NeuralNetworkChart;

impl Visualization for NeuralNetworkChart {
    fn kind(&self) -> &'static str {
        "neural-network"
    }

    fn draw(&self, canvas: &mut dyn Canvas2d, frame: &Frame) {
        let (w, h) = (canvas.width(), canvas.height());
        let p = &frame.palette;
        clear(canvas);

        let spacing = w / (LAYERS.len() + 1) as f64;
        let nodes: Vec<Vec<(f64, f64)>> = LAYERS
            .iter()
            .enumerate()
            .map(|(layer, &size)| {
                let x = spacing * (layer + 1) as f64;
                let gap = h / (size + 1) as f64;
                (0..size).map(|i| (x, gap * (i + 1) as f64)).collect()
            })
            .collect();

        canvas.set_stroke(Paint::solid(with_alpha(p.primary, "30")));
        canvas.set_line_width(1.0);
        for pair in nodes.windows(2) {
            for &(x0, y0) in &pair[0] {
                for &(x1, y1) in &pair[1] {
                    canvas.begin_path();
                    canvas.move_to(x0, y0);
                    canvas.line_to(x1, y1);
                    canvas.stroke();
                }
            }
        }

        let last = nodes.len() - 1;
        let t = frame.time_secs * 2.0;
        for (layer, column) in nodes.iter().enumerate() {
            let color = match layer {
                0 => p.success,
                l if l == last => p.accent,
                _ => p.primary,
            };
            for &(x, y) in column {
                let pulse = (t + x + y).sin() * 0.3 + 0.7;
                fill_circle(canvas, x, y, NODE_RADIUS * pulse, color);
                canvas.set_stroke(Paint::solid(color));
                canvas.set_line_width(2.0);
                stroke_circle(canvas, x, y, NODE_RADIUS * 1.5);
            }
        }

        canvas.set_fill(Paint::solid(p.primary));
        canvas.set_font("12px Roboto");
        canvas.set_text_align(TextAlign::Center);
        canvas.fill_text("Input", spacing, h - 10.0);
        canvas.fill_text("Hidden Layers", w / 2.0, h - 10.0);
        canvas.fill_text("Output", spacing * LAYERS.len() as f64, h - 10.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::{DisplayList, DrawCommand};

    #[test]
    fn vitals_within_target_are_green() {
        let mut list = DisplayList::new(400.0, 200.0);
        WebPerformanceChart.draw(&mut list, &Frame::default());

        assert_eq!(list.texts(), vec!["LCP", "FID", "CLS", "FCP"]);
        let green = list
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRect { paint: Paint::Solid(color), .. } if color == "#10b981"))
            .count();
        assert_eq!(green, 4);
    }

    #[test]
    fn network_connects_every_adjacent_layer_pair() {
        let mut list = DisplayList::new(500.0, 300.0);
        NeuralNetworkChart.draw(&mut list, &Frame::default());

        let edges = list
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokePath { line_width, .. } if *line_width == 1.0))
            .count();
        assert_eq!(edges, 4 * 6 + 6 * 6 + 6 * 3);
        assert_eq!(list.texts(), vec!["Input", "Hidden Layers", "Output"]);
    }

    #[test]
    fn adoption_curve_rises_left_to_right() {
        assert!(adoption_y(0.8, 300.0) < adoption_y(0.2, 300.0));
        assert_eq!(adoption_y(0.0, 300.0), 280.0);
        assert_eq!(adoption_y(1.0, 300.0), 20.0);
    }
}
