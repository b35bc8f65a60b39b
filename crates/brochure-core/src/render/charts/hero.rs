//! Hero banner: circuit grid, flowing particles and a pulsing central node.
//! Everything moves with `Frame::time_secs`.

use std::f64::consts::PI;

use crate::ports::{Canvas2d, Paint};
use crate::render::palette::with_alpha;
use crate::render::registry::{Frame, Visualization};

use super::{clear, fill_circle, stroke_circle};

pub struct HeroChart;

impl Visualization for HeroChart {
    fn kind(&self) -> &'static str {
        "hero"
    }

    fn draw(&self, canvas: &mut dyn Canvas2d, frame: &Frame) {
        let (w, h) = (canvas.width(), canvas.height());
        let p = &frame.palette;
        clear(canvas);

        canvas.set_fill(Paint::linear(
            0.0,
            0.0,
            w,
            h,
            with_alpha(p.primary, "20"),
            with_alpha(p.secondary, "10"),
        ));
        canvas.fill_rect(0.0, 0.0, w, h);

        circuit(canvas, frame, w, h);
        particles(canvas, frame, w, h);
        central_node(canvas, frame, w / 2.0, h / 2.0);
    }
}

fn circuit(canvas: &mut dyn Canvas2d, frame: &Frame, w: f64, h: f64) {
    let t = frame.time_secs;
    let p = &frame.palette;

    canvas.set_stroke(Paint::solid(with_alpha(p.primary, "40")));
    canvas.set_line_width(2.0);
    canvas.begin_path();
    for i in 0..5 {
        let fi = i as f64;
        let y = h / 6.0 * (fi + 1.0);
        let offset = (t + fi).sin() * 10.0;
        canvas.move_to(offset, y);
        canvas.line_to(w - offset, y);
    }
    for i in 0..5 {
        let fi = i as f64;
        let x = w / 6.0 * (fi + 1.0);
        let offset = (t + fi).cos() * 10.0;
        canvas.move_to(x, offset);
        canvas.line_to(x, h - offset);
    }
    canvas.stroke();

    for i in 1..5 {
        for j in 1..5 {
            let (fi, fj) = (i as f64, j as f64);
            let x = w / 6.0 * (fi + 1.0);
            let y = h / 6.0 * (fj + 1.0);
            let pulse = (t * 2.0 + fi + fj).sin() * 0.5 + 0.5;
            fill_circle(canvas, x, y, 3.0 + pulse * 2.0, p.accent);
        }
    }
}

fn particles(canvas: &mut dyn Canvas2d, frame: &Frame, w: f64, h: f64) {
    let t = frame.time_secs;
    for i in 0..20 {
        let fi = i as f64;
        let x = w / 20.0 * fi + (t + fi).sin() * 20.0;
        let y = h / 2.0 + (t * 2.0 + fi).sin() * 50.0;
        let size = (t * 3.0 + fi).sin() * 2.0 + 3.0;
        fill_circle(canvas, x, y, size, frame.palette.gradient1);
    }
}

fn central_node(canvas: &mut dyn Canvas2d, frame: &Frame, cx: f64, cy: f64) {
    let t = frame.time_secs;
    let p = &frame.palette;
    let pulse = (t * 2.0).sin() * 0.3 + 0.7;

    canvas.set_stroke(Paint::solid(p.primary));
    canvas.set_line_width(3.0);
    stroke_circle(canvas, cx, cy, 30.0 * pulse);

    fill_circle(canvas, cx, cy, 15.0, p.accent);

    for i in 0..6 {
        let angle = t + i as f64 * PI / 3.0;
        fill_circle(canvas, cx + angle.cos() * 40.0, cy + angle.sin() * 40.0, 5.0, p.gradient2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::{DisplayList, DrawCommand};

    fn draw_at(t: f64) -> DisplayList {
        let mut list = DisplayList::new(600.0, 400.0);
        HeroChart.draw(&mut list, &Frame::at(t));
        list
    }

    #[test]
    fn frame_contains_background_grid_nodes_particles_and_core() {
        let list = draw_at(0.0);
        let commands = list.commands();

        assert!(matches!(&commands[0], DrawCommand::FillRect { paint: Paint::Linear { .. }, .. }));
        let fills = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillPath { .. }))
            .count();
        // 16 grid nodes + 20 particles + core + 6 orbiting dots
        assert_eq!(fills, 16 + 20 + 1 + 6);
        let strokes = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokePath { .. }))
            .count();
        assert_eq!(strokes, 2);
    }

    #[test]
    fn frames_differ_over_time() {
        assert_ne!(draw_at(0.0).commands(), draw_at(0.5).commands());
        assert_eq!(draw_at(0.5).commands(), draw_at(0.5).commands());
    }
}
