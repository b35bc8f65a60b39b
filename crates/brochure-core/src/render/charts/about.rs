//! About page: growth bars, mission pie, company values radar.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::ports::{Canvas2d, Paint, TextAlign};
use crate::render::palette::with_alpha;
use crate::render::registry::{Frame, Visualization};

use super::{clear, fill_circle, stroke_circle};

const GROWTH: [f64; 6] = [20.0, 35.0, 45.0, 60.0, 80.0, 95.0];

pub struct VisionChart;

impl Visualization for VisionChart {
    fn kind(&self) -> &'static str {
        "vision"
    }

    fn draw(&self, canvas: &mut dyn Canvas2d, frame: &Frame) {
        let (w, h) = (canvas.width(), canvas.height());
        let p = &frame.palette;
        clear(canvas);

        let max = GROWTH.iter().copied().fold(f64::MIN, f64::max);
        let slot = w / GROWTH.len() as f64;
        let bar_w = slot - 20.0;

        canvas.set_font("12px Roboto");
        canvas.set_text_align(TextAlign::Center);
        for (i, value) in GROWTH.iter().enumerate() {
            let bar_h = value / max * (h - 40.0);
            let x = i as f64 * slot + 10.0;
            let y = h - bar_h - 20.0;

            canvas.set_fill(Paint::linear(0.0, y, 0.0, y + bar_h, p.primary, p.gradient1));
            canvas.fill_rect(x, y, bar_w, bar_h);

            canvas.set_fill(Paint::solid(p.primary));
            canvas.fill_text(&format!("{value}%"), x + bar_w / 2.0, y - 10.0);
        }

        canvas.set_fill(Paint::solid(p.primary));
        canvas.set_font("bold 14px Roboto");
        canvas.fill_text("Tăng trưởng dự kiến", w / 2.0, 20.0);
    }
}

pub struct MissionChart;

impl Visualization for MissionChart {
    fn kind(&self) -> &'static str {
        "mission"
    }

    fn draw(&self, canvas: &mut dyn Canvas2d, frame: &Frame) {
        let (w, h) = (canvas.width(), canvas.height());
        let p = &frame.palette;
        clear(canvas);

        let segments = [
            ("Web Dev", 30.0, p.primary),
            ("Mobile", 25.0, p.accent),
            ("AI/ML", 20.0, p.success),
            ("Cloud", 15.0, p.gradient1),
            ("IoT", 10.0, p.gradient2),
        ];
        let (cx, cy) = (w / 2.0, h / 2.0);
        let radius = w.min(h) / 3.0;
        let mut angle = -FRAC_PI_2;

        for (label, value, color) in segments {
            let slice = value / 100.0 * TAU;

            canvas.begin_path();
            canvas.move_to(cx, cy);
            canvas.arc(cx, cy, radius, angle, angle + slice);
            canvas.close_path();
            canvas.set_fill(Paint::solid(color));
            canvas.fill();
            canvas.set_stroke(Paint::solid("#ffffff"));
            canvas.set_line_width(2.0);
            canvas.stroke();

            let mid = angle + slice / 2.0;
            canvas.set_fill(Paint::solid(p.primary));
            canvas.set_font("10px Roboto");
            canvas.set_text_align(TextAlign::Center);
            canvas.fill_text(
                label,
                cx + mid.cos() * (radius + 20.0),
                cy + mid.sin() * (radius + 20.0),
            );

            angle += slice;
        }
    }
}

const VALUES: [(&str, f64); 5] = [
    ("Đổi mới", 90.0),
    ("Chất lượng", 95.0),
    ("Tận tâm", 88.0),
    ("Trách nhiệm", 92.0),
    ("Hiệu quả", 85.0),
];

pub struct ValuesChart;

impl Visualization for ValuesChart {
    fn kind(&self) -> &'static str {
        "values"
    }

    fn draw(&self, canvas: &mut dyn Canvas2d, frame: &Frame) {
        let (w, h) = (canvas.width(), canvas.height());
        let p = &frame.palette;
        clear(canvas);

        let (cx, cy) = (w / 2.0, h / 2.0);
        let radius = w.min(h) / 3.0;
        let step = TAU / VALUES.len() as f64;
        let axis = |i: usize| i as f64 * step - FRAC_PI_2;

        canvas.set_stroke(Paint::solid(with_alpha(p.secondary, "30")));
        canvas.set_line_width(1.0);
        for ring in 1..=5 {
            stroke_circle(canvas, cx, cy, radius / 5.0 * ring as f64);
        }

        canvas.set_font("10px Roboto");
        canvas.set_text_align(TextAlign::Center);
        for (i, (label, _)) in VALUES.iter().enumerate() {
            let a = axis(i);
            canvas.begin_path();
            canvas.move_to(cx, cy);
            canvas.line_to(cx + a.cos() * radius, cy + a.sin() * radius);
            canvas.stroke();

            canvas.set_fill(Paint::solid(p.primary));
            canvas.fill_text(label, cx + a.cos() * (radius + 15.0), cy + a.sin() * (radius + 15.0));
        }

        let points: Vec<(f64, f64)> = VALUES
            .iter()
            .enumerate()
            .map(|(i, (_, score))| {
                let a = axis(i);
                let d = score / 100.0 * radius;
                (cx + a.cos() * d, cy + a.sin() * d)
            })
            .collect();

        canvas.begin_path();
        canvas.set_stroke(Paint::solid(p.primary));
        canvas.set_fill(Paint::solid(with_alpha(p.primary, "30")));
        canvas.set_line_width(2.0);
        for (i, (x, y)) in points.iter().enumerate() {
            if i == 0 {
                canvas.move_to(*x, *y);
            } else {
                canvas.line_to(*x, *y);
            }
        }
        canvas.close_path();
        canvas.fill();
        canvas.stroke();

        for (x, y) in points {
            fill_circle(canvas, x, y, 4.0, p.accent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::{DisplayList, DrawCommand};

    #[test]
    fn vision_labels_every_bar_and_titles_the_chart() {
        let mut list = DisplayList::new(600.0, 300.0);
        VisionChart.draw(&mut list, &Frame::default());
        assert_eq!(
            list.texts(),
            vec!["20%", "35%", "45%", "60%", "80%", "95%", "Tăng trưởng dự kiến"]
        );
        // tallest bar spans the full chart height minus margins
        let tallest = list
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { h, .. } => Some(*h),
                _ => None,
            })
            .fold(0.0, f64::max);
        assert_eq!(tallest, 260.0);
    }

    #[test]
    fn mission_slices_sum_to_a_full_turn_starting_at_twelve_o_clock() {
        let mut list = DisplayList::new(300.0, 300.0);
        MissionChart.draw(&mut list, &Frame::default());

        assert_eq!(list.texts(), vec!["Web Dev", "Mobile", "AI/ML", "Cloud", "IoT"]);
        let arcs: Vec<(f64, f64)> = list
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillPath { path, .. } => path.iter().find_map(|s| match s {
                    crate::impls::PathSeg::Arc { start, end, .. } => Some((*start, *end)),
                    _ => None,
                }),
                _ => None,
            })
            .collect();
        assert_eq!(arcs.len(), 5);
        assert!((arcs[0].0 + FRAC_PI_2).abs() < 1e-9);
        let sweep: f64 = arcs.iter().map(|(s, e)| e - s).sum();
        assert!((sweep - TAU).abs() < 1e-9);
    }

    #[test]
    fn values_radar_has_five_rings_and_labels() {
        let mut list = DisplayList::new(400.0, 400.0);
        ValuesChart.draw(&mut list, &Frame::default());
        assert_eq!(list.texts().len(), 5);
        assert_eq!(list.texts()[0], "Đổi mới");
        let dots = list
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillPath { paint: Paint::Solid(color), .. } if color == "#f59e0b"))
            .count();
        assert_eq!(dots, 5);
    }
}
