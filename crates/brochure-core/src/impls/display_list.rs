//! DisplayList - 描画呼び出しを記録する Canvas2d 実装
//!
//! # 実装詳細
//! - パス操作は PathSeg として溜め、fill/stroke 時に DrawCommand へ確定
//! - 全面 clear_rect はコマンド列を捨てる（毎フレーム全描画のため）
//! - `to_svg()` で SVG 文書へ変換（グラデーションは defs、円弧は A コマンド）

use std::f64::consts::{PI, TAU};
use std::fmt::Write as _;

use crate::ports::{Canvas2d, Paint, TextAlign};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSeg {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Arc {
        cx: f64,
        cy: f64,
        radius: f64,
        start: f64,
        end: f64,
    },
    Close,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    },
    FillRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        paint: Paint,
    },
    FillPath {
        path: Vec<PathSeg>,
        paint: Paint,
    },
    StrokePath {
        path: Vec<PathSeg>,
        paint: Paint,
        line_width: f64,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        font: String,
        align: TextAlign,
        paint: Paint,
    },
}

#[derive(Debug, Clone)]
pub struct DisplayList {
    width: f64,
    height: f64,
    fill: Paint,
    stroke: Paint,
    line_width: f64,
    font: String,
    align: TextAlign,
    path: Vec<PathSeg>,
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            fill: Paint::solid("#000000"),
            stroke: Paint::solid("#000000"),
            line_width: 1.0,
            font: "10px sans-serif".to_string(),
            align: TextAlign::Start,
            path: Vec::new(),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// All text drawn since the last full clear, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn to_svg(&self) -> String {
        let mut defs = String::new();
        let mut body = String::new();
        let mut gradients = 0usize;

        for command in &self.commands {
            match command {
                DrawCommand::Clear { x, y, w, h } => {
                    let _ = writeln!(
                        body,
                        r##"  <rect x="{}" y="{}" width="{}" height="{}" fill="#ffffff"/>"##,
                        num(*x),
                        num(*y),
                        num(*w),
                        num(*h)
                    );
                }
                DrawCommand::FillRect { x, y, w, h, paint } => {
                    let fill = paint_ref(paint, &mut defs, &mut gradients);
                    let _ = writeln!(
                        body,
                        r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
                        num(*x),
                        num(*y),
                        num(*w),
                        num(*h),
                        fill
                    );
                }
                DrawCommand::FillPath { path, paint } => {
                    let fill = paint_ref(paint, &mut defs, &mut gradients);
                    let _ = writeln!(body, r#"  <path d="{}" fill="{}"/>"#, path_data(path), fill);
                }
                DrawCommand::StrokePath {
                    path,
                    paint,
                    line_width,
                } => {
                    let stroke = paint_ref(paint, &mut defs, &mut gradients);
                    let _ = writeln!(
                        body,
                        r#"  <path d="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
                        path_data(path),
                        stroke,
                        num(*line_width)
                    );
                }
                DrawCommand::Text {
                    text,
                    x,
                    y,
                    font,
                    align,
                    paint,
                } => {
                    let fill = paint_ref(paint, &mut defs, &mut gradients);
                    let anchor = match align {
                        TextAlign::Center => "middle",
                        TextAlign::Right => "end",
                        TextAlign::Start | TextAlign::Left => "start",
                    };
                    let _ = writeln!(
                        body,
                        r#"  <text x="{}" y="{}" fill="{}" text-anchor="{}" style="font: {}">{}</text>"#,
                        num(*x),
                        num(*y),
                        fill,
                        anchor,
                        escape(font),
                        escape(text)
                    );
                }
            }
        }

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = num(self.width),
            h = num(self.height)
        );
        if !defs.is_empty() {
            svg.push_str("  <defs>\n");
            svg.push_str(&defs);
            svg.push_str("  </defs>\n");
        }
        svg.push_str(&body);
        svg.push_str("</svg>\n");
        svg
    }
}

impl Canvas2d for DisplayList {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        if x <= 0.0 && y <= 0.0 && x + w >= self.width && y + h >= self.height {
            self.commands.clear();
        } else {
            self.commands.push(DrawCommand::Clear { x, y, w, h });
        }
    }

    fn set_fill(&mut self, paint: Paint) {
        self.fill = paint;
    }

    fn set_stroke(&mut self, paint: Paint) {
        self.stroke = paint;
    }

    fn set_line_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.line_width = width;
        }
    }

    fn set_font(&mut self, font: &str) {
        self.font = font.to_string();
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.align = align;
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            w,
            h,
            paint: self.fill.clone(),
        });
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.push(PathSeg::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.push(PathSeg::LineTo(x, y));
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
        self.path.push(PathSeg::Arc {
            cx: x,
            cy: y,
            radius: radius.max(0.0),
            start,
            end,
        });
    }

    fn close_path(&mut self) {
        self.path.push(PathSeg::Close);
    }

    fn fill(&mut self) {
        if self.path.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::FillPath {
            path: self.path.clone(),
            paint: self.fill.clone(),
        });
    }

    fn stroke(&mut self) {
        if self.path.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::StrokePath {
            path: self.path.clone(),
            paint: self.stroke.clone(),
            line_width: self.line_width,
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            font: self.font.clone(),
            align: self.align,
            paint: self.fill.clone(),
        });
    }
}

fn num(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{rounded}")
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

fn paint_ref(paint: &Paint, defs: &mut String, counter: &mut usize) -> String {
    match paint {
        Paint::Solid(color) => escape(color),
        Paint::Linear {
            x0,
            y0,
            x1,
            y1,
            stops,
        } => {
            let id = format!("g{}", *counter);
            *counter += 1;
            let _ = writeln!(
                defs,
                r#"    <linearGradient id="{id}" gradientUnits="userSpaceOnUse" x1="{}" y1="{}" x2="{}" y2="{}">"#,
                num(*x0),
                num(*y0),
                num(*x1),
                num(*y1)
            );
            for (offset, color) in stops {
                let _ = writeln!(
                    defs,
                    r#"      <stop offset="{}" stop-color="{}"/>"#,
                    num(offset.clamp(0.0, 1.0)),
                    escape(color)
                );
            }
            defs.push_str("    </linearGradient>\n");
            format!("url(#{id})")
        }
    }
}

fn path_data(path: &[PathSeg]) -> String {
    let mut d = String::new();
    let mut has_point = false;

    for seg in path {
        match *seg {
            PathSeg::MoveTo(x, y) => {
                let _ = write!(d, "M{} {} ", num(x), num(y));
                has_point = true;
            }
            PathSeg::LineTo(x, y) => {
                let cmd = if has_point { 'L' } else { 'M' };
                let _ = write!(d, "{cmd}{} {} ", num(x), num(y));
                has_point = true;
            }
            PathSeg::Arc {
                cx,
                cy,
                radius,
                start,
                end,
            } => {
                let point = |angle: f64| (cx + radius * angle.cos(), cy + radius * angle.sin());
                let (sx, sy) = point(start);
                let cmd = if has_point { 'L' } else { 'M' };
                let _ = write!(d, "{cmd}{} {} ", num(sx), num(sy));
                has_point = true;

                let sweep = end - start;
                if sweep.abs() >= TAU {
                    // full circle: two half arcs, SVG cannot draw it in one
                    let (mx, my) = point(start + PI);
                    let _ = write!(
                        d,
                        "A{r} {r} 0 0 1 {} {} A{r} {r} 0 0 1 {} {} ",
                        num(mx),
                        num(my),
                        num(sx),
                        num(sy),
                        r = num(radius)
                    );
                } else {
                    let sweep = sweep.rem_euclid(TAU);
                    let large = if sweep > PI { 1 } else { 0 };
                    let (ex, ey) = point(start + sweep);
                    let _ = write!(
                        d,
                        "A{r} {r} 0 {large} 1 {} {} ",
                        num(ex),
                        num(ey),
                        r = num(radius)
                    );
                }
            }
            PathSeg::Close => d.push_str("Z "),
        }
    }

    d.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_clear_drops_previous_frame() {
        let mut list = DisplayList::new(100.0, 50.0);
        list.fill_rect(0.0, 0.0, 10.0, 10.0);
        list.fill_text("a", 1.0, 1.0);
        assert_eq!(list.commands().len(), 2);

        list.clear_rect(0.0, 0.0, 100.0, 50.0);
        assert!(list.commands().is_empty());

        list.clear_rect(10.0, 10.0, 5.0, 5.0);
        assert_eq!(list.commands().len(), 1);
    }

    #[test]
    fn fill_and_stroke_capture_current_state() {
        let mut list = DisplayList::new(10.0, 10.0);
        list.set_stroke(Paint::solid("#ff0000"));
        list.set_line_width(3.0);
        list.begin_path();
        list.move_to(0.0, 0.0);
        list.line_to(5.0, 5.0);
        list.stroke();

        match &list.commands()[0] {
            DrawCommand::StrokePath {
                paint, line_width, ..
            } => {
                assert_eq!(paint, &Paint::solid("#ff0000"));
                assert_eq!(*line_width, 3.0);
            }
            other => panic!("unexpected command {other:?}"),
        }

        // empty path draws nothing
        list.begin_path();
        list.fill();
        assert_eq!(list.commands().len(), 1);
    }

    #[test]
    fn svg_contains_gradient_defs_and_escaped_text() {
        let mut list = DisplayList::new(200.0, 100.0);
        list.set_fill(Paint::linear(0.0, 0.0, 0.0, 100.0, "#2563eb", "#8b5cf6"));
        list.fill_rect(0.0, 0.0, 200.0, 100.0);
        list.set_fill(Paint::solid("#000"));
        list.set_text_align(TextAlign::Center);
        list.fill_text("R&D <50%>", 100.0, 50.0);

        let svg = list.to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("<linearGradient id=\"g0\""));
        assert!(svg.contains("fill=\"url(#g0)\""));
        assert!(svg.contains("R&amp;D &lt;50%&gt;"));
        assert!(svg.contains("text-anchor=\"middle\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn full_circle_becomes_two_arcs() {
        let mut list = DisplayList::new(10.0, 10.0);
        list.begin_path();
        list.arc(5.0, 5.0, 2.0, 0.0, TAU);
        list.fill();

        let svg = list.to_svg();
        assert!(svg.contains("M7 5 A2 2 0 0 1 3 5 A2 2 0 0 1 7 5"), "got {svg}");
    }

    #[test]
    fn pie_slice_uses_large_arc_flag_past_half_turn() {
        let mut list = DisplayList::new(10.0, 10.0);
        list.begin_path();
        list.move_to(5.0, 5.0);
        list.arc(5.0, 5.0, 4.0, 0.0, PI * 1.5);
        list.close_path();
        list.fill();

        let svg = list.to_svg();
        assert!(svg.contains("L9 5 A4 4 0 1 1"), "got {svg}");
        assert!(svg.contains(" Z\""), "got {svg}");
    }
}
