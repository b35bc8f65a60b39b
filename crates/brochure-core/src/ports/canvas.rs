//! Canvas2d port - 2D 描画面の抽象化
//!
//! ブラウザの CanvasRenderingContext2d と同じ即時モードの呼び出しだけを
//! 持ちます。シーングラフは持たず、毎回すべて描き直す前提です。
//!
//! # 実装
//! - **DisplayList**: 呼び出しを DrawCommand として記録し、SVG に書き出す

/// CSS color string, e.g. `#2563eb` or `#2563eb20` (with alpha suffix).
pub type Color = String;

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Linear gradient from (x0, y0) to (x1, y1) with offset/color stops.
    Linear {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        stops: Vec<(f64, Color)>,
    },
}

impl Paint {
    pub fn solid(color: impl Into<Color>) -> Self {
        Paint::Solid(color.into())
    }

    pub fn linear(x0: f64, y0: f64, x1: f64, y1: f64, from: impl Into<Color>, to: impl Into<Color>) -> Self {
        Paint::Linear {
            x0,
            y0,
            x1,
            y1,
            stops: vec![(0.0, from.into()), (1.0, to.into())],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Start,
    Left,
    Center,
    Right,
}

pub trait Canvas2d {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    fn set_fill(&mut self, paint: Paint);
    fn set_stroke(&mut self, paint: Paint);
    fn set_line_width(&mut self, width: f64);
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    /// Clockwise arc, angles in radians.
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64);
    fn close_path(&mut self);
    fn fill(&mut self);
    fn stroke(&mut self);

    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}
