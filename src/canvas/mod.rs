/*
 *  canvas/mod.rs
 *
 *  clockface - analog clock face widget
 *  (c) 2020-26 Stuart Hunter
 *
 *  Canvas abstraction the clock face draws against
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::Point;
use log::warn;

pub mod eg;
pub mod recording;

pub use eg::EgCanvas;
pub use recording::{DrawOp, RecordingCanvas};

/// Sub-pixel point in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Nearest device pixel.
    pub fn round(self) -> Point {
        Point::new(self.x.round() as i32, self.y.round() as i32)
    }
}

/// Axis-aligned rectangle, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl RectF {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    pub fn centered(center: PointF, width: f32, height: f32) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }
}

/// 2D affine transform: x' = a*x + c*y + tx, y' = b*x + d*y + ty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    tx: f32,
    ty: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform { a: 1.0, b: 0.0, c: 0.0, d: 1.0, tx: 0.0, ty: 0.0 };

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.tx += self.a * dx + self.c * dy;
        self.ty += self.b * dx + self.d * dy;
    }

    /// Rotate by `degrees`, clockwise on a y-down surface.
    pub fn rotate(&mut self, degrees: f32) {
        let (s, c) = degrees.to_radians().sin_cos();
        let (a, b, cc, d) = (self.a, self.b, self.c, self.d);
        self.a = a * c + cc * s;
        self.b = b * c + d * s;
        self.c = cc * c - a * s;
        self.d = d * c - b * s;
    }

    pub fn map(&self, p: PointF) -> PointF {
        PointF::new(
            self.a * p.x + self.c * p.y + self.tx,
            self.b * p.x + self.d * p.y + self.ty,
        )
    }

    pub fn is_axis_aligned(&self) -> bool {
        self.b.abs() < 1e-6 && self.c.abs() < 1e-6
    }
}

/// Save/restore stack shared by the canvas implementations.
#[derive(Debug, Clone, Default)]
pub struct TransformStack {
    current: Transform,
    saved: Vec<Transform>,
}

impl TransformStack {
    pub fn current(&self) -> &Transform {
        &self.current
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    /// Unbalanced restores leave the current transform untouched.
    pub fn restore(&mut self) {
        match self.saved.pop() {
            Some(t) => self.current = t,
            None => warn!("canvas restore without matching save"),
        }
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.current.translate(dx, dy);
    }

    pub fn rotate(&mut self, degrees: f32) {
        self.current.rotate(degrees);
    }

    pub fn map(&self, p: PointF) -> PointF {
        self.current.map(p)
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintStyle {
    Fill,
    Stroke,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cap {
    Butt,
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Complete style for a single draw call.
///
/// Built fresh for every primitive, so nothing carries over between draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Rgb888,
    pub style: PaintStyle,
    pub stroke_width: f32,
    pub cap: Cap,
    pub text_size: f32,
    pub text_align: TextAlign,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            color: Rgb888::BLACK,
            style: PaintStyle::Fill,
            stroke_width: 1.0,
            cap: Cap::Butt,
            text_size: 12.0,
            text_align: TextAlign::Left,
        }
    }
}

impl Paint {
    pub fn fill(color: Rgb888) -> Self {
        Self { color, ..Default::default() }
    }

    pub fn stroke(color: Rgb888, width: f32) -> Self {
        Self {
            color,
            style: PaintStyle::Stroke,
            stroke_width: width,
            ..Default::default()
        }
    }

    pub fn text(color: Rgb888, size: f32) -> Self {
        Self { color, text_size: size, ..Default::default() }
    }

    pub fn with_cap(mut self, cap: Cap) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.text_align = align;
        self
    }
}

/// Vertical font metrics relative to the baseline, y-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Distance above the baseline, negative.
    pub ascent: f32,
    /// Distance below the baseline, positive.
    pub descent: f32,
}

impl FontMetrics {
    /// Offset to add to a center point's y so the glyph box is centered on it.
    pub fn center_offset(&self) -> f32 {
        (self.descent - self.ascent) / 2.0 - self.descent
    }
}

/// Drawing surface used by the clock face.
pub trait Canvas {
    type Error;

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f32, dy: f32);
    fn rotate(&mut self, degrees: f32);

    fn draw_circle(&mut self, center: PointF, radius: f32, paint: &Paint) -> Result<(), Self::Error>;

    fn draw_round_rect(&mut self, rect: RectF, corner: f32, paint: &Paint) -> Result<(), Self::Error>;

    fn draw_line(&mut self, from: PointF, to: PointF, paint: &Paint) -> Result<(), Self::Error>;

    /// `origin` is on the baseline; horizontal placement follows `paint.text_align`.
    fn draw_text(&mut self, text: &str, origin: PointF, paint: &Paint) -> Result<(), Self::Error>;

    fn font_metrics(&self, paint: &Paint) -> FontMetrics;
}
