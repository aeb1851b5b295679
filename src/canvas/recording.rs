/*
 *  canvas/recording.rs
 *
 *  clockface - analog clock face widget
 *  (c) 2020-26 Stuart Hunter
 *
 *  Recording canvas for testing without a draw target
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

use core::convert::Infallible;

use super::{Canvas, FontMetrics, Paint, PointF, RectF, TransformStack};

/// One recorded primitive, coordinates already in device space.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Circle { center: PointF, radius: f32, paint: Paint },
    RoundRect { rect: RectF, corner: f32, paint: Paint },
    Line { from: PointF, to: PointF, paint: Paint },
    Text { text: String, origin: PointF, paint: Paint },
}

/// Canvas that records every draw call instead of rasterising it.
///
/// Useful for:
/// - asserting draw order and styling
/// - checking where rotated primitives end up
/// - comparing two draw passes for equality
///
/// Font metrics are proportional: ascent is 80% and descent 20% of the text
/// size.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    ops: Vec<DrawOp>,
    transform: TransformStack,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }

    /// Outstanding saves; zero after a balanced draw pass.
    pub fn save_depth(&self) -> usize {
        self.transform.depth()
    }

    pub fn lines(&self) -> impl Iterator<Item = (&PointF, &PointF, &Paint)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Line { from, to, paint } => Some((from, to, paint)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, &PointF)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, origin, .. } => Some((text.as_str(), origin)),
            _ => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    type Error = Infallible;

    fn save(&mut self) {
        self.transform.save();
    }

    fn restore(&mut self) {
        self.transform.restore();
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.transform.translate(dx, dy);
    }

    fn rotate(&mut self, degrees: f32) {
        self.transform.rotate(degrees);
    }

    fn draw_circle(&mut self, center: PointF, radius: f32, paint: &Paint) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::Circle {
            center: self.transform.map(center),
            radius,
            paint: *paint,
        });
        Ok(())
    }

    fn draw_round_rect(&mut self, rect: RectF, corner: f32, paint: &Paint) -> Result<(), Self::Error> {
        let tl = self.transform.map(PointF::new(rect.left, rect.top));
        self.ops.push(DrawOp::RoundRect {
            rect: RectF::new(tl.x, tl.y, rect.width, rect.height),
            corner,
            paint: *paint,
        });
        Ok(())
    }

    fn draw_line(&mut self, from: PointF, to: PointF, paint: &Paint) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::Line {
            from: self.transform.map(from),
            to: self.transform.map(to),
            paint: *paint,
        });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, origin: PointF, paint: &Paint) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            origin: self.transform.map(origin),
            paint: *paint,
        });
        Ok(())
    }

    fn font_metrics(&self, paint: &Paint) -> FontMetrics {
        FontMetrics {
            ascent: -0.8 * paint.text_size,
            descent: 0.2 * paint.text_size,
        }
    }
}
