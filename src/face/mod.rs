/*
 *  face/mod.rs
 *
 *  clockface - analog clock face widget
 *  (c) 2020-26 Stuart Hunter
 *
 *  Analog clock face rendering
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

pub mod geometry;
pub mod measure;
pub mod style;
pub mod time;

use embedded_graphics::geometry::Size;

use crate::canvas::{Canvas, Cap, Paint, PointF, RectF, TextAlign};
pub use geometry::{Geometry, Hand, HandAngles};
pub use measure::{measure, MeasureMode, MeasureSpec};
pub use style::{AttrValue, AttributeSource, ClockStyle, Shape, StyleAttributes};
pub use time::{ClockTime, FixedClock, LocalClock, TimeSource};

/// Everything one draw pass needs, computed up front and never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameState {
    pub size: Size,
    pub time: ClockTime,
    pub geometry: Geometry,
    pub angles: HandAngles,
}

impl FrameState {
    pub fn new(size: Size, time: ClockTime) -> Self {
        Self {
            size,
            time,
            geometry: Geometry::for_size(size),
            angles: HandAngles::from_time(&time),
        }
    }
}

/// Pure clock face renderer.
///
/// Holds only the style; output is a function of style and [`FrameState`].
#[derive(Debug, Clone)]
pub struct ClockFace {
    style: ClockStyle,
}

impl ClockFace {
    pub fn new(style: ClockStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &ClockStyle {
        &self.style
    }

    /// Render one frame: background, dial, numerals, hour, minute, second.
    pub fn draw<K: Canvas>(&self, canvas: &mut K, frame: &FrameState) -> Result<(), K::Error> {
        let geo = &frame.geometry;

        self.draw_background(canvas, geo)?;
        self.draw_dial(canvas, geo)?;

        if self.style.has_numbers {
            self.draw_numerals(canvas, geo)?;
        }

        self.draw_hand(canvas, geo, Hand::Hour, frame.angles.hour)?;
        self.draw_hand(canvas, geo, Hand::Minute, frame.angles.minute)?;

        if self.style.has_seconds {
            self.draw_hand(canvas, geo, Hand::Second, frame.angles.second)?;
        }
        Ok(())
    }

    fn draw_background<K: Canvas>(&self, canvas: &mut K, geo: &Geometry) -> Result<(), K::Error> {
        let paint = Paint::fill(self.style.main_color);
        match self.style.shape {
            Shape::Round => canvas.draw_circle(geo.center, geo.side / 2.0, &paint),
            Shape::Square => canvas.draw_round_rect(
                RectF::centered(geo.center, geo.side, geo.side),
                geo.corner_radius,
                &paint,
            ),
        }
    }

    fn draw_dial<K: Canvas>(&self, canvas: &mut K, geo: &Geometry) -> Result<(), K::Error> {
        canvas.draw_circle(geo.center, geo.dial_radius, &Paint::fill(self.style.dial_color))?;

        let hub = Paint::stroke(self.style.main_color, (geo.hub_radius / 2.0).max(1.0));
        canvas.draw_circle(geo.center, geo.hub_radius, &hub)
    }

    fn draw_numerals<K: Canvas>(&self, canvas: &mut K, geo: &Geometry) -> Result<(), K::Error> {
        let paint = Paint::text(self.style.main_color, geo.numeral_size).with_align(TextAlign::Center);
        let offset = canvas.font_metrics(&paint).center_offset();

        for n in 1..=12u32 {
            let anchor = geo.numeral_anchor(n);
            canvas.draw_text(&n.to_string(), PointF::new(anchor.x, anchor.y + offset), &paint)?;
        }
        Ok(())
    }

    /// A hand is a vertical bar from the hub edge up to its reach, rotated
    /// about the dial center.
    fn draw_hand<K: Canvas>(
        &self,
        canvas: &mut K,
        geo: &Geometry,
        hand: Hand,
        angle: f32,
    ) -> Result<(), K::Error> {
        let color = match hand {
            Hand::Second => self.style.second_hand_color,
            Hand::Hour | Hand::Minute => self.style.main_color,
        };
        let paint = Paint::stroke(color, hand.width(geo)).with_cap(Cap::Round);

        canvas.save();
        canvas.translate(geo.center.x, geo.center.y);
        canvas.rotate(angle);
        let result = canvas.draw_line(
            PointF::new(0.0, -geo.hub_radius),
            PointF::new(0.0, -hand.length(geo)),
            &paint,
        );
        canvas.restore();
        result
    }
}
