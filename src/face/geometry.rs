/*
 *  face/geometry.rs
 *
 *  clockface - analog clock face widget
 *  (c) 2020-26 Stuart Hunter
 *
 *  Per-frame dial geometry and hand angles
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

use core::f32::consts::PI;
use embedded_graphics::geometry::Size;

use crate::canvas::PointF;
use super::time::ClockTime;

pub const DIAL_SCALE: f32 = 0.9;
pub const HUB_DIVISOR: f32 = 20.0;
pub const CORNER_DIVISOR: f32 = 8.0;
pub const NUMERAL_DIVISOR: f32 = 5.0;

/// Dial layout for one draw pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// min(width, height)
    pub side: f32,
    pub center: PointF,
    pub dial_radius: f32,
    pub hub_radius: f32,
    /// rounded corner of the square background
    pub corner_radius: f32,
    pub numeral_size: f32,
}

impl Geometry {
    pub fn for_size(size: Size) -> Self {
        let side = size.width.min(size.height) as f32;
        let dial_radius = side / 2.0 * DIAL_SCALE;
        Self {
            side,
            center: PointF::new(size.width as f32 / 2.0, size.height as f32 / 2.0),
            dial_radius,
            hub_radius: dial_radius / HUB_DIVISOR,
            corner_radius: side / CORNER_DIVISOR,
            numeral_size: dial_radius / NUMERAL_DIVISOR,
        }
    }

    /// Radius of the circle the numeral anchors sit on.
    pub fn numeral_radius(&self) -> f32 {
        self.dial_radius - self.numeral_size
    }

    /// Anchor (before baseline adjustment) of numeral `n` in 1..=12.
    pub fn numeral_anchor(&self, n: u32) -> PointF {
        let theta = numeral_angle(n);
        let r = self.numeral_radius();
        PointF::new(
            self.center.x + theta.cos() * r,
            self.center.y + theta.sin() * r,
        )
    }
}

/// Polar angle in radians of numeral `n`; 3 o'clock is 0, 12 is straight up.
pub fn numeral_angle(n: u32) -> f32 {
    PI * (n as f32 - 3.0) / 6.0
}

/// Clockwise degrees from 12 o'clock for each hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    pub hour: f32,
    pub minute: f32,
    pub second: f32,
}

impl HandAngles {
    pub fn from_time(t: &ClockTime) -> Self {
        Self {
            hour: hour_angle(t.hour, t.minute),
            minute: minute_angle(t.minute, t.second),
            second: second_angle(t.second),
        }
    }
}

#[inline]
pub fn hour_angle(hour: u32, minute: u32) -> f32 {
    (hour % 12) as f32 * 30.0 + minute as f32 * 0.5
}

#[inline]
pub fn minute_angle(minute: u32, second: u32) -> f32 {
    minute as f32 * 6.0 + second as f32 * 0.1
}

/// Jumps once per second, no sweep.
#[inline]
pub fn second_angle(second: u32) -> f32 {
    (second * 6) as f32
}

/// The three hands with their proportions relative to the dial and hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Hour,
    Minute,
    Second,
}

impl Hand {
    /// Tip distance from the center as a fraction of the dial radius.
    pub fn reach(self) -> f32 {
        match self {
            Hand::Hour => 0.5,
            Hand::Minute => 0.7,
            Hand::Second => 0.9,
        }
    }

    /// Bar width as a fraction of the hub radius.
    pub fn weight(self) -> f32 {
        match self {
            Hand::Hour => 1.0,
            Hand::Minute => 0.7,
            Hand::Second => 0.35,
        }
    }

    pub fn length(self, geo: &Geometry) -> f32 {
        geo.dial_radius * self.reach()
    }

    pub fn width(self, geo: &Geometry) -> f32 {
        (geo.hub_radius * self.weight()).max(1.0)
    }
}
