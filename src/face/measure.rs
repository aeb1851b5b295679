/*
 *  face/measure.rs
 *
 *  clockface - analog clock face widget
 *  (c) 2020-26 Stuart Hunter
 *
 *  Square size negotiation with the host layout
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

use embedded_graphics::geometry::Size;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureMode {
    /// The parent fixed this dimension.
    Exactly,
    /// Up to `size`.
    AtMost,
    /// No constraint; `size` is only a proposal.
    Unspecified,
}

/// One dimension's constraint from the host layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasureSpec {
    pub mode: MeasureMode,
    pub size: u32,
}

impl MeasureSpec {
    pub const fn exactly(size: u32) -> Self {
        Self { mode: MeasureMode::Exactly, size }
    }

    pub const fn at_most(size: u32) -> Self {
        Self { mode: MeasureMode::AtMost, size }
    }

    pub const fn unspecified(proposed: u32) -> Self {
        Self { mode: MeasureMode::Unspecified, size: proposed }
    }

    pub fn is_exact(&self) -> bool {
        self.mode == MeasureMode::Exactly
    }
}

/// Resolve the constraints to a square; width always equals height.
pub fn measure(width: MeasureSpec, height: MeasureSpec) -> Size {
    let side = match (width.is_exact(), height.is_exact()) {
        (true, true) => width.size.min(height.size),
        (true, false) => width.size,
        (false, true) => height.size,
        (false, false) => width.size.min(height.size),
    };
    Size::new(side, side)
}
