/*
 *  lib.rs
 *
 *  clockface - analog clock face widget
 *  (c) 2020-26 Stuart Hunter
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

//! Analog clock face widget.
//!
//! [`face::ClockFace`] is a pure renderer over the [`canvas::Canvas`]
//! abstraction; [`view::ClockView`] adapts it to a host (measurement,
//! attach/detach, self-scheduling redraws). [`canvas::EgCanvas`] draws into
//! any embedded-graphics target.

pub mod canvas;
pub mod config;
pub mod face;
pub mod func_timer;
pub mod pacer;
pub mod vframebuf;
pub mod view;

pub use canvas::{Canvas, EgCanvas, RecordingCanvas};
pub use face::{ClockFace, ClockStyle, ClockTime, FrameState, MeasureSpec, Shape};
pub use view::{ClockView, Redraw, Scheduler};
