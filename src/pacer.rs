/*
 *  pacer.rs
 *
 *  clockface - analog clock face widget
 *  (c) 2020-26 Stuart Hunter
 *
 *  Frame tick pacing, stands in for the host's vsync
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
use std::time::{Duration, Instant};

pub const DEFAULT_FPS: u32 = 30;

/// Fixed-rate frame clock.
///
/// Ticks sit on a grid of `1/fps` from the pacer's epoch, so a late caller
/// skips to the next tick instead of drifting.
#[derive(Debug, Clone)]
pub struct Pacer {
    epoch: Instant,
    frame: Duration,
}

impl Pacer {
    pub fn new(target_fps: u32) -> Self {
        Self::starting_at(Instant::now(), target_fps)
    }

    pub fn starting_at(epoch: Instant, target_fps: u32) -> Self {
        Self { epoch, frame: frame_duration(target_fps) }
    }

    #[inline]
    pub fn set_fps(&mut self, fps: u32) {
        self.frame = frame_duration(fps);
    }

    pub fn frame(&self) -> Duration {
        self.frame
    }

    /// First tick strictly after `now`.
    pub fn next_tick_after(&self, now: Instant) -> Instant {
        let elapsed = now.saturating_duration_since(self.epoch).as_nanos();
        let frame = self.frame.as_nanos().max(1);
        let ticks = elapsed / frame + 1;
        self.epoch + Duration::from_nanos((ticks * frame) as u64)
    }

    /// How long until the next tick.
    pub fn until_next_tick(&self) -> Duration {
        let now = Instant::now();
        self.next_tick_after(now).saturating_duration_since(now)
    }
}

fn frame_duration(fps: u32) -> Duration {
    Duration::from_micros((1_000_000u32 / fps.max(1)) as u64)
}
