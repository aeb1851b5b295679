/*
 *  view/mod.rs
 *
 *  clockface - analog clock face widget
 *  (c) 2020-26 Stuart Hunter
 *
 *  Host adapter: lifecycle, measurement and self-scheduling redraws
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

pub mod scheduler;

use std::time::Duration;

use embedded_graphics::geometry::Size;
use log::{debug, info};

use crate::canvas::Canvas;
use crate::face::{measure, ClockFace, ClockStyle, ClockTime, FrameState, MeasureSpec, TimeSource};
use crate::func_timer::FunctionTimer;
pub use scheduler::{
    ManualScheduler, Redraw, RedrawHandle, RedrawRequest, ScheduledRedraw, Scheduler, TokioScheduler,
};

/// Redraw policy: every frame while the second hand shows, otherwise once
/// at the top of the next minute.
pub fn next_redraw(style: &ClockStyle, time: &ClockTime) -> Redraw {
    if style.has_seconds {
        Redraw::NextFrame
    } else {
        Redraw::After(Duration::from_secs(u64::from(60 - time.second.min(59))))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Created,
    Attached,
    Detached,
}

/// Binds a [`ClockFace`] to a host: forwards measure/attach/draw/detach and
/// owns the single outstanding redraw.
pub struct ClockView<S: Scheduler, T: TimeSource> {
    face: ClockFace,
    scheduler: S,
    clock: T,
    size: Size,
    lifecycle: Lifecycle,
    pending: Option<RedrawHandle>,
    frames: u64,
}

impl<S: Scheduler, T: TimeSource> ClockView<S, T> {
    pub fn new(style: ClockStyle, scheduler: S, clock: T) -> Self {
        Self {
            face: ClockFace::new(style),
            scheduler,
            clock,
            size: Size::zero(),
            lifecycle: Lifecycle::Created,
            pending: None,
            frames: 0,
        }
    }

    pub fn style(&self) -> &ClockStyle {
        self.face.style()
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Draw passes completed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn pending(&self) -> Option<&RedrawHandle> {
        self.pending.as_ref().filter(|h| h.is_pending())
    }

    /// Resolve the host's constraints to a square and keep it for drawing.
    pub fn on_measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> Size {
        self.size = measure(width, height);
        debug!("measured {}x{}", self.size.width, self.size.height);
        self.size
    }

    /// Start the redraw loop with an immediate frame request.
    pub fn on_attached(&mut self) {
        if self.lifecycle == Lifecycle::Attached {
            return;
        }
        info!(
            "clock attached at {}x{} (seconds {})",
            self.size.width,
            self.size.height,
            if self.style().has_seconds { "on" } else { "off" }
        );
        self.lifecycle = Lifecycle::Attached;
        self.reschedule(Redraw::NextFrame);
    }

    /// One draw pass. Samples the clock, renders, then books the next pass
    /// while attached.
    pub fn on_draw<K: Canvas>(&mut self, canvas: &mut K) -> Result<FrameState, K::Error> {
        let frame = FrameState::new(self.size, self.clock.now());
        let result = {
            let _timer = FunctionTimer::with_budget("clock draw", Duration::from_millis(16));
            self.face.draw(canvas, &frame)
        };
        self.frames += 1;

        // keep ticking even if this frame failed
        if self.lifecycle == Lifecycle::Attached {
            self.reschedule(next_redraw(self.face.style(), &frame.time));
        }
        result.map(|_| frame)
    }

    /// Stop the loop; any pending redraw is cancelled.
    pub fn on_detached(&mut self) {
        self.cancel_pending();
        if self.lifecycle == Lifecycle::Attached {
            info!("clock detached after {} frames", self.frames);
        }
        self.lifecycle = Lifecycle::Detached;
    }

    fn reschedule(&mut self, redraw: Redraw) {
        self.cancel_pending();
        debug!("next redraw: {:?}", redraw);
        self.pending = Some(self.scheduler.schedule(redraw));
    }

    fn cancel_pending(&mut self) {
        if let Some(mut handle) = self.pending.take() {
            if handle.cancel() {
                debug!("cancelled pending redraw");
            }
        }
    }
}

impl<S: Scheduler, T: TimeSource> Drop for ClockView<S, T> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
