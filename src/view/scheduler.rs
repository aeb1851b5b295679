/*
 *  view/scheduler.rs
 *
 *  clockface - analog clock face widget
 *  (c) 2020-26 Stuart Hunter
 *
 *  Cancellable redraw scheduling
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

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::AbortHandle;

use crate::pacer::Pacer;

/// When the next redraw should happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    /// On the host's next frame tick.
    NextFrame,
    /// Once, after a delay.
    After(Duration),
}

const PENDING: u8 = 0;
const FIRED: u8 = 1;
const CANCELLED: u8 = 2;

/// Shared state of one scheduled redraw. Moves out of `PENDING` exactly once.
#[derive(Debug, Default)]
struct RedrawState(AtomicU8);

impl RedrawState {
    fn transition(&self, to: u8) -> bool {
        self.0
            .compare_exchange(PENDING, to, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn get(&self) -> u8 {
        self.0.load(Ordering::Acquire)
    }
}

/// Cancellation token for a scheduled redraw.
///
/// Cancelling is idempotent and a no-op once the redraw has fired.
#[derive(Debug)]
pub struct RedrawHandle {
    state: Arc<RedrawState>,
    task: Option<AbortHandle>,
}

impl RedrawHandle {
    fn new(state: Arc<RedrawState>, task: Option<AbortHandle>) -> Self {
        Self { state, task }
    }

    /// Returns true if this call stopped a pending redraw.
    pub fn cancel(&mut self) -> bool {
        let stopped = self.state.transition(CANCELLED);
        if let Some(task) = self.task.take() {
            task.abort();
        }
        stopped
    }

    pub fn is_pending(&self) -> bool {
        self.state.get() == PENDING
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.get() == CANCELLED
    }

    pub fn has_fired(&self) -> bool {
        self.state.get() == FIRED
    }
}

/// Host scheduling primitive.
pub trait Scheduler {
    fn request_frame(&mut self) -> RedrawHandle;

    fn request_after(&mut self, delay: Duration) -> RedrawHandle;

    fn schedule(&mut self, redraw: Redraw) -> RedrawHandle {
        match redraw {
            Redraw::NextFrame => self.request_frame(),
            Redraw::After(delay) => self.request_after(delay),
        }
    }
}

/// A redraw recorded by [`ManualScheduler`].
#[derive(Debug, Clone)]
pub struct ScheduledRedraw {
    pub redraw: Redraw,
    state: Arc<RedrawState>,
}

impl ScheduledRedraw {
    pub fn is_pending(&self) -> bool {
        self.state.get() == PENDING
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.get() == CANCELLED
    }
}

/// Scheduler that only records requests; the caller decides when they fire.
///
/// Deterministic stand-in for a host event loop in tests.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    requests: Vec<ScheduledRedraw>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request so far, oldest first.
    pub fn requests(&self) -> &[ScheduledRedraw] {
        &self.requests
    }

    pub fn last(&self) -> Option<&ScheduledRedraw> {
        self.requests.last()
    }

    pub fn pending(&self) -> impl Iterator<Item = &ScheduledRedraw> {
        self.requests.iter().filter(|r| r.is_pending())
    }

    /// Fire the oldest pending request, as the host would when it comes due.
    pub fn fire_next(&mut self) -> Option<Redraw> {
        self.requests
            .iter()
            .find(|r| r.state.transition(FIRED))
            .map(|r| r.redraw)
    }

    fn record(&mut self, redraw: Redraw) -> RedrawHandle {
        let state = Arc::new(RedrawState::default());
        self.requests.push(ScheduledRedraw { redraw, state: Arc::clone(&state) });
        RedrawHandle::new(state, None)
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self) -> RedrawHandle {
        self.record(Redraw::NextFrame)
    }

    fn request_after(&mut self, delay: Duration) -> RedrawHandle {
        self.record(Redraw::After(delay))
    }
}

/// Message delivered to the host loop when a redraw comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedrawRequest {
    pub id: u64,
    pub redraw: Redraw,
}

/// Scheduler backed by tokio timers.
///
/// Each request is a sleeping task that posts a [`RedrawRequest`] to the host
/// loop unless cancelled first. Frame requests wake on the pacer's next tick.
/// Must be used from within a tokio runtime.
pub struct TokioScheduler {
    tx: UnboundedSender<RedrawRequest>,
    pacer: Pacer,
    next_id: u64,
}

impl TokioScheduler {
    pub fn new(tx: UnboundedSender<RedrawRequest>, fps: u32) -> Self {
        Self { tx, pacer: Pacer::new(fps), next_id: 0 }
    }

    fn spawn(&mut self, delay: Duration, redraw: Redraw) -> RedrawHandle {
        let id = self.next_id;
        self.next_id += 1;

        let state = Arc::new(RedrawState::default());
        let task_state = Arc::clone(&state);
        let tx = self.tx.clone();

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if task_state.transition(FIRED) && tx.send(RedrawRequest { id, redraw }).is_err() {
                debug!("redraw {} fired after the host loop closed", id);
            }
        });

        RedrawHandle::new(state, Some(task.abort_handle()))
    }
}

impl Scheduler for TokioScheduler {
    fn request_frame(&mut self) -> RedrawHandle {
        let delay = self.pacer.until_next_tick();
        self.spawn(delay, Redraw::NextFrame)
    }

    fn request_after(&mut self, delay: Duration) -> RedrawHandle {
        self.spawn(delay, Redraw::After(delay))
    }
}
