/*
 *  face/time.rs
 *
 *  clockface - analog clock face widget
 *  (c) 2020-26 Stuart Hunter
 *
 *  Wall clock sampling
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

use chrono::{Local, NaiveTime, Timelike};

/// 12-hour time of day as shown by the dial.
///
/// There is no AM/PM: the face has no indicator for it, so 13:05 and 01:05
/// sample to the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockTime {
    /// 0-11
    pub hour: u32,
    /// 0-59
    pub minute: u32,
    /// 0-59
    pub second: u32,
}

impl ClockTime {
    /// Hour wraps modulo 12, minute and second clamp to 59 (a leap second
    /// reads as 59).
    pub fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour: hour % 12,
            minute: minute.min(59),
            second: second.min(59),
        }
    }

    pub fn from_timelike<T: Timelike>(t: &T) -> Self {
        Self::new(t.hour(), t.minute(), t.second())
    }

    /// Parse `HH:MM:SS` or `HH:MM` (24 hour input accepted).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        NaiveTime::parse_from_str(s, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
            .ok()
            .map(|t| Self::from_timelike(&t))
    }
}

/// Source of the current time of day, sampled once per draw pass.
pub trait TimeSource {
    fn now(&self) -> ClockTime;
}

impl<T: TimeSource + ?Sized> TimeSource for Box<T> {
    fn now(&self) -> ClockTime {
        (**self).now()
    }
}

/// Host wall clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl TimeSource for LocalClock {
    fn now(&self) -> ClockTime {
        ClockTime::from_timelike(&Local::now())
    }
}

/// A clock stopped at a fixed time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub ClockTime);

impl TimeSource for FixedClock {
    fn now(&self) -> ClockTime {
        self.0
    }
}
