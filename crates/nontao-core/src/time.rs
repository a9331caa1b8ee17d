// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Time of Day
//!
//! Occupancy is simulated over a single day, so every instant is a count of
//! seconds since midnight.
//!
//! - `TimeOfDay`: a point in `[00:00:00, 24:00:00)`.
//! - `TimeDelta`: a signed number of seconds, the difference of two points.
//! - `TimeInterval`: a half-open `[start, end)` of two `TimeOfDay`s.
//!
//! Adding a delta never wraps past midnight: [`TimeOfDay::checked_add`]
//! returns `None` instead.

use crate::primitives::Interval;
use chrono::{NaiveTime, Timelike};
use num_traits::Zero;
use std::{
    fmt::Display,
    ops::{Add, Neg, Sub},
    str::FromStr,
};

pub const SECONDS_PER_MINUTE: u32 = 60;
pub const SECONDS_PER_HOUR: u32 = 3_600;
pub const SECONDS_PER_DAY: u32 = 86_400;

/// `HH:MM:SS`, the persisted representation of a time of day.
pub const TIME_FORMAT: &str = "%H:%M:%S";

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TimeOfDay(u32);

pub type TimeInterval = Interval<TimeOfDay>;

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TimeDelta(i64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedTimeString {
    input: String,
}

impl MalformedTimeString {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}

impl Display for MalformedTimeString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MalformedTimeString: {:?} is not a time of day in HH:MM:SS format",
            self.input
        )
    }
}

impl std::error::Error for MalformedTimeString {}

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// Seconds since midnight, `None` unless `seconds < 86_400`.
    #[inline]
    pub const fn from_seconds(seconds: u32) -> Option<Self> {
        if seconds < SECONDS_PER_DAY {
            Some(TimeOfDay(seconds))
        } else {
            None
        }
    }

    #[inline]
    pub const fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        if hour >= 24 || minute >= 60 || second >= 60 {
            return None;
        }
        Some(TimeOfDay(
            hour * SECONDS_PER_HOUR + minute * SECONDS_PER_MINUTE + second,
        ))
    }

    /// The current local wall-clock time, truncated to whole seconds.
    pub fn now() -> Self {
        chrono::Local::now().time().into()
    }

    #[inline]
    pub const fn seconds(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn hour(self) -> u32 {
        self.0 / SECONDS_PER_HOUR
    }

    #[inline]
    pub const fn minute(self) -> u32 {
        (self.0 % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE
    }

    #[inline]
    pub const fn second(self) -> u32 {
        self.0 % SECONDS_PER_MINUTE
    }

    /// `self + delta`, or `None` if the result falls outside the day.
    #[inline]
    pub fn checked_add(self, delta: TimeDelta) -> Option<Self> {
        let secs = i64::from(self.0).checked_add(delta.0)?;
        u32::try_from(secs).ok().and_then(TimeOfDay::from_seconds)
    }

    /// The interval `[self, self + len)`, `None` for a negative length or
    /// one that reaches midnight.
    #[inline]
    pub fn span_of(self, len: TimeDelta) -> Option<TimeInterval> {
        if len.is_negative() {
            return None;
        }
        self.checked_add(len).map(|end| Interval::new(self, end))
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

impl FromStr for TimeOfDay {
    type Err = MalformedTimeString;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        NaiveTime::parse_from_str(trimmed, TIME_FORMAT)
            .map(TimeOfDay::from)
            .map_err(|_| MalformedTimeString::new(s))
    }
}

impl From<NaiveTime> for TimeOfDay {
    #[inline]
    fn from(t: NaiveTime) -> Self {
        // chrono keeps leap seconds in the nanosecond field, so this stays < 86_400.
        TimeOfDay(t.num_seconds_from_midnight())
    }
}

impl From<TimeOfDay> for NaiveTime {
    #[inline]
    fn from(t: TimeOfDay) -> Self {
        NaiveTime::from_num_seconds_from_midnight_opt(t.0, 0)
            .expect("TimeOfDay is always below 86_400 seconds")
    }
}

impl TimeDelta {
    #[inline]
    pub const fn new(seconds: i64) -> Self {
        Self(seconds)
    }

    #[inline]
    pub const fn from_minutes(minutes: i64) -> Self {
        Self(minutes * SECONDS_PER_MINUTE as i64)
    }

    #[inline]
    pub const fn from_hours(hours: i64) -> Self {
        Self(hours * SECONDS_PER_HOUR as i64)
    }

    #[inline]
    pub const fn seconds(self) -> i64 {
        self.0
    }

    #[inline]
    pub fn as_seconds_f64(self) -> f64 {
        self.0 as f64
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl Display for TimeDelta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TimeDelta({}s)", self.0)
    }
}

impl Sub<TimeOfDay> for TimeOfDay {
    type Output = TimeDelta;

    #[inline]
    fn sub(self, rhs: TimeOfDay) -> Self::Output {
        TimeDelta(i64::from(self.0) - i64::from(rhs.0))
    }
}

impl Add for TimeDelta {
    type Output = TimeDelta;

    fn add(self, rhs: Self) -> Self::Output {
        TimeDelta(
            self.0
                .checked_add(rhs.0)
                .expect("overflow in TimeDelta + TimeDelta"),
        )
    }
}

impl Sub for TimeDelta {
    type Output = TimeDelta;

    fn sub(self, rhs: Self) -> Self::Output {
        TimeDelta(
            self.0
                .checked_sub(rhs.0)
                .expect("underflow in TimeDelta - TimeDelta"),
        )
    }
}

impl Neg for TimeDelta {
    type Output = TimeDelta;

    fn neg(self) -> Self::Output {
        TimeDelta(self.0.checked_neg().expect("overflow in -TimeDelta"))
    }
}

impl Zero for TimeDelta {
    #[inline]
    fn zero() -> Self {
        TimeDelta(0)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Interval<TimeOfDay> {
    #[inline]
    pub fn duration(&self) -> TimeDelta {
        self.end() - self.start()
    }
}
