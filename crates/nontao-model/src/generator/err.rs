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

use std::fmt::Display;

use crate::id::ZoneId;

/// A window or duration that cannot produce a well-formed same-day interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidIntervalError {
    EmptyWindow { start_hour: u32, end_hour: u32 },
    WindowPastMidnight { start_hour: u32, end_hour: u32 },
    ZeroDuration,
    /// Every window's earliest start plus the shortest duration already
    /// reaches midnight, so no candidate could ever be placed.
    NoStartBeforeMidnight { shortest_duration_min: u32 },
}

impl Display for InvalidIntervalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use InvalidIntervalError::*;
        match self {
            EmptyWindow {
                start_hour,
                end_hour,
            } => write!(
                f,
                "InvalidInterval: start window [{}h, {}h) is empty",
                start_hour, end_hour
            ),
            WindowPastMidnight {
                start_hour,
                end_hour,
            } => write!(
                f,
                "InvalidInterval: start window [{}h, {}h) ends after midnight",
                start_hour, end_hour
            ),
            ZeroDuration => write!(f, "InvalidInterval: durations must be positive"),
            NoStartBeforeMidnight {
                shortest_duration_min,
            } => write!(
                f,
                "InvalidInterval: no start window leaves room for a {} minute occupancy before midnight",
                shortest_duration_min
            ),
        }
    }
}

impl std::error::Error for InvalidIntervalError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackerConfigBuildError {
    InvalidInterval(InvalidIntervalError),
    ZeroSpots,
    MissingWindows,
    MissingDurations,
    ZeroFailureBudget,
}

impl Display for PackerConfigBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use PackerConfigBuildError::*;
        match self {
            InvalidInterval(e) => write!(f, "{}", e),
            ZeroSpots => write!(f, "spots_per_machine must be at least 1"),
            MissingWindows => write!(f, "Missing start windows"),
            MissingDurations => write!(f, "Missing durations"),
            ZeroFailureBudget => write!(f, "failure budget must be at least 1"),
        }
    }
}

impl From<InvalidIntervalError> for PackerConfigBuildError {
    fn from(err: InvalidIntervalError) -> Self {
        Self::InvalidInterval(err)
    }
}

impl std::error::Error for PackerConfigBuildError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterConfigError {
    MissingZones,
    NoMachines,
    DuplicateZone(ZoneId),
    NonFiniteBounds(ZoneId),
}

impl Display for RosterConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use RosterConfigError::*;
        match self {
            MissingZones => write!(f, "Missing zones"),
            NoMachines => write!(f, "zones request zero machines in total"),
            DuplicateZone(z) => write!(f, "zone {} is configured more than once", z),
            NonFiniteBounds(z) => write!(f, "zone {} has non-finite coordinate bounds", z),
        }
    }
}

impl std::error::Error for RosterConfigError {}
