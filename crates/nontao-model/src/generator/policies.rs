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
use std::str::FromStr;

use nontao_core::{
    primitives::Interval,
    time::TimeOfDay,
};

use crate::id::ZoneId;

use super::err::{InvalidIntervalError, RosterConfigError};

/// How hard the packer keeps trying before it gives up.
///
/// Each level is a budget of consecutive failed placements; a higher
/// budget yields denser packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrafficLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl TrafficLevel {
    #[inline]
    pub const fn failure_budget(self) -> usize {
        match self {
            TrafficLevel::Low => 1,
            TrafficLevel::Medium => 10,
            TrafficLevel::High => 100,
        }
    }
}

impl Display for TrafficLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrafficLevel::Low => write!(f, "low"),
            TrafficLevel::Medium => write!(f, "medium"),
            TrafficLevel::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTrafficLevel(String);

impl Display for UnknownTrafficLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown traffic level {:?} (expected low, medium or high)",
            self.0
        )
    }
}

impl std::error::Error for UnknownTrafficLevel {}

impl FromStr for TrafficLevel {
    type Err = UnknownTrafficLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(TrafficLevel::Low),
            "medium" => Ok(TrafficLevel::Medium),
            "high" => Ok(TrafficLevel::High),
            _ => Err(UnknownTrafficLevel(s.to_string())),
        }
    }
}

/// Hours `[start_hour, end_hour)` in which an occupancy may begin.
///
/// The packer draws a whole hour from this range and then a uniform minute
/// and second, so the latest possible start is `end_hour - 1` at `:59:59`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartWindow {
    start_hour: u32,
    end_hour: u32,
}

impl StartWindow {
    pub fn new(start_hour: u32, end_hour: u32) -> Result<Self, InvalidIntervalError> {
        if end_hour > 24 {
            return Err(InvalidIntervalError::WindowPastMidnight {
                start_hour,
                end_hour,
            });
        }
        if start_hour >= end_hour {
            return Err(InvalidIntervalError::EmptyWindow {
                start_hour,
                end_hour,
            });
        }
        Ok(Self {
            start_hour,
            end_hour,
        })
    }

    #[inline]
    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    #[inline]
    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    /// Whether `t` is a start time this window can produce.
    #[inline]
    pub fn admits(&self, t: TimeOfDay) -> bool {
        (self.start_hour..self.end_hour).contains(&t.hour())
    }
}

impl Display for StartWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:02}h, {:02}h)", self.start_hour, self.end_hour)
    }
}

/// A zone and the box its machines are scattered over.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneSpec {
    zone: ZoneId,
    machines: usize,
    latitude: Interval<f64>,
    longitude: Interval<f64>,
}

impl ZoneSpec {
    /// Bounds may come in either order per axis.
    pub fn new(
        zone: impl Into<ZoneId>,
        machines: usize,
        latitude: (f64, f64),
        longitude: (f64, f64),
    ) -> Result<Self, RosterConfigError> {
        let zone = zone.into();
        let finite = [latitude.0, latitude.1, longitude.0, longitude.1]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(RosterConfigError::NonFiniteBounds(zone));
        }
        Ok(Self {
            zone,
            machines,
            latitude: Interval::new(latitude.0, latitude.1),
            longitude: Interval::new(longitude.0, longitude.1),
        })
    }

    #[inline]
    pub fn zone(&self) -> &ZoneId {
        &self.zone
    }

    #[inline]
    pub fn machines(&self) -> usize {
        self.machines
    }

    #[inline]
    pub fn latitude(&self) -> Interval<f64> {
        self.latitude
    }

    #[inline]
    pub fn longitude(&self) -> Interval<f64> {
        self.longitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traffic_levels_map_to_budgets() {
        assert_eq!(TrafficLevel::Low.failure_budget(), 1);
        assert_eq!(TrafficLevel::Medium.failure_budget(), 10);
        assert_eq!(TrafficLevel::High.failure_budget(), 100);
        assert_eq!(TrafficLevel::default(), TrafficLevel::Medium);
    }

    #[test]
    fn traffic_level_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<TrafficLevel>(), Ok(TrafficLevel::High));
        assert_eq!(" low ".parse::<TrafficLevel>(), Ok(TrafficLevel::Low));
        assert!("rush".parse::<TrafficLevel>().is_err());
    }

    #[test]
    fn start_window_validation() {
        assert!(StartWindow::new(10, 14).is_ok());
        assert!(StartWindow::new(0, 24).is_ok());
        assert!(matches!(
            StartWindow::new(14, 10),
            Err(InvalidIntervalError::EmptyWindow { .. })
        ));
        assert!(matches!(
            StartWindow::new(10, 10),
            Err(InvalidIntervalError::EmptyWindow { .. })
        ));
        assert!(matches!(
            StartWindow::new(20, 25),
            Err(InvalidIntervalError::WindowPastMidnight { .. })
        ));
    }

    #[test]
    fn start_window_admits_its_hours_only() {
        let w = StartWindow::new(10, 14).unwrap();
        assert!(w.admits(TimeOfDay::from_hms(10, 0, 0).unwrap()));
        assert!(w.admits(TimeOfDay::from_hms(13, 59, 59).unwrap()));
        assert!(!w.admits(TimeOfDay::from_hms(14, 0, 0).unwrap()));
        assert!(!w.admits(TimeOfDay::from_hms(9, 59, 59).unwrap()));
    }

    #[test]
    fn zone_spec_normalises_bounds() {
        let z = ZoneSpec::new("1A", 10, (42.846520, 42.841549), (-2.679226, -2.668133)).unwrap();
        assert_eq!(z.latitude().start(), 42.841549);
        assert_eq!(z.latitude().end(), 42.846520);
        assert!(ZoneSpec::new("1A", 1, (f64::NAN, 0.0), (0.0, 1.0)).is_err());
    }
}
