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

//! Planar geometry over (longitude, latitude) pairs.
//!
//! Distances are plain Euclidean distances in degree space. That is what
//! the field estimator needs for ranking neighbours within a few city
//! blocks; no geodesic correction is applied.

use crate::primitives::Interval;
use std::fmt::Display;

/// A location, stored in plotting order: `x = longitude`, `y = latitude`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    #[inline]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.longitude
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.latitude
    }

    #[inline]
    pub fn distance_squared(&self, other: &GeoPoint) -> f64 {
        let dx = self.longitude - other.longitude;
        let dy = self.latitude - other.latitude;
        dx * dx + dy * dy
    }

    #[inline]
    pub fn distance(&self, other: &GeoPoint) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

impl Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.longitude, self.latitude)
    }
}

/// Axis-aligned bounds of a point set, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Extent {
    /// Bounds of `points`, `None` when there are none.
    pub fn of<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a GeoPoint>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let init = Extent {
            min_x: first.x(),
            max_x: first.x(),
            min_y: first.y(),
            max_y: first.y(),
        };
        Some(iter.fold(init, |e, p| Extent {
            min_x: e.min_x.min(p.x()),
            max_x: e.max_x.max(p.x()),
            min_y: e.min_y.min(p.y()),
            max_y: e.max_y.max(p.y()),
        }))
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Grows each side by `frac` of the span on that axis.
    pub fn padded(&self, frac: f64) -> Self {
        let dx = frac * self.width();
        let dy = frac * self.height();
        Extent {
            min_x: self.min_x - dx,
            max_x: self.max_x + dx,
            min_y: self.min_y - dy,
            max_y: self.max_y + dy,
        }
    }

    pub fn x_range(&self) -> Interval<f64> {
        Interval::new(self.min_x, self.max_x)
    }

    pub fn y_range(&self) -> Interval<f64> {
        Interval::new(self.min_y, self.max_y)
    }

    /// Inclusive containment on both axes.
    pub fn contains(&self, p: &GeoPoint) -> bool {
        (self.min_x..=self.max_x).contains(&p.x()) && (self.min_y..=self.max_y).contains(&p.y())
    }
}
