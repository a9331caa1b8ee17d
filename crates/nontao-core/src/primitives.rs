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

//! # Core Primitives
//!
//! Small, reusable building blocks shared by the rest of the workspace.
//! The central piece is the half-open [`Interval`], which models both
//! occupancy periods on a spot and the booking ledger kept by the packer.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Sub;

/// A half-open interval `[start, end)`.
///
/// The start is inclusive and the end is exclusive, so `[start, end)` holds
/// every `x` with `start <= x < end`. Two intervals that merely touch
/// (`a.end() == b.start()`) do not intersect.
///
/// # Examples
///
/// ```
/// use nontao_core::primitives::Interval;
/// let interval = Interval::new(1, 5);
/// assert_eq!(interval.start(), 1);
/// assert_eq!(interval.end(), 5);
/// assert!(interval.contains(3));
/// assert!(!interval.contains(5));
/// assert_eq!(interval.length(), 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval<T> {
    start_inclusive: T,
    end_exclusive: T,
}

impl<T> Interval<T> {
    /// Creates a new half-open interval `[start, end)`.
    ///
    /// The bounds are put in order, so `Interval::new(5, 3)` is `[3, 5)`.
    ///
    /// # Panics
    ///
    /// Panics if `a` and `b` are not comparable (e.g. NaN).
    ///
    /// ```
    /// use nontao_core::primitives::Interval;
    ///
    /// let interval = Interval::new(5, 3);
    /// assert_eq!(interval.start(), 3);
    /// assert_eq!(interval.end(), 5);
    /// ```
    #[inline]
    pub fn new(a: T, b: T) -> Self
    where
        T: PartialOrd + Copy,
    {
        let ord = a
            .partial_cmp(&b)
            .expect("Interval::new: non-comparable bounds (NaN?)");
        let (s, e) = match ord {
            Ordering::Greater => (b, a),
            _ => (a, b),
        };

        Self {
            start_inclusive: s,
            end_exclusive: e,
        }
    }

    /// Returns the inclusive start.
    #[inline]
    pub fn start(&self) -> T
    where
        T: Copy,
    {
        self.start_inclusive
    }

    /// Returns the exclusive end.
    #[inline]
    pub fn end(&self) -> T
    where
        T: Copy,
    {
        self.end_exclusive
    }

    /// Returns `true` when start and end coincide.
    ///
    /// ```
    /// use nontao_core::primitives::Interval;
    ///
    /// assert!(Interval::new(5, 5).is_empty());
    /// assert!(!Interval::new(1, 5).is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool
    where
        T: PartialEq,
    {
        self.start_inclusive == self.end_exclusive
    }

    /// Checks whether `start <= x < end`.
    #[inline]
    pub fn contains(&self, x: T) -> bool
    where
        T: PartialOrd,
    {
        x >= self.start_inclusive && x < self.end_exclusive
    }

    /// Checks whether the two intervals share at least one point.
    ///
    /// The intervals intersect if the larger start lies strictly before the
    /// smaller end. Back-to-back intervals therefore do not intersect, while
    /// identical and nested non-empty intervals do.
    ///
    /// ```
    /// use nontao_core::primitives::Interval;
    ///
    /// let a = Interval::new(1, 5);
    /// assert!(a.intersects(&Interval::new(4, 6)));
    /// assert!(a.intersects(&Interval::new(2, 3)));
    /// assert!(a.intersects(&a));
    /// assert!(!a.intersects(&Interval::new(5, 7)));
    /// ```
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool
    where
        T: PartialOrd + Copy,
    {
        let start = if self.start_inclusive > other.start_inclusive {
            self.start_inclusive
        } else {
            other.start_inclusive
        };
        let end = if self.end_exclusive < other.end_exclusive {
            self.end_exclusive
        } else {
            other.end_exclusive
        };
        start < end
    }

    /// Returns `end - start`.
    #[inline]
    pub fn length<D>(&self) -> D
    where
        T: Copy + Sub<Output = D>,
    {
        self.end_exclusive - self.start_inclusive
    }
}

impl<T: Default> Default for Interval<T> {
    fn default() -> Self {
        Self {
            start_inclusive: T::default(),
            end_exclusive: T::default(),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start_inclusive, self.end_exclusive)
    }
}

impl<T: Copy + PartialOrd> From<std::ops::Range<T>> for Interval<T> {
    fn from(range: std::ops::Range<T>) -> Self {
        Interval::new(range.start, range.end)
    }
}

/// Evenly spaced samples over `[start, stop]`, both ends included.
///
/// Mirrors the usual `linspace`: with `num == 1` the single sample is
/// `start`, with `num == 0` the result is empty. The last sample is pinned
/// to `stop` so no rounding drift leaks past the upper bound.
///
/// ```
/// use nontao_core::primitives::linspace;
///
/// assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// ```
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            let mut out: Vec<f64> = (0..num).map(|i| start + step * i as f64).collect();
            out[num - 1] = stop;
            out
        }
    }
}

/// Arithmetic mean of the items, `None` for an empty input.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_order_integers() {
        let i = Interval::new(5i32, 3i32);
        assert_eq!(i.start(), 3);
        assert_eq!(i.end(), 5);
    }

    #[test]
    #[should_panic]
    fn test_new_panics_on_nan() {
        let _ = Interval::new(f64::NAN, 1.0f64);
    }

    #[test]
    fn test_contains_inclusive_start_and_exclusive_end() {
        let i = Interval::new(10u32, 20u32);
        assert!(i.contains(10));
        assert!(i.contains(19));
        assert!(!i.contains(20));
        assert!(!i.contains(9));
    }

    #[test]
    fn test_intersects_false_when_touching_at_endpoint() {
        let a = Interval::new(0u32, 10u32);
        let b = Interval::new(10u32, 20u32);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn test_intersects_true_for_nested_and_identical() {
        let outer = Interval::new(0u32, 100u32);
        let inner = Interval::new(40u32, 60u32);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
        assert!(outer.intersects(&outer));
    }

    #[test]
    fn test_intersects_false_when_one_is_empty() {
        let a = Interval::new(1i32, 5i32);
        let empty = Interval::new(3i32, 3i32);
        assert!(!a.intersects(&empty));
        assert!(!empty.intersects(&a));
    }

    #[test]
    fn test_display() {
        assert_eq!(Interval::new(3, 8).to_string(), "[3, 8)");
    }

    #[test]
    fn test_linspace_endpoints_and_len() {
        let xs = linspace(-2.679226, -2.662672, 50);
        assert_eq!(xs.len(), 50);
        assert_eq!(xs[0], -2.679226);
        assert_eq!(xs[49], -2.662672);
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_linspace_degenerate_span() {
        assert_eq!(linspace(1.5, 1.5, 3), vec![1.5, 1.5, 1.5]);
        assert_eq!(linspace(4.0, 9.0, 1), vec![4.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean([1.0, 2.0, 3.0, 6.0]), Some(3.0));
        assert_eq!(mean(std::iter::empty()), None);
    }
}
