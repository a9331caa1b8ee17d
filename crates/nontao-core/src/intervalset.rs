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

//! IntervalSet: sorted, disjoint half-open interval set over `Interval<T>`.
//!
//! Invariants (always held):
//!    - intervals are sorted by `start()`
//!    - intervals are non-overlapping and coalesced
//!    - semantics are half-open `[start, end)`
//!
//! Complexity:
//!    - overlaps: `O(log n)`
//!    - insert_and_coalesce: `O(log n + k)` plus the vector shift

use crate::primitives::Interval;

/// A collection of sorted, disjoint, half-open `[start, end)` intervals.
///
/// Adjacent intervals are merged on insertion (`[1, 3)` and `[3, 5)` become
/// `[1, 5)`). Merging never changes the answer of [`IntervalSet::overlaps`]
/// because touching half-open intervals do not overlap.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntervalSet<T> {
    intervals: Vec<Interval<T>>,
}

impl<T> IntervalSet<T> {
    /// Creates a new, empty `IntervalSet`.
    #[inline]
    pub fn new() -> Self {
        Self {
            intervals: Vec::new(),
        }
    }

    /// Returns the number of disjoint intervals in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Returns `true` if the set contains no intervals.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Returns the intervals, sorted and disjoint.
    #[inline]
    pub fn as_slice(&self) -> &[Interval<T>] {
        &self.intervals
    }

    /// Index of the first interval whose start is `>= point`.
    #[inline]
    fn find_first_starting_at_or_after(&self, point: T) -> usize
    where
        T: Ord + Copy,
    {
        self.intervals
            .partition_point(|interval| interval.start() < point)
    }

    /// Index of the first interval whose end is `> point`.
    ///
    /// Everything before it ends at or before `point` and cannot overlap
    /// anything starting at `point`.
    #[inline]
    fn find_first_ending_after(&self, point: T) -> usize
    where
        T: Ord + Copy,
    {
        self.intervals
            .partition_point(|interval| interval.end() <= point)
    }

    /// Inserts a single interval, merging it with overlapping or adjacent
    /// neighbours. Empty intervals are ignored.
    pub fn insert_and_coalesce(&mut self, new_interval: Interval<T>)
    where
        T: Ord + Copy,
    {
        if new_interval.is_empty() {
            return;
        }

        let mut insertion_index = self.find_first_starting_at_or_after(new_interval.start());
        let intervals = &mut self.intervals;

        let mut merged_start = new_interval.start();
        let mut merged_end = new_interval.end();

        // Left neighbour overlapping or touching.
        if insertion_index > 0 && intervals[insertion_index - 1].end() >= merged_start {
            insertion_index -= 1;
            merged_start = intervals[insertion_index].start().min(merged_start);
            merged_end = intervals[insertion_index].end().max(merged_end);
        }

        let mut coalesce_scan_index = insertion_index;
        while coalesce_scan_index < intervals.len()
            && intervals[coalesce_scan_index].start() <= merged_end
        {
            merged_end = merged_end.max(intervals[coalesce_scan_index].end());
            coalesce_scan_index += 1;
        }

        let merged_interval = Interval::new(merged_start, merged_end);
        let num_merged = coalesce_scan_index - insertion_index;

        if insertion_index == intervals.len() {
            intervals.push(merged_interval);
        } else if num_merged == 0 {
            intervals.insert(insertion_index, merged_interval);
        } else {
            intervals[insertion_index] = merged_interval;
            if num_merged > 1 {
                intervals.drain(insertion_index + 1..coalesce_scan_index);
            }
        }
        debug_assert!(Self::are_invariants_held(&self.intervals));
    }

    /// Returns `true` if any interval in the set overlaps `query_interval`.
    ///
    /// An empty query never overlaps; a query that only touches a booked
    /// interval at its boundary does not overlap either.
    #[inline]
    pub fn overlaps(&self, query_interval: Interval<T>) -> bool
    where
        T: Ord + Copy,
    {
        if self.intervals.is_empty() || query_interval.is_empty() {
            return false;
        }
        let candidate_index = self.find_first_ending_after(query_interval.start());
        candidate_index < self.intervals.len()
            && self.intervals[candidate_index].start() < query_interval.end()
    }

    #[cfg(debug_assertions)]
    fn are_invariants_held(intervals: &[Interval<T>]) -> bool
    where
        T: Ord + Copy,
    {
        intervals.windows(2).all(|window| {
            window[0].start() < window[1].start() && window[0].end() < window[1].start()
        })
    }

    #[cfg(not(debug_assertions))]
    fn are_invariants_held(_intervals: &[Interval<T>]) -> bool {
        true
    }
}

impl<T> FromIterator<Interval<T>> for IntervalSet<T>
where
    T: Ord + Copy,
{
    fn from_iter<I: IntoIterator<Item = Interval<T>>>(iter: I) -> Self {
        let mut set = IntervalSet::new();
        for interval in iter {
            set.insert_and_coalesce(interval);
        }
        set
    }
}
