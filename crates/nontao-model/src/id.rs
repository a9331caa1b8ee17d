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

/// Categorical zone label, e.g. `1A`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZoneId(String);

impl ZoneId {
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        ZoneId(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ZoneId {
    fn from(value: &str) -> Self {
        ZoneId::new(value)
    }
}

impl From<String> for ZoneId {
    fn from(value: String) -> Self {
        ZoneId(value)
    }
}

/// Unique machine label, e.g. `n07`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MachineId(String);

impl MachineId {
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        MachineId(id.into())
    }

    /// The sequential label used by the roster generator: `n` followed by
    /// the 1-based `index` zero-padded to the digit count of `total`.
    ///
    /// ```
    /// use nontao_model::id::MachineId;
    ///
    /// assert_eq!(MachineId::sequential(7, 50).as_str(), "n07");
    /// assert_eq!(MachineId::sequential(7, 9).as_str(), "n7");
    /// assert_eq!(MachineId::sequential(42, 100).as_str(), "n042");
    /// ```
    pub fn sequential(index: usize, total: usize) -> Self {
        let width = total.max(1).to_string().len();
        MachineId(format!("n{:0width$}", index, width = width))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MachineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MachineId {
    fn from(value: &str) -> Self {
        MachineId::new(value)
    }
}

/// 1-based index of a parallel occupancy channel on a machine.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpotId(u32);

impl SpotId {
    #[inline]
    pub const fn new(spot: u32) -> Self {
        SpotId(spot)
    }

    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// `1..=count`, the spots of a machine with `count` channels.
    #[inline]
    pub fn range(count: u32) -> impl Iterator<Item = SpotId> {
        (1..=count).map(SpotId)
    }

    /// Position of this spot in a zero-based array.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl Display for SpotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SpotId {
    fn from(value: u32) -> Self {
        SpotId(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_sort_like_their_index() {
        let ids: Vec<_> = (1..=50).map(|i| MachineId::sequential(i, 50)).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert_eq!(ids[0].as_str(), "n01");
        assert_eq!(ids[49].as_str(), "n50");
    }

    #[test]
    fn spot_range_is_one_based() {
        let spots: Vec<_> = SpotId::range(4).map(SpotId::value).collect();
        assert_eq!(spots, vec![1, 2, 3, 4]);
        assert_eq!(SpotId::new(1).index(), 0);
    }
}
