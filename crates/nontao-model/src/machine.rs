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

use crate::{
    err::DuplicateMachineError,
    id::{MachineId, ZoneId},
};
use nontao_core::geo::GeoPoint;
use std::collections::HashMap;

/// A site that hosts a fixed number of spots. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Machine {
    zone: ZoneId,
    id: MachineId,
    location: GeoPoint,
}

impl Machine {
    #[inline]
    pub fn new(zone: ZoneId, id: MachineId, location: GeoPoint) -> Self {
        Self { zone, id, location }
    }

    #[inline]
    pub fn zone(&self) -> &ZoneId {
        &self.zone
    }

    #[inline]
    pub fn id(&self) -> &MachineId {
        &self.id
    }

    #[inline]
    pub fn location(&self) -> GeoPoint {
        self.location
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.location.latitude
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.location.longitude
    }
}

/// The ordered set of machines a run works on.
///
/// Order is preserved as given; ids are unique.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Roster {
    machines: Vec<Machine>,
    index: HashMap<MachineId, usize>,
}

impl Roster {
    pub fn new(machines: Vec<Machine>) -> Result<Self, DuplicateMachineError> {
        let mut index = HashMap::with_capacity(machines.len());
        for (i, m) in machines.iter().enumerate() {
            if index.insert(m.id().clone(), i).is_some() {
                return Err(DuplicateMachineError::new(m.id().clone()));
            }
        }
        Ok(Self { machines, index })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.machines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Machine> {
        self.machines.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Machine] {
        &self.machines
    }

    /// Position of the machine in roster order.
    #[inline]
    pub fn position(&self, id: &MachineId) -> Option<usize> {
        self.index.get(id).copied()
    }

    #[inline]
    pub fn get(&self, id: &MachineId) -> Option<&Machine> {
        self.position(id).map(|i| &self.machines[i])
    }

    /// Distinct zones in order of first appearance.
    pub fn zones(&self) -> Vec<&ZoneId> {
        let mut seen: Vec<&ZoneId> = Vec::new();
        for m in &self.machines {
            if !seen.contains(&m.zone()) {
                seen.push(m.zone());
            }
        }
        seen
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Machine;
    type IntoIter = std::slice::Iter<'a, Machine>;

    fn into_iter(self) -> Self::IntoIter {
        self.machines.iter()
    }
}
