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

use nontao_model::id::{MachineId, SpotId};
use std::fmt::Display;

/// Failure to project events onto a snapshot panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelError {
    /// Spot count could not be inferred from an empty event table.
    NoEvents,
    ZeroSpots,
    UnknownMachine(MachineId),
    SpotOutOfRange {
        machine: MachineId,
        spot: SpotId,
        spots_per_machine: u32,
    },
}

impl Display for PanelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PanelError::NoEvents => {
                write!(f, "Cannot infer spots per machine from an empty event table")
            }
            PanelError::ZeroSpots => write!(f, "A panel needs at least one spot per machine"),
            PanelError::UnknownMachine(id) => {
                write!(f, "Event references machine {} which is not in the roster", id)
            }
            PanelError::SpotOutOfRange {
                machine,
                spot,
                spots_per_machine,
            } => write!(
                f,
                "Event on machine {} uses spot {} but machines have {} spots",
                machine, spot, spots_per_machine
            ),
        }
    }
}

impl std::error::Error for PanelError {}

/// Failure to estimate or rasterize a scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    EmptyPointSet,
    ZeroNeighbors,
    LengthMismatch { points: usize, values: usize },
    ResolutionTooSmall(usize),
}

impl Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldError::EmptyPointSet => write!(f, "EmptyPointSet: no observation points"),
            FieldError::ZeroNeighbors => write!(f, "k must be at least 1"),
            FieldError::LengthMismatch { points, values } => write!(
                f,
                "Field has {} points but {} values",
                points, values
            ),
            FieldError::ResolutionTooSmall(h) => write!(
                f,
                "Grid resolution {} is too small; at least 2 samples per axis are required",
                h
            ),
        }
    }
}

impl std::error::Error for FieldError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let e = PanelError::UnknownMachine(MachineId::new("n99"));
        assert!(e.to_string().contains("n99"));
        let e = PanelError::SpotOutOfRange {
            machine: MachineId::new("n01"),
            spot: SpotId::new(5),
            spots_per_machine: 4,
        };
        assert!(e.to_string().contains("spot 5"));
        assert!(FieldError::EmptyPointSet.to_string().starts_with("EmptyPointSet"));
    }
}
