//! Per-location cell state
//!
//! The phase of a cell is encoded in a single integer `kind`:
//!
//! ```text
//! 0            empty ground / obstacle
//! 1            unburned vegetation
//! k >= 2       burning, age = k - 2 ticks
//! -n .. -1     ash, counting up towards 0
//! SENTINEL     ash of the first cell in the run to burn out
//! ```
//!
//! Legal phase order: `1 -> 2 -> ... -> 2 + burn -> -burned (or SENTINEL) -> ... -> -1 -> 0 -> 1`.

use serde::{Deserialize, Serialize};

/// Empty ground, nothing to burn.
pub const EMPTY: i32 = 0;

/// Unburned combustible vegetation.
pub const VEGETATION: i32 = 1;

/// Kind of a freshly ignited cell (burn age 0).
pub const IGNITED: i32 = 2;

/// Marks the first cell of a run to complete its burn cycle.
///
/// Disjoint from every reachable countdown value because burned durations are
/// capped well below `i32::MAX`.
pub const BURNOUT_SENTINEL: i32 = i32::MIN;

/// State of a single grid location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Integer-encoded phase (see module docs)
    pub kind: i32,
    /// Chance of igniting a flammable neighbour while this cell burns.
    /// Inherited from whichever neighbour ignited it.
    pub ignition_probability: f32,
}

impl Cell {
    /// Create a cell with the given kind and ignition probability
    pub const fn new(kind: i32, ignition_probability: f32) -> Self {
        Self {
            kind,
            ignition_probability,
        }
    }

    /// Empty ground
    pub const fn empty(ignition_probability: f32) -> Self {
        Self::new(EMPTY, ignition_probability)
    }

    /// Unburned vegetation
    pub const fn vegetation(ignition_probability: f32) -> Self {
        Self::new(VEGETATION, ignition_probability)
    }

    /// Freshly ignited cell that spreads with `ignition_probability`
    pub const fn ignited(ignition_probability: f32) -> Self {
        Self::new(IGNITED, ignition_probability)
    }

    pub const fn is_empty(&self) -> bool {
        self.kind == EMPTY
    }

    pub const fn is_vegetation(&self) -> bool {
        self.kind == VEGETATION
    }

    pub const fn is_burning(&self) -> bool {
        self.kind >= IGNITED
    }

    /// Ash that is still counting down (the sentinel never counts down)
    pub const fn is_ash(&self) -> bool {
        self.kind < 0 && self.kind != BURNOUT_SENTINEL
    }

    pub const fn is_burnout_origin(&self) -> bool {
        self.kind == BURNOUT_SENTINEL
    }

    /// Ticks spent burning, `None` if the cell is not on fire
    pub const fn burn_age(&self) -> Option<i32> {
        if self.is_burning() {
            Some(self.kind - IGNITED)
        } else {
            None
        }
    }
}
