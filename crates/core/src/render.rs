//! Colour classification for renderers
//!
//! Renderers only ever see one of five categories per cell. Everything else
//! about the cell (age, inherited probability, countdown) stays internal.

use crate::core_types::cell::{Cell, BURNOUT_SENTINEL, EMPTY, IGNITED, VEGETATION};

/// Display category of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellCategory {
    /// `kind >= 2`
    Burning,
    /// `kind == 1`
    Unburned,
    /// `kind == 0`
    Empty,
    /// `kind < 0`, still counting down
    Ash,
    /// First cell of the run to burn out
    BurnoutOrigin,
}

impl CellCategory {
    /// Classify a raw cell kind
    pub const fn from_kind(kind: i32) -> Self {
        match kind {
            BURNOUT_SENTINEL => CellCategory::BurnoutOrigin,
            EMPTY => CellCategory::Empty,
            VEGETATION => CellCategory::Unburned,
            k if k >= IGNITED => CellCategory::Burning,
            _ => CellCategory::Ash,
        }
    }

    pub const fn of(cell: &Cell) -> Self {
        Self::from_kind(cell.kind)
    }

    /// Fixed RGB palette
    pub const fn rgb(&self) -> (u8, u8, u8) {
        match self {
            CellCategory::Burning => (255, 0, 0),
            CellCategory::Unburned => (0, 204, 0),
            CellCategory::Empty => (160, 82, 45),
            CellCategory::Ash => (0, 0, 0),
            CellCategory::BurnoutOrigin => (255, 255, 255),
        }
    }

    /// Single character for text frames
    pub const fn glyph(&self) -> char {
        match self {
            CellCategory::Burning => '*',
            CellCategory::Unburned => '^',
            CellCategory::Empty => '.',
            CellCategory::Ash => '#',
            CellCategory::BurnoutOrigin => '@',
        }
    }
}
