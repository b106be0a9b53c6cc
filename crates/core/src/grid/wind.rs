//! Wind neighbourhoods
//!
//! Each wind mode maps to a fixed, ordered table of `(dy, dx)` offsets a
//! burning cell may ignite. Positive offsets point downwind.
//!
//! ```text
//! Calm            Unidirectional      DiagonalSpread
//!   . u .           . d .               . d . .
//!   u # u           d # f               d # f .
//!   . u .           . f .               . f f f
//!                                       . . f .
//! ```
//! `u` full strength (calm), `f` full strength downwind, `d` attenuated upwind.

use crate::core_types::WindMode;

/// Strength class of a neighbour offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reach {
    /// Spreads at the source cell's ignition probability
    Full,
    /// Spreads at the source probability times the wind decay factor
    Upwind,
}

impl Reach {
    /// Effective spread probability for this offset
    pub fn scale(&self, probability: f32, wind_decay_factor: f32) -> f32 {
        match self {
            Reach::Full => probability,
            Reach::Upwind => probability * wind_decay_factor,
        }
    }
}

/// One entry of a wind neighbourhood table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindOffset {
    pub dy: isize,
    pub dx: isize,
    pub reach: Reach,
}

const fn offset(dy: isize, dx: isize, reach: Reach) -> WindOffset {
    WindOffset { dy, dx, reach }
}

const CALM: [WindOffset; 4] = [
    offset(-1, 0, Reach::Full),
    offset(1, 0, Reach::Full),
    offset(0, -1, Reach::Full),
    offset(0, 1, Reach::Full),
];

const UNIDIRECTIONAL: [WindOffset; 4] = [
    offset(1, 0, Reach::Full),
    offset(0, 1, Reach::Full),
    offset(-1, 0, Reach::Upwind),
    offset(0, -1, Reach::Upwind),
];

const DIAGONAL_SPREAD: [WindOffset; 7] = [
    offset(1, 0, Reach::Full),
    offset(0, 1, Reach::Full),
    offset(-1, 0, Reach::Upwind),
    offset(0, -1, Reach::Upwind),
    offset(1, 1, Reach::Full),
    offset(1, 2, Reach::Full),
    offset(2, 1, Reach::Full),
];

/// Ordered neighbour offsets for a wind mode
pub const fn wind_offsets(mode: WindMode) -> &'static [WindOffset] {
    match mode {
        WindMode::Calm => &CALM,
        WindMode::Unidirectional => &UNIDIRECTIONAL,
        WindMode::DiagonalSpread => &DIAGONAL_SPREAD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calm_is_symmetric_full_strength() {
        let offsets = wind_offsets(WindMode::Calm);
        assert_eq!(offsets.len(), 4);
        assert!(offsets.iter().all(|o| o.reach == Reach::Full));
        let sum: (isize, isize) = offsets
            .iter()
            .fold((0, 0), |acc, o| (acc.0 + o.dy, acc.1 + o.dx));
        assert_eq!(sum, (0, 0));
    }

    #[test]
    fn test_upwind_offsets_are_attenuated() {
        for mode in [WindMode::Unidirectional, WindMode::DiagonalSpread] {
            for o in wind_offsets(mode) {
                let upwind = o.dy < 0 || o.dx < 0;
                assert_eq!(upwind, o.reach == Reach::Upwind, "{mode}: {o:?}");
            }
        }
    }

    #[test]
    fn test_diagonal_extends_unidirectional() {
        let uni = wind_offsets(WindMode::Unidirectional);
        let diag = wind_offsets(WindMode::DiagonalSpread);
        assert_eq!(&diag[..uni.len()], uni);
        assert!(diag.contains(&offset(2, 1, Reach::Full)));
        assert!(diag.contains(&offset(1, 2, Reach::Full)));
        assert!(diag.contains(&offset(1, 1, Reach::Full)));
    }

    #[test]
    fn test_reach_scale() {
        assert_eq!(Reach::Full.scale(0.8, 0.25), 0.8);
        assert_eq!(Reach::Upwind.scale(0.8, 0.25), 0.2);
        assert_eq!(Reach::Upwind.scale(0.8, 0.0), 0.0);
    }
}
