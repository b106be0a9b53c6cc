//! Fire transition rule
//!
//! One call to [`FireRule::advance`] evaluates every cell of the current grid
//! in row-major order and writes the result into a separate next buffer, so a
//! cell ignited earlier in the scan never looks "already burning" to cells
//! processed later in the same tick.
//!
//! # Per-cell logic (against the previous tick)
//!
//! - Burning: try each wind neighbour that was vegetation with its own uniform
//!   draw; on success the neighbour ignites and inherits the (possibly
//!   attenuated) probability. A neighbour shared by several fires is drawn
//!   for once per fire and keeps the probability of the last success. Then
//!   age by one; at `2 + burn_duration` turn to ash, or to the burnout
//!   sentinel if no cell has burned out yet this run.
//! - Ash (rebirth enabled): count up by one; reaching zero frees the ground.
//! - Empty (rebirth enabled): regrow vegetation with `rebirth_probability`.
//! - Anything else is left alone apart from ignitions written by neighbours.

use crate::core_types::cell::{BURNOUT_SENTINEL, EMPTY, IGNITED, VEGETATION};
use crate::core_types::{Cell, SimulationParameters};
use crate::error::WildfireError;
use crate::grid::Grid;
use crate::simulation::stats::StatsTracker;
use rand::Rng;

/// Transition counts for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// At least one cell was burning during the evaluation pass
    pub activity: bool,
    /// Cells that were burning during the pass
    pub burning: usize,
    /// Vegetation ignited by a neighbour
    pub ignitions: usize,
    /// Burning cells that turned to ash
    pub burnouts: usize,
    /// Ash cells that counted down to bare ground
    pub decays: usize,
    /// Bare ground that regrew vegetation
    pub regrowths: usize,
}

/// The cellular-automaton transition function
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireRule {
    params: SimulationParameters,
}

impl FireRule {
    /// Create a rule from validated parameters
    ///
    /// # Errors
    /// Returns `InvalidParameter` if any parameter fails validation.
    pub fn new(params: SimulationParameters) -> Result<Self, WildfireError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    /// Compute the next tick from `current` into `next`
    ///
    /// `next` is overwritten entirely and must have the same dimensions as
    /// `current`. `burnout_marked` records whether the run's burnout sentinel
    /// has been handed out; the first cell in row-major order to burn out
    /// while it is `false` receives the sentinel and sets it.
    ///
    /// # Panics
    /// Panics if `next` and `current` differ in dimensions.
    pub fn advance<R: Rng>(
        &self,
        current: &Grid,
        next: &mut Grid,
        rng: &mut R,
        stats: &mut StatsTracker,
        burnout_marked: &mut bool,
    ) -> TickReport {
        assert_eq!(
            (current.width(), current.height()),
            (next.width(), next.height()),
            "next buffer must match the current grid"
        );

        let params = &self.params;
        let burnout_kind = params.burnout_kind();
        let rebirth = params.rebirth_enabled();
        let mut report = TickReport::default();

        next.copy_from(current);

        for y in 0..current.height() {
            for x in 0..current.width() {
                let cell = current.cell(y, x);

                if cell.kind >= IGNITED {
                    report.activity = true;
                    report.burning += 1;
                    report.ignitions += self.spread(current, next, rng, stats, y, x, cell);

                    let aged = cell.kind + 1;
                    let kind = if aged >= burnout_kind {
                        report.burnouts += 1;
                        stats.record_burnout();
                        if *burnout_marked {
                            params.ash_kind()
                        } else {
                            *burnout_marked = true;
                            BURNOUT_SENTINEL
                        }
                    } else {
                        aged
                    };
                    next.cell_mut(y, x).kind = kind;
                } else if cell.kind < EMPTY && cell.kind != BURNOUT_SENTINEL && rebirth {
                    let kind = cell.kind + 1;
                    if kind == EMPTY {
                        report.decays += 1;
                        stats.record_decay();
                    }
                    next.cell_mut(y, x).kind = kind;
                } else if cell.kind == EMPTY
                    && rebirth
                    && rng.random::<f32>() < params.rebirth_probability
                {
                    report.regrowths += 1;
                    stats.record_regrowth();
                    *next.cell_mut(y, x) = Cell::vegetation(params.ignition_probability);
                }
            }
        }

        report
    }

    /// Let the burning cell at `(y, x)` try to ignite its wind neighbours.
    /// Returns the number of ignitions.
    #[allow(clippy::too_many_arguments)]
    fn spread<R: Rng>(
        &self,
        current: &Grid,
        next: &mut Grid,
        rng: &mut R,
        stats: &mut StatsTracker,
        y: usize,
        x: usize,
        source: Cell,
    ) -> usize {
        let mut ignitions = 0;
        for neighbor in current.neighbors(y, x, self.params.wind_mode) {
            // Vegetation as of last tick, even if already lit this tick
            if current.cell(neighbor.y, neighbor.x).kind != VEGETATION {
                continue;
            }

            let probability = neighbor
                .reach
                .scale(source.ignition_probability, self.params.wind_decay_factor);
            if rng.random::<f32>() < probability {
                let target = next.cell_mut(neighbor.y, neighbor.x);
                if target.kind == VEGETATION {
                    stats.record_ignition();
                    ignitions += 1;
                }
                *target = Cell::ignited(probability);
            }
        }
        ignitions
    }
}
