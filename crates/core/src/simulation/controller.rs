//! Simulation orchestration
//!
//! The controller owns the double-buffered grid pair, the statistics and the
//! run-level burnout flag. Each [`SimulationController::step`] advances exactly
//! one tick, then applies the extinguish policy:
//!
//! ```text
//!            no activity, reignite on
//!   RUNNING ───────────────────────────► EXTINGUISHED_REPEAT ──┐
//!      ▲                                                        │
//!      └──────────── random cell forced alight ◄────────────────┘
//!      │
//!      │ no activity, reignite off, (burned == 1 or rebirth == 0)
//!      ▼
//!  TERMINATED
//! ```
//!
//! Randomness is never owned here; callers thread an RNG handle through
//! seeding and stepping so a seed fully determines the run.

use crate::core_types::{Cell, SimulationParameters};
use crate::error::WildfireError;
use crate::grid::Grid;
use crate::simulation::rule::{FireRule, TickReport};
use crate::simulation::stats::{StatsSeries, StatsTracker};
use rand::Rng;
use tracing::{debug, info};

/// Lifecycle state of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationState {
    /// Fire (or regrowth) is in progress
    Running,
    /// The fire went out this tick and a random cell was reignited.
    /// Transient: the controller is back to `Running` afterwards.
    ExtinguishedRepeat,
    /// Absorbing end state; further steps are no-ops
    Terminated,
}

/// Drives a [`FireRule`] over a grid until termination
#[derive(Debug, Clone)]
pub struct SimulationController {
    rule: FireRule,
    /// Grid visible to callers
    current: Grid,
    /// Scratch buffer the rule writes into, swapped with `current` each tick
    next: Grid,
    stats: StatsTracker,
    state: SimulationState,
    tick: u64,
    /// Whether the burnout sentinel has been handed out this run
    burnout_marked: bool,
    last_report: TickReport,
}

impl SimulationController {
    /// Create a controller over an all-empty grid
    ///
    /// Call [`seed_random`](Self::seed_random) before stepping.
    ///
    /// # Errors
    /// Returns `InvalidParameter` for zero dimensions or invalid parameters.
    pub fn new(
        width: usize,
        height: usize,
        params: SimulationParameters,
    ) -> Result<Self, WildfireError> {
        let grid = Grid::new(width, height, Cell::empty(params.ignition_probability))?;
        Self::with_grid(grid, params)
    }

    /// Create a controller over a prepared grid
    ///
    /// Statistics are initialised by one scan and an initial snapshot is taken.
    ///
    /// # Errors
    /// Returns `InvalidParameter` if the parameters fail validation.
    pub fn with_grid(grid: Grid, params: SimulationParameters) -> Result<Self, WildfireError> {
        let rule = FireRule::new(params)?;
        let mut stats = StatsTracker::from_grid(&grid);
        stats.snapshot(0);
        let burnout_marked = grid.cells().iter().any(Cell::is_burnout_origin);

        info!(
            "Simulation created: {}x{} grid, wind={}, ignition={:.2}, rebirth={:.3}, reignite={}",
            grid.width(),
            grid.height(),
            params.wind_mode,
            params.ignition_probability,
            params.rebirth_probability,
            params.reignite
        );

        Ok(Self {
            rule,
            next: grid.clone(),
            current: grid,
            stats,
            state: SimulationState::Running,
            tick: 0,
            burnout_marked,
            last_report: TickReport::default(),
        })
    }

    /// Randomly populate the grid with `density` vegetation and start one fire
    ///
    /// Resets the tick counter, statistics and burnout flag, then records the
    /// initial snapshot. Returns the `(y, x)` of the first fire.
    ///
    /// # Errors
    /// Returns `InvalidParameter` for a density outside `(0, 1]` or one that
    /// never yields vegetation. The controller is unchanged on error.
    pub fn seed_random<R: Rng>(
        &mut self,
        density: f32,
        rng: &mut R,
    ) -> Result<(usize, usize), WildfireError> {
        let origin = self.current.seed_random(
            density,
            self.rule.params().ignition_probability,
            rng,
        )?;

        self.next.copy_from(&self.current);
        self.stats = StatsTracker::from_grid(&self.current);
        self.stats.snapshot(0);
        self.state = SimulationState::Running;
        self.tick = 0;
        self.burnout_marked = false;
        self.last_report = TickReport::default();

        info!(
            "Seeded grid at density {:.2}: {} vegetation, {} empty, fire at ({}, {})",
            density,
            self.stats.survived(),
            self.stats.obstacles(),
            origin.0,
            origin.1
        );
        Ok(origin)
    }

    /// Force the cell at `(y, x)` alight with the base ignition probability
    ///
    /// Works on any phase, which is how the reignite policy restarts a fire on
    /// a fully burned grid.
    ///
    /// # Errors
    /// Returns `OutOfRange` if the coordinate is outside the grid.
    pub fn ignite_at(&mut self, y: usize, x: usize) -> Result<(), WildfireError> {
        self.current.at(y, x)?;
        self.force_ignite(y, x);
        Ok(())
    }

    /// Set an in-bounds cell burning and keep the counters in step
    fn force_ignite(&mut self, y: usize, x: usize) {
        let cell = self.current.cell_mut(y, x);
        let previous = *cell;
        *cell = Cell::ignited(self.rule.params().ignition_probability);
        self.stats.record_forced_ignition(&previous);
    }

    /// Advance one tick and apply the extinguish policy
    ///
    /// Returns `ExtinguishedRepeat` on the tick a reignition happened,
    /// otherwise the controller's state after the tick. Once `Terminated`,
    /// further calls do nothing.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> SimulationState {
        if self.state == SimulationState::Terminated {
            return SimulationState::Terminated;
        }

        let report = self.rule.advance(
            &self.current,
            &mut self.next,
            rng,
            &mut self.stats,
            &mut self.burnout_marked,
        );
        std::mem::swap(&mut self.current, &mut self.next);
        self.tick += 1;
        self.last_report = report;

        debug!(
            "Tick {}: burning={}, ignitions={}, burnouts={}, decays={}, regrowths={}",
            self.tick,
            report.burning,
            report.ignitions,
            report.burnouts,
            report.decays,
            report.regrowths
        );

        let params = *self.rule.params();
        let mut outcome = SimulationState::Running;
        if !report.activity {
            if params.reignite {
                let y = rng.random_range(0..self.current.height());
                let x = rng.random_range(0..self.current.width());
                self.force_ignite(y, x);
                info!("Fire extinguished at tick {}, reigniting ({}, {})", self.tick, y, x);
                outcome = SimulationState::ExtinguishedRepeat;
            } else if self.stats.burned() == 1 || !params.rebirth_enabled() {
                outcome = SimulationState::Terminated;
            }
        }

        self.stats.snapshot(self.tick);
        if outcome == SimulationState::Terminated {
            self.stats.snapshot(self.tick);
            info!(
                "Simulation terminated at tick {}: burned={}, survived={}, obstacles={}",
                self.tick,
                self.stats.burned(),
                self.stats.survived(),
                self.stats.obstacles()
            );
            self.state = SimulationState::Terminated;
        } else {
            self.state = SimulationState::Running;
        }
        outcome
    }

    /// Step until terminated or `max_ticks` ticks have run
    ///
    /// Returns the number of ticks advanced by this call.
    pub fn run<R: Rng>(&mut self, rng: &mut R, max_ticks: u64) -> u64 {
        let start = self.tick;
        while self.tick - start < max_ticks && !self.is_terminated() {
            self.step(rng);
        }
        self.tick - start
    }

    pub fn grid(&self) -> &Grid {
        &self.current
    }

    pub fn params(&self) -> &SimulationParameters {
        self.rule.params()
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn is_terminated(&self) -> bool {
        self.state == SimulationState::Terminated
    }

    /// Ticks advanced since seeding
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    pub fn series(&self) -> &StatsSeries {
        self.stats.series()
    }

    /// Report of the most recent tick
    pub fn last_report(&self) -> &TickReport {
        &self.last_report
    }

    /// Whether the burnout sentinel has been assigned this run
    pub fn burnout_marked(&self) -> bool {
        self.burnout_marked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::cell::BURNOUT_SENTINEL;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn single_fire(params: SimulationParameters) -> SimulationController {
        let mut grid = Grid::new(1, 1, Cell::vegetation(1.0)).unwrap();
        grid.set(0, 0, Cell::ignited(1.0)).unwrap();
        SimulationController::with_grid(grid, params).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_configuration() {
        assert!(SimulationController::new(0, 4, SimulationParameters::default()).is_err());
        let params = SimulationParameters::default().with_ignition_probability(2.0);
        assert!(SimulationController::new(4, 4, params).is_err());
    }

    #[test]
    fn test_seed_takes_initial_snapshot() {
        let mut sim = SimulationController::new(10, 8, SimulationParameters::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let (y, x) = sim.seed_random(0.7, &mut rng).unwrap();

        assert!(sim.grid().at(y, x).unwrap().is_burning());
        assert_eq!(sim.tick(), 0);
        assert_eq!(sim.series().len(), 1);
        let first = sim.series().snapshots()[0];
        assert_eq!(first.tick, 0);
        assert_eq!(first.burned, 0);
        assert_eq!(first.survived + first.obstacles, 79);
    }

    #[test]
    fn test_seed_error_leaves_controller_untouched() {
        let mut sim = SimulationController::new(4, 4, SimulationParameters::default()).unwrap();
        let before = sim.grid().clone();
        assert!(sim.seed_random(0.0, &mut StdRng::seed_from_u64(1)).is_err());
        assert_eq!(sim.grid(), &before);
        assert_eq!(sim.series().len(), 1);
    }

    #[test]
    fn test_single_cell_terminates_without_rebirth() {
        let params = SimulationParameters::default()
            .with_burn_duration(1)
            .with_burned_duration(3)
            .with_rebirth_probability(0.0);
        let mut sim = single_fire(params);
        let mut rng = StdRng::seed_from_u64(5);

        // Tick 1 burns out into the sentinel, tick 2 sees no activity
        assert_eq!(sim.step(&mut rng), SimulationState::Running);
        assert_eq!(sim.grid().at(0, 0).unwrap().kind, BURNOUT_SENTINEL);
        assert!(sim.burnout_marked());
        assert_eq!(sim.step(&mut rng), SimulationState::Terminated);
        assert!(sim.is_terminated());

        // Initial + two ticks + final
        let ticks = sim.series().ticks();
        assert_eq!(ticks, vec![0, 1, 2, 2]);

        // Further steps are no-ops
        assert_eq!(sim.step(&mut rng), SimulationState::Terminated);
        assert_eq!(sim.tick(), 2);
        assert_eq!(sim.series().len(), 4);
    }

    #[test]
    fn test_single_burned_cell_terminates_even_with_rebirth() {
        let params = SimulationParameters::default()
            .with_burn_duration(1)
            .with_burned_duration(50)
            .with_rebirth_probability(0.5);
        let mut sim = single_fire(params);
        let mut rng = StdRng::seed_from_u64(5);

        sim.step(&mut rng);
        assert_eq!(sim.stats().burned(), 1);
        assert_eq!(sim.step(&mut rng), SimulationState::Terminated);
    }

    #[test]
    fn test_reignite_restarts_fire() {
        let params = SimulationParameters::default()
            .with_burn_duration(1)
            .with_rebirth_probability(0.0)
            .with_reignite(true);
        let mut sim = single_fire(params);
        let mut rng = StdRng::seed_from_u64(11);

        assert_eq!(sim.step(&mut rng), SimulationState::Running);
        assert_eq!(sim.step(&mut rng), SimulationState::ExtinguishedRepeat);
        assert_eq!(sim.state(), SimulationState::Running);
        assert!(sim.grid().at(0, 0).unwrap().is_burning());
        assert_eq!(sim.stats().burning(), 1);
        assert_eq!(sim.stats().burned(), 0);
    }

    #[test]
    fn test_reignition_keeps_counters_in_step() {
        let params = SimulationParameters::default()
            .with_ignition_probability(0.7)
            .with_rebirth_probability(0.0)
            .with_reignite(true);
        let grid = Grid::new(3, 3, Cell::empty(0.7)).unwrap();
        let mut sim = SimulationController::with_grid(grid, params).unwrap();
        let mut rng = StdRng::seed_from_u64(4);

        assert_eq!(sim.step(&mut rng), SimulationState::ExtinguishedRepeat);
        assert_eq!(sim.grid().count(Cell::is_burning), 1);
        let lit = sim.grid().cells().iter().find(|c| c.is_burning()).unwrap();
        assert_eq!(*lit, Cell::ignited(0.7));
        assert_eq!(sim.stats().burning(), 1);
        assert_eq!(sim.stats().obstacles(), sim.grid().count(Cell::is_empty));
        assert_eq!(sim.stats().obstacles(), 8);
    }

    #[test]
    fn test_ignite_at_out_of_range() {
        let mut sim = single_fire(SimulationParameters::default());
        assert!(matches!(
            sim.ignite_at(1, 0),
            Err(WildfireError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_run_respects_tick_cap() {
        let params = SimulationParameters::regrowth();
        let mut sim = SimulationController::new(12, 12, params).unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        sim.seed_random(0.6, &mut rng).unwrap();

        assert_eq!(sim.run(&mut rng, 40), 40);
        assert_eq!(sim.tick(), 40);
        assert!(!sim.is_terminated());
        assert_eq!(sim.series().len(), 41);
    }
}
