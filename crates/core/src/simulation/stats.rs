//! Area bookkeeping over time
//!
//! Counters are maintained incrementally from the transitions the rule
//! reports, so a tick never pays for a second full-grid scan. At any moment:
//!
//! - `burned`    = cells with `kind < 0` (ash, including the burnout origin)
//! - `survived`  = cells with `kind == 1`
//! - `obstacles` = cells with `kind == 0`
//! - `burning`   = cells with `kind >= 2`
//!
//! so `burned + survived + obstacles == cells - burning`.

use crate::core_types::Cell;
use crate::grid::Grid;
use serde::{Deserialize, Serialize};

/// Counter values at the end of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub tick: u64,
    pub burned: usize,
    pub survived: usize,
    pub obstacles: usize,
}

/// Ordered snapshots, one per tick plus the initial and final ones
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSeries {
    snapshots: Vec<StatsSnapshot>,
}

impl StatsSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, snapshot: StatsSnapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn snapshots(&self) -> &[StatsSnapshot] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn last(&self) -> Option<&StatsSnapshot> {
        self.snapshots.last()
    }

    /// Tick index of every snapshot
    pub fn ticks(&self) -> Vec<u64> {
        self.snapshots.iter().map(|s| s.tick).collect()
    }

    /// Burned-area series for plotting
    pub fn burned(&self) -> Vec<usize> {
        self.snapshots.iter().map(|s| s.burned).collect()
    }

    /// Surviving-vegetation series for plotting
    pub fn survived(&self) -> Vec<usize> {
        self.snapshots.iter().map(|s| s.survived).collect()
    }

    /// Obstacle-count series for plotting
    pub fn obstacles(&self) -> Vec<usize> {
        self.snapshots.iter().map(|s| s.obstacles).collect()
    }
}

/// Running burned/survived/obstacle counters plus their time series
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsTracker {
    burned: usize,
    survived: usize,
    obstacles: usize,
    burning: usize,
    series: StatsSeries,
}

impl StatsTracker {
    /// Initialise the counters with one scan of the grid
    pub fn from_grid(grid: &Grid) -> Self {
        let mut tracker = Self {
            burned: 0,
            survived: 0,
            obstacles: 0,
            burning: 0,
            series: StatsSeries::new(),
        };
        for cell in grid.cells() {
            *tracker.bucket_mut(cell) += 1;
        }
        tracker
    }

    pub fn burned(&self) -> usize {
        self.burned
    }

    pub fn survived(&self) -> usize {
        self.survived
    }

    pub fn obstacles(&self) -> usize {
        self.obstacles
    }

    /// Cells currently on fire (not part of any area bucket)
    pub fn burning(&self) -> usize {
        self.burning
    }

    /// Counter values tagged with a tick index
    pub fn current(&self, tick: u64) -> StatsSnapshot {
        StatsSnapshot {
            tick,
            burned: self.burned,
            survived: self.survived,
            obstacles: self.obstacles,
        }
    }

    /// Append the current counters to the series
    pub fn snapshot(&mut self, tick: u64) {
        let snapshot = self.current(tick);
        self.series.push(snapshot);
    }

    pub fn series(&self) -> &StatsSeries {
        &self.series
    }

    pub fn into_series(self) -> StatsSeries {
        self.series
    }

    /// Vegetation caught fire
    pub(crate) fn record_ignition(&mut self) {
        self.survived -= 1;
        self.burning += 1;
    }

    /// Burning cell turned to ash
    pub(crate) fn record_burnout(&mut self) {
        self.burning -= 1;
        self.burned += 1;
    }

    /// Ash finished counting down to bare ground
    pub(crate) fn record_decay(&mut self) {
        self.burned -= 1;
        self.obstacles += 1;
    }

    /// Bare ground regrew vegetation
    pub(crate) fn record_regrowth(&mut self) {
        self.obstacles -= 1;
        self.survived += 1;
    }

    /// A cell of any phase was forced alight from outside the rule
    pub(crate) fn record_forced_ignition(&mut self, previous: &Cell) {
        if previous.is_burning() {
            return;
        }
        *self.bucket_mut(previous) -= 1;
        self.burning += 1;
    }

    fn bucket_mut(&mut self, cell: &Cell) -> &mut usize {
        if cell.is_burning() {
            &mut self.burning
        } else if cell.is_vegetation() {
            &mut self.survived
        } else if cell.is_empty() {
            &mut self.obstacles
        } else {
            &mut self.burned
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::cell::BURNOUT_SENTINEL;

    fn mixed_grid() -> Grid {
        let mut grid = Grid::new(3, 2, Cell::vegetation(0.8)).unwrap();
        grid.set(0, 0, Cell::empty(0.8)).unwrap();
        grid.set(0, 1, Cell::ignited(0.8)).unwrap();
        grid.set(1, 0, Cell::new(-4, 0.8)).unwrap();
        grid.set(1, 1, Cell::new(BURNOUT_SENTINEL, 0.8)).unwrap();
        grid
    }

    #[test]
    fn test_from_grid_counts_every_phase() {
        let tracker = StatsTracker::from_grid(&mixed_grid());
        assert_eq!(tracker.obstacles(), 1);
        assert_eq!(tracker.burning(), 1);
        assert_eq!(tracker.burned(), 2);
        assert_eq!(tracker.survived(), 2);
        assert!(tracker.series().is_empty());
    }

    #[test]
    fn test_transitions_conserve_cells() {
        let mut tracker = StatsTracker::from_grid(&mixed_grid());
        let total = |t: &StatsTracker| t.burned() + t.survived() + t.obstacles() + t.burning();
        assert_eq!(total(&tracker), 6);

        tracker.record_ignition();
        tracker.record_burnout();
        tracker.record_decay();
        tracker.record_regrowth();
        tracker.record_forced_ignition(&Cell::empty(0.8));
        tracker.record_forced_ignition(&Cell::new(-1, 0.8));
        assert_eq!(total(&tracker), 6);
        assert_eq!(tracker.burning(), 3);
    }

    #[test]
    fn test_forced_ignition_of_burning_cell_is_noop() {
        let mut tracker = StatsTracker::from_grid(&mixed_grid());
        let before = tracker.current(0);
        tracker.record_forced_ignition(&Cell::new(4, 0.8));
        assert_eq!(tracker.current(0), before);
        assert_eq!(tracker.burning(), 1);
    }

    #[test]
    fn test_series_accessors() {
        let mut tracker = StatsTracker::from_grid(&mixed_grid());
        tracker.snapshot(0);
        tracker.record_burnout();
        tracker.snapshot(1);

        let series = tracker.into_series();
        assert_eq!(series.len(), 2);
        assert_eq!(series.ticks(), vec![0, 1]);
        assert_eq!(series.burned(), vec![2, 3]);
        assert_eq!(series.survived(), vec![2, 2]);
        assert_eq!(series.obstacles(), vec![1, 1]);
        assert_eq!(series.last().map(|s| s.tick), Some(1));
    }
}
