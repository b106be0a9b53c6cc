//! Rectangular grid of cells
//!
//! Cells are stored row-major in a flat `Vec`: `[y * width + x]`. All public
//! coordinate access is bounds-checked; neighbour lookup silently skips
//! offsets that fall off the edge.

use crate::core_types::cell::{Cell, EMPTY, IGNITED, VEGETATION};
use crate::core_types::params::check_probability;
use crate::core_types::WindMode;
use crate::error::WildfireError;
use crate::grid::wind::{wind_offsets, Reach};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Seeding gives up after this many empty rolls
const MAX_SEED_ATTEMPTS: usize = 1000;

/// In-bounds neighbour produced by [`Grid::neighbors`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    pub y: usize,
    pub x: usize,
    pub reach: Reach,
}

/// Fixed-size 2D container of cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridData")]
pub struct Grid {
    width: usize,
    height: usize,
    /// Cells in row-major order: [y * width + x]
    cells: Vec<Cell>,
}

/// Unchecked serialized form, validated into a [`Grid`]
#[derive(Deserialize)]
struct GridData {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl TryFrom<GridData> for Grid {
    type Error = WildfireError;

    fn try_from(data: GridData) -> Result<Self, Self::Error> {
        let mut grid = Grid::new(data.width, data.height, Cell::empty(0.0))?;
        if data.cells.len() != grid.len() {
            return Err(WildfireError::invalid_parameter(
                "cells",
                format!(
                    "expected {} cells for a {}x{} grid, got {}",
                    grid.len(),
                    data.width,
                    data.height,
                    data.cells.len()
                ),
            ));
        }
        grid.cells = data.cells;
        Ok(grid)
    }
}

impl Grid {
    /// Create a grid with every cell set to `fill`
    ///
    /// # Errors
    /// Returns `InvalidParameter` if either dimension is zero.
    pub fn new(width: usize, height: usize, fill: Cell) -> Result<Self, WildfireError> {
        if width == 0 {
            return Err(WildfireError::invalid_parameter("width", "must be positive"));
        }
        if height == 0 {
            return Err(WildfireError::invalid_parameter("height", "must be positive"));
        }
        let total = width.checked_mul(height).ok_or_else(|| {
            WildfireError::invalid_parameter("width", "grid size overflows the address space")
        })?;

        Ok(Self {
            width,
            height,
            cells: vec![fill; total],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false, grids have positive dimensions
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// One row of cells
    ///
    /// # Errors
    /// Returns `OutOfRange` if `y >= height`.
    pub fn row(&self, y: usize) -> Result<&[Cell], WildfireError> {
        if y >= self.height {
            return Err(self.out_of_range(y, 0));
        }
        let start = y * self.width;
        Ok(&self.cells[start..start + self.width])
    }

    pub fn contains(&self, y: usize, x: usize) -> bool {
        y < self.height && x < self.width
    }

    /// Cell at `(y, x)`
    ///
    /// # Errors
    /// Returns `OutOfRange` if the coordinate is outside the grid.
    pub fn at(&self, y: usize, x: usize) -> Result<Cell, WildfireError> {
        self.index(y, x).map(|idx| self.cells[idx])
    }

    /// Overwrite the cell at `(y, x)`
    ///
    /// # Errors
    /// Returns `OutOfRange` if the coordinate is outside the grid.
    pub fn set(&mut self, y: usize, x: usize, cell: Cell) -> Result<(), WildfireError> {
        let idx = self.index(y, x)?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Number of cells matching a predicate (full scan)
    pub fn count(&self, predicate: impl Fn(&Cell) -> bool) -> usize {
        self.cells.iter().filter(|c| predicate(c)).count()
    }

    /// In-bounds neighbours of `(y, x)` for a wind mode, in table order
    pub fn neighbors(
        &self,
        y: usize,
        x: usize,
        wind_mode: WindMode,
    ) -> impl Iterator<Item = Neighbor> + '_ {
        wind_offsets(wind_mode).iter().filter_map(move |o| {
            let ny = y.checked_add_signed(o.dy)?;
            let nx = x.checked_add_signed(o.dx)?;
            self.contains(ny, nx).then_some(Neighbor {
                y: ny,
                x: nx,
                reach: o.reach,
            })
        })
    }

    /// Randomly populate the grid and start a fire
    ///
    /// Each cell becomes vegetation with probability `density`, otherwise empty.
    /// One vegetation cell, chosen uniformly, is then ignited with
    /// `ignition_probability`. If a roll produces no vegetation the whole grid
    /// is re-rolled.
    ///
    /// Returns the `(y, x)` of the ignited cell.
    ///
    /// # Errors
    /// Returns `InvalidParameter` if `density` or `ignition_probability` is not
    /// a probability, if `density` is zero, or if repeated rolls never produce a
    /// vegetation cell. The grid is unchanged on error.
    pub fn seed_random<R: Rng>(
        &mut self,
        density: f32,
        ignition_probability: f32,
        rng: &mut R,
    ) -> Result<(usize, usize), WildfireError> {
        check_probability("density", density)?;
        check_probability("ignition_probability", ignition_probability)?;
        if density == 0.0 {
            return Err(WildfireError::invalid_parameter(
                "density",
                "must be above zero to produce combustible cells",
            ));
        }

        let mut rolled = Vec::with_capacity(self.cells.len());
        for attempt in 0..MAX_SEED_ATTEMPTS {
            rolled.clear();
            rolled.extend((0..self.cells.len()).map(|_| {
                let kind = if rng.random::<f32>() < density {
                    VEGETATION
                } else {
                    EMPTY
                };
                Cell::new(kind, ignition_probability)
            }));

            let combustible: Vec<usize> = rolled
                .iter()
                .enumerate()
                .filter(|(_, c)| c.is_vegetation())
                .map(|(idx, _)| idx)
                .collect();
            if combustible.is_empty() {
                debug!("Seed roll {} produced no vegetation, re-rolling", attempt);
                continue;
            }

            let origin = combustible[rng.random_range(0..combustible.len())];
            rolled[origin] = Cell::ignited(ignition_probability);
            std::mem::swap(&mut self.cells, &mut rolled);

            let (y, x) = (origin / self.width, origin % self.width);
            debug!(
                "Seeded {}x{} grid: {} combustible cells, fire at ({}, {})",
                self.width,
                self.height,
                combustible.len(),
                y,
                x
            );
            return Ok((y, x));
        }

        warn!(
            "No vegetation after {} seed rolls at density {}",
            MAX_SEED_ATTEMPTS, density
        );
        Err(WildfireError::invalid_parameter(
            "density",
            format!("{density} produced no combustible cells after {MAX_SEED_ATTEMPTS} attempts"),
        ))
    }

    /// Stamp a rectangular pattern of kinds with its top-left corner at `(top, left)`
    ///
    /// Kinds must be empty (0), vegetation (1) or ignited (2). Ignited cells
    /// spread with `ignition_probability`. Rows may differ in length.
    ///
    /// # Errors
    /// Returns `OutOfRange` if any part of the block falls outside the grid and
    /// `InvalidParameter` for any other kind. Nothing is written on error.
    pub fn place_block<R: AsRef<[i32]>>(
        &mut self,
        top: usize,
        left: usize,
        block: &[R],
        ignition_probability: f32,
    ) -> Result<(), WildfireError> {
        check_probability("ignition_probability", ignition_probability)?;
        for (dy, row) in block.iter().enumerate() {
            for (dx, &kind) in row.as_ref().iter().enumerate() {
                self.index(top.saturating_add(dy), left.saturating_add(dx))?;
                if !(EMPTY..=IGNITED).contains(&kind) {
                    return Err(WildfireError::invalid_parameter(
                        "block",
                        format!("kind {kind} at ({dy}, {dx}) must be 0, 1 or 2"),
                    ));
                }
            }
        }

        for (dy, row) in block.iter().enumerate() {
            for (dx, &kind) in row.as_ref().iter().enumerate() {
                let idx = (top + dy) * self.width + left + dx;
                self.cells[idx] = Cell::new(kind, ignition_probability);
            }
        }
        Ok(())
    }

    /// Overwrite this grid with another of the same size without reallocating
    pub(crate) fn copy_from(&mut self, other: &Grid) {
        debug_assert_eq!((self.width, self.height), (other.width, other.height));
        self.cells.copy_from_slice(&other.cells);
    }

    /// Unchecked row-major access for the rule's inner loop
    pub(crate) fn cell(&self, y: usize, x: usize) -> Cell {
        self.cells[y * self.width + x]
    }

    pub(crate) fn cell_mut(&mut self, y: usize, x: usize) -> &mut Cell {
        &mut self.cells[y * self.width + x]
    }

    fn index(&self, y: usize, x: usize) -> Result<usize, WildfireError> {
        if self.contains(y, x) {
            Ok(y * self.width + x)
        } else {
            Err(self.out_of_range(y, x))
        }
    }

    fn out_of_range(&self, y: usize, x: usize) -> WildfireError {
        WildfireError::OutOfRange {
            y,
            x,
            height: self.height,
            width: self.width,
        }
    }
}
