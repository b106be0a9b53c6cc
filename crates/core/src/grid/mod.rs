//! Grid container and wind-aware neighbourhoods

pub mod fire_grid;
pub mod wind;

// Re-export main types
pub use fire_grid::*;
pub use wind::*;
