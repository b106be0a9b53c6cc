//! Transition rule, statistics and run orchestration

pub mod controller;
pub mod rule;
pub mod stats;

pub use controller::*;
pub use rule::*;
pub use stats::*;
