//! Core types and configuration

pub mod cell;
pub mod params;

pub use cell::*;
pub use params::*;
