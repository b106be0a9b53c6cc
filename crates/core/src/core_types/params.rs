//! Run configuration
//!
//! `SimulationParameters` is fixed for the lifetime of a run. Presets mirror the
//! classic scenarios: a calm regrowing forest, a windswept burn with long ash
//! recovery, and a self-restarting regrowth cycle.

use crate::error::WildfireError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound for burn and ash durations, keeps every kind far from the sentinel
pub const MAX_DURATION: u32 = 1_000_000;

/// Which neighbours a burning cell may ignite, and at what strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindMode {
    /// Four axis-aligned neighbours at full strength
    #[default]
    Calm,
    /// Downwind (+y, +x) at full strength, upwind (-y, -x) attenuated by the decay factor
    Unidirectional,
    /// Unidirectional plus extended downwind reach: (+1,+1), (+1,+2), (+2,+1)
    DiagonalSpread,
}

impl WindMode {
    pub const fn name(&self) -> &'static str {
        match self {
            WindMode::Calm => "calm",
            WindMode::Unidirectional => "unidirectional",
            WindMode::DiagonalSpread => "diagonal-spread",
        }
    }
}

impl fmt::Display for WindMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WindMode {
    type Err = WildfireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "calm" | "none" => Ok(WindMode::Calm),
            "unidirectional" | "uni" => Ok(WindMode::Unidirectional),
            "diagonal" | "diagonal-spread" => Ok(WindMode::DiagonalSpread),
            other => Err(WildfireError::invalid_parameter(
                "wind_mode",
                format!("unknown wind mode '{other}' (expected calm, unidirectional or diagonal)"),
            )),
        }
    }
}

/// Immutable parameters of a single simulation run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    /// Base chance that a burning cell ignites a flammable neighbour (0-1)
    pub ignition_probability: f32,
    /// Chance per tick that bare ground regrows vegetation (0-1). Zero disables
    /// both regrowth and the ash countdown.
    pub rebirth_probability: f32,
    /// Multiplier applied to upwind spread (0-1)
    pub wind_decay_factor: f32,
    /// Ticks a cell burns before turning to ash
    pub burn_duration: u32,
    /// Ticks of ash before the ground is eligible to regrow
    pub burned_duration: u32,
    pub wind_mode: WindMode,
    /// Force a random cell alight whenever the fire goes out
    pub reignite: bool,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            ignition_probability: 0.8,
            rebirth_probability: 0.1,
            wind_decay_factor: 0.5,
            burn_duration: 5,
            burned_duration: 25,
            wind_mode: WindMode::Calm,
            reignite: false,
        }
    }
}

impl SimulationParameters {
    /// Calm forest with steady regrowth
    pub fn classic() -> Self {
        Self::default()
    }

    /// Strong diagonal wind, sparse regrowth and long ash recovery
    pub fn windswept() -> Self {
        Self {
            ignition_probability: 0.8,
            rebirth_probability: 0.01,
            burn_duration: 5,
            burned_duration: 50,
            wind_mode: WindMode::DiagonalSpread,
            ..Self::default()
        }
    }

    /// Endless cycle: regrowth plus reignition whenever the fire dies
    pub fn regrowth() -> Self {
        Self {
            rebirth_probability: 0.05,
            reignite: true,
            ..Self::default()
        }
    }

    /// Resolve a preset by name (case-insensitive)
    ///
    /// # Errors
    /// Returns `InvalidParameter` if the name is not a known preset.
    pub fn preset(name: &str) -> Result<Self, WildfireError> {
        match name.to_lowercase().as_str() {
            "classic" => Ok(Self::classic()),
            "windswept" | "windy" => Ok(Self::windswept()),
            "regrowth" | "cycle" => Ok(Self::regrowth()),
            other => Err(WildfireError::invalid_parameter(
                "preset",
                format!("unknown preset '{other}' (expected classic, windswept or regrowth)"),
            )),
        }
    }

    pub fn with_ignition_probability(mut self, probability: f32) -> Self {
        self.ignition_probability = probability;
        self
    }

    pub fn with_rebirth_probability(mut self, probability: f32) -> Self {
        self.rebirth_probability = probability;
        self
    }

    pub fn with_wind_decay_factor(mut self, factor: f32) -> Self {
        self.wind_decay_factor = factor;
        self
    }

    pub fn with_burn_duration(mut self, ticks: u32) -> Self {
        self.burn_duration = ticks;
        self
    }

    pub fn with_burned_duration(mut self, ticks: u32) -> Self {
        self.burned_duration = ticks;
        self
    }

    pub fn with_wind_mode(mut self, wind_mode: WindMode) -> Self {
        self.wind_mode = wind_mode;
        self
    }

    pub fn with_reignite(mut self, reignite: bool) -> Self {
        self.reignite = reignite;
        self
    }

    /// Whether bare ground can regrow (and ash counts down)
    pub fn rebirth_enabled(&self) -> bool {
        self.rebirth_probability > 0.0
    }

    /// Kind at which a burning cell burns out
    pub fn burnout_kind(&self) -> i32 {
        crate::core_types::cell::IGNITED + self.burn_duration as i32
    }

    /// Kind assigned to freshly burned-out cells
    pub fn ash_kind(&self) -> i32 {
        -(self.burned_duration as i32)
    }

    /// Check every parameter before a run starts
    ///
    /// # Errors
    /// Returns `InvalidParameter` for probabilities outside `[0, 1]` (or NaN)
    /// and for durations of zero or above [`MAX_DURATION`].
    pub fn validate(&self) -> Result<(), WildfireError> {
        check_probability("ignition_probability", self.ignition_probability)?;
        check_probability("rebirth_probability", self.rebirth_probability)?;
        check_probability("wind_decay_factor", self.wind_decay_factor)?;
        check_duration("burn_duration", self.burn_duration)?;
        check_duration("burned_duration", self.burned_duration)?;
        Ok(())
    }
}

/// Reject values outside `[0, 1]`; NaN fails the range check too
pub(crate) fn check_probability(name: &'static str, value: f32) -> Result<(), WildfireError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(WildfireError::invalid_probability(name, value))
    }
}

fn check_duration(name: &'static str, ticks: u32) -> Result<(), WildfireError> {
    if ticks == 0 {
        return Err(WildfireError::invalid_parameter(name, "must be at least one tick"));
    }
    if ticks > MAX_DURATION {
        return Err(WildfireError::invalid_parameter(
            name,
            format!("must not exceed {MAX_DURATION} ticks, got {ticks}"),
        ));
    }
    Ok(())
}
