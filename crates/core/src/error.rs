//! Error types for grid access and run configuration

/// Errors raised by the wildfire core.
///
/// Neither variant is transient: both are detected synchronously before any
/// buffer is modified, so a failed call leaves the simulation untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WildfireError {
    /// Grid coordinate outside `[0, height) x [0, width)`.
    #[error("cell ({y}, {x}) is outside the {height}x{width} grid")]
    OutOfRange {
        /// Requested row.
        y: usize,
        /// Requested column.
        x: usize,
        /// Grid height in cells.
        height: usize,
        /// Grid width in cells.
        width: usize,
    },

    /// Configuration value rejected before the simulation starts.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// What was wrong with it.
        reason: String,
    },
}

impl WildfireError {
    /// Create an `InvalidParameter` error.
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Create an error for a probability outside `[0, 1]`.
    pub fn invalid_probability(name: &'static str, value: f32) -> Self {
        Self::invalid_parameter(name, format!("must be a probability in [0, 1], got {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = WildfireError::OutOfRange {
            y: 7,
            x: 2,
            height: 5,
            width: 5,
        };
        assert_eq!(err.to_string(), "cell (7, 2) is outside the 5x5 grid");
    }

    #[test]
    fn test_invalid_probability_message() {
        let err = WildfireError::invalid_probability("rebirth_probability", 1.5);
        assert_eq!(
            err.to_string(),
            "invalid parameter rebirth_probability: must be a probability in [0, 1], got 1.5"
        );
    }
}
