//! Error taxonomy shared by all analysis operations.
//!
//! Every error is detected synchronously at the point of computation;
//! nothing is retried and no partial results are returned. Callers (HTTP
//! handlers, batch jobs, dashboards) are responsible for translating these
//! into user-facing messages or status codes.

use thiserror::Error;

/// Errors raised by the SPC analysis operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpcError {
    /// A caller-supplied parameter is out of its valid domain.
    ///
    /// Covers subgroup sizes below 2, mismatched `defects`/`sample_sizes`
    /// lengths, zero sample sizes, defect counts exceeding the sample size,
    /// non-finite inputs, `USL <= LSL`, and drift-detector parameters out
    /// of range.
    #[error("invalid parameter: {reason}")]
    InvalidParameter {
        /// Human-readable description of the rejected parameter.
        reason: String,
    },

    /// The data sequence is too short for the requested computation.
    ///
    /// Raised when fewer than one full subgroup is available, or when a
    /// standard-deviation-based computation receives fewer than 2 points.
    #[error("insufficient data: need at least {needed} observations, got {got}")]
    InsufficientData {
        /// Minimum number of observations the operation requires.
        needed: usize,
        /// Number of observations actually supplied.
        got: usize,
    },

    /// The data has zero standard deviation (constant sequence) where a
    /// nonzero sigma is required.
    ///
    /// Raised instead of propagating `inf`/`NaN` through capability indices
    /// or drift-detector thresholds.
    #[error("degenerate distribution: {context} requires a nonzero standard deviation")]
    DegenerateDistribution {
        /// The computation that needed a nonzero sigma.
        context: &'static str,
    },
}

impl SpcError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let err = SpcError::invalid("subgroup_size must be >= 2, got 1");
        assert_eq!(
            err.to_string(),
            "invalid parameter: subgroup_size must be >= 2, got 1"
        );
    }

    #[test]
    fn test_insufficient_data_display() {
        let err = SpcError::InsufficientData { needed: 5, got: 3 };
        assert_eq!(
            err.to_string(),
            "insufficient data: need at least 5 observations, got 3"
        );
    }

    #[test]
    fn test_degenerate_distribution_display() {
        let err = SpcError::DegenerateDistribution {
            context: "process capability",
        };
        assert_eq!(
            err.to_string(),
            "degenerate distribution: process capability requires a nonzero standard deviation"
        );
    }
}
