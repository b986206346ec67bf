//! Process capability indices (Cp, Cpk, Pp, Ppk).
//!
//! All four indices are computed from the sample mean and sample standard
//! deviation of the raw, ungrouped measurement sequence. This engine does
//! not maintain a separate within-subgroup sigma estimate, so the
//! "potential" and "performance" pairs collapse to the same formulas:
//! `Pp == Cp` and `Ppk == Cpk` by design, preserving the numeric contract
//! of the production system this replaces. Extending to a short-term
//! sigma estimator would change that contract and must not be done
//! silently.
//!
//! # References
//!
//! - Montgomery (2019), *Introduction to Statistical Quality Control*,
//!   8th ed., Chapter 8.
//! - Kane (1986), "Process Capability Indices", *Journal of Quality
//!   Technology* 18(1), pp. 41-52.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SpcError;
use crate::stats;

/// Computed capability indices.
///
/// | Index | Value | Interpretation |
/// |-------|-------|----------------|
/// | Cp/Pp | >= 1.33 | Process spread fits the tolerance |
/// | Cpk/Ppk | >= 1.33 | Process is capable and centered |
///
/// Reference: Montgomery (2019), Chapter 8, Table 8.5.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessCapability {
    /// Cp = (USL - LSL) / (6 * sigma).
    pub cp: f64,
    /// Cpk = min((USL - mean) / (3 * sigma), (mean - LSL) / (3 * sigma)).
    pub cpk: f64,
    /// Pp — equals Cp in this engine (single overall sigma estimate).
    pub pp: f64,
    /// Ppk — equals Cpk in this engine (single overall sigma estimate).
    pub ppk: f64,
}

/// Compute capability indices for a two-sided specification.
///
/// Uses the sample mean and sample standard deviation (n-1 denominator)
/// of `data`.
///
/// # Errors
///
/// - [`SpcError::InvalidParameter`] — non-finite limits, `usl <= lsl`, or
///   non-finite data
/// - [`SpcError::InsufficientData`] — fewer than 2 observations
/// - [`SpcError::DegenerateDistribution`] — constant input (sigma == 0);
///   raised instead of propagating infinite indices
///
/// # Examples
///
/// ```
/// use spc_analytics::capability::process_capability;
///
/// // mean 100, sample sigma exactly 5
/// let data = [93.0, 99.0, 100.0, 101.0, 107.0];
/// let indices = process_capability(&data, 115.0, 85.0).unwrap();
/// assert_eq!(indices.cp, 1.0);
/// assert_eq!(indices.cpk, 1.0);
/// ```
pub fn process_capability(
    data: &[f64],
    usl: f64,
    lsl: f64,
) -> Result<ProcessCapability, SpcError> {
    debug!(observations = data.len(), usl, lsl, "computing capability indices");
    if !usl.is_finite() || !lsl.is_finite() {
        return Err(SpcError::invalid("specification limits must be finite"));
    }
    if usl <= lsl {
        return Err(SpcError::invalid(format!(
            "USL ({usl}) must be greater than LSL ({lsl})"
        )));
    }
    stats::ensure_finite(data)?;
    if data.len() < 2 {
        return Err(SpcError::InsufficientData {
            needed: 2,
            got: data.len(),
        });
    }

    let mean = stats::mean(data).expect("non-empty");
    let sigma = stats::std_dev(data).expect("length checked above");
    if sigma == 0.0 {
        return Err(SpcError::DegenerateDistribution {
            context: "process capability",
        });
    }

    let cp = (usl - lsl) / (6.0 * sigma);
    let cpk = ((usl - mean) / (3.0 * sigma)).min((mean - lsl) / (3.0 * sigma));

    Ok(ProcessCapability {
        cp,
        cpk,
        pp: cp,
        ppk: cpk,
    })
}
