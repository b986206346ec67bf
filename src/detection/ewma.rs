//! Exponentially Weighted Moving Average (EWMA) analysis for small shifts.
//!
//! # Algorithm
//!
//! The EWMA statistic smooths the sequence toward the target:
//!
//! ```text
//! Z_i = lambda * x_i + (1 - lambda) * Z_{i-1},   Z_0 = target
//! ```
//!
//! with time-varying (exact) control limits
//!
//! ```text
//! UCL_i = target + L * sigma * sqrt(lambda / (2 - lambda) * (1 - (1 - lambda)^(2(i+1))))
//! LCL_i = target - L * sigma * sqrt(lambda / (2 - lambda) * (1 - (1 - lambda)^(2(i+1))))
//! ```
//!
//! Sigma is the sample standard deviation of the data, and the target
//! defaults to the data mean, mirroring the CUSUM conventions in this
//! module.
//!
//! # Parameters
//!
//! - **lambda**: smoothing constant in (0, 1], default 0.2. Smaller values
//!   weight history more heavily and detect smaller shifts.
//! - **l_factor**: control limit width in multiples of sigma, default 3.0.
//!
//! # Reference
//!
//! Roberts, S.W. (1959). "Control Chart Tests Based on Geometric Moving
//! Averages", *Technometrics* 1(3), pp. 239-250.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SpcError;
use crate::stats;

/// EWMA tuning parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EwmaParams {
    /// Target process mean; defaults to the mean of the data when `None`.
    pub target: Option<f64>,
    /// Smoothing constant, in (0, 1].
    pub lambda: f64,
    /// Control limit width factor, in multiples of sigma.
    pub l_factor: f64,
}

impl Default for EwmaParams {
    fn default() -> Self {
        Self {
            target: None,
            lambda: 0.2,
            l_factor: 3.0,
        }
    }
}

/// Result of an EWMA analysis.
///
/// All three sequences have one entry per observation; `ucl`/`lcl` are the
/// time-varying exact limits, which widen toward their asymptote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EwmaAnalysis {
    /// Smoothed statistics Z_i.
    pub ewma: Vec<f64>,
    /// Per-point upper control limits.
    pub ucl: Vec<f64>,
    /// Per-point lower control limits.
    pub lcl: Vec<f64>,
    /// Ascending indices where the statistic left its limits.
    pub out_of_control_points: Vec<usize>,
}

/// EWMA analysis of a measurement sequence.
///
/// # Errors
///
/// - [`SpcError::InvalidParameter`] — `lambda` outside (0, 1],
///   `l_factor <= 0`, a non-finite parameter, or non-finite data
/// - [`SpcError::InsufficientData`] — fewer than 2 observations
/// - [`SpcError::DegenerateDistribution`] — constant input (sigma == 0)
///
/// # Examples
///
/// ```
/// use spc_analytics::detection::{analyze_ewma, EwmaParams};
///
/// let data = [10.1, 9.8, 10.2, 9.9, 10.0, 10.1, 9.7, 10.3];
/// let analysis = analyze_ewma(&data, EwmaParams::default()).unwrap();
/// assert!(analysis.out_of_control_points.is_empty());
/// ```
pub fn analyze_ewma(data: &[f64], params: EwmaParams) -> Result<EwmaAnalysis, SpcError> {
    debug!(
        observations = data.len(),
        lambda = params.lambda,
        l_factor = params.l_factor,
        "analyzing EWMA"
    );
    if !params.lambda.is_finite() || params.lambda <= 0.0 || params.lambda > 1.0 {
        return Err(SpcError::invalid(format!(
            "lambda must be in (0, 1], got {}",
            params.lambda
        )));
    }
    if !params.l_factor.is_finite() || params.l_factor <= 0.0 {
        return Err(SpcError::invalid(format!(
            "l_factor must be positive and finite, got {}",
            params.l_factor
        )));
    }
    if let Some(t) = params.target {
        if !t.is_finite() {
            return Err(SpcError::invalid("target must be finite"));
        }
    }
    stats::ensure_finite(data)?;
    if data.len() < 2 {
        return Err(SpcError::InsufficientData {
            needed: 2,
            got: data.len(),
        });
    }

    let sigma = stats::std_dev(data).expect("length checked above");
    if sigma == 0.0 {
        return Err(SpcError::DegenerateDistribution { context: "EWMA" });
    }
    let target = params
        .target
        .unwrap_or_else(|| stats::mean(data).expect("non-empty"));

    let lambda = params.lambda;
    let asymptote = lambda / (2.0 - lambda);

    let mut ewma = Vec::with_capacity(data.len());
    let mut ucl = Vec::with_capacity(data.len());
    let mut lcl = Vec::with_capacity(data.len());
    let mut out_of_control_points = Vec::new();

    let mut z = target;
    for (i, &x) in data.iter().enumerate() {
        z = lambda * x + (1.0 - lambda) * z;
        let decay = 1.0 - (1.0 - lambda).powi(2 * (i as i32 + 1));
        let width = params.l_factor * sigma * (asymptote * decay).sqrt();
        let upper = target + width;
        let lower = target - width;

        if z > upper || z < lower {
            out_of_control_points.push(i);
        }
        ewma.push(z);
        ucl.push(upper);
        lcl.push(lower);
    }

    Ok(EwmaAnalysis {
        ewma,
        ucl,
        lcl,
        out_of_control_points,
    })
}
