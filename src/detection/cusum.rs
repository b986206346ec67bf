//! Cumulative Sum (CUSUM) analysis for detecting small persistent mean shifts.
//!
//! # Algorithm
//!
//! The reference value and decision interval are scaled by the sample
//! standard deviation of the data (`k_abs = k·sigma`, `h_abs = h·sigma`),
//! so the running sums live in data units rather than standardized units:
//!
//! ```text
//! C+(i) = max(0, C+(i-1) + (x_i - target) - k_abs)
//! C-(i) = max(0, C-(i-1) - (x_i - target) - k_abs)
//! ```
//!
//! A point is out of control when `C+(i) > h_abs` or `C-(i) > h_abs`.
//! CUSUM is a drift detector, not a Shewhart chart: the result carries the
//! two running-sum sequences and the decision interval, with no
//! center-line/UCL framing.
//!
//! # Parameters
//!
//! - **k**: reference value multiplier, default 0.5 (tuned to detect a
//!   1-sigma shift)
//! - **h**: decision interval multiplier, default 5
//! - **target**: defaults to the mean of the data
//!
//! # Reference
//!
//! Page, E.S. (1954). "Continuous inspection schemes", *Biometrika* 41(1-2),
//! pp. 100-115.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SpcError;
use crate::stats;

/// CUSUM tuning parameters.
///
/// The defaults (k=0.5, h=5) give an in-control average run length of
/// roughly 465 while detecting a sustained 1-sigma shift within about
/// 10 observations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CusumParams {
    /// Target process mean; defaults to the mean of the data when `None`.
    pub target: Option<f64>,
    /// Reference value multiplier (allowance), in multiples of sigma.
    pub k: f64,
    /// Decision interval multiplier, in multiples of sigma.
    pub h: f64,
}

impl Default for CusumParams {
    fn default() -> Self {
        Self {
            target: None,
            k: 0.5,
            h: 5.0,
        }
    }
}

/// Result of a CUSUM analysis.
///
/// `c_plus` and `c_minus` have one entry per observation; both start from
/// an implicit 0 and are floored at 0 by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CusumAnalysis {
    /// Upper cumulative sums, detecting upward drift.
    pub c_plus: Vec<f64>,
    /// Lower cumulative sums, detecting downward drift.
    pub c_minus: Vec<f64>,
    /// Decision interval in data units (`h · sigma`).
    pub h_abs: f64,
    /// Ascending indices where either running sum exceeded `h_abs`.
    pub out_of_control_points: Vec<usize>,
}

/// Tabular two-sided CUSUM analysis of a measurement sequence.
///
/// Sigma is the sample standard deviation (n-1 denominator) of the full
/// sequence, matching the reference implementation.
///
/// # Errors
///
/// - [`SpcError::InvalidParameter`] — `k < 0`, `h <= 0`, a non-finite
///   parameter, or non-finite data
/// - [`SpcError::InsufficientData`] — fewer than 2 observations
/// - [`SpcError::DegenerateDistribution`] — constant input (sigma == 0)
///
/// # Examples
///
/// ```
/// use spc_analytics::detection::{analyze_cusum, CusumParams};
///
/// let data = [10.1, 9.8, 10.2, 9.9, 10.0, 10.1, 9.7, 10.3];
/// let analysis = analyze_cusum(&data, CusumParams::default()).unwrap();
/// assert!(analysis.out_of_control_points.is_empty());
/// ```
pub fn analyze_cusum(data: &[f64], params: CusumParams) -> Result<CusumAnalysis, SpcError> {
    debug!(
        observations = data.len(),
        k = params.k,
        h = params.h,
        "analyzing CUSUM"
    );
    if !params.k.is_finite() || params.k < 0.0 {
        return Err(SpcError::invalid(format!(
            "k must be non-negative and finite, got {}",
            params.k
        )));
    }
    if !params.h.is_finite() || params.h <= 0.0 {
        return Err(SpcError::invalid(format!(
            "h must be positive and finite, got {}",
            params.h
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
        return Err(SpcError::DegenerateDistribution { context: "CUSUM" });
    }
    let target = params
        .target
        .unwrap_or_else(|| stats::mean(data).expect("non-empty"));

    let k_abs = params.k * sigma;
    let h_abs = params.h * sigma;

    let mut c_plus = Vec::with_capacity(data.len());
    let mut c_minus = Vec::with_capacity(data.len());
    let mut out_of_control_points = Vec::new();

    let mut upper = 0.0_f64;
    let mut lower = 0.0_f64;
    for (i, &x) in data.iter().enumerate() {
        upper = (upper + (x - target) - k_abs).max(0.0);
        lower = (lower - (x - target) - k_abs).max(0.0);
        c_plus.push(upper);
        c_minus.push(lower);
        if upper > h_abs || lower > h_abs {
            out_of_control_points.push(i);
        }
    }

    Ok(CusumAnalysis {
        c_plus,
        c_minus,
        h_abs,
        out_of_control_points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Zero-mean noise cycle used to build deterministic test sequences.
    const NOISE: [f64; 5] = [0.5, -0.5, 0.9, -0.9, 0.0];

    #[test]
    fn test_cusum_step_shift_flagged_only_in_second_half() {
        // First half at the target mean 100, second half shifted up by 4
        // noise-sigmas. With defaults k=0.5, h=5 the drift must be flagged
        // somewhere in the second half and nowhere in the first.
        let mut data: Vec<f64> = (0..30).map(|i| 100.0 + NOISE[i % 5]).collect();
        data.extend((0..30).map(|i| 104.0 + NOISE[i % 5]));

        let params = CusumParams {
            target: Some(100.0),
            ..CusumParams::default()
        };
        let analysis = analyze_cusum(&data, params).unwrap();
        assert!(!analysis.out_of_control_points.is_empty());
        assert!(analysis.out_of_control_points.iter().all(|&i| i >= 30));
    }

    #[test]
    fn test_cusum_centered_data_quiet() {
        // Symmetric deviations of 0.3 sigma around the target accumulate
        // nothing against the k=0.5 allowance.
        let data: Vec<f64> = (0..100)
            .map(|i| if i % 2 == 0 { 50.3 } else { 49.7 })
            .collect();
        let analysis = analyze_cusum(&data, CusumParams::default()).unwrap();
        assert!(analysis.out_of_control_points.is_empty());
    }

    #[test]
    fn test_cusum_sequences_match_input_length_and_are_non_negative() {
        let data: Vec<f64> = (0..50).map(|i| 10.0 + ((i * 7) % 5) as f64 * 0.1).collect();
        let analysis = analyze_cusum(&data, CusumParams::default()).unwrap();
        assert_eq!(analysis.c_plus.len(), data.len());
        assert_eq!(analysis.c_minus.len(), data.len());
        assert!(analysis.c_plus.iter().all(|&c| c >= 0.0));
        assert!(analysis.c_minus.iter().all(|&c| c >= 0.0));
    }

    #[test]
    fn test_cusum_explicit_target_hand_computed() {
        // target = 10, data [12, 12, 12, 8]: sample sigma = 2.
        // k_abs = 1, h_abs = 10.
        // C+ : max(0, 0+2-1)=1, 2, 3, max(0, 3-2-1)=0
        // C- : 0 throughout until x=8: max(0, 0+2-1)=1
        let data = [12.0, 12.0, 12.0, 8.0];
        let params = CusumParams {
            target: Some(10.0),
            ..CusumParams::default()
        };
        let analysis = analyze_cusum(&data, params).unwrap();
        assert_eq!(analysis.c_plus, vec![1.0, 2.0, 3.0, 0.0]);
        assert_eq!(analysis.c_minus, vec![0.0, 0.0, 0.0, 1.0]);
        assert_eq!(analysis.h_abs, 10.0);
        assert!(analysis.out_of_control_points.is_empty());
    }

    #[test]
    fn test_cusum_downward_drift_accumulates_in_c_minus() {
        let mut data = vec![50.0, 50.2, 49.8, 50.1, 49.9, 50.0];
        data.extend(vec![44.0; 15]);
        let params = CusumParams {
            target: Some(50.0),
            ..CusumParams::default()
        };
        let analysis = analyze_cusum(&data, params).unwrap();
        assert!(!analysis.out_of_control_points.is_empty());
        let first = analysis.out_of_control_points[0];
        assert!(analysis.c_minus[first] > analysis.c_plus[first]);
    }

    #[test]
    fn test_cusum_custom_params_more_sensitive() {
        let mut data = vec![0.0, 0.1, -0.1, 0.05, -0.05, 0.0, 0.1, -0.1, 0.0, 0.05];
        data.extend(vec![1.2; 20]);
        let tight = CusumParams {
            target: Some(0.0),
            k: 0.25,
            h: 4.0,
        };
        let loose = CusumParams {
            target: Some(0.0),
            ..CusumParams::default()
        };
        let tight_first = analyze_cusum(&data, tight).unwrap().out_of_control_points[0];
        let loose_first = analyze_cusum(&data, loose).unwrap().out_of_control_points[0];
        assert!(tight_first <= loose_first);
    }

    #[test]
    fn test_cusum_constant_data_is_degenerate() {
        let err = analyze_cusum(&[5.0; 10], CusumParams::default()).unwrap_err();
        assert_eq!(err, SpcError::DegenerateDistribution { context: "CUSUM" });
    }

    #[test]
    fn test_cusum_insufficient_data() {
        let err = analyze_cusum(&[1.0], CusumParams::default()).unwrap_err();
        assert_eq!(err, SpcError::InsufficientData { needed: 2, got: 1 });
    }

    #[test]
    fn test_cusum_invalid_params() {
        let data = [1.0, 2.0, 3.0];
        let bad_k = CusumParams {
            k: -0.1,
            ..CusumParams::default()
        };
        assert!(analyze_cusum(&data, bad_k).is_err());

        let bad_h = CusumParams {
            h: 0.0,
            ..CusumParams::default()
        };
        assert!(analyze_cusum(&data, bad_h).is_err());

        let bad_target = CusumParams {
            target: Some(f64::NAN),
            ..CusumParams::default()
        };
        assert!(analyze_cusum(&data, bad_target).is_err());
    }

    #[test]
    fn test_cusum_rejects_nan_data() {
        let err = analyze_cusum(&[1.0, f64::NAN, 3.0], CusumParams::default()).unwrap_err();
        assert!(matches!(err, SpcError::InvalidParameter { .. }));
    }
}
