//! Drift detection.
//!
//! Detectors for small persistent shifts in the process mean. Unlike the
//! Shewhart charts in [`crate::spc`], these accumulate evidence across
//! observations, so they signal drifts too small for a 3-sigma limit to
//! catch.
//!
//! # Detectors
//!
//! - [`analyze_cusum`] — tabular two-sided Cumulative Sum (Page, 1954)
//! - [`analyze_ewma`] — Exponentially Weighted Moving Average (Roberts, 1959)
//!
//! # References
//!
//! - Page, E.S. (1954). "Continuous Inspection Schemes",
//!   *Biometrika* 41(1/2), pp. 100-115.
//! - Roberts, S.W. (1959). "Control Chart Tests Based on Geometric Moving Averages",
//!   *Technometrics* 1(3), pp. 239-250.

mod cusum;
mod ewma;

pub use cusum::{analyze_cusum, CusumAnalysis, CusumParams};
pub use ewma::{analyze_ewma, EwmaAnalysis, EwmaParams};
