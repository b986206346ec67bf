//! Statistical Process Control (SPC) charts.
//!
//! Control chart construction and out-of-control detection for both
//! variables and attributes data. Each analysis is a pure function: it
//! partitions or aggregates the supplied measurements, computes the center
//! line and 3-sigma control limits, applies the violation rules, and
//! returns an immutable [`ControlChartResult`].
//!
//! # Variables Charts
//!
//! - [`analyze_xbar`] — X-bar (subgroup mean) chart with Western Electric rules
//! - [`analyze_r_chart`] — R (subgroup range) chart with threshold detection
//!
//! # Attributes Charts
//!
//! - [`analyze_p_chart`] — p (proportion defective) chart
//!
//! # Run Rules
//!
//! - [`apply_western_electric_rules`] — the 4 classic run rules
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - Western Electric (1956). *Statistical Quality Control Handbook*.

mod attributes;
mod chart;
mod rules;
mod variables;

pub use attributes::analyze_p_chart;
pub use chart::{ChartType, ControlChartResult};
pub use rules::{apply_western_electric_rules, flagged_indices, Violation, WesternElectricRule};
pub use variables::{analyze_r_chart, analyze_xbar};
