//! Variables control charts: X-bar (subgroup mean) and R (subgroup range).
//!
//! Both charts partition the measurement sequence into contiguous,
//! non-overlapping subgroups of a fixed size; a trailing partial subgroup
//! is discarded, not padded. Order is significant — it defines temporal
//! adjacency for the consecutive-run rules.
//!
//! # Control Chart Factors
//!
//! The d2, D3, and D4 constants are the standard range-method factors for
//! subgroup sizes 2..=10 (ASTM E2587). Sizes outside the table fall back
//! to the n=5 factors — a deliberate policy inherited from the production
//! system this engine replaces, not a silent failure.
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - ASTM E2587 — Standard Practice for Use of Control Charts
//! - Shewhart, W.A. (1931). *Economic Control of Quality of Manufactured Product*.

use tracing::debug;

use crate::capability;
use crate::error::SpcError;
use crate::stats;

use super::chart::{ChartType, ControlChartResult};
use super::rules::{apply_western_electric_rules, flagged_indices};

// ---------------------------------------------------------------------------
// Control chart factor tables, indexed by subgroup size n=2..10.
// Index 0 corresponds to n=2.
// ---------------------------------------------------------------------------

/// d2 factors (mean of the range distribution) for estimating sigma from R-bar.
///
/// sigma-hat = R-bar / d2.
const D2: [f64; 9] = [1.128, 1.693, 2.059, 2.326, 2.534, 2.704, 2.847, 2.970, 3.078];

/// D3 factors for the R chart lower control limit.
///
/// LCL_R = D3 * R-bar.
const D3: [f64; 9] = [0.0, 0.0, 0.0, 0.0, 0.0, 0.076, 0.136, 0.184, 0.223];

/// D4 factors for the R chart upper control limit.
///
/// UCL_R = D4 * R-bar.
const D4: [f64; 9] = [3.267, 2.574, 2.282, 2.114, 2.004, 1.924, 1.864, 1.816, 1.777];

/// Table index for the n=5 fallback factors.
const FALLBACK_IDX: usize = 3;

fn d2_for(subgroup_size: usize) -> f64 {
    D2.get(subgroup_size - 2).copied().unwrap_or(D2[FALLBACK_IDX])
}

fn d3_for(subgroup_size: usize) -> f64 {
    D3.get(subgroup_size - 2).copied().unwrap_or(D3[FALLBACK_IDX])
}

fn d4_for(subgroup_size: usize) -> f64 {
    D4.get(subgroup_size - 2).copied().unwrap_or(D4[FALLBACK_IDX])
}

// ---------------------------------------------------------------------------
// Subgrouping
// ---------------------------------------------------------------------------

/// Partition `data` into full subgroups and compute per-subgroup means and
/// ranges. The trailing remainder is dropped.
fn subgroup_stats(data: &[f64], subgroup_size: usize) -> Result<(Vec<f64>, Vec<f64>), SpcError> {
    if subgroup_size < 2 {
        return Err(SpcError::invalid(format!(
            "subgroup_size must be >= 2, got {subgroup_size}"
        )));
    }
    stats::ensure_finite(data)?;

    let mut means = Vec::with_capacity(data.len() / subgroup_size);
    let mut ranges = Vec::with_capacity(data.len() / subgroup_size);
    for subgroup in data.chunks_exact(subgroup_size) {
        let mean = stats::mean(subgroup).expect("subgroup is non-empty");
        let max = stats::max(subgroup).expect("subgroup is non-empty");
        let min = stats::min(subgroup).expect("subgroup is non-empty");
        means.push(mean);
        ranges.push(max - min);
    }

    if means.is_empty() {
        return Err(SpcError::InsufficientData {
            needed: subgroup_size,
            got: data.len(),
        });
    }
    Ok((means, ranges))
}

// ---------------------------------------------------------------------------
// X-bar chart
// ---------------------------------------------------------------------------

/// X-bar (subgroup mean) chart analysis.
///
/// # Algorithm
///
/// 1. Partition `data` into `len / subgroup_size` contiguous subgroups,
///    dropping the trailing remainder.
/// 2. Plot the subgroup means; the center line is their grand mean.
/// 3. Estimate process sigma by the average-range method,
///    `sigma-hat = R-bar / d2(n)`, and set `UCL/LCL = CL ± 3·sigma-hat/√n`.
///    The X-bar LCL is not clamped and may be negative.
/// 4. Apply the Western Electric rules to the subgroup-mean sequence.
/// 5. When both `usl` and `lsl` are supplied, compute capability indices
///    from the raw ungrouped `data` (not the subgroup means).
///
/// # Errors
///
/// - [`SpcError::InvalidParameter`] — `subgroup_size < 2`, non-finite data,
///   or `usl <= lsl` when both are given
/// - [`SpcError::InsufficientData`] — fewer than one full subgroup
/// - [`SpcError::DegenerateDistribution`] — capability requested for a
///   constant sequence (no partial results are returned)
///
/// # Examples
///
/// ```
/// use spc_analytics::spc::analyze_xbar;
///
/// let data = [
///     10.0, 12.0, 11.0, 13.0, 14.0, //
///     11.0, 13.0, 12.0, 10.0, 15.0, //
///     12.0, 11.0, 14.0, 13.0, 10.0,
/// ];
/// let result = analyze_xbar(&data, 5, None, None).unwrap();
/// assert_eq!(result.out_of_control_points, Vec::<usize>::new());
/// ```
pub fn analyze_xbar(
    data: &[f64],
    subgroup_size: usize,
    usl: Option<f64>,
    lsl: Option<f64>,
) -> Result<ControlChartResult, SpcError> {
    debug!(
        observations = data.len(),
        subgroup_size, "analyzing X-bar chart"
    );
    if let (Some(u), Some(l)) = (usl, lsl) {
        if !u.is_finite() || !l.is_finite() {
            return Err(SpcError::invalid("specification limits must be finite"));
        }
        if u <= l {
            return Err(SpcError::invalid(format!(
                "USL ({u}) must be greater than LSL ({l})"
            )));
        }
    }

    let (means, ranges) = subgroup_stats(data, subgroup_size)?;

    let grand_mean = stats::mean(&means).expect("at least one subgroup");
    let r_bar = stats::mean(&ranges).expect("at least one subgroup");

    let sigma_estimate = r_bar / d2_for(subgroup_size);
    let half_width = 3.0 * sigma_estimate / (subgroup_size as f64).sqrt();
    let ucl = grand_mean + half_width;
    let lcl = grand_mean - half_width;

    let violations = apply_western_electric_rules(&means, grand_mean, ucl, lcl);
    let out_of_control_points = flagged_indices(&violations);

    // Capability from the raw, ungrouped data; errors propagate so that an
    // incomplete result is never returned.
    let process_capability = match (usl, lsl) {
        (Some(u), Some(l)) => Some(capability::process_capability(data, u, l)?),
        _ => None,
    };

    Ok(ControlChartResult {
        chart_type: ChartType::XBar,
        center_line: grand_mean,
        ucl,
        lcl,
        usl,
        lsl,
        out_of_control_points,
        violations,
        process_capability,
    })
}

// ---------------------------------------------------------------------------
// R chart
// ---------------------------------------------------------------------------

/// R (subgroup range) chart analysis.
///
/// Uses the same subgrouping as [`analyze_xbar`]. The center line is the
/// average range; `UCL = D4·R-bar` and `LCL = D3·R-bar`. A point is out of
/// control when its range falls strictly outside the limits — the Western
/// Electric rule engine is applied only to X-bar statistic sequences, not
/// to ranges.
///
/// # Errors
///
/// - [`SpcError::InvalidParameter`] — `subgroup_size < 2` or non-finite data
/// - [`SpcError::InsufficientData`] — fewer than one full subgroup
pub fn analyze_r_chart(
    data: &[f64],
    subgroup_size: usize,
) -> Result<ControlChartResult, SpcError> {
    debug!(observations = data.len(), subgroup_size, "analyzing R chart");
    let (_, ranges) = subgroup_stats(data, subgroup_size)?;

    let r_bar = stats::mean(&ranges).expect("at least one subgroup");
    let ucl = d4_for(subgroup_size) * r_bar;
    let lcl = d3_for(subgroup_size) * r_bar;

    let out_of_control_points: Vec<usize> = ranges
        .iter()
        .enumerate()
        .filter(|&(_, &r)| r > ucl || r < lcl)
        .map(|(i, _)| i)
        .collect();

    Ok(ControlChartResult {
        chart_type: ChartType::R,
        center_line: r_bar,
        ucl,
        lcl,
        usl: None,
        lsl: None,
        out_of_control_points,
        violations: Vec::new(),
        process_capability: None,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
