//! Attributes control chart: p (proportion defective).
//!
//! Monitors the fraction of defective items per sample using binomial
//! control limits computed from the pooled proportion and the average
//! sample size. Unlike a variable-limit p-chart, this design uses one
//! constant pair of limits for the whole sequence, matching the production
//! detector it replaces.
//!
//! # Formulas
//!
//! - CL = p-bar = total defects / total inspected (pooled, not the mean of
//!   per-sample proportions)
//! - UCL = p-bar + 3·√(p-bar·(1 − p-bar) / n-bar)
//! - LCL = max(0, p-bar − 3·√(p-bar·(1 − p-bar) / n-bar))
//!
//! # Reference
//!
//! Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*,
//! 8th ed., Chapter 7: Control Charts for Attributes.

use tracing::debug;

use crate::error::SpcError;

use super::chart::{ChartType, ControlChartResult};

/// p-chart (proportion defective) analysis.
///
/// `defects[i]` is the defect count observed in a sample of
/// `sample_sizes[i]` items; the plotted statistic for point `i` is the
/// per-sample proportion `defects[i] / sample_sizes[i]`. A point is out of
/// control when its proportion falls strictly outside `[LCL, UCL]`.
///
/// The LCL is explicitly clamped at zero — proportions cannot be negative.
///
/// # Errors
///
/// - [`SpcError::InvalidParameter`] — mismatched slice lengths, a zero
///   sample size, or a defect count exceeding its sample size
/// - [`SpcError::InsufficientData`] — empty input
///
/// # Examples
///
/// ```
/// use spc_analytics::spc::analyze_p_chart;
///
/// let defects = [2, 3, 1, 4];
/// let sizes = [100, 100, 100, 100];
/// let result = analyze_p_chart(&defects, &sizes).unwrap();
/// assert!((result.center_line - 0.025).abs() < 1e-12);
/// ```
pub fn analyze_p_chart(
    defects: &[u64],
    sample_sizes: &[u64],
) -> Result<ControlChartResult, SpcError> {
    debug!(samples = defects.len(), "analyzing p chart");
    if defects.len() != sample_sizes.len() {
        return Err(SpcError::invalid(format!(
            "defects and sample_sizes lengths differ ({} vs {})",
            defects.len(),
            sample_sizes.len()
        )));
    }
    if defects.is_empty() {
        return Err(SpcError::InsufficientData { needed: 1, got: 0 });
    }
    for (i, (&d, &n)) in defects.iter().zip(sample_sizes).enumerate() {
        if n == 0 {
            return Err(SpcError::invalid(format!("sample_sizes[{i}] is zero")));
        }
        if d > n {
            return Err(SpcError::invalid(format!(
                "defects[{i}] ({d}) exceeds sample_sizes[{i}] ({n})"
            )));
        }
    }

    let total_defects: u64 = defects.iter().sum();
    let total_inspected: u64 = sample_sizes.iter().sum();
    let p_bar = total_defects as f64 / total_inspected as f64;
    let n_bar = total_inspected as f64 / sample_sizes.len() as f64;

    let half_width = 3.0 * (p_bar * (1.0 - p_bar) / n_bar).sqrt();
    let ucl = p_bar + half_width;
    let lcl = (p_bar - half_width).max(0.0);

    let out_of_control_points: Vec<usize> = defects
        .iter()
        .zip(sample_sizes)
        .enumerate()
        .filter(|&(_, (&d, &n))| {
            let p = d as f64 / n as f64;
            p > ucl || p < lcl
        })
        .map(|(i, _)| i)
        .collect();

    Ok(ControlChartResult {
        chart_type: ChartType::P,
        center_line: p_bar,
        ucl,
        lcl,
        usl: None,
        lsl: None,
        out_of_control_points,
        violations: Vec::new(),
        process_capability: None,
    })
}
