//! Core control chart result types.
//!
//! Defines the chart family tag and the immutable result object returned
//! by every chart analysis. Results are plain value types with serde
//! derives so that the surrounding system (HTTP handlers, dashboards,
//! batch jobs) can consume them directly.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::capability::ProcessCapability;

use super::rules::Violation;

/// Control chart family.
///
/// The serialized and displayed labels match the wire names consumed by
/// the surrounding reporting system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartType {
    /// Subgroup mean chart.
    #[serde(rename = "X-bar")]
    XBar,
    /// Subgroup range chart.
    R,
    /// Proportion defective chart.
    #[serde(rename = "p")]
    P,
    /// Cumulative sum chart.
    #[serde(rename = "CUSUM")]
    Cusum,
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ChartType::XBar => "X-bar",
            ChartType::R => "R",
            ChartType::P => "p",
            ChartType::Cusum => "CUSUM",
        };
        f.write_str(label)
    }
}

/// Immutable result of a control chart analysis.
///
/// Constructed once per call and never mutated; owned exclusively by the
/// caller.
///
/// # Invariants
///
/// - `lcl <= center_line <= ucl`, except where the chart family clamps the
///   LCL at 0 (R and p charts)
/// - every index in `out_of_control_points` lies within the plotted
///   statistic sequence, and the list is ascending and deduplicated
/// - `violations` holds one entry per (point, rule) combination that
///   fired; a point flagged by several rules appears once per rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlChartResult {
    /// Which chart family produced this result.
    pub chart_type: ChartType,
    /// The reference value plotted statistics are compared against.
    pub center_line: f64,
    /// Upper control limit.
    pub ucl: f64,
    /// Lower control limit (may be clamped to 0 for R and p charts).
    pub lcl: f64,
    /// Upper specification limit, when supplied by the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usl: Option<f64>,
    /// Lower specification limit, when supplied by the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lsl: Option<f64>,
    /// Deduplicated ascending indices into the plotted statistic sequence
    /// flagged by any rule or threshold check.
    pub out_of_control_points: Vec<usize>,
    /// One entry per (point, rule) combination that fired, ordered by
    /// point index.
    pub violations: Vec<Violation>,
    /// Capability indices, present only when both specification limits
    /// were supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_capability: Option<ProcessCapability>,
}

impl ControlChartResult {
    /// `true` when no rule or threshold check flagged any point.
    pub fn is_in_control(&self) -> bool {
        self.out_of_control_points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_type_display() {
        assert_eq!(ChartType::XBar.to_string(), "X-bar");
        assert_eq!(ChartType::R.to_string(), "R");
        assert_eq!(ChartType::P.to_string(), "p");
        assert_eq!(ChartType::Cusum.to_string(), "CUSUM");
    }

    #[test]
    fn test_chart_type_serde_labels() {
        assert_eq!(serde_json::to_string(&ChartType::XBar).unwrap(), "\"X-bar\"");
        assert_eq!(serde_json::to_string(&ChartType::P).unwrap(), "\"p\"");
        assert_eq!(serde_json::to_string(&ChartType::Cusum).unwrap(), "\"CUSUM\"");
    }

    #[test]
    fn test_result_serde_round_trip() {
        let result = ControlChartResult {
            chart_type: ChartType::R,
            center_line: 4.2,
            ucl: 8.88,
            lcl: 0.0,
            usl: None,
            lsl: None,
            out_of_control_points: vec![3],
            violations: Vec::new(),
            process_capability: None,
        };
        let json = serde_json::to_string(&result).unwrap();
        // Absent optional fields are omitted from the wire format.
        assert!(!json.contains("usl"));
        assert!(!json.contains("process_capability"));

        let back: ControlChartResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.chart_type, ChartType::R);
        assert_eq!(back.out_of_control_points, vec![3]);
        assert!(back.process_capability.is_none());
    }

    #[test]
    fn test_is_in_control() {
        let mut result = ControlChartResult {
            chart_type: ChartType::XBar,
            center_line: 10.0,
            ucl: 11.0,
            lcl: 9.0,
            usl: None,
            lsl: None,
            out_of_control_points: Vec::new(),
            violations: Vec::new(),
            process_capability: None,
        };
        assert!(result.is_in_control());
        result.out_of_control_points.push(0);
        assert!(!result.is_in_control());
    }
}
