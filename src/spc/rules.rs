//! Western Electric run rules for out-of-control detection.
//!
//! Applied to a sequence of plotted statistics (subgroup means, or any
//! Shewhart-style statistic) against the chart center line and 3-sigma
//! limits. The zone width is recovered from the limits as
//! `sigma = (UCL - CL) / 3`.
//!
//! All four rules are evaluated independently with a sliding window over
//! the full sequence — O(n) per rule with a constant window size. A single
//! point may trigger several rules; each firing rule contributes its own
//! [`Violation`] entry.
//!
//! Rules 2 and 3 test the magnitude of the deviation from the center line
//! (`|x - CL|` beyond the zone boundary) without requiring the qualifying
//! points to fall on the same side. The classic handbook formulation adds
//! a same-side requirement; this engine replicates the magnitude semantics
//! of the production detector it replaces.
//!
//! # References
//!
//! - Western Electric (1956). *Statistical Quality Control Handbook*.
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// The four Western Electric run rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WesternElectricRule {
    /// Rule 1: a single point beyond the 3-sigma control limits.
    Beyond3Sigma,
    /// Rule 2: 2 of 3 consecutive points beyond 2 sigma from the center line.
    TwoOfThreeBeyond2Sigma,
    /// Rule 3: 4 of 5 consecutive points beyond 1 sigma from the center line.
    FourOfFiveBeyond1Sigma,
    /// Rule 4: 8 consecutive points strictly on one side of the center line.
    EightConsecutiveSameSide,
}

impl fmt::Display for WesternElectricRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            WesternElectricRule::Beyond3Sigma => "Point beyond 3 sigma",
            WesternElectricRule::TwoOfThreeBeyond2Sigma => "2 out of 3 beyond 2 sigma",
            WesternElectricRule::FourOfFiveBeyond1Sigma => "4 out of 5 beyond 1 sigma",
            WesternElectricRule::EightConsecutiveSameSide => {
                "8 consecutive points on same side of center"
            }
        };
        f.write_str(description)
    }
}

/// A rule violation at a specific chart point.
///
/// `point_index` is a zero-based index into the plotted statistic sequence,
/// not the raw measurement sequence. Window rules flag the last point of
/// the qualifying window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Zero-based index of the flagged point in the plotted sequence.
    pub point_index: usize,
    /// The rule that fired.
    pub rule: WesternElectricRule,
}

/// Apply all four Western Electric rules to a plotted statistic sequence.
///
/// Returns one [`Violation`] per (point, rule) combination that fired,
/// sorted by point index. Rule evaluation order does not affect which
/// points end up flagged.
///
/// For a degenerate chart where `ucl == lcl == center_line` (constant
/// data), sigma is 0: the strict comparisons mean no rule fires.
pub fn apply_western_electric_rules(
    values: &[f64],
    center_line: f64,
    ucl: f64,
    lcl: f64,
) -> Vec<Violation> {
    let sigma = (ucl - center_line) / 3.0;
    let mut violations = Vec::new();

    // Rule 1: point beyond the control limits (strict).
    for (i, &v) in values.iter().enumerate() {
        if v > ucl || v < lcl {
            violations.push(Violation {
                point_index: i,
                rule: WesternElectricRule::Beyond3Sigma,
            });
        }
    }

    // Rule 2: 2 of 3 consecutive points beyond 2 sigma; flag the window's
    // last point.
    for (i, window) in values.windows(3).enumerate() {
        let beyond = window
            .iter()
            .filter(|&&v| (v - center_line).abs() > 2.0 * sigma)
            .count();
        if beyond >= 2 {
            violations.push(Violation {
                point_index: i + 2,
                rule: WesternElectricRule::TwoOfThreeBeyond2Sigma,
            });
        }
    }

    // Rule 3: 4 of 5 consecutive points beyond 1 sigma; flag the window's
    // last point.
    for (i, window) in values.windows(5).enumerate() {
        let beyond = window
            .iter()
            .filter(|&&v| (v - center_line).abs() > sigma)
            .count();
        if beyond >= 4 {
            violations.push(Violation {
                point_index: i + 4,
                rule: WesternElectricRule::FourOfFiveBeyond1Sigma,
            });
        }
    }

    // Rule 4: 8 consecutive points strictly above or strictly below the
    // center line; flag the window's last point. Points exactly on the
    // center line break the run.
    for (i, window) in values.windows(8).enumerate() {
        let all_above = window.iter().all(|&v| v > center_line);
        let all_below = window.iter().all(|&v| v < center_line);
        if all_above || all_below {
            violations.push(Violation {
                point_index: i + 7,
                rule: WesternElectricRule::EightConsecutiveSameSide,
            });
        }
    }

    // Stable sort: violations at the same point keep rule-number order.
    violations.sort_by_key(|v| v.point_index);
    violations
}

/// Deduplicated ascending indices of all flagged points.
pub fn flagged_indices(violations: &[Violation]) -> Vec<usize> {
    violations
        .iter()
        .map(|v| v.point_index)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CL: f64 = 25.0;
    const UCL: f64 = 28.0; // sigma = 1.0
    const LCL: f64 = 22.0;

    fn rule_indices(violations: &[Violation], rule: WesternElectricRule) -> Vec<usize> {
        violations
            .iter()
            .filter(|v| v.rule == rule)
            .map(|v| v.point_index)
            .collect()
    }

    // --- Rule 1 ---

    #[test]
    fn test_rule1_beyond_limits() {
        let values = [25.0, 28.5, 25.0, 21.5];
        let violations = apply_western_electric_rules(&values, CL, UCL, LCL);
        assert_eq!(
            rule_indices(&violations, WesternElectricRule::Beyond3Sigma),
            vec![1, 3]
        );
    }

    #[test]
    fn test_rule1_on_limit_is_not_flagged() {
        let values = [28.0, 22.0];
        let violations = apply_western_electric_rules(&values, CL, UCL, LCL);
        assert!(violations.is_empty());
    }

    // --- Rule 2 ---

    #[test]
    fn test_rule2_two_of_three_flags_window_end() {
        // Points 0 and 2 are beyond 2 sigma (|v - 25| > 2); flag index 2.
        let values = [27.5, 25.0, 27.5];
        let violations = apply_western_electric_rules(&values, CL, UCL, LCL);
        assert_eq!(
            rule_indices(&violations, WesternElectricRule::TwoOfThreeBeyond2Sigma),
            vec![2]
        );
    }

    #[test]
    fn test_rule2_magnitude_semantics_mixed_sides() {
        // One point beyond +2 sigma, one beyond -2 sigma: the magnitude
        // check counts both, so the window fires.
        let values = [27.5, 25.0, 22.5];
        let violations = apply_western_electric_rules(&values, CL, UCL, LCL);
        assert_eq!(
            rule_indices(&violations, WesternElectricRule::TwoOfThreeBeyond2Sigma),
            vec![2]
        );
    }

    #[test]
    fn test_rule2_one_of_three_does_not_fire() {
        let values = [27.5, 25.0, 25.0];
        let violations = apply_western_electric_rules(&values, CL, UCL, LCL);
        assert!(rule_indices(&violations, WesternElectricRule::TwoOfThreeBeyond2Sigma).is_empty());
    }

    // --- Rule 3 ---

    #[test]
    fn test_rule3_four_of_five_flags_window_end() {
        // Four points beyond 1 sigma (|v - 25| > 1), one inside; flag index 4.
        let values = [26.5, 26.5, 25.0, 26.5, 26.5];
        let violations = apply_western_electric_rules(&values, CL, UCL, LCL);
        assert_eq!(
            rule_indices(&violations, WesternElectricRule::FourOfFiveBeyond1Sigma),
            vec![4]
        );
    }

    #[test]
    fn test_rule3_three_of_five_does_not_fire() {
        let values = [26.5, 26.5, 25.0, 26.5, 25.0];
        let violations = apply_western_electric_rules(&values, CL, UCL, LCL);
        assert!(rule_indices(&violations, WesternElectricRule::FourOfFiveBeyond1Sigma).is_empty());
    }

    // --- Rule 4 ---

    #[test]
    fn test_rule4_exactly_eight_then_break() {
        // 8 consecutive points above the center line followed by one below:
        // exactly index 7 is flagged, not index 8.
        let mut values = vec![25.5; 8];
        values.push(24.5);
        let violations = apply_western_electric_rules(&values, CL, UCL, LCL);
        assert_eq!(
            rule_indices(&violations, WesternElectricRule::EightConsecutiveSameSide),
            vec![7]
        );
    }

    #[test]
    fn test_rule4_nine_in_a_row_flags_two_windows() {
        let values = vec![24.5; 9];
        let violations = apply_western_electric_rules(&values, CL, UCL, LCL);
        assert_eq!(
            rule_indices(&violations, WesternElectricRule::EightConsecutiveSameSide),
            vec![7, 8]
        );
    }

    #[test]
    fn test_rule4_point_on_center_breaks_run() {
        let mut values = vec![25.5; 4];
        values.push(25.0); // exactly on the center line
        values.extend(vec![25.5; 4]);
        let violations = apply_western_electric_rules(&values, CL, UCL, LCL);
        assert!(
            rule_indices(&violations, WesternElectricRule::EightConsecutiveSameSide).is_empty()
        );
    }

    // --- Combined behaviour ---

    #[test]
    fn test_point_may_fire_multiple_rules() {
        // Two huge points in a 3-window: index 2 fires Rule 1 and Rule 2.
        let values = [29.0, 25.0, 29.0];
        let violations = apply_western_electric_rules(&values, CL, UCL, LCL);
        let at_two: Vec<_> = violations.iter().filter(|v| v.point_index == 2).collect();
        assert!(at_two.len() >= 2);
        assert_eq!(flagged_indices(&violations), vec![0, 2]);
    }

    #[test]
    fn test_flagged_indices_deduplicates_and_sorts() {
        let violations = [
            Violation {
                point_index: 5,
                rule: WesternElectricRule::Beyond3Sigma,
            },
            Violation {
                point_index: 2,
                rule: WesternElectricRule::TwoOfThreeBeyond2Sigma,
            },
            Violation {
                point_index: 5,
                rule: WesternElectricRule::FourOfFiveBeyond1Sigma,
            },
        ];
        assert_eq!(flagged_indices(&violations), vec![2, 5]);
    }

    #[test]
    fn test_degenerate_limits_fire_nothing() {
        // Constant data collapses the limits; sigma = 0 and the strict
        // comparisons keep every rule quiet.
        let values = vec![10.0; 20];
        let violations = apply_western_electric_rules(&values, 10.0, 10.0, 10.0);
        assert!(violations.is_empty());
    }

    #[test]
    fn test_short_sequences_do_not_panic() {
        assert!(apply_western_electric_rules(&[], CL, UCL, LCL).is_empty());
        assert!(apply_western_electric_rules(&[25.0], CL, UCL, LCL).is_empty());
        assert!(apply_western_electric_rules(&[25.0, 25.0], CL, UCL, LCL).is_empty());
    }

    #[test]
    fn test_rule_descriptions() {
        assert_eq!(
            WesternElectricRule::Beyond3Sigma.to_string(),
            "Point beyond 3 sigma"
        );
        assert_eq!(
            WesternElectricRule::EightConsecutiveSameSide.to_string(),
            "8 consecutive points on same side of center"
        );
    }
}
