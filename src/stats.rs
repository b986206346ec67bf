//! Shared numeric primitives.
//!
//! Small, Option-returning helpers used by every chart and detector.
//! `None` signals an empty slice or non-finite content; callers translate
//! that into the crate error taxonomy at their boundary.

use crate::error::SpcError;

/// Arithmetic mean, or `None` for an empty slice.
pub(crate) fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Sample standard deviation (n-1 denominator), or `None` for fewer than
/// 2 observations.
///
/// The n-1 denominator matches the reference implementation, which used
/// the default sample estimator throughout (CUSUM sigma, capability sigma).
pub(crate) fn std_dev(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    let m = mean(data)?;
    let sum_sq: f64 = data.iter().map(|&x| (x - m) * (x - m)).sum();
    Some((sum_sq / (data.len() - 1) as f64).sqrt())
}

/// Minimum value, or `None` for an empty slice.
pub(crate) fn min(data: &[f64]) -> Option<f64> {
    data.iter().copied().reduce(f64::min)
}

/// Maximum value, or `None` for an empty slice.
pub(crate) fn max(data: &[f64]) -> Option<f64> {
    data.iter().copied().reduce(f64::max)
}

/// Reject sequences containing NaN or infinity.
///
/// The engine promises bit-for-bit reproducible results; non-finite inputs
/// are rejected up front rather than silently poisoning every downstream
/// statistic.
pub(crate) fn ensure_finite(data: &[f64]) -> Result<(), SpcError> {
    if data.iter().all(|x| x.is_finite()) {
        Ok(())
    } else {
        Err(SpcError::invalid("data contains non-finite values"))
    }
}
