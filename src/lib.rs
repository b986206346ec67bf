//! # spc-analytics
//!
//! Statistical Process Control (SPC) analysis engine for manufacturing
//! quality monitoring: Shewhart control charts, Western Electric run rules,
//! CUSUM/EWMA drift detection, and process capability indices.
//!
//! The engine consumes a complete, finite sequence of process measurements
//! and returns an immutable result describing the control limits, every
//! rule violation, and (when specification limits are supplied) how capable
//! the process is of meeting them.
//!
//! ## Modules
//!
//! - [`spc`] — Control charts (X-bar, R, p) with Western Electric run rules
//! - [`detection`] — Drift detection (CUSUM, EWMA)
//! - [`capability`] — Process capability indices (Cp, Cpk, Pp, Ppk)
//! - [`error`] — Error taxonomy shared by all operations
//!
//! ## Design Philosophy
//!
//! - **Pure and stateless**: every operation is a pure computation over its
//!   inputs — no I/O, no shared mutable state, safe to call concurrently
//! - **Reproducible**: identical inputs and parameters produce bit-for-bit
//!   identical numeric results
//! - **No partial results**: an operation either returns a complete,
//!   internally consistent result or an [`SpcError`]
//!
//! ## Example
//!
//! ```
//! use spc_analytics::spc::analyze_xbar;
//!
//! let data: Vec<f64> = (0..25).map(|i| 10.0 + (i % 5) as f64).collect();
//! let result = analyze_xbar(&data, 5, None, None).unwrap();
//! assert!(result.lcl <= result.center_line && result.center_line <= result.ucl);
//! ```

pub mod capability;
pub mod detection;
pub mod error;
pub mod spc;

mod stats;

pub use error::SpcError;
