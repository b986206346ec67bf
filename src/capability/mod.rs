//! Process capability analysis.
//!
//! Quantifies how well the process output fits within externally supplied
//! specification limits, independent of the control limits computed by the
//! charts in [`crate::spc`].
//!
//! # Indices
//!
//! - **Cp** — Potential capability (spread vs tolerance)
//! - **Cpk** — Actual capability (centering considered)
//! - **Pp**, **Ppk** — Performance indices
//!
//! # Reference
//!
//! Montgomery (2019), *Introduction to Statistical Quality Control*, 8th ed.,
//! Chapter 8.

mod indices;

pub use indices::{process_capability, ProcessCapability};
