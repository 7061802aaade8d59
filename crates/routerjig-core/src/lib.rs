//! # RouterJig Core
//!
//! Core types shared by the RouterJig crates: parameter errors, the fixed-point
//! [`Fixed`] length and the increment-based [`Units`] model.

pub mod error;
pub mod fixed;
pub mod units;

pub use error::{ParameterError, ParameterResult};
pub use fixed::{Fixed, FIXED_SCALE};
pub use units::{get_unit_label, parse_length, MeasurementSystem, Units, MM_PER_INCH};
