//! Square Roots by Hand
//!
//! Square root algorithms built from elementary arithmetic, plus the
//! configuration, logging and cross-validation plumbing the CLI drives.

pub mod config;
pub mod logging;
pub mod oracle;
pub mod roots;
pub mod verify;

pub use oracle::{HardwareOracle, ReferenceOracle};
pub use roots::{Precision, Refinement, SqrtError, Variant};
