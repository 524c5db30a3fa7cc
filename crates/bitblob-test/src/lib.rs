//! bitblob-test - Regression test framework for bitblob
//!
//! This crate provides a small regression harness and bitmap builders
//! for the region and morphology tests:
//!
//! - [`RegParams`] tracks indexed checks and reports every failure at the end
//! - [`bitmap_from_rows`] / [`bitmap_to_rows`] convert between ASCII art and bitmaps
//! - [`random_bitmap`] creates reproducible noise images from a seed
//!
//! # Usage
//!
//! ```ignore
//! use bitblob_test::{RegParams, bitmap_from_rows};
//!
//! let mut rp = RegParams::new("conncomp");
//! let pix = bitmap_from_rows(&["xx.", ".xx"]).unwrap();
//! rp.compare_values(4.0, pix.count_ones() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "display" to print every compared bitmap

mod error;
mod params;
mod pattern;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};
pub use pattern::{bitmap_from_rows, bitmap_to_rows, random_bitmap};
