//! bitblob-core - Basic data structures for binary raster analysis
//!
//! This crate provides the fundamental pieces used throughout bitblob:
//!
//! - [`Bitmap`] / [`BitmapMut`] - The packed image container (immutable / mutable)
//! - [`bits`] - Bit scans, counts and bit-window combines over word rows
//! - [`Rect`] / [`Bounded`] - Rectangle regions and the bounded-object capability
//! - Foreground statistics: [`Bitmap::count_ones`], [`Bitmap::black_area`],
//!   row and column histograms

pub mod bitmap;
pub mod bits;
pub mod error;
pub mod rect;

pub use bitmap::{Bitmap, BitmapMut, PixelDepth};
pub use error::{Error, Result};
pub use rect::{Bounded, Rect, bounding_rect};
