//! bitblob - Binary raster analysis for Rust
//!
//! # Overview
//!
//! bitblob works on packed 1-bit-per-pixel images and provides:
//!
//! - Connected component labeling into run-length encoded components
//! - Painting, erasing and cropping components
//! - Binary morphology (dilation, erosion, opening, closing) and despeckling
//!
//! # Example
//!
//! ```
//! use bitblob::{Bitmap, BitmapMut, PixelDepth};
//! use bitblob::morph::{Sel, close};
//! use bitblob::region::find_connected_components;
//!
//! // Two dots one pixel apart
//! let mut pix_mut = BitmapMut::new(16, 8, PixelDepth::Bit1).unwrap();
//! pix_mut.set_pixel(5, 4, 1).unwrap();
//! pix_mut.set_pixel(7, 4, 1).unwrap();
//! let pix: Bitmap = pix_mut.into();
//! assert_eq!(find_connected_components(&pix).unwrap().len(), 2);
//!
//! // Closing with a horizontal line bridges the gap
//! let closed = close(&pix, &Sel::create_horizontal(3).unwrap(), 1).unwrap();
//! let components = find_connected_components(&closed).unwrap();
//! assert_eq!(components.len(), 1);
//! assert_eq!(components[0].power(), 3);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use bitblob_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use bitblob_morph as morph;
pub use bitblob_region as region;
