//! bitblob-region - Connected components of binary images
//!
//! This crate provides:
//!
//! - **Run-length components** - [`ConnectedComponent`], a sorted, mergeable
//!   list of horizontal [`Run`]s with exact pixel count and bounds
//! - **Labeling** - a single-pass labeler that splits a 1-bpp image into
//!   disjoint components
//! - **Raster operations** - painting components into images, erasing them,
//!   and cropping them out
//!
//! Runs on adjacent rows belong to the same component when their columns
//! overlap; a purely diagonal contact does not connect them.
//!
//! # Examples
//!
//! ```
//! use bitblob_core::{Bitmap, BitmapMut, Bounded, PixelDepth, Rect};
//! use bitblob_region::find_connected_components;
//!
//! let mut pix_mut = BitmapMut::new(8, 8, PixelDepth::Bit1).unwrap();
//! pix_mut.set_pixel(3, 3, 1).unwrap();
//! pix_mut.set_pixel(6, 1, 1).unwrap();
//! pix_mut.set_pixel(6, 2, 1).unwrap();
//! let pix: Bitmap = pix_mut.into();
//!
//! let components = find_connected_components(&pix).unwrap();
//! assert_eq!(components.len(), 2);
//! assert_eq!(components[0].bounds(), Rect::new(6, 1, 1, 2).unwrap());
//! assert_eq!(components[1].power(), 1);
//! ```

pub mod component;
pub mod conncomp;
pub mod error;
pub mod raster;

// Re-export core types
pub use bitblob_core;

pub use error::{RegionError, RegionResult};

pub use component::{ConnectedComponent, Run};
pub use conncomp::{
    LabelOptions, count_connected_components, filter_components_by_size,
    find_connected_components, find_connected_components_with, label_components,
};
pub use raster::{
    add_connected_component, crop_connected_component, crop_connected_components,
    remove_connected_component,
};
