//! bitblob-morph - Binary morphology for packed 1-bpp bitmaps
//!
//! This crate provides:
//!
//! - Structuring elements (SEL) for defining operation neighborhoods
//! - OR/AND mask construction with exact border semantics
//! - Binary morphology: erosion, dilation, opening, closing
//! - Despeckling: removal of isolated pixels and filling of pinholes

pub mod binary;
pub mod despeckle;
mod error;
pub mod mask;
pub mod sel;

pub use error::{MorphError, MorphResult};
pub use sel::{MAX_SEL_ELEMENTS, Sel, SelElement};

pub use binary::{
    close, close_in_place, dilate, dilate_in_place, erode, erode_in_place, open, open_in_place,
};
pub use despeckle::{despeckle, despeckle_in_place};
pub use mask::{build_and_mask, build_or_mask};
