//! Binary morphological operations
//!
//! Erosion, dilation, opening and closing for 1-bpp images, each repeated
//! `iterations` times. Every iteration builds its mask from the *current*
//! image and then combines it into the image:
//!
//! - dilate: `image |= or_mask(image)`
//! - erode: `image &= and_mask(image)`
//!
//! Kernel samples outside the image are skipped (see [`crate::mask`]), so
//! with any SEL closing is extensive and opening is anti-extensive.
//! An iteration count of zero leaves the image unchanged.

use crate::mask::{MaskOp, Raster, accumulate, alloc_words, check_binary};
use crate::{MorphResult, Sel};
use bitblob_core::bits::{and_words, or_words};
use bitblob_core::{Bitmap, BitmapMut};

fn apply(op: MaskOp, pix: &mut BitmapMut, offsets: &[(i32, i32)], mask: &mut [u32]) {
    let raster = Raster::of(pix);
    accumulate(op, raster, pix.data(), offsets, mask, true);
    match op {
        MaskOp::Or => or_words(pix.data_mut(), mask),
        MaskOp::And => and_words(pix.data_mut(), mask),
    }
}

/// Run `steps` in order, `iterations` times, sharing one mask buffer.
fn run_in_place(
    pix: &mut BitmapMut,
    sel: &Sel,
    iterations: u32,
    steps: &[MaskOp],
) -> MorphResult<()> {
    check_binary(pix.depth())?;
    if iterations == 0 {
        return Ok(());
    }
    let offsets = sel.elements();
    log::debug!(
        "{:?} {}x{} with {} offsets, {} iterations",
        steps,
        pix.width(),
        pix.height(),
        offsets.len(),
        iterations
    );
    let mut mask = alloc_words(pix.data().len())?;
    for _ in 0..iterations {
        for &op in steps {
            apply(op, pix, &offsets, &mut mask);
        }
    }
    Ok(())
}

fn run(pix: &Bitmap, sel: &Sel, iterations: u32, steps: &[MaskOp]) -> MorphResult<Bitmap> {
    check_binary(pix.depth())?;
    let mut out = pix.to_mut();
    run_in_place(&mut out, sel, iterations, steps)?;
    Ok(out.into())
}

/// Dilate a binary image
///
/// Dilation expands foreground regions. Each iteration ORs every hit
/// translation of the image into the image.
///
/// # Arguments
/// * `pix` - 1 bpp input image
/// * `sel` - Structuring element
/// * `iterations` - Number of dilations to apply
pub fn dilate(pix: &Bitmap, sel: &Sel, iterations: u32) -> MorphResult<Bitmap> {
    run(pix, sel, iterations, &[MaskOp::Or])
}

/// Dilate a binary image in place
pub fn dilate_in_place(pix: &mut BitmapMut, sel: &Sel, iterations: u32) -> MorphResult<()> {
    run_in_place(pix, sel, iterations, &[MaskOp::Or])
}

/// Erode a binary image
///
/// Erosion shrinks foreground regions. A pixel survives an iteration only
/// if every in-bounds sample under the SEL is foreground.
pub fn erode(pix: &Bitmap, sel: &Sel, iterations: u32) -> MorphResult<Bitmap> {
    run(pix, sel, iterations, &[MaskOp::And])
}

/// Erode a binary image in place
pub fn erode_in_place(pix: &mut BitmapMut, sel: &Sel, iterations: u32) -> MorphResult<()> {
    run_in_place(pix, sel, iterations, &[MaskOp::And])
}

/// Open a binary image
///
/// Each iteration is one erosion followed by one dilation.
/// Removes small foreground objects and smooths contours.
pub fn open(pix: &Bitmap, sel: &Sel, iterations: u32) -> MorphResult<Bitmap> {
    run(pix, sel, iterations, &[MaskOp::And, MaskOp::Or])
}

/// Open a binary image in place
pub fn open_in_place(pix: &mut BitmapMut, sel: &Sel, iterations: u32) -> MorphResult<()> {
    run_in_place(pix, sel, iterations, &[MaskOp::And, MaskOp::Or])
}

/// Close a binary image
///
/// Each iteration is one dilation followed by one erosion.
/// Fills small holes and gaps in foreground regions.
pub fn close(pix: &Bitmap, sel: &Sel, iterations: u32) -> MorphResult<Bitmap> {
    run(pix, sel, iterations, &[MaskOp::Or, MaskOp::And])
}

/// Close a binary image in place
pub fn close_in_place(pix: &mut BitmapMut, sel: &Sel, iterations: u32) -> MorphResult<()> {
    run_in_place(pix, sel, iterations, &[MaskOp::Or, MaskOp::And])
}
