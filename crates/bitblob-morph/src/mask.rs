//! OR/AND mask construction from a structuring element
//!
//! A mask accumulates translated copies of a source raster, one per hit
//! offset of the SEL:
//!
//! - OR mask (dilation sense): `mask(x, y) |= src(x - dx, y - dy)`
//! - AND mask (erosion sense): `mask(x, y) &= src(x + dx, y + dy)`
//!
//! A sample that would be read from outside the image is excluded from
//! the accumulation: the mask bit keeps whatever value it had. Border
//! pixels are therefore neither forced on nor forced off by the missing
//! neighbourhood.
//!
//! Offsets with `dx == 0` are pure row translations and run word by word.
//! Other offsets combine `width - |dx|` bits per row at a bit offset.

use crate::{MorphError, MorphResult, Sel};
use bitblob_core::bits::{and_bits, and_words, or_bits, or_words};
use bitblob_core::{Bitmap, BitmapMut, PixelDepth};

/// Accumulation rule of a mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MaskOp {
    Or,
    And,
}

/// Row geometry shared by a source raster and its mask
#[derive(Debug, Clone, Copy)]
pub(crate) struct Raster {
    pub width: usize,
    pub height: usize,
    pub wpl: usize,
}

impl Raster {
    pub fn of(pix: &BitmapMut) -> Self {
        Self {
            width: pix.width() as usize,
            height: pix.height() as usize,
            wpl: pix.wpl() as usize,
        }
    }

    fn clear_unused_bits(&self, data: &mut [u32]) {
        let extra = self.width % 32;
        if extra == 0 {
            return;
        }
        let keep = !0u32 << (32 - extra);
        for row in data.chunks_exact_mut(self.wpl) {
            row[self.wpl - 1] &= keep;
        }
    }
}

/// Accumulate `src` into `mask` for every offset.
///
/// Leaves the mask padding bits cleared.
pub(crate) fn accumulate(
    op: MaskOp,
    raster: Raster,
    src: &[u32],
    offsets: &[(i32, i32)],
    mask: &mut [u32],
    reset_mask_first: bool,
) {
    if reset_mask_first {
        match op {
            MaskOp::Or => mask.fill(0),
            MaskOp::And => mask.fill(!0),
        }
    }

    let Raster { width, height, wpl } = raster;
    for &(dx, dy) in offsets {
        // Source displacement: mask(x, y) op= src(x + sx, y + sy)
        let (sx, sy) = match op {
            MaskOp::Or => (-(dx as i64), -(dy as i64)),
            MaskOp::And => (dx as i64, dy as i64),
        };
        let shift = sx.unsigned_abs() as usize;
        if shift >= width {
            continue;
        }
        let count = width - shift;
        let (src_col, dst_col) = if sx >= 0 { (shift, 0) } else { (0, shift) };

        for y in 0..height {
            let ys = y as i64 + sy;
            if ys < 0 || ys >= height as i64 {
                continue;
            }
            let src_row = &src[ys as usize * wpl..(ys as usize + 1) * wpl];
            let dst_row = &mut mask[y * wpl..(y + 1) * wpl];
            match (op, shift) {
                (MaskOp::Or, 0) => or_words(dst_row, src_row),
                (MaskOp::And, 0) => and_words(dst_row, src_row),
                (MaskOp::Or, _) => or_bits(count, src_row, src_col, dst_row, dst_col),
                (MaskOp::And, _) => and_bits(count, src_row, src_col, dst_row, dst_col),
            }
        }
    }

    raster.clear_unused_bits(mask);
}

/// Allocate a zeroed word buffer, reporting allocation failure.
pub(crate) fn alloc_words(len: usize) -> MorphResult<Vec<u32>> {
    let mut words = Vec::new();
    words
        .try_reserve_exact(len)
        .map_err(|_| MorphError::Core(bitblob_core::Error::AllocationFailed))?;
    words.resize(len, 0);
    Ok(words)
}

pub(crate) fn check_binary(depth: PixelDepth) -> MorphResult<()> {
    if depth != PixelDepth::Bit1 {
        return Err(MorphError::UnsupportedDepth {
            expected: "1-bpp binary",
            actual: depth.bits(),
        });
    }
    Ok(())
}

fn build_mask(
    op: MaskOp,
    image: &Bitmap,
    sel: &Sel,
    alt_source: Option<&[u32]>,
    mask: &mut BitmapMut,
    reset_mask_first: bool,
) -> MorphResult<()> {
    check_binary(image.depth())?;
    check_binary(mask.depth())?;
    if image.width() != mask.width() || image.height() != mask.height() {
        return Err(bitblob_core::Error::IncompatibleSizes(
            image.width(),
            image.height(),
            mask.width(),
            mask.height(),
        )
        .into());
    }
    let src = match alt_source {
        Some(words) if words.len() != image.data().len() => {
            return Err(MorphError::InvalidParameters(format!(
                "alternate source has {} words, image has {}",
                words.len(),
                image.data().len()
            )));
        }
        Some(words) => words,
        None => image.data(),
    };

    let raster = Raster::of(mask);
    let offsets = sel.elements();
    accumulate(op, raster, src, &offsets, mask.data_mut(), reset_mask_first);
    Ok(())
}

/// Build the OR mask of `image` (or of `alt_source`) under `sel`.
///
/// # Arguments
/// * `image` - 1 bpp image supplying the geometry and, by default, the bits
/// * `sel` - Structuring element
/// * `alt_source` - Words to read instead of the image data, laid out like it
/// * `mask` - 1 bpp output of the same size as `image`
/// * `reset_mask_first` - Clear the mask before accumulating; when false the
///   new offsets are ORed into the existing mask contents
pub fn build_or_mask(
    image: &Bitmap,
    sel: &Sel,
    alt_source: Option<&[u32]>,
    mask: &mut BitmapMut,
    reset_mask_first: bool,
) -> MorphResult<()> {
    build_mask(MaskOp::Or, image, sel, alt_source, mask, reset_mask_first)
}

/// Build the AND mask of `image` (or of `alt_source`) under `sel`.
///
/// With `reset_mask_first` the mask starts as all ones; otherwise the new
/// offsets are ANDed into the existing mask contents.
pub fn build_and_mask(
    image: &Bitmap,
    sel: &Sel,
    alt_source: Option<&[u32]>,
    mask: &mut BitmapMut,
    reset_mask_first: bool,
) -> MorphResult<()> {
    build_mask(MaskOp::And, image, sel, alt_source, mask, reset_mask_first)
}
