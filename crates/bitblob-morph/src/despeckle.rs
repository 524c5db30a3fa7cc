//! Speckle removal for binary images
//!
//! A fixed sequence of ten mask passes, each applied to the image as left by
//! the previous one:
//!
//! 1. Drop foreground pixels with no foreground 8-neighbour.
//! 2. to 5. Drop foreground pixels whose only foreground neighbours lie on
//!    one side (left, top, right, bottom). This strips one-pixel spurs and
//!    dominoes.
//! 6. Fill background pixels whose 4 neighbours are all foreground.
//! 7. to 10. Fill background pixels enclosed on three sides, the mirror of
//!    passes 2 to 5.
//!
//! Blocks of at least 2x2 pixels that stay clear of the image edge and of
//! each other pass through unchanged.

use crate::MorphResult;
use crate::mask::{MaskOp, Raster, accumulate, alloc_words, check_binary};
use bitblob_core::bits::{and_words, count_one_bits, not_words, or_words};
use bitblob_core::{Bitmap, BitmapMut};

const NEIGHBOURS_8: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const NEIGHBOURS_4: [(i32, i32); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

/// One side of a pixel: the three cells of the adjacent column or row, and
/// the two cells flanking the pixel along that side.
struct Side {
    name: &'static str,
    outer: [(i32, i32); 3],
    flank: [(i32, i32); 2],
}

const SIDES: [Side; 4] = [
    Side {
        name: "left",
        outer: [(-1, -1), (-1, 0), (-1, 1)],
        flank: [(0, -1), (0, 1)],
    },
    Side {
        name: "top",
        outer: [(-1, -1), (0, -1), (1, -1)],
        flank: [(-1, 0), (1, 0)],
    },
    Side {
        name: "right",
        outer: [(1, -1), (1, 0), (1, 1)],
        flank: [(0, -1), (0, 1)],
    },
    Side {
        name: "bottom",
        outer: [(-1, 1), (0, 1), (1, 1)],
        flank: [(-1, 0), (1, 0)],
    },
];

/// Remove isolated specks and fill pinholes in a binary image.
///
/// Returns a new image; see [`despeckle_in_place`].
pub fn despeckle(pix: &Bitmap) -> MorphResult<Bitmap> {
    check_binary(pix.depth())?;
    let mut out = pix.to_mut();
    despeckle_in_place(&mut out)?;
    Ok(out.into())
}

/// Remove isolated specks and fill pinholes in place.
pub fn despeckle_in_place(pix: &mut BitmapMut) -> MorphResult<()> {
    check_binary(pix.depth())?;
    let raster = Raster::of(pix);
    let len = pix.data().len();
    let mut mask = alloc_words(len)?;
    let mut comp = alloc_words(len)?;
    let before = log::log_enabled!(log::Level::Debug).then(|| foreground(pix));

    // 1: keep only pixels with some 8-neighbour
    accumulate(MaskOp::Or, raster, pix.data(), &NEIGHBOURS_8, &mut mask, true);
    and_words(pix.data_mut(), &mask);
    log::trace!("despeckle: isolated pixels removed");

    // 2-5: strip pixels whose background surrounds them on three sides
    for side in &SIDES {
        comp.copy_from_slice(pix.data());
        not_words(&mut comp);
        accumulate(MaskOp::And, raster, &comp, &side.outer, &mut mask, true);
        accumulate(MaskOp::And, raster, &comp, &side.flank, &mut mask, false);
        not_words(&mut mask);
        and_words(pix.data_mut(), &mask);
        log::trace!("despeckle: {} spurs removed", side.name);
    }

    // 6: fill pinholes
    accumulate(MaskOp::And, raster, pix.data(), &NEIGHBOURS_4, &mut mask, true);
    or_words(pix.data_mut(), &mask);
    log::trace!("despeckle: pinholes filled");

    // 7-10: fill background notches open on one side
    for side in &SIDES {
        accumulate(MaskOp::And, raster, pix.data(), &side.outer, &mut mask, true);
        accumulate(MaskOp::And, raster, pix.data(), &side.flank, &mut mask, false);
        or_words(pix.data_mut(), &mask);
        log::trace!("despeckle: {} notches filled", side.name);
    }

    pix.clear_unused_bits();
    if let Some(before) = before {
        let after = foreground(pix);
        log::debug!(
            "despeckle {}x{}: {} -> {} foreground pixels",
            raster.width,
            raster.height,
            before,
            after
        );
    }
    Ok(())
}

fn foreground(pix: &BitmapMut) -> u64 {
    let w = pix.width() as usize;
    (0..pix.height())
        .map(|y| count_one_bits(pix.row_data(y), 0, w) as u64)
        .sum()
}
