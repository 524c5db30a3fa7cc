//! Painting components into bitmaps and cropping them out
//!
//! Runs are clipped to the target image; pixels that fall outside it are
//! ignored.

use crate::component::ConnectedComponent;
use crate::error::{RegionError, RegionResult};
use bitblob_core::bits::{copy_bits, reset_bits, set_bits};
use bitblob_core::{Bitmap, BitmapMut, PixelDepth, Rect, bounding_rect};

fn check_binary(depth: PixelDepth) -> RegionResult<()> {
    if depth != PixelDepth::Bit1 {
        return Err(RegionError::UnsupportedDepth {
            expected: "1-bpp binary",
            actual: depth.bits(),
        });
    }
    Ok(())
}

/// Visit every run of `cc` clipped to a `width` x `height` image as
/// `(row, start, count)`.
fn clipped_runs(
    cc: &ConnectedComponent,
    width: u32,
    height: u32,
) -> impl Iterator<Item = (u32, usize, usize)> + '_ {
    let (w, h) = (width as i64, height as i64);
    cc.runs().iter().filter_map(move |r| {
        let y = r.y as i64;
        let x0 = (r.x as i64).max(0);
        let x1 = (r.end() as i64).min(w);
        (y >= 0 && y < h && x0 < x1).then(|| (y as u32, x0 as usize, (x1 - x0) as usize))
    })
}

/// Set every pixel of `cc` in `pix`
pub fn add_connected_component(pix: &mut BitmapMut, cc: &ConnectedComponent) -> RegionResult<()> {
    check_binary(pix.depth())?;
    let (w, h) = (pix.width(), pix.height());
    for (y, start, count) in clipped_runs(cc, w, h) {
        set_bits(pix.row_data_mut(y), start, count);
    }
    Ok(())
}

/// Clear every pixel of `cc` in `pix`
pub fn remove_connected_component(pix: &mut BitmapMut, cc: &ConnectedComponent) -> RegionResult<()> {
    check_binary(pix.depth())?;
    let (w, h) = (pix.width(), pix.height());
    for (y, start, count) in clipped_runs(cc, w, h) {
        reset_bits(pix.row_data_mut(y), start, count);
    }
    Ok(())
}

/// Copy the source bits under each component's runs into `out`, whose
/// top-left corner sits at `origin` in source coordinates.
fn copy_runs(source: &Bitmap, ccs: &[ConnectedComponent], origin: &Rect, out: &mut BitmapMut) {
    for cc in ccs {
        for (y, start, count) in clipped_runs(cc, source.width(), source.height()) {
            let dst_x = start as i64 - origin.x as i64;
            let dst_y = y as i64 - origin.y as i64;
            if dst_x < 0 || dst_y < 0 {
                continue;
            }
            copy_bits(
                count,
                source.row_data(y),
                start,
                out.row_data_mut(dst_y as u32),
                dst_x as usize,
            );
        }
    }
}

fn crop(source: &Bitmap, ccs: &[ConnectedComponent]) -> RegionResult<Bitmap> {
    check_binary(source.depth())?;
    let bounds = bounding_rect(ccs);
    if bounds.is_empty() {
        return Err(RegionError::InvalidParameters(
            "cannot crop an empty component".to_string(),
        ));
    }
    let mut out = BitmapMut::new(bounds.w as u32, bounds.h as u32, PixelDepth::Bit1)?;
    copy_runs(source, ccs, &bounds, &mut out);
    Ok(out.into())
}

/// Crop the pixels of `cc` out of `source`
///
/// The result has the size of the component's bounds. Only pixels under
/// the component's runs are copied; the rest of the rectangle stays
/// background.
///
/// # Errors
///
/// Returns [`RegionError::InvalidParameters`] for an empty component.
pub fn crop_connected_component(source: &Bitmap, cc: &ConnectedComponent) -> RegionResult<Bitmap> {
    crop(source, std::slice::from_ref(cc))
}

/// Crop the pixels of several components out of `source`
///
/// The result covers the union of the components' bounds.
pub fn crop_connected_components(
    source: &Bitmap,
    ccs: &[ConnectedComponent],
) -> RegionResult<Bitmap> {
    crop(source, ccs)
}
