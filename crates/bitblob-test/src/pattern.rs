//! Test bitmap builders
//!
//! ASCII patterns use `x` (or `1`) for foreground and `.` (or `0`) for
//! background. All rows of a pattern must have the same length.

use crate::error::{TestError, TestResult};
use bitblob_core::{Bitmap, BitmapMut, PixelDepth};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Build a 1-bpp bitmap from rows of ASCII art.
pub fn bitmap_from_rows(rows: &[&str]) -> TestResult<Bitmap> {
    let height = rows.len();
    let width = rows.first().map_or(0, |r| r.chars().count());
    let mut bm = BitmapMut::new(width as u32, height as u32, PixelDepth::Bit1)?;

    for (y, row) in rows.iter().enumerate() {
        if row.chars().count() != width {
            return Err(TestError::InvalidPattern {
                row: y,
                message: format!("expected {} columns, got {}", width, row.chars().count()),
            });
        }
        for (x, c) in row.chars().enumerate() {
            match c {
                'x' | '1' => bm.set_pixel_unchecked(x as u32, y as u32, 1),
                '.' | '0' => {}
                other => {
                    return Err(TestError::InvalidPattern {
                        row: y,
                        message: format!("unexpected character {:?}", other),
                    });
                }
            }
        }
    }

    Ok(bm.into())
}

/// Render a 1-bpp bitmap as rows of ASCII art.
pub fn bitmap_to_rows(bitmap: &Bitmap) -> Vec<String> {
    (0..bitmap.height())
        .map(|y| {
            (0..bitmap.width())
                .map(|x| {
                    if bitmap.get_pixel_unchecked(x, y) != 0 {
                        'x'
                    } else {
                        '.'
                    }
                })
                .collect()
        })
        .collect()
}

/// Build a reproducible random 1-bpp bitmap.
///
/// Each pixel is foreground with probability `density`.
pub fn random_bitmap(width: u32, height: u32, density: f64, seed: u64) -> TestResult<Bitmap> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut bm = BitmapMut::new(width, height, PixelDepth::Bit1)?;
    let density = density.clamp(0.0, 1.0);
    for y in 0..height {
        for x in 0..width {
            if rng.random_bool(density) {
                bm.set_pixel_unchecked(x, y, 1);
            }
        }
    }
    Ok(bm.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_roundtrip() {
        let rows = ["x..x", ".xx.", "...."];
        let bm = bitmap_from_rows(&rows).unwrap();
        assert_eq!(bm.width(), 4);
        assert_eq!(bm.height(), 3);
        assert_eq!(bm.count_ones(), 4);
        assert_eq!(bitmap_to_rows(&bm), rows);
    }

    #[test]
    fn test_ragged_pattern_rejected() {
        assert!(matches!(
            bitmap_from_rows(&["xx", "x"]),
            Err(TestError::InvalidPattern { row: 1, .. })
        ));
        assert!(bitmap_from_rows(&["x?"]).is_err());
    }

    #[test]
    fn test_random_bitmap_is_seeded() {
        let a = random_bitmap(50, 20, 0.4, 7).unwrap();
        let b = random_bitmap(50, 20, 0.4, 7).unwrap();
        let c = random_bitmap(50, 20, 0.4, 8).unwrap();
        assert!(a.equals(&b));
        assert!(!a.equals(&c));
        assert!(random_bitmap(10, 10, 0.0, 1).unwrap().count_ones() == 0);
        assert_eq!(random_bitmap(10, 10, 1.0, 1).unwrap().count_ones(), 100);
    }
}
