//! Bitmap regression test
//!
//! Cross-checks the word-level bit primitives and statistics against
//! per-pixel access on random images whose widths straddle word
//! boundaries.
//!
//! Run with:
//! ```
//! cargo test -p bitblob-core --test bitmap_reg
//! ```

use bitblob_core::bits::{bit_scan_one_forward, bit_scan_zero_forward, copy_bits};
use bitblob_core::{Bitmap, BitmapMut, PixelDepth, Rect};
use bitblob_test::{RegParams, random_bitmap};

const SIZES: [(u32, u32); 4] = [(1, 9), (31, 7), (32, 5), (95, 13)];

fn count_pixels(pix: &Bitmap, rect: &Rect) -> u64 {
    let mut n = 0;
    for y in rect.y.max(0)..rect.bottom().min(pix.height() as i32) {
        for x in rect.x.max(0)..rect.right().min(pix.width() as i32) {
            n += pix.get_pixel_unchecked(x as u32, y as u32) as u64;
        }
    }
    n
}

#[test]
fn bitmap_statistics_reg() {
    let mut rp = RegParams::new("bitmap_statistics");

    for (seed, &(w, h)) in SIZES.iter().enumerate() {
        let pix = random_bitmap(w, h, 0.5, seed as u64).unwrap();
        let full = Rect::new(0, 0, w as i32, h as i32).unwrap();
        let total = count_pixels(&pix, &full);

        rp.compare_values(total as f64, pix.count_ones() as f64, 0.0);
        rp.compare_values(total as f64, pix.black_area(&full).unwrap() as f64, 0.0);
        let rows: u32 = pix.row_histogram().unwrap().iter().sum();
        let cols: u32 = pix.column_histogram().unwrap().iter().sum();
        rp.compare_values(total as f64, rows as f64, 0.0);
        rp.compare_values(total as f64, cols as f64, 0.0);

        let inner = Rect::new(1, 2, w as i32 / 2 + 1, 3).unwrap();
        rp.compare_values(
            count_pixels(&pix, &inner) as f64,
            pix.black_area(&inner).unwrap() as f64,
            0.0,
        );

        // Complement keeps the padding clear
        let inv = pix.invert();
        rp.compare_values((w * h) as f64 - total as f64, inv.count_ones() as f64, 0.0);
        rp.compare_pix(&pix, &inv.invert());
    }

    assert!(rp.cleanup(), "bitmap_statistics regression test failed");
}

#[test]
fn bitmap_scan_reg() {
    let mut rp = RegParams::new("bitmap_scan");

    for (seed, &(w, h)) in SIZES.iter().enumerate() {
        let pix = random_bitmap(w, h, 0.4, 100 + seed as u64).unwrap();
        let mut rebuilt = BitmapMut::new(w, h, PixelDepth::Bit1).unwrap();

        // Walk every run with the scans and copy it across bit by bit
        for y in 0..h {
            let line = pix.row_data(y);
            let mut x = 0usize;
            while let Some(start) = bit_scan_one_forward(line, x, w as usize - x) {
                let end = bit_scan_zero_forward(line, start, w as usize - start).unwrap_or(w as usize);
                copy_bits(end - start, line, start, rebuilt.row_data_mut(y), start);
                x = end;
                if x >= w as usize {
                    break;
                }
            }
        }
        rp.compare_pix(&pix, &rebuilt.into());
    }

    assert!(rp.cleanup(), "bitmap_scan regression test failed");
}

#[test]
fn bitmap_logic_reg() {
    let mut rp = RegParams::new("bitmap_logic");

    let a = random_bitmap(70, 9, 0.5, 1).unwrap();
    let b = random_bitmap(70, 9, 0.5, 2).unwrap();

    let mut and = a.to_mut();
    and.and_with(&b).unwrap();
    let and: Bitmap = and.into();
    let mut or = a.to_mut();
    or.or_with(&b).unwrap();
    let or: Bitmap = or.into();

    // |A| + |B| = |A & B| + |A | B|
    rp.compare_values(
        (a.count_ones() + b.count_ones()) as f64,
        (and.count_ones() + or.count_ones()) as f64,
        0.0,
    );
    for y in 0..9 {
        for x in 0..70 {
            let (pa, pb) = (a.get_pixel_unchecked(x, y), b.get_pixel_unchecked(x, y));
            if and.get_pixel_unchecked(x, y) != (pa & pb) || or.get_pixel_unchecked(x, y) != (pa | pb) {
                rp.compare_values(0.0, 1.0, 0.0);
            }
        }
    }

    assert!(rp.cleanup(), "bitmap_logic regression test failed");
}
