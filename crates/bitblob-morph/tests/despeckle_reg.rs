//! Despeckle regression test
//!
//! Builds a clean layout of separated blocks, checks that despeckling leaves
//! it unchanged, then adds isolated noise pixels and pinholes and checks
//! that despeckling restores the clean layout.
//!
//! Run with:
//! ```
//! cargo test -p bitblob-morph --test despeckle_reg
//! ```

use bitblob_core::{Bitmap, BitmapMut, PixelDepth};
use bitblob_morph::{despeckle, despeckle_in_place};
use bitblob_test::{RegParams, bitmap_from_rows};

const CELL: u32 = 10;
const COLS: u32 = 6;
const ROWS: u32 = 4;

/// Block of 2..=7 by 2..=7 pixels at offset (1, 1) of each 10x10 cell
fn block_size(i: u32, j: u32) -> (u32, u32) {
    (2 + (i * 5 + j * 3) % 6, 2 + (i * 2 + j * 5) % 6)
}

fn clean_layout() -> BitmapMut {
    let mut pm = BitmapMut::new(COLS * CELL + 3, ROWS * CELL + 1, PixelDepth::Bit1).unwrap();
    for j in 0..ROWS {
        for i in 0..COLS {
            let (w, h) = block_size(i, j);
            for y in 0..h {
                for x in 0..w {
                    pm.set_pixel_unchecked(i * CELL + 1 + x, j * CELL + 1 + y, 1);
                }
            }
        }
    }
    pm
}

#[test]
fn despeckle_reg() {
    let mut rp = RegParams::new("despeckle");

    let clean: Bitmap = clean_layout().into();
    eprintln!("Clean layout: {} pixels", clean.count_ones());

    // Clean input passes through unchanged
    let out = despeckle(&clean).unwrap();
    rp.compare_pix(&clean, &out);

    // Isolated noise in the lower-right corner of every cell
    let mut noisy = clean.to_mut();
    for j in 0..ROWS {
        for i in 0..COLS {
            noisy.set_pixel_unchecked(i * CELL + 9, j * CELL + 9, 1);
        }
    }
    // Pinholes inside every block of at least 3x3
    let mut holes = 0;
    for j in 0..ROWS {
        for i in 0..COLS {
            let (w, h) = block_size(i, j);
            if w >= 3 && h >= 3 {
                noisy.set_pixel_unchecked(i * CELL + 2, j * CELL + 2, 0);
                holes += 1;
            }
        }
    }
    let noisy: Bitmap = noisy.into();
    eprintln!("Noisy layout: {} pixels, {} pinholes", noisy.count_ones(), holes);
    rp.compare_values(
        (clean.count_ones() + (COLS * ROWS) as u64 - holes) as f64,
        noisy.count_ones() as f64,
        0.0,
    );

    let out = despeckle(&noisy).unwrap();
    rp.compare_pix(&clean, &out);

    let mut pm = noisy.to_mut();
    despeckle_in_place(&mut pm).unwrap();
    rp.compare_pix(&clean, &pm.into());

    assert!(rp.cleanup(), "despeckle regression test failed");
}

#[test]
fn despeckle_patterns_reg() {
    let mut rp = RegParams::new("despeckle_patterns");

    // Spurs and dominoes go; the 3x3 block with a one-pixel spur keeps
    // the block
    let pixs = bitmap_from_rows(&[
        "..........", //
        ".x....xx..",
        "..........",
        "..xxx.....",
        "..xxxx..x.",
        "..xxx...x.",
        "..........",
    ])
    .unwrap();
    let expected = bitmap_from_rows(&[
        "..........", //
        "..........",
        "..........",
        "..xxx.....",
        "..xxx.....",
        "..xxx.....",
        "..........",
    ])
    .unwrap();
    rp.compare_pix(&expected, &despeckle(&pixs).unwrap());

    // Notches open on one side are filled
    let pixs = bitmap_from_rows(&[
        "........", //
        ".xxxxx..",
        ".xx.xx..",
        ".x..xx..",
        ".xxxxx..",
        "........",
    ])
    .unwrap();
    let expected = bitmap_from_rows(&[
        "........", //
        ".xxxxx..",
        ".xxxxx..",
        ".xxxxx..",
        ".xxxxx..",
        "........",
    ])
    .unwrap();
    rp.compare_pix(&expected, &despeckle(&pixs).unwrap());

    assert!(rp.cleanup(), "despeckle_patterns regression test failed");
}
