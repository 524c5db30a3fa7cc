//! Binary morphology regression test
//!
//! Tests dilation, erosion, opening, and closing on random binary images,
//! including the extensive/anti-extensive properties of closing/opening.
//!
//! Run with:
//! ```
//! cargo test -p bitblob-morph --test binmorph_reg
//! ```

use bitblob_core::Bitmap;
use bitblob_morph::{
    Sel, build_and_mask, build_or_mask, close, close_in_place, dilate, erode, open,
};
use bitblob_test::{RegParams, bitmap_from_rows, bitmap_to_rows, random_bitmap};

/// Number of pixels set in `a` but not in `b`
fn count_outside(a: &Bitmap, b: &Bitmap) -> u64 {
    let mut diff = a.to_mut();
    diff.and_with(&b.invert()).expect("same size");
    Bitmap::from(diff).count_ones()
}

fn sels() -> Vec<Sel> {
    vec![
        Sel::create_square(3).unwrap(),
        Sel::create_brick(5, 2).unwrap(),
        Sel::create_horizontal(7).unwrap(),
        Sel::create_vertical(4).unwrap(),
        Sel::create_cross(5).unwrap(),
        // No origin hit, asymmetric
        Sel::from_offsets(&[(2, -1), (-3, 0), (1, 2)]).unwrap(),
    ]
}

#[test]
fn binmorph_duality_reg() {
    let mut rp = RegParams::new("binmorph_duality");

    // Widths straddle the word boundary
    for (seed, &(w, h)) in [(37u32, 23u32), (64, 17), (95, 40)].iter().enumerate() {
        let pixs = random_bitmap(w, h, 0.4, seed as u64).unwrap();
        for sel in sels() {
            for iterations in 1..=2 {
                let closed = close(&pixs, &sel, iterations).unwrap();
                let opened = open(&pixs, &sel, iterations).unwrap();
                eprintln!(
                    "  {}x{} sel {:?} x{}: closed {} opened {} of {}",
                    w,
                    h,
                    sel.name(),
                    iterations,
                    closed.count_ones(),
                    opened.count_ones(),
                    pixs.count_ones()
                );
                // Closing is extensive, opening anti-extensive
                rp.compare_values(0.0, count_outside(&pixs, &closed) as f64, 0.0);
                rp.compare_values(0.0, count_outside(&opened, &pixs) as f64, 0.0);

                let dilated = dilate(&pixs, &sel, iterations).unwrap();
                let eroded = erode(&pixs, &sel, iterations).unwrap();
                rp.compare_values(0.0, count_outside(&pixs, &dilated) as f64, 0.0);
                rp.compare_values(0.0, count_outside(&eroded, &pixs) as f64, 0.0);
            }
        }
    }

    assert!(rp.cleanup(), "binmorph_duality regression test failed");
}

#[test]
fn binmorph_border_reg() {
    let mut rp = RegParams::new("binmorph_border");

    let pixs = bitmap_from_rows(&[
        "xx......", //
        "xx......",
        "........",
        ".....xxx",
    ])
    .unwrap();
    let sel = Sel::create_square(3).unwrap();

    // Dilation truncates at the image edge
    let dilated = dilate(&pixs, &sel, 1).unwrap();
    let expected = bitmap_from_rows(&[
        "xxx.....", //
        "xxx.....",
        "xxx.xxxx",
        "....xxxx",
    ])
    .unwrap();
    rp.compare_pix(&expected, &dilated);

    // Out-of-image samples are skipped: only the corner pixel, whose
    // in-image neighbourhood is all foreground, survives erosion
    let eroded = erode(&pixs, &sel, 1).unwrap();
    let expected = bitmap_from_rows(&[
        "x.......", //
        "........",
        "........",
        "........",
    ])
    .unwrap();
    rp.compare_pix(&expected, &eroded);
    eprintln!("{}", bitmap_to_rows(&eroded).join("\n"));

    assert!(rp.cleanup(), "binmorph_border regression test failed");
}

#[test]
fn binmorph_mask_reg() {
    let mut rp = RegParams::new("binmorph_mask");

    let pixs = random_bitmap(70, 12, 0.5, 7).unwrap();
    let sel = Sel::create_brick(3, 3).unwrap();

    // Dilation with an origin-hit SEL equals its OR mask
    let mut mask = pixs.create_template().unwrap().to_mut();
    build_or_mask(&pixs, &sel, None, &mut mask, true).unwrap();
    rp.compare_pix(&dilate(&pixs, &sel, 1).unwrap(), &mask.into());

    // Erosion with an origin-hit SEL equals its AND mask
    let mut mask = pixs.create_template().unwrap().to_mut();
    build_and_mask(&pixs, &sel, None, &mut mask, true).unwrap();
    rp.compare_pix(&erode(&pixs, &sel, 1).unwrap(), &mask.into());

    // Splitting a SEL into two partial masks gives the same mask
    let left = Sel::from_offsets(&[(-1, -1), (-1, 0), (-1, 1)]).unwrap();
    let rest = Sel::from_offsets(&[(0, -1), (0, 0), (0, 1), (1, -1), (1, 0), (1, 1)]).unwrap();
    let mut mask = pixs.create_template().unwrap().to_mut();
    build_and_mask(&pixs, &left, None, &mut mask, true).unwrap();
    build_and_mask(&pixs, &rest, None, &mut mask, false).unwrap();
    rp.compare_pix(&erode(&pixs, &sel, 1).unwrap(), &mask.into());

    assert!(rp.cleanup(), "binmorph_mask regression test failed");
}

#[test]
fn binmorph_in_place_reg() {
    let mut rp = RegParams::new("binmorph_in_place");

    let pixs = random_bitmap(50, 30, 0.3, 11).unwrap();
    let sel = Sel::create_cross(3).unwrap();
    let expected = close(&pixs, &sel, 3).unwrap();
    let mut pm = pixs.to_mut();
    close_in_place(&mut pm, &sel, 3).unwrap();
    rp.compare_pix(&expected, &pm.into());

    assert!(rp.cleanup(), "binmorph_in_place regression test failed");
}
