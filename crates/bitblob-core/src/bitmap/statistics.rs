//! Foreground statistics for binary images
//!
//! Pixel counts over the whole image, over a rectangle, and projected
//! onto rows and columns.

use super::{Bitmap, PixelDepth};
use crate::bits::count_one_bits;
use crate::error::{Error, Result};
use crate::rect::Rect;

impl Bitmap {
    /// Count the foreground pixels.
    ///
    /// For 1 bpp this is the number of set bits; for deeper images it is
    /// the number of non-zero pixels.
    pub fn count_ones(&self) -> u64 {
        let w = self.width() as usize;
        if self.depth() == PixelDepth::Bit1 {
            return (0..self.height())
                .map(|y| count_one_bits(self.row_data(y), 0, w) as u64)
                .sum();
        }
        let mut count = 0u64;
        for y in 0..self.height() {
            for x in 0..self.width() {
                if self.get_pixel_unchecked(x, y) != 0 {
                    count += 1;
                }
            }
        }
        count
    }

    /// Count the set pixels inside `rect`, clipped to the image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] unless the image is 1 bpp.
    pub fn black_area(&self, rect: &Rect) -> Result<u64> {
        self.check_binary()?;
        let full = Rect::new_unchecked(0, 0, self.width() as i32, self.height() as i32);
        let Some(clip) = full.intersection(rect) else {
            return Ok(0);
        };
        Ok((clip.y..clip.bottom())
            .map(|y| count_one_bits(self.row_data(y as u32), clip.x as usize, clip.w as usize) as u64)
            .sum())
    }

    /// Number of set pixels in each row.
    pub fn row_histogram(&self) -> Result<Vec<u32>> {
        self.check_binary()?;
        let w = self.width() as usize;
        Ok((0..self.height())
            .map(|y| count_one_bits(self.row_data(y), 0, w) as u32)
            .collect())
    }

    /// Number of set pixels in each column.
    pub fn column_histogram(&self) -> Result<Vec<u32>> {
        self.check_binary()?;
        let mut hist = vec![0u32; self.width() as usize];
        for y in 0..self.height() {
            let line = self.row_data(y);
            for (word_idx, &word) in line.iter().enumerate() {
                let mut bits = word;
                while bits != 0 {
                    let bit = bits.leading_zeros() as usize;
                    let x = word_idx * 32 + bit;
                    if x < hist.len() {
                        hist[x] += 1;
                    }
                    bits &= !(0x8000_0000u32 >> bit);
                }
            }
        }
        Ok(hist)
    }

    fn check_binary(&self) -> Result<()> {
        if self.depth() != PixelDepth::Bit1 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        Ok(())
    }
}
