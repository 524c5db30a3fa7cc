//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels.
//!
//! # Pixel packing
//!
//! Pixels are packed MSB-to-LSB within each 32-bit word. For example,
//! in a 1-bit image, pixel 0 occupies bit 31 (MSB) of the first word.

use super::{Bitmap, BitmapMut, PixelDepth};
use crate::error::{Error, Result};

#[inline]
fn read_value(line: &[u32], x: u32, depth: PixelDepth) -> u32 {
    let d = depth.bits() as usize;
    let pos = x as usize * d;
    let word = line[pos / 32];
    if d == 32 {
        return word;
    }
    (word >> (32 - d - pos % 32)) & depth.max_value()
}

#[inline]
fn write_value(line: &mut [u32], x: u32, depth: PixelDepth, val: u32) {
    let d = depth.bits() as usize;
    let pos = x as usize * d;
    let word = &mut line[pos / 32];
    if d == 32 {
        *word = val;
        return;
    }
    let shift = 32 - d - pos % 32;
    let mask = depth.max_value() << shift;
    *word = (*word & !mask) | ((val << shift) & mask);
}

impl Bitmap {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the row index falls outside the data.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        read_value(self.row_data(y), x, self.depth())
    }
}

impl BitmapMut {
    /// Get a pixel value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        read_value(self.row_data(y), x, self.depth())
    }

    /// Set a pixel value at (x, y).
    ///
    /// The value is masked to the pixel depth.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.width() {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.width() as usize,
            });
        }
        if y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height() as usize,
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the row index falls outside the data.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let depth = self.depth();
        write_value(self.row_data_mut(y), x, depth, val);
    }
}

/// Get a 1-bit pixel value.
#[inline]
pub fn get_data_bit(line: &[u32], x: u32) -> u32 {
    (line[(x >> 5) as usize] >> (31 - (x & 31))) & 1
}

/// Set a 1-bit pixel value.
#[inline]
pub fn set_data_bit(line: &mut [u32], x: u32, val: u32) {
    let word = &mut line[(x >> 5) as usize];
    let mask = 0x8000_0000u32 >> (x & 31);
    if val & 1 != 0 {
        *word |= mask;
    } else {
        *word &= !mask;
    }
}

/// Clear a 1-bit pixel to 0.
#[inline]
pub fn clear_data_bit(line: &mut [u32], x: u32) {
    line[(x >> 5) as usize] &= !(0x8000_0000u32 >> (x & 31));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_1bpp() {
        let mut bm = BitmapMut::new(40, 3, PixelDepth::Bit1).unwrap();
        bm.set_pixel(0, 0, 1).unwrap();
        bm.set_pixel(33, 2, 1).unwrap();
        assert_eq!(bm.row_data(0)[0], 0x8000_0000);
        assert_eq!(bm.row_data(2)[1], 0x4000_0000);
        assert_eq!(bm.get_pixel(33, 2), Some(1));
        assert_eq!(bm.get_pixel(32, 2), Some(0));
        assert_eq!(bm.get_pixel(40, 2), None);
        bm.set_pixel(33, 2, 0).unwrap();
        assert_eq!(bm.row_data(2)[1], 0);
    }

    #[test]
    fn test_get_set_wider_depths() {
        let mut bm = BitmapMut::new(5, 1, PixelDepth::Bit8).unwrap();
        bm.set_pixel(1, 0, 0xAB).unwrap();
        bm.set_pixel(4, 0, 0x1FF).unwrap();
        assert_eq!(bm.get_pixel(1, 0), Some(0xAB));
        assert_eq!(bm.get_pixel(4, 0), Some(0xFF));
        assert_eq!(bm.row_data(0)[0], 0x00AB_0000);

        let mut labels = BitmapMut::new(2, 2, PixelDepth::Bit32).unwrap();
        labels.set_pixel(1, 1, 123_456).unwrap();
        assert_eq!(labels.get_pixel(1, 1), Some(123_456));
    }

    #[test]
    fn test_set_pixel_out_of_bounds() {
        let mut bm = BitmapMut::new(4, 4, PixelDepth::Bit1).unwrap();
        assert!(matches!(
            bm.set_pixel(4, 0, 1),
            Err(Error::IndexOutOfBounds { index: 4, len: 4 })
        ));
        assert!(bm.set_pixel(0, 9, 1).is_err());
    }

    #[test]
    fn test_data_bit_helpers() {
        let mut line = [0u32; 2];
        set_data_bit(&mut line, 35, 1);
        assert_eq!(get_data_bit(&line, 35), 1);
        assert_eq!(line[1], 0x1000_0000);
        clear_data_bit(&mut line, 35);
        assert_eq!(line[1], 0);
    }
}
