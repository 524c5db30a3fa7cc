//! Bitmap - The packed raster container
//!
//! # Pixel layout
//!
//! - Image data is stored in 32-bit words
//! - Every row starts on a 32-bit boundary
//! - Pixels are packed MSB to LSB within each word
//! - Padding bits past the image width are kept at zero
//!
//! # Ownership model
//!
//! `Bitmap` uses `Arc` for efficient cloning (shared ownership).
//! To modify pixel data, convert to `BitmapMut` via [`Bitmap::try_into_mut`]
//! or [`Bitmap::to_mut`], then convert back with `Into<Bitmap>`.

mod access;
mod ops;
mod statistics;

pub use access::{clear_data_bit, get_data_bit, set_data_bit};

use crate::error::{Error, Result};
use std::sync::Arc;

/// Pixel depth (bits per pixel)
///
/// Everything in the region and morphology crates works on [`PixelDepth::Bit1`];
/// the other depths exist for label maps and for depth validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelDepth {
    /// 1-bit binary image
    Bit1 = 1,
    /// 2-bit image (4 levels)
    Bit2 = 2,
    /// 4-bit image (16 levels)
    Bit4 = 4,
    /// 8-bit grayscale
    Bit8 = 8,
    /// 16-bit grayscale
    Bit16 = 16,
    /// 32-bit values (labels, RGBA)
    Bit32 = 32,
}

impl PixelDepth {
    /// Create `PixelDepth` from a raw bit count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDepth`] if `bits` is not 1, 2, 4, 8, 16, or 32.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            1 => Ok(PixelDepth::Bit1),
            2 => Ok(PixelDepth::Bit2),
            4 => Ok(PixelDepth::Bit4),
            8 => Ok(PixelDepth::Bit8),
            16 => Ok(PixelDepth::Bit16),
            32 => Ok(PixelDepth::Bit32),
            _ => Err(Error::InvalidDepth(bits)),
        }
    }

    /// Get the number of bits per pixel.
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Get the maximum pixel value representable at this depth.
    pub fn max_value(self) -> u32 {
        match self {
            PixelDepth::Bit32 => u32::MAX,
            _ => (1u32 << self.bits()) - 1,
        }
    }
}

/// Internal bitmap data
#[derive(Debug)]
struct BitmapData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Depth in bits per pixel
    depth: PixelDepth,
    /// 32-bit words per line
    wpl: u32,
    /// The image data (packed 32-bit words)
    data: Vec<u32>,
}

impl BitmapData {
    fn allocate(width: u32, height: u32, depth: PixelDepth, fill: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let wpl = compute_wpl(width, depth)?;
        let size = (wpl as usize)
            .checked_mul(height as usize)
            .ok_or(Error::AllocationFailed)?;
        let mut data = Vec::new();
        data.try_reserve_exact(size)
            .map_err(|_| Error::AllocationFailed)?;
        data.resize(size, fill);
        Ok(Self {
            width,
            height,
            depth,
            wpl,
            data,
        })
    }
}

/// Compute words per line for given width and depth.
///
/// Uses u64 arithmetic to prevent overflow for large widths.
fn compute_wpl(width: u32, depth: PixelDepth) -> Result<u32> {
    let bits_per_line = u64::from(width) * u64::from(depth.bits());
    u32::try_from(bits_per_line.div_ceil(32)).map_err(|_| Error::AllocationFailed)
}

/// Bitmap - Main image container
///
/// # Examples
///
/// ```
/// use bitblob_core::{Bitmap, PixelDepth};
///
/// let bitmap = Bitmap::new(640, 480, PixelDepth::Bit1).unwrap();
/// assert_eq!(bitmap.width(), 640);
/// assert_eq!(bitmap.wpl(), 20);
/// ```
#[derive(Debug, Clone)]
pub struct Bitmap {
    inner: Arc<BitmapData>,
}

impl Bitmap {
    /// Create a new bitmap with the specified dimensions and depth.
    ///
    /// The image data is initialized to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0, and
    /// [`Error::AllocationFailed`] if the pixel storage cannot be reserved.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        let inner = BitmapData::allocate(width, height, depth, 0)?;
        Ok(Bitmap {
            inner: Arc::new(inner),
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get the words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Get the row stride in bits.
    #[inline]
    pub fn stride_bits(&self) -> usize {
        self.inner.wpl as usize * 32
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get a slice of the words of a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = y as usize * self.inner.wpl as usize;
        let end = start + self.inner.wpl as usize;
        &self.inner.data[start..end]
    }

    /// Create a zeroed bitmap with the same dimensions and depth.
    pub fn create_template(&self) -> Result<Self> {
        Self::new(self.inner.width, self.inner.height, self.inner.depth)
    }

    /// Check if two bitmaps have the same width, height, and depth.
    pub fn sizes_equal(&self, other: &Bitmap) -> bool {
        self.inner.width == other.inner.width
            && self.inner.height == other.inner.height
            && self.inner.depth == other.inner.depth
    }

    /// Check if two bitmaps have the same size and identical pixels.
    ///
    /// Padding bits are ignored.
    pub fn equals(&self, other: &Bitmap) -> bool {
        if !self.sizes_equal(other) {
            return false;
        }
        let bits = self.inner.width as usize * self.inner.depth.bits() as usize;
        let full = bits / 32;
        let extra = bits % 32;
        let tail_mask = if extra == 0 { 0 } else { !0u32 << (32 - extra) };
        (0..self.inner.height).all(|y| {
            let a = self.row_data(y);
            let b = other.row_data(y);
            a[..full] == b[..full] && (extra == 0 || (a[full] ^ b[full]) & tail_mask == 0)
        })
    }

    /// Create a deep copy of this bitmap.
    ///
    /// Unlike `clone()` which shares data via Arc, this creates
    /// a completely independent copy.
    pub fn deep_clone(&self) -> Self {
        Bitmap {
            inner: Arc::new(self.copy_data()),
        }
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<BitmapMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(BitmapMut { inner: data }),
            Err(arc) => Err(Bitmap { inner: arc }),
        }
    }

    /// Create a mutable copy of this bitmap.
    pub fn to_mut(&self) -> BitmapMut {
        BitmapMut {
            inner: self.copy_data(),
        }
    }

    fn copy_data(&self) -> BitmapData {
        BitmapData {
            width: self.inner.width,
            height: self.inner.height,
            depth: self.inner.depth,
            wpl: self.inner.wpl,
            data: self.inner.data.clone(),
        }
    }
}

/// Mutable bitmap
///
/// Allows modification of image data. Convert back to an immutable
/// [`Bitmap`] using `Into<Bitmap>`.
#[derive(Debug)]
pub struct BitmapMut {
    inner: BitmapData,
}

impl BitmapMut {
    /// Create a new zeroed mutable bitmap.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        Ok(BitmapMut {
            inner: BitmapData::allocate(width, height, depth, 0)?,
        })
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Get the row stride in bits.
    #[inline]
    pub fn stride_bits(&self) -> usize {
        self.inner.wpl as usize * 32
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get mutable access to the image data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Get a slice of the words of a specific row.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = y as usize * self.inner.wpl as usize;
        let end = start + self.inner.wpl as usize;
        &self.inner.data[start..end]
    }

    /// Get mutable access to a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        let start = y as usize * self.inner.wpl as usize;
        let end = start + self.inner.wpl as usize;
        &mut self.inner.data[start..end]
    }

    /// Clear all pixels to zero.
    pub fn clear(&mut self) {
        self.inner.data.fill(0);
    }

    /// Set all pixels to one.
    pub fn set_all(&mut self) {
        self.inner.data.fill(0xFFFF_FFFF);
        self.clear_unused_bits();
    }
}

impl From<BitmapMut> for Bitmap {
    fn from(bitmap: BitmapMut) -> Self {
        Bitmap {
            inner: Arc::new(bitmap.inner),
        }
    }
}
