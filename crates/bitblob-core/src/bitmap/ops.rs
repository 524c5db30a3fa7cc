//! Whole-image word operations
//!
//! Logical operations that run over entire rows of words at once.

use super::{Bitmap, BitmapMut};
use crate::bits::{and_words, not_words, or_words};
use crate::error::{Error, Result};

impl BitmapMut {
    /// Zero the padding bits past the image width in every row.
    pub fn clear_unused_bits(&mut self) {
        let extra = (self.width() as usize * self.depth().bits() as usize) % 32;
        if extra == 0 {
            return;
        }
        let mask = !0u32 << (32 - extra);
        let wpl = self.wpl() as usize;
        for row in self.data_mut().chunks_exact_mut(wpl) {
            row[wpl - 1] &= mask;
        }
    }

    /// Complement every pixel in place.
    pub fn invert(&mut self) {
        not_words(self.data_mut());
        self.clear_unused_bits();
    }

    /// `self &= other`, word by word.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleSizes`] unless both images share
    /// width, height and depth.
    pub fn and_with(&mut self, other: &Bitmap) -> Result<()> {
        self.check_same_size(other)?;
        and_words(self.data_mut(), other.data());
        Ok(())
    }

    /// `self |= other`, word by word.
    pub fn or_with(&mut self, other: &Bitmap) -> Result<()> {
        self.check_same_size(other)?;
        or_words(self.data_mut(), other.data());
        Ok(())
    }

    fn check_same_size(&self, other: &Bitmap) -> Result<()> {
        if self.width() != other.width()
            || self.height() != other.height()
            || self.depth() != other.depth()
        {
            return Err(Error::IncompatibleSizes(
                self.width(),
                self.height(),
                other.width(),
                other.height(),
            ));
        }
        Ok(())
    }
}

impl Bitmap {
    /// Return the complement of this image.
    pub fn invert(&self) -> Bitmap {
        let mut out = self.to_mut();
        out.invert();
        out.into()
    }
}
