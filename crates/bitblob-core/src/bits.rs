//! Bit primitives over packed word arrays
//!
//! Every function addresses bits by absolute position inside a `&[u32]`
//! slice. Bits are numbered MSB-first: bit 0 is the most significant bit
//! of word 0, bit 32 the most significant bit of word 1, and so on. This
//! is the same packing the bitmap rows use, so a row slice can be passed
//! directly with a pixel column as the bit position.
//!
//! Ranges are given as `(start, count)`. Callers must keep
//! `start + count <= 32 * words.len()`; out-of-range access panics like
//! any slice index.

const WORD_BITS: usize = 32;

/// Mask selecting `n` bits starting at in-word bit `b` (MSB-first).
///
/// Requires `n >= 1` and `b + n <= 32`.
#[inline]
fn span_mask(b: usize, n: usize) -> u32 {
    if n >= WORD_BITS {
        u32::MAX
    } else {
        ((1u32 << n) - 1) << (WORD_BITS - b - n)
    }
}

/// Read `n` (1..=32) bits starting at `pos`, right-aligned in the result.
#[inline]
fn read_bits(words: &[u32], pos: usize, n: usize) -> u32 {
    let wi = pos / WORD_BITS;
    let b = pos % WORD_BITS;
    let hi = u64::from(words[wi]);
    let lo = if b + n > WORD_BITS {
        u64::from(words[wi + 1])
    } else {
        0
    };
    let combined = (hi << 32) | lo;
    let shift = 64 - b - n;
    ((combined >> shift) & ((1u64 << n) - 1)) as u32
}

/// Iterate over the word-aligned spans of a bit range.
///
/// Yields `(word_index, in_word_bit, span_len)`.
#[inline]
fn spans(start: usize, count: usize) -> impl Iterator<Item = (usize, usize, usize)> {
    let end = start + count;
    let mut pos = start;
    std::iter::from_fn(move || {
        if pos >= end {
            return None;
        }
        let wi = pos / WORD_BITS;
        let b = pos % WORD_BITS;
        let n = (WORD_BITS - b).min(end - pos);
        pos += n;
        Some((wi, b, n))
    })
}

/// Find the first set bit in `[start, start + count)`.
pub fn bit_scan_one_forward(words: &[u32], start: usize, count: usize) -> Option<usize> {
    for (wi, b, n) in spans(start, count) {
        let bits = words[wi] & span_mask(b, n);
        if bits != 0 {
            return Some(wi * WORD_BITS + bits.leading_zeros() as usize);
        }
    }
    None
}

/// Find the first clear bit in `[start, start + count)`.
pub fn bit_scan_zero_forward(words: &[u32], start: usize, count: usize) -> Option<usize> {
    for (wi, b, n) in spans(start, count) {
        let bits = !words[wi] & span_mask(b, n);
        if bits != 0 {
            return Some(wi * WORD_BITS + bits.leading_zeros() as usize);
        }
    }
    None
}

/// Count the set bits in `[start, start + count)`.
pub fn count_one_bits(words: &[u32], start: usize, count: usize) -> usize {
    spans(start, count)
        .map(|(wi, b, n)| (words[wi] & span_mask(b, n)).count_ones() as usize)
        .sum()
}

/// Set every bit in `[start, start + count)`.
pub fn set_bits(words: &mut [u32], start: usize, count: usize) {
    for (wi, b, n) in spans(start, count) {
        words[wi] |= span_mask(b, n);
    }
}

/// Clear every bit in `[start, start + count)`.
pub fn reset_bits(words: &mut [u32], start: usize, count: usize) {
    for (wi, b, n) in spans(start, count) {
        words[wi] &= !span_mask(b, n);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combine {
    Copy,
    Or,
    And,
}

fn combine_bits(
    op: Combine,
    count: usize,
    src: &[u32],
    src_start: usize,
    dst: &mut [u32],
    dst_start: usize,
) {
    let mut done = 0;
    for (wi, b, n) in spans(dst_start, count) {
        let value = read_bits(src, src_start + done, n);
        let mask = span_mask(b, n);
        let placed = (value << (WORD_BITS - b - n)) & mask;
        match op {
            Combine::Copy => dst[wi] = (dst[wi] & !mask) | placed,
            Combine::Or => dst[wi] |= placed,
            Combine::And => dst[wi] &= placed | !mask,
        }
        done += n;
    }
}

/// Copy `count` bits from `src` at `src_start` to `dst` at `dst_start`.
///
/// Bits of `dst` outside the destination window are left untouched.
pub fn copy_bits(count: usize, src: &[u32], src_start: usize, dst: &mut [u32], dst_start: usize) {
    combine_bits(Combine::Copy, count, src, src_start, dst, dst_start);
}

/// OR `count` bits from `src` at `src_start` into `dst` at `dst_start`.
pub fn or_bits(count: usize, src: &[u32], src_start: usize, dst: &mut [u32], dst_start: usize) {
    combine_bits(Combine::Or, count, src, src_start, dst, dst_start);
}

/// AND `count` bits from `src` at `src_start` into `dst` at `dst_start`.
///
/// Only the destination window is affected; bits outside it keep their
/// value rather than being cleared.
pub fn and_bits(count: usize, src: &[u32], src_start: usize, dst: &mut [u32], dst_start: usize) {
    combine_bits(Combine::And, count, src, src_start, dst, dst_start);
}

/// Word-level `dst &= src` over the common length.
#[inline]
pub fn and_words(dst: &mut [u32], src: &[u32]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d &= *s;
    }
}

/// Word-level `dst |= src` over the common length.
#[inline]
pub fn or_words(dst: &mut [u32], src: &[u32]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d |= *s;
    }
}

/// Word-level in-place complement.
#[inline]
pub fn not_words(words: &mut [u32]) {
    for w in words.iter_mut() {
        *w = !*w;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_one_across_words() {
        let words = [0u32, 0x0000_0001, 0x8000_0000];
        assert_eq!(bit_scan_one_forward(&words, 0, 96), Some(63));
        assert_eq!(bit_scan_one_forward(&words, 64, 32), Some(64));
        assert_eq!(bit_scan_one_forward(&words, 0, 63), None);
        assert_eq!(bit_scan_one_forward(&words, 65, 31), None);
    }

    #[test]
    fn test_scan_zero() {
        let words = [u32::MAX, 0xFFFF_0000];
        assert_eq!(bit_scan_zero_forward(&words, 0, 64), Some(48));
        assert_eq!(bit_scan_zero_forward(&words, 3, 40), None);
        assert_eq!(bit_scan_zero_forward(&words, 10, 0), None);
    }

    #[test]
    fn test_set_reset_count() {
        let mut words = [0u32; 3];
        set_bits(&mut words, 30, 40);
        assert_eq!(count_one_bits(&words, 0, 96), 40);
        assert_eq!(words[0], 0b11);
        assert_eq!(words[1], u32::MAX);
        assert_eq!(words[2], 0xFC00_0000);

        reset_bits(&mut words, 31, 33);
        assert_eq!(words[0], 0b10);
        assert_eq!(words[1], 0);
        assert_eq!(words[2], 0xFC00_0000);
        assert_eq!(count_one_bits(&words, 0, 96), 7);
    }

    #[test]
    fn test_copy_bits_unaligned() {
        let src = [0xF0F0_F0F0u32, 0x0F0F_0F0F];
        let mut dst = [0u32; 2];
        copy_bits(40, &src, 4, &mut dst, 13);
        for i in 0..40 {
            let s = (src[(4 + i) / 32] >> (31 - (4 + i) % 32)) & 1;
            let d = (dst[(13 + i) / 32] >> (31 - (13 + i) % 32)) & 1;
            assert_eq!(s, d, "bit {i}");
        }
        assert_eq!(count_one_bits(&dst, 0, 13), 0);
        assert_eq!(count_one_bits(&dst, 53, 11), 0);
    }

    #[test]
    fn test_and_bits_leaves_outside_window() {
        let src = [0u32];
        let mut dst = [u32::MAX];
        and_bits(8, &src, 0, &mut dst, 4);
        assert_eq!(dst[0], 0xF00F_FFFF);
    }

    #[test]
    fn test_or_bits_shifted() {
        let src = [0x8000_0000u32];
        let mut dst = [0u32, 0];
        or_bits(1, &src, 0, &mut dst, 33);
        assert_eq!(dst, [0, 0x4000_0000]);
    }

    #[test]
    fn test_word_ops() {
        let mut a = [0b1100u32, 0];
        and_words(&mut a, &[0b1010, 7]);
        assert_eq!(a, [0b1000, 0]);
        or_words(&mut a, &[1, 2]);
        assert_eq!(a, [0b1001, 2]);
        not_words(&mut a);
        assert_eq!(a, [!0b1001, !2]);
    }
}
