//! Run-length encoded connected components
//!
//! A [`ConnectedComponent`] is a list of horizontal [`Run`]s kept sorted by
//! `(y, x)`. Runs on the same row never overlap or touch: inserting a run
//! that reaches an existing one merges them. The pixel count is kept
//! exactly up to date on every change; the bounding box is computed from
//! the runs when asked for.

use crate::error::{RegionError, RegionResult};
use bitblob_core::{Bounded, Rect};

/// A horizontal span of foreground pixels on one row
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Run {
    /// Row
    pub y: i32,
    /// First column
    pub x: i32,
    /// Number of pixels
    pub length: i32,
}

impl Run {
    /// Create a new run
    pub fn new(y: i32, x: i32, length: i32) -> Self {
        Self { y, x, length }
    }

    /// One past the last column
    #[inline]
    pub fn end(&self) -> i32 {
        self.x + self.length
    }

    /// `[x, end)` shares at least one column with this run
    #[inline]
    pub fn overlaps(&self, x: i32, end: i32) -> bool {
        self.x < end && x < self.end()
    }
}

/// A connected component stored as a sorted run list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectedComponent {
    runs: Vec<Run>,
    power: u64,
}

fn check_stroke(x: i32, length: i32) -> RegionResult<()> {
    if length <= 0 {
        return Err(RegionError::InvalidParameters(format!(
            "run length must be positive, got {}",
            length
        )));
    }
    if x.checked_add(length).is_none() {
        return Err(RegionError::InvalidParameters(format!(
            "run [{}, {} + {}) overflows",
            x, x, length
        )));
    }
    Ok(())
}

impl ConnectedComponent {
    /// Create a component holding the single run `(y, x, length)`
    pub fn new(y: i32, x: i32, length: i32) -> RegionResult<Self> {
        check_stroke(x, length)?;
        Ok(Self {
            runs: vec![Run::new(y, x, length)],
            power: length as u64,
        })
    }

    /// Runs sorted by `(y, x)`
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Number of runs
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// True when the component holds no pixel
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Number of pixels in the component
    #[inline]
    pub fn power(&self) -> u64 {
        self.power
    }

    /// Index of the first run not before `(y, x)`.
    ///
    /// Halves the range until at most four runs remain, then walks them.
    fn locate(&self, y: i32, x: i32) -> usize {
        let (mut lo, mut hi) = (0, self.runs.len());
        while hi - lo > 4 {
            let mid = lo + (hi - lo) / 2;
            let r = &self.runs[mid];
            if (r.y, r.x) < (y, x) {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        while lo < hi && (self.runs[lo].y, self.runs[lo].x) < (y, x) {
            lo += 1;
        }
        lo
    }

    /// Add the run `(y, x, length)` to the component.
    ///
    /// Runs on row `y` that overlap or touch `[x, x + length)` are merged
    /// with it, including every run the widened interval reaches to the
    /// right.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidParameters`] if `length <= 0`.
    pub fn add_stroke(&mut self, y: i32, x: i32, length: i32) -> RegionResult<()> {
        check_stroke(x, length)?;
        let idx = self.locate(y, x);

        let mut start = idx;
        let mut merged = Run::new(y, x, length);
        if idx > 0 {
            let left = self.runs[idx - 1];
            if left.y == y && left.end() >= x {
                start = idx - 1;
                merged.x = left.x;
                merged.length = left.end().max(merged.end()) - left.x;
            }
        }

        let mut stop = idx;
        while stop < self.runs.len() && self.runs[stop].y == y && self.runs[stop].x <= merged.end() {
            let end = merged.end().max(self.runs[stop].end());
            merged.length = end - merged.x;
            stop += 1;
        }

        let absorbed: u64 = self.runs[start..stop].iter().map(|r| r.length as u64).sum();
        self.runs.splice(start..stop, std::iter::once(merged));
        self.power = self.power - absorbed + merged.length as u64;
        Ok(())
    }

    /// Absorb all of `other`'s runs.
    ///
    /// Both run lists are already sorted, so this is a single linear merge;
    /// runs that end up touching on the same row are coalesced.
    pub fn merge_with(&mut self, other: ConnectedComponent) {
        if other.runs.is_empty() {
            return;
        }
        let mine = std::mem::take(&mut self.runs);
        let mut out: Vec<Run> = Vec::with_capacity(mine.len() + other.runs.len());
        let mut a = mine.into_iter().peekable();
        let mut b = other.runs.into_iter().peekable();

        loop {
            let take_mine = match (a.peek(), b.peek()) {
                (Some(ra), Some(rb)) => (ra.y, ra.x) <= (rb.y, rb.x),
                (Some(_), None) => true,
                (None, Some(_)) => false,
                (None, None) => break,
            };
            let next = if take_mine { a.next() } else { b.next() };
            let Some(run) = next else { break };
            match out.last_mut() {
                Some(last) if last.y == run.y && last.end() >= run.x => {
                    last.length = last.end().max(run.end()) - last.x;
                }
                _ => out.push(run),
            }
        }

        self.power = out.iter().map(|r| r.length as u64).sum();
        self.runs = out;
    }

    /// True if a run on row `y - 1` shares a column with `[x, x + length)`.
    pub fn touches_bottom(&self, y: i32, x: i32, length: i32) -> bool {
        let Some(above) = y.checked_sub(1) else {
            return false;
        };
        let end = x.saturating_add(length);
        for run in self.runs.iter().rev() {
            if run.y > above {
                continue;
            }
            if run.y < above {
                break;
            }
            if run.overlaps(x, end) {
                return true;
            }
        }
        false
    }

    /// True if the pixel `(x, y)` belongs to the component
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let idx = self.locate(y, x.saturating_add(1));
        idx > 0 && {
            let r = &self.runs[idx - 1];
            r.y == y && x < r.end()
        }
    }

    /// Number of component pixels inside `rect`
    pub fn black_area(&self, rect: &Rect) -> u64 {
        if rect.is_empty() {
            return 0;
        }
        let first = self.locate(rect.y, i32::MIN);
        self.runs[first..]
            .iter()
            .take_while(|r| r.y < rect.bottom())
            .map(|r| {
                let lo = r.x.max(rect.x);
                let hi = r.end().min(rect.right());
                (hi - lo).max(0) as u64
            })
            .sum()
    }

    /// Pixel count of each row from the top of the bounding box down
    pub fn row_histogram(&self) -> Vec<u32> {
        let bounds = self.bounds();
        let mut hist = vec![0u32; bounds.h.max(0) as usize];
        for r in &self.runs {
            hist[(r.y - bounds.y) as usize] += r.length as u32;
        }
        hist
    }

    /// Move every run by `(dx, dy)`
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidParameters`] if any moved run would
    /// leave the `i32` coordinate range; the component is left unchanged.
    pub fn translate(&mut self, dx: i32, dy: i32) -> RegionResult<()> {
        let fits = |r: &Run| {
            r.y.checked_add(dy).is_some()
                && r.x.checked_add(dx).and_then(|x| x.checked_add(r.length)).is_some()
        };
        if !self.runs.iter().all(fits) {
            return Err(RegionError::InvalidParameters(format!(
                "translation by ({}, {}) overflows",
                dx, dy
            )));
        }
        for r in &mut self.runs {
            r.x += dx;
            r.y += dy;
        }
        Ok(())
    }
}

/// `hi - lo`, clamped to `i32::MAX`
fn span(lo: i32, hi: i32) -> i32 {
    (hi as i64 - lo as i64).min(i32::MAX as i64) as i32
}

impl Bounded for ConnectedComponent {
    /// Minimal rectangle containing every run; empty for an empty component.
    ///
    /// Width and height saturate at `i32::MAX` for components spanning
    /// more than that.
    fn bounds(&self) -> Rect {
        let (Some(first), Some(last)) = (self.runs.first(), self.runs.last()) else {
            return Rect::default();
        };
        let x = self.runs.iter().map(|r| r.x).min().unwrap_or(first.x);
        let right = self.runs.iter().map(Run::end).max().unwrap_or(first.end());
        let h = span(first.y, last.y).saturating_add(1);
        Rect::new_unchecked(x, first.y, span(x, right), h)
    }
}
