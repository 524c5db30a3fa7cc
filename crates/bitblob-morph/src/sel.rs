//! Structuring Element (SEL) for morphological operations
//!
//! A structuring element defines the neighborhood used in morphological
//! operations as a grid of hits around an origin. Morphology only looks
//! at the hit offsets relative to that origin, see [`Sel::elements`].

use crate::{MorphError, MorphResult};

/// Largest number of grid cells a structuring element may hold
pub const MAX_SEL_ELEMENTS: u64 = 1 << 24;

/// Element type in a structuring element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SelElement {
    /// Don't care - this position is ignored
    #[default]
    DontCare = 0,
    /// Hit - this offset takes part in the operation
    Hit = 1,
}

/// Structuring Element (SEL)
///
/// Defines the neighborhood pattern for morphological operations.
/// The origin (cx, cy) is the reference point for the operation.
#[derive(Debug, Clone)]
pub struct Sel {
    width: u32,
    height: u32,
    cx: u32,
    cy: u32,
    data: Vec<SelElement>,
    name: Option<String>,
}

impl Sel {
    /// Create a new empty structuring element
    ///
    /// All elements are don't-care and the origin sits at the center.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidSel`] for a zero dimension or a grid of
    /// more than [`MAX_SEL_ELEMENTS`] cells.
    pub fn new(width: u32, height: u32) -> MorphResult<Self> {
        if width == 0 || height == 0 {
            return Err(MorphError::InvalidSel(format!(
                "dimensions must be positive: {}x{}",
                width, height
            )));
        }
        let cells = width as u64 * height as u64;
        if cells > MAX_SEL_ELEMENTS {
            return Err(MorphError::InvalidSel(format!(
                "{}x{} element exceeds {} cells",
                width, height, MAX_SEL_ELEMENTS
            )));
        }
        let mut data = Vec::new();
        data.try_reserve_exact(cells as usize)
            .map_err(|_| MorphError::Core(bitblob_core::Error::AllocationFailed))?;
        data.resize(cells as usize, SelElement::DontCare);
        Ok(Self {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            data,
            name: None,
        })
    }

    /// Create a rectangular "brick" structuring element with all hits
    pub fn create_brick(width: u32, height: u32) -> MorphResult<Self> {
        let mut sel = Self::new(width, height)?;
        sel.data.fill(SelElement::Hit);
        sel.name = Some(format!("brick_{}x{}", width, height));
        Ok(sel)
    }

    /// Create a square structuring element with all hits
    pub fn create_square(size: u32) -> MorphResult<Self> {
        Self::create_brick(size, size)
    }

    /// Create a horizontal line structuring element
    pub fn create_horizontal(length: u32) -> MorphResult<Self> {
        Self::create_brick(length, 1)
    }

    /// Create a vertical line structuring element
    pub fn create_vertical(length: u32) -> MorphResult<Self> {
        Self::create_brick(1, length)
    }

    /// Create a cross (+) structuring element
    ///
    /// Hits cover the center row and center column of a `size` x `size` grid.
    pub fn create_cross(size: u32) -> MorphResult<Self> {
        let mut sel = Self::new(size, size)?;
        let c = size / 2;
        for i in 0..size {
            sel.set_element(i, c, SelElement::Hit)?;
            sel.set_element(c, i, SelElement::Hit)?;
        }
        sel.name = Some(format!("cross_{}", size));
        Ok(sel)
    }

    /// Create a structuring element from a string pattern
    ///
    /// # Arguments
    /// * `pattern` - Rows separated by newlines, 'x' for hit, '.' for don't care
    /// * `origin_x` - X coordinate of origin
    /// * `origin_y` - Y coordinate of origin
    ///
    /// Blank lines and leading/trailing whitespace on each line are ignored.
    pub fn from_string(pattern: &str, origin_x: u32, origin_y: u32) -> MorphResult<Self> {
        let rows: Vec<&str> = pattern
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.chars().count()) as u32;
        let mut sel = Self::new(width, height)?;

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() as u32 != width {
                return Err(MorphError::InvalidSel(format!(
                    "row {} has {} columns, expected {}",
                    y,
                    row.chars().count(),
                    width
                )));
            }
            for (x, c) in row.chars().enumerate() {
                let elem = match c {
                    'x' | 'X' => SelElement::Hit,
                    '.' => SelElement::DontCare,
                    other => {
                        return Err(MorphError::InvalidSel(format!(
                            "unexpected character {:?} in pattern",
                            other
                        )));
                    }
                };
                sel.data[y * width as usize + x] = elem;
            }
        }

        sel.set_origin(origin_x, origin_y)?;
        Ok(sel)
    }

    /// Create a structuring element whose hits are exactly `offsets`
    ///
    /// The grid is the tightest one containing every offset and the
    /// origin `(0, 0)`.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidSel`] when `offsets` is empty or spans a
    /// grid larger than [`MAX_SEL_ELEMENTS`] cells.
    pub fn from_offsets(offsets: &[(i32, i32)]) -> MorphResult<Self> {
        if offsets.is_empty() {
            return Err(MorphError::InvalidSel("no offsets given".to_string()));
        }
        let min_x = offsets.iter().map(|o| o.0 as i64).min().unwrap_or(0).min(0);
        let max_x = offsets.iter().map(|o| o.0 as i64).max().unwrap_or(0).max(0);
        let min_y = offsets.iter().map(|o| o.1 as i64).min().unwrap_or(0).min(0);
        let max_y = offsets.iter().map(|o| o.1 as i64).max().unwrap_or(0).max(0);

        // Spans of two i32 ranges always fit in i64
        let (width, height) = (max_x - min_x + 1, max_y - min_y + 1);
        let cells = (width as u64).checked_mul(height as u64);
        if cells.is_none_or(|c| c > MAX_SEL_ELEMENTS) {
            return Err(MorphError::InvalidSel(format!(
                "offsets span a {}x{} grid, more than {} cells",
                width, height, MAX_SEL_ELEMENTS
            )));
        }

        let mut sel = Self::new(width as u32, height as u32)?;
        sel.cx = (-min_x) as u32;
        sel.cy = (-min_y) as u32;
        for &(dx, dy) in offsets {
            sel.set_element(
                (dx as i64 - min_x) as u32,
                (dy as i64 - min_y) as u32,
                SelElement::Hit,
            )?;
        }
        Ok(sel)
    }

    /// Get the width
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the origin x coordinate
    #[inline]
    pub fn origin_x(&self) -> u32 {
        self.cx
    }

    /// Get the origin y coordinate
    #[inline]
    pub fn origin_y(&self) -> u32 {
        self.cy
    }

    /// Set the origin
    pub fn set_origin(&mut self, cx: u32, cy: u32) -> MorphResult<()> {
        if cx >= self.width || cy >= self.height {
            return Err(MorphError::InvalidSel(format!(
                "origin ({}, {}) outside {}x{} element",
                cx, cy, self.width, self.height
            )));
        }
        self.cx = cx;
        self.cy = cy;
        Ok(())
    }

    /// Get the name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Get an element at (x, y)
    #[inline]
    pub fn get_element(&self, x: u32, y: u32) -> Option<SelElement> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y * self.width + x) as usize])
    }

    /// Set an element at (x, y)
    pub fn set_element(&mut self, x: u32, y: u32, elem: SelElement) -> MorphResult<()> {
        if x >= self.width || y >= self.height {
            return Err(MorphError::InvalidSel(format!(
                "element ({}, {}) outside {}x{} element",
                x, y, self.width, self.height
            )));
        }
        self.data[(y * self.width + x) as usize] = elem;
        Ok(())
    }

    /// Count the number of hit elements
    pub fn hit_count(&self) -> usize {
        self.data.iter().filter(|&&e| e == SelElement::Hit).count()
    }

    /// Create the reflected (180-degree rotated) SEL
    ///
    /// Every hit offset `(dx, dy)` becomes `(-dx, -dy)`.
    pub fn reflect(&self) -> Self {
        let mut data = self.data.clone();
        data.reverse();
        Self {
            width: self.width,
            height: self.height,
            cx: self.width - 1 - self.cx,
            cy: self.height - 1 - self.cy,
            data,
            name: self.name.clone(),
        }
    }

    /// Iterate over hit positions relative to origin
    pub fn hit_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let cx = self.cx as i32;
        let cy = self.cy as i32;
        let width = self.width;

        self.data
            .iter()
            .enumerate()
            .filter_map(move |(idx, &elem)| {
                if elem == SelElement::Hit {
                    let x = (idx as u32 % width) as i32;
                    let y = (idx as u32 / width) as i32;
                    Some((x - cx, y - cy))
                } else {
                    None
                }
            })
    }

    /// All `(dx, dy)` hit offsets, in row-major order
    pub fn elements(&self) -> Vec<(i32, i32)> {
        self.hit_offsets().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brick_offsets() {
        let sel = Sel::create_brick(3, 2).unwrap();
        assert_eq!(sel.origin_x(), 1);
        assert_eq!(sel.origin_y(), 1);
        assert_eq!(
            sel.elements(),
            vec![(-1, -1), (0, -1), (1, -1), (-1, 0), (0, 0), (1, 0)]
        );
        assert_eq!(sel.name(), Some("brick_3x2"));
    }

    #[test]
    fn test_cross() {
        let sel = Sel::create_cross(3).unwrap();
        assert_eq!(sel.hit_count(), 5);
        assert_eq!(
            sel.elements(),
            vec![(0, -1), (-1, 0), (0, 0), (1, 0), (0, 1)]
        );
    }

    #[test]
    fn test_from_string() {
        let sel = Sel::from_string(
            "
            x..
            xx.
            ",
            0,
            1,
        )
        .unwrap();
        assert_eq!(sel.width(), 3);
        assert_eq!(sel.height(), 2);
        assert_eq!(sel.elements(), vec![(0, -1), (0, 0), (1, 0)]);
        assert!(Sel::from_string("x.\nx", 0, 0).is_err());
        assert!(Sel::from_string("xo", 0, 0).is_err());
        assert!(Sel::from_string("xx", 2, 0).is_err());
    }

    #[test]
    fn test_from_offsets_roundtrip() {
        let offsets = vec![(-1, -1), (2, 0), (0, 1)];
        let sel = Sel::from_offsets(&offsets).unwrap();
        assert_eq!(sel.width(), 4);
        assert_eq!(sel.height(), 3);
        let mut got = sel.elements();
        got.sort();
        let mut want = offsets.clone();
        want.sort();
        assert_eq!(got, want);
        assert!(Sel::from_offsets(&[]).is_err());
    }

    #[test]
    fn test_from_offsets_extreme() {
        assert!(matches!(
            Sel::from_offsets(&[(i32::MAX, 0), (-1, 0)]),
            Err(MorphError::InvalidSel(_))
        ));
        assert!(matches!(
            Sel::from_offsets(&[(i32::MIN, i32::MIN), (i32::MAX, i32::MAX)]),
            Err(MorphError::InvalidSel(_))
        ));
        // A wide single-row element stays within the cap
        let sel = Sel::from_offsets(&[(-100_000, 0), (100_000, 0)]).unwrap();
        assert_eq!(sel.width(), 200_001);
        assert_eq!(sel.get_element(0, 0), Some(SelElement::Hit));
        assert_eq!(sel.get_element(100_000, 0), Some(SelElement::DontCare));
        assert_eq!(sel.get_element(200_001, 0), None);
    }

    #[test]
    fn test_oversized_grid_rejected() {
        assert!(matches!(
            Sel::create_brick(u32::MAX, 2),
            Err(MorphError::InvalidSel(_))
        ));
        assert!(Sel::create_square(4096).is_ok());
    }

    #[test]
    fn test_reflect_negates_offsets() {
        let sel = Sel::from_offsets(&[(1, 0), (2, -1)]).unwrap();
        let mut got = sel.reflect().elements();
        got.sort();
        assert_eq!(got, vec![(-2, 1), (-1, 0)]);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(Sel::new(0, 3), Err(MorphError::InvalidSel(_))));
        assert!(Sel::create_square(0).is_err());
    }
}
