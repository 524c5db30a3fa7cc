//! Connected component labeling
//!
//! Single top-to-bottom pass over a 1-bpp image. Each row is cut into runs
//! of set bits; a run joins the component of every run on the previous row
//! whose columns it shares. Two runs on adjacent rows that meet only at a
//! corner are *not* connected.
//!
//! Components live in an arena indexed by the strokes of the two rolling
//! rows. When a run bridges two components they are merged into the slot
//! created first and a union-find redirect replaces every reference to the
//! other one.

use crate::component::ConnectedComponent;
use crate::error::{RegionError, RegionResult};
use bitblob_core::bits::{bit_scan_one_forward, bit_scan_zero_forward};
use bitblob_core::{Bitmap, BitmapMut, PixelDepth};

/// Options for [`find_connected_components_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelOptions {
    /// Smallest component (in pixels) to keep
    pub min_power: u64,
    /// Largest component (in pixels) to keep
    pub max_power: u64,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            min_power: 0,
            max_power: u64::MAX,
        }
    }
}

impl LabelOptions {
    /// Keep only components of at least `power` pixels
    pub fn with_min_power(mut self, power: u64) -> Self {
        self.min_power = power;
        self
    }

    /// Keep only components of at most `power` pixels
    pub fn with_max_power(mut self, power: u64) -> Self {
        self.max_power = power;
        self
    }

    fn accepts(&self, cc: &ConnectedComponent) -> bool {
        (self.min_power..=self.max_power).contains(&cc.power())
    }
}

/// A run on the row being labeled, with the arena slot that owns it
#[derive(Debug, Clone, Copy)]
struct Stroke {
    x: usize,
    end: usize,
    comp: usize,
}

#[derive(Debug, Default)]
struct Labeler {
    arena: Vec<Option<ConnectedComponent>>,
    parent: Vec<usize>,
    merges: usize,
}

impl Labeler {
    fn find(&mut self, mut i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        while self.parent[i] != root {
            let next = self.parent[i];
            self.parent[i] = root;
            i = next;
        }
        root
    }

    fn create(&mut self, y: i32, x: i32, length: i32) -> RegionResult<usize> {
        let id = self.arena.len();
        self.arena.push(Some(ConnectedComponent::new(y, x, length)?));
        self.parent.push(id);
        Ok(id)
    }

    fn add_stroke(&mut self, id: usize, y: i32, x: i32, length: i32) -> RegionResult<()> {
        match self.arena[id].as_mut() {
            Some(cc) => cc.add_stroke(y, x, length),
            None => Err(RegionError::InvalidParameters(format!(
                "component {} was merged away",
                id
            ))),
        }
    }

    /// Merge two distinct roots; returns the survivor.
    ///
    /// The merged component always lands in the lower slot, so slot order
    /// stays the raster order of each component's first pixel. The shorter
    /// run list is merged into the longer one.
    fn union(&mut self, a: usize, b: usize) -> usize {
        let (survivor, loser) = (a.min(b), a.max(b));
        let kept = self.arena[survivor].take().unwrap_or_default();
        let lost = self.arena[loser].take().unwrap_or_default();
        log::trace!(
            "merging component {} ({} runs) into {} ({} runs)",
            loser,
            lost.run_count(),
            survivor,
            kept.run_count()
        );
        let (mut target, source) = if kept.run_count() >= lost.run_count() {
            (kept, lost)
        } else {
            (lost, kept)
        };
        target.merge_with(source);
        self.arena[survivor] = Some(target);
        self.parent[loser] = survivor;
        self.merges += 1;
        survivor
    }

    fn label(&mut self, bitmap: &Bitmap) -> RegionResult<()> {
        let w = bitmap.width() as usize;
        let mut last: Vec<Stroke> = Vec::new();
        let mut current: Vec<Stroke> = Vec::new();

        for y in 0..bitmap.height() {
            let line = bitmap.row_data(y);
            let row = y as i32;
            let mut cursor = 0;
            let mut x = 0;

            while x < w {
                let Some(start) = bit_scan_one_forward(line, x, w - x) else {
                    break;
                };
                let end = bit_scan_zero_forward(line, start, w - start).unwrap_or(w);
                let length = (end - start) as i32;

                // Strokes ending at or before `start` cannot reach this run
                // or any later one on the row
                while cursor < last.len() && last[cursor].end <= start {
                    cursor += 1;
                }

                let mut owner = None;
                for stroke in last[cursor..].iter().take_while(|s| s.x < end) {
                    let root = self.find(stroke.comp);
                    match owner {
                        None => {
                            self.add_stroke(root, row, start as i32, length)?;
                            owner = Some(root);
                        }
                        Some(o) if o != root => owner = Some(self.union(o, root)),
                        Some(_) => {}
                    }
                }

                let comp = match owner {
                    Some(o) => o,
                    None => self.create(row, start as i32, length)?,
                };
                current.push(Stroke { x: start, end, comp });
                x = end;
            }

            std::mem::swap(&mut last, &mut current);
            current.clear();
        }
        Ok(())
    }
}

fn check_binary(bitmap: &Bitmap) -> RegionResult<()> {
    if bitmap.depth() != PixelDepth::Bit1 {
        return Err(RegionError::UnsupportedDepth {
            expected: "1-bpp binary",
            actual: bitmap.depth().bits(),
        });
    }
    Ok(())
}

/// Find all connected components in a binary image
///
/// Components are returned in the order their first pixel appears in
/// raster order. Together they cover every set pixel exactly once.
///
/// # Errors
///
/// Returns [`RegionError::UnsupportedDepth`] unless the image is 1 bpp, and
/// [`RegionError::PartitionMismatch`] if the components fail to account for
/// every set pixel.
pub fn find_connected_components(bitmap: &Bitmap) -> RegionResult<Vec<ConnectedComponent>> {
    check_binary(bitmap)?;

    let mut labeler = Labeler::default();
    labeler.label(bitmap)?;
    let created = labeler.arena.len();
    let merges = labeler.merges;
    let components: Vec<ConnectedComponent> = labeler.arena.into_iter().flatten().collect();

    let expected = bitmap.count_ones();
    let actual: u64 = components.iter().map(ConnectedComponent::power).sum();
    if expected != actual {
        return Err(RegionError::PartitionMismatch { expected, actual });
    }

    log::debug!(
        "labeled {}x{}: {} components ({} created, {} merges), {} pixels",
        bitmap.width(),
        bitmap.height(),
        components.len(),
        created,
        merges,
        actual
    );
    Ok(components)
}

/// Find connected components, keeping those accepted by `options`
pub fn find_connected_components_with(
    bitmap: &Bitmap,
    options: &LabelOptions,
) -> RegionResult<Vec<ConnectedComponent>> {
    let mut components = find_connected_components(bitmap)?;
    components.retain(|cc| options.accepts(cc));
    Ok(components)
}

/// Count the connected components in a binary image
pub fn count_connected_components(bitmap: &Bitmap) -> RegionResult<usize> {
    Ok(find_connected_components(bitmap)?.len())
}

/// Label all connected components in a binary image
///
/// Returns a 32-bit image where each foreground pixel holds `i + 1` for
/// the i-th component and background pixels are 0.
pub fn label_components(bitmap: &Bitmap) -> RegionResult<Bitmap> {
    let components = find_connected_components(bitmap)?;
    let mut labels = BitmapMut::new(bitmap.width(), bitmap.height(), PixelDepth::Bit32)?;
    for (i, cc) in components.iter().enumerate() {
        let label = i as u32 + 1;
        for run in cc.runs() {
            for x in run.x..run.end() {
                labels.set_pixel_unchecked(x as u32, run.y as u32, label);
            }
        }
    }
    Ok(labels.into())
}

/// Filter components by size, keeping only those within the given range
///
/// Returns a binary image holding the components whose pixel count lies in
/// `[min_size, max_size]`.
pub fn filter_components_by_size(bitmap: &Bitmap, min_size: u64, max_size: u64) -> RegionResult<Bitmap> {
    if min_size > max_size {
        return Err(RegionError::InvalidParameters(format!(
            "min_size {} exceeds max_size {}",
            min_size, max_size
        )));
    }
    let options = LabelOptions::default()
        .with_min_power(min_size)
        .with_max_power(max_size);
    let components = find_connected_components_with(bitmap, &options)?;
    let mut out = BitmapMut::new(bitmap.width(), bitmap.height(), PixelDepth::Bit1)?;
    for cc in &components {
        crate::raster::add_connected_component(&mut out, cc)?;
    }
    Ok(out.into())
}
