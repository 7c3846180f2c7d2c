//! Lane layout - item positions, cycle length, and wrap math
//!
//! One copy of the item sequence spans `cycle_length`. The rendered lane
//! repeats that copy end-to-end so that wrapping the offset never exposes
//! empty space.

use crate::constants::lane::{MAX_COPIES, MIN_COPIES};

use super::item::Item;

/// Wrap an offset into `[0, cycle)`
///
/// Modular, so the sub-cycle residual survives any number of crossed cycles.
/// A non-positive cycle or non-finite offset yields 0.
pub fn wrap_offset(offset: f32, cycle: f32) -> f32 {
    if !(cycle > 0.0 && cycle.is_finite()) || !offset.is_finite() {
        return 0.0;
    }
    let wrapped = offset.rem_euclid(cycle);
    // rem_euclid can round up to exactly `cycle` for tiny negative inputs
    if wrapped >= cycle {
        0.0
    } else {
        wrapped
    }
}

/// Where one item copy sits in the rendered lane, relative to the viewport start
#[derive(Debug)]
pub struct Placement<'a, T: ?Sized> {
    pub item: &'a Item<T>,
    /// Index of the item within one copy of the sequence
    pub index: usize,
    /// Which copy of the sequence this is
    pub copy: usize,
    /// Leading edge along the scroll axis
    pub start: f32,
    pub extent: f32,
}

impl<T: ?Sized> Placement<'_, T> {
    /// Trailing edge along the scroll axis
    pub fn end(&self) -> f32 {
        self.start + self.extent
    }
}

/// Ordered items plus their precomputed positions within one cycle
#[derive(Debug)]
pub struct Lane<T: ?Sized> {
    items: Vec<Item<T>>,
    gap: f32,
    starts: Vec<f32>,
    cycle_length: f32,
}

impl<T: ?Sized> Lane<T> {
    /// Lay out items with `gap` after each one
    pub fn new(items: Vec<Item<T>>, gap: f32) -> Self {
        let gap = if gap.is_finite() { gap.max(0.0) } else { 0.0 };
        let mut starts = Vec::with_capacity(items.len());
        let mut cursor = 0.0;
        for item in &items {
            starts.push(cursor);
            cursor += item.extent() + gap;
        }
        Self {
            items,
            gap,
            starts,
            cycle_length: cursor,
        }
    }

    /// A lane with nothing in it
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0.0)
    }

    pub fn items(&self) -> &[Item<T>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn gap(&self) -> f32 {
        self.gap
    }

    /// Extent of one full copy of the sequence, gaps included
    pub fn cycle_length(&self) -> f32 {
        self.cycle_length
    }

    /// True when there is something to scroll
    pub fn can_scroll(&self) -> bool {
        !self.items.is_empty() && self.cycle_length > 0.0
    }

    /// Offset of item `index` from the start of its copy
    pub fn item_start(&self, index: usize) -> Option<f32> {
        self.starts.get(index).copied()
    }

    /// Number of copies rendered for a wrapped offset and viewport extent
    pub fn copies_for(&self, offset: f32, viewport: f32) -> usize {
        if !self.can_scroll() {
            return 0;
        }
        let viewport = if viewport.is_finite() {
            viewport.max(0.0)
        } else {
            0.0
        };
        // Copy 0 starts one cycle before the offset
        let base = offset - self.cycle_length;
        let needed = ((viewport - base) / self.cycle_length).ceil();
        let needed = if needed.is_finite() {
            needed.max(0.0) as usize
        } else {
            MAX_COPIES
        };
        needed.clamp(MIN_COPIES, MAX_COPIES)
    }

    /// Every item copy of the rendered lane for a given offset
    pub fn placements(&self, offset: f32, viewport: f32) -> Vec<Placement<'_, T>> {
        let copies = self.copies_for(offset, viewport);
        let base = offset - self.cycle_length;
        let mut placements = Vec::with_capacity(copies * self.items.len());
        for copy in 0..copies {
            let origin = base + copy as f32 * self.cycle_length;
            for (index, (item, start)) in self.items.iter().zip(&self.starts).enumerate() {
                placements.push(Placement {
                    item,
                    index,
                    copy,
                    start: origin + start,
                    extent: item.extent(),
                });
            }
        }
        placements
    }
}
