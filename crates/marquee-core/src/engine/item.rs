//! Lane items
//!
//! An item is an opaque payload plus the two things the engine does need:
//! a stable key and its extent along the scroll axis.

use std::fmt;
use std::sync::Arc;

/// Stable identity of an item, used for list keys by renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item-{}", self.0)
    }
}

/// One entry in the lane
///
/// The payload is shared with the caller; the engine never reads it.
pub struct Item<T: ?Sized> {
    id: ItemId,
    content: Arc<T>,
    extent: f32,
}

impl<T: ?Sized> Item<T> {
    /// Create an item. Negative or non-finite extents count as zero.
    pub fn new(id: ItemId, content: Arc<T>, extent: f32) -> Self {
        let extent = if extent.is_finite() && extent > 0.0 {
            extent
        } else {
            0.0
        };
        Self {
            id,
            content,
            extent,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn content(&self) -> &Arc<T> {
        &self.content
    }

    /// Extent along the scroll axis
    pub fn extent(&self) -> f32 {
        self.extent
    }
}

impl<T: ?Sized> Clone for Item<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            content: Arc::clone(&self.content),
            extent: self.extent,
        }
    }
}

impl<T: ?Sized> fmt::Debug for Item<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("id", &self.id)
            .field("extent", &self.extent)
            .finish_non_exhaustive()
    }
}
