//! Axis-labeled slice specifications.
//!
//! A [`SliceSpec`] is a human-friendly partial index into an N-D image
//! array: up to five optional coordinates labeled c/x/y/z/t. Resolution
//! produces a [`PlaneIndex`], the fixed-order (c, z, t) triple applied
//! positionally to the first three axes of the backing array; x and y stay
//! free so the result is a y-x plane.
//!
//! The fixed order assumes the canonical OME-NGFF axis order
//! (c, z, t, y, x) and is applied without consulting the array's declared
//! dimension metadata. That matches the archive's stores in practice; an
//! array laid out differently yields a plane along whatever its first free
//! axes are.

/// A partial, axis-labeled index into an N-D image array.
///
/// Every coordinate is independently optional; `None` leaves that axis
/// free (unsliced).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SliceSpec {
    /// Channel coordinate.
    pub c: Option<u64>,
    /// X coordinate. Currently unused by resolution: x is a free axis.
    pub x: Option<u64>,
    /// Y coordinate. Currently unused by resolution: y is a free axis.
    pub y: Option<u64>,
    /// Z coordinate.
    pub z: Option<u64>,
    /// Time coordinate.
    pub t: Option<u64>,
}

impl SliceSpec {
    /// The slice used when a caller supplies none: the first y-x plane
    /// (c=0, z=0, t=0).
    pub fn first_plane() -> Self {
        Self {
            c: Some(0),
            z: Some(0),
            t: Some(0),
            ..Default::default()
        }
    }

    /// Resolve to the fixed-order (c, z, t) index triple.
    pub fn resolve(&self) -> PlaneIndex {
        PlaneIndex([self.c, self.z, self.t])
    }
}

/// The resolved (c, z, t) triple, applied positionally to the first three
/// axes of the materialized array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneIndex(pub [Option<u64>; 3]);

impl PlaneIndex {
    /// The coordinate pinned to axis `axis`, if any.
    ///
    /// Axes beyond the triple (and beyond the array's rank) are always
    /// free.
    pub fn pinned(&self, axis: usize) -> Option<u64> {
        self.0.get(axis).copied().flatten()
    }

    /// Number of axes the triple pins within an array of the given rank.
    pub fn pinned_count(&self, rank: usize) -> usize {
        (0..rank.min(3)).filter(|&ax| self.pinned(ax).is_some()).count()
    }
}

// =============================================================================
// Tests
// =============================================================================
