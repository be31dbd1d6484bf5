use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};

/// A point in widget-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A widget surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// The smaller dimension, which bounds every circular layout.
    pub fn min_dimension(&self) -> i32 {
        self.width.min(self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }
}

/// Ordered mapping from an integer boundary (a radius or an angle) to the
/// identifier that owns it. Rebuilt from the current layout on every tick;
/// read-only for the rest of that cycle.
#[derive(Debug, Clone, Default)]
pub struct RegionMap<T> {
    boundaries: BTreeMap<i32, T>,
}

impl<T: Copy + PartialEq> RegionMap<T> {
    pub fn new() -> Self {
        Self {
            boundaries: BTreeMap::new(),
        }
    }

    pub fn clear(&mut self) {
        self.boundaries.clear();
    }

    pub fn insert(&mut self, boundary: i32, owner: T) {
        self.boundaries.insert(boundary, owner);
    }

    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    /// Owner of the smallest boundary at or above `query`, if any.
    pub fn at_or_above(&self, query: i32) -> Option<T> {
        self.boundaries.range(query..).next().map(|(_, o)| *o)
    }

    /// Wrapping lookup for angular regions: the smallest boundary at or
    /// above `query`, falling back to the first boundary past the wrap.
    pub fn wrapping(&self, query: i32) -> Option<T> {
        self.at_or_above(query)
            .or_else(|| self.boundaries.values().next().copied())
    }

    /// Lookup for paired-boundary bands (each owner records both its inner
    /// and outer edge). A query hits an owner only when the nearest boundary
    /// at or below it and the next boundary above that one agree; queries in
    /// the spacing between bands, below the innermost edge, or past the
    /// outermost edge are misses.
    pub fn band_owner(&self, query: i32) -> Option<T> {
        let (low_key, low_owner) = self.boundaries.range(..=query).next_back()?;
        let (_, high_owner) = self
            .boundaries
            .range((Excluded(*low_key), Unbounded))
            .next()?;
        (*high_owner == *low_owner).then_some(*low_owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_to(b), 5.0);
    }

    #[test]
    fn test_band_owner_hits_inside_band() {
        let mut map = RegionMap::new();
        // Two bands: [10, 20] owned by 0, [25, 35] owned by 1.
        map.insert(10, 0u8);
        map.insert(20, 0u8);
        map.insert(25, 1u8);
        map.insert(35, 1u8);

        assert_eq!(map.band_owner(15), Some(0));
        assert_eq!(map.band_owner(30), Some(1));
        // Inner edge counts, outer edge does not.
        assert_eq!(map.band_owner(10), Some(0));
        assert_eq!(map.band_owner(20), None);
    }

    #[test]
    fn test_band_owner_misses() {
        let mut map = RegionMap::new();
        map.insert(10, 0u8);
        map.insert(20, 0u8);
        map.insert(25, 1u8);
        map.insert(35, 1u8);

        // Spacing gap, below innermost, past outermost.
        assert_eq!(map.band_owner(22), None);
        assert_eq!(map.band_owner(5), None);
        assert_eq!(map.band_owner(40), None);
    }

    #[test]
    fn test_band_owner_empty() {
        let map: RegionMap<u8> = RegionMap::new();
        assert_eq!(map.band_owner(10), None);
    }

    #[test]
    fn test_wrapping_lookup() {
        let mut map = RegionMap::new();
        map.insert(90, 0usize);
        map.insert(180, 1usize);
        map.insert(270, 2usize);

        assert_eq!(map.wrapping(45), Some(0));
        assert_eq!(map.wrapping(180), Some(1));
        assert_eq!(map.wrapping(200), Some(2));
        // Past the last boundary wraps to the first owner.
        assert_eq!(map.wrapping(300), Some(0));
    }
}
