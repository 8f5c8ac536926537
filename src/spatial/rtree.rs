//! Neighbour index over simulated node positions, backed by an rstar R-tree.
//!
//! Provides point-in-radius candidate lookup for collision avoidance.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

/// A simulated node position with its slot in the simulation buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePoint {
    /// Slot (ordinal) in the simulation buffer.
    pub slot: usize,
    pub x: f32,
    pub y: f32,
}

impl NodePoint {
    pub fn new(slot: usize, x: f32, y: f32) -> Self {
        Self { slot, x, y }
    }
}

impl RTreeObject for NodePoint {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PointDistance for NodePoint {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.x - point[0];
        let dy = self.y - point[1];
        dx * dx + dy * dy
    }
}

/// Spatial index over simulated node positions.
///
/// Rebuilt by bulk load once per collision pass; non-finite points are never
/// inserted since rstar cannot order them.
pub struct SpatialIndex {
    tree: RTree<NodePoint>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Rebuild the index from parallel x/y buffers.
    pub fn rebuild(&mut self, xs: &[f32], ys: &[f32]) {
        let points: Vec<_> = xs
            .iter()
            .zip(ys)
            .enumerate()
            .filter(|(_, (x, y))| x.is_finite() && y.is_finite())
            .map(|(slot, (&x, &y))| NodePoint::new(slot, x, y))
            .collect();

        self.tree = RTree::bulk_load(points);
    }

    /// Slots within `radius` of a point (inclusive).
    pub fn in_radius(&self, x: f32, y: f32, radius: f32) -> Vec<usize> {
        let radius_sq = radius * radius;
        self.tree
            .locate_within_distance([x, y], radius_sq)
            .map(|point| point.slot)
            .collect()
    }

}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut slots: Vec<usize>) -> Vec<usize> {
        slots.sort();
        slots
    }

    #[test]
    fn test_in_radius() {
        let mut index = SpatialIndex::new();
        index.rebuild(&[0.0, 3.0, 10.0], &[0.0, 0.0, 0.0]);

        assert_eq!(sorted(index.in_radius(0.0, 0.0, 5.0)), vec![0, 1]);
        assert_eq!(sorted(index.in_radius(10.0, 0.0, 0.5)), vec![2]);
    }

    #[test]
    fn test_radius_is_inclusive() {
        let mut index = SpatialIndex::new();
        index.rebuild(&[0.0, 5.0], &[0.0, 0.0]);
        assert_eq!(sorted(index.in_radius(0.0, 0.0, 5.0)), vec![0, 1]);
    }

    #[test]
    fn test_non_finite_points_are_skipped() {
        let mut index = SpatialIndex::new();
        index.rebuild(&[0.0, f32::NAN, 2.0], &[0.0, 1.0, f32::INFINITY]);
        assert_eq!(index.in_radius(0.0, 0.0, 100.0), vec![0]);
    }

    #[test]
    fn test_rebuild_replaces_previous_points() {
        let mut index = SpatialIndex::new();
        index.rebuild(&[0.0, 1.0], &[0.0, 1.0]);
        index.rebuild(&[50.0], &[50.0]);

        assert!(index.in_radius(0.0, 0.0, 5.0).is_empty());
        assert_eq!(index.in_radius(50.0, 50.0, 1.0), vec![0]);
    }
}
