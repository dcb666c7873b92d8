//! Binary Space Partitioning (BSP) tree implementation
//!
//! This module provides BSP tree operations with dependency inversion,
//! allowing for different algorithm implementations (serial/parallel).

pub mod node;
pub mod traits;

#[cfg(not(feature = "parallel"))]
pub mod serial;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use node::Node;
pub use traits::{BalancedSplittingStrategy, BspOps, SplittingPlaneStrategy};

#[cfg(not(feature = "parallel"))]
pub use serial::SerialBspOps;

#[cfg(feature = "parallel")]
pub use parallel::ParallelBspOps;

use crate::mesh::polygon::Polygon;

#[cfg(not(feature = "parallel"))]
fn ops() -> SerialBspOps {
    SerialBspOps::new()
}

#[cfg(feature = "parallel")]
fn ops() -> ParallelBspOps {
    ParallelBspOps::new()
}

impl Node {
    /// Creates a new BSP node from polygons
    pub fn from_polygons(polygons: &[Polygon]) -> Self {
        let mut node = Self::new();
        if !polygons.is_empty() {
            node.build(polygons);
        }
        node
    }

    /// Invert all polygons in the BSP tree
    pub fn invert(&mut self) {
        ops().invert(self);
    }

    /// Recursively remove all polygons that are inside this BSP tree
    pub fn clip_polygons(&self, polygons: &[Polygon]) -> Vec<Polygon> {
        ops().clip_polygons(self, polygons)
    }

    /// Remove all polygons in this BSP tree that are inside the other BSP tree
    pub fn clip_to(&mut self, bsp: &Node) {
        ops().clip_to(self, bsp);
    }

    /// Return all polygons in this BSP tree
    pub fn all_polygons(&self) -> Vec<Polygon> {
        ops().all_polygons(self)
    }

    /// Build a BSP tree from the given polygons
    pub fn build(&mut self, polygons: &[Polygon]) {
        ops().build(self, polygons);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;
    use crate::traits::CSGOps;
    use nalgebra::Vector3;

    #[test]
    fn invert_twice_is_identity() {
        let cube = Mesh::cuboid(1.0, 1.0, 1.0).expect("cuboid");
        let mut node = Node::from_polygons(&cube.polygons);
        let before = node.all_polygons().len();
        node.invert();
        node.invert();
        let after = node.all_polygons();
        assert_eq!(before, after.len());
        assert!(after.iter().all(|p| cube.polygons.iter().any(|q| q.plane == p.plane)));
    }

    #[test]
    fn clip_removes_polygons_inside_solid() {
        let cube = Mesh::cuboid(2.0, 2.0, 2.0).expect("cuboid");
        let inner = Mesh::cuboid(0.5, 0.5, 0.5)
            .expect("cuboid")
            .translate_vector(Vector3::new(0.75, 0.75, 0.75));
        let node = Node::from_polygons(&cube.polygons);
        assert!(node.clip_polygons(&inner.polygons).is_empty());
    }

    #[test]
    fn clip_keeps_polygons_outside_solid() {
        let cube = Mesh::cuboid(1.0, 1.0, 1.0).expect("cuboid");
        let far = Mesh::cuboid(1.0, 1.0, 1.0)
            .expect("cuboid")
            .translate_vector(Vector3::new(5.0, 0.0, 0.0));
        let node = Node::from_polygons(&cube.polygons);
        assert_eq!(node.clip_polygons(&far.polygons).len(), far.polygons.len());
    }
}
