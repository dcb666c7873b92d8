//! Parallel implementation of BSP operations

use rayon::prelude::*;

use crate::mesh::bsp::node::Node;
use crate::mesh::bsp::traits::{BalancedSplittingStrategy, BspOps, SplittingPlaneStrategy};
use crate::mesh::plane::Plane;
use crate::mesh::polygon::Polygon;

/// Parallel implementation of BSP operations
#[derive(Debug, Clone, Default)]
pub struct ParallelBspOps<SP: SplittingPlaneStrategy = BalancedSplittingStrategy> {
    splitting_strategy: SP,
}

impl ParallelBspOps<BalancedSplittingStrategy> {
    pub fn new() -> Self {
        Self {
            splitting_strategy: BalancedSplittingStrategy::default(),
        }
    }
}

type Buckets = (Vec<Polygon>, Vec<Polygon>, Vec<Polygon>, Vec<Polygon>);

fn split_all(plane: &Plane, polygons: &[Polygon]) -> Buckets {
    polygons.par_iter().map(|p| plane.split_polygon(p)).reduce(
        || (Vec::new(), Vec::new(), Vec::new(), Vec::new()),
        |mut acc, x| {
            acc.0.extend(x.0);
            acc.1.extend(x.1);
            acc.2.extend(x.2);
            acc.3.extend(x.3);
            acc
        },
    )
}

impl<SP: SplittingPlaneStrategy + Sync> BspOps for ParallelBspOps<SP> {
    fn invert(&self, node: &mut Node) {
        // Use iterative approach with a stack to avoid stack overflow
        let mut stack = vec![node];

        while let Some(current) = stack.pop() {
            current.polygons.par_iter_mut().for_each(|p| p.flip());
            if let Some(ref mut plane) = current.plane {
                plane.flip();
            }

            std::mem::swap(&mut current.front, &mut current.back);

            if let Some(ref mut front) = current.front {
                stack.push(front.as_mut());
            }
            if let Some(ref mut back) = current.back {
                stack.push(back.as_mut());
            }
        }
    }

    fn clip_polygons(&self, node: &Node, polygons: &[Polygon]) -> Vec<Polygon> {
        let Some(plane) = node.plane.as_ref() else {
            return polygons.to_vec();
        };

        let (coplanar_front, coplanar_back, mut front, mut back) = split_all(plane, polygons);
        front.extend(coplanar_front);
        back.extend(coplanar_back);

        let (mut result, back_kept) = rayon::join(
            || match &node.front {
                Some(f) => self.clip_polygons(f, &front),
                None => front,
            },
            || match &node.back {
                Some(b) => self.clip_polygons(b, &back),
                None => Vec::new(),
            },
        );
        result.extend(back_kept);
        result
    }

    fn clip_to(&self, node: &mut Node, bsp: &Node) {
        let mut stack = vec![node];

        while let Some(current) = stack.pop() {
            current.polygons = self.clip_polygons(bsp, &current.polygons);

            if let Some(ref mut front) = current.front {
                stack.push(front.as_mut());
            }
            if let Some(ref mut back) = current.back {
                stack.push(back.as_mut());
            }
        }
    }

    fn build(&self, node: &mut Node, polygons: &[Polygon]) {
        if polygons.is_empty() {
            return;
        }

        let plane = node
            .plane
            .get_or_insert_with(|| self.splitting_strategy.pick_best_splitting_plane(polygons))
            .clone();

        let (mut coplanar_front, mut coplanar_back, front, back) = split_all(&plane, polygons);
        node.polygons.append(&mut coplanar_front);
        node.polygons.append(&mut coplanar_back);

        // Build children sequentially to avoid stack overflow from recursive join
        if !front.is_empty() {
            let front_node = node.front.get_or_insert_with(|| Box::new(Node::new()));
            self.build(front_node, &front);
        }

        if !back.is_empty() {
            let back_node = node.back.get_or_insert_with(|| Box::new(Node::new()));
            self.build(back_node, &back);
        }
    }

    fn all_polygons(&self, node: &Node) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack = vec![node];

        while let Some(current) = stack.pop() {
            result.extend_from_slice(&current.polygons);
            stack.extend(
                [&current.front, &current.back]
                    .iter()
                    .filter_map(|child| child.as_ref().map(|boxed| boxed.as_ref())),
            );
        }
        result
    }
}
