//! Exact booleans through `boolmesh`.
//!
//! Operands are welded into indexed triangle meshes, converted to
//! `boolmesh::Manifold` once, folded with `compute_boolean` and converted
//! back to a polygon [`Mesh`] at the end.

use crate::backend::BooleanBackend;
use crate::errors::BuildError;
use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::mesh::polygon::Polygon;
use crate::recipe::{Op, Operand};

use boolmesh::{
    compute_boolean,
    prelude::{Manifold, OpType},
};
use nalgebra::Point3;
use tracing::debug;

const NAME: &str = "exact";

fn geometry_error(context: &str, err: impl std::fmt::Display) -> BuildError {
    BuildError::geometry(NAME, format!("{context}: {err}"))
}

impl From<Op> for OpType {
    fn from(op: Op) -> Self {
        match op {
            Op::Union => OpType::Add,
            Op::Subtract => OpType::Subtract,
        }
    }
}

/// Convert a polygon mesh into a boolmesh manifold.
pub fn to_manifold(mesh: &Mesh) -> Result<Manifold, BuildError> {
    let (positions, triangles) = mesh.welded_triangles();
    if triangles.is_empty() {
        return Err(BuildError::geometry(NAME, "operand has no triangles"));
    }

    // Flatten into boolmesh's layout: [x0, y0, z0, x1, y1, z1, ...]
    let pos: Vec<boolmesh::Real> = positions
        .iter()
        .flat_map(|p| [p.x as boolmesh::Real, p.y as boolmesh::Real, p.z as boolmesh::Real])
        .collect();
    let idx: Vec<usize> = triangles.iter().flatten().copied().collect();

    Manifold::new(&pos, &idx).map_err(|err| geometry_error("building manifold", err))
}

/// Convert a boolmesh manifold back into triangles.
pub fn from_manifold(manifold: &Manifold) -> Mesh {
    // Three half-edges per face; each half-edge's tail is a vertex index
    let polygons: Vec<Polygon> = (0..manifold.nf)
        .filter_map(|face| {
            let base = face * 3;
            let corners = [
                manifold.hs[base].tail,
                manifold.hs[base + 1].tail,
                manifold.hs[base + 2].tail,
            ]
            .map(|i| {
                let v = &manifold.ps[i];
                Point3::new(v.x as Real, v.y as Real, v.z as Real)
            });
            let area2 = (corners[1] - corners[0]).cross(&(corners[2] - corners[0])).norm();
            (area2 > Real::EPSILON).then(|| Polygon::from_positions(&corners))
        })
        .collect();

    Mesh::from_polygons(&polygons)
}

/// Exact booleans on manifold triangle meshes (feature `bmesh`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactBackend;

impl BooleanBackend for ExactBackend {
    fn name(&self) -> &'static str {
        NAME
    }

    fn apply(&self, body: &Mesh, op: Op, tool: &Mesh) -> Result<Mesh, BuildError> {
        let result = compute_boolean(&to_manifold(body)?, &to_manifold(tool)?, op.into())
            .map_err(|err| geometry_error("boolean", err))?;
        Ok(from_manifold(&result))
    }

    /// Converts every operand once and keeps the running body as a manifold.
    fn compose(&self, base: Mesh, steps: &[Operand]) -> Result<Mesh, BuildError> {
        if steps.is_empty() {
            return Ok(base);
        }

        let mut body = to_manifold(&base)?;
        for step in steps {
            debug!(label = step.label, op = ?step.op, "exact boolean");
            let tool = to_manifold(&step.tool)?;
            body = compute_boolean(&body, &tool, step.op.into())
                .map_err(|err| geometry_error(step.label, err))?;
        }
        Ok(from_manifold(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::CSGOps;

    #[test]
    fn cube_round_trips_through_manifold() {
        let cube = Mesh::cuboid(2.0, 3.0, 4.0).unwrap();
        let back = from_manifold(&to_manifold(&cube).unwrap());
        assert!((back.volume() - 24.0).abs() < 1e-6);
        assert!(back.is_manifold());
    }

    #[test]
    fn exact_difference_is_closed() {
        let body = Mesh::cuboid(10.0, 10.0, 2.0).unwrap();
        let tool = Mesh::cylinder(2.0, 6.0, 32).unwrap().translate(5.0, 5.0, -2.0);
        let result = ExactBackend.apply(&body, Op::Subtract, &tool).unwrap();
        assert!(result.is_manifold());
        assert!(result.volume() < body.volume());
    }
}
