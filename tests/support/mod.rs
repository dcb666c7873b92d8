//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use partforge::backend::BspBackend;
use partforge::float_types::{CYLINDER_SECTIONS, Real, TAU};
use partforge::params::{ParamMap, params_from_json};
use partforge::{CSGOps, Mesh, ModelBuilder};
use nalgebra::{Point3, Vector3};

static BSP: BspBackend = BspBackend;

/// Builder pinned to the BSP backend, whatever features are enabled.
pub fn bsp() -> ModelBuilder<'static> {
    ModelBuilder::new(&BSP)
}

pub fn params(json: &str) -> ParamMap {
    params_from_json(json).unwrap()
}

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Bounding box extents `[dx, dy, dz]`.
pub fn extents(mesh: &Mesh) -> [Real; 3] {
    let bb = mesh.bounding_box();
    let d = bb.maxs - bb.mins;
    [d.x, d.y, d.z]
}

pub fn assert_extents(mesh: &Mesh, expected: [Real; 3]) {
    let got = extents(mesh);
    for i in 0..3 {
        assert!(approx_eq(got[i], expected[i], 1e-6), "extents {got:?}, expected {expected:?}");
    }
}

/// Surface crossings of an axis-parallel line, cast from well outside the
/// solid at `start` along `direction`.
pub fn crossings(mesh: &Mesh, start: Point3<Real>, direction: Vector3<Real>) -> Vec<Real> {
    mesh.ray_intersections(&start, &direction)
        .into_iter()
        .map(|(_, t)| t)
        .collect()
}

/// Crossings of the vertical line through `(x, y)`.
pub fn vertical_crossings(mesh: &Mesh, x: Real, y: Real) -> usize {
    crossings(mesh, Point3::new(x, y, mesh.bounding_box().mins.z - 10.0), Vector3::z()).len()
}

/// Area of the tessellated disc a catalog cylinder of radius `r` cuts.
pub fn hole_area(r: Real) -> Real {
    let n = CYLINDER_SECTIONS as Real;
    0.5 * n * r * r * (TAU / n).sin()
}

/// Vertices lying on the circle of radius `r` around `(x, y)` at height `z`.
pub fn rim_vertices(mesh: &Mesh, x: Real, y: Real, z: Real, r: Real) -> usize {
    mesh.vertices()
        .iter()
        .filter(|p| approx_eq(p.z, z, 1e-6))
        .filter(|p| approx_eq(((p.x - x).powi(2) + (p.y - y).powi(2)).sqrt(), r, 1e-6))
        .count()
}
