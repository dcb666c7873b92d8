//! `Mesh` struct and implementations of the `CSGOps` trait for `Mesh`

use crate::errors::BuildError;
use crate::float_types::{
    EPSILON, Real,
    parry3d::{
        bounding_volume::{Aabb, BoundingVolume},
        query::{Ray, RayCast},
        shape::Triangle,
    },
    tolerance,
};
use crate::mesh::{bsp::Node, polygon::Polygon};
use crate::traits::CSGOps;
use nalgebra::{Isometry3, Matrix4, Point3, Vector3};
use std::sync::OnceLock;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub mod bsp;
pub mod manifold;
pub mod plane;
pub mod polygon;
pub mod shapes;
pub mod triangulated;
pub mod vertex;

/// A closed solid made of convex planar polygons, in millimetres.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    /// 3D polygons for volumetric shapes
    pub polygons: Vec<Polygon>,

    /// Lazily calculated AABB that spans `polygons`.
    pub bounding_box: OnceLock<Aabb>,
}

impl PartialEq for Mesh {
    fn eq(&self, other: &Self) -> bool {
        self.polygons == other.polygons
    }
}

impl Mesh {
    /// Build a Mesh from an existing polygon list
    pub fn from_polygons(polygons: &[Polygon]) -> Self {
        let mut mesh = Mesh::new();
        mesh.polygons = polygons.to_vec();
        mesh
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Split every polygon into triangles, returning a new Mesh
    /// whose polygons are all triangles.
    pub fn triangulate(&self) -> Mesh {
        let triangles = self
            .polygons
            .iter()
            .flat_map(|poly| {
                poly.triangulate()
                    .into_iter()
                    .map(move |tri| Polygon::with_plane(tri.to_vec(), poly.plane.clone()))
            })
            .collect::<Vec<_>>();

        Mesh::from_polygons(&triangles)
    }

    /// Every vertex position, in polygon order (duplicates included).
    pub fn vertices(&self) -> Vec<Point3<Real>> {
        self.polygons
            .iter()
            .flat_map(|p| p.vertices.iter().map(|v| v.pos))
            .collect()
    }

    /// Signed volume enclosed by the surface, positive for outward winding.
    ///
    /// Sum of the signed tetrahedra spanned by the origin and each triangle.
    pub fn volume(&self) -> Real {
        let tetra = |poly: &Polygon| -> Real {
            poly.triangulate()
                .iter()
                .map(|[a, b, c]| a.pos.coords.dot(&b.pos.coords.cross(&c.pos.coords)))
                .sum::<Real>()
        };

        #[cfg(feature = "parallel")]
        let sum: Real = self.polygons.par_iter().map(tetra).sum();

        #[cfg(not(feature = "parallel"))]
        let sum: Real = self.polygons.iter().map(tetra).sum();

        sum / 6.0
    }

    /// Casts a ray defined by `origin` + t * `direction` against all triangles
    /// of this Mesh and returns a list of (intersection_point, distance),
    /// sorted by ascending distance.
    ///
    /// # Parameters
    /// - `origin`: The ray’s start point.
    /// - `direction`: The ray’s direction vector.
    ///
    /// # Returns
    /// A `Vec` of `(Point3<Real>, Real)` where:
    /// - `Point3<Real>` is the intersection coordinate in 3D,
    /// - `Real` is the distance (the ray parameter t) from `origin`.
    pub fn ray_intersections(
        &self,
        origin: &Point3<Real>,
        direction: &Vector3<Real>,
    ) -> Vec<(Point3<Real>, Real)> {
        let ray = Ray::new(*origin, *direction);
        let iso = Isometry3::identity();

        let mut hits: Vec<(Point3<Real>, Real)> = self
            .polygons
            .iter()
            .flat_map(|poly| poly.triangulate())
            .filter_map(|tri| {
                let triangle = Triangle::new(tri[0].pos, tri[1].pos, tri[2].pos);
                triangle
                    .cast_ray_and_get_normal(&iso, &ray, Real::MAX, true)
                    .map(|hit| (ray.point_at(hit.time_of_impact), hit.time_of_impact))
            })
            .collect();

        hits.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        // Shared triangle edges report the same crossing twice
        hits.dedup_by(|a, b| (a.1 - b.1).abs() < EPSILON);

        hits
    }

    /// Check that this solid can be handed to a caller.
    ///
    /// The solid must be non-empty with finite coordinates, its surface
    /// must be closed (every edge shared by exactly two triangles) and the
    /// enclosed volume must exceed the crate tolerance.
    pub fn validate(&self, backend: &'static str) -> Result<(), BuildError> {
        if self.polygons.is_empty() {
            return Err(BuildError::geometry(backend, "boolean result is empty"));
        }
        if let Some(p) = self.vertices().iter().find(|p| !p.coords.iter().all(|c| c.is_finite())) {
            return Err(BuildError::geometry(
                backend,
                format!("non-finite vertex {:?}", p.coords.as_slice()),
            ));
        }
        let census = self.edge_census();
        if !census.is_closed() {
            return Err(BuildError::geometry(
                backend,
                format!(
                    "surface is not closed: {} boundary and {} non-manifold edges",
                    census.boundary, census.non_manifold
                ),
            ));
        }
        let volume = self.volume();
        if volume.is_nan() || volume <= tolerance() {
            return Err(BuildError::geometry(
                backend,
                format!("enclosed volume {volume} is not positive"),
            ));
        }
        Ok(())
    }

    /// True when the bounding boxes of the two solids overlap (touching counts).
    pub fn bounds_intersect(&self, other: &Mesh) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.bounding_box().intersects(&other.bounding_box())
    }
}

impl CSGOps for Mesh {
    /// Returns a new empty Mesh
    fn new() -> Self {
        Mesh {
            polygons: Vec::new(),
            bounding_box: OnceLock::new(),
        }
    }

    /// Return a new Mesh representing union of the two Meshes.
    ///
    /// ```text
    /// let c = a.union(b);
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |       +----+
    ///     +----+--+    |       +----+       |
    ///          |   b   |            |   c   |
    ///          |       |            |       |
    ///          +-------+            +-------+
    /// ```
    fn union(&self, other: &Mesh) -> Mesh {
        if !self.bounds_intersect(other) {
            let mut polygons = self.polygons.clone();
            polygons.extend_from_slice(&other.polygons);
            return Mesh::from_polygons(&polygons);
        }

        let mut a = Node::from_polygons(&self.polygons);
        let mut b = Node::from_polygons(&other.polygons);

        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());

        Mesh::from_polygons(&a.all_polygons())
    }

    /// Return a new Mesh representing difference of the two Meshes.
    ///
    /// ```text
    /// let c = a.difference(b);
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |    +--+
    ///     +----+--+    |       +----+
    ///          |   b   |
    ///          |       |
    ///          +-------+
    /// ```
    fn difference(&self, other: &Mesh) -> Mesh {
        if !self.bounds_intersect(other) {
            return self.clone();
        }

        let mut a = Node::from_polygons(&self.polygons);
        let mut b = Node::from_polygons(&other.polygons);

        a.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());
        a.invert();

        Mesh::from_polygons(&a.all_polygons())
    }

    /// Apply an arbitrary 3D transform (as a 4x4 matrix) to Mesh.
    fn transform(&self, mat: &Matrix4<Real>) -> Mesh {
        let polygons: Vec<Polygon> = self.polygons.iter().map(|p| p.transform(mat)).collect();
        Mesh::from_polygons(&polygons)
    }

    /// Returns a [`parry3d::bounding_volume::Aabb`] indicating the 3D bounds of all `polygons`.
    fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut polys = self.polygons.iter();
            let Some(first) = polys.next() else {
                return Aabb::new(Point3::origin(), Point3::origin());
            };
            polys.fold(first.bounding_box(), |acc, p| acc.merged(&p.bounding_box()))
        })
    }

    /// Invert this Mesh (flip inside vs. outside)
    fn inverse(&self) -> Mesh {
        let mut mesh = self.clone();
        for p in &mut mesh.polygons {
            p.flip();
        }
        mesh
    }
}
