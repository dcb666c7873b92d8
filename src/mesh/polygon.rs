//! Convex planar polygons, the faces of a [`Mesh`](crate::mesh::Mesh).

use crate::float_types::{EPSILON, Real, parry3d::bounding_volume::Aabb};
use crate::mesh::plane::Plane;
use crate::mesh::vertex::Vertex;
use nalgebra::{Matrix4, Point3, Vector3};
use std::sync::OnceLock;

/// A convex polygon, defined by a list of vertices and its supporting plane.
///
/// Vertices wind counter-clockwise when viewed from the side the plane
/// normal points to.
#[derive(Debug, Clone)]
pub struct Polygon {
    /// Vertices defining the polygon's shape
    pub vertices: Vec<Vertex>,

    /// The plane on which this polygon lies
    pub plane: Plane,

    /// Lazily‑computed axis‑aligned bounding box of the polygon
    pub bounding_box: OnceLock<Aabb>,
}

impl PartialEq for Polygon {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices && self.plane == other.plane
    }
}

impl Polygon {
    /// Create a polygon from vertices, deriving its plane from their winding.
    ///
    /// # Panics
    /// Panics if fewer than three vertices are given.
    pub fn new(vertices: Vec<Vertex>) -> Self {
        assert!(vertices.len() >= 3, "degenerate polygon");
        let plane = Plane::from_vertices(&vertices);
        Self::with_plane(vertices, plane)
    }

    /// Create a polygon with a known supporting plane.
    pub const fn with_plane(vertices: Vec<Vertex>, plane: Plane) -> Self {
        Polygon {
            vertices,
            plane,
            bounding_box: OnceLock::new(),
        }
    }

    /// Build a flat-shaded polygon from bare positions; every vertex gets
    /// the plane normal.
    pub fn from_positions(positions: &[Point3<Real>]) -> Self {
        let vertices: Vec<Vertex> = positions
            .iter()
            .map(|p| Vertex::new(*p, Vector3::zeros()))
            .collect();
        let mut polygon = Self::new(vertices);
        polygon.set_new_normal();
        polygon
    }

    /// Axis aligned bounding box of this polygon (cached after first call)
    pub fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
            let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
            for v in &self.vertices {
                mins = mins.inf(&v.pos);
                maxs = maxs.sup(&v.pos);
            }
            Aabb::new(mins, maxs)
        })
    }

    /// Reverses winding order, flips vertices normals, and flips the plane normal
    pub fn flip(&mut self) {
        // 1) reverse vertices
        self.vertices.reverse();
        // 2) flip all vertex normals
        for v in &mut self.vertices {
            v.flip();
        }
        // 3) flip the cached plane too
        self.plane.flip();
    }

    /// Return an iterator over paired vertices each forming an edge of the polygon
    pub fn edges(&self) -> impl Iterator<Item = (&Vertex, &Vertex)> {
        self.vertices.iter().zip(self.vertices.iter().cycle().skip(1))
    }

    /// Fan-triangulate the polygon around its first vertex.
    ///
    /// Valid because every polygon in a mesh is convex: primitives are built
    /// from convex faces and plane splits keep them convex. A polygon with
    /// a vertex lying straight on an edge is fanned around its centroid
    /// instead, so no triangle collapses to a line.
    pub fn triangulate(&self) -> Vec<[Vertex; 3]> {
        if self.vertices.len() < 3 {
            return Vec::new();
        }
        if self.vertices.len() > 3 && self.has_straight_vertex() {
            let n = self.vertices.len() as Real;
            let centroid = self
                .vertices
                .iter()
                .fold(Vector3::zeros(), |acc, v| acc + v.pos.coords)
                / n;
            let center = Vertex::new(Point3::from(centroid), self.plane.normal());
            return self.edges().map(|(a, b)| [center, *a, *b]).collect();
        }
        let anchor = self.vertices[0];
        self.vertices
            .windows(2)
            .skip(1)
            .map(|pair| [anchor, pair[0], pair[1]])
            .collect()
    }

    /// Whether some vertex sits on the line through its two neighbours.
    fn has_straight_vertex(&self) -> bool {
        let n = self.vertices.len();
        (0..n).any(|i| {
            let prev = self.vertices[(i + n - 1) % n].pos;
            let next = self.vertices[(i + 1) % n].pos;
            let span = next - prev;
            (self.vertices[i].pos - prev).cross(&span).norm() <= EPSILON * span.norm()
        })
    }

    /// Area of the polygon, from the magnitude of its Newell normal.
    pub fn area(&self) -> Real {
        self.edges()
            .fold(Vector3::zeros(), |acc, (a, b)| acc + a.pos.coords.cross(&b.pos.coords))
            .norm()
            * 0.5
    }

    /// Recompute this polygon's normal from its vertices, then set all
    /// vertices' normals to match (flat shading).
    pub fn set_new_normal(&mut self) {
        self.plane = Plane::from_vertices(&self.vertices);
        let normal = self.plane.normal();
        for v in &mut self.vertices {
            v.normal = normal;
        }
    }

    /// Apply a rigid or affine transform to every vertex and rebuild the plane.
    pub fn transform(&self, matrix: &Matrix4<Real>) -> Self {
        // Normals transform by the inverse transpose; fall back to the
        // matrix itself for singular input.
        let normal_matrix = matrix
            .try_inverse()
            .map(|inv| inv.transpose())
            .unwrap_or(*matrix);

        let vertices: Vec<Vertex> = self
            .vertices
            .iter()
            .map(|v| {
                let pos = matrix.transform_point(&v.pos);
                let normal = normal_matrix.transform_vector(&v.normal);
                let normal = normal.try_normalize(Real::EPSILON).unwrap_or(normal);
                Vertex::new(pos, normal)
            })
            .collect();

        let plane = Plane::from_vertices(&vertices);
        Polygon::with_plane(vertices, plane)
    }
}
