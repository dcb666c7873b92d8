//! Primitive solids the catalog is assembled from.

use crate::errors::{BuildError, require_positive};
use crate::float_types::{Real, TAU};
use crate::mesh::Mesh;
use crate::mesh::plane::Plane;
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};

impl Mesh {
    /// Create a right prism (a box) that spans from (0, 0, 0)
    /// to (width, length, height). All dimensions must be > 0.
    ///
    /// # Parameters
    /// - `width`: the width of the box along X
    /// - `length`: the length of the box along Y
    /// - `height`: the height of the box along Z
    ///
    /// # Example
    /// ```
    /// # use partforge::mesh::Mesh;
    /// let slab = Mesh::cuboid(120.0, 80.0, 4.0).unwrap();
    /// assert_eq!(slab.polygons.len(), 6);
    /// ```
    pub fn cuboid(width: Real, length: Real, height: Real) -> Result<Mesh, BuildError> {
        let (w, l, h) = (
            require_positive("width", width)?,
            require_positive("length", length)?,
            require_positive("height", height)?,
        );

        let p000 = Point3::new(0.0, 0.0, 0.0);
        let p100 = Point3::new(w, 0.0, 0.0);
        let p110 = Point3::new(w, l, 0.0);
        let p010 = Point3::new(0.0, l, 0.0);
        let p001 = Point3::new(0.0, 0.0, h);
        let p101 = Point3::new(w, 0.0, h);
        let p111 = Point3::new(w, l, h);
        let p011 = Point3::new(0.0, l, h);

        // Counter-clockwise seen from outside, paired with the outward normal
        let faces = [
            ([p000, p001, p011, p010], -Vector3::x()),
            ([p100, p110, p111, p101], Vector3::x()),
            ([p000, p100, p101, p001], -Vector3::y()),
            ([p010, p011, p111, p110], Vector3::y()),
            ([p000, p010, p110, p100], -Vector3::z()),
            ([p001, p101, p111, p011], Vector3::z()),
        ];

        let polygons: Vec<Polygon> = faces
            .iter()
            .map(|(corners, normal)| {
                let vertices = corners.iter().map(|p| Vertex::new(*p, *normal)).collect();
                let plane = Plane::from_normal(*normal, normal.dot(&corners[0].coords));
                Polygon::with_plane(vertices, plane)
            })
            .collect();

        Ok(Mesh::from_polygons(&polygons))
    }

    /// Closed cylinder along +Z, centred on the Z axis, spanning `z ∈ [0, height]`.
    ///
    /// The curved wall is approximated by `sections` flat quads; both caps are
    /// single convex n-gons.
    pub fn cylinder(radius: Real, height: Real, sections: usize) -> Result<Mesh, BuildError> {
        let r = require_positive("radius", radius)?;
        let h = require_positive("height", height)?;
        if sections < 3 {
            return Err(BuildError::invalid_dimension("sections", sections as Real));
        }

        let ring: Vec<(Real, Real)> = (0..sections)
            .map(|i| {
                let angle = TAU * (i as Real) / (sections as Real);
                (r * angle.cos(), r * angle.sin())
            })
            .collect();

        let mut polygons = Vec::with_capacity(sections + 2);

        for i in 0..sections {
            let j = (i + 1) % sections;
            let (xi, yi) = ring[i];
            let (xj, yj) = ring[j];
            polygons.push(Polygon::from_positions(&[
                Point3::new(xi, yi, 0.0),
                Point3::new(xj, yj, 0.0),
                Point3::new(xj, yj, h),
                Point3::new(xi, yi, h),
            ]));
        }

        let top: Vec<Vertex> = ring
            .iter()
            .map(|&(x, y)| Vertex::new(Point3::new(x, y, h), Vector3::z()))
            .collect();
        polygons.push(Polygon::with_plane(top, Plane::from_normal(Vector3::z(), h)));

        let bottom: Vec<Vertex> = ring
            .iter()
            .rev()
            .map(|&(x, y)| Vertex::new(Point3::new(x, y, 0.0), -Vector3::z()))
            .collect();
        polygons.push(Polygon::with_plane(bottom, Plane::from_normal(-Vector3::z(), 0.0)));

        Ok(Mesh::from_polygons(&polygons))
    }
}
