//! STL export and import over anything [`Triangulated3D`].

use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use crate::triangulated::Triangulated3D;
use nalgebra::{Point3, Vector3};
use std::fmt::Write as _;
use std::io::Cursor;

/// Size of a binary STL holding `triangles` facets: 80-byte header,
/// little-endian `u32` count, then 50 bytes per facet.
pub const fn binary_stl_len(triangles: usize) -> usize {
    84 + 50 * triangles
}

/// Convert a shape to an **ASCII STL** string with the given `name`.
///
/// ```rust
/// # use partforge::mesh::Mesh;
/// # use partforge::io::stl::to_stl_ascii;
/// let cube = Mesh::cuboid(1.0, 1.0, 1.0).unwrap();
/// let text = to_stl_ascii(&cube, "cube");
/// assert!(text.starts_with("solid cube"));
/// assert_eq!(text.matches("facet normal").count(), 12);
/// ```
pub fn to_stl_ascii<T: Triangulated3D>(shape: &T, name: &str) -> String {
    let mut out = format!("solid {name}\n");

    shape.visit_triangles(|tri| {
        let n = tri[0].normal;
        // Writing to a String cannot fail
        let _ = writeln!(out, "  facet normal {:.6} {:.6} {:.6}", n.x, n.y, n.z);
        out.push_str("    outer loop\n");
        for v in &tri {
            let _ = writeln!(out, "      vertex {:.6} {:.6} {:.6}", v.pos.x, v.pos.y, v.pos.z);
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    });

    let _ = writeln!(out, "endsolid {name}");
    out
}

/// Convert a shape to a **binary STL** byte vector.
///
/// The header is left blank, so `name` is not stored.
pub fn to_stl_binary<T: Triangulated3D>(shape: &T) -> std::io::Result<Vec<u8>> {
    use stl_io::{Normal, Triangle, Vertex, write_stl};

    let mut triangles = Vec::<Triangle>::new();

    shape.visit_triangles(|tri| {
        let n = tri[0].normal;
        triangles.push(Triangle {
            normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
            vertices: tri.map(|v| Vertex::new([v.pos.x as f32, v.pos.y as f32, v.pos.z as f32])),
        });
    });

    let mut cursor = Cursor::new(Vec::with_capacity(binary_stl_len(triangles.len())));
    write_stl(&mut cursor, triangles.iter())?;
    Ok(cursor.into_inner())
}

/// Read an ASCII or binary STL back into a triangle soup.
pub fn from_stl(stl_data: &[u8]) -> std::io::Result<Mesh> {
    let mut cursor = Cursor::new(stl_data);
    let reader = stl_io::create_stl_reader(&mut cursor)?;

    let mut polygons = Vec::new();
    for tri in reader {
        let tri = tri?;
        let normal = Vector3::new(tri.normal[0], tri.normal[1], tri.normal[2]).cast::<Real>();
        let vertices = tri
            .vertices
            .iter()
            .map(|v| Vertex::new(Point3::new(v[0], v[1], v[2]).cast::<Real>(), normal))
            .collect();
        polygons.push(Polygon::new(vertices));
    }

    Ok(Mesh::from_polygons(&polygons))
}

impl Mesh {
    pub fn to_stl_ascii(&self, name: &str) -> String {
        self::to_stl_ascii(self, name)
    }

    pub fn to_stl_binary(&self) -> std::io::Result<Vec<u8>> {
        self::to_stl_binary(self)
    }

    pub fn from_stl(stl_data: &[u8]) -> std::io::Result<Mesh> {
        self::from_stl(stl_data)
    }
}
