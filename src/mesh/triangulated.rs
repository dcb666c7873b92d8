use crate::mesh::Mesh;
use crate::mesh::vertex::Vertex;
use crate::triangulated::Triangulated3D;

impl Triangulated3D for Mesh {
    fn visit_triangles<F>(&self, mut f: F)
    where
        F: FnMut([Vertex; 3]),
    {
        for poly in &self.polygons {
            let normal = poly.plane.normal();
            for tri in poly.triangulate() {
                f(tri.map(|v| Vertex::new(v.pos, normal)));
            }
        }
    }
}
