use crate::float_types::{EPSILON, Real};
use crate::mesh::Mesh;
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use hashbrown::HashMap;
use nalgebra::Point3;

const QUANTIZATION_FACTOR: Real = 1e7;

/// Vertices closer than this are merged, and a vertex closer than this to
/// an edge lies on it.
const WELD_DISTANCE: Real = EPSILON;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct QuantizedPoint(i64, i64, i64);

fn quantize_point(p: &Point3<Real>) -> QuantizedPoint {
    QuantizedPoint(
        (p.x * QUANTIZATION_FACTOR).round() as i64,
        (p.y * QUANTIZATION_FACTOR).round() as i64,
        (p.z * QUANTIZATION_FACTOR).round() as i64,
    )
}

/// How often each undirected triangle edge is shared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeCensus {
    /// Edges used by exactly one triangle
    pub boundary: usize,
    /// Edges shared by exactly two triangles
    pub manifold: usize,
    /// Edges shared by three or more triangles
    pub non_manifold: usize,
}

impl EdgeCensus {
    pub const fn is_closed(&self) -> bool {
        self.boundary == 0 && self.non_manifold == 0
    }
}

/// Merges positions that lie within [`WELD_DISTANCE`] of each other.
#[derive(Default)]
struct Welder {
    cells: HashMap<QuantizedPoint, Vec<usize>>,
    points: Vec<Point3<Real>>,
}

impl Welder {
    fn cell(p: &Point3<Real>) -> QuantizedPoint {
        QuantizedPoint(
            (p.x / WELD_DISTANCE).floor() as i64,
            (p.y / WELD_DISTANCE).floor() as i64,
            (p.z / WELD_DISTANCE).floor() as i64,
        )
    }

    /// Index of the welded point for `p`, adding it when nothing is near.
    fn index(&mut self, p: &Point3<Real>) -> usize {
        let QuantizedPoint(cx, cy, cz) = Self::cell(p);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(bucket) = self.cells.get(&QuantizedPoint(cx + dx, cy + dy, cz + dz))
                    else {
                        continue;
                    };
                    if let Some(&i) =
                        bucket.iter().find(|&&i| (self.points[i] - p).norm() < WELD_DISTANCE)
                    {
                        return i;
                    }
                }
            }
        }
        let i = self.points.len();
        self.points.push(*p);
        self.cells.entry(Self::cell(p)).or_default().push(i);
        i
    }
}

/// A face no wider than the weld distance: twice its area against its perimeter.
fn is_sliver(points: &[Point3<Real>], ring: &[usize]) -> bool {
    let pairs = || ring.iter().zip(ring.iter().cycle().skip(1));
    let area = pairs()
        .fold(nalgebra::Vector3::zeros(), |acc, (&a, &b)| {
            acc + points[a].coords.cross(&points[b].coords)
        })
        .norm()
        * 0.5;
    let perimeter: Real = pairs().map(|(&a, &b)| (points[b] - points[a]).norm()).sum();
    area <= WELD_DISTANCE * perimeter
}

/// Welded points strictly inside the segment `a`-`b`, ordered from `a`.
///
/// `by_x` holds point indices sorted by x coordinate.
fn points_on_edge(points: &[Point3<Real>], by_x: &[usize], a: usize, b: usize) -> Vec<usize> {
    let (pa, pb) = (points[a], points[b]);
    let dir = pb - pa;
    let len_sq = dir.norm_squared();
    let lo = pa.x.min(pb.x) - WELD_DISTANCE;
    let hi = pa.x.max(pb.x) + WELD_DISTANCE;
    let (lo_y, hi_y) = (pa.y.min(pb.y) - WELD_DISTANCE, pa.y.max(pb.y) + WELD_DISTANCE);
    let (lo_z, hi_z) = (pa.z.min(pb.z) - WELD_DISTANCE, pa.z.max(pb.z) + WELD_DISTANCE);

    let start = by_x.partition_point(|&i| points[i].x < lo);
    let mut found: Vec<(Real, usize)> = by_x[start..]
        .iter()
        .copied()
        .take_while(|&i| points[i].x <= hi)
        .filter(|&i| i != a && i != b)
        .filter(|&i| (lo_y..=hi_y).contains(&points[i].y) && (lo_z..=hi_z).contains(&points[i].z))
        .filter_map(|i| {
            let t = (points[i] - pa).dot(&dir) / len_sq;
            let offset = (pa + dir * t - points[i]).norm();
            (t > 0.0 && t < 1.0 && offset < WELD_DISTANCE).then_some((t, i))
        })
        .collect();
    found.sort_by(|x, y| x.0.total_cmp(&y.0));
    found.into_iter().map(|(_, i)| i).collect()
}

impl Mesh {
    /// Count triangle edges by multiplicity after quantizing coordinates.
    pub fn edge_census(&self) -> EdgeCensus {
        let mut edge_counts: HashMap<(QuantizedPoint, QuantizedPoint), u32> = HashMap::new();

        for poly in &self.polygons {
            for tri in poly.triangulate() {
                for &(i0, i1) in &[(0, 1), (1, 2), (2, 0)] {
                    let p0 = quantize_point(&tri[i0].pos);
                    let p1 = quantize_point(&tri[i1].pos);
                    if p0 == p1 {
                        continue;
                    }
                    // Order them so (p0, p1) and (p1, p0) become the same key
                    let key = if p0 < p1 { (p0, p1) } else { (p1, p0) };
                    *edge_counts.entry(key).or_insert(0) += 1;
                }
            }
        }

        edge_counts
            .values()
            .fold(EdgeCensus::default(), |mut census, &count| {
                match count {
                    1 => census.boundary += 1,
                    2 => census.manifold += 1,
                    _ => census.non_manifold += 1,
                }
                census
            })
    }

    /// Checks if the Mesh object is manifold
    ///
    /// Returns `true` if every edge appears exactly 2 times. Raw BSP output
    /// fails this until [`Mesh::repair_t_junctions`] has run.
    pub fn is_manifold(&self) -> bool {
        self.edge_census().is_closed()
    }

    /// Weld coincident vertices and return an indexed triangle list.
    ///
    /// Positions equal after quantization share an index; triangles that
    /// collapse onto fewer than three distinct indices are dropped.
    pub fn welded_triangles(&self) -> (Vec<Point3<Real>>, Vec<[usize; 3]>) {
        let mut index_of: HashMap<QuantizedPoint, usize> = HashMap::new();
        let mut positions = Vec::new();
        let mut triangles = Vec::new();

        for poly in &self.polygons {
            for tri in poly.triangulate() {
                let idx = tri.map(|v| {
                    *index_of.entry(quantize_point(&v.pos)).or_insert_with(|| {
                        positions.push(v.pos);
                        positions.len() - 1
                    })
                });
                if idx[0] != idx[1] && idx[1] != idx[2] && idx[2] != idx[0] {
                    triangles.push(idx);
                }
            }
        }

        (positions, triangles)
    }

    /// Weld near-coincident vertices and split every polygon edge at the
    /// vertices of other polygons lying on it.
    ///
    /// Plane splits cut a face on one side of an edge only, which leaves a
    /// T-junction: the neighbour across the edge keeps it whole. After this
    /// pass both sides of every edge carry the same vertices, so a closed
    /// solid passes [`Mesh::edge_census`]. Faces thinner than the weld
    /// distance are dropped.
    pub fn repair_t_junctions(&self) -> Mesh {
        let mut welder = Welder::default();
        let mut faces: Vec<(&Polygon, Vec<usize>)> = Vec::with_capacity(self.polygons.len());
        for poly in &self.polygons {
            let mut ring: Vec<usize> = poly.vertices.iter().map(|v| welder.index(&v.pos)).collect();
            ring.dedup();
            while ring.len() > 1 && ring.first() == ring.last() {
                ring.pop();
            }
            if ring.len() >= 3 && !is_sliver(&welder.points, &ring) {
                faces.push((poly, ring));
            }
        }
        let points = welder.points;

        let mut by_x: Vec<usize> =
            faces.iter().flat_map(|(_, ring)| ring.iter().copied()).collect();
        by_x.sort_unstable();
        by_x.dedup();
        by_x.sort_by(|&a, &b| points[a].x.total_cmp(&points[b].x));

        let polygons: Vec<Polygon> = faces
            .iter()
            .map(|(poly, ring)| {
                let normal = poly.plane.normal();
                let mut vertices = Vec::with_capacity(ring.len());
                for (k, &a) in ring.iter().enumerate() {
                    let b = ring[(k + 1) % ring.len()];
                    vertices.push(Vertex::new(points[a], normal));
                    vertices.extend(
                        points_on_edge(&points, &by_x, a, b)
                            .into_iter()
                            .filter(|i| !ring.contains(i))
                            .map(|i| Vertex::new(points[i], normal)),
                    );
                }
                Polygon::with_plane(vertices, poly.plane.clone())
            })
            .collect();

        Mesh::from_polygons(&polygons)
    }
}
