use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TopologyError};
use crate::math::polygon_3d::point_in_convex_polygon;
use crate::math::{mean_point, Point3, GEOMETRY_TOLERANCE};

use super::builder::SolidBuilder;
use super::edge::Edge;
use super::face::Face;
use super::vertex::{Vertex, VertexList};

/// Plain vertex/face table, the interchange format of the catalog and of
/// rendering collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolidData {
    /// Vertex positions.
    pub vertices: Vec<[f64; 3]>,
    /// Faces as counter-clockwise (seen from outside) vertex index lists.
    pub faces: Vec<Vec<usize>>,
}

/// Immutable convex polyhedron stored as an index arena.
///
/// Vertices are positions addressed by index; faces are ordered vertex index
/// sequences wound counter-clockwise seen from outside. Edges are derived:
/// the directed edge `a → b` belongs to the face listing `b` right after `a`,
/// and its twin `b → a` belongs to the neighbouring face.
///
/// Every transform produces a new value through [`Polyhedron::with_changes`].
#[derive(Debug, Clone)]
pub struct Polyhedron {
    vertices: Vec<Point3>,
    faces: Vec<Vec<usize>>,
    edge_faces: HashMap<(usize, usize), usize>,
    vertex_faces: Vec<Vec<usize>>,
}

impl Polyhedron {
    /// Creates a polyhedron from positions and face index lists, validating
    /// that every face is a proper polygon over existing vertices.
    ///
    /// # Errors
    ///
    /// Returns an error if a face has fewer than three vertices, references
    /// a missing vertex, repeats a vertex, or shares a directed edge with
    /// another face.
    pub fn new(vertices: Vec<Point3>, faces: Vec<Vec<usize>>) -> Result<Self> {
        let mut seen = HashMap::new();
        for (index, face) in faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(TopologyError::InvalidTopology(format!(
                    "face {index} has {} vertices",
                    face.len()
                ))
                .into());
            }
            for (i, &v) in face.iter().enumerate() {
                if v >= vertices.len() {
                    return Err(TopologyError::MissingVertex {
                        face: index,
                        vertex: v,
                    }
                    .into());
                }
                if face[..i].contains(&v) {
                    return Err(TopologyError::InvalidTopology(format!(
                        "face {index} repeats vertex {v}"
                    ))
                    .into());
                }
                let next = face[(i + 1) % face.len()];
                if let Some(other) = seen.insert((v, next), index) {
                    return Err(TopologyError::InvalidTopology(format!(
                        "edge {v}->{next} used by faces {other} and {index}"
                    ))
                    .into());
                }
            }
        }
        Ok(Self::from_raw(vertices, faces))
    }

    /// Creates a polyhedron without validation.
    #[must_use]
    pub(crate) fn from_raw(vertices: Vec<Point3>, faces: Vec<Vec<usize>>) -> Self {
        let mut edge_faces = HashMap::new();
        let mut vertex_faces = vec![Vec::new(); vertices.len()];
        for (index, face) in faces.iter().enumerate() {
            for (i, &v) in face.iter().enumerate() {
                edge_faces.insert((v, face[(i + 1) % face.len()]), index);
                vertex_faces[v].push(index);
            }
        }
        Self {
            vertices,
            faces,
            edge_faces,
            vertex_faces,
        }
    }

    /// Starts a builder seeded with this polyhedron, applies `edit` and
    /// commits the result as a new polyhedron. `self` is left untouched.
    #[must_use]
    pub fn with_changes(&self, edit: impl FnOnce(SolidBuilder) -> SolidBuilder) -> Self {
        edit(SolidBuilder::from_polyhedron(self)).build()
    }

    /// Same faces, with every vertex moved to the matching entry of `positions`.
    ///
    /// # Panics
    ///
    /// Panics if `positions` does not have one entry per vertex.
    #[must_use]
    pub fn with_vertex_positions(&self, positions: Vec<Point3>) -> Self {
        assert_eq!(
            positions.len(),
            self.vertices.len(),
            "vertex position count mismatch"
        );
        Self {
            vertices: positions,
            faces: self.faces.clone(),
            edge_faces: self.edge_faces.clone(),
            vertex_faces: self.vertex_faces.clone(),
        }
    }

    /// Drops vertices not referenced by any face, renumbering the rest.
    #[must_use]
    pub fn without_extraneous_vertices(&self) -> Self {
        self.with_changes(SolidBuilder::remove_extraneous_vertices)
    }

    // --- Size queries ---

    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Number of undirected edges.
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.edges().len()
    }

    // --- Element access ---

    /// View of vertex `index`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    #[must_use]
    pub fn vertex(&self, index: usize) -> Vertex<'_> {
        Vertex::new(self, index)
    }

    /// View of face `index`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    #[must_use]
    pub fn face(&self, index: usize) -> Face<'_> {
        Face::new(self, index)
    }

    /// Position of vertex `index`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    #[must_use]
    pub fn position(&self, index: usize) -> &Point3 {
        assert!(
            index < self.vertices.len(),
            "vertex index {index} out of range ({} vertices)",
            self.vertices.len()
        );
        &self.vertices[index]
    }

    #[must_use]
    pub fn positions(&self) -> &[Point3] {
        &self.vertices
    }

    /// Vertex index sequence of face `index`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    #[must_use]
    pub fn face_vertices(&self, index: usize) -> &[usize] {
        assert!(
            index < self.faces.len(),
            "face index {index} out of range ({} faces)",
            self.faces.len()
        );
        &self.faces[index]
    }

    pub fn vertices(&self) -> impl Iterator<Item = Vertex<'_>> + '_ {
        (0..self.vertices.len()).map(move |i| Vertex::new(self, i))
    }

    pub fn faces(&self) -> impl Iterator<Item = Face<'_>> + '_ {
        (0..self.faces.len()).map(move |i| Face::new(self, i))
    }

    /// One directed edge per undirected edge: `a → b` with `a < b`, or the
    /// only direction present on an open boundary.
    #[must_use]
    pub fn edges(&self) -> Vec<Edge<'_>> {
        let mut edges: Vec<Edge<'_>> = self
            .edge_faces
            .keys()
            .filter(|&&(a, b)| a < b || !self.edge_faces.contains_key(&(b, a)))
            .map(|&(a, b)| Edge::new(self, a, b))
            .collect();
        edges.sort_by_key(|e| (e.v1(), e.v2()));
        edges
    }

    /// Face owning the directed edge `a → b`, if any.
    #[must_use]
    pub fn edge_face(&self, a: usize, b: usize) -> Option<usize> {
        self.edge_faces.get(&(a, b)).copied()
    }

    /// Faces containing vertex `index`, in face-index order.
    #[must_use]
    pub(crate) fn faces_at(&self, index: usize) -> &[usize] {
        &self.vertex_faces[index]
    }

    // --- Measurements ---

    /// Reference edge length: the first edge of the first face.
    #[must_use]
    pub fn edge_length(&self) -> f64 {
        match self.faces.first() {
            Some(face) => (self.vertices[face[1]] - self.vertices[face[0]]).norm(),
            None => 0.0,
        }
    }

    /// Mean of all vertex positions.
    #[must_use]
    pub fn centroid(&self) -> Point3 {
        mean_point(&self.vertices)
    }

    /// Number of faces per arity.
    #[must_use]
    pub fn face_arities(&self) -> BTreeMap<usize, usize> {
        let mut counts = BTreeMap::new();
        for face in &self.faces {
            *counts.entry(face.len()).or_insert(0) += 1;
        }
        counts
    }

    /// Largest face arity present.
    #[must_use]
    pub fn max_face_arity(&self) -> usize {
        self.faces.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// First face with the largest arity, or `None` for an empty mesh.
    #[must_use]
    pub fn largest_face(&self) -> Option<Face<'_>> {
        let sides = self.max_face_arity();
        (0..self.faces.len())
            .find(|&f| self.faces[f].len() == sides)
            .map(|f| self.face(f))
    }

    /// Number of faces with `n` sides.
    #[must_use]
    pub fn count_faces_with_sides(&self, n: usize) -> usize {
        self.faces.iter().filter(|f| f.len() == n).count()
    }

    // --- Validity ---

    /// Every directed edge has a twin.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.edge_faces
            .keys()
            .all(|&(a, b)| self.edge_faces.contains_key(&(b, a)))
    }

    /// Closed 2-manifold: faces are proper polygons over existing vertices,
    /// each directed edge occurs once and has a twin, every vertex is used
    /// and its faces form a single fan.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let directed: usize = self.faces.iter().map(Vec::len).sum();
        if directed != self.edge_faces.len() || !self.is_closed() {
            return false;
        }
        let faces_ok = self.faces.iter().all(|face| {
            face.len() >= 3
                && face.iter().all(|&v| v < self.vertices.len())
                && face
                    .iter()
                    .enumerate()
                    .all(|(i, v)| !face[i + 1..].contains(v))
        });
        faces_ok
            && self.vertices().all(|vertex| {
                let ring = vertex.adjacent_faces();
                !ring.is_empty() && ring.len() == self.vertex_faces[vertex.index()].len()
            })
    }

    /// Strictly convex: every face is planar and all other vertices lie
    /// strictly behind its plane, so no two adjacent faces are coplanar.
    #[must_use]
    pub fn is_convex(&self) -> bool {
        let tolerance = GEOMETRY_TOLERANCE * self.edge_length().max(GEOMETRY_TOLERANCE);
        self.faces().all(|face| {
            let Ok(plane) = face.plane() else {
                return false;
            };
            let planar = face
                .vertex_indices()
                .iter()
                .all(|&v| plane.signed_distance(&self.vertices[v]).abs() < tolerance);
            planar
                && (0..self.vertices.len())
                    .filter(|v| !face.vertex_indices().contains(v))
                    .all(|v| plane.signed_distance(&self.vertices[v]) < -tolerance)
        })
    }

    /// Every face is a regular polygon with the reference edge length.
    #[must_use]
    pub fn is_regular_faced(&self) -> bool {
        let length = self.edge_length();
        self.faces().all(|face| face.is_regular_polygon(length))
    }

    /// Every face has the same arity and every vertex the same degree.
    #[must_use]
    pub fn is_regular(&self) -> bool {
        let arity = self.faces.first().map_or(0, Vec::len);
        let degree = self.vertex_faces.first().map_or(0, Vec::len);
        self.faces.iter().all(|f| f.len() == arity)
            && self.vertex_faces.iter().all(|f| f.len() == degree)
            && self.is_regular_faced()
    }

    // --- Hit testing ---

    /// Face under a pick point on (or near) the surface.
    ///
    /// Only faces whose polygon contains the point's projection and whose
    /// plane lies within a tenth of an edge length are candidates; the
    /// nearest plane wins.
    #[must_use]
    pub fn hit_face(&self, point: &Point3) -> Option<Face<'_>> {
        let reach = self.edge_length() * 0.1;
        self.faces()
            .filter_map(|face| {
                let plane = face.plane().ok()?;
                let distance = plane.signed_distance(point).abs();
                (distance <= reach && point_in_convex_polygon(point, &face.positions(), &plane))
                    .then_some((face, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(face, _)| face)
    }

    // --- Interchange ---

    /// Plain table form of this polyhedron.
    #[must_use]
    pub fn to_data(&self) -> SolidData {
        SolidData {
            vertices: self.vertices.iter().map(|p| [p.x, p.y, p.z]).collect(),
            faces: self.faces.clone(),
        }
    }
}

impl TryFrom<SolidData> for Polyhedron {
    type Error = crate::error::PolyhedraError;

    fn try_from(data: SolidData) -> Result<Self> {
        let vertices = data
            .vertices
            .iter()
            .map(|&[x, y, z]| Point3::new(x, y, z))
            .collect();
        Self::new(vertices, data.faces)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;
    use approx::assert_relative_eq;

    pub(crate) fn tetrahedron() -> Polyhedron {
        let vertices = vec![
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(1.0, -1.0, -1.0),
            Point3::new(-1.0, 1.0, -1.0),
            Point3::new(-1.0, -1.0, 1.0),
        ];
        let faces = vec![vec![0, 1, 2], vec![0, 3, 1], vec![0, 2, 3], vec![1, 3, 2]];
        Polyhedron::new(vertices, faces).unwrap()
    }

    pub(crate) fn cube() -> Polyhedron {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ];
        let faces = vec![
            vec![0, 3, 2, 1],
            vec![4, 5, 6, 7],
            vec![0, 1, 5, 4],
            vec![1, 2, 6, 5],
            vec![2, 3, 7, 6],
            vec![3, 0, 4, 7],
        ];
        Polyhedron::new(vertices, faces).unwrap()
    }

    #[test]
    fn tetrahedron_is_valid_and_convex() {
        let tet = tetrahedron();
        assert_eq!(tet.num_vertices(), 4);
        assert_eq!(tet.num_faces(), 4);
        assert_eq!(tet.num_edges(), 6);
        assert!(tet.is_valid());
        assert!(tet.is_convex());
        assert!(tet.is_regular());
        assert_relative_eq!(tet.edge_length(), 8.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn cube_is_valid_and_convex() {
        let cube = cube();
        assert!(cube.is_valid());
        assert!(cube.is_convex());
        assert_eq!(cube.face_arities().get(&4), Some(&6));
        assert_eq!(cube.largest_face().map(|face| face.index()), Some(0));
    }

    #[test]
    fn rejects_missing_vertex() {
        let result = Polyhedron::new(vec![Point3::origin(); 3], vec![vec![0, 1, 5]]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_repeated_directed_edge() {
        let result = Polyhedron::new(
            vec![Point3::origin(); 4],
            vec![vec![0, 1, 2], vec![0, 1, 3]],
        );
        assert!(result.is_err());
    }

    #[test]
    fn open_mesh_is_not_closed() {
        let tri = Polyhedron::new(
            vec![
                Point3::origin(),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![vec![0, 1, 2]],
        )
        .unwrap();
        assert!(!tri.is_closed());
        assert!(!tri.is_valid());
    }

    #[test]
    fn flattened_cube_is_not_convex() {
        let cube = cube();
        let positions = cube
            .positions()
            .iter()
            .map(|p| Point3::new(p.x, p.y, 0.0))
            .collect();
        assert!(!cube.with_vertex_positions(positions).is_convex());
    }

    #[test]
    fn hit_face_finds_face_under_point() {
        let cube = cube();
        let top = cube.hit_face(&Point3::new(0.5, 0.5, 1.0)).unwrap();
        assert_eq!(top.index(), 1);
        assert!(cube.hit_face(&Point3::new(5.0, 5.0, 5.0)).is_none());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn stale_face_index_panics() {
        let _ = tetrahedron().face_vertices(9);
    }

    #[test]
    fn data_round_trip_keeps_faces() {
        let cube = cube();
        let json = serde_json::to_string(&cube.to_data()).unwrap();
        let data: SolidData = serde_json::from_str(&json).unwrap();
        let back = Polyhedron::try_from(data).unwrap();
        assert_eq!(back.num_faces(), 6);
        assert!(back.is_valid());
    }
}
