use super::edge::Edge;
use super::polyhedron::Polyhedron;
use super::vertex::VertexList;

/// View of one face of a [`Polyhedron`].
#[derive(Debug, Clone, Copy)]
pub struct Face<'a> {
    polyhedron: &'a Polyhedron,
    index: usize,
}

impl<'a> Face<'a> {
    pub(crate) fn new(polyhedron: &'a Polyhedron, index: usize) -> Self {
        assert!(
            index < polyhedron.num_faces(),
            "face index {index} out of range ({} faces)",
            polyhedron.num_faces()
        );
        Self { polyhedron, index }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Directed edges in winding order.
    #[must_use]
    pub fn edges(&self) -> Vec<Edge<'a>> {
        let vertices = self.polyhedron.face_vertices(self.index);
        let n = vertices.len();
        (0..n)
            .map(|i| Edge::new(self.polyhedron, vertices[i], vertices[(i + 1) % n]))
            .collect()
    }

    /// Faces across each edge, in winding order.
    #[must_use]
    pub fn adjacent_faces(&self) -> Vec<Face<'a>> {
        self.edges().iter().filter_map(Edge::twin_face).collect()
    }

    /// Vertex following `v` in the winding.
    ///
    /// # Panics
    ///
    /// Panics if `v` is not on this face.
    #[must_use]
    pub fn next_vertex(&self, v: usize) -> usize {
        let vertices = self.polyhedron.face_vertices(self.index);
        let at = self.position_of(v);
        vertices[(at + 1) % vertices.len()]
    }

    /// Vertex preceding `v` in the winding.
    ///
    /// # Panics
    ///
    /// Panics if `v` is not on this face.
    #[must_use]
    pub fn previous_vertex(&self, v: usize) -> usize {
        let vertices = self.polyhedron.face_vertices(self.index);
        let at = self.position_of(v);
        vertices[(at + vertices.len() - 1) % vertices.len()]
    }

    fn position_of(&self, v: usize) -> usize {
        match self
            .polyhedron
            .face_vertices(self.index)
            .iter()
            .position(|&x| x == v)
        {
            Some(at) => at,
            None => panic!("vertex {v} is not on face {}", self.index),
        }
    }

    /// Regular polygon with the solid's reference edge length.
    #[must_use]
    pub fn is_regular(&self) -> bool {
        self.is_regular_polygon(self.polyhedron.edge_length())
    }

    /// Whether this face is one of `set`.
    #[must_use]
    pub fn in_set(&self, set: &[usize]) -> bool {
        set.contains(&self.index)
    }
}

impl VertexList for Face<'_> {
    fn polyhedron(&self) -> &Polyhedron {
        self.polyhedron
    }

    fn vertex_indices(&self) -> &[usize] {
        self.polyhedron.face_vertices(self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;
    use crate::topology::polyhedron::tests::cube;

    #[test]
    fn cube_face_queries() {
        let cube = cube();
        let top = cube.face(1);
        assert_eq!(top.num_sides(), 4);
        assert!(top.is_regular());
        assert!((top.normal().z - 1.0).abs() < TOLERANCE);
        assert!((top.centroid().z - 1.0).abs() < TOLERANCE);
        assert_eq!(top.adjacent_faces().len(), 4);
        assert_eq!(top.next_vertex(7), 4);
        assert_eq!(top.previous_vertex(4), 7);
    }

    #[test]
    fn face_membership() {
        let cube = cube();
        assert!(cube.face(2).in_set(&[0, 2]));
        assert!(!cube.face(3).in_set(&[0, 2]));
    }
}
