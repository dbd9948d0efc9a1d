use std::f64::consts::PI;

use crate::math::Point3;

use super::face::Face;
use super::polyhedron::Polyhedron;
use super::vertex::VertexList;

/// View of a directed edge `v1 → v2` of a [`Polyhedron`].
///
/// The edge belongs to the face whose winding runs from `v1` to `v2`; its
/// twin runs the other way and belongs to the neighbouring face.
#[derive(Debug, Clone, Copy)]
pub struct Edge<'a> {
    polyhedron: &'a Polyhedron,
    v1: usize,
    v2: usize,
}

impl<'a> Edge<'a> {
    pub(crate) fn new(polyhedron: &'a Polyhedron, v1: usize, v2: usize) -> Self {
        Self { polyhedron, v1, v2 }
    }

    #[must_use]
    pub fn v1(&self) -> usize {
        self.v1
    }

    #[must_use]
    pub fn v2(&self) -> usize {
        self.v2
    }

    #[must_use]
    pub fn vertices(&self) -> [usize; 2] {
        [self.v1, self.v2]
    }

    /// The same edge running the other way.
    #[must_use]
    pub fn twin(&self) -> Edge<'a> {
        Edge::new(self.polyhedron, self.v2, self.v1)
    }

    /// Face owning this directed edge, if any.
    #[must_use]
    pub fn try_face(&self) -> Option<Face<'a>> {
        self.polyhedron
            .edge_face(self.v1, self.v2)
            .map(|f| self.polyhedron.face(f))
    }

    /// Face owning this directed edge.
    ///
    /// # Panics
    ///
    /// Panics if no face runs `v1 → v2`.
    #[must_use]
    pub fn face(&self) -> Face<'a> {
        match self.try_face() {
            Some(face) => face,
            None => panic!("no face owns edge {} -> {}", self.v1, self.v2),
        }
    }

    /// Face on the other side of this edge, if the mesh is closed here.
    #[must_use]
    pub fn twin_face(&self) -> Option<Face<'a>> {
        self.twin().try_face()
    }

    /// This edge's face, then its twin's face.
    #[must_use]
    pub fn adjacent_faces(&self) -> Vec<Face<'a>> {
        self.try_face().into_iter().chain(self.twin_face()).collect()
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        (self.polyhedron.position(self.v2) - self.polyhedron.position(self.v1)).norm()
    }

    #[must_use]
    pub fn midpoint(&self) -> Point3 {
        nalgebra::center(
            self.polyhedron.position(self.v1),
            self.polyhedron.position(self.v2),
        )
    }

    /// Interior angle between the two faces meeting here, or `None` on an
    /// open edge.
    #[must_use]
    pub fn dihedral_angle(&self) -> Option<f64> {
        let own = self.try_face()?.normal();
        let other = self.twin_face()?.normal();
        Some(PI - own.angle(&other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::polyhedron::tests::cube;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn twin_swaps_faces() {
        let cube = cube();
        let edge = Edge::new(&cube, 4, 5);
        assert_eq!(edge.face().index(), 1);
        assert_eq!(edge.twin_face().map(|f| f.index()), Some(2));
        assert_eq!(edge.twin().face().index(), 2);
    }

    #[test]
    fn cube_edge_measurements() {
        let cube = cube();
        let edge = Edge::new(&cube, 4, 5);
        assert_relative_eq!(edge.length(), 1.0);
        assert_relative_eq!(edge.midpoint().x, 0.5);
        assert_relative_eq!(edge.dihedral_angle().unwrap_or(0.0), FRAC_PI_2, epsilon = 1e-12);
    }
}
