use crate::error::{OperationError, Result};
use crate::math::{Point3, Vector3, GEOMETRY_TOLERANCE};
use crate::topology::{Face, Polyhedron, VertexList};

/// Right-handed frame on a face: `z` is the outward normal and `x` points
/// from the centre at one of the face's vertices.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame {
    origin: Point3,
    x: Vector3,
    y: Vector3,
    z: Vector3,
}

impl Frame {
    /// Frame on `face` with `x` toward its `start`-th vertex.
    pub(crate) fn on_face(face: &Face<'_>, start: usize) -> Result<Frame> {
        let origin = face.centroid();
        let z = face.normal();
        let corner = face.positions()[start % face.num_sides()];
        let x = (corner - origin).normalize();
        if z.norm() < GEOMETRY_TOLERANCE || !x.iter().all(|c| c.is_finite()) {
            return Err(OperationError::InvalidInput(format!(
                "face {} is degenerate",
                face.index()
            ))
            .into());
        }
        Ok(Frame {
            origin,
            x,
            y: z.cross(&x),
            z,
        })
    }

    /// World position of a point given in this frame, scaled by `scale`.
    pub(crate) fn place(&self, local: &Point3, scale: f64) -> Point3 {
        self.origin + (self.x * local.x + self.y * local.y + self.z * local.z) * scale
    }
}

/// Closed manifold and strictly convex.
pub(crate) fn is_legal(polyhedron: &Polyhedron) -> bool {
    polyhedron.is_valid() && polyhedron.is_convex()
}

/// Fails unless the solid is regular (Platonic), as the vertex-uniform
/// retilings require.
pub(crate) fn require_regular(polyhedron: &Polyhedron, operation: &str) -> Result<()> {
    if polyhedron.is_regular() {
        Ok(())
    } else {
        Err(OperationError::NotApplicable(format!("{operation} needs a regular polyhedron")).into())
    }
}

/// Whether two unit vectors point in opposite directions.
pub(crate) fn is_opposite(a: &Vector3, b: &Vector3) -> bool {
    a.dot(b) < -1.0 + GEOMETRY_TOLERANCE
}

/// Whether two unit vectors point the same way.
pub(crate) fn is_parallel(a: &Vector3, b: &Vector3) -> bool {
    a.dot(b) > 1.0 - GEOMETRY_TOLERANCE
}

/// Drops repeated consecutive entries, treating the list as a cycle.
pub(crate) fn dedupe_cyclic(mut ring: Vec<usize>) -> Vec<usize> {
    ring.dedup();
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::topology::fixtures::cube;
    use approx::assert_relative_eq;

    #[test]
    fn frame_maps_local_axes() {
        let cube = cube();
        let frame = Frame::on_face(&cube.face(1), 0).unwrap();
        let corner = frame.place(&Point3::new(0.5_f64.sqrt(), 0.0, 0.0), 1.0);
        assert_relative_eq!(corner.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(corner.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(corner.z, 1.0, epsilon = 1e-12);
        let above = frame.place(&Point3::new(0.0, 0.0, 2.0), 1.0);
        assert_relative_eq!(above.z, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn cyclic_duplicates_are_dropped() {
        assert_eq!(dedupe_cyclic(vec![1, 1, 2, 3, 3, 1]), vec![1, 2, 3]);
        assert_eq!(dedupe_cyclic(vec![4, 4]), vec![4]);
    }

    #[test]
    fn cube_is_legal_and_not_regular_faced_after_stretch() {
        let cube = cube();
        assert!(is_legal(&cube));
        require_regular(&cube, "test").unwrap();
        let stretched = cube.with_vertex_positions(
            cube.positions()
                .iter()
                .map(|p| Point3::new(p.x, p.y, p.z * 2.0))
                .collect(),
        );
        assert!(require_regular(&stretched, "test").is_err());
    }
}
