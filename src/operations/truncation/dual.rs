use crate::error::{OperationError, Result};
use crate::math::Point3;
use crate::topology::{Face, Polyhedron, VertexList};

use super::super::option_set::NoOptions;
use super::super::utils::{is_legal, require_regular};
use super::super::{Operation, OperationResult};

/// Swaps the roles of faces and vertices of a regular solid.
///
/// The dual is the reciprocal about the midsphere: each face becomes a
/// vertex on its normal, and the two solids' edges cross at their
/// midpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dual;

fn dual(polyhedron: &Polyhedron) -> Result<Polyhedron> {
    require_regular(polyhedron, "dual")?;
    let center = polyhedron.centroid();
    let midradius = polyhedron
        .edges()
        .first()
        .map(|edge| (edge.midpoint() - center).norm())
        .ok_or_else(|| OperationError::InvalidInput("solid has no edges".into()))?;
    let vertices: Vec<Point3> = polyhedron
        .faces()
        .map(|face| {
            let inradius = (face.centroid() - center).norm();
            center + face.normal() * (midradius * midradius / inradius)
        })
        .collect();
    let faces = polyhedron
        .vertices()
        .map(|vertex| vertex.adjacent_faces().iter().map(Face::index).collect())
        .collect();
    let result = Polyhedron::new(vertices, faces)?;
    if !is_legal(&result) {
        return Err(OperationError::NotApplicable("dual is not convex".into()).into());
    }
    Ok(result)
}

impl Operation for Dual {
    type Options = NoOptions;

    fn apply(&self, polyhedron: &Polyhedron, _: &NoOptions) -> Result<OperationResult> {
        dual(polyhedron).map(OperationResult::Solid)
    }

    fn all_options(&self, polyhedron: &Polyhedron) -> Vec<NoOptions> {
        if polyhedron.is_regular() {
            vec![NoOptions]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::topology::fixtures::{cube, tetrahedron};
    use approx::assert_relative_eq;

    #[test]
    fn cube_and_octahedron_are_dual() {
        let cube = cube();
        let octahedron = Dual.apply(&cube, &NoOptions).unwrap().into_end_state();
        assert_eq!((octahedron.num_vertices(), octahedron.num_faces()), (6, 8));
        assert!(octahedron.is_regular());
        let back = Dual.apply(&octahedron, &NoOptions).unwrap().into_end_state();
        assert_eq!((back.num_vertices(), back.num_faces()), (8, 6));
        assert_relative_eq!(back.edge_length(), cube.edge_length(), epsilon = 1e-9);
    }

    #[test]
    fn tetrahedron_is_self_dual() {
        let result = Dual.apply(&tetrahedron(), &NoOptions).unwrap().into_end_state();
        assert_eq!((result.num_vertices(), result.num_faces()), (4, 4));
        assert!(result.is_regular());
    }
}
