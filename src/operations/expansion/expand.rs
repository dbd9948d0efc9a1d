use crate::error::{OperationError, Result};
use crate::topology::Polyhedron;

use super::super::option_set::NoOptions;
use super::super::utils::require_regular;
use super::super::{AnimationData, Operation, OperationResult};
use super::utils::{expansion_offset, Bridge, FaceCorners};

/// Pulls the faces of a regular solid apart, filling the gaps with squares
/// along the old edges and with a face at every old vertex.
#[derive(Debug, Clone, Copy, Default)]
pub struct Expand;

fn expanded(polyhedron: &Polyhedron) -> Result<AnimationData> {
    require_regular(polyhedron, "expand")?;
    let edge = polyhedron
        .edges()
        .into_iter()
        .next()
        .ok_or_else(|| OperationError::InvalidInput("solid has no edges".into()))?;
    let offset = expansion_offset(polyhedron, &edge.face(), &edge.twin().face());
    let corners = FaceCorners::new(polyhedron);
    let start = Polyhedron::from_raw(
        corners.collapsed(polyhedron),
        corners.faces(polyhedron, Bridge::Square),
    );
    Ok(AnimationData {
        start,
        end_vertices: corners.positions(polyhedron, offset, 0.0),
    })
}

impl Operation for Expand {
    type Options = NoOptions;

    fn apply(&self, polyhedron: &Polyhedron, _: &NoOptions) -> Result<OperationResult> {
        expanded(polyhedron).map(OperationResult::Animated)
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

    #[test]
    fn expanded_tetrahedron_is_cuboctahedral() {
        let result = Expand.apply(&tetrahedron(), &NoOptions).unwrap();
        let end = result.end_state();
        assert_eq!(end.num_vertices(), 12);
        assert_eq!(end.count_faces_with_sides(3), 8);
        assert_eq!(end.count_faces_with_sides(4), 6);
        assert!(end.is_convex());
        assert!(end.is_regular_faced());
    }

    #[test]
    fn expanded_cube_is_rhombicuboctahedron() {
        let end = Expand.apply(&cube(), &NoOptions).unwrap().into_end_state();
        assert_eq!(end.num_vertices(), 24);
        assert_eq!(end.count_faces_with_sides(3), 8);
        assert_eq!(end.count_faces_with_sides(4), 18);
        assert!(end.is_convex());
        assert!(end.is_regular_faced());
    }

    #[test]
    fn start_is_collapsed_onto_old_vertices() {
        let tet = tetrahedron();
        let OperationResult::Animated(data) = Expand.apply(&tet, &NoOptions).unwrap() else {
            panic!("expand animates");
        };
        for p in data.start.positions() {
            assert!(tet.positions().iter().any(|q| (p - q).norm() < 1e-12));
        }
    }

    #[test]
    fn irregular_solids_are_not_expanded() {
        let cube = cube();
        let stretched = cube.with_vertex_positions(
            cube.positions()
                .iter()
                .map(|p| crate::math::Point3::new(p.x, p.y, p.z * 2.0))
                .collect(),
        );
        assert!(Expand.all_options(&stretched).is_empty());
        assert!(Expand.apply(&stretched, &NoOptions).is_err());
    }
}
