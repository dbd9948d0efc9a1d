use std::collections::HashMap;

use crate::error::{OperationError, Result};
use crate::topology::Polyhedron;

use super::super::option_set::NoOptions;
use super::super::utils::{is_legal, require_regular};
use super::super::{Operation, OperationResult};
use super::utils::cut_faces;

/// Cuts every vertex of a regular solid down to the edge midpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rectify;

fn rectified(polyhedron: &Polyhedron) -> Result<Polyhedron> {
    require_regular(polyhedron, "rectify")?;
    let mut slots: HashMap<(usize, usize), usize> = HashMap::new();
    let mut vertices = Vec::new();
    for edge in polyhedron.edges() {
        slots.insert((edge.v1(), edge.v2()), vertices.len());
        slots.insert((edge.v2(), edge.v1()), vertices.len());
        vertices.push(edge.midpoint());
    }
    let faces = cut_faces(polyhedron, |v, w| slots[&(v, w)]);
    let result = Polyhedron::new(vertices, faces)?;
    if !is_legal(&result) {
        return Err(OperationError::NotApplicable("rectified solid is not convex".into()).into());
    }
    Ok(result)
}

impl Operation for Rectify {
    type Options = NoOptions;

    fn apply(&self, polyhedron: &Polyhedron, _: &NoOptions) -> Result<OperationResult> {
        rectified(polyhedron).map(OperationResult::Solid)
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
    fn rectified_tetrahedron_is_octahedron() {
        let octahedron = Rectify.apply(&tetrahedron(), &NoOptions).unwrap().into_end_state();
        assert_eq!((octahedron.num_vertices(), octahedron.num_faces()), (6, 8));
        assert!(octahedron.is_regular());
    }

    #[test]
    fn rectified_cube_is_cuboctahedron() {
        let result = Rectify.apply(&cube(), &NoOptions).unwrap().into_end_state();
        assert_eq!(result.num_vertices(), 12);
        assert_eq!(result.count_faces_with_sides(3), 8);
        assert_eq!(result.count_faces_with_sides(4), 6);
        assert!(result.is_regular_faced());
        assert!(result.is_convex());
    }
}
