use crate::error::{OperationError, Result};
use crate::topology::Polyhedron;

use super::super::option_set::{FaceTypeOptions, TwistOptions};
use super::super::options::{SearchOptions, TwistDirection};
use super::super::{Operation, OperationResult};
use super::contract::{contract, face_types};
use super::snub::{snubbed, twist_options};

/// Turns the squares of an expanded solid into pairs of triangles, giving
/// the snub of the solid it was expanded from.
#[derive(Debug, Clone, Copy, Default)]
pub struct Twist;

/// The regular solid an expanded solid came from.
fn unexpanded(polyhedron: &Polyhedron) -> Option<Polyhedron> {
    face_types(polyhedron).into_iter().find_map(|face_type| {
        contract(polyhedron, &FaceTypeOptions { face_type: Some(face_type) })
            .ok()
            .filter(Polyhedron::is_regular)
    })
}

impl Operation for Twist {
    type Options = TwistOptions;

    fn apply(&self, polyhedron: &Polyhedron, options: &TwistOptions) -> Result<OperationResult> {
        let base = unexpanded(polyhedron)
            .ok_or_else(|| OperationError::NotApplicable("solid is not an expanded regular polyhedron".into()))?;
        let twist = options.twist.unwrap_or(TwistDirection::Left);
        let snub = snubbed(&base, twist)?.end_state();
        Ok(OperationResult::Solid(snub))
    }

    fn all_options(&self, polyhedron: &Polyhedron) -> Vec<TwistOptions> {
        unexpanded(polyhedron)
            .map(|base| twist_options(&base))
            .unwrap_or_default()
    }

    fn describe(&self, _: &Polyhedron, options: &TwistOptions) -> Result<SearchOptions> {
        Ok(SearchOptions {
            twist: options.twist,
            ..SearchOptions::default()
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::{Expand, NoOptions};
    use crate::topology::fixtures::{cube, tetrahedron};

    #[test]
    fn twisted_cuboctahedron_is_icosahedron() {
        let cuboctahedron = Expand.apply(&tetrahedron(), &NoOptions).unwrap().into_end_state();
        assert_eq!(Twist.all_options(&cuboctahedron), vec![TwistOptions::default()]);
        let result = Twist
            .apply(&cuboctahedron, &TwistOptions::default())
            .unwrap()
            .into_end_state();
        assert_eq!((result.num_vertices(), result.num_faces()), (12, 20));
        assert!(result.is_regular());
    }

    #[test]
    fn twisted_rhombicuboctahedron_is_snub_cube() {
        let rhombic = Expand.apply(&cube(), &NoOptions).unwrap().into_end_state();
        let options = Twist.all_options(&rhombic);
        assert_eq!(options.len(), 2);
        let result = Twist.apply(&rhombic, &options[1]).unwrap().into_end_state();
        assert_eq!((result.num_vertices(), result.num_faces()), (24, 38));
        assert!(result.is_convex());
    }

    #[test]
    fn regular_solids_cannot_be_twisted() {
        assert!(Twist.all_options(&cube()).is_empty());
        assert!(Twist.apply(&cube(), &TwistOptions::default()).is_err());
    }
}
