use crate::error::{OperationError, Result};
use crate::topology::Polyhedron;

use super::super::option_set::{NoOptions, TwistOptions};
use super::super::options::{SearchOptions, TwistDirection};
use super::super::utils::is_legal;
use super::super::{AnimationData, Operation, OperationResult};
use super::utils::{elongate_at, Capstone};

/// Pulls the cap of a capstone solid away from its base with a prism band.
#[derive(Debug, Clone, Copy, Default)]
pub struct Elongate;

/// Like [`Elongate`], with an antiprism band.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gyroelongate;

fn stretched(polyhedron: &Polyhedron, twist: Option<TwistDirection>) -> Option<AnimationData> {
    let capstone = Capstone::find(polyhedron)?;
    let data = elongate_at(polyhedron, &capstone.cap, twist);
    is_legal(&data.end_state()).then_some(data)
}

fn not_applicable(operation: &str) -> OperationError {
    OperationError::NotApplicable(format!("{operation} needs a capstone solid"))
}

impl Operation for Elongate {
    type Options = NoOptions;

    fn apply(&self, polyhedron: &Polyhedron, _: &NoOptions) -> Result<OperationResult> {
        let data = stretched(polyhedron, None).ok_or_else(|| not_applicable("elongate"))?;
        Ok(OperationResult::Animated(data))
    }

    fn all_options(&self, polyhedron: &Polyhedron) -> Vec<NoOptions> {
        stretched(polyhedron, None).map(|_| NoOptions).into_iter().collect()
    }
}

impl Operation for Gyroelongate {
    type Options = TwistOptions;

    fn apply(&self, polyhedron: &Polyhedron, options: &TwistOptions) -> Result<OperationResult> {
        let twist = options.twist.unwrap_or(TwistDirection::Left);
        let data = stretched(polyhedron, Some(twist)).ok_or_else(|| not_applicable("gyroelongate"))?;
        Ok(OperationResult::Animated(data))
    }

    fn all_options(&self, polyhedron: &Polyhedron) -> Vec<TwistOptions> {
        [TwistDirection::Left, TwistDirection::Right]
            .into_iter()
            .filter(|&twist| stretched(polyhedron, Some(twist)).is_some())
            .map(|twist| TwistOptions { twist: Some(twist) })
            .collect()
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
    use crate::operations::{Augment, AugmentOptions};
    use crate::topology::fixtures::{cube, tetrahedron};

    #[test]
    fn elongating_tetrahedron_gives_prism_with_pyramid() {
        let tet = tetrahedron();
        assert_eq!(Elongate.all_options(&tet), vec![NoOptions]);
        let result = Elongate.apply(&tet, &NoOptions).unwrap();
        let OperationResult::Animated(data) = &result else {
            panic!("elongate animates");
        };
        // The band starts collapsed.
        assert_eq!(data.start.num_faces(), 7);
        let end = result.end_state();
        assert_eq!(end.count_faces_with_sides(4), 3);
        assert!(end.is_convex());
    }

    #[test]
    fn gyroelongating_offers_both_twists() {
        let square_pyramid = crate::Catalog::builtin().get("square-pyramid").unwrap();
        let options = Gyroelongate.all_options(square_pyramid);
        assert_eq!(
            options,
            vec![
                TwistOptions {
                    twist: Some(TwistDirection::Left)
                },
                TwistOptions {
                    twist: Some(TwistDirection::Right)
                },
            ]
        );
        for twist in &options {
            let end = Gyroelongate.apply(square_pyramid, twist).unwrap().into_end_state();
            assert_eq!(end.count_faces_with_sides(3), 12);
            assert!(end.is_convex());
        }
    }

    #[test]
    fn cube_is_not_a_capstone() {
        assert!(Elongate.all_options(&cube()).is_empty());
        assert!(Gyroelongate.all_options(&cube()).is_empty());
        assert!(Elongate.apply(&cube(), &NoOptions).is_err());
    }

    #[test]
    fn elongated_pyramid_is_not_a_capstone() {
        let cube = cube();
        let elongated = Augment
            .apply(
                &cube,
                &AugmentOptions {
                    face: Some(1),
                    ..AugmentOptions::default()
                },
            )
            .unwrap()
            .into_end_state();
        assert!(Gyroelongate.all_options(&elongated).is_empty());
    }

    #[test]
    fn twisted_tetrahedron_is_not_strictly_convex() {
        // A tetrahedron on an octahedron face leaves coplanar triangles.
        assert!(Gyroelongate.all_options(&tetrahedron()).is_empty());
    }
}
