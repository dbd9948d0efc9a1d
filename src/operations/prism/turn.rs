use crate::error::{OperationError, Result};
use crate::math::GEOMETRY_TOLERANCE;
use crate::topology::{Cap, Polyhedron, VertexList, VertexRing};

use super::super::option_set::TwistOptions;
use super::super::options::{SearchOptions, TwistDirection};
use super::super::utils::{is_legal, is_parallel};
use super::super::{Operation, OperationResult};
use super::utils::{elongate_at, remove_band, shortenable, BandKind};

/// Swaps the band under a cap between prism and antiprism.
#[derive(Debug, Clone, Copy, Default)]
pub struct Turn;

/// A solid with its band removed, and the cap that sat on the band, now
/// resting on the band's far ring.
struct Turning {
    shortened: Polyhedron,
    cap: Cap,
    from: BandKind,
}

impl Turning {
    fn find(polyhedron: &Polyhedron) -> Option<Turning> {
        let (cap, band) = shortenable(polyhedron).into_iter().next()?;
        let axis = cap.normal(polyhedron);
        let landing = VertexRing::new(polyhedron, band.targets.clone()).centroid();
        let shortened = remove_band(polyhedron, &cap, &band);
        let tolerance = GEOMETRY_TOLERANCE * polyhedron.edge_length();
        let landed = Cap::get_all_with_base(&shortened).into_iter().find(|other| {
            other.kind() == cap.kind()
                && other.num_sides() == cap.num_sides()
                && is_parallel(&other.normal(&shortened), &axis)
                && (other.boundary(&shortened).centroid() - landing).norm() < tolerance
        })?;
        Some(Turning {
            shortened,
            cap: landed,
            from: band.kind,
        })
    }

    fn result(&self, twist: Option<TwistDirection>) -> Option<Polyhedron> {
        let twist = match self.from {
            BandKind::Prism => Some(twist.unwrap_or(TwistDirection::Left)),
            BandKind::Antiprism => None,
        };
        let result = elongate_at(&self.shortened, &self.cap, twist).end_state();
        is_legal(&result).then_some(result)
    }
}

impl Operation for Turn {
    type Options = TwistOptions;

    fn apply(&self, polyhedron: &Polyhedron, options: &TwistOptions) -> Result<OperationResult> {
        let result = Turning::find(polyhedron)
            .and_then(|turning| turning.result(options.twist))
            .ok_or_else(|| OperationError::NotApplicable("no band to turn".into()))?;
        Ok(OperationResult::Solid(result))
    }

    fn all_options(&self, polyhedron: &Polyhedron) -> Vec<TwistOptions> {
        let Some(turning) = Turning::find(polyhedron) else {
            return Vec::new();
        };
        if turning.from == BandKind::Prism {
            [TwistDirection::Left, TwistDirection::Right]
                .into_iter()
                .filter(|&twist| turning.result(Some(twist)).is_some())
                .map(|twist| TwistOptions { twist: Some(twist) })
                .collect()
        } else {
            turning
                .result(None)
                .map(|_| TwistOptions::default())
                .into_iter()
                .collect()
        }
    }

    fn describe(&self, _: &Polyhedron, options: &TwistOptions) -> Result<SearchOptions> {
        Ok(SearchOptions {
            twist: options.twist,
            ..SearchOptions::default()
        })
    }
}
