use crate::error::{OperationError, Result};
use crate::topology::Polyhedron;

use super::super::option_set::NoOptions;
use super::super::{Operation, OperationResult};
use super::utils::{remove_band, shortenable};

/// Removes the prism or antiprism band under a cap.
#[derive(Debug, Clone, Copy, Default)]
pub struct Shorten;

impl Operation for Shorten {
    type Options = NoOptions;

    fn apply(&self, polyhedron: &Polyhedron, _: &NoOptions) -> Result<OperationResult> {
        let (cap, band) = shortenable(polyhedron)
            .into_iter()
            .next()
            .ok_or_else(|| OperationError::NotApplicable("no band to remove".into()))?;
        Ok(OperationResult::Solid(remove_band(polyhedron, &cap, &band)))
    }

    fn all_options(&self, polyhedron: &Polyhedron) -> Vec<NoOptions> {
        if shortenable(polyhedron).is_empty() {
            Vec::new()
        } else {
            vec![NoOptions]
        }
    }
}
