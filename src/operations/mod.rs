//! Solid-transforming operations.
//!
//! Every operation implements [`Operation`]: it applies to a polyhedron with a
//! typed option set, enumerates its legal option sets, resolves a pick point
//! to a target and reports per-face highlight tags. [`OperationKind`] is the
//! closed set of operations and dispatches over untyped [`OperationOptions`].

mod cut_paste;
mod expansion;
mod kind;
mod option_set;
pub mod options;
mod prism;
mod truncation;
mod utils;

use serde::Serialize;

use crate::error::{PolyhedraError, Result};
use crate::math::Point3;
use crate::topology::Polyhedron;

pub use cut_paste::{get_cap_alignment, get_cupola_gyrate, Augment, Diminish, Gyrate};
pub use expansion::{Contract, Expand, Snub, Twist};
pub use kind::OperationKind;
pub use option_set::{
    AugmentOptions, CapOptions, FaceTypeOptions, NoOptions, OperationOptions, TwistOptions,
};
pub use options::{Relation, SearchOptions};
pub use prism::{Elongate, Gyroelongate, Shorten, Turn};
pub use truncation::{Dual, Rectify, Sharpen, Truncate};

/// Start mesh plus end positions of an animated transform.
///
/// `start` already has the topology of the result; interpolating each
/// vertex from its position in `start` to the matching entry of
/// `end_vertices` plays the morph.
#[derive(Debug, Clone)]
pub struct AnimationData {
    pub start: Polyhedron,
    pub end_vertices: Vec<Point3>,
}

impl AnimationData {
    /// `start` with every vertex moved to its end position.
    #[must_use]
    pub fn end_state(&self) -> Polyhedron {
        self.start.with_vertex_positions(self.end_vertices.clone())
    }

    /// Vertex positions a fraction `t` of the way through the morph.
    #[must_use]
    pub fn positions_at(&self, t: f64) -> Vec<Point3> {
        self.start
            .positions()
            .iter()
            .zip(&self.end_vertices)
            .map(|(from, to)| from + (to - from) * t)
            .collect()
    }
}

/// Outcome of [`Operation::apply`].
#[derive(Debug, Clone)]
pub enum OperationResult {
    Solid(Polyhedron),
    Animated(AnimationData),
}

impl OperationResult {
    /// The polyhedron the operation ends at.
    #[must_use]
    pub fn end_state(&self) -> Polyhedron {
        match self {
            Self::Solid(polyhedron) => polyhedron.clone(),
            Self::Animated(data) => data.end_state(),
        }
    }

    #[must_use]
    pub fn into_end_state(self) -> Polyhedron {
        match self {
            Self::Solid(polyhedron) => polyhedron,
            Self::Animated(data) => data.end_state(),
        }
    }
}

/// Highlight tag of one face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectState {
    /// Part of the chosen target.
    Selected,
    /// Part of some legal target.
    Selectable,
}

/// A solid-transforming operation.
///
/// Only [`Operation::apply`] and [`Operation::all_options`] are required;
/// operations without targets or descriptive options keep the defaults.
pub trait Operation {
    type Options: Clone
        + Default
        + std::fmt::Debug
        + PartialEq
        + Into<OperationOptions>
        + TryFrom<OperationOptions, Error = PolyhedraError>;

    /// Applies the operation.
    ///
    /// # Errors
    ///
    /// Returns an [`OperationError`](crate::error::OperationError) when the
    /// options are incomplete or not legal for `polyhedron`.
    fn apply(&self, polyhedron: &Polyhedron, options: &Self::Options) -> Result<OperationResult>;

    /// Every legal concrete option set; empty when the operation does not
    /// apply to `polyhedron`.
    fn all_options(&self, polyhedron: &Polyhedron) -> Vec<Self::Options>;

    /// Descriptive option values of a concrete target, before any relation
    /// gating.
    ///
    /// # Errors
    ///
    /// Returns an error when the options lack the target to describe.
    fn describe(&self, _polyhedron: &Polyhedron, _options: &Self::Options) -> Result<SearchOptions> {
        Ok(SearchOptions::default())
    }

    /// Descriptive option values that tell apart the solids listed in
    /// `relations`.
    ///
    /// # Errors
    ///
    /// Returns an error when the options lack the target to describe.
    fn search_options(
        &self,
        polyhedron: &Polyhedron,
        options: &Self::Options,
        relations: &[Relation],
    ) -> Result<SearchOptions> {
        Ok(self.describe(polyhedron, options)?.gated(relations))
    }

    /// Target under a pick point, as a partial option set.
    fn hit_option(&self, _polyhedron: &Polyhedron, _point: &Point3) -> Option<Self::Options> {
        None
    }

    /// Highlight tag of every face, by face index.
    fn select_state(
        &self,
        polyhedron: &Polyhedron,
        _options: &Self::Options,
    ) -> Vec<Option<SelectState>> {
        vec![None; polyhedron.num_faces()]
    }
}
