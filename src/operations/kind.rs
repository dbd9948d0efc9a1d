use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{OperationError, PolyhedraError, Result};
use crate::math::Point3;
use crate::topology::Polyhedron;

use super::option_set::OperationOptions;
use super::options::{Relation, SearchOptions};
use super::{
    Augment, Contract, Diminish, Dual, Elongate, Expand, Gyrate, Gyroelongate, Operation,
    OperationResult, Rectify, SelectState, Sharpen, Shorten, Snub, Truncate, Turn, Twist,
};

/// The closed set of operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperationKind {
    Augment,
    Diminish,
    Gyrate,
    Elongate,
    Gyroelongate,
    Shorten,
    Turn,
    Truncate,
    Rectify,
    Sharpen,
    Dual,
    Expand,
    Contract,
    Snub,
    Twist,
}

/// Generic callback over the concrete operation behind a kind.
trait Visitor {
    type Output;

    fn visit<O: Operation>(self, operation: &O) -> Self::Output;
}

impl OperationKind {
    pub const ALL: [OperationKind; 15] = [
        Self::Augment,
        Self::Diminish,
        Self::Gyrate,
        Self::Elongate,
        Self::Gyroelongate,
        Self::Shorten,
        Self::Turn,
        Self::Truncate,
        Self::Rectify,
        Self::Sharpen,
        Self::Dual,
        Self::Expand,
        Self::Contract,
        Self::Snub,
        Self::Twist,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Augment => "augment",
            Self::Diminish => "diminish",
            Self::Gyrate => "gyrate",
            Self::Elongate => "elongate",
            Self::Gyroelongate => "gyroelongate",
            Self::Shorten => "shorten",
            Self::Turn => "turn",
            Self::Truncate => "truncate",
            Self::Rectify => "rectify",
            Self::Sharpen => "sharpen",
            Self::Dual => "dual",
            Self::Expand => "expand",
            Self::Contract => "contract",
            Self::Snub => "snub",
            Self::Twist => "twist",
        }
    }

    /// Whether a concrete target has to be picked before applying.
    #[must_use]
    pub fn needs_target(self) -> bool {
        matches!(
            self,
            Self::Augment | Self::Diminish | Self::Gyrate | Self::Sharpen | Self::Contract
        )
    }

    fn accept<V: Visitor>(self, visitor: V) -> V::Output {
        match self {
            Self::Augment => visitor.visit(&Augment),
            Self::Diminish => visitor.visit(&Diminish),
            Self::Gyrate => visitor.visit(&Gyrate),
            Self::Elongate => visitor.visit(&Elongate),
            Self::Gyroelongate => visitor.visit(&Gyroelongate),
            Self::Shorten => visitor.visit(&Shorten),
            Self::Turn => visitor.visit(&Turn),
            Self::Truncate => visitor.visit(&Truncate),
            Self::Rectify => visitor.visit(&Rectify),
            Self::Sharpen => visitor.visit(&Sharpen),
            Self::Dual => visitor.visit(&Dual),
            Self::Expand => visitor.visit(&Expand),
            Self::Contract => visitor.visit(&Contract),
            Self::Snub => visitor.visit(&Snub),
            Self::Twist => visitor.visit(&Twist),
        }
    }

    /// Empty option set of this operation.
    #[must_use]
    pub fn default_options(self) -> OperationOptions {
        struct Defaults;
        impl Visitor for Defaults {
            type Output = OperationOptions;
            fn visit<O: Operation>(self, _: &O) -> OperationOptions {
                O::Options::default().into()
            }
        }
        self.accept(Defaults)
    }

    /// Applies the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the options belong to another operation or are
    /// not legal for `polyhedron`.
    pub fn apply(self, polyhedron: &Polyhedron, options: &OperationOptions) -> Result<OperationResult> {
        struct Apply<'a>(&'a Polyhedron, &'a OperationOptions);
        impl Visitor for Apply<'_> {
            type Output = Result<OperationResult>;
            fn visit<O: Operation>(self, operation: &O) -> Self::Output {
                let options = O::Options::try_from(self.1.clone())?;
                operation.apply(self.0, &options)
            }
        }
        let result = self.accept(Apply(polyhedron, options))?;
        let end = result.end_state();
        debug!(
            operation = %self,
            vertices_before = polyhedron.num_vertices(),
            faces_before = polyhedron.num_faces(),
            vertices_after = end.num_vertices(),
            faces_after = end.num_faces(),
            "applied operation"
        );
        Ok(result)
    }

    /// Every legal concrete option set for `polyhedron`.
    #[must_use]
    pub fn all_options(self, polyhedron: &Polyhedron) -> Vec<OperationOptions> {
        struct AllOptions<'a>(&'a Polyhedron);
        impl Visitor for AllOptions<'_> {
            type Output = Vec<OperationOptions>;
            fn visit<O: Operation>(self, operation: &O) -> Self::Output {
                operation
                    .all_options(self.0)
                    .into_iter()
                    .map(Into::into)
                    .collect()
            }
        }
        self.accept(AllOptions(polyhedron))
    }

    /// Descriptive values of a concrete option set, ungated.
    ///
    /// # Errors
    ///
    /// Returns an error if the options lack the target to describe.
    pub fn describe(self, polyhedron: &Polyhedron, options: &OperationOptions) -> Result<SearchOptions> {
        struct Describe<'a>(&'a Polyhedron, &'a OperationOptions);
        impl Visitor for Describe<'_> {
            type Output = Result<SearchOptions>;
            fn visit<O: Operation>(self, operation: &O) -> Self::Output {
                let options = O::Options::try_from(self.1.clone())?;
                operation.describe(self.0, &options)
            }
        }
        self.accept(Describe(polyhedron, options))
    }

    /// Descriptive values of a concrete option set, gated by `relations`.
    ///
    /// # Errors
    ///
    /// Returns an error if the options lack the target to describe.
    pub fn search_options(
        self,
        polyhedron: &Polyhedron,
        options: &OperationOptions,
        relations: &[Relation],
    ) -> Result<SearchOptions> {
        struct Search<'a>(&'a Polyhedron, &'a OperationOptions, &'a [Relation]);
        impl Visitor for Search<'_> {
            type Output = Result<SearchOptions>;
            fn visit<O: Operation>(self, operation: &O) -> Self::Output {
                let options = O::Options::try_from(self.1.clone())?;
                operation.search_options(self.0, &options, self.2)
            }
        }
        self.accept(Search(polyhedron, options, relations))
    }

    /// Target under a pick point.
    #[must_use]
    pub fn hit_option(self, polyhedron: &Polyhedron, point: &Point3) -> Option<OperationOptions> {
        struct Hit<'a>(&'a Polyhedron, &'a Point3);
        impl Visitor for Hit<'_> {
            type Output = Option<OperationOptions>;
            fn visit<O: Operation>(self, operation: &O) -> Self::Output {
                operation.hit_option(self.0, self.1).map(Into::into)
            }
        }
        self.accept(Hit(polyhedron, point))
    }

    /// Highlight tags for every face.
    ///
    /// # Errors
    ///
    /// Returns an error if the options belong to another operation.
    pub fn select_state(
        self,
        polyhedron: &Polyhedron,
        options: &OperationOptions,
    ) -> Result<Vec<Option<SelectState>>> {
        struct Select<'a>(&'a Polyhedron, &'a OperationOptions);
        impl Visitor for Select<'_> {
            type Output = Result<Vec<Option<SelectState>>>;
            fn visit<O: Operation>(self, operation: &O) -> Self::Output {
                let options = O::Options::try_from(self.1.clone())?;
                Ok(operation.select_state(self.0, &options))
            }
        }
        self.accept(Select(polyhedron, options))
    }

    /// Completes a partial option set to a legal one.
    ///
    /// Targeted operations take the first legal option agreeing with
    /// `partial` once the target is set; the others resolve only when
    /// exactly one legal option agrees.
    #[must_use]
    pub fn resolve(self, polyhedron: &Polyhedron, partial: &OperationOptions) -> Option<OperationOptions> {
        let mut candidates = self
            .all_options(polyhedron)
            .into_iter()
            .filter(|candidate| partial.is_compatible(candidate));
        if self.needs_target() {
            if !partial.has_target() {
                return None;
            }
            return candidates.next();
        }
        let first = candidates.next()?;
        candidates.next().is_none().then_some(first)
    }

    /// First legal option agreeing with `partial`, if any.
    #[must_use]
    pub fn first_compatible(self, polyhedron: &Polyhedron, partial: &OperationOptions) -> Option<OperationOptions> {
        self.all_options(polyhedron)
            .into_iter()
            .find(|candidate| partial.is_compatible(candidate))
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OperationKind {
    type Err = PolyhedraError;

    fn from_str(s: &str) -> Result<Self> {
        if s == "cumulate" {
            return Ok(Self::Sharpen);
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| OperationError::UnknownOperation(s.to_string()).into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::PolyhedraError;

    #[test]
    fn names_round_trip() {
        for kind in OperationKind::ALL {
            assert_eq!(kind.name().parse::<OperationKind>().unwrap(), kind);
        }
        assert_eq!("cumulate".parse::<OperationKind>().unwrap(), OperationKind::Sharpen);
    }

    #[test]
    fn unknown_name_is_reported() {
        let err = "bevel".parse::<OperationKind>().unwrap_err();
        assert!(matches!(
            err,
            PolyhedraError::Operation(OperationError::UnknownOperation(ref name)) if name == "bevel"
        ));
        assert!(err.to_string().contains("bevel"));
    }

    #[test]
    fn defaults_match_operation() {
        assert_eq!(OperationKind::Truncate.default_options(), OperationOptions::None);
        assert!(!OperationKind::Diminish.default_options().has_target());
    }

    #[test]
    fn mismatched_options_are_rejected() {
        let tet = crate::topology::fixtures::tetrahedron();
        assert!(OperationKind::Truncate
            .apply(&tet, &OperationKind::Diminish.default_options())
            .is_err());
    }
}
