//! The collaborator-facing state machine around the current solid.
//!
//! A [`Session`] walks `Idle → OperationChosen → ParamsResolved → Idle`
//! (or back to `OperationChosen` while the new solid still takes the
//! operation). Choosing another solid always resets to `Idle`.

use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{OperationError, Result};
use crate::math::Point3;
use crate::operations::{
    OperationKind, OperationOptions, OperationResult, Relation, SearchOptions, SelectState,
};
use crate::topology::Polyhedron;

/// Where the session is in choosing and applying an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    /// An operation is chosen and `options` holds what is known so far.
    OperationChosen {
        kind: OperationKind,
        options: OperationOptions,
    },
    /// `options` is a complete legal option set being applied.
    ParamsResolved {
        kind: OperationKind,
        options: OperationOptions,
    },
}

impl SessionState {
    /// The chosen operation, if any.
    #[must_use]
    pub fn operation(&self) -> Option<OperationKind> {
        match self {
            Self::Idle => None,
            Self::OperationChosen { kind, .. } | Self::ParamsResolved { kind, .. } => Some(*kind),
        }
    }

    /// Options collected for the chosen operation, if any.
    #[must_use]
    pub fn options(&self) -> Option<&OperationOptions> {
        match self {
            Self::Idle => None,
            Self::OperationChosen { options, .. } | Self::ParamsResolved { options, .. } => Some(options),
        }
    }
}

/// The current solid and the operation being set up on it.
#[derive(Debug, Clone)]
pub struct Session<'a> {
    catalog: &'a Catalog,
    name: Option<String>,
    solid: Polyhedron,
    state: SessionState,
}

impl<'a> Session<'a> {
    /// Starts on the catalog solid `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownSolid`](crate::error::CatalogError)
    /// if the catalog has no such solid.
    pub fn new(catalog: &'a Catalog, name: &str) -> Result<Self> {
        let solid = catalog.get(name)?.clone();
        debug!(%name, "session started");
        Ok(Self {
            catalog,
            name: Some(name.to_string()),
            solid,
            state: SessionState::Idle,
        })
    }

    /// Starts on an arbitrary solid, named if the catalog recognizes it.
    #[must_use]
    pub fn with_solid(catalog: &'a Catalog, solid: Polyhedron) -> Self {
        let name = catalog.identify(&solid).map(str::to_string);
        debug!(name = ?name, "session started on a custom solid");
        Self {
            catalog,
            name,
            solid,
            state: SessionState::Idle,
        }
    }

    #[must_use]
    pub fn solid(&self) -> &Polyhedron {
        &self.solid
    }

    /// Catalog name of the current solid, if it has one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn operation(&self) -> Option<OperationKind> {
        self.state.operation()
    }

    /// Switches to the catalog solid `name`, dropping any chosen operation
    /// and its options.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownSolid`](crate::error::CatalogError)
    /// and leaves the session as it was if there is no such solid.
    pub fn select_solid(&mut self, name: &str) -> Result<()> {
        self.solid = self.catalog.get(name)?.clone();
        self.name = Some(name.to_string());
        self.state = SessionState::Idle;
        debug!(%name, "solid selected");
        Ok(())
    }

    /// Operations with at least one legal option on the current solid.
    #[must_use]
    pub fn available_operations(&self) -> Vec<OperationKind> {
        OperationKind::ALL
            .into_iter()
            .filter(|kind| !kind.all_options(&self.solid).is_empty())
            .collect()
    }

    /// Chooses an operation. One that needs no target and has exactly one
    /// legal option is applied straight away.
    ///
    /// # Errors
    ///
    /// Returns the apply error, with the operation left chosen, if the
    /// immediate apply fails.
    pub fn select_operation(&mut self, kind: OperationKind) -> Result<Option<OperationResult>> {
        self.state = SessionState::OperationChosen {
            kind,
            options: kind.default_options(),
        };
        debug!(operation = %kind, solid = ?self.name, "operation chosen");
        if kind.needs_target() {
            return Ok(None);
        }
        self.try_apply()
    }

    /// Sets a named option of the chosen operation from its keyword value
    /// and applies once the options pin down one legal choice.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the state unchanged, when no operation is
    /// chosen, the option does not belong to it or the value does not
    /// parse, or when the apply fails.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<Option<OperationResult>> {
        let SessionState::OperationChosen { kind, options } = &self.state else {
            return Err(OperationError::InvalidInput("no operation chosen".into()).into());
        };
        let kind = *kind;
        let mut options = options.clone();
        options.set(name, value)?;
        self.state = SessionState::OperationChosen { kind, options };
        self.try_apply()
    }

    /// Resolves a pick point to a target of the chosen operation and
    /// applies. Returns `Ok(None)` when the point hits nothing the
    /// operation can act on.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the state unchanged, when no operation is
    /// chosen, the hit target has no option agreeing with the options set
    /// so far, or the apply fails.
    pub fn hit(&mut self, point: &Point3) -> Result<Option<OperationResult>> {
        let SessionState::OperationChosen { kind, options } = &self.state else {
            return Err(OperationError::InvalidInput("no operation chosen".into()).into());
        };
        let kind = *kind;
        let Some(hit) = kind.hit_option(&self.solid, point) else {
            return Ok(None);
        };
        let options = options.merged(&hit);
        if kind.resolve(&self.solid, &options).is_none() && kind.needs_target() {
            return Err(OperationError::NotApplicable(format!(
                "the picked target takes no {kind} with the chosen options"
            ))
            .into());
        }
        self.state = SessionState::OperationChosen { kind, options };
        self.try_apply()
    }

    /// Every legal option set of the chosen operation on the current solid.
    #[must_use]
    pub fn options(&self) -> Vec<OperationOptions> {
        self.operation()
            .map(|kind| kind.all_options(&self.solid))
            .unwrap_or_default()
    }

    /// Catalog relations of the current solid through the chosen operation;
    /// empty for solids outside the catalog.
    #[must_use]
    pub fn relations(&self) -> Vec<Relation> {
        match (self.operation(), self.name.as_deref()) {
            (Some(kind), Some(name)) => self.catalog.relations(name, kind).unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    /// Option values to show for a concrete target of the chosen operation.
    ///
    /// # Errors
    ///
    /// Returns an error when no operation is chosen or `options` lacks the
    /// target to describe.
    pub fn search_options(&self, options: &OperationOptions) -> Result<SearchOptions> {
        let kind = self
            .operation()
            .ok_or_else(|| OperationError::InvalidInput("no operation chosen".into()))?;
        kind.search_options(&self.solid, options, &self.relations())
    }

    /// Highlight tags for every face; all `None` while idle.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored options do not fit the operation.
    pub fn select_state(&self) -> Result<Vec<Option<SelectState>>> {
        match &self.state {
            SessionState::Idle => Ok(vec![None; self.solid.num_faces()]),
            SessionState::OperationChosen { kind, options }
            | SessionState::ParamsResolved { kind, options } => kind.select_state(&self.solid, options),
        }
    }

    fn try_apply(&mut self) -> Result<Option<OperationResult>> {
        let SessionState::OperationChosen { kind, options } = &self.state else {
            return Ok(None);
        };
        let (kind, partial) = (*kind, options.clone());
        let Some(resolved) = kind.resolve(&self.solid, &partial) else {
            return Ok(None);
        };
        let previous = std::mem::replace(
            &mut self.state,
            SessionState::ParamsResolved {
                kind,
                options: resolved.clone(),
            },
        );
        let result = match kind.apply(&self.solid, &resolved) {
            Ok(result) => result,
            Err(err) => {
                self.state = previous;
                return Err(err);
            }
        };
        self.solid = result.end_state();
        self.name = self.catalog.identify(&self.solid).map(str::to_string);
        self.state = if kind.all_options(&self.solid).is_empty() {
            SessionState::Idle
        } else {
            SessionState::OperationChosen {
                kind,
                options: partial.without_target(),
            }
        };
        debug!(
            operation = %kind,
            solid = ?self.name,
            vertices = self.solid.num_vertices(),
            faces = self.solid.num_faces(),
            "operation applied"
        );
        Ok(Some(result))
    }
}
