//! Named solids: lookup by name, identification of arbitrary meshes and the
//! relations between solids that each operation induces.
//!
//! The builtin catalog holds the Platonic, Archimedean and Johnson solids
//! together with the prisms and antiprisms up to ten sides. A handful are
//! written down as coordinates; everything else is derived from those by
//! running operations, so the catalog always agrees with what the
//! operations produce.

mod derived;
mod signature;
mod solids;

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use tracing::{debug, warn};

use crate::error::{CatalogError, Result};
use crate::math::Point3;
use crate::operations::{OperationKind, Relation};
use crate::topology::{Polyhedron, SolidData};

pub use signature::Signature;

/// A set of named polyhedra, indexed for identification.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    solids: BTreeMap<String, Polyhedron>,
    names: HashMap<Signature, String>,
}

impl Catalog {
    /// An empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog of regular-faced convex solids, built on first use.
    pub fn builtin() -> &'static Catalog {
        static BUILTIN: OnceLock<Catalog> = OnceLock::new();
        BUILTIN.get_or_init(Self::build)
    }

    fn build() -> Catalog {
        let mut catalog = Catalog::new();
        for (name, points) in base_solids() {
            match solids::hull_solid(points) {
                Ok(solid) => catalog.insert(name, solid),
                Err(err) => warn!(%name, %err, "could not build base solid"),
            }
        }
        for &(name, source, step) in derived::RECIPES {
            let Some(from) = catalog.solids.get(source) else {
                warn!(%name, %source, "source solid missing, skipping");
                continue;
            };
            match step.run(from) {
                Ok(solid) => catalog.insert(name, solid),
                Err(err) => warn!(%name, %source, %err, "could not derive solid"),
            }
        }
        debug!(solids = catalog.len(), "built solid catalog");
        catalog
    }

    /// Parses a catalog from a JSON object mapping names to
    /// `{ "vertices": [[x, y, z], ..], "faces": [[i, j, k, ..], ..] }`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] on malformed JSON and the mesh
    /// validation error of the first invalid solid.
    pub fn from_json(json: &str) -> Result<Catalog> {
        let entries: BTreeMap<String, SolidData> =
            serde_json::from_str(json).map_err(|err| CatalogError::Parse(err.to_string()))?;
        let mut catalog = Catalog::new();
        for (name, data) in entries {
            let solid = Polyhedron::try_from(data)?;
            catalog.insert(name, solid);
        }
        debug!(solids = catalog.len(), "loaded solid catalog");
        Ok(catalog)
    }

    /// Serializes the catalog in the format [`Catalog::from_json`] reads.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        let entries: BTreeMap<&str, SolidData> = self
            .solids
            .iter()
            .map(|(name, solid)| (name.as_str(), solid.to_data()))
            .collect();
        Ok(serde_json::to_string(&entries).map_err(|err| CatalogError::Parse(err.to_string()))?)
    }

    /// Adds or replaces a named solid.
    pub fn insert(&mut self, name: impl Into<String>, solid: Polyhedron) {
        let name = name.into();
        let signature = Signature::of(&solid);
        if let Some(existing) = self.names.get(&signature).filter(|existing| **existing != name) {
            warn!(%name, %existing, "solid has the same shape as an existing entry");
        }
        self.names.entry(signature).or_insert_with(|| name.clone());
        self.solids.insert(name, solid);
    }

    /// The solid called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownSolid`] if there is none.
    pub fn get(&self, name: &str) -> Result<&Polyhedron> {
        Ok(self
            .solids
            .get(name)
            .ok_or_else(|| CatalogError::UnknownSolid(name.to_string()))?)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.solids.contains_key(name)
    }

    /// Names in alphabetical order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.solids.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.solids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
    }

    /// Name of the catalog solid with the same face structure as `solid`,
    /// whatever its labelling, placement or scale.
    #[must_use]
    pub fn identify(&self, solid: &Polyhedron) -> Option<&str> {
        self.names.get(&Signature::of(solid)).map(String::as_str)
    }

    /// Solids reachable from `name` through one application of `kind`, each
    /// with the ungated option values that lead there.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownSolid`] for an unknown name.
    pub fn relations(&self, name: &str, kind: OperationKind) -> Result<Vec<Relation>> {
        let solid = self.get(name)?;
        let mut relations: Vec<Relation> = Vec::new();
        for options in kind.all_options(solid) {
            let result = match kind.apply(solid, &options) {
                Ok(result) => result.into_end_state(),
                Err(err) => {
                    warn!(%name, %kind, %err, "listed option failed to apply");
                    continue;
                }
            };
            let Some(result) = self.identify(&result) else {
                warn!(%name, %kind, ?options, "operation leads outside the catalog");
                continue;
            };
            let described = match kind.describe(solid, &options) {
                Ok(described) => described,
                Err(err) => {
                    warn!(%name, %kind, %err, "could not describe option");
                    continue;
                }
            };
            let relation = Relation {
                result: result.to_string(),
                options: described,
            };
            if !relations.contains(&relation) {
                relations.push(relation);
            }
        }
        Ok(relations)
    }
}

/// Coordinates of the solids no recipe derives.
fn base_solids() -> Vec<(String, Vec<Point3>)> {
    let mut base: Vec<(String, Vec<Point3>)> = vec![
        ("tetrahedron".into(), solids::tetrahedron()),
        ("cube".into(), solids::cube()),
        ("octahedron".into(), solids::octahedron()),
        ("dodecahedron".into(), solids::dodecahedron()),
        ("icosahedron".into(), solids::icosahedron()),
        ("truncated-cuboctahedron".into(), solids::truncated_cuboctahedron()),
        ("truncated-icosidodecahedron".into(), solids::truncated_icosidodecahedron()),
        ("pentagonal-rotunda".into(), solids::pentagonal_rotunda()),
    ];
    for n in (3..=10).filter(|&n| n != 4) {
        if let Some(prefix) = solids::polygon_prefix(n) {
            base.push((format!("{prefix}-prism"), solids::prism(n)));
        }
    }
    for n in 4..=10 {
        if let Some(prefix) = solids::polygon_prefix(n) {
            base.push((format!("{prefix}-antiprism"), solids::antiprism(n)));
        }
    }
    for n in [4, 5] {
        if let Some(prefix) = solids::polygon_prefix(n) {
            base.push((format!("{prefix}-pyramid"), solids::pyramid(n)));
        }
    }
    for n in [3, 4, 5] {
        if let Some(prefix) = solids::polygon_prefix(n) {
            base.push((format!("{prefix}-cupola"), solids::cupola(n)));
        }
    }
    base
}
