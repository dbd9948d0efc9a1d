use thiserror::Error;

/// Top-level error type for the polyhedra engine.
#[derive(Debug, Error)]
pub enum PolyhedraError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors raised while validating mesh input.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("face {face} references missing vertex {vertex}")]
    MissingVertex { face: usize, vertex: usize },

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Errors related to solid-transforming operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("missing required option `{0}`")]
    MissingOption(&'static str),

    #[error("invalid value `{value}` for option `{option}`")]
    InvalidOptionValue { option: String, value: String },

    #[error("unknown operation `{0}`")]
    UnknownOperation(String),

    #[error("operation not applicable: {0}")]
    NotApplicable(String),
}

/// Errors related to the named-solid catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown solid `{0}`")]
    UnknownSolid(String),

    #[error("could not parse catalog: {0}")]
    Parse(String),
}

/// Convenience type alias for results using [`PolyhedraError`].
pub type Result<T> = std::result::Result<T, PolyhedraError>;
