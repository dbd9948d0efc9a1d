pub mod catalog;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod session;
pub mod topology;

pub use catalog::Catalog;
pub use error::{PolyhedraError, Result};
pub use operations::{Operation, OperationKind, OperationOptions, OperationResult};
pub use session::Session;
pub use topology::{Cap, Polyhedron};
