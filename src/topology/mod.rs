mod builder;
mod cap;
mod edge;
mod face;
mod polyhedron;
mod vertex;

pub use builder::{FaceDraft, SolidBuilder};
pub use cap::{Cap, CapKind};
pub use edge::Edge;
pub use face::Face;
pub use polyhedron::{Polyhedron, SolidData};
pub use vertex::{Vertex, VertexList, VertexRing};

#[cfg(test)]
pub(crate) use polyhedron::tests as fixtures;
