//! The mesh data model: nodes, tetrahedral elements, named material
//! regions, and the assembled, invariant-checked [`Mesh`] that ties them
//! together.

mod medium;
mod mesh;
mod node;
mod tetrahedron;

pub use medium::Medium;
pub use mesh::Mesh;
pub use node::Node;
pub use tetrahedron::{Face, Tetrahedron};
