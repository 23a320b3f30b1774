//! Reads a version-4.1 ASCII tetrahedral-mesh exchange file and builds an
//! in-memory [`Mesh`] augmented with element-to-element face adjacency.
//!
//! The two pieces that matter are [`io::parse`], a strict section-oriented
//! reader that cross-links geometric entities, physical groups, nodes and
//! tetrahedra into a validated mesh, and [`topology::build_neighbours`],
//! which computes each element's four face-neighbours in near-linear time
//! via a CSR node-incidence index rather than the obvious O(N²) pairwise
//! face comparison.
//!
//! ```no_run
//! let file = std::fs::File::open("mesh.msh")?;
//! let mesh = tetmesh::parse(file)?;
//! for element in 0..mesh.tetrahedra().len() {
//!     for face in 0..4 {
//!         let _ = mesh.neighbour(element, face);
//!     }
//! }
//! # Ok::<(), tetmesh::MeshError>(())
//! ```

pub mod error;
mod io;
pub mod mesh;
pub mod topology;

pub use error::MeshError;
pub use io::parse;
pub use mesh::{Face, Medium, Mesh, Node, Tetrahedron};

pub mod prelude {
    //! Re-exports of the types most callers need.
    pub use crate::error::MeshError;
    pub use crate::mesh::{Face, Medium, Mesh, Node, Tetrahedron};
    pub use crate::parse;
}
