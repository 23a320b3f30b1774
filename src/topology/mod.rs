//! Topology: computing which tetrahedra touch which nodes, and from that,
//! which tetrahedra are face-neighbours of each other.

mod adjacency_index;
mod neighbours;

pub use adjacency_index::AdjacencyIndex;
pub use neighbours::build_neighbours;
