#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MeshError, Result};
use crate::mesh::{Medium, Node, Tetrahedron};
use crate::topology::build_neighbours;

/// A validated tetrahedral volume mesh: nodes, tetrahedra, named material
/// regions, and the face-adjacency table between tetrahedra.
///
/// The only way to obtain a `Mesh` is [`Mesh::build`] (used internally by
/// [`crate::parse`]) or [`crate::parse`] itself — both validate every
/// invariant listed below before a value is returned, so a live `Mesh` is
/// always internally consistent.
///
/// # Invariants
///
/// - Node tags are exactly `1..=nodes.len()` (contiguous, one-based).
/// - Every tetrahedron's four node tags lie within that range.
/// - Every tetrahedron's medium tag refers to a [`Medium`] present in
///   `media`.
/// - The neighbour table has exactly `4 * tetrahedra.len()` entries.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mesh {
    nodes: Vec<Node>,
    tetrahedra: Vec<Tetrahedron>,
    media: Vec<Medium>,
    neighbours: Vec<Option<usize>>,
}

impl Mesh {
    /// Assembles and validates a mesh from its raw parts, computing the
    /// neighbour table along the way.
    ///
    /// This is the single choke point every parsed or hand-built mesh passes
    /// through; no other way to construct a [`Mesh`] exists.
    pub fn build(nodes: Vec<Node>, tetrahedra: Vec<Tetrahedron>, media: Vec<Medium>) -> Result<Self> {
        for (i, node) in nodes.iter().enumerate() {
            if node.tag() != i as i64 + 1 {
                return Err(MeshError::MalformedMesh(format!(
                    "node tags are not contiguous starting at 1: expected tag {} at position {i}, found {}",
                    i + 1,
                    node.tag()
                )));
            }
        }

        let node_count = nodes.len() as i64;
        for tet in &tetrahedra {
            for tag in tet.nodes() {
                if tag < 1 || tag > node_count {
                    return Err(MeshError::DanglingReference(format!(
                        "tetrahedron references node tag {tag} outside range 1..={node_count}"
                    )));
                }
            }
            if !media.iter().any(|m| m.tag() == tet.medium_tag()) {
                return Err(MeshError::DanglingReference(format!(
                    "tetrahedron references medium tag {} absent from physical names",
                    tet.medium_tag()
                )));
            }
        }

        let neighbours = build_neighbours(&tetrahedra)?;

        Ok(Mesh {
            nodes,
            tetrahedra,
            media,
            neighbours,
        })
    }

    /// All nodes, ordered by ascending tag (tag `t` is at index `t - 1`).
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All tetrahedra, in file order.
    pub fn tetrahedra(&self) -> &[Tetrahedron] {
        &self.tetrahedra
    }

    /// All material regions referenced by at least one tetrahedron.
    pub fn media(&self) -> &[Medium] {
        &self.media
    }

    /// The element across `face` of `element`, or `None` if that face is on
    /// the mesh boundary.
    ///
    /// `element` is a 0-based index into [`Mesh::tetrahedra`]; `face` is
    /// 0-based in the omit-one-of-four order documented on
    /// [`Tetrahedron::faces`].
    ///
    /// Returns `None` (rather than panicking) for an out-of-range element or
    /// face, treating both identically to a boundary face.
    pub fn neighbour(&self, element: usize, face: usize) -> Option<usize> {
        if face >= 4 {
            return None;
        }
        self.neighbours.get(4 * element + face).copied().flatten()
    }
}
