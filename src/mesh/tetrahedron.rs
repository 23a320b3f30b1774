#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MeshError, Result};

/// A triangular face, identified by the canonical (sorted) triple of its
/// three node tags.
///
/// Faces are derived, not stored: they live on the stack for the duration
/// of a comparison and are never kept around as first-class mesh entities.
pub type Face = (i64, i64, i64);

/// A four-node tetrahedral volume element.
///
/// Identity is positional — the element's 0-based index into
/// [`crate::mesh::Mesh::tetrahedra`] — not carried on the value itself. The
/// four node tags are canonicalised to ascending order at construction, so
/// two tetrahedra with the same node set always compare equal regardless of
/// the order the file listed their nodes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tetrahedron {
    medium_tag: i64,
    nodes: [i64; 4],
}

impl Tetrahedron {
    /// Builds a tetrahedron from four node tags and a medium tag.
    ///
    /// Fails with [`MeshError::InvalidElement`] if any tag is negative or if
    /// any two tags are equal. The four tags are stored sorted ascending;
    /// original input ordering is not preserved.
    pub fn new(medium_tag: i64, mut nodes: [i64; 4]) -> Result<Self> {
        for &tag in &nodes {
            if tag < 0 {
                return Err(MeshError::InvalidElement(format!(
                    "negative node tag {tag}"
                )));
            }
        }
        nodes.sort_unstable();
        for i in 0..3 {
            if nodes[i] == nodes[i + 1] {
                return Err(MeshError::InvalidElement(format!(
                    "duplicate node tag {} in tetrahedron",
                    nodes[i]
                )));
            }
        }
        Ok(Tetrahedron { medium_tag, nodes })
    }

    /// The medium (physical group) tag this element belongs to.
    pub fn medium_tag(&self) -> i64 {
        self.medium_tag
    }

    /// The four node tags, ascending.
    pub fn nodes(&self) -> [i64; 4] {
        self.nodes
    }

    /// The largest of the four node tags — used by the adjacency index to
    /// size its lookup table.
    pub fn max_node(&self) -> i64 {
        self.nodes[3]
    }

    /// The four faces obtained by omitting each sorted node position in
    /// turn, in deterministic omit-0, omit-1, omit-2, omit-3 order.
    ///
    /// Because `nodes` is sorted, each face triple is itself sorted and
    /// therefore canonical: two tetrahedra share a face iff the
    /// corresponding triples compare equal.
    pub fn faces(&self) -> [Face; 4] {
        let n = self.nodes;
        [
            (n[1], n[2], n[3]),
            (n[0], n[2], n[3]),
            (n[0], n[1], n[3]),
            (n[0], n[1], n[2]),
        ]
    }
}
