use crate::error::{MeshError, Result};
use crate::mesh::Tetrahedron;

/// CSR ("compressed sparse row") lookup from node tag to the elements
/// incident to it.
///
/// Built in two linear passes over the element list: the first counts how
/// many tetrahedra touch each node, a prefix sum over those counts becomes
/// the offsets table, and the second pass writes element indices into their
/// slot while advancing a per-node cursor. No node's bucket is ever resized
/// during the second pass, which is what keeps construction `O(T +
/// incidences)` rather than `O(T^2)`.
pub struct AdjacencyIndex {
    // offsets[tag - 1] ..= offsets[tag] is the slice of `elements` incident
    // to node `tag`. Length M + 1.
    offsets: Vec<u32>,
    elements: Vec<u32>,
}

impl AdjacencyIndex {
    /// Builds the index over `tets`, sizing the table for node tags in
    /// `1..=max_node_tag`.
    ///
    /// Fails with [`MeshError::MalformedMesh`] if any tetrahedron references
    /// a node tag of zero or less — the dense table is indexed by `tag - 1`
    /// and cannot represent non-positive tags.
    pub fn build(tets: &[Tetrahedron], max_node_tag: i64) -> Result<Self> {
        if max_node_tag < 0 {
            return Err(MeshError::MalformedMesh(
                "adjacency index: negative max node tag".to_string(),
            ));
        }
        let m = max_node_tag as usize;

        // Pass 1: count incidences per node.
        let mut counts = vec![0u32; m + 1];
        for tet in tets {
            for tag in tet.nodes() {
                if tag <= 0 {
                    return Err(MeshError::MalformedMesh(format!(
                        "adjacency index: non-positive node tag {tag}"
                    )));
                }
                counts[tag as usize - 1] += 1;
            }
        }

        // Prefix sum: counts -> offsets (offsets[i] is the start of node i+1's slice).
        let mut offsets = vec![0u32; m + 1];
        let mut running = 0u32;
        for i in 0..m {
            offsets[i] = running;
            running += counts[i];
        }
        offsets[m] = running;

        // Pass 2: scatter element indices into their node's bucket, advancing
        // a cursor per node that starts at offsets[i] and restores canonical
        // offsets once every element has been placed.
        let mut cursor = offsets.clone();
        let mut elements = vec![0u32; running as usize];
        for (e, tet) in tets.iter().enumerate() {
            for tag in tet.nodes() {
                let slot = tag as usize - 1;
                elements[cursor[slot] as usize] = e as u32;
                cursor[slot] += 1;
            }
        }

        Ok(AdjacencyIndex { offsets, elements })
    }

    /// Returns the element indices incident to `node_tag`, in unspecified
    /// order.
    pub fn incident_elements(&self, node_tag: i64) -> &[u32] {
        if node_tag <= 0 || node_tag as usize > self.offsets.len() - 1 {
            return &[];
        }
        let i = node_tag as usize - 1;
        let start = self.offsets[i] as usize;
        let end = self.offsets[i + 1] as usize;
        &self.elements[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Tetrahedron;

    #[test]
    fn test_adjacency_index_incidences() {
        let tets = vec![
            Tetrahedron::new(1, [1, 2, 3, 4]).unwrap(),
            Tetrahedron::new(1, [2, 3, 4, 5]).unwrap(),
        ];
        let index = AdjacencyIndex::build(&tets, 5).unwrap();
        let mut incident_to_2: Vec<_> = index.incident_elements(2).to_vec();
        incident_to_2.sort_unstable();
        assert_eq!(incident_to_2, vec![0, 1]);
        assert_eq!(index.incident_elements(1), &[0]);
        assert_eq!(index.incident_elements(5), &[1]);
    }

    #[test]
    fn test_adjacency_index_rejects_nonpositive_tag() {
        // Constructed by hand since Tetrahedron::new rejects negative tags
        // but not zero... actually zero is non-negative, so it is allowed
        // through the value type and must be caught here instead.
        let tet = Tetrahedron::new(1, [0, 1, 2, 3]).unwrap();
        let err = AdjacencyIndex::build(&[tet], 3).unwrap_err();
        assert!(matches!(err, MeshError::MalformedMesh(_)));
    }

    #[test]
    fn test_adjacency_index_empty_query_out_of_range() {
        let tets = vec![Tetrahedron::new(1, [1, 2, 3, 4]).unwrap()];
        let index = AdjacencyIndex::build(&tets, 4).unwrap();
        assert!(index.incident_elements(99).is_empty());
    }
}
