use crate::error::{MeshError, Result};
use crate::mesh::Tetrahedron;
use crate::topology::AdjacencyIndex;

/// Computes, for every `(element, face-slot)` pair, the index of the
/// tetrahedron across that face, or `None` if the face lies on the mesh
/// boundary.
///
/// The table is flat, `4 * tets.len()` long, slot `4*e + f` holding the
/// neighbour of element `e` across face `f`.
///
/// # Algorithm
///
/// For each element and each of its four faces not yet matched from the
/// other side, one node of the face is picked as an anchor and only the
/// (typically small) set of elements incident to that node — via
/// [`AdjacencyIndex`] — is scanned for a matching face. This avoids the
/// `O(T^2)` pairwise face comparison; total work is `O(sum of incidences)`,
/// which is `O(T)` for meshes with bounded node valence.
///
/// Fails with [`MeshError::MalformedMesh`] if a face turns out to be shared
/// by more than two tetrahedra — a conforming manifold mesh never exhibits
/// this, so detecting it here converts a silent "first match wins" hazard
/// into a surfaced error.
pub fn build_neighbours(tets: &[Tetrahedron]) -> Result<Vec<Option<usize>>> {
    let mut neighbours = vec![None; 4 * tets.len()];
    if tets.is_empty() {
        return Ok(neighbours);
    }

    let max_node_tag = tets.iter().map(Tetrahedron::max_node).max().unwrap();
    let index = AdjacencyIndex::build(tets, max_node_tag)?;

    for (e, tet) in tets.iter().enumerate() {
        for (f, face) in tet.faces().iter().enumerate() {
            if neighbours[4 * e + f].is_some() {
                continue;
            }
            let anchor = face.0;

            let mut found: Option<(usize, usize)> = None;
            let mut match_count = 0usize;
            for &candidate in index.incident_elements(anchor) {
                let j = candidate as usize;
                if j == e {
                    continue;
                }
                if let Some(fp) = tets[j].faces().iter().position(|cf| cf == face) {
                    match_count += 1;
                    if found.is_none() {
                        found = Some((j, fp));
                    }
                }
            }

            if match_count > 1 {
                return Err(MeshError::MalformedMesh(format!(
                    "face {face:?} is shared by more than two tetrahedra (element {e})"
                )));
            }

            if let Some((j, fp)) = found {
                neighbours[4 * e + f] = Some(j);
                neighbours[4 * j + fp] = Some(e);
            }
        }
    }

    Ok(neighbours)
}
