use std::io::Read;

use rustc_hash::FxHashSet;

use crate::error::{MeshError, Result};
use crate::io::reader::{parse_f64, parse_i64, token, SectionReader};
use crate::mesh::Node;

/// Consumes a `$Nodes` section (the leading `$Nodes` line is assumed already
/// read), returning nodes sorted by ascending tag.
pub(crate) fn parse_nodes<R: Read>(reader: &mut SectionReader<R>) -> Result<Vec<Node>> {
    let header = reader.require_tokens("Nodes header")?;
    let num_blocks = parse_i64(token(&header, 0, "Nodes header")?, "Nodes header")?;
    let total = parse_i64(token(&header, 1, "Nodes header")?, "Nodes header")?;
    let max_tag = parse_i64(token(&header, 3, "Nodes header")?, "Nodes header")?;

    if max_tag > i32::MAX as i64 {
        return Err(MeshError::MalformedMesh(format!(
            "max node tag {max_tag} exceeds the supported range"
        )));
    }

    let mut seen_tags = FxHashSet::default();
    let mut nodes = Vec::with_capacity(total.max(0) as usize);

    for _ in 0..num_blocks {
        let sub_header = reader.require_tokens("node block header")?;
        let dim = parse_i64(token(&sub_header, 0, "node block header")?, "node block header")?;
        if !(0..=3).contains(&dim) {
            return Err(MeshError::MalformedMesh(format!(
                "node block declares dimension {dim} (expected 0..=3)"
            )));
        }
        let block_count = parse_i64(token(&sub_header, 3, "node block header")?, "node block header")?;

        let mut tags = Vec::with_capacity(block_count.max(0) as usize);
        for _ in 0..block_count {
            let line = reader.require_line("node tag")?;
            let tag = parse_i64(line.trim(), "node tag")?;
            if !seen_tags.insert(tag) {
                return Err(MeshError::MalformedMesh(format!("duplicate node tag {tag}")));
            }
            tags.push(tag);
        }

        for tag in tags {
            let coords = reader.require_tokens("node coordinates")?;
            let x = parse_f64(token(&coords, 0, "node coordinates")?, "node coordinates")?;
            let y = parse_f64(token(&coords, 1, "node coordinates")?, "node coordinates")?;
            let z = parse_f64(token(&coords, 2, "node coordinates")?, "node coordinates")?;
            nodes.push(Node::new(tag, x, y, z));
        }
    }

    if nodes.len() as i64 != total {
        return Err(MeshError::MalformedMesh(format!(
            "declared {total} nodes but read {}",
            nodes.len()
        )));
    }

    reader.expect_end("Nodes")?;
    nodes.sort_unstable_by_key(Node::tag);
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nodes_single_block() {
        let body = "1 2 1 2\n\
             3 1 0 2\n\
             1\n\
             2\n\
             0.0 0.0 0.0\n\
             1.0 0.0 0.0\n\
             $EndNodes\n";
        let mut reader = SectionReader::new(body.as_bytes());
        let nodes = parse_nodes(&mut reader).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].tag(), 1);
        assert_eq!(nodes[1].tag(), 2);
    }

    #[test]
    fn test_parse_nodes_sorts_across_blocks() {
        let body = "2 2 1 2\n\
             3 1 0 1\n\
             2\n\
             1.0 0.0 0.0\n\
             3 2 0 1\n\
             1\n\
             0.0 0.0 0.0\n\
             $EndNodes\n";
        let mut reader = SectionReader::new(body.as_bytes());
        let nodes = parse_nodes(&mut reader).unwrap();
        assert_eq!(nodes.iter().map(Node::tag).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_parse_nodes_rejects_duplicate_tag() {
        let body = "1 2 1 1\n\
             3 1 0 2\n\
             1\n\
             1\n\
             0.0 0.0 0.0\n\
             1.0 0.0 0.0\n\
             $EndNodes\n";
        let mut reader = SectionReader::new(body.as_bytes());
        let err = parse_nodes(&mut reader).unwrap_err();
        assert!(matches!(err, MeshError::MalformedMesh(_)));
    }

    #[test]
    fn test_parse_nodes_rejects_missing_end_marker() {
        let body = "1 1 1 1\n3 1 0 1\n1\n0.0 0.0 0.0\n";
        let mut reader = SectionReader::new(body.as_bytes());
        let err = parse_nodes(&mut reader).unwrap_err();
        assert!(matches!(err, MeshError::Io(_)));
    }

    #[test]
    fn test_parse_nodes_rejects_count_mismatch() {
        let body = "1 3 1 2\n\
             3 1 0 2\n\
             1\n\
             2\n\
             0.0 0.0 0.0\n\
             1.0 0.0 0.0\n\
             $EndNodes\n";
        let mut reader = SectionReader::new(body.as_bytes());
        let err = parse_nodes(&mut reader).unwrap_err();
        assert!(matches!(err, MeshError::MalformedMesh(_)));
    }
}
