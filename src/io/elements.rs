use std::io::Read;

use rustc_hash::FxHashSet;

use crate::error::{MeshError, Result};
use crate::io::reader::{parse_i64, token, SectionReader};

const TETRAHEDRON_TYPE: i64 = 4;

/// A parsed `$Elements` tetrahedron line, still carrying the owning volume
/// entity tag rather than a resolved medium tag — that resolution is the
/// assembler's job, since it requires the `$Entities` and `$PhysicalNames`
/// sections too.
pub(crate) struct RawElement {
    pub(crate) entity_tag: i64,
    pub(crate) node_tags: [i64; 4],
}

/// Consumes an `$Elements` section (the leading `$Elements` line is assumed
/// already read).
///
/// Blocks of dimension other than 3 are read and discarded; 3-D blocks must
/// declare element type 4 (tetrahedron) or the parse fails.
pub(crate) fn parse_elements<R: Read>(reader: &mut SectionReader<R>) -> Result<Vec<RawElement>> {
    let header = reader.require_tokens("Elements header")?;
    let num_blocks = parse_i64(token(&header, 0, "Elements header")?, "Elements header")?;
    let total = parse_i64(token(&header, 1, "Elements header")?, "Elements header")?;

    let mut seen_element_tags = FxHashSet::default();
    let mut elements = Vec::new();
    let mut read_count: i64 = 0;

    for _ in 0..num_blocks {
        let sub_header = reader.require_tokens("element block header")?;
        let dim = parse_i64(token(&sub_header, 0, "element block header")?, "element block header")?;
        let entity_tag = parse_i64(token(&sub_header, 1, "element block header")?, "element block header")?;
        let element_type = parse_i64(token(&sub_header, 2, "element block header")?, "element block header")?;
        let block_count = parse_i64(token(&sub_header, 3, "element block header")?, "element block header")?;

        if dim != 3 {
            for _ in 0..block_count {
                reader.require_line("non-volume element")?;
            }
            read_count += block_count;
            continue;
        }

        let context = format!("block for entity {entity_tag}");
        if element_type != TETRAHEDRON_TYPE {
            return Err(MeshError::UnsupportedElementType {
                context,
                found: element_type,
            });
        }

        for _ in 0..block_count {
            let tokens = reader.require_tokens(&context)?;
            let element_tag = parse_i64(token(&tokens, 0, &context)?, &context)?;
            if !seen_element_tags.insert(element_tag) {
                return Err(MeshError::MalformedMesh(format!(
                    "{context}: duplicate element tag {element_tag}"
                )));
            }
            let mut node_tags = [0i64; 4];
            for (i, slot) in node_tags.iter_mut().enumerate() {
                *slot = parse_i64(token(&tokens, i + 1, &context)?, &context)?;
            }
            elements.push(RawElement { entity_tag, node_tags });
        }
        read_count += block_count;
    }

    if read_count != total {
        return Err(MeshError::MalformedMesh(format!(
            "declared {total} elements but read {read_count}"
        )));
    }
    if elements.is_empty() {
        return Err(MeshError::MalformedMesh("no tetrahedra found".to_string()));
    }

    reader.expect_end("Elements")?;
    Ok(elements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_elements_single_tet_block() {
        let body = "1 1 1 1\n\
             3 12 4 1\n\
             1 130 142 223 353\n\
             $EndElements\n";
        let mut reader = SectionReader::new(body.as_bytes());
        let elements = parse_elements(&mut reader).unwrap();
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].entity_tag, 12);
        assert_eq!(elements[0].node_tags, [130, 142, 223, 353]);
    }

    #[test]
    fn test_parse_elements_discards_non_volume_blocks() {
        let body = "2 2 1 2\n\
             2 5 2 1\n\
             1 1 2 3\n\
             3 12 4 1\n\
             2 1 2 3 4\n\
             $EndElements\n";
        let mut reader = SectionReader::new(body.as_bytes());
        let elements = parse_elements(&mut reader).unwrap();
        assert_eq!(elements.len(), 1);
    }

    #[test]
    fn test_parse_elements_rejects_non_tet_volume_type() {
        let body = "1 1 1 1\n\
             3 12 5 1\n\
             1 1 2 3 4 5\n\
             $EndElements\n";
        let mut reader = SectionReader::new(body.as_bytes());
        let err = parse_elements(&mut reader).unwrap_err();
        assert!(matches!(
            err,
            MeshError::UnsupportedElementType { found: 5, .. }
        ));
    }

    #[test]
    fn test_parse_elements_rejects_empty_section() {
        let body = "0 0 0 0\n$EndElements\n";
        let mut reader = SectionReader::new(body.as_bytes());
        let err = parse_elements(&mut reader).unwrap_err();
        assert!(matches!(err, MeshError::MalformedMesh(_)));
    }

    #[test]
    fn test_parse_elements_rejects_duplicate_element_tag() {
        let body = "1 2 1 1\n\
             3 12 4 2\n\
             1 1 2 3 4\n\
             1 2 3 4 5\n\
             $EndElements\n";
        let mut reader = SectionReader::new(body.as_bytes());
        let err = parse_elements(&mut reader).unwrap_err();
        assert!(matches!(err, MeshError::MalformedMesh(_)));
    }
}
