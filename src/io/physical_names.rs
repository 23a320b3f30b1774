use std::io::Read;

use rustc_hash::FxHashSet;

use crate::error::{MeshError, Result};
use crate::io::reader::{parse_i64, token, SectionReader};
use crate::mesh::Medium;

/// Consumes a `$PhysicalNames` section (the leading `$PhysicalNames` line is
/// assumed already read).
///
/// Only dimension-3 entries become [`Medium`] records; groups of lower
/// dimension are parsed for validation but discarded.
pub(crate) fn parse_physical_names<R: Read>(reader: &mut SectionReader<R>) -> Result<Vec<Medium>> {
    let header = reader.require_tokens("PhysicalNames header")?;
    let total = parse_i64(token(&header, 0, "PhysicalNames header")?, "PhysicalNames header")?;
    if total < 0 {
        return Err(MeshError::MalformedMesh("negative entry count".to_string()));
    }

    let mut seen_tags = FxHashSet::default();
    let mut media = Vec::new();
    for _ in 0..total {
        let line = reader.require_line("physical-name entry")?;

        let first_quote = line
            .find('"')
            .ok_or_else(|| MeshError::MalformedMesh("missing opening quote in name".to_string()))?;
        let last_quote = line
            .rfind('"')
            .ok_or_else(|| MeshError::MalformedMesh("missing closing quote in name".to_string()))?;
        if last_quote <= first_quote {
            return Err(MeshError::MalformedMesh("malformed quoted name".to_string()));
        }

        let head: Vec<&str> = line[..first_quote].split_whitespace().collect();
        let dim = parse_i64(
            head.first()
                .copied()
                .ok_or_else(|| MeshError::MalformedMesh("missing dimension".to_string()))?,
            "physical-name entry",
        )?;
        let tag = parse_i64(
            head.get(1)
                .copied()
                .ok_or_else(|| MeshError::MalformedMesh("missing tag".to_string()))?,
            "physical-name entry",
        )?;
        let name = &line[first_quote + 1..last_quote];

        if dim != 3 {
            continue;
        }
        if name.is_empty() {
            return Err(MeshError::MalformedMesh(format!(
                "physical group {tag} has an empty name"
            )));
        }
        if !seen_tags.insert(tag) {
            return Err(MeshError::MalformedMesh(format!(
                "duplicate physical-group tag {tag}"
            )));
        }
        media.push(Medium::new(tag, name.to_string()));
    }

    reader.expect_end("PhysicalNames")?;
    Ok(media)
}
