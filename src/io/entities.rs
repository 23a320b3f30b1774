use std::io::Read;

use rustc_hash::FxHashSet;

use crate::error::{MeshError, Result};
use crate::io::reader::{parse_i64, token, SectionReader};

/// A `$Entities` volume entity, reduced to the one relation the assembler
/// needs: which physical group it belongs to.
pub(crate) struct VolumeEntity {
    pub(crate) tag: i64,
    pub(crate) group_tag: i64,
}

/// Consumes a `$Entities` section (the leading `$Entities` line is assumed
/// already read).
///
/// Point, curve, and surface entities are skipped line-for-line; only
/// volume entities are retained, and each must carry exactly one physical
/// group tag.
pub(crate) fn parse_entities<R: Read>(reader: &mut SectionReader<R>) -> Result<Vec<VolumeEntity>> {
    let header = reader.require_tokens("Entities header")?;
    let n_points = parse_i64(token(&header, 0, "Entities header")?, "Entities header")?;
    let n_curves = parse_i64(token(&header, 1, "Entities header")?, "Entities header")?;
    let n_surfaces = parse_i64(token(&header, 2, "Entities header")?, "Entities header")?;
    let n_volumes = parse_i64(token(&header, 3, "Entities header")?, "Entities header")?;

    for _ in 0..(n_points + n_curves + n_surfaces) {
        reader.require_line("Entities section: lower-dimension entity")?;
    }

    if n_volumes <= 0 {
        return Err(MeshError::MalformedMesh(
            "no volume entities declared".to_string(),
        ));
    }

    let mut seen_tags = FxHashSet::default();
    let mut volumes = Vec::with_capacity(n_volumes as usize);
    for _ in 0..n_volumes {
        let tokens = reader.require_tokens("volume entity")?;
        let tag = parse_i64(token(&tokens, 0, "volume entity")?, "volume entity")?;
        let context = format!("volume entity {tag}");
        let num_groups = parse_i64(token(&tokens, 7, &context)?, &context)?;
        if num_groups != 1 {
            return Err(MeshError::MalformedMesh(format!(
                "{context}: {num_groups} physical groups attached (expected exactly 1)"
            )));
        }
        let group_tag = parse_i64(token(&tokens, 8, &context)?, &context)?;

        if !seen_tags.insert(tag) {
            return Err(MeshError::MalformedMesh(format!(
                "duplicate volume entity tag {tag}"
            )));
        }
        volumes.push(VolumeEntity { tag, group_tag });
    }

    reader.expect_end("Entities")?;
    Ok(volumes)
}
