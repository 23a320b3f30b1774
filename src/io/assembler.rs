use std::io::Read;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{with_section_context, MeshError, Result};
use crate::io::elements::{parse_elements, RawElement};
use crate::io::entities::{parse_entities, VolumeEntity};
use crate::io::header::parse_header;
use crate::io::nodes::parse_nodes;
use crate::io::physical_names::parse_physical_names;
use crate::io::reader::SectionReader;
use crate::mesh::{Medium, Mesh, Node, Tetrahedron};

/// Parses a version-4.1 ASCII mesh-exchange byte stream into a fully
/// validated, adjacency-augmented [`Mesh`].
///
/// The stream is read strictly forward and never seeked. On any failure the
/// first error encountered is returned and no partial mesh is produced.
pub fn parse<R: Read>(reader: R) -> Result<Mesh> {
    let mut reader = SectionReader::new(reader);
    parse_header(&mut reader)?;

    let mut entities: Option<Vec<VolumeEntity>> = None;
    let mut media: Option<Vec<Medium>> = None;
    let mut nodes: Option<Vec<Node>> = None;
    let mut raw_elements: Option<Vec<RawElement>> = None;

    while let Some(line) = reader.next_line()? {
        match line.as_str() {
            // A second $MeshFormat marks a second mesh in the stream;
            // multi-mesh files aren't supported, but this isn't a hard
            // error at the byte level, so the body parse simply stops here.
            "$MeshFormat" => break,
            "$Entities" => {
                entities = Some(with_section_context(
                    "Entities section",
                    parse_entities(&mut reader),
                )?);
            }
            "$PhysicalNames" => {
                media = Some(with_section_context(
                    "PhysicalNames section",
                    parse_physical_names(&mut reader),
                )?);
            }
            "$Nodes" => {
                nodes = Some(with_section_context("Nodes section", parse_nodes(&mut reader))?);
            }
            "$Elements" => {
                raw_elements = Some(with_section_context(
                    "Elements section",
                    parse_elements(&mut reader),
                )?);
            }
            name if name.starts_with('$') && !name.starts_with("$End") => {
                skip_unknown_section(&mut reader, name)?;
            }
            _ => {}
        }
    }

    let entities =
        entities.ok_or_else(|| MeshError::MalformedMesh("missing required $Entities section".to_string()))?;
    let media = media
        .ok_or_else(|| MeshError::MalformedMesh("missing required $PhysicalNames section".to_string()))?;
    let nodes =
        nodes.ok_or_else(|| MeshError::MalformedMesh("missing required $Nodes section".to_string()))?;
    let raw_elements = raw_elements
        .ok_or_else(|| MeshError::MalformedMesh("missing required $Elements section".to_string()))?;

    let group_tags: FxHashSet<i64> = media.iter().map(Medium::tag).collect();
    let mut volume_to_group: FxHashMap<i64, i64> = FxHashMap::default();
    for entity in &entities {
        if !group_tags.contains(&entity.group_tag) {
            return Err(MeshError::DanglingReference(format!(
                "volume entity {} references unknown physical group {}",
                entity.tag, entity.group_tag
            )));
        }
        volume_to_group.insert(entity.tag, entity.group_tag);
    }

    let mut tetrahedra = Vec::with_capacity(raw_elements.len());
    for raw in &raw_elements {
        let group_tag = volume_to_group.get(&raw.entity_tag).ok_or_else(|| {
            MeshError::DanglingReference(format!(
                "element references unknown volume entity {}",
                raw.entity_tag
            ))
        })?;
        tetrahedra.push(Tetrahedron::new(*group_tag, raw.node_tags)?);
    }

    Mesh::build(nodes, tetrahedra, media)
}

/// Skips a section whose name wasn't recognised, up to its `$End<name>`
/// marker, keeping the format forward-compatible with sections this crate
/// doesn't understand.
fn skip_unknown_section<R: Read>(reader: &mut SectionReader<R>, name: &str) -> Result<()> {
    let section = &name[1..];
    let end_marker = format!("$End{section}");
    loop {
        let line = reader.require_line(&format!("unknown section {name}"))?;
        if line == end_marker {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATER_LIKE_FIXTURE: &str = concat!(
        "$MeshFormat\n",
        "4.1 0 8\n",
        "$EndMeshFormat\n",
        "$PhysicalNames\n",
        "1\n",
        "3 1 \"Water\"\n",
        "$EndPhysicalNames\n",
        "$Entities\n",
        "0 0 0 1\n",
        "1 0 0 0 1 1 1 1 1 0\n",
        "$EndEntities\n",
        "$Nodes\n",
        "1 5 1 5\n",
        "3 1 0 5\n",
        "1\n2\n3\n4\n5\n",
        "0.0 0.0 0.0\n",
        "1.0 0.0 0.0\n",
        "0.0 1.0 0.0\n",
        "0.0 0.0 1.0\n",
        "1.0 1.0 1.0\n",
        "$EndNodes\n",
        "$Elements\n",
        "1 2 1 2\n",
        "3 1 4 2\n",
        "1 1 2 3 4\n",
        "2 2 3 4 5\n",
        "$EndElements\n",
    );

    #[test]
    fn test_parse_full_fixture() {
        let mesh = parse(WATER_LIKE_FIXTURE.as_bytes()).unwrap();
        assert_eq!(mesh.nodes().len(), 5);
        assert_eq!(mesh.tetrahedra().len(), 2);
        assert_eq!(mesh.media().len(), 1);
        assert_eq!(mesh.media()[0].name(), "Water");
        assert_eq!(mesh.tetrahedra()[0].medium_tag(), 1);

        let f0 = mesh.tetrahedra()[0]
            .faces()
            .iter()
            .position(|&f| f == (2, 3, 4))
            .unwrap();
        assert_eq!(mesh.neighbour(0, f0), Some(1));
    }

    #[test]
    fn test_parse_twice_yields_equal_meshes() {
        let a = parse(WATER_LIKE_FIXTURE.as_bytes()).unwrap();
        let b = parse(WATER_LIKE_FIXTURE.as_bytes()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_rejects_element_with_dangling_entity() {
        let body = concat!(
            "$MeshFormat\n4.1 0 8\n$EndMeshFormat\n",
            "$PhysicalNames\n1\n3 1 \"Water\"\n$EndPhysicalNames\n",
            "$Entities\n0 0 0 1\n1 0 0 0 1 1 1 1 1 0\n$EndEntities\n",
            "$Nodes\n1 4 1 4\n3 1 0 4\n1\n2\n3\n4\n",
            "0.0 0.0 0.0\n1.0 0.0 0.0\n0.0 1.0 0.0\n0.0 0.0 1.0\n$EndNodes\n",
            "$Elements\n1 1 1 1\n3 99 4 1\n1 1 2 3 4\n$EndElements\n",
        );
        let err = parse(body.as_bytes()).unwrap_err();
        assert!(matches!(err, MeshError::DanglingReference(_)));
    }

    #[test]
    fn test_parse_skips_unknown_section() {
        let body = concat!(
            "$MeshFormat\n4.1 0 8\n$EndMeshFormat\n",
            "$Comments\nanything at all\ngoes here\n$EndComments\n",
            "$PhysicalNames\n1\n3 1 \"Water\"\n$EndPhysicalNames\n",
            "$Entities\n0 0 0 1\n1 0 0 0 1 1 1 1 1 0\n$EndEntities\n",
            "$Nodes\n1 4 1 4\n3 1 0 4\n1\n2\n3\n4\n",
            "0.0 0.0 0.0\n1.0 0.0 0.0\n0.0 1.0 0.0\n0.0 0.0 1.0\n$EndNodes\n",
            "$Elements\n1 1 1 1\n3 1 4 1\n1 1 2 3 4\n$EndElements\n",
        );
        let mesh = parse(body.as_bytes()).unwrap();
        assert_eq!(mesh.tetrahedra().len(), 1);
    }
}
