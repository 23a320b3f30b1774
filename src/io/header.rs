use std::io::Read;

use crate::error::{MeshError, Result};
use crate::io::reader::SectionReader;

/// Reads and validates the mandatory leading `$MeshFormat` block.
///
/// Only version `"4.1"`, ASCII encoding (binary flag `0`), and an 8-byte
/// `size_t` are accepted; anything else fails before any other section is
/// read.
pub(crate) fn parse_header<R: Read>(reader: &mut SectionReader<R>) -> Result<()> {
    let line = reader.require_line("$MeshFormat")?;
    if line != "$MeshFormat" {
        return Err(MeshError::MalformedHeader(format!(
            "expected `$MeshFormat`, found `{line}`"
        )));
    }

    let tokens = reader.require_tokens("MeshFormat header")?;
    if tokens.len() < 3 {
        return Err(MeshError::MalformedHeader(
            "expected version, binary flag, and size-of-size_t".to_string(),
        ));
    }

    let version = &tokens[0];
    if version != "4.1" {
        return Err(MeshError::UnsupportedVersion(version.clone()));
    }

    let binary_flag: i64 = tokens[1].parse().map_err(|_| {
        MeshError::MalformedHeader(format!(
            "expected integer binary flag, found `{}`",
            tokens[1]
        ))
    })?;
    if binary_flag != 0 {
        return Err(MeshError::UnsupportedEncoding(
            "binary-encoded mesh files are not supported".to_string(),
        ));
    }

    let size_of_size_t: i64 = tokens[2].parse().map_err(|_| {
        MeshError::MalformedHeader(format!(
            "expected integer size-of-size_t, found `{}`",
            tokens[2]
        ))
    })?;
    // A non-8 size-of-size_t is classified as UnsupportedEncoding, matching
    // the error taxonomy in spec §7 (size-of-size_t travels with the binary
    // encoding gate there, not the header well-formedness checks in §4.5).
    if size_of_size_t != 8 {
        return Err(MeshError::UnsupportedEncoding(format!(
            "unsupported size-of-size_t {size_of_size_t} (expected 8)"
        )));
    }

    reader.expect_end("MeshFormat")?;
    Ok(())
}
