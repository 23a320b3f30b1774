//! Error taxonomy for mesh-file parsing and mesh construction.
//!
//! Every variant maps to one of the failure kinds required by the mesh
//! exchange format consumer: a parse either yields a fully validated
//! [`crate::mesh::Mesh`] or an error, never a partial mesh.

use std::fmt;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MeshError>;

/// Everything that can go wrong reading and assembling a mesh.
#[derive(thiserror::Error, Debug)]
pub enum MeshError {
    /// The underlying byte stream failed, or ended before a mandatory
    /// section or token was fully read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `$MeshFormat` was missing, truncated, or its tokens did not parse.
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// The format version was not exactly `"4.1"`.
    #[error("unsupported version: {0}")]
    UnsupportedVersion(String),

    /// The binary flag was set, or the declared size of `size_t` was not 8.
    #[error("unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// A structural violation within a section: a missing token, a missing
    /// end marker, a duplicate tag, an empty quoted name, zero volumes, a
    /// non-contiguous node-tag range, and so on. Carries a context string
    /// describing where the violation was found.
    #[error("{0}")]
    MalformedMesh(String),

    /// A 3-D element block declared a type code other than TET4 (4).
    #[error("{context}: non-tetrahedral element type {found} (expected 4)")]
    UnsupportedElementType {
        /// Section/entity context, e.g. "Elements section: block for entity 12".
        context: String,
        /// The offending type code.
        found: i64,
    },

    /// An element referenced an entity tag absent from `$Entities`, or an
    /// entity referenced a physical-group tag absent from `$PhysicalNames`.
    #[error("dangling reference: {0}")]
    DanglingReference(String),

    /// A tetrahedron's four node tags were not pairwise distinct, or one
    /// of them was negative.
    #[error("invalid element: {0}")]
    InvalidElement(String),
}

/// Wraps an error with the name of the enclosing section, producing the
/// chained "Section: detail" messages the format requires.
///
/// Only applicable to the variants that carry a free-form message; the
/// header and I/O variants are never re-contextualised since they occur
/// before any section is entered.
pub(crate) fn with_section_context<T>(
    section: &str,
    result: Result<T>,
) -> Result<T> {
    result.map_err(|err| prefix(section, err))
}

fn prefix(section: &str, err: MeshError) -> MeshError {
    match err {
        MeshError::MalformedMesh(msg) => {
            MeshError::MalformedMesh(format!("{section}: {msg}"))
        }
        MeshError::DanglingReference(msg) => {
            MeshError::DanglingReference(format!("{section}: {msg}"))
        }
        MeshError::UnsupportedElementType { context, found } => {
            MeshError::UnsupportedElementType {
                context: format!("{section}: {context}"),
                found,
            }
        }
        MeshError::InvalidElement(msg) => {
            MeshError::InvalidElement(format!("{section}: {msg}"))
        }
        other => other,
    }
}

/// Small helper for building "section: detail" strings without chaining
/// through [`with_section_context`], used where an error is constructed
/// directly rather than mapped from a sub-call.
pub(crate) fn ctx(section: &str, detail: impl fmt::Display) -> String {
    format!("{section}: {detail}")
}
