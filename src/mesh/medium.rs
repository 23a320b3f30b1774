#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named material region (a "physical group" in the source format).
///
/// One group per volume entity; zero or more volumes may share a group.
/// The mesh only exposes groups actually referenced by at least one
/// tetrahedron.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Medium {
    tag: i64,
    name: String,
}

impl Medium {
    /// Builds a medium from its tag and display name. Callers (the
    /// physical-names parser) are responsible for rejecting empty names
    /// before constructing one.
    pub fn new(tag: i64, name: String) -> Self {
        Medium { tag, name }
    }

    pub fn tag(&self) -> i64 {
        self.tag
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
