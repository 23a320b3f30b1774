//! Parses the version-4.1 ASCII mesh-exchange format into a
//! [`crate::mesh::Mesh`].
//!
//! Data flows header → body dispatch → four section readers → assembler:
//! [`header`] gates on version and encoding, [`entities`],
//! [`physical_names`], [`nodes`], and [`elements`] each own one section,
//! and [`assembler`] wires the sections together and resolves every
//! cross-section reference.

mod assembler;
mod elements;
mod entities;
mod header;
mod nodes;
mod physical_names;
mod reader;

pub use assembler::parse;
