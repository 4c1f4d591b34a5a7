//! Leaf data types shared across the stratum spec core: versions, version
//! ranges and lists, compilers, variants, and id validation. Nothing in
//! this crate knows about the spec DAG, providers, or the parser; it is the
//! vocabulary those higher layers are built from.

mod compiler;
pub mod format;
mod name;
mod variant;
mod version;
mod version_list;
mod version_range;

pub use compiler::Compiler;
pub use name::{is_valid_id, is_valid_version_id};
pub use variant::{Polarity, Variant, VariantMap};
pub use version::Version;
pub use version_list::VersionList;
pub use version_range::VersionRange;
