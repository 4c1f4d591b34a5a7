//! The spec DAG itself: the node type, constraint intersection, provider
//! indexing, configurable traversal, and canonical formatting (§2, §3,
//! §4.3–§4.5, §4.8). Parsing (`stratum-parser`) and normalization /
//! concretization (`stratum-solve`) build on top of what's exported here.

mod providers;
mod registry;
mod spec;
mod traversal;

pub mod format;

#[cfg(test)]
mod testutil;

pub use providers::ProviderIndex;
pub use registry::{CompilerRegistry, PackageDecl, PackageRegistry, ProvidesClause};
pub use spec::Spec;
pub use traversal::{Cover, KeyBy, TraversalOptions};
