//! Normalization (§4.6) and concretization (§4.7): the two algorithms that
//! turn a partial, user-typed [`stratum_spec::Spec`] into, first, a
//! complete DAG matching package declarations with virtuals resolved, and
//! then a single fully pinned build target.

mod concretize;
mod normalize;
mod policy;

#[cfg(test)]
mod fixtures;

pub use concretize::concretize;
pub use normalize::{normalize, normalized};
pub use policy::{ConcretizationPolicy, DefaultPolicy};
