//! The concretizer as an external policy object (§4.7, §6): the core
//! depends only on this trait's four methods, never on a concrete scheme
//! for picking versions, compilers, architectures, or providers.

use stratum_error::{ConstraintKind, Error, Result};
use stratum_foundation::{Compiler, Version, VersionList};
use stratum_spec::{CompilerRegistry, PackageRegistry, Spec};

/// Plug-in policy consulted by [`crate::concretize`] whenever a node has a
/// remaining degree of freedom. Replacing the policy must never require
/// changes to `normalize`/`concretize` themselves.
pub trait ConcretizationPolicy {
    /// Pick the architecture to pin on `spec` (unset on entry).
    fn concretize_architecture(&self, spec: &Spec) -> Result<String>;

    /// Pick the compiler to pin on `spec` (unset on entry), honoring
    /// whatever range `spec` may already carry on the `%compiler` field.
    fn concretize_compiler(&self, spec: &Spec, compilers: &dyn CompilerRegistry) -> Result<Compiler>;

    /// Pick the version to pin on `spec` from its current (non-concrete)
    /// [`stratum_foundation::VersionList`].
    fn concretize_version(&self, spec: &Spec, registry: &dyn PackageRegistry) -> Result<Version>;

    /// Choose one real candidate to stand in for a still-unresolved virtual
    /// node. `candidates` is never empty and never has exactly one element —
    /// both of those cases are handled by normalize itself before this is
    /// ever called.
    fn choose_provider(&self, vpkg: &Spec, candidates: &[Spec]) -> Result<Spec>;
}

/// The "pick max" default (§4.7): highest allowed version, the site's
/// configured default compiler, the host architecture.
///
/// Without a registry capable of listing every version a package or
/// compiler was ever released at, "highest" can only be computed over a
/// request that's actually bounded above. A request with no upper bound at
/// all (including "no `%compiler` clause whatsoever") falls back to
/// `default_compiler`, which a real deployment wires up concrete and
/// pinned from `stratum-config`; anything else is an error, since this
/// policy has no version catalog of its own to consult.
pub struct DefaultPolicy {
    default_compiler: Compiler,
}

impl DefaultPolicy {
    pub fn new(default_compiler: Compiler) -> Self {
        DefaultPolicy { default_compiler }
    }
}

impl Default for DefaultPolicy {
    /// gcc 11, absent any configured override — see `stratum-config`.
    fn default() -> Self {
        let version = Version::new("11").expect("'11' is a valid version id");
        DefaultPolicy::new(Compiler::with_versions("gcc", VersionList::single(version)))
    }
}

impl ConcretizationPolicy for DefaultPolicy {
    fn concretize_architecture(&self, _spec: &Spec) -> Result<String> {
        Ok(std::env::consts::ARCH.to_string())
    }

    fn concretize_compiler(&self, spec: &Spec, compilers: &dyn CompilerRegistry) -> Result<Compiler> {
        let requested = spec.compiler();
        let name = requested
            .as_ref()
            .map(|c| c.name().to_string())
            .unwrap_or_else(|| self.default_compiler.name().to_string());
        if !compilers.supported(&name) {
            return Err(Error::UnknownCompiler(name));
        }

        let versions = requested.map(|c| c.versions().clone()).unwrap_or_else(VersionList::any);
        if versions.concrete() {
            return Ok(Compiler::with_versions(name, versions));
        }
        if let Some(version) = highest(&versions) {
            return Ok(Compiler::with_versions(name, VersionList::single(version)));
        }
        if name == self.default_compiler.name() {
            return Ok(self.default_compiler.clone());
        }
        Err(Error::unsatisfiable(spec.name(), "a bounded compiler version range", ConstraintKind::Compiler))
    }

    fn concretize_version(&self, spec: &Spec, _registry: &dyn PackageRegistry) -> Result<Version> {
        highest(&spec.versions())
            .ok_or_else(|| Error::unsatisfiable(spec.name(), "a bounded version range", ConstraintKind::Version))
    }

    fn choose_provider(&self, vpkg: &Spec, candidates: &[Spec]) -> Result<Spec> {
        candidates
            .iter()
            .max_by(|a, b| highest(&a.versions()).cmp(&highest(&b.versions())))
            .cloned()
            .ok_or_else(|| Error::NoProvider(vpkg.name()))
    }
}

/// The highest version actually reachable in `list`, or `None` for an
/// unbounded-above or fully unconstrained list — there is no "highest" of
/// everything.
fn highest(list: &VersionList) -> Option<Version> {
    list.ranges().iter().filter_map(|r| r.hi().cloned()).max()
}

#[cfg(test)]
#[path = "./policy_test.rs"]
mod policy_test;
