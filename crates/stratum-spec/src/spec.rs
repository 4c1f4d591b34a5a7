//! The spec DAG node itself (§3), plus [`DependencyMap`], `satisfies`, and
//! `constrain` (§4.3).
//!
//! Represented as shared ownership with weak back-references rather than
//! bidirectional strong pointers (§9): a [`Spec`] is a cheap handle
//! (`Rc<RefCell<Inner>>`); its `dependencies` hold strong handles to
//! children, its `dependents` hold [`Weak`] handles back to parents, kept
//! consistent on every mutation that changes an edge.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use data_encoding::HEXLOWER;
use ring::digest::{Context, SHA1_FOR_LEGACY_USE_ONLY};
use stratum_error::{ConstraintKind, Error};
use stratum_foundation::{Compiler, VariantMap, VersionList};

use crate::registry::PackageRegistry;

struct Inner {
    name: String,
    versions: VersionList,
    variants: VariantMap,
    compiler: Option<Compiler>,
    architecture: Option<String>,
    dependencies: BTreeMap<String, Spec>,
    dependents: BTreeMap<String, Weak<RefCell<Inner>>>,
}

/// A node in a spec DAG. Cheap to clone (it's a reference-counted handle);
/// use [`Spec::copy`] to get an independent deep or shallow duplicate.
#[derive(Clone)]
pub struct Spec(Rc<RefCell<Inner>>);

impl Spec {
    /// A bare, dependency-free spec for `name`, unconstrained in every
    /// field — the shape a parser produces before any clauses are applied.
    pub fn new(name: impl Into<String>) -> Self {
        Spec(Rc::new(RefCell::new(Inner {
            name: name.into(),
            versions: VersionList::any(),
            variants: VariantMap::new(),
            compiler: None,
            architecture: None,
            dependencies: BTreeMap::new(),
            dependents: BTreeMap::new(),
        })))
    }

    pub(crate) fn inner_rc(&self) -> &Rc<RefCell<Inner>> {
        &self.0
    }

    pub fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    pub fn versions(&self) -> VersionList {
        self.0.borrow().versions.clone()
    }

    pub fn set_versions(&self, versions: VersionList) {
        self.0.borrow_mut().versions = versions;
    }

    pub fn add_version_constraint(&self, range: stratum_foundation::VersionRange) {
        self.0.borrow_mut().versions.add(range);
    }

    pub fn variants(&self) -> VariantMap {
        self.0.borrow().variants.clone()
    }

    pub fn add_variant(&self, variant: stratum_foundation::Variant) -> Result<(), Error> {
        self.0.borrow_mut().variants.add(variant)
    }

    pub fn compiler(&self) -> Option<Compiler> {
        self.0.borrow().compiler.clone()
    }

    pub fn set_compiler(&self, compiler: Compiler) -> Result<(), Error> {
        let mut inner = self.0.borrow_mut();
        if inner.compiler.is_some() {
            return Err(Error::DuplicateCompiler(inner.name.clone()));
        }
        inner.compiler = Some(compiler);
        Ok(())
    }

    pub fn architecture(&self) -> Option<String> {
        self.0.borrow().architecture.clone()
    }

    pub fn set_architecture(&self, architecture: impl Into<String>) -> Result<(), Error> {
        let mut inner = self.0.borrow_mut();
        if inner.architecture.is_some() {
            return Err(Error::DuplicateArchitecture(inner.name.clone()));
        }
        inner.architecture = Some(architecture.into());
        Ok(())
    }

    /// Force-set the architecture, replacing any existing value. Used by
    /// the concretizer, which is allowed to pin a value `constrain` would
    /// otherwise reject as a duplicate.
    pub fn force_architecture(&self, architecture: impl Into<String>) {
        self.0.borrow_mut().architecture = Some(architecture.into());
    }

    /// Force-set the compiler, replacing any existing value. Used by the
    /// concretizer for the same reason as [`Self::force_architecture`].
    pub fn force_compiler(&self, compiler: Compiler) {
        self.0.borrow_mut().compiler = Some(compiler);
    }

    pub fn dependencies(&self) -> BTreeMap<String, Spec> {
        self.0.borrow().dependencies.clone()
    }

    pub fn dependency(&self, name: &str) -> Option<Spec> {
        self.0.borrow().dependencies.get(name).cloned()
    }

    pub fn dependents(&self) -> Vec<Spec> {
        self.0
            .borrow()
            .dependents
            .values()
            .filter_map(|w| w.upgrade().map(Spec))
            .collect()
    }

    pub fn clear_dependencies(&self) {
        let names: Vec<String> = self.0.borrow().dependencies.keys().cloned().collect();
        for name in names {
            self.remove_dependency(&name);
        }
    }

    fn remove_dependency(&self, name: &str) {
        let dep = self.0.borrow_mut().dependencies.remove(name);
        if let Some(dep) = dep {
            dep.0.borrow_mut().dependents.remove(&self.name());
        }
    }

    /// Add `dep` as a direct dependency of `self`. Raises
    /// [`Error::DuplicateDependency`] if a dependency with that name is
    /// already present.
    pub fn add_dependency(&self, dep: Spec) -> Result<(), Error> {
        let dep_name = dep.name();
        if self.0.borrow().dependencies.contains_key(&dep_name) {
            return Err(Error::DuplicateDependency(dep_name));
        }
        self.link_dependency(dep);
        Ok(())
    }

    /// Like [`Self::add_dependency`] but overwrites any existing edge of
    /// the same name instead of erroring — used when normalization splices
    /// a concrete provider in for a virtual dependency.
    pub fn replace_dependency(&self, dep: Spec) {
        self.remove_dependency(&dep.name());
        self.link_dependency(dep);
    }

    fn link_dependency(&self, dep: Spec) {
        let dep_name = dep.name();
        dep.0
            .borrow_mut()
            .dependents
            .insert(self.name(), Rc::downgrade(&self.0));
        self.0.borrow_mut().dependencies.insert(dep_name, dep);
    }

    /// A spec is virtual if no known package exists with its name (§3).
    pub fn is_virtual(&self, registry: &dyn PackageRegistry) -> bool {
        !registry.exists(&self.name())
    }

    /// A spec is concrete iff it is non-virtual, its versions/compiler are
    /// single points, its architecture is set, and every dependency is
    /// (transitively) concrete (§3, invariant 5).
    pub fn is_concrete(&self, registry: &dyn PackageRegistry) -> bool {
        if self.is_virtual(registry) {
            return false;
        }
        if !self.versions().concrete() {
            return false;
        }
        if self.architecture().is_none() {
            return false;
        }
        match self.compiler() {
            Some(c) if c.concrete() => {}
            _ => return false,
        }
        self.dependencies()
            .values()
            .all(|d| d.is_concrete(registry))
    }

    /// Deep (`include_deps = true`) or shallow (`include_deps = false`,
    /// the dependency-free "flatten" shape) clone. Shared dependency nodes
    /// (diamonds in the DAG) are cloned once and referenced from every new
    /// parent, not duplicated.
    pub fn copy(&self, include_deps: bool) -> Spec {
        let mut memo = BTreeMap::new();
        self.copy_memoized(include_deps, &mut memo)
    }

    fn copy_memoized(&self, include_deps: bool, memo: &mut BTreeMap<usize, Spec>) -> Spec {
        let ptr = Rc::as_ptr(&self.0) as usize;
        if let Some(existing) = memo.get(&ptr) {
            return existing.clone();
        }
        let inner = self.0.borrow();
        let clone = Spec::new(inner.name.clone());
        {
            let mut clone_inner = clone.0.borrow_mut();
            clone_inner.versions = inner.versions.clone();
            clone_inner.variants = inner.variants.clone();
            clone_inner.compiler = inner.compiler.clone();
            clone_inner.architecture = inner.architecture.clone();
        }
        let dep_names: Vec<String> = inner.dependencies.keys().cloned().collect();
        let deps: Vec<Spec> = inner.dependencies.values().cloned().collect();
        drop(inner);
        memo.insert(ptr, clone.clone());
        if include_deps {
            for (name, dep) in dep_names.into_iter().zip(deps) {
                let cloned_dep = dep.copy_memoized(true, memo);
                debug_assert_eq!(cloned_dep.name(), name);
                clone.link_dependency(cloned_dep);
            }
        }
        clone
    }

    /// `self.satisfies(other)` (§4.3): the default, deps-checking form.
    pub fn satisfies(&self, other: &Spec, registry: &dyn PackageRegistry) -> bool {
        self.satisfies_opts(other, true, registry)
    }

    pub fn satisfies_opts(
        &self,
        other: &Spec,
        check_deps: bool,
        registry: &dyn PackageRegistry,
    ) -> bool {
        if self.name() != other.name() {
            return false;
        }
        if !self.versions().satisfies(&other.versions()) {
            return false;
        }
        if !self.variants().satisfies(&other.variants()) {
            return false;
        }
        match (self.compiler(), other.compiler()) {
            (_, None) => {}
            (None, Some(_)) => return false,
            (Some(a), Some(b)) => {
                if !a.satisfies(&b) {
                    return false;
                }
            }
        }
        match (self.architecture(), other.architecture()) {
            (_, None) => {}
            (None, Some(_)) => return false,
            (Some(a), Some(b)) if a != b => return false,
            _ => {}
        }
        if !check_deps {
            return true;
        }

        // Only names common to both sides are constrained (`spec.py`'s
        // `satisfies_dependencies` loops `common_dependencies(other)`, the
        // *intersection* of the two dependency maps) — a name `other`
        // declares that `self` simply doesn't have is not a mismatch, it's
        // unconstrained on `self`'s side, same as any other absent field.
        let my_deps = self.dependencies();
        let other_deps = other.dependencies();
        for (name, other_dep) in &other_deps {
            if let Some(my_dep) = my_deps.get(name) {
                if !my_dep.satisfies(other_dep, registry) {
                    return false;
                }
            }
        }

        // §4.5's virtual-provider cross-check: build a provider index over
        // each side's own transitive dependencies and require the two
        // indexes to agree on every virtual they both know about (e.g. a
        // `self` built against `mpich2` does not satisfy an `other` that
        // requires `mpi` provided by `openmpi`).
        let self_index = crate::providers::ProviderIndex::build(&self.transitive_nodes(), registry, true);
        let other_index = crate::providers::ProviderIndex::build(&other.transitive_nodes(), registry, true);
        self_index.satisfies(&other_index)
    }

    /// `self` plus every node reachable from it, by identity — the
    /// candidate set a [`crate::providers::ProviderIndex`] is built over
    /// for a provider cross-check between two (sub-)DAGs.
    fn transitive_nodes(&self) -> Vec<Spec> {
        self.traverse(&crate::traversal::TraversalOptions {
            cover: crate::traversal::Cover::Nodes,
            key_by: crate::traversal::KeyBy::Identity,
            include_root: true,
        })
        .into_iter()
        .map(|(_, node)| node)
        .collect()
    }

    /// `self.constrain(other)` (§4.3): mutating conjunction. Each per-field
    /// failure raises a distinct `Unsatisfiable*` error.
    pub fn constrain(&self, other: &Spec, registry: &dyn PackageRegistry) -> Result<(), Error> {
        self.constrain_opts(other, true, registry)
    }

    pub fn constrain_opts(
        &self,
        other: &Spec,
        check_deps: bool,
        registry: &dyn PackageRegistry,
    ) -> Result<(), Error> {
        if self.name() != other.name() {
            return Err(Error::unsatisfiable(self.name(), other.name(), ConstraintKind::Name));
        }

        {
            let mut versions = self.versions();
            versions.intersect(&other.versions())?;
            self.set_versions(versions);
        }

        {
            let mut variants = self.variants();
            variants.constrain(&other.variants())?;
            self.0.borrow_mut().variants = variants;
        }

        match (self.compiler(), other.compiler()) {
            (_, None) => {}
            (None, Some(c)) => self.0.borrow_mut().compiler = Some(c),
            (Some(mut a), Some(b)) => {
                a.constrain(&b)?;
                self.0.borrow_mut().compiler = Some(a);
            }
        }

        match (self.architecture(), other.architecture()) {
            (_, None) => {}
            (None, Some(a)) => self.0.borrow_mut().architecture = Some(a),
            (Some(a), Some(b)) if a != b => {
                return Err(Error::unsatisfiable(a, b, ConstraintKind::Architecture));
            }
            _ => {}
        }

        if !check_deps {
            return Ok(());
        }

        let my_deps = self.dependencies();
        for (name, other_dep) in other.dependencies() {
            match my_deps.get(&name) {
                Some(existing) => existing.constrain_opts(&other_dep, false, registry)?,
                None => self.link_dependency(other_dep.copy(true)),
            }
        }
        Ok(())
    }

    /// The canonical-string-derived, stable 6-hex-digit fingerprint of this
    /// spec's sorted transitive dependency edge list (§3, §4.8).
    pub fn dependency_fingerprint(&self) -> String {
        let canonical = crate::format::dependency_edges_canonical(self);
        let mut ctx = Context::new(&SHA1_FOR_LEGACY_USE_ONLY);
        ctx.update(canonical.as_bytes());
        let digest = ctx.finish();
        HEXLOWER.encode(digest.as_ref())[..6].to_string()
    }
}

impl fmt::Display for Spec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::format::canonical(self))
    }
}

impl fmt::Debug for Spec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Spec({self})")
    }
}

impl PartialEq for Spec {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Spec {}

#[cfg(test)]
#[path = "./spec_test.rs"]
mod spec_test;
