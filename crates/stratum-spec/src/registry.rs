//! The collaborator contracts the core consumes but never implements (§6).
//!
//! `stratum-spec`/`stratum-solve` only ever see packages through
//! [`PackageRegistry`]; how package declarations are parsed from YAML,
//! fetched from a remote index, or cached on disk is entirely outside this
//! crate's scope, matching spec.md's framing of the registry, concretizer,
//! and install layout as thin external interfaces.

use std::collections::BTreeMap;

use stratum_error::Error;

use crate::spec::Spec;

/// A single `provides(virtual_spec, when=condition_spec)` declaration.
#[derive(Clone, Debug)]
pub struct ProvidesClause {
    pub virtual_spec: Spec,
    pub when: Option<Spec>,
}

impl ProvidesClause {
    pub fn unconditional(virtual_spec: Spec) -> Self {
        ProvidesClause {
            virtual_spec,
            when: None,
        }
    }

    pub fn when(virtual_spec: Spec, when: Spec) -> Self {
        ProvidesClause {
            virtual_spec,
            when: Some(when),
        }
    }
}

/// The metadata a package declares about itself: its real dependencies
/// (which may themselves name virtuals) and what virtuals it provides.
///
/// This is the `PackageDecl` capability from §9's `PackageDecl`/`Install`
/// split — the core only ever sees this metadata half, never a build
/// recipe.
#[derive(Clone, Debug, Default)]
pub struct PackageDecl {
    pub name: String,
    pub dependencies: BTreeMap<String, Spec>,
    pub provides: Vec<ProvidesClause>,
    /// Names of the variants this package declares, in the order they were
    /// declared. A name absent from a concretized spec's `VariantMap` is
    /// filled in as disabled against this list (§3: "unset... becomes
    /// disabled once concretized against the package").
    pub variants: Vec<String>,
}

impl PackageDecl {
    pub fn new(name: impl Into<String>) -> Self {
        PackageDecl {
            name: name.into(),
            dependencies: BTreeMap::new(),
            provides: Vec::new(),
            variants: Vec::new(),
        }
    }

    pub fn with_dependency(mut self, dep: Spec) -> Self {
        self.dependencies.insert(dep.name().to_string(), dep);
        self
    }

    pub fn with_provides(mut self, clause: ProvidesClause) -> Self {
        self.provides.push(clause);
        self
    }

    pub fn with_variant(mut self, name: impl Into<String>) -> Self {
        self.variants.push(name.into());
        self
    }

    /// Declared dependencies whose name is not known to `registry` — i.e.
    /// the virtual dependencies among this package's own dependency list.
    pub fn virtual_dependencies(&self, registry: &dyn PackageRegistry) -> Vec<Spec> {
        self.dependencies
            .values()
            .filter(|dep| !registry.exists(dep.name()))
            .cloned()
            .collect()
    }

    /// Out-of-scope glue: a real registry would check each declared
    /// dependency refers to a package (or virtual) that actually exists and
    /// that the declaration itself is well-formed. The core does not
    /// implement package-definition authoring rules, so this is a no-op
    /// that a concrete registry may override by validating before handing
    /// a `PackageDecl` to the core at all.
    pub fn validate_dependencies(&self) -> Result<(), Error> {
        Ok(())
    }
}

/// Everything the spec core needs to know about the package universe.
pub trait PackageRegistry {
    /// Whether `name` is a real, known package (as opposed to a virtual
    /// placeholder name).
    fn exists(&self, name: &str) -> bool;

    /// Fetch a package's declaration, or `Err(Error::UnknownPackage)`.
    fn get(&self, name: &str) -> Result<PackageDecl, Error>;

    /// Candidate specs (one per known real package) that could provide
    /// `vpkg`, i.e. whose declared `provides` range is compatible with
    /// `vpkg`'s own constraints.
    fn providers_for(&self, vpkg: &Spec) -> Vec<Spec>;
}

/// A compiler name registry collaborator (§6, `compilers.supported(name)`).
pub trait CompilerRegistry {
    fn supported(&self, name: &str) -> bool;
}

#[cfg(test)]
#[path = "./registry_test.rs"]
mod registry_test;
