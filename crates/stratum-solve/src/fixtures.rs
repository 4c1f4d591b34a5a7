//! A tiny in-memory registry shared by this crate's normalize/concretize
//! tests, built around the `callpath` / `mpich2` / `openmpi` / `mpileaks` /
//! `libdwarf` cast of characters from spec.md §8's concrete scenarios.

use std::collections::BTreeMap;

use stratum_error::{Error, Result};
use stratum_spec::{CompilerRegistry, PackageDecl, PackageRegistry, ProviderIndex, Spec};

#[derive(Default)]
pub(crate) struct MapRegistry {
    packages: BTreeMap<String, PackageDecl>,
}

impl MapRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_package(mut self, decl: PackageDecl) -> Self {
        self.packages.insert(decl.name.clone(), decl);
        self
    }
}

impl PackageRegistry for MapRegistry {
    fn exists(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    fn get(&self, name: &str) -> Result<PackageDecl> {
        self.packages
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownPackage(name.to_string()))
    }

    fn providers_for(&self, vpkg: &Spec) -> Vec<Spec> {
        let candidates: Vec<Spec> = self.packages.keys().map(Spec::new).collect();
        let index = ProviderIndex::build(&candidates, self, true);
        index.providers_for(vpkg)
    }
}

/// A compiler registry that accepts any name — tests only care about the
/// version policy, not about validating compiler names.
pub(crate) struct AllCompilers;

impl CompilerRegistry for AllCompilers {
    fn supported(&self, _name: &str) -> bool {
        true
    }
}
