//! A tiny in-memory [`PackageRegistry`] used only by this crate's own unit
//! tests. The scenario-level normalize/concretize fixtures (`mpileaks`,
//! `callpath`, `mpich2`, ...) live in `stratum-solve`, which is where those
//! algorithms are exercised end to end.

use std::collections::BTreeMap;

use stratum_error::Error;

use crate::providers::ProviderIndex;
use crate::registry::{PackageDecl, PackageRegistry};
use crate::spec::Spec;

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

    fn get(&self, name: &str) -> Result<PackageDecl, Error> {
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
