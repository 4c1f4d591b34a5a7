//! A file-backed [`PackageRegistry`]/[`CompilerRegistry`] — the CLI's
//! stand-in for the "collaborator contracts consumed by the core" (§6):
//! `packages.get`, `packages.exists`, `packages.providers_for`,
//! `compilers.supported`. How a real deployment fetches package
//! declarations (a remote index, a build of `package.yaml` files checked
//! into a repo) is out of scope for the spec core; this crate only needs
//! *some* concrete implementation to drive `normalize`/`concretize` from
//! the command line, so it reads one YAML file per package from a
//! directory.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;
use stratum_error::Error as SpecError;
use stratum_spec::{CompilerRegistry, PackageDecl, PackageRegistry, ProviderIndex, ProvidesClause, Spec};

use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
struct ProvidesFile {
    #[serde(rename = "virtual")]
    virtual_spec: String,
    when: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PackageFile {
    name: String,
    #[serde(default)]
    dependencies: Vec<String>,
    #[serde(default)]
    variants: Vec<String>,
    #[serde(default)]
    provides: Vec<ProvidesFile>,
}

/// A package repository plus the set of compiler names a site supports,
/// both loaded from flat files under a single directory so the CLI has
/// something to normalize/concretize against without depending on any
/// particular install backend.
pub struct Repository {
    packages: BTreeMap<String, PackageDecl>,
    compilers: BTreeSet<String>,
}

impl Repository {
    /// Load every `*.yaml` file in `dir` as a package declaration, except
    /// `compilers.yaml`, which instead lists the supported compiler names
    /// under a top-level `supported:` key.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut packages = BTreeMap::new();
        let mut compilers = BTreeSet::new();

        let entries = std::fs::read_dir(dir).map_err(|err| Error::RepositoryPath(dir.to_path_buf(), err))?;
        for entry in entries {
            let entry = entry.map_err(|err| Error::RepositoryPath(dir.to_path_buf(), err))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("yaml") {
                continue;
            }

            let text = std::fs::read_to_string(&path).map_err(|err| Error::RepositoryPath(path.clone(), err))?;

            if path.file_name().and_then(|n| n.to_str()) == Some("compilers.yaml") {
                #[derive(Deserialize)]
                struct CompilersFile {
                    #[serde(default)]
                    supported: Vec<String>,
                }
                let file: CompilersFile =
                    serde_yaml::from_str(&text).map_err(|err| Error::RepositoryYaml(path.clone(), err))?;
                compilers.extend(file.supported);
                continue;
            }

            let file: PackageFile = serde_yaml::from_str(&text).map_err(|err| Error::RepositoryYaml(path.clone(), err))?;
            let decl = build_decl(file)?;
            packages.insert(decl.name.clone(), decl);
        }

        Ok(Repository { packages, compilers })
    }
}

fn build_decl(file: PackageFile) -> Result<PackageDecl> {
    let mut decl = PackageDecl::new(file.name);
    for dep in file.dependencies {
        let dep_spec = stratum_parser::parse_spec(&dep).map_err(Error::Spec)?;
        decl = decl.with_dependency(dep_spec);
    }
    for variant in file.variants {
        decl = decl.with_variant(variant);
    }
    for clause in file.provides {
        let virtual_spec = stratum_parser::parse_spec(&clause.virtual_spec).map_err(Error::Spec)?;
        let provides = match clause.when {
            Some(when) => {
                let when_spec = stratum_parser::parse_spec(&when).map_err(Error::Spec)?;
                ProvidesClause::when(virtual_spec, when_spec)
            }
            None => ProvidesClause::unconditional(virtual_spec),
        };
        decl = decl.with_provides(provides);
    }
    Ok(decl)
}

impl PackageRegistry for Repository {
    fn exists(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    fn get(&self, name: &str) -> std::result::Result<PackageDecl, SpecError> {
        self.packages
            .get(name)
            .cloned()
            .ok_or_else(|| SpecError::UnknownPackage(name.to_string()))
    }

    fn providers_for(&self, vpkg: &Spec) -> Vec<Spec> {
        let candidates: Vec<Spec> = self.packages.keys().map(|name| Spec::new(name.as_str())).collect();
        let index = ProviderIndex::build(&candidates, self, true);
        index.providers_for(vpkg)
    }
}

impl CompilerRegistry for Repository {
    fn supported(&self, name: &str) -> bool {
        self.compilers.contains(name)
    }
}

#[cfg(test)]
#[path = "./repository_test.rs"]
mod repository_test;
