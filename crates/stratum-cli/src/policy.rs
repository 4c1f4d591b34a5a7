//! Wires [`stratum_config::Config`] into a [`ConcretizationPolicy`] (§4.7,
//! §6: "a real deployment wires up concrete and pinned from
//! `stratum-config`"). Everything here delegates to
//! [`stratum_solve::DefaultPolicy`] — the only thing a site's config can
//! change is *which* default compiler and architecture that policy picks
//! when a spec leaves them unconstrained.

use stratum_error::Result;
use stratum_foundation::{Compiler, Version, VersionList};
use stratum_solve::{ConcretizationPolicy, DefaultPolicy};
use stratum_spec::{CompilerRegistry, PackageRegistry, Spec};

pub struct ConfiguredPolicy {
    default_architecture: Option<String>,
    inner: DefaultPolicy,
}

impl ConfiguredPolicy {
    pub fn from_config(config: &stratum_config::Config) -> Result<Self> {
        let version = Version::new(&config.compiler.default_version)?;
        let compiler = Compiler::with_versions(config.compiler.default_name.clone(), VersionList::single(version));
        Ok(ConfiguredPolicy {
            default_architecture: config.architecture.default.clone(),
            inner: DefaultPolicy::new(compiler),
        })
    }
}

impl ConcretizationPolicy for ConfiguredPolicy {
    fn concretize_architecture(&self, spec: &Spec) -> Result<String> {
        match &self.default_architecture {
            Some(arch) => Ok(arch.clone()),
            None => self.inner.concretize_architecture(spec),
        }
    }

    fn concretize_compiler(&self, spec: &Spec, compilers: &dyn CompilerRegistry) -> Result<Compiler> {
        self.inner.concretize_compiler(spec, compilers)
    }

    fn concretize_version(&self, spec: &Spec, registry: &dyn PackageRegistry) -> Result<Version> {
        self.inner.concretize_version(spec, registry)
    }

    fn choose_provider(&self, vpkg: &Spec, candidates: &[Spec]) -> Result<Spec> {
        self.inner.choose_provider(vpkg, candidates)
    }
}
