use std::str::FromStr;

use stratum_foundation::{Compiler, VersionList, VersionRange};
use stratum_spec::Spec;

use crate::fixtures::AllCompilers;

use super::*;

#[test]
fn concretize_version_picks_the_highest_version_in_range() {
    let policy = DefaultPolicy::default();
    let spec = Spec::new("mpich2");
    spec.add_version_constraint(VersionRange::from_str("1.0:1.5").unwrap());
    let registry = crate::fixtures::MapRegistry::new();
    let version = policy.concretize_version(&spec, &registry).unwrap();
    assert_eq!(version.to_string(), "1.5");
}

#[test]
fn concretize_version_rejects_an_unbounded_range() {
    let policy = DefaultPolicy::default();
    let spec = Spec::new("mpich2");
    spec.add_version_constraint(VersionRange::from_str("1.0:").unwrap());
    let registry = crate::fixtures::MapRegistry::new();
    assert!(policy.concretize_version(&spec, &registry).is_err());
}

#[test]
fn concretize_architecture_returns_the_host_triple() {
    let policy = DefaultPolicy::default();
    let spec = Spec::new("mpich2");
    let arch = policy.concretize_architecture(&spec).unwrap();
    assert_eq!(arch, std::env::consts::ARCH);
}

#[test]
fn concretize_compiler_defaults_when_unset() {
    let policy = DefaultPolicy::new(Compiler::new("gcc"));
    let spec = Spec::new("mpich2");
    let compiler = policy.concretize_compiler(&spec, &AllCompilers).unwrap();
    assert_eq!(compiler.name(), "gcc");
}

#[test]
fn concretize_compiler_honors_a_requested_name_and_range() {
    let policy = DefaultPolicy::default();
    let spec = Spec::new("mpich2");
    let versions = VersionList::from_str("10:12").unwrap();
    spec.set_compiler(Compiler::with_versions("clang", versions)).unwrap();
    let compiler = policy.concretize_compiler(&spec, &AllCompilers).unwrap();
    assert_eq!(compiler.name(), "clang");
    assert_eq!(compiler.versions().as_concrete().unwrap().to_string(), "12");
}

#[test]
fn concretize_compiler_rejects_an_unsupported_name() {
    struct NoCompilers;
    impl stratum_spec::CompilerRegistry for NoCompilers {
        fn supported(&self, _name: &str) -> bool {
            false
        }
    }
    let policy = DefaultPolicy::default();
    let spec = Spec::new("mpich2");
    assert!(policy.concretize_compiler(&spec, &NoCompilers).is_err());
}

#[test]
fn choose_provider_picks_the_candidate_with_the_highest_version() {
    let policy = DefaultPolicy::default();
    let vpkg = Spec::new("mpi");
    let low = Spec::new("mpich2");
    low.add_version_constraint(VersionRange::from_str(":1.5").unwrap());
    let high = Spec::new("openmpi");
    high.add_version_constraint(VersionRange::from_str(":4.0").unwrap());
    let chosen = policy.choose_provider(&vpkg, &[low, high]).unwrap();
    assert_eq!(chosen.name(), "openmpi");
}

#[test]
fn choose_provider_errors_on_an_empty_candidate_list() {
    let policy = DefaultPolicy::default();
    let vpkg = Spec::new("mpi");
    assert!(policy.choose_provider(&vpkg, &[]).is_err());
}
