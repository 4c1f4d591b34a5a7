use std::str::FromStr;

use stratum_foundation::VersionRange;

use crate::registry::{PackageDecl, ProvidesClause};
use crate::spec::Spec;
use crate::testutil::MapRegistry;

use super::*;

fn mpich2() -> Spec {
    let s = Spec::new("mpich2");
    s.add_version_constraint(VersionRange::point("1.5".parse().unwrap()));
    s
}

fn mpi_at_most_2_2() -> Spec {
    let s = Spec::new("mpi");
    s.add_version_constraint(VersionRange::from_str(":2.2").unwrap());
    s
}

fn registry_with_mpich2_provider() -> MapRegistry {
    let when = {
        let s = Spec::new("mpich2");
        s.add_version_constraint(VersionRange::from_str("1.2:").unwrap());
        s
    };
    MapRegistry::new()
        .with_package(PackageDecl::new("mpich2").with_provides(ProvidesClause::when(mpi_at_most_2_2(), when)))
        .with_package(PackageDecl::new("callpath"))
}

#[test]
fn providers_for_finds_candidate_satisfying_when_clause() {
    let registry = registry_with_mpich2_provider();
    let candidate = mpich2();
    let index = ProviderIndex::build(&[candidate], &registry, true);

    let providers = index.providers_for(&Spec::new("mpi"));
    assert_eq!(providers.len(), 1);
    assert_eq!(providers[0].name(), "mpich2");
}

#[test]
fn providers_for_excludes_candidate_failing_when_clause() {
    let registry = registry_with_mpich2_provider();
    let too_old = Spec::new("mpich2");
    too_old.add_version_constraint(VersionRange::point("1.0".parse().unwrap()));

    let index = ProviderIndex::build(&[too_old], &registry, true);
    assert!(index.providers_for(&Spec::new("mpi")).is_empty());
}

#[test]
fn providers_for_name_ignores_the_requested_version_constraint() {
    let registry = registry_with_mpich2_provider();
    let index = ProviderIndex::build(&[mpich2()], &registry, true);
    assert_eq!(index.providers_for_name("mpi").len(), 1);
}

#[test]
fn index_satisfies_requires_overlapping_provider_sets() {
    let registry = registry_with_mpich2_provider();
    let a = ProviderIndex::build(&[mpich2()], &registry, true);
    let b = ProviderIndex::build(&[mpich2()], &registry, true);
    assert!(a.satisfies(&b));

    let empty = ProviderIndex::new();
    assert!(empty.satisfies(&a), "a virtual name absent from self is unconstrained");
}
