use std::str::FromStr;

use rstest::rstest;
use stratum_foundation::{Compiler, VersionRange};
use stratum_spec::{PackageDecl, ProvidesClause, Spec};

use crate::fixtures::{AllCompilers, MapRegistry};

use super::*;

fn registry_with_libdwarf() -> MapRegistry {
    MapRegistry::new()
        .with_package(PackageDecl::new("libdwarf").with_dependency(Spec::new("libelf")))
        .with_package(PackageDecl::new("libelf"))
}

#[test]
fn concretize_pins_every_degree_of_freedom() {
    let registry = registry_with_libdwarf();
    let compilers = AllCompilers;
    let policy = crate::policy::DefaultPolicy::new(Compiler::new("gcc"));
    let root = Spec::new("libdwarf");
    root.add_version_constraint(VersionRange::from_str(":2.0").unwrap());

    concretize(&root, &registry, &compilers, &policy).unwrap();

    assert!(root.is_concrete(&registry));
    let dep = root.dependency("libelf").expect("declared dependency present");
    assert!(dep.is_concrete(&registry));
}

#[test]
fn concretize_is_idempotent() {
    let registry = registry_with_libdwarf();
    let compilers = AllCompilers;
    let policy = crate::policy::DefaultPolicy::new(Compiler::new("gcc"));
    let root = Spec::new("libdwarf");
    root.add_version_constraint(VersionRange::from_str(":2.0").unwrap());

    concretize(&root, &registry, &compilers, &policy).unwrap();
    let fingerprint_before = root.dependency_fingerprint();
    let versions_before = root.versions();

    concretize(&root, &registry, &compilers, &policy).unwrap();

    assert_eq!(root.dependency_fingerprint(), fingerprint_before);
    assert_eq!(root.versions(), versions_before);
}

#[test]
fn concretize_resolves_an_ambiguous_virtual_via_choose_provider() {
    let mpi_virtual = Spec::new("mpi");
    let registry = MapRegistry::new()
        .with_package(PackageDecl::new("callpath").with_dependency(mpi_virtual))
        .with_package(
            PackageDecl::new("mpich2").with_provides(ProvidesClause::unconditional(Spec::new("mpi"))),
        )
        .with_package(
            PackageDecl::new("openmpi").with_provides(ProvidesClause::unconditional(Spec::new("mpi"))),
        );
    let compilers = AllCompilers;
    let policy = crate::policy::DefaultPolicy::new(Compiler::new("gcc"));
    let root = Spec::new("callpath");

    concretize(&root, &registry, &compilers, &policy).unwrap();

    assert!(root.dependency("mpi").is_none());
    assert!(root.dependencies().values().any(|d| d.is_concrete(&registry)));
}

#[rstest]
#[case("debug")]
#[case("shared")]
#[case("mpi_compat")]
fn concretize_fills_any_unset_variant_name_as_disabled(#[case] variant_name: &str) {
    let registry =
        MapRegistry::new().with_package(PackageDecl::new("libdwarf").with_variant(variant_name));
    let compilers = AllCompilers;
    let policy = crate::policy::DefaultPolicy::new(Compiler::new("gcc"));
    let root = Spec::new("libdwarf");
    root.add_version_constraint(VersionRange::point("2.0".parse().unwrap()));

    concretize(&root, &registry, &compilers, &policy).unwrap();

    let filled = root.variants().get(variant_name).cloned().expect("default-filled");
    assert!(!filled.enabled());
}
