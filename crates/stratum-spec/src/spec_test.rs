use std::str::FromStr;

use rstest::rstest;
use stratum_foundation::{Compiler, Polarity, Variant, VersionList, VersionRange};

use crate::registry::{PackageDecl, ProvidesClause};
use crate::testutil::MapRegistry;

use super::*;

fn mpi() -> Spec {
    Spec::new("mpi")
}

#[test]
fn satisfies_is_reflexive() {
    let registry = MapRegistry::new().with_package(PackageDecl::new("mpi"));
    let spec = mpi();
    spec.add_version_constraint(VersionRange::point("1.2".parse().unwrap()));
    assert!(spec.satisfies(&spec, &registry));
}

#[test]
fn satisfies_false_on_name_mismatch() {
    let registry = MapRegistry::new();
    assert!(!Spec::new("mpi").satisfies(&Spec::new("openmpi"), &registry));
}

#[test]
fn satisfies_treats_absent_fields_as_unconstrained() {
    let registry = MapRegistry::new();
    let concrete = mpi();
    concrete.add_version_constraint(VersionRange::point("1.2".parse().unwrap()));
    let unconstrained = mpi();
    assert!(concrete.satisfies(&unconstrained, &registry));
}

#[test]
fn satisfies_only_checks_dependency_names_common_to_both_sides() {
    let registry = MapRegistry::new()
        .with_package(PackageDecl::new("mpi"))
        .with_package(PackageDecl::new("boost"));
    let narrow = mpi();
    let wide = mpi();
    wide.add_dependency(Spec::new("boost")).unwrap();
    // `narrow` has no opinion on "boost" at all, so it doesn't fail to
    // satisfy a requirement that merely adds a name `narrow` is silent on
    // (`spec.py`'s `satisfies_dependencies` only loops the intersection of
    // the two dependency maps, `common_dependencies(other)`).
    assert!(narrow.satisfies(&wide, &registry));
}

#[test]
fn satisfies_cross_checks_virtual_providers_across_non_overlapping_dependency_names() {
    let registry = MapRegistry::new()
        .with_package(PackageDecl::new("app"))
        .with_package(
            PackageDecl::new("mpich2").with_provides(ProvidesClause::unconditional(Spec::new("mpi"))),
        )
        .with_package(
            PackageDecl::new("openmpi").with_provides(ProvidesClause::unconditional(Spec::new("mpi"))),
        );

    let via_mpich2 = Spec::new("app");
    via_mpich2.add_dependency(Spec::new("mpich2")).unwrap();

    let via_openmpi = Spec::new("app");
    via_openmpi.add_dependency(Spec::new("openmpi")).unwrap();

    // Neither side shares a dependency *name* with the other ("mpich2" vs.
    // "openmpi"), so the by-name loop alone would pass both ways; the
    // provider cross-check (§4.5) must still catch that they satisfy the
    // "mpi" virtual via two different, non-overlapping providers.
    assert!(!via_mpich2.satisfies(&via_openmpi, &registry));
    assert!(!via_openmpi.satisfies(&via_mpich2, &registry));
}

#[test]
fn constrain_conflicting_versions_is_unsatisfiable() {
    let registry = MapRegistry::new();
    let a = mpi();
    a.set_versions(":1.1".parse::<VersionList>().unwrap());
    let b = mpi();
    b.set_versions("2.1:".parse::<VersionList>().unwrap());
    let err = a.constrain(&b, &registry).unwrap_err();
    assert_eq!(err.constraint_type(), Some(stratum_error::ConstraintKind::Version));
}

#[test]
fn constrain_merges_variants_and_rejects_conflicting_polarity() {
    let registry = MapRegistry::new();
    let a = mpi();
    a.add_variant(Variant::new("debug", Polarity::Enabled)).unwrap();
    let b = mpi();
    b.add_variant(Variant::new("shared", Polarity::Disabled)).unwrap();
    a.constrain(&b, &registry).unwrap();
    assert!(a.variants().contains("debug"));
    assert!(a.variants().contains("shared"));

    let c = mpi();
    c.add_variant(Variant::new("debug", Polarity::Disabled)).unwrap();
    let err = a.constrain(&c, &registry).unwrap_err();
    assert_eq!(err.constraint_type(), Some(stratum_error::ConstraintKind::Variant));
}

#[test]
fn constrain_keeps_extra_deps_and_recurses_without_redescending() {
    let registry = MapRegistry::new();
    let a = Spec::new("callpath");
    let a_mpi = mpi();
    a_mpi.add_version_constraint(VersionRange::from_str(":2.0").unwrap());
    a.add_dependency(a_mpi).unwrap();

    let b = Spec::new("callpath");
    let b_mpi = mpi();
    b_mpi.add_version_constraint(VersionRange::from_str("1.0:").unwrap());
    b.add_dependency(b_mpi).unwrap();
    let extra = Spec::new("boost");
    b.add_dependency(extra).unwrap();

    a.constrain(&b, &registry).unwrap();
    assert!(a.dependency("boost").is_some());
    let merged_mpi = a.dependency("mpi").unwrap();
    assert!(!merged_mpi.versions().concrete());
}

#[test]
fn copy_deep_duplicates_diamond_once() {
    let shared = Spec::new("zlib");
    let root = Spec::new("app");
    let left = Spec::new("left");
    let right = Spec::new("right");
    left.add_dependency(shared.clone()).unwrap();
    right.add_dependency(shared).unwrap();
    root.add_dependency(left).unwrap();
    root.add_dependency(right).unwrap();

    let clone = root.copy(true);
    let clone_left_zlib = clone.dependency("left").unwrap().dependency("zlib").unwrap();
    let clone_right_zlib = clone.dependency("right").unwrap().dependency("zlib").unwrap();
    assert_eq!(clone_left_zlib, clone_right_zlib);
    assert_ne!(clone_left_zlib, root.dependency("left").unwrap().dependency("zlib").unwrap());
}

#[test]
fn copy_shallow_drops_dependencies() {
    let root = Spec::new("app");
    root.add_dependency(Spec::new("dep")).unwrap();
    let shallow = root.copy(false);
    assert!(shallow.dependencies().is_empty());
}

#[test]
fn is_concrete_requires_every_field_and_all_deps() {
    let registry = MapRegistry::new().with_package(PackageDecl::new("zlib"));
    let spec = Spec::new("zlib");
    assert!(!spec.is_concrete(&registry));

    spec.set_versions(VersionList::single("1.2.11".parse().unwrap()));
    spec.set_compiler(Compiler::with_versions("gcc", VersionList::single("11.2".parse().unwrap())))
        .unwrap();
    spec.set_architecture("linux-x86_64").unwrap();
    assert!(spec.is_concrete(&registry));

    let with_dep = Spec::new("zlib");
    with_dep.set_versions(VersionList::single("1.2.11".parse().unwrap()));
    with_dep
        .set_compiler(Compiler::with_versions("gcc", VersionList::single("11.2".parse().unwrap())))
        .unwrap();
    with_dep.set_architecture("linux-x86_64").unwrap();
    with_dep.add_dependency(Spec::new("bz2")).unwrap();
    assert!(!with_dep.is_concrete(&registry), "a non-concrete dep makes the parent non-concrete");
}

#[test]
fn dependency_fingerprint_is_stable_for_equal_edge_sets() {
    let a = Spec::new("callpath");
    a.add_dependency(Spec::new("mpi")).unwrap();
    a.add_dependency(Spec::new("boost")).unwrap();

    let b = Spec::new("callpath");
    // added in the opposite order -- the fingerprint is over the sorted
    // edge list, so order of insertion must not matter.
    b.add_dependency(Spec::new("boost")).unwrap();
    b.add_dependency(Spec::new("mpi")).unwrap();

    assert_eq!(a.dependency_fingerprint(), b.dependency_fingerprint());
    assert_eq!(a.dependency_fingerprint().len(), 6);
}

fn conflicting_names() -> (Spec, Spec) {
    (mpi(), Spec::new("openmpi"))
}

fn conflicting_versions() -> (Spec, Spec) {
    let a = mpi();
    a.set_versions(":1.1".parse::<VersionList>().unwrap());
    let b = mpi();
    b.set_versions("2.1:".parse::<VersionList>().unwrap());
    (a, b)
}

fn conflicting_variants() -> (Spec, Spec) {
    let a = mpi();
    a.add_variant(Variant::new("debug", Polarity::Enabled)).unwrap();
    let b = mpi();
    b.add_variant(Variant::new("debug", Polarity::Disabled)).unwrap();
    (a, b)
}

fn conflicting_compilers() -> (Spec, Spec) {
    let a = mpi();
    a.set_compiler(Compiler::new("gcc")).unwrap();
    let b = mpi();
    b.set_compiler(Compiler::new("intel")).unwrap();
    (a, b)
}

fn conflicting_architectures() -> (Spec, Spec) {
    let a = mpi();
    a.set_architecture("linux-x86_64").unwrap();
    let b = mpi();
    b.set_architecture("linux-ppc64le").unwrap();
    (a, b)
}

#[rstest]
#[case::name(conflicting_names(), stratum_error::ConstraintKind::Name)]
#[case::version(conflicting_versions(), stratum_error::ConstraintKind::Version)]
#[case::variant(conflicting_variants(), stratum_error::ConstraintKind::Variant)]
#[case::compiler(conflicting_compilers(), stratum_error::ConstraintKind::Compiler)]
#[case::architecture(conflicting_architectures(), stratum_error::ConstraintKind::Architecture)]
fn constrain_reports_the_right_constraint_kind(
    #[case] pair: (Spec, Spec),
    #[case] expected: stratum_error::ConstraintKind,
) {
    let registry = MapRegistry::new();
    let (a, b) = pair;
    let err = a.constrain(&b, &registry).unwrap_err();
    assert_eq!(err.constraint_type(), Some(expected));
}
