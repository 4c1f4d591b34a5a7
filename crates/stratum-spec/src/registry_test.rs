use crate::spec::Spec;
use crate::testutil::MapRegistry;

use super::*;

#[test]
fn virtual_dependencies_excludes_known_packages() {
    let registry = MapRegistry::new().with_package(PackageDecl::new("mpi"));
    let decl = PackageDecl::new("callpath")
        .with_dependency(Spec::new("mpi"))
        .with_dependency(Spec::new("boost"));
    let virtuals = decl.virtual_dependencies(&registry);
    assert_eq!(virtuals.len(), 1);
    assert_eq!(virtuals[0].name(), "boost");
}

#[test]
fn builder_accumulates_provides_and_variants() {
    let decl = PackageDecl::new("mpich2")
        .with_provides(ProvidesClause::unconditional(Spec::new("mpi")))
        .with_variant("debug")
        .with_variant("shared");
    assert_eq!(decl.provides.len(), 1);
    assert_eq!(decl.variants, vec!["debug".to_string(), "shared".to_string()]);
}
