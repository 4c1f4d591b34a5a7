use std::fs;

use stratum_spec::{CompilerRegistry, PackageRegistry};

use super::*;

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("write fixture file");
}

#[test]
fn loads_dependencies_variants_and_provides() {
    let dir = tempfile::tempdir().expect("tempdir");

    write(
        dir.path(),
        "compilers.yaml",
        "supported:\n  - gcc\n  - intel\n",
    );
    write(
        dir.path(),
        "mpich2.yaml",
        "name: mpich2\nvariants: [debug]\nprovides:\n  - virtual: \"mpi@:2.2\"\n    when: \"@1.2:\"\n",
    );
    write(
        dir.path(),
        "callpath.yaml",
        "name: callpath\ndependencies: [\"mpi\"]\n",
    );

    let repo = Repository::load(dir.path()).expect("load repository");

    assert!(repo.exists("mpich2"));
    assert!(repo.exists("callpath"));
    assert!(!repo.exists("mpi"));

    let mpich2 = repo.get("mpich2").expect("mpich2 present");
    assert_eq!(mpich2.variants, vec!["debug".to_string()]);
    assert_eq!(mpich2.provides.len(), 1);
    assert_eq!(mpich2.provides[0].virtual_spec.name(), "mpi");

    let callpath = repo.get("callpath").expect("callpath present");
    assert_eq!(callpath.dependencies.len(), 1);
    assert!(callpath.dependencies.contains_key("mpi"));
}

#[test]
fn unknown_package_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let repo = Repository::load(dir.path()).expect("load empty repository");
    assert!(repo.get("nonexistent").is_err());
}

#[test]
fn compiler_registry_only_lists_configured_names() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "compilers.yaml", "supported:\n  - gcc\n");
    let repo = Repository::load(dir.path()).expect("load repository");
    assert!(repo.supported("gcc"));
    assert!(!repo.supported("clang"));
}
