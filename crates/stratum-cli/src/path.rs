//! A stand-in for the `install_layout.path_for_spec(spec) -> filesystem
//! path` collaborator (§6): "deterministic function of the concrete spec
//! (typically incorporating name, version, compiler, arch, variant
//! string, and dep fingerprint)". The actual on-disk layout is explicitly
//! out of scope for the spec core; this is just enough of an
//! implementation for `stratum find -p` and `stratum install` to have
//! something concrete to print.

use std::path::PathBuf;

use stratum_spec::Spec;

pub fn path_for_spec(prefix: &std::path::Path, spec: &Spec) -> PathBuf {
    let arch = spec.architecture().unwrap_or_else(|| "unknown".to_string());
    let compiler = stratum_spec::format::format(spec, "$%@");
    let version = spec.versions().to_string();
    let variant_and_fingerprint = stratum_spec::format::format(spec, "$+$#");

    prefix
        .join(arch)
        .join(compiler)
        .join(spec.name())
        .join(version)
        .join(variant_and_fingerprint)
}
