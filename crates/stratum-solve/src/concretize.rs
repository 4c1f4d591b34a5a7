//! Concretization (§4.7): `normalize` → expand remaining virtuals to a
//! fixed point → a post-order walk that pins version, compiler, and
//! architecture on every node, consulting a [`ConcretizationPolicy`].

use std::collections::BTreeMap;

use stratum_error::Result;
use stratum_spec::{CompilerRegistry, PackageRegistry, Spec};

use crate::normalize::normalize;
use crate::policy::ConcretizationPolicy;

/// Run `normalize`, then `_expand_virtual_packages` to a fixed point, then
/// the post-order pinning walk (§4.7). On success, `root.is_concrete()` is
/// `true`. Idempotent: calling this again on an already-concrete spec makes
/// no further field changes and returns the same fingerprint, since every
/// stage either no-ops on an already-resolved node or re-derives the same
/// pinned value from a now-single-point constraint.
pub fn concretize(
    root: &Spec,
    registry: &dyn PackageRegistry,
    compilers: &dyn CompilerRegistry,
    policy: &dyn ConcretizationPolicy,
) -> Result<()> {
    normalize(root, registry)?;
    expand_virtual_packages(root, registry, policy)?;

    let mut presets: BTreeMap<String, Spec> = BTreeMap::new();
    concretize_helper(root, registry, compilers, policy, &mut presets)?;
    Ok(())
}

/// Stage 2 (§4.7): any virtual node still present after `normalize` is
/// replaced by `policy.choose_provider`, then the DAG is re-normalized
/// (the newly spliced-in concrete package may pull in its own real
/// dependencies). Looped to a fixed point since resolving one virtual can
/// surface another.
fn expand_virtual_packages(
    root: &Spec,
    registry: &dyn PackageRegistry,
    policy: &dyn ConcretizationPolicy,
) -> Result<()> {
    loop {
        let virtuals: Vec<Spec> = root
            .traverse(&stratum_spec::TraversalOptions {
                cover: stratum_spec::Cover::Nodes,
                key_by: stratum_spec::KeyBy::Name,
                include_root: true,
            })
            .into_iter()
            .map(|(_, node)| node)
            .filter(|node| node.is_virtual(registry))
            .collect();

        if virtuals.is_empty() {
            return Ok(());
        }

        for vpkg in &virtuals {
            let candidates = registry.providers_for(vpkg);
            let provider = policy.choose_provider(vpkg, &candidates)?;
            for dependent in vpkg.dependents() {
                dependent.replace_dependency(provider.copy(false));
            }
        }

        normalize(root, registry)?;
    }
}

/// Stage 3 (§4.7), `_concretize_helper`: post-order walk. On each
/// non-virtual node not already pinned in `presets`, run
/// `concretize_architecture`, `concretize_compiler`, `concretize_version`
/// in that order, then record it. A name already in `presets` is
/// constrained to the earlier choice instead of re-deriving one, so a
/// dependency visited through two different paths converges on a single
/// pinned value and a child's choice is inherited by every later ancestor
/// that shares the name.
///
/// Virtuals are inserted into `presets` too (so a later encounter doesn't
/// re-attempt resolution) but never have `concretize_*` invoked on them —
/// their concrete substitution already happened in stage 2. This
/// intentionally mirrors spec.md §9's noted two-stage shape.
fn concretize_helper(
    node: &Spec,
    registry: &dyn PackageRegistry,
    compilers: &dyn CompilerRegistry,
    policy: &dyn ConcretizationPolicy,
    presets: &mut BTreeMap<String, Spec>,
) -> Result<()> {
    for dep in node.dependencies().values() {
        concretize_helper(dep, registry, compilers, policy, presets)?;
    }

    let name = node.name();
    if let Some(pinned) = presets.get(&name) {
        node.constrain_opts(pinned, false, registry)?;
        return Ok(());
    }

    if node.is_virtual(registry) {
        presets.insert(name, node.clone());
        return Ok(());
    }

    if node.architecture().is_none() {
        let arch = policy.concretize_architecture(node)?;
        node.force_architecture(arch);
    }
    if node.compiler().as_ref().is_none_or(|c| !c.concrete()) {
        let compiler = policy.concretize_compiler(node, compilers)?;
        node.force_compiler(compiler);
    }
    if !node.versions().concrete() {
        let version = policy.concretize_version(node, registry)?;
        node.set_versions(stratum_foundation::VersionList::single(version));
    }

    fill_default_variants(node, registry)?;

    presets.insert(name, node.clone());
    Ok(())
}

/// A variant name the package declares but the spec left unset becomes
/// disabled once concretized against the package (§3).
fn fill_default_variants(node: &Spec, registry: &dyn PackageRegistry) -> Result<()> {
    let decl = registry.get(&node.name())?;
    let variants = node.variants();
    for name in &decl.variants {
        if !variants.contains(name) {
            node.add_variant(stratum_foundation::Variant::new(
                name.clone(),
                stratum_foundation::Polarity::Disabled,
            ))?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "./concretize_test.rs"]
mod concretize_test;
