//! Normalization (§4.6): expand a partial, user-typed spec into a complete
//! DAG matching package declarations, with virtuals resolved to providers.

use std::collections::{BTreeMap, HashSet};

use stratum_error::{ConstraintKind, Error, Result};
use stratum_spec::{PackageRegistry, ProviderIndex, Spec};

/// Non-destructive normalization: clone `spec` (deep) and normalize the
/// clone, leaving `spec` untouched.
///
/// This is the non-self-mutating `normalized()` spec.md's source material
/// seems to call on itself (§9's first open question) — here it simply
/// clones first.
pub fn normalized(spec: &Spec, registry: &dyn PackageRegistry) -> Result<Spec> {
    let clone = spec.copy(true);
    normalize(&clone, registry)?;
    Ok(clone)
}

/// In-place normalization (§4.6). On success, `root` is a DAG in which
/// every name appears exactly once, every declared dependency of every
/// reachable package is present, and every virtual has either been
/// replaced by a provider or left as a deliberately unresolved node for
/// concretize's later fixed-point expansion.
pub fn normalize(root: &Spec, registry: &dyn PackageRegistry) -> Result<()> {
    if !registry.exists(&root.name()) {
        return Err(Error::UnknownPackage(root.name()));
    }

    let mut flat: BTreeMap<String, Spec> = BTreeMap::new();
    flatten(root, &mut flat, registry)?;

    root.clear_dependencies();

    let candidates: Vec<Spec> = flat.values().cloned().collect();
    let mut index = ProviderIndex::build(&candidates, registry, true);

    let mut visited: HashSet<String> = HashSet::new();
    let mut in_progress: HashSet<String> = HashSet::new();
    let mut touched: HashSet<String> = HashSet::new();
    normalize_helper(root, &mut flat, &mut index, &mut visited, &mut in_progress, &mut touched, registry)?;

    for name in flat.keys() {
        if name != &root.name() && !touched.contains(name) {
            return Err(Error::InvalidDependency(root.name(), name.clone()));
        }
    }
    Ok(())
}

/// Preorder-walk the parsed (unnormalized) DAG, cloning each distinctly
/// named node into `flat` without its dependencies, or `constrain`-ing an
/// already-flattened entry of the same name. A failure here means the
/// parsed DAG itself carried conflicting constraints on one name, which
/// should be unreachable from user input.
fn flatten(node: &Spec, flat: &mut BTreeMap<String, Spec>, registry: &dyn PackageRegistry) -> Result<()> {
    let name = node.name();
    match flat.get(&name) {
        None => {
            flat.insert(name, node.copy(false));
        }
        Some(existing) => {
            existing
                .constrain_opts(node, false, registry)
                .map_err(|err| Error::InconsistentSpec(name, err.to_string()))?;
        }
    }
    for dep in node.dependencies().values() {
        flatten(dep, flat, registry)?;
    }
    Ok(())
}

/// The recursive descent through *declared* package dependencies
/// (`_normalize_helper`), pulling in whatever constraints the user placed
/// on each name via `flat`, resolving virtuals to providers, and attaching
/// the merged result as a direct dependency of `current`.
fn normalize_helper(
    current: &Spec,
    flat: &mut BTreeMap<String, Spec>,
    index: &mut ProviderIndex,
    visited: &mut HashSet<String>,
    in_progress: &mut HashSet<String>,
    touched: &mut HashSet<String>,
    registry: &dyn PackageRegistry,
) -> Result<()> {
    let current_name = current.name();
    if visited.contains(&current_name) {
        return Ok(());
    }
    if in_progress.contains(&current_name) {
        // Cycle-freeness is normalize's precondition (§5, §9); this check
        // only fires in debug builds so production normalize keeps the
        // cost of the precondition, not the cost of verifying it.
        if cfg!(debug_assertions) {
            return Err(Error::InconsistentSpec(
                current_name,
                "cycle detected during normalize".to_string(),
            ));
        }
        return Ok(());
    }
    in_progress.insert(current_name.clone());

    let decl = registry.get(&current_name)?;
    for (dep_name, declared_dep) in &decl.dependencies {
        let mut pkg_dep = declared_dep.copy(false);
        let declared_concrete = registry.exists(dep_name);

        if !declared_concrete {
            match resolve_virtual(dep_name, &pkg_dep, flat, index, registry)? {
                Some(provider) => pkg_dep = provider,
                None => {
                    // Left unresolved for concretize's stage 2: still wired
                    // in as a dependency edge so the virtual node is
                    // reachable, just not recursed into (registry has no
                    // declaration for a virtual name).
                    let unresolved = flat.get(dep_name).expect("resolve_virtual inserted it").clone();
                    touched.insert(unresolved.name());
                    current.replace_dependency(unresolved);
                    continue;
                }
            }
        }

        let merged = flat.entry(pkg_dep.name()).or_insert_with(|| pkg_dep.copy(false));
        merged.constrain_opts(&pkg_dep, false, registry)?;
        let merged = merged.clone();

        // Splicing happens against the canonical `flat` node, not the raw
        // declared dep, and only after the merge above — an earlier
        // sibling branch may already have wired a still-virtual
        // placeholder in as *its* dependency edge, and the rewrite below
        // needs the same shared node every other edge to this package will
        // end up pointing at.
        if declared_concrete {
            splice_concrete_over_virtuals(&merged, flat, visited, touched, registry)?;
        }

        touched.insert(merged.name());
        current.replace_dependency(merged.clone());
        index.update(&merged, registry, true);
        normalize_helper(&merged, flat, index, visited, in_progress, touched, registry)?;
    }

    in_progress.remove(&current_name);
    visited.insert(current_name);
    Ok(())
}

/// Resolve a declared virtual dependency to its unique provider, if one is
/// determined at this stage. Returns `Ok(None)` when the virtual is left
/// unresolved (no providers yet, no conflicting prior constraint) for
/// concretize's `_expand_virtual_packages` fixed-point loop to pick up.
fn resolve_virtual(
    dep_name: &str,
    pkg_dep: &Spec,
    flat: &mut BTreeMap<String, Spec>,
    index: &ProviderIndex,
    registry: &dyn PackageRegistry,
) -> Result<Option<Spec>> {
    let providers = index.providers_for(pkg_dep);
    match providers.len() {
        0 => {
            if let Some(existing) = flat.get(dep_name) {
                if existing.is_virtual(registry) {
                    existing.constrain_opts(pkg_dep, false, registry).map_err(|_| {
                        Error::unsatisfiable(existing.to_string(), pkg_dep.to_string(), ConstraintKind::Provider)
                    })?;
                } else {
                    // already resolved to a concrete provider elsewhere
                    return Ok(Some(existing.clone()));
                }
            } else {
                flat.insert(dep_name.to_string(), pkg_dep.copy(false));
            }
            Ok(None)
        }
        1 => Ok(Some(providers.into_iter().next().expect("len == 1"))),
        _ => {
            let names = providers.iter().map(Spec::name).collect::<Vec<_>>().join(", ");
            Err(Error::MultipleProvider(dep_name.to_string(), names))
        }
    }
}

/// When a package's declared dependency names a concrete package outright,
/// splice it over any still-virtual placeholder already in `flat` that it
/// happens to provide, so normalize doesn't leave both a virtual node and
/// its concrete provider in the DAG at once.
///
/// A virtual left unresolved by an earlier-processed sibling branch may
/// already be wired in as *that* sibling's own dependency edge (via
/// `current.replace_dependency` in [`normalize_helper`]) by the time a
/// later sibling's concrete dependency turns out to provide it. Mirroring
/// `spec.py`'s `vspec._replace_with(pkg_dep)` — which works for free there
/// because every existing edge already points at the same mutable Python
/// object — every one of the virtual's current dependents has its edge
/// rewired onto `concrete_dep` here, not just dropped from the bookkeeping
/// sets, or the stale virtual node would survive as a live dependency edge
/// of that earlier sibling after `normalize` returns.
fn splice_concrete_over_virtuals(
    concrete_dep: &Spec,
    flat: &mut BTreeMap<String, Spec>,
    visited: &mut HashSet<String>,
    touched: &mut HashSet<String>,
    registry: &dyn PackageRegistry,
) -> Result<()> {
    let decl = registry.get(&concrete_dep.name())?;
    for clause in &decl.provides {
        let vname = clause.virtual_spec.name();
        let Some(existing_virtual) = flat.get(&vname).cloned() else {
            continue;
        };
        if !existing_virtual.is_virtual(registry) {
            continue;
        }
        if !concrete_dep.satisfies_opts(&existing_virtual, false, registry)
            && !existing_virtual.versions().overlaps(&concrete_dep.versions())
        {
            return Err(Error::unsatisfiable(
                concrete_dep.to_string(),
                existing_virtual.to_string(),
                ConstraintKind::Provider,
            ));
        }
        for dependent in existing_virtual.dependents() {
            dependent.replace_dependency(concrete_dep.clone());
        }
        flat.remove(&vname);
        visited.remove(&vname);
        touched.remove(&vname);
    }
    Ok(())
}

#[cfg(test)]
#[path = "./normalize_test.rs"]
mod normalize_test;
