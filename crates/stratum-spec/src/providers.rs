//! Maps virtual package names to the real packages that provide them
//! (§4.5). Built from a set of candidate specs and each candidate's
//! declared `provides(virtual_spec, when=condition)` clauses.

use std::collections::BTreeMap;

use crate::registry::PackageRegistry;
use crate::spec::Spec;

struct Entry {
    /// The virtual capability as declared (possibly restricted to the
    /// candidate's own current version range).
    provided: Spec,
    candidate: Spec,
}

/// An index from virtual package name to the candidates that can satisfy
/// it, built once per normalization/concretization pass and then queried
/// repeatedly.
#[derive(Default)]
pub struct ProviderIndex {
    by_virtual_name: BTreeMap<String, Vec<Entry>>,
}

impl ProviderIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from a set of candidate specs, restricting each
    /// provided range to the candidate's own current versions when
    /// `restrict` is set (the candidate only offers what it can actually
    /// be at the versions under consideration).
    pub fn build(candidates: &[Spec], registry: &dyn PackageRegistry, restrict: bool) -> Self {
        let mut index = ProviderIndex::new();
        for candidate in candidates {
            if candidate.is_virtual(registry) {
                continue;
            }
            index.update(candidate, registry, restrict);
        }
        index
    }

    /// Add a single candidate's provides clauses to the index in place —
    /// used by normalization to register a freshly-encountered real
    /// dependency without rebuilding the whole index.
    pub fn update(&mut self, candidate: &Spec, registry: &dyn PackageRegistry, restrict: bool) {
        let Ok(decl) = registry.get(&candidate.name()) else {
            return;
        };
        for clause in &decl.provides {
            if let Some(when) = &clause.when {
                if !candidate.satisfies_opts(when, false, registry) {
                    continue;
                }
            }
            let provided = clause.virtual_spec.copy(false);
            if restrict {
                let mut versions = provided.versions();
                if versions.intersect(&candidate.versions()).is_err() {
                    // the candidate's own version constraint rules out the
                    // range it would otherwise provide at; it simply isn't
                    // a provider under these constraints.
                    continue;
                }
                provided.set_versions(versions);
            }
            self.by_virtual_name
                .entry(provided.name())
                .or_default()
                .push(Entry {
                    provided,
                    candidate: candidate.clone(),
                });
        }
    }

    /// Candidates whose declared capability overlaps what `vpkg` requires.
    pub fn providers_for(&self, vpkg: &Spec) -> Vec<Spec> {
        let Some(entries) = self.by_virtual_name.get(&vpkg.name()) else {
            return Vec::new();
        };
        entries
            .iter()
            .filter(|entry| entry.provided.versions().overlaps(&vpkg.versions()))
            .map(|entry| entry.candidate.clone())
            .collect()
    }

    /// Same as [`Self::providers_for`] but looked up by virtual name alone,
    /// with an unconstrained request (used when checking "does anything in
    /// this index provide this name at all").
    pub fn providers_for_name(&self, name: &str) -> Vec<Spec> {
        self.by_virtual_name
            .get(name)
            .map(|entries| entries.iter().map(|e| e.candidate.clone()).collect())
            .unwrap_or_default()
    }

    /// `self.satisfies(other)` for provider indexes (§4.5): for every
    /// virtual name both indexes know about, their provider sets must
    /// overlap (at least one common real package could satisfy either).
    pub fn satisfies(&self, other: &ProviderIndex) -> bool {
        self.by_virtual_name.keys().all(|name| {
            let Some(other_entries) = other.by_virtual_name.get(name) else {
                return true;
            };
            let mine = &self.by_virtual_name[name];
            mine.iter().any(|m| {
                other_entries
                    .iter()
                    .any(|o| m.candidate.name() == o.candidate.name())
            })
        })
    }
}

#[cfg(test)]
#[path = "./providers_test.rs"]
mod providers_test;
