//! A single configurable DAG traversal, parameterized by cover mode,
//! identity key, depth tracking, and root inclusion (§4.4). Children are
//! always visited in sorted-name order so traversal order is deterministic
//! and matches the canonical string's dependency ordering.

use std::collections::HashSet;
use std::rc::Rc;

use crate::spec::Spec;

/// How thoroughly to cover a DAG that may revisit the same node along
/// multiple paths.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Cover {
    /// Visit each distinct node (by key) exactly once.
    Nodes,
    /// Yield a node again if reached by a new path, but don't descend into
    /// it a second time.
    Edges,
    /// Explore every path from the root, re-descending into nodes already
    /// visited. Does not terminate on a cyclic DAG — cycle-freeness is the
    /// caller's precondition, not something this mode checks.
    Paths,
}

/// The identity function used to decide whether two visits are "the same
/// node". `Identity` (pointer identity) is the default; `Name` is what
/// DAG-comparison operations use instead.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyBy {
    Identity,
    Name,
}

#[derive(Clone, Debug)]
pub struct TraversalOptions {
    pub cover: Cover,
    pub key_by: KeyBy,
    pub include_root: bool,
}

impl Default for TraversalOptions {
    fn default() -> Self {
        TraversalOptions {
            cover: Cover::Nodes,
            key_by: KeyBy::Identity,
            include_root: true,
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash)]
enum Key {
    Ptr(usize),
    Name(String),
}

fn key_of(spec: &Spec, key_by: KeyBy) -> Key {
    match key_by {
        KeyBy::Identity => Key::Ptr(Rc::as_ptr(&spec.inner_rc()) as usize),
        KeyBy::Name => Key::Name(spec.name()),
    }
}

impl Spec {
    /// Preorder traversal yielding `(depth, node)` pairs.
    pub fn traverse(&self, opts: &TraversalOptions) -> Vec<(usize, Spec)> {
        let mut visited = HashSet::new();
        let mut out = Vec::new();
        self.traverse_helper(0, opts, &mut visited, &mut out);
        out
    }

    fn traverse_helper(
        &self,
        depth: usize,
        opts: &TraversalOptions,
        visited: &mut HashSet<Key>,
        out: &mut Vec<(usize, Spec)>,
    ) {
        let key = key_of(self, opts.key_by);
        let should_yield = opts.include_root || depth > 0;

        if visited.contains(&key) {
            match opts.cover {
                Cover::Nodes => return,
                Cover::Edges => {
                    if should_yield {
                        out.push((depth, self.clone()));
                    }
                    return;
                }
                Cover::Paths => {
                    if should_yield {
                        out.push((depth, self.clone()));
                    }
                }
            }
        } else if should_yield {
            out.push((depth, self.clone()));
        }

        visited.insert(key);
        let deps = self.dependencies();
        for name in deps.keys() {
            deps[name].traverse_helper(depth + 1, opts, visited, out);
        }
    }
}

#[cfg(test)]
#[path = "./traversal_test.rs"]
mod traversal_test;
