//! Canonical `$`-directive formatting for a spec node (§4.8), the
//! whole-DAG canonical string it's built from, and the colorized/tree
//! views the CLI renders.

use itertools::Itertools;

use stratum_foundation::format::{Segment, colorize};

use crate::spec::Spec;
use crate::traversal::{Cover, KeyBy, TraversalOptions};

/// Interpret a printf-like template of single-char directives against a
/// single spec node (not its dependencies) — the directive table from
/// §4.8: `$_`, `$@`, `$%`, `$%@`, `$+`, `$=`, `$#`, `$$`.
pub fn format(spec: &Spec, template: &str) -> String {
    let mut out = String::new();
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('_') => out.push_str(&spec.name()),
            Some('@') => {
                let versions = spec.versions();
                if !versions.is_any() {
                    out.push('@');
                    out.push_str(&versions.to_string());
                }
            }
            Some('%') if chars.peek() == Some(&'@') => {
                chars.next();
                if let Some(compiler) = spec.compiler() {
                    out.push_str(compiler.name());
                    if !compiler.versions().is_any() {
                        out.push('@');
                        out.push_str(&compiler.versions().to_string());
                    }
                }
            }
            Some('%') => {
                if let Some(compiler) = spec.compiler() {
                    out.push('%');
                    out.push_str(compiler.name());
                }
            }
            Some('+') => out.push_str(&spec.variants().to_string()),
            Some('=') => {
                if let Some(arch) = spec.architecture() {
                    out.push('=');
                    out.push_str(&arch);
                }
            }
            Some('#') => {
                out.push('-');
                out.push_str(&spec.dependency_fingerprint());
            }
            Some('$') => out.push('$'),
            Some(other) => {
                out.push('$');
                out.push(other);
            }
            None => out.push('$'),
        }
    }
    out
}

/// A single node's canonical directive set, `$_$@$+$=`, with no compiler
/// or fingerprint — the piece the whole-DAG canonical string and the
/// dependency fingerprint are both built from.
fn node(spec: &Spec) -> String {
    format(spec, "$_$@$+$=")
}

/// The canonical whole-DAG string (§4.8): the root's node form, followed
/// by every transitive dependency — flat, not nested, one per name — in
/// sorted-name order, each prefixed with `^`.
pub fn canonical(spec: &Spec) -> String {
    let opts = TraversalOptions {
        cover: Cover::Nodes,
        key_by: KeyBy::Name,
        include_root: false,
    };
    let mut deps: Vec<Spec> = spec.traverse(&opts).into_iter().map(|(_, s)| s).collect();
    deps.sort_by_key(|d| d.name());
    let mut out = node(spec);
    for dep in deps {
        out.push('^');
        out.push_str(&node(&dep));
    }
    out
}

/// The canonical string of this node's own *direct* dependency edges
/// (name → dependency's node form), sorted by name — the input the
/// dependency-map SHA-1 fingerprint is computed over (§3).
pub fn dependency_edges_canonical(spec: &Spec) -> String {
    spec.dependencies()
        .into_iter()
        .sorted_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(name, dep)| format!("{name}:{}", node(&dep)))
        .join(",")
}

/// The `colored`-highlighted form of [`canonical`], used by the CLI.
pub fn colorized(spec: &Spec) -> String {
    let mut out = colorize(Segment::Name, &spec.name()).to_string();
    let versions = spec.versions();
    if !versions.is_any() {
        out.push_str(&colorize(Segment::Version, &format!("@{versions}")).to_string());
    }
    for variant in spec.variants().iter() {
        let segment = if variant.enabled() {
            Segment::VariantEnabled
        } else {
            Segment::VariantDisabled
        };
        out.push_str(&colorize(segment, &variant.to_string()).to_string());
    }
    if let Some(arch) = spec.architecture() {
        out.push_str(&colorize(Segment::Architecture, &format!("={arch}")).to_string());
    }
    if let Some(compiler) = spec.compiler() {
        out.push_str(&colorize(Segment::Compiler, &format!("%{compiler}")).to_string());
    }
    let mut dep_names: Vec<String> = spec.dependencies().into_keys().collect();
    dep_names.sort();
    for name in dep_names {
        let dep = spec.dependency(&name).expect("just listed as a key");
        out.push_str(&colorize(Segment::Dependency, &format!(" ^{}", colorized(&dep))).to_string());
    }
    out
}

/// An indented multi-line tree view, one line per DAG node in preorder,
/// grounded on `find`'s grouped-header convention from §6.
pub fn tree(spec: &Spec) -> String {
    let opts = TraversalOptions {
        cover: Cover::Nodes,
        key_by: KeyBy::Name,
        include_root: true,
    };
    spec.traverse(&opts)
        .into_iter()
        .map(|(depth, item)| format!("{}{}", "    ".repeat(depth), node(&item)))
        .join("\n")
}

#[cfg(test)]
#[path = "./format_test.rs"]
mod format_test;
