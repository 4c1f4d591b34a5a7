//! Named, boolean, compile-time options (§3, §4.1, §4.3).
//!
//! A [`Variant`] is `(name, enabled)`. A [`VariantMap`] is keyed by name; a
//! name absent from the map is *unset*, which is distinct from disabled —
//! unset variants are only resolved to a concrete polarity during
//! concretization (by the package's declared defaults), not by `constrain`.

use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;
use stratum_error::{ConstraintKind, Error};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Polarity {
    Enabled,
    Disabled,
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Polarity::Enabled => "+",
            Polarity::Disabled => "~",
        })
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Variant {
    name: String,
    enabled: Polarity,
}

impl Variant {
    pub fn new(name: impl Into<String>, enabled: Polarity) -> Self {
        Variant {
            name: name.into(),
            enabled,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn enabled(&self) -> bool {
        matches!(self.enabled, Polarity::Enabled)
    }

    pub fn polarity(&self) -> Polarity {
        self.enabled
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.enabled, self.name)
    }
}

/// Keyed by variant name; printed in sorted-name order (`foo+a+b~c`, §4.8).
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct VariantMap {
    variants: BTreeMap<String, Variant>,
}

impl VariantMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Variant> {
        self.variants.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variants.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variant> {
        self.variants.values()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Add a new variant. Called by the parser; errors if `name` was
    /// already specified in this same spec.
    pub fn add(&mut self, variant: Variant) -> Result<(), Error> {
        if self.variants.contains_key(&variant.name) {
            return Err(Error::DuplicateVariant(variant.name));
        }
        self.variants.insert(variant.name.clone(), variant);
        Ok(())
    }

    /// Subset match: `self` must have set every variant `other` names, and
    /// agree on its polarity. A name `other` doesn't mention is not checked
    /// at all; a name `other` mentions but `self` has no opinion on fails,
    /// since `self` hasn't committed to it.
    pub fn satisfies(&self, other: &VariantMap) -> bool {
        other
            .variants
            .keys()
            .all(|name| match self.variants.get(name) {
                Some(v) => other.variants[name].enabled() == v.enabled(),
                None => false,
            })
    }

    /// Merge `other` into `self`. Variants named only in `other` are added;
    /// variants named in both must already agree or this raises
    /// [`Error::Unsatisfiable`] (kind `Variant`).
    pub fn constrain(&mut self, other: &VariantMap) -> Result<(), Error> {
        for (name, v) in &other.variants {
            match self.variants.get(name) {
                Some(existing) if existing.enabled() != v.enabled() => {
                    return Err(Error::unsatisfiable(existing, v, ConstraintKind::Variant));
                }
                Some(_) => {}
                None => {
                    self.variants.insert(name.clone(), v.clone());
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for VariantMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.variants.values().join(""))
    }
}

#[cfg(test)]
#[path = "./variant_test.rs"]
mod variant_test;
