//! Dotted, component-wise comparable version identifiers (§3, §4.2).
//!
//! A [`Version`] is a sequence of components separated by `.`. Each
//! component is either purely numeric or purely alphabetic; components
//! compare numerically against numeric peers, lexicographically against
//! alphabetic peers, and a numeric component always sorts below an
//! alphabetic one at the same position (`2.0 < 2.a`). A version that is a
//! strict dotted prefix of another sorts below it (`1.2 < 1.2.1`), the same
//! rule Rust's own `Vec<T>: Ord` gives us for free once components are
//! ordered componentwise.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use stratum_error::{ConstraintKind, Error};

use crate::name::is_valid_version_id;

/// A single dot-separated piece of a [`Version`].
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
enum Component {
    Numeric(u64),
    Alpha(String),
}

impl PartialOrd for Component {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Component {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Component::Numeric(a), Component::Numeric(b)) => a.cmp(b),
            (Component::Alpha(a), Component::Alpha(b)) => a.cmp(b),
            // a numeric component always sorts below an alphabetic one
            (Component::Numeric(_), Component::Alpha(_)) => Ordering::Less,
            (Component::Alpha(_), Component::Numeric(_)) => Ordering::Greater,
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Numeric(n) => write!(f, "{n}"),
            Component::Alpha(s) => f.write_str(s),
        }
    }
}

/// A single point in version space, e.g. `1.2.3` or `2021a`.
///
/// Every `Version` is concrete by construction — there is no such thing as
/// an ambiguous `Version`; ambiguity lives in [`crate::VersionRange`] and
/// [`crate::VersionList`].
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Version {
    components: Vec<Component>,
}

impl Version {
    /// Parse a version id. Unlike [`FromStr::from_str`] this does not
    /// require the whole grammar-level id validity check, which is already
    /// performed by the caller (the parser) before this is invoked; it is
    /// exposed separately so `stratum-parser` can build a `Version` directly
    /// from an already-validated id slice.
    pub fn new(id: &str) -> Result<Self, Error> {
        if id.is_empty() || !is_valid_version_id(id) {
            return Err(Error::SpecParseError(format!("invalid version id: '{id}'")));
        }
        let components = id
            .split('.')
            .map(|part| {
                if part.is_empty() {
                    return Err(Error::SpecParseError(format!(
                        "invalid version id: '{id}' has an empty component"
                    )));
                }
                if part.bytes().all(|b| b.is_ascii_digit()) {
                    part.parse::<u64>()
                        .map(Component::Numeric)
                        .map_err(|_| Error::SpecParseError(format!("version component too large: '{part}'")))
                } else {
                    Ok(Component::Alpha(part.to_string()))
                }
            })
            .collect::<Result<Vec<_>, Error>>()?;
        Ok(Version { components })
    }

    /// Number of dot-separated components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// `self` is a strict dotted prefix of `other` (`1.2` is a prefix of `1.2.3`).
    pub fn is_prefix_of(&self, other: &Version) -> bool {
        self.components.len() < other.components.len()
            && self.components == other.components[..self.components.len()]
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::new(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for c in &self.components {
            if !first {
                f.write_str(".")?;
            }
            first = false;
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Version({self})")
    }
}

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Version::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Version {
    /// `Version.satisfies(other)`: equality (§4.2).
    pub fn satisfies(&self, other: &Version) -> bool {
        self == other
    }

    /// Raise [`Error::Unsatisfiable`] (kind `Version`) if `self != other`.
    pub fn constrain(&self, other: &Version) -> Result<(), Error> {
        if self.satisfies(other) {
            Ok(())
        } else {
            Err(Error::unsatisfiable(self, other, ConstraintKind::Version))
        }
    }
}

#[cfg(test)]
#[path = "./version_test.rs"]
mod version_test;
