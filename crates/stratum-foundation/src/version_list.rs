//! An ordered, non-overlapping union of [`Version`]s and [`VersionRange`]s
//! (§3, §4.2). `VersionList::any()` is the empty constraint, written `:`.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use stratum_error::{ConstraintKind, Error};

use crate::version::Version;
use crate::version_range::VersionRange;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum VersionList {
    /// No constraint at all — matches every version. This is what an
    /// omitted `@version-list` defaults to.
    Any,
    /// A sorted, pairwise-disjoint, non-empty set of ranges.
    Ranges(Vec<VersionRange>),
}

impl Default for VersionList {
    fn default() -> Self {
        VersionList::Any
    }
}

impl VersionList {
    pub fn any() -> Self {
        VersionList::Any
    }

    pub fn single(v: Version) -> Self {
        VersionList::Ranges(vec![VersionRange::point(v)])
    }

    pub fn is_any(&self) -> bool {
        matches!(self, VersionList::Any)
    }

    pub fn ranges(&self) -> &[VersionRange] {
        match self {
            VersionList::Any => &[],
            VersionList::Ranges(r) => r,
        }
    }

    /// True iff this list describes exactly one version.
    pub fn concrete(&self) -> bool {
        matches!(self, VersionList::Ranges(r) if r.len() == 1 && r[0].is_point())
    }

    /// The single version this list pins to, if [`Self::concrete`].
    pub fn as_concrete(&self) -> Option<&Version> {
        match self {
            VersionList::Ranges(r) if r.len() == 1 && r[0].is_point() => r[0].lo(),
            _ => None,
        }
    }

    /// Add a range to the list, merging it with any ranges it overlaps.
    /// `Any` here means "nothing added yet", not "the unbounded range" — so
    /// the first range added to a fresh list simply becomes the list.
    /// Adding the unbounded range itself still collapses the whole list to
    /// `Any`, since the union with "everything" is "everything".
    pub fn add(&mut self, range: VersionRange) {
        if range.is_any() {
            *self = VersionList::Any;
            return;
        }
        if self.is_any() {
            *self = VersionList::Ranges(Vec::new());
        }
        let VersionList::Ranges(ranges) = self else {
            unreachable!()
        };
        ranges.push(range);
        ranges.sort();
        let merged = std::mem::take(ranges)
            .into_iter()
            .coalesce(|a, b| {
                if a.intersects(&b) || a.hi().zip(b.lo()).is_some_and(|(h, l)| h == l) {
                    Ok(a.intersect_or_span(&b))
                } else {
                    Err((a, b))
                }
            })
            .collect();
        *ranges = merged;
    }

    pub fn overlaps(&self, other: &VersionList) -> bool {
        match (self, other) {
            (VersionList::Any, _) | (_, VersionList::Any) => true,
            (VersionList::Ranges(a), VersionList::Ranges(b)) => {
                a.iter().any(|r| b.iter().any(|o| r.intersects(o)))
            }
        }
    }

    /// Every element of `self` is covered by some element of `other`, and
    /// the two lists overlap (§4.2). An unconstrained `self` only satisfies
    /// an unconstrained `other`.
    pub fn satisfies(&self, other: &VersionList) -> bool {
        match (self, other) {
            (_, VersionList::Any) => true,
            (VersionList::Any, VersionList::Ranges(_)) => false,
            (VersionList::Ranges(a), VersionList::Ranges(b)) => {
                !a.is_empty() && a.iter().all(|r| b.iter().any(|o| o.contains_range(r)))
            }
        }
    }

    /// Intersect in place. Raises [`Error::Unsatisfiable`] (kind `Version`)
    /// if the two lists share no version at all.
    pub fn intersect(&mut self, other: &VersionList) -> Result<(), Error> {
        let intersected = match (&self, other) {
            (VersionList::Any, VersionList::Any) => VersionList::Any,
            (VersionList::Any, VersionList::Ranges(r)) => VersionList::Ranges(r.clone()),
            (VersionList::Ranges(r), VersionList::Any) => VersionList::Ranges(r.clone()),
            (VersionList::Ranges(a), VersionList::Ranges(b)) => {
                let mut out: Vec<VersionRange> = Vec::new();
                for ra in a {
                    for rb in b {
                        if let Some(i) = ra.intersect(rb) {
                            out.push(i);
                        }
                    }
                }
                if out.is_empty() {
                    return Err(Error::unsatisfiable(&*self, other, ConstraintKind::Version));
                }
                out.sort();
                VersionList::Ranges(out)
            }
        };
        *self = intersected;
        Ok(())
    }
}

impl VersionRange {
    /// Merge two overlapping or touching ranges into their span. Only
    /// called once [`VersionRange::intersects`] (or an exact boundary
    /// touch) has already been confirmed.
    fn intersect_or_span(&self, other: &VersionRange) -> VersionRange {
        let lo = match (self.lo(), other.lo()) {
            (None, _) | (_, None) => None,
            (Some(a), Some(b)) => Some(if a <= b { a.clone() } else { b.clone() }),
        };
        let hi = match (self.hi(), other.hi()) {
            (None, _) | (_, None) => None,
            (Some(a), Some(b)) => Some(if a >= b { a.clone() } else { b.clone() }),
        };
        VersionRange::new(lo, hi).expect("span of two valid ranges is always a valid range")
    }
}

impl fmt::Display for VersionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionList::Any => f.write_str(":"),
            VersionList::Ranges(ranges) => {
                write!(f, "{}", ranges.iter().map(|r| r.to_string()).join(","))
            }
        }
    }
}

impl FromStr for VersionList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(Error::SpecParseError("empty version list".to_string()));
        }
        let mut list = VersionList::Ranges(Vec::new());
        for part in s.split(',') {
            list.add(VersionRange::from_str(part)?);
        }
        Ok(list)
    }
}

#[cfg(test)]
#[path = "./version_list_test.rs"]
mod version_list_test;
