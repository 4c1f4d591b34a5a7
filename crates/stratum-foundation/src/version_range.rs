//! Inclusive version intervals with open ends (§3, §4.2).
//!
//! A [`VersionRange`] is `[lo, hi]` where either bound may be absent,
//! meaning unbounded in that direction. `lo == hi == Some(v)` is a single
//! concrete point and prints as `v` rather than `v:v`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use stratum_error::Error;

use crate::version::Version;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct VersionRange {
    lo: Option<Version>,
    hi: Option<Version>,
}

impl VersionRange {
    /// The unconstrained range, `:`.
    pub fn any() -> Self {
        VersionRange { lo: None, hi: None }
    }

    /// A single concrete point.
    pub fn point(v: Version) -> Self {
        VersionRange {
            lo: Some(v.clone()),
            hi: Some(v),
        }
    }

    pub fn new(lo: Option<Version>, hi: Option<Version>) -> Result<Self, Error> {
        if let (Some(lo), Some(hi)) = (&lo, &hi) {
            if lo > hi {
                return Err(Error::SpecParseError(format!(
                    "invalid version range: {lo}:{hi} (lower bound above upper bound)"
                )));
            }
        }
        Ok(VersionRange { lo, hi })
    }

    pub fn lo(&self) -> Option<&Version> {
        self.lo.as_ref()
    }

    pub fn hi(&self) -> Option<&Version> {
        self.hi.as_ref()
    }

    pub fn is_any(&self) -> bool {
        self.lo.is_none() && self.hi.is_none()
    }

    pub fn is_point(&self) -> bool {
        matches!((&self.lo, &self.hi), (Some(a), Some(b)) if a == b)
    }

    pub fn contains(&self, v: &Version) -> bool {
        self.lo.as_ref().is_none_or(|lo| lo <= v) && self.hi.as_ref().is_none_or(|hi| v <= hi)
    }

    /// `self` fully covers `other` (`other`'s interval is a subset of `self`'s).
    pub fn contains_range(&self, other: &VersionRange) -> bool {
        let lo_ok = match (&self.lo, &other.lo) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(a), Some(b)) => a <= b,
        };
        let hi_ok = match (&self.hi, &other.hi) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(a), Some(b)) => b <= a,
        };
        lo_ok && hi_ok
    }

    pub fn intersects(&self, other: &VersionRange) -> bool {
        let lo_ok = match (&self.lo, &other.hi) {
            (Some(a), Some(b)) => a <= b,
            _ => true,
        };
        let hi_ok = match (&self.hi, &other.lo) {
            (Some(a), Some(b)) => b <= a,
            _ => true,
        };
        lo_ok && hi_ok
    }

    pub fn intersect(&self, other: &VersionRange) -> Option<VersionRange> {
        if !self.intersects(other) {
            return None;
        }
        let lo = match (&self.lo, &other.lo) {
            (None, b) => b.clone(),
            (a, None) => a.clone(),
            (Some(a), Some(b)) => Some(if a >= b { a.clone() } else { b.clone() }),
        };
        let hi = match (&self.hi, &other.hi) {
            (None, b) => b.clone(),
            (a, None) => a.clone(),
            (Some(a), Some(b)) => Some(if a <= b { a.clone() } else { b.clone() }),
        };
        Some(VersionRange { lo, hi })
    }
}

impl PartialOrd for VersionRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionRange {
    fn cmp(&self, other: &Self) -> Ordering {
        // order by lower bound first (None/unbounded sorts first), then by
        // upper bound, giving VersionList a stable sort for its ranges.
        let lo_cmp = match (&self.lo, &other.lo) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => a.cmp(b),
        };
        if lo_cmp != Ordering::Equal {
            return lo_cmp;
        }
        match (&self.hi, &other.hi) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(b),
        }
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_point() {
            return write!(f, "{}", self.lo.as_ref().unwrap());
        }
        if let Some(lo) = &self.lo {
            write!(f, "{lo}")?;
        }
        f.write_str(":")?;
        if let Some(hi) = &self.hi {
            write!(f, "{hi}")?;
        }
        Ok(())
    }
}

impl FromStr for VersionRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ":" {
            return Ok(VersionRange::any());
        }
        match s.split_once(':') {
            None => {
                let v = Version::from_str(s)?;
                Ok(VersionRange::point(v))
            }
            Some((lo, hi)) => {
                let lo = if lo.is_empty() {
                    None
                } else {
                    Some(Version::from_str(lo)?)
                };
                let hi = if hi.is_empty() {
                    None
                } else {
                    Some(Version::from_str(hi)?)
                };
                VersionRange::new(lo, hi)
            }
        }
    }
}

#[cfg(test)]
#[path = "./version_range_test.rs"]
mod version_range_test;
