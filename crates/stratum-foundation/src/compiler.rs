//! The `%compiler[@version-list]` clause (§3, §4.1).

use std::fmt;

use stratum_error::{ConstraintKind, Error};

use crate::version_list::VersionList;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Compiler {
    name: String,
    versions: VersionList,
}

impl Compiler {
    pub fn new(name: impl Into<String>) -> Self {
        Compiler {
            name: name.into(),
            versions: VersionList::any(),
        }
    }

    pub fn with_versions(name: impl Into<String>, versions: VersionList) -> Self {
        Compiler {
            name: name.into(),
            versions,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn versions(&self) -> &VersionList {
        &self.versions
    }

    pub fn versions_mut(&mut self) -> &mut VersionList {
        &mut self.versions
    }

    /// A compiler spec is concrete if its versions are concrete.
    pub fn concrete(&self) -> bool {
        self.versions.concrete()
    }

    pub fn satisfies(&self, other: &Compiler) -> bool {
        self.name == other.name && self.versions.overlaps(&other.versions)
    }

    pub fn constrain(&mut self, other: &Compiler) -> Result<(), Error> {
        if !self.satisfies(other) {
            return Err(Error::unsatisfiable(&*self, other, ConstraintKind::Compiler));
        }
        self.versions.intersect(&other.versions)
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.versions.is_any() {
            write!(f, "@{}", self.versions)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "./compiler_test.rs"]
mod compiler_test;
