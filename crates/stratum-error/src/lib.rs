//! The closed error taxonomy shared by every stratum spec crate.
//!
//! All failures raised while parsing, normalizing, concretizing, or
//! constraining a spec are represented by a single [`Error`] enum. Nothing in
//! this taxonomy is retried internally; every variant is meant to surface at
//! a crate boundary (`parse`, `normalize`, `concretize`, `constrain`) and be
//! handled by the caller. `satisfies` never raises: it returns `bool`.

use miette::Diagnostic;
use thiserror::Error;

/// One of the seven fields a spec constraint can disagree on.
///
/// Carried by every [`Error::Unsatisfiable`] variant so callers can match on
/// `constraint_type()` without parsing the error message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    Name,
    Version,
    Variant,
    Compiler,
    Architecture,
    Provider,
    Dependency,
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConstraintKind::Name => "name",
            ConstraintKind::Version => "version",
            ConstraintKind::Variant => "variant",
            ConstraintKind::Compiler => "compiler",
            ConstraintKind::Architecture => "architecture",
            ConstraintKind::Provider => "provider",
            ConstraintKind::Dependency => "dependency",
        };
        f.write_str(s)
    }
}

/// The closed taxonomy of everything that can go wrong while building,
/// normalizing, or concretizing a spec.
#[derive(Diagnostic, Debug, Error)]
#[diagnostic(url("https://github.com/stratum-hpc/stratum/wiki/errors#{}", self.code_name()))]
pub enum Error {
    /// The spec text could not be parsed at all.
    #[error("failed to parse spec: {0}")]
    SpecParseError(String),

    /// Two `^dep` clauses in one spec named the same package.
    #[error("cannot depend on '{0}' twice in the same spec")]
    DuplicateDependency(String),

    /// Two `+name`/`-name`/`~name` clauses in one spec named the same variant.
    #[error("cannot specify variant '{0}' twice in the same spec")]
    DuplicateVariant(String),

    /// Two `%compiler` clauses appeared in one spec.
    #[error("spec for '{0}' cannot have two compilers")]
    DuplicateCompiler(String),

    /// Two `=arch` clauses appeared in one spec.
    #[error("spec for '{0}' cannot have two architectures")]
    DuplicateArchitecture(String),

    /// A `%compiler` clause named a compiler the registry doesn't know.
    #[error("unknown compiler: {0}")]
    UnknownCompiler(String),

    /// A spec named a package the registry doesn't know and which isn't a
    /// virtual placeholder either.
    #[error("unknown package: {0}")]
    UnknownPackage(String),

    /// A dependency clause named a package that the real package declaration
    /// doesn't actually depend on.
    #[error("{0} does not depend on {1}")]
    InvalidDependency(String, String),

    /// The same package appeared twice in a DAG with constraints that could
    /// not be reconciled by `constrain`. This should be unreachable from
    /// user input — the parser always funnels duplicate mentions of a
    /// package through the same node — so seeing it means something
    /// upstream built a malformed DAG.
    #[error("invalid spec DAG, conflicting constraints on '{0}': {1}")]
    InconsistentSpec(String, String),

    /// No package declares itself a provider of the requested virtual spec.
    #[error("no providers found for virtual package: '{0}'")]
    NoProvider(String),

    /// More than one package provides the same virtual spec within a single
    /// normalization context, and the core has no policy for picking among
    /// them at this stage.
    #[error("multiple providers found for '{0}': {1}")]
    MultipleProvider(String, String),

    /// A constraint could not be satisfied. `constraint_type` says which
    /// field disagreed; `provided`/`required` are the canonical string forms
    /// of the two sides.
    #[error("{provided} does not satisfy {required} ({constraint_type})")]
    Unsatisfiable {
        provided: String,
        required: String,
        constraint_type: ConstraintKind,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseFailure),
}

impl Error {
    /// Build an [`Error::Unsatisfiable`] for the given field.
    pub fn unsatisfiable(
        provided: impl std::fmt::Display,
        required: impl std::fmt::Display,
        constraint_type: ConstraintKind,
    ) -> Self {
        Error::Unsatisfiable {
            provided: provided.to_string(),
            required: required.to_string(),
            constraint_type,
        }
    }

    /// The field this error concerns, if it is an [`Error::Unsatisfiable`].
    pub fn constraint_type(&self) -> Option<ConstraintKind> {
        match self {
            Error::Unsatisfiable {
                constraint_type, ..
            } => Some(*constraint_type),
            _ => None,
        }
    }

    fn code_name(&self) -> &'static str {
        match self {
            Error::SpecParseError(_) => "parse_error",
            Error::DuplicateDependency(_) => "duplicate_dependency",
            Error::DuplicateVariant(_) => "duplicate_variant",
            Error::DuplicateCompiler(_) => "duplicate_compiler",
            Error::DuplicateArchitecture(_) => "duplicate_architecture",
            Error::UnknownCompiler(_) => "unknown_compiler",
            Error::UnknownPackage(_) => "unknown_package",
            Error::InvalidDependency(_, _) => "invalid_dependency",
            Error::InconsistentSpec(_, _) => "inconsistent_spec",
            Error::NoProvider(_) => "no_provider",
            Error::MultipleProvider(_, _) => "multiple_provider",
            Error::Unsatisfiable { .. } => "unsatisfiable",
            Error::Parse(_) => "parse_error",
        }
    }
}

/// A parse failure with the offending input and byte offset attached, the
/// way `SpecParseError` wraps the underlying parser's `ParseError` while
/// keeping `string`/`pos` available to callers building error reports.
#[derive(Diagnostic, Debug, Error)]
#[error("failed to parse '{input}' at byte {position}: {reason}")]
pub struct ParseFailure {
    pub input: String,
    pub position: usize,
    pub reason: String,
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_kind_displays_lowercase() {
        assert_eq!(ConstraintKind::Architecture.to_string(), "architecture");
    }

    #[test]
    fn unsatisfiable_carries_constraint_type() {
        let err = Error::unsatisfiable("mpi@1.0", "mpi@2:", ConstraintKind::Version);
        assert_eq!(err.constraint_type(), Some(ConstraintKind::Version));
    }

    #[test]
    fn non_unsatisfiable_error_has_no_constraint_type() {
        let err = Error::UnknownPackage("frobnicate".to_string());
        assert_eq!(err.constraint_type(), None);
    }
}
