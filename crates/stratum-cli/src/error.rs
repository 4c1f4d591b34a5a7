//! The CLI's own error type: everything [`crate::Run::run`] can fail with,
//! on top of the closed [`stratum_error::Error`] taxonomy the spec core
//! raises (§7: "every error is surfaced at the boundary").

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Diagnostic, Debug, Error)]
#[diagnostic(url("https://github.com/stratum-hpc/stratum/wiki/errors#{}", self.code()))]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Spec(#[from] stratum_error::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] stratum_config::Error),

    #[error("failed to read package repository at {0}: {1}")]
    RepositoryPath(std::path::PathBuf, #[source] std::io::Error),

    #[error("failed to parse package declaration {0}: {1}")]
    RepositoryYaml(std::path::PathBuf, #[source] serde_yaml::Error),

    #[error("failed to read installed-spec database at {0}: {1}")]
    DatabasePath(std::path::PathBuf, #[source] std::io::Error),

    #[error("line {0} of the installed-spec database is not a valid spec: {1}")]
    DatabaseEntry(usize, #[source] stratum_error::Error),
}

impl Error {
    fn code(&self) -> &'static str {
        match self {
            Error::Spec(_) => "cli::spec",
            Error::Config(_) => "cli::config",
            Error::RepositoryPath(_, _) => "cli::repository_path",
            Error::RepositoryYaml(_, _) => "cli::repository_yaml",
            Error::DatabasePath(_, _) => "cli::database_path",
            Error::DatabaseEntry(_, _) => "cli::database_entry",
        }
    }
}
