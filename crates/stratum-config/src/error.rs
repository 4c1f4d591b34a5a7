use miette::Diagnostic;
use thiserror::Error;

#[derive(Diagnostic, Debug, Error)]
#[diagnostic(url("https://github.com/stratum-hpc/stratum/wiki/errors#{}", self.code()))]
pub enum Error {
    #[error("cannot load config, lock has been poisoned: {0}")]
    LockPoisonedRead(String),
    #[error("cannot update config, lock has been poisoned: {0}")]
    LockPoisonedWrite(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] config::ConfigError),
}

impl Error {
    fn code(&self) -> &'static str {
        match self {
            Error::LockPoisonedRead(_) => "config::lock_poisoned_read",
            Error::LockPoisonedWrite(_) => "config::lock_poisoned_write",
            Error::Json(_) => "config::json",
            Error::Config(_) => "config::source",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
