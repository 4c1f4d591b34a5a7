//! Process-wide configuration for stratum deployments (§5, §6): the
//! default compiler and install prefix a site pins down, kept out of the
//! spec core so replacing the concretizer's policy or the on-disk layout
//! never requires touching `stratum-spec`/`stratum-solve`.

mod config;
mod error;

pub use error::{Error, Result};

pub use self::config::*;
