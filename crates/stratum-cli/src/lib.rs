//! Thin CLI glue over the spec core (§6: "thin, not part of core,
//! documented for completeness"). Everything here only ever talks to the
//! core through the public surface `stratum-spec`/`stratum-parser`/
//! `stratum-solve` export — parsing, `normalize`/`concretize`, and
//! canonical formatting — plus the file-backed [`repository::Repository`]
//! standing in for the real package/compiler registry collaborators.
//!
//! Unlike the teacher this crate is grounded on, commands here run
//! synchronously rather than through `async_trait`/`tokio`: the spec core
//! is a pure in-memory DAG transformation with no I/O or suspension
//! points (§5), and its [`stratum_spec::Spec`] handle is reference-counted
//! (`Rc`), not `Send` — there is nothing for an executor to schedule
//! around and no thread for the handle to cross.

pub mod error;
pub mod find;
pub mod install;
pub mod logging;
pub mod output;
pub mod path;
pub mod policy;
pub mod repository;

pub use error::{Error, Result};

/// Trait every CLI subcommand implements to be runnable (§6), the
/// synchronous counterpart of the teacher's `async_trait Run`.
pub trait Run {
    /// The process exit code on success.
    fn run(&mut self) -> Result<i32>;
}

/// Trait all CLI commands implement to provide a list of the "request"
/// equivalent values from their command lines, for logging/telemetry
/// purposes (§6).
pub trait CommandArgs {
    fn get_positional_args(&self) -> Vec<String>;
}
