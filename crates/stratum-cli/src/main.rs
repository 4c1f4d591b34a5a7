//! The `stratum` binary: a thin `clap` front end dispatching to the
//! subcommands in this crate (§6). Parsing, normalization, concretization,
//! and formatting all live in `stratum-parser`/`stratum-spec`/
//! `stratum-solve`; this binary only wires a package repository and a
//! policy together and prints whatever the core hands back.

use clap::{Parser, Subcommand};
use stratum_cli::find::Find;
use stratum_cli::install::Install;
use stratum_cli::{CommandArgs, Run};

/// A source-build package manager for scientific and HPC software.
#[derive(Parser)]
#[command(name = "stratum", version, about)]
struct Cli {
    /// Increase logging verbosity (repeat for more: -v, -vv, ...).
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Find(Find),
    Install(Install),
}

fn main() {
    let mut cli = Cli::parse();
    stratum_cli::logging::init(cli.verbose);

    let code = match &mut cli.command {
        Command::Find(find) => dispatch(find),
        Command::Install(install) => dispatch(install),
    };

    std::process::exit(code);
}

fn dispatch<T: Run + CommandArgs>(cmd: &mut T) -> i32 {
    tracing::debug!(args = ?cmd.get_positional_args(), "running command");
    match cmd.run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:?}", miette::Report::new(err));
            1
        }
    }
}
