//! `stratum install` (§6): "for each parsed, concretized spec, invoke the
//! package's `install(spec, prefix)` hook." The hook itself — the
//! `Install` capability from §9 that shells out to `configure`/`make` — is
//! explicitly out of scope for the spec core; this command drives
//! `normalize`/`concretize` to completion and reports the concrete
//! identity and the prefix it would occupy.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use stratum_spec::Spec;

use crate::error::{Error, Result};
use crate::output::{Console, Output};
use crate::policy::ConfiguredPolicy;
use crate::repository::Repository;
use crate::{CommandArgs, Run};

/// Concretize and install one or more specs.
#[derive(Args)]
pub struct Install<O: Output = Console> {
    /// Directory of package declarations (`*.yaml`) to concretize
    /// against.
    #[clap(long, env = "STRATUM_REPO")]
    pub repo: PathBuf,

    /// Append each concretized spec to the installed-spec database
    /// instead of only printing it.
    #[clap(long)]
    pub record: bool,

    /// The installed-spec database file `--record` appends to.
    #[clap(long, env = "STRATUM_DB")]
    pub db: Option<PathBuf>,

    /// Do not install dependencies, only the named specs themselves.
    ///
    /// The spec core always concretizes a spec's full dependency DAG;
    /// this only controls which of the resulting concrete specs get
    /// recorded as separately "installed".
    #[clap(short, long)]
    pub ignore_dependencies: bool,

    /// The specs to concretize and install.
    #[clap(name = "SPEC", required = true)]
    pub specs: Vec<String>,

    #[clap(skip)]
    output: O,
}

impl<O: Output> Run for Install<O> {
    fn run(&mut self) -> Result<i32> {
        let config = stratum_config::Config::current()?;
        let registry = Repository::load(&self.repo)?;
        let policy = ConfiguredPolicy::from_config(&config)?;
        let prefix = PathBuf::from(&config.install.prefix);

        let mut installed: Vec<Spec> = Vec::new();
        for text in &self.specs {
            let spec = stratum_parser::parse_spec(text).map_err(Error::from)?;
            stratum_solve::concretize(&spec, &registry, &registry, &policy).map_err(Error::from)?;

            let path = crate::path::path_for_spec(&prefix, &spec);
            self.output.println(format!("{} {}", "installed".green(), spec));
            self.output.println(format!("  -> {}", path.display()));

            if self.ignore_dependencies {
                installed.push(spec);
            } else {
                let opts = stratum_spec::TraversalOptions {
                    cover: stratum_spec::Cover::Nodes,
                    key_by: stratum_spec::KeyBy::Name,
                    include_root: true,
                };
                installed.extend(spec.traverse(&opts).into_iter().map(|(_, node)| node));
            }
        }

        if self.record {
            let db_path = self.db.clone().unwrap_or_else(crate::find::default_db_path);
            append_installed(&db_path, &installed)?;
        }

        Ok(0)
    }
}

impl<O: Output> CommandArgs for Install<O> {
    fn get_positional_args(&self) -> Vec<String> {
        self.specs.clone()
    }
}

fn append_installed(path: &std::path::Path, specs: &[Spec]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| Error::DatabasePath(path.to_path_buf(), err))?;
    }
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| Error::DatabasePath(path.to_path_buf(), err))?;
    for spec in specs {
        writeln!(file, "{spec}").map_err(|err| Error::DatabasePath(path.to_path_buf(), err))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "./install_test.rs"]
mod install_test;
