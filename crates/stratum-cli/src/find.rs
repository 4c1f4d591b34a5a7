//! `stratum find` (§6): "list installed specs, grouped by architecture
//! then compiler (headers `==` and `--`); filter by any spec in
//! `query-specs` (OR semantics: keep spec if it satisfies any query)".
//!
//! What counts as "installed" is, like `install_layout`, out of scope for
//! the spec core — this reads a flat file of one canonical concrete spec
//! per line, which is exactly the string `stratum install --record`
//! appends.

use std::path::{Path, PathBuf};

use clap::Args;
use colored::Colorize;
use stratum_spec::{PackageDecl, PackageRegistry, Spec};

use crate::error::{Error, Result};
use crate::output::{Console, Output};
use crate::{CommandArgs, Run};

/// List installed specs.
#[derive(Args)]
#[clap(visible_alias = "list")]
pub struct Find<O: Output = Console> {
    /// The installed-spec database file to read (one canonical spec per
    /// line). Defaults to a per-user data directory.
    #[clap(long, env = "STRATUM_DB")]
    pub db: Option<PathBuf>,

    /// Show the install prefix alongside each match.
    #[clap(short = 'p', long)]
    pub paths: bool,

    /// Show the full canonical spec string instead of just `name@version`.
    #[clap(short, long)]
    pub long: bool,

    /// Specs to filter by; an installed spec is shown if it satisfies ANY
    /// of these (OR semantics). With none given, everything is shown.
    #[clap(name = "SPEC")]
    pub queries: Vec<String>,

    #[clap(skip)]
    output: O,
}

impl<O: Output> Run for Find<O> {
    fn run(&mut self) -> Result<i32> {
        let config = stratum_config::Config::current()?;
        let long = self.long || config.cli.find.long;
        let paths = self.paths || config.cli.find.paths;

        let db_path = self.db.clone().unwrap_or_else(default_db_path);
        let specs = load_installed(&db_path)?;

        let queries = self
            .queries
            .iter()
            .map(|q| stratum_parser::parse_spec(q).map_err(Error::from))
            .collect::<Result<Vec<Spec>>>()?;

        let registry = NullRegistry;
        let mut matched: Vec<Spec> = specs
            .into_iter()
            .filter(|s| queries.is_empty() || queries.iter().any(|q| s.satisfies(q, &registry)))
            .collect();
        matched.sort_by_key(|s| (s.architecture(), s.compiler().map(|c| c.to_string()), s.name()));

        let prefix = PathBuf::from(&config.install.prefix);
        let mut last_arch: Option<String> = None;
        let mut last_compiler: Option<String> = None;
        for spec in &matched {
            let arch = spec.architecture().unwrap_or_else(|| "unknown".to_string());
            if last_arch.as_deref() != Some(arch.as_str()) {
                self.output.println(format!("== {arch} ==").bold().to_string());
                last_arch = Some(arch);
                last_compiler = None;
            }

            let compiler = spec.compiler().map(|c| c.to_string()).unwrap_or_else(|| "none".to_string());
            if last_compiler.as_deref() != Some(compiler.as_str()) {
                self.output.println(format!("-- {compiler} --").dimmed().to_string());
                last_compiler = Some(compiler);
            }

            let mut line = if long {
                spec.to_string()
            } else {
                stratum_spec::format::format(spec, "$_$@$+")
            };
            if paths {
                line.push_str(&format!("  {}", crate::path::path_for_spec(&prefix, spec).display()));
            }
            self.output.println(format!("    {line}"));
        }

        Ok(0)
    }
}

impl<O: Output> CommandArgs for Find<O> {
    fn get_positional_args(&self) -> Vec<String> {
        self.queries.clone()
    }
}

pub(crate) fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("stratum")
        .join("installed")
}

fn load_installed(path: &Path) -> Result<Vec<Spec>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let text = std::fs::read_to_string(path).map_err(|err| Error::DatabasePath(path.to_path_buf(), err))?;
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| stratum_parser::parse_spec(line).map_err(|err| Error::DatabaseEntry(i + 1, err)))
        .collect()
}

/// `Spec::satisfies` does consult the registry now, to build the §4.5
/// provider-cross-check index over each side's transitive dependencies —
/// but every candidate here is already concrete and already installed, so
/// `exists` reporting "unknown" for all of them just makes every candidate
/// look virtual to `ProviderIndex::build`, which skips it. Both indexes
/// end up empty and the cross-check is a no-op; `get`/`providers_for` are
/// never actually reached for a real declaration, only `exists`.
struct NullRegistry;

impl PackageRegistry for NullRegistry {
    fn exists(&self, _name: &str) -> bool {
        false
    }

    fn get(&self, name: &str) -> std::result::Result<PackageDecl, stratum_error::Error> {
        Err(stratum_error::Error::UnknownPackage(name.to_string()))
    }

    fn providers_for(&self, _vpkg: &Spec) -> Vec<Spec> {
        Vec::new()
    }
}

#[cfg(test)]
#[path = "./find_test.rs"]
mod find_test;
