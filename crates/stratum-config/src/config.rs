//! Process-wide, read-mostly configuration (§5: "the package registry and
//! the concretizer policy are process-wide and read-mostly; they are
//! initialized once and never mutated during spec operations"). Nothing
//! in the spec core (`stratum-spec`, `stratum-parser`, `stratum-solve`)
//! depends on this crate — it exists for `stratum-cli` to pin the knobs
//! those crates leave as policy (the default compiler, the install
//! prefix) to concrete, site-specific values.

use std::sync::{Arc, RwLock};

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::Result;

#[cfg(test)]
#[path = "./config_test.rs"]
mod config_test;

static CONFIG: OnceCell<RwLock<Arc<Config>>> = OnceCell::new();

/// The default compiler `concretize_version`/`concretize_compiler` fall
/// back to when a spec names no `%compiler` clause at all.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Compiler {
    pub default_name: String,
    pub default_version: String,
}

impl Default for Compiler {
    fn default() -> Self {
        Compiler {
            default_name: "gcc".to_string(),
            default_version: "11".to_string(),
        }
    }
}

/// Architecture selection. An empty `default` means "use the host triple
/// reported by `std::env::consts::ARCH`", matching `DefaultPolicy`.
#[derive(Clone, Default, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Architecture {
    pub default: Option<String>,
}

/// Defaults for the `stratum find` subcommand's display flags.
#[derive(Clone, Default, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Find {
    pub long: bool,
    pub paths: bool,
}

#[derive(Clone, Default, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Cli {
    pub find: Find,
}

/// Where `stratum install` computes concrete-spec prefixes under.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Install {
    pub prefix: String,
}

impl Default for Install {
    fn default() -> Self {
        Install {
            prefix: "/opt/stratum".to_string(),
        }
    }
}

/// Configuration values for stratum.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    // These sub-types should aim to only have one level of values within
    // them, otherwise they become impossible to address with environment
    // variables.
    pub compiler: Compiler,
    pub architecture: Architecture,
    pub cli: Cli,
    pub install: Install,
}

impl Config {
    /// Get the current loaded config, loading it if needed.
    pub fn current() -> Result<Arc<Self>> {
        get_config()
    }

    /// Load the config from disk, even if it's already been loaded before.
    pub fn load() -> Result<Self> {
        load_config()
    }

    /// Make this config the current global one.
    pub fn make_current(self) -> Result<Arc<Self>> {
        // Note we don't know if we won the race to set the value here,
        // so we still need to try to update it.
        let config = CONFIG.get_or_try_init(|| -> Result<RwLock<Arc<Config>>> {
            Ok(RwLock::new(Arc::new(self.clone())))
        })?;

        let mut lock = config
            .write()
            .map_err(|err| crate::Error::LockPoisonedWrite(err.to_string()))?;
        *Arc::make_mut(&mut lock) = self;
        Ok(Arc::clone(&lock))
    }
}

/// Get the current stratum config, fetching it from disk if needed.
pub fn get_config() -> Result<Arc<Config>> {
    let config = CONFIG.get_or_try_init(|| -> Result<RwLock<Arc<Config>>> {
        Ok(RwLock::new(Arc::new(load_config()?)))
    })?;
    let lock = config
        .read()
        .map_err(|err| crate::Error::LockPoisonedRead(err.to_string()))?;
    Ok(Arc::clone(&*lock))
}

/// Load the stratum configuration from disk, even if it has already been
/// loaded. This includes the default, user, and system configurations (if
/// they exist).
pub fn load_config() -> Result<Config> {
    use config::{Config as RawConfig, File};

    const USER_CONFIG_BASE: &str = "stratum/stratum";
    let user_config = dirs::config_local_dir()
        .map(|config| config.join(USER_CONFIG_BASE))
        .ok_or_else(|| {
            crate::Error::Config(config::ConfigError::NotFound(
                "User config area could not be found, this platform may not be supported".into(),
            ))
        })?;

    let mut config_builder = RawConfig::builder()
        // the system config can also be in any supported format: toml, yaml, json, ini, etc
        .add_source(File::with_name("/etc/stratum").required(false))
        // the user config can also be in any supported format: toml, yaml, json, ini, etc
        .add_source(File::with_name(&format!("{}", user_config.display())).required(false));

    for (var, value) in std::env::vars() {
        let Some(tail) = var.strip_prefix("STRATUM_") else {
            continue;
        };
        let Some((section, name)) = tail.split_once('_') else {
            // typically, a value with no section is not a configuration
            // value, and can be skipped (eg: STRATUM_LOG)
            continue;
        };

        let key = format!("{}.{}", section.to_lowercase(), name.to_lowercase());
        config_builder = config_builder.set_override(key, value)?;
    }

    let config = config_builder.build()?;
    Ok(Config::deserialize(config)?)
}
