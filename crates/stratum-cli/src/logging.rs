//! Verbosity-driven `tracing` setup, the thin-CLI counterpart of the spec
//! core's own logging-free design (§5: the core never logs or performs
//! I/O; everything printed by `stratum` originates here or in a command's
//! own `Output`).

use tracing_subscriber::EnvFilter;

/// Initialize the global `tracing` subscriber from `-v` occurrences and
/// `RUST_LOG`, matching the increasing-verbosity convention used
/// throughout the corpus (`-v` debug, `-vv` trace).
pub fn init(verbosity: u8) {
    let default_directive = match verbosity {
        0 => "stratum=info,warn",
        1 => "stratum=debug,info",
        _ => "stratum=trace,debug",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity > 1)
        .without_time()
        .init();
}
