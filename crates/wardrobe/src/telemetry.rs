//! Log subscriber for the binary.
//!
//! Everything goes to stderr so `wardrobe plan` can print its report on
//! stdout. `RUST_LOG` overrides the level picked from the flags.

use tracing::metadata::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// Does nothing if one is already installed.
pub fn init(verbosity: u8, quiet: bool) {
    let filter = EnvFilter::builder()
        .with_default_directive(level_from_flags(verbosity, quiet).into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn level_from_flags(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    }
}
