use std::fs::File;
use std::path::Path;

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

use crate::error::GameError;

/// Initializes the global logger.
///
/// The terminal is in the alternate screen while the game runs, so records
/// sent to stderr would be drawn over.  With a `log_file` the default level
/// is info (debug when `verbose`); without one only warnings and errors are
/// shown unless `verbose` is set.  `RUST_LOG` overrides either default.
pub fn init(verbose: bool, log_file: Option<&Path>) -> Result<(), GameError> {
    let level = match (verbose, log_file.is_some()) {
        (true, _) => LevelFilter::Debug,
        (false, true) => LevelFilter::Info,
        (false, false) => LevelFilter::Warn,
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);
    if let Some(path) = log_file {
        builder.target(Target::Pipe(Box::new(File::create(path)?)));
    }

    // `try_init` only fails if a logger was already set. Ignore that case so
    // tests can call `init` multiple times without panicking.
    let _ = builder.try_init();
    Ok(())
}
