//! Logger installation for binaries embedding the engine.
//!
//! The engine itself only emits through the `log` facade.

/// Install an `env_logger` writing to stderr.
///
/// The level comes from `RUST_LOG`, defaulting to `warn`; `verbose` forces
/// `debug`. Fails if a logger is already installed.
pub fn init(verbose: bool) -> Result<(), log::SetLoggerError> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).try_init()
}
