use anyhow::{Context, Result};
use tracing_subscriber::filter::LevelFilter;

pub const LOG_ENV: &str = "GITFETCH_LOG";

/// Level chosen by the `-q`/`--quiet` and `-v`/`--verbose` options
pub fn level_filter(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Set up the logging / tracing system for the application.
pub fn configure_tracing(verbose: u8, quiet: bool, ansi: bool) -> Result<()> {
    use tracing_log::{AsLog, LogTracer};
    use tracing_subscriber::EnvFilter;

    let level_filter = level_filter(verbose, quiet);

    // Configure the bridge from the `log` crate to the `tracing` crate
    LogTracer::builder()
        .with_max_level(level_filter.as_log())
        .init()?;

    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var(LOG_ENV)
        .from_env()
        .with_context(|| format!("Failed to parse filters from {LOG_ENV} environment variable"))?;

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_ansi(ansi)
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
