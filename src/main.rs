use anyhow::{Context, Result};
use gitfetch::cli::{exit_code, Cli};
use gitfetch::logging::configure_tracing;

fn try_main(cli: &Cli) -> Result<()> {
    console::set_colors_enabled(cli.use_color());
    console::set_colors_enabled_stderr(cli.use_color_stderr());
    configure_tracing(cli.verbose, cli.quiet, cli.use_color_stderr())
        .context("Failed to initialize logging")?;

    cli.execute()
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = try_main(&cli) {
        // With -vv or higher, include the full error chain and backtrace
        if cli.verbose > 1 {
            eprintln!("Error: {e:?}");
        } else {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(exit_code(&e));
    }
}
