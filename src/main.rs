//! hostcheck CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use hostcheck::cli::{Cli, CommandDispatcher};
use hostcheck::render::should_use_colors;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr so stdout stays machine-readable. Level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("hostcheck=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hostcheck=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("hostcheck starting with args: {:?}", cli);

    let use_color = !cli.no_color && should_use_colors();
    let dispatcher = CommandDispatcher::new(use_color);
    let mut stdout = std::io::stdout().lock();

    match dispatcher.dispatch(&cli, &mut stdout) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            let label = if use_color {
                console::style("error:").red().bold().to_string()
            } else {
                "error:".to_string()
            };
            eprintln!("{} {}", label, e);
            ExitCode::from(3)
        }
    }
}
