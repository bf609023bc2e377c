//! detect-installer CLI entry point.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use detect_installer::cli::{run, Cli};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Exit code when the environment could not be inspected.
const EXIT_ERROR: u8 = 2;

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
///
/// Logs go to stderr; stdout is reserved for the result.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("detect_installer=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("detect_installer=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("detect-installer starting with args: {:?}", cli);

    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr();

    match run(&cli, &mut stdout, &mut stderr) {
        Ok(result) => ExitCode::from(result.exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
