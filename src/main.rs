//! Ruleline - rule-based line completion
//!
//! Command-line front end for the ruleline completion engine. Runs the
//! interactive demo shell by default; subcommands expose the engine's
//! diagnostics:
//!
//! ```bash
//! ruleline                # interactive demo (Tab completes)
//! ruleline spy shoot oct  # which rule matches, and what it returns
//! ruleline methods        # method names with argument completion
//! ```

use tracing::Level;

use ruleline::cli::CliInterface;
use ruleline::error::Result;

/// Application entry point
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// 1. Parse command-line arguments
/// 2. Load configuration
/// 3. Initialize logging
/// 4. Handle subcommands or start the demo shell
fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    if cli.handle_subcommand()? {
        return Ok(());
    }

    cli.run_demo()
}

/// Initialize logging system based on verbosity level
fn initialize_logging(cli: &CliInterface) {
    let level = if cli.args().very_verbose {
        Level::TRACE
    } else if cli.args().verbose {
        Level::DEBUG
    } else {
        cli.config().logging.level.to_tracing_level()
    };

    // Build subscriber with level filter
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    // Configure timestamps
    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
