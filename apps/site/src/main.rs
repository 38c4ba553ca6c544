//! # SaniVita Command-Line Entry Point
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Initialize tracing (stderr)
//! 3. Load configuration (file, then `SANIVITA_*` environment)
//! 4. Open the content store (SQLite, or memory with `--memory`)
//! 5. Run the command and exit with its status

use clap::Parser;

mod cli;
mod commands;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    sanivita_site::init_tracing();

    let exit_code = match commands::run(cli).await {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error[{}]: {}", error.code().as_str(), error);
            error.exit_code()
        }
    };

    std::process::exit(exit_code);
}
