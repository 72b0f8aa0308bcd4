//! SendApi Dist - Multi-platform distribution builder for the SendApi desktop app.
//!
//! This binary packages the SendApi application into platform distributables
//! (.dmg disk images on macOS, a single-file .exe on Windows) and writes
//! explanatory placeholders for targets the current host cannot produce.

use std::process;

use sendapi_dist::cli;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
