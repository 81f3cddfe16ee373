//! eC SDK packager - platform-tagged package builder for the eC toolchain.
//!
//! This binary builds the eC native toolchain, collects its artifacts, and
//! packages them into platform-tagged archives with proper error handling.

mod cli;
mod error;
mod metadata;
mod packager;

use std::process;

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
