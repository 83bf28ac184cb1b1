//! webapp_bundler - batch nativefier builds with per-build archives.
//!
//! Builds every requested (environment, architecture) pair sequentially and
//! exits with the failing packager's exit code if any build fails.

use std::process;

use webapp_bundler::cli;

#[tokio::main]
async fn main() {
    // Initialize logging; info by default so build progress is visible
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
