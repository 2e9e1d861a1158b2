//! Kodegen Bundler MSI - Windows installer packager driven by wix.json.
//!
//! This binary renders WiX templates from a JSON manifest, runs the WiX
//! toolset and optionally wraps the MSI into a chocolatey package.

use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match kodegen_bundler_msi::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
