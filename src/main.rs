use release_notes::{cli, log_error, logger, ui};
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = logger::init() {
        eprintln!("Warning: Failed to initialize logging: {e}");
    }

    if let Err(e) = cli::main().await {
        log_error!("Release notes generation failed: {:#}", e);
        ui::print_error(&format!("Error: {e:#}"));
        process::exit(1);
    }
}
