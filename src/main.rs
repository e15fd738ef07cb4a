//! kousu main entrypoint.

use kousu::run;
use tracing_subscriber::{EnvFilter, fmt};

fn main() {
    // Diagnostics go to stderr; RUST_LOG=kousu=debug shows per-file details
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(env)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        kousu::ui::messages::error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
