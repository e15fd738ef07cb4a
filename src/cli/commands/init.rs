use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use std::path::Path;

/// Handle the `init` command
///
/// Writes the default configuration (sheet layout, staff → branch map,
/// work-content labels) so it can be edited without touching the code.
pub fn handle(cmd: &Commands, path: &Path) -> AppResult<()> {
    let force = matches!(cmd, Commands::Init { force: true });

    info("Initializing kousu…");

    if Config::init_at(path, force)? {
        success(format!("Config file: {}", path.display()));
    } else {
        warning(format!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        ));
    }

    Ok(())
}
