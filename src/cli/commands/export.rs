use crate::cli::commands::source::{apply_filters, open_session, warn_if_empty};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::{ExportFormat, ExportLogic};
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        source,
        filter,
        format,
        file,
        force,
    } = cmd
    {
        let mut session = open_session(source, cfg, true)?;
        if warn_if_empty(&session) {
            return Ok(());
        }
        apply_filters(&mut session, filter);

        let path = expand_tilde(&file.to_string_lossy());
        let format = (*format)
            .or_else(|| ExportFormat::from_path(&path))
            .unwrap_or(ExportFormat::Csv);

        ExportLogic::export(&session.filtered(), format, &path, *force)?;
    }
    Ok(())
}
