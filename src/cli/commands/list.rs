use crate::cli::commands::source::{apply_filters, open_session, warn_if_empty};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::aggregate::sum_hours;
use crate::errors::AppResult;
use crate::models::row::COLUMNS;
use crate::ui::messages::header;
use crate::utils::hours2readable;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { source, filter } = cmd {
        let mut session = open_session(source, cfg, true)?;
        if warn_if_empty(&session) {
            return Ok(());
        }
        apply_filters(&mut session, filter);

        let filtered = session.filtered();

        header(
            format!(
                "Filtered rows: {} of {}",
                filtered.len(),
                session.dataset().len()
            ),
            &cfg.separator_char,
        );

        let columns = COLUMNS
            .iter()
            .enumerate()
            .map(|(i, h)| if i == 3 { Column::right(*h) } else { Column::left(*h) })
            .collect();
        let mut table = Table::new(columns).with_separator(&cfg.separator_char);

        for row in &filtered {
            let mut cells = row.to_cells();
            cells[3] = hours2readable(row.hours);
            table.add_row(cells);
        }

        print!("{}", table.render());
        println!("\nTotal: {} h", hours2readable(Some(sum_hours(&filtered))));
    }

    Ok(())
}
