use crate::cli::commands::source::{open_session, warn_if_empty};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::formatting::or_dash;
use std::collections::BTreeSet;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Facets { source, json } = cmd {
        let session = open_session(source, cfg, !*json)?;
        if warn_if_empty(&session) {
            return Ok(());
        }

        let facets = session.facets();

        if *json {
            println!("{}", serde_json::to_string_pretty(&facets)?);
            return Ok(());
        }

        let sel = session.selection();
        let sections: [(&str, &[String], &BTreeSet<String>); 4] = [
            ("月 (months)", &facets.months, &sel.months),
            ("担当者 (staff)", &facets.staff, &sel.staff),
            ("支店 (branches)", &facets.branches, &sel.branches),
            ("作業内容 (work contents)", &facets.contents, &sel.contents),
        ];

        // [x] marks the default selection
        for (title, values, selected) in sections {
            header(title, &cfg.separator_char);
            for v in values {
                let marker = if selected.contains(v) { "[x]" } else { "[ ]" };
                println!("{marker} {}", or_dash(v));
            }
        }
    }

    Ok(())
}
