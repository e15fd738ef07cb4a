use crate::cli::commands::source::{apply_filters, open_session, warn_if_empty};
use crate::cli::parser::{Commands, SummaryView};
use crate::config::Config;
use crate::core::Dimension;
use crate::core::aggregate::{CrossTab, Share, Total};
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::formatting::{or_dash, percent2readable};
use crate::utils::hours2readable;
use crate::utils::table::{Column, Table};
use serde_json::{Map, Value};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Summary {
        source,
        filter,
        by,
        staff_of,
        for_staff,
        cross,
        json,
    } = cmd
    {
        let mut session = open_session(source, cfg, !*json)?;
        if warn_if_empty(&session) {
            return Ok(());
        }
        apply_filters(&mut session, filter);

        let sep = cfg.separator_char.as_str();
        let mut out = Map::new();

        // 1️⃣ main view
        match by {
            SummaryView::Content => {
                let totals = session.work_content_totals();
                let shares = session.work_content_shares();
                if *json {
                    out.insert("work_content".into(), serde_json::to_value(&totals)?);
                    out.insert("shares".into(), serde_json::to_value(&shares)?);
                } else {
                    header("作業内容別 工数 [h]", sep);
                    print!("{}", content_table(&totals, &shares, sep).render());
                }
            }
            SummaryView::Staff | SummaryView::Branch | SummaryView::Month => {
                let dim = match by {
                    SummaryView::Staff => Dimension::Staff,
                    SummaryView::Branch => Dimension::Branch,
                    _ => Dimension::Month,
                };
                emit_totals(&mut out, *json, dim, &session.totals_by(dim), sep)?;
            }
        }

        // 2️⃣ one work content, per staff
        if let Some(label) = staff_of {
            let totals = session.staff_totals_for(label);
            if *json {
                out.insert("staff_of".into(), serde_json::to_value(&totals)?);
            } else {
                header(format!("{label}: 担当者別 工数 [h]"), sep);
                if totals.is_empty() {
                    info("No data for the selected work content.");
                } else {
                    print!("{}", totals_table("担当者", &totals, sep).render());
                }
            }
        }

        // 3️⃣ one staff, per work content
        if let Some(staff) = for_staff {
            let totals = session.content_totals_for(staff);
            if *json {
                out.insert("for_staff".into(), serde_json::to_value(&totals)?);
            } else {
                header(format!("{staff}: 作業内容別 工数 [h]"), sep);
                if totals.is_empty() {
                    info("No hours recorded for the selected staff.");
                } else {
                    print!("{}", totals_table("作業内容", &totals, sep).render());
                }
            }
        }

        // 4️⃣ cross tabulation
        if let Some(dim) = cross {
            let tab = session.crosstab(*dim);
            if *json {
                out.insert("crosstab".into(), serde_json::to_value(&tab)?);
            } else {
                header(format!("作業内容 × {}", dim.label()), sep);
                print!("{}", crosstab_table(&tab, sep).render());
            }
        }

        if *json {
            println!("{}", serde_json::to_string_pretty(&Value::Object(out))?);
        }
    }

    Ok(())
}

fn emit_totals(
    out: &mut Map<String, Value>,
    json: bool,
    dim: Dimension,
    totals: &[Total],
    sep: &str,
) -> AppResult<()> {
    if json {
        out.insert(format!("by_{}", dim.as_str()), serde_json::to_value(totals)?);
    } else {
        header(format!("{}別 工数 [h]", dim.label()), sep);
        print!("{}", totals_table(dim.label(), totals, sep).render());
    }
    Ok(())
}

fn content_table(totals: &[Total], shares: &[Share], sep: &str) -> Table {
    let mut table = Table::new(vec![
        Column::left("作業内容"),
        Column::right("工数 [h]"),
        Column::right("割合"),
    ])
    .with_separator(sep);

    for t in totals {
        let share = shares
            .iter()
            .find(|s| s.key == t.key)
            .map(|s| percent2readable(s.percent))
            .unwrap_or_default();
        table.add_row(vec![t.key.clone(), hours2readable(Some(t.hours)), share]);
    }

    let grand: f64 = totals.iter().map(|t| t.hours).sum();
    table.add_row(vec!["合計".into(), hours2readable(Some(grand)), String::new()]);
    table
}

fn totals_table(key_header: &str, totals: &[Total], sep: &str) -> Table {
    let mut table =
        Table::new(vec![Column::left(key_header), Column::right("工数 [h]")]).with_separator(sep);

    for t in totals {
        table.add_row(vec![or_dash(&t.key).to_string(), hours2readable(Some(t.hours))]);
    }
    table
}

fn crosstab_table(tab: &CrossTab, sep: &str) -> Table {
    let mut columns = vec![Column::left("作業内容")];
    columns.extend(tab.columns.iter().map(|c| Column::right(or_dash(c))));
    columns.push(Column::right("合計"));

    let mut table = Table::new(columns).with_separator(sep);
    let row_totals = tab.row_totals();

    for (i, label) in tab.rows.iter().enumerate() {
        let mut cells = vec![label.clone()];
        cells.extend(tab.cells[i].iter().map(|v| hours2readable(Some(*v))));
        cells.push(hours2readable(Some(row_totals[i])));
        table.add_row(cells);
    }

    let col_totals = tab.column_totals();
    let mut footer = vec!["合計".to_string()];
    footer.extend(col_totals.iter().map(|v| hours2readable(Some(*v))));
    footer.push(hours2readable(Some(col_totals.iter().sum())));
    table.add_row(footer);

    table
}
