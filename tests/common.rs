#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use kousu::models::TimesheetRow;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const SHEET: &str = "①個人記入欄";

pub fn kousu() -> Command {
    cargo_bin_cmd!("kousu")
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("kousu_{}_out.{}", name, ext));
    fs::remove_file(&path).ok();
    path
}

/// Config path that does not exist, so defaults are used and $HOME is untouched.
pub fn no_config(name: &str) -> String {
    let p = temp_out(&format!("{name}_cfg"), "conf");
    p.to_string_lossy().to_string()
}

pub enum Month {
    Date(u16, u8, u8),
    Serial(f64),
    Text(&'static str),
    Missing,
}

pub enum Hours {
    Num(f64),
    Text(&'static str),
    Missing,
}

/// One line of the data block: D, E, H, AN.
pub struct Line {
    pub category: Option<&'static str>,
    pub description: Option<&'static str>,
    pub source: Option<&'static str>,
    pub hours: Hours,
}

impl Line {
    pub fn new(category: &'static str, description: &'static str, hours: f64) -> Self {
        Self {
            category: Some(category),
            description: Some(description),
            source: Some(category),
            hours: Hours::Num(hours),
        }
    }

    pub fn blank() -> Self {
        Self {
            category: None,
            description: None,
            source: None,
            hours: Hours::Missing,
        }
    }
}

/// Write a workbook shaped like the monthly timesheet template.
pub fn write_timesheet(path: &Path, sheet: &str, staff: Option<&str>, month: Month, lines: &[Line]) {
    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet();
    ws.set_name(sheet).expect("sheet name");

    if let Some(s) = staff {
        ws.write(0, 5, s).expect("staff cell");
    }

    match month {
        Month::Date(y, m, d) => {
            let dt = ExcelDateTime::from_ymd(y, m, d).expect("date");
            let fmt = Format::new().set_num_format("yyyy/mm/dd");
            ws.write_with_format(1, 7, &dt, &fmt).expect("month cell");
        }
        Month::Serial(v) => {
            ws.write(1, 7, v).expect("month cell");
        }
        Month::Text(t) => {
            ws.write(1, 7, t).expect("month cell");
        }
        Month::Missing => {}
    }

    // header row of the data block
    ws.write(5, 3, "作業分類").expect("header");

    for (i, line) in lines.iter().enumerate() {
        let row = 6 + i as u32;
        if let Some(v) = line.category {
            ws.write(row, 3, v).expect("D");
        }
        if let Some(v) = line.description {
            ws.write(row, 4, v).expect("E");
        }
        if let Some(v) = line.source {
            ws.write(row, 7, v).expect("H");
        }
        match line.hours {
            Hours::Num(h) => {
                ws.write(row, 39, h).expect("AN");
            }
            Hours::Text(t) => {
                ws.write(row, 39, t).expect("AN");
            }
            Hours::Missing => {}
        }
    }

    workbook.save(path).expect("save workbook");
}

/// Small, valid timesheet used by many tests.
pub fn sample_timesheet(name: &str, staff: &str, month: Month) -> PathBuf {
    let path = temp_out(name, "xlsx");
    write_timesheet(
        &path,
        SHEET,
        Some(staff),
        month,
        &[
            Line::new("保守", "点検", 3.0),
            Line::new("保守", "移動", 2.0),
            Line {
                category: Some("参考行"),
                description: Some("設計"),
                source: Some("記入例"),
                hours: Hours::Num(99.0),
            },
            Line {
                category: Some("製作"),
                description: Some("設計"),
                source: Some("製作"),
                hours: Hours::Text("4h(残業1h)"),
            },
        ],
    );
    path
}

pub fn row(description_class: &str, staff: &str, hours: Option<f64>) -> TimesheetRow {
    TimesheetRow {
        work_category: "保守".into(),
        work_description: description_class.into(),
        work_category_source: "保守".into(),
        hours,
        work_description_class: description_class.into(),
        month: "2024_05".into(),
        staff_id: staff.into(),
        branch: kousu::core::Catalog::default().branch_of(staff),
    }
}
