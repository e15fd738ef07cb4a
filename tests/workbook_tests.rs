use kousu::config::Config;
use kousu::core::Catalog;
use kousu::core::Session;
use kousu::core::batch::extract_batch;
use kousu::core::extractor::SheetRecordExtractor;
use kousu::errors::ExtractError;
use kousu::import::extract_file;
use std::fs;

mod common;
use common::{Hours, Line, Month, SHEET, sample_timesheet, temp_out, write_timesheet};

#[test]
fn extracts_a_real_workbook() {
    let path = sample_timesheet("wb_basic", "k.fujita", Month::Date(2024, 5, 1));

    let cfg = Config::default();
    let catalog = Catalog::from_config(&cfg);
    let ex = SheetRecordExtractor::new(&cfg.sheet, &catalog).unwrap();

    let rows = extract_file(&path, &ex).unwrap();

    // the 参考行 line is gone
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.month == "2024_05"));
    assert!(rows.iter().all(|r| r.staff_id == "k.fujita" && r.branch == "大阪"));

    let hours: Vec<Option<f64>> = rows.iter().map(|r| r.hours).collect();
    assert_eq!(hours, vec![Some(3.0), Some(2.0), Some(4.0)]);

    let classes: Vec<&str> = rows.iter().map(|r| r.work_description_class.as_str()).collect();
    assert_eq!(classes, vec!["点検", "移動", "設計"]);
}

#[test]
fn month_cell_variants() {
    let cfg = Config::default();
    let catalog = Catalog::from_config(&cfg);
    let ex = SheetRecordExtractor::new(&cfg.sheet, &catalog).unwrap();

    let cases = [
        ("wb_month_serial", Month::Serial(45000.0), "2023_03"),
        ("wb_month_text", Month::Text("2024年6月"), "2024_06"),
        ("wb_month_raw", Month::Text("未記入"), "未記入"),
        ("wb_month_missing", Month::Missing, ""),
    ];

    for (name, month, expected) in cases {
        let path = sample_timesheet(name, "h.sato", month);
        let rows = extract_file(&path, &ex).unwrap();
        assert!(!rows.is_empty());
        assert_eq!(rows[0].month, expected, "{name}");
    }
}

#[test]
fn missing_staff_cell_gives_empty_staff_and_branch() {
    let path = temp_out("wb_no_staff", "xlsx");
    write_timesheet(&path, SHEET, None, Month::Text("2024-05"), &[Line::new("製作", "設計", 1.0)]);

    let cfg = Config::default();
    let catalog = Catalog::from_config(&cfg);
    let ex = SheetRecordExtractor::new(&cfg.sheet, &catalog).unwrap();

    let rows = extract_file(&path, &ex).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].staff_id, "");
    assert_eq!(rows[0].branch, "");
}

#[test]
fn wrong_sheet_name_is_reported() {
    let path = temp_out("wb_wrong_sheet", "xlsx");
    write_timesheet(&path, "Sheet1", Some("h.sato"), Month::Text("2024-05"), &[]);

    let cfg = Config::default();
    let catalog = Catalog::from_config(&cfg);
    let ex = SheetRecordExtractor::new(&cfg.sheet, &catalog).unwrap();

    match extract_file(&path, &ex) {
        Err(ExtractError::SheetNotFound(name)) => assert_eq!(name, SHEET),
        other => panic!("expected SheetNotFound, got {other:?}"),
    }
}

#[test]
fn non_workbook_and_missing_files_fail() {
    let cfg = Config::default();
    let catalog = Catalog::from_config(&cfg);
    let ex = SheetRecordExtractor::new(&cfg.sheet, &catalog).unwrap();

    let garbage = temp_out("wb_garbage", "xlsx");
    fs::write(&garbage, b"this is not a spreadsheet").unwrap();
    assert!(extract_file(&garbage, &ex).is_err());

    let missing = temp_out("wb_missing", "xlsx");
    assert!(matches!(extract_file(&missing, &ex), Err(ExtractError::Read(_))));
}

#[test]
fn one_bad_file_does_not_stop_the_batch() {
    let good1 = sample_timesheet("batch_good1", "h.sato", Month::Text("2024-05"));
    let bad = temp_out("batch_bad", "xlsx");
    fs::write(&bad, b"garbage").unwrap();
    let good2 = sample_timesheet("batch_good2", "k.fujita", Month::Text("2024-06"));

    let cfg = Config::default();
    let catalog = Catalog::from_config(&cfg);
    let ex = SheetRecordExtractor::new(&cfg.sheet, &catalog).unwrap();

    let report = extract_batch(&[good1.clone(), bad.clone(), good2.clone()], &ex);

    assert_eq!(report.succeeded(), 2);
    let failures: Vec<_> = report.failures().map(|(p, _)| p.to_path_buf()).collect();
    assert_eq!(failures, vec![bad]);

    let records = report.records();
    assert_eq!(records.len(), 6);
    // input order is kept
    assert_eq!(records.rows()[0].staff_id, "h.sato");
    assert_eq!(records.rows()[5].staff_id, "k.fujita");
}

#[test]
fn session_merges_saved_csv_and_workbooks() {
    let wb = sample_timesheet("session_wb", "h.sato", Month::Text("2024-05"));
    let cfg = Config::default();

    // first run: export what the workbook gives
    let first = Session::open(&[wb.clone()], None, &cfg).unwrap();
    assert!(first.failures().is_empty());
    let saved = temp_out("session_saved", "csv");
    let mut buf = Vec::new();
    kousu::export::write_csv(first.dataset(), &mut buf).unwrap();
    fs::write(&saved, buf).unwrap();

    // second run: same workbook plus a new one, on top of the saved CSV
    let other = temp_out("session_other", "xlsx");
    write_timesheet(
        &other,
        SHEET,
        Some("y.hara"),
        Month::Text("2024-06"),
        &[Line {
            category: Some("製作"),
            description: Some("組立"),
            source: None,
            hours: Hours::Missing,
        }],
    );

    let second = Session::open(&[wb, other], Some(saved.as_path()), &cfg).unwrap();
    assert!(second.failures().is_empty());
    // the re-extracted rows duplicate the saved ones
    assert_eq!(second.dataset().len(), 4);
    assert_eq!(second.dataset().rows()[3].staff_id, "y.hara");
    assert_eq!(second.dataset().rows()[3].hours, None);
}

#[test]
fn unreadable_saved_csv_is_a_failure_not_an_error() {
    let wb = sample_timesheet("session_bad_saved_wb", "h.sato", Month::Text("2024-05"));
    let saved = temp_out("session_bad_saved", "csv");
    fs::write(&saved, "a,b\n1,2\n").unwrap();

    let session = Session::open(&[wb], Some(saved.as_path()), &Config::default()).unwrap();
    assert_eq!(session.failures().len(), 1);
    assert_eq!(session.failures()[0].path, saved);
    assert_eq!(session.dataset().len(), 3);
}
