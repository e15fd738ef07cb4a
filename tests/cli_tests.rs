use calamine::{Reader, open_workbook_auto};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

mod common;
use common::{Month, kousu, no_config, sample_timesheet, temp_out};

fn arg(p: &std::path::Path) -> String {
    p.to_string_lossy().to_string()
}

#[test]
fn init_writes_a_complete_config() {
    let cfg = temp_out("cli_init", "conf");

    kousu()
        .args(["--config", &arg(&cfg), "init"])
        .assert()
        .success()
        .stdout(contains("Config file"));

    let text = fs::read_to_string(&cfg).unwrap();
    assert!(text.contains("blank_row_threshold"));
    assert!(text.contains("k.fujita"));

    kousu()
        .args(["--config", &arg(&cfg), "config", "--check"])
        .assert()
        .success()
        .stdout(contains("Configuration file is complete."));

    // a second init keeps the file
    kousu()
        .args(["--config", &arg(&cfg), "init"])
        .assert()
        .success()
        .stdout(contains("already exists"));
}

#[test]
fn migrate_fills_missing_keys() {
    let cfg = temp_out("cli_migrate", "conf");
    fs::write(&cfg, "fallback_content: その他\n").unwrap();

    kousu()
        .args(["--config", &arg(&cfg), "config", "--check"])
        .assert()
        .success()
        .stdout(contains("Missing fields").and(contains("work_contents")));

    kousu()
        .args(["--config", &arg(&cfg), "config", "--migrate"])
        .assert()
        .success()
        .stdout(contains("Configuration updated"));

    kousu()
        .args(["--config", &arg(&cfg), "config", "--check"])
        .assert()
        .success()
        .stdout(contains("Configuration file is complete."));
}

#[test]
fn invalid_config_is_an_error() {
    let cfg = temp_out("cli_bad_cfg", "conf");
    fs::write(&cfg, "work_contents: []\n").unwrap();
    let wb = sample_timesheet("cli_bad_cfg_wb", "h.sato", Month::Text("2024-05"));

    kousu()
        .args(["--config", &arg(&cfg), "list", &arg(&wb)])
        .assert()
        .failure()
        .stderr(contains("work_contents"));
}

#[test]
fn list_prints_the_filtered_rows() {
    let wb = sample_timesheet("cli_list", "h.sato", Month::Date(2024, 5, 1));

    kousu()
        .args(["--config", &no_config("cli_list"), "list", &arg(&wb)])
        .assert()
        .success()
        .stdout(contains("Filtered rows: 3 of 3"))
        .stdout(contains("点検"))
        .stdout(contains("2024_05"))
        .stdout(contains("Total: 9.0 h"))
        .stdout(contains("参考行").not());
}

#[test]
fn list_filters_by_staff() {
    let a = sample_timesheet("cli_filter_a", "h.sato", Month::Text("2024-05"));
    let b = sample_timesheet("cli_filter_b", "k.fujita", Month::Text("2024-05"));

    kousu()
        .args([
            "--config",
            &no_config("cli_filter"),
            "list",
            &arg(&a),
            &arg(&b),
            "--branch",
            "大阪",
        ])
        .assert()
        .success()
        .stdout(contains("Filtered rows: 3 of 6"))
        .stdout(contains("h.sato").not());

    kousu()
        .args([
            "--config",
            &no_config("cli_filter"),
            "list",
            &arg(&a),
            "--staff",
            "nobody",
        ])
        .assert()
        .success()
        .stdout(contains("Unknown staff id 'nobody'"))
        .stdout(contains("Filtered rows: 0 of 3"));
}

#[test]
fn a_bad_file_is_reported_and_skipped() {
    let good = sample_timesheet("cli_bad_good", "h.sato", Month::Text("2024-05"));
    let bad = temp_out("cli_bad_broken", "xlsx");
    fs::write(&bad, "not a workbook").unwrap();

    kousu()
        .args(["--config", &no_config("cli_bad"), "list", &arg(&bad), &arg(&good)])
        .assert()
        .success()
        .stderr(contains("cli_bad_broken"))
        .stdout(contains("Filtered rows: 3 of 3"));
}

#[test]
fn no_input_prints_a_warning() {
    kousu()
        .args(["--config", &no_config("cli_empty"), "summary"])
        .assert()
        .success()
        .stdout(contains("No data"));
}

#[test]
fn facets_json_lists_candidate_values() {
    let a = sample_timesheet("cli_facets_a", "h.sato", Month::Text("2024-06"));
    let b = sample_timesheet("cli_facets_b", "k.fujita", Month::Text("2024-05"));

    let out = kousu()
        .args(["--config", &no_config("cli_facets"), "facets", "--json", &arg(&a), &arg(&b)])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let v: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["months"], serde_json::json!(["2024_05", "2024_06"]));
    assert_eq!(v["staff"], serde_json::json!(["h.sato", "k.fujita"]));
    assert_eq!(v["branches"], serde_json::json!(["大阪", "東京"]));
    assert_eq!(v["contents"].as_array().unwrap().len(), 22);
}

#[test]
fn facets_text_marks_the_default_selection() {
    let wb = sample_timesheet("cli_facets_text", "h.sato", Month::Text("2024-05"));

    kousu()
        .args(["--config", &no_config("cli_facets_text"), "facets", &arg(&wb)])
        .assert()
        .success()
        .stdout(contains("[x] 点検"))
        .stdout(contains("[ ] 教育"));
}

#[test]
fn summary_json_views() {
    let a = sample_timesheet("cli_sum_a", "h.sato", Month::Text("2024-05"));
    let b = sample_timesheet("cli_sum_b", "k.fujita", Month::Text("2024-05"));

    let out = kousu()
        .args([
            "--config",
            &no_config("cli_sum"),
            "summary",
            "--json",
            "--staff-of",
            "点検",
            "--for-staff",
            "k.fujita",
            "--cross",
            "branch",
            &arg(&a),
            &arg(&b),
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let v: Value = serde_json::from_slice(&out).unwrap();

    let content = v["work_content"].as_array().unwrap();
    assert_eq!(content.len(), 22);
    let tenken = content.iter().find(|t| t["key"] == "点検").unwrap();
    assert_eq!(tenken["hours"], 6.0);

    assert_eq!(v["shares"].as_array().unwrap().len(), 3);
    assert_eq!(v["staff_of"].as_array().unwrap().len(), 2);
    assert_eq!(v["for_staff"].as_array().unwrap().len(), 3);
    assert_eq!(v["crosstab"]["dimension"], "branch");
    assert_eq!(v["crosstab"]["columns"], serde_json::json!(["大阪", "東京"]));
}

#[test]
fn summary_text_by_staff() {
    let a = sample_timesheet("cli_sum_text_a", "h.sato", Month::Text("2024-05"));
    let b = sample_timesheet("cli_sum_text_b", "k.fujita", Month::Text("2024-05"));

    kousu()
        .args([
            "--config",
            &no_config("cli_sum_text"),
            "summary",
            "--by",
            "staff",
            &arg(&a),
            &arg(&b),
        ])
        .assert()
        .success()
        .stdout(contains("担当者別 工数 [h]"))
        .stdout(contains("k.fujita"))
        .stdout(contains("9.0"));

    kousu()
        .args(["--config", &no_config("cli_sum_text"), "summary", &arg(&a)])
        .assert()
        .success()
        .stdout(contains("作業内容別 工数 [h]"))
        .stdout(contains("合計"))
        .stdout(contains("%"));
}

#[test]
fn export_csv_then_accumulate() {
    let wb = sample_timesheet("cli_acc_wb", "h.sato", Month::Text("2024-05"));
    let csv = temp_out("cli_acc", "csv");

    kousu()
        .args([
            "--config",
            &no_config("cli_acc"),
            "export",
            &arg(&wb),
            "--file",
            &arg(&csv),
        ])
        .assert()
        .success()
        .stdout(contains("CSV export completed (3 rows)"));

    let bytes = fs::read(&csv).unwrap();
    assert!(bytes.starts_with("\u{FEFF}".as_bytes()));
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.contains("作業分類,作業内容,作業分類元,工数 [h],作業内容_分類,月,担当者,支店"));
    assert!(text.contains("保守,点検,保守,3.0,点検,2024_05,h.sato,東京"));

    // saved CSV alone
    kousu()
        .args([
            "--config",
            &no_config("cli_acc"),
            "list",
            "--saved",
            &arg(&csv),
        ])
        .assert()
        .success()
        .stdout(contains("Filtered rows: 3 of 3"));

    // same workbook again on top of the saved CSV: no duplicates, file overwritten
    let other = sample_timesheet("cli_acc_other", "y.hara", Month::Text("2024-06"));
    kousu()
        .args([
            "--config",
            &no_config("cli_acc"),
            "export",
            &arg(&wb),
            &arg(&other),
            "--saved",
            &arg(&csv),
            "--file",
            &arg(&csv),
            "--force",
        ])
        .assert()
        .success()
        .stdout(contains("CSV export completed (6 rows)"));
}

#[test]
fn export_json_format_from_extension() {
    let wb = sample_timesheet("cli_json_wb", "k.fujita", Month::Text("2024-05"));
    let out = temp_out("cli_json", "json");

    kousu()
        .args([
            "--config",
            &no_config("cli_json"),
            "export",
            &arg(&wb),
            "--file",
            &arg(&out),
        ])
        .assert()
        .success()
        .stdout(contains("JSON export completed"));

    let v: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let rows = v.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["工数 [h]"], 3.0);
    assert_eq!(rows[0]["支店"], "大阪");
}

#[test]
fn export_xlsx_writes_a_readable_workbook() {
    let wb = sample_timesheet("cli_xlsx_wb", "h.sato", Month::Text("2024-05"));
    let out = temp_out("cli_xlsx", "xlsx");

    kousu()
        .args([
            "--config",
            &no_config("cli_xlsx"),
            "export",
            &arg(&wb),
            "--format",
            "xlsx",
            "--file",
            &arg(&out),
        ])
        .assert()
        .success()
        .stdout(contains("XLSX export completed"));

    let mut book = open_workbook_auto(&out).unwrap();
    let range = book.worksheet_range("工数データ").unwrap();
    assert_eq!(range.height(), 4);
    assert_eq!(range.width(), 8);
}

#[test]
fn export_filtered_by_content() {
    let wb = sample_timesheet("cli_exp_filter_wb", "h.sato", Month::Text("2024-05"));
    let out = temp_out("cli_exp_filter", "csv");

    kousu()
        .args([
            "--config",
            &no_config("cli_exp_filter"),
            "export",
            &arg(&wb),
            "--content",
            "移動",
            "--file",
            &arg(&out),
        ])
        .assert()
        .success()
        .stdout(contains("(1 rows)"));
}

#[test]
fn init_and_export_create_missing_directories() {
    let dir = tempdir().expect("Failed to create temp dir");
    let cfg = dir.path().join("nested").join("kousu.conf");

    kousu()
        .args(["--config", &arg(&cfg), "init"])
        .assert()
        .success();
    assert!(cfg.exists());

    let wb = sample_timesheet("cli_nested_wb", "h.sato", Month::Text("2024-05"));
    let out = dir.path().join("reports").join("2024").join("kousu.csv");

    kousu()
        .args(["--config", &arg(&cfg), "export", &arg(&wb), "--file", &arg(&out)])
        .assert()
        .success();
    assert!(out.exists());
}
