use crate::common::{stdout_json, Workspace};

#[test]
fn dry_run_plans_csv_upload() {
    let workspace = Workspace::new();
    workspace.write(
        "reports/exports/latest_export.csv",
        "date, visits, errors\n2024-03-04, 120, 3\n2024-03-05, 98\n",
    );

    let output = workspace.run(&["--dry-run"]);

    assert_eq!(output.status.code(), Some(0), "output: {output:?}");
    let payload = stdout_json(&output);
    assert_eq!(payload["status"], "planned");
    assert_eq!(payload["rows"], 3);
    assert_eq!(payload["columns"], 3);
    let tab = payload["tab"].as_str().expect("tab is a string");
    assert!(tab.starts_with("Run-"), "tab: {tab}");
    assert_eq!(payload["range"], format!("'{tab}'!A1:C3"));
}

#[test]
fn dry_run_picks_lexicographically_latest_metrics_file() {
    let workspace = Workspace::new();
    workspace.write("reports/key_metrics_2024-01-01.txt", "visits: 1\n");
    workspace.write(
        "reports/key_metrics_2024-02-01.txt",
        "visits: 120\nerrors: 3\n",
    );

    let output = workspace.run(&[
        "--dry-run",
        "--latest",
        "reports/key_metrics_*.txt",
        "--format",
        "key-value",
    ]);

    assert_eq!(output.status.code(), Some(0), "output: {output:?}");
    let payload = stdout_json(&output);
    assert_eq!(payload["status"], "planned");
    assert!(
        payload["source"]
            .as_str()
            .is_some_and(|source| source.ends_with("key_metrics_2024-02-01.txt")),
        "payload: {payload}"
    );
    assert_eq!(payload["rows"], 2);
    assert_eq!(payload["columns"], 2);
}

#[test]
fn minute_naming_drops_seconds_and_suffix() {
    let workspace = Workspace::new();
    workspace.write("reports/exports/latest_export.csv", "a\n");
    workspace.write("sheet-push.toml", "[tab]\nnaming = \"minute\"\n");

    let output = workspace.run(&["--dry-run"]);

    assert_eq!(output.status.code(), Some(0), "output: {output:?}");
    let payload = stdout_json(&output);
    let tab = payload["tab"].as_str().expect("tab is a string");
    // Run-YYYY-MM-DDTHH-MM
    assert_eq!(tab.len(), "Run-2024-03-05T14-07".len(), "tab: {tab}");
}
