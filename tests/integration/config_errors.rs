use crate::common::{Workspace, CREDENTIALS, SHEET_ID};

#[test]
fn missing_sheet_id_exits_one() {
    let workspace = Workspace::new();
    workspace.write("reports/exports/latest_export.csv", "a,b\n1,2\n");

    let output = workspace
        .command(None, Some(CREDENTIALS))
        .output()
        .expect("process should start");

    assert_eq!(output.status.code(), Some(1), "output: {output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("sheets.spreadsheet_id"), "stderr: {stderr}");
}

#[test]
fn missing_credentials_exits_one() {
    let workspace = Workspace::new();

    let output = workspace
        .command(Some(SHEET_ID), None)
        .output()
        .expect("process should start");

    assert_eq!(output.status.code(), Some(1), "output: {output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("sheets.credentials_base64"),
        "stderr: {stderr}"
    );
}

#[test]
fn undecodable_credentials_fail_before_source_lookup() {
    let workspace = Workspace::new();

    let output = workspace
        .command(Some(SHEET_ID), Some("%%not-base64%%"))
        .output()
        .expect("process should start");

    assert_eq!(output.status.code(), Some(1), "output: {output:?}");
    assert!(output.stdout.is_empty());
}

#[test]
fn explicit_config_path_must_exist() {
    let workspace = Workspace::new();

    let output = workspace.run(&["--config", "missing.toml"]);

    assert_eq!(output.status.code(), Some(1), "output: {output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing.toml"), "stderr: {stderr}");
}
