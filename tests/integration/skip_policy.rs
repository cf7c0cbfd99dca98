use crate::common::{stdout_json, Workspace};

#[test]
fn absent_default_export_exits_zero_without_upload() {
    let workspace = Workspace::new();

    let output = workspace.run(&[]);

    assert_eq!(output.status.code(), Some(0), "output: {output:?}");
    let payload = stdout_json(&output);
    assert_eq!(payload["status"], "skipped");
    assert!(
        payload["source"]
            .as_str()
            .is_some_and(|source| source.contains("latest_export.csv")),
        "payload: {payload}"
    );
}

#[test]
fn unmatched_pattern_is_skipped_by_default() {
    let workspace = Workspace::new();

    let output = workspace.run(&["--latest", "reports/key_metrics_*.txt"]);

    assert_eq!(output.status.code(), Some(0), "output: {output:?}");
    assert_eq!(stdout_json(&output)["status"], "skipped");
}

#[test]
fn unmatched_pattern_fails_when_policy_is_fail() {
    let workspace = Workspace::new();
    workspace.write(
        "sheet-push.toml",
        "[source]\npattern = \"reports/key_metrics_*.txt\"\nformat = \"key_value\"\non_missing = \"fail\"\n",
    );

    let output = workspace.run(&[]);

    assert_eq!(output.status.code(), Some(1), "output: {output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("key_metrics_*.txt"), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
}
