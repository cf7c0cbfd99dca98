use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use tempfile::{tempdir, TempDir};

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_sheet-push");
pub const SHEET_ID: &str = "1AbCdEfGhIjKlMnOpQrStUvWxYz_0123456789";
/// Base64 of a service-account document whose key is never used.
pub const CREDENTIALS: &str = "eyJjbGllbnRfZW1haWwiOiJwdXNoQGV4YW1wbGUuaWFtLmdzZXJ2aWNlYWNjb3VudC5jb20iLCJwcml2YXRlX2tleSI6InVudXNlZCJ9";

/// Temporary working directory the binary is launched from.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempdir().expect("can create temporary directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("can create parent directory");
        }
        fs::write(&path, contents).expect("can write file");
        path
    }

    /// Command with a clean environment carrying the given id and credentials.
    pub fn command(&self, sheet_id: Option<&str>, credentials: Option<&str>) -> Command {
        let mut command = Command::new(BINARY_PATH);
        command
            .current_dir(self.path())
            .env_remove("SHEET_ID")
            .env_remove("GOOGLE_SHEETS_CREDENTIALS_BASE64")
            .env_remove("SHEET_PUSH_CONFIG")
            .env("RUST_LOG", "warn");
        if let Some(id) = sheet_id {
            command.env("SHEET_ID", id);
        }
        if let Some(credentials) = credentials {
            command.env("GOOGLE_SHEETS_CREDENTIALS_BASE64", credentials);
        }
        command
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command(Some(SHEET_ID), Some(CREDENTIALS))
            .args(args)
            .output()
            .expect("process should start")
    }
}

pub fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|err| {
        panic!(
            "stdout should be JSON ({err}): {stdout}\nstderr: {}",
            String::from_utf8_lossy(&output.stderr)
        )
    })
}
