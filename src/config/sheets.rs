use std::{fmt, path::Path};

use serde::Deserialize;
use url::Url;

use crate::{lib::errors::ConfigError, sheets::ValueInputOption};

pub const DEFAULT_API_BASE_URL: &str = "https://sheets.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_SPREADSHEET_ID_LEN: usize = 200;

/// Spreadsheet service settings.
#[derive(Clone)]
pub struct SheetsSection {
    pub spreadsheet_id: String,
    pub credentials_base64: String,
    pub api_base_url: Url,
    pub timeout_secs: u64,
    pub value_input_option: ValueInputOption,
}

impl fmt::Debug for SheetsSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetsSection")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("credentials_base64", &"<redacted>")
            .field("api_base_url", &self.api_base_url.as_str())
            .field("timeout_secs", &self.timeout_secs)
            .field("value_input_option", &self.value_input_option)
            .finish()
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawSheetsSection {
    pub spreadsheet_id: Option<String>,
    pub credentials_base64: Option<String>,
    pub api_base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub value_input_option: Option<String>,
}

pub fn parse_sheets_section(
    raw: Option<RawSheetsSection>,
    path: &Path,
) -> Result<SheetsSection, ConfigError> {
    let sheets_raw = raw.unwrap_or_default();

    let spreadsheet_id = non_blank(sheets_raw.spreadsheet_id).ok_or(ConfigError::MissingField {
        path: path.to_path_buf(),
        field: "sheets.spreadsheet_id",
    })?;
    validate_spreadsheet_id(path, &spreadsheet_id)?;

    let credentials_base64 =
        non_blank(sheets_raw.credentials_base64).ok_or(ConfigError::MissingField {
            path: path.to_path_buf(),
            field: "sheets.credentials_base64",
        })?;

    let api_base_url = parse_base_url(
        path,
        non_blank(sheets_raw.api_base_url).as_deref().unwrap_or(DEFAULT_API_BASE_URL),
    )?;

    let timeout_secs = sheets_raw.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
    validate_timeout(path, timeout_secs)?;

    let value_input_option = match non_blank(sheets_raw.value_input_option) {
        None => ValueInputOption::Raw,
        Some(raw) => ValueInputOption::parse(&raw).ok_or_else(|| ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "sheets.value_input_option",
            message: format!("Use RAW or USER_ENTERED (got `{raw}`)"),
        })?,
    };

    Ok(SheetsSection {
        spreadsheet_id,
        credentials_base64,
        api_base_url,
        timeout_secs,
        value_input_option,
    })
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn validate_spreadsheet_id(path: &Path, id: &str) -> Result<(), ConfigError> {
    let well_formed = id.len() <= MAX_SPREADSHEET_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if well_formed {
        return Ok(());
    }
    Err(ConfigError::InvalidField {
        path: path.to_path_buf(),
        field: "sheets.spreadsheet_id",
        message: "Use the ID from the spreadsheet URL (letters, digits, `-`, `_`)".into(),
    })
}

fn parse_base_url(path: &Path, raw: &str) -> Result<Url, ConfigError> {
    let invalid = |message: String| ConfigError::InvalidField {
        path: path.to_path_buf(),
        field: "sheets.api_base_url",
        message,
    };
    let url = Url::parse(raw).map_err(|err| invalid(format!("`{raw}` is not a URL: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(invalid(format!("`{raw}` must be an http(s) base URL")));
    }
    Ok(url)
}

fn validate_timeout(path: &Path, secs: u64) -> Result<(), ConfigError> {
    if (1..=600).contains(&secs) {
        return Ok(());
    }
    Err(ConfigError::InvalidField {
        path: path.to_path_buf(),
        field: "sheets.timeout_secs",
        message: "Specify a value between 1 and 600 seconds".into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str) -> RawSheetsSection {
        RawSheetsSection {
            spreadsheet_id: Some(id.into()),
            credentials_base64: Some("e30=".into()),
            ..RawSheetsSection::default()
        }
    }

    #[test]
    fn defaults_apply_when_only_required_fields_set() {
        let section = parse_sheets_section(Some(raw("1AbC-def_Ghi")), Path::new("env"))
            .expect("valid section");
        assert_eq!(section.api_base_url.as_str(), "https://sheets.googleapis.com/");
        assert_eq!(section.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(section.value_input_option, ValueInputOption::Raw);
    }

    #[test]
    fn spreadsheet_id_with_slashes_is_rejected() {
        let error = parse_sheets_section(Some(raw("abc/def")), Path::new("env"))
            .expect_err("slash is not allowed");
        match error {
            ConfigError::InvalidField { field, .. } => assert_eq!(field, "sheets.spreadsheet_id"),
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn debug_output_redacts_credentials() {
        let section = parse_sheets_section(Some(raw("abc")), Path::new("env")).expect("valid");
        assert!(!format!("{section:?}").contains("e30="));
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let mut section = raw("abc");
        section.api_base_url = Some("ftp://example.com".into());
        let error = parse_sheets_section(Some(section), Path::new("env")).expect_err("ftp");
        match error {
            ConfigError::InvalidField { field, .. } => assert_eq!(field, "sheets.api_base_url"),
            other => panic!("Unexpected error: {other:?}"),
        }
    }
}
