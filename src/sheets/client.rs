use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};
use url::Url;

use super::{
    credentials::{AccessToken, ServiceAccount, JWT_BEARER_GRANT},
    GridSize, SpreadsheetApi, TabHandle, ValueInputOption, WriteSummary,
};
use crate::{config::SheetsSection, lib::errors::SheetsError, report::Row};

/// Sheets v4 REST client bound to one spreadsheet and one access token.
#[derive(Clone)]
pub struct SheetsClient {
    http: Client,
    base_url: Url,
    spreadsheet_id: String,
    access_token: String,
    value_input_option: ValueInputOption,
}

#[derive(Debug, Deserialize)]
struct BatchUpdateResponse {
    #[serde(default)]
    replies: Vec<BatchReply>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchReply {
    add_sheet: Option<AddSheetReply>,
}

#[derive(Debug, Deserialize)]
struct AddSheetReply {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    sheet_id: i64,
    title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateValuesResponse {
    #[serde(default)]
    updated_range: String,
    #[serde(default)]
    updated_rows: usize,
    #[serde(default)]
    updated_columns: usize,
}

impl SheetsClient {
    /// Exchange the service-account assertion for a token and build a client.
    pub async fn connect(
        settings: &SheetsSection,
        account: &ServiceAccount,
    ) -> Result<Self, SheetsError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|source| SheetsError::Http {
                operation: "client setup",
                source,
            })?;

        let token = fetch_access_token(&http, account).await?;
        info!(
            target: "sheet_push::sheets",
            client_email = %account.client_email,
            expires_in = token.expires_in,
            "Obtained access token"
        );

        Ok(Self {
            http,
            base_url: settings.api_base_url.clone(),
            spreadsheet_id: settings.spreadsheet_id.clone(),
            access_token: token.access_token,
            value_input_option: settings.value_input_option,
        })
    }

    fn endpoint(&self, tail: &[&str]) -> Result<Url, SheetsError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SheetsError::BaseUrl {
                url: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .extend(["v4", "spreadsheets"])
            .extend(tail);
        Ok(url)
    }

    async fn batch_update(
        &self,
        operation: &'static str,
        requests: serde_json::Value,
    ) -> Result<BatchUpdateResponse, SheetsError> {
        let method = format!("{}:batchUpdate", self.spreadsheet_id);
        let url = self.endpoint(&[method.as_str()])?;
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&json!({ "requests": requests }))
            .send()
            .await
            .map_err(|source| SheetsError::Http { operation, source })?;
        let response = ensure_success(operation, response).await?;
        response
            .json()
            .await
            .map_err(|source| SheetsError::Http { operation, source })
    }
}

impl SpreadsheetApi for SheetsClient {
    async fn add_tab(&self, title: &str, grid: GridSize) -> Result<TabHandle, SheetsError> {
        let reply = self
            .batch_update(ADD_TAB, add_sheet_request(title, grid))
            .await
            .map_err(|err| classify_add_tab_error(err, title))?;

        let handle = tab_from_reply(reply)?;
        debug!(
            target: "sheet_push::sheets",
            sheet_id = handle.sheet_id,
            title = %handle.title,
            rows = grid.rows,
            columns = grid.columns,
            "Created tab"
        );
        Ok(handle)
    }

    async fn write_values(&self, range: &str, rows: &[Row]) -> Result<WriteSummary, SheetsError> {
        const OPERATION: &str = "write range";
        let mut url = self.endpoint(&[self.spreadsheet_id.as_str(), "values", range])?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", self.value_input_option.as_str());

        let response = self
            .http
            .put(url)
            .bearer_auth(&self.access_token)
            .json(&json!({
                "range": range,
                "majorDimension": "ROWS",
                "values": rows,
            }))
            .send()
            .await
            .map_err(|source| SheetsError::Http {
                operation: OPERATION,
                source,
            })?;
        let response = ensure_success(OPERATION, response).await?;
        let body: UpdateValuesResponse =
            response.json().await.map_err(|source| SheetsError::Http {
                operation: OPERATION,
                source,
            })?;

        Ok(WriteSummary {
            updated_range: body.updated_range,
            updated_rows: body.updated_rows,
            updated_columns: body.updated_columns,
        })
    }

    async fn delete_tab(&self, tab: &TabHandle) -> Result<(), SheetsError> {
        let requests = json!([{ "deleteSheet": { "sheetId": tab.sheet_id } }]);
        self.batch_update("delete tab", requests).await?;
        Ok(())
    }
}

const ADD_TAB: &str = "create tab";

fn add_sheet_request(title: &str, grid: GridSize) -> serde_json::Value {
    json!([{
        "addSheet": {
            "properties": {
                "title": title,
                "gridProperties": {
                    "rowCount": grid.rows,
                    "columnCount": grid.columns,
                },
            },
        },
    }])
}

/// A 400 whose body says the name "already exists" is a title collision.
fn classify_add_tab_error(err: SheetsError, title: &str) -> SheetsError {
    match err {
        SheetsError::Status {
            status: 400, body, ..
        } if body.contains("already exists") => SheetsError::TabExists {
            title: title.to_string(),
        },
        other => other,
    }
}

fn tab_from_reply(reply: BatchUpdateResponse) -> Result<TabHandle, SheetsError> {
    reply
        .replies
        .into_iter()
        .find_map(|reply| reply.add_sheet)
        .map(|added| TabHandle {
            sheet_id: added.properties.sheet_id,
            title: added.properties.title,
        })
        .ok_or_else(|| SheetsError::UnexpectedResponse {
            operation: ADD_TAB,
            message: "missing addSheet reply".into(),
        })
}

async fn fetch_access_token(
    http: &Client,
    account: &ServiceAccount,
) -> Result<AccessToken, SheetsError> {
    const OPERATION: &str = "token exchange";
    let assertion = account.signed_assertion(Utc::now())?;
    let params = [("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())];

    let response = http
        .post(&account.token_uri)
        .form(&params)
        .send()
        .await
        .map_err(|source| SheetsError::Http {
            operation: OPERATION,
            source,
        })?;
    let response = ensure_success(OPERATION, response).await?;
    response.json().await.map_err(|source| SheetsError::Http {
        operation: OPERATION,
        source,
    })
}

async fn ensure_success(
    operation: &'static str,
    response: Response,
) -> Result<Response, SheetsError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(SheetsError::Status {
        operation,
        status: status.as_u16(),
        body,
    })
}
