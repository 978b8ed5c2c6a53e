//! Google Sheets `values.append` client.

use crate::google_auth::ServiceAccountAuth;
use crate::RowAppender;
use async_trait::async_trait;
use heridas_core::{LogError, LogResult};
use reqwest::Url;

pub struct SheetsAppender {
    client: reqwest::Client,
    auth: ServiceAccountAuth,
    base_url: String,
    spreadsheet_id: String,
    range: String,
}

impl SheetsAppender {
    pub fn new(
        client: reqwest::Client,
        auth: ServiceAccountAuth,
        base_url: &str,
        spreadsheet_id: &str,
        range: &str,
    ) -> Self {
        Self {
            client,
            auth,
            base_url: base_url.trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
            range: range.to_string(),
        }
    }

    /// `{base}/v4/spreadsheets/{id}/values/{range}:append`, with each segment escaped.
    fn append_url(&self) -> LogResult<Url> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| LogError::Append(format!("bad base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| LogError::Append("base URL cannot carry a path".into()))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str(), "values"])
            .push(&format!("{}:append", self.range));
        Ok(url)
    }
}

#[async_trait]
impl RowAppender for SheetsAppender {
    async fn append(&self, row: &[String]) -> LogResult<()> {
        let url = self.append_url()?;
        let token = self.auth.access_token().await?;

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&serde_json::json!({ "values": [row] }))
            .send()
            .await
            .map_err(|e| LogError::Append(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = crate::error_excerpt(response).await;
            return Err(LogError::Append(format!("Sheets returned {status}: {body}")));
        }
        Ok(())
    }
}
