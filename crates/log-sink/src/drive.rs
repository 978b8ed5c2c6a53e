//! Google Drive multipart upload of the source photograph.

use crate::google_auth::ServiceAccountAuth;
use crate::{ArchiveUpload, ImageArchive};
use async_trait::async_trait;
use heridas_core::{LogError, LogResult};
use serde::Deserialize;

pub struct DriveArchive {
    client: reqwest::Client,
    auth: ServiceAccountAuth,
    base_url: String,
    folder_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveFile {
    id: String,
    web_view_link: Option<String>,
}

impl DriveFile {
    fn link(self) -> String {
        self.web_view_link
            .unwrap_or_else(|| format!("https://drive.google.com/file/d/{}/view", self.id))
    }
}

impl DriveArchive {
    pub fn new(
        client: reqwest::Client,
        auth: ServiceAccountAuth,
        base_url: &str,
        folder_id: &str,
    ) -> Self {
        Self {
            client,
            auth,
            base_url: base_url.trim_end_matches('/').to_string(),
            folder_id: folder_id.to_string(),
        }
    }

    /// `multipart/related` body: JSON metadata part followed by the raw image part.
    fn multipart_body(
        &self,
        boundary: &str,
        upload: &ArchiveUpload<'_>,
        image_bytes: &[u8],
    ) -> LogResult<Vec<u8>> {
        let metadata = serde_json::to_string(&serde_json::json!({
            "name": upload.file_name,
            "parents": [self.folder_id],
            "mimeType": upload.image.mime_type(),
        }))
        .map_err(|e| LogError::Upload(e.to_string()))?;

        let mut body = Vec::with_capacity(image_bytes.len() + metadata.len() + 256);
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Type: {}\r\n\r\n",
                upload.image.mime_type()
            )
            .as_bytes(),
        );
        body.extend_from_slice(image_bytes);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
        Ok(body)
    }
}

#[async_trait]
impl ImageArchive for DriveArchive {
    async fn upload(&self, upload: ArchiveUpload<'_>) -> LogResult<String> {
        let image_bytes = upload
            .image
            .decode()
            .map_err(|e| LogError::Upload(e.to_string()))?;
        let boundary = format!("heridas-{}", uuid::Uuid::new_v4().simple());
        let body = self.multipart_body(&boundary, &upload, &image_bytes)?;
        let token = self.auth.access_token().await?;

        let response = self
            .client
            .post(format!("{}/upload/drive/v3/files", self.base_url))
            .bearer_auth(token)
            .query(&[
                ("uploadType", "multipart"),
                ("fields", "id,webViewLink"),
                ("supportsAllDrives", "true"),
            ])
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={boundary}"),
            )
            .body(body)
            .send()
            .await
            .map_err(|e| LogError::Upload(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = crate::error_excerpt(response).await;
            return Err(LogError::Upload(format!("Drive returned {status}: {body}")));
        }

        let file: DriveFile = response
            .json()
            .await
            .map_err(|e| LogError::Upload(format!("invalid Drive response: {e}")))?;
        Ok(file.link())
    }
}
