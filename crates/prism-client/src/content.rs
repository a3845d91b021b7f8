//! Content extraction and library endpoints.

use serde::{Deserialize, Serialize};
use tracing::debug;

use prism_models::LibraryItem;

use crate::client::ApiClient;
use crate::error::Result;

/// Text extracted from a URL or uploaded document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedContent {
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
struct ExtractUrlBody<'a> {
    url: &'a str,
}

impl ApiClient {
    /// Extracts readable text from a web URL.
    pub async fn extract_url(&self, url: &str) -> Result<ExtractedContent> {
        debug!(url, "extracting url");
        self.post_json("/api/content/extract-url", &ExtractUrlBody { url })
            .await
    }

    /// Uploads a document (PDF or plain text) and extracts its text.
    pub async fn upload_document(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<ExtractedContent> {
        debug!(file_name, size = bytes.len(), "uploading document");

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let url = self.endpoint("/api/content/upload")?;
        let response = self
            .send(self.authed(self.http().post(url).multipart(form)))
            .await?;
        self.decode(response).await
    }

    /// Lists the user's library of ingested content.
    pub async fn list_library(&self) -> Result<Vec<LibraryItem>> {
        self.get_json("/api/library").await
    }
}
