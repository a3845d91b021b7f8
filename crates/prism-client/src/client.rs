//! The reqwest-backed service client.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace};
use url::Url;

use prism_session::SessionContext;

use crate::error::{ClientError, Result};

/// Client for the Prism service API.
///
/// Carries the session context so every call picks up the current access
/// token. Cloning is cheap; clones share the underlying connection pool.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: SessionContext,
}

impl ApiClient {
    /// Creates a client against the given base URL.
    pub fn new(base_url: &str, session: SessionContext) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            session,
        })
    }

    /// The session context this client authenticates with.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))
    }

    /// Attaches the bearer token when the session has one.
    pub(crate) fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.access_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends a request, mapping transport failures and non-2xx statuses into
    /// the client error taxonomy.
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }

        let detail = error_detail(response).await;
        debug!(status = status.as_u16(), detail = %detail, "api error");
        Err(ClientError::Api {
            status: status.as_u16(),
            detail,
        })
    }

    pub(crate) async fn decode<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }

    /// GET a JSON resource.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        trace!(%url, "get");
        let response = self.send(self.authed(self.http.get(url))).await?;
        self.decode(response).await
    }

    /// POST a JSON body and decode a JSON response.
    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.endpoint(path)?;
        trace!(%url, "post");
        let response = self
            .send(self.authed(self.http.post(url).json(body)))
            .await?;
        self.decode(response).await
    }

    /// POST a JSON body, ignoring the response body.
    pub(crate) async fn post_json_no_content<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<()> {
        let url = self.endpoint(path)?;
        self.send(self.authed(self.http.post(url).json(body)))
            .await?;
        Ok(())
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }
}

/// Extracts the server's structured `detail` field from an error body,
/// falling back to the raw body, then the status reason.
async fn error_detail(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(&body) {
        if let Some(detail) = value.get("detail").and_then(|d| d.as_str()) {
            return detail.to_string();
        }
    }
    if !body.trim().is_empty() {
        return body;
    }
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use prism_session::{MemorySessionStore, SessionContext};

    fn session() -> SessionContext {
        SessionContext::empty(Arc::new(MemorySessionStore::new()))
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let result = ApiClient::new("not a url", session());
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let client = ApiClient::new("http://localhost:8000", session()).unwrap();
        let url = client.endpoint("/api/library").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/library");
    }
}
