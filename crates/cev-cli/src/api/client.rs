//! HTTP API client for the CEV server

use crate::api::{endpoints, types::*};
use crate::error::{CliError, Result};
use reqwest::{header, Client, RequestBuilder, Response, StatusCode};
use std::path::Path;
use std::time::Duration;
use uuid::Uuid;

// ============================================================================
// API Client Constants
// ============================================================================

/// Default timeout for API requests in seconds.
/// Can be overridden via CEV_API_TIMEOUT_SECS environment variable.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 60;

/// API client for the CEV server
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: String, token: Option<String>) -> Result<Self> {
        let timeout_secs = std::env::var("CEV_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_API_TIMEOUT_SECS);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Attach the stored token, failing when none is available
    fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| CliError::auth("No API token found".to_string()))?;
        Ok(builder.header(header::AUTHORIZATION, format!("Token {}", token)))
    }

    /// Turn a non-success response into a CliError, preferring the server's
    /// error envelope message over the bare status code.
    async fn api_error(response: Response) -> CliError {
        let status = response.status();
        let fallback = format!("server returned {}", status);

        let message = match response.json::<ErrorResponse>().await {
            Ok(envelope) => envelope.error.message,
            Err(_) => fallback,
        };

        if status == StatusCode::UNAUTHORIZED {
            CliError::auth(message)
        } else {
            CliError::api(message)
        }
    }

    /// Check server health
    pub async fn health_check(&self) -> Result<bool> {
        let url = endpoints::health_url(&self.base_url);

        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    /// Exchange credentials for an API token
    pub async fn issue_token(&self, username: &str, password: &str) -> Result<String> {
        let url = endpoints::token_url(&self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let envelope: ApiResponse<TokenData> = response.json().await?;
        Ok(envelope.data.token)
    }

    /// Upload a CSV file as a new dataset
    pub async fn upload_csv(&self, path: &Path, name: Option<&str>) -> Result<IngestResult> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.csv".to_string());

        let bytes = std::fs::read(path)
            .map_err(|_| CliError::FileNotFound(path.display().to_string()))?;

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("text/csv")?;

        let mut form = reqwest::multipart::Form::new().part("file", part);
        if let Some(name) = name {
            form = form.text("name", name.to_string());
        }

        let url = endpoints::upload_url(&self.base_url);
        let request = self.authorized(self.client.post(&url))?;
        let response = request.multipart(form).send().await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let envelope: ApiResponse<IngestResult> = response.json().await?;
        Ok(envelope.data)
    }

    /// List the most recent datasets with their summaries
    pub async fn list_datasets(&self) -> Result<Vec<DatasetSummary>> {
        let url = endpoints::datasets_url(&self.base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let envelope: ApiResponse<Vec<DatasetSummary>> = response.json().await?;
        Ok(envelope.data)
    }

    /// Fetch the aggregate summary for one dataset
    pub async fn get_summary(&self, id: Uuid) -> Result<DatasetSummary> {
        let url = endpoints::summary_url(&self.base_url, id);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let envelope: ApiResponse<DatasetSummary> = response.json().await?;
        Ok(envelope.data)
    }

    /// Download the PDF report for one dataset
    pub async fn download_report(&self, id: Uuid) -> Result<Vec<u8>> {
        let url = endpoints::report_url(&self.base_url, id);
        let request = self.authorized(self.client.get(&url))?;
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Download filtered equipment rows as CSV
    pub async fn export_csv(
        &self,
        search: Option<&str>,
        material: Option<&str>,
        min_pressure: Option<f64>,
        min_temperature: Option<f64>,
    ) -> Result<Vec<u8>> {
        let url = endpoints::export_url(
            &self.base_url,
            search,
            material,
            min_pressure,
            min_temperature,
        );
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_health_check_up_and_down() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), None).unwrap();
        assert!(client.health_check().await.unwrap());

        let client = ApiClient::new("http://127.0.0.1:1".to_string(), None).unwrap();
        assert!(!client.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_issue_token_parses_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/auth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "data": { "token": "abc123" }
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), None).unwrap();
        let token = client.issue_token("demo", "demo").await.unwrap();
        assert_eq!(token, "abc123");
    }

    #[tokio::test]
    async fn test_error_envelope_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/datasets"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "success": false,
                "error": { "code": "INTERNAL_ERROR", "message": "A database error occurred" }
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), None).unwrap();
        let error = client.list_datasets().await.unwrap_err();
        assert!(error.to_string().contains("A database error occurred"));
    }

    #[tokio::test]
    async fn test_report_download_sends_token(){
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("authorization", "Token secret"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.7".to_vec()))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), Some("secret".to_string())).unwrap();
        let bytes = client.download_report(Uuid::new_v4()).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_report_download_without_token_fails_locally() {
        let client = ApiClient::new("http://localhost:8000".to_string(), None).unwrap();
        let error = client.download_report(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(error, CliError::Auth(_)));
    }
}
