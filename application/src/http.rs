use crate::ports::AdminApi;
use crate::session::AdminCredential;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use shared::config::{Config, PLAN_PATH, USAGE_PATH};
use shared::{Error, Result};
use shared_http::api::{
    ErrorResponse, Plan, PlanUpdateRequest, PlanUpdateResponse, UsageQuery, UsageStats,
};
use tracing::{debug, warn};

/// Admin API client over HTTP.
#[derive(Clone)]
pub struct HttpAdminApi {
    client: Client,
    base_url: String,
}

impl HttpAdminApi {
    /// `same_origin` is the page origin when running in a browser.
    pub fn new(config: &Config, same_origin: Option<&str>) -> Self {
        Self {
            client: build_client(config),
            base_url: config.base_url(same_origin),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_client(config: &Config) -> Client {
    Client::builder()
        .timeout(config.request_timeout)
        .build()
        .unwrap_or_else(|e| {
            warn!("Falling back to default HTTP client: {}", e);
            Client::new()
        })
}

// The browser owns timeouts for fetch.
#[cfg(target_arch = "wasm32")]
fn build_client(_config: &Config) -> Client {
    Client::new()
}

#[async_trait(?Send)]
impl AdminApi for HttpAdminApi {
    async fn fetch_usage(&self, credential: &AdminCredential) -> Result<UsageStats> {
        let url = self.url(USAGE_PATH);
        debug!("Fetching usage stats from {}", url);
        let response = self
            .client
            .get(&url)
            .query(&UsageQuery {
                admin_token: credential.expose(),
            })
            .send()
            .await
            .map_err(transport)?;

        let body = read_success_body(response).await?;
        let value: Value = serde_json::from_str(&body).map_err(malformed)?;
        UsageStats::try_from(value)
    }

    async fn update_plan(
        &self,
        credential: &AdminCredential,
        email: &str,
        plan: Plan,
    ) -> Result<PlanUpdateResponse> {
        let url = self.url(PLAN_PATH);
        debug!("Updating plan at {}", url);
        let response = self
            .client
            .put(&url)
            .json(&PlanUpdateRequest {
                email,
                plan,
                admin_token: credential.expose(),
            })
            .send()
            .await
            .map_err(transport)?;

        let body = read_success_body(response).await?;
        serde_json::from_str(&body).map_err(malformed)
    }
}

/// Reads the body, turning any non-2xx status into an error.
async fn read_success_body(response: Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await.map_err(transport)?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(status_error(status, &body))
    }
}

fn status_error(status: StatusCode, body: &str) -> Error {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        warn!("Admin API refused the admin token ({})", status);
        return Error::Unauthorized(status.as_u16());
    }
    let detail = serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.detail_text())
        .unwrap_or_else(|_| body.chars().take(200).collect());
    Error::Rejected {
        status: status.as_u16(),
        detail,
    }
}

fn transport(err: reqwest::Error) -> Error {
    Error::Transport(err.to_string())
}

fn malformed(err: serde_json::Error) -> Error {
    Error::MalformedBody(err.to_string())
}
