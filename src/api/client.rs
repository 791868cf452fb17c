use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::auth::Session;
use crate::config::Config;
use crate::dto::ErrorResponse;
use crate::error::{ClientError, ClientResult};

/// HTTP plumbing shared by every endpoint call: base-URL joining, the bearer
/// header, the backend error envelope, and the uniform 401 handling.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(config: &Config, session: Session) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request builder for unauthenticated endpoints (register, login).
    pub(crate) fn public(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!(%method, path, "API request");
        self.http.request(method, self.endpoint(path))
    }

    /// Request builder carrying the bearer token. Fails with `Unauthorized`
    /// before any network traffic when no usable token is stored — this is
    /// what turns an unauthenticated page visit into the `/auth` redirect.
    pub(crate) async fn authed(&self, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        let token = self.session.require_token().await?;
        tracing::debug!(%method, path, "API request");
        Ok(self
            .http
            .request(method, self.endpoint(path))
            .bearer_auth(token))
    }

    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> ClientResult<T> {
        let response = request.send().await?;
        self.read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(&self, response: Response) -> ClientResult<T> {
        let status = response.status();

        // 401 is the one special-cased failure: the session is gone, so the
        // stored tokens go with it and the caller redirects to login.
        if status == StatusCode::UNAUTHORIZED {
            if let Err(e) = self.session.evict().await {
                tracing::warn!(error = %e, "Failed to clear stored tokens after 401");
            }
            return Err(ClientError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = ErrorResponse::message_from(&body)
                .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<T>().await.map_err(ClientError::from)
    }
}
