use reqwest::Method;
use validator::Validate;

use crate::api::ApiClient;
use crate::dto::{AuthResponse, LoginRequest, MessageResponse, RegisterRequest};
use crate::error::{ClientError, ClientResult};
use crate::models::user::User;

impl ApiClient {
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthResponse> {
        request.validate()?;
        let response: AuthResponse = self
            .execute(self.public(Method::POST, "/auth/register").json(request))
            .await?;
        self.session().set_token(&response.access_token).await?;
        Ok(response)
    }

    pub async fn login(&self, request: &LoginRequest) -> ClientResult<AuthResponse> {
        request.validate()?;
        let response: AuthResponse = self
            .execute(self.public(Method::POST, "/auth/login").json(request))
            .await?;
        self.session().set_token(&response.access_token).await?;
        Ok(response)
    }

    pub async fn me(&self) -> ClientResult<User> {
        let request = self.authed(Method::GET, "/auth/me").await?;
        self.execute(request).await
    }

    /// Best-effort server-side logout. The local token is dropped regardless
    /// of what the server says — a logout must always succeed locally.
    pub async fn logout(&self) -> ClientResult<()> {
        let result = match self.authed(Method::POST, "/auth/logout").await {
            Ok(request) => self.execute::<MessageResponse>(request).await.map(|_| ()),
            Err(e) => Err(e),
        };

        self.session().evict().await?;

        match result {
            Ok(()) | Err(ClientError::Unauthorized) => Ok(()),
            Err(e) => {
                tracing::debug!(error = %e, "Server-side logout failed, token cleared locally");
                Ok(())
            }
        }
    }
}
