use reqwest::Method;
use uuid::Uuid;
use validator::Validate;

use crate::api::ApiClient;
use crate::dto::{GeminiChatRequest, GeminiChatResponse, SendMessageRequest};
use crate::error::ClientResult;
use crate::models::chat::{ChatMessage, ChatSession};

impl ApiClient {
    pub async fn create_chat_session(&self) -> ClientResult<ChatSession> {
        let request = self.authed(Method::POST, "/chat/sessions").await?;
        self.execute(request).await
    }

    pub async fn list_chat_messages(&self, session_id: Uuid) -> ClientResult<Vec<ChatMessage>> {
        let request = self
            .authed(Method::GET, &format!("/chat/sessions/{}/messages", session_id))
            .await?;
        self.execute(request).await
    }

    /// Post a user message into a session; the response is the assistant's
    /// reply.
    pub async fn send_chat_message(
        &self,
        session_id: Uuid,
        request: &SendMessageRequest,
    ) -> ClientResult<ChatMessage> {
        request.validate()?;
        let builder = self
            .authed(Method::POST, &format!("/chat/sessions/{}/messages", session_id))
            .await?;
        self.execute(builder.json(request)).await
    }

    /// The direct model endpoint — no transcript is persisted server-side
    /// unless a session id is attached.
    pub async fn send_gemini_message(
        &self,
        request: &GeminiChatRequest,
    ) -> ClientResult<GeminiChatResponse> {
        request.validate()?;
        let builder = self.authed(Method::POST, "/chat/gemini").await?;
        self.execute(builder.json(request)).await
    }
}
