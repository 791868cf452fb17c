//! Page-scoped chatbot state: one lazily created server session, a local
//! transcript, and optimistic sends.

use uuid::Uuid;
use validator::Validate;

use crate::api::ApiClient;
use crate::dto::{GeminiChatRequest, SendMessageRequest};
use crate::error::ClientResult;
use crate::models::chat::{ChatMessage, ChatSession, Delivery};

pub struct ChatStore {
    api: ApiClient,
    session: Option<ChatSession>,
    messages: Vec<ChatMessage>,
}

impl ChatStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            session: None,
            messages: Vec::new(),
        }
    }

    pub fn session(&self) -> Option<&ChatSession> {
        self.session.as_ref()
    }

    /// Transcript in display order, including undelivered local copies.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The current session id, creating the server session on first use.
    /// One session per page lifetime.
    pub async fn ensure_session(&mut self) -> ClientResult<Uuid> {
        if let Some(session) = &self.session {
            return Ok(session.session_id);
        }
        let created = self.api.create_chat_session().await?;
        tracing::info!(session_id = %created.session_id, "Started chat session");
        let id = created.session_id;
        self.session = Some(created);
        Ok(id)
    }

    /// Send through the session transcript endpoint. The user's message is
    /// appended optimistically and marked `Sent` only once the assistant
    /// reply arrives; on failure it stays in the transcript as `Failed`.
    pub async fn send(&mut self, text: &str) -> ClientResult<&ChatMessage> {
        let request = SendMessageRequest {
            text: text.to_string(),
        };
        request.validate()?;

        let session_id = self.ensure_session().await?;

        self.messages
            .push(ChatMessage::pending_user(request.text.clone()));
        let idx = self.messages.len() - 1;

        match self.api.send_chat_message(session_id, &request).await {
            Ok(reply) => {
                self.messages[idx].delivery = Delivery::Sent;
                self.messages.push(reply);
                Ok(&self.messages[self.messages.len() - 1])
            }
            Err(e) => {
                self.messages[idx].delivery = Delivery::Failed;
                Err(e)
            }
        }
    }

    /// Send through the direct model endpoint, tagging the current session
    /// when one exists. Same optimistic discipline as `send`.
    pub async fn send_direct(&mut self, text: &str) -> ClientResult<&ChatMessage> {
        let request = GeminiChatRequest {
            message: text.to_string(),
            session_id: self.session.as_ref().map(|s| s.session_id),
        };
        request.validate()?;

        self.messages
            .push(ChatMessage::pending_user(request.message.clone()));
        let idx = self.messages.len() - 1;

        match self.api.send_gemini_message(&request).await {
            Ok(response) => {
                self.messages[idx].delivery = Delivery::Sent;
                self.messages.push(ChatMessage::assistant(response.reply));
                Ok(&self.messages[self.messages.len() - 1])
            }
            Err(e) => {
                self.messages[idx].delivery = Delivery::Failed;
                Err(e)
            }
        }
    }

    /// Replace the transcript with the server's copy, keeping local messages
    /// that never made it out (`Pending`/`Failed`) at the tail.
    pub async fn load_history(&mut self) -> ClientResult<()> {
        let session_id = self.ensure_session().await?;
        let fetched = self.api.list_chat_messages(session_id).await?;

        let undelivered: Vec<ChatMessage> = self
            .messages
            .drain(..)
            .filter(|m| m.delivery != Delivery::Sent)
            .collect();
        self.messages = fetched;
        self.messages.extend(undelivered);
        Ok(())
    }
}
