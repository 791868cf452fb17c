use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A server-tracked conversation grouping of chatbot messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub session_id: Uuid,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// Local delivery state of a message in the transcript. Server-fetched
/// messages always deserialize as `Sent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delivery {
    Pending,
    Sent,
    Failed,
}

impl Default for Delivery {
    fn default() -> Self {
        Self::Sent
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip, default)]
    pub delivery: Delivery,
}

impl ChatMessage {
    /// Optimistic transcript copy of a message the user just typed.
    pub fn pending_user(text: String) -> Self {
        Self {
            sender: Sender::User,
            text,
            timestamp: Utc::now(),
            delivery: Delivery::Pending,
        }
    }

    /// Local copy of an assistant reply that arrived outside the normal
    /// message listing (e.g. the direct model endpoint).
    pub fn assistant(text: String) -> Self {
        Self {
            sender: Sender::Assistant,
            text,
            timestamp: Utc::now(),
            delivery: Delivery::Sent,
        }
    }
}
