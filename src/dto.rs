//! # Solace — Request/Response DTOs
//!
//! All API contract types in one module. Each struct maps 1:1 to the JSON
//! shapes the backend speaks.
//!
//! Conventions:
//! - `*Request`  → serialized into a JSON request body
//! - `*Response` → deserialized from a JSON response body
//! - Pre-flight validation is expressed via `validator` derive macros and
//!   runs before a request ever leaves the client
//! - Entities the client keeps in page state live in `models`; this module
//!   holds only the wire shapes around them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::user::UserRole;

// ============================================================================
// Common
// ============================================================================

/// Standard success message response
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Standard delete confirmation
#[derive(Debug, Deserialize)]
pub struct DeleteResponse {
    pub deleted: bool,
    pub id: Uuid,
}

/// Stable error envelope — every backend error response uses this shape
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default)]
    pub code: Option<u16>,
}

impl ErrorResponse {
    /// Pull the backend's message out of a raw error body, if it parses.
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .map(|e| e.error.message)
    }
}

// ============================================================================
// Auth
// ============================================================================

/// POST /auth/register
#[derive(Debug, Serialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    #[validate(length(max = 254, message = "Email too long"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
}

/// POST /auth/login
#[derive(Debug, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response for register and login
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub user: UserSummary,
}

/// Minimal user info returned in auth responses
#[derive(Debug, Clone, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Journal
// ============================================================================

/// POST /journal and POST /journal/analyze-and-save
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateJournalRequest {
    #[validate(length(min = 1, max = 20000, message = "Entry must be 1-20000 characters"))]
    pub content: String,
}

/// PATCH /journal/{id}
#[derive(Debug, Clone, Serialize, Validate)]
pub struct UpdateJournalRequest {
    #[validate(length(min = 1, max = 20000, message = "Entry must be 1-20000 characters"))]
    pub content: String,
}

impl CreateJournalRequest {
    /// The entry form submits title and body as one content blob:
    /// `"{title}\n\n{body}"`. List views later re-derive the title from the
    /// first line.
    pub fn from_form(title: &str, body: &str) -> Self {
        Self {
            content: format!("{}\n\n{}", title, body),
        }
    }
}

// ============================================================================
// Chat
// ============================================================================

/// POST /chat/sessions/{id}/messages
#[derive(Debug, Serialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(min = 1, max = 4000, message = "Message must be 1-4000 characters"))]
    pub text: String,
}

/// POST /chat/gemini — the direct model endpoint, usable without a
/// server-tracked session
#[derive(Debug, Serialize, Validate)]
pub struct GeminiChatRequest {
    #[validate(length(min = 1, max = 4000, message = "Message must be 1-4000 characters"))]
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
}

/// Response for POST /chat/gemini
#[derive(Debug, Deserialize)]
pub struct GeminiChatResponse {
    pub reply: String,
}
