//! Client core of the Solace companion app.
//!
//! Everything here is the consuming side of the Solace REST backend: typed
//! endpoint calls, the bearer-token lifecycle (including the uniform
//! 401-evict-and-redirect behavior), and page-scoped stores that cache,
//! optimistically mutate, and reconcile server-backed journal, chat, and
//! mood data. The backend itself — auth, storage, AI inference — stays an
//! opaque HTTP contract.

pub mod api;
pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod store;

pub use api::ApiClient;
pub use auth::{Session, TokenStore};
pub use config::Config;
pub use error::{ClientError, ClientResult};
