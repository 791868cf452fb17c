mod auth;
mod chat;
mod client;
mod journal;

pub use client::ApiClient;
