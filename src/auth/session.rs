use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::auth::token_store::TokenStore;
use crate::error::{ClientError, ClientResult};

/// The claims the client cares about. Tokens are decoded without signature
/// validation — the signing secret never leaves the backend, and the only
/// thing read here is the expiry.
#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    exp: Option<i64>,
}

/// Shared bearer-token slot for one running app instance. Pages hold clones;
/// the API layer evicts through it on any 401.
#[derive(Debug, Clone)]
pub struct Session {
    store: Arc<TokenStore>,
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    /// Load the persisted token, discarding it up front when its `exp` claim
    /// has already passed.
    pub fn new(store: TokenStore) -> ClientResult<Self> {
        let persisted = store.load()?;
        let token = match persisted {
            Some(t) if is_expired(&t) => {
                tracing::info!("Stored token is expired, treating as logged out");
                store.clear()?;
                None
            }
            other => other,
        };

        Ok(Self {
            store: Arc::new(store),
            token: Arc::new(RwLock::new(token)),
        })
    }

    /// The bearer token, or `Unauthorized` when the user must sign in first.
    pub async fn require_token(&self) -> ClientResult<String> {
        let guard = self.token.read().await;
        match guard.as_deref() {
            Some(t) if is_expired(t) => {
                drop(guard);
                self.evict().await?;
                Err(ClientError::Unauthorized)
            }
            Some(t) => Ok(t.to_string()),
            None => Err(ClientError::Unauthorized),
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.require_token().await.is_ok()
    }

    /// Adopt a freshly issued token, in memory and on disk.
    pub async fn set_token(&self, token: &str) -> ClientResult<()> {
        self.store.save(token)?;
        *self.token.write().await = Some(token.to_string());
        Ok(())
    }

    /// Drop the token everywhere. Called on logout and on any 401.
    pub async fn evict(&self) -> ClientResult<()> {
        *self.token.write().await = None;
        self.store.clear()
    }
}

/// Expiry of a stored token, when it decodes as a JWT carrying `exp`.
pub fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.set_required_spec_claims::<&str>(&[]);

    let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation).ok()?;
    let exp = data.claims.exp?;
    Utc.timestamp_opt(exp, 0).single()
}

/// Opaque tokens (not decodable, or without `exp`) are left for the server
/// to judge; only a decodable, passed `exp` counts as expired here.
pub fn is_expired(token: &str) -> bool {
    match token_expiry(token) {
        Some(exp) => exp <= Utc::now(),
        None => false,
    }
}
