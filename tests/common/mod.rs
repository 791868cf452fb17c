//! In-process stub backend the integration suites drive the client against,
//! plus client construction helpers.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use solace_client::{ApiClient, Config, Session, TokenStore};

/// Token the stub accepts on protected routes; anything else gets a 401.
pub const TEST_TOKEN: &str = "test-token";

#[derive(Default)]
pub struct StubState {
    pub entries: Vec<Value>,
    pub chat_messages: Vec<Value>,
    /// (method, path) for every request that reached the stub.
    pub requests: Vec<(String, String)>,
    /// JSON bodies of mutating requests, in arrival order.
    pub bodies: Vec<Value>,
    /// When set, the next request fails with this status and message.
    pub force_status: Option<(u16, String)>,
    pub sessions_created: usize,
}

#[derive(Clone, Default)]
pub struct StubBackend {
    state: Arc<Mutex<StubState>>,
}

impl StubBackend {
    pub fn requests(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self, method: &str, path: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .requests
            .iter()
            .filter(|(m, p)| m == method && p == path)
            .count()
    }

    pub fn last_body(&self) -> Option<Value> {
        self.state.lock().unwrap().bodies.last().cloned()
    }

    pub fn entries(&self) -> Vec<Value> {
        self.state.lock().unwrap().entries.clone()
    }

    pub fn sessions_created(&self) -> usize {
        self.state.lock().unwrap().sessions_created
    }

    /// Make the next request fail with the given status and envelope message.
    pub fn fail_next(&self, code: u16, message: &str) {
        self.state.lock().unwrap().force_status = Some((code, message.to_string()));
    }

    /// Insert a server-side entry directly, bypassing the API.
    pub fn seed_entry(&self, content: &str, mood: Option<Value>) -> Value {
        let entry = journal_entry_json(content, mood);
        self.state.lock().unwrap().entries.push(entry.clone());
        entry
    }
}

fn now() -> String {
    Utc::now().to_rfc3339()
}

fn user_json(email: &str) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "email": email,
        "name": "Sam",
        "role": "user",
        "created_at": "2026-01-01T00:00:00Z",
    })
}

fn journal_entry_json(content: &str, mood: Option<Value>) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "content": content,
        "created_at": now(),
        "updated_at": now(),
        "mood": mood,
    })
}

fn error_response(code: u16, message: &str) -> Response {
    let status = axum::http::StatusCode::from_u16(code).unwrap();
    (
        status,
        Json(json!({"error": {"message": message, "code": code}})),
    )
        .into_response()
}

/// Record the request, apply any forced failure, and enforce the bearer
/// token. Mirrors the real backend's uniform auth middleware.
fn gate(backend: &StubBackend, method: &str, path: String, headers: &HeaderMap) -> Result<(), Response> {
    let mut st = backend.state.lock().unwrap();
    st.requests.push((method.to_string(), path));

    if let Some((code, message)) = st.force_status.take() {
        return Err(error_response(code, &message));
    }

    let expected = format!("Bearer {}", TEST_TOKEN);
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == expected)
        .unwrap_or(false);
    if !authorized {
        return Err(error_response(401, "Authentication required"));
    }
    Ok(())
}

async fn register(State(b): State<StubBackend>, Json(body): Json<Value>) -> Response {
    {
        let mut st = b.state.lock().unwrap();
        st.requests.push(("POST".into(), "/auth/register".into()));
        st.bodies.push(body.clone());
        if let Some((code, message)) = st.force_status.take() {
            return error_response(code, &message);
        }
    }
    Json(json!({
        "access_token": TEST_TOKEN,
        "expires_in": 900,
        "user": user_json(body["email"].as_str().unwrap_or("sam@example.com")),
    }))
    .into_response()
}

async fn login(State(b): State<StubBackend>, Json(body): Json<Value>) -> Response {
    {
        let mut st = b.state.lock().unwrap();
        st.requests.push(("POST".into(), "/auth/login".into()));
        st.bodies.push(body.clone());
        if let Some((code, message)) = st.force_status.take() {
            return error_response(code, &message);
        }
    }
    Json(json!({
        "access_token": TEST_TOKEN,
        "expires_in": 900,
        "user": user_json(body["email"].as_str().unwrap_or("sam@example.com")),
    }))
    .into_response()
}

async fn me(State(b): State<StubBackend>, headers: HeaderMap) -> Response {
    if let Err(r) = gate(&b, "GET", "/auth/me".into(), &headers) {
        return r;
    }
    Json(user_json("sam@example.com")).into_response()
}

async fn logout(State(b): State<StubBackend>, headers: HeaderMap) -> Response {
    if let Err(r) = gate(&b, "POST", "/auth/logout".into(), &headers) {
        return r;
    }
    Json(json!({"message": "Signed out"})).into_response()
}

async fn list_journal(State(b): State<StubBackend>, headers: HeaderMap) -> Response {
    if let Err(r) = gate(&b, "GET", "/journal".into(), &headers) {
        return r;
    }
    let st = b.state.lock().unwrap();
    Json(st.entries.clone()).into_response()
}

async fn create_journal(
    State(b): State<StubBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(r) = gate(&b, "POST", "/journal".into(), &headers) {
        return r;
    }
    let mut st = b.state.lock().unwrap();
    st.bodies.push(body.clone());
    let entry = journal_entry_json(body["content"].as_str().unwrap_or_default(), None);
    st.entries.insert(0, entry.clone());
    Json(entry).into_response()
}

async fn analyze_and_save(
    State(b): State<StubBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(r) = gate(&b, "POST", "/journal/analyze-and-save".into(), &headers) {
        return r;
    }
    let mut st = b.state.lock().unwrap();
    st.bodies.push(body.clone());
    let mood = json!({"primary_emotion": "anxious", "intensity_level": 7});
    let entry = journal_entry_json(body["content"].as_str().unwrap_or_default(), Some(mood));
    st.entries.insert(0, entry.clone());
    Json(entry).into_response()
}

async fn update_journal(
    State(b): State<StubBackend>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(r) = gate(&b, "PATCH", format!("/journal/{}", id), &headers) {
        return r;
    }
    let mut st = b.state.lock().unwrap();
    st.bodies.push(body.clone());
    let id_value = json!(id);
    match st.entries.iter_mut().find(|e| e["id"] == id_value) {
        Some(entry) => {
            entry["content"] = body["content"].clone();
            entry["updated_at"] = json!(now());
            Json(entry.clone()).into_response()
        }
        None => error_response(404, "Entry not found"),
    }
}

async fn delete_journal(
    State(b): State<StubBackend>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Response {
    if let Err(r) = gate(&b, "DELETE", format!("/journal/{}", id), &headers) {
        return r;
    }
    let mut st = b.state.lock().unwrap();
    let id_value = json!(id);
    let before = st.entries.len();
    st.entries.retain(|e| e["id"] != id_value);
    if st.entries.len() == before {
        return error_response(404, "Entry not found");
    }
    Json(json!({"deleted": true, "id": id})).into_response()
}

async fn create_session(State(b): State<StubBackend>, headers: HeaderMap) -> Response {
    if let Err(r) = gate(&b, "POST", "/chat/sessions".into(), &headers) {
        return r;
    }
    let mut st = b.state.lock().unwrap();
    st.sessions_created += 1;
    Json(json!({"session_id": Uuid::new_v4(), "start_time": now()})).into_response()
}

async fn list_messages(
    State(b): State<StubBackend>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Response {
    if let Err(r) = gate(&b, "GET", format!("/chat/sessions/{}/messages", id), &headers) {
        return r;
    }
    let st = b.state.lock().unwrap();
    Json(st.chat_messages.clone()).into_response()
}

async fn post_message(
    State(b): State<StubBackend>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(r) = gate(&b, "POST", format!("/chat/sessions/{}/messages", id), &headers) {
        return r;
    }
    let mut st = b.state.lock().unwrap();
    st.bodies.push(body.clone());
    let text = body["text"].as_str().unwrap_or_default().to_string();
    let user = json!({"sender": "user", "text": text, "timestamp": now()});
    let reply = json!({"sender": "assistant", "text": format!("echo: {}", text), "timestamp": now()});
    st.chat_messages.push(user);
    st.chat_messages.push(reply.clone());
    Json(reply).into_response()
}

async fn gemini(State(b): State<StubBackend>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Err(r) = gate(&b, "POST", "/chat/gemini".into(), &headers) {
        return r;
    }
    let mut st = b.state.lock().unwrap();
    st.bodies.push(body.clone());
    let message = body["message"].as_str().unwrap_or_default();
    Json(json!({"reply": format!("gemini: {}", message)})).into_response()
}

fn router(backend: StubBackend) -> Router {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/auth/logout", post(logout))
        .route("/journal", get(list_journal).post(create_journal))
        .route("/journal/analyze-and-save", post(analyze_and_save))
        .route("/journal/:id", patch(update_journal).delete(delete_journal))
        .route("/chat/sessions", post(create_session))
        .route("/chat/sessions/:id/messages", get(list_messages).post(post_message))
        .route("/chat/gemini", post(gemini))
        .with_state(backend)
}

/// Start the stub on an ephemeral port; returns its base URL and a handle
/// for assertions.
pub async fn spawn_backend() -> (String, StubBackend) {
    let backend = StubBackend::default();
    let app = router(backend.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), backend)
}

pub struct TestClient {
    pub api: ApiClient,
    pub token_store: TokenStore,
    pub token_path: PathBuf,
    _dir: tempfile::TempDir,
}

/// Build a client over a fresh temporary token file, optionally pre-seeded
/// with a stored token.
pub fn client_with_token(base_url: &str, token: Option<&str>) -> TestClient {
    let dir = tempfile::tempdir().unwrap();
    let token_path = dir.path().join("tokens.json");
    let token_store = TokenStore::new(token_path.clone());
    if let Some(t) = token {
        token_store.save(t).unwrap();
    }

    let config = Config {
        api_base_url: base_url.into(),
        request_timeout_secs: 5,
        token_path: token_path.clone(),
    };
    let session = Session::new(token_store.clone()).unwrap();
    let api = ApiClient::new(&config, session).unwrap();

    TestClient {
        api,
        token_store,
        token_path,
        _dir: dir,
    }
}

/// A syntactically valid JWT whose `exp` is already in the past.
pub fn expired_jwt() -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    #[derive(serde::Serialize)]
    struct Claims {
        sub: String,
        exp: i64,
    }

    encode(
        &Header::default(),
        &Claims {
            sub: "user-1".into(),
            exp: Utc::now().timestamp() - 300,
        },
        &EncodingKey::from_secret(b"irrelevant"),
    )
    .unwrap()
}
