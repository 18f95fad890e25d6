//! Test Doubles
//!
//! In-memory fakes of the API traits, a recording sound player, and an
//! in-process HTTP fake of the reminder service for client tests.

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::api::{
    ApiError, ApiResult, AuthApi, ForgotPasswordRequest, LoginRequest, LoginResponse,
    ReminderApi, ReminderDraft, ResetPasswordRequest, SignupRequest,
};
use crate::model::{Reminder, ReminderId, SessionToken, User};
use crate::notify::{Sound, SoundPlayer};

const VALID_TOKEN: &str = "good-token";
const VALID_EMAIL: &str = "ada@example.com";
const VALID_PASSWORD: &str = "correct horse";
const TAKEN_EMAIL: &str = "taken@example.com";
const VALID_RESET_TOKEN: &str = "reset-123";

fn rejected(status: u16, message: &str) -> ApiError {
    ApiError::Rejected {
        status,
        message: Some(message.to_string()),
    }
}

// ============================================
// SOUND
// ============================================

/// Records every cue instead of playing it
#[derive(Debug, Default)]
pub struct RecordingPlayer {
    played: Mutex<Vec<Sound>>,
}

impl RecordingPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<Sound> {
        self.played.lock().unwrap().clone()
    }

    pub fn count(&self, sound: Sound) -> usize {
        self.played().into_iter().filter(|s| *s == sound).count()
    }
}

impl SoundPlayer for RecordingPlayer {
    fn play(&self, sound: Sound) {
        self.played.lock().unwrap().push(sound);
    }
}

// ============================================
// REMINDER API
// ============================================

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    List,
    Create(String),
    Delete(ReminderId),
}

struct ScriptedList {
    gate: Arc<Notify>,
    result: ApiResult<Vec<Reminder>>,
}

#[derive(Default)]
struct ReminderFakeState {
    reminders: Vec<Reminder>,
    next_id: ReminderId,
    calls: Vec<ApiCall>,
    scripted: VecDeque<ScriptedList>,
    fail_list: Option<ApiError>,
    fail_create: Option<ApiError>,
    fail_delete: Option<ApiError>,
    create_gate: Option<Arc<Notify>>,
}

/// In-memory reminder service with failure injection and gates
#[derive(Default)]
pub struct FakeReminderApi {
    state: Mutex<ReminderFakeState>,
}

impl FakeReminderApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_reminders(&self, reminders: Vec<Reminder>) {
        let mut state = self.state.lock().unwrap();
        state.next_id = reminders.iter().map(|r| r.id).max().unwrap_or(0);
        state.reminders = reminders;
    }

    pub fn reminders(&self) -> Vec<Reminder> {
        self.state.lock().unwrap().reminders.clone()
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.state.lock().unwrap().calls.clone()
    }

    fn count(&self, pred: impl Fn(&ApiCall) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    pub fn list_calls(&self) -> usize {
        self.count(|c| matches!(c, ApiCall::List))
    }

    pub fn create_calls(&self) -> usize {
        self.count(|c| matches!(c, ApiCall::Create(_)))
    }

    pub fn delete_calls(&self) -> usize {
        self.count(|c| matches!(c, ApiCall::Delete(_)))
    }

    /// The next list call waits for `gate`, then returns `result`
    pub fn script_list(&self, gate: Arc<Notify>, result: ApiResult<Vec<Reminder>>) {
        self.state
            .lock()
            .unwrap()
            .scripted
            .push_back(ScriptedList { gate, result });
    }

    pub fn fail_next_list(&self, err: ApiError) {
        self.state.lock().unwrap().fail_list = Some(err);
    }

    pub fn fail_next_create(&self, err: ApiError) {
        self.state.lock().unwrap().fail_create = Some(err);
    }

    pub fn fail_next_delete(&self, err: ApiError) {
        self.state.lock().unwrap().fail_delete = Some(err);
    }

    /// The next create call waits for `gate` before completing
    pub fn gate_create(&self, gate: Arc<Notify>) {
        self.state.lock().unwrap().create_gate = Some(gate);
    }
}

#[async_trait]
impl ReminderApi for FakeReminderApi {
    async fn list_reminders(&self, _token: &SessionToken) -> ApiResult<Vec<Reminder>> {
        let scripted = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(ApiCall::List);
            if let Some(err) = state.fail_list.take() {
                return Err(err);
            }
            state.scripted.pop_front()
        };
        match scripted {
            Some(step) => {
                step.gate.notified().await;
                step.result
            }
            None => Ok(self.reminders()),
        }
    }

    async fn create_reminder(&self, _token: &SessionToken, draft: &ReminderDraft) -> ApiResult<()> {
        let gate = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(ApiCall::Create(draft.title().to_string()));
            state.create_gate.take()
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let mut state = self.state.lock().unwrap();
        if let Some(err) = state.fail_create.take() {
            return Err(err);
        }
        state.next_id += 1;
        let reminder = Reminder {
            id: state.next_id,
            title: draft.title().to_string(),
            description: draft.description().to_string(),
            remind_at: draft.remind_at().to_string(),
        };
        state.reminders.push(reminder);
        Ok(())
    }

    async fn delete_reminder(&self, _token: &SessionToken, id: ReminderId) -> ApiResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(ApiCall::Delete(id));
        if let Some(err) = state.fail_delete.take() {
            return Err(err);
        }
        let before = state.reminders.len();
        state.reminders.retain(|r| r.id != id);
        if state.reminders.len() == before {
            return Err(rejected(404, "Reminder not found"));
        }
        Ok(())
    }
}

// ============================================
// AUTH API
// ============================================

#[derive(Default)]
struct AuthFakeState {
    calls: usize,
    offline: bool,
    empty_token: bool,
}

/// In-memory auth service; knows one account and one reset token
#[derive(Default)]
pub struct FakeAuthApi {
    state: Mutex<AuthFakeState>,
}

impl FakeAuthApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls
    }

    /// Every later call fails at the transport level
    pub fn go_offline(&self) {
        self.state.lock().unwrap().offline = true;
    }

    /// Successful logins answer with an empty token
    pub fn issue_empty_token(&self) {
        self.state.lock().unwrap().empty_token = true;
    }

    fn enter(&self) -> ApiResult<bool> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        if state.offline {
            return Err(ApiError::Transport("connection refused".to_string()));
        }
        Ok(state.empty_token)
    }
}

#[async_trait]
impl AuthApi for FakeAuthApi {
    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        let empty_token = self.enter()?;
        if request.email != VALID_EMAIL || request.password != VALID_PASSWORD {
            return Err(rejected(401, "Invalid credentials"));
        }
        Ok(LoginResponse {
            token: if empty_token { String::new() } else { VALID_TOKEN.to_string() },
            user: Some(User::new("Ada")),
        })
    }

    async fn signup(&self, request: &SignupRequest) -> ApiResult<()> {
        self.enter()?;
        if request.email == TAKEN_EMAIL {
            return Err(rejected(400, "User already exists"));
        }
        Ok(())
    }

    async fn forgot_password(&self, _request: &ForgotPasswordRequest) -> ApiResult<()> {
        self.enter()?;
        Ok(())
    }

    async fn reset_password(&self, request: &ResetPasswordRequest) -> ApiResult<()> {
        self.enter()?;
        if request.token != VALID_RESET_TOKEN {
            return Err(rejected(400, "Invalid or expired token"));
        }
        Ok(())
    }
}

// ============================================
// HTTP FAKE
// ============================================

#[derive(Default)]
struct ServiceState {
    /// (owner token, reminder)
    reminders: Vec<(String, Reminder)>,
    next_id: ReminderId,
}

type Shared = Arc<Mutex<ServiceState>>;

/// The reminder service over real HTTP on a loopback port
pub struct FakeService {
    base_url: String,
    state: Shared,
}

impl FakeService {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(ServiceState::default()));
        let app = Router::new()
            .route("/reminders", get(list_reminders).post(create_reminder))
            .route("/reminders/:id", delete(delete_reminder))
            .route("/auth/login", post(login))
            .route("/auth/signup", post(signup))
            .route("/auth/forgot-password", post(forgot_password))
            .route("/auth/reset-password", post(reset_password))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn base_url(&self) -> String {
        self.base_url.clone()
    }

    pub fn seed(&self, token: &str, title: &str, description: &str, remind_at: &str) {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let reminder = Reminder {
            id: state.next_id,
            title: title.to_string(),
            description: description.to_string(),
            remind_at: remind_at.to_string(),
        };
        state.reminders.push((token.to_string(), reminder));
    }
}

/// A loopback URL nothing is listening on
pub async fn unused_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

type Reply = (StatusCode, Json<Value>);

fn error_reply(status: StatusCode, message: &str) -> Reply {
    (status, Json(json!({ "error": message })))
}

fn bearer(headers: &HeaderMap) -> Result<String, Reply> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|token| *token == VALID_TOKEN)
        .map(str::to_string)
        .ok_or_else(|| error_reply(StatusCode::UNAUTHORIZED, "Invalid token"))
}

async fn list_reminders(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    let token = match bearer(&headers) {
        Ok(token) => token,
        Err(reply) => return reply,
    };
    let state = state.lock().unwrap();
    let list: Vec<&Reminder> = state
        .reminders
        .iter()
        .filter(|(owner, _)| *owner == token)
        .map(|(_, r)| r)
        .collect();
    (StatusCode::OK, Json(json!(list)))
}

#[derive(Deserialize)]
struct NewReminder {
    title: String,
    description: String,
    remind_at: String,
}

async fn create_reminder(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<NewReminder>,
) -> Reply {
    let token = match bearer(&headers) {
        Ok(token) => token,
        Err(reply) => return reply,
    };
    let mut state = state.lock().unwrap();
    state.next_id += 1;
    let reminder = Reminder {
        id: state.next_id,
        title: body.title,
        description: body.description,
        remind_at: body.remind_at,
    };
    state.reminders.push((token, reminder.clone()));
    (StatusCode::CREATED, Json(json!(reminder)))
}

async fn delete_reminder(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<ReminderId>,
) -> Reply {
    let token = match bearer(&headers) {
        Ok(token) => token,
        Err(reply) => return reply,
    };
    let mut state = state.lock().unwrap();
    let before = state.reminders.len();
    state
        .reminders
        .retain(|(owner, r)| !(*owner == token && r.id == id));
    if state.reminders.len() == before {
        return error_reply(StatusCode::NOT_FOUND, "Reminder not found");
    }
    (StatusCode::OK, Json(json!({ "message": "Reminder deleted" })))
}

#[derive(Deserialize)]
struct Credentials {
    email: String,
    password: String,
}

async fn login(Json(body): Json<Credentials>) -> Reply {
    if body.email != VALID_EMAIL || body.password != VALID_PASSWORD {
        return error_reply(StatusCode::UNAUTHORIZED, "Invalid credentials");
    }
    (
        StatusCode::OK,
        Json(json!({
            "token": VALID_TOKEN,
            "user": { "name": "Ada", "email": VALID_EMAIL },
        })),
    )
}

async fn signup(Json(body): Json<Value>) -> Reply {
    if body["email"] == TAKEN_EMAIL {
        return error_reply(StatusCode::BAD_REQUEST, "User already exists");
    }
    (StatusCode::CREATED, Json(json!({ "message": "User created" })))
}

async fn forgot_password(Json(_body): Json<Value>) -> Reply {
    (StatusCode::OK, Json(json!({ "message": "Reset link sent" })))
}

#[derive(Deserialize)]
struct Reset {
    token: String,
    #[serde(rename = "newPassword")]
    new_password: String,
}

async fn reset_password(Json(body): Json<Reset>) -> Reply {
    if body.token != VALID_RESET_TOKEN || body.new_password.is_empty() {
        return error_reply(StatusCode::BAD_REQUEST, "Invalid or expired token");
    }
    (StatusCode::OK, Json(json!({ "message": "Password updated" })))
}
