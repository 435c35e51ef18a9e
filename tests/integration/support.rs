//! Fake HAMS backend bound to an ephemeral port

use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::{Path, RawQuery, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Form, Json, Router,
};
use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use hams_dashboard::{
    api::ApiClient,
    config::ApiConfig,
    models::user::User,
    services::{
        notify::{Notifier, Toast},
        session::SessionStore,
        Services,
    },
};

pub const TOKEN: &str = "tok-123";

/// Event 1 has started, event 2 starts tomorrow
pub const STARTED_EVENT: i32 = 1;
pub const UPCOMING_EVENT: i32 = 2;

#[derive(Debug, Clone)]
pub struct Hit {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Hit>>>);

impl Recorder {
    fn push(&self, hit: Hit) {
        self.0.lock().unwrap().push(hit);
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.0.lock().unwrap().clone()
    }

    pub fn last(&self, path: &str) -> Option<Hit> {
        self.hits().into_iter().rev().find(|h| h.path == path)
    }

    pub fn count(&self, path: &str) -> usize {
        self.hits().iter().filter(|h| h.path == path).count()
    }
}

/// Collects toasts for assertions
#[derive(Default)]
pub struct RecordingNotifier(Mutex<Vec<Toast>>);

impl RecordingNotifier {
    pub fn toasts(&self) -> Vec<Toast> {
        self.0.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        self.0.lock().unwrap().push(toast);
    }
}

pub struct Backend {
    pub url: String,
    pub recorder: Recorder,
}

impl Backend {
    pub async fn start() -> Self {
        let recorder = Recorder::default();
        let app = router(recorder.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}", addr),
            recorder,
        }
    }

    pub fn client(&self, session: SessionStore) -> ApiClient {
        let config = ApiConfig {
            url: self.url.clone(),
            timeout_secs: 5,
        };
        ApiClient::new(&config, session).unwrap()
    }

    /// Services with a signed-in session and a recording notifier
    pub fn services(&self) -> (Services, Arc<RecordingNotifier>) {
        let session = SessionStore::in_memory();
        session.store(TOKEN).unwrap();
        let notifier = Arc::new(RecordingNotifier::default());
        (Services::new(self.client(session), notifier.clone()), notifier)
    }
}

fn record(recorder: &Recorder, method: &str, path: String, query: Option<String>, headers: &HeaderMap, body: &[u8]) {
    recorder.push(Hit {
        method: method.to_string(),
        path,
        query,
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: String::from_utf8_lossy(body).to_string(),
    });
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(&format!("Bearer {}", TOKEN)[..])
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Could not validate credentials"})),
    )
        .into_response()
}

fn message(text: &str) -> Response {
    Json(json!({ "message": text })).into_response()
}

fn router(recorder: Recorder) -> Router {
    Router::new()
        .route("/users/login", post(login))
        .route("/users/me/", get(me))
        .route("/animals", post(create_animal))
        .route("/animals/status", get(statuses))
        .route("/animals/:id", put(accept))
        .route("/animals/:id/available", put(accept))
        .route("/animals/:id/unavailable", put(accept))
        .route("/event-type/", post(accept))
        .route("/events", post(accept))
        .route("/events/:id", get(event))
        .route("/events/:id/animals", put(reassign))
        .route("/events/:id/checkin", put(checkin))
        .route("/events/:id/checkout", put(checkout))
        .route("/admin/reports", get(reports))
        .route("/upload", post(upload))
        .with_state(recorder)
}

#[derive(Deserialize)]
struct LoginBody {
    username: String,
    password: String,
}

async fn login(State(rec): State<Recorder>, headers: HeaderMap, Form(body): Form<LoginBody>) -> Response {
    record(&rec, "POST", "/users/login".into(), None, &headers, body.username.as_bytes());
    if body.username == "keeper" && body.password == "secret123" {
        Json(json!({"access_token": TOKEN, "token_type": "bearer"})).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Incorrect username or password"})),
        )
            .into_response()
    }
}

pub fn user_json() -> Value {
    json!({
        "id": 3,
        "email": "keeper@zoo.org",
        "first_name": "Kim",
        "last_name": "Keeper",
        "username": "keeper",
        "tier": 2,
        "role_id": 2,
        "zoo_id": 1,
        "group_id": null,
        "created_at": "2024-01-05T10:00:00",
        "updated_at": null,
        "role": {
            "id": 2,
            "name": "handler",
            "description": "Animal handler",
            "permissions": [
                {"id": 6, "name": "checkin_animals"},
                {"id": 7, "name": "view_animals"},
                {"id": 20, "name": "create_reports"}
            ]
        }
    })
}

/// Signed-in user holding exactly `permissions`
pub fn user_with(permissions: &[&str]) -> User {
    let mut user = user_json();
    user["role"]["permissions"] = permissions
        .iter()
        .enumerate()
        .map(|(i, name)| json!({"id": i + 1, "name": name}))
        .collect();
    serde_json::from_value(user).unwrap()
}

async fn me(State(rec): State<Recorder>, headers: HeaderMap) -> Response {
    record(&rec, "GET", "/users/me/".into(), None, &headers, b"");
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(user_json()).into_response()
}

async fn create_animal(State(rec): State<Recorder>, headers: HeaderMap, body: Bytes) -> Response {
    record(&rec, "POST", "/animals".into(), None, &headers, &body);
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({"detail": [
            {"loc": ["body", "name"], "msg": "field required", "type": "missing"},
            {"loc": ["body", "tier"], "msg": "ensure this value is less than 5", "type": "value_error"}
        ]})),
    )
        .into_response()
}

fn animal_json(id: i32, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "species": "Lemur catta",
        "image": null,
        "description": "Ring-tailed lemur",
        "max_daily_checkouts": 3,
        "max_daily_checkout_hours": 2,
        "rest_time": 1.0,
        "tier": 1,
        "handling_enabled": true,
        "zoo_id": 1,
        "daily_checkout_count": 0,
        "daily_checkout_duration": null,
        "last_checkin_time": null,
        "checked_in": true,
        "status": "checked_in",
        "created_at": "2024-01-05T10:00:00Z",
        "updated_at": "2024-01-05T10:00:00Z"
    })
}

async fn statuses(State(rec): State<Recorder>, headers: HeaderMap, RawQuery(query): RawQuery) -> Response {
    record(&rec, "GET", "/animals/status".into(), query, &headers, b"");
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!([
        {"animal": animal_json(4, "Kito"), "status": "available", "status_description": "Available for checkout"},
        {"animal": animal_json(5, "Luna"), "status": "unavailable", "status_description": "Resting for 30 minutes"},
        {"animal": animal_json(6, "Milo"), "status": "checked_out", "status_description": "Reading Hour"}
    ]))
    .into_response()
}

async fn event(State(rec): State<Recorder>, headers: HeaderMap, Path(id): Path<i32>) -> Response {
    record(&rec, "GET", format!("/events/{}", id), None, &headers, b"");
    if !authorized(&headers) {
        return unauthorized();
    }
    let now = Utc::now();
    let start = if id == STARTED_EVENT {
        now - Duration::hours(1)
    } else {
        now + Duration::days(1)
    };
    Json(json!({
        "event": {
            "id": id,
            "name": "Reading Hour",
            "description": "Story time with ambassador animals",
            "start_at": start.to_rfc3339(),
            "end_at": (start + Duration::hours(2)).to_rfc3339(),
            "event_type_id": 1,
            "zoo_id": 1
        },
        "animals": [animal_json(4, "Kito"), animal_json(6, "Milo")],
        "users": [{
            "id": 3, "email": "keeper@zoo.org", "first_name": "Kim",
            "last_name": "Keeper", "username": "keeper", "tier": 2
        }],
        "event_type": {"id": 1, "name": "Education", "zoo_id": 1, "group_id": null},
        "zoo": {"id": 1, "name": "City Zoo", "location": "Downtown", "information": null}
    }))
    .into_response()
}

async fn reassign(State(rec): State<Recorder>, headers: HeaderMap, Path(id): Path<i32>, body: Bytes) -> Response {
    record(&rec, "PUT", format!("/events/{}/animals", id), None, &headers, &body);
    message("Animals reassigned")
}

#[derive(Deserialize)]
struct AnimalIdsBody {
    animal_ids: Vec<i32>,
}

async fn checkin(State(rec): State<Recorder>, headers: HeaderMap, Path(id): Path<i32>, body: Bytes) -> Response {
    record(&rec, "PUT", format!("/events/{}/checkin", id), None, &headers, &body);
    let parsed: AnimalIdsBody = serde_json::from_slice(&body).unwrap();
    if parsed.animal_ids.contains(&99) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Animal 99 is not checked out for this event"})),
        )
            .into_response();
    }
    message("Animals checked in")
}

async fn checkout(State(rec): State<Recorder>, headers: HeaderMap, Path(id): Path<i32>, body: Bytes) -> Response {
    record(&rec, "PUT", format!("/events/{}/checkout", id), None, &headers, &body);
    message("Animals checked out")
}

async fn reports(State(rec): State<Recorder>, headers: HeaderMap, RawQuery(query): RawQuery) -> Response {
    record(&rec, "GET", "/admin/reports".into(), query, &headers, b"");
    ([(header::CONTENT_TYPE, "text/csv")], "id,name\n4,Kito\n").into_response()
}

async fn upload(State(rec): State<Recorder>, headers: HeaderMap, body: Bytes) -> Response {
    record(&rec, "POST", "/upload".into(), None, &headers, &body);
    Json(json!({"file_url": "http://localhost:8000/static/kito.png"})).into_response()
}

/// Plain mutation endpoint answering with a server message
async fn accept(State(rec): State<Recorder>, method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Response {
    record(&rec, method.as_str(), uri.path().to_string(), None, &headers, &body);
    if !authorized(&headers) {
        return unauthorized();
    }
    message("Changes saved")
}
