use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use docgate::backend::models::{CreateRoomRequest, InboxNotification, UpdateRoomRequest};
use docgate::{BackendError, CollaborationBackend, InMemoryBackend};

pub const FAKE_SECRET: &str = "sk_test_fake";

// ============================================================================
// Local stand-in for the hosted REST API
// ============================================================================

/// A request as seen by the fake service
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

#[derive(Clone)]
struct FakeState {
    store: Arc<InMemoryBackend>,
    requests: Arc<RwLock<Vec<RecordedRequest>>>,
}

impl FakeState {
    async fn record(
        &self,
        headers: &HeaderMap,
        method: &str,
        path: String,
        body: Option<serde_json::Value>,
    ) -> Result<(), Response> {
        self.requests.write().await.push(RecordedRequest {
            method: method.to_string(),
            path,
            body,
        });

        let expected = format!("Bearer {}", FAKE_SECRET);
        match headers.get("authorization").and_then(|v| v.to_str().ok()) {
            Some(value) if value == expected => Ok(()),
            _ => Err((StatusCode::FORBIDDEN, "Invalid secret key").into_response()),
        }
    }
}

fn backend_error(err: BackendError) -> Response {
    match err {
        BackendError::NotFound(id) => {
            (StatusCode::NOT_FOUND, format!("Room \"{}\" not found", id)).into_response()
        }
        BackendError::Status { status, body } => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body,
        )
            .into_response(),
        other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()).into_response(),
    }
}

#[derive(Deserialize)]
struct ListQuery {
    #[serde(rename = "userId")]
    user_id: String,
}

async fn create_room(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Json(request): Json<CreateRoomRequest>,
) -> Response {
    let body = serde_json::to_value(&request).ok();
    if let Err(rejection) = state.record(&headers, "POST", "/v2/rooms".into(), body).await {
        return rejection;
    }
    match state.store.create_room(&request).await {
        Ok(room) => Json(room).into_response(),
        Err(e) => backend_error(e),
    }
}

async fn list_rooms(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response {
    let path = format!("/v2/rooms?userId={}", query.user_id);
    if let Err(rejection) = state.record(&headers, "GET", path, None).await {
        return rejection;
    }
    match state.store.get_rooms(&query.user_id).await {
        Ok(listing) => Json(listing).into_response(),
        Err(e) => backend_error(e),
    }
}

async fn get_room(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Path(room_id): Path<String>,
) -> Response {
    let path = format!("/v2/rooms/{}", room_id);
    if let Err(rejection) = state.record(&headers, "GET", path, None).await {
        return rejection;
    }
    match state.store.get_room(&room_id).await {
        Ok(room) => Json(room).into_response(),
        Err(e) => backend_error(e),
    }
}

async fn update_room(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Path(room_id): Path<String>,
    Json(request): Json<UpdateRoomRequest>,
) -> Response {
    let path = format!("/v2/rooms/{}", room_id);
    let body = serde_json::to_value(&request).ok();
    if let Err(rejection) = state.record(&headers, "POST", path, body).await {
        return rejection;
    }
    match state.store.update_room(&room_id, &request).await {
        Ok(room) => Json(room).into_response(),
        Err(e) => backend_error(e),
    }
}

async fn delete_room(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Path(room_id): Path<String>,
) -> Response {
    let path = format!("/v2/rooms/{}", room_id);
    if let Err(rejection) = state.record(&headers, "DELETE", path, None).await {
        return rejection;
    }
    match state.store.delete_room(&room_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => backend_error(e),
    }
}

async fn trigger_notification(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Json(notification): Json<InboxNotification>,
) -> Response {
    let body = serde_json::to_value(&notification).ok();
    let path = "/v2/inbox-notifications/trigger".to_string();
    if let Err(rejection) = state.record(&headers, "POST", path, body).await {
        return rejection;
    }
    match state.store.trigger_inbox_notification(&notification).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => backend_error(e),
    }
}

/// Running fake service bound to an ephemeral local port
pub struct FakeLiveblocks {
    pub addr: SocketAddr,
    pub store: Arc<InMemoryBackend>,
    requests: Arc<RwLock<Vec<RecordedRequest>>>,
    _handle: JoinHandle<()>,
}

impl FakeLiveblocks {
    pub async fn start() -> Self {
        let store = Arc::new(InMemoryBackend::new());
        let requests = Arc::new(RwLock::new(Vec::new()));
        let state = FakeState {
            store: store.clone(),
            requests: requests.clone(),
        };

        let app = Router::new()
            .route("/v2/rooms", post(create_room).get(list_rooms))
            .route(
                "/v2/rooms/:room_id",
                get(get_room).post(update_room).delete(delete_room),
            )
            .route("/v2/inbox-notifications/trigger", post(trigger_notification))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            store,
            requests,
            _handle: handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().await.clone()
    }
}
