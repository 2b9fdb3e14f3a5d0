//! Shared test utilities: an in-process mock of the blog API.
//!
//! The mock implements the server contract the client consumes
//! (auth endpoints, post CRUD, search) and records per-route hit counts
//! plus the last `Authorization` header seen, so tests can assert both
//! what went over the wire and that nothing did.

#![allow(dead_code, unused_imports)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use scribe_client::types::{Post, PostStatus, PostType};
use scribe_client::ClientConfig;

/// The access token the mock issues on sign-in and accepts thereafter.
pub const TOKEN: &str = "tok123";

const CREATED_AT: &str = "2024-01-01T00:00:00Z";
const UPDATED_AT: &str = "2024-01-02T00:00:00Z";

pub struct ApiState {
    posts: Mutex<Vec<Post>>,
    hits: Mutex<HashMap<String, usize>>,
    last_auth: Mutex<Option<String>>,
    next_id: AtomicI64,
}

impl ApiState {
    fn new() -> Self {
        Self {
            posts: Mutex::new(Vec::new()),
            hits: Mutex::new(HashMap::new()),
            last_auth: Mutex::new(None),
            next_id: AtomicI64::new(1),
        }
    }

    fn record(&self, route: &str, headers: &HeaderMap) {
        *self
            .hits
            .lock()
            .unwrap()
            .entry(route.to_string())
            .or_insert(0) += 1;
        *self.last_auth.lock().unwrap() = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|v| v == format!("Bearer {TOKEN}"))
            .unwrap_or(false)
    }
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Unauthorized", "statusCode": 401 })),
    )
}

fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Post not found", "statusCode": 404 })),
    )
}

async fn signup(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.record("POST /auth/signup", &headers);
    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    (
        StatusCode::CREATED,
        Json(json!({
            "id": id,
            "name": body["name"],
            "email": body["email"],
        })),
    )
}

async fn signin(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.record("POST /auth/signin", &headers);
    if body["password"].as_str() == Some("wrong") {
        return unauthorized();
    }
    (StatusCode::OK, Json(json!({ "accessToken": TOKEN })))
}

async fn me(State(state): State<Arc<ApiState>>, headers: HeaderMap) -> impl IntoResponse {
    state.record("GET /auth/me", &headers);
    if !state.authorized(&headers) {
        return unauthorized();
    }
    (
        StatusCode::OK,
        Json(json!({
            "id": 1,
            "name": "Ada",
            "email": "ada@example.com",
            "iat": 1_700_000_000,
            "exp": 1_700_003_600,
        })),
    )
}

async fn list_active(State(state): State<Arc<ApiState>>, headers: HeaderMap) -> impl IntoResponse {
    state.record("GET /posts", &headers);
    let posts: Vec<Post> = state
        .posts
        .lock()
        .unwrap()
        .iter()
        .filter(|p| p.status == PostStatus::Active)
        .cloned()
        .collect();
    Json(posts)
}

async fn list_all(State(state): State<Arc<ApiState>>, headers: HeaderMap) -> impl IntoResponse {
    state.record("GET /posts/all", &headers);
    if !state.authorized(&headers) {
        return unauthorized().into_response();
    }
    Json(state.posts.lock().unwrap().clone()).into_response()
}

async fn search(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    state.record("GET /posts/search", &headers);
    let term = params.get("title").cloned().unwrap_or_default();
    let posts: Vec<Post> = state
        .posts
        .lock()
        .unwrap()
        .iter()
        .filter(|p| p.title.contains(&term))
        .cloned()
        .collect();
    Json(posts)
}

async fn get_post(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    state.record("GET /posts/{id}", &headers);
    match state.posts.lock().unwrap().iter().find(|p| p.id == id) {
        Some(post) => (StatusCode::OK, Json(serde_json::to_value(post).unwrap())),
        None => not_found(),
    }
}

async fn create_post(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.record("POST /posts", &headers);
    if !state.authorized(&headers) {
        return unauthorized();
    }

    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    let post: Post = serde_json::from_value(json!({
        "id": id,
        "title": body["title"],
        "content": body["content"],
        "type": body["type"],
        "status": body["status"],
        "authorId": body["authorId"],
        "createdAt": CREATED_AT,
        "updatedAt": CREATED_AT,
    }))
    .expect("mock create payload should form a post");

    state.posts.lock().unwrap().push(post.clone());
    (
        StatusCode::CREATED,
        Json(serde_json::to_value(&post).unwrap()),
    )
}

async fn update_post(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.record("PUT /posts/{id}", &headers);
    if !state.authorized(&headers) {
        return unauthorized();
    }

    let mut posts = state.posts.lock().unwrap();
    let Some(existing) = posts.iter_mut().find(|p| p.id == id) else {
        return not_found();
    };

    let mut merged = serde_json::to_value(&*existing).unwrap();
    for field in ["title", "content", "type", "status"] {
        if let Some(value) = body.get(field) {
            merged[field] = value.clone();
        }
    }
    merged["updatedAt"] = json!(UPDATED_AT);

    *existing = serde_json::from_value(merged).expect("merged post should deserialize");
    (
        StatusCode::OK,
        Json(serde_json::to_value(&*existing).unwrap()),
    )
}

async fn delete_post(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    state.record("DELETE /posts/{id}", &headers);
    if !state.authorized(&headers) {
        return unauthorized().into_response();
    }

    let mut posts = state.posts.lock().unwrap();
    let Some(index) = posts.iter().position(|p| p.id == id) else {
        return not_found().into_response();
    };
    if posts[index].status != PostStatus::Inactive {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Only INACTIVE posts can be deleted", "statusCode": 400 })),
        )
            .into_response();
    }

    posts.remove(index);
    StatusCode::NO_CONTENT.into_response()
}

/// Handle to a running mock API.
pub struct MockApi {
    pub addr: SocketAddr,
    state: Arc<ApiState>,
}

impl MockApi {
    /// Bind to an ephemeral loopback port and start serving.
    pub async fn spawn() -> Self {
        let state = Arc::new(ApiState::new());

        let router = Router::new()
            .route("/auth/signup", post(signup))
            .route("/auth/signin", post(signin))
            .route("/auth/me", get(me))
            .route("/posts", get(list_active).post(create_post))
            .route("/posts/all", get(list_all))
            .route("/posts/search", get(search))
            .route(
                "/posts/{id}",
                get(get_post).put(update_post).delete(delete_post),
            )
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind mock API");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self { addr, state }
    }

    /// Client configuration pointing at this mock.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: format!("http://{}", self.addr),
            ..Default::default()
        }
    }

    /// Number of requests seen for a logical route, e.g. `"GET /posts"`.
    pub fn hits(&self, route: &str) -> usize {
        self.state
            .hits
            .lock()
            .unwrap()
            .get(route)
            .copied()
            .unwrap_or(0)
    }

    /// The `Authorization` header value of the most recent request, if
    /// one was present.
    pub fn last_auth(&self) -> Option<String> {
        self.state.last_auth.lock().unwrap().clone()
    }

    /// Insert a post directly into the mock's store.
    pub fn seed(&self, post: Post) {
        let floor = post.id + 1;
        self.state.next_id.fetch_max(floor, Ordering::SeqCst);
        self.state.posts.lock().unwrap().push(post);
    }
}

/// A post fixture with sensible defaults.
pub fn make_post(id: i64, title: &str, status: PostStatus) -> Post {
    Post {
        id,
        title: title.to_string(),
        content: format!("{title} body"),
        post_type: PostType::Public,
        status,
        author_id: 1,
        created_at: CREATED_AT.to_string(),
        updated_at: CREATED_AT.to_string(),
    }
}
