//! The `/api` REST surface.
//!
//! Administrative routes take the session token as a `token` query
//! parameter and fail with 401 when it is missing or invalid. Reads of
//! public content (portfolio, articles, gallery) are open.
//!
//! Most handlers are a direct mapping between an HTTP verb and a store
//! operation; the decision logic lives in `vitrine-auth` and
//! `vitrine-assistant`.

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use tracing::error;

use crate::{GatewayState, SharedState};
use vitrine_core::document::{Article, Comment, GalleryPhoto, NewArticle, Notification};
use vitrine_core::memory::{Memory, MemoryKind};
use vitrine_core::store::{FieldFilter, ListQuery, SortSpec, collections};
use vitrine_core::suggestion::Suggestion;
use vitrine_core::task::{NewTask, Task};

// ── Router ────────────────────────────────────────────────────────────────

/// Build the `/api` router. Nest this under "/api" in the main router.
pub fn api_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/auth/login", post(login_handler))
        .route("/auth/logout", post(logout_handler))
        .route("/auth/verify", get(verify_handler))
        .route("/portfolio", get(get_portfolio_handler).put(put_portfolio_handler))
        .route("/tasks", get(list_tasks_handler).post(create_task_handler))
        .route("/tasks/{id}", put(update_task_handler).delete(delete_task_handler))
        .route(
            "/ai/memory",
            get(list_memory_handler)
                .post(create_memory_handler)
                .delete(clear_memory_handler),
        )
        .route("/ai/memory/{id}", delete(delete_memory_handler))
        .route("/ai/chat", post(chat_handler))
        .route("/ai/suggestions", get(suggestions_handler))
        .route("/articles", get(list_articles_handler).post(create_article_handler))
        .route(
            "/articles/{id}",
            get(get_article_handler)
                .put(update_article_handler)
                .delete(delete_article_handler),
        )
        .route("/articles/{id}/like", post(like_article_handler))
        .route("/articles/{id}/comment", post(comment_article_handler))
        .route("/gallery", get(list_gallery_handler))
        .route("/gallery/upload", post(upload_photo_handler))
        .route("/gallery/reorder", put(reorder_gallery_handler))
        .route(
            "/gallery/{id}",
            put(update_photo_handler).delete(delete_photo_handler),
        )
        .route(
            "/notifications",
            get(list_notifications_handler).post(create_notification_handler),
        )
        .route("/notifications/{id}/read", put(read_notification_handler))
        .route("/notifications/{id}", delete(delete_notification_handler))
        .route("/stats", get(stats_handler))
        .with_state(state)
}

// ── Auth plumbing ─────────────────────────────────────────────────────────

/// The session token, passed as a query parameter on every gated route.
#[derive(Deserialize)]
pub struct TokenQuery {
    #[serde(default)]
    token: Option<String>,
}

/// Gate check: 401 unless the token is present and currently valid.
fn require_admin(state: &GatewayState, token: &TokenQuery) -> Result<String, StatusCode> {
    let token = token.token.as_deref().ok_or(StatusCode::UNAUTHORIZED)?;
    state
        .auth
        .verify(token)
        .map_err(|_| StatusCode::UNAUTHORIZED)
}

/// Unexpected faults (store, serialization) become plain 500s.
fn internal<E: std::fmt::Display>(e: E) -> StatusCode {
    error!(error = %e, "Request failed");
    StatusCode::INTERNAL_SERVER_ERROR
}

// ── Request / Response types ──────────────────────────────────────────────

#[derive(Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Serialize)]
struct LoginResponse {
    success: bool,
    token: String,
    message: &'static str,
}

#[derive(Serialize)]
struct SimpleResponse {
    success: bool,
    message: &'static str,
}

#[derive(Serialize)]
struct VerifyResponse {
    valid: bool,
    username: String,
}

#[derive(Deserialize)]
struct NewMemoryRequest {
    #[serde(rename = "type")]
    kind: MemoryKind,
    content: String,
    #[serde(default)]
    context: Option<String>,
}

#[derive(Deserialize)]
struct ChatMessage {
    message: String,
}

#[derive(Serialize)]
struct ChatResponse {
    response: String,
    success: bool,
}

#[derive(Serialize)]
struct SuggestionsResponse {
    suggestions: Vec<Suggestion>,
}

#[derive(Deserialize)]
struct PublishedFilter {
    #[serde(default)]
    published_only: bool,
}

#[derive(Deserialize)]
struct VisibleFilter {
    #[serde(default)]
    visible_only: bool,
}

#[derive(Deserialize)]
struct NewComment {
    author_name: String,
    content: String,
}

#[derive(Deserialize)]
struct PhotoUpload {
    /// Base64-encoded image payload, stored as the photo URL
    image_data: String,
    #[serde(default)]
    caption: String,
}

#[derive(Deserialize)]
struct ReorderRequest {
    order: HashMap<String, i64>,
}

// ── Root & health ─────────────────────────────────────────────────────────

async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Vitrine Portfolio API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn health_handler(State(state): State<SharedState>) -> Json<Value> {
    let uptime = chrono::Utc::now()
        .signed_duration_since(state.start_time)
        .num_seconds()
        .max(0);
    Json(json!({ "status": "ok", "uptime_secs": uptime }))
}

// ── Auth routes ───────────────────────────────────────────────────────────

async fn login_handler(
    State(state): State<SharedState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, StatusCode> {
    let token = state
        .auth
        .login(&payload.username, &payload.password)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;
    Ok(Json(LoginResponse {
        success: true,
        token,
        message: "Login successful",
    }))
}

async fn logout_handler(
    State(state): State<SharedState>,
    Query(token): Query<TokenQuery>,
) -> Json<SimpleResponse> {
    if let Some(token) = token.token.as_deref() {
        state.auth.logout(token);
    }
    Json(SimpleResponse {
        success: true,
        message: "Logged out successfully",
    })
}

async fn verify_handler(
    State(state): State<SharedState>,
    Query(token): Query<TokenQuery>,
) -> Result<Json<VerifyResponse>, StatusCode> {
    let username = require_admin(&state, &token)?;
    Ok(Json(VerifyResponse {
        valid: true,
        username,
    }))
}

// ── Portfolio routes ──────────────────────────────────────────────────────

async fn get_portfolio_handler(
    State(state): State<SharedState>,
) -> Result<Json<Value>, StatusCode> {
    let portfolio = state
        .store
        .find_first(collections::PORTFOLIO)
        .await
        .map_err(internal)?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(portfolio))
}

async fn put_portfolio_handler(
    State(state): State<SharedState>,
    Query(token): Query<TokenQuery>,
    Json(mut patch): Json<Map<String, Value>>,
) -> Result<Json<SimpleResponse>, StatusCode> {
    require_admin(&state, &token)?;
    patch.insert("updated_at".into(), json!(chrono::Utc::now()));
    state
        .store
        .upsert_first(collections::PORTFOLIO, patch)
        .await
        .map_err(internal)?;
    Ok(Json(SimpleResponse {
        success: true,
        message: "Portfolio updated",
    }))
}

// ── Task routes ───────────────────────────────────────────────────────────

async fn list_tasks_handler(
    State(state): State<SharedState>,
    Query(token): Query<TokenQuery>,
) -> Result<Json<Vec<Task>>, StatusCode> {
    require_admin(&state, &token)?;
    let tasks = state.tasks.list().await.map_err(internal)?;
    Ok(Json(tasks))
}

async fn create_task_handler(
    State(state): State<SharedState>,
    Query(token): Query<TokenQuery>,
    Json(new): Json<NewTask>,
) -> Result<Json<Value>, StatusCode> {
    require_admin(&state, &token)?;
    let task = state.tasks.create(new).await.map_err(internal)?;
    Ok(Json(json!({ "success": true, "task": task })))
}

async fn update_task_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(token): Query<TokenQuery>,
    Json(patch): Json<Map<String, Value>>,
) -> Result<Json<SimpleResponse>, StatusCode> {
    require_admin(&state, &token)?;
    let updated = state.tasks.update(&id, patch).await.map_err(internal)?;
    if !updated {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(SimpleResponse {
        success: true,
        message: "Task updated",
    }))
}

async fn delete_task_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(token): Query<TokenQuery>,
) -> Result<Json<SimpleResponse>, StatusCode> {
    require_admin(&state, &token)?;
    let deleted = state.tasks.delete(&id).await.map_err(internal)?;
    if !deleted {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(SimpleResponse {
        success: true,
        message: "Task deleted",
    }))
}

// ── AI routes ─────────────────────────────────────────────────────────────

async fn list_memory_handler(
    State(state): State<SharedState>,
    Query(token): Query<TokenQuery>,
) -> Result<Json<Vec<Memory>>, StatusCode> {
    require_admin(&state, &token)?;
    let memories = state.memories.recent(100).await.map_err(internal)?;
    Ok(Json(memories))
}

async fn create_memory_handler(
    State(state): State<SharedState>,
    Query(token): Query<TokenQuery>,
    Json(new): Json<NewMemoryRequest>,
) -> Result<Json<Value>, StatusCode> {
    require_admin(&state, &token)?;
    let mut memory = Memory::new(new.kind, new.content);
    if let Some(context) = new.context {
        memory = memory.with_context(context);
    }
    let memory = state.memories.append(memory).await.map_err(internal)?;
    Ok(Json(json!({ "success": true, "memory": memory })))
}

async fn delete_memory_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(token): Query<TokenQuery>,
) -> Result<Json<SimpleResponse>, StatusCode> {
    require_admin(&state, &token)?;
    let deleted = state.memories.delete(&id).await.map_err(internal)?;
    if !deleted {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(SimpleResponse {
        success: true,
        message: "Memory deleted",
    }))
}

async fn clear_memory_handler(
    State(state): State<SharedState>,
    Query(token): Query<TokenQuery>,
) -> Result<Json<SimpleResponse>, StatusCode> {
    require_admin(&state, &token)?;
    state.memories.clear().await.map_err(internal)?;
    Ok(Json(SimpleResponse {
        success: true,
        message: "All memories cleared",
    }))
}

/// Assistant turn. A provider failure is reported in-band (`success:
/// false` in the payload) — the transport layer still answers 200.
async fn chat_handler(
    State(state): State<SharedState>,
    Query(token): Query<TokenQuery>,
    Json(payload): Json<ChatMessage>,
) -> Result<Json<ChatResponse>, StatusCode> {
    require_admin(&state, &token)?;
    let outcome = state
        .orchestrator
        .chat(&payload.message)
        .await
        .map_err(internal)?;
    Ok(Json(ChatResponse {
        response: outcome.reply,
        success: outcome.success,
    }))
}

async fn suggestions_handler(
    State(state): State<SharedState>,
    Query(token): Query<TokenQuery>,
) -> Result<Json<SuggestionsResponse>, StatusCode> {
    require_admin(&state, &token)?;
    let open_tasks = state.tasks.incomplete(10).await.map_err(internal)?;
    let suggestions = state.suggestions.suggest(&open_tasks, chrono::Utc::now());
    Ok(Json(SuggestionsResponse { suggestions }))
}

// ── Article routes ────────────────────────────────────────────────────────

async fn list_articles_handler(
    State(state): State<SharedState>,
    Query(filter): Query<PublishedFilter>,
) -> Result<Json<Vec<Value>>, StatusCode> {
    let mut query = ListQuery::all(100).sorted(SortSpec::descending("created_at"));
    if filter.published_only {
        query = query.filtered(FieldFilter::new("published", true));
    }
    let articles = state
        .store
        .list(collections::ARTICLES, query)
        .await
        .map_err(internal)?;
    Ok(Json(articles))
}

async fn get_article_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let article = state
        .store
        .find(collections::ARTICLES, &id)
        .await
        .map_err(internal)?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(article))
}

async fn create_article_handler(
    State(state): State<SharedState>,
    Query(token): Query<TokenQuery>,
    Json(new): Json<NewArticle>,
) -> Result<Json<Value>, StatusCode> {
    require_admin(&state, &token)?;
    let article = Article::create(new);
    state
        .store
        .insert(
            collections::ARTICLES,
            serde_json::to_value(&article).map_err(internal)?,
        )
        .await
        .map_err(internal)?;
    Ok(Json(json!({ "success": true, "article": article })))
}

async fn update_article_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(token): Query<TokenQuery>,
    Json(mut patch): Json<Map<String, Value>>,
) -> Result<Json<SimpleResponse>, StatusCode> {
    require_admin(&state, &token)?;
    patch.insert("updated_at".into(), json!(chrono::Utc::now()));
    let updated = state
        .store
        .merge(collections::ARTICLES, &id, patch)
        .await
        .map_err(internal)?;
    if !updated {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(SimpleResponse {
        success: true,
        message: "Article updated",
    }))
}

async fn delete_article_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(token): Query<TokenQuery>,
) -> Result<Json<SimpleResponse>, StatusCode> {
    require_admin(&state, &token)?;
    let deleted = state
        .store
        .remove(collections::ARTICLES, &id)
        .await
        .map_err(internal)?;
    if !deleted {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(SimpleResponse {
        success: true,
        message: "Article deleted",
    }))
}

/// Public like counter. Read-then-write: concurrent likes can lose an
/// increment; the store offers no atomic counter and the count is cosmetic.
async fn like_article_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<SimpleResponse>, StatusCode> {
    let article = state
        .store
        .find(collections::ARTICLES, &id)
        .await
        .map_err(internal)?
        .ok_or(StatusCode::NOT_FOUND)?;
    let likes = article.get("likes").and_then(Value::as_i64).unwrap_or(0);

    let mut patch = Map::new();
    patch.insert("likes".into(), json!(likes + 1));
    state
        .store
        .merge(collections::ARTICLES, &id, patch)
        .await
        .map_err(internal)?;
    Ok(Json(SimpleResponse {
        success: true,
        message: "Liked",
    }))
}

async fn comment_article_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(new): Json<NewComment>,
) -> Result<Json<Value>, StatusCode> {
    let article = state
        .store
        .find(collections::ARTICLES, &id)
        .await
        .map_err(internal)?
        .ok_or(StatusCode::NOT_FOUND)?;

    let comment = Comment::new(new.author_name, new.content);

    let mut comments = article
        .get("comments")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    comments.push(serde_json::to_value(&comment).map_err(internal)?);

    let mut patch = Map::new();
    patch.insert("comments".into(), Value::Array(comments));
    state
        .store
        .merge(collections::ARTICLES, &id, patch)
        .await
        .map_err(internal)?;
    Ok(Json(json!({ "success": true, "comment": comment })))
}

// ── Gallery routes ────────────────────────────────────────────────────────

async fn list_gallery_handler(
    State(state): State<SharedState>,
    Query(filter): Query<VisibleFilter>,
) -> Result<Json<Vec<Value>>, StatusCode> {
    let mut query = ListQuery::all(100).sorted(SortSpec::ascending("order"));
    if filter.visible_only {
        query = query.filtered(FieldFilter::new("visible", true));
    }
    let photos = state
        .store
        .list(collections::GALLERY, query)
        .await
        .map_err(internal)?;
    Ok(Json(photos))
}

/// Upload a photo at the next order index. The max-order read and the
/// insert are two store calls; concurrent uploads can collide on the same
/// index. Accepted for a single-admin gallery.
async fn upload_photo_handler(
    State(state): State<SharedState>,
    Query(token): Query<TokenQuery>,
    Json(upload): Json<PhotoUpload>,
) -> Result<Json<Value>, StatusCode> {
    require_admin(&state, &token)?;

    let top = state
        .store
        .list(
            collections::GALLERY,
            ListQuery::all(1).sorted(SortSpec::descending("order")),
        )
        .await
        .map_err(internal)?;
    let next_order = top
        .first()
        .and_then(|photo| photo.get("order").and_then(Value::as_i64))
        .map(|order| order + 1)
        .unwrap_or(0);

    let photo = GalleryPhoto::new(upload.image_data, upload.caption, next_order);
    state
        .store
        .insert(
            collections::GALLERY,
            serde_json::to_value(&photo).map_err(internal)?,
        )
        .await
        .map_err(internal)?;
    Ok(Json(json!({ "success": true, "photo": photo })))
}

async fn reorder_gallery_handler(
    State(state): State<SharedState>,
    Query(token): Query<TokenQuery>,
    Json(reorder): Json<ReorderRequest>,
) -> Result<Json<SimpleResponse>, StatusCode> {
    require_admin(&state, &token)?;
    for (photo_id, new_order) in reorder.order {
        let mut patch = Map::new();
        patch.insert("order".into(), json!(new_order));
        state
            .store
            .merge(collections::GALLERY, &photo_id, patch)
            .await
            .map_err(internal)?;
    }
    Ok(Json(SimpleResponse {
        success: true,
        message: "Gallery reordered",
    }))
}

async fn update_photo_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(token): Query<TokenQuery>,
    Json(patch): Json<Map<String, Value>>,
) -> Result<Json<SimpleResponse>, StatusCode> {
    require_admin(&state, &token)?;
    let updated = state
        .store
        .merge(collections::GALLERY, &id, patch)
        .await
        .map_err(internal)?;
    if !updated {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(SimpleResponse {
        success: true,
        message: "Photo updated",
    }))
}

async fn delete_photo_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(token): Query<TokenQuery>,
) -> Result<Json<SimpleResponse>, StatusCode> {
    require_admin(&state, &token)?;
    let deleted = state
        .store
        .remove(collections::GALLERY, &id)
        .await
        .map_err(internal)?;
    if !deleted {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(SimpleResponse {
        success: true,
        message: "Photo deleted",
    }))
}

// ── Notification routes ───────────────────────────────────────────────────

async fn list_notifications_handler(
    State(state): State<SharedState>,
    Query(token): Query<TokenQuery>,
) -> Result<Json<Vec<Value>>, StatusCode> {
    require_admin(&state, &token)?;
    let notifications = state
        .store
        .list(
            collections::NOTIFICATIONS,
            ListQuery::all(50).sorted(SortSpec::descending("created_at")),
        )
        .await
        .map_err(internal)?;
    Ok(Json(notifications))
}

async fn create_notification_handler(
    State(state): State<SharedState>,
    Query(token): Query<TokenQuery>,
    Json(notification): Json<Notification>,
) -> Result<Json<Value>, StatusCode> {
    require_admin(&state, &token)?;
    state
        .store
        .insert(
            collections::NOTIFICATIONS,
            serde_json::to_value(&notification).map_err(internal)?,
        )
        .await
        .map_err(internal)?;
    Ok(Json(json!({ "success": true, "notification": notification })))
}

async fn read_notification_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(token): Query<TokenQuery>,
) -> Result<Json<SimpleResponse>, StatusCode> {
    require_admin(&state, &token)?;
    let mut patch = Map::new();
    patch.insert("read".into(), json!(true));
    let updated = state
        .store
        .merge(collections::NOTIFICATIONS, &id, patch)
        .await
        .map_err(internal)?;
    if !updated {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(SimpleResponse {
        success: true,
        message: "Notification marked read",
    }))
}

async fn delete_notification_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(token): Query<TokenQuery>,
) -> Result<Json<SimpleResponse>, StatusCode> {
    require_admin(&state, &token)?;
    let deleted = state
        .store
        .remove(collections::NOTIFICATIONS, &id)
        .await
        .map_err(internal)?;
    if !deleted {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(SimpleResponse {
        success: true,
        message: "Notification deleted",
    }))
}

// ── Stats ─────────────────────────────────────────────────────────────────

async fn stats_handler(
    State(state): State<SharedState>,
    Query(token): Query<TokenQuery>,
) -> Result<Json<Value>, StatusCode> {
    require_admin(&state, &token)?;

    let tasks_total = state.tasks.count().await.map_err(internal)?;
    let tasks_completed = state.tasks.count_completed().await.map_err(internal)?;
    let articles_total = state
        .store
        .count(collections::ARTICLES, None)
        .await
        .map_err(internal)?;
    let articles_published = state
        .store
        .count(
            collections::ARTICLES,
            Some(FieldFilter::new("published", true)),
        )
        .await
        .map_err(internal)?;
    let gallery_total = state
        .store
        .count(collections::GALLERY, None)
        .await
        .map_err(internal)?;
    let memories_total = state.memories.count().await.map_err(internal)?;

    Ok(Json(json!({
        "tasks": { "total": tasks_total, "completed": tasks_completed },
        "articles": { "total": articles_total, "published": articles_published },
        "gallery": { "total": gallery_total },
        "ai_memories": { "total": memories_total },
    })))
}
