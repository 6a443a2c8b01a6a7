use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDateTime};
use log::info;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub user_name: String,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub like_count: i64,
    pub comment_count: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub user_name: String,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePost {
    pub user_name: String,
    pub content: String,
}

#[derive(Deserialize)]
pub struct UpdatePost {
    pub content: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComment {
    pub user_name: String,
    pub content: String,
}

#[derive(Deserialize)]
pub struct UpdateComment {
    pub content: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeRequest {
    pub user_name: String,
}

/// In-memory tables. Ids are handed out sequentially and never reused.
#[derive(Default)]
pub struct Store {
    posts: BTreeMap<i64, Post>,
    comments: BTreeMap<i64, Comment>,
    next_post_id: i64,
    next_comment_id: i64,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    let api = Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).patch(update_post).delete(delete_post),
        )
        .route(
            "/posts/{id}/comments",
            get(list_comments).post(create_comment),
        )
        .route(
            "/posts/{id}/comments/{cid}",
            get(get_comment).patch(update_comment).delete(delete_comment),
        )
        .route("/posts/{id}/likes", post(like_post).delete(unlike_post))
        .with_state(db);
    Router::new().nest("/api", api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

// --- posts ---

async fn list_posts(State(db): State<Db>) -> Json<Vec<Post>> {
    let store = db.read().await;
    Json(store.posts.values().cloned().collect())
}

async fn create_post(
    State(db): State<Db>,
    Json(input): Json<CreatePost>,
) -> (StatusCode, Json<Post>) {
    let mut store = db.write().await;
    store.next_post_id += 1;
    let created_at = now();
    let post = Post {
        id: store.next_post_id,
        user_name: input.user_name,
        content: input.content,
        created_at,
        updated_at: created_at,
        like_count: 0,
        comment_count: 0,
    };
    store.posts.insert(post.id, post.clone());
    info!("post {} created by {}", post.id, post.user_name);
    (StatusCode::CREATED, Json(post))
}

async fn get_post(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Post>, StatusCode> {
    let store = db.read().await;
    store.posts.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_post(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdatePost>,
) -> Result<Json<Post>, StatusCode> {
    let mut store = db.write().await;
    let post = store.posts.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(content) = input.content {
        post.content = content;
    }
    post.updated_at = now();
    Ok(Json(post.clone()))
}

async fn delete_post(State(db): State<Db>, Path(id): Path<i64>) -> StatusCode {
    let mut store = db.write().await;
    if store.posts.remove(&id).is_none() {
        return StatusCode::NOT_FOUND;
    }
    store.comments.retain(|_, comment| comment.post_id != id);
    info!("post {id} deleted");
    StatusCode::NO_CONTENT
}

// --- comments ---

async fn list_comments(State(db): State<Db>, Path(id): Path<i64>) -> Json<Vec<Comment>> {
    let store = db.read().await;
    Json(
        store
            .comments
            .values()
            .filter(|comment| comment.post_id == id)
            .cloned()
            .collect(),
    )
}

async fn create_comment(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<CreateComment>,
) -> Result<(StatusCode, Json<Comment>), StatusCode> {
    let mut store = db.write().await;
    let post = store.posts.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    post.comment_count += 1;
    store.next_comment_id += 1;
    let created_at = now();
    let comment = Comment {
        id: store.next_comment_id,
        post_id: id,
        user_name: input.user_name,
        content: input.content,
        created_at,
        updated_at: created_at,
    };
    store.comments.insert(comment.id, comment.clone());
    Ok((StatusCode::CREATED, Json(comment)))
}

async fn get_comment(
    State(db): State<Db>,
    Path((id, cid)): Path<(i64, i64)>,
) -> Result<Json<Comment>, StatusCode> {
    let store = db.read().await;
    store
        .comments
        .get(&cid)
        .filter(|comment| comment.post_id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_comment(
    State(db): State<Db>,
    Path((id, cid)): Path<(i64, i64)>,
    Json(input): Json<UpdateComment>,
) -> Result<Json<Comment>, StatusCode> {
    let mut store = db.write().await;
    let comment = store
        .comments
        .get_mut(&cid)
        .filter(|comment| comment.post_id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    if let Some(content) = input.content {
        comment.content = content;
    }
    comment.updated_at = now();
    Ok(Json(comment.clone()))
}

async fn delete_comment(State(db): State<Db>, Path((id, cid)): Path<(i64, i64)>) -> StatusCode {
    let mut store = db.write().await;
    match store.comments.get(&cid) {
        Some(comment) if comment.post_id == id => {}
        _ => return StatusCode::NOT_FOUND,
    }
    store.comments.remove(&cid);
    if let Some(post) = store.posts.get_mut(&id) {
        post.comment_count -= 1;
    }
    StatusCode::NO_CONTENT
}

// --- likes ---

async fn like_post(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<LikeRequest>,
) -> StatusCode {
    let mut store = db.write().await;
    let Some(post) = store.posts.get_mut(&id) else {
        return StatusCode::NOT_FOUND;
    };
    post.like_count += 1;
    info!("post {id} liked by {}", input.user_name);
    StatusCode::CREATED
}

/// Only succeeds while the count is positive; a post with zero likes answers
/// 404 just like a missing one.
async fn unlike_post(State(db): State<Db>, Path(id): Path<i64>) -> StatusCode {
    let mut store = db.write().await;
    match store.posts.get_mut(&id) {
        Some(post) if post.like_count > 0 => {
            post.like_count -= 1;
            StatusCode::NO_CONTENT
        }
        _ => StatusCode::NOT_FOUND,
    }
}
