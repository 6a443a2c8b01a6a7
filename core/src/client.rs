//! Stateless HTTP request builder and response parser for the feed API.
//!
//! # Design
//! `FeedClient` holds only a `base_url`. Each remote operation is split into
//! a `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. The caller executes the round-trip in
//! between, so the client stays deterministic and free of I/O.

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    Comment, CommentId, CreateComment, CreatePost, LikeRequest, Post, PostId, UpdateComment,
    UpdatePost,
};

/// Where the original deployment serves the API.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Synchronous, stateless client for the feed API.
#[derive(Debug, Clone)]
pub struct FeedClient {
    base_url: String,
}

impl Default for FeedClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl FeedClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // --- posts ---

    pub fn build_list_posts(&self) -> HttpRequest {
        self.bare(HttpMethod::Get, "/posts".to_string())
    }

    pub fn build_get_post(&self, id: PostId) -> HttpRequest {
        self.bare(HttpMethod::Get, format!("/posts/{id}"))
    }

    pub fn build_create_post(&self, input: &CreatePost) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Post, "/posts".to_string(), input)
    }

    pub fn build_update_post(&self, id: PostId, input: &UpdatePost) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Patch, format!("/posts/{id}"), input)
    }

    pub fn build_delete_post(&self, id: PostId) -> HttpRequest {
        self.bare(HttpMethod::Delete, format!("/posts/{id}"))
    }

    pub fn parse_list_posts(&self, response: HttpResponse) -> Result<Vec<Post>, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_post(&self, response: HttpResponse) -> Result<Post, ApiError> {
        parse_json(response)
    }

    pub fn parse_create_post(&self, response: HttpResponse) -> Result<Post, ApiError> {
        parse_json(response)
    }

    pub fn parse_update_post(&self, response: HttpResponse) -> Result<Post, ApiError> {
        parse_json(response)
    }

    pub fn parse_delete_post(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    // --- comments ---

    pub fn build_list_comments(&self, post_id: PostId) -> HttpRequest {
        self.bare(HttpMethod::Get, format!("/posts/{post_id}/comments"))
    }

    pub fn build_get_comment(&self, post_id: PostId, id: CommentId) -> HttpRequest {
        self.bare(HttpMethod::Get, format!("/posts/{post_id}/comments/{id}"))
    }

    pub fn build_create_comment(
        &self,
        post_id: PostId,
        input: &CreateComment,
    ) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Post, format!("/posts/{post_id}/comments"), input)
    }

    pub fn build_update_comment(
        &self,
        post_id: PostId,
        id: CommentId,
        input: &UpdateComment,
    ) -> Result<HttpRequest, ApiError> {
        self.with_json(
            HttpMethod::Patch,
            format!("/posts/{post_id}/comments/{id}"),
            input,
        )
    }

    pub fn build_delete_comment(&self, post_id: PostId, id: CommentId) -> HttpRequest {
        self.bare(HttpMethod::Delete, format!("/posts/{post_id}/comments/{id}"))
    }

    pub fn parse_list_comments(&self, response: HttpResponse) -> Result<Vec<Comment>, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_comment(&self, response: HttpResponse) -> Result<Comment, ApiError> {
        parse_json(response)
    }

    pub fn parse_create_comment(&self, response: HttpResponse) -> Result<Comment, ApiError> {
        parse_json(response)
    }

    pub fn parse_update_comment(&self, response: HttpResponse) -> Result<Comment, ApiError> {
        parse_json(response)
    }

    pub fn parse_delete_comment(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    // --- likes ---

    pub fn build_like_post(&self, post_id: PostId, input: &LikeRequest) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Post, format!("/posts/{post_id}/likes"), input)
    }

    pub fn build_unlike_post(&self, post_id: PostId) -> HttpRequest {
        self.bare(HttpMethod::Delete, format!("/posts/{post_id}/likes"))
    }

    /// Like and unlike answer with an empty body; only the status matters.
    pub fn parse_like_post(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_unlike_post(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn bare(&self, method: HttpMethod, path: String) -> HttpRequest {
        debug!("built {} {}{}", method.as_str(), self.base_url, path);
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn with_json<T: Serialize>(
        &self,
        method: HttpMethod,
        path: String,
        input: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let mut request = self.bare(method, path);
        request.headers = vec![("content-type".to_string(), "application/json".to_string())];
        request.body = Some(body);
        Ok(request)
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST_JSON: &str = r#"{"id":7,"userName":"ana","content":"hello","createdAt":"2024-05-01T09:30:00","updatedAt":"2024-05-01T09:30:00","likeCount":5,"commentCount":2}"#;

    fn client() -> FeedClient {
        FeedClient::new("http://localhost:8000/api")
    }

    #[test]
    fn build_list_posts_produces_correct_request() {
        let req = client().build_list_posts();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:8000/api/posts");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_create_post_sends_content_and_user_name() {
        let input = CreatePost {
            content: "first!".to_string(),
            user_name: "ana".to_string(),
        };
        let req = client().build_create_post(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:8000/api/posts");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"content": "first!", "userName": "ana"}));
    }

    #[test]
    fn build_update_post_is_a_partial_patch() {
        let req = client().build_update_post(3, &UpdatePost::default()).unwrap();
        assert_eq!(req.method, HttpMethod::Patch);
        assert_eq!(req.path, "http://localhost:8000/api/posts/3");
        assert_eq!(req.body.as_deref(), Some("{}"));
    }

    #[test]
    fn comment_paths_nest_under_the_post() {
        let c = client();
        assert_eq!(c.build_list_comments(4).path, "http://localhost:8000/api/posts/4/comments");
        assert_eq!(c.build_get_comment(4, 9).path, "http://localhost:8000/api/posts/4/comments/9");
        let del = c.build_delete_comment(4, 9);
        assert_eq!(del.method, HttpMethod::Delete);
        assert_eq!(del.path, "http://localhost:8000/api/posts/4/comments/9");
    }

    #[test]
    fn like_and_unlike_share_a_path() {
        let c = client();
        let like = c
            .build_like_post(
                2,
                &LikeRequest {
                    user_name: "ana".to_string(),
                },
            )
            .unwrap();
        let unlike = c.build_unlike_post(2);
        assert_eq!(like.method, HttpMethod::Post);
        assert_eq!(unlike.method, HttpMethod::Delete);
        assert_eq!(like.path, unlike.path);
        assert!(unlike.body.is_none());
    }

    #[test]
    fn parse_get_post_reads_camel_case_fields() {
        let post = client().parse_get_post(HttpResponse::new(200, POST_JSON)).unwrap();
        assert_eq!(post.id, 7);
        assert_eq!(post.user_name, "ana");
        assert_eq!(post.like_count, 5);
        assert_eq!(post.comment_count, 2);
    }

    #[test]
    fn parse_accepts_any_2xx() {
        let post = client().parse_create_post(HttpResponse::new(201, POST_JSON)).unwrap();
        assert_eq!(post.content, "hello");
        assert!(client().parse_like_post(HttpResponse::new(201, "null")).is_ok());
        assert!(client().parse_unlike_post(HttpResponse::new(204, "")).is_ok());
    }

    #[test]
    fn parse_post_without_updated_at() {
        let body = r#"{"id":1,"userName":"b","content":"x","createdAt":"2024-05-01T09:30:00.123456","likeCount":0,"commentCount":0}"#;
        let post = client().parse_get_post(HttpResponse::new(200, body)).unwrap();
        assert!(post.updated_at.is_none());
    }

    #[test]
    fn parse_delete_post_not_found() {
        let err = client().parse_delete_post(HttpResponse::new(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_server_error_keeps_status_and_body() {
        let err = client()
            .parse_list_posts(HttpResponse::new(500, "boom"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, ref body } if body == "boom"));
    }

    #[test]
    fn parse_list_posts_bad_json() {
        let err = client()
            .parse_list_posts(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = FeedClient::new("http://localhost:8000/api/");
        assert_eq!(client.build_list_posts().path, "http://localhost:8000/api/posts");
    }

    #[test]
    fn default_client_uses_default_base_url() {
        assert_eq!(FeedClient::default().base_url(), DEFAULT_BASE_URL);
    }
}
