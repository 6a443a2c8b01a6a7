//! The post composer: a draft text field plus submission status.
//!
//! Submission is split in two. `begin_submit` decides whether a request goes
//! out at all and marks the composer busy; `finish_submit` applies the outcome
//! and, on success, hands back the created post for the feed to prepend.

use log::{debug, warn};

use crate::client::FeedClient;
use crate::http::{HttpOutcome, HttpRequest};
use crate::types::{CreatePost, Post, Viewer};

#[derive(Debug, Clone, Default)]
pub struct PostComposer {
    draft: String,
    submitting: bool,
    error: Option<String>,
}

impl PostComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a submit right now would send anything.
    pub fn can_submit(&self) -> bool {
        !self.submitting && !self.draft.trim().is_empty()
    }

    pub fn edit(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Start a submission. Returns `None` when the draft is blank or a
    /// submission is already in flight; no state changes in that case.
    pub fn begin_submit(&mut self, client: &FeedClient, viewer: &Viewer) -> Option<HttpRequest> {
        if !self.can_submit() {
            debug!("composer submit ignored (blank draft or in flight)");
            return None;
        }
        let input = CreatePost {
            content: self.draft.clone(),
            user_name: viewer.name().to_string(),
        };
        self.error = None;
        match client.build_create_post(&input) {
            Ok(request) => {
                self.submitting = true;
                Some(request)
            }
            Err(e) => {
                self.error = Some(format!("Failed to create post: {e}"));
                None
            }
        }
    }

    /// Apply the outcome of the create call. The returned post is the one
    /// notification the parent gets for this submission.
    pub fn finish_submit(&mut self, client: &FeedClient, outcome: HttpOutcome) -> Option<Post> {
        if !self.submitting {
            debug!("composer completion without a submission in flight, ignored");
            return None;
        }
        self.submitting = false;
        match outcome.and_then(|response| client.parse_create_post(response)) {
            Ok(post) => {
                debug!("post {} created", post.id);
                self.draft.clear();
                Some(post)
            }
            Err(e) => {
                warn!("creating post failed: {e}");
                self.error = Some(format!("Failed to create post: {e}"));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::http::{HttpMethod, HttpResponse};

    const CREATED: &str = r#"{"id":11,"userName":"ana","content":"hi there","createdAt":"2024-05-01T09:30:00","likeCount":0,"commentCount":0}"#;

    fn setup() -> (FeedClient, Viewer, PostComposer) {
        (FeedClient::default(), Viewer::new("ana"), PostComposer::new())
    }

    #[test]
    fn blank_draft_sends_nothing() {
        let (client, viewer, mut composer) = setup();
        assert!(composer.begin_submit(&client, &viewer).is_none());
        composer.edit("   \n\t ");
        assert!(composer.begin_submit(&client, &viewer).is_none());
        assert!(!composer.is_submitting());
        assert_eq!(composer.draft(), "   \n\t ");
    }

    #[test]
    fn submit_sends_untrimmed_draft_as_viewer() {
        let (client, viewer, mut composer) = setup();
        composer.edit("  hi there ");
        let req = composer.begin_submit(&client, &viewer).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["content"], "  hi there ");
        assert_eq!(body["userName"], "ana");
        assert!(composer.is_submitting());
    }

    #[test]
    fn second_submit_while_in_flight_is_ignored() {
        let (client, viewer, mut composer) = setup();
        composer.edit("hi there");
        assert!(composer.begin_submit(&client, &viewer).is_some());
        assert!(composer.begin_submit(&client, &viewer).is_none());
    }

    #[test]
    fn success_clears_draft_and_reports_post_once() {
        let (client, viewer, mut composer) = setup();
        composer.edit("hi there");
        composer.begin_submit(&client, &viewer).unwrap();

        let post = composer
            .finish_submit(&client, Ok(HttpResponse::new(201, CREATED)))
            .unwrap();
        assert_eq!(post.id, 11);
        assert_eq!(composer.draft(), "");
        assert!(!composer.is_submitting());
        assert!(composer.error().is_none());

        // A stray second completion does not notify again.
        assert!(composer
            .finish_submit(&client, Ok(HttpResponse::new(201, CREATED)))
            .is_none());
    }

    #[test]
    fn failure_keeps_draft_and_sets_error() {
        let (client, viewer, mut composer) = setup();
        composer.edit("keep me");
        composer.begin_submit(&client, &viewer).unwrap();

        let post = composer.finish_submit(&client, Err(ApiError::Transport("connection refused".into())));
        assert!(post.is_none());
        assert_eq!(composer.draft(), "keep me");
        assert!(!composer.is_submitting());
        assert!(composer.error().unwrap().starts_with("Failed to create post"));
    }

    #[test]
    fn retry_after_failure_clears_previous_error() {
        let (client, viewer, mut composer) = setup();
        composer.edit("keep me");
        composer.begin_submit(&client, &viewer).unwrap();
        composer.finish_submit(&client, Ok(HttpResponse::new(500, "down")));
        assert!(composer.error().is_some());

        assert!(composer.begin_submit(&client, &viewer).is_some());
        assert!(composer.error().is_none());
    }
}
