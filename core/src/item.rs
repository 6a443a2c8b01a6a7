//! A single post in the feed together with its transient view state.
//!
//! # Design
//! The liked flag and the displayed like count are local shadow state. The
//! flag always starts `false` whatever the server says, and the count starts
//! from the post's `like_count` and then moves by one per confirmed toggle.
//! Nothing reconciles the two with the server afterwards.
//!
//! There is no pending guard on toggles. The direction is fixed when the
//! toggle begins, so two toggles issued before either resolves both go the
//! same way and both apply when they complete.

use log::{debug, warn};

use crate::client::FeedClient;
use crate::http::{HttpOutcome, HttpRequest};
use crate::types::{LikeRequest, Post, PostId, Viewer};

/// Which way a like toggle was going when it was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeAction {
    Like,
    Unlike,
}

impl LikeAction {
    fn delta(self) -> i64 {
        match self {
            LikeAction::Like => 1,
            LikeAction::Unlike => -1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PostItem {
    post: Post,
    liked: bool,
    like_count: i64,
    error: Option<String>,
}

impl PostItem {
    pub fn new(post: Post) -> Self {
        let like_count = post.like_count;
        Self {
            post,
            liked: false,
            like_count,
            error: None,
        }
    }

    pub fn id(&self) -> PostId {
        self.post.id
    }

    pub fn post(&self) -> &Post {
        &self.post
    }

    pub fn is_liked(&self) -> bool {
        self.liked
    }

    /// The count shown next to the like control, not the server's.
    pub fn like_count(&self) -> i64 {
        self.like_count
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Delete is only offered to the post's author.
    pub fn can_delete(&self, viewer: &Viewer) -> bool {
        viewer.is_author_of(&self.post)
    }

    pub fn begin_toggle_like(
        &mut self,
        client: &FeedClient,
        viewer: &Viewer,
    ) -> Option<(LikeAction, HttpRequest)> {
        if self.liked {
            return Some((LikeAction::Unlike, client.build_unlike_post(self.post.id)));
        }
        let input = LikeRequest {
            user_name: viewer.name().to_string(),
        };
        match client.build_like_post(self.post.id, &input) {
            Ok(request) => Some((LikeAction::Like, request)),
            Err(e) => {
                warn!("building like for post {} failed: {e}", self.post.id);
                self.error = Some("Failed to update like.".to_string());
                None
            }
        }
    }

    /// Apply a resolved toggle. On failure neither the flag nor the count move.
    pub fn finish_toggle_like(&mut self, client: &FeedClient, action: LikeAction, outcome: HttpOutcome) {
        let result = outcome.and_then(|response| match action {
            LikeAction::Like => client.parse_like_post(response),
            LikeAction::Unlike => client.parse_unlike_post(response),
        });
        match result {
            Ok(()) => {
                self.like_count += action.delta();
                self.liked = action == LikeAction::Like;
                self.error = None;
                debug!(
                    "post {} {:?} applied, count now {}",
                    self.post.id, action, self.like_count
                );
            }
            Err(e) => {
                warn!("{:?} on post {} failed: {e}", action, self.post.id);
                self.error = Some("Failed to update like.".to_string());
            }
        }
    }

    /// Start deleting this post. `None` when the viewer is not the author.
    pub fn begin_delete(&self, client: &FeedClient, viewer: &Viewer) -> Option<HttpRequest> {
        if !self.can_delete(viewer) {
            debug!("delete of post {} not offered to {}", self.post.id, viewer.name());
            return None;
        }
        Some(client.build_delete_post(self.post.id))
    }

    /// Apply a resolved delete. Returns the id for the feed to drop on success.
    pub fn finish_delete(&mut self, client: &FeedClient, outcome: HttpOutcome) -> Option<PostId> {
        match outcome.and_then(|response| client.parse_delete_post(response)) {
            Ok(()) => {
                self.error = None;
                Some(self.post.id)
            }
            Err(e) => {
                warn!("deleting post {} failed: {e}", self.post.id);
                self.error = Some("Failed to delete post.".to_string());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::error::ApiError;
    use crate::http::{HttpMethod, HttpResponse};

    fn post(id: PostId, author: &str, likes: i64) -> Post {
        Post {
            id,
            user_name: author.to_string(),
            content: "text".to_string(),
            created_at: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            updated_at: None,
            like_count: likes,
            comment_count: 0,
        }
    }

    fn ok(status: u16) -> HttpOutcome {
        Ok(HttpResponse::new(status, ""))
    }

    #[test]
    fn starts_unliked_with_server_count() {
        let item = PostItem::new(post(1, "ana", 5));
        assert!(!item.is_liked());
        assert_eq!(item.like_count(), 5);
    }

    #[test]
    fn like_then_unlike_round_trips() {
        let client = FeedClient::default();
        let viewer = Viewer::new("bo");
        let mut item = PostItem::new(post(1, "ana", 5));

        let (action, req) = item.begin_toggle_like(&client, &viewer).unwrap();
        assert_eq!(action, LikeAction::Like);
        assert_eq!(req.method, HttpMethod::Post);
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["userName"], "bo");
        // Nothing moves until the call resolves.
        assert!(!item.is_liked());
        assert_eq!(item.like_count(), 5);

        item.finish_toggle_like(&client, action, ok(201));
        assert!(item.is_liked());
        assert_eq!(item.like_count(), 6);

        let (action, req) = item.begin_toggle_like(&client, &viewer).unwrap();
        assert_eq!(action, LikeAction::Unlike);
        assert_eq!(req.method, HttpMethod::Delete);
        item.finish_toggle_like(&client, action, ok(204));
        assert!(!item.is_liked());
        assert_eq!(item.like_count(), 5);
    }

    #[test]
    fn failed_unlike_leaves_state_unchanged() {
        let client = FeedClient::default();
        let viewer = Viewer::new("bo");
        let mut item = PostItem::new(post(1, "ana", 5));
        let (action, _) = item.begin_toggle_like(&client, &viewer).unwrap();
        item.finish_toggle_like(&client, action, ok(201));

        let (action, _) = item.begin_toggle_like(&client, &viewer).unwrap();
        item.finish_toggle_like(&client, action, Ok(HttpResponse::new(500, "nope")));
        assert!(item.is_liked());
        assert_eq!(item.like_count(), 6);
        assert_eq!(item.error(), Some("Failed to update like."));
    }

    #[test]
    fn double_toggle_before_resolution_applies_twice() {
        let client = FeedClient::default();
        let viewer = Viewer::new("bo");
        let mut item = PostItem::new(post(1, "ana", 5));

        let (first, _) = item.begin_toggle_like(&client, &viewer).unwrap();
        let (second, _) = item.begin_toggle_like(&client, &viewer).unwrap();
        assert_eq!(first, LikeAction::Like);
        assert_eq!(second, LikeAction::Like);

        item.finish_toggle_like(&client, first, ok(201));
        item.finish_toggle_like(&client, second, ok(201));
        assert!(item.is_liked());
        assert_eq!(item.like_count(), 7);
    }

    #[test]
    fn successful_toggle_clears_earlier_error() {
        let client = FeedClient::default();
        let viewer = Viewer::new("bo");
        let mut item = PostItem::new(post(1, "ana", 0));
        let (action, _) = item.begin_toggle_like(&client, &viewer).unwrap();
        item.finish_toggle_like(&client, action, Err(ApiError::Transport("reset".into())));
        assert!(item.error().is_some());

        let (action, _) = item.begin_toggle_like(&client, &viewer).unwrap();
        item.finish_toggle_like(&client, action, ok(201));
        assert!(item.error().is_none());
    }

    #[test]
    fn delete_only_offered_to_author() {
        let client = FeedClient::default();
        let item = PostItem::new(post(3, "ana", 0));
        assert!(item.can_delete(&Viewer::new("ana")));
        assert!(!item.can_delete(&Viewer::new("bo")));
        assert!(item.begin_delete(&client, &Viewer::new("bo")).is_none());

        let req = item.begin_delete(&client, &Viewer::new("ana")).unwrap();
        assert_eq!(req.method, HttpMethod::Delete);
        assert!(req.path.ends_with("/posts/3"));
    }

    #[test]
    fn delete_reports_id_on_success_and_error_on_failure() {
        let client = FeedClient::default();
        let mut item = PostItem::new(post(3, "ana", 0));

        assert_eq!(item.finish_delete(&client, Ok(HttpResponse::new(404, ""))), None);
        assert_eq!(item.error(), Some("Failed to delete post."));

        assert_eq!(item.finish_delete(&client, ok(204)), Some(3));
    }
}
