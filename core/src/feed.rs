//! The feed root: owns the post sequence, the composer and the viewer.
//!
//! The sequence is a snapshot taken once by the initial load plus local
//! mutations: created posts are prepended, deleted posts are dropped. It is
//! never re-sorted or refetched.
//!
//! The `begin_*`/`finish_*` wrappers route a child's result back into the
//! sequence, which is how creations and deletions reach the feed.

use log::{debug, info, warn};

use crate::client::FeedClient;
use crate::composer::PostComposer;
use crate::http::{HttpOutcome, HttpRequest};
use crate::item::{LikeAction, PostItem};
use crate::types::{Post, PostId, Viewer};

/// What the feed area should show right now.
#[derive(Debug)]
pub enum FeedStatus<'a> {
    Loading,
    Failed(&'a str),
    Empty,
    Ready(&'a [PostItem]),
}

#[derive(Debug, Clone)]
pub struct Feed {
    viewer: Viewer,
    items: Vec<PostItem>,
    composer: PostComposer,
    loading: bool,
    error: Option<String>,
}

impl Feed {
    pub fn new(viewer: Viewer) -> Self {
        Self {
            viewer,
            items: Vec::new(),
            composer: PostComposer::new(),
            loading: true,
            error: None,
        }
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn items(&self) -> &[PostItem] {
        &self.items
    }

    pub fn item(&self, id: PostId) -> Option<&PostItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn composer(&self) -> &PostComposer {
        &self.composer
    }

    pub fn composer_mut(&mut self) -> &mut PostComposer {
        &mut self.composer
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn status(&self) -> FeedStatus<'_> {
        if self.loading {
            FeedStatus::Loading
        } else if let Some(error) = &self.error {
            FeedStatus::Failed(error)
        } else if self.items.is_empty() {
            FeedStatus::Empty
        } else {
            FeedStatus::Ready(&self.items)
        }
    }

    // --- initial load ---

    /// A load replaces the whole sequence, so the old one is dropped up front.
    pub fn begin_load(&mut self, client: &FeedClient) -> HttpRequest {
        self.loading = true;
        self.error = None;
        self.items.clear();
        client.build_list_posts()
    }

    pub fn finish_load(&mut self, client: &FeedClient, outcome: HttpOutcome) {
        match outcome.and_then(|response| client.parse_list_posts(response)) {
            Ok(posts) => {
                info!("loaded {} posts", posts.len());
                self.items = posts.into_iter().map(PostItem::new).collect();
            }
            Err(e) => {
                warn!("loading posts failed: {e}");
                self.error = Some(format!("Failed to load posts: {e}"));
            }
        }
        self.loading = false;
    }

    // --- child notifications ---

    pub fn handle_created(&mut self, post: Post) {
        debug!("prepending post {}", post.id);
        self.items.insert(0, PostItem::new(post));
    }

    pub fn handle_deleted(&mut self, id: PostId) {
        debug!("dropping post {id}");
        self.items.retain(|item| item.id() != id);
    }

    // --- routed child actions ---

    pub fn begin_submit(&mut self, client: &FeedClient) -> Option<HttpRequest> {
        self.composer.begin_submit(client, &self.viewer)
    }

    /// Returns `true` when a new post was added to the feed.
    pub fn finish_submit(&mut self, client: &FeedClient, outcome: HttpOutcome) -> bool {
        match self.composer.finish_submit(client, outcome) {
            Some(post) => {
                self.handle_created(post);
                true
            }
            None => false,
        }
    }

    pub fn begin_toggle_like(
        &mut self,
        client: &FeedClient,
        id: PostId,
    ) -> Option<(LikeAction, HttpRequest)> {
        let viewer = &self.viewer;
        self.items
            .iter_mut()
            .find(|item| item.id() == id)?
            .begin_toggle_like(client, viewer)
    }

    /// A completion for a post that has since left the feed is dropped.
    pub fn finish_toggle_like(
        &mut self,
        client: &FeedClient,
        id: PostId,
        action: LikeAction,
        outcome: HttpOutcome,
    ) {
        if let Some(item) = self.item_mut(id) {
            item.finish_toggle_like(client, action, outcome);
        }
    }

    pub fn begin_delete(&self, client: &FeedClient, id: PostId) -> Option<HttpRequest> {
        self.item(id)?.begin_delete(client, &self.viewer)
    }

    /// Returns `true` when the post was removed from the feed.
    pub fn finish_delete(&mut self, client: &FeedClient, id: PostId, outcome: HttpOutcome) -> bool {
        let Some(item) = self.item_mut(id) else {
            return false;
        };
        match item.finish_delete(client, outcome) {
            Some(deleted) => {
                self.handle_deleted(deleted);
                true
            }
            None => false,
        }
    }

    fn item_mut(&mut self, id: PostId) -> Option<&mut PostItem> {
        self.items.iter_mut().find(|item| item.id() == id)
    }
}
