//! Client core for the social feed.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps the view state of
//! the feed: the composer, each post's like/delete state, and the post
//! sequence itself.
//!
//! # Design
//! - `FeedClient` is stateless; it holds only `base_url`.
//! - Every remote operation is a `build_*`/`parse_*` pair.
//! - View components expose `begin_*` (state transition + request) and
//!   `finish_*` (state transition on the outcome) steps. The host executes
//!   the request in between, one task per user action.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod composer;
pub mod error;
pub mod feed;
pub mod http;
pub mod item;
pub mod types;

pub use client::{FeedClient, DEFAULT_BASE_URL};
pub use composer::PostComposer;
pub use error::ApiError;
pub use feed::{Feed, FeedStatus};
pub use http::{HttpMethod, HttpOutcome, HttpRequest, HttpResponse};
pub use item::{LikeAction, PostItem};
pub use types::{
    Comment, CommentId, CreateComment, CreatePost, LikeRequest, Post, PostId, UpdateComment,
    UpdatePost, Viewer,
};
