//! Plain-text rendering of the feed.

use std::fmt;

use feed_core::{Feed, FeedStatus, PostItem, Viewer};

pub const EMPTY_FEED: &str = "No posts yet. Write the first one!";

pub fn render(feed: &Feed) -> String {
    FeedView(feed).to_string()
}

/// `Display` adapter so each line can use `?`.
pub struct FeedView<'a>(pub &'a Feed);

impl fmt::Display for FeedView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let feed = self.0;
        let viewer = feed.viewer();
        writeln!(f, "== feed (posting as {}) ==", viewer.name())?;

        let composer = feed.composer();
        if composer.is_submitting() {
            writeln!(f, "posting...")?;
        }
        if let Some(error) = composer.error() {
            writeln!(f, "! {error}")?;
            if !composer.draft().is_empty() {
                writeln!(f, "  draft kept: {} (bare `post` retries)", composer.draft())?;
            }
        }

        match feed.status() {
            FeedStatus::Loading => writeln!(f, "loading..."),
            FeedStatus::Failed(error) => writeln!(f, "! {error}"),
            FeedStatus::Empty => writeln!(f, "{EMPTY_FEED}"),
            FeedStatus::Ready(items) => items
                .iter()
                .enumerate()
                .try_for_each(|(index, item)| write_item(f, index + 1, item, viewer)),
        }
    }
}

fn write_item(
    f: &mut fmt::Formatter<'_>,
    position: usize,
    item: &PostItem,
    viewer: &Viewer,
) -> fmt::Result {
    let post = item.post();
    let delete = if item.can_delete(viewer) { "  [delete]" } else { "" };
    writeln!(
        f,
        "{position:>3}. {} - {}{delete}",
        post.user_name,
        post.created_at.format("%Y-%m-%d %H:%M")
    )?;
    for line in post.content.lines() {
        writeln!(f, "     {line}")?;
    }
    let liked = if item.is_liked() { " (liked)" } else { "" };
    writeln!(
        f,
        "     likes: {}{liked}  comments: {}",
        item.like_count(),
        post.comment_count
    )?;
    if let Some(error) = item.error() {
        writeln!(f, "     ! {error}")?;
    }
    Ok(())
}
