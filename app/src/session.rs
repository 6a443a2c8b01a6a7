//! One viewer's feed, wired to the network.
//!
//! Each method is one user action: ask the component for its request,
//! execute it, hand the outcome back. Calls run to completion one at a time.

use feed_core::{Feed, FeedClient, PostId, Viewer};

use crate::command::CommandError;
use crate::transport::Transport;

pub struct Session {
    client: FeedClient,
    transport: Transport,
    feed: Feed,
}

impl Session {
    pub fn new(base_url: &str, viewer: Viewer) -> Self {
        Self {
            client: FeedClient::new(base_url),
            transport: Transport::new(),
            feed: Feed::new(viewer),
        }
    }

    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    pub fn load(&mut self) {
        let req = self.feed.begin_load(&self.client);
        let outcome = self.transport.execute(req);
        self.feed.finish_load(&self.client, outcome);
    }

    /// Returns `true` when the post made it into the feed. Blank `text`
    /// resends the draft kept from an earlier failed submit.
    pub fn submit(&mut self, text: &str) -> Result<bool, CommandError> {
        if !text.trim().is_empty() {
            self.feed.composer_mut().edit(text);
        }
        let req = self
            .feed
            .begin_submit(&self.client)
            .ok_or(CommandError::NothingToPost)?;
        let outcome = self.transport.execute(req);
        Ok(self.feed.finish_submit(&self.client, outcome))
    }

    pub fn toggle_like(&mut self, position: usize) -> Result<(), CommandError> {
        let id = self.id_at(position)?;
        if let Some((action, req)) = self.feed.begin_toggle_like(&self.client, id) {
            let outcome = self.transport.execute(req);
            self.feed.finish_toggle_like(&self.client, id, action, outcome);
        }
        Ok(())
    }

    /// Returns `true` when the post was removed.
    pub fn delete(&mut self, position: usize) -> Result<bool, CommandError> {
        let id = self.id_at(position)?;
        let req = self
            .feed
            .begin_delete(&self.client, id)
            .ok_or(CommandError::NotAuthor)?;
        let outcome = self.transport.execute(req);
        Ok(self.feed.finish_delete(&self.client, id, outcome))
    }

    fn id_at(&self, position: usize) -> Result<PostId, CommandError> {
        position
            .checked_sub(1)
            .and_then(|index| self.feed.items().get(index))
            .map(|item| item.id())
            .ok_or(CommandError::NoSuchPost(position))
    }
}
