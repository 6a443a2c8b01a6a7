use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use dotenv::dotenv;
use feed_core::{Viewer, DEFAULT_BASE_URL};

/// Terminal client for the social feed.
#[derive(Debug, Clone, Parser)]
#[command(name = "feed")]
pub struct Config {
    /// Base URL of the feed API
    #[arg(long, env = "FEED_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Display name you post and like as
    #[arg(short, long, env = "FEED_USER", default_value = "anonymous")]
    user: String,
    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

impl Config {
    /// Parse the configuration from `.env`, the environment and the command line
    pub fn parse() -> Self {
        dotenv().ok();
        <Self as Parser>::parse()
    }

    pub fn init_logger(&self) {
        env_logger::Builder::new()
            .filter_level(self.verbose.log_level_filter())
            .format_target(false)
            .init();
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn viewer(&self) -> Viewer {
        Viewer::new(self.user.trim())
    }
}
