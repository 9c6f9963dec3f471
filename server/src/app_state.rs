use crate::Config;
use anyhow::Context;
use manga_view::HintStore;

/// The state shared by all routes
#[derive(Debug)]
pub struct AppState {
    /// The upstream api client
    pub client: gomanga::Client,

    /// Latest chapter hints, recorded by the listing and read by the detail page
    pub hints: HintStore,
}

impl AppState {
    /// Make the app state from a config.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = match config.upstream_url.clone() {
            Some(upstream_url) => gomanga::Client::with_base_url(upstream_url)
                .context("failed to make upstream client")?,
            None => gomanga::Client::new(),
        };
        let capacity = config
            .hints
            .capacity()
            .context("the hint capacity must not be 0")?;
        let hints = HintStore::new(capacity, config.hints.ttl());

        Ok(Self::from_parts(client, hints))
    }

    pub fn from_parts(client: gomanga::Client, hints: HintStore) -> Self {
        Self { client, hints }
    }
}
