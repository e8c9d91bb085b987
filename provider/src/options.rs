use anyhow::Result;
use common::Config;
use std::path::PathBuf;

#[derive(Clone, Debug, Default)]
pub struct ProviderOptions {
    /// Endpoint answering with the suggested moves of a line as JSON.
    pub explorer_url: Option<String>,
    /// When set, statistics are replayed from this file instead of queried over HTTP.
    pub recording: Option<PathBuf>,
    pub session_id: Option<String>,
}

impl Config for ProviderOptions {
    fn load(config: &common::ConfigLoader) -> Result<Self> {
        Ok(Self {
            explorer_url: config
                .get("explorer_url")
                .and_then(|v| v.as_string())
                .filter(|s| !s.is_empty()),
            recording: config.get_relative_path("recording"),
            session_id: config
                .get("session_id")
                .and_then(|v| v.as_string())
                .filter(|s| !s.is_empty()),
        })
    }
}
