use anyhow::{bail, Result};
use futures::future::{BoxFuture, FutureExt};
use log::info;
use opening_tree::{Candidate, StatisticsProvider};

use super::{HttpProvider, ProviderOptions, RecordedProvider};

/// The provider selected by configuration.
pub enum ExplorerProvider {
    Http(HttpProvider),
    Recorded(RecordedProvider),
}

impl ExplorerProvider {
    pub fn from_options(options: &ProviderOptions) -> Result<Self> {
        if let Some(recording) = &options.recording {
            info!("Replaying statistics from {:?}", recording);
            return Ok(Self::Recorded(RecordedProvider::load(recording)?));
        }

        let Some(explorer_url) = &options.explorer_url else {
            bail!(
                "No statistics source configured. Set provider.explorer_url to a JSON explorer endpoint or provider.recording to a recorded file"
            );
        };

        info!(
            "Querying {} ({})",
            explorer_url,
            if options.session_id.is_some() {
                "authenticated"
            } else {
                "anonymous"
            }
        );

        Ok(Self::Http(HttpProvider::new(
            explorer_url,
            options.session_id.clone(),
        )?))
    }
}

impl StatisticsProvider for ExplorerProvider {
    type Future = BoxFuture<'static, Result<Vec<Candidate>>>;

    fn query(&self, path: &str, ply: usize) -> Self::Future {
        match self {
            Self::Http(provider) => provider.query(path, ply),
            Self::Recorded(provider) => provider.query(path, ply).boxed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_source_fails_at_startup() {
        let err = ExplorerProvider::from_options(&ProviderOptions::default())
            .err()
            .unwrap();

        let message = err.to_string();
        assert!(message.contains("provider.explorer_url"));
        assert!(message.contains("provider.recording"));
    }

    #[test]
    fn test_explorer_url_selects_http() {
        let options = ProviderOptions {
            explorer_url: Some("http://localhost:8080/explorer".to_string()),
            ..Default::default()
        };

        let provider = ExplorerProvider::from_options(&options).unwrap();

        assert!(matches!(provider, ExplorerProvider::Http(_)));
    }

    #[test]
    fn test_malformed_explorer_url_fails_at_startup() {
        let options = ProviderOptions {
            explorer_url: Some("not a url".to_string()),
            ..Default::default()
        };

        assert!(ExplorerProvider::from_options(&options).is_err());
    }
}
