use anyhow::{Context, Result};
use futures::future::{BoxFuture, FutureExt};
use log::debug;
use opening_tree::{Candidate, MoveSequence, StatisticsProvider};
use reqwest::header::COOKIE;
use reqwest::{Client, RequestBuilder, Url};

use super::SuggestedMove;

const SESSION_COOKIE: &str = "PHPSESSID";

/// Queries an explorer endpoint that answers with the suggested moves of a line as JSON.
#[derive(Clone)]
pub struct HttpProvider {
    client: Client,
    explorer_url: Url,
    session_id: Option<String>,
}

impl HttpProvider {
    pub fn new(explorer_url: &str, session_id: Option<String>) -> Result<Self> {
        let explorer_url = Url::parse(explorer_url)
            .with_context(|| format!("Invalid explorer url '{}'", explorer_url))?;

        let client = Client::builder()
            .build()
            .context("Failed to build the HTTP client")?;

        Ok(Self {
            client,
            explorer_url,
            session_id,
        })
    }

    /// The explorer reads `+` in `moveList` as the space between moves, so only the moves
    /// themselves are escaped.
    fn request_url(&self, path: &str, ply: usize) -> Url {
        let move_list = MoveSequence::from_key(path)
            .moves()
            .iter()
            .map(|m| percent_encode(m))
            .collect::<Vec<_>>()
            .join("+");

        let mut url = self.explorer_url.clone();
        url.set_query(Some(&format!("moveList={}&ply={}", move_list, ply)));
        url
    }

    fn request(&self, path: &str, ply: usize) -> RequestBuilder {
        let request = self.client.get(self.request_url(path, ply));

        match &self.session_id {
            Some(session_id) => {
                request.header(COOKIE, format!("{}={}", SESSION_COOKIE, session_id))
            }
            None => request,
        }
    }
}

impl StatisticsProvider for HttpProvider {
    type Future = BoxFuture<'static, Result<Vec<Candidate>>>;

    fn query(&self, path: &str, ply: usize) -> Self::Future {
        let request = self.request(path, ply);
        let path = path.to_string();

        async move {
            let response = request
                .send()
                .await
                .with_context(|| format!("Request for '{}' failed", path))?
                .error_for_status()?;

            let suggested_moves: Vec<SuggestedMove> = response
                .json()
                .await
                .with_context(|| format!("Unexpected response for '{}'", path))?;

            debug!("{} suggested moves for '{}'", suggested_moves.len(), path);

            Ok(suggested_moves
                .iter()
                .map(SuggestedMove::to_candidate)
                .collect())
        }
        .boxed()
    }
}

fn percent_encode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{:02X}", b),
        })
        .collect()
}
