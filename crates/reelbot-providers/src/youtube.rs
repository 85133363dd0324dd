//! Trailer lookup through the web search endpoint YouTube's own frontend
//! uses.
//!
//! The endpoint answers a context-tagged POST with a deeply nested JSON
//! document; the video hits sit in `videoRenderer` objects scattered
//! through it, so extraction walks the tree instead of hardcoding the
//! exact path.

use async_trait::async_trait;
use serde_json::{Value, json};

use reelbot_core::collaborators::VideoSearch;
use reelbot_core::{BotError, Result, VideoResult};

const DEFAULT_ENDPOINT: &str = "https://www.youtube.com/youtubei/v1/search";
const CLIENT_NAME: &str = "WEB";
const CLIENT_VERSION: &str = "2.20240101.00.00";
const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Video search backed by the public web search endpoint.
pub struct YoutubeSearch {
    client: reqwest::Client,
    endpoint: String,
}

impl YoutubeSearch {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Overrides the endpoint (tests).
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

impl Default for YoutubeSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VideoSearch for YoutubeSearch {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<VideoResult>> {
        let request = json!({
            "context": {
                "client": {
                    "clientName": CLIENT_NAME,
                    "clientVersion": CLIENT_VERSION,
                    "hl": "en",
                    "gl": "US",
                }
            },
            "query": query,
        });
        tracing::debug!(query, "searching videos");
        let response = self
            .client
            .post(format!("{}?prettyPrint=false", self.endpoint))
            .json(&request)
            .send()
            .await
            .map_err(|err| BotError::lookup(format!("video search request failed: {err}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(BotError::lookup(format!(
                "video search returned {status}"
            )));
        }
        let payload: Value = response
            .json()
            .await
            .map_err(|err| BotError::parse("video search response", err.to_string()))?;
        Ok(videos_from_response(&payload, limit))
    }
}

/// Collects up to `limit` video hits from a search response document.
pub(crate) fn videos_from_response(payload: &Value, limit: usize) -> Vec<VideoResult> {
    let mut results = Vec::new();
    collect_videos(payload, limit, &mut results);
    results
}

fn collect_videos(value: &Value, limit: usize, out: &mut Vec<VideoResult>) {
    if out.len() >= limit {
        return;
    }
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if key == "videoRenderer" {
                    if let Some(video) = video_from_renderer(child) {
                        out.push(video);
                        if out.len() >= limit {
                            return;
                        }
                    }
                } else {
                    collect_videos(child, limit, out);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_videos(item, limit, out);
                if out.len() >= limit {
                    return;
                }
            }
        }
        _ => {}
    }
}

fn video_from_renderer(renderer: &Value) -> Option<VideoResult> {
    let id = renderer.get("videoId").and_then(Value::as_str)?;
    let title = renderer.get("title").and_then(|title| {
        title
            .pointer("/runs/0/text")
            .and_then(Value::as_str)
            .or_else(|| title.get("simpleText").and_then(Value::as_str))
    })?;
    Some(VideoResult {
        title: title.to_string(),
        link: format!("{WATCH_URL}{id}"),
    })
}
