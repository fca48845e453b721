//! HTTP actions against the game server.
//!
//! Four endpoints, all fire-once: `/join`, `/start`, `/quit` (POST, form-encoded
//! `player_name`) and `/players` / `/player_list` (GET). A non-2xx response whose
//! body parses as `{ "error": ... }` becomes [`ClientError::Rejected`]; anything
//! else non-2xx becomes [`ClientError::Http`]. No operation is ever retried.

use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::protocol::{ErrorBody, JoinResponse, Player, StartResponse};

pub struct GameApi {
    base_url: String,
    client: reqwest::Client,
}

impl GameApi {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ClientError::Connect {
                url: config.base_url.clone(),
                detail: e.to_string(),
            })?;
        Ok(GameApi {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// `POST /join` — ask to join the lobby under `name`.
    pub async fn join(&self, name: &str) -> Result<JoinResponse, ClientError> {
        let url = format!("{}/join", self.base_url);
        let body = self.post_form(&url, name).await?;
        decode(&url, &body)
    }

    /// `POST /start` — ask the server to start the game. Only the master
    /// player's request succeeds; the server answers rejections with an
    /// `{ "error": ... }` body.
    pub async fn start(&self, name: &str) -> Result<StartResponse, ClientError> {
        let url = format!("{}/start", self.base_url);
        let body = self.post_form(&url, name).await?;
        // The server sends an empty body on success.
        if body.trim().is_empty() {
            return Ok(StartResponse::default());
        }
        decode(&url, &body)
    }

    /// `POST /quit` — best-effort leave notification. The response is
    /// unobserved; failures are logged and swallowed so teardown never blocks
    /// on a dead server.
    pub async fn quit(&self, name: &str) {
        let url = format!("{}/quit", self.base_url);
        if let Err(e) = self.post_form(&url, name).await {
            warn!(error = %e, "quit notification failed");
        }
    }

    /// `GET /players` — the full ordered roster of `{ name, score }` entries.
    pub async fn players(&self) -> Result<Vec<Player>, ClientError> {
        let url = format!("{}/players", self.base_url);
        let body = self.get(&url).await?;
        decode(&url, &body)
    }

    /// `GET /player_list` — raw JSON, echoed verbatim by the debug panel.
    pub async fn player_list_raw(&self) -> Result<String, ClientError> {
        let url = format!("{}/player_list", self.base_url);
        self.get(&url).await
    }

    /// Raw form POST for the debug panel: the body comes back verbatim.
    pub async fn post_raw(&self, path: &str, name: &str) -> Result<String, ClientError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        self.post_form(&url, name).await
    }

    async fn post_form(&self, url: &str, name: &str) -> Result<String, ClientError> {
        debug!(url, player_name = name, "POST");
        let resp = self
            .client
            .post(url)
            .form(&[("player_name", name)])
            .send()
            .await
            .map_err(|e| ClientError::Connect {
                url: url.to_string(),
                detail: e.to_string(),
            })?;
        read_body(url, resp).await
    }

    async fn get(&self, url: &str) -> Result<String, ClientError> {
        debug!(url, "GET");
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Connect {
                url: url.to_string(),
                detail: e.to_string(),
            })?;
        read_body(url, resp).await
    }
}

/// Turn a response into its body text, mapping non-2xx statuses into the error
/// taxonomy: a parseable `{ "error": ... }` body wins over the bare status.
async fn read_body(url: &str, resp: reqwest::Response) -> Result<String, ClientError> {
    let status = resp.status();
    let body = resp.text().await.map_err(|e| ClientError::Decode {
        url: url.to_string(),
        detail: e.to_string(),
    })?;
    if status.is_success() {
        return Ok(body);
    }
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(&body) {
        return Err(ClientError::Rejected {
            message: parsed.error,
        });
    }
    Err(ClientError::Http {
        status: status.as_u16(),
        url: url.to_string(),
    })
}

fn decode<T: serde::de::DeserializeOwned>(url: &str, body: &str) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|e| ClientError::Decode {
        url: url.to_string(),
        detail: e.to_string(),
    })
}
