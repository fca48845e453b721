//! Deprecated raw-request diagnostics.
//!
//! The original client shipped an earlier prototype alongside the real one:
//! three buttons that fired a request and dumped whatever came back into a
//! results field. It survives here as `spylinq debug ...` for poking at a
//! server by hand — it is not part of the game flow.

use crate::api::GameApi;
use crate::cli::PanelAction;
use crate::error::ClientError;

/// Fire one request and print the raw result: the success payload verbatim, or
/// the error body re-serialized the way the original panel displayed it.
pub async fn run(api: &GameApi, action: &PanelAction) -> Result<(), ClientError> {
    let result = match action {
        PanelAction::Join { name } => api.post_raw("join", name).await,
        PanelAction::Start { name } => api.post_raw("start", name).await,
        PanelAction::PlayerList => api.player_list_raw().await,
    };
    match result {
        Ok(body) => println!("{}", body),
        Err(ClientError::Rejected { message }) => {
            println!("{}", serde_json::json!({ "error": message }))
        }
        Err(other) => return Err(other),
    }
    Ok(())
}
