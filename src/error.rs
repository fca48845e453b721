//! Crate-level error type.
//!
//! Every network failure is terminal for the operation that produced it — there
//! is no retry layer. Each variant carries enough context to diagnose the
//! failure without inspecting the originating error directly.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server rejected the request with an `{ "error": ... }` body.
    #[error("{message}")]
    Rejected { message: String },

    /// The remote server replied with a non-2xx HTTP status code and no
    /// parseable error body.
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    /// A TCP-level connection could not be established.
    #[error("Connection failed to {url}: {detail}")]
    Connect { url: String, detail: String },

    /// Response body could not be parsed as the expected JSON structure.
    #[error("Unexpected response from {url}: {detail}")]
    Decode { url: String, detail: String },

    /// The event socket failed, or a send was attempted on a closed socket.
    #[error("Socket error: {0}")]
    Socket(String),

    /// The configuration file could not be read or parsed.
    #[error("Config error: {0}")]
    Config(String),

    /// Terminal input could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
