//! The persistent event socket.
//!
//! One connection to the server's `/socket` endpoint for the lifetime of a
//! session. A reader task decodes each text frame as a [`ServerEvent`] envelope
//! and forwards it over an in-process channel; outbound messages are serialized
//! JSON sends. Close or error is fatal for the session — the policy is
//! notify-and-restart, never reconnect.

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::protocol::ServerEvent;

/// What the reader task reports back to the session loop.
#[derive(Debug)]
pub enum SocketMessage {
    /// The connection is open and events may start arriving.
    Connected,
    /// A decoded server-pushed event.
    Event(ServerEvent),
    /// The connection closed or errored. Carries a detail string when the
    /// transport gave one.
    Closed(Option<String>),
}

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, WsMessage>;

#[derive(Debug)]
pub struct SocketController {
    sink: WsSink,
    rx: mpsc::UnboundedReceiver<SocketMessage>,
}

impl SocketController {
    /// Open the connection and spawn the reader task.
    pub async fn connect(url: &str) -> Result<Self, ClientError> {
        let (ws_stream, _) = connect_async(url).await.map_err(|e| ClientError::Connect {
            url: url.to_string(),
            detail: e.to_string(),
        })?;
        debug!(url, "event socket open");

        let (sink, mut stream) = ws_stream.split();
        let (tx, rx) = mpsc::unbounded_channel();

        let _ = tx.send(SocketMessage::Connected);
        tokio::spawn(async move {
            loop {
                match stream.next().await {
                    Some(Ok(WsMessage::Text(text))) => {
                        match serde_json::from_str::<ServerEvent>(&text) {
                            Ok(event) => {
                                if tx.send(SocketMessage::Event(event)).is_err() {
                                    return; // session gone
                                }
                            }
                            Err(e) => {
                                // Unknown envelopes are skipped, not fatal.
                                warn!(error = %e, frame = %text, "undecodable socket frame");
                            }
                        }
                    }
                    Some(Ok(WsMessage::Close(_))) | None => {
                        let _ = tx.send(SocketMessage::Closed(None));
                        return;
                    }
                    Some(Ok(_)) => {} // ping/pong/binary: ignore
                    Some(Err(e)) => {
                        let _ = tx.send(SocketMessage::Closed(Some(e.to_string())));
                        return;
                    }
                }
            }
        });

        Ok(SocketController { sink, rx })
    }

    /// Serialize and transmit one message. A send on a closed connection
    /// surfaces an error rather than silently dropping.
    pub async fn send<T: serde::Serialize>(&mut self, message: &T) -> Result<(), ClientError> {
        let text =
            serde_json::to_string(message).map_err(|e| ClientError::Socket(e.to_string()))?;
        self.sink
            .send(WsMessage::Text(text))
            .await
            .map_err(|e| ClientError::Socket(format!("send failed: {}", e)))
    }

    /// Await the next socket message. `None` means the reader task is gone
    /// after having already reported `Closed`.
    pub async fn recv(&mut self) -> Option<SocketMessage> {
        self.rx.recv().await
    }
}
