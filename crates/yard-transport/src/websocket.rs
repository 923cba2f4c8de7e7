//! WebSocket client transport using `tokio-tungstenite`.
//!
//! After the handshake the stream is split in two and each half gets its
//! own task:
//!
//! - the reader publishes every text frame into the `watch` cell and
//!   onto the ordered `broadcast` stream;
//! - the writer drains an unbounded queue, so [`send_text`] never waits
//!   on the network.
//!
//! [`send_text`]: crate::TextTransport::send_text

use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::{SinkExt, StreamExt};
use tokio::sync::{broadcast, mpsc, watch};
use tokio_tungstenite::tungstenite::Message;

use crate::{ConnectionId, FRAME_BUFFER, TextTransport, TransportError};

/// Counter for generating unique connection IDs.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

enum Outbound {
    Text(String),
    Close,
}

/// A WebSocket connection to the game server.
pub struct WebSocketTransport {
    id: ConnectionId,
    inbound: watch::Receiver<Option<String>>,
    // Never read; only resubscribed from. The sender lives in the reader
    // task so subscribers see `Closed` when it stops.
    frames: broadcast::Receiver<String>,
    outbound: mpsc::UnboundedSender<Outbound>,
}

impl WebSocketTransport {
    /// Connects to `url` (e.g. `ws://localhost:8081/game/ws`) and starts
    /// the reader and writer tasks.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn connect(url: &str) -> Result<Self, TransportError> {
        let (ws, _response) = tokio_tungstenite::connect_async(url)
            .await
            .map_err(|e| TransportError::ConnectFailed(Box::new(e)))?;

        let id = ConnectionId::new(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed));
        tracing::info!(%id, url, "connected to game socket");

        let (mut sink, mut stream) = ws.split();
        let (inbound_tx, inbound_rx) = watch::channel(None);
        let (frames_tx, frames_rx) = broadcast::channel(FRAME_BUFFER);
        let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Outbound>();

        tokio::spawn(async move {
            while let Some(msg) = stream.next().await {
                match msg {
                    Ok(Message::Text(text)) => {
                        tracing::trace!(%id, frame = %text.as_str(), "frame received");
                        let text = text.as_str().to_owned();
                        // No subscribers is fine; the cell still has it.
                        let _ = frames_tx.send(text.clone());
                        inbound_tx.send_replace(Some(text));
                    }
                    Ok(Message::Close(_)) => break,
                    Ok(Message::Binary(_)) => {
                        tracing::debug!(%id, "ignoring binary frame");
                    }
                    Ok(_) => continue, // ping/pong/raw frame
                    Err(e) => {
                        tracing::debug!(%id, error = %e, "receive failed");
                        break;
                    }
                }
            }
            tracing::info!(%id, "game socket closed");
        });

        tokio::spawn(async move {
            while let Some(outbound) = outbound_rx.recv().await {
                let result = match outbound {
                    Outbound::Text(text) => sink.send(Message::Text(text.into())).await,
                    Outbound::Close => {
                        let _ = sink.close().await;
                        break;
                    }
                };
                if let Err(e) = result {
                    let err = TransportError::SendFailed(std::io::Error::new(
                        std::io::ErrorKind::BrokenPipe,
                        e,
                    ));
                    tracing::debug!(%id, error = %err, "writer stopped");
                    break;
                }
            }
        });

        Ok(Self {
            id,
            inbound: inbound_rx,
            frames: frames_rx,
            outbound: outbound_tx,
        })
    }

    /// Asks the writer task to send a close frame and stop.
    pub fn close(&self) -> Result<(), TransportError> {
        self.outbound
            .send(Outbound::Close)
            .map_err(|_| TransportError::ConnectionClosed("writer task stopped".into()))
    }
}

impl TextTransport for WebSocketTransport {
    fn latest(&self) -> watch::Receiver<Option<String>> {
        self.inbound.clone()
    }

    fn frames(&self) -> broadcast::Receiver<String> {
        self.frames.resubscribe()
    }

    fn send_text(&self, text: String) -> Result<(), TransportError> {
        self.outbound
            .send(Outbound::Text(text))
            .map_err(|_| TransportError::ConnectionClosed("writer task stopped".into()))
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}
