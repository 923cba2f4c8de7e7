//! In-process transport: both ends live in the same program.
//!
//! [`MemoryTransport`] is the client end. The matching [`MemoryPeer`]
//! plays the server: it publishes inbound frames and reads what the
//! client sent. Used for tests and for offline demos.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{broadcast, mpsc, watch};

use crate::{ConnectionId, FRAME_BUFFER, TextTransport, TransportError};

static NEXT_MEMORY_ID: AtomicU64 = AtomicU64::new(1);

/// Client end of an in-process connection.
pub struct MemoryTransport {
    id: ConnectionId,
    inbound: watch::Receiver<Option<String>>,
    frames: broadcast::Receiver<String>,
    outbound: mpsc::UnboundedSender<String>,
}

/// Server end of an in-process connection.
pub struct MemoryPeer {
    inbound: watch::Sender<Option<String>>,
    frames: broadcast::Sender<String>,
    outbound: mpsc::UnboundedReceiver<String>,
}

impl MemoryTransport {
    /// Creates a connected transport/peer pair.
    pub fn pair() -> (Self, MemoryPeer) {
        let (inbound_tx, inbound_rx) = watch::channel(None);
        let (frames_tx, frames_rx) = broadcast::channel(FRAME_BUFFER);
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let id = ConnectionId::new(NEXT_MEMORY_ID.fetch_add(1, Ordering::Relaxed));

        (
            Self {
                id,
                inbound: inbound_rx,
                frames: frames_rx,
                outbound: outbound_tx,
            },
            MemoryPeer {
                inbound: inbound_tx,
                frames: frames_tx,
                outbound: outbound_rx,
            },
        )
    }
}

impl TextTransport for MemoryTransport {
    fn latest(&self) -> watch::Receiver<Option<String>> {
        self.inbound.clone()
    }

    fn frames(&self) -> broadcast::Receiver<String> {
        self.frames.resubscribe()
    }

    fn send_text(&self, text: String) -> Result<(), TransportError> {
        self.outbound
            .send(text)
            .map_err(|_| TransportError::ConnectionClosed("memory peer dropped".into()))
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}

impl MemoryPeer {
    /// Publishes `text` as the latest inbound frame and appends it to the
    /// frame stream.
    pub fn deliver(&self, text: impl Into<String>) {
        let text = text.into();
        let _ = self.frames.send(text.clone());
        self.inbound.send_replace(Some(text));
    }

    /// Delivers several frames back to back, as a server flushing a
    /// burst would. Only the last one remains in the latest-value cell.
    pub fn deliver_all<I, S>(&self, frames: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for frame in frames {
            self.deliver(frame);
        }
    }

    /// Clears the inbound cell, as if nothing had been received. The
    /// frame stream is not affected.
    pub fn clear(&self) {
        self.inbound.send_replace(None);
    }

    /// Returns the next frame the client sent, if one is queued.
    pub fn try_next_sent(&mut self) -> Option<String> {
        self.outbound.try_recv().ok()
    }

    /// Waits for the next frame the client sent.
    ///
    /// Returns `None` once the client end is dropped and the queue is drained.
    pub async fn next_sent(&mut self) -> Option<String> {
        self.outbound.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_starts_empty() {
        let (transport, _peer) = MemoryTransport::pair();
        assert!(transport.latest().borrow().is_none());
    }

    #[test]
    fn test_deliver_updates_latest() {
        let (transport, peer) = MemoryTransport::pair();
        let rx = transport.latest();

        peer.deliver("[game]");
        assert_eq!(rx.borrow().as_deref(), Some("[game]"));

        peer.deliver("[endMove]");
        assert_eq!(rx.borrow().as_deref(), Some("[endMove]"));

        peer.clear();
        assert!(rx.borrow().is_none());
    }

    #[test]
    fn test_burst_keeps_every_frame_in_stream() {
        let (transport, peer) = MemoryTransport::pair();
        let latest = transport.latest();
        let mut frames = transport.frames();

        peer.deliver_all(["[a]", "[b]", "[c]"]);

        assert_eq!(latest.borrow().as_deref(), Some("[c]"));
        assert_eq!(frames.try_recv().unwrap(), "[a]");
        assert_eq!(frames.try_recv().unwrap(), "[b]");
        assert_eq!(frames.try_recv().unwrap(), "[c]");
        assert!(frames.try_recv().is_err());
    }

    #[test]
    fn test_frames_subscription_starts_now() {
        let (transport, peer) = MemoryTransport::pair();
        peer.deliver("[old]");

        let mut frames = transport.frames();
        peer.deliver("[new]");
        peer.clear();

        assert_eq!(frames.try_recv().unwrap(), "[new]");
        assert!(frames.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_frames_closed_after_peer_dropped() {
        let (transport, peer) = MemoryTransport::pair();
        let mut frames = transport.frames();
        drop(peer);

        assert!(matches!(
            frames.recv().await,
            Err(broadcast::error::RecvError::Closed)
        ));
    }

    #[test]
    fn test_send_text_reaches_peer_in_order() {
        let (transport, mut peer) = MemoryTransport::pair();
        transport.send_text("[a]".into()).unwrap();
        transport.send_text("[b]".into()).unwrap();

        assert_eq!(peer.try_next_sent().as_deref(), Some("[a]"));
        assert_eq!(peer.try_next_sent().as_deref(), Some("[b]"));
        assert_eq!(peer.try_next_sent(), None);
    }

    #[test]
    fn test_send_after_peer_dropped_fails() {
        let (transport, peer) = MemoryTransport::pair();
        drop(peer);
        let err = transport.send_text("[a]".into()).unwrap_err();
        assert!(matches!(err, TransportError::ConnectionClosed(_)));
    }

    #[test]
    fn test_pairs_get_distinct_ids() {
        let (a, _pa) = MemoryTransport::pair();
        let (b, _pb) = MemoryTransport::pair();
        assert_ne!(a.id(), b.id());
    }

    #[tokio::test]
    async fn test_next_sent_returns_none_after_client_dropped() {
        let (transport, mut peer) = MemoryTransport::pair();
        transport.send_text("[last]".into()).unwrap();
        drop(transport);

        assert_eq!(peer.next_sent().await.as_deref(), Some("[last]"));
        assert_eq!(peer.next_sent().await, None);
    }
}
