//! The session client: typed requests out, typed responses in.
//!
//! ```text
//! SessionRequest ──to_message──▶ FrameCodec::encode ──▶ send_text
//!
//! latest() cell ──▶ FrameCodec::decode ──▶ SessionResponse::from_message
//!                   (only when the cell changed)
//!
//! frames() stream ──▶ same decode, once per frame, in arrival order
//! ```
//!
//! [`ResponseWatcher`] is a view of *the newest* response: frames that
//! arrive back to back collapse into the last one. [`ResponseStream`]
//! sees every frame and is what request/response code should read.
//!
//! # Correlation
//!
//! Frames carry no request id. A response cannot be matched to the
//! request that caused it; arrival order is the only link. Keep one
//! request in flight at a time.

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use yard_protocol::{FrameCodec, TextFrameCodec};
use yard_transport::TextTransport;

use crate::{SessionError, SessionRequest, SessionResponse};

/// Typed wrapper around a [`TextTransport`].
pub struct SessionClient<T, C = TextFrameCodec> {
    transport: T,
    codec: Arc<C>,
}

impl<T: TextTransport> SessionClient<T> {
    /// Creates a client that uses the bracketed-name text codec.
    pub fn new(transport: T) -> Self {
        Self::with_codec(transport, TextFrameCodec)
    }
}

impl<T: TextTransport, C: FrameCodec> SessionClient<T, C> {
    /// Creates a client with a custom frame codec.
    pub fn with_codec(transport: T, codec: C) -> Self {
        Self {
            transport,
            codec: Arc::new(codec),
        }
    }

    /// Encodes `request` and queues it on the transport.
    ///
    /// Returns once the frame is queued; there is no acknowledgement.
    pub fn send_request(&self, request: &SessionRequest) -> Result<(), SessionError> {
        let message = request.to_message()?;
        let frame = self.codec.encode(&message);
        self.transport.send_text(frame)?;
        tracing::debug!(conn = %self.transport.id(), name = request.name(), "request sent");
        Ok(())
    }

    /// Returns a watcher that derives [`SessionResponse`]s from the
    /// transport's latest inbound frame.
    pub fn responses(&self) -> ResponseWatcher<C> {
        ResponseWatcher::new(self.transport.latest(), Arc::clone(&self.codec))
    }

    /// Returns a stream of every [`SessionResponse`] received from now
    /// on, in arrival order.
    ///
    /// Subscribe before sending the request whose answer you want.
    pub fn stream(&self) -> ResponseStream<C> {
        ResponseStream {
            frames: self.transport.frames(),
            codec: Arc::clone(&self.codec),
        }
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

/// Derived view over the transport's "latest inbound frame" cell.
///
/// The derived value is recomputed only when the cell has changed since
/// the last observation. Between changes the cached value is returned, so
/// a frame is decoded once no matter how often it is read.
pub struct ResponseWatcher<C = TextFrameCodec> {
    inbound: watch::Receiver<Option<String>>,
    codec: Arc<C>,
    current: Option<Result<SessionResponse, SessionError>>,
    primed: bool,
    closed: bool,
}

impl<C: FrameCodec> ResponseWatcher<C> {
    fn new(inbound: watch::Receiver<Option<String>>, codec: Arc<C>) -> Self {
        Self {
            inbound,
            codec,
            current: None,
            primed: false,
            closed: false,
        }
    }

    /// Returns the response derived from the latest inbound frame.
    ///
    /// `None` while nothing has been received (or the cell was cleared).
    /// `Some(Err(_))` if the frame was malformed; the error stays cached
    /// until the next frame replaces it.
    pub fn latest(&mut self) -> Option<&Result<SessionResponse, SessionError>> {
        let stale = match self.inbound.has_changed() {
            Ok(changed) => changed || !self.primed,
            // Sender gone: pick up whatever it left behind, once.
            Err(_) => {
                let first = !self.closed;
                self.closed = true;
                first || !self.primed
            }
        };
        if stale {
            self.recompute();
        }
        self.current.as_ref()
    }

    /// Waits for the next inbound frame and returns its derived response.
    ///
    /// # Errors
    /// [`SessionError::Closed`] once the transport's sender is dropped.
    pub async fn changed(
        &mut self,
    ) -> Result<Option<&Result<SessionResponse, SessionError>>, SessionError> {
        self.inbound
            .changed()
            .await
            .map_err(|_| SessionError::Closed)?;
        self.recompute();
        Ok(self.current.as_ref())
    }

    fn recompute(&mut self) {
        self.primed = true;
        let frame = self.inbound.borrow_and_update().clone();
        self.current = frame.map(|frame| derive(self.codec.as_ref(), &frame));
    }
}

/// Every inbound frame, decoded into a [`SessionResponse`], in order.
///
/// Backed by the transport's frame stream, so a burst of frames is seen
/// frame by frame rather than collapsed.
pub struct ResponseStream<C = TextFrameCodec> {
    frames: broadcast::Receiver<String>,
    codec: Arc<C>,
}

impl<C: FrameCodec> ResponseStream<C> {
    /// Waits for the next inbound frame and returns its response.
    ///
    /// If this stream fell too far behind, the skipped frames are logged
    /// and reading resumes at the oldest one still buffered.
    ///
    /// # Errors
    /// The derive error for a malformed frame (the stream stays usable),
    /// or [`SessionError::Closed`] once the connection's reader stopped.
    pub async fn recv(&mut self) -> Result<SessionResponse, SessionError> {
        loop {
            match self.frames.recv().await {
                Ok(frame) => return derive(self.codec.as_ref(), &frame),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "response stream lagged, frames dropped");
                }
                Err(broadcast::error::RecvError::Closed) => return Err(SessionError::Closed),
            }
        }
    }

    /// Returns the next already-received response without waiting.
    ///
    /// `None` when no frame is pending or the stream is closed.
    pub fn try_recv(&mut self) -> Option<Result<SessionResponse, SessionError>> {
        loop {
            match self.frames.try_recv() {
                Ok(frame) => return Some(derive(self.codec.as_ref(), &frame)),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "response stream lagged, frames dropped");
                }
                Err(_) => return None,
            }
        }
    }
}

/// Decodes one frame and classifies it.
fn derive<C: FrameCodec>(codec: &C, frame: &str) -> Result<SessionResponse, SessionError> {
    let derived = codec
        .decode(frame)
        .map_err(SessionError::from)
        .and_then(|message| SessionResponse::from_message(message).map_err(SessionError::from));
    match &derived {
        Ok(response) => tracing::debug!(name = response.name(), "response received"),
        Err(e) => tracing::warn!(error = %e, "could not derive response"),
    }
    derived
}
