/// Errors that can occur in the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Opening the connection failed. The source is the underlying
    /// error as reported by the socket library (bad URL, refused TCP
    /// connection, rejected HTTP upgrade, TLS failure).
    #[error("connect failed: {0}")]
    ConnectFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The connection (or the task driving it) is gone.
    #[error("connection closed: {0}")]
    ConnectionClosed(String),

    /// Writing a frame to the socket failed.
    #[error("send failed: {0}")]
    SendFailed(#[source] std::io::Error),
}
