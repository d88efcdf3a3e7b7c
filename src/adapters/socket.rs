//! TCP notification client.
//!
//! Holds one persistent connection to the listener. Each notification is
//! a single write of plain text followed by a single read of the reply.
//!
//! The reply is read once into a fixed 512 byte buffer. There is no
//! framing, so a longer reply is truncated and the rest stays in the
//! socket for the next read.

use std::fmt;
use std::io;
use std::net::SocketAddr;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{lookup_host, TcpSocket, TcpStream};
use tracing::{debug, info, warn};

use super::Notifier;
use crate::config::NotifierSettings;

/// Size of the single-shot receive buffer
pub const RECEIVE_BUFFER_SIZE: usize = 512;

/// Errors that can occur while talking to the listener
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Failed to resolve {address}: {source}")]
    Resolve {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("No address found for {0}")]
    NoAddress(String),

    #[error("Failed to create socket: {0}")]
    Socket(#[source] io::Error),

    #[error("Failed to connect to {address}: {source}")]
    Connect {
        address: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("Message failed to send: {0}")]
    Send(#[source] io::Error),

    #[error("Receiving message failed: {0}")]
    Receive(#[source] io::Error),

    #[error("Receiving message failed: connection closed by peer")]
    PeerClosed,

    #[error("Client is not connected")]
    NotConnected,

    #[error("Cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: ClientState,
    },
}

/// Lifecycle state of a [`NotificationClient`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    Unconnected,
    Initialized,
    Connected,
    Closed,
}

impl fmt::Display for ClientState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientState::Unconnected => write!(f, "unconnected"),
            ClientState::Initialized => write!(f, "initialized"),
            ClientState::Connected => write!(f, "connected"),
            ClientState::Closed => write!(f, "closed"),
        }
    }
}

#[derive(Debug)]
enum Transport {
    Unconnected,
    Initialized { socket: TcpSocket, address: SocketAddr },
    Connected(TcpStream),
    Closed,
}

impl Transport {
    fn state(&self) -> ClientState {
        match self {
            Transport::Unconnected => ClientState::Unconnected,
            Transport::Initialized { .. } => ClientState::Initialized,
            Transport::Connected(_) => ClientState::Connected,
            Transport::Closed => ClientState::Closed,
        }
    }
}

/// Persistent-connection notification client
#[derive(Debug)]
pub struct NotificationClient {
    host: String,
    port: u16,
    transport: Transport,
    /// Partial character left by the last receive
    pending: Vec<u8>,
}

impl NotificationClient {
    /// Create a client bound to `host:port` (nothing is opened yet)
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            transport: Transport::Unconnected,
            pending: Vec::new(),
        }
    }

    /// Create from resolved settings
    pub fn from_settings(settings: &NotifierSettings) -> Self {
        Self::new(settings.host.clone(), settings.port)
    }

    /// Target address as `host:port`
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn state(&self) -> ClientState {
        self.transport.state()
    }

    /// Resolve the target and allocate a socket
    pub async fn init(&mut self) -> Result<(), NotifyError> {
        if !matches!(self.transport, Transport::Unconnected) {
            return Err(NotifyError::InvalidState {
                operation: "init",
                state: self.state(),
            });
        }

        let target = self.address();
        let address = lookup_host((self.host.as_str(), self.port))
            .await
            .map_err(|source| NotifyError::Resolve {
                address: target.clone(),
                source,
            })?
            .next()
            .ok_or_else(|| NotifyError::NoAddress(target))?;

        let socket = if address.is_ipv4() {
            TcpSocket::new_v4()
        } else {
            TcpSocket::new_v6()
        }
        .map_err(NotifyError::Socket)?;

        info!(%address, "Socket ready");
        self.transport = Transport::Initialized { socket, address };
        Ok(())
    }

    /// Open the stream to the resolved address.
    ///
    /// A failed attempt closes the client; there is no reconnect.
    pub async fn connect(&mut self) -> Result<(), NotifyError> {
        let (socket, address) = match std::mem::replace(&mut self.transport, Transport::Closed) {
            Transport::Initialized { socket, address } => (socket, address),
            other => {
                let state = other.state();
                self.transport = other;
                return Err(NotifyError::InvalidState {
                    operation: "connect",
                    state,
                });
            }
        };

        let stream = socket
            .connect(address)
            .await
            .map_err(|source| NotifyError::Connect { address, source })?;

        info!(%address, "Connected, can start sending and receiving data");
        self.transport = Transport::Connected(stream);
        Ok(())
    }

    /// Run `init` then `connect`; on either failure the client is closed
    pub async fn open(&mut self) -> Result<(), NotifyError> {
        let result = match self.init().await {
            Ok(()) => self.connect().await,
            Err(e) => Err(e),
        };

        if result.is_err() {
            self.close().await;
        }
        result
    }

    /// Write the whole text to the listener
    pub async fn send(&mut self, text: &str) -> Result<(), NotifyError> {
        let stream = self.stream_mut()?;
        write_message(stream, text).await?;
        info!("Message sent: {}", text);
        Ok(())
    }

    /// Read one chunk of the reply (at most [`RECEIVE_BUFFER_SIZE`] bytes)
    pub async fn receive(&mut self) -> Result<String, NotifyError> {
        let stream = match &mut self.transport {
            Transport::Connected(stream) => stream,
            _ => return Err(NotifyError::NotConnected),
        };
        read_chunk(stream, &mut self.pending).await
    }

    /// Send, then read one reply. Failures are logged, never returned.
    pub async fn notify(&mut self, text: &str) -> Option<String> {
        if let Err(e) = self.send(text).await {
            warn!(error = %e, "Notification not delivered");
            return None;
        }

        match self.receive().await {
            Ok(response) => {
                info!("Server response: {}", response);
                Some(response)
            }
            Err(e) => {
                warn!(error = %e, "No response to notification");
                None
            }
        }
    }

    /// Release the connection. Safe to call in any state, any number of times.
    pub async fn close(&mut self) {
        self.pending.clear();
        match std::mem::replace(&mut self.transport, Transport::Closed) {
            Transport::Connected(mut stream) => {
                if let Err(e) = stream.shutdown().await {
                    debug!(error = %e, "Shutdown failed, dropping stream");
                }
                info!(address = %self.address(), "Connection closed");
            }
            Transport::Closed => debug!("Client already closed"),
            Transport::Unconnected | Transport::Initialized { .. } => {
                debug!("Client closed before connecting");
            }
        }
    }

    fn stream_mut(&mut self) -> Result<&mut TcpStream, NotifyError> {
        match &mut self.transport {
            Transport::Connected(stream) => Ok(stream),
            _ => Err(NotifyError::NotConnected),
        }
    }
}

#[async_trait]
impl Notifier for NotificationClient {
    fn name(&self) -> &str {
        "tcp"
    }

    async fn notify(&mut self, text: &str) -> Option<String> {
        NotificationClient::notify(self, text).await
    }
}

/// Write `text` in one logical operation; an incomplete write is an error
pub async fn write_message<W>(writer: &mut W, text: &str) -> Result<(), NotifyError>
where
    W: AsyncWrite + Unpin,
{
    writer
        .write_all(text.as_bytes())
        .await
        .map_err(NotifyError::Send)?;
    writer.flush().await.map_err(NotifyError::Send)
}

/// Read a single chunk of at most [`RECEIVE_BUFFER_SIZE`] bytes.
///
/// `carry` holds the bytes of a character split by the previous read;
/// they fill the front of the buffer and count towards the limit. A
/// character split at the end of this read is left in `carry`, and
/// invalid UTF-8 is dropped, so the reply never exceeds the buffer.
pub async fn read_chunk<R>(reader: &mut R, carry: &mut Vec<u8>) -> Result<String, NotifyError>
where
    R: AsyncRead + Unpin,
{
    let mut buffer = [0u8; RECEIVE_BUFFER_SIZE];
    let carried = carry.len();
    buffer[..carried].copy_from_slice(carry);

    let read = reader
        .read(&mut buffer[carried..])
        .await
        .map_err(NotifyError::Receive)?;

    if read == 0 {
        return Err(NotifyError::PeerClosed);
    }

    carry.clear();
    Ok(decode_prefix(&buffer[..carried + read], carry))
}

/// Decode the valid UTF-8 in `bytes`, keeping a trailing partial character in `carry`
fn decode_prefix(mut bytes: &[u8], carry: &mut Vec<u8>) -> String {
    let mut text = String::with_capacity(bytes.len());

    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                text.push_str(valid);
                return text;
            }
            Err(e) => {
                let (valid, rest) = bytes.split_at(e.valid_up_to());
                text.push_str(std::str::from_utf8(valid).unwrap_or_default());

                match e.error_len() {
                    Some(invalid) => bytes = &rest[invalid..],
                    None => {
                        carry.extend_from_slice(rest);
                        return text;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::io::Builder;

    #[tokio::test]
    async fn test_write_message_writes_text_verbatim() {
        let mut mock = Builder::new().write(b"Deleted book").build();
        write_message(&mut mock, "Deleted book").await.unwrap();
    }

    #[tokio::test]
    async fn test_write_message_reports_io_error() {
        let mut mock = Builder::new()
            .write_error(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
            .build();

        let err = write_message(&mut mock, "hello").await.unwrap_err();
        assert!(matches!(err, NotifyError::Send(_)));
    }

    #[tokio::test]
    async fn test_read_chunk_truncates_long_reply() {
        let reply = vec![b'a'; 600];
        let mut mock = Builder::new().read(&reply).build();
        let mut carry = Vec::new();

        let first = read_chunk(&mut mock, &mut carry).await.unwrap();
        assert_eq!(first.len(), RECEIVE_BUFFER_SIZE);

        // The tail is left for the next read
        let rest = read_chunk(&mut mock, &mut carry).await.unwrap();
        assert_eq!(rest.len(), 600 - RECEIVE_BUFFER_SIZE);
    }

    #[tokio::test]
    async fn test_read_chunk_keeps_split_character_for_next_read() {
        let mut reply = vec![b'a'; RECEIVE_BUFFER_SIZE - 1];
        reply.extend_from_slice("€".as_bytes());
        let mut mock = Builder::new().read(&reply).build();
        let mut carry = Vec::new();

        let first = read_chunk(&mut mock, &mut carry).await.unwrap();
        assert_eq!(first.len(), RECEIVE_BUFFER_SIZE - 1);
        assert!(first.chars().all(|c| c == 'a'));
        assert_eq!(carry.len(), 1);

        let rest = read_chunk(&mut mock, &mut carry).await.unwrap();
        assert_eq!(rest, "€");
        assert!(carry.is_empty());
    }

    #[tokio::test]
    async fn test_read_chunk_drops_invalid_bytes() {
        let mut mock = Builder::new().read(&[b'a', 0xff, b'b']).build();
        let mut carry = Vec::new();

        let reply = read_chunk(&mut mock, &mut carry).await.unwrap();
        assert_eq!(reply, "ab");
        assert!(carry.is_empty());
    }

    #[tokio::test]
    async fn test_read_chunk_peer_closed() {
        let mut mock = Builder::new().build();
        let err = read_chunk(&mut mock, &mut Vec::new()).await.unwrap_err();
        assert!(matches!(err, NotifyError::PeerClosed));
    }

    #[tokio::test]
    async fn test_send_before_connect_fails() {
        let mut client = NotificationClient::new("127.0.0.1", 55555);
        let err = client.send("hello").await.unwrap_err();
        assert!(matches!(err, NotifyError::NotConnected));
        assert_eq!(client.state(), ClientState::Unconnected);
    }

    #[tokio::test]
    async fn test_connect_before_init_is_rejected() {
        let mut client = NotificationClient::new("127.0.0.1", 55555);
        let err = client.connect().await.unwrap_err();
        assert!(matches!(
            err,
            NotifyError::InvalidState {
                operation: "connect",
                state: ClientState::Unconnected
            }
        ));
        assert_eq!(client.state(), ClientState::Unconnected);
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let mut client = NotificationClient::new("127.0.0.1", 55555);
        client.close().await;
        client.close().await;
        assert_eq!(client.state(), ClientState::Closed);

        let err = client.init().await.unwrap_err();
        assert!(matches!(err, NotifyError::InvalidState { .. }));
    }

    #[tokio::test]
    async fn test_open_closes_client_when_init_fails() {
        let mut client = NotificationClient::new("127.0.0.1", 55555);
        client.init().await.unwrap();

        // A second init is rejected, and open must still leave the client closed
        let err = client.open().await.unwrap_err();
        assert!(matches!(
            err,
            NotifyError::InvalidState {
                operation: "init",
                ..
            }
        ));
        assert_eq!(client.state(), ClientState::Closed);
    }
}
