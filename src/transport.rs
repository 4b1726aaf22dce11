//! Connection manager for the main IRC session.
//!
//! Owns the socket lifecycle: connect, send, receive, close. Transport
//! failure is reported as the connection-down condition (`None` from the
//! read side), which the client treats as an implicit quit.

use anyhow::Result;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_util::codec::Framed;
use tracing::warn;

use crate::codec::IrcCodec;
use crate::command::Command;
use crate::error::ProtocolError;

/// Write half of a split transport; all outbound sends go through here.
pub type TransportSink = SplitSink<Framed<TcpStream, IrcCodec>, Command>;
/// Read half of a split transport, yielding framed raw lines.
pub type TransportStream = SplitStream<Framed<TcpStream, IrcCodec>>;

/// A framed TCP connection to an IRC server.
pub struct Transport {
    framed: Framed<TcpStream, IrcCodec>,
}

impl Transport {
    /// Connect to `host:port` and frame the stream.
    pub async fn connect(host: &str, port: u16) -> std::io::Result<Self> {
        let stream = TcpStream::connect((host, port)).await?;
        Ok(Self::tcp(stream))
    }

    /// Frame an established TCP stream.
    pub fn tcp(stream: TcpStream) -> Self {
        if let Err(e) = Self::enable_keepalive(&stream) {
            warn!("failed to enable TCP keepalive: {}", e);
        }

        Self {
            framed: Framed::new(stream, IrcCodec::new()),
        }
    }

    fn enable_keepalive(stream: &TcpStream) -> Result<()> {
        use socket2::{SockRef, TcpKeepalive};
        use std::time::Duration;

        let sock = SockRef::from(stream);
        let keepalive = TcpKeepalive::new()
            .with_time(Duration::from_secs(120))
            .with_interval(Duration::from_secs(30));

        sock.set_tcp_keepalive(&keepalive)?;
        Ok(())
    }

    /// Read the next framed line.
    ///
    /// Returns `Ok(None)` when the remote end closed the connection.
    pub async fn read_line(&mut self) -> Result<Option<String>, ProtocolError> {
        match self.framed.next().await {
            Some(Ok(line)) => Ok(Some(line)),
            Some(Err(e)) => Err(e),
            None => Ok(None),
        }
    }

    /// Serialize and send one command.
    pub async fn write_command(&mut self, cmd: Command) -> Result<(), ProtocolError> {
        self.framed.send(cmd).await
    }

    /// Split into independently owned read and write halves.
    ///
    /// The server-reader task owns the stream; the dispatch loop owns
    /// the sink, so nothing outside it ever writes to the socket.
    pub fn split(self) -> (TransportSink, TransportStream) {
        self.framed.split()
    }
}
