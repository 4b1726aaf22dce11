//! DCC (Direct Client-to-Client) file transfers.
//!
//! A DCC SEND offer advertises a second TCP endpoint inline in a CTCP
//! payload; the receiver connects out-of-band and reads a raw byte
//! stream up to the advertised size. The transfer runs as its own task
//! with its own socket, fully independent of the main session — it only
//! ever reports back by value, never by touching session state.

use std::net::{Ipv4Addr, SocketAddrV4};
use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

/// Read granularity for the transfer socket.
const CHUNK_SIZE: usize = 4096;

/// A file offered via `DCC SEND`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DccOffer {
    /// Name the file was offered under.
    pub filename: String,
    /// Peer IPv4 address packed as a network-byte-order integer.
    pub address: u32,
    /// Peer TCP port.
    pub port: u16,
    /// Declared byte count.
    pub size: u64,
    /// Nick that made the offer.
    pub from: String,
}

impl DccOffer {
    /// The peer endpoint to connect to.
    ///
    /// The packed address is network byte order (most significant octet
    /// first), which is exactly what `Ipv4Addr::from(u32)` consumes:
    /// `2130706433` maps to `127.0.0.1`.
    pub fn peer_addr(&self) -> SocketAddrV4 {
        SocketAddrV4::new(Ipv4Addr::from(self.address), self.port)
    }

    /// The local path the file will be written to inside `dir`.
    ///
    /// Only the file-name component of the offered name is used, so an
    /// offer can never write outside the download directory.
    pub fn local_path(&self, dir: &Path) -> PathBuf {
        let name = Path::new(&self.filename)
            .file_name()
            .unwrap_or_else(|| "dcc.recv".as_ref());
        dir.join(name)
    }
}

/// Outcome of a transfer attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    /// Received exactly the advertised byte count.
    Complete {
        /// Bytes received.
        bytes: u64,
    },
    /// The peer closed (or the file write failed) before the advertised
    /// byte count arrived.
    Short {
        /// Bytes received before the stream ended.
        received: u64,
        /// Advertised byte count.
        expected: u64,
    },
    /// The out-of-band connection could not be established.
    ConnectFailed,
}

/// Result of one consumed [`DccOffer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferResult {
    /// Name the file was offered under.
    pub filename: String,
    /// Nick that made the offer.
    pub from: String,
    /// What happened.
    pub outcome: TransferOutcome,
}

/// Receive an offered file into the current directory.
pub async fn receive(offer: DccOffer) -> TransferResult {
    receive_into(offer, Path::new(".")).await
}

/// Receive an offered file into `dir`, driven by the declared byte count.
///
/// Reads fixed-size chunks until the running count reaches the
/// advertised size (success) or the peer closes first (failure). Errors
/// are fatal only to this transfer, never to the session.
pub async fn receive_into(offer: DccOffer, dir: &Path) -> TransferResult {
    let peer = offer.peer_addr();
    debug!("dcc: connecting to {} for {:?}", peer, offer.filename);

    let mut stream = match TcpStream::connect(peer).await {
        Ok(stream) => stream,
        Err(e) => {
            debug!("dcc: connect to {} failed: {}", peer, e);
            return result(offer, TransferOutcome::ConnectFailed);
        }
    };

    let path = offer.local_path(dir);
    let mut file = match File::create(&path).await {
        Ok(file) => file,
        Err(e) => {
            debug!("dcc: cannot create {:?}: {}", path, e);
            return result(
                offer.clone(),
                TransferOutcome::Short {
                    received: 0,
                    expected: offer.size,
                },
            );
        }
    };

    let mut received: u64 = 0;
    let mut buf = [0u8; CHUNK_SIZE];

    while received < offer.size {
        let n = match stream.read(&mut buf).await {
            Ok(0) => break, // peer closed
            Ok(n) => n,
            Err(e) => {
                debug!("dcc: read error after {} bytes: {}", received, e);
                break;
            }
        };

        // Never write past the advertised size.
        let remaining = (offer.size - received) as usize;
        let take = n.min(remaining);
        if file.write_all(&buf[..take]).await.is_err() {
            break;
        }
        received += take as u64;
    }

    let _ = file.flush().await;

    let outcome = if received == offer.size {
        TransferOutcome::Complete { bytes: received }
    } else {
        TransferOutcome::Short {
            received,
            expected: offer.size,
        }
    };
    result(offer, outcome)
}

fn result(offer: DccOffer, outcome: TransferOutcome) -> TransferResult {
    TransferResult {
        filename: offer.filename,
        from: offer.from,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_address_is_network_byte_order() {
        let offer = DccOffer {
            filename: "f".into(),
            address: 2130706433,
            port: 5000,
            size: 0,
            from: "peer".into(),
        };
        assert_eq!(
            offer.peer_addr(),
            SocketAddrV4::new(Ipv4Addr::new(127, 0, 0, 1), 5000)
        );

        let offer = DccOffer {
            address: u32::from(Ipv4Addr::new(192, 168, 1, 10)),
            ..offer
        };
        assert_eq!(*offer.peer_addr().ip(), Ipv4Addr::new(192, 168, 1, 10));
    }

    #[test]
    fn test_local_path_strips_directories() {
        let offer = DccOffer {
            filename: "../../etc/passwd".into(),
            address: 0,
            port: 0,
            size: 0,
            from: "peer".into(),
        };
        assert_eq!(
            offer.local_path(Path::new("/tmp/downloads")),
            PathBuf::from("/tmp/downloads/passwd")
        );
    }
}
