//! One client's TCP stream as a line-oriented, fallible text channel.
//!
//! Every read and write returns `Result`; callers treat any error as
//! fatal to their session or game. The connection also carries the
//! server's connection-limit permit, so the slot frees up exactly when
//! the connection is dropped, whichever task owns it by then.

use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::OwnedSemaphorePermit;
use tracing::debug;

use crate::types::ClientId;

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("peer closed the connection")]
    Closed,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug)]
pub struct Connection {
    id: ClientId,
    reader: BufReader<OwnedReadHalf>,
    /// Bytes of a line whose read was cancelled before its newline arrived.
    pending: Vec<u8>,
    writer: OwnedWriteHalf,
    _permit: OwnedSemaphorePermit,
}

impl Connection {
    pub fn new(
        id: ClientId,
        stream: TcpStream,
        permit: OwnedSemaphorePermit,
    ) -> std::io::Result<Self> {
        stream.set_nodelay(true)?;
        let (read_half, writer) = stream.into_split();

        Ok(Connection {
            id,
            reader: BufReader::new(read_half),
            pending: Vec::new(),
            writer,
            _permit: permit,
        })
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    pub async fn send(&mut self, text: &str) -> Result<(), ConnectionError> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Next line from the client, trimmed of surrounding whitespace.
    ///
    /// Bytes that are not valid UTF-8 come through as U+FFFD, so garbage
    /// input is a protocol matter for the caller rather than an I/O error.
    ///
    /// Cancel-safe: can be raced in `select!` without losing input.
    pub async fn read_line(&mut self) -> Result<String, ConnectionError> {
        let read = self.reader.read_until(b'\n', &mut self.pending).await?;
        if read == 0 && self.pending.is_empty() {
            return Err(ConnectionError::Closed);
        }
        let line = String::from_utf8_lossy(&self.pending).trim().to_string();
        self.pending.clear();
        Ok(line)
    }

    /// A line or a hang-up that has already arrived. Waits at most one
    /// timer tick.
    ///
    /// `None` means the client has said nothing since the last read.
    pub async fn ready_line(&mut self) -> Option<Result<String, ConnectionError>> {
        tokio::time::timeout(Duration::ZERO, self.read_line()).await.ok()
    }

    /// Send a prompt and wait for the answer.
    pub async fn prompt(&mut self, text: &str) -> Result<String, ConnectionError> {
        self.send(text).await?;
        self.read_line().await
    }

    /// Best-effort final message, then close. Failures are only logged:
    /// the connection is going away either way.
    pub async fn farewell(mut self, text: &str) {
        if let Err(e) = self.send(text).await {
            debug!(client = %self.id, error = %e, "could not deliver final message");
        }
        self.close().await;
    }

    /// Shut down the write side and drop the connection.
    pub async fn close(mut self) {
        let _ = self.writer.shutdown().await;
    }
}


#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    use super::*;

    #[tokio::test]
    async fn prompt_round_trip_trims_input() {
        let (mut conn, mut client) = testing::loopback().await;

        client.write_all(b"  login \r\n").await.unwrap();
        let answer = conn.prompt("menu: ").await.unwrap();
        assert_eq!(answer, "login");

        let mut buf = [0u8; 6];
        client.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"menu: ");
    }

    #[tokio::test]
    async fn invalid_utf8_is_replaced_not_fatal() {
        let (mut conn, mut client) = testing::loopback().await;

        client.write_all(b"\xffA\n").await.unwrap();
        client.write_all(b"A1\r\n").await.unwrap();
        assert_eq!(conn.read_line().await.unwrap(), "\u{FFFD}A");
        assert_eq!(conn.read_line().await.unwrap(), "A1");
    }

    #[tokio::test]
    async fn unterminated_last_line_is_delivered_before_close() {
        let (mut conn, mut client) = testing::loopback().await;

        client.write_all(b"quit").await.unwrap();
        drop(client);
        assert_eq!(conn.read_line().await.unwrap(), "quit");
        assert!(matches!(conn.read_line().await, Err(ConnectionError::Closed)));
    }

    #[tokio::test]
    async fn ready_line_does_not_wait() {
        let (mut conn, client) = testing::loopback().await;
        assert!(conn.ready_line().await.is_none());

        drop(client);
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert!(matches!(conn.ready_line().await, Some(Err(ConnectionError::Closed))));
    }

    #[tokio::test]
    async fn eof_is_reported_as_closed() {
        let (mut conn, client) = testing::loopback().await;
        drop(client);
        assert!(matches!(conn.read_line().await, Err(ConnectionError::Closed)));
    }
}
