//! Minimal interactive client: relays stdin lines to the server and
//! prints whatever the server sends back.
//!
//! Usage: `cargo run -p ttt-server --example tcp_client [addr]`
//! (defaults to `TTT_CLIENT_ADDR` or 127.0.0.1:8080).

use std::env;
use std::io::Write;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

#[tokio::main]
async fn main() -> Result<()> {
    let addr = env::args()
        .nth(1)
        .or_else(|| env::var("TTT_CLIENT_ADDR").ok())
        .unwrap_or_else(|| "127.0.0.1:8080".to_string());

    eprintln!("Connecting to {addr}...");
    let stream = TcpStream::connect(&addr)
        .await
        .with_context(|| format!("could not connect to {addr}"))?;
    let (mut reader, mut writer) = stream.into_split();

    // Prompts are not newline-terminated, so print raw chunks as they come.
    let mut printer = tokio::spawn(async move {
        let mut buf = [0u8; 1024];
        loop {
            match reader.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    let mut stdout = std::io::stdout();
                    let _ = stdout.write_all(&buf[..n]);
                    let _ = stdout.flush();
                }
            }
        }
        eprintln!("\nServer closed the connection.");
    });

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = stdin.next_line() => {
                let Some(line) = line? else { break };
                writer.write_all(line.as_bytes()).await?;
                writer.write_all(b"\r\n").await?;
            }
            _ = &mut printer => break,
        }
    }

    Ok(())
}
