use async_trait::async_trait;
use pmcp::error::TransportError;
use pmcp::shared::{StdioTransport, Transport, TransportMessage};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin, Stdout};
use tokio::sync::Mutex;

/// Stdio transport framing one JSON-RPC message per line, as MCP clients
/// launching a local server expect.
#[derive(Debug)]
pub(super) struct LineDelimitedStdioTransport {
    stdin: Arc<Mutex<BufReader<Stdin>>>,
    stdout: Arc<Mutex<Stdout>>,
}

impl LineDelimitedStdioTransport {
    pub(super) fn new() -> Self {
        Self {
            stdin: Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()))),
            stdout: Arc::new(Mutex::new(tokio::io::stdout())),
        }
    }
}

fn io_error(err: std::io::Error) -> pmcp::Error {
    pmcp::Error::Transport(TransportError::Io(err.to_string()))
}

#[async_trait]
impl Transport for LineDelimitedStdioTransport {
    async fn send(&mut self, message: TransportMessage) -> pmcp::Result<()> {
        let json = serde_json::to_string(&message)
            .map_err(|e| pmcp::Error::Transport(TransportError::Serialization(e.to_string())))?;

        let mut stdout = self.stdout.lock().await;
        stdout.write_all(json.as_bytes()).await.map_err(io_error)?;
        stdout.write_all(b"\n").await.map_err(io_error)?;
        stdout.flush().await.map_err(io_error)?;
        Ok(())
    }

    async fn receive(&mut self) -> pmcp::Result<TransportMessage> {
        let mut stdin = self.stdin.lock().await;

        loop {
            let mut line = String::new();
            let bytes = stdin.read_line(&mut line).await.map_err(io_error)?;
            if bytes == 0 {
                tracing::info!("stdin closed");
                return Err(pmcp::Error::Transport(TransportError::ConnectionClosed));
            }

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            return StdioTransport::parse_message(line.as_bytes()).inspect_err(|e| {
                tracing::warn!(error = %e, "dropping malformed message");
            });
        }
    }

    async fn close(&mut self) -> pmcp::Result<()> {
        Ok(())
    }
}
