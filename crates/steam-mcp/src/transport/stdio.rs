//! Stdio transport — reads JSON-RPC from stdin, writes to stdout.

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::protocol::ProtocolHandler;
use crate::types::{McpError, McpResult, RequestId};

use super::framing;

/// Stdio transport for desktop MCP clients.
pub struct StdioTransport {
    handler: ProtocolHandler,
}

impl StdioTransport {
    pub fn new(handler: ProtocolHandler) -> Self {
        Self { handler }
    }

    /// Serve stdin/stdout until EOF.
    pub async fn run(&self) -> McpResult<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        tracing::info!("Stdio transport started");
        self.serve(stdin, stdout).await
    }

    /// Serve any line-oriented reader/writer pair until the reader hits EOF.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> McpResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let bytes_read = reader.read_until(b'\n', &mut buf).await?;

            if bytes_read == 0 {
                tracing::info!("EOF on input, shutting down");
                break;
            }

            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!("Dropping non-UTF-8 line: {e}");
                    let err = McpError::ParseError(format!("Invalid UTF-8: {e}"))
                        .to_json_rpc_error(RequestId::Null);
                    write_frame(&mut writer, &err.to_value()).await?;
                    continue;
                }
            };

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let response = match framing::parse_message(trimmed) {
                Ok(msg) => self.handler.handle_message(msg).await,
                Err(e) => {
                    tracing::warn!("Parse error: {e}");
                    Some(e.to_json_rpc_error(RequestId::Null).to_value())
                }
            };

            if let Some(response) = response {
                write_frame(&mut writer, &response).await?;
            }
        }

        Ok(())
    }
}

async fn write_frame<W: AsyncWrite + Unpin>(writer: &mut W, value: &Value) -> McpResult<()> {
    let framed = framing::frame_message(value)?;
    writer.write_all(framed.as_bytes()).await.map_err(McpError::Io)?;
    writer.flush().await.map_err(McpError::Io)
}
