//! JSON-over-stdio transport for local AI clients: one JSON request per
//! line on stdin, one JSON response per line on stdout. Both the stdio
//! loop and the HTTP routes (`crate::transport::http`) forward into the
//! same shared [`Dispatcher`] (§6.6).

use std::sync::Arc;

use gateway_tools::Dispatcher;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StdioRequest {
    Tool { id: Value, tool: String, #[serde(default)] args: Value },
    Resource { id: Value, resource: String },
}

#[derive(Debug, Serialize)]
struct StdioResponse {
    id: Value,
    result: Value,
}

/// Run the stdio request loop until stdin closes or `cancel` fires.
pub async fn run(dispatcher: Arc<Dispatcher>, cancel: CancellationToken) -> eyre::Result<()> {
    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("stdio transport cancelled");
                return Ok(());
            }
            line = lines.next_line() => line?,
        };

        let Some(line) = line else {
            tracing::info!("stdio transport reached end of input");
            return Ok(());
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<StdioRequest>(&line) {
            Ok(StdioRequest::Tool { id, tool, args }) => {
                tracing::debug!(%tool, "stdio tool call");
                let result = dispatcher.invoke_tool(&tool, args).await;
                StdioResponse { id, result: serde_json::to_value(result)? }
            }
            Ok(StdioRequest::Resource { id, resource }) => {
                tracing::debug!(uri = %resource, "stdio resource read");
                let result = dispatcher.read_resource(&resource).await;
                StdioResponse { id, result: serde_json::to_value(result)? }
            }
            Err(e) => {
                tracing::warn!(error = %e, "malformed stdio request");
                StdioResponse { id: Value::Null, result: serde_json::json!({ "error": e.to_string() }) }
            }
        };

        let mut encoded = serde_json::to_vec(&response)?;
        encoded.push(b'\n');
        stdout.write_all(&encoded).await?;
        stdout.flush().await?;
    }
}
