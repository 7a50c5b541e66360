// src/mcp/server.rs

//! Newline-delimited JSON-RPC loop over stdin/stdout driving the MCP
//! adapter.

use serde_json::{json, Value};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt};
use tracing::{debug, error, info};

use super::protocol::{error_codes, Request, Response};
use crate::adapters::mcp::McpTools;
use crate::core::error::ToolkitError;

const PROTOCOL_VERSION: &str = "2024-11-05";

/// Dispatches a single request. Returns `None` for notifications.
pub async fn handle_request(tools: &McpTools, req: Request) -> Option<Response> {
    if req.is_notification() {
        return None;
    }

    let response = match req.method.as_str() {
        "initialize" => Response::success(
            req.id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": {} },
                "serverInfo": {
                    "name": "evm-agent-toolkit",
                    "version": env!("CARGO_PKG_VERSION"),
                },
            }),
        ),
        "tools/list" => Response::success(req.id, json!({ "tools": tools.list_of_tools() })),
        "tools/call" => handle_tool_call(tools, req).await,
        other => Response::error(
            req.id,
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {other}"),
        ),
    };

    Some(response)
}

async fn handle_tool_call(tools: &McpTools, req: Request) -> Response {
    let params = match req.params.as_ref() {
        Some(params) => params,
        None => {
            return Response::error(
                req.id,
                error_codes::INVALID_PARAMS,
                "Missing 'params' object".to_string(),
            )
        }
    };

    let name = match params.get("name").and_then(Value::as_str) {
        Some(name) => name.to_owned(),
        None => {
            return Response::error(
                req.id,
                error_codes::INVALID_PARAMS,
                "Missing 'name' field in params".to_string(),
            )
        }
    };
    let args = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

    match tools.tool_handler(&name, args).await {
        Ok(result) => Response::success(req.id, result),
        Err(err) => {
            let code = match &err {
                ToolkitError::Validation(_) | ToolkitError::ToolNotFound(_) => {
                    error_codes::INVALID_PARAMS
                }
                _ => error_codes::INTERNAL_ERROR,
            };
            error!(tool = %name, "tool call failed: {err}");
            Response::error(req.id, code, err.to_string())
        }
    }
}

/// Runs the stdio server until EOF.
pub async fn run_stdio_server(tools: McpTools) -> anyhow::Result<()> {
    info!("Starting MCP server on stdin/stdout");

    let mut stdin = io::BufReader::new(io::stdin());
    let mut stdout = io::stdout();

    loop {
        let mut line = String::new();

        match stdin.read_line(&mut line).await {
            Ok(0) => {
                info!("EOF received, shutting down MCP server");
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                debug!("Received: {}", line);

                let response = match serde_json::from_str::<Request>(line) {
                    Ok(request) => handle_request(&tools, request).await,
                    Err(parse_error) => {
                        error!("JSON parse error: {}", parse_error);
                        Some(Response::error(
                            Value::Null,
                            error_codes::PARSE_ERROR,
                            format!("Parse error: {parse_error}"),
                        ))
                    }
                };

                if let Some(response) = response {
                    let payload = serde_json::to_string(&response)?;
                    debug!("Sending: {}", payload);
                    stdout.write_all(payload.as_bytes()).await?;
                    stdout.write_all(b"\n").await?;
                    stdout.flush().await?;
                }
            }
            Err(e) => {
                error!("Failed to read from stdin: {}", e);
                break;
            }
        }
    }

    Ok(())
}
