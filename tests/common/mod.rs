//! Shared utilities for integration tests.
//!
//! A programmable JSON-RPC node over plain HTTP/1.1 on a local port. Each
//! connection carries one request (single call or batch) and is then closed.

#![allow(dead_code)]

use serde_json::{json, Value};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Reply of the mock node to one call: a result or a JSON-RPC error.
pub type MockReply = Result<Value, (i64, String)>;

/// Start a mock node whose answers come from `handler(method, params)`.
///
/// Returns the bound address; the server runs until the test runtime ends.
pub async fn start_rpc_backend<F, Fut>(handler: F) -> SocketAddr
where
    F: Fn(String, Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = MockReply> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handler = Arc::new(handler);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let handler = handler.clone();
                    tokio::spawn(async move {
                        let _ = serve_one(socket, handler).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// URL for a backend started with [`start_rpc_backend`].
pub fn rpc_url(addr: SocketAddr) -> String {
    format!("http://{addr}")
}

/// An address nothing is listening on.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

async fn serve_one<F, Fut>(mut socket: TcpStream, handler: Arc<F>) -> std::io::Result<()>
where
    F: Fn(String, Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = MockReply> + Send + 'static,
{
    let body = read_request_body(&mut socket).await?;
    let request: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(_) => return write_response(&mut socket, 400, "bad json").await,
    };

    let response = match request {
        Value::Array(calls) => {
            let mut out = Vec::with_capacity(calls.len());
            for call in calls {
                out.push(answer(&*handler, call).await);
            }
            Value::Array(out)
        }
        call => answer(&*handler, call).await,
    };

    write_response(&mut socket, 200, &response.to_string()).await
}

async fn answer<F, Fut>(handler: &F, call: Value) -> Value
where
    F: Fn(String, Value) -> Fut,
    Fut: Future<Output = MockReply>,
{
    let id = call.get("id").cloned().unwrap_or(Value::Null);
    let method = call
        .get("method")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let params = call.get("params").cloned().unwrap_or_else(|| json!([]));

    match handler(method, params).await {
        Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
        Err((code, message)) => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": code, "message": message }
        }),
    }
}

async fn read_request_body(socket: &mut TcpStream) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            return Ok(Vec::new());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = headers
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    Ok(buf[header_end..].to_vec())
}

async fn write_response(socket: &mut TcpStream, status: u16, body: &str) -> std::io::Result<()> {
    let status_text = match status {
        200 => "200 OK",
        400 => "400 Bad Request",
        _ => "500 Internal Server Error",
    };
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_text,
        body.len(),
        body
    );
    socket.write_all(response.as_bytes()).await?;
    socket.shutdown().await
}

/// A complete `eth_getBlockByNumber` header object as a node returns it.
pub fn header_json(number: u64, hash: &str) -> Value {
    let zero_hash = format!("0x{}", "00".repeat(32));
    json!({
        "hash": hash,
        "parentHash": zero_hash,
        "sha3Uncles": "0x1dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347",
        "miner": "0x0000000000000000000000000000000000000000",
        "stateRoot": zero_hash,
        "transactionsRoot": "0x56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421",
        "receiptsRoot": "0x56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421",
        "logsBloom": format!("0x{}", "00".repeat(256)),
        "difficulty": "0x0",
        "number": format!("{number:#x}"),
        "gasLimit": "0x1c9c380",
        "gasUsed": "0x0",
        "timestamp": "0x6553f100",
        "extraData": "0x",
        "mixHash": zero_hash,
        "nonce": "0x0000000000000000",
        "baseFeePerGas": "0x7",
        "totalDifficulty": "0x0",
        "size": "0x220",
        "transactions": [],
        "uncles": []
    })
}
