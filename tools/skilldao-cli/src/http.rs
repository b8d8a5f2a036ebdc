use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::Address;
use serde::Deserialize;
use serde_json::{json, Value};
use skilldao_client::rpc::{RpcError, RpcTransport};

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcError>,
}

/// JSON-RPC over HTTP to an Ethereum node.
///
/// A node has no wallet prompt, so `eth_requestAccounts` is answered from
/// `--account` when given and from the node's unlocked accounts otherwise.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    account: Option<Address>,
    next_id: Arc<AtomicU64>,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>, account: Option<Address>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            account,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    async fn post(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params });
        tracing::debug!("-> {method} #{id}");

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| RpcError::internal(format!("{} unreachable: {e}", self.url)))?;
        if !response.status().is_success() {
            return Err(RpcError::internal(format!(
                "{} answered HTTP {}",
                self.url,
                response.status()
            )));
        }
        let reply: RpcResponse = response
            .json()
            .await
            .map_err(|e| RpcError::internal(format!("malformed response: {e}")))?;

        match reply.error {
            Some(error) => {
                tracing::debug!("<- {method} #{id} failed: {error}");
                Err(error)
            }
            None => Ok(reply.result.unwrap_or(Value::Null)),
        }
    }
}

impl RpcTransport for HttpTransport {
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        match (method, self.account) {
            ("eth_requestAccounts" | "eth_accounts", Some(account)) => Ok(json!([account])),
            ("eth_requestAccounts", None) => self.post("eth_accounts", params).await,
            _ => self.post(method, params).await,
        }
    }

    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
