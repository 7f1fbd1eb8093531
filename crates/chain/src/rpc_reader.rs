//! JSON-RPC `eth_call` implementation of [`ChainReader`]
//!
//! One HTTP endpoint per chain. Requests share a pooled reqwest client.

use crate::abi::{self, IUniswapV2Router02, IERC20};
use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;
use zapout_types::{ChainError, ChainId, ChainReader, ChainResult};

/// JSON-RPC error code used by geth-compatible nodes for reverted calls
const EXECUTION_REVERTED: i64 = 3;

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
	jsonrpc: &'static str,
	id: u64,
	method: &'a str,
	params: Value,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
	result: Option<Bytes>,
	error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
	code: i64,
	message: String,
}

/// Chain reader backed by HTTP JSON-RPC nodes
#[derive(Debug, Clone)]
pub struct RpcChainReader {
	client: Client,
	endpoints: HashMap<ChainId, Url>,
	timeout_ms: u64,
	request_id: Arc<AtomicU64>,
}

impl RpcChainReader {
	/// Create a reader with one endpoint per chain
	pub fn new(endpoints: HashMap<ChainId, Url>, timeout_ms: u64) -> ChainResult<Self> {
		let client = Client::builder()
			.timeout(Duration::from_millis(timeout_ms))
			.pool_idle_timeout(Duration::from_secs(90))
			.tcp_keepalive(Duration::from_secs(60))
			.build()
			.map_err(|e| ChainError::Rpc(format!("failed to build HTTP client: {}", e)))?;

		Ok(Self {
			client,
			endpoints,
			timeout_ms,
			request_id: Arc::new(AtomicU64::new(1)),
		})
	}

	/// Parse `chain_id → url` strings, as they appear in configuration
	pub fn from_urls(endpoints: &HashMap<ChainId, String>, timeout_ms: u64) -> ChainResult<Self> {
		let mut parsed = HashMap::new();
		for (chain_id, endpoint) in endpoints {
			let url = Url::parse(endpoint).map_err(|e| {
				ChainError::Rpc(format!(
					"invalid RPC endpoint '{}' for chain {}: {}",
					endpoint, chain_id, e
				))
			})?;
			parsed.insert(*chain_id, url);
		}
		Self::new(parsed, timeout_ms)
	}

	pub fn supports(&self, chain_id: ChainId) -> bool {
		self.endpoints.contains_key(&chain_id)
	}

	fn endpoint(&self, chain_id: ChainId) -> ChainResult<&Url> {
		self.endpoints
			.get(&chain_id)
			.ok_or_else(|| ChainError::Unsupported(format!("no RPC endpoint for chain {}", chain_id)))
	}

	/// `eth_call` `call` on `to` at the latest block and decode its return data
	async fn call<C: SolCall>(
		&self,
		chain_id: ChainId,
		to: Address,
		call: C,
	) -> ChainResult<C::Return> {
		let data = self
			.eth_call(chain_id, to, call.abi_encode().into(), C::SIGNATURE)
			.await?;
		abi::decode_returns::<C>(&data)
	}

	async fn eth_call(
		&self,
		chain_id: ChainId,
		to: Address,
		data: Bytes,
		method: &str,
	) -> ChainResult<Bytes> {
		let endpoint = self.endpoint(chain_id)?;
		let request = JsonRpcRequest {
			jsonrpc: "2.0",
			id: self.request_id.fetch_add(1, Ordering::Relaxed),
			method: "eth_call",
			params: serde_json::json!([{ "to": to, "data": data }, "latest"]),
		};

		debug!("eth_call {} on {} (chain {})", method, to, chain_id);
		let response = self
			.client
			.post(endpoint.clone())
			.json(&request)
			.send()
			.await
			.map_err(|e| self.transport_error(e))?;

		let status = response.status();
		if !status.is_success() {
			return Err(ChainError::Rpc(format!(
				"HTTP {} from {}",
				status.as_u16(),
				endpoint
			)));
		}

		let body: JsonRpcResponse = response
			.json()
			.await
			.map_err(|e| self.transport_error(e))?;
		parse_call_result(body, method)
	}

	fn transport_error(&self, error: reqwest::Error) -> ChainError {
		if error.is_timeout() {
			ChainError::Timeout {
				timeout_ms: self.timeout_ms,
			}
		} else {
			ChainError::Rpc(error.to_string())
		}
	}
}

fn parse_call_result(body: JsonRpcResponse, method: &str) -> ChainResult<Bytes> {
	if let Some(error) = body.error {
		warn!("{} failed: {} (code {})", method, error.message, error.code);
		if error.code == EXECUTION_REVERTED || error.message.contains("revert") {
			return Err(ChainError::Reverted {
				reason: error.message,
			});
		}
		return Err(ChainError::Rpc(error.message));
	}

	body.result.ok_or_else(|| ChainError::Decode {
		method: method.to_string(),
		reason: "response carries neither result nor error".to_string(),
	})
}

#[async_trait]
impl ChainReader for RpcChainReader {
	async fn balance_of(
		&self,
		chain_id: ChainId,
		token: Address,
		holder: Address,
	) -> ChainResult<U256> {
		let call = IERC20::balanceOfCall { owner: holder };
		Ok(self.call(chain_id, token, call).await?._0)
	}

	async fn allowance(
		&self,
		chain_id: ChainId,
		token: Address,
		owner: Address,
		spender: Address,
	) -> ChainResult<U256> {
		let call = IERC20::allowanceCall { owner, spender };
		Ok(self.call(chain_id, token, call).await?._0)
	}

	async fn total_supply(&self, chain_id: ChainId, token: Address) -> ChainResult<U256> {
		Ok(self.call(chain_id, token, IERC20::totalSupplyCall {}).await?._0)
	}

	async fn get_amounts_out(
		&self,
		chain_id: ChainId,
		router: Address,
		amount_in: U256,
		path: &[Address],
	) -> ChainResult<Vec<U256>> {
		let call = IUniswapV2Router02::getAmountsOutCall {
			amount_in,
			path: path.to_vec(),
		};
		Ok(self.call(chain_id, router, call).await?.amounts)
	}
}
