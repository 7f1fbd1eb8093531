//! Error types for chain interaction

use thiserror::Error;

/// Failures talking to the chain, for reads and mutations alike
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
	#[error("RPC request failed: {0}")]
	Rpc(String),

	#[error("Execution reverted: {reason}")]
	Reverted { reason: String },

	#[error("Could not decode {method} result: {reason}")]
	Decode { method: String, reason: String },

	#[error("User rejected the request")]
	Rejected,

	#[error("Timeout occurred after {timeout_ms}ms")]
	Timeout { timeout_ms: u64 },

	#[error("Not supported: {0}")]
	Unsupported(String),
}

pub type ChainResult<T> = Result<T, ChainError>;
