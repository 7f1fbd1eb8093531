//! Error types for registry construction and lookup

use crate::models::ChainId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
	#[error("Unknown token: {symbol}")]
	UnknownToken { symbol: String },

	#[error("Unknown router: {name}")]
	UnknownRouter { name: String },

	#[error("Unknown LP token: {symbol}")]
	UnknownLpToken { symbol: String },

	#[error("Duplicate {kind} entry: {name}")]
	Duplicate { kind: String, name: String },

	#[error("LP token {symbol} pairs {token} with itself")]
	IdenticalConstituents { symbol: String, token: String },

	#[error("LP token {symbol}: {missing} has no address on chain {chain_id}")]
	UnresolvedOnChain {
		symbol: String,
		missing: String,
		chain_id: ChainId,
	},

	#[error("Invalid address '{value}' for {field}")]
	InvalidAddress { field: String, value: String },

	#[error("Invalid chain ID '{value}' for {field}")]
	InvalidChainId { field: String, value: String },

	#[error("No {role} contract on chain {chain_id}")]
	MissingContract { role: String, chain_id: ChainId },
}

pub type RegistryResult<T> = Result<T, RegistryError>;
