//! Keyed on-chain reads and their loading states

pub mod errors;
pub mod traits;

pub use errors::{ChainError, ChainResult};
pub use traits::ChainReader;

use crate::models::ChainId;
use alloy_primitives::{Address, U256};
use std::fmt;

/// Namespace shared by every contract read issued by this client
pub const CHAIN_READ_NAMESPACE: &str = "chain-read";

/// Argument of a keyed read
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReadArg {
	Address(Address),
	Uint(U256),
	Path(Vec<Address>),
}

impl fmt::Display for ReadArg {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ReadArg::Address(address) => write!(f, "{}", address),
			ReadArg::Uint(value) => write!(f, "{}", value),
			ReadArg::Path(path) => {
				let hops: Vec<String> = path.iter().map(|a| a.to_string()).collect();
				write!(f, "[{}]", hops.join(","))
			},
		}
	}
}

/// Identity of a contract read: `[namespace, chain, address, method, ...args]`
///
/// Any change to a component is a different read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReadKey {
	pub namespace: &'static str,
	pub chain_id: ChainId,
	pub address: Address,
	pub method: &'static str,
	pub args: Vec<ReadArg>,
}

impl ReadKey {
	pub fn new(chain_id: ChainId, address: Address, method: &'static str, args: Vec<ReadArg>) -> Self {
		Self {
			namespace: CHAIN_READ_NAMESPACE,
			chain_id,
			address,
			method,
			args,
		}
	}

	pub fn balance_of(chain_id: ChainId, token: Address, holder: Address) -> Self {
		Self::new(chain_id, token, "balanceOf", vec![ReadArg::Address(holder)])
	}

	pub fn allowance(chain_id: ChainId, token: Address, owner: Address, spender: Address) -> Self {
		Self::new(
			chain_id,
			token,
			"allowance",
			vec![ReadArg::Address(owner), ReadArg::Address(spender)],
		)
	}

	pub fn total_supply(chain_id: ChainId, token: Address) -> Self {
		Self::new(chain_id, token, "totalSupply", vec![])
	}

	pub fn amounts_out(chain_id: ChainId, router: Address, amount_in: U256, path: Vec<Address>) -> Self {
		Self::new(
			chain_id,
			router,
			"getAmountsOut",
			vec![ReadArg::Uint(amount_in), ReadArg::Path(path)],
		)
	}
}

impl fmt::Display for ReadKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}/{}/{}/{}",
			self.namespace, self.chain_id, self.address, self.method
		)?;
		for arg in &self.args {
			write!(f, "/{}", arg)?;
		}
		Ok(())
	}
}

/// Value produced by a contract read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadValue {
	Uint(U256),
	Amounts(Vec<U256>),
}

/// Lifecycle of one keyed read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadState<T> {
	/// Never requested, or invalidated since the last result
	NotRequested,
	Loading,
	Ready(T),
	Error(ChainError),
}

impl<T> ReadState<T> {
	/// `NotRequested` or `Loading`: the value is not settled yet
	pub fn is_pending(&self) -> bool {
		matches!(self, ReadState::NotRequested | ReadState::Loading)
	}

	pub fn is_ready(&self) -> bool {
		matches!(self, ReadState::Ready(_))
	}

	pub fn value(&self) -> Option<&T> {
		match self {
			ReadState::Ready(value) => Some(value),
			_ => None,
		}
	}

	pub fn error(&self) -> Option<&ChainError> {
		match self {
			ReadState::Error(error) => Some(error),
			_ => None,
		}
	}

	pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ReadState<U> {
		match self {
			ReadState::NotRequested => ReadState::NotRequested,
			ReadState::Loading => ReadState::Loading,
			ReadState::Ready(value) => ReadState::Ready(f(value)),
			ReadState::Error(error) => ReadState::Error(error),
		}
	}
}

impl ReadState<ReadValue> {
	/// Narrow a cached value to a single integer
	pub fn into_uint(self) -> ReadState<U256> {
		match self {
			ReadState::Ready(ReadValue::Uint(value)) => ReadState::Ready(value),
			ReadState::Ready(ReadValue::Amounts(_)) => ReadState::Error(ChainError::Decode {
				method: "uint read".to_string(),
				reason: "cached value is an amounts list".to_string(),
			}),
			other => other.map(|_| U256::ZERO),
		}
	}

	/// Narrow a cached value to an amounts list
	pub fn into_amounts(self) -> ReadState<Vec<U256>> {
		match self {
			ReadState::Ready(ReadValue::Amounts(values)) => ReadState::Ready(values),
			ReadState::Ready(ReadValue::Uint(_)) => ReadState::Error(ChainError::Decode {
				method: "amounts read".to_string(),
				reason: "cached value is a single integer".to_string(),
			}),
			other => other.map(|_| Vec::new()),
		}
	}
}
