//! Swap router (liquidity protocol) definitions

use super::chain::{AddressBook, ChainId};
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Router of a liquidity protocol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Router {
	/// Protocol name, unique within the registry
	pub name: String,
	/// Router contract address on each supported chain
	pub addresses: AddressBook,
	pub logo: Option<String>,
	/// Intermediate hop to take from a token before the native-wrapped token
	#[serde(default)]
	pub path_hints: HashMap<Address, Address>,
}

impl Router {
	pub fn new(name: impl Into<String>, addresses: AddressBook) -> Self {
		Self {
			name: name.into(),
			addresses,
			logo: None,
			path_hints: HashMap::new(),
		}
	}

	/// Route swaps out of `from` through `via`
	pub fn with_path_hint(mut self, from: Address, via: Address) -> Self {
		self.path_hints.insert(from, via);
		self
	}

	pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
		self.logo = Some(logo.into());
		self
	}

	pub fn address(&self, chain_id: ChainId) -> Option<Address> {
		self.addresses.get(chain_id)
	}

	pub fn hop_for(&self, token: &Address) -> Option<Address> {
		self.path_hints.get(token).copied()
	}
}
