//! Chain identifiers and per-chain address tables

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// EVM chain ID (e.g., 1 for Ethereum mainnet, 1666600000 for Harmony shard 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub u64);

impl ChainId {
	pub fn new(id: u64) -> Self {
		Self(id)
	}

	pub fn as_u64(&self) -> u64 {
		self.0
	}
}

impl fmt::Display for ChainId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<u64> for ChainId {
	fn from(value: u64) -> Self {
		Self(value)
	}
}

/// Contract addresses of one logical entity across chains
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressBook(HashMap<ChainId, Address>);

impl AddressBook {
	pub fn new() -> Self {
		Self(HashMap::new())
	}

	/// Add or replace the address on `chain_id`
	pub fn with(mut self, chain_id: ChainId, address: Address) -> Self {
		self.0.insert(chain_id, address);
		self
	}

	pub fn insert(&mut self, chain_id: ChainId, address: Address) {
		self.0.insert(chain_id, address);
	}

	pub fn get(&self, chain_id: ChainId) -> Option<Address> {
		self.0.get(&chain_id).copied()
	}

	pub fn supports(&self, chain_id: ChainId) -> bool {
		self.0.contains_key(&chain_id)
	}

	/// Chains with an entry, in ascending order
	pub fn chains(&self) -> Vec<ChainId> {
		let mut chains: Vec<ChainId> = self.0.keys().copied().collect();
		chains.sort();
		chains
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl FromIterator<(ChainId, Address)> for AddressBook {
	fn from_iter<I: IntoIterator<Item = (ChainId, Address)>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_address_book_lookup() {
		let chain = ChainId::new(1666600000);
		let book = AddressBook::new().with(chain, Address::repeat_byte(0x11));

		assert!(book.supports(chain));
		assert_eq!(book.get(chain), Some(Address::repeat_byte(0x11)));
		assert_eq!(book.get(ChainId::new(1)), None);
		assert_eq!(book.chains(), vec![chain]);
	}

	#[test]
	fn test_chain_id_display() {
		assert_eq!(ChainId::from(1666700000).to_string(), "1666700000");
	}
}
