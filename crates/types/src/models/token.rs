//! Fungible token definitions

use super::chain::{AddressBook, ChainId};
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Token known to the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
	/// Token symbol (e.g., "WONE", "USDC")
	pub symbol: String,
	/// Number of decimal places
	pub decimals: u8,
	/// Contract address on each supported chain
	pub addresses: AddressBook,
	/// Logo file name, relative to the token logo directory
	pub logo: Option<String>,
}

impl Token {
	pub fn new(symbol: impl Into<String>, decimals: u8, addresses: AddressBook) -> Self {
		Self {
			symbol: symbol.into(),
			decimals,
			addresses,
			logo: None,
		}
	}

	pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
		self.logo = Some(logo.into());
		self
	}

	pub fn address(&self, chain_id: ChainId) -> Option<Address> {
		self.addresses.get(chain_id)
	}
}
