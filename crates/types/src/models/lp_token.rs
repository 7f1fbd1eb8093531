//! Liquidity-pool token definitions

use super::chain::{AddressBook, ChainId};
use super::token::Token;
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// LP token of a two-sided pool, owned by a router
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LpToken {
	pub symbol: String,
	pub decimals: u8,
	pub addresses: AddressBook,
	/// Name of the router whose pool issued this token
	pub router: String,
	pub token_a: Token,
	pub token_b: Token,
}

impl LpToken {
	pub fn address(&self, chain_id: ChainId) -> Option<Address> {
		self.addresses.get(chain_id)
	}

	/// Whether either constituent has the given symbol
	pub fn pairs_with(&self, symbol: &str) -> bool {
		self.token_a.symbol == symbol || self.token_b.symbol == symbol
	}

	/// Resolve LP, token A and token B addresses on one chain
	pub fn resolve(&self, chain_id: ChainId) -> Option<ResolvedLpToken> {
		Some(ResolvedLpToken {
			lp: self.address(chain_id)?,
			token_a: self.token_a.address(chain_id)?,
			token_b: self.token_b.address(chain_id)?,
		})
	}
}

/// Addresses of an LP token and its constituents on one chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLpToken {
	pub lp: Address,
	pub token_a: Address,
	pub token_b: Address,
}
