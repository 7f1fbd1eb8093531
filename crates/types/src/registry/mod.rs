//! Static registry of tokens, routers, LP tokens and contract addresses
//!
//! The registry is built once at startup, validated, and shared read-only.
//! Entry order is preserved: "first router" and "first LP token" follow the
//! order in which entries were configured.

pub mod errors;

pub use errors::{RegistryError, RegistryResult};

use crate::models::{AddressBook, ChainId, LpToken, Router, Token};
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Role of a protocol contract the client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractRole {
	/// Withdrawal contract exposing `zapOutToken`
	Zapper,
}

impl fmt::Display for ContractRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ContractRole::Zapper => f.write_str("zapper"),
		}
	}
}

#[derive(Debug, Clone)]
pub struct Registry {
	tokens: Vec<Token>,
	routers: Vec<Router>,
	lp_tokens: Vec<LpToken>,
	contracts: HashMap<ContractRole, AddressBook>,
	native_wrapped: String,
}

impl Registry {
	/// Build and validate a registry
	pub fn new(
		tokens: Vec<Token>,
		routers: Vec<Router>,
		lp_tokens: Vec<LpToken>,
		contracts: HashMap<ContractRole, AddressBook>,
		native_wrapped: impl Into<String>,
	) -> RegistryResult<Self> {
		let registry = Self {
			tokens,
			routers,
			lp_tokens,
			contracts,
			native_wrapped: native_wrapped.into(),
		};
		registry.validate()?;
		Ok(registry)
	}

	fn validate(&self) -> RegistryResult<()> {
		check_unique("token", self.tokens.iter().map(|t| t.symbol.as_str()))?;
		check_unique("router", self.routers.iter().map(|r| r.name.as_str()))?;
		check_unique("LP token", self.lp_tokens.iter().map(|l| l.symbol.as_str()))?;

		self.token(&self.native_wrapped)?;

		for lp_token in &self.lp_tokens {
			let router = self.router(&lp_token.router)?;

			if lp_token.token_a.symbol == lp_token.token_b.symbol {
				return Err(RegistryError::IdenticalConstituents {
					symbol: lp_token.symbol.clone(),
					token: lp_token.token_a.symbol.clone(),
				});
			}

			for chain_id in lp_token.addresses.chains() {
				let unresolved = |missing: &str| RegistryError::UnresolvedOnChain {
					symbol: lp_token.symbol.clone(),
					missing: missing.to_string(),
					chain_id,
				};
				if !lp_token.token_a.addresses.supports(chain_id) {
					return Err(unresolved(&lp_token.token_a.symbol));
				}
				if !lp_token.token_b.addresses.supports(chain_id) {
					return Err(unresolved(&lp_token.token_b.symbol));
				}
				if !router.addresses.supports(chain_id) {
					return Err(unresolved(&router.name));
				}
			}
		}

		Ok(())
	}

	pub fn tokens(&self) -> &[Token] {
		&self.tokens
	}

	pub fn routers(&self) -> &[Router] {
		&self.routers
	}

	pub fn lp_tokens(&self) -> &[LpToken] {
		&self.lp_tokens
	}

	pub fn token(&self, symbol: &str) -> RegistryResult<&Token> {
		self.tokens
			.iter()
			.find(|t| t.symbol == symbol)
			.ok_or_else(|| RegistryError::UnknownToken {
				symbol: symbol.to_string(),
			})
	}

	pub fn router(&self, name: &str) -> RegistryResult<&Router> {
		self.routers
			.iter()
			.find(|r| r.name == name)
			.ok_or_else(|| RegistryError::UnknownRouter {
				name: name.to_string(),
			})
	}

	pub fn lp_token(&self, symbol: &str) -> RegistryResult<&LpToken> {
		self.lp_tokens
			.iter()
			.find(|l| l.symbol == symbol)
			.ok_or_else(|| RegistryError::UnknownLpToken {
				symbol: symbol.to_string(),
			})
	}

	/// LP tokens issued by `router_name`, in registry order
	pub fn lp_tokens_for_router(&self, router_name: &str) -> Vec<&LpToken> {
		self.lp_tokens
			.iter()
			.filter(|l| l.router == router_name)
			.collect()
	}

	/// Routers that own at least one LP token, in registry order
	pub fn routers_with_lp_tokens(&self) -> Vec<&Router> {
		self.routers
			.iter()
			.filter(|r| self.lp_tokens.iter().any(|l| l.router == r.name))
			.collect()
	}

	/// Router whose pool issued `lp_token`
	pub fn owning_router(&self, lp_token: &LpToken) -> RegistryResult<&Router> {
		self.router(&lp_token.router)
	}

	pub fn native_wrapped_symbol(&self) -> &str {
		&self.native_wrapped
	}

	pub fn native_wrapped(&self) -> RegistryResult<&Token> {
		self.token(&self.native_wrapped)
	}

	pub fn contract_address(&self, role: ContractRole, chain_id: ChainId) -> RegistryResult<Address> {
		self.contracts
			.get(&role)
			.and_then(|book| book.get(chain_id))
			.ok_or(RegistryError::MissingContract {
				role: role.to_string(),
				chain_id,
			})
	}
}

fn check_unique<'a>(kind: &str, names: impl Iterator<Item = &'a str>) -> RegistryResult<()> {
	let mut seen = HashSet::new();
	for name in names {
		if !seen.insert(name) {
			return Err(RegistryError::Duplicate {
				kind: kind.to_string(),
				name: name.to_string(),
			});
		}
	}
	Ok(())
}
