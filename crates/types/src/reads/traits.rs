//! Read-side chain boundary

use super::ChainResult;
use crate::models::ChainId;
use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use std::fmt::Debug;

/// Typed view-call access to token and router contracts
///
/// Implementations only perform the call; caching and staleness handling
/// live in the read cache.
#[async_trait]
pub trait ChainReader: Send + Sync + Debug {
	/// `token.balanceOf(holder)`
	async fn balance_of(
		&self,
		chain_id: ChainId,
		token: Address,
		holder: Address,
	) -> ChainResult<U256>;

	/// `token.allowance(owner, spender)`
	async fn allowance(
		&self,
		chain_id: ChainId,
		token: Address,
		owner: Address,
		spender: Address,
	) -> ChainResult<U256>;

	/// `token.totalSupply()`
	async fn total_supply(&self, chain_id: ChainId, token: Address) -> ChainResult<U256>;

	/// `router.getAmountsOut(amountIn, path)`
	async fn get_amounts_out(
		&self,
		chain_id: ChainId,
		router: Address,
		amount_in: U256,
		path: &[Address],
	) -> ChainResult<Vec<U256>>;
}
