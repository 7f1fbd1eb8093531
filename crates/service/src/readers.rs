//! Balance, allowance and reserve reads for the selected LP token
//!
//! Every read goes through the shared [`ReadCache`], so two views of the same
//! `(chain, address, method, args)` share one request and one result.

use std::sync::Arc;

use tracing::debug;
use zapout_cache::ReadCache;
use zapout_types::{
	Address, ChainId, ChainReader, ReadKey, ReadState, ReadValue, ResolvedLpToken, U256,
};

/// Cache keys of every read in a [`BalanceSnapshot`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotKeys {
	pub chain_id: ChainId,
	pub account: Address,
	pub zapper: Address,
	pub lp_token: ResolvedLpToken,
	pub lp_balance: ReadKey,
	pub allowance: ReadKey,
	pub total_supply: ReadKey,
	pub reserve_a: ReadKey,
	pub reserve_b: ReadKey,
}

impl SnapshotKeys {
	pub fn new(
		chain_id: ChainId,
		account: Address,
		zapper: Address,
		lp_token: ResolvedLpToken,
	) -> Self {
		Self {
			chain_id,
			account,
			zapper,
			lp_token,
			lp_balance: ReadKey::balance_of(chain_id, lp_token.lp, account),
			allowance: ReadKey::allowance(chain_id, lp_token.lp, account, zapper),
			total_supply: ReadKey::total_supply(chain_id, lp_token.lp),
			reserve_a: ReadKey::balance_of(chain_id, lp_token.token_a, lp_token.lp),
			reserve_b: ReadKey::balance_of(chain_id, lp_token.token_b, lp_token.lp),
		}
	}

	/// Reads that change when an approval is mined
	pub fn after_approve(&self) -> Vec<ReadKey> {
		vec![self.allowance.clone()]
	}

	/// Reads that change when a zap-out is mined
	pub fn after_zap_out(&self) -> Vec<ReadKey> {
		vec![
			self.allowance.clone(),
			self.lp_balance.clone(),
			self.total_supply.clone(),
			self.reserve_a.clone(),
			self.reserve_b.clone(),
		]
	}
}

/// Chain state backing the form for one LP token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceSnapshot {
	/// Wallet's LP token balance
	pub lp_balance: ReadState<U256>,
	/// Wallet's LP allowance granted to the zapper
	pub allowance: ReadState<U256>,
	pub total_supply: ReadState<U256>,
	/// Token A held by the LP contract
	pub reserve_a: ReadState<U256>,
	/// Token B held by the LP contract
	pub reserve_b: ReadState<U256>,
}

impl Default for BalanceSnapshot {
	fn default() -> Self {
		Self {
			lp_balance: ReadState::NotRequested,
			allowance: ReadState::NotRequested,
			total_supply: ReadState::NotRequested,
			reserve_a: ReadState::NotRequested,
			reserve_b: ReadState::NotRequested,
		}
	}
}

impl BalanceSnapshot {
	/// Whether the reads gating the submit button have settled
	pub fn wallet_reads_settled(&self) -> bool {
		!self.lp_balance.is_pending() && !self.allowance.is_pending()
	}

	/// First read error, in field order
	pub fn first_error(&self) -> Option<&zapout_types::ChainError> {
		[
			&self.lp_balance,
			&self.allowance,
			&self.total_supply,
			&self.reserve_a,
			&self.reserve_b,
		]
		.into_iter()
		.find_map(|state| state.error())
	}
}

/// Cached front for a [`ChainReader`]
#[derive(Debug, Clone)]
pub struct SnapshotReader {
	reader: Arc<dyn ChainReader>,
	cache: ReadCache,
}

impl SnapshotReader {
	pub fn new(reader: Arc<dyn ChainReader>, cache: ReadCache) -> Self {
		Self { reader, cache }
	}

	pub fn cache(&self) -> &ReadCache {
		&self.cache
	}

	/// Snapshot as currently cached, without issuing reads
	pub fn cached_snapshot(&self, keys: &SnapshotKeys) -> BalanceSnapshot {
		BalanceSnapshot {
			lp_balance: self.cache.state(&keys.lp_balance).into_uint(),
			allowance: self.cache.state(&keys.allowance).into_uint(),
			total_supply: self.cache.state(&keys.total_supply).into_uint(),
			reserve_a: self.cache.state(&keys.reserve_a).into_uint(),
			reserve_b: self.cache.state(&keys.reserve_b).into_uint(),
		}
	}

	/// Read every snapshot field concurrently, serving settled ones from cache
	pub async fn read_snapshot(&self, keys: &SnapshotKeys) -> BalanceSnapshot {
		let lp = keys.lp_token;
		let (lp_balance, allowance, total_supply, reserve_a, reserve_b) = futures::join!(
			self.balance_of(&keys.lp_balance, lp.lp, keys.account),
			self.allowance(&keys.allowance, lp.lp, keys.account, keys.zapper),
			self.total_supply(&keys.total_supply, lp.lp),
			self.balance_of(&keys.reserve_a, lp.token_a, lp.lp),
			self.balance_of(&keys.reserve_b, lp.token_b, lp.lp),
		);

		debug!(
			"Snapshot for LP {} on chain {} read (cache: {:?})",
			lp.lp,
			keys.chain_id,
			self.cache.stats()
		);

		BalanceSnapshot {
			lp_balance,
			allowance,
			total_supply,
			reserve_a,
			reserve_b,
		}
	}

	async fn balance_of(&self, key: &ReadKey, token: Address, holder: Address) -> ReadState<U256> {
		let reader = Arc::clone(&self.reader);
		let chain_id = key.chain_id;
		self.cache
			.fetch(key, || async move {
				reader
					.balance_of(chain_id, token, holder)
					.await
					.map(ReadValue::Uint)
			})
			.await
			.into_uint()
	}

	async fn allowance(
		&self,
		key: &ReadKey,
		token: Address,
		owner: Address,
		spender: Address,
	) -> ReadState<U256> {
		let reader = Arc::clone(&self.reader);
		let chain_id = key.chain_id;
		self.cache
			.fetch(key, || async move {
				reader
					.allowance(chain_id, token, owner, spender)
					.await
					.map(ReadValue::Uint)
			})
			.await
			.into_uint()
	}

	async fn total_supply(&self, key: &ReadKey, token: Address) -> ReadState<U256> {
		let reader = Arc::clone(&self.reader);
		let chain_id = key.chain_id;
		self.cache
			.fetch(key, || async move {
				reader
					.total_supply(chain_id, token)
					.await
					.map(ReadValue::Uint)
			})
			.await
			.into_uint()
	}

	/// Router quote for swapping `amount_in` along `path`
	pub async fn amounts_out(
		&self,
		chain_id: ChainId,
		router: Address,
		amount_in: U256,
		path: Vec<Address>,
	) -> ReadState<Vec<U256>> {
		let key = ReadKey::amounts_out(chain_id, router, amount_in, path.clone());
		let reader = Arc::clone(&self.reader);
		self.cache
			.fetch(&key, || async move {
				reader
					.get_amounts_out(chain_id, router, amount_in, &path)
					.await
					.map(ReadValue::Amounts)
			})
			.await
			.into_amounts()
	}

	/// Drop `keys` from the cache so the next snapshot reads them again
	pub fn invalidate(&self, keys: &[ReadKey]) -> usize {
		keys.iter().filter(|key| self.cache.invalidate(key)).count()
	}
}
