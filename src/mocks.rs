//! Mock boundary implementations for demos and testing
//!
//! [`MockChainReader`] serves configurable balances and counts every call,
//! [`MockSigner`] records submissions and can apply their effect to a mock
//! chain, and [`RecordingNotifier`] keeps every notification it is given.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use zapout_types::{
	Address, ChainError, ChainId, ChainReader, ChainResult, NotificationId, NotificationKind,
	Notifier, TransactionSigner, TxHash, TxReceipt, ZapOutCall, U256,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
	mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Default)]
struct ChainState {
	/// `(token, holder) → balance`
	balances: HashMap<(Address, Address), U256>,
	/// `(token, owner, spender) → allowance`
	allowances: HashMap<(Address, Address, Address), U256>,
	supplies: HashMap<Address, U256>,
	/// `path → final amount out`; unknown paths quote 1:1
	quotes: HashMap<Vec<Address>, U256>,
	failures: HashMap<&'static str, ChainError>,
	calls: HashMap<&'static str, usize>,
}

/// In-memory chain reader; unknown balances read as zero
#[derive(Debug, Default)]
pub struct MockChainReader {
	state: Mutex<ChainState>,
}

impl MockChainReader {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_balance(self, token: Address, holder: Address, balance: U256) -> Self {
		self.set_balance(token, holder, balance);
		self
	}

	pub fn with_allowance(
		self,
		token: Address,
		owner: Address,
		spender: Address,
		allowance: U256,
	) -> Self {
		self.set_allowance(token, owner, spender, allowance);
		self
	}

	pub fn with_total_supply(self, token: Address, supply: U256) -> Self {
		lock(&self.state).supplies.insert(token, supply);
		self
	}

	/// Quote `amount_out` for any amount swapped along `path`
	pub fn with_quote(self, path: Vec<Address>, amount_out: U256) -> Self {
		lock(&self.state).quotes.insert(path, amount_out);
		self
	}

	pub fn set_balance(&self, token: Address, holder: Address, balance: U256) {
		lock(&self.state).balances.insert((token, holder), balance);
	}

	pub fn set_allowance(&self, token: Address, owner: Address, spender: Address, allowance: U256) {
		lock(&self.state)
			.allowances
			.insert((token, owner, spender), allowance);
	}

	/// Make every call of `method` fail with `error`
	pub fn fail(&self, method: &'static str, error: ChainError) {
		lock(&self.state).failures.insert(method, error);
	}

	pub fn clear_failures(&self) {
		lock(&self.state).failures.clear();
	}

	/// Number of `method` calls so far (`balanceOf`, `allowance`, ...)
	pub fn calls(&self, method: &str) -> usize {
		lock(&self.state).calls.get(method).copied().unwrap_or(0)
	}

	pub fn total_calls(&self) -> usize {
		lock(&self.state).calls.values().sum()
	}

	fn record(&self, method: &'static str) -> ChainResult<MutexGuard<'_, ChainState>> {
		let mut state = lock(&self.state);
		*state.calls.entry(method).or_insert(0) += 1;
		if let Some(error) = state.failures.get(method).cloned() {
			return Err(error);
		}
		Ok(state)
	}
}

#[async_trait]
impl ChainReader for MockChainReader {
	async fn balance_of(&self, _: ChainId, token: Address, holder: Address) -> ChainResult<U256> {
		let state = self.record("balanceOf")?;
		Ok(state
			.balances
			.get(&(token, holder))
			.copied()
			.unwrap_or_default())
	}

	async fn allowance(
		&self,
		_: ChainId,
		token: Address,
		owner: Address,
		spender: Address,
	) -> ChainResult<U256> {
		let state = self.record("allowance")?;
		Ok(state
			.allowances
			.get(&(token, owner, spender))
			.copied()
			.unwrap_or_default())
	}

	async fn total_supply(&self, _: ChainId, token: Address) -> ChainResult<U256> {
		let state = self.record("totalSupply")?;
		Ok(state.supplies.get(&token).copied().unwrap_or_default())
	}

	async fn get_amounts_out(
		&self,
		_: ChainId,
		_: Address,
		amount_in: U256,
		path: &[Address],
	) -> ChainResult<Vec<U256>> {
		let state = self.record("getAmountsOut")?;
		let amount_out = state.quotes.get(path).copied().unwrap_or(amount_in);
		let mut amounts = vec![amount_in; path.len().saturating_sub(1)];
		amounts.push(amount_out);
		Ok(amounts)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
	/// The wallet refuses to sign
	Reject,
	/// The transaction is mined but reverts
	Revert,
}

/// Signer recording submissions; with [`MockSigner::with_chain`] an approval
/// also raises the allowance on the mock chain
#[derive(Debug, Default)]
pub struct MockSigner {
	chain: Option<Arc<MockChainReader>>,
	failure: Mutex<Option<MockFailure>>,
	approvals: Mutex<Vec<(Address, Address, U256)>>,
	zap_outs: Mutex<Vec<ZapOutCall>>,
	owner: Option<Address>,
}

impl MockSigner {
	pub fn new() -> Self {
		Self::default()
	}

	/// Apply approvals by `owner` to `chain`
	pub fn with_chain(mut self, chain: Arc<MockChainReader>, owner: Address) -> Self {
		self.chain = Some(chain);
		self.owner = Some(owner);
		self
	}

	pub fn failing(self, failure: MockFailure) -> Self {
		*lock(&self.failure) = Some(failure);
		self
	}

	pub fn set_failure(&self, failure: Option<MockFailure>) {
		*lock(&self.failure) = failure;
	}

	pub fn approvals(&self) -> Vec<(Address, Address, U256)> {
		lock(&self.approvals).clone()
	}

	pub fn zap_outs(&self) -> Vec<ZapOutCall> {
		lock(&self.zap_outs).clone()
	}

	fn check_broadcast(&self) -> ChainResult<()> {
		match *lock(&self.failure) {
			Some(MockFailure::Reject) => Err(ChainError::Rejected),
			_ => Ok(()),
		}
	}
}

#[async_trait]
impl TransactionSigner for MockSigner {
	async fn approve(
		&self,
		_: ChainId,
		token: Address,
		spender: Address,
		amount: U256,
	) -> ChainResult<TxHash> {
		self.check_broadcast()?;
		lock(&self.approvals).push((token, spender, amount));
		if let (Some(chain), Some(owner)) = (&self.chain, self.owner) {
			chain.set_allowance(token, owner, spender, amount);
		}
		Ok(TxHash::repeat_byte(0xa1))
	}

	async fn zap_out_token(&self, _: ChainId, _: Address, call: &ZapOutCall) -> ChainResult<TxHash> {
		self.check_broadcast()?;
		lock(&self.zap_outs).push(call.clone());
		Ok(TxHash::repeat_byte(0xb2))
	}

	async fn wait_for_confirmation(
		&self,
		_: ChainId,
		hash: TxHash,
		_: u64,
	) -> ChainResult<TxReceipt> {
		let success = *lock(&self.failure) != Some(MockFailure::Revert);
		Ok(TxReceipt {
			transaction_hash: hash,
			block_number: 1,
			success,
		})
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRecord {
	pub kind: NotificationKind,
	pub message: String,
	pub replaced: Option<NotificationId>,
	pub id: NotificationId,
}

/// Notifier keeping every notification in order
#[derive(Debug, Default)]
pub struct RecordingNotifier {
	records: Mutex<Vec<NotificationRecord>>,
}

impl RecordingNotifier {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn records(&self) -> Vec<NotificationRecord> {
		lock(&self.records).clone()
	}

	pub fn kinds(&self) -> Vec<NotificationKind> {
		lock(&self.records).iter().map(|r| r.kind).collect()
	}
}

impl Notifier for RecordingNotifier {
	fn notify(
		&self,
		kind: NotificationKind,
		message: &str,
		replace: Option<NotificationId>,
	) -> NotificationId {
		let id = replace.unwrap_or_default();
		lock(&self.records).push(NotificationRecord {
			kind,
			message: message.to_string(),
			replaced: replace,
			id,
		});
		id
	}
}
