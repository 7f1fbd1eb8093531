//! Transaction orchestrator
//!
//! Runs the approval and zap-out mutations: broadcast through the signer,
//! pending notification, confirmation, then targeted cache invalidation.
//! Each mutation kind has its own [`MutationTracker`] and at most one
//! submission of a kind is in flight at a time.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::{info, warn};
use zapout_types::{
	format_units, parse_units, AmountError, ChainError, ChainId, ChainResult, ContractRole,
	LpToken, MutationKind, MutationState, NotificationId, NotificationKind, Notifier,
	PayoutType, PendingTransaction, ReadKey, Registry, RegistryError, Router,
	TransactionSigner, TxHash, TxReceipt, WalletContext, ZapOutCall, U256,
};

use crate::readers::{SnapshotKeys, SnapshotReader};
use crate::route::{RouteError, ZapOutRoute};
use crate::selection::SelectionError;
use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum ZapOutError {
	#[error("invariant violation: {0}")]
	InvariantViolation(String),
	#[error("wallet is not connected")]
	Disconnected,
	#[error("chain {0} is not supported by the selected LP token")]
	UnsupportedChain(ChainId),
	#[error("{0} is already in flight")]
	MutationInFlight(MutationKind),
	#[error("balance and allowance are still loading")]
	NotReady,
	#[error("{kind} failed: {source}")]
	Mutation {
		kind: MutationKind,
		#[source]
		source: ChainError,
	},
	#[error("read failed: {0}")]
	Read(ChainError),
	#[error(transparent)]
	Validation(#[from] ValidationError),
	#[error("invalid amount: {0}")]
	Amount(#[from] AmountError),
	#[error(transparent)]
	Route(#[from] RouteError),
	#[error(transparent)]
	Selection(#[from] SelectionError),
	#[error(transparent)]
	Registry(#[from] RegistryError),
}

/// `Idle → Submitted → Confirmed | Failed` for one mutation kind
#[derive(Debug)]
pub struct MutationTracker {
	kind: MutationKind,
	state: Mutex<MutationState>,
}

impl MutationTracker {
	pub fn new(kind: MutationKind) -> Self {
		Self {
			kind,
			state: Mutex::new(MutationState::Idle),
		}
	}

	pub fn kind(&self) -> MutationKind {
		self.kind
	}

	fn lock(&self) -> MutexGuard<'_, MutationState> {
		self.state.lock().unwrap_or_else(PoisonError::into_inner)
	}

	pub fn state(&self) -> MutationState {
		self.lock().clone()
	}

	pub fn is_in_flight(&self) -> bool {
		self.lock().is_in_flight()
	}

	/// Enter `Submitted`, replacing any settled state
	pub fn begin(&self) -> Result<(), ZapOutError> {
		let mut state = self.lock();
		if state.is_in_flight() {
			return Err(ZapOutError::MutationInFlight(self.kind));
		}
		*state = MutationState::Submitted(PendingTransaction::new(self.kind));
		Ok(())
	}

	/// Record the broadcast hash and the pending notification shown for it
	pub fn broadcast(&self, hash: TxHash, notification: NotificationId) {
		if let MutationState::Submitted(pending) = &mut *self.lock() {
			pending.tx_hash = Some(hash);
			pending.notification = Some(notification);
		}
	}

	pub fn confirm(&self, receipt: TxReceipt) {
		*self.lock() = MutationState::Confirmed(receipt);
	}

	pub fn fail(&self, reason: impl Into<String>) {
		*self.lock() = MutationState::Failed {
			reason: reason.into(),
		};
	}

	/// Return a settled mutation to `Idle`; an in-flight one is left alone
	pub fn dismiss(&self) -> bool {
		let mut state = self.lock();
		match *state {
			MutationState::Confirmed(_) | MutationState::Failed { .. } => {
				*state = MutationState::Idle;
				true
			},
			MutationState::Idle | MutationState::Submitted(_) => false,
		}
	}
}

/// Texts of the notifications shown for one submission
struct Messages {
	pending: String,
	resolved: String,
}

pub struct TransactionOrchestrator {
	registry: Arc<Registry>,
	readers: SnapshotReader,
	signer: Arc<dyn TransactionSigner>,
	notifier: Arc<dyn Notifier>,
	confirmations: u64,
	approve: MutationTracker,
	zap_out: MutationTracker,
}

impl TransactionOrchestrator {
	pub fn new(
		registry: Arc<Registry>,
		readers: SnapshotReader,
		signer: Arc<dyn TransactionSigner>,
		notifier: Arc<dyn Notifier>,
		confirmations: u64,
	) -> Self {
		Self {
			registry,
			readers,
			signer,
			notifier,
			confirmations,
			approve: MutationTracker::new(MutationKind::Approve),
			zap_out: MutationTracker::new(MutationKind::ZapOut),
		}
	}

	pub fn approve_state(&self) -> MutationState {
		self.approve.state()
	}

	pub fn zap_out_state(&self) -> MutationState {
		self.zap_out.state()
	}

	pub fn is_in_flight(&self) -> bool {
		self.approve.is_in_flight() || self.zap_out.is_in_flight()
	}

	/// Clear failed (and confirmed) mutations
	pub fn dismiss_errors(&self) -> bool {
		let approve = self.approve.dismiss();
		let zap_out = self.zap_out.dismiss();
		approve || zap_out
	}

	/// Clear zap-out state tied to a previous selection
	///
	/// A submission still in flight is not cancelled.
	pub fn reset_zap_out(&self) {
		self.zap_out.dismiss();
	}

	/// Cache keys of the reads behind `lp_token` for the connected account
	pub fn snapshot_keys(
		&self,
		wallet: &WalletContext,
		lp_token: &LpToken,
	) -> Result<SnapshotKeys, ZapOutError> {
		let (chain_id, account) = wallet.session().ok_or(ZapOutError::Disconnected)?;
		let resolved = lp_token
			.resolve(chain_id)
			.ok_or(ZapOutError::UnsupportedChain(chain_id))?;
		let zapper = self
			.registry
			.contract_address(ContractRole::Zapper, chain_id)
			.map_err(|_| ZapOutError::UnsupportedChain(chain_id))?;
		Ok(SnapshotKeys::new(chain_id, account, zapper, resolved))
	}

	/// Grant the zapper an unlimited allowance on `lp_token`
	pub async fn approve(
		&self,
		wallet: &WalletContext,
		lp_token: &LpToken,
	) -> Result<TxReceipt, ZapOutError> {
		let keys = self.snapshot_keys(wallet, lp_token)?;
		let messages = Messages {
			pending: format!("Approving {}", lp_token.symbol),
			resolved: format!("Approved {}", lp_token.symbol),
		};

		let broadcast =
			self.signer
				.approve(keys.chain_id, keys.lp_token.lp, keys.zapper, U256::MAX);
		self.execute(
			&self.approve,
			keys.chain_id,
			broadcast,
			messages,
			keys.after_approve(),
		)
		.await
	}

	/// Withdraw `amount_text` of `lp_token` and pay it out as `payout`
	///
	/// `router` must be the LP token's owning router.
	pub async fn zap_out(
		&self,
		wallet: &WalletContext,
		lp_token: &LpToken,
		router: &Router,
		payout: PayoutType,
		amount_text: &str,
	) -> Result<TxReceipt, ZapOutError> {
		let keys = self.snapshot_keys(wallet, lp_token)?;
		let chain_id = keys.chain_id;
		if router.name != lp_token.router {
			return Err(ZapOutError::InvariantViolation(format!(
				"router {} does not own LP token {}",
				router.name, lp_token.symbol
			)));
		}

		let amount = parse_units(amount_text, lp_token.decimals)?;
		let router_address = router
			.address(chain_id)
			.ok_or(ZapOutError::UnsupportedChain(chain_id))?;
		let native_wrapped = self.registry.native_wrapped()?.address(chain_id);
		let route = ZapOutRoute::resolve(payout, &keys.lp_token, router, native_wrapped)?;

		let call = ZapOutCall {
			from_token: keys.lp_token.lp,
			amount,
			to_token: route.to,
			router: router_address,
			recipient: keys.account,
			path0: route.path0,
			path1: route.path1,
		};
		let target = payout.label(lp_token, self.registry.native_wrapped_symbol());
		let shown = format_units(amount, lp_token.decimals);
		let messages = Messages {
			pending: format!("Zapping out {} {} to {}", shown, lp_token.symbol, target),
			resolved: format!("Zapped out {} {} to {}", shown, lp_token.symbol, target),
		};

		let broadcast = self.signer.zap_out_token(chain_id, keys.zapper, &call);
		self.execute(
			&self.zap_out,
			chain_id,
			broadcast,
			messages,
			keys.after_zap_out(),
		)
		.await
	}

	async fn execute<F>(
		&self,
		tracker: &MutationTracker,
		chain_id: ChainId,
		broadcast: F,
		messages: Messages,
		invalidate: Vec<ReadKey>,
	) -> Result<TxReceipt, ZapOutError>
	where
		F: Future<Output = ChainResult<TxHash>>,
	{
		tracker.begin()?;
		let kind = tracker.kind();

		let hash = match broadcast.await {
			Ok(hash) => hash,
			Err(error) => return Err(self.fail(tracker, None, error)),
		};
		let pending = self
			.notifier
			.notify(NotificationKind::Pending, &messages.pending, None);
		tracker.broadcast(hash, pending);
		info!("{} broadcast on chain {}: {}", kind, chain_id, hash);

		let receipt = match self
			.signer
			.wait_for_confirmation(chain_id, hash, self.confirmations)
			.await
		{
			Ok(receipt) if receipt.success => receipt,
			Ok(receipt) => {
				let error = ChainError::Reverted {
					reason: format!(
						"transaction {} reverted in block {}",
						receipt.transaction_hash, receipt.block_number
					),
				};
				return Err(self.fail(tracker, Some(pending), error));
			},
			Err(error) => return Err(self.fail(tracker, Some(pending), error)),
		};

		let invalidated = self.readers.invalidate(&invalidate);
		self.notifier.notify(
			NotificationKind::Resolved,
			&messages.resolved,
			Some(pending),
		);
		info!(
			"{} confirmed in block {} ({} cached reads invalidated)",
			kind, receipt.block_number, invalidated
		);
		tracker.confirm(receipt.clone());
		Ok(receipt)
	}

	fn fail(
		&self,
		tracker: &MutationTracker,
		pending: Option<NotificationId>,
		error: ChainError,
	) -> ZapOutError {
		let kind = tracker.kind();
		let reason = error.to_string();
		warn!("{} failed: {}", kind, reason);
		self.notifier
			.notify(NotificationKind::Rejected, &reason, pending);
		tracker.fail(reason);
		ZapOutError::Mutation {
			kind,
			source: error,
		}
	}
}
