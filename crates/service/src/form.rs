//! Zap-out form
//!
//! Composes wallet context, selection, snapshot reads, the estimator and the
//! orchestrator behind one submit action.
//!
//! Refreshing is split in three steps so the caller can keep handling input
//! while reads are in flight: [`ZapOutForm::refresh_request`] captures the
//! current epoch, [`ViewLoader::load`] performs the reads, and
//! [`ZapOutForm::apply`] stores the outcome only if the epoch is unchanged.
//! Any change to the chain, account, selection or amount starts a new epoch.

use std::sync::Arc;

use tracing::debug;
use zapout_types::{
	format_fixed, format_units, ChainError, MutationKind, MutationState, PayoutType, ReadState,
	Registry, TxReceipt, WalletContext, U256,
};

use crate::estimator::{Estimate, EstimateError, EstimateRequest, Estimator};
use crate::orchestrator::{TransactionOrchestrator, ZapOutError};
use crate::readers::{BalanceSnapshot, SnapshotKeys, SnapshotReader};
use crate::selection::{SelectionCoordinator, SelectionError, SelectionEvent};
use crate::validation::{validate_amount, ValidationError};

/// Amount text after a successful zap-out
const RESET_AMOUNT: &str = "0.0";

/// What the submit button does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAction {
	Connect,
	/// Reads settling or a submission in flight; the button is disabled
	Loading,
	Approve,
	ZapOut,
}

impl SubmitAction {
	pub fn label(&self) -> &'static str {
		match self {
			SubmitAction::Connect => "Unlock Wallet",
			SubmitAction::Loading => "Loading...",
			SubmitAction::Approve => "Approve",
			SubmitAction::ZapOut => "Zap Out",
		}
	}

	pub fn is_enabled(&self) -> bool {
		match self {
			SubmitAction::Approve | SubmitAction::ZapOut => true,
			SubmitAction::Connect | SubmitAction::Loading => false,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
	Approved(TxReceipt),
	ZappedOut(TxReceipt),
}

/// Reads to perform for one epoch
#[derive(Debug, Clone)]
pub struct RefreshRequest {
	pub epoch: u64,
	pub keys: Option<SnapshotKeys>,
	pub estimate: Option<EstimateRequest>,
}

#[derive(Debug, Clone)]
pub struct RefreshOutcome {
	pub epoch: u64,
	pub snapshot: BalanceSnapshot,
	pub estimate: Result<Estimate, EstimateError>,
}

/// Detached handle performing the reads of a [`RefreshRequest`]
#[derive(Debug, Clone)]
pub struct ViewLoader {
	readers: SnapshotReader,
	estimator: Estimator,
}

impl ViewLoader {
	pub fn new(readers: SnapshotReader, estimator: Estimator) -> Self {
		Self { readers, estimator }
	}

	pub async fn load(&self, request: RefreshRequest) -> RefreshOutcome {
		let (snapshot, estimate) = match (&request.keys, &request.estimate) {
			(Some(keys), Some(estimate)) => {
				let snapshot = self.readers.read_snapshot(keys).await;
				let estimate = self
					.estimator
					.estimate(&self.readers, estimate, &snapshot)
					.await;
				(snapshot, estimate)
			},
			_ => (BalanceSnapshot::default(), Ok(Estimate::Loading)),
		};
		RefreshOutcome {
			epoch: request.epoch,
			snapshot,
			estimate,
		}
	}
}

pub struct ZapOutForm {
	selection: SelectionCoordinator,
	orchestrator: Arc<TransactionOrchestrator>,
	loader: ViewLoader,
	wallet: WalletContext,
	amount_text: String,
	epoch: u64,
	snapshot: BalanceSnapshot,
	estimate: Result<Estimate, EstimateError>,
}

impl ZapOutForm {
	pub fn new(
		registry: Arc<Registry>,
		readers: SnapshotReader,
		estimator: Estimator,
		orchestrator: Arc<TransactionOrchestrator>,
		wallet: WalletContext,
	) -> Result<Self, SelectionError> {
		let mut form = Self {
			selection: SelectionCoordinator::new(registry)?,
			orchestrator,
			loader: ViewLoader::new(readers, estimator),
			wallet,
			amount_text: String::new(),
			epoch: 0,
			snapshot: BalanceSnapshot::default(),
			estimate: Ok(Estimate::Loading),
		};
		form.reset_view();
		Ok(form)
	}

	pub fn selection(&self) -> &SelectionCoordinator {
		&self.selection
	}

	pub fn orchestrator(&self) -> &Arc<TransactionOrchestrator> {
		&self.orchestrator
	}

	pub fn wallet(&self) -> &WalletContext {
		&self.wallet
	}

	pub fn epoch(&self) -> u64 {
		self.epoch
	}

	pub fn amount_text(&self) -> &str {
		&self.amount_text
	}

	pub fn snapshot(&self) -> &BalanceSnapshot {
		&self.snapshot
	}

	pub fn estimate(&self) -> &Result<Estimate, EstimateError> {
		&self.estimate
	}

	/// Chain or account switched in the wallet
	pub fn set_wallet(&mut self, wallet: WalletContext) {
		if wallet == self.wallet {
			return;
		}
		self.wallet = wallet;
		self.orchestrator.reset_zap_out();
		self.reset_view();
	}

	pub fn select_router(&mut self, name: &str) -> Result<Vec<SelectionEvent>, SelectionError> {
		let events = self.selection.select_router(name)?;
		self.handle_events(&events);
		Ok(events)
	}

	pub fn select_lp_token(&mut self, symbol: &str) -> Result<Vec<SelectionEvent>, SelectionError> {
		let events = self.selection.select_lp_token(symbol)?;
		self.handle_events(&events);
		Ok(events)
	}

	pub fn select_payout(
		&mut self,
		payout: PayoutType,
	) -> Result<Vec<SelectionEvent>, SelectionError> {
		let events = self.selection.select_payout(payout)?;
		self.handle_events(&events);
		Ok(events)
	}

	pub fn set_amount(&mut self, text: impl Into<String>) {
		self.amount_text = text.into();
		self.epoch += 1;
		self.estimate = Ok(Estimate::Loading);
	}

	/// Fill the amount with the full LP balance; false while it is unknown
	pub fn input_max(&mut self) -> bool {
		let (Some(lp_token), ReadState::Ready(balance)) =
			(self.selection.lp_token(), &self.snapshot.lp_balance)
		else {
			return false;
		};
		let text = format_units(*balance, lp_token.decimals);
		self.set_amount(text);
		true
	}

	fn handle_events(&mut self, events: &[SelectionEvent]) {
		if events.is_empty() {
			return;
		}
		if events.iter().any(SelectionEvent::resets_zap_out) {
			self.orchestrator.reset_zap_out();
		}
		self.reset_view();
	}

	/// Start a new epoch showing whatever the cache holds for the new keys
	fn reset_view(&mut self) {
		self.epoch += 1;
		self.snapshot = match self.keys() {
			Some(keys) => self.loader.readers.cached_snapshot(&keys),
			None => BalanceSnapshot::default(),
		};
		self.estimate = Ok(Estimate::Loading);
		debug!("Form view reset (epoch {})", self.epoch);
	}

	fn keys(&self) -> Option<SnapshotKeys> {
		let lp_token = self.selection.lp_token()?;
		self.orchestrator.snapshot_keys(&self.wallet, lp_token).ok()
	}

	fn estimate_request(&self) -> Option<EstimateRequest> {
		let chain_id = self.wallet.chain_id?;
		let router = self
			.selection
			.zap_out_router()
			.ok()
			.and_then(|router| router.address(chain_id));
		Some(EstimateRequest {
			chain_id,
			lp_token: self.selection.lp_token().cloned(),
			router,
			payout: self.selection.payout(),
			amount_text: self.amount_text.clone(),
		})
	}

	pub fn refresh_request(&self) -> RefreshRequest {
		RefreshRequest {
			epoch: self.epoch,
			keys: self.keys(),
			estimate: self.estimate_request(),
		}
	}

	pub fn loader(&self) -> ViewLoader {
		self.loader.clone()
	}

	/// Store a refresh outcome; outcomes from an older epoch are dropped
	pub fn apply(&mut self, outcome: RefreshOutcome) -> bool {
		if outcome.epoch != self.epoch {
			debug!(
				"Dropping refresh from epoch {} (current {})",
				outcome.epoch, self.epoch
			);
			return false;
		}
		self.snapshot = outcome.snapshot;
		self.estimate = outcome.estimate;
		true
	}

	pub async fn refresh(&mut self) -> bool {
		let request = self.refresh_request();
		let outcome = self.loader.load(request).await;
		self.apply(outcome)
	}

	/// Retry after read errors: failed reads are dropped and the whole view
	/// is loaded again
	pub async fn reload(&mut self) -> bool {
		let dropped = self.loader.readers.cache().invalidate_errors();
		debug!("Reloading form view ({} failed reads dropped)", dropped);
		self.reset_view();
		self.refresh().await
	}

	pub fn balance_label(&self) -> String {
		let Some(lp_token) = self.selection.lp_token() else {
			return "-".to_string();
		};
		if !self.wallet.is_connected() {
			return "-".to_string();
		}
		match &self.snapshot.lp_balance {
			ReadState::NotRequested | ReadState::Loading => "Loading...".to_string(),
			ReadState::Ready(balance) => format!(
				"Balance: {}",
				format_fixed(
					*balance,
					self.loader.estimator.display_decimals(),
					lp_token.decimals
				)
			),
			ReadState::Error(_) => "-".to_string(),
		}
	}

	pub fn estimate_label(&self) -> &str {
		match &self.estimate {
			Ok(estimate) => estimate.label(),
			Err(_) => "-",
		}
	}

	/// First read error of the current snapshot or estimate
	pub fn read_error(&self) -> Option<ChainError> {
		if let Some(error) = self.snapshot.first_error() {
			return Some(error.clone());
		}
		match &self.estimate {
			Err(EstimateError::Read(error)) => Some(error.clone()),
			_ => None,
		}
	}

	fn wallet_values(&self) -> Option<(U256, U256)> {
		match (&self.snapshot.lp_balance, &self.snapshot.allowance) {
			(ReadState::Ready(balance), ReadState::Ready(allowance)) => Some((*balance, *allowance)),
			_ => None,
		}
	}

	pub fn is_approved(&self) -> bool {
		matches!(&self.snapshot.allowance, ReadState::Ready(allowance) if !allowance.is_zero())
	}

	pub fn submit_action(&self) -> SubmitAction {
		if !self.wallet.is_connected() {
			return SubmitAction::Connect;
		}
		if self.orchestrator.is_in_flight() || self.selection.lp_token().is_none() {
			return SubmitAction::Loading;
		}
		match self.wallet_values() {
			None => SubmitAction::Loading,
			Some((_, allowance)) if allowance.is_zero() => SubmitAction::Approve,
			Some(_) => SubmitAction::ZapOut,
		}
	}

	/// Inline message under the amount field
	pub fn validation_error(&self) -> Option<ValidationError> {
		let lp_token = self.selection.lp_token()?;
		let (balance, allowance) = self.wallet_values()?;
		validate_amount(
			&self.amount_text,
			lp_token.decimals,
			self.is_approved(),
			balance,
			allowance,
		)
		.err()
	}

	pub fn approve_state(&self) -> MutationState {
		self.orchestrator.approve_state()
	}

	pub fn zap_out_state(&self) -> MutationState {
		self.orchestrator.zap_out_state()
	}

	pub fn dismiss_errors(&self) -> bool {
		self.orchestrator.dismiss_errors()
	}

	/// Approve when no allowance is granted, zap out otherwise
	pub async fn submit(&mut self) -> Result<SubmitOutcome, ZapOutError> {
		let lp_token = match self.selection.lp_token() {
			Some(lp_token) => lp_token.clone(),
			None => return Err(ZapOutError::Selection(SelectionError::NoLpToken)),
		};

		match self.submit_action() {
			SubmitAction::Connect => Err(ZapOutError::Disconnected),
			SubmitAction::Loading => {
				if let Some(error) = self.snapshot.first_error() {
					return Err(ZapOutError::Read(error.clone()));
				}
				if self.orchestrator.approve_state().is_in_flight() {
					return Err(ZapOutError::MutationInFlight(MutationKind::Approve));
				}
				if self.orchestrator.zap_out_state().is_in_flight() {
					return Err(ZapOutError::MutationInFlight(MutationKind::ZapOut));
				}
				Err(ZapOutError::NotReady)
			},
			SubmitAction::Approve => {
				let receipt = self.orchestrator.approve(&self.wallet, &lp_token).await?;
				self.refresh().await;
				Ok(SubmitOutcome::Approved(receipt))
			},
			SubmitAction::ZapOut => {
				let (balance, allowance) = self.wallet_values().ok_or(ZapOutError::NotReady)?;
				validate_amount(
					&self.amount_text,
					lp_token.decimals,
					true,
					balance,
					allowance,
				)?;
				let router = self.selection.zap_out_router()?.clone();
				let receipt = self
					.orchestrator
					.zap_out(
						&self.wallet,
						&lp_token,
						&router,
						self.selection.payout(),
						&self.amount_text,
					)
					.await?;
				self.set_amount(RESET_AMOUNT);
				self.refresh().await;
				Ok(SubmitOutcome::ZappedOut(receipt))
			},
		}
	}
}
