//! Transactions submitted by the client and the lifecycle of each mutation

pub mod traits;

pub use traits::TransactionSigner;

use crate::notifications::NotificationId;
use alloy_primitives::{Address, B256, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type TxHash = B256;

/// Arguments of `zapOutToken(fromToken, amount, toToken, router, recipient, path0, path1)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZapOutCall {
	/// LP token being withdrawn
	pub from_token: Address,
	pub amount: U256,
	/// Token paid out to the recipient
	pub to_token: Address,
	pub router: Address,
	pub recipient: Address,
	/// Swap path for token A's share, empty when no swap is needed
	pub path0: Vec<Address>,
	/// Swap path for token B's share, empty when no swap is needed
	pub path1: Vec<Address>,
}

/// Mined transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
	pub transaction_hash: TxHash,
	pub block_number: u64,
	pub success: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MutationKind {
	Approve,
	ZapOut,
}

impl fmt::Display for MutationKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			MutationKind::Approve => f.write_str("approve"),
			MutationKind::ZapOut => f.write_str("zap-out"),
		}
	}
}

/// In-flight mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransaction {
	pub kind: MutationKind,
	pub submitted_at: DateTime<Utc>,
	/// Known once the wallet has broadcast the transaction
	pub tx_hash: Option<TxHash>,
	/// Pending notification shown for this transaction
	pub notification: Option<NotificationId>,
}

impl PendingTransaction {
	pub fn new(kind: MutationKind) -> Self {
		Self {
			kind,
			submitted_at: Utc::now(),
			tx_hash: None,
			notification: None,
		}
	}
}

/// `Idle → Submitted → Confirmed | Failed → Idle`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MutationState {
	#[default]
	Idle,
	Submitted(PendingTransaction),
	Confirmed(TxReceipt),
	Failed { reason: String },
}

impl MutationState {
	pub fn is_in_flight(&self) -> bool {
		matches!(self, MutationState::Submitted(_))
	}

	pub fn is_failed(&self) -> bool {
		matches!(self, MutationState::Failed { .. })
	}

	pub fn failure_reason(&self) -> Option<&str> {
		match self {
			MutationState::Failed { reason } => Some(reason),
			_ => None,
		}
	}
}
