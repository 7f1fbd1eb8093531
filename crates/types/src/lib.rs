//! Zap-out Types
//!
//! Shared models, errors and boundary traits for the zap-out client.
//! This crate is organized by concern: registry entities, fixed-point
//! amounts, keyed chain reads, transactions and notifications.

pub mod amount;
pub mod models;
pub mod notifications;
pub mod reads;
pub mod registry;
pub mod transactions;
pub mod wallet;

// Re-export external dependencies for convenience
pub use alloy_primitives;
pub use chrono;
pub use serde_json;

pub use alloy_primitives::{Address, U256};

pub use amount::{
	format_fixed, format_units, parse_units, parse_units_or_zero, proportional_share,
	AmountError, AmountResult, TOKEN_AMOUNT_DISPLAY_DECIMALS,
};

pub use models::{AddressBook, ChainId, LpToken, PayoutType, ResolvedLpToken, Router, Token};

pub use registry::{ContractRole, Registry, RegistryError, RegistryResult};

pub use reads::{
	ChainError, ChainReader, ChainResult, ReadArg, ReadKey, ReadState, ReadValue,
	CHAIN_READ_NAMESPACE,
};

pub use transactions::{
	MutationKind, MutationState, PendingTransaction, TransactionSigner, TxHash, TxReceipt,
	ZapOutCall,
};

pub use notifications::{NotificationId, NotificationKind, Notifier};

pub use wallet::WalletContext;
