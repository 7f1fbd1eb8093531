//! Signing boundary: the connected wallet

use super::{TxHash, TxReceipt, ZapOutCall};
use crate::models::ChainId;
use crate::reads::ChainResult;
use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use std::fmt::Debug;

/// Wallet able to sign and broadcast transactions for the connected account
///
/// Both submit methods return as soon as the transaction is broadcast;
/// confirmation is awaited separately so callers can react in between.
#[async_trait]
pub trait TransactionSigner: Send + Sync + Debug {
	/// Broadcast `token.approve(spender, amount)`
	async fn approve(
		&self,
		chain_id: ChainId,
		token: Address,
		spender: Address,
		amount: U256,
	) -> ChainResult<TxHash>;

	/// Broadcast `zapper.zapOutToken(...)`
	async fn zap_out_token(
		&self,
		chain_id: ChainId,
		zapper: Address,
		call: &ZapOutCall,
	) -> ChainResult<TxHash>;

	/// Wait until `hash` has `confirmations` confirmations
	async fn wait_for_confirmation(
		&self,
		chain_id: ChainId,
		hash: TxHash,
		confirmations: u64,
	) -> ChainResult<TxReceipt>;
}
