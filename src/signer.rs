//! Signer for sessions without a wallet able to sign

use async_trait::async_trait;
use tracing::info;
use zapout_chain::{approve_calldata, zap_out_calldata};
use zapout_types::{
	alloy_primitives::Bytes, Address, ChainError, ChainId, ChainResult, TransactionSigner,
	TxHash, TxReceipt, ZapOutCall, U256,
};

/// Refuses every mutation, reporting the transaction a wallet would have to
/// send instead so it can be signed elsewhere
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOnlySigner;

fn unsigned(chain_id: ChainId, to: Address, data: Bytes) -> ChainError {
	info!("Unsigned transaction on chain {}: to={} data={}", chain_id, to, data);
	ChainError::Unsupported(format!(
		"read-only session cannot sign; send {} to {} on chain {}",
		data, to, chain_id
	))
}

#[async_trait]
impl TransactionSigner for ReadOnlySigner {
	async fn approve(
		&self,
		chain_id: ChainId,
		token: Address,
		spender: Address,
		amount: U256,
	) -> ChainResult<TxHash> {
		Err(unsigned(chain_id, token, approve_calldata(spender, amount)))
	}

	async fn zap_out_token(
		&self,
		chain_id: ChainId,
		zapper: Address,
		call: &ZapOutCall,
	) -> ChainResult<TxHash> {
		Err(unsigned(chain_id, zapper, zap_out_calldata(call)))
	}

	async fn wait_for_confirmation(
		&self,
		_chain_id: ChainId,
		_hash: TxHash,
		_confirmations: u64,
	) -> ChainResult<TxReceipt> {
		Err(ChainError::Unsupported(
			"read-only session has no transactions to confirm".to_string(),
		))
	}
}
