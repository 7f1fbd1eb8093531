//! Connected-wallet context

use crate::models::ChainId;
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// What the wallet provider currently reports
///
/// A missing chain or account means "disconnected".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletContext {
	pub chain_id: Option<ChainId>,
	pub account: Option<Address>,
}

impl WalletContext {
	pub fn connected(chain_id: ChainId, account: Address) -> Self {
		Self {
			chain_id: Some(chain_id),
			account: Some(account),
		}
	}

	pub fn disconnected() -> Self {
		Self::default()
	}

	pub fn is_connected(&self) -> bool {
		self.chain_id.is_some() && self.account.is_some()
	}

	/// Chain and account, when both are known
	pub fn session(&self) -> Option<(ChainId, Address)> {
		Some((self.chain_id?, self.account?))
	}
}
