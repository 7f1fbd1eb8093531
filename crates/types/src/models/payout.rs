//! Payout types: which token(s) a zap-out pays the user in

use super::lp_token::LpToken;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Destination of the withdrawn liquidity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayoutType {
	/// Keep both constituents (not offered by the zapper yet)
	#[serde(rename = "receive-both-tokens")]
	Both,
	/// Swap both sides into the native-wrapped token
	#[serde(rename = "receive-one")]
	NativeWrapped,
	/// Swap token B into token A
	#[serde(rename = "receive-token-a")]
	TokenA,
	/// Swap token A into token B
	#[serde(rename = "receive-token-b")]
	TokenB,
}

impl PayoutType {
	/// All variants in display order
	pub const ALL: [PayoutType; 4] = [
		PayoutType::Both,
		PayoutType::NativeWrapped,
		PayoutType::TokenA,
		PayoutType::TokenB,
	];

	pub fn id(&self) -> &'static str {
		match self {
			PayoutType::Both => "receive-both-tokens",
			PayoutType::NativeWrapped => "receive-one",
			PayoutType::TokenA => "receive-token-a",
			PayoutType::TokenB => "receive-token-b",
		}
	}

	pub fn is_disabled(&self) -> bool {
		match self {
			PayoutType::Both => true,
			PayoutType::NativeWrapped | PayoutType::TokenA | PayoutType::TokenB => false,
		}
	}

	/// Hidden variants stay enabled in general but make no sense for this LP token
	pub fn is_hidden_for(&self, lp_token: &LpToken, native_wrapped_symbol: &str) -> bool {
		match self {
			PayoutType::NativeWrapped => lp_token.pairs_with(native_wrapped_symbol),
			PayoutType::Both | PayoutType::TokenA | PayoutType::TokenB => false,
		}
	}

	pub fn is_selectable_for(&self, lp_token: &LpToken, native_wrapped_symbol: &str) -> bool {
		!self.is_disabled() && !self.is_hidden_for(lp_token, native_wrapped_symbol)
	}

	/// Variants a user may pick for `lp_token`, in display order
	pub fn selectable_for(lp_token: &LpToken, native_wrapped_symbol: &str) -> Vec<PayoutType> {
		Self::ALL
			.into_iter()
			.filter(|payout| payout.is_selectable_for(lp_token, native_wrapped_symbol))
			.collect()
	}

	/// Human-readable destination label
	pub fn label(&self, lp_token: &LpToken, native_wrapped_symbol: &str) -> String {
		match self {
			PayoutType::Both => {
				format!("{} & {}", lp_token.token_a.symbol, lp_token.token_b.symbol)
			},
			PayoutType::NativeWrapped => native_wrapped_symbol.to_string(),
			PayoutType::TokenA => lp_token.token_a.symbol.clone(),
			PayoutType::TokenB => lp_token.token_b.symbol.clone(),
		}
	}
}

impl fmt::Display for PayoutType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.id())
	}
}
