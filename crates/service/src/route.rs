//! Destination token and swap paths of a zap-out

use thiserror::Error;
use zapout_types::{Address, PayoutType, ResolvedLpToken, Router};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
	#[error("payout type '{0}' is not available")]
	PayoutUnavailable(PayoutType),
	#[error("native-wrapped token has no address on the active chain")]
	NativeWrappedUnresolved,
}

/// `toToken`, `path0` (token A side) and `path1` (token B side) of a zap-out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZapOutRoute {
	pub to: Address,
	pub path0: Vec<Address>,
	pub path1: Vec<Address>,
}

impl ZapOutRoute {
	/// Build the route for `payout`. An empty path means that side is paid
	/// out without a swap.
	pub fn resolve(
		payout: PayoutType,
		lp_token: &ResolvedLpToken,
		router: &Router,
		native_wrapped: Option<Address>,
	) -> Result<Self, RouteError> {
		let a = lp_token.token_a;
		let b = lp_token.token_b;
		match payout {
			PayoutType::TokenA => Ok(Self {
				to: a,
				path0: Vec::new(),
				path1: vec![b, a],
			}),
			PayoutType::TokenB => Ok(Self {
				to: b,
				path0: vec![a, b],
				path1: Vec::new(),
			}),
			PayoutType::NativeWrapped => {
				let wrapped = native_wrapped.ok_or(RouteError::NativeWrappedUnresolved)?;
				Ok(Self {
					to: wrapped,
					path0: path_via_hint(router, a, wrapped),
					path1: path_via_hint(router, b, wrapped),
				})
			},
			PayoutType::Both => Err(RouteError::PayoutUnavailable(payout)),
		}
	}
}

fn path_via_hint(router: &Router, from: Address, to: Address) -> Vec<Address> {
	match router.hop_for(&from) {
		Some(hop) => vec![from, hop, to],
		None => vec![from, to],
	}
}
