//! Expected payout of a zap-out
//!
//! An estimate is computed in two steps. [`Estimator::plan`] derives the
//! proportional shares from the snapshot and decides whether a router quote
//! is needed; [`Estimator::complete`] adds the quoted swap-out amount. Both
//! report [`Estimate::Loading`] until every input has settled, so a missing
//! read never turns into a zero.

use thiserror::Error;
use tracing::debug;
use zapout_types::{
	format_fixed, parse_units_or_zero, proportional_share, Address, AmountError, ChainError,
	ChainId, LpToken, PayoutType, ReadState, U256,
};

use crate::readers::{BalanceSnapshot, SnapshotReader};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimateError {
	#[error("invariant violation: {0}")]
	InvariantViolation(String),
	#[error(transparent)]
	Amount(#[from] AmountError),
	#[error("read failed: {0}")]
	Read(#[from] ChainError),
}

/// What the form shows under "You receive"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Estimate {
	Loading,
	/// Payout type with no estimate, shown as `-`
	NotEstimated,
	Ready {
		amount: U256,
		/// Decimals of the payout token
		decimals: u8,
		label: String,
	},
}

impl Estimate {
	pub fn label(&self) -> &str {
		match self {
			Estimate::Loading => "Loading...",
			Estimate::NotEstimated => "-",
			Estimate::Ready { label, .. } => label,
		}
	}
}

/// Inputs of one estimate, owned so it can outlive the form borrow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimateRequest {
	pub chain_id: ChainId,
	pub lp_token: Option<LpToken>,
	/// Router of the LP token on `chain_id`, used for quotes. Always the LP
	/// token's owning router, which equals the displayed router by construction.
	pub router: Option<Address>,
	pub payout: PayoutType,
	pub amount_text: String,
}

/// Outcome of the first estimation step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EstimatePlan {
	/// Some dependency is still loading
	Pending,
	NotEstimated,
	/// Target share only, nothing to swap
	Direct { share: U256, decimals: u8 },
	/// Target share plus the quote for swapping the other side's share
	Swap {
		share: U256,
		decimals: u8,
		router: Address,
		amount_in: U256,
		path: Vec<Address>,
	},
}

fn settled(state: &ReadState<U256>) -> Result<Option<U256>, EstimateError> {
	match state {
		ReadState::NotRequested | ReadState::Loading => Ok(None),
		ReadState::Ready(value) => Ok(Some(*value)),
		ReadState::Error(error) => Err(EstimateError::Read(error.clone())),
	}
}

#[derive(Debug, Clone)]
pub struct Estimator {
	display_decimals: u8,
}

impl Estimator {
	pub fn new(display_decimals: u8) -> Self {
		Self { display_decimals }
	}

	pub fn display_decimals(&self) -> u8 {
		self.display_decimals
	}

	/// Compute shares and decide whether a quote is required
	pub fn plan(
		&self,
		request: &EstimateRequest,
		snapshot: &BalanceSnapshot,
	) -> Result<EstimatePlan, EstimateError> {
		let lp_token = request.lp_token.as_ref().ok_or_else(|| {
			EstimateError::InvariantViolation("estimate requested without an LP token".into())
		})?;

		let (token_a, token_b) = (&lp_token.token_a, &lp_token.token_b);
		let (target, other) = match request.payout {
			PayoutType::NativeWrapped | PayoutType::Both => return Ok(EstimatePlan::NotEstimated),
			PayoutType::TokenA => (token_a, token_b),
			PayoutType::TokenB => (token_b, token_a),
		};

		let supply = settled(&snapshot.total_supply)?;
		let reserve_a = settled(&snapshot.reserve_a)?;
		let reserve_b = settled(&snapshot.reserve_b)?;
		let (Some(supply), Some(reserve_a), Some(reserve_b)) = (supply, reserve_a, reserve_b) else {
			return Ok(EstimatePlan::Pending);
		};

		let amount = parse_units_or_zero(&request.amount_text, lp_token.decimals)?;
		let share_a = proportional_share(amount, reserve_a, supply)?;
		let share_b = proportional_share(amount, reserve_b, supply)?;
		let (share, other_share) = match request.payout {
			PayoutType::TokenB => (share_b, share_a),
			_ => (share_a, share_b),
		};

		if other_share.is_zero() {
			return Ok(EstimatePlan::Direct {
				share,
				decimals: target.decimals,
			});
		}

		let unresolved = |symbol: &str| {
			EstimateError::InvariantViolation(format!(
				"{} has no address on chain {}",
				symbol, request.chain_id
			))
		};
		let router = request.router.ok_or_else(|| unresolved(&lp_token.router))?;
		let from = other
			.address(request.chain_id)
			.ok_or_else(|| unresolved(&other.symbol))?;
		let to = target
			.address(request.chain_id)
			.ok_or_else(|| unresolved(&target.symbol))?;

		Ok(EstimatePlan::Swap {
			share,
			decimals: target.decimals,
			router,
			amount_in: other_share,
			path: vec![from, to],
		})
	}

	/// Combine a plan with the quote it asked for
	pub fn complete(
		&self,
		plan: EstimatePlan,
		quote: Option<ReadState<Vec<U256>>>,
	) -> Result<Estimate, EstimateError> {
		let (share, decimals, swapped) = match plan {
			EstimatePlan::Pending => return Ok(Estimate::Loading),
			EstimatePlan::NotEstimated => return Ok(Estimate::NotEstimated),
			EstimatePlan::Direct { share, decimals } => (share, decimals, U256::ZERO),
			EstimatePlan::Swap { share, decimals, .. } => {
				let amounts = match quote {
					None | Some(ReadState::NotRequested) | Some(ReadState::Loading) => {
						return Ok(Estimate::Loading)
					},
					Some(ReadState::Error(error)) => return Err(EstimateError::Read(error)),
					Some(ReadState::Ready(amounts)) => amounts,
				};
				let swapped = amounts.last().copied().ok_or_else(|| {
					EstimateError::Read(ChainError::Decode {
						method: "getAmountsOut".to_string(),
						reason: "empty amounts list".to_string(),
					})
				})?;
				(share, decimals, swapped)
			},
		};

		let amount = share.checked_add(swapped).ok_or(AmountError::Overflow)?;
		Ok(Estimate::Ready {
			amount,
			decimals,
			label: format_fixed(amount, self.display_decimals, decimals),
		})
	}

	/// Plan, fetch the quote when needed, and complete
	pub async fn estimate(
		&self,
		readers: &SnapshotReader,
		request: &EstimateRequest,
		snapshot: &BalanceSnapshot,
	) -> Result<Estimate, EstimateError> {
		let plan = self.plan(request, snapshot)?;
		let quote = match &plan {
			EstimatePlan::Swap {
				router,
				amount_in,
				path,
				..
			} => {
				debug!(
					"Quoting {} along {} hops on router {}",
					amount_in,
					path.len(),
					router
				);
				Some(
					readers
						.amounts_out(request.chain_id, *router, *amount_in, path.clone())
						.await,
				)
			},
			_ => None,
		};
		self.complete(plan, quote)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_support::{addr, registry, StubReader, CHAIN, ETH, USDC, VIPER};
	use std::sync::Arc;
	use zapout_cache::ReadCache;

	fn request(payout: PayoutType, amount: &str) -> EstimateRequest {
		EstimateRequest {
			chain_id: CHAIN,
			lp_token: registry().lp_token("ETH-USDC VLP").ok().cloned(),
			router: Some(addr(VIPER)),
			payout,
			amount_text: amount.to_string(),
		}
	}

	fn snapshot(supply: u64, reserve_a: u64, reserve_b: u64) -> BalanceSnapshot {
		BalanceSnapshot {
			lp_balance: ReadState::Ready(U256::ZERO),
			allowance: ReadState::Ready(U256::ZERO),
			total_supply: ReadState::Ready(U256::from(supply)),
			reserve_a: ReadState::Ready(U256::from(reserve_a)),
			reserve_b: ReadState::Ready(U256::from(reserve_b)),
		}
	}

	// 1e-16 LP of an 18-decimal token is 100 base units
	const HUNDRED_UNITS: &str = "0.0000000000000001";

	#[test]
	fn test_share_plus_quote() {
		let estimator = Estimator::new(6);
		let plan = estimator
			.plan(&request(PayoutType::TokenA, HUNDRED_UNITS), &snapshot(1_000, 400, 300))
			.unwrap();
		let EstimatePlan::Swap {
			share,
			amount_in,
			ref path,
			..
		} = plan
		else {
			panic!("expected a swap plan, got {:?}", plan);
		};
		assert_eq!(share, U256::from(40u64));
		assert_eq!(amount_in, U256::from(30u64));
		assert_eq!(path, &vec![addr(USDC), addr(ETH)]);

		let quote = ReadState::Ready(vec![U256::from(30u64), U256::from(10u64)]);
		let estimate = estimator.complete(plan, Some(quote)).unwrap();
		assert_eq!(
			estimate,
			Estimate::Ready {
				amount: U256::from(50u64),
				decimals: 18,
				label: "0.000000".to_string(),
			}
		);
	}

	#[test]
	fn test_label_uses_target_decimals() {
		let estimator = Estimator::new(6);
		// USDC has 6 decimals: 1.5 USDC share, nothing on the other side
		let plan = estimator
			.plan(&request(PayoutType::TokenB, "1"), &snapshot(1_000_000_000_000_000_000, 0, 1_500_000))
			.unwrap();
		assert_eq!(
			plan,
			EstimatePlan::Direct {
				share: U256::from(1_500_000u64),
				decimals: 6
			}
		);
		assert_eq!(estimator.complete(plan, None).unwrap().label(), "1.500000");
	}

	#[test]
	fn test_no_quote_for_zero_other_share() {
		let estimator = Estimator::new(6);
		let plan = estimator
			.plan(&request(PayoutType::TokenA, ""), &snapshot(1_000, 400, 300))
			.unwrap();
		assert_eq!(
			plan,
			EstimatePlan::Direct {
				share: U256::ZERO,
				decimals: 18
			}
		);
	}

	#[test]
	fn test_loading_never_reports_zero() {
		let estimator = Estimator::new(6);
		let mut loading = snapshot(1_000, 400, 300);
		loading.reserve_b = ReadState::Loading;
		let plan = estimator
			.plan(&request(PayoutType::TokenA, "1"), &loading)
			.unwrap();
		assert_eq!(plan, EstimatePlan::Pending);
		assert_eq!(estimator.complete(plan, None).unwrap(), Estimate::Loading);

		let swap = estimator
			.plan(&request(PayoutType::TokenA, HUNDRED_UNITS), &snapshot(1_000, 400, 300))
			.unwrap();
		assert_eq!(
			estimator.complete(swap, Some(ReadState::Loading)).unwrap(),
			Estimate::Loading
		);
	}

	#[test]
	fn test_native_wrapped_is_not_estimated() {
		let estimator = Estimator::new(6);
		let plan = estimator
			.plan(&request(PayoutType::NativeWrapped, "1"), &BalanceSnapshot::default())
			.unwrap();
		let estimate = estimator.complete(plan, None).unwrap();
		assert_eq!(estimate, Estimate::NotEstimated);
		assert_eq!(estimate.label(), "-");
	}

	#[test]
	fn test_failures_surface() {
		let estimator = Estimator::new(6);

		let mut missing = request(PayoutType::TokenA, "1");
		missing.lp_token = None;
		assert!(matches!(
			estimator.plan(&missing, &snapshot(1, 1, 1)),
			Err(EstimateError::InvariantViolation(_))
		));

		let mut failed = snapshot(1_000, 400, 300);
		failed.total_supply = ReadState::Error(ChainError::Rejected);
		assert_eq!(
			estimator.plan(&request(PayoutType::TokenA, "1"), &failed),
			Err(EstimateError::Read(ChainError::Rejected))
		);

		assert!(matches!(
			estimator.plan(&request(PayoutType::TokenA, "abc"), &snapshot(1_000, 400, 300)),
			Err(EstimateError::Amount(AmountError::InvalidAmount { .. }))
		));

		assert_eq!(
			estimator.plan(&request(PayoutType::TokenA, "1"), &snapshot(0, 0, 0)),
			Err(EstimateError::Amount(AmountError::ZeroSupply))
		);
	}

	#[tokio::test]
	async fn test_estimate_fetches_quote_through_cache() {
		let stub = Arc::new(StubReader::default());
		let readers = SnapshotReader::new(stub.clone(), ReadCache::new());
		let estimator = Estimator::new(6);
		let request = request(PayoutType::TokenA, HUNDRED_UNITS);

		let estimate = estimator
			.estimate(&readers, &request, &snapshot(1_000, 400, 300))
			.await
			.unwrap();
		// 40 direct + 30 / 10 quoted
		assert!(matches!(estimate, Estimate::Ready { amount, .. } if amount == U256::from(43u64)));
		assert_eq!(stub.calls(), 1);

		estimator
			.estimate(&readers, &request, &snapshot(1_000, 400, 300))
			.await
			.unwrap();
		assert_eq!(stub.calls(), 1);
	}
}
