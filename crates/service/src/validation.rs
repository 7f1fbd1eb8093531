//! Pre-submit amount validation

use thiserror::Error;
use zapout_types::{parse_units, U256};

/// Field-level failures; the messages are shown inline under the amount input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
	#[error("This field is required!")]
	Required,
	#[error("Invalid amount!")]
	InvalidAmount,
	#[error("Must be less than your LP balance!")]
	ExceedsBalance,
	#[error("Must be less than allowance!")]
	ExceedsAllowance,
	#[error("Must be greater than zero!")]
	NotPositive,
}

/// Validate the withdrawal amount, returning its integer value
///
/// Unapproved forms submit an approval, which takes no amount, so nothing is
/// checked and `Ok(None)` is returned. Otherwise the first failing rule wins:
/// parse, balance, allowance, positivity.
pub fn validate_amount(
	text: &str,
	decimals: u8,
	approved: bool,
	balance: U256,
	allowance: U256,
) -> Result<Option<U256>, ValidationError> {
	if !approved {
		return Ok(None);
	}
	if text.trim().is_empty() {
		return Err(ValidationError::Required);
	}

	let amount = parse_units(text, decimals).map_err(|_| ValidationError::InvalidAmount)?;
	if amount > balance {
		return Err(ValidationError::ExceedsBalance);
	}
	if amount > allowance {
		return Err(ValidationError::ExceedsAllowance);
	}
	if amount.is_zero() {
		return Err(ValidationError::NotPositive);
	}
	Ok(Some(amount))
}
