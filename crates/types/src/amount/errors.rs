//! Error types for fixed-point amount handling

use thiserror::Error;

/// Errors raised while parsing or combining token amounts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
	#[error("Invalid amount: '{input}' is not a non-negative decimal number")]
	InvalidAmount { input: String },

	#[error("Invalid amount: '{input}' has more than {decimals} fractional digits")]
	ExceedsPrecision { input: String, decimals: u8 },

	#[error("Amount overflows 256 bits")]
	Overflow,

	#[error("Total supply is zero")]
	ZeroSupply,
}

impl AmountError {
	pub(crate) fn invalid(input: &str) -> Self {
		Self::InvalidAmount {
			input: input.to_string(),
		}
	}
}

pub type AmountResult<T> = Result<T, AmountError>;
