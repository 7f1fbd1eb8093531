//! Fixed-point token amounts
//!
//! Token amounts are carried as `U256` integers scaled by `10^decimals`.
//! Conversion to and from decimal text never goes through floating point.

pub mod errors;

pub use errors::{AmountError, AmountResult};

use alloy_primitives::{utils, U256};

/// Default number of fractional digits shown for token amounts
pub const TOKEN_AMOUNT_DISPLAY_DECIMALS: u8 = 6;

/// `value` as whole and full-precision fractional digits
///
/// Precisions above 77 cannot scale a `U256` and render as the bare integer.
fn render(value: U256, decimals: u8) -> (String, String) {
	match utils::format_units(value, decimals) {
		Ok(text) => match text.split_once('.') {
			Some((whole, fraction)) => (whole.to_string(), fraction.to_string()),
			None => (text, String::new()),
		},
		Err(_) => (value.to_string(), String::new()),
	}
}

/// Whole and fractional digits with insignificant zeros removed
fn significant<'a>(whole: &'a str, fraction: &'a str) -> (&'a str, &'a str) {
	(whole.trim_start_matches('0'), fraction.trim_end_matches('0'))
}

/// Parse a decimal string into its integer representation at `decimals` precision.
///
/// Accepts `12`, `12.5`, `.5` and `12.`. Trailing fractional zeros do not
/// count against the precision, so `1.500` parses at 2 decimals.
pub fn parse_units(input: &str, decimals: u8) -> AmountResult<U256> {
	let text = input.trim();
	let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));

	let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
	if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
	{
		return Err(AmountError::invalid(input));
	}

	let fraction = fraction.trim_end_matches('0');
	if fraction.len() > usize::from(decimals) {
		return Err(AmountError::ExceedsPrecision {
			input: input.to_string(),
			decimals,
		});
	}

	let whole = if whole.is_empty() { "0" } else { whole };
	let value = utils::parse_units(&format!("{}.{}", whole, fraction), decimals)
		.map_err(|_| AmountError::Overflow)?
		.get_absolute();

	// Scaling wraps past 256 bits, so the value must read back as the input
	let (read_whole, read_fraction) = render(value, decimals);
	if significant(&read_whole, &read_fraction) != significant(whole, fraction) {
		return Err(AmountError::Overflow);
	}
	Ok(value)
}

/// Like [`parse_units`], treating blank input as `"0"`
pub fn parse_units_or_zero(input: &str, decimals: u8) -> AmountResult<U256> {
	if input.trim().is_empty() {
		return Ok(U256::ZERO);
	}
	parse_units(input, decimals)
}

/// Full-precision decimal rendering, e.g. `1.0`, `0.000123`
pub fn format_units(value: U256, decimals: u8) -> String {
	let (whole, fraction) = render(value, decimals);
	let fraction = fraction.trim_end_matches('0');
	if fraction.is_empty() {
		format!("{}.0", whole)
	} else {
		format!("{}.{}", whole, fraction)
	}
}

/// Render with exactly `display_decimals` fractional digits, truncating
pub fn format_fixed(value: U256, display_decimals: u8, decimals: u8) -> String {
	let (whole, mut fraction) = render(value, decimals);
	let display = usize::from(display_decimals);
	if display == 0 {
		return whole;
	}

	if fraction.len() > display {
		fraction.truncate(display);
	} else {
		fraction.push_str(&"0".repeat(display - fraction.len()));
	}
	format!("{}.{}", whole, fraction)
}

/// `floor(amount * held / supply)`
pub fn proportional_share(amount: U256, held: U256, supply: U256) -> AmountResult<U256> {
	if supply.is_zero() {
		return Err(AmountError::ZeroSupply);
	}
	let product = amount.checked_mul(held).ok_or(AmountError::Overflow)?;
	Ok(product / supply)
}
