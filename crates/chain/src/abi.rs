//! Contract bindings for the calls the client makes

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{sol, SolCall};
use zapout_types::{ChainError, ChainResult, ZapOutCall};

sol! {
	interface IERC20 {
		function balanceOf(address owner) external view returns (uint256);
		function allowance(address owner, address spender) external view returns (uint256);
		function totalSupply() external view returns (uint256);
		function approve(address spender, uint256 amount) external returns (bool);
	}

	interface IUniswapV2Router02 {
		function getAmountsOut(uint256 amount_in, address[] calldata path)
			external
			view
			returns (uint256[] memory amounts);
	}

	interface IZapper {
		function zapOutToken(
			address from_token,
			uint256 amount,
			address to_token,
			address router,
			address recipient,
			address[] calldata path0,
			address[] calldata path1
		) external;
	}
}

/// Decode the return data of `C`
pub fn decode_returns<C: SolCall>(data: &[u8]) -> ChainResult<C::Return> {
	C::abi_decode_returns(data, true).map_err(|e| ChainError::Decode {
		method: C::SIGNATURE.to_string(),
		reason: e.to_string(),
	})
}

/// `approve(spender, amount)` calldata, sent to the LP token
pub fn approve_calldata(spender: Address, amount: U256) -> Bytes {
	IERC20::approveCall { spender, amount }.abi_encode().into()
}

/// `zapOutToken(...)` calldata, sent to the zapper contract
pub fn zap_out_calldata(call: &ZapOutCall) -> Bytes {
	IZapper::zapOutTokenCall {
		from_token: call.from_token,
		amount: call.amount,
		to_token: call.to_token,
		router: call.router,
		recipient: call.recipient,
		path0: call.path0.clone(),
		path1: call.path1.clone(),
	}
	.abi_encode()
	.into()
}
