//! Fixtures shared by the unit tests of this crate

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use zapout_types::{
	Address, AddressBook, ChainId, ChainReader, ChainResult, ContractRole, LpToken,
	NotificationId, NotificationKind, Notifier, Registry, ResolvedLpToken, Router, Token,
	TransactionSigner, TxHash, TxReceipt, ZapOutCall, U256,
};

pub const CHAIN: ChainId = ChainId(1666600000);

pub fn addr(byte: u8) -> Address {
	Address::repeat_byte(byte)
}

pub const WONE: u8 = 0x01;
pub const USDC: u8 = 0x02;
pub const ETH: u8 = 0x03;
pub const VIPER: u8 = 0x10;
pub const SUSHI: u8 = 0x11;
pub const EMPTY_ROUTER: u8 = 0x12;
pub const ETH_USDC_LP: u8 = 0x20;
pub const WONE_USDC_LP: u8 = 0x21;
pub const WONE_ETH_LP: u8 = 0x22;
pub const ZAPPER: u8 = 0x30;
pub const ACCOUNT: u8 = 0xaa;

fn book(byte: u8) -> AddressBook {
	AddressBook::new().with(CHAIN, addr(byte))
}

fn token(symbol: &str, decimals: u8, byte: u8) -> Token {
	Token::new(symbol, decimals, book(byte))
}

fn lp(symbol: &str, byte: u8, router: &str, a: Token, b: Token) -> LpToken {
	LpToken {
		symbol: symbol.to_string(),
		decimals: 18,
		addresses: book(byte),
		router: router.to_string(),
		token_a: a,
		token_b: b,
	}
}

/// ViperSwap: ETH-USDC, WONE-USDC. SushiSwap: WONE-ETH. EmptySwap: none.
pub fn registry() -> Arc<Registry> {
	let wone = token("WONE", 18, WONE);
	let usdc = token("USDC", 6, USDC);
	let eth = token("ETH", 18, ETH);

	let routers = vec![
		Router::new("EmptySwap", book(EMPTY_ROUTER)),
		Router::new("ViperSwap", book(VIPER)).with_path_hint(addr(ETH), addr(USDC)),
		Router::new("SushiSwap", book(SUSHI)),
	];
	let lp_tokens = vec![
		lp("ETH-USDC VLP", ETH_USDC_LP, "ViperSwap", eth.clone(), usdc.clone()),
		lp("WONE-USDC VLP", WONE_USDC_LP, "ViperSwap", wone.clone(), usdc.clone()),
		lp("WONE-ETH SLP", WONE_ETH_LP, "SushiSwap", wone.clone(), eth.clone()),
	];
	let contracts = HashMap::from([(ContractRole::Zapper, book(ZAPPER))]);

	Arc::new(
		Registry::new(vec![wone, usdc, eth], routers, lp_tokens, contracts, "WONE")
			.expect("fixture registry is valid"),
	)
}

pub fn resolved_lp() -> ResolvedLpToken {
	ResolvedLpToken {
		lp: addr(ETH_USDC_LP),
		token_a: addr(ETH),
		token_b: addr(USDC),
	}
}

/// Reader with fixed balances: LP balance 100, allowance 50, supply 1000,
/// reserve A 400, reserve B 300; quotes return a tenth of the input
#[derive(Debug, Default)]
pub struct StubReader {
	calls: AtomicUsize,
}

impl StubReader {
	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl ChainReader for StubReader {
	async fn balance_of(&self, _: ChainId, token: Address, holder: Address) -> ChainResult<U256> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		let value = if holder == addr(ACCOUNT) {
			100u64
		} else if token == addr(ETH) || token == addr(WONE) {
			400
		} else {
			300
		};
		Ok(U256::from(value))
	}

	async fn allowance(&self, _: ChainId, _: Address, _: Address, _: Address) -> ChainResult<U256> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		Ok(U256::from(50u64))
	}

	async fn total_supply(&self, _: ChainId, _: Address) -> ChainResult<U256> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		Ok(U256::from(1_000u64))
	}

	async fn get_amounts_out(
		&self,
		_: ChainId,
		_: Address,
		amount_in: U256,
		path: &[Address],
	) -> ChainResult<Vec<U256>> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		let mut amounts = vec![amount_in];
		amounts.extend(path.iter().skip(1).map(|_| amount_in / U256::from(10u64)));
		Ok(amounts)
	}
}

/// Signer whose broadcasts and confirmations succeed unless told otherwise
#[derive(Debug, Default)]
pub struct StubSigner {
	pub reject_broadcast: bool,
	pub revert: bool,
	pub zap_outs: Mutex<Vec<ZapOutCall>>,
	pub approvals: Mutex<Vec<(Address, Address, U256)>>,
}

#[async_trait]
impl TransactionSigner for StubSigner {
	async fn approve(
		&self,
		_: ChainId,
		token: Address,
		spender: Address,
		amount: U256,
	) -> ChainResult<TxHash> {
		if self.reject_broadcast {
			return Err(zapout_types::ChainError::Rejected);
		}
		self.approvals.lock().unwrap().push((token, spender, amount));
		Ok(TxHash::repeat_byte(0x0a))
	}

	async fn zap_out_token(&self, _: ChainId, _: Address, call: &ZapOutCall) -> ChainResult<TxHash> {
		if self.reject_broadcast {
			return Err(zapout_types::ChainError::Rejected);
		}
		self.zap_outs.lock().unwrap().push(call.clone());
		Ok(TxHash::repeat_byte(0x0b))
	}

	async fn wait_for_confirmation(
		&self,
		_: ChainId,
		hash: TxHash,
		_: u64,
	) -> ChainResult<TxReceipt> {
		Ok(TxReceipt {
			transaction_hash: hash,
			block_number: 7,
			success: !self.revert,
		})
	}
}

/// Notifier that records every call
#[derive(Debug, Default)]
pub struct RecordingNotifier {
	pub events: Mutex<Vec<(NotificationKind, String, Option<NotificationId>, NotificationId)>>,
}

impl RecordingNotifier {
	pub fn kinds(&self) -> Vec<NotificationKind> {
		self.events.lock().unwrap().iter().map(|e| e.0).collect()
	}
}

impl Notifier for RecordingNotifier {
	fn notify(
		&self,
		kind: NotificationKind,
		message: &str,
		replace: Option<NotificationId>,
	) -> NotificationId {
		let id = replace.unwrap_or_default();
		self.events
			.lock()
			.unwrap()
			.push((kind, message.to_string(), replace, id));
		id
	}
}
