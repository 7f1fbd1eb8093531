//! Test addresses, chain fixtures and a fully wired form

use std::sync::Arc;

use zapout::mocks::{MockChainReader, MockSigner, RecordingNotifier};
use zapout::models::{parse_units, ChainId, WalletContext};
use zapout::{Address, ZapOutBuilder, ZapOutForm, U256};

use super::configs::MockConfigs;

pub const CHAIN_ID: u64 = 1666600000;

pub const WONE: &str = "0x1000000000000000000000000000000000000001";
pub const USDC: &str = "0x1000000000000000000000000000000000000002";
pub const ETH: &str = "0x1000000000000000000000000000000000000003";
pub const VIPER: &str = "0x2000000000000000000000000000000000000001";
pub const SUSHI: &str = "0x2000000000000000000000000000000000000002";
pub const ETH_USDC_LP: &str = "0x3000000000000000000000000000000000000001";
pub const WONE_USDC_LP: &str = "0x3000000000000000000000000000000000000002";
pub const WONE_ETH_LP: &str = "0x3000000000000000000000000000000000000003";
pub const ZAPPER: &str = "0x4000000000000000000000000000000000000001";
pub const ACCOUNT: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

/// Entity helpers for tests
#[allow(dead_code)]
pub struct MockEntities;

#[allow(dead_code)]
impl MockEntities {
	pub fn address(hex: &str) -> Address {
		hex.parse().unwrap()
	}

	pub fn chain_id() -> ChainId {
		ChainId::new(CHAIN_ID)
	}

	pub fn account() -> Address {
		Self::address(ACCOUNT)
	}

	pub fn wallet() -> WalletContext {
		WalletContext::connected(Self::chain_id(), Self::account())
	}

	pub fn units(text: &str, decimals: u8) -> U256 {
		parse_units(text, decimals).unwrap()
	}

	/// ETH-USDC pool holding 400 ETH and 300 USDC against 1000 LP tokens,
	/// with the given LP balance and allowance for the test account
	pub fn eth_usdc_chain(balance: &str, allowance: &str) -> MockChainReader {
		let lp = Self::address(ETH_USDC_LP);
		MockChainReader::new()
			.with_balance(lp, Self::account(), Self::units(balance, 18))
			.with_allowance(
				lp,
				Self::account(),
				Self::address(ZAPPER),
				Self::units(allowance, 18),
			)
			.with_total_supply(lp, Self::units("1000", 18))
			.with_balance(Self::address(ETH), lp, Self::units("400", 18))
			.with_balance(Self::address(USDC), lp, Self::units("300", 6))
	}
}

/// Form wired to mock boundaries, keeping handles to each of them
#[allow(dead_code)]
pub struct TestForm {
	pub form: ZapOutForm,
	pub chain: Arc<MockChainReader>,
	pub signer: Arc<MockSigner>,
	pub notifier: Arc<RecordingNotifier>,
}

#[allow(dead_code)]
impl TestForm {
	/// Approvals made through the signer raise the allowance on `chain`
	pub fn new(chain: MockChainReader) -> Self {
		let chain = Arc::new(chain);
		let signer = Arc::new(MockSigner::new().with_chain(chain.clone(), MockEntities::account()));
		let notifier = Arc::new(RecordingNotifier::new());

		let form = ZapOutBuilder::new()
			.with_settings(MockConfigs::test_settings())
			.with_reader(chain.clone())
			.with_signer(signer.clone())
			.with_notifier(notifier.clone())
			.build()
			.expect("form should build from test settings");

		Self {
			form,
			chain,
			signer,
			notifier,
		}
	}

	/// Build and settle the first refresh
	pub async fn refreshed(chain: MockChainReader) -> Self {
		let mut test = Self::new(chain);
		assert!(test.form.refresh().await);
		test
	}
}
