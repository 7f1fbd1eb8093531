//! Configuration mocks and builders for tests

use std::collections::HashMap;

use zapout::config::settings::*;
use zapout::config::ConfigurableValue;

use super::entities::*;

fn book(address: &str) -> HashMap<String, String> {
	HashMap::from([(CHAIN_ID.to_string(), address.to_string())])
}

fn token(symbol: &str, decimals: u8, address: &str) -> TokenConfig {
	TokenConfig {
		symbol: symbol.to_string(),
		decimals,
		addresses: book(address),
		logo: None,
	}
}

fn lp_token(symbol: &str, address: &str, router: &str, token_a: &str, token_b: &str) -> LpTokenConfig {
	LpTokenConfig {
		symbol: symbol.to_string(),
		decimals: 18,
		addresses: book(address),
		router: router.to_string(),
		token_a: token_a.to_string(),
		token_b: token_b.to_string(),
	}
}

/// Configuration builders for tests
#[allow(dead_code)]
pub struct MockConfigs;

#[allow(dead_code)]
impl MockConfigs {
	/// Two routers on Harmony with three LP tokens and a connected account
	pub fn test_settings() -> Settings {
		Settings {
			wallet: WalletSettings {
				chain_id: CHAIN_ID,
				account: Some(ACCOUNT.to_string()),
			},
			rpc: RpcSettings {
				endpoints: HashMap::from([(
					CHAIN_ID.to_string(),
					ConfigurableValue::from_plain("http://127.0.0.1:9500"),
				)]),
				timeout_ms: 2000, // Short timeout for testing
			},
			display: DisplaySettings {
				token_amount_decimals: 6,
			},
			transactions: TransactionSettings { confirmations: 1 },
			cache: CacheSettings { max_age_secs: None },
			logging: LoggingSettings {
				level: "debug".to_string(),
				format: LogFormat::Compact,
				structured: false,
			},
			registry: RegistrySettings {
				native_wrapped: "WONE".to_string(),
				tokens: vec![
					token("WONE", 18, WONE),
					token("USDC", 6, USDC),
					token("ETH", 18, ETH),
				],
				routers: vec![
					RouterConfig {
						name: "ViperSwap".to_string(),
						addresses: book(VIPER),
						logo: None,
						path_hints: vec![PathHintConfig {
							from: ETH.to_string(),
							via: USDC.to_string(),
						}],
					},
					RouterConfig {
						name: "SushiSwap".to_string(),
						addresses: book(SUSHI),
						logo: None,
						path_hints: Vec::new(),
					},
				],
				lp_tokens: vec![
					lp_token("ETH-USDC VLP", ETH_USDC_LP, "ViperSwap", "ETH", "USDC"),
					lp_token("WONE-USDC VLP", WONE_USDC_LP, "ViperSwap", "WONE", "USDC"),
					lp_token("WONE-ETH SLP", WONE_ETH_LP, "SushiSwap", "WONE", "ETH"),
				],
				contracts: ContractsConfig {
					zapper: book(ZAPPER),
				},
			},
		}
	}

	/// Settings whose wallet section names no account
	pub fn test_settings_disconnected() -> Settings {
		let mut settings = Self::test_settings();
		settings.wallet.account = None;
		settings
	}
}
