//! Configuration settings structures

use crate::configurable_value::{ConfigurableValue, ConfigurableValueError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;
use zapout_types::{
	Address, AddressBook, ChainId, ContractRole, LpToken, Registry, RegistryError, Router, Token,
	WalletContext, TOKEN_AMOUNT_DISPLAY_DECIMALS,
};

/// Harmony mainnet, shard 0
pub const DEFAULT_CHAIN_ID: u64 = 1666600000;

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Settings {
	#[serde(default)]
	pub wallet: WalletSettings,
	#[serde(default)]
	pub rpc: RpcSettings,
	#[serde(default)]
	pub display: DisplaySettings,
	#[serde(default)]
	pub transactions: TransactionSettings,
	#[serde(default)]
	pub cache: CacheSettings,
	#[serde(default)]
	pub logging: LoggingSettings,
	#[serde(default)]
	pub registry: RegistrySettings,
}

/// Read-only wallet identity used by the command-line client
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WalletSettings {
	pub chain_id: u64,
	/// Account to inspect; absent means "disconnected"
	pub account: Option<String>,
}

/// RPC endpoints keyed by chain ID
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RpcSettings {
	pub endpoints: HashMap<String, ConfigurableValue>,
	pub timeout_ms: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DisplaySettings {
	/// Fractional digits shown for token amounts
	pub token_amount_decimals: u8,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TransactionSettings {
	/// Confirmations awaited before a mutation counts as successful
	pub confirmations: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct CacheSettings {
	/// Refetch settled reads older than this; `None` keeps them until invalidated
	pub max_age_secs: Option<u64>,
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

/// Static token, router and contract tables
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RegistrySettings {
	/// Symbol of the chain's wrapped native token
	pub native_wrapped: String,
	#[serde(default)]
	pub tokens: Vec<TokenConfig>,
	#[serde(default)]
	pub routers: Vec<RouterConfig>,
	#[serde(default)]
	pub lp_tokens: Vec<LpTokenConfig>,
	#[serde(default)]
	pub contracts: ContractsConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenConfig {
	pub symbol: String,
	pub decimals: u8,
	/// Chain ID (as a string) → contract address
	pub addresses: HashMap<String, String>,
	pub logo: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RouterConfig {
	pub name: String,
	pub addresses: HashMap<String, String>,
	pub logo: Option<String>,
	#[serde(default)]
	pub path_hints: Vec<PathHintConfig>,
}

/// Swaps out of `from` go through `via` before reaching the native-wrapped token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PathHintConfig {
	pub from: String,
	pub via: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LpTokenConfig {
	pub symbol: String,
	pub decimals: u8,
	pub addresses: HashMap<String, String>,
	pub router: String,
	pub token_a: String,
	pub token_b: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ContractsConfig {
	#[serde(default)]
	pub zapper: HashMap<String, String>,
}

#[derive(Debug, Error)]
pub enum ConfigValidationError {
	#[error("Registry error: {0}")]
	Registry(#[from] RegistryError),

	#[error("Configuration value error: {0}")]
	Value(#[from] ConfigurableValueError),

	#[error("Invalid {field}: '{value}'")]
	InvalidField { field: String, value: String },
}

impl Default for WalletSettings {
	fn default() -> Self {
		Self {
			chain_id: DEFAULT_CHAIN_ID,
			account: None,
		}
	}
}

impl Default for RpcSettings {
	fn default() -> Self {
		Self {
			endpoints: HashMap::from([(
				DEFAULT_CHAIN_ID.to_string(),
				ConfigurableValue::from_plain("https://api.harmony.one"),
			)]),
			timeout_ms: 10_000,
		}
	}
}

impl Default for DisplaySettings {
	fn default() -> Self {
		Self {
			token_amount_decimals: TOKEN_AMOUNT_DISPLAY_DECIMALS,
		}
	}
}

impl Default for TransactionSettings {
	fn default() -> Self {
		Self { confirmations: 1 }
	}
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Pretty,
			structured: false,
		}
	}
}

impl Default for RegistrySettings {
	fn default() -> Self {
		Self {
			native_wrapped: "WONE".to_string(),
			tokens: Vec::new(),
			routers: Vec::new(),
			lp_tokens: Vec::new(),
			contracts: ContractsConfig::default(),
		}
	}
}

fn parse_address(field: &str, value: &str) -> Result<Address, RegistryError> {
	Address::from_str(value.trim()).map_err(|_| RegistryError::InvalidAddress {
		field: field.to_string(),
		value: value.to_string(),
	})
}

fn parse_chain_id(field: &str, value: &str) -> Result<ChainId, RegistryError> {
	value
		.trim()
		.parse::<u64>()
		.map(ChainId::new)
		.map_err(|_| RegistryError::InvalidChainId {
			field: field.to_string(),
			value: value.to_string(),
		})
}

fn parse_address_book(
	field: &str,
	addresses: &HashMap<String, String>,
) -> Result<AddressBook, RegistryError> {
	addresses
		.iter()
		.map(|(chain_id, address)| {
			Ok((
				parse_chain_id(field, chain_id)?,
				parse_address(field, address)?,
			))
		})
		.collect()
}

impl TokenConfig {
	fn to_token(&self) -> Result<Token, RegistryError> {
		let field = format!("token {}", self.symbol);
		Ok(Token {
			symbol: self.symbol.clone(),
			decimals: self.decimals,
			addresses: parse_address_book(&field, &self.addresses)?,
			logo: self.logo.clone(),
		})
	}
}

impl RouterConfig {
	fn to_router(&self) -> Result<Router, RegistryError> {
		let field = format!("router {}", self.name);
		let mut router = Router::new(
			self.name.clone(),
			parse_address_book(&field, &self.addresses)?,
		);
		router.logo = self.logo.clone();
		for hint in &self.path_hints {
			router = router.with_path_hint(
				parse_address(&field, &hint.from)?,
				parse_address(&field, &hint.via)?,
			);
		}
		Ok(router)
	}
}

impl Settings {
	/// Resolve and validate the registry tables
	pub fn build_registry(&self) -> Result<Registry, ConfigValidationError> {
		let registry = &self.registry;
		let tokens = registry
			.tokens
			.iter()
			.map(TokenConfig::to_token)
			.collect::<Result<Vec<_>, _>>()?;
		let routers = registry
			.routers
			.iter()
			.map(RouterConfig::to_router)
			.collect::<Result<Vec<_>, _>>()?;

		let find_token = |symbol: &str| {
			tokens
				.iter()
				.find(|t| t.symbol == symbol)
				.cloned()
				.ok_or_else(|| RegistryError::UnknownToken {
					symbol: symbol.to_string(),
				})
		};

		let mut lp_tokens = Vec::with_capacity(registry.lp_tokens.len());
		for lp in &registry.lp_tokens {
			lp_tokens.push(LpToken {
				symbol: lp.symbol.clone(),
				decimals: lp.decimals,
				addresses: parse_address_book(&format!("LP token {}", lp.symbol), &lp.addresses)?,
				router: lp.router.clone(),
				token_a: find_token(&lp.token_a)?,
				token_b: find_token(&lp.token_b)?,
			});
		}

		let contracts = HashMap::from([(
			ContractRole::Zapper,
			parse_address_book("zapper contract", &registry.contracts.zapper)?,
		)]);

		Ok(Registry::new(
			tokens,
			routers,
			lp_tokens,
			contracts,
			registry.native_wrapped.clone(),
		)?)
	}

	/// RPC endpoints with environment references resolved
	pub fn rpc_endpoints(&self) -> Result<HashMap<ChainId, String>, ConfigValidationError> {
		let mut endpoints = HashMap::new();
		for (chain_id, endpoint) in &self.rpc.endpoints {
			let chain_id = parse_chain_id("rpc endpoint", chain_id)?;
			endpoints.insert(chain_id, endpoint.resolve()?);
		}
		Ok(endpoints)
	}

	/// Wallet context described by the `wallet` section
	pub fn wallet_context(&self) -> Result<WalletContext, ConfigValidationError> {
		let chain_id = ChainId::new(self.wallet.chain_id);
		match &self.wallet.account {
			Some(account) => {
				let account = Address::from_str(account.trim()).map_err(|_| {
					ConfigValidationError::InvalidField {
						field: "wallet.account".to_string(),
						value: account.clone(),
					}
				})?;
				Ok(WalletContext::connected(chain_id, account))
			},
			None => Ok(WalletContext {
				chain_id: Some(chain_id),
				account: None,
			}),
		}
	}

	pub fn cache_max_age(&self) -> Option<std::time::Duration> {
		self.cache
			.max_age_secs
			.map(std::time::Duration::from_secs)
	}
}
