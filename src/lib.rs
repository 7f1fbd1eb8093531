//! Zap-out Client Library
//!
//! Withdraw LP tokens through a zapper contract and receive a single token:
//! registry and settings, cached chain reads, estimates, selection and
//! transaction orchestration behind one form.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

// Core domain types
pub use zapout_types::{
	chrono,
	serde_json,
	Address,
	AmountError,
	ChainError,
	ChainId,
	// Boundary traits
	ChainReader,
	LpToken,
	MutationKind,
	MutationState,
	NotificationId,
	NotificationKind,
	Notifier,
	PayoutType,
	ReadKey,
	ReadState,
	Registry,
	RegistryError,
	Router,
	Token,
	TransactionSigner,
	TxReceipt,
	WalletContext,
	ZapOutCall,
	U256,
};

// Service layer
pub use zapout_service::{
	BalanceSnapshot, Estimate, EstimateError, Estimator, SelectionCoordinator, SelectionError,
	SelectionEvent, SnapshotReader, SubmitAction, SubmitOutcome, TransactionOrchestrator,
	ValidationError, ZapOutError, ZapOutForm,
};

// Cache and chain access
pub use zapout_cache::ReadCache;
pub use zapout_chain::RpcChainReader;

// Config
pub use zapout_config::{
	load_config, log_client_info, log_client_shutdown, log_registry_summary, LogFormat,
	LoggingSettings, Settings,
};

pub mod models {
	pub use zapout_types::*;
}

pub mod config {
	pub use zapout_config::*;
}

pub mod service {
	pub use zapout_service::*;
}

pub mod chain {
	pub use zapout_chain::*;
}

pub mod mocks;
pub mod notifier;
pub mod signer;

pub use notifier::TracingNotifier;
pub use signer::ReadOnlySigner;

#[derive(Debug, Error)]
pub enum BuildError {
	#[error("configuration error: {0}")]
	Config(#[from] zapout_config::ConfigValidationError),
	#[error("chain reader error: {0}")]
	Chain(#[from] ChainError),
	#[error("selection error: {0}")]
	Selection(#[from] SelectionError),
	#[error("no transaction signer configured")]
	MissingSigner,
}

/// Builder wiring settings and boundary implementations into a [`ZapOutForm`]
#[derive(Default)]
pub struct ZapOutBuilder {
	settings: Option<Settings>,
	registry: Option<Arc<Registry>>,
	reader: Option<Arc<dyn ChainReader>>,
	signer: Option<Arc<dyn TransactionSigner>>,
	notifier: Option<Arc<dyn Notifier>>,
	wallet: Option<WalletContext>,
	cache: Option<ReadCache>,
}

impl ZapOutBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Use `registry` instead of building one from the settings
	pub fn with_registry(mut self, registry: Arc<Registry>) -> Self {
		self.registry = Some(registry);
		self
	}

	/// Use `reader` instead of the JSON-RPC reader built from the settings
	pub fn with_reader(mut self, reader: Arc<dyn ChainReader>) -> Self {
		self.reader = Some(reader);
		self
	}

	pub fn with_signer(mut self, signer: Arc<dyn TransactionSigner>) -> Self {
		self.signer = Some(signer);
		self
	}

	/// Defaults to [`TracingNotifier`]
	pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
		self.notifier = Some(notifier);
		self
	}

	/// Defaults to the `wallet` section of the settings
	pub fn with_wallet(mut self, wallet: WalletContext) -> Self {
		self.wallet = Some(wallet);
		self
	}

	/// Share an existing cache between forms
	pub fn with_cache(mut self, cache: ReadCache) -> Self {
		self.cache = Some(cache);
		self
	}

	pub fn settings(&self) -> Option<&Settings> {
		self.settings.as_ref()
	}

	pub fn build(self) -> Result<ZapOutForm, BuildError> {
		let settings = self.settings.unwrap_or_default();

		let registry = match self.registry {
			Some(registry) => registry,
			None => Arc::new(settings.build_registry()?),
		};
		let reader: Arc<dyn ChainReader> = match self.reader {
			Some(reader) => reader,
			None => Arc::new(RpcChainReader::from_urls(
				&settings.rpc_endpoints()?,
				settings.rpc.timeout_ms,
			)?),
		};
		let signer = self.signer.ok_or(BuildError::MissingSigner)?;
		let notifier = self
			.notifier
			.unwrap_or_else(|| Arc::new(TracingNotifier));
		let wallet = match self.wallet {
			Some(wallet) => wallet,
			None => settings.wallet_context()?,
		};
		let cache = self.cache.unwrap_or_else(|| match settings.cache_max_age() {
			Some(max_age) => ReadCache::with_max_age(max_age),
			None => ReadCache::new(),
		});

		let readers = SnapshotReader::new(reader, cache);
		let orchestrator = Arc::new(TransactionOrchestrator::new(
			Arc::clone(&registry),
			readers.clone(),
			signer,
			notifier,
			settings.transactions.confirmations,
		));
		let estimator = Estimator::new(settings.display.token_amount_decimals);

		info!(
			"Zap-out form ready: {} routers, {} LP tokens, {} confirmation(s)",
			registry.routers_with_lp_tokens().len(),
			registry.lp_tokens().len(),
			settings.transactions.confirmations
		);

		Ok(ZapOutForm::new(
			registry,
			readers,
			estimator,
			orchestrator,
			wallet,
		)?)
	}
}

/// Initialize tracing from the `logging` settings
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(logging: &LoggingSettings) -> Result<(), Box<dyn std::error::Error>> {
	let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

	match logging.format {
		LogFormat::Json => {
			let subscriber = tracing_subscriber::fmt().json().with_env_filter(env_filter);
			if logging.structured {
				subscriber.with_target(true).with_thread_ids(true).try_init().map_err(|e| -> Box<dyn std::error::Error> { e })?;
			} else {
				subscriber.try_init().map_err(|e| -> Box<dyn std::error::Error> { e })?;
			}
		},
		LogFormat::Pretty => {
			let subscriber = tracing_subscriber::fmt()
				.pretty()
				.with_env_filter(env_filter);
			if logging.structured {
				subscriber.with_target(true).with_thread_ids(true).try_init().map_err(|e| -> Box<dyn std::error::Error> { e })?;
			} else {
				subscriber.try_init().map_err(|e| -> Box<dyn std::error::Error> { e })?;
			}
		},
		LogFormat::Compact => {
			let subscriber = tracing_subscriber::fmt()
				.compact()
				.with_env_filter(env_filter);
			if logging.structured {
				subscriber.with_target(true).with_thread_ids(true).try_init().map_err(|e| -> Box<dyn std::error::Error> { e })?;
			} else {
				subscriber.try_init().map_err(|e| -> Box<dyn std::error::Error> { e })?;
			}
		},
	}

	info!(
		"Logging configuration applied: level={}, format={:?}, structured={}",
		logging.level, logging.format, logging.structured
	);
	Ok(())
}
