//! Startup logging for the zap-out client

use std::env;
use tracing::info;
use zapout_types::{ChainId, Registry};

/// Logs client, platform and environment details at startup
pub fn log_client_info() {
	let client_name = "zapout";
	let client_version = env!("CARGO_PKG_VERSION");

	info!("=== Zap-out Client Starting ===");
	info!("🚀 Client: {} v{}", client_name, client_version);
	info!("💻 Platform: {} ({})", env::consts::OS, env::consts::ARCH);

	if let Ok(cwd) = env::current_dir() {
		info!("📁 Working Directory: {}", cwd.display());
	}

	if let Ok(rust_log) = env::var("RUST_LOG") {
		info!("🔧 Log Level: {}", rust_log);
	}

	info!(
		"🕒 Started at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Logs what the registry offers on the active chain
pub fn log_registry_summary(registry: &Registry, chain_id: ChainId) {
	let routers = registry.routers_with_lp_tokens();
	let lp_tokens = registry
		.lp_tokens()
		.iter()
		.filter(|lp| lp.address(chain_id).is_some())
		.count();

	info!("⛓️ Chain: {}", chain_id);
	info!(
		"📋 Registry: {} tokens, {} routers with LP tokens, {} LP tokens on this chain",
		registry.tokens().len(),
		routers.len(),
		lp_tokens
	);
	info!("💧 Native wrapped token: {}", registry.native_wrapped_symbol());
}

pub fn log_client_shutdown() {
	info!("🛑 Zap-out Client Shutting Down");
	info!(
		"🕒 Shutdown at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}
