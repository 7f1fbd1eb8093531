//! Zap-out Configuration
//!
//! Settings, registry tables and startup logging for the zap-out client.

pub mod configurable_value;
pub mod loader;
pub mod settings;
pub mod startup_logger;

pub use configurable_value::{ConfigurableValue, ConfigurableValueError, ValueType};
pub use loader::{load_config, load_config_from};
pub use settings::{
	ConfigValidationError, LogFormat, LoggingSettings, RegistrySettings, Settings,
	DEFAULT_CHAIN_ID,
};
pub use startup_logger::{log_client_info, log_client_shutdown, log_registry_summary};
