//! Configuration loading utilities

use crate::Settings;
use config::{Config, ConfigError, Environment, File};

/// Load `config/config.*` with `ZAPOUT__SECTION__KEY` environment overrides
pub fn load_config() -> Result<Settings, ConfigError> {
	load_config_from("config/config")
}

pub fn load_config_from(path: &str) -> Result<Settings, ConfigError> {
	let s = Config::builder()
		.add_source(File::with_name(path).required(false))
		.add_source(
			Environment::with_prefix("ZAPOUT")
				.prefix_separator("__")
				.separator("__"),
		)
		.build()?;

	s.try_deserialize()
}
