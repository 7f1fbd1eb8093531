//! Values that may be given inline or read from an environment variable
//!
//! RPC endpoints frequently embed provider API keys, so they are configured
//! through this type and never printed in full.

use serde::{Deserialize, Serialize};
use std::{env, fmt};

/// Inline value or environment-variable reference
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ConfigurableValue {
	/// "env" reads the variable named by `value`, "plain" uses `value` as is
	#[serde(rename = "type")]
	pub value_type: ValueType,
	pub value: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
	Env,
	Plain,
}

impl ConfigurableValue {
	pub fn from_env(env_var_name: &str) -> Self {
		Self {
			value_type: ValueType::Env,
			value: env_var_name.to_string(),
		}
	}

	pub fn from_plain(plain_value: &str) -> Self {
		Self {
			value_type: ValueType::Plain,
			value: plain_value.to_string(),
		}
	}

	/// Resolved value with surrounding whitespace removed; blank values are errors
	pub fn resolve(&self) -> Result<String, ConfigurableValueError> {
		let resolved = match self.value_type {
			ValueType::Env => env::var(&self.value).map_err(|_| {
				ConfigurableValueError::EnvironmentVariableNotFound(self.value.clone())
			})?,
			ValueType::Plain => self.value.clone(),
		};
		match resolved.trim() {
			"" => Err(ConfigurableValueError::Blank(self.description())),
			trimmed => Ok(trimmed.to_string()),
		}
	}

	/// Where the value comes from, safe for logs
	pub fn description(&self) -> String {
		match self.value_type {
			ValueType::Env => format!("environment variable '{}'", self.value),
			ValueType::Plain => "configured plain value".to_string(),
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigurableValueError {
	#[error("Environment variable '{0}' not found")]
	EnvironmentVariableNotFound(String),
	#[error("Value from {0} is blank")]
	Blank(String),
}

// Plain values are redacted: endpoints carry API keys
impl fmt::Display for ConfigurableValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.value_type {
			ValueType::Env => write!(f, "env:{}", self.value),
			ValueType::Plain => write!(f, "plain:[REDACTED]"),
		}
	}
}

/// `env:NAME` references a variable, anything else is a plain value
impl From<&str> for ConfigurableValue {
	fn from(value: &str) -> Self {
		if let Some(env_var) = value.strip_prefix("env:") {
			Self::from_env(env_var)
		} else {
			Self::from_plain(value)
		}
	}
}

impl From<String> for ConfigurableValue {
	fn from(value: String) -> Self {
		ConfigurableValue::from(value.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_plain_value() {
		let endpoint = ConfigurableValue::from_plain("https://api.harmony.one");
		assert_eq!(endpoint.resolve().unwrap(), "https://api.harmony.one");
		assert_eq!(endpoint.to_string(), "plain:[REDACTED]");
	}

	#[test]
	fn test_env_value() {
		env::set_var("ZAPOUT_TEST_RPC_URL", "https://rpc.example.org/key");

		let endpoint = ConfigurableValue::from_env("ZAPOUT_TEST_RPC_URL");
		assert_eq!(endpoint.resolve().unwrap(), "https://rpc.example.org/key");
		assert_eq!(endpoint.to_string(), "env:ZAPOUT_TEST_RPC_URL");

		env::remove_var("ZAPOUT_TEST_RPC_URL");
	}

	#[test]
	fn test_env_value_not_found() {
		let endpoint = ConfigurableValue::from_env("ZAPOUT_NON_EXISTENT_VAR");
		assert!(matches!(
			endpoint.resolve(),
			Err(ConfigurableValueError::EnvironmentVariableNotFound(_))
		));
	}

	#[test]
	fn test_blank_value_rejected() {
		let endpoint = ConfigurableValue::from_plain("  ");
		assert!(matches!(
			endpoint.resolve(),
			Err(ConfigurableValueError::Blank(_))
		));
		let padded = ConfigurableValue::from_plain(" https://api.harmony.one\n");
		assert_eq!(padded.resolve().unwrap(), "https://api.harmony.one");
	}

	#[test]
	fn test_from_string_conversion() {
		let plain = ConfigurableValue::from("https://api.s0.t.hmny.io");
		assert_eq!(plain.value_type, ValueType::Plain);

		let env_ref = ConfigurableValue::from("env:HARMONY_RPC");
		assert_eq!(env_ref.value_type, ValueType::Env);
		assert_eq!(env_ref.value, "HARMONY_RPC");
		assert_eq!(env_ref.description(), "environment variable 'HARMONY_RPC'");
	}

	#[test]
	fn test_serde_shape() {
		let json = r#"{"type":"env","value":"HARMONY_RPC"}"#;
		let value: ConfigurableValue = serde_json::from_str(json).unwrap();
		assert_eq!(value, ConfigurableValue::from_env("HARMONY_RPC"));
	}
}
