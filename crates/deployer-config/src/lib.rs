//! Configuration module for the deployment runner.
//!
//! Configuration is loaded from a TOML file (`deployer.toml` by convention),
//! with environment variables resolved in the raw text before parsing.
//! Structural validation runs immediately after parsing so that a broken
//! file fails at startup rather than mid-run; implementation-specific
//! tables are validated later by each implementation's own schema.

use deployer_types::NetworksConfig;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Keep the message without the input dump
		ConfigError::Parse(err.message().to_string())
	}
}

/// Top-level configuration for the deployment runner.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Settings for the task runner itself.
	pub runner: RunnerConfig,
	/// Networks deployments can target, keyed by name.
	pub networks: NetworksConfig,
	/// Configuration for named-account resolution.
	pub accounts: AccountsConfig,
	/// Configuration for contract deployment backends.
	pub deployments: DeploymentsConfig,
}

/// Settings for the task runner.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunnerConfig {
	/// Name of the network to deploy to. The CLI may override this.
	pub network: String,
	/// Confirmations to wait for before a deployment counts as final.
	#[serde(default = "default_min_confirmations")]
	pub min_confirmations: u64,
}

fn default_min_confirmations() -> u64 {
	1
}

/// Configuration for named-account resolution.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccountsConfig {
	/// Which implementation to use as primary.
	pub primary: String,
	/// Map of accounts implementation names to their configurations.
	pub implementations: HashMap<String, toml::Value>,
}

/// Configuration for deployment backends.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeploymentsConfig {
	/// Which implementation to use as primary.
	pub primary: String,
	/// Map of deployment implementation names to their configurations.
	pub implementations: HashMap<String, toml::Value>,
}

/// Resolves environment variables in a string.
///
/// Replaces `${VAR_NAME}` with the value of the environment variable
/// VAR_NAME. Supports default values with `${VAR_NAME:-default_value}`.
///
/// Input strings are limited to 1MB to prevent ReDoS attacks.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {e}")))?;

	let mut result = input.to_string();
	let mut replacements = Vec::new();

	for cap in re.captures_iter(input) {
		let full_match = cap.get(0).unwrap();
		let var_name = cap.get(1).unwrap().as_str();
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name) {
			Ok(v) => v,
			Err(_) => {
				if let Some(default) = default_value {
					default.to_string()
				} else {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{var_name}' not found"
					)));
				}
			},
		};

		replacements.push((full_match.start(), full_match.end(), value));
	}

	// Apply replacements in reverse order to maintain positions
	for (start, end, value) in replacements.iter().rev() {
		result.replace_range(start..end, value);
	}

	Ok(result)
}

impl Config {
	/// Loads and validates configuration from a TOML file.
	pub fn from_file(path: &str) -> Result<Self, ConfigError> {
		let contents = std::fs::read_to_string(path)?;
		contents.parse()
	}

	/// Validates the configuration structure.
	///
	/// Checks that at least one network is configured with an HTTP RPC URL,
	/// that the runner's target network exists, and that every `primary`
	/// reference points at a configured implementation table.
	fn validate(&self) -> Result<(), ConfigError> {
		if self.networks.is_empty() {
			return Err(ConfigError::Validation(
				"Networks configuration cannot be empty".into(),
			));
		}
		for (name, network) in &self.networks {
			if network.get_http_url().is_none() {
				return Err(ConfigError::Validation(format!(
					"Network '{name}' must have an HTTP RPC URL"
				)));
			}
		}

		if self.runner.network.is_empty() {
			return Err(ConfigError::Validation(
				"Runner network cannot be empty".into(),
			));
		}
		if !self.networks.contains_key(&self.runner.network) {
			return Err(ConfigError::Validation(format!(
				"Runner network '{}' not found in networks",
				self.runner.network
			)));
		}

		if self.runner.min_confirmations == 0 {
			return Err(ConfigError::Validation(
				"min_confirmations must be at least 1".into(),
			));
		}
		if self.runner.min_confirmations > 100 {
			return Err(ConfigError::Validation(
				"min_confirmations cannot exceed 100".into(),
			));
		}

		if self.accounts.implementations.is_empty() {
			return Err(ConfigError::Validation(
				"At least one accounts implementation must be configured".into(),
			));
		}
		if !self
			.accounts
			.implementations
			.contains_key(&self.accounts.primary)
		{
			return Err(ConfigError::Validation(format!(
				"Primary accounts implementation '{}' not found in implementations",
				self.accounts.primary
			)));
		}

		if self.deployments.implementations.is_empty() {
			return Err(ConfigError::Validation(
				"At least one deployment implementation must be configured".into(),
			));
		}
		if !self
			.deployments
			.implementations
			.contains_key(&self.deployments.primary)
		{
			return Err(ConfigError::Validation(format!(
				"Primary deployment implementation '{}' not found in implementations",
				self.deployments.primary
			)));
		}

		Ok(())
	}
}

/// Parses configuration from a TOML string.
///
/// Environment variables are resolved first and the configuration is
/// validated after parsing.
impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}
