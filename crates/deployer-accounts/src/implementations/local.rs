//! Config-backed accounts implementation.
//!
//! Roles are mapped to addresses directly in the configuration file, with
//! optional per-chain-id override tables. This mirrors how development
//! frameworks declare named accounts and is suitable wherever the address
//! book is known ahead of time.

use crate::{AccountError, AccountsInterface};
use async_trait::async_trait;
use deployer_types::{
	parse_address, ConfigSchema, Field, FieldType, NamedAccounts, Schema,
};

/// Accounts implementation backed by the configuration file.
///
/// The effective mapping is computed once at construction: defaults from
/// the `named` table, overridden by the `overrides.<chain_id>` table for
/// the target chain when present.
#[derive(Debug)]
pub struct LocalAccounts {
	accounts: NamedAccounts,
}

impl LocalAccounts {
	/// Builds the mapping for the given chain from raw configuration.
	pub fn new(config: &toml::Value, chain_id: u64) -> Result<Self, AccountError> {
		let named = config
			.get("named")
			.and_then(|v| v.as_table())
			.ok_or_else(|| {
				AccountError::Implementation("'named' table is required".to_string())
			})?;

		let mut accounts = parse_role_table(named)?;

		// Override resolution: per-chain entries win over defaults.
		if let Some(overrides) = config
			.get("overrides")
			.and_then(|v| v.as_table())
			.and_then(|t| t.get(&chain_id.to_string()))
			.and_then(|v| v.as_table())
		{
			for (role, address) in parse_role_table(overrides)?.0 {
				accounts.0.insert(role, address);
			}
		}

		Ok(Self { accounts })
	}
}

fn parse_role_table(
	table: &toml::map::Map<String, toml::Value>,
) -> Result<NamedAccounts, AccountError> {
	table
		.iter()
		.map(|(role, value)| {
			let raw = value.as_str().ok_or_else(|| AccountError::InvalidAddress {
				role: role.clone(),
				reason: format!("expected string, got {}", value.type_str()),
			})?;
			let address = parse_address(raw).map_err(|reason| AccountError::InvalidAddress {
				role: role.clone(),
				reason,
			})?;
			Ok((role.clone(), address))
		})
		.collect()
}

/// Configuration schema for LocalAccounts.
pub struct LocalAccountsSchema;

impl LocalAccountsSchema {
	/// Static validation method for use before instance creation
	pub fn validate_config(config: &toml::Value) -> Result<(), deployer_types::ValidationError> {
		let instance = Self;
		instance.validate(config)
	}
}

fn validate_role_table(table: &toml::map::Map<String, toml::Value>) -> Result<(), String> {
	for (role, value) in table {
		let raw = value
			.as_str()
			.ok_or_else(|| format!("Address for role '{}' must be a string", role))?;
		parse_address(raw).map_err(|e| format!("Invalid address for role '{}': {}", role, e))?;
	}
	Ok(())
}

impl ConfigSchema for LocalAccountsSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), deployer_types::ValidationError> {
		let schema = Schema::new(
			// Required fields
			vec![
				// Role names are dynamic, so the table is validated by hand.
				Field::new("named", FieldType::Table(Schema::new(vec![], vec![]))).with_validator(
					|value| match value.as_table() {
						Some(table) if table.is_empty() => {
							Err("'named' must contain at least one role".to_string())
						},
						Some(table) => validate_role_table(table),
						None => Err("'named' must be a table".to_string()),
					},
				),
			],
			// Optional fields
			vec![
				Field::new("overrides", FieldType::Table(Schema::new(vec![], vec![])))
					.with_validator(|value| {
						let table = value
							.as_table()
							.ok_or_else(|| "'overrides' must be a table".to_string())?;
						for (key, entry) in table {
							if key.parse::<u64>().is_err() {
								return Err(format!("Invalid chain ID in overrides: {}", key));
							}
							let roles = entry.as_table().ok_or_else(|| {
								format!("Overrides for chain {} must be a table", key)
							})?;
							validate_role_table(roles)?;
						}
						Ok(())
					}),
			],
		);

		schema.validate(config)
	}
}

#[async_trait]
impl AccountsInterface for LocalAccounts {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(LocalAccountsSchema)
	}

	async fn named_accounts(&self) -> Result<NamedAccounts, AccountError> {
		Ok(self.accounts.clone())
	}
}

/// Factory function to create a config-backed accounts source.
///
/// Validates the configuration table, then builds the effective mapping
/// for the target chain.
pub fn create_accounts(
	config: &toml::Value,
	chain_id: u64,
) -> Result<Box<dyn AccountsInterface>, AccountError> {
	LocalAccountsSchema::validate_config(config)
		.map_err(|e| AccountError::Implementation(format!("Invalid configuration: {}", e)))?;

	Ok(Box::new(LocalAccounts::new(config, chain_id)?))
}

/// Registry for the config-backed accounts implementation.
pub struct Registry;

impl deployer_types::ImplementationRegistry for Registry {
	const NAME: &'static str = "local";
	type Factory = crate::AccountsFactory;

	fn factory() -> Self::Factory {
		create_accounts
	}
}

impl crate::AccountsRegistry for Registry {}
