//! Dynamic factory registry for deployment-runner implementations.
//!
//! Collects the factory functions every capability crate exports and
//! resolves the implementation names configuration files refer to.

use deployer_accounts::AccountsFactory;
use deployer_deployments::DeploymentFactory;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Registry of all implementation factories, keyed by configuration name.
#[derive(Default)]
pub struct FactoryRegistry {
	pub accounts: HashMap<String, AccountsFactory>,
	pub deployments: HashMap<String, DeploymentFactory>,
}

impl FactoryRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register an accounts implementation
	pub fn register_accounts(&mut self, name: impl Into<String>, factory: AccountsFactory) {
		self.accounts.insert(name.into(), factory);
	}

	/// Register a deployment implementation
	pub fn register_deployment(&mut self, name: impl Into<String>, factory: DeploymentFactory) {
		self.deployments.insert(name.into(), factory);
	}

	/// Looks up an accounts factory, listing the alternatives on failure.
	pub fn accounts_factory(&self, name: &str) -> Result<AccountsFactory, String> {
		self.accounts
			.get(name)
			.copied()
			.ok_or_else(|| unknown_implementation("accounts", name, self.accounts.keys()))
	}

	/// Looks up a deployment factory, listing the alternatives on failure.
	pub fn deployment_factory(&self, name: &str) -> Result<DeploymentFactory, String> {
		self.deployments
			.get(name)
			.copied()
			.ok_or_else(|| unknown_implementation("deployment", name, self.deployments.keys()))
	}
}

fn unknown_implementation<'a>(
	kind: &str,
	name: &str,
	available: impl Iterator<Item = &'a String>,
) -> String {
	let mut names: Vec<&str> = available.map(String::as_str).collect();
	names.sort_unstable();
	format!(
		"Unknown {} implementation '{}'. Available: [{}]",
		kind,
		name,
		names.join(", ")
	)
}

// Global registry instance
static REGISTRY: OnceLock<FactoryRegistry> = OnceLock::new();

/// Initialize the global registry with all available implementations
pub fn initialize_registry() -> &'static FactoryRegistry {
	REGISTRY.get_or_init(|| {
		let mut registry = FactoryRegistry::new();

		for (name, factory) in deployer_accounts::get_all_implementations() {
			tracing::debug!("Registering accounts implementation: {}", name);
			registry.register_accounts(name, factory);
		}

		for (name, factory) in deployer_deployments::get_all_implementations() {
			tracing::debug!("Registering deployment implementation: {}", name);
			registry.register_deployment(name, factory);
		}

		registry
	})
}

/// Get the global factory registry
pub fn get_registry() -> &'static FactoryRegistry {
	initialize_registry()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn initialize_registry_is_idempotent() {
		let first = initialize_registry() as *const FactoryRegistry;
		let second = initialize_registry() as *const FactoryRegistry;
		assert_eq!(first, second);
	}

	#[test]
	fn registry_contains_builtin_implementations() {
		let registry = get_registry();
		assert!(registry.accounts_factory("local").is_ok());
		assert!(registry.deployment_factory("rpc").is_ok());
	}

	#[test]
	fn unknown_implementation_lists_available() {
		let registry = get_registry();
		let message = registry.accounts_factory("vault").unwrap_err();
		assert!(message.contains("Unknown accounts implementation 'vault'"));
		assert!(message.contains("local"));
	}
}
