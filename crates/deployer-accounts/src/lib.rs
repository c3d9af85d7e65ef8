//! Named-account resolution for the deployment runner.
//!
//! Tasks refer to accounts by role ("deployer", "admin") rather than by
//! address; this crate defines the interface that resolves those roles and
//! a service wrapper the task environment exposes. Implementations are
//! pluggable and selected by configuration.

use async_trait::async_trait;
use deployer_types::{Address, ConfigSchema, ImplementationRegistry, NamedAccounts};
use thiserror::Error;

pub mod implementations {
	pub mod local;
}

/// Errors that can occur during account resolution.
#[derive(Debug, Error)]
pub enum AccountError {
	/// No address is bound to the requested role.
	#[error("No account configured for role '{0}'")]
	RoleNotFound(String),
	/// An address in the configuration is malformed.
	#[error("Invalid address for role '{role}': {reason}")]
	InvalidAddress { role: String, reason: String },
	/// Error that occurs when interacting with the accounts implementation.
	#[error("Implementation error: {0}")]
	Implementation(String),
}

/// Trait defining the interface for accounts implementations.
///
/// An implementation produces the full role-to-address mapping for the
/// network the runner targets; role lookup lives in [`AccountsService`]
/// so every implementation shares the same not-found semantics.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait AccountsInterface: Send + Sync {
	/// Returns the configuration schema for this accounts implementation.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;

	/// Resolves the full named-account mapping.
	async fn named_accounts(&self) -> Result<NamedAccounts, AccountError>;
}

/// Factory function type for accounts implementations.
///
/// The chain ID of the target network is passed so implementations can
/// apply per-chain overrides at construction time.
pub type AccountsFactory =
	fn(&toml::Value, u64) -> Result<Box<dyn AccountsInterface>, AccountError>;

/// Registry trait for accounts implementations.
pub trait AccountsRegistry: ImplementationRegistry<Factory = AccountsFactory> {}

/// Get all registered accounts implementations.
///
/// Returns (name, factory) tuples for the factory registry.
pub fn get_all_implementations() -> Vec<(&'static str, AccountsFactory)> {
	use implementations::local;

	vec![(local::Registry::NAME, local::Registry::factory())]
}

/// Service that manages named-account resolution.
///
/// Wraps the configured implementation and adds single-role lookup on top
/// of the full mapping.
pub struct AccountsService {
	implementation: Box<dyn AccountsInterface>,
}

impl AccountsService {
	/// Creates a new AccountsService with the specified implementation.
	pub fn new(implementation: Box<dyn AccountsInterface>) -> Self {
		Self { implementation }
	}

	/// Resolves the full named-account mapping.
	pub async fn named_accounts(&self) -> Result<NamedAccounts, AccountError> {
		self.implementation.named_accounts().await
	}

	/// Resolves a single role to its address.
	///
	/// Fails with [`AccountError::RoleNotFound`] when the mapping has no
	/// entry for the role.
	pub async fn named(&self, role: &str) -> Result<Address, AccountError> {
		let accounts = self.implementation.named_accounts().await?;
		accounts
			.get(role)
			.cloned()
			.ok_or_else(|| AccountError::RoleNotFound(role.to_string()))
	}
}
