//! Contract deployment for the deployment runner.
//!
//! This crate owns the deploy capability tasks call into: loading a
//! compiled artifact by name, encoding constructor arguments, submitting
//! the creation transaction, and waiting for confirmation. Implementations
//! are pluggable and selected by configuration; the shipped `rpc`
//! implementation submits through an EVM node that manages its own keys.

use async_trait::async_trait;
use deployer_types::{
	ConfigSchema, DeployRequest, Deployment, ImplementationRegistry, NetworkConfig,
};
use thiserror::Error;

pub mod artifacts;

pub mod implementations {
	pub mod rpc;
}

/// Errors that can occur during deployment operations.
#[derive(Debug, Error)]
pub enum DeploymentError {
	/// The artifact is missing, malformed, or the constructor arguments
	/// do not match its constructor.
	#[error("Artifact error: {0}")]
	Artifact(String),
	/// Error that occurs during network communication.
	#[error("Network error: {0}")]
	Network(String),
	/// The deployment transaction failed or reverted.
	#[error("Deployment rejected: {0}")]
	Rejected(String),
	/// No suitable implementation is available for the operation.
	#[error("No implementation available")]
	NoImplementationAvailable,
}

/// Trait defining the interface for deployment implementations.
///
/// A deployment takes a fully-resolved [`DeployRequest`] (sender address
/// already looked up) and blocks until the contract is confirmed on chain
/// or the attempt fails.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait DeploymentInterface: Send + Sync {
	/// Returns the configuration schema for this deployment implementation.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;

	/// Deploys one contract and waits for confirmation.
	async fn deploy(&self, request: &DeployRequest) -> Result<Deployment, DeploymentError>;
}

/// Factory function type for deployment implementations.
///
/// Receives the implementation's own config table, the target network,
/// and the confirmation count configured on the runner.
pub type DeploymentFactory =
	fn(&toml::Value, &NetworkConfig, u64) -> Result<Box<dyn DeploymentInterface>, DeploymentError>;

/// Registry trait for deployment implementations.
pub trait DeploymentRegistry: ImplementationRegistry<Factory = DeploymentFactory> {}

/// Get all registered deployment implementations.
///
/// Returns (name, factory) tuples for the factory registry.
pub fn get_all_implementations() -> Vec<(&'static str, DeploymentFactory)> {
	use implementations::rpc;

	vec![(rpc::Registry::NAME, rpc::Registry::factory())]
}

/// Service that manages contract deployments.
///
/// Wraps the configured implementation and carries the confirmation
/// policy the runner was configured with.
pub struct DeploymentService {
	implementation: Box<dyn DeploymentInterface>,
	min_confirmations: u64,
}

impl DeploymentService {
	/// Creates a new DeploymentService with the specified implementation.
	pub fn new(implementation: Box<dyn DeploymentInterface>, min_confirmations: u64) -> Self {
		Self {
			implementation,
			min_confirmations,
		}
	}

	/// Deploys one contract and waits for confirmation.
	pub async fn deploy(&self, request: &DeployRequest) -> Result<Deployment, DeploymentError> {
		self.implementation.deploy(request).await
	}

	/// Confirmations required before a deployment counts as final.
	pub fn min_confirmations(&self) -> u64 {
		self.min_confirmations
	}
}
