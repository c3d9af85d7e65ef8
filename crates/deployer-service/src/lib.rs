//! Wiring for the deployment runner binary.
//!
//! Turns a validated [`Config`] into a ready [`TaskEnvironment`] by
//! resolving implementation names through the factory registry, then
//! runs the shipped tasks through the core runner.

pub mod factory_registry;
pub mod tasks;

use deployer_accounts::AccountsService;
use deployer_config::Config;
use deployer_core::{
	NetworkDescriptor, RunSummary, TaskEnvironment, TaskRegistry, TaskRunner,
};
use deployer_deployments::DeploymentService;
use factory_registry::get_registry;
use std::sync::Arc;

/// Builds the task environment for the selected network.
///
/// `network_override` takes precedence over the configured
/// `[runner].network` when given.
pub fn build_environment(
	config: &Config,
	network_override: Option<&str>,
) -> Result<TaskEnvironment, Box<dyn std::error::Error>> {
	let network_name = network_override.unwrap_or(&config.runner.network);
	let network = config
		.networks
		.get(network_name)
		.ok_or_else(|| format!("Network '{}' not found in networks", network_name))?;

	let registry = get_registry();

	let accounts_factory = registry.accounts_factory(&config.accounts.primary)?;
	let accounts_config = config
		.accounts
		.implementations
		.get(&config.accounts.primary)
		.ok_or_else(|| {
			format!(
				"No configuration table for accounts implementation '{}'",
				config.accounts.primary
			)
		})?;
	let accounts = accounts_factory(accounts_config, network.chain_id)?;

	let deployment_factory = registry.deployment_factory(&config.deployments.primary)?;
	let deployment_config = config
		.deployments
		.implementations
		.get(&config.deployments.primary)
		.ok_or_else(|| {
			format!(
				"No configuration table for deployment implementation '{}'",
				config.deployments.primary
			)
		})?;
	let deployment =
		deployment_factory(deployment_config, network, config.runner.min_confirmations)?;

	Ok(TaskEnvironment::new(
		Arc::new(AccountsService::new(accounts)),
		Arc::new(DeploymentService::new(
			deployment,
			config.runner.min_confirmations,
		)),
		NetworkDescriptor {
			name: network_name.to_string(),
			chain_id: network.chain_id,
		},
	))
}

/// Builds the environment, registers the shipped tasks, and runs the
/// tasks selected by `tags`.
pub async fn run(
	config: &Config,
	network_override: Option<&str>,
	tags: &[String],
) -> Result<RunSummary, Box<dyn std::error::Error>> {
	let environment = build_environment(config, network_override)?;

	let mut registry = TaskRegistry::new();
	tasks::register_builtin_tasks(&mut registry)?;

	let runner = TaskRunner::new(environment);
	Ok(runner.run(&registry, tags).await?)
}
