//! Deploys the UniswapV2Factory contract.

use async_trait::async_trait;
use deployer_core::{DeployTask, TaskEnvironment, TaskError, TaskSpec};
use deployer_types::DeployRequest;

/// Deploys `UniswapV2Factory` with the deployer account as fee-to setter.
///
/// The task is a leaf: it resolves the `deployer` role, issues one deploy
/// call, and keeps nothing. Deployment metadata stays with the deploy
/// capability and the run log.
pub struct UniswapV2Factory;

#[async_trait]
impl DeployTask for UniswapV2Factory {
	fn spec(&self) -> TaskSpec {
		TaskSpec::new("UniswapV2Factory").with_tags(vec!["UniswapV2Factory".to_string()])
	}

	async fn run(&self, env: &TaskEnvironment) -> Result<(), TaskError> {
		let accounts = env.accounts().named_accounts().await?;
		tracing::debug!(
			network = %env.network().name,
			chain_id = env.network().chain_id,
			roles = ?accounts.roles(),
			min_confirmations = env.deployments().min_confirmations(),
			"task environment"
		);

		let deployer = env.accounts().named("deployer").await?;

		let request = DeployRequest::new("UniswapV2Factory", deployer.clone())
			.with_arg(deployer)
			.with_log(true);

		env.deployments().deploy(&request).await?;
		Ok(())
	}
}
