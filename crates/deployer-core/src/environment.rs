//! The read-only environment injected into every task.

use deployer_accounts::AccountsService;
use deployer_deployments::DeploymentService;
use std::sync::Arc;

/// The network a run targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkDescriptor {
	/// Name the network was selected by.
	pub name: String,
	/// Chain ID of the network.
	pub chain_id: u64,
}

/// Capability groups available to a running task.
///
/// Tasks receive this by reference and hold nothing beyond it; the
/// services are shared read-only across all tasks of a run.
#[derive(Clone)]
pub struct TaskEnvironment {
	accounts: Arc<AccountsService>,
	deployments: Arc<DeploymentService>,
	network: NetworkDescriptor,
}

impl std::fmt::Debug for TaskEnvironment {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TaskEnvironment")
			.field("network", &self.network)
			.finish_non_exhaustive()
	}
}

impl TaskEnvironment {
	pub fn new(
		accounts: Arc<AccountsService>,
		deployments: Arc<DeploymentService>,
		network: NetworkDescriptor,
	) -> Self {
		Self {
			accounts,
			deployments,
			network,
		}
	}

	/// Named-account resolution capability.
	pub fn accounts(&self) -> &AccountsService {
		&self.accounts
	}

	/// Contract deployment capability.
	pub fn deployments(&self) -> &DeploymentService {
		&self.deployments
	}

	/// The network this run targets.
	pub fn network(&self) -> &NetworkDescriptor {
		&self.network
	}
}
