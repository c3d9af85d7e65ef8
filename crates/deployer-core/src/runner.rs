//! Sequential execution of a task plan.

use crate::registry::TaskRegistry;
use crate::{TaskEnvironment, TaskError};

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
	/// Ids of the tasks that ran, in execution order.
	pub executed: Vec<String>,
}

/// Runs a plan of tasks to completion, one at a time.
///
/// A run is one logical unit of work: tasks execute sequentially against
/// the shared read-only environment, and the first failure aborts the run
/// with the failing task's error unchanged.
pub struct TaskRunner {
	environment: TaskEnvironment,
}

impl TaskRunner {
	pub fn new(environment: TaskEnvironment) -> Self {
		Self { environment }
	}

	/// Plans and runs the tasks selected by `tags`.
	pub async fn run(
		&self,
		registry: &TaskRegistry,
		tags: &[String],
	) -> Result<RunSummary, TaskError> {
		let plan = registry.plan(tags)?;

		tracing::info!(
			network = %self.environment.network().name,
			chain_id = self.environment.network().chain_id,
			tasks = plan.len(),
			"starting deployment run"
		);

		let mut executed = Vec::with_capacity(plan.len());
		for task in plan {
			let spec = task.spec();
			tracing::info!(task = %spec.id, "running task");

			if let Err(e) = task.run(&self.environment).await {
				tracing::error!(task = %spec.id, error = %e, "task failed");
				return Err(e);
			}

			executed.push(spec.id);
		}

		tracing::info!(tasks = executed.len(), "deployment run complete");
		Ok(RunSummary { executed })
	}
}
