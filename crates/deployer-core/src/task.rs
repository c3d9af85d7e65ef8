//! The deployment task abstraction.

use crate::{TaskEnvironment, TaskError};
use async_trait::async_trait;

/// Metadata describing one deployment task.
///
/// Returned by value from [`DeployTask::spec`]; nothing here lives in
/// process-global state, so selection metadata cannot leak between
/// registries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSpec {
	/// Unique identifier of the task within a registry.
	pub id: String,
	/// Selection labels. A task runs when any of its tags is requested.
	pub tags: Vec<String>,
	/// Ids of tasks that must run before this one.
	pub depends_on: Vec<String>,
}

impl TaskSpec {
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			tags: Vec::new(),
			depends_on: Vec::new(),
		}
	}

	pub fn with_tags(mut self, tags: Vec<String>) -> Self {
		self.tags = tags;
		self
	}

	pub fn with_depends_on(mut self, depends_on: Vec<String>) -> Self {
		self.depends_on = depends_on;
		self
	}

	/// True when this task matches any of the requested tags.
	///
	/// An empty request selects every task.
	pub fn matches(&self, tags: &[String]) -> bool {
		tags.is_empty() || self.tags.iter().any(|tag| tags.contains(tag))
	}
}

/// A named, tagged unit of deployment work.
///
/// Tasks are leaves: they call out to the capabilities on the injected
/// [`TaskEnvironment`] and hold no state of their own. Failures from the
/// capabilities propagate unchanged through [`TaskError`].
#[async_trait]
pub trait DeployTask: Send + Sync {
	/// Returns this task's metadata.
	fn spec(&self) -> TaskSpec;

	/// Runs the task to completion against the injected environment.
	async fn run(&self, env: &TaskEnvironment) -> Result<(), TaskError>;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_spec_builder() {
		let spec = TaskSpec::new("UniswapV2Factory")
			.with_tags(vec!["UniswapV2Factory".to_string()])
			.with_depends_on(vec!["Multicall".to_string()]);

		assert_eq!(spec.id, "UniswapV2Factory");
		assert_eq!(spec.tags, vec!["UniswapV2Factory"]);
		assert_eq!(spec.depends_on, vec!["Multicall"]);
	}

	#[test]
	fn test_matches_empty_request_selects_all() {
		let spec = TaskSpec::new("a").with_tags(vec!["x".to_string()]);
		assert!(spec.matches(&[]));
	}

	#[test]
	fn test_matches_any_tag() {
		let spec = TaskSpec::new("a").with_tags(vec!["x".to_string(), "y".to_string()]);
		assert!(spec.matches(&["y".to_string()]));
		assert!(!spec.matches(&["z".to_string()]));
	}

	#[test]
	fn test_untagged_task_only_matches_empty_request() {
		let spec = TaskSpec::new("a");
		assert!(spec.matches(&[]));
		assert!(!spec.matches(&["x".to_string()]));
	}
}
