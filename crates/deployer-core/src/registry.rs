//! Explicit task registration and execution planning.

use crate::task::{DeployTask, TaskSpec};
use crate::TaskError;
use std::collections::{HashMap, HashSet};

/// Registry of deployment tasks.
///
/// Registration is explicit and per-registry; two registries never share
/// tasks or metadata. [`TaskRegistry::plan`] turns a tag selection into a
/// dependency-ordered execution plan.
#[derive(Default)]
pub struct TaskRegistry {
	tasks: Vec<(TaskSpec, Box<dyn DeployTask>)>,
}

impl TaskRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a task. Ids must be unique within the registry.
	pub fn register(&mut self, task: Box<dyn DeployTask>) -> Result<(), TaskError> {
		let spec = task.spec();
		if self.tasks.iter().any(|(existing, _)| existing.id == spec.id) {
			return Err(TaskError::DuplicateTask(spec.id));
		}
		self.tasks.push((spec, task));
		Ok(())
	}

	/// Specs of all registered tasks, in registration order.
	pub fn specs(&self) -> Vec<&TaskSpec> {
		self.tasks.iter().map(|(spec, _)| spec).collect()
	}

	pub fn len(&self) -> usize {
		self.tasks.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tasks.is_empty()
	}

	/// Computes the execution plan for a tag selection.
	///
	/// Tasks matching any requested tag are selected (all tasks when the
	/// request is empty), expanded with their transitive dependencies,
	/// deduplicated, and ordered so every task runs after its
	/// dependencies. The order is stable: independent tasks keep their
	/// registration order.
	pub fn plan(&self, tags: &[String]) -> Result<Vec<&dyn DeployTask>, TaskError> {
		let index: HashMap<&str, usize> = self
			.tasks
			.iter()
			.enumerate()
			.map(|(i, (spec, _))| (spec.id.as_str(), i))
			.collect();

		// Selected tasks plus transitive dependencies, as registry indices.
		let mut selected: HashSet<usize> = HashSet::new();
		let mut frontier: Vec<usize> = self
			.tasks
			.iter()
			.enumerate()
			.filter(|(_, (spec, _))| spec.matches(tags))
			.map(|(i, _)| i)
			.collect();

		while let Some(i) = frontier.pop() {
			if !selected.insert(i) {
				continue;
			}
			let spec = &self.tasks[i].0;
			for dependency in &spec.depends_on {
				let dep_index = *index.get(dependency.as_str()).ok_or_else(|| {
					TaskError::UnknownDependency {
						task: spec.id.clone(),
						dependency: dependency.clone(),
					}
				})?;
				frontier.push(dep_index);
			}
		}

		// Stable topological order: sweep in registration order, emitting
		// tasks whose selected dependencies are already emitted.
		let mut emitted: HashSet<usize> = HashSet::new();
		let mut plan = Vec::with_capacity(selected.len());

		while emitted.len() < selected.len() {
			let mut progressed = false;

			for i in 0..self.tasks.len() {
				if !selected.contains(&i) || emitted.contains(&i) {
					continue;
				}
				let spec = &self.tasks[i].0;
				let ready = spec
					.depends_on
					.iter()
					.all(|dependency| emitted.contains(&index[dependency.as_str()]));
				if ready {
					emitted.insert(i);
					plan.push(self.tasks[i].1.as_ref());
					progressed = true;
				}
			}

			if !progressed {
				// Every remaining task waits on another remaining task.
				let stuck = (0..self.tasks.len())
					.find(|i| selected.contains(i) && !emitted.contains(i))
					.map(|i| self.tasks[i].0.id.clone())
					.unwrap_or_default();
				return Err(TaskError::DependencyCycle(stuck));
			}
		}

		Ok(plan)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::TaskEnvironment;
	use async_trait::async_trait;

	struct NoopTask {
		spec: TaskSpec,
	}

	impl NoopTask {
		fn new(id: &str, tags: &[&str], depends_on: &[&str]) -> Box<Self> {
			Box::new(Self {
				spec: TaskSpec::new(id)
					.with_tags(tags.iter().map(|t| t.to_string()).collect())
					.with_depends_on(depends_on.iter().map(|d| d.to_string()).collect()),
			})
		}
	}

	#[async_trait]
	impl DeployTask for NoopTask {
		fn spec(&self) -> TaskSpec {
			self.spec.clone()
		}

		async fn run(&self, _env: &TaskEnvironment) -> Result<(), TaskError> {
			Ok(())
		}
	}

	fn plan_ids(registry: &TaskRegistry, tags: &[&str]) -> Vec<String> {
		let tags: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
		registry
			.plan(&tags)
			.unwrap()
			.iter()
			.map(|task| task.spec().id)
			.collect()
	}

	#[test]
	fn test_register_rejects_duplicate_id() {
		let mut registry = TaskRegistry::new();
		registry.register(NoopTask::new("a", &[], &[])).unwrap();

		let result = registry.register(NoopTask::new("a", &[], &[]));
		assert!(matches!(result, Err(TaskError::DuplicateTask(id)) if id == "a"));
	}

	#[test]
	fn test_plan_empty_tags_selects_all_in_order() {
		let mut registry = TaskRegistry::new();
		registry.register(NoopTask::new("a", &["x"], &[])).unwrap();
		registry.register(NoopTask::new("b", &["y"], &[])).unwrap();
		registry.register(NoopTask::new("c", &[], &[])).unwrap();

		assert_eq!(plan_ids(&registry, &[]), vec!["a", "b", "c"]);
	}

	#[test]
	fn test_plan_filters_by_tag() {
		let mut registry = TaskRegistry::new();
		registry.register(NoopTask::new("a", &["x"], &[])).unwrap();
		registry.register(NoopTask::new("b", &["y"], &[])).unwrap();

		assert_eq!(plan_ids(&registry, &["y"]), vec!["b"]);
	}

	#[test]
	fn test_plan_pulls_in_untagged_dependency() {
		let mut registry = TaskRegistry::new();
		registry.register(NoopTask::new("lib", &[], &[])).unwrap();
		registry
			.register(NoopTask::new("app", &["app"], &["lib"]))
			.unwrap();

		assert_eq!(plan_ids(&registry, &["app"]), vec!["lib", "app"]);
	}

	#[test]
	fn test_plan_orders_dependencies_first() {
		let mut registry = TaskRegistry::new();
		registry
			.register(NoopTask::new("router", &["dex"], &["factory"]))
			.unwrap();
		registry
			.register(NoopTask::new("factory", &["dex"], &[]))
			.unwrap();

		assert_eq!(plan_ids(&registry, &["dex"]), vec!["factory", "router"]);
	}

	#[test]
	fn test_plan_deduplicates_shared_dependency() {
		let mut registry = TaskRegistry::new();
		registry.register(NoopTask::new("base", &[], &[])).unwrap();
		registry
			.register(NoopTask::new("a", &["all"], &["base"]))
			.unwrap();
		registry
			.register(NoopTask::new("b", &["all"], &["base"]))
			.unwrap();

		assert_eq!(plan_ids(&registry, &["all"]), vec!["base", "a", "b"]);
	}

	#[test]
	fn test_plan_unknown_dependency() {
		let mut registry = TaskRegistry::new();
		registry
			.register(NoopTask::new("a", &[], &["missing"]))
			.unwrap();

		let result = registry.plan(&[]);
		assert!(matches!(
			result,
			Err(TaskError::UnknownDependency { task, dependency })
				if task == "a" && dependency == "missing"
		));
	}

	#[test]
	fn test_plan_detects_cycle() {
		let mut registry = TaskRegistry::new();
		registry.register(NoopTask::new("a", &[], &["b"])).unwrap();
		registry.register(NoopTask::new("b", &[], &["a"])).unwrap();

		let result = registry.plan(&[]);
		assert!(matches!(result, Err(TaskError::DependencyCycle(_))));
	}

	#[test]
	fn test_plan_empty_registry() {
		let registry = TaskRegistry::new();
		assert!(registry.is_empty());
		assert!(registry.plan(&[]).unwrap().is_empty());
	}
}
