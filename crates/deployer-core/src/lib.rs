//! Core task machinery for the deployment runner.
//!
//! This crate defines what a deployment task is ([`DeployTask`]), the
//! explicit registry tasks are registered in, the environment injected
//! into each task, and the sequential runner that executes a tag-selected,
//! dependency-ordered plan.

pub mod environment;
pub mod registry;
pub mod runner;
pub mod task;

pub use environment::{NetworkDescriptor, TaskEnvironment};
pub use registry::TaskRegistry;
pub use runner::{RunSummary, TaskRunner};
pub use task::{DeployTask, TaskSpec};

use deployer_accounts::AccountError;
use deployer_deployments::DeploymentError;
use thiserror::Error;

/// Errors that can occur while registering, planning, or running tasks.
///
/// Account and deployment failures pass through unchanged so the caller
/// sees exactly what the capability reported.
#[derive(Debug, Error)]
pub enum TaskError {
	/// A task with this id is already registered.
	#[error("Task '{0}' is already registered")]
	DuplicateTask(String),
	/// A task depends on an id no registered task carries.
	#[error("Task '{task}' depends on unknown task '{dependency}'")]
	UnknownDependency { task: String, dependency: String },
	/// The dependency graph contains a cycle involving this task.
	#[error("Dependency cycle involving task '{0}'")]
	DependencyCycle(String),
	/// Account resolution failed.
	#[error(transparent)]
	Account(#[from] AccountError),
	/// Contract deployment failed.
	#[error(transparent)]
	Deployment(#[from] DeploymentError),
}
