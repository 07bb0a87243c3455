// crates/storecheck-core/src/runtime/schedule.rs
// ============================================================================
// Module: Step Schedule
// Description: Explicit dependency graph of named test steps.
// Purpose: Run steps in topological order and skip dependents of failures.
// Dependencies: thiserror, std
// ============================================================================

//! ## Overview
//! State-sharing test steps depend on one another: a step that reads an
//! entity id depends on the step that created it. The schedule models those
//! prerequisites as an explicit directed acyclic graph instead of a naming
//! convention. Steps run sequentially in a deterministic topological order
//! (insertion order among ready steps); a failed step marks every transitive
//! dependent as skipped without invoking it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use thiserror::Error;

// ============================================================================
// SECTION: Schedule Errors
// ============================================================================

/// Schedule construction and validation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// Two steps were registered under the same name.
    #[error("duplicate step: {0}")]
    DuplicateStep(String),
    /// A step names a dependency that was never registered.
    #[error("step {step} depends on unknown step {dependency}")]
    UnknownDependency {
        /// Step declaring the dependency.
        step: String,
        /// Missing dependency name.
        dependency: String,
    },
    /// The dependency graph contains a cycle.
    #[error("dependency cycle involving step {0}")]
    Cycle(String),
}

// ============================================================================
// SECTION: Step Results
// ============================================================================

/// Result reported by a step runner for one executed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// The step completed successfully.
    Passed,
    /// The step ran and failed.
    Failed,
}

/// Final status of one step after a schedule run.
///
/// # Invariants
/// - `Skipped` steps were never invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    /// The step ran and passed.
    Passed,
    /// The step ran and failed.
    Failed,
    /// The step was not invoked because a prerequisite did not pass.
    Skipped {
        /// First prerequisite (in declaration order) that did not pass.
        blocked_on: String,
    },
}

/// Outcome record for one step of a schedule run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// Step name.
    pub name: String,
    /// Final step status.
    pub status: StepStatus,
}

// ============================================================================
// SECTION: Step Graph
// ============================================================================

/// One registered step with its declared prerequisites.
#[derive(Debug, Clone)]
struct StepSpec {
    /// Step name, unique within the graph.
    name: String,
    /// Names of steps that must pass before this one runs.
    dependencies: Vec<String>,
}

/// Directed acyclic graph of named steps.
#[derive(Debug, Clone, Default)]
pub struct StepGraph {
    /// Registered steps in insertion order.
    steps: Vec<StepSpec>,
}

impl StepGraph {
    /// Creates an empty step graph.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            steps: Vec::new(),
        }
    }

    /// Registers a step with its prerequisites.
    pub fn add(&mut self, name: impl Into<String>, dependencies: &[&str]) -> &mut Self {
        self.steps.push(StepSpec {
            name: name.into(),
            dependencies: dependencies.iter().map(ToString::to_string).collect(),
        });
        self
    }

    /// Returns the number of registered steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns whether no steps are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Validates names, dependencies, and acyclicity.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError`] for duplicate names, unknown dependencies,
    /// or cycles.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        self.order().map(|_| ())
    }

    /// Runs every step in topological order.
    ///
    /// `runner` is invoked once per runnable step; steps whose prerequisites
    /// did not all pass are marked skipped without being invoked. Outcomes
    /// are returned in execution order.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError`] when the graph fails validation; no step
    /// runs in that case.
    pub fn run<F>(&self, mut runner: F) -> Result<Vec<StepOutcome>, ScheduleError>
    where
        F: FnMut(&str) -> StepResult,
    {
        let order = self.order()?;
        let mut statuses: BTreeMap<&str, StepStatus> = BTreeMap::new();
        let mut outcomes = Vec::with_capacity(order.len());
        for index in order {
            let step = &self.steps[index];
            let blocked = step
                .dependencies
                .iter()
                .find(|dep| !matches!(statuses.get(dep.as_str()), Some(StepStatus::Passed)));
            let status = match blocked {
                Some(dependency) => StepStatus::Skipped {
                    blocked_on: dependency.clone(),
                },
                None => match runner(&step.name) {
                    StepResult::Passed => StepStatus::Passed,
                    StepResult::Failed => StepStatus::Failed,
                },
            };
            statuses.insert(step.name.as_str(), status.clone());
            outcomes.push(StepOutcome {
                name: step.name.clone(),
                status,
            });
        }
        Ok(outcomes)
    }

    /// Computes a deterministic topological order over step indices.
    ///
    /// Among ready steps, insertion order wins, so schedules are replayable.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError`] for duplicate names, unknown dependencies,
    /// or cycles.
    fn order(&self) -> Result<Vec<usize>, ScheduleError> {
        let mut indices: BTreeMap<&str, usize> = BTreeMap::new();
        for (index, step) in self.steps.iter().enumerate() {
            if indices.insert(step.name.as_str(), index).is_some() {
                return Err(ScheduleError::DuplicateStep(step.name.clone()));
            }
        }
        for step in &self.steps {
            for dependency in &step.dependencies {
                if !indices.contains_key(dependency.as_str()) {
                    return Err(ScheduleError::UnknownDependency {
                        step: step.name.clone(),
                        dependency: dependency.clone(),
                    });
                }
            }
        }

        let mut remaining: Vec<usize> = (0..self.steps.len()).collect();
        let mut placed = vec![false; self.steps.len()];
        let mut order = Vec::with_capacity(self.steps.len());
        while !remaining.is_empty() {
            let ready = remaining.iter().copied().find(|&index| {
                self.steps[index]
                    .dependencies
                    .iter()
                    .all(|dep| indices.get(dep.as_str()).is_some_and(|&dep_idx| placed[dep_idx]))
            });
            let Some(next) = ready else {
                let stuck = remaining
                    .first()
                    .map(|&index| self.steps[index].name.clone())
                    .unwrap_or_default();
                return Err(ScheduleError::Cycle(stuck));
            };
            placed[next] = true;
            order.push(next);
            remaining.retain(|&index| index != next);
        }
        Ok(order)
    }
}
