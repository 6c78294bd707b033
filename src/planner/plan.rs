//! The planner's output: an ordered action sequence.

use std::fmt;

use crate::action::Action;

/// An ordered action sequence toward one goal.
///
/// A non-empty plan always starts with the sentinel root (empty name, zero
/// cost) standing for the initial world, so a goal that is already
/// satisfied yields a one-element plan while an unreachable goal yields an
/// empty one. The goal name is empty exactly when no goal had positive
/// priority.
#[derive(Debug, Clone, Default)]
pub struct Plan {
    goal: String,
    steps: Vec<Action>,
}

impl Plan {
    /// The no-active-goal outcome: empty name, no steps.
    pub(crate) fn idle() -> Self {
        Self::default()
    }

    pub(crate) fn new(goal: String, steps: Vec<Action>) -> Self {
        Self { goal, steps }
    }

    /// Name of the goal this plan serves; empty when no goal was active.
    pub fn goal_name(&self) -> &str {
        &self.goal
    }

    /// The steps, sentinel root included.
    pub fn steps(&self) -> &[Action] {
        &self.steps
    }

    /// Number of steps including the sentinel root.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True when the goal was unreachable or no goal was active.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sum of step costs. The sentinel contributes zero.
    pub fn total_cost(&self) -> f32 {
        self.steps.iter().map(Action::cost).sum()
    }

    /// The first action to execute, skipping the sentinel root. `None`
    /// when there is nothing to do.
    pub fn next_action(&self) -> Option<&Action> {
        self.steps.iter().find(|a| !a.is_sentinel())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "Plan {{ empty }}");
        }
        write!(
            f,
            "Plan for {:?} (cost {:.1}):",
            self.goal,
            self.total_cost()
        )?;
        for action in &self.steps {
            write!(f, " {action}")?;
        }
        Ok(())
    }
}
