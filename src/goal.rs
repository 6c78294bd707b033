//! Goals: desired world configurations with sensor-driven priorities.
//!
//! Each goal pairs a condition list with a priority closure over the
//! agent's sensors. At plan time the agent evaluates every priority once
//! and hands the single goal with the strictly highest positive priority
//! to the search; nothing positive means nothing to do.

use std::fmt;
use std::sync::Arc;

use crate::condition::{Condition, Conditions};
use crate::sensors::Sensors;
use crate::state::WorldState;

/// Caller closure producing a goal's priority from the environment. Must
/// be pure; it runs once per planning invocation.
pub type PriorityFn = Arc<dyn Fn(&Sensors) -> f32 + Send + Sync>;

/// A desired world configuration.
///
/// # Example
/// ```
/// use athena::{Condition, Goal};
///
/// let stay_armed = Goal::fixed(1.0).with_condition(Condition::eq(0, true));
/// let heal = Goal::new(|sensors| {
///     match sensors.get::<i64>("entity.health") {
///         Some(health) if *health < 50 => 2.0,
///         _ => 0.1,
///     }
/// });
/// # let _ = (stay_armed, heal);
/// ```
#[derive(Clone)]
pub struct Goal {
    conditions: Conditions,
    priority: PriorityFn,
}

impl Goal {
    /// Creates a goal whose priority is computed by `priority` at each
    /// planning invocation.
    pub fn new(priority: impl Fn(&Sensors) -> f32 + Send + Sync + 'static) -> Self {
        Self {
            conditions: Conditions::new(),
            priority: Arc::new(priority),
        }
    }

    /// Creates a goal with a constant priority.
    pub fn fixed(priority: f32) -> Self {
        Self::new(move |_| priority)
    }

    /// Appends a requirement.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// The goal's requirements.
    pub fn conditions(&self) -> &Conditions {
        &self.conditions
    }

    /// Evaluates the priority closure against `sensors`.
    pub fn priority(&self, sensors: &Sensors) -> f32 {
        (self.priority)(sensors)
    }

    /// True iff every requirement holds on `world`.
    pub(crate) fn satisfied(&self, world: &WorldState, sensors: &Sensors) -> bool {
        self.conditions.check(world, sensors)
    }
}

impl fmt::Debug for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Goal")
            .field("conditions", &self.conditions)
            .field("priority", &"<closure>")
            .finish()
    }
}

/// The named goal set of an agent. Names are unique; re-adding a name
/// replaces the previous goal. Iteration keeps first-seen order, which is
/// also the tie-breaking order for equal priorities.
#[derive(Debug, Clone, Default)]
pub struct Goals(Vec<(String, Goal)>);

impl Goals {
    /// Creates an empty goal set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration.
    pub fn with(mut self, name: impl Into<String>, goal: Goal) -> Self {
        self.add(name, goal);
        self
    }

    /// Registers `goal` under `name`, replacing any goal of the same name.
    pub fn add(&mut self, name: impl Into<String>, goal: Goal) {
        let name = name.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = goal,
            None => self.0.push((name, goal)),
        }
    }

    /// Reads a goal back by name.
    pub fn get(&self, name: &str) -> Option<&Goal> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, goal)| goal)
    }

    /// Number of goals.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when no goals are registered.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &(String, Goal)> {
        self.0.iter()
    }
}
