//! The agent: world, sensors, goals, and actions under one handle.

use std::any::Any;

use crate::action::Actions;
use crate::goal::{Goal, Goals};
use crate::planner::{Plan, Planner};
use crate::sensors::Sensors;
use crate::state::{StateKey, Value, WorldState};

/// Everything the planner needs about one agent.
///
/// The agent is read-only while a search runs: simulation happens on
/// cloned worlds and the only interior write is the per-invocation
/// predicate memo. Plan sequentially; an agent is not meant to be shared
/// across simultaneous planner invocations.
///
/// # Example
/// ```
/// use athena::{Action, Agent, Actions, Condition, Effect, Goal, Goals};
///
/// let goals = Goals::new().with("be_at_100", Goal::fixed(1.0).with_condition(Condition::eq(1, 100i64)));
/// let actions = Actions::new().with(
///     Action::new("leap").with_cost(1.0).with_effect(Effect::set(1, 100i64)),
/// );
///
/// let mut agent = Agent::new(goals, actions);
/// agent.set_state(1, 0i64);
///
/// let plan = agent.plan(10);
/// assert_eq!(plan.goal_name(), "be_at_100");
/// assert_eq!(plan.len(), 2); // sentinel root + "leap"
/// ```
#[derive(Debug)]
pub struct Agent {
    world: WorldState,
    sensors: Sensors,
    goals: Goals,
    actions: Actions,
}

impl Agent {
    /// Creates an agent with an empty world and no sensors.
    pub fn new(goals: Goals, actions: Actions) -> Self {
        Self {
            world: WorldState::new(),
            sensors: Sensors::new(),
            goals,
            actions,
        }
    }

    /// Sets one state variable, replacing any existing entry under the
    /// same key.
    pub fn set_state(&mut self, key: StateKey, value: impl Into<Value>) {
        self.world.set(key, value);
    }

    /// Reads one state variable back.
    pub fn state(&self, key: StateKey) -> Option<&Value> {
        self.world.get(key)
    }

    /// Registers a sensor handle under `name`.
    pub fn set_sensor(&mut self, name: impl Into<String>, value: impl Any + Send + Sync) {
        self.sensors.set(name, value);
    }

    /// The agent's current world.
    pub fn world(&self) -> &WorldState {
        &self.world
    }

    /// The agent's sensor registry.
    pub fn sensors(&self) -> &Sensors {
        &self.sensors
    }

    /// The agent's goal set.
    pub fn goals(&self) -> &Goals {
        &self.goals
    }

    /// The agent's action library.
    pub fn actions(&self) -> &Actions {
        &self.actions
    }

    /// Plans with a throwaway [`Planner`]. Callers planning every tick
    /// should hold a `Planner` of their own to reuse its buffers.
    pub fn plan(&self, max_depth: u16) -> Plan {
        Planner::new().plan(self, max_depth)
    }

    /// Picks the goal with the strictly highest positive priority,
    /// first-seen winning ties. `None` when no priority is positive.
    pub(crate) fn select_goal(&self) -> Option<(&str, &Goal)> {
        let mut best: Option<(&str, &Goal)> = None;
        let mut best_priority = 0.0f32;
        for (name, goal) in self.goals.iter() {
            let priority = goal.priority(&self.sensors);
            if priority > best_priority {
                best_priority = priority;
                best = Some((name.as_str(), goal));
            }
        }
        best
    }

    /// Clears every predicate memo (action preconditions and goal
    /// requirements) so the next search samples the environment afresh.
    pub(crate) fn reset_condition_caches(&self) {
        for action in self.actions.iter() {
            action.preconditions().reset();
        }
        for (_, goal) in self.goals.iter() {
            goal.conditions().reset();
        }
    }
}
