//! The A* planner over fingerprinted world states.
//!
//! The search runs forward from the agent's current world: successors are
//! produced by simulating impacting actions on cloned worlds, de-duplicated
//! by 64-bit fingerprint, ordered by `f = g + h`, and re-opened when a
//! cheaper route to a known world appears. The result is the lowest-cost
//! action sequence discovered within the depth bound, or an empty plan.

mod astar;
mod node;
mod plan;

use std::collections::{BinaryHeap, HashMap};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::agent::Agent;
use node::{Node, NodeId, OpenEntry};

pub use plan::Plan;

/// Counters describing the last `plan` invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanStats {
    /// Successor nodes created.
    pub nodes_generated: usize,
    /// Nodes expanded (popped and closed).
    pub nodes_expanded: usize,
    /// Closed nodes re-opened on a cheaper route.
    pub reopened: usize,
    /// Wall-clock time spent planning.
    pub duration: Duration,
    /// Steps in the returned plan, sentinel included.
    pub plan_length: usize,
    /// Total cost of the returned plan.
    pub total_cost: f32,
}

/// A reusable planning context.
///
/// The planner owns its arena, heap, and fingerprint index and clears
/// rather than reallocates them between invocations, which keeps
/// steady-state allocation flat for agents that replan every tick.
///
/// # Example
/// ```
/// use athena::{Action, Agent, Actions, Condition, Effect, Goal, Goals, Planner};
///
/// let goals = Goals::new().with("count", Goal::fixed(1.0).with_condition(Condition::eq(1, 30i64)));
/// let actions = Actions::new().with(
///     Action::new("inc").with_cost(1.0).with_effect(Effect::add(1, 10i64)),
/// );
/// let mut agent = Agent::new(goals, actions);
/// agent.set_state(1, 0i64);
///
/// let mut planner = Planner::new();
/// let plan = planner.plan(&agent, 10);
/// assert_eq!(plan.len(), 4); // sentinel + three increments
/// assert_eq!(plan.total_cost(), 3.0);
/// ```
#[derive(Debug, Default)]
pub struct Planner {
    nodes: Vec<Node>,
    open: BinaryHeap<OpenEntry>,
    index: HashMap<u64, NodeId>,
    seq: u64,
    stats: PlanStats,
}

impl Planner {
    /// Creates a planner with empty buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters from the most recent invocation.
    pub fn stats(&self) -> PlanStats {
        self.stats
    }

    /// Selects the highest-priority active goal and searches for the
    /// cheapest action sequence satisfying it, chaining at most
    /// `max_depth` actions.
    ///
    /// Returns an idle plan (empty goal name) when no goal has positive
    /// priority, and a named-but-empty plan when the goal is unreachable
    /// within the bound.
    pub fn plan(&mut self, agent: &Agent, max_depth: u16) -> Plan {
        let started = Instant::now();
        agent.reset_condition_caches();

        let Some((goal_name, goal)) = agent.select_goal() else {
            debug!("no goal with positive priority");
            self.stats = PlanStats::default();
            self.stats.duration = started.elapsed();
            return Plan::idle();
        };

        let steps = self.search(agent, goal, max_depth);

        self.stats.duration = started.elapsed();
        self.stats.plan_length = steps.len();
        self.stats.total_cost = steps.iter().map(|a| a.cost()).sum();
        debug!(
            goal = goal_name,
            steps = steps.len(),
            cost = f64::from(self.stats.total_cost),
            expanded = self.stats.nodes_expanded,
            generated = self.stats.nodes_generated,
            reopened = self.stats.reopened,
            elapsed_us = self.stats.duration.as_micros() as u64,
            "planning finished"
        );

        Plan::new(goal_name.to_owned(), steps)
    }
}
