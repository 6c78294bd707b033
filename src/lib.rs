//! # ATHENA - Adaptive Typed Heuristic Engine for Navigating Actions
//!
//! [![Crates.io](https://img.shields.io/crates/v/athena.svg)](https://crates.io/crates/athena)
//! [![Documentation](https://docs.rs/athena/badge.svg)](https://docs.rs/athena)
//! [![License](https://img.shields.io/badge/license-MIT%2FApache--2.0-blue.svg)](https://github.com/ruvnet/athena)
//!
//! A typed Goal-Oriented Action Planning (GOAP) engine for autonomous game
//! agents. Given a world state, a prioritized goal set, and a library of
//! actions with preconditions and effects, ATHENA runs a forward A* search
//! over simulated world states and returns the minimum-cost action sequence
//! that satisfies the highest-priority active goal.
//!
//! ## Features
//!
//! - **Typed world state**: booleans, five numeric widths, and strings
//!   under compact `u16` keys, with exhaustive compile-checked dispatch
//! - **XOR fingerprinting**: worlds are identified by a rolling 64-bit
//!   hash, making successor de-duplication O(1) per edit
//! - **A\* with reopening**: closed states are re-opened when a cheaper
//!   route appears, with deterministic FIFO tie-breaking
//! - **Sensor-driven goals**: goal priorities and predicate conditions
//!   read opaque sensor handles, sampled once per planning invocation
//! - **Allocation-conscious**: nodes live in a reusable arena indexed by
//!   integer handles; a long-lived [`Planner`] replans without reallocating
//!
//! ## Quick Start
//!
//! ```
//! use athena::{Action, Agent, Actions, Condition, Effect, Goal, Goals};
//!
//! // Goal: have a weapon in hand.
//! let goals = Goals::new().with(
//!     "be_armed",
//!     Goal::fixed(1.0).with_condition(Condition::eq(1, true)),
//! );
//!
//! // Actions: scout the area, then pick up what was found.
//! let actions = Actions::new()
//!     .with(Action::new("scout").with_cost(1.0).with_effect(Effect::set(0, true)))
//!     .with(
//!         Action::new("pickup_weapon")
//!             .with_cost(1.0)
//!             .with_precondition(Condition::eq(0, true))
//!             .with_effect(Effect::set(1, true)),
//!     );
//!
//! let mut agent = Agent::new(goals, actions);
//! agent.set_state(0, false); // area scouted
//! agent.set_state(1, false); // has weapon
//!
//! let plan = agent.plan(10);
//! assert_eq!(plan.goal_name(), "be_armed");
//! let names: Vec<_> = plan.steps().iter().map(|a| a.name()).collect();
//! assert_eq!(names, vec!["", "scout", "pickup_weapon"]); // sentinel first
//! ```
//!
//! ## Architecture
//!
//! | Component | Responsibility |
//! |-----------|----------------|
//! | [`WorldState`] | typed entries under a rolling XOR fingerprint |
//! | [`Condition`] | predicates over state and sensors, memoized closures |
//! | [`Effect`] | arithmetic, boolean, and string state mutators |
//! | [`Action`] / [`Goal`] | operators and prioritized targets |
//! | [`Planner`] | forward A* over fingerprinted worlds |
//!
//! The planner runs to completion on the calling thread. The agent is
//! read-only during a search except for the per-invocation predicate
//! memos, so plan on one thread at a time; a search never mutates the
//! caller's world.
//!
//! ## Depth bounds, not timeouts
//!
//! The engine is not anytime: [`Planner::plan`] either returns the best
//! plan it can discover while chaining at most `max_depth` actions, or an
//! empty plan. Callers wanting bounded work tune `max_depth`.

#![warn(missing_docs, rust_2018_idioms)]

mod action;
mod agent;
mod condition;
mod effect;
mod goal;
mod planner;
mod sensors;
mod state;

pub use action::{Action, Actions};
pub use agent::Agent;
pub use condition::{Comparison, Condition, Conditions, PredicateFn};
pub use effect::{Arithmetic, Effect, EffectError, Effects};
pub use goal::{Goal, Goals, PriorityFn};
pub use planner::{Plan, PlanStats, Planner};
pub use sensors::{Sensor, Sensors};
pub use state::{StateEntry, StateKey, Value, WorldState};
