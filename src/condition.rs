//! Conditions: predicates over world state and sensors.
//!
//! Conditions serve double duty as action preconditions and goal
//! requirements. Value conditions compare one world entry against a target;
//! predicate conditions defer to a caller closure over the agent's
//! [`Sensors`] and are memoized so the environment is sampled exactly once
//! per planning invocation, keeping the search deterministic.

use std::cell::Cell;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::sensors::Sensors;
use crate::state::{StateKey, Value, WorldState};

/// Comparison operator for value conditions.
///
/// All six operators apply to numeric values; boolean and string values
/// support only `Equal` and `NotEqual`, any other operator evaluates false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    /// Entry equals the target.
    Equal,
    /// Entry differs from the target.
    NotEqual,
    /// Entry is at most the target (numeric only).
    LessOrEqual,
    /// Entry is strictly below the target (numeric only).
    Less,
    /// Entry is at least the target (numeric only).
    GreaterOrEqual,
    /// Entry is strictly above the target (numeric only).
    Greater,
}

/// Caller closure behind a predicate condition.
pub type PredicateFn = Arc<dyn Fn(&Sensors) -> bool + Send + Sync>;

/// A single check against a world (or, for predicates, the environment).
///
/// An absent key or a mismatched value tag always evaluates false.
///
/// # Example
/// ```
/// use athena::{Condition, Sensors, WorldState};
///
/// let mut world = WorldState::new();
/// world.set(0, 60i64);
///
/// let sensors = Sensors::new();
/// assert!(Condition::gt_eq(0, 50i64).check(&world, &sensors));
/// assert!(!Condition::eq(0, 100i64).check(&world, &sensors));
/// ```
#[derive(Clone)]
pub struct Condition {
    key: StateKey,
    kind: ConditionKind,
}

#[derive(Clone)]
enum ConditionKind {
    Value {
        operator: Comparison,
        value: Value,
    },
    Predicate {
        predicate: PredicateFn,
        // Memoized (resolved, result) pair. Reset at each plan() entry so
        // the closure runs at most once per invocation.
        cache: Cell<Option<bool>>,
    },
}

impl Condition {
    fn value(key: StateKey, operator: Comparison, value: impl Into<Value>) -> Self {
        Self {
            key,
            kind: ConditionKind::Value {
                operator,
                value: value.into(),
            },
        }
    }

    /// Entry under `key` must equal `value`.
    pub fn eq(key: StateKey, value: impl Into<Value>) -> Self {
        Self::value(key, Comparison::Equal, value)
    }

    /// Entry under `key` must differ from `value`.
    pub fn not_eq(key: StateKey, value: impl Into<Value>) -> Self {
        Self::value(key, Comparison::NotEqual, value)
    }

    /// Numeric entry under `key` must be at most `value`.
    pub fn lt_eq(key: StateKey, value: impl Into<Value>) -> Self {
        Self::value(key, Comparison::LessOrEqual, value)
    }

    /// Numeric entry under `key` must be strictly below `value`.
    pub fn lt(key: StateKey, value: impl Into<Value>) -> Self {
        Self::value(key, Comparison::Less, value)
    }

    /// Numeric entry under `key` must be at least `value`.
    pub fn gt_eq(key: StateKey, value: impl Into<Value>) -> Self {
        Self::value(key, Comparison::GreaterOrEqual, value)
    }

    /// Numeric entry under `key` must be strictly above `value`.
    pub fn gt(key: StateKey, value: impl Into<Value>) -> Self {
        Self::value(key, Comparison::Greater, value)
    }

    /// A condition answered by `predicate` over the agent's sensors. The
    /// key only identifies the condition; the closure never sees the world.
    pub fn predicate(
        key: StateKey,
        predicate: impl Fn(&Sensors) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            key,
            kind: ConditionKind::Predicate {
                predicate: Arc::new(predicate),
                cache: Cell::new(None),
            },
        }
    }

    /// The key this condition is attached to.
    pub fn key(&self) -> StateKey {
        self.key
    }

    /// Evaluates the condition. Value conditions read `world`; predicate
    /// conditions read `sensors` on first call and the memoized result
    /// afterwards.
    pub fn check(&self, world: &WorldState, sensors: &Sensors) -> bool {
        match &self.kind {
            ConditionKind::Value { operator, value } => {
                let Some(current) = world.get(self.key) else {
                    return false;
                };
                if !current.same_variant(value) {
                    return false;
                }
                match operator {
                    Comparison::Equal => current == value,
                    Comparison::NotEqual => current != value,
                    ordered => match current.numeric_cmp(value) {
                        Some(ord) => ordering_matches(*ordered, ord),
                        None => false,
                    },
                }
            }
            ConditionKind::Predicate { predicate, cache } => {
                if let Some(resolved) = cache.get() {
                    return resolved;
                }
                let result = predicate(sensors);
                cache.set(Some(result));
                result
            }
        }
    }

    /// Heuristic distance contributed by this condition: 0 when satisfied,
    /// the signed magnitude of the numeric gap when comparable, 1 otherwise.
    pub(crate) fn distance(&self, world: &WorldState, sensors: &Sensors) -> f32 {
        if self.check(world, sensors) {
            return 0.0;
        }
        if let ConditionKind::Value { operator, value } = &self.kind {
            let current = world.get(self.key).and_then(Value::as_f64);
            if let (Some(current), Some(target)) = (current, value.as_f64()) {
                return numeric_gap(current, target, *operator);
            }
        }
        1.0
    }

    /// Clears the predicate memo so the next `check` resamples the
    /// environment. No-op for value conditions.
    pub(crate) fn reset(&self) {
        if let ConditionKind::Predicate { cache, .. } = &self.kind {
            cache.set(None);
        }
    }
}

fn ordering_matches(operator: Comparison, ord: Ordering) -> bool {
    match operator {
        Comparison::Equal => ord == Ordering::Equal,
        Comparison::NotEqual => ord != Ordering::Equal,
        Comparison::LessOrEqual => ord != Ordering::Greater,
        Comparison::Less => ord == Ordering::Less,
        Comparison::GreaterOrEqual => ord != Ordering::Less,
        Comparison::Greater => ord == Ordering::Greater,
    }
}

/// Gap between an unsatisfied numeric condition and its target, following
/// the operator's semantics: inclusive bounds count the shortfall, strict
/// bounds one past it, equality the absolute difference.
fn numeric_gap(current: f64, target: f64, operator: Comparison) -> f32 {
    let gap = match operator {
        Comparison::Equal => (target - current).abs(),
        Comparison::NotEqual => 1.0,
        Comparison::GreaterOrEqual => target - current,
        Comparison::Greater => target - current + 1.0,
        Comparison::LessOrEqual => current - target,
        Comparison::Less => current - target + 1.0,
    };
    gap as f32
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ConditionKind::Value { operator, value } => f
                .debug_struct("Condition")
                .field("key", &self.key)
                .field("operator", operator)
                .field("value", value)
                .finish(),
            ConditionKind::Predicate { cache, .. } => f
                .debug_struct("Condition")
                .field("key", &self.key)
                .field("predicate", &"<closure>")
                .field("cache", &cache.get())
                .finish(),
        }
    }
}

/// Conjunction of conditions. An empty list is vacuously satisfied.
#[derive(Debug, Clone, Default)]
pub struct Conditions(Vec<Condition>);

impl Conditions {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style append.
    pub fn with(mut self, condition: Condition) -> Self {
        self.0.push(condition);
        self
    }

    /// Appends a condition.
    pub fn push(&mut self, condition: Condition) {
        self.0.push(condition);
    }

    /// Number of conditions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when the list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the conditions.
    pub fn iter(&self) -> impl Iterator<Item = &Condition> {
        self.0.iter()
    }

    /// True iff every condition holds.
    pub fn check(&self, world: &WorldState, sensors: &Sensors) -> bool {
        self.0.iter().all(|c| c.check(world, sensors))
    }

    /// Sum of per-condition heuristic distances.
    pub(crate) fn distance(&self, world: &WorldState, sensors: &Sensors) -> f32 {
        self.0.iter().map(|c| c.distance(world, sensors)).sum()
    }

    pub(crate) fn reset(&self) {
        for condition in &self.0 {
            condition.reset();
        }
    }
}

impl From<Vec<Condition>> for Conditions {
    fn from(conditions: Vec<Condition>) -> Self {
        Self(conditions)
    }
}

impl FromIterator<Condition> for Conditions {
    fn from_iter<I: IntoIterator<Item = Condition>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    fn world_with(key: StateKey, value: impl Into<Value>) -> WorldState {
        let mut world = WorldState::new();
        world.set(key, value);
        world
    }

    #[test]
    fn numeric_operators() {
        let world = world_with(1, 10i64);
        let sensors = Sensors::new();

        assert!(Condition::eq(1, 10i64).check(&world, &sensors));
        assert!(Condition::not_eq(1, 11i64).check(&world, &sensors));
        assert!(Condition::lt(1, 11i64).check(&world, &sensors));
        assert!(Condition::lt_eq(1, 10i64).check(&world, &sensors));
        assert!(Condition::gt(1, 9i64).check(&world, &sensors));
        assert!(Condition::gt_eq(1, 10i64).check(&world, &sensors));
        assert!(!Condition::gt(1, 10i64).check(&world, &sensors));
    }

    #[test]
    fn absent_key_fails() {
        let world = WorldState::new();
        let sensors = Sensors::new();
        assert!(!Condition::eq(1, 0i64).check(&world, &sensors));
        assert!(!Condition::not_eq(1, 0i64).check(&world, &sensors));
    }

    #[test]
    fn mismatched_tag_fails() {
        let world = world_with(1, 10i64);
        let sensors = Sensors::new();
        assert!(!Condition::eq(1, 10u64).check(&world, &sensors));
        assert!(!Condition::eq(1, 10.0f64).check(&world, &sensors));
    }

    #[test]
    fn bool_and_string_support_equality_only() {
        let sensors = Sensors::new();

        let world = world_with(2, true);
        assert!(Condition::eq(2, true).check(&world, &sensors));
        assert!(Condition::not_eq(2, false).check(&world, &sensors));
        assert!(!Condition::gt(2, false).check(&world, &sensors));

        let world = world_with(3, "armory");
        assert!(Condition::eq(3, "armory").check(&world, &sensors));
        assert!(!Condition::lt_eq(3, "armory").check(&world, &sensors));
    }

    #[test]
    fn predicate_runs_once_until_reset() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let condition = Condition::predicate(9, move |_| {
            counter.fetch_add(1, AtomicOrdering::SeqCst);
            true
        });

        let world = WorldState::new();
        let sensors = Sensors::new();
        assert!(condition.check(&world, &sensors));
        assert!(condition.check(&world, &sensors));
        assert!(condition.check(&world, &sensors));
        assert_eq!(calls.load(AtomicOrdering::SeqCst), 1);

        condition.reset();
        assert!(condition.check(&world, &sensors));
        assert_eq!(calls.load(AtomicOrdering::SeqCst), 2);
    }

    #[test]
    fn predicate_reads_sensors() {
        let condition =
            Condition::predicate(4, |sensors| sensors.get::<i64>("entity.health").is_some());

        let world = WorldState::new();
        let mut sensors = Sensors::new();
        sensors.set("entity.health", 50i64);
        assert!(condition.check(&world, &sensors));
    }

    #[test]
    fn distance_follows_operator_semantics() {
        let sensors = Sensors::new();
        let world = world_with(1, 10i64);

        assert_eq!(Condition::eq(1, 30i64).distance(&world, &sensors), 20.0);
        assert_eq!(Condition::gt_eq(1, 25i64).distance(&world, &sensors), 15.0);
        assert_eq!(Condition::gt(1, 10i64).distance(&world, &sensors), 1.0);
        assert_eq!(Condition::lt_eq(1, 4i64).distance(&world, &sensors), 6.0);
        assert_eq!(Condition::lt(1, 10i64).distance(&world, &sensors), 1.0);
        assert_eq!(Condition::not_eq(1, 10i64).distance(&world, &sensors), 1.0);
        assert_eq!(Condition::eq(1, 10i64).distance(&world, &sensors), 0.0);
    }

    #[test]
    fn distance_for_absent_or_unorderable_is_unit() {
        let sensors = Sensors::new();
        let empty = WorldState::new();
        assert_eq!(Condition::eq(1, 30i64).distance(&empty, &sensors), 1.0);

        let world = world_with(2, "field");
        assert_eq!(Condition::eq(2, "base").distance(&world, &sensors), 1.0);
    }

    #[test]
    fn empty_list_is_vacuously_true() {
        let world = WorldState::new();
        let sensors = Sensors::new();
        assert!(Conditions::new().check(&world, &sensors));
    }
}
