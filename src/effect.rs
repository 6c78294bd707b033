//! Effects: the state mutators actions carry.
//!
//! An effect targets one key and rewrites it with an arithmetic operator.
//! Numerics support the full `SET`/`ADD`/`SUB`/`MUL`/`DIV` set with
//! wrapping integer semantics, booleans accept `SET` only, strings accept
//! `SET` and concatenating `ADD`. Application failures never escape the
//! planner; they mark the candidate branch infeasible and the search moves
//! on.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::{StateKey, Value, WorldState};

/// Arithmetic operator carried by an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arithmetic {
    /// Replace the entry's value.
    Set,
    /// Add to a numeric entry, or concatenate onto a string entry.
    Add,
    /// Subtract from a numeric entry.
    Sub,
    /// Multiply a numeric entry.
    Mul,
    /// Divide a numeric entry.
    Div,
}

/// Why applying an effect to a world failed.
///
/// These errors stay internal to the search: a failing effect rejects the
/// candidate successor silently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EffectError {
    /// `MUL`/`DIV` on a key with no entry to operate on.
    #[error("no entry under key {0} to operate on")]
    MissingSubject(StateKey),
    /// The effect's value tag differs from the existing entry's tag.
    #[error("effect type {expected} does not match entry type {found}")]
    TypeMismatch {
        /// Tag carried by the effect.
        expected: &'static str,
        /// Tag of the entry already in the world.
        found: &'static str,
    },
    /// Operator is illegal for the value's type.
    #[error("operator {0:?} not allowed on {1} values")]
    OperatorNotAllowed(Arithmetic, &'static str),
    /// Division by zero (or an otherwise undefined integer operation).
    #[error("arithmetic fault applying {0:?}")]
    ArithmeticFault(Arithmetic),
}

/// One mutation of one world-state entry.
///
/// # Example
/// ```
/// use athena::{Effect, Value, WorldState};
///
/// let mut world = WorldState::new();
/// world.set(0, 10i64);
/// Effect::add(0, 5i64).apply(&mut world).unwrap();
/// assert_eq!(world.get(0), Some(&Value::Int64(15)));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Effect {
    key: StateKey,
    operator: Arithmetic,
    value: Value,
}

impl Effect {
    fn new(key: StateKey, operator: Arithmetic, value: impl Into<Value>) -> Self {
        Self {
            key,
            operator,
            value: value.into(),
        }
    }

    /// Replaces the entry under `key` with `value` (creates it if absent).
    pub fn set(key: StateKey, value: impl Into<Value>) -> Self {
        Self::new(key, Arithmetic::Set, value)
    }

    /// Adds `value` to the entry under `key`; creates the entry when
    /// absent. On strings this concatenates.
    pub fn add(key: StateKey, value: impl Into<Value>) -> Self {
        Self::new(key, Arithmetic::Add, value)
    }

    /// Subtracts `value` from the entry under `key`; creates a negated
    /// entry when absent.
    pub fn sub(key: StateKey, value: impl Into<Value>) -> Self {
        Self::new(key, Arithmetic::Sub, value)
    }

    /// Multiplies the entry under `key` by `value`. Fails on absent keys.
    pub fn mul(key: StateKey, value: impl Into<Value>) -> Self {
        Self::new(key, Arithmetic::Mul, value)
    }

    /// Divides the entry under `key` by `value`. Fails on absent keys.
    pub fn div(key: StateKey, value: impl Into<Value>) -> Self {
        Self::new(key, Arithmetic::Div, value)
    }

    /// The key this effect targets.
    pub fn key(&self) -> StateKey {
        self.key
    }

    /// The operator applied.
    pub fn operator(&self) -> Arithmetic {
        self.operator
    }

    /// The operand value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Applies the effect in place, keeping the world fingerprint
    /// consistent through the entry-level XOR maintenance.
    pub fn apply(&self, world: &mut WorldState) -> Result<(), EffectError> {
        match world.index_of(self.key) {
            None => self.apply_absent(world),
            Some(idx) => {
                let next = self.evaluate(world.entry_at(idx).value())?;
                world.replace_at(idx, next);
                Ok(())
            }
        }
    }

    fn apply_absent(&self, world: &mut WorldState) -> Result<(), EffectError> {
        match (&self.value, self.operator) {
            (Value::Bool(_), Arithmetic::Set) => {
                world.set(self.key, self.value.clone());
                Ok(())
            }
            (Value::Bool(_), op) => Err(EffectError::OperatorNotAllowed(op, "bool")),
            (Value::String(_), Arithmetic::Set | Arithmetic::Add) => {
                world.set(self.key, self.value.clone());
                Ok(())
            }
            (Value::String(_), op) => Err(EffectError::OperatorNotAllowed(op, "string")),
            (_, Arithmetic::Set | Arithmetic::Add) => {
                world.set(self.key, self.value.clone());
                Ok(())
            }
            (_, Arithmetic::Sub) => {
                world.set(self.key, self.value.negated());
                Ok(())
            }
            (_, Arithmetic::Mul | Arithmetic::Div) => Err(EffectError::MissingSubject(self.key)),
        }
    }

    /// Computes the post-image value for an existing entry.
    fn evaluate(&self, current: &Value) -> Result<Value, EffectError> {
        use Arithmetic::{Add, Div, Mul, Set, Sub};

        macro_rules! integer {
            ($cur:expr, $operand:expr, $variant:ident) => {
                match self.operator {
                    Set => Value::$variant($operand),
                    Add => Value::$variant($cur.wrapping_add($operand)),
                    Sub => Value::$variant($cur.wrapping_sub($operand)),
                    Mul => Value::$variant($cur.wrapping_mul($operand)),
                    Div => Value::$variant(
                        $cur.checked_div($operand)
                            .ok_or(EffectError::ArithmeticFault(Div))?,
                    ),
                }
            };
        }

        Ok(match (current, &self.value) {
            (Value::Int8(c), Value::Int8(v)) => integer!(*c, *v, Int8),
            (Value::Int64(c), Value::Int64(v)) => integer!(*c, *v, Int64),
            (Value::UInt8(c), Value::UInt8(v)) => integer!(*c, *v, UInt8),
            (Value::UInt64(c), Value::UInt64(v)) => integer!(*c, *v, UInt64),
            (Value::Float64(c), Value::Float64(v)) => match self.operator {
                Set => Value::Float64(*v),
                Add => Value::Float64(c + v),
                Sub => Value::Float64(c - v),
                Mul => Value::Float64(c * v),
                // IEEE-754 division by zero yields an infinity; the world
                // stays consistent either way.
                Div => Value::Float64(c / v),
            },
            (Value::Bool(_), Value::Bool(v)) => match self.operator {
                Set => Value::Bool(*v),
                op => return Err(EffectError::OperatorNotAllowed(op, "bool")),
            },
            (Value::String(c), Value::String(v)) => match self.operator {
                Set => Value::String(v.clone()),
                Add => {
                    let mut joined = String::with_capacity(c.len() + v.len());
                    joined.push_str(c);
                    joined.push_str(v);
                    Value::String(joined)
                }
                op => return Err(EffectError::OperatorNotAllowed(op, "string")),
            },
            (found, expected) => {
                return Err(EffectError::TypeMismatch {
                    expected: expected.type_name(),
                    found: found.type_name(),
                })
            }
        })
    }

    /// True iff applying this effect would leave the world exactly as it
    /// is: a `SET` to the current value, a zero `ADD`/`SUB`, a unit
    /// `MUL`/`DIV`, or an empty string concatenation. Actions whose every
    /// effect is already satisfied are no-op transitions and get pruned.
    pub fn already_satisfied(&self, world: &WorldState) -> bool {
        let Some(current) = world.get(self.key) else {
            return false;
        };
        if !current.same_variant(&self.value) {
            return false;
        }
        match (self.operator, &self.value) {
            (Arithmetic::Set, value) => current == value,
            (Arithmetic::Add, Value::String(s)) => s.is_empty(),
            (Arithmetic::Add | Arithmetic::Sub, value) => value.is_zero(),
            (Arithmetic::Mul | Arithmetic::Div, value) => value.is_one(),
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.operator {
            Arithmetic::Set => "=",
            Arithmetic::Add => "+=",
            Arithmetic::Sub => "-=",
            Arithmetic::Mul => "*=",
            Arithmetic::Div => "/=",
        };
        write!(f, "{} {} {}", self.key, op, self.value)
    }
}

/// The ordered effect list of one action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Effects(Vec<Effect>);

impl Effects {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style append.
    pub fn with(mut self, effect: Effect) -> Self {
        self.0.push(effect);
        self
    }

    /// Appends an effect.
    pub fn push(&mut self, effect: Effect) {
        self.0.push(effect);
    }

    /// Number of effects.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when the list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the effects.
    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.0.iter()
    }

    /// Applies every effect in order; the first failure aborts and is
    /// returned. The world may be partially mutated on failure, which is
    /// why the planner only ever applies effects to throwaway clones.
    pub fn apply(&self, world: &mut WorldState) -> Result<(), EffectError> {
        for effect in &self.0 {
            effect.apply(world)?;
        }
        Ok(())
    }

    /// True iff every effect is already satisfied, i.e. applying the whole
    /// list would not change the world. Vacuously true for an empty list.
    pub fn already_satisfied(&self, world: &WorldState) -> bool {
        self.0.iter().all(|e| e.already_satisfied(world))
    }
}

impl From<Vec<Effect>> for Effects {
    fn from(effects: Vec<Effect>) -> Self {
        Self(effects)
    }
}

impl FromIterator<Effect> for Effects {
    fn from_iter<I: IntoIterator<Item = Effect>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
