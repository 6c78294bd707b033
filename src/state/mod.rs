//! World state: keyed typed entries under a rolling 64-bit fingerprint.
//!
//! A [`WorldState`] is the unit the planner searches over. It keeps one
//! [`StateEntry`] per [`StateKey`] and maintains a fingerprint equal to the
//! XOR of every entry's hash. Insertions XOR the new entry hash in,
//! replacements XOR the old hash out and the new one in, so edits are O(1)
//! on the fingerprint regardless of world size. The planner treats two
//! worlds with equal fingerprints as the same search state.

mod value;

use std::fmt;

pub use value::Value;

/// Compact caller-chosen identifier for one world-state variable.
///
/// Keys are opaque to the engine; games typically mirror them from an enum:
///
/// ```
/// use athena::StateKey;
///
/// const HEALTH: StateKey = 0;
/// const AMMO: StateKey = 1;
/// # let _ = (HEALTH, AMMO);
/// ```
pub type StateKey = u16;

// Multiplicative hashing primes. Large and odd, chosen for distribution;
// the exact constants are not observable through the public API.
const KEY_PRIME: u64 = 11_400_714_819_323_198_485;
const VALUE_PRIME: u64 = 14_029_467_366_897_019_727;

/// One `(key, value)` pair plus its cached entry hash.
///
/// The hash is recomputed on every mutation and participates in the world
/// fingerprint by XOR.
#[derive(Debug, Clone)]
pub struct StateEntry {
    key: StateKey,
    value: Value,
    hash: u64,
}

impl StateEntry {
    fn new(key: StateKey, value: Value) -> Self {
        let hash = Self::compute_hash(key, &value);
        Self { key, value, hash }
    }

    /// The entry's key.
    pub fn key(&self) -> StateKey {
        self.key
    }

    /// The entry's current value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub(crate) fn hash(&self) -> u64 {
        self.hash
    }

    /// Multiplicative hash over `(key, tagged value)`. Equal pairs always
    /// produce equal hashes; fixed-width payloads mix in one multiply,
    /// strings iterate per byte.
    fn compute_hash(key: StateKey, value: &Value) -> u64 {
        let mut hash = u64::from(key).wrapping_mul(KEY_PRIME);
        match value {
            Value::Int8(v) => hash ^= (*v as u64).wrapping_mul(VALUE_PRIME),
            Value::Int64(v) => hash ^= (*v as u64).wrapping_mul(VALUE_PRIME),
            Value::UInt8(v) => hash ^= u64::from(*v).wrapping_mul(VALUE_PRIME),
            Value::UInt64(v) => hash ^= v.wrapping_mul(VALUE_PRIME),
            Value::Float64(v) => hash ^= v.to_bits().wrapping_mul(VALUE_PRIME),
            Value::Bool(v) => {
                if *v {
                    hash ^= VALUE_PRIME;
                }
            }
            Value::String(s) => {
                for byte in s.bytes() {
                    hash = hash.wrapping_mul(VALUE_PRIME) ^ u64::from(byte);
                }
            }
        }
        hash
    }
}

/// The full set of state variables for one agent.
///
/// Lookup is a linear scan over the entry list; agent worlds are small and
/// the scan stays cache-friendly. Entry order never affects the fingerprint.
///
/// # Example
/// ```
/// use athena::WorldState;
///
/// let mut world = WorldState::new();
/// world.set(0, 100i64);
/// world.set(1, true);
/// world.set(0, 85i64); // replaces, never duplicates
/// assert_eq!(world.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WorldState {
    entries: Vec<StateEntry>,
    fingerprint: u64,
}

impl WorldState {
    /// Creates an empty world with fingerprint zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing any existing entry under the same
    /// key. The fingerprint is updated incrementally.
    pub fn set(&mut self, key: StateKey, value: impl Into<Value>) {
        let value = value.into();
        match self.index_of(key) {
            Some(idx) => self.replace_at(idx, value),
            None => {
                let entry = StateEntry::new(key, value);
                self.fingerprint ^= entry.hash;
                self.entries.push(entry);
            }
        }
    }

    /// Removes the entry under `key`, returning its value.
    pub fn remove(&mut self, key: StateKey) -> Option<Value> {
        let idx = self.index_of(key)?;
        let entry = self.entries.swap_remove(idx);
        self.fingerprint ^= entry.hash;
        Some(entry.value)
    }

    /// Reads the value under `key`.
    pub fn get(&self, key: StateKey) -> Option<&Value> {
        self.entries.iter().find(|e| e.key == key).map(|e| &e.value)
    }

    /// Returns true when an entry exists under `key`.
    pub fn contains_key(&self, key: StateKey) -> bool {
        self.index_of(key).is_some()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no entries are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &StateEntry> {
        self.entries.iter()
    }

    /// The rolling 64-bit fingerprint identifying this world. The planner
    /// considers two worlds equal iff their fingerprints are equal.
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    pub(crate) fn index_of(&self, key: StateKey) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    pub(crate) fn entry_at(&self, idx: usize) -> &StateEntry {
        &self.entries[idx]
    }

    /// Swaps in a new value at `idx`, XOR-ing the old entry hash out of the
    /// fingerprint and the new one in.
    pub(crate) fn replace_at(&mut self, idx: usize, value: Value) {
        let entry = &mut self.entries[idx];
        let new_hash = StateEntry::compute_hash(entry.key, &value);
        self.fingerprint ^= entry.hash ^ new_hash;
        entry.value = value;
        entry.hash = new_hash;
    }

    /// Recomputes the fingerprint from scratch. Only used to cross-check the
    /// incremental maintenance in tests.
    #[cfg(test)]
    pub(crate) fn recomputed_fingerprint(&self) -> u64 {
        self.entries.iter().fold(0, |acc, e| acc ^ e.hash)
    }
}

impl fmt::Display for WorldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WorldState {{ ")?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", entry.key, entry.value)?;
        }
        write!(f, " }}")
    }
}
