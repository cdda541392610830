// SPDX-License-Identifier: Apache-2.0

//! Open-addressing hash table for object members.
//!
//! All entries live directly in the bucket array; collisions probe
//! linearly to the next bucket. The load factor after an insertion never
//! exceeds 2/3, which also guarantees probe sequences terminate at an
//! empty slot.

use alloc::string::String;
use alloc::vec::Vec;
use core::mem;

use crate::json_value::JsonValue;
use crate::parse_error::ParseError;

/// Capacity a table grows to on its first insertion.
pub(crate) const INITIAL_CAPACITY: usize = 8;

const HASH_SEED: u64 = 5381;

/// Multiplicative string hash: `hash = hash * 33 + byte`.
fn hash_key(key: &str) -> u64 {
    let mut hash = HASH_SEED;
    for &byte in key.as_bytes() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_add(hash)
            .wrapping_add(u64::from(byte));
    }
    hash
}

#[derive(Debug, Clone)]
struct Slot {
    key: String,
    value: JsonValue,
}

/// A mapping from owned string keys to owned values.
///
/// Iteration visits entries in bucket order for the current capacity, so
/// the order changes when the table grows; callers must not depend on
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct JsonObject {
    slots: Vec<Option<Slot>>,
    len: usize,
}

impl JsonObject {
    /// An empty table, allocating nothing. Used for `{}`.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Result<Self, ParseError> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity)?;
        slots.resize_with(capacity, || None);
        Ok(Self { slots, len: 0 })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current bucket count.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Inserts a key/value pair.
    ///
    /// Duplicate keys are rejected: the pair is not inserted and
    /// [`ParseError::DuplicateKey`] is returned, which the parser turns
    /// into a whole-document failure. Key comparison is exact byte
    /// equality on the unescaped key.
    pub fn insert(&mut self, key: String, value: JsonValue) -> Result<(), ParseError> {
        // Keep the post-insert load factor at or below 2/3.
        if 3 * (self.len + 1) > 2 * self.slots.len() {
            self.grow()?;
        }
        let capacity = self.slots.len();
        let mut index = (hash_key(&key) % capacity as u64) as usize;
        loop {
            match &self.slots[index] {
                None => break,
                Some(slot) if slot.key == key => return Err(ParseError::DuplicateKey),
                Some(_) => index = (index + 1) % capacity,
            }
        }
        self.slots[index] = Some(Slot { key, value });
        self.len += 1;
        Ok(())
    }

    /// Doubles the bucket array (8 on first growth) and re-hashes every
    /// occupied slot into it.
    fn grow(&mut self) -> Result<(), ParseError> {
        let new_capacity = if self.slots.is_empty() {
            INITIAL_CAPACITY
        } else {
            self.slots.len() * 2
        };
        let mut new_slots = Vec::new();
        new_slots.try_reserve_exact(new_capacity)?;
        new_slots.resize_with(new_capacity, || None);
        let old_slots = mem::replace(&mut self.slots, new_slots);
        self.len = 0;
        for slot in old_slots.into_iter().flatten() {
            self.probe_insert(slot);
        }
        Ok(())
    }

    /// Probe-inserts a slot known not to be present. Only called with the
    /// table below its load limit.
    fn probe_insert(&mut self, slot: Slot) {
        let capacity = self.slots.len();
        let mut index = (hash_key(&slot.key) % capacity as u64) as usize;
        while self.slots[index].is_some() {
            index = (index + 1) % capacity;
        }
        self.slots[index] = Some(slot);
        self.len += 1;
    }

    /// Looks up a key; `None` is the distinguished absent indicator.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        if self.slots.is_empty() {
            return None;
        }
        let capacity = self.slots.len();
        let mut index = (hash_key(key) % capacity as u64) as usize;
        loop {
            match &self.slots[index] {
                None => return None,
                Some(slot) if slot.key == key => return Some(&slot.value),
                Some(_) => index = (index + 1) % capacity,
            }
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterates occupied buckets in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &JsonValue)> {
        self.slots
            .iter()
            .flatten()
            .map(|slot| (slot.key.as_str(), &slot.value))
    }
}

/// Equality is membership-based, independent of bucket layout.
impl PartialEq for JsonObject {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::ToString;

    #[test]
    fn empty_table_has_no_buckets() {
        let object = JsonObject::new();
        assert_eq!(object.capacity(), 0);
        assert_eq!(object.get("anything"), None);
        assert!(object.is_empty());
    }

    #[test]
    fn insert_then_get() {
        let mut object = JsonObject::new();
        object
            .insert("a".to_string(), JsonValue::Number(1.0))
            .unwrap();
        object.insert("b".to_string(), JsonValue::Bool(true)).unwrap();
        assert_eq!(object.get("a"), Some(&JsonValue::Number(1.0)));
        assert_eq!(object.get("b"), Some(&JsonValue::Bool(true)));
        assert_eq!(object.get("c"), None);
        assert_eq!(object.len(), 2);
    }

    #[test]
    fn duplicate_key_is_rejected_without_overwriting() {
        let mut object = JsonObject::new();
        object
            .insert("a".to_string(), JsonValue::Number(1.0))
            .unwrap();
        assert_eq!(
            object.insert("a".to_string(), JsonValue::Number(2.0)),
            Err(ParseError::DuplicateKey)
        );
        assert_eq!(object.get("a"), Some(&JsonValue::Number(1.0)));
        assert_eq!(object.len(), 1);
    }

    #[test]
    fn growth_doubles_capacity_once_past_the_load_limit() {
        let mut object = JsonObject::with_capacity(8).unwrap();
        // Five entries keep the load at or below 2/3 of 8 buckets.
        for i in 0..5 {
            object
                .insert(format!("key{i}"), JsonValue::Number(i as f64))
                .unwrap();
            assert_eq!(object.capacity(), 8);
        }
        // The sixth would push past 2/3, so the table doubles first.
        object
            .insert("key5".to_string(), JsonValue::Number(5.0))
            .unwrap();
        assert_eq!(object.capacity(), 16);
        // Nothing lost, nothing duplicated.
        assert_eq!(object.len(), 6);
        assert_eq!(object.iter().count(), 6);
        for i in 0..6 {
            assert_eq!(
                object.get(&format!("key{i}")),
                Some(&JsonValue::Number(i as f64))
            );
        }
    }

    #[test]
    fn colliding_keys_probe_to_free_buckets() {
        let mut object = JsonObject::with_capacity(8).unwrap();
        // All keys hash somewhere in 8 buckets; with 5 entries some will
        // collide and probe. They must all stay retrievable.
        for key in ["one", "two", "three", "four", "five"] {
            object.insert(key.to_string(), JsonValue::Null).unwrap();
        }
        for key in ["one", "two", "three", "four", "five"] {
            assert!(object.contains_key(key), "lost key {key}");
        }
    }

    #[test]
    fn equality_ignores_bucket_layout() {
        // Same members inserted in opposite order land in different
        // buckets when they collide; the tables must still compare equal.
        let keys = ["k0", "k1", "k2", "k3", "k4"];
        let mut forward = JsonObject::new();
        for (i, key) in keys.iter().enumerate() {
            forward
                .insert(key.to_string(), JsonValue::Number(i as f64))
                .unwrap();
        }
        let mut backward = JsonObject::new();
        for (i, key) in keys.iter().enumerate().rev() {
            backward
                .insert(key.to_string(), JsonValue::Number(i as f64))
                .unwrap();
        }
        assert_eq!(forward, backward);

        let mut shorter = JsonObject::new();
        shorter
            .insert("k0".to_string(), JsonValue::Number(0.0))
            .unwrap();
        assert_ne!(forward, shorter);
    }

    #[test]
    fn hash_is_the_classic_multiplicative_one() {
        // hash("") is the seed; each byte folds in as hash*33 + byte.
        assert_eq!(hash_key(""), 5381);
        assert_eq!(hash_key("a"), 5381 * 33 + u64::from(b'a'));
    }
}
