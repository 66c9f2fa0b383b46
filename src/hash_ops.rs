//! The `HashOps` capability bundle.
//!
//! The hash function, the key/slot equality test, and the empty/init/clear predicates are
//! kept external to the table engine, consumed through a single trait/interface bundle. This
//! module defines that trait plus one ready-to-use implementation, [`SeaHashOps`], built on
//! this codebase's own `seahash` crate.

use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use seahash::SeaHasher;

/// The capability bundle a [`CuckooTable`](crate::CuckooTable) needs from its key, value and
/// slot types.
///
/// `NUM_HASHES` is the number of independent hash functions (and tables); at least 2 are
/// required. `BUCKET_WIDTH` is the probe length inside a bucket; 2-4 is a reasonable range.
/// Both should be small compile-time constants so the engine's inner loops stay
/// branch-free after monomorphization.
pub trait HashOps {
    /// The logical key type.
    type Key;
    /// The payload carried alongside a key (use `()` for a pure set).
    type Value;
    /// The physical slot representation. Opaque to the engine except through this trait.
    type Slot;

    /// Number of hash functions / tables. Must be >= 2.
    const NUM_HASHES: usize;
    /// Probe length inside a bucket. Must be >= 1.
    const BUCKET_WIDTH: usize;

    /// Allocate a slot array of length `len`, every element empty.
    fn alloc(len: usize) -> Vec<Self::Slot>;

    /// Hash `key` under function index `index`.
    fn hash_key(index: usize, key: &Self::Key) -> u64;

    /// Hash the logical key stored in `slot` under function index `index`.
    ///
    /// For any occupied slot `s` storing logical key `k`, `hash_slot(i, s) == hash_key(i,
    /// k)` must hold -- the BFS eviction search rehashes occupants by slot alone.
    fn hash_slot(index: usize, slot: &Self::Slot) -> u64;

    /// True iff `slot` is occupied and stores `key`. `hash` is an advisory precomputed hash.
    fn equals(hash: u64, key: &Self::Key, slot: &Self::Slot) -> bool;

    /// True iff `slot` is in the empty state.
    fn is_empty(slot: &Self::Slot) -> bool;

    /// Write `key` and `value` into `slot` under hash index `index` (whose precomputed hash
    /// is `hash`). Post: `!is_empty(slot)`.
    fn init(index: usize, hash: u64, key: Self::Key, value: Self::Value, slot: &mut Self::Slot);

    /// Clear `slot`. Post: `is_empty(slot)`.
    fn clear(slot: &mut Self::Slot);
}

/// A slot holding either nothing or a key/value pair.
///
/// This is the crate's ready-to-use slot type; it pairs with [`SeaHashOps`]. Modeled after
/// the `Contains`/`Empty` split this codebase's sibling concurrent hash map uses for its own
/// bucket state, minus the tombstone state -- the engine never needs one, since `find` never
/// stops scanning a bucket at an empty slot.
#[derive(Clone, Debug)]
pub enum Entry<K, T> {
    /// No entry has ever been placed here, or it was erased.
    Empty,
    /// A live key/value pair.
    Occupied(K, T),
}

impl<K, T> Default for Entry<K, T> {
    fn default() -> Entry<K, T> {
        Entry::Empty
    }
}

/// The crate's default [`HashOps`]: `NUM_HASHES = 2`, `BUCKET_WIDTH = 2`, hashed with
/// `seahash::SeaHasher`.
///
/// The two (or more, see [`HashOps::NUM_HASHES`]) hash functions are obtained from one
/// hasher by folding the table index into the byte stream ahead of the key, rather than by
/// keeping `NUM_HASHES` unrelated hashers around.
pub struct SeaHashOps<K, T>(PhantomData<fn() -> (K, T)>);

impl<K: Hash + Eq, T> HashOps for SeaHashOps<K, T> {
    type Key = K;
    type Value = T;
    type Slot = Entry<K, T>;

    const NUM_HASHES: usize = 2;
    const BUCKET_WIDTH: usize = 2;

    fn alloc(len: usize) -> Vec<Entry<K, T>> {
        let mut slots = Vec::with_capacity(len);
        slots.resize_with(len, Entry::default);
        slots
    }

    fn hash_key(index: usize, key: &K) -> u64 {
        let mut hasher = SeaHasher::new();
        index.hash(&mut hasher);
        key.hash(&mut hasher);
        hasher.finish()
    }

    fn hash_slot(index: usize, slot: &Entry<K, T>) -> u64 {
        match slot {
            Entry::Occupied(key, _) => Self::hash_key(index, key),
            Entry::Empty => 0,
        }
    }

    fn equals(_hash: u64, key: &K, slot: &Entry<K, T>) -> bool {
        match slot {
            Entry::Occupied(candidate, _) => candidate == key,
            Entry::Empty => false,
        }
    }

    fn is_empty(slot: &Entry<K, T>) -> bool {
        matches!(slot, Entry::Empty)
    }

    fn init(_index: usize, _hash: u64, key: K, value: T, slot: &mut Entry<K, T>) {
        *slot = Entry::Occupied(key, value);
    }

    fn clear(slot: &mut Entry<K, T>) {
        *slot = Entry::Empty;
    }
}
