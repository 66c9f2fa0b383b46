//! An in-memory Lehman-Panigrahy cuckoo hash table ("LP-cuckoo").
//!
//! This crate implements a cuckoo hash table with `NUM_HASHES` hash functions, each owning
//! a parallel array of short linear-probing
//! runs ("buckets"). It reaches load factors close to 3.5-way cuckoo hashing at the storage
//! cost of roughly 2-way cuckoo, by combining two (or more) hash functions with
//! `BUCKET_WIDTH`-wide buckets at each hash position.
//!
//! The hash function, key/slot equality, and the empty/init/clear predicates are supplied
//! externally through the [`HashOps`] trait; [`SeaHashOps`] is a ready-to-use default built
//! on this codebase's own `seahash` crate.
//!
//! # Example
//!
//! ```
//! use lp_cuckoo::{CuckooTable, SeaHashOps};
//!
//! let mut table: CuckooTable<SeaHashOps<u64, &'static str>> = CuckooTable::with_capacity(16);
//! let (it, inserted) = table.insert(7, "seven").unwrap();
//! assert!(inserted);
//! assert_eq!(table.find(&7), it);
//! table.erase(it);
//! assert!(table.is_end(table.find(&7)));
//! ```
//!
//! Out of scope: dynamic resizing, thread-safety, iteration ordering, persistence, and
//! stable iterators across an eviction-causing insert.

mod bfs;
mod config;
mod error;
mod hash_ops;
mod iter;
mod table;

pub use config::Config;
pub use error::Error;
pub use hash_ops::{Entry, HashOps, SeaHashOps};
pub use iter::{Entries, Iter};
pub use table::CuckooTable;

/// Smallest `b` such that `b * divisor >= dividend`.
pub(crate) fn ceil_div(dividend: usize, divisor: usize) -> usize {
    (dividend + divisor - 1) / divisor
}
