//! Slot storage, lookup, the `insert` fast path, and deletion.
//!
//! The BFS eviction search that `insert` falls back to lives in `bfs.rs`, as a second `impl`
//! block on [`CuckooTable`].

use slog::{o, Logger};

use crate::bfs::BfsNode;
use crate::config::Config;
use crate::error::Error;
use crate::hash_ops::HashOps;
use crate::iter::{Entries, Iter};

/// An in-memory Lehman-Panigrahy cuckoo hash table.
///
/// `H::NUM_HASHES` parallel tables of `H::Slot`, each addressed with overflow-tail probing:
/// a bucket based at `p` occupies the straight range `p .. p + H::BUCKET_WIDTH`, so every
/// table is allocated `B + H::BUCKET_WIDTH` slots and bases never run past the allocation.
pub struct CuckooTable<H: HashOps> {
    pub(crate) tables: Vec<Vec<H::Slot>>,
    /// Number of valid bucket bases per table; each table is allocated
    /// `b + H::BUCKET_WIDTH` slots.
    pub(crate) b: usize,
    pub(crate) max_bfs_rounds: usize,
    pub(crate) log: Logger,
    len: usize,

    // Scratch, reused across calls to avoid per-insert allocation.
    pub(crate) queue: Vec<BfsNode>,
    pub(crate) chain: Vec<Iter>,
    pub(crate) hashes: Vec<u64>,
}

impl<H: HashOps> CuckooTable<H> {
    /// Build a table sized for `capacity` entries at `config.load_factor`:
    /// `B = ceil(capacity / load_factor / NUM_HASHES)`.
    pub fn new(capacity: usize, config: Config) -> CuckooTable<H> {
        assert!(H::NUM_HASHES >= 2, "HashOps::NUM_HASHES must be at least 2");
        assert!(H::BUCKET_WIDTH >= 1, "HashOps::BUCKET_WIDTH must be at least 1");
        assert!(config.load_factor > 0.0 && config.load_factor <= 1.0, "load_factor must be in (0, 1]");

        let total_slots_needed = (capacity as f64 / config.load_factor).ceil() as usize;
        let b = crate::ceil_div(total_slots_needed.max(1), H::NUM_HASHES);
        let table_len = b + H::BUCKET_WIDTH;

        CuckooTable {
            tables: (0..H::NUM_HASHES).map(|_| H::alloc(table_len)).collect(),
            b,
            max_bfs_rounds: config.max_bfs_rounds,
            log: Logger::root(slog::Discard, o!()),
            len: 0,
            queue: Vec::new(),
            chain: Vec::new(),
            hashes: Vec::with_capacity(H::NUM_HASHES),
        }
    }

    /// Build a table with [`Config::default`].
    pub fn with_capacity(capacity: usize) -> CuckooTable<H> {
        CuckooTable::new(capacity, Config::default())
    }

    /// Attach a logger; `debug!`/`warn!` records are emitted when
    /// an eviction chain resolves an insert and when `insert` reports the table full.
    pub fn set_logger(&mut self, log: Logger) {
        self.log = log;
    }

    /// The number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Is the table empty of live entries?
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bucket bases per table (`B`).
    pub fn buckets(&self) -> usize {
        self.b
    }

    /// The end iterator: `(H::NUM_HASHES, 0)`, never the coordinate of a live slot.
    pub fn end(&self) -> Iter {
        Iter::new(H::NUM_HASHES, 0)
    }

    /// The begin iterator: `(0, 0)`, the first coordinate in table-major, index-minor order.
    ///
    /// Like every coordinate between `begin()` and `end()`, this may name an empty slot;
    /// walk with [`advance`](Self::advance) to visit every slot, or use [`iter`](Self::iter)
    /// to skip straight to occupied ones.
    pub fn begin(&self) -> Iter {
        Iter::new(0, 0)
    }

    /// Step `it` to the next coordinate in table-major, index-minor order, wrapping from the
    /// last slot of one table to the first slot of the next and yielding `end()` once the
    /// last table's last slot has been passed.
    pub fn advance(&self, it: Iter) -> Iter {
        if self.is_end(it) {
            return it;
        }
        let next_index = it.index() + 1;
        if next_index < self.tables[it.table()].len() {
            Iter::new(it.table(), next_index)
        } else if it.table() + 1 < H::NUM_HASHES {
            Iter::new(it.table() + 1, 0)
        } else {
            self.end()
        }
    }

    /// Iterate over the coordinates of every occupied slot, from `begin()` to `end()`,
    /// skipping empty slots. No ordering guarantee beyond table-major, index-minor.
    pub fn iter(&self) -> Entries<'_, H> {
        Entries {
            table: self,
            cur: self.begin(),
        }
    }

    /// Is `it` the end iterator?
    pub fn is_end(&self, it: Iter) -> bool {
        it.table() == H::NUM_HASHES
    }

    pub(crate) fn bucket_base(&self, hash: u64) -> usize {
        (hash % self.b as u64) as usize
    }

    fn slot(&self, it: Iter) -> &H::Slot {
        &self.tables[it.table()][it.index()]
    }

    /// Dereference an iterator returned by `find` or `insert`.
    ///
    /// Panics if `it` is the end iterator; callers should check `is_end` first, exactly as
    /// they would with `std::collections::HashMap`'s `Entry` API.
    pub fn get(&self, it: Iter) -> &H::Slot {
        assert!(!self.is_end(it), "cannot dereference the end iterator");
        self.slot(it)
    }

    /// Look up `key`.
    ///
    /// Scans the bucket at each of `H::NUM_HASHES` hash positions. The scan is eager: an
    /// empty slot inside a bucket does not terminate the scan, because a prior insertion may
    /// have relocated the matching entry further along the same bucket.
    pub fn find(&self, key: &H::Key) -> Iter {
        for i in 0..H::NUM_HASHES {
            let h = H::hash_key(i, key);
            let base = self.bucket_base(h);
            for j in base..base + H::BUCKET_WIDTH {
                if H::equals(h, key, &self.tables[i][j]) {
                    return Iter::new(i, j);
                }
            }
        }
        self.end()
    }

    /// Insert `key` with payload `value`.
    ///
    /// Returns `(iterator, false)` with `iterator` pointing at the existing slot if `key` is
    /// already present. Otherwise places the key -- in an empty slot of one of its two home
    /// buckets if one exists (Phase 1), or via a BFS-driven eviction chain if both home
    /// buckets are full (Phase 2) -- and returns `(iterator, true)`.
    ///
    /// Errs with [`Error::TableFull`] if the BFS search exhausts
    /// [`Config::max_bfs_rounds`] without finding a relocation chain.
    pub fn insert(&mut self, key: H::Key, value: H::Value) -> Result<(Iter, bool), Error> {
        self.hashes.clear();
        for i in 0..H::NUM_HASHES {
            self.hashes.push(H::hash_key(i, &key));
        }

        // Phase 1: scan both home buckets. Remember the first empty slot, but keep scanning
        // every slot of both buckets -- the real entry may sit further along either bucket.
        let mut candidate: Option<Iter> = None;
        for i in 0..H::NUM_HASHES {
            let h = self.hashes[i];
            let base = self.bucket_base(h);
            for j in base..base + H::BUCKET_WIDTH {
                let slot = &self.tables[i][j];
                if H::equals(h, &key, slot) {
                    return Ok((Iter::new(i, j), false));
                }
                if candidate.is_none() && H::is_empty(slot) {
                    candidate = Some(Iter::new(i, j));
                }
            }
        }

        if let Some(c) = candidate {
            let h = self.hashes[c.table()];
            H::init(c.table(), h, key, value, &mut self.tables[c.table()][c.index()]);
            self.len += 1;
            return Ok((c, true));
        }

        // Phase 2: both home buckets are full. Fall back to the BFS eviction search.
        let hashes = self.hashes.clone();
        let result = self.bfs_insert(key, value, &hashes);
        if result.is_ok() {
            self.len += 1;
        }
        result
    }

    /// Erase the slot `it` points at. No tombstone is written: `find` never stops scanning a
    /// bucket at an empty slot, so none is needed.
    pub fn erase(&mut self, it: Iter) {
        assert!(!self.is_end(it), "cannot erase the end iterator");
        let slot = &mut self.tables[it.table()][it.index()];
        if !H::is_empty(slot) {
            H::clear(slot);
            self.len -= 1;
        }
    }

    /// Swap the contents of two slots, which may live in different tables.
    pub(crate) fn swap_slots(&mut self, a: Iter, b: Iter) {
        if a.table() == b.table() {
            self.tables[a.table()].swap(a.index(), b.index());
        } else {
            let (lo, hi) = if a.table() < b.table() {
                (a.table(), b.table())
            } else {
                (b.table(), a.table())
            };
            let (left, right) = self.tables.split_at_mut(hi);
            let lo_row = &mut left[lo];
            let hi_row = &mut right[0];
            if a.table() < b.table() {
                std::mem::swap(&mut lo_row[a.index()], &mut hi_row[b.index()]);
            } else {
                std::mem::swap(&mut hi_row[a.index()], &mut lo_row[b.index()]);
            }
        }
    }
}
