//! The slot handle returned by `find` and `insert`, plus the `begin()..end()` walk over it.

use crate::hash_ops::HashOps;
use crate::table::CuckooTable;

/// A handle identifying a single slot by `(table, index)`.
///
/// Two iterators are equal iff their `(table, index)` pair matches. There is no ordering or
/// stability guarantee across a mutating operation: an `insert` that triggers an eviction
/// chain may relocate the slot an existing iterator pointed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Iter {
    pub(crate) table: usize,
    pub(crate) index: usize,
}

impl Iter {
    pub(crate) fn new(table: usize, index: usize) -> Iter {
        Iter { table, index }
    }

    /// The table this slot lives in.
    pub fn table(&self) -> usize {
        self.table
    }

    /// The index of this slot within its table.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Walks every occupied slot of a [`CuckooTable`] from `begin()` to `end()`, table-major,
/// index-minor. Skips empty slots; gives no ordering guarantee beyond that (spec.md §4.6).
///
/// Built with [`CuckooTable::iter`].
pub struct Entries<'a, H: HashOps> {
    pub(crate) table: &'a CuckooTable<H>,
    pub(crate) cur: Iter,
}

impl<'a, H: HashOps> Iterator for Entries<'a, H> {
    type Item = Iter;

    fn next(&mut self) -> Option<Iter> {
        while !self.table.is_end(self.cur) {
            let it = self.cur;
            self.cur = self.table.advance(self.cur);
            if !H::is_empty(self.table.get(it)) {
                return Some(it);
            }
        }
        None
    }
}
