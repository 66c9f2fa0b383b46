//! Phase 2 of `insert`: the BFS eviction search and the chain of swaps that carries it out.
//!
//! Reached only once `CuckooTable::insert`'s Phase 1 finds both of a key's home buckets
//! completely full.

use slog::{debug, warn};

use crate::error::Error;
use crate::hash_ops::HashOps;
use crate::iter::Iter;
use crate::table::CuckooTable;

/// A node in the BFS eviction search.
///
/// `coord` is the slot this node examines; `parent` is the id (queue position) of the node
/// whose alternate-bucket probe enqueued it, or `None` for one of the `H::NUM_HASHES *
/// H::BUCKET_WIDTH` seed nodes planted in the key's own home buckets.
pub(crate) struct BfsNode {
    pub(crate) parent: Option<usize>,
    pub(crate) coord: Iter,
}

impl<H: HashOps> CuckooTable<H> {
    /// Run the BFS eviction search for `key`/`value`, whose hash under function `i` is
    /// `hashes[i]`.
    ///
    /// Seeds the queue with every slot of both home buckets, then repeatedly pulls the next
    /// frontier node, rehashes its current occupant under every alternate table index, and
    /// either (a) finds an empty alternate slot -- ending the search by walking the chain
    /// back to a root seed and bubbling the empty slot home -- or (b) enqueues the alternate
    /// as a new frontier node. Bounded by `self.max_bfs_rounds` frontier expansions.
    pub(crate) fn bfs_insert(
        &mut self,
        key: H::Key,
        value: H::Value,
        hashes: &[u64],
    ) -> Result<(Iter, bool), Error> {
        self.queue.clear();
        for i in 0..H::NUM_HASHES {
            let base = self.bucket_base(hashes[i]);
            for j in base..base + H::BUCKET_WIDTH {
                self.queue.push(BfsNode {
                    parent: None,
                    coord: Iter::new(i, j),
                });
            }
        }

        let mut qi = 0;
        let mut rounds = 0;
        while qi < self.queue.len() {
            if rounds >= self.max_bfs_rounds {
                break;
            }

            let c = self.queue[qi].coord;
            for j in 0..H::NUM_HASHES {
                if j == c.table() {
                    continue;
                }

                let rehashed = H::hash_slot(j, &self.tables[c.table()][c.index()]);
                let base = self.bucket_base(rehashed);
                for idx in base..base + H::BUCKET_WIDTH {
                    let d = Iter::new(j, idx);
                    if H::is_empty(&self.tables[j][idx]) {
                        let root = self.evict_chain(qi, d);
                        let h = hashes[root.table()];
                        H::init(root.table(), h, key, value, &mut self.tables[root.table()][root.index()]);
                        debug!(
                            self.log,
                            "resolved insert via eviction chain";
                            "chain_len" => self.chain.len(),
                            "rounds" => rounds
                        );
                        return Ok((root, true));
                    }
                    self.queue.push(BfsNode {
                        parent: Some(qi),
                        coord: d,
                    });
                }
            }

            qi += 1;
            rounds += 1;
        }

        warn!(self.log, "insert failed: table full"; "rounds" => rounds, "frontier" => self.queue.len());
        Err(Error::TableFull)
    }

    /// Reconstruct the chain from the empty coordinate `empty` back to its root seed via
    /// parent links starting at BFS node `tail_id` (the node whose alternate-bucket probe
    /// discovered `empty`), then bubble the empty slot from `empty` to the root by swapping
    /// adjacent links in chain order.
    ///
    /// Returns the now-empty root coordinate, which lies inside one of the key's own home
    /// buckets.
    fn evict_chain(&mut self, tail_id: usize, empty: Iter) -> Iter {
        self.chain.clear();
        self.chain.push(empty);
        self.chain.push(self.queue[tail_id].coord);

        let mut cur = tail_id;
        while let Some(parent) = self.queue[cur].parent {
            debug_assert!(parent < self.queue.len(), "BFS parent index out of range");
            cur = parent;
            self.chain.push(self.queue[cur].coord);
        }

        let len = self.chain.len();
        debug_assert!(len >= 2, "eviction chain shorter than 2 slots");

        // Bubble the empty slot from the tail (chain[0]) to the root (chain[len - 1]): each
        // swap moves the empty slot one link further from `empty` and leaves every
        // intermediate slot holding the value that previously lived one step closer to
        // `empty`.
        for i in 0..len - 1 {
            let a = self.chain[i];
            let b = self.chain[i + 1];
            self.swap_slots(a, b);
        }

        let root = self.chain[len - 1];
        debug_assert!(
            H::is_empty(&self.tables[root.table()][root.index()]),
            "eviction chain left the root slot occupied"
        );
        root
    }
}
