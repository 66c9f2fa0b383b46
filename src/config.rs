//! Construction parameters for a [`CuckooTable`](crate::CuckooTable).

/// Parameters controlling how a table is sized and how hard `insert` searches for an
/// eviction chain before declaring the table full.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Target ratio of live entries to total slots.
    ///
    /// A reasonable default is 0.9; `capacity / load_factor` slots are allocated (rounded up)
    /// across the table's hash functions.
    pub load_factor: f64,
    /// Number of BFS frontier expansions `insert` performs before giving up and reporting
    /// [`Error::TableFull`](crate::Error::TableFull).
    ///
    /// Reference value: 100.
    pub max_bfs_rounds: usize,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            load_factor: 0.9,
            max_bfs_rounds: 100,
        }
    }
}
