//! Errors produced by the table engine.

use quick_error::quick_error;

quick_error! {
    /// The one failure mode the engine reports.
    ///
    /// The reference design treats an exhausted eviction search as fatal (process abort);
    /// this crate surfaces it as an ordinary `Result` so a caller can rehash into a larger
    /// table instead of crashing.
    #[derive(Debug)]
    pub enum Error {
        /// `insert` exhausted its BFS round budget without finding a slot to relocate into.
        TableFull {
            display("cuckoo table is full: no eviction chain found within the BFS round budget")
        }
    }
}
