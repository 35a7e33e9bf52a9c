//! Space-optimized trie keyed by strings.

mod node;
mod tree;
mod trie;

pub use self::trie::{MapCursor, RadixTrie, DEFAULT_CHUNK_SIZE};
