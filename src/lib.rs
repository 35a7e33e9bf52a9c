//! A string-keyed map backed by a compressed prefix tree.
//!
//! [`RadixTrie`] supports exact lookups, lazy removal, and prefix enumeration whose callback may
//! remove keys while the walk is in progress. The [`perf`] module contains a small harness that
//! times bulk operations over a newline-delimited word list.

pub mod arena;
pub mod perf;
pub mod radix;

pub use crate::radix::{MapCursor, RadixTrie};
