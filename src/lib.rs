//! Ordered collections backed by a splay tree.
//!
//! Nodes live in an arena and keep a link to their parent, so every access walks the accessed
//! node up to the root with zig, zig-zig, and zig-zag rotations. Rotations are logged through the
//! `log` facade at `trace` level.

mod arena;
mod bst;
mod entry;
mod error;
pub mod splay_tree;

pub use crate::error::{Error, Result};
