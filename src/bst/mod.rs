//! Plain binary search tree with parent links. It provides ordered search, raw insertion and
//! removal, and structural queries, and never rebalances.

mod node;
mod tree;

pub use self::node::Side;
pub use self::tree::{Entries, EntriesMut, IntoEntries, Tree};
