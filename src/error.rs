use std::error;
use std::fmt;
use std::result;

/// An invariant violation found while validating a tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// The node designated as root has a parent link.
    RootHasParent,
    /// A child's parent link does not point back to the node holding it.
    ParentMismatch,
    /// An in-order traversal yielded keys that are not strictly increasing.
    OutOfOrder,
    /// The number of reachable nodes differs from the number of allocated nodes.
    LengthMismatch { expected: usize, actual: usize },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::RootHasParent => write!(f, "root node has a parent link"),
            Error::ParentMismatch => write!(f, "child node does not link back to its parent"),
            Error::OutOfOrder => write!(f, "keys are not in strictly increasing order"),
            Error::LengthMismatch { expected, actual } => {
                write!(f, "expected {} reachable nodes, found {}", expected, actual)
            },
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
