//! Single and double rotations over a parent-linked tree.
//!
//! Every rotation takes the node being promoted. None of them touch the tree's root handle: when a
//! rotation leaves the promoted node without a parent, the caller must make it the root.

use crate::arena::Handle;
use crate::bst::{Side, Tree};
use log::trace;

// Promotes `x` above its parent `y`, where `x` hangs from `y`'s `side` link. Touches exactly the
// links between `x`, `y`, the grandparent, and `x`'s inner subtree.
fn rotate<T, U>(tree: &mut Tree<T, U>, x: Handle, side: Side) {
    let y = tree.parent(x).expect("Expected rotated node to have a parent.");
    assert_eq!(
        tree.child_side(y, x),
        side,
        "Error: rotated node is on the wrong side of its parent.",
    );
    let grandparent = tree.parent(y);
    let inner = tree.node(x).child(side.opposite());

    *tree.node_mut(y).child_mut(side) = inner;
    if let Some(inner) = inner {
        tree.node_mut(inner).parent = Some(y);
    }

    if let Some(grandparent) = grandparent {
        let parent_side = tree.child_side(grandparent, y);
        *tree.node_mut(grandparent).child_mut(parent_side) = Some(x);
    }
    tree.node_mut(x).parent = grandparent;

    *tree.node_mut(x).child_mut(side.opposite()) = Some(y);
    tree.node_mut(y).parent = Some(x);
}

fn parent_of<T, U>(tree: &Tree<T, U>, x: Handle) -> Handle {
    tree.parent(x).expect("Expected rotated node to have a parent.")
}

/// Promotes `x`, a left child, above its parent.
pub fn zig<T, U>(tree: &mut Tree<T, U>, x: Handle) {
    trace!("zig");
    rotate(tree, x, Side::Left);
}

/// Promotes `x`, a right child, above its parent.
pub fn zag<T, U>(tree: &mut Tree<T, U>, x: Handle) {
    trace!("zag");
    rotate(tree, x, Side::Right);
}

/// `x` and its parent are both left children: rotates the grandparent first.
pub fn zig_zig<T, U>(tree: &mut Tree<T, U>, x: Handle) {
    trace!("zig-zig");
    let parent = parent_of(tree, x);
    rotate(tree, parent, Side::Left);
    rotate(tree, x, Side::Left);
}

/// `x` and its parent are both right children: rotates the grandparent first.
pub fn zag_zag<T, U>(tree: &mut Tree<T, U>, x: Handle) {
    trace!("zag-zag");
    let parent = parent_of(tree, x);
    rotate(tree, parent, Side::Right);
    rotate(tree, x, Side::Right);
}

/// `x` is the left child of a right child.
pub fn zig_zag<T, U>(tree: &mut Tree<T, U>, x: Handle) {
    trace!("zig-zag");
    rotate(tree, x, Side::Left);
    rotate(tree, x, Side::Right);
}

/// `x` is the right child of a left child.
pub fn zag_zig<T, U>(tree: &mut Tree<T, U>, x: Handle) {
    trace!("zag-zig");
    rotate(tree, x, Side::Right);
    rotate(tree, x, Side::Left);
}

#[cfg(test)]
mod tests {
    use super::{zag, zag_zag, zag_zig, zig, zig_zag, zig_zig};
    use crate::arena::Handle;
    use crate::bst::Tree;

    fn build(keys: &[u32]) -> Tree<u32, ()> {
        let mut tree = Tree::new();
        for key in keys {
            tree.insert(*key, ());
        }
        tree
    }

    fn handle(tree: &Tree<u32, ()>, key: u32) -> Handle {
        tree.find(&key).unwrap().0
    }

    fn render(tree: &Tree<u32, ()>, link: Option<Handle>) -> String {
        match link {
            None => String::from("."),
            Some(handle) => {
                let node = tree.node(handle);
                format!(
                    "({} {} {})",
                    render(tree, node.left),
                    node.entry.key,
                    render(tree, node.right),
                )
            },
        }
    }

    // Finishes a rotation the way the splay controller does and renders the result.
    fn commit(tree: &mut Tree<u32, ()>, x: Handle) -> String {
        assert!(tree.is_root(x));
        tree.set_root(Some(x));
        assert!(tree.validate().is_ok());
        render(tree, tree.root())
    }

    #[test]
    fn test_zig() {
        let mut tree = build(&[4, 2, 5, 1, 3]);
        let x = handle(&tree, 2);
        zig(&mut tree, x);
        assert_eq!(commit(&mut tree, x), "((. 1 .) 2 ((. 3 .) 4 (. 5 .)))");
    }

    #[test]
    fn test_zag() {
        let mut tree = build(&[2, 1, 4, 3, 5]);
        let x = handle(&tree, 4);
        zag(&mut tree, x);
        assert_eq!(commit(&mut tree, x), "(((. 1 .) 2 (. 3 .)) 4 (. 5 .))");
    }

    #[test]
    fn test_zig_retargets_grandparent() {
        let mut tree = build(&[10, 4, 2, 6, 12]);
        let x = handle(&tree, 2);
        zig(&mut tree, x);

        let root = tree.root().unwrap();
        assert_eq!(tree.node(root).left, Some(x));
        assert_eq!(tree.parent(x), Some(root));
        assert!(tree.validate().is_ok());
        assert_eq!(render(&tree, tree.root()), "((. 2 (. 4 (. 6 .))) 10 (. 12 .))");
    }

    #[test]
    fn test_rotation_leaves_root_handle_to_caller() {
        let mut tree = build(&[2, 1]);
        let old_root = tree.root();
        let x = handle(&tree, 1);
        zig(&mut tree, x);
        assert_eq!(tree.root(), old_root);
        assert!(tree.is_root(x));
    }

    #[test]
    fn test_zig_zig() {
        let mut tree = build(&[3, 2, 1]);
        let x = handle(&tree, 1);
        zig_zig(&mut tree, x);
        assert_eq!(commit(&mut tree, x), "(. 1 (. 2 (. 3 .)))");
    }

    #[test]
    fn test_zag_zag() {
        let mut tree = build(&[1, 2, 3]);
        let x = handle(&tree, 3);
        zag_zag(&mut tree, x);
        assert_eq!(commit(&mut tree, x), "(((. 1 .) 2 .) 3 .)");
    }

    #[test]
    fn test_zig_zag() {
        let mut tree = build(&[1, 3, 2]);
        let x = handle(&tree, 2);
        zig_zag(&mut tree, x);
        assert_eq!(commit(&mut tree, x), "((. 1 .) 2 (. 3 .))");
    }

    #[test]
    fn test_zag_zig() {
        let mut tree = build(&[3, 1, 2]);
        let x = handle(&tree, 2);
        zag_zig(&mut tree, x);
        assert_eq!(commit(&mut tree, x), "((. 1 .) 2 (. 3 .))");
    }

    #[test]
    fn test_zig_zig_with_subtrees() {
        let mut tree = build(&[6, 4, 7, 2, 5, 1, 3]);
        let x = handle(&tree, 2);
        zig_zig(&mut tree, x);
        assert_eq!(
            commit(&mut tree, x),
            "((. 1 .) 2 ((. 3 .) 4 ((. 5 .) 6 (. 7 .))))",
        );
    }

    #[test]
    #[should_panic]
    fn test_zig_root() {
        let mut tree = build(&[1]);
        let x = handle(&tree, 1);
        zig(&mut tree, x);
    }

    #[test]
    #[should_panic]
    fn test_zig_right_child() {
        let mut tree = build(&[1, 2]);
        let x = handle(&tree, 2);
        zig(&mut tree, x);
    }

    #[test]
    #[should_panic]
    fn test_zag_left_child() {
        let mut tree = build(&[2, 1]);
        let x = handle(&tree, 1);
        zag(&mut tree, x);
    }

    #[test]
    #[should_panic]
    fn test_zig_zig_without_grandparent() {
        let mut tree = build(&[2, 1]);
        let x = handle(&tree, 1);
        zig_zig(&mut tree, x);
    }

    #[test]
    #[should_panic]
    fn test_zag_zag_without_grandparent() {
        let mut tree = build(&[1, 2]);
        let x = handle(&tree, 2);
        zag_zag(&mut tree, x);
    }

    #[test]
    #[should_panic]
    fn test_zag_zag_parent_left_child() {
        let mut tree = build(&[3, 1, 2]);
        let x = handle(&tree, 2);
        zag_zag(&mut tree, x);
    }

    #[test]
    #[should_panic]
    fn test_zig_zag_without_grandparent() {
        let mut tree = build(&[2, 1]);
        let x = handle(&tree, 1);
        zig_zag(&mut tree, x);
    }

    #[test]
    #[should_panic]
    fn test_zig_zag_right_child() {
        let mut tree = build(&[1, 2, 3]);
        let x = handle(&tree, 3);
        zig_zag(&mut tree, x);
    }

    #[test]
    #[should_panic]
    fn test_zag_zig_without_grandparent() {
        let mut tree = build(&[1, 2]);
        let x = handle(&tree, 2);
        zag_zig(&mut tree, x);
    }

    #[test]
    #[should_panic]
    fn test_zag_zig_left_child() {
        let mut tree = build(&[3, 2, 1]);
        let x = handle(&tree, 1);
        zag_zig(&mut tree, x);
    }
}
