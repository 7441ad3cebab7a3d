use crate::arena::Handle;
use crate::bst::{Side, Tree};
use crate::entry::Entry;
use crate::splay_tree::rotation;
use log::debug;
use std::borrow::Borrow;
use std::cmp::Ordering;

/// Rotates `handle` up until it is the root of `tree`, choosing the rotation from the shape formed
/// by the node, its parent, and its grandparent.
pub fn splay<T, U>(tree: &mut Tree<T, U>, handle: Handle) {
    while !tree.is_root(handle) {
        let parent = tree.parent(handle).expect("Expected non-root node to have a parent.");
        let side = tree.child_side(parent, handle);
        match tree.side_of(parent) {
            None => match side {
                Side::Left => rotation::zig(tree, handle),
                Side::Right => rotation::zag(tree, handle),
            },
            Some(parent_side) => match (parent_side, side) {
                (Side::Left, Side::Left) => rotation::zig_zig(tree, handle),
                (Side::Right, Side::Right) => rotation::zag_zag(tree, handle),
                (Side::Right, Side::Left) => rotation::zig_zag(tree, handle),
                (Side::Left, Side::Right) => rotation::zag_zig(tree, handle),
            },
        }
    }
    tree.set_root(Some(handle));
}

pub fn insert<T, U>(tree: &mut Tree<T, U>, key: T, value: U) -> Option<Entry<T, U>>
where
    T: Ord,
{
    let (handle, old_entry) = tree.insert(key, value);
    splay(tree, handle);
    debug!(
        "insert {} entry, {} nodes",
        if old_entry.is_some() { "replaced" } else { "added" },
        tree.len(),
    );
    old_entry
}

/// Searches for `key` and splays the node the search ended on, whether or not it holds `key`.
pub fn contains<T, U, V>(tree: &mut Tree<T, U>, key: &V) -> bool
where
    T: Borrow<V> + Ord,
    V: Ord + ?Sized,
{
    match tree.find(key) {
        Some((handle, ordering)) => {
            splay(tree, handle);
            ordering == Ordering::Equal
        },
        None => false,
    }
}

pub fn get<'a, T, U, V>(tree: &'a mut Tree<T, U>, key: &V) -> Option<&'a Entry<T, U>>
where
    T: Borrow<V> + Ord,
    V: Ord + ?Sized,
{
    if !contains(tree, key) {
        return None;
    }
    let root = tree.root().expect("Expected non-empty tree.");
    Some(&tree.node(root).entry)
}

pub fn get_mut<'a, T, U, V>(tree: &'a mut Tree<T, U>, key: &V) -> Option<&'a mut Entry<T, U>>
where
    T: Borrow<V> + Ord,
    V: Ord + ?Sized,
{
    if !contains(tree, key) {
        return None;
    }
    let root = tree.root().expect("Expected non-empty tree.");
    Some(&mut tree.node_mut(root).entry)
}

pub fn remove<T, U, V>(tree: &mut Tree<T, U>, key: &V) -> Option<Entry<T, U>>
where
    T: Borrow<V> + Ord,
    V: Ord + ?Sized,
{
    if !contains(tree, key) {
        return None;
    }
    let handle = tree.root().expect("Expected non-empty tree.");
    let entry = remove_node(tree, handle);
    debug!("remove entry, {} nodes", tree.len());
    Some(entry)
}

// Always splays the parent of the node that physically leaves the tree. A node with two children
// stays in place and takes over the entry of its in-order successor, which is removed instead.
fn remove_node<T, U>(tree: &mut Tree<T, U>, handle: Handle) -> Entry<T, U> {
    let (left, right) = {
        let node = tree.node(handle);
        (node.left, node.right)
    };
    match right {
        Some(right) if Tree::<T, U>::is_internal(left) => {
            let successor = tree.min_from(right);
            debug!("removing node with two children through its in-order successor");
            let successor_entry = remove_node(tree, successor);
            tree.replace(handle, successor_entry)
        },
        _ => {
            let parent = tree.parent(handle);
            let entry = tree.remove(handle);
            if let Some(parent) = parent {
                splay(tree, parent);
            }
            entry
        },
    }
}
