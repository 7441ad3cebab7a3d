use crate::arena::{Arena, Handle};
use crate::bst::node::{Node, Side};
use crate::entry::Entry;
use crate::error::{Error, Result};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;
use std::vec;

/// An unbalanced binary search tree whose nodes carry parent links.
///
/// The tree never rebalances itself. Callers restructure it through `node_mut` and `set_root`, and
/// are responsible for leaving the root handle pointing at the parentless node.
pub struct Tree<T, U> {
    arena: Arena<Node<T, U>>,
    root: Option<Handle>,
}

impl<T, U> Tree<T, U> {
    pub fn new() -> Self {
        Tree {
            arena: Arena::new(),
            root: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Tree {
            arena: Arena::with_capacity(capacity),
            root: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    pub fn root(&self) -> Option<Handle> {
        self.root
    }

    pub fn set_root(&mut self, root: Option<Handle>) {
        self.root = root;
    }

    pub fn node(&self, handle: Handle) -> &Node<T, U> {
        &self.arena[handle]
    }

    pub fn node_mut(&mut self, handle: Handle) -> &mut Node<T, U> {
        &mut self.arena[handle]
    }

    pub fn parent(&self, handle: Handle) -> Option<Handle> {
        self.node(handle).parent
    }

    pub fn is_root(&self, handle: Handle) -> bool {
        self.parent(handle).is_none()
    }

    pub fn is_external(link: Option<Handle>) -> bool {
        link.is_none()
    }

    pub fn is_internal(link: Option<Handle>) -> bool {
        link.is_some()
    }

    /// Returns which child of `parent` the node `child` is.
    ///
    /// # Panics
    ///
    /// Panics if `child` is not a child of `parent`.
    pub fn child_side(&self, parent: Handle, child: Handle) -> Side {
        let node = self.node(parent);
        if node.left == Some(child) {
            Side::Left
        } else if node.right == Some(child) {
            Side::Right
        } else {
            panic!("Error: node is not a child of its parent.");
        }
    }

    /// Returns which child of its parent `handle` is, or `None` for a parentless node.
    pub fn side_of(&self, handle: Handle) -> Option<Side> {
        self.parent(handle).map(|parent| self.child_side(parent, handle))
    }

    pub fn min_from(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.node(handle).left {
            handle = left;
        }
        handle
    }

    pub fn max_from(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.node(handle).right {
            handle = right;
        }
        handle
    }

    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(Handle, usize)> = self.root.into_iter().map(|root| (root, 1)).collect();
        while let Some((handle, depth)) = stack.pop() {
            height = height.max(depth);
            let node = self.node(handle);
            stack.extend(node.left.into_iter().chain(node.right).map(|child| (child, depth + 1)));
        }
        height
    }

    /// Overwrites the entry stored at `handle` and returns the previous one.
    pub fn replace(&mut self, handle: Handle, entry: Entry<T, U>) -> Entry<T, U> {
        mem::replace(&mut self.node_mut(handle).entry, entry)
    }

    /// Splices out a node with at most one child, promoting that child into its position.
    ///
    /// # Panics
    ///
    /// Panics if the node has two children.
    pub fn remove(&mut self, handle: Handle) -> Entry<T, U> {
        let (parent, child) = {
            let node = self.node(handle);
            assert!(
                Self::is_external(node.left) || Self::is_external(node.right),
                "Error: attempting to splice out a node with two children.",
            );
            (node.parent, node.left.or(node.right))
        };
        if let Some(child) = child {
            self.node_mut(child).parent = parent;
        }
        match parent {
            Some(parent) => {
                let side = self.child_side(parent, handle);
                *self.node_mut(parent).child_mut(side) = child;
            },
            None => self.root = child,
        }
        self.arena.free(handle).entry
    }

    pub fn handles(&self) -> Handles<T, U> {
        Handles {
            tree: self,
            current: self.root,
            stack: Vec::new(),
        }
    }

    pub fn entries(&self) -> Entries<T, U> {
        Entries { handles: self.handles() }
    }

    pub fn entries_mut(&mut self) -> EntriesMut<T, U> {
        let order = self.handles().collect::<Vec<Handle>>();
        let mut slots = (0..self.arena.slot_count()).map(|_| None).collect::<Vec<_>>();
        for (handle, node) in self.arena.iter_mut() {
            slots[handle.index()] = Some(&mut node.entry);
        }
        EntriesMut {
            order: order.into_iter(),
            slots,
        }
    }

    pub fn into_entries(self) -> IntoEntries<T, U> {
        IntoEntries {
            current: self.root,
            tree: self,
            stack: Vec::new(),
        }
    }

    /// Returns `true` if both trees have the same shape and equal entries at every position.
    pub fn structurally_eq(&self, other: &Tree<T, U>) -> bool
    where
        T: PartialEq,
        U: PartialEq,
    {
        let mut stack = vec![(self.root, other.root)];
        while let Some(pair) = stack.pop() {
            match pair {
                (None, None) => {},
                (Some(lhs), Some(rhs)) => {
                    let (lhs, rhs) = (self.node(lhs), other.node(rhs));
                    if lhs.entry.key != rhs.entry.key || lhs.entry.value != rhs.entry.value {
                        return false;
                    }
                    stack.push((lhs.left, rhs.left));
                    stack.push((lhs.right, rhs.right));
                },
                _ => return false,
            }
        }
        true
    }
}

impl<T, U> Tree<T, U>
where
    T: Ord,
{
    /// Descends from `start` towards `key`. Returns the node holding `key` paired with
    /// `Ordering::Equal`, or the last node visited paired with the side the search fell off.
    pub fn find_from<V>(&self, start: Handle, key: &V) -> (Handle, Ordering)
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut curr = start;
        loop {
            let node = self.node(curr);
            let ordering = key.cmp(node.entry.key.borrow());
            let next = match ordering {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return (curr, ordering),
            };
            match next {
                Some(child) => curr = child,
                None => return (curr, ordering),
            }
        }
    }

    pub fn find<V>(&self, key: &V) -> Option<(Handle, Ordering)>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.root.map(|root| self.find_from(root, key))
    }

    /// Inserts a new leaf in ordered position without rebalancing. If the key already exists, its
    /// entry is replaced and the old entry is returned alongside the existing node.
    pub fn insert(&mut self, key: T, value: U) -> (Handle, Option<Entry<T, U>>) {
        let (parent, side) = match self.find(&key) {
            None => {
                let handle = self.arena.allocate(Node::new(key, value));
                self.root = Some(handle);
                return (handle, None);
            },
            Some((handle, Ordering::Equal)) => {
                let old_entry = self.replace(handle, Entry { key, value });
                return (handle, Some(old_entry));
            },
            Some((handle, Ordering::Less)) => (handle, Side::Left),
            Some((handle, Ordering::Greater)) => (handle, Side::Right),
        };

        let mut new_node = Node::new(key, value);
        new_node.parent = Some(parent);
        let handle = self.arena.allocate(new_node);
        *self.node_mut(parent).child_mut(side) = Some(handle);
        (handle, None)
    }

    pub fn get<V>(&self, key: &V) -> Option<&Entry<T, U>>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        match self.find(key) {
            Some((handle, Ordering::Equal)) => Some(&self.node(handle).entry),
            _ => None,
        }
    }

    pub fn floor<V>(&self, key: &V) -> Option<&Entry<T, U>>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut curr = self.root;
        let mut ret = None;
        while let Some(handle) = curr {
            let node = self.node(handle);
            match key.cmp(node.entry.key.borrow()) {
                Ordering::Less => curr = node.left,
                Ordering::Greater => {
                    ret = Some(&node.entry);
                    curr = node.right;
                },
                Ordering::Equal => return Some(&node.entry),
            }
        }
        ret
    }

    pub fn ceil<V>(&self, key: &V) -> Option<&Entry<T, U>>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut curr = self.root;
        let mut ret = None;
        while let Some(handle) = curr {
            let node = self.node(handle);
            match key.cmp(node.entry.key.borrow()) {
                Ordering::Less => {
                    ret = Some(&node.entry);
                    curr = node.left;
                },
                Ordering::Greater => curr = node.right,
                Ordering::Equal => return Some(&node.entry),
            }
        }
        ret
    }

    pub fn min(&self) -> Option<&Entry<T, U>> {
        self.root.map(|root| &self.node(self.min_from(root)).entry)
    }

    pub fn max(&self) -> Option<&Entry<T, U>> {
        self.root.map(|root| &self.node(self.max_from(root)).entry)
    }

    /// Checks ordering, parent consistency, a parentless root, and that every allocated node is
    /// reachable from the root.
    ///
    /// Child links are checked before the walk descends through them, and the walk stops once it
    /// has visited more nodes than are allocated, so a corrupted tree yields an error rather than
    /// an endless traversal.
    pub fn validate(&self) -> Result<()> {
        if let Some(root) = self.root {
            if self.node(root).parent.is_some() {
                return Err(Error::RootHasParent);
            }
        }

        let mut count = 0;
        let mut prev: Option<&Entry<T, U>> = None;
        let mut stack = Vec::new();
        let mut current = self.root;
        loop {
            while let Some(handle) = current {
                count += 1;
                if count > self.len() {
                    return Err(Error::LengthMismatch {
                        expected: self.len(),
                        actual: count,
                    });
                }
                let node = self.node(handle);
                for child in node.left.into_iter().chain(node.right) {
                    match self.arena.get(child) {
                        Some(child_node) if child_node.parent == Some(handle) => {},
                        _ => return Err(Error::ParentMismatch),
                    }
                }
                stack.push(handle);
                current = node.left;
            }

            let handle = match stack.pop() {
                Some(handle) => handle,
                None => break,
            };
            let node = self.node(handle);
            if let Some(prev) = prev {
                if prev >= &node.entry {
                    return Err(Error::OutOfOrder);
                }
            }
            prev = Some(&node.entry);
            current = node.right;
        }

        if count != self.len() {
            return Err(Error::LengthMismatch {
                expected: self.len(),
                actual: count,
            });
        }
        Ok(())
    }
}

impl<T, U> Default for Tree<T, U> {
    fn default() -> Self {
        Self::new()
    }
}

/// In-order iterator over the handles of a tree.
pub struct Handles<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    tree: &'a Tree<T, U>,
    current: Option<Handle>,
    stack: Vec<Handle>,
}

impl<'a, T, U> Iterator for Handles<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    type Item = Handle;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(handle) = self.current {
            self.stack.push(handle);
            self.current = self.tree.node(handle).left;
        }
        self.stack.pop().map(|handle| {
            self.current = self.tree.node(handle).right;
            handle
        })
    }
}

pub struct Entries<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    handles: Handles<'a, T, U>,
}

impl<'a, T, U> Iterator for Entries<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    type Item = &'a Entry<T, U>;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.handles.tree;
        self.handles.next().map(|handle| &tree.node(handle).entry)
    }
}

/// In-order iterator over mutable entries.
///
/// The traversal order is computed up front and the mutable references are split out of the
/// arena by slot, so no two yielded references alias.
pub struct EntriesMut<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    order: vec::IntoIter<Handle>,
    slots: Vec<Option<&'a mut Entry<T, U>>>,
}

impl<'a, T, U> Iterator for EntriesMut<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    type Item = &'a mut Entry<T, U>;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.order.next()?;
        self.slots[handle.index()].take()
    }
}

/// In-order iterator that frees each node as it is yielded.
pub struct IntoEntries<T, U> {
    tree: Tree<T, U>,
    current: Option<Handle>,
    stack: Vec<Handle>,
}

impl<T, U> Iterator for IntoEntries<T, U> {
    type Item = Entry<T, U>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(handle) = self.current {
            self.stack.push(handle);
            self.current = self.tree.node(handle).left;
        }
        self.stack.pop().map(|handle| {
            let Node { entry, right, .. } = self.tree.arena.free(handle);
            self.current = right;
            entry
        })
    }
}
