//! Slot allocator backing the nodes of a tree.

use std::mem;
use std::ops::{Index, IndexMut};

/// A struct representing an allocated slot in an `Arena<T>`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle(usize);

impl Handle {
    pub fn index(self) -> usize {
        self.0
    }
}

enum Slot<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

/// An allocator of a single type of object, addressed by `Handle`.
///
/// Freed slots are threaded onto a free list and reused before the underlying `Vec` grows, so a
/// handle stays valid until it is explicitly freed. Indexing with a freed handle panics.
pub struct Arena<T> {
    head: Option<Handle>,
    slots: Vec<Slot<T>>,
    len: usize,
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Arena {
            head: None,
            slots: Vec::new(),
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Arena {
            head: None,
            slots: Vec::with_capacity(capacity),
            len: 0,
        }
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of slots ever handed out, occupied or not.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn allocate(&mut self, value: T) -> Handle {
        self.len += 1;
        match self.head.take() {
            None => {
                self.slots.push(Slot::Occupied(value));
                Handle(self.slots.len() - 1)
            },
            Some(handle) => {
                let vacant = mem::replace(&mut self.slots[handle.0], Slot::Occupied(value));
                match vacant {
                    Slot::Vacant(next) => {
                        self.head = next;
                        handle
                    },
                    Slot::Occupied(_) => panic!("Expected a vacant slot at the head of the free list."),
                }
            },
        }
    }

    /// Releases a slot and returns the object it held.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is out of bounds or already vacant.
    pub fn free(&mut self, handle: Handle) -> T {
        if handle.0 >= self.slots.len() {
            panic!("Error: attempting to free invalid slot.");
        }
        if let Slot::Vacant(_) = self.slots[handle.0] {
            panic!("Error: attempting to free vacant slot.");
        }
        let old_slot = mem::replace(&mut self.slots[handle.0], Slot::Vacant(self.head.take()));
        self.head = Some(handle);
        self.len -= 1;
        match old_slot {
            Slot::Occupied(value) => value,
            Slot::Vacant(_) => unreachable!(),
        }
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        match self.slots.get(handle.0) {
            Some(Slot::Occupied(ref value)) => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        match self.slots.get_mut(handle.0) {
            Some(Slot::Occupied(ref mut value)) => Some(value),
            _ => None,
        }
    }

    /// Iterates over occupied slots in slot order, which is unrelated to any tree order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Handle, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| match slot {
                Slot::Occupied(ref mut value) => Some((Handle(index), value)),
                Slot::Vacant(_) => None,
            })
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.len = 0;
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<Handle> for Arena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("Error: handle refers to a vacant slot.")
    }
}

impl<T> IndexMut<Handle> for Arena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("Error: handle refers to a vacant slot.")
    }
}

#[cfg(test)]
mod tests {
    use super::{Arena, Handle};

    #[test]
    #[should_panic]
    fn test_free_invalid_slot() {
        let mut arena: Arena<u32> = Arena::new();
        arena.free(Handle(0));
    }

    #[test]
    #[should_panic]
    fn test_free_vacant_slot() {
        let mut arena = Arena::new();
        let handle = arena.allocate(0);
        arena.free(handle);
        arena.free(handle);
    }

    #[test]
    fn test_allocate() {
        let mut arena = Arena::new();
        assert_eq!(arena.allocate(0), Handle(0));
        assert_eq!(arena.allocate(0), Handle(1));
        assert_eq!(arena.allocate(0), Handle(2));
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_free_reuses_slots() {
        let mut arena = Arena::with_capacity(4);
        let a = arena.allocate(1);
        let b = arena.allocate(2);
        assert_eq!(arena.free(a), 1);
        assert_eq!(arena.free(b), 2);
        assert_eq!(arena.len(), 0);

        // most recently freed slot comes back first
        assert_eq!(arena.allocate(3), b);
        assert_eq!(arena.allocate(4), a);
        assert_eq!(arena.slot_count(), 2);
    }

    #[test]
    fn test_get() {
        let mut arena = Arena::new();
        let handle = arena.allocate(0);
        assert_eq!(arena.get(handle), Some(&0));
        assert_eq!(arena.get(Handle(1)), None);

        arena.free(handle);
        assert_eq!(arena.get(handle), None);
    }

    #[test]
    fn test_get_mut() {
        let mut arena = Arena::new();
        let handle = arena.allocate(0);
        *arena.get_mut(handle).unwrap() = 1;
        arena[handle] += 1;
        assert_eq!(arena[handle], 2);
    }

    #[test]
    fn test_iter_mut_skips_vacant() {
        let mut arena = Arena::new();
        let a = arena.allocate(1);
        let b = arena.allocate(2);
        let c = arena.allocate(3);
        arena.free(b);

        for (_, value) in arena.iter_mut() {
            *value *= 10;
        }

        assert_eq!(arena[a], 10);
        assert_eq!(arena[c], 30);
        assert_eq!(arena.iter_mut().map(|(handle, _)| handle).collect::<Vec<_>>(), vec![a, c]);
    }

    #[test]
    fn test_clear() {
        let mut arena = Arena::new();
        arena.allocate(0);
        arena.allocate(1);
        arena.clear();
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.allocate(2), Handle(0));
    }
}
