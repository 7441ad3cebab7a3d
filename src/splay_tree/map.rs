use crate::bst::{Entries, EntriesMut, IntoEntries, Tree};
use crate::error::Result;
use crate::splay_tree::tree;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::borrow::Borrow;
use std::cmp;
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;

/// An ordered map implemented using a splay tree.
///
/// A splay tree is a self-adjusting binary search tree with the additional property that recently
/// accessed items are quick to access again. Every access (insertion, removal, and lookup, whether
/// or not the key is present) ends by "splaying" the node the access reached to the root, which
/// gives amortized `O(log n)` operations.
///
/// Nodes keep a link to their parent, so a splay walks upwards from the accessed node through a
/// sequence of zig, zig-zig, and zig-zag rotations.
///
/// # Examples
///
/// ```
/// use splay_collections::splay_tree::SplayMap;
///
/// let mut map = SplayMap::new();
/// map.insert(0, 1);
/// map.insert(3, 4);
///
/// assert_eq!(map.get(&0), Some(&1));
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.min(), Some(&0));
/// assert_eq!(map.ceil(&2), Some(&3));
///
/// *map.get_mut(&0).unwrap() = 2;
/// assert_eq!(map.remove(&0), Some((0, 2)));
/// assert_eq!(map.remove(&1), None);
/// ```
pub struct SplayMap<T, U> {
    tree: Tree<T, U>,
}

impl<T, U> SplayMap<T, U> {
    /// Constructs a new, empty `SplayMap<T, U>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let map: SplayMap<u32, u32> = SplayMap::new();
    /// ```
    pub fn new() -> Self {
        SplayMap { tree: Tree::new() }
    }

    /// Constructs a new, empty `SplayMap<T, U>` with room for `capacity` entries before the node
    /// storage reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let map: SplayMap<u32, u32> = SplayMap::with_capacity(1024);
    /// assert!(map.is_empty());
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        SplayMap {
            tree: Tree::with_capacity(capacity),
        }
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let map: SplayMap<u32, u32> = SplayMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Clears the map, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the key-value pair at the root of the tree, which is the most recently splayed
    /// entry. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// assert_eq!(map.root(), Some((&2, &2)));
    ///
    /// map.contains_key(&1);
    /// assert_eq!(map.root(), Some((&1, &1)));
    /// ```
    pub fn root(&self) -> Option<(&T, &U)> {
        self.tree.root().map(|root| {
            let entry = &self.tree.node(root).entry;
            (&entry.key, &entry.value)
        })
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// assert_eq!(map.height(), 0);
    /// map.insert(1, 1);
    /// assert_eq!(map.height(), 1);
    /// ```
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Returns `true` if both maps have the same tree shape and the same key-value pair at every
    /// position. Two maps with equal contents can differ in shape depending on their access
    /// history.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut lhs = SplayMap::new();
    /// let mut rhs = SplayMap::new();
    /// lhs.insert(1, 1);
    /// lhs.insert(2, 2);
    /// rhs.insert(2, 2);
    /// rhs.insert(1, 1);
    ///
    /// assert!(lhs == rhs);
    /// assert!(!lhs.structurally_eq(&rhs));
    ///
    /// rhs.contains_key(&2);
    /// assert!(lhs.structurally_eq(&rhs));
    /// ```
    pub fn structurally_eq(&self, other: &SplayMap<T, U>) -> bool
    where
        T: PartialEq,
        U: PartialEq,
    {
        self.tree.structurally_eq(&other.tree)
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs using in-order
    /// traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> SplayMapIter<T, U> {
        SplayMapIter {
            entries: self.tree.entries(),
        }
    }

    /// Returns a mutable iterator over the map. The iterator will yield key-value pairs using
    /// in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// for (key, value) in &mut map {
    ///     *value += 1;
    /// }
    ///
    /// let mut iterator = map.iter_mut();
    /// assert_eq!(iterator.next(), Some((&1, &mut 2)));
    /// assert_eq!(iterator.next(), Some((&2, &mut 3)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter_mut(&mut self) -> SplayMapIterMut<T, U> {
        SplayMapIterMut {
            entries: self.tree.entries_mut(),
        }
    }
}

impl<T, U> SplayMap<T, U>
where
    T: Ord,
{
    /// Inserts a key-value pair into the map and splays it to the root. If the key already exists
    /// in the map, it will return and replace the old key-value pair.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// assert_eq!(map.insert(1, 1), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// assert_eq!(map.insert(1, 2), Some((1, 1)));
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn insert(&mut self, key: T, value: U) -> Option<(T, U)> {
        tree::insert(&mut self.tree, key, value).map(|entry| entry.into_pair())
    }

    /// Removes a key-value pair from the map. If the key exists in the map, it will return the
    /// associated key-value pair. Otherwise it will return `None`. Either way the tree is splayed:
    /// on a hit, at the parent of the node that was unlinked, and on a miss, at the last node the
    /// search visited.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some((1, 1)));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<(T, U)>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::remove(&mut self.tree, key).map(|entry| entry.into_pair())
    }

    /// Checks if a key exists in the map. The node holding the key is splayed to the root. If the
    /// key is absent, the last node visited by the search is splayed instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<V>(&mut self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::contains(&mut self.tree, key)
    }

    /// Returns an immutable reference to the value associated with a particular key. It will
    /// return `None` if the key does not exist in the map. Splays the tree like `contains_key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn get<V>(&mut self, key: &V) -> Option<&U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::get(&mut self.tree, key).map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist. Splays the tree like `contains_key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut<V>(&mut self, key: &V) -> Option<&mut U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::get_mut(&mut self.tree, key).map(|entry| &mut entry.value)
    }

    /// Returns an immutable reference to the value associated with a particular key. Note that
    /// `peek` does not splay the tree in order to use a non-mutable reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// assert_eq!(map.peek(&1), Some(&1));
    /// assert_eq!(map.root(), Some((&2, &2)));
    /// ```
    pub fn peek<V>(&self, key: &V) -> Option<&U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.get(key).map(|entry| &entry.value)
    }

    /// Returns a key in the map that is less than or equal to a particular key. Returns `None` if
    /// such a key does not exist. Note that `floor` does not splay the tree in order to use a
    /// non-mutable reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.floor(&0), None);
    /// assert_eq!(map.floor(&2), Some(&1));
    /// ```
    pub fn floor<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.floor(key).map(|entry| &entry.key)
    }

    /// Returns a key in the map that is greater than or equal to a particular key. Returns `None`
    /// if such a key does not exist. Note that `ceil` does not splay the tree in order to use a
    /// non-mutable reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.ceil(&0), Some(&1));
    /// assert_eq!(map.ceil(&2), None);
    /// ```
    pub fn ceil<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.ceil(key).map(|entry| &entry.key)
    }

    /// Returns the minimum key of the map. Returns `None` if the map is empty. Note that `min`
    /// does not splay the tree in order to use a non-mutable reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        self.tree.min().map(|entry| &entry.key)
    }

    /// Returns the maximum key of the map. Returns `None` if the map is empty. Note that `max`
    /// does not splay the tree in order to use a non-mutable reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        self.tree.max().map(|entry| &entry.key)
    }

    /// Checks the structural invariants of the tree: keys are strictly increasing in order, every
    /// child links back to its parent, the root has no parent, and every node is reachable.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(2, 2);
    /// map.insert(1, 1);
    /// assert!(map.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<()> {
        self.tree.validate()
    }
}

impl<T, U> IntoIterator for SplayMap<T, U> {
    type IntoIter = SplayMapIntoIter<T, U>;
    type Item = (T, U);

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            entries: self.tree.into_entries(),
        }
    }
}

impl<'a, T, U> IntoIterator for &'a SplayMap<T, U>
where
    T: 'a,
    U: 'a,
{
    type IntoIter = SplayMapIter<'a, T, U>;
    type Item = (&'a T, &'a U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, U> IntoIterator for &'a mut SplayMap<T, U>
where
    T: 'a,
    U: 'a,
{
    type IntoIter = SplayMapIterMut<'a, T, U>;
    type Item = (&'a T, &'a mut U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// An owning iterator for `SplayMap<T, U>`.
///
/// This iterator traverses the elements of the map in-order and yields owned entries.
pub struct SplayMapIntoIter<T, U> {
    entries: IntoEntries<T, U>,
}

impl<T, U> Iterator for SplayMapIntoIter<T, U> {
    type Item = (T, U);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|entry| entry.into_pair())
    }
}

/// An iterator for `SplayMap<T, U>`.
///
/// This iterator traverses the elements of the map in-order and yields immutable references.
pub struct SplayMapIter<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    entries: Entries<'a, T, U>,
}

impl<'a, T, U> Iterator for SplayMapIter<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|entry| (&entry.key, &entry.value))
    }
}

/// A mutable iterator for `SplayMap<T, U>`.
///
/// This iterator traverses the elements of the map in-order and yields mutable references.
pub struct SplayMapIterMut<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    entries: EntriesMut<'a, T, U>,
}

impl<'a, T, U> Iterator for SplayMapIterMut<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    type Item = (&'a T, &'a mut U);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|entry| (&entry.key, &mut entry.value))
    }
}

impl<T, U> Default for SplayMap<T, U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, U> PartialEq for SplayMap<T, U>
where
    T: PartialEq,
    U: PartialEq,
{
    fn eq(&self, other: &SplayMap<T, U>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T, U> Eq for SplayMap<T, U>
where
    T: Eq,
    U: Eq,
{
}

impl<T, U> fmt::Debug for SplayMap<T, U>
where
    T: fmt::Debug,
    U: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<T, U> Extend<(T, U)> for SplayMap<T, U>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (T, U)>,
    {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<T, U> FromIterator<(T, U)> for SplayMap<T, U>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (T, U)>,
    {
        let mut map = SplayMap::new();
        map.extend(iter);
        map
    }
}

impl<T, U> Serialize for SplayMap<T, U>
where
    T: Serialize,
    U: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct SplayMapVisitor<T, U> {
    marker: PhantomData<fn() -> SplayMap<T, U>>,
}

impl<'de, T, U> Visitor<'de> for SplayMapVisitor<T, U>
where
    T: Deserialize<'de> + Ord,
    U: Deserialize<'de>,
{
    type Value = SplayMap<T, U>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        // untrusted length hints are capped
        let capacity = cmp::min(access.size_hint().unwrap_or(0), 4096);
        let mut map = SplayMap::with_capacity(capacity);
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, T, U> Deserialize<'de> for SplayMap<T, U>
where
    T: Deserialize<'de> + Ord,
    U: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(SplayMapVisitor {
            marker: PhantomData,
        })
    }
}
