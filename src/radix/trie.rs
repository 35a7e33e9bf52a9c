use crate::arena::{Entry, TypedArena};
use crate::radix::node::Node;
use crate::radix::tree::{self, Nodes};
use log::debug;
use std::iter::FromIterator;
use std::mem;
use std::ops::{Index, IndexMut};

/// Number of nodes allocated per arena chunk by `RadixTrie::new`.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

fn get_node<T>(nodes: &Nodes<T>, live: &TypedArena<bool>, root: Entry, key: &str) -> Option<Entry> {
    tree::find(nodes, root, key).filter(|entry| live[*entry])
}

fn remove_live<T>(
    nodes: &Nodes<T>,
    live: &mut TypedArena<bool>,
    len: &mut usize,
    root: Entry,
    key: &str,
) -> bool {
    match get_node(nodes, live, root, key) {
        Some(entry) => {
            live[entry] = false;
            *len -= 1;
            true
        },
        None => false,
    }
}

/// A string-keyed map implemented using a radix tree.
///
/// Common prefixes of keys are stored once: every edge of the tree is labeled with a non-empty
/// string and no two edges leaving the same node start with the same `char`. Inserting a key that
/// diverges in the middle of an edge splits that edge at the divergence point.
///
/// Removal is lazy. Removing a key only clears the terminal flag of its node, so the shape of the
/// tree never shrinks and nodes are reclaimed only when the trie is cleared or dropped. This is
/// what allows [`map`](RadixTrie::map) callbacks to remove keys while the walk is in progress.
///
/// Keys are compared `char` by `char`; no Unicode normalization or segmentation is performed.
///
/// # Examples
///
/// ```
/// use radix_trie::RadixTrie;
///
/// let mut trie = RadixTrie::new();
/// trie.insert("foo", 0);
/// trie.insert("foobar", 1);
///
/// assert_eq!(trie["foo"], 0);
/// assert_eq!(trie.get("baz"), None);
/// assert_eq!(trie.len(), 2);
///
/// let mut keys = trie.map("foo", |_, key, _| key.to_owned());
/// keys.sort();
/// assert_eq!(keys, vec!["foo", "foobar"]);
///
/// assert!(trie.remove("foo"));
/// assert!(!trie.contains("foo"));
/// ```
pub struct RadixTrie<T> {
    nodes: Nodes<T>,
    live: TypedArena<bool>,
    root: Entry,
    len: usize,
}

impl<T> RadixTrie<T> {
    /// Constructs a new, empty `RadixTrie<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_trie::RadixTrie;
    ///
    /// let trie: RadixTrie<u32> = RadixTrie::new();
    /// ```
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty `RadixTrie<T>` whose nodes are allocated `chunk_size` at a time.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_trie::RadixTrie;
    ///
    /// let trie: RadixTrie<u32> = RadixTrie::with_chunk_size(64);
    /// assert!(trie.is_empty());
    /// ```
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        let mut nodes = TypedArena::new(chunk_size);
        let mut live = TypedArena::new(chunk_size);
        let root = nodes.allocate(Node::new());
        live.allocate(false);
        RadixTrie {
            nodes,
            live,
            root,
            len: 0,
        }
    }

    /// Inserts a key-value pair into the trie. If the key is already present, its value is
    /// replaced and the old value is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_trie::RadixTrie;
    ///
    /// let mut trie = RadixTrie::new();
    /// assert_eq!(trie.insert("foo", 1), None);
    /// assert_eq!(trie.insert("foo", 2), Some(1));
    /// assert_eq!(trie.get("foo"), Some(&2));
    /// assert_eq!(trie.len(), 1);
    /// ```
    pub fn insert(&mut self, key: &str, value: T) -> Option<T> {
        let entry = tree::insert(&mut self.nodes, self.root, key);
        while self.live.len() < self.nodes.len() {
            self.live.allocate(false);
        }

        let was_live = mem::replace(&mut self.live[entry], true);
        let old_value = mem::replace(&mut self.nodes[entry].value, Some(value));
        if was_live {
            old_value
        } else {
            self.len += 1;
            None
        }
    }

    /// Removes a key from the trie. Returns `true` if the key was present.
    ///
    /// The node holding the key stays in the tree; only its terminal flag is cleared.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_trie::RadixTrie;
    ///
    /// let mut trie = RadixTrie::new();
    /// trie.insert("foo", 1);
    /// assert!(trie.remove("foo"));
    /// assert!(!trie.remove("foo"));
    /// assert!(!trie.remove("foobar"));
    /// ```
    pub fn remove(&mut self, key: &str) -> bool {
        remove_live(&self.nodes, &mut self.live, &mut self.len, self.root, key)
    }

    /// Checks if a key exists in the trie.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_trie::RadixTrie;
    ///
    /// let mut trie = RadixTrie::new();
    /// trie.insert("hello", 1);
    /// assert!(trie.contains("hello"));
    /// assert!(!trie.contains("hell"));
    /// assert!(!trie.contains("hello,world"));
    /// ```
    pub fn contains(&self, key: &str) -> bool {
        get_node(&self.nodes, &self.live, self.root, key).is_some()
    }

    /// Returns an immutable reference to the value associated with a particular key. Returns
    /// `None` if the key does not exist in the trie.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_trie::RadixTrie;
    ///
    /// let mut trie = RadixTrie::new();
    /// trie.insert("foo", 1);
    /// assert_eq!(trie.get("foobar"), None);
    /// assert_eq!(trie.get("foo"), Some(&1));
    /// ```
    pub fn get(&self, key: &str) -> Option<&T> {
        get_node(&self.nodes, &self.live, self.root, key)
            .and_then(|entry| self.nodes[entry].value.as_ref())
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_trie::RadixTrie;
    ///
    /// let mut trie = RadixTrie::new();
    /// trie.insert("foo", 1);
    /// *trie.get_mut("foo").unwrap() = 2;
    /// assert_eq!(trie.get("foo"), Some(&2));
    /// ```
    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        match get_node(&self.nodes, &self.live, self.root, key) {
            Some(entry) => self.nodes[entry].value.as_mut(),
            None => None,
        }
    }

    /// Applies `f` to every key in the trie that starts with `prefix` and collects the results.
    ///
    /// Keys are visited depth first from an explicit stack, so the order of the results is
    /// deterministic for a given tree shape but is not lexicographic. The callback receives a
    /// [`MapCursor`] through which it may look up or remove keys while the walk is in progress.
    /// A key is reported only if it is still present when its node is reached: removing a key
    /// that was already visited has no effect on the results, and removing one that was not yet
    /// visited skips it.
    ///
    /// If `prefix` ends in the middle of an edge, no key is reported, even if keys starting with
    /// `prefix` exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_trie::RadixTrie;
    ///
    /// let mut trie = RadixTrie::new();
    /// trie.insert("", 0);
    /// trie.insert("a", 1);
    /// trie.insert("ab", 2);
    /// trie.insert("abc", 3);
    ///
    /// let mut values = trie.map("ab", |_, _, value| *value);
    /// values.sort();
    /// assert_eq!(values, vec![2, 3]);
    ///
    /// let values = trie.map("", |cursor, _, value| {
    ///     cursor.remove("ab");
    ///     *value
    /// });
    /// assert_eq!(values, vec![0, 1, 3]);
    /// assert!(!trie.contains("ab"));
    /// ```
    pub fn map<U, F>(&mut self, prefix: &str, mut f: F) -> Vec<U>
    where
        F: FnMut(&mut MapCursor<'_, T>, &str, &T) -> U,
    {
        let mut mapped = Vec::new();
        let start = match tree::find(&self.nodes, self.root, prefix) {
            Some(start) => start,
            None => {
                debug!("no node ends at prefix {:?}", prefix);
                return mapped;
            },
        };

        let nodes = &self.nodes;
        let mut cursor = MapCursor {
            nodes,
            live: &mut self.live,
            len: &mut self.len,
            root: self.root,
        };
        let mut stack = vec![(prefix.to_owned(), start)];
        while let Some((key, entry)) = stack.pop() {
            let node = &nodes[entry];
            if cursor.live[entry] {
                if let Some(ref value) = node.value {
                    mapped.push(f(&mut cursor, key.as_str(), value));
                }
            }
            for (label, child) in &node.children {
                let mut child_key = String::with_capacity(key.len() + label.len());
                child_key.push_str(&key);
                child_key.push_str(label);
                stack.push((child_key, *child));
            }
        }
        debug!("mapped {} keys under prefix {:?}", mapped.len(), prefix);
        mapped
    }

    /// Returns the number of keys in the trie.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_trie::RadixTrie;
    ///
    /// let mut trie = RadixTrie::new();
    /// trie.insert("foo", 1);
    /// assert_eq!(trie.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the trie contains no keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_trie::RadixTrie;
    ///
    /// let trie: RadixTrie<u32> = RadixTrie::new();
    /// assert!(trie.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of nodes in the tree, including the root, split nodes, and the nodes of
    /// removed keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_trie::RadixTrie;
    ///
    /// let mut trie = RadixTrie::new();
    /// trie.insert("bar", 1);
    /// trie.insert("baz", 2);
    /// assert_eq!(trie.node_count(), 4);
    ///
    /// trie.remove("bar");
    /// assert_eq!(trie.node_count(), 4);
    /// ```
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Clears the trie, removing all keys and releasing every node.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_trie::RadixTrie;
    ///
    /// let mut trie = RadixTrie::new();
    /// trie.insert("foo", 1);
    /// trie.insert("foobar", 2);
    /// trie.clear();
    /// assert!(trie.is_empty());
    /// assert_eq!(trie.node_count(), 1);
    /// ```
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.live.clear();
        self.root = self.nodes.allocate(Node::new());
        self.live.allocate(false);
        self.len = 0;
    }
}

/// A handle given to [`RadixTrie::map`] callbacks for reading and removing keys during the walk.
///
/// Removals made through the cursor take effect immediately on the trie.
pub struct MapCursor<'a, T> {
    nodes: &'a Nodes<T>,
    live: &'a mut TypedArena<bool>,
    len: &'a mut usize,
    root: Entry,
}

impl<'a, T> MapCursor<'a, T> {
    /// Removes a key from the trie. Returns `true` if the key was present.
    pub fn remove(&mut self, key: &str) -> bool {
        remove_live(self.nodes, self.live, self.len, self.root, key)
    }

    /// Checks if a key currently exists in the trie.
    pub fn contains(&self, key: &str) -> bool {
        get_node(self.nodes, self.live, self.root, key).is_some()
    }

    /// Returns the value associated with a key that currently exists in the trie.
    pub fn get(&self, key: &str) -> Option<&'a T> {
        let nodes = self.nodes;
        get_node(nodes, self.live, self.root, key).and_then(|entry| nodes[entry].value.as_ref())
    }

    /// Returns the number of keys currently in the trie.
    pub fn len(&self) -> usize {
        *self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for RadixTrie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T> FromIterator<(K, T)> for RadixTrie<T>
where
    K: AsRef<str>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
    {
        let mut trie = RadixTrie::new();
        trie.extend(iter);
        trie
    }
}

impl<K, T> Extend<(K, T)> for RadixTrie<T>
where
    K: AsRef<str>,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, T)>,
    {
        for (key, value) in iter {
            self.insert(key.as_ref(), value);
        }
    }
}

impl<'a, T> Index<&'a str> for RadixTrie<T> {
    type Output = T;

    fn index(&self, key: &str) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<'a, T> IndexMut<&'a str> for RadixTrie<T> {
    fn index_mut(&mut self, key: &str) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}

#[cfg(test)]
mod proptests;
