use crate::arena::Entry;
use std::collections::BTreeMap;
use std::ops::Bound;

pub struct Node<T> {
    pub value: Option<T>,
    pub children: BTreeMap<String, Entry>,
}

impl<T> Node<T> {
    pub fn new() -> Self {
        Self {
            value: None,
            children: BTreeMap::new(),
        }
    }

    /// Returns the only edge that can share a non-empty prefix with `key`: the one whose label
    /// starts with the same `char`.
    pub fn edge(&self, key: &str) -> Option<(&str, Entry)> {
        let first = key.chars().next()?;
        let head = &key[..first.len_utf8()];
        self.children
            .range::<str, _>((Bound::Included(head), Bound::Unbounded))
            .next()
            .filter(|(label, _)| label.starts_with(first))
            .map(|(label, child)| (label.as_str(), *child))
    }

    pub fn insert_child(&mut self, label: String, child: Entry) {
        debug_assert!(!label.is_empty());
        self.children.insert(label, child);
    }

    pub fn remove_child(&mut self, label: &str) -> Option<Entry> {
        self.children.remove(label)
    }
}
