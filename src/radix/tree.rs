use crate::arena::{Entry, TypedArena};
use crate::radix::node::Node;
use log::trace;

pub type Nodes<T> = TypedArena<Node<T>>;

/// Returns the byte length of the longest common `char` prefix of `a` and `b`.
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, x), y)| x != y)
        .map(|((index, _), _)| index)
        .unwrap_or_else(|| a.len().min(b.len()))
}

/// Walks every edge of `key`, splitting edges and creating a leaf as needed, and returns the node
/// at which `key` ends.
pub fn insert<T>(nodes: &mut Nodes<T>, root: Entry, key: &str) -> Entry {
    let mut curr = root;
    let mut remaining = key;
    while !remaining.is_empty() {
        let matched = nodes[curr]
            .edge(remaining)
            .map(|(label, child)| (common_prefix_len(label, remaining), label.len(), child));
        match matched {
            Some((shared, label_len, child)) if shared == label_len => {
                remaining = &remaining[shared..];
                curr = child;
            },
            Some((shared, _, child)) => {
                let label = match nodes[curr].edge(remaining) {
                    Some((label, _)) => label.to_owned(),
                    None => unreachable!(),
                };
                trace!("splitting edge {:?} at {}", label, shared);

                nodes[curr].remove_child(&label);
                let mut split = Node::new();
                split.insert_child(label[shared..].to_owned(), child);
                let split = nodes.allocate(split);
                nodes[curr].insert_child(label[..shared].to_owned(), split);

                remaining = &remaining[shared..];
                curr = split;
            },
            None => {
                let leaf = nodes.allocate(Node::new());
                nodes[curr].insert_child(remaining.to_owned(), leaf);
                remaining = "";
                curr = leaf;
            },
        }
    }
    curr
}

/// Returns the node at which `key` ends exactly on a node boundary, terminal or not.
pub fn find<T>(nodes: &Nodes<T>, root: Entry, key: &str) -> Option<Entry> {
    let mut curr = root;
    let mut remaining = key;
    while !remaining.is_empty() {
        let (label, child) = nodes[curr].edge(remaining)?;
        if !remaining.starts_with(label) {
            return None;
        }
        remaining = &remaining[label.len()..];
        curr = child;
    }
    Some(curr)
}
