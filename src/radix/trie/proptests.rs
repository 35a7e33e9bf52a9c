use super::RadixTrie;
use crate::radix::tree;
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashSet};

fn validate_trie<T>(trie: &RadixTrie<T>) {
    assert_eq!(trie.live.len(), trie.nodes.len(), "flag arena out of step");

    let mut stack = vec![trie.root];
    let mut seen = HashSet::new();
    let mut live = 0;
    while let Some(entry) = stack.pop() {
        assert!(seen.insert(entry), "node reachable twice");
        if trie.live[entry] {
            live += 1;
            assert!(trie.nodes[entry].value.is_some(), "terminal node without a value");
        }

        let mut first_chars = HashSet::new();
        for (label, child) in &trie.nodes[entry].children {
            let first = label.chars().next();
            assert!(first.is_some(), "empty edge label");
            assert!(first_chars.insert(first), "sibling labels share a prefix: {:?}", label);
            stack.push(*child);
        }
    }
    assert_eq!(live, trie.len(), "len must count reachable terminal nodes");
    assert_eq!(seen.len(), trie.node_count(), "every node must stay reachable");
}

#[derive(Clone, Debug)]
enum Op {
    Insert(String, u32),
    Remove(String),
    Get(String),
    Map(String),
}

fn key() -> impl Strategy<Value = String> {
    "[abé]{0,5}"
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (key(), any::<u32>()).prop_map(|(key, value)| Op::Insert(key, value)),
        key().prop_map(Op::Remove),
        key().prop_map(Op::Get),
        key().prop_map(Op::Map),
    ]
}

proptest! {
    #[test]
    fn prop_matches_btreemap(ops in prop::collection::vec(op(), 1..200)) {
        let mut trie = RadixTrie::with_chunk_size(8);
        let mut model = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    let node_count = trie.node_count();
                    prop_assert_eq!(trie.insert(&key, value), model.insert(key.clone(), value));
                    prop_assert!(trie.node_count() >= node_count);
                    prop_assert_eq!(trie.get(&key), Some(&value));
                },
                Op::Remove(key) => {
                    let node_count = trie.node_count();
                    prop_assert_eq!(trie.remove(&key), model.remove(&key).is_some());
                    prop_assert_eq!(trie.node_count(), node_count);
                    prop_assert!(!trie.contains(&key));
                },
                Op::Get(key) => {
                    prop_assert_eq!(trie.get(&key), model.get(&key));
                    prop_assert_eq!(trie.contains(&key), model.contains_key(&key));
                },
                Op::Map(prefix) => {
                    let on_boundary = tree::find(&trie.nodes, trie.root, &prefix).is_some();
                    let mut mapped = trie.map(&prefix, |_, key, value| (key.to_owned(), *value));
                    mapped.sort();

                    let expected: Vec<(String, u32)> = if on_boundary {
                        model
                            .iter()
                            .filter(|(key, _)| key.starts_with(prefix.as_str()))
                            .map(|(key, value)| (key.clone(), *value))
                            .collect()
                    } else {
                        Vec::new()
                    };
                    prop_assert_eq!(mapped, expected);
                },
            }
            prop_assert_eq!(trie.len(), model.len());
        }
        validate_trie(&trie);
    }

    #[test]
    fn prop_insertion_order_independent(keys in prop::collection::vec(key(), 0..30)) {
        let forward: RadixTrie<usize> = keys.iter().map(|key| (key, key.len())).collect();
        let backward: RadixTrie<usize> = keys.iter().rev().map(|key| (key, key.len())).collect();

        prop_assert_eq!(forward.len(), backward.len());
        for key in &keys {
            prop_assert_eq!(forward.get(key), backward.get(key));
        }
        validate_trie(&forward);
        validate_trie(&backward);
    }

    #[test]
    fn prop_remove_during_map(
        keys in prop::collection::btree_set(key(), 1..30),
        victims in prop::collection::vec(key(), 0..10),
    ) {
        let mut trie: RadixTrie<()> = keys.iter().map(|key| (key, ())).collect();

        let mut first = None;
        let mapped = trie.map("", |cursor, key, _| {
            if first.is_none() {
                first = Some(key.to_owned());
                for victim in &victims {
                    cursor.remove(victim);
                }
            }
            key.to_owned()
        });

        let reported: BTreeSet<String> = mapped.iter().cloned().collect();
        prop_assert_eq!(reported.len(), mapped.len(), "a key was reported twice");

        let victims: BTreeSet<String> = victims.into_iter().collect();
        let mut expected: BTreeSet<String> = keys.difference(&victims).cloned().collect();
        expected.extend(first);
        prop_assert_eq!(reported, expected);

        for key in &keys {
            prop_assert_eq!(trie.contains(key), !victims.contains(key));
        }
        validate_trie(&trie);
    }
}
