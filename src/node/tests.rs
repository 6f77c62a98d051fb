use super::*;

fn mk_node(keys: &[&str]) -> Node<usize> {
    let mut node = Node::empty();
    for (i, key) in keys.iter().enumerate() {
        let key = key.as_bytes();
        assert!(node.insert(key, key, i).is_none());
    }
    node
}

fn keys(node: &Node<usize>) -> Vec<String> {
    let mut res = Vec::new();
    node.walk(&mut |k, _| {
        res.push(String::from_utf8(k.to_vec()).unwrap());
        false
    });
    res
}

fn labels(node: &Node<usize>) -> Vec<u8> {
    node.edges.iter().map(|e| e.label).collect()
}

#[test]
fn add_edge_keeps_order() {
    let mut node = Node::<usize>::empty();
    for label in [b'm', b'a', b'z', b'c'] {
        node.add_edge(Edge::new(Node::single(&[label], &[label], 0)));
    }
    assert_eq!(labels(&node), b"acmz".to_vec());
    assert!(node.get_edge(b'c').is_some());
    assert!(node.get_edge(b'b').is_none());
    assert!(node.del_edge(b'c').is_some());
    assert!(node.del_edge(b'c').is_none());
    assert_eq!(labels(&node), b"amz".to_vec());
}

#[test]
#[should_panic(expected = "duplicate edge")]
fn add_duplicate_edge() {
    let mut node = Node::<usize>::empty();
    node.add_edge(Edge::new(Node::single(b"ab", b"ab", 0)));
    node.add_edge(Edge::new(Node::single(b"ac", b"ac", 1)));
}

#[test]
#[should_panic(expected = "non empty prefix")]
fn edge_without_prefix() {
    Edge::new(Node::single(b"", b"", 0));
}

#[test]
fn split_and_merge() {
    let mut node = Node::single(b"abcd", b"abcd", 7usize);
    node.add_edge(Edge::new(Node::single(b"x", b"abcdx", 8)));
    node.split(2);
    assert_eq!(node.prefix, b"ab");
    assert!(node.leaf.is_none());
    assert_eq!(labels(&node), vec![b'c']);
    let child = node.get_edge(b'c').unwrap();
    assert_eq!(child.prefix, b"cd");
    assert_eq!(child.leaf.as_ref().unwrap().value, 7);
    assert_eq!(labels(child), vec![b'x']);

    node.merge_child();
    assert_eq!(node.prefix, b"abcd");
    assert_eq!(node.leaf.as_ref().unwrap().value, 7);
    assert_eq!(labels(&node), vec![b'x']);
}

#[test]
#[should_panic(expected = "merging a node")]
fn merge_with_leaf() {
    let mut node = Node::single(b"ab", b"ab", 0usize);
    node.add_edge(Edge::new(Node::single(b"c", b"abc", 1)));
    node.merge_child();
}

#[test]
#[should_panic(expected = "split at")]
fn split_at_end() {
    let mut node = Node::single(b"ab", b"ab", 0usize);
    node.split(2);
}

#[test]
fn insert_splits_on_divergence() {
    let node = mk_node(&["romane", "romanus", "romulus"]);
    node.check(&mut Vec::new(), true).unwrap();
    // root -> "rom" -> {"an" -> {"e", "us"}, "ulus"}
    assert_eq!(labels(&node), vec![b'r']);
    let rom = node.get_edge(b'r').unwrap();
    assert_eq!(rom.prefix, b"rom");
    assert!(rom.leaf.is_none());
    assert_eq!(labels(rom), b"au".to_vec());
    let an = rom.get_edge(b'a').unwrap();
    assert_eq!(an.prefix, b"an");
    assert_eq!(labels(an), b"eu".to_vec());
    assert_eq!(rom.get_edge(b'u').unwrap().prefix, b"ulus");
}

#[test]
fn insert_key_ending_at_split() {
    let mut node = mk_node(&["abcd"]);
    assert!(node.insert(b"ab", b"ab", 1).is_none());
    node.check(&mut Vec::new(), true).unwrap();
    let ab = node.get_edge(b'a').unwrap();
    assert_eq!(ab.prefix, b"ab");
    assert_eq!(&*ab.leaf.as_ref().unwrap().key, b"ab");
    assert_eq!(ab.get_edge(b'c').unwrap().prefix, b"cd");
}

#[test]
fn insert_overwrites() {
    let mut node = mk_node(&["a", "ab"]);
    assert_eq!(node.insert(b"ab", b"ab", 10), Some(1));
    assert_eq!(node.insert(b"a", b"a", 11), Some(0));
    assert_eq!(node.find(b"ab").unwrap().leaf.as_ref().unwrap().value, 10);
    assert_eq!(node.count(), 2);
}

#[test]
fn remove_merges_two_levels() {
    // root -> "a" -> {"b" -> {"c", "d"}, "x"}
    let mut node = mk_node(&["abc", "abd", "ax"]);
    node.check(&mut Vec::new(), true).unwrap();
    assert_eq!(node.remove(b"ax"), Some(2));
    // "a" is left with a single child and no leaf, so it absorbs "b"
    node.check(&mut Vec::new(), true).unwrap();
    assert_eq!(node.get_edge(b'a').unwrap().prefix, b"ab");

    assert_eq!(node.remove(b"abc"), Some(0));
    node.check(&mut Vec::new(), true).unwrap();
    assert_eq!(node.get_edge(b'a').unwrap().prefix, b"abd");
    assert_eq!(keys(&node), vec!["abd"]);
}

#[test]
fn remove_inner_leaf_merges_node() {
    let mut node = mk_node(&["a", "abc"]);
    assert_eq!(node.remove(b"a"), Some(0));
    node.check(&mut Vec::new(), true).unwrap();
    assert_eq!(node.get_edge(b'a').unwrap().prefix, b"abc");
}

#[test]
fn remove_missing() {
    let mut node = mk_node(&["abc", "abd"]);
    assert_eq!(node.remove(b"ab"), None);
    assert_eq!(node.remove(b"abx"), None);
    assert_eq!(node.remove(b"abcd"), None);
    assert_eq!(node.remove(b"x"), None);
    assert_eq!(node.remove(b"a"), None);
    node.check(&mut Vec::new(), true).unwrap();
    assert_eq!(keys(&node), vec!["abc", "abd"]);
}

#[test]
fn remove_prefix_within_edge() {
    let mut node = mk_node(&["abcd", "abce", "x"]);
    // "ab" ends in the middle of the prefix "abc"
    assert_eq!(node.remove_prefix(b"ab"), 2);
    node.check(&mut Vec::new(), true).unwrap();
    assert_eq!(keys(&node), vec!["x"]);
    assert_eq!(node.remove_prefix(b"xy"), 0);
    assert_eq!(node.remove_prefix(b"q"), 0);
}

#[test]
fn remove_prefix_merges_parent() {
    let mut node = mk_node(&["abc", "abd", "ax"]);
    assert_eq!(node.remove_prefix(b"ab"), 2);
    node.check(&mut Vec::new(), true).unwrap();
    assert_eq!(node.get_edge(b'a').unwrap().prefix, b"ax");
}

#[test]
fn find_prefix_mid_edge() {
    let node = mk_node(&["abcd", "abce"]);
    assert_eq!(node.find_prefix(b"ab").unwrap().prefix, b"abc");
    assert!(node.find(b"ab").is_none());
    assert!(node.find_prefix(b"abx").is_none());
    assert_eq!(node.find_prefix(b"").unwrap().prefix, b"");
}

#[test]
fn walk_mut_removes_every_other() {
    let mut node = mk_node(&["a", "ab", "abc", "abd", "b", "ba"]);
    let mut visited = Vec::new();
    let mut removed = 0;
    let mut i = 0;
    node.walk_mut(
        &mut |k, _| {
            visited.push(k.to_vec());
            i += 1;
            if i % 2 == 1 {
                Visit::Remove
            } else {
                Visit::Continue
            }
        },
        &mut removed,
    );
    assert_eq!(visited.len(), 6);
    assert_eq!(removed, 3);
    node.check(&mut Vec::new(), true).unwrap();
    assert_eq!(keys(&node), vec!["ab", "abd", "ba"]);
}

#[test]
fn dump() {
    let node = mk_node(&["ab", "abc"]);
    let mut out = String::new();
    node.dump_tree("", |x| Ok(hex::encode(x)), &mut out).unwrap();
    assert_eq!(out, "\n6162:0\n616263:1\n");
}

#[test]
fn drop_deep_chain() {
    let mut node = Node::single(b"a", b"", 0usize);
    for i in 1..100_000 {
        let mut parent = Node::single(b"a", b"", i);
        parent.add_edge(Edge::new(node));
        node = parent;
    }
    assert_eq!(node.count(), 100_000);
    drop(node);
}
