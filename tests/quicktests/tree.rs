use parent_bst::{NodeId, Tree};
use quickcheck_macros::quickcheck;

use std::collections::BTreeSet;
use std::ops::Bound;

use crate::Op;

/// Applies a set of operations to a tree and a set.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in both.
fn do_ops<K>(ops: &[Op<K>], bst: &mut Tree<K>, set: &mut BTreeSet<K>)
where
    K: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Insert(k) => {
                bst.insert(k.clone());
                set.insert(k.clone());
            }
            Op::Remove(k) => {
                bst.delete_by_key(k);
                set.remove(k);
            }
        }
    }
}

/// Walks the tree through its public links and checks BST order, that every child points back
/// at its parent, and that `len` matches the number of reachable nodes.
fn is_well_formed<K: Ord>(tree: &Tree<K>) -> bool {
    let root = match tree.root() {
        Some(root) => root,
        None => return tree.is_empty(),
    };
    if tree[root].parent().is_some() {
        return false;
    }

    let mut count = 0;
    let mut stack: Vec<(NodeId, Option<&K>, Option<&K>)> = vec![(root, None, None)];
    while let Some((id, low, high)) = stack.pop() {
        count += 1;
        let node = &tree[id];
        let too_low = low.map_or(false, |low| node.key() <= low);
        let too_high = high.map_or(false, |high| node.key() >= high);
        if too_low || too_high {
            return false;
        }
        for (child, low, high) in [
            (node.left(), low, Some(node.key())),
            (node.right(), Some(node.key()), high),
        ]
        .iter()
        .copied()
        {
            if let Some(child) = child {
                if tree[child].parent() != Some(id) {
                    return false;
                }
                stack.push((child, low, high));
            }
        }
    }

    count == tree.len()
}

fn build(ops: &[Op<i8>]) -> (Tree<i8>, BTreeSet<i8>) {
    let mut tree = Tree::new();
    let mut set = BTreeSet::new();
    do_ops(ops, &mut tree, &mut set);
    (tree, set)
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let (tree, set) = build(&ops);

    is_well_formed(&tree)
        && tree.len() == set.len()
        && tree.keys() == set.iter().copied().collect::<Vec<_>>()
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }

    xs.iter().all(|x| tree.find(x).map(|id| tree.key(id)) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();
    let added: BTreeSet<_> = xs.into_iter().collect();

    nots.iter()
        .filter(|x| !added.contains(*x))
        .all(|x| tree.find(x).is_none())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: Tree<i8> = xs.iter().copied().collect();
    for delete in &deletes {
        tree.delete_by_key(delete);
    }

    let still_present: BTreeSet<_> = xs.iter().filter(|x| !deletes.contains(x)).collect();

    deletes.iter().all(|x| tree.find(x).is_none())
        && still_present.iter().all(|x| tree.find(x).is_some())
        && tree.len() == still_present.len()
        && is_well_formed(&tree)
}

#[quickcheck]
fn insert_is_idempotent(xs: Vec<i8>, again: i8) -> bool {
    let mut tree: Tree<i8> = xs.iter().copied().collect();
    tree.insert(again);
    let (len, keys) = (tree.len(), tree.keys());

    !tree.insert(again) && tree.len() == len && tree.keys() == keys
}

#[quickcheck]
fn successor_predecessor_duality(ops: Vec<Op<i8>>) -> bool {
    let (tree, set) = build(&ops);
    let sorted: Vec<_> = set.into_iter().collect();

    sorted.windows(2).all(|pair| {
        let a = tree.find(&pair[0]).unwrap();
        let b = tree.find(&pair[1]).unwrap();
        tree.next(a) == Some(b) && tree.prev(b) == Some(a)
    }) && tree.min().map_or(true, |min| tree.prev(min).is_none())
        && tree.max().map_or(true, |max| tree.next(max).is_none())
}

#[quickcheck]
fn range_matches_btreeset(ops: Vec<Op<i8>>, low: i8, high: i8) -> bool {
    let (tree, set) = build(&ops);

    let found: Vec<_> = tree
        .find_range(&low, &high)
        .into_iter()
        .map(|id| *tree.key(id))
        .collect();
    let expected: Vec<_> = if low <= high {
        set.range(low..=high).copied().collect()
    } else {
        Vec::new()
    };

    found == expected
}

#[quickcheck]
fn nearest_neighbour_matches_btreeset(ops: Vec<Op<i8>>, key: i8) -> bool {
    let (tree, set) = build(&ops);
    let (below, above) = tree.nearest_neighbour(&key);

    below.map(|id| *tree.key(id)) == set.range(..key).next_back().copied()
        && above.map(|id| *tree.key(id))
            == set.range((Bound::Excluded(key), Bound::Unbounded)).next().copied()
}

#[quickcheck]
fn handles_survive_unrelated_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: Tree<i8> = xs.iter().copied().collect();
    let before: Vec<_> = xs
        .iter()
        .filter(|x| !deletes.contains(x))
        .map(|x| (*x, tree.find(x).unwrap()))
        .collect();

    for delete in &deletes {
        tree.delete_by_key(delete);
    }

    before
        .into_iter()
        .all(|(key, id)| tree.find(&key) == Some(id) && tree.key(id) == &key)
}

#[test]
fn two_children_delete_keeps_successor_subtree() {
    let mut tree = Tree::new();
    tree.insert_all(vec![50, 30, 70, 20, 40, 60, 80, 65]);

    assert_eq!(tree.delete_by_key(&50), Some(50));

    assert!(tree.find(&65).is_some());
    assert_eq!(tree.keys(), vec![20, 30, 40, 60, 65, 70, 80]);
    assert_eq!(tree.len(), 7);
    assert!(is_well_formed(&tree));
}

#[test]
fn nearest_neighbour_on_miss() {
    let tree: Tree<i32> = vec![10, 20, 30].into_iter().collect();

    let (below, above) = tree.nearest_neighbour(&25);
    assert_eq!(below, tree.find(&20));
    assert_eq!(above, tree.find(&30));
}

#[test]
fn empty_tree() {
    let tree = Tree::<i32>::new();

    assert_eq!(tree.find(&1), None);
    assert!(tree.find_range(&i32::MIN, &i32::MAX).is_empty());
    assert!(tree.keys().is_empty());
    assert!(is_well_formed(&tree));
}
