use std::fmt::{Debug, Display, Write};

use proptest::prelude::*;

use crate::{node::Node, AvlTree};

const KEY_MAX: usize = 100;

/// Generate arbitrary keys from [0..[`KEY_MAX`]).
pub(crate) fn arbitrary_key() -> impl Strategy<Value = usize> {
    0..KEY_MAX
}

/// Render the subtree rooted at `n` as a graphviz digraph, labelling each node
/// with its key, value, height and weight.
pub(crate) fn print_dot<K, V>(n: &Node<K, V>) -> String
where
    K: Display,
    V: Display,
{
    let mut buf = String::new();

    writeln!(buf, "digraph {{").unwrap();
    writeln!(buf, r#"bgcolor = "transparent";"#).unwrap();
    writeln!(
        buf,
        r#"node [shape = record; style = filled; fontcolor = orange4; fillcolor = white;];"#
    )
    .unwrap();
    recurse(n, &mut buf);
    writeln!(buf, "}}").unwrap();

    buf
}

fn recurse<K, V, W>(n: &Node<K, V>, buf: &mut W)
where
    W: std::fmt::Write,
    K: Display,
    V: Display,
{
    writeln!(
        buf,
        r#""{}" [label="{} | {} | {{ h={} | w={} }}"];"#,
        n.key(),
        n.key(),
        n.value(),
        n.height(),
        n.weight(),
    )
    .unwrap();

    for v in [n.left(), n.right()] {
        match v {
            Some(v) => {
                writeln!(
                    buf,
                    "\"{}\" -> \"{}\" [color = \"orange1\";];",
                    n.key(),
                    v.key()
                )
                .unwrap();
                recurse(v, buf);
            }
            None => {
                writeln!(buf, "\"null_{}\" [shape=point,style=invis];", n.key()).unwrap();
                writeln!(buf, "\"{}\" -> \"null_{}\" [style=invis];", n.key(), n.key()).unwrap();
            }
        };
    }
}

/// Assert the BST, AVL and weight properties of tree nodes, ensuring the tree
/// is well-formed.
///
/// This walk is independent of [`AvlTree::check_invariants()`], which is
/// also asserted to agree.
pub(crate) fn validate_tree_structure<K, V>(t: &AvlTree<K, V>)
where
    K: Ord + Debug,
    V: Debug,
{
    assert_eq!(t.check_invariants(), Ok(()));

    let root = match t.root() {
        Some(v) => v,
        None => {
            assert_eq!(t.len(), 0);
            return;
        }
    };

    // Invariant 1: an in-order traversal yields strictly ascending keys, so
    // every key in a left subtree is less than its ancestor and every key in
    // a right subtree is greater.
    let keys = t.keys().collect::<Vec<_>>();
    for window in keys.windows(2) {
        assert!(window[0] < window[1], "keys out of order: {window:?}");
    }

    // Invariant 2: the root weight is the number of nodes in the tree.
    assert_eq!(root.weight(), keys.len());
    assert_eq!(t.len(), keys.len());

    // Perform a pre-order traversal of the tree.
    let mut stack = vec![root];
    while let Some(n) = stack.pop() {
        // Prepare to visit the children
        stack.extend(n.left().iter().chain(n.right().iter()));

        // Invariant 3: the height of this node is always +1 of the
        // maximum child height.
        let left_height = n.left().map(|v| v.height());
        let right_height = n.right().map(|v| v.height());
        let want_height = left_height
            .max(right_height)
            .map(|v| v + 1) // This node is +1 of the child, if any
            .unwrap_or_default(); // Otherwise it is at height 0

        assert_eq!(
            n.height(),
            want_height,
            "expect node with key {:?} to have height {}, has {}",
            n.key(),
            want_height,
            n.height(),
        );

        // Invariant 4: the absolute height difference between the left
        // subtree and right subtree (the "balance factor") cannot
        // exceed 1, treating a missing child as height -1.
        let balance = left_height.map(i64::from).unwrap_or(-1)
            - right_height.map(i64::from).unwrap_or(-1);
        assert!(balance.abs() <= 1, "balance={balance}, node={n:?}");

        // Invariant 5: the weight of this node is 1 + the weight of both
        // children.
        let want_weight =
            1 + n.left().map(|v| v.weight()).unwrap_or_default()
                + n.right().map(|v| v.weight()).unwrap_or_default();
        assert_eq!(n.weight(), want_weight, "key={:?}", n.key());
    }
}
