//! Binary search tree answering range-minimum queries.
//!
//! Keys are indices, each holding one datum. Every node also caches the
//! minimum datum of its subtree, so a query touches at most two root-to-leaf
//! paths. The tree is height balanced with AVL rotations, since scripts
//! usually insert indices in ascending order.

use std::cmp::Ordering;
use std::fmt::{self, Write as _};

type Link = Option<Box<Node>>;

#[derive(Debug, Clone)]
struct Node {
    key: i64,
    data: i64,
    subtree_min: i64,
    height: usize,
    left: Link,
    right: Link,
}

impl Node {
    fn new(key: i64, data: i64) -> Box<Self> {
        Box::new(Self {
            key,
            data,
            subtree_min: data,
            height: 1,
            left: None,
            right: None,
        })
    }

    fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }

    /// Recomputes the cached height and subtree minimum from the children.
    fn update(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
        self.subtree_min = min_of([
            Some(self.data),
            subtree_min(&self.left),
            subtree_min(&self.right),
        ])
        .unwrap_or(self.data);
    }
}

#[derive(Clone, Default)]
pub struct RangeMinTree {
    root: Link,
    len: usize,
}

impl RangeMinTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts `data` at `key`. Returns `false` when the key already existed,
    /// in which case the smaller of the two data is kept.
    pub fn insert(&mut self, key: i64, data: i64) -> bool {
        let (root, inserted) = insert_node(self.root.take(), key, data);
        self.root = Some(root);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Levels from root to deepest leaf: 0 when empty.
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    pub fn get(&self, key: i64) -> Option<i64> {
        let mut link = &self.root;
        while let Some(node) = link {
            if key == node.key {
                return Some(node.data);
            }
            link = if key < node.key {
                &node.left
            } else {
                &node.right
            };
        }
        None
    }

    /// Minimum datum over keys in `[lo, hi]`.
    pub fn range_min(&self, lo: i64, hi: i64) -> Option<i64> {
        if lo > hi {
            return None;
        }

        // find the node where the paths to `lo` and `hi` split
        let mut link = &self.root;
        while let Some(node) = link {
            if node.key < lo {
                link = &node.right;
            } else if node.key > hi {
                link = &node.left;
            } else {
                return min_of([
                    Some(node.data),
                    min_at_least(&node.left, lo),
                    min_at_most(&node.right, hi),
                ]);
            }
        }
        None
    }

    /// `(key, data)` pairs in key order.
    pub fn in_order(&self) -> Vec<(i64, i64)> {
        fn walk(link: &Link, out: &mut Vec<(i64, i64)>) {
            if let Some(node) = link {
                walk(&node.left, out);
                out.push((node.key, node.data));
                walk(&node.right, out);
            }
        }

        let mut out = Vec::with_capacity(self.len);
        walk(&self.root, &mut out);
        out
    }

    /// Sideways drawing with the root on the left and larger keys on top.
    pub fn render(&self) -> String {
        let mut out = String::new();
        match &self.root {
            None => out.push_str("Empty tree\n"),
            Some(root) => render_node(root, "", true, &mut out),
        }
        out
    }
}

fn height(link: &Link) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

fn rotate_right(mut root: Box<Node>) -> Box<Node> {
    let Some(mut pivot) = root.left.take() else {
        return root;
    };
    root.left = pivot.right.take();
    root.update();
    pivot.right = Some(root);
    pivot.update();
    pivot
}

fn rotate_left(mut root: Box<Node>) -> Box<Node> {
    let Some(mut pivot) = root.right.take() else {
        return root;
    };
    root.right = pivot.left.take();
    root.update();
    pivot.left = Some(root);
    pivot.update();
    pivot
}

fn rebalance(mut node: Box<Node>) -> Box<Node> {
    node.update();
    let balance = node.balance_factor();

    if balance > 1 {
        if node.left.as_ref().is_some_and(|left| left.balance_factor() < 0) {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }

    if balance < -1 {
        if node.right.as_ref().is_some_and(|right| right.balance_factor() > 0) {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }

    node
}

fn insert_node(link: Link, key: i64, data: i64) -> (Box<Node>, bool) {
    let Some(mut node) = link else {
        return (Node::new(key, data), true);
    };

    let inserted = match key.cmp(&node.key) {
        Ordering::Equal => {
            node.data = node.data.min(data);
            false
        }
        Ordering::Less => {
            let (child, inserted) = insert_node(node.left.take(), key, data);
            node.left = Some(child);
            inserted
        }
        Ordering::Greater => {
            let (child, inserted) = insert_node(node.right.take(), key, data);
            node.right = Some(child);
            inserted
        }
    };

    // rebalancing also refreshes the subtree minimum after an update
    (rebalance(node), inserted)
}

fn min_of<const N: usize>(candidates: [Option<i64>; N]) -> Option<i64> {
    candidates.into_iter().flatten().min()
}

fn subtree_min(link: &Link) -> Option<i64> {
    link.as_ref().map(|node| node.subtree_min)
}

fn min_at_least(mut link: &Link, lo: i64) -> Option<i64> {
    let mut best = None;
    while let Some(node) = link {
        if node.key < lo {
            link = &node.right;
        } else {
            best = min_of([best, Some(node.data), subtree_min(&node.right)]);
            link = &node.left;
        }
    }
    best
}

fn min_at_most(mut link: &Link, hi: i64) -> Option<i64> {
    let mut best = None;
    while let Some(node) = link {
        if node.key > hi {
            link = &node.left;
        } else {
            best = min_of([best, Some(node.data), subtree_min(&node.left)]);
            link = &node.right;
        }
    }
    best
}

impl fmt::Debug for RangeMinTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeMinTree")
            .field("len", &self.len)
            .field("height", &self.height())
            .field("entries", &self.in_order())
            .finish()
    }
}

fn render_node(node: &Node, prefix: &str, is_left: bool, out: &mut String) {
    if let Some(right) = &node.right {
        let child = format!("{}{}", prefix, if is_left { "│   " } else { "    " });
        render_node(right, &child, false, out);
    }

    let branch = if is_left { "└── " } else { "┌── " };
    let _ = writeln!(out, "{}{}({}, {})", prefix, branch, node.key, node.data);

    if let Some(left) = &node.left {
        let child = format!("{}{}", prefix, if is_left { "    " } else { "│   " });
        render_node(left, &child, true, out);
    }
}
