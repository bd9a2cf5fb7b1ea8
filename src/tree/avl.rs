//! Self-balancing AVL tree with a pluggable ordering.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

pub type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering>;

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    value: T,
    height: usize,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn leaf(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            height: 1,
            left: None,
            right: None,
        })
    }

    fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }
}

fn height<T>(link: &Link<T>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

fn rotate_right<T>(mut root: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut pivot) = root.left.take() else {
        return root;
    };
    root.left = pivot.right.take();
    root.update_height();
    pivot.right = Some(root);
    pivot.update_height();
    pivot
}

fn rotate_left<T>(mut root: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut pivot) = root.right.take() else {
        return root;
    };
    root.right = pivot.left.take();
    root.update_height();
    pivot.left = Some(root);
    pivot.update_height();
    pivot
}

/// Restores the balance of `node`, assuming both subtrees are balanced and
/// differ in height by at most two.
fn rebalance<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.update_height();
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

pub struct AvlTree<T> {
    root: Link<T>,
    len: usize,
    compare: Comparator<T>,
}

impl<T: Ord + 'static> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + 'static> AvlTree<T> {
    /// An empty tree in the natural order of `T`.
    pub fn new() -> Self {
        Self::with_comparator(T::cmp)
    }
}

impl<T> AvlTree<T> {
    pub fn with_comparator<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'static,
    {
        Self {
            root: None,
            len: 0,
            compare: Box::new(compare),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Levels from root to deepest leaf: 0 when empty, 1 for a single node.
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Inserts `value` unless an equal element is already present.
    pub fn insert(&mut self, value: T) -> bool {
        let (root, inserted) = insert_node(self.root.take(), value, &*self.compare);
        self.root = Some(root);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Removes and returns the element equal to `value`.
    pub fn remove(&mut self, value: &T) -> Option<T> {
        let (root, removed) = remove_node(self.root.take(), value, &*self.compare);
        self.root = root;
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    pub fn contains(&self, value: &T) -> bool {
        self.get(value).is_some()
    }

    pub fn get(&self, value: &T) -> Option<&T> {
        let mut link = &self.root;
        while let Some(node) = link {
            match (self.compare)(value, &node.value) {
                Ordering::Less => link = &node.left,
                Ordering::Greater => link = &node.right,
                Ordering::Equal => return Some(&node.value),
            }
        }
        None
    }

    /// Visits every element in order.
    pub fn traverse<F>(&self, mut visit: F)
    where
        F: FnMut(&T),
    {
        fn walk<T, F: FnMut(&T)>(link: &Link<T>, visit: &mut F) {
            if let Some(node) = link {
                walk(&node.left, visit);
                visit(&node.value);
                walk(&node.right, visit);
            }
        }
        walk(&self.root, &mut visit);
    }

    pub fn in_order(&self) -> Vec<&T> {
        fn walk<'a, T>(link: &'a Link<T>, out: &mut Vec<&'a T>) {
            if let Some(node) = link {
                walk(&node.left, out);
                out.push(&node.value);
                walk(&node.right, out);
            }
        }
        let mut out = Vec::with_capacity(self.len);
        walk(&self.root, &mut out);
        out
    }

    pub fn pre_order(&self) -> Vec<&T> {
        fn walk<'a, T>(link: &'a Link<T>, out: &mut Vec<&'a T>) {
            if let Some(node) = link {
                out.push(&node.value);
                walk(&node.left, out);
                walk(&node.right, out);
            }
        }
        let mut out = Vec::with_capacity(self.len);
        walk(&self.root, &mut out);
        out
    }

    pub fn post_order(&self) -> Vec<&T> {
        fn walk<'a, T>(link: &'a Link<T>, out: &mut Vec<&'a T>) {
            if let Some(node) = link {
                walk(&node.left, out);
                walk(&node.right, out);
                out.push(&node.value);
            }
        }
        let mut out = Vec::with_capacity(self.len);
        walk(&self.root, &mut out);
        out
    }

    pub fn level_order(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len);
        let mut queue: VecDeque<&Node<T>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = queue.pop_front() {
            out.push(&node.value);
            queue.extend(node.left.as_deref());
            queue.extend(node.right.as_deref());
        }
        out
    }

    /// Elements within `[lo, hi]` inclusive, in order.
    pub fn range(&self, lo: &T, hi: &T) -> Vec<&T> {
        fn walk<'a, T>(
            link: &'a Link<T>,
            lo: &T,
            hi: &T,
            compare: &dyn Fn(&T, &T) -> Ordering,
            out: &mut Vec<&'a T>,
        ) {
            let Some(node) = link else {
                return;
            };
            let above_lo = compare(&node.value, lo) != Ordering::Less;
            let below_hi = compare(&node.value, hi) != Ordering::Greater;
            if above_lo {
                walk(&node.left, lo, hi, compare, out);
            }
            if above_lo && below_hi {
                out.push(&node.value);
            }
            if below_hi {
                walk(&node.right, lo, hi, compare, out);
            }
        }

        let mut out = Vec::new();
        walk(&self.root, lo, hi, &*self.compare, &mut out);
        out
    }

    /// Every root-to-leaf path, leftmost first.
    pub fn paths(&self) -> Vec<Vec<&T>> {
        fn walk<'a, T>(link: &'a Link<T>, path: &mut Vec<&'a T>, out: &mut Vec<Vec<&'a T>>) {
            let Some(node) = link else {
                return;
            };
            path.push(&node.value);
            if node.left.is_none() && node.right.is_none() {
                out.push(path.clone());
            } else {
                walk(&node.left, path, out);
                walk(&node.right, path, out);
            }
            path.pop();
        }

        let mut out = Vec::new();
        walk(&self.root, &mut Vec::new(), &mut out);
        out
    }

    /// Number of nodes with two children.
    pub fn full_count(&self) -> usize {
        fn count<T>(link: &Link<T>) -> usize {
            match link {
                None => 0,
                Some(node) => {
                    let full = usize::from(node.left.is_some() && node.right.is_some());
                    full + count(&node.left) + count(&node.right)
                }
            }
        }
        count(&self.root)
    }

    /// Whether the tree holds the fewest nodes any AVL tree of its height
    /// can have.
    pub fn is_fibonacci(&self) -> bool {
        self.len == min_nodes_for_height(self.height())
    }
}

/// N(0) = 0, N(1) = 1, N(h) = N(h-1) + N(h-2) + 1.
fn min_nodes_for_height(height: usize) -> usize {
    let (mut prev, mut cur) = (0usize, 1usize);
    if height == 0 {
        return 0;
    }
    for _ in 1..height {
        (prev, cur) = (cur, cur + prev + 1);
    }
    cur
}

fn insert_node<T>(
    link: Link<T>,
    value: T,
    compare: &dyn Fn(&T, &T) -> Ordering,
) -> (Box<Node<T>>, bool) {
    let Some(mut node) = link else {
        return (Node::leaf(value), true);
    };

    let inserted = match compare(&value, &node.value) {
        Ordering::Less => {
            let (child, inserted) = insert_node(node.left.take(), value, compare);
            node.left = Some(child);
            inserted
        }
        Ordering::Greater => {
            let (child, inserted) = insert_node(node.right.take(), value, compare);
            node.right = Some(child);
            inserted
        }
        Ordering::Equal => false,
    };

    if inserted {
        (rebalance(node), true)
    } else {
        (node, false)
    }
}

fn remove_node<T>(
    link: Link<T>,
    value: &T,
    compare: &dyn Fn(&T, &T) -> Ordering,
) -> (Link<T>, Option<T>) {
    let Some(mut node) = link else {
        return (None, None);
    };

    match compare(value, &node.value) {
        Ordering::Less => {
            let (child, removed) = remove_node(node.left.take(), value, compare);
            node.left = child;
            (Some(rebalance(node)), removed)
        }
        Ordering::Greater => {
            let (child, removed) = remove_node(node.right.take(), value, compare);
            node.right = child;
            (Some(rebalance(node)), removed)
        }
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, None) => (None, Some(node.value)),
            (Some(child), None) | (None, Some(child)) => (Some(child), Some(node.value)),
            (Some(left), Some(right)) => {
                let (right, successor) = take_min(right);
                node.left = Some(left);
                node.right = right;
                let removed = std::mem::replace(&mut node.value, successor);
                (Some(rebalance(node)), Some(removed))
            }
        },
    }
}

/// Detaches the smallest element of a subtree.
fn take_min<T>(mut node: Box<Node<T>>) -> (Link<T>, T) {
    match node.left.take() {
        None => {
            let Node { value, right, .. } = *node;
            (right, value)
        }
        Some(left) => {
            let (left, min) = take_min(left);
            node.left = left;
            (Some(rebalance(node)), min)
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvlTree")
            .field("len", &self.len)
            .field("height", &self.height())
            .field("elements", &self.in_order())
            .finish_non_exhaustive()
    }
}
