//! Self-adjusting splay tree cache.
//!
//! Nodes are kept in an arena and refer to their parent and children by
//! index, which keeps the parent back-links free of ownership cycles while
//! every rotation stays a handful of index rewrites.

use parking_lot::Mutex;
use std::cmp::Ordering;
use tracing::{debug, trace};

struct Node<T> {
    data: T,
    parent: Option<usize>,
    left: Option<usize>,
    right: Option<usize>,
}

/// SplayTree is an unbounded binary search tree that moves every successfully found node to the root.
///
/// Keys that are looked up repeatedly stay near the top, giving amortized O(log n) access that improves with locality.
/// The tree stores only keys: a key is its own cached marker. There is no deletion, so the tree only grows.
///
/// Example:
/// ```
/// use memocache::SplayTree;
///
/// let mut tree = SplayTree::new();
/// tree.insert(5);
/// tree.insert(3);
/// tree.insert(8);
///
/// assert_eq!(tree.find(&3), Some(&3));
/// assert_eq!(tree.root(), Some(&3));
/// assert_eq!(tree.in_order(), vec![&3, &5, &8]);
/// assert_eq!(tree.find(&4), None);
/// ```
pub struct SplayTree<T> {
    nodes: Vec<Node<T>>,
    root: Option<usize>,
}

impl<T> Default for SplayTree<T> {
    fn default() -> Self {
        SplayTree {
            nodes: Vec::new(),
            root: None,
        }
    }
}

impl<T: Ord> SplayTree<T> {
    /// Create a new, empty SplayTree.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<&T> {
        self.root.map(|root| &self.nodes[root].data)
    }

    /// Insert `data` as a new leaf. Equal keys descend to the right. The tree is not splayed.
    pub fn insert(&mut self, data: T) {
        let index = self.nodes.len();
        let mut parent = None;
        let mut cursor = self.root;
        let mut goes_left = false;

        while let Some(current) = cursor {
            parent = Some(current);
            goes_left = data < self.nodes[current].data;
            cursor = if goes_left {
                self.nodes[current].left
            } else {
                self.nodes[current].right
            };
        }

        self.nodes.push(Node {
            data,
            parent,
            left: None,
            right: None,
        });
        match parent {
            None => self.root = Some(index),
            Some(parent) if goes_left => self.nodes[parent].left = Some(index),
            Some(parent) => self.nodes[parent].right = Some(index),
        }
    }

    /// Look up `key`. A hit is splayed to the root; a miss leaves the tree exactly as it was.
    pub fn find(&mut self, key: &T) -> Option<&T> {
        let mut cursor = self.root;
        while let Some(current) = cursor {
            cursor = match key.cmp(&self.nodes[current].data) {
                Ordering::Less => self.nodes[current].left,
                Ordering::Greater => self.nodes[current].right,
                Ordering::Equal => {
                    self.splay(current);
                    return Some(&self.nodes[current].data);
                }
            };
        }
        None
    }

    /// Keys in ascending order.
    pub fn in_order(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = Vec::new();
        let mut cursor = self.root;
        while cursor.is_some() || !stack.is_empty() {
            while let Some(current) = cursor {
                stack.push(current);
                cursor = self.nodes[current].left;
            }
            if let Some(current) = stack.pop() {
                out.push(&self.nodes[current].data);
                cursor = self.nodes[current].right;
            }
        }
        out
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(usize, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();
        while let Some((current, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[current];
            stack.extend(node.left.map(|left| (left, depth + 1)));
            stack.extend(node.right.map(|right| (right, depth + 1)));
        }
        height
    }

    fn is_left_child(&self, node: usize) -> bool {
        self.nodes[node]
            .parent
            .is_some_and(|parent| self.nodes[parent].left == Some(node))
    }

    /// Rotate `node` up until it becomes the root.
    fn splay(&mut self, node: usize) {
        let mut rotations = 0usize;
        while let Some(parent) = self.nodes[node].parent {
            match self.nodes[parent].parent {
                // zig
                None => {
                    if self.is_left_child(node) {
                        self.rotate_right(parent);
                    } else {
                        self.rotate_left(parent);
                    }
                    rotations += 1;
                }
                Some(grandparent) => {
                    let node_left = self.is_left_child(node);
                    let parent_left = self.is_left_child(parent);
                    match (node_left, parent_left) {
                        // zig-zig
                        (true, true) => {
                            self.rotate_right(grandparent);
                            self.rotate_right(parent);
                        }
                        (false, false) => {
                            self.rotate_left(grandparent);
                            self.rotate_left(parent);
                        }
                        // zig-zag: the second rotation pivots on the grandparent, now node's parent
                        (true, false) => {
                            self.rotate_right(parent);
                            self.rotate_left(grandparent);
                        }
                        (false, true) => {
                            self.rotate_left(parent);
                            self.rotate_right(grandparent);
                        }
                    }
                    rotations += 2;
                }
            }
        }
        trace!(rotations, "splayed node to root");
    }

    /// Replace `old` with `new` in the child slot of `parent`, or at the root.
    fn replace_child(&mut self, parent: Option<usize>, old: usize, new: usize) {
        match parent {
            None => self.root = Some(new),
            Some(parent) if self.nodes[parent].left == Some(old) => {
                self.nodes[parent].left = Some(new)
            }
            Some(parent) => self.nodes[parent].right = Some(new),
        }
    }

    /// Lift the left child of `node` into its place. No-op without a left child.
    fn rotate_right(&mut self, node: usize) {
        let Some(left) = self.nodes.get(node).and_then(|n| n.left) else {
            return;
        };
        let moved = self.nodes[left].right;
        self.nodes[node].left = moved;
        if let Some(moved) = moved {
            self.nodes[moved].parent = Some(node);
        }
        let parent = self.nodes[node].parent;
        self.nodes[left].parent = parent;
        self.replace_child(parent, node, left);
        self.nodes[left].right = Some(node);
        self.nodes[node].parent = Some(left);
    }

    /// Lift the right child of `node` into its place. No-op without a right child.
    fn rotate_left(&mut self, node: usize) {
        let Some(right) = self.nodes.get(node).and_then(|n| n.right) else {
            return;
        };
        let moved = self.nodes[right].left;
        self.nodes[node].right = moved;
        if let Some(moved) = moved {
            self.nodes[moved].parent = Some(node);
        }
        let parent = self.nodes[node].parent;
        self.nodes[right].parent = parent;
        self.replace_child(parent, node, right);
        self.nodes[right].left = Some(node);
        self.nodes[node].parent = Some(right);
    }

    /// Panics if BST ordering, parent/child symmetry, or reachability is violated.
    #[cfg(test)]
    pub(crate) fn debug_validate_invariants(&self) {
        if let Some(root) = self.root {
            assert_eq!(self.nodes[root].parent, None, "root has a parent");
        }
        let mut reachable = 0;
        let mut stack: Vec<usize> = self.root.into_iter().collect();
        while let Some(current) = stack.pop() {
            reachable += 1;
            let node = &self.nodes[current];
            if let Some(left) = node.left {
                assert_eq!(self.nodes[left].parent, Some(current), "left child parent link broken");
                // rotations can carry an equal key to the left
                assert!(self.nodes[left].data <= node.data, "left child greater than parent");
                stack.push(left);
            }
            if let Some(right) = node.right {
                assert_eq!(self.nodes[right].parent, Some(current), "right child parent link broken");
                assert!(self.nodes[right].data >= node.data, "right child less than parent");
                stack.push(right);
            }
        }
        assert_eq!(reachable, self.nodes.len(), "nodes unreachable from root");
        let keys = self.in_order();
        assert!(keys.windows(2).all(|w| w[0] <= w[1]), "in-order walk not sorted");
    }

    /// Root index and every node's links, for comparing tree shapes.
    #[cfg(test)]
    fn shape(&self) -> (Option<usize>, Vec<(Option<usize>, Option<usize>, Option<usize>)>) {
        (
            self.root,
            self.nodes.iter().map(|n| (n.parent, n.left, n.right)).collect(),
        )
    }
}

/// SplayCache is a thread-safe handle around a [`SplayTree`].
///
/// It memoizes by presence: `insert` records a key, `find` reports whether the key was seen before and splays it to the root.
/// Unlike [`LRUCache`](crate::LRUCache) it has no capacity and never evicts.
///
/// All mutability is handled internally with a Mutex, so the cache can be shared between threads.
///
/// Example:
/// ```
/// use memocache::SplayCache;
///
/// let cache = SplayCache::new();
/// cache.insert(10u64);
/// cache.insert(20u64);
///
/// assert_eq!(cache.find(&20), Some(20));
/// assert_eq!(cache.root(), Some(20));
/// assert_eq!(cache.find(&15), None);
/// ```
pub struct SplayCache<T> {
    inner: Mutex<SplayTree<T>>,
}

impl<T: Ord + Clone + Send> Default for SplayCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone + Send> SplayCache<T> {
    /// Create a new, empty SplayCache.
    pub fn new() -> Self {
        debug!("creating splay cache");
        SplayCache {
            inner: Mutex::new(SplayTree::new()),
        }
    }

    /// Record `key` in the tree.
    pub fn insert(&self, key: T) {
        self.inner.lock().insert(key);
    }

    /// Return the stored key on a hit, splaying it to the root.
    pub fn find(&self, key: &T) -> Option<T> {
        self.inner.lock().find(key).cloned()
    }

    pub fn root(&self) -> Option<T> {
        self.inner.lock().root().cloned()
    }

    pub fn in_order(&self) -> Vec<T> {
        self.inner.lock().in_order().into_iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}
