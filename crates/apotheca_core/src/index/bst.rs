//! Plain (unbalanced) binary search tree index.

use std::cmp::Ordering;

type Link<K, P> = Option<Box<Node<K, P>>>;

struct Node<K, P> {
    key: K,
    payload: P,
    left: Link<K, P>,
    right: Link<K, P>,
}

impl<K, P> Node<K, P> {
    fn leaf(key: K, payload: P) -> Self {
        Self {
            key,
            payload,
            left: None,
            right: None,
        }
    }
}

/// Unbalanced binary search tree keyed by a (possibly duplicated) key.
///
/// Used for the by-name index, where keys are case-insensitive
/// [`NameKey`](crate::index::NameKey)s and collisions are legal: two records
/// may carry the same display name. Ties on insert go right, so the
/// first-inserted record for a key sits shallowest and is the one search
/// returns. Later records with the same key remain in the tree but are not
/// reachable by exact-key search; this mirrors the historical behavior and
/// is kept on purpose.
///
/// Depth is bounded only by insertion order: sorted-order insertion degrades
/// lookups to O(n). Entity counts are small and the tree is rebuilt from the
/// store after every mutation, so this is an accepted limitation rather than
/// something the balanced index's rotations are applied to.
pub struct BstIndex<K, P> {
    root: Link<K, P>,
    len: usize,
}

impl<K, P> Default for BstIndex<K, P> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<K: Ord, P> BstIndex<K, P> {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a key-payload pair at the first empty position.
    ///
    /// Equal keys descend right, so the first-inserted entry for a key stays
    /// shallowest and wins exact-key search. No rebalancing is performed.
    pub fn insert(&mut self, key: K, payload: P) {
        let mut cur = &mut self.root;
        while let Some(node) = cur {
            cur = match key.cmp(&node.key) {
                Ordering::Less => &mut node.left,
                Ordering::Equal | Ordering::Greater => &mut node.right,
            };
        }
        *cur = Some(Box::new(Node::leaf(key, payload)));
        self.len += 1;
    }

    /// Looks up a payload by exact key, stopping at the shallowest match.
    pub fn get(&self, key: &K) -> Option<&P> {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            cur = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.payload),
            };
        }
        None
    }

    /// Checks whether a key is present.
    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns the number of entries, counting duplicates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Discards all entries.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// In-order iteration: keys ascend (non-strictly, since duplicates are
    /// allowed).
    pub fn iter(&self) -> InOrder<'_, K, P> {
        InOrder {
            stack: Vec::new(),
            cur: self.root.as_deref(),
        }
    }

    /// In-order key sequence.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }
}

impl<K, P> Drop for BstIndex<K, P> {
    // Dismantle iteratively: a sorted insertion order leaves a spine as deep
    // as the tree is large, which would overflow the stack under the default
    // recursive drop.
    fn drop(&mut self) {
        let mut stack = Vec::new();
        if let Some(root) = self.root.take() {
            stack.push(root);
        }
        while let Some(mut node) = stack.pop() {
            if let Some(left) = node.left.take() {
                stack.push(left);
            }
            if let Some(right) = node.right.take() {
                stack.push(right);
            }
        }
    }
}

/// In-order iterator over a [`BstIndex`].
pub struct InOrder<'a, K, P> {
    stack: Vec<&'a Node<K, P>>,
    cur: Option<&'a Node<K, P>>,
}

impl<'a, K, P> Iterator for InOrder<'a, K, P> {
    type Item = (&'a K, &'a P);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.cur {
            self.stack.push(node);
            self.cur = node.left.as_deref();
        }
        let node = self.stack.pop()?;
        self.cur = node.right.as_deref();
        Some((&node.key, &node.payload))
    }
}

impl<K, P> std::fmt::Debug for BstIndex<K, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BstIndex").field("len", &self.len).finish()
    }
}
