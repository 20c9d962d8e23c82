//! Height-balanced (AVL) index.

use std::cmp::Ordering;

type Link<K, P> = Option<Box<Node<K, P>>>;

struct Node<K, P> {
    key: K,
    payload: P,
    /// Cached subtree height: 1 for a leaf, 0 for an absent subtree.
    height: u32,
    left: Link<K, P>,
    right: Link<K, P>,
}

impl<K, P> Node<K, P> {
    fn leaf(key: K, payload: P) -> Self {
        Self {
            key,
            payload,
            height: 1,
            left: None,
            right: None,
        }
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    /// Balance factor: left height minus right height.
    fn balance_factor(&self) -> i32 {
        height(&self.left) as i32 - height(&self.right) as i32
    }
}

fn height<K, P>(link: &Link<K, P>) -> u32 {
    link.as_ref().map_or(0, |node| node.height)
}

/// Self-balancing binary search tree keyed by a unique orderable key.
///
/// `AvlIndex` supports insert and exact-key search in O(log n). Inserting a
/// key that is already present is a silent no-op: ids are assigned uniquely
/// upstream, but a redundant insert during a rebuild must not corrupt the
/// tree.
///
/// There is no delete operation. Stale entries are discarded by rebuilding
/// the whole index from a fresh record-store snapshot instead (see
/// [`EntityIndexSet`](crate::index::EntityIndexSet)).
///
/// # Example
///
/// ```rust
/// use apotheca_core::index::AvlIndex;
///
/// let mut index: AvlIndex<u32, &str> = AvlIndex::new();
/// index.insert(30, "thirty");
/// index.insert(10, "ten");
/// index.insert(20, "twenty");
///
/// assert_eq!(index.get(&20), Some(&"twenty"));
/// assert_eq!(index.get(&99), None);
/// ```
pub struct AvlIndex<K, P> {
    root: Link<K, P>,
    len: usize,
}

impl<K, P> Default for AvlIndex<K, P> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<K: Ord + Clone, P> AvlIndex<K, P> {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a key-payload pair, rebalancing on the way back up.
    ///
    /// Returns `true` if the key was inserted, `false` if it was already
    /// present (in which case the tree is left unchanged).
    pub fn insert(&mut self, key: K, payload: P) -> bool {
        let (root, inserted) = Self::insert_at(self.root.take(), key, payload);
        self.root = Some(root);
        if inserted {
            self.len += 1;
        } else {
            tracing::debug!("ignored insert of duplicate key");
        }
        inserted
    }

    fn insert_at(link: Link<K, P>, key: K, payload: P) -> (Box<Node<K, P>>, bool) {
        let mut node = match link {
            None => return (Box::new(Node::leaf(key, payload)), true),
            Some(node) => node,
        };

        match key.cmp(&node.key) {
            Ordering::Equal => (node, false),
            Ordering::Less => {
                let inserted_key = key.clone();
                let (child, inserted) = Self::insert_at(node.left.take(), key, payload);
                node.left = Some(child);
                if !inserted {
                    return (node, false);
                }
                node.update_height();
                (Self::rebalance(node, &inserted_key), true)
            }
            Ordering::Greater => {
                let inserted_key = key.clone();
                let (child, inserted) = Self::insert_at(node.right.take(), key, payload);
                node.right = Some(child);
                if !inserted {
                    return (node, false);
                }
                node.update_height();
                (Self::rebalance(node, &inserted_key), true)
            }
        }
    }

    /// Restores the balance invariant at `node` after an insert of
    /// `inserted_key` somewhere below it.
    ///
    /// The four cases compare the inserted key against the taller child's
    /// key to decide between a single and a double rotation.
    fn rebalance(mut node: Box<Node<K, P>>, inserted_key: &K) -> Box<Node<K, P>> {
        let balance = node.balance_factor();

        if balance > 1 {
            if let Some(left) = node.left.as_ref() {
                if *inserted_key < left.key {
                    // Left-left: single right rotation.
                    return Self::rotate_right(node);
                }
                if *inserted_key > left.key {
                    // Left-right: rotate the left child left, then rotate right.
                    node.left = node.left.take().map(Self::rotate_left);
                    return Self::rotate_right(node);
                }
            }
        }

        if balance < -1 {
            if let Some(right) = node.right.as_ref() {
                if *inserted_key > right.key {
                    // Right-right: single left rotation.
                    return Self::rotate_left(node);
                }
                if *inserted_key < right.key {
                    // Right-left: rotate the right child right, then rotate left.
                    node.right = node.right.take().map(Self::rotate_right);
                    return Self::rotate_left(node);
                }
            }
        }

        node
    }

    /// Right rotation: `y`'s left child `x` becomes the subtree root; `x`'s
    /// right subtree (the inner subtree) is re-parented under `y`.
    ///
    /// Ownership moves through `Box` so the inner subtree can be neither
    /// dropped nor duplicated. A node with no left child is returned
    /// unchanged; the rebalance cases never ask for that rotation.
    fn rotate_right(mut y: Box<Node<K, P>>) -> Box<Node<K, P>> {
        match y.left.take() {
            None => y,
            Some(mut x) => {
                y.left = x.right.take();
                y.update_height();
                x.right = Some(y);
                x.update_height();
                x
            }
        }
    }

    /// Left rotation, mirror of [`Self::rotate_right`].
    fn rotate_left(mut x: Box<Node<K, P>>) -> Box<Node<K, P>> {
        match x.right.take() {
            None => x,
            Some(mut y) => {
                x.right = y.left.take();
                x.update_height();
                y.left = Some(x);
                y.update_height();
                y
            }
        }
    }

    /// Looks up a payload by exact key.
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

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the tree height (0 for an empty tree).
    #[must_use]
    pub fn height(&self) -> u32 {
        height(&self.root)
    }

    /// Discards all entries.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// In-order iteration: keys ascend strictly.
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

/// In-order iterator over an [`AvlIndex`].
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

impl<K, P> std::fmt::Debug for AvlIndex<K, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvlIndex")
            .field("len", &self.len)
            .field("height", &height(&self.root))
            .finish()
    }
}
