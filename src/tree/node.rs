use crate::types::{Key, Value};

/// Owned child slot. `None` is the first-class "no node" state — an absent
/// child or an empty tree, never a dangling pointer.
pub(crate) type Link = Option<Box<Node>>;

/// One tree vertex. A node exclusively owns its two subtrees; there are no
/// parent pointers, so a rotation is pure relinking of owned boxes.
#[derive(Debug)]
pub(crate) struct Node {
    pub key: Key,
    pub value: Value,
    /// Stored height: leaf = 1, always `1 + max(child heights)`.
    pub height: u32,
    pub left: Link,
    pub right: Link,
}

impl Node {
    pub fn new(key: Key, value: Value) -> Self {
        Node {
            key,
            value,
            height: 1,
            left: None,
            right: None,
        }
    }

    /// Recompute the stored height from the children. Must run after any
    /// child pointer changed, before the node is handed back up the call
    /// chain.
    pub fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    /// `height(left) - height(right)`. Computed on demand, never stored.
    pub fn balance_factor(&self) -> i32 {
        height(&self.left) as i32 - height(&self.right) as i32
    }
}

/// Height of a subtree; an absent node contributes 0.
pub(crate) fn height(link: &Link) -> u32 {
    link.as_ref().map_or(0, |node| node.height)
}

/// Balance factor of a subtree root; 0 for an absent node.
pub(crate) fn balance_of(link: &Link) -> i32 {
    link.as_deref().map_or(0, Node::balance_factor)
}

/// Leftmost node of a non-empty subtree — the in-order successor when
/// called on a right child.
pub(crate) fn find_min(mut node: &Node) -> &Node {
    while let Some(left) = node.left.as_deref() {
        node = left;
    }
    node
}
