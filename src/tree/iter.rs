use super::node::Node;

/// Lazy in-order iterator: yields `(key, value)` in ascending key order.
///
/// Restartable by calling [`AvlIndex::iter`] again. The shared borrow on
/// the index means the tree cannot mutate while an iterator is live.
///
/// [`AvlIndex::iter`]: super::AvlIndex::iter
pub struct Iter<'a> {
    // Unvisited ancestors; the top is always the next node to yield.
    stack: Vec<&'a Node>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(root: Option<&'a Node>) -> Self {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some((node.key.as_str(), node.value.as_str()))
    }
}

/// Lazy pre-order iterator: root first, then left subtree, then right.
/// This is the order snapshots are written in, so the first entry is
/// always the root.
pub struct PreOrderIter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> PreOrderIter<'a> {
    pub(crate) fn new(root: Option<&'a Node>) -> Self {
        PreOrderIter {
            stack: root.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right goes on the stack first so the left subtree pops first.
        if let Some(right) = node.right.as_deref() {
            self.stack.push(right);
        }
        if let Some(left) = node.left.as_deref() {
            self.stack.push(left);
        }
        Some((node.key.as_str(), node.value.as_str()))
    }
}
