//! The AVL tree engine.
//!
//! All mutation follows one pattern: a recursive step takes ownership of a
//! subtree (`Link`), transforms it, and returns the new subtree root for
//! the caller to reattach. No parent pointers, no pointer fix-up.

mod iter;
mod node;
#[cfg(test)]
mod proptests;

use std::cmp::Ordering;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::Result;
use crate::snapshot::{MalformedPolicy, Record, SnapshotReader, SnapshotWriter};
use crate::types::{Key, Value};

pub use iter::{Iter, PreOrderIter};
use node::{Link, Node, balance_of, find_min, height};

/// A keyed record store that stays height-balanced under any insert/delete
/// order, so lookups remain logarithmic even for adversarial input such as
/// keys arriving in sorted order.
///
/// Keys are unique. After every public mutating operation the tree upholds
/// strict BST order, the AVL balance invariant (sibling subtree heights
/// differ by at most 1) and exact stored heights.
///
/// Single-threaded by design: mutation requires `&mut self`, and iterators
/// hold a shared borrow, so the borrow checker rules out mutation during
/// enumeration.
#[derive(Default)]
pub struct AvlIndex {
    root: Link,
    len: usize,
    rotations: u64,
}

impl AvlIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        AvlIndex {
            root: None,
            len: 0,
            rotations: 0,
        }
    }

    /// Number of records in the index. O(1); maintained incrementally.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the index holds no records.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the tree; 0 for an empty index.
    ///
    /// The balance invariant bounds this by roughly `1.44 * log2(len + 2)`.
    pub fn height(&self) -> u32 {
        height(&self.root)
    }

    /// Rotations performed since construction or the last [`clear`].
    ///
    /// A single rotation counts 1; a double rotation is two singles and
    /// counts 2.
    ///
    /// [`clear`]: AvlIndex::clear
    pub fn rotation_count(&self) -> u64 {
        self.rotations
    }

    /// Drop every record and reset the rotation counter.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
        self.rotations = 0;
    }

    // ==================== lookup ====================

    /// Look up a key. Returns the stored value if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        let mut node = self.root.as_deref();
        while let Some(n) = node {
            node = match key.cmp(n.key.as_str()) {
                Ordering::Less => n.left.as_deref(),
                Ordering::Greater => n.right.as_deref(),
                Ordering::Equal => return Some(n.value.as_str()),
            };
        }
        None
    }

    // ==================== insertion ====================

    /// Insert a record, or overwrite the value if the key already exists.
    ///
    /// An overwrite changes no structure and triggers no rotation. A real
    /// insertion rebalances with at most one rotation (single or double)
    /// on the way back up — the standard AVL property.
    pub fn insert(&mut self, key: Key, value: Value) {
        let root = self.root.take();
        self.root = Some(self.insert_rec(root, &key, value));
    }

    fn insert_rec(&mut self, link: Link, key: &str, value: Value) -> Box<Node> {
        let Some(mut node) = link else {
            self.len += 1;
            return Box::new(Node::new(key.to_owned(), value));
        };

        match key.cmp(node.key.as_str()) {
            Ordering::Less => {
                let left = self.insert_rec(node.left.take(), key, value);
                node.left = Some(left);
            }
            Ordering::Greater => {
                let right = self.insert_rec(node.right.take(), key, value);
                node.right = Some(right);
            }
            Ordering::Equal => {
                // Value overwrite: no new node, so no height change and no
                // rebalance below this point.
                node.value = value;
                return node;
            }
        }

        node.update_height();
        self.rebalance_after_insert(node, key)
    }

    /// Insert-side rebalance. The four cases are disambiguated by where the
    /// inserted key landed relative to the taller child's key.
    fn rebalance_after_insert(&mut self, node: Box<Node>, key: &str) -> Box<Node> {
        let balance = node.balance_factor();

        if balance > 1 {
            if let Some(left) = node.left.as_deref() {
                match key.cmp(left.key.as_str()) {
                    Ordering::Less => return self.rotate_right(node), // LL
                    Ordering::Greater => return self.rotate_left_right(node), // LR
                    Ordering::Equal => {}
                }
            }
        } else if balance < -1 {
            if let Some(right) = node.right.as_deref() {
                match key.cmp(right.key.as_str()) {
                    Ordering::Greater => return self.rotate_left(node), // RR
                    Ordering::Less => return self.rotate_right_left(node), // RL
                    Ordering::Equal => {}
                }
            }
        }

        node
    }

    // ==================== deletion ====================

    /// Remove a record. Returns whether the key was present; deleting an
    /// absent key is a no-op, so deletion is idempotent.
    ///
    /// Unlike insertion, one deletion can require a rotation at every
    /// ancestor on the path back to the root; the recursive
    /// return-and-reattach re-checks balance at each level.
    pub fn delete(&mut self, key: &str) -> bool {
        let before = self.len;
        let root = self.root.take();
        self.root = self.delete_rec(root, key);
        self.len < before
    }

    fn delete_rec(&mut self, link: Link, key: &str) -> Link {
        let mut node = link?;

        match key.cmp(node.key.as_str()) {
            Ordering::Less => {
                node.left = self.delete_rec(node.left.take(), key);
            }
            Ordering::Greater => {
                node.right = self.delete_rec(node.right.take(), key);
            }
            Ordering::Equal => {
                // At most one child: splice the node out. The surviving
                // subtree (or nothing) replaces it as-is.
                if node.left.is_none() {
                    self.len -= 1;
                    return node.right.take();
                }
                let Some(right) = node.right.as_deref() else {
                    self.len -= 1;
                    return node.left.take();
                };

                // Two children: copy the in-order successor (leftmost of
                // the right subtree) into this node, then delete the
                // successor from the right subtree. The physical splice —
                // and the length decrement — happen in that inner call.
                let successor = find_min(right);
                let succ_key = successor.key.clone();
                let succ_value = successor.value.clone();
                node.right = self.delete_rec(node.right.take(), &succ_key);
                node.key = succ_key;
                node.value = succ_value;
            }
        }

        node.update_height();
        Some(self.rebalance_after_delete(node))
    }

    /// Delete-side rebalance. The removed key is already gone, so the
    /// single-vs-double tie-break uses the taller child's own balance
    /// factor instead.
    fn rebalance_after_delete(&mut self, node: Box<Node>) -> Box<Node> {
        let balance = node.balance_factor();

        if balance > 1 {
            if balance_of(&node.left) >= 0 {
                return self.rotate_right(node);
            }
            return self.rotate_left_right(node);
        }
        if balance < -1 {
            if balance_of(&node.right) <= 0 {
                return self.rotate_left(node);
            }
            return self.rotate_right_left(node);
        }
        node
    }

    // ==================== rotations ====================

    /// Single right rotation (LL case): `z`'s left child becomes the new
    /// subtree root. Heights update child-before-parent, because the new
    /// parent's height depends on the rotated child's.
    fn rotate_right(&mut self, mut z: Box<Node>) -> Box<Node> {
        self.rotations += 1;
        let mut y = z
            .left
            .take()
            .expect("rotate_right: balance invariant guarantees a left child");
        z.left = y.right.take();
        z.update_height();
        y.right = Some(z);
        y.update_height();
        y
    }

    /// Single left rotation (RR case): mirror of [`rotate_right`].
    ///
    /// [`rotate_right`]: AvlIndex::rotate_right
    fn rotate_left(&mut self, mut z: Box<Node>) -> Box<Node> {
        self.rotations += 1;
        let mut y = z
            .right
            .take()
            .expect("rotate_left: balance invariant guarantees a right child");
        z.right = y.left.take();
        z.update_height();
        y.left = Some(z);
        y.update_height();
        y
    }

    /// Double rotation (LR case): rotate the left child left, then this
    /// node right. Increments the counter twice, once per single rotation.
    fn rotate_left_right(&mut self, mut z: Box<Node>) -> Box<Node> {
        let left = z
            .left
            .take()
            .expect("rotate_left_right: balance invariant guarantees a left child");
        z.left = Some(self.rotate_left(left));
        self.rotate_right(z)
    }

    /// Double rotation (RL case): mirror of `rotate_left_right`.
    fn rotate_right_left(&mut self, mut z: Box<Node>) -> Box<Node> {
        let right = z
            .right
            .take()
            .expect("rotate_right_left: balance invariant guarantees a right child");
        z.right = Some(self.rotate_right(right));
        self.rotate_left(z)
    }

    // ==================== traversal ====================

    /// In-order iterator: entries in ascending key order. Lazy and
    /// restartable (call `iter` again for a fresh pass).
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.root.as_deref())
    }

    /// Pre-order iterator: root first, then left subtree, then right. This
    /// is the order [`serialize_into`] writes records in.
    ///
    /// [`serialize_into`]: AvlIndex::serialize_into
    pub fn pre_order(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self.root.as_deref())
    }

    // ==================== serialization ====================

    /// Write every record as a `key|value` line, in pre-order.
    pub fn serialize_into<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = SnapshotWriter::new(writer);
        for (key, value) in self.pre_order() {
            writer.append(&Record::new(key, value))?;
        }
        writer.flush()
    }

    /// Read `key|value` lines from a stream and insert each record.
    ///
    /// Loading merges into the current contents; duplicate keys are
    /// overwritten. Rebalancing during re-insertion means the rebuilt tree
    /// generally has a different shape than the one serialized — contents
    /// round-trip exactly, shape intentionally does not. Returns the number
    /// of records applied.
    pub fn deserialize_from<R: Read>(
        &mut self,
        reader: R,
        policy: MalformedPolicy,
    ) -> Result<usize> {
        let snapshot = SnapshotReader::from_reader(reader)?;
        self.apply_records(&snapshot, policy)
    }

    /// Save a snapshot file; contents are durable once this returns.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = SnapshotWriter::create(path.as_ref())?;
        for (key, value) in self.pre_order() {
            writer.append(&Record::new(key, value))?;
        }
        writer.finish()
    }

    /// Load a snapshot file into the index.
    ///
    /// A missing file surfaces as an `Error::Io` for which
    /// [`Error::is_missing_file`] is true; callers usually report that as
    /// "no data loaded" rather than failing.
    ///
    /// [`Error::is_missing_file`]: crate::Error::is_missing_file
    pub fn load_from_path<P: AsRef<Path>>(
        &mut self,
        path: P,
        policy: MalformedPolicy,
    ) -> Result<usize> {
        let snapshot = SnapshotReader::open(path.as_ref())?;
        self.apply_records(&snapshot, policy)
    }

    fn apply_records(
        &mut self,
        snapshot: &SnapshotReader,
        policy: MalformedPolicy,
    ) -> Result<usize> {
        let mut applied = 0;
        for record in snapshot.records() {
            match record {
                Ok(record) => {
                    self.insert(record.key, record.value);
                    applied += 1;
                }
                Err(err) => match policy {
                    MalformedPolicy::Fail => return Err(err),
                    MalformedPolicy::Skip => {}
                },
            }
        }
        Ok(applied)
    }
}
