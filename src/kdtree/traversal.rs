//! Utilities to traverse the KDTree structure.

use crate::kdtree::{IndexablePoint, KDTree};
use crate::r#type::Axis;

/// A borrowed view onto one node of a [`KDTree`].
#[derive(Debug)]
pub struct Node<'a, P> {
    /// The tree that this node is a reference onto
    tree: &'a KDTree<P>,

    /// Handle of this node in the tree's arena
    id: u32,
}

impl<P> Clone for Node<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for Node<'_, P> {}

impl<'a, P: IndexablePoint> Node<'a, P> {
    pub(crate) fn new(tree: &'a KDTree<P>, id: u32) -> Self {
        Self { tree, id }
    }

    /// The point stored at this node.
    pub fn point(&self) -> &'a P {
        &self.tree.node(self.id).point
    }

    /// The insertion index of the point stored at this node.
    pub fn index(&self) -> u32 {
        self.tree.node(self.id).index
    }

    /// The axis that the children of this node are split over.
    pub fn axis(&self) -> Axis {
        self.tree.node(self.id).axis
    }

    /// The child holding points below this node on its splitting axis.
    ///
    /// Note that this **does not include** the point stored at this node.
    pub fn left_child(&self) -> Option<Node<'a, P>> {
        self.tree
            .node(self.id)
            .left
            .map(|id| Node::new(self.tree, id))
    }

    /// The child holding points above this node on its splitting axis.
    ///
    /// Note that this **does not include** the point stored at this node.
    pub fn right_child(&self) -> Option<Node<'a, P>> {
        self.tree
            .node(self.id)
            .right
            .map(|id| Node::new(self.tree, id))
    }

    /// Returns `true` if this is a leaf node without children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        let node = self.tree.node(self.id);
        node.left.is_none() && node.right.is_none()
    }

    /// Returns `true` if this is an intermediate node with children.
    #[inline]
    pub fn is_parent(&self) -> bool {
        !self.is_leaf()
    }

    /// The number of points in the subtree rooted at this node, including this one.
    pub fn subtree_len(&self) -> usize {
        1 + self.left_child().map_or(0, |n| n.subtree_len())
            + self.right_child().map_or(0, |n| n.subtree_len())
    }
}
