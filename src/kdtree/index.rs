use crate::kdtree::traversal::Node;
use crate::kdtree::IndexablePoint;
use crate::r#type::Axis;

/// One node of a [`KDTree`], stored in the tree's arena.
#[derive(Debug, Clone, PartialEq)]
pub struct KDNode<P> {
    pub(crate) point: P,
    /// Position of the point in the builder's insertion order.
    pub(crate) index: u32,
    pub(crate) axis: Axis,
    pub(crate) left: Option<u32>,
    pub(crate) right: Option<u32>,
}

impl<P> KDNode<P> {
    /// The point stored at this node.
    pub fn point(&self) -> &P {
        &self.point
    }

    /// The insertion index of the stored point.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// The axis this node splits its children on.
    pub fn axis(&self) -> Axis {
        self.axis
    }
}

/// An immutable, balanced k-d tree over three-dimensional points.
///
/// Usually this will be created via [`KDTreeBuilder`][crate::kdtree::KDTreeBuilder]. Nodes are
/// held in an arena in kd-sorted order, with children referenced by handle. A built tree is never
/// mutated, so it can be shared freely between threads.
#[derive(Debug, Clone, PartialEq)]
pub struct KDTree<P> {
    pub(crate) nodes: Vec<KDNode<P>>,
    pub(crate) root: Option<u32>,
    pub(crate) height: usize,
}

impl<P: IndexablePoint> KDTree<P> {
    /// The number of points in this tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if this tree holds no points.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The number of nodes on the longest root-to-leaf path. An empty tree has height 0.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Access the root node of the KDTree for manual traversal.
    pub fn root(&self) -> Option<Node<'_, P>> {
        self.root.map(|id| Node::new(self, id))
    }

    /// Iterate over all nodes in kd-sorted order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &KDNode<P>> {
        self.nodes.iter()
    }

    /// Iterate over `(insertion index, point)` pairs in kd-sorted order.
    pub fn points(&self) -> impl ExactSizeIterator<Item = (u32, &P)> {
        self.nodes.iter().map(|node| (node.index, &node.point))
    }

    #[inline]
    pub(crate) fn node(&self, id: u32) -> &KDNode<P> {
        &self.nodes[id as usize]
    }
}
