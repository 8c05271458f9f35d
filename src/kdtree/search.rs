//! Exact nearest-neighbor and radius search with plane pruning.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use num_traits::Zero;
use tinyvec::TinyVec;

use crate::kdtree::{IndexablePoint, KDTree};

/// A point found by a search, with its squared distance to the query.
#[derive(Debug)]
pub struct Neighbor<'a, P: IndexablePoint> {
    /// The stored point.
    pub point: &'a P,
    /// The point's insertion index.
    pub index: u32,
    /// Squared Euclidean distance from the query.
    pub squared_distance: P::Num,
}

impl<P: IndexablePoint> Clone for Neighbor<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: IndexablePoint> Copy for Neighbor<'_, P> {}

impl<P: IndexablePoint> PartialEq for Neighbor<'_, P> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.squared_distance == other.squared_distance
    }
}

/// A wrapper around a node and its distance for use in the priority queue.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate<N> {
    id: u32,
    index: u32,
    dist: N,
}

impl<N: PartialOrd> Eq for Candidate<N> {}

impl<N: PartialOrd> Ord for Candidate<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // NaN distances cannot occur for validated points
        self.dist
            .partial_cmp(&other.dist)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.index.cmp(&other.index))
    }
}

impl<N: PartialOrd> PartialOrd for Candidate<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<P: IndexablePoint> KDTree<P> {
    /// Find the stored point closest to `query`.
    ///
    /// Returns `None` only when the tree is empty. A stored point identical to the query is
    /// returned with distance zero.
    pub fn nearest(&self, query: &P) -> Option<Neighbor<'_, P>> {
        let root = self.root?;
        let mut best = None;
        self.nearest_impl(root, query, &mut best);
        best.map(|c| self.neighbor(c))
    }

    fn nearest_impl(&self, id: u32, query: &P, best: &mut Option<Candidate<P::Num>>) {
        let node = self.node(id);
        let dist = node.point.squared_distance(query);
        if best.map_or(true, |b| dist < b.dist) {
            *best = Some(Candidate {
                id,
                index: node.index,
                dist,
            });
        }

        let (near, far) = if query.axis_cmp(&node.point, node.axis) == Ordering::Less {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        if let Some(near) = near {
            self.nearest_impl(near, query, best);
        }

        if let Some(far) = far {
            // the far side can only hold a closer point if the splitting plane is closer
            let plane_dist = node.point.axis_squared_distance(query, node.axis);
            if best.map_or(true, |b| plane_dist < b.dist) {
                self.nearest_impl(far, query, best);
            }
        }
    }

    /// Find the `k` stored points closest to `query`, in ascending order of distance.
    ///
    /// Returns `min(k, self.len())` results. Equal distances are ordered by insertion index.
    pub fn nearest_k(&self, query: &P, k: usize) -> Vec<Neighbor<'_, P>> {
        let Some(root) = self.root else {
            return vec![];
        };
        if k == 0 {
            return vec![];
        }

        let mut heap = BinaryHeap::with_capacity(k.min(self.len()) + 1);
        self.nearest_k_impl(root, query, k, &mut heap);

        heap.into_sorted_vec()
            .into_iter()
            .map(|c| self.neighbor(c))
            .collect()
    }

    fn nearest_k_impl(
        &self,
        id: u32,
        query: &P,
        k: usize,
        heap: &mut BinaryHeap<Candidate<P::Num>>,
    ) {
        let node = self.node(id);
        let dist = node.point.squared_distance(query);
        let candidate = Candidate {
            id,
            index: node.index,
            dist,
        };
        if heap.len() < k {
            heap.push(candidate);
        } else if heap.peek().is_some_and(|worst| candidate < *worst) {
            heap.pop();
            heap.push(candidate);
        }

        let (near, far) = if query.axis_cmp(&node.point, node.axis) == Ordering::Less {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        if let Some(near) = near {
            self.nearest_k_impl(near, query, k, heap);
        }

        if let Some(far) = far {
            // equal distances may still displace the worst candidate by insertion index
            let plane_dist = node.point.axis_squared_distance(query, node.axis);
            let must_visit =
                heap.len() < k || heap.peek().is_some_and(|worst| plane_dist <= worst.dist);
            if must_visit {
                self.nearest_k_impl(far, query, k, heap);
            }
        }
    }

    /// Find all stored points within `max_squared_distance` of `query`, in ascending order of
    /// distance. The bound is inclusive.
    pub fn within(&self, query: &P, max_squared_distance: P::Num) -> Vec<Neighbor<'_, P>> {
        let Some(root) = self.root else {
            return vec![];
        };
        if max_squared_distance < P::Num::zero() {
            return vec![];
        }

        // Use TinyVec to avoid heap allocations for trees of reasonable height
        let mut stack: TinyVec<[u32; 64]> = TinyVec::new();
        stack.push(root);

        let mut result = vec![];

        while let Some(id) = stack.pop() {
            let node = self.node(id);
            let dist = node.point.squared_distance(query);
            if dist <= max_squared_distance {
                result.push(Candidate {
                    id,
                    index: node.index,
                    dist,
                });
            }

            let (near, far) = if query.axis_cmp(&node.point, node.axis) == Ordering::Less {
                (node.left, node.right)
            } else {
                (node.right, node.left)
            };

            if let Some(near) = near {
                stack.push(near);
            }
            if let Some(far) = far {
                if node.point.axis_squared_distance(query, node.axis) <= max_squared_distance {
                    stack.push(far);
                }
            }
        }

        result.sort_unstable();
        result.into_iter().map(|c| self.neighbor(c)).collect()
    }

    #[inline]
    fn neighbor(&self, candidate: Candidate<P::Num>) -> Neighbor<'_, P> {
        Neighbor {
            point: &self.node(candidate.id).point,
            index: candidate.index,
            squared_distance: candidate.dist,
        }
    }
}
