use std::cmp;

use crate::kdtree::index::{KDNode, KDTree};
use crate::kdtree::IndexablePoint;
use crate::r#type::Axis;

/// Below this many points the two halves of a split are sorted on the current thread.
#[cfg(feature = "rayon")]
const PARALLEL_THRESHOLD: usize = 4096;

/// A builder to create a [`KDTree`].
///
/// Points are collected in insertion order and kd-sorted once in [`KDTreeBuilder::finish`]. The
/// resulting tree is immutable; rebuilding means creating a new builder.
#[derive(Debug, Clone)]
pub struct KDTreeBuilder<P: IndexablePoint> {
    points: Vec<P>,
}

impl<P: IndexablePoint> Default for KDTreeBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: IndexablePoint> KDTreeBuilder<P> {
    /// Create a new, empty builder.
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a new builder with room for `num_items` points.
    pub fn with_capacity(num_items: usize) -> Self {
        Self {
            points: Vec::with_capacity(num_items),
        }
    }

    /// Add a point to the index, returning its insertion index.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` points are added.
    pub fn add(&mut self, point: P) -> usize {
        let index = self.points.len();
        assert!(
            index < u32::MAX as usize,
            "KDTree holds at most {} points",
            u32::MAX
        );
        self.points.push(point);
        index
    }

    /// The number of points added so far.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if no points have been added.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consume this builder, performing the k-d sort and generating a KDTree ready for queries.
    pub fn finish(self) -> KDTree<P> {
        let num_items = self.points.len();
        let mut entries: Vec<(u32, P)> = self
            .points
            .into_iter()
            .enumerate()
            .map(|(i, point)| (i as u32, point))
            .collect();

        // kd-sort so that every subrange's middle element is the median of that subrange
        sort(&mut entries, Axis::X);

        let mut links = vec![Link::default(); num_items];
        let (root, height) = link(&mut links, 0, num_items, Axis::X);

        let nodes = entries
            .into_iter()
            .zip(links)
            .map(|((index, point), link)| KDNode {
                point,
                index,
                axis: link.axis,
                left: link.left,
                right: link.right,
            })
            .collect();

        log::debug!("built k-d tree with {} points and height {}", num_items, height);

        KDTree {
            nodes,
            root,
            height,
        }
    }
}

impl<P: IndexablePoint> Extend<P> for KDTreeBuilder<P> {
    fn extend<T: IntoIterator<Item = P>>(&mut self, iter: T) {
        for point in iter {
            self.add(point);
        }
    }
}

impl<P: IndexablePoint> FromIterator<P> for KDTreeBuilder<P> {
    fn from_iter<T: IntoIterator<Item = P>>(iter: T) -> Self {
        let mut builder = Self::new();
        builder.extend(iter);
        builder
    }
}

/// Child handles and splitting axis of one node, filled in after sorting.
#[derive(Debug, Clone, Copy)]
struct Link {
    axis: Axis,
    left: Option<u32>,
    right: Option<u32>,
}

impl Default for Link {
    fn default() -> Self {
        Self {
            axis: Axis::X,
            left: None,
            right: None,
        }
    }
}

/// The middle of a slice of `len` elements; the lower median for even lengths.
#[inline]
pub(crate) fn middle(len: usize) -> usize {
    (len - 1) >> 1
}

/// Wire up the kd-sorted range `[start, end)`, returning its root handle and height.
fn link(links: &mut [Link], start: usize, end: usize, axis: Axis) -> (Option<u32>, usize) {
    if start == end {
        return (None, 0);
    }

    let m = start + middle(end - start);
    let (left, left_height) = link(links, start, m, axis.next());
    let (right, right_height) = link(links, m + 1, end, axis.next());
    links[m] = Link { axis, left, right };

    (Some(m as u32), 1 + cmp::max(left_height, right_height))
}

/// Selection key: coordinate on the axis, ties broken by insertion index.
#[inline]
fn key<P: IndexablePoint>(entry: &(u32, P), axis: Axis) -> (P::Num, u32) {
    (entry.1.axis_value(axis), entry.0)
}

fn sort<P: IndexablePoint>(entries: &mut [(u32, P)], axis: Axis) {
    if entries.len() <= 1 {
        return;
    }

    let right = entries.len() - 1;
    let m = middle(entries.len());

    // partition around the middle index so that the halves lie on either side of it on this axis
    select(entries, m, 0, right, axis);

    // recursively kd-sort first half and second half on the next axis
    let (lower, upper) = entries.split_at_mut(m);
    let upper = &mut upper[1..];

    #[cfg(feature = "rayon")]
    {
        if lower.len() + upper.len() >= PARALLEL_THRESHOLD {
            rayon::join(|| sort(lower, axis.next()), || sort(upper, axis.next()));
            return;
        }
    }

    sort(lower, axis.next());
    sort(upper, axis.next());
}

/// Custom Floyd-Rivest selection algorithm: reorder entries so that `[left..k-1]` items are
/// smaller than the k-th item and `[k+1..=right]` items are larger, on the given axis.
fn select<P: IndexablePoint>(
    entries: &mut [(u32, P)],
    k: usize,
    mut left: usize,
    mut right: usize,
    axis: Axis,
) {
    while right > left {
        if right - left > 600 {
            let n = (right - left + 1) as f64;
            let m = (k - left + 1) as f64;
            let z = f64::ln(n);
            let s = 0.5 * f64::exp((2.0 * z) / 3.0);
            let sd = 0.5
                * f64::sqrt((z * s * (n - s)) / n)
                * (if m - n / 2.0 < 0.0 { -1.0 } else { 1.0 });
            let new_left = cmp::max(left, f64::floor(k as f64 - (m * s) / n + sd) as usize);
            let new_right = cmp::min(
                right,
                f64::floor(k as f64 + ((n - m) * s) / n + sd) as usize,
            );
            select(entries, k, new_left, new_right, axis);
        }

        let t = key(&entries[k], axis);
        let mut i = left;
        let mut j = right;

        entries.swap(left, k);
        if key(&entries[right], axis) > t {
            entries.swap(left, right);
        }

        while i < j {
            entries.swap(i, j);
            i += 1;
            j -= 1;
            while key(&entries[i], axis) < t {
                i += 1;
            }
            while key(&entries[j], axis) > t {
                j -= 1;
            }
        }

        if key(&entries[left], axis) == t {
            entries.swap(left, j);
        } else {
            j += 1;
            entries.swap(j, right);
        }

        match j.cmp(&k) {
            cmp::Ordering::Equal => break,
            cmp::Ordering::Less => left = j + 1,
            cmp::Ordering::Greater => right = j - 1,
        }
    }
}
