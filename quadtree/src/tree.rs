// Copyright 2025 the Quadtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public [`QuadTree`] API: construction, insertion and queries.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::config::QuadTreeConfig;
use crate::error::QuadTreeError;
use crate::node::{QuadNode, Slot};
use crate::traverse::DepthFirst;
use crate::types::{Item, Locate, Point, Quadrant, Rect, Scalar};
use crate::util::{cmp_acc, distance_sq, is_non_negative};

/// A region quadtree over points and rectangles.
///
/// The tree covers a fixed root rectangle. A node splits into four quadrants
/// once it holds more than [`QuadTreeConfig::max_items`] items, unless it is
/// already at [`QuadTreeConfig::max_level`].
///
/// Items are routed by their origin only: a rectangle item is stored in the
/// quadrant containing its minimum corner even if it extends into others.
/// Queries that only overlap the part of such a rectangle lying in another
/// quadrant will not see it. Items whose origin lies exactly on a midpoint
/// stay on the node where that happens.
///
/// ## Example
///
/// ```rust
/// use quadtree::{QuadTree, Rect};
///
/// let bounds = Rect::new(0.0_f64, 0.0, 400.0, 400.0).unwrap();
/// let mut tree = QuadTree::with_limits(bounds, 4, 5).unwrap();
/// for i in 0..5 {
///     tree.insert_point(10.0, 10.0 + f64::from(i), i);
/// }
///
/// let hits = tree.retrieve_intersections(&Rect::new(0.0, 0.0, 200.0, 200.0).unwrap());
/// assert_eq!(hits.len(), 5);
///
/// let near = tree.nearest_neighbors(&(10.0, 12.0), 1.5, 10).unwrap();
/// assert_eq!(*near[0].data(), 2);
/// ```
pub struct QuadTree<T, P> {
    root: QuadNode<T, P>,
    config: QuadTreeConfig,
    next_seq: u64,
    len: usize,
}

impl<T: Scalar, P> Debug for QuadTree<T, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadTree")
            .field("bounds", &self.root.bounds())
            .field("config", &self.config)
            .field("items", &self.len)
            .field("nodes", &self.node_num())
            .finish_non_exhaustive()
    }
}

impl<T: Scalar, P> QuadTree<T, P> {
    /// Create an empty tree covering `bounds`.
    ///
    /// # Errors
    ///
    /// Returns [`QuadTreeError::InvalidConfig`] if `config` does not validate.
    pub fn new(bounds: Rect<T>, config: QuadTreeConfig) -> Result<Self, QuadTreeError> {
        config.validate()?;
        tracing::debug!(
            max_items = config.max_items,
            max_level = config.max_level,
            "created quadtree"
        );
        Ok(Self {
            root: QuadNode::new(bounds, 0, config),
            config,
            next_seq: 0,
            len: 0,
        })
    }

    /// Create an empty tree from both limits.
    ///
    /// # Errors
    ///
    /// Returns [`QuadTreeError::InvalidConfig`] if `max_items` is zero.
    pub fn with_limits(
        bounds: Rect<T>,
        max_items: usize,
        max_level: usize,
    ) -> Result<Self, QuadTreeError> {
        Self::new(bounds, QuadTreeConfig::new(max_items, max_level))
    }

    /// The root region.
    pub fn bounds(&self) -> Rect<T> {
        self.root.bounds()
    }

    /// The limits this tree was built with.
    pub fn config(&self) -> QuadTreeConfig {
        self.config
    }

    /// The root node.
    pub fn root(&self) -> &QuadNode<T, P> {
        &self.root
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no items are stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes below the root.
    pub fn node_num(&self) -> usize {
        self.root.node_count()
    }

    /// Insert an item. Items outside the root bounds are accepted and routed
    /// like any other; they are never returned by intersection queries that
    /// stay inside the bounds.
    pub fn insert(&mut self, item: impl Into<Item<T, P>>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.len += 1;
        self.root.insert(Slot {
            seq,
            item: item.into(),
        });
    }

    /// Insert a point item.
    pub fn insert_point(&mut self, x: T, y: T, data: P) {
        self.insert(Point::new(x, y, data));
    }

    /// Insert a rectangle item.
    pub fn insert_rect(&mut self, rect: Rect<T>, data: P) {
        self.insert(Item::Rect(rect, data));
    }

    /// Split the root, moving its classifiable items into the new children.
    ///
    /// Insertion splits nodes on its own; this is only needed to force a
    /// subdivision up front.
    ///
    /// # Errors
    ///
    /// Returns [`QuadTreeError::AlreadySplit`] if the root already has
    /// children, or [`QuadTreeError::DepthLimit`] if `max_level` is 0.
    pub fn split(&mut self) -> Result<(), QuadTreeError> {
        self.root.split()
    }

    /// Classify a location into one of the root's quadrants.
    pub fn quadrant_of<L: Locate<T>>(&self, item: &L) -> Option<Quadrant> {
        self.root.quadrant_of(item)
    }

    /// Candidate items that might overlap `query`. See [`QuadNode::retrieve`].
    pub fn retrieve<L: Locate<T>>(&self, query: &L) -> Vec<&Item<T, P>> {
        self.root.retrieve(query)
    }

    /// Items whose bounds intersect `query`, edges included.
    ///
    /// This is [`retrieve`][Self::retrieve] filtered by
    /// [`Rect::intersects`], so it inherits its one blind spot: a rectangle
    /// item routed to a quadrant by its origin is missed by queries touching
    /// only the part of it that extends into a neighbouring quadrant.
    pub fn retrieve_intersections<L: Locate<T>>(&self, query: &L) -> Vec<&Item<T, P>> {
        let query = query.bounds();
        self.root
            .retrieve(&query)
            .into_iter()
            .filter(|item| item.bounds().intersects(&query))
            .collect()
    }

    /// Point items within `radius` of `center`, closest first, at most
    /// `max_num` of them.
    ///
    /// Distance is Euclidean and the radius is inclusive. Equally distant
    /// points come back in insertion order. Rectangle items are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`QuadTreeError::InvalidRadius`] if `radius` is negative (or NaN).
    pub fn nearest_neighbors<L: Locate<T>>(
        &self,
        center: &L,
        radius: T,
        max_num: usize,
    ) -> Result<Vec<&Point<T, P>>, QuadTreeError> {
        if !is_non_negative(radius) {
            return Err(QuadTreeError::InvalidRadius);
        }
        let (cx, cy) = center.origin();
        // Corners saturate for integers, so a huge radius still covers everything.
        let min = (T::sub(cx, radius), T::sub(cy, radius));
        let max = (T::add(cx, radius), T::add(cy, radius));
        let limit = T::widen(radius) * T::widen(radius);

        let mut candidates = Vec::new();
        self.root.collect_span(min, max, &mut candidates);

        let mut hits: Vec<_> = candidates
            .into_iter()
            .filter_map(|slot| {
                let point = slot.item.as_point()?;
                let d = distance_sq(point.origin(), (cx, cy))?;
                (d <= limit).then_some((d, slot.seq, point))
            })
            .collect();
        hits.sort_by(|a, b| cmp_acc(&a.0, &b.0).then(a.1.cmp(&b.1)));
        hits.truncate(max_num);
        Ok(hits.into_iter().map(|(_, _, point)| point).collect())
    }

    /// Path of quadrants from the root to the node that holds (or would hold)
    /// an item at `target`'s origin. See [`QuadNode::find`].
    pub fn find<L: Locate<T>>(&self, target: &L) -> Vec<Quadrant> {
        self.root.find(target)
    }

    /// Whether the point lies in the root's bounds while the root is a leaf.
    pub fn contains_point(&self, x: T, y: T) -> bool {
        self.root.contains_point(x, y)
    }

    /// Remove every item and every node below the root.
    pub fn clear(&mut self) {
        tracing::debug!(items = self.len, "clearing quadtree");
        self.root.clear();
        self.len = 0;
        self.next_seq = 0;
    }

    /// Nodes in depth-first pre-order, children visited NE, NW, SW, SE.
    pub fn depth_first(&self) -> DepthFirst<'_, T, P> {
        DepthFirst::new(&self.root)
    }

    /// All stored items, depth-first: a node's own items before its children's.
    pub fn iter(&self) -> impl Iterator<Item = &Item<T, P>> {
        self.depth_first().flat_map(|node| node.items())
    }
}
