// Copyright 2025 the Quadtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recursive node: subdivision, classification, insertion and candidate retrieval.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::mem;

use crate::config::QuadTreeConfig;
use crate::error::QuadTreeError;
use crate::types::{Item, Locate, Quadrant, Rect, Scalar};

/// A stored item and the sequence number it was inserted with.
#[derive(Clone, Debug)]
pub(crate) struct Slot<T, P> {
    pub(crate) seq: u64,
    pub(crate) item: Item<T, P>,
}

/// One node of a [`QuadTree`][crate::QuadTree].
///
/// A node covers a fixed region and is either a leaf, or owns exactly four
/// children covering its quadrants (NE, NW, SW, SE). Items live on leaves,
/// except for items lying exactly on a node's midpoints: those cannot be
/// assigned to one quadrant and stay on the node itself.
///
/// Nodes are only reachable through a tree, read-only; all mutation goes
/// through [`QuadTree`][crate::QuadTree].
pub struct QuadNode<T, P> {
    bounds: Rect<T>,
    level: usize,
    config: QuadTreeConfig,
    items: Vec<Slot<T, P>>,
    children: Option<Box<[Self; 4]>>,
}

impl<T: Scalar, P> Debug for QuadNode<T, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadNode")
            .field("bounds", &self.bounds)
            .field("level", &self.level)
            .field("items", &self.items.len())
            .field("leaf", &self.is_leaf())
            .finish_non_exhaustive()
    }
}

impl<T: Scalar, P> QuadNode<T, P> {
    pub(crate) fn new(bounds: Rect<T>, level: usize, config: QuadTreeConfig) -> Self {
        Self {
            bounds,
            level,
            config,
            items: Vec::new(),
            children: None,
        }
    }

    /// The region this node covers.
    #[inline]
    pub fn bounds(&self) -> Rect<T> {
        self.bounds
    }

    /// Depth from the root (the root is level 0).
    #[inline]
    pub fn level(&self) -> usize {
        self.level
    }

    /// Whether this node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// The four children in NE, NW, SW, SE order, or `None` for a leaf.
    #[inline]
    pub fn children(&self) -> Option<&[Self; 4]> {
        self.children.as_deref()
    }

    /// The child covering `quadrant`, or `None` for a leaf.
    pub fn child(&self, quadrant: Quadrant) -> Option<&Self> {
        self.children().map(|c| &c[quadrant.index()])
    }

    /// Items stored directly on this node, in the order they arrived here.
    pub fn items(&self) -> impl ExactSizeIterator<Item = &Item<T, P>> {
        self.items.iter().map(|slot| &slot.item)
    }

    /// Number of items stored directly on this node.
    #[inline]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Classify an item into one of this node's quadrants by its origin.
    ///
    /// Only the origin is considered, so a rectangle spanning several
    /// quadrants is classified by its minimum corner alone. `None` means the
    /// origin lies on a midpoint.
    pub fn quadrant_of<L: Locate<T>>(&self, item: &L) -> Option<Quadrant> {
        let (x, y) = item.origin();
        self.bounds.quadrant_of(x, y)
    }

    /// Whether this is a leaf whose (closed) bounds contain the point.
    pub fn contains_point(&self, x: T, y: T) -> bool {
        self.is_leaf() && self.bounds.contains_point(x, y)
    }

    /// Number of nodes below this one, not counting itself.
    pub fn node_count(&self) -> usize {
        self.children()
            .map_or(0, |c| c.iter().map(|child| 1 + child.node_count()).sum())
    }

    /// Path of quadrants followed from this node towards the node that holds
    /// (or would hold) an item at `target`'s origin.
    ///
    /// The walk stops at a leaf, or at a node where the origin lies on a
    /// midpoint.
    pub fn find<L: Locate<T>>(&self, target: &L) -> Vec<Quadrant> {
        let mut path = Vec::new();
        let mut node = self;
        while let Some(children) = node.children() {
            let Some(quadrant) = node.quadrant_of(target) else {
                break;
            };
            path.push(quadrant);
            node = &children[quadrant.index()];
        }
        path
    }

    /// Every item that might overlap `query`.
    ///
    /// This node's own items are always included. Below it, only the child
    /// whose quadrant wholly contains the query is visited; a query crossing
    /// a midpoint visits all four children. The result is a superset of the
    /// items intersecting `query` (see [`QuadTree::retrieve_intersections`]
    /// for exact results).
    ///
    /// [`QuadTree::retrieve_intersections`]: crate::QuadTree::retrieve_intersections
    pub fn retrieve<L: Locate<T>>(&self, query: &L) -> Vec<&Item<T, P>> {
        let mut out = Vec::new();
        self.collect(&query.bounds(), &mut out);
        out.into_iter().map(|slot| &slot.item).collect()
    }

    pub(crate) fn collect<'a>(&'a self, query: &Rect<T>, out: &mut Vec<&'a Slot<T, P>>) {
        self.collect_span((query.x(), query.y()), (query.max_x(), query.max_y()), out);
    }

    /// [`collect`][Self::collect] for a region given by its corners, which
    /// need not be representable as a [`Rect`].
    pub(crate) fn collect_span<'a>(
        &'a self,
        min: (T, T),
        max: (T, T),
        out: &mut Vec<&'a Slot<T, P>>,
    ) {
        out.extend(self.items.iter());
        let Some(children) = self.children() else {
            return;
        };
        match self.bounds.quadrant_of_span(min, max) {
            Some(quadrant) => children[quadrant.index()].collect_span(min, max, out),
            None => {
                for child in children {
                    child.collect_span(min, max, out);
                }
            }
        }
    }

    /// Subdivide a leaf into four children one level down and move every
    /// classifiable item into its child.
    pub(crate) fn split(&mut self) -> Result<(), QuadTreeError> {
        if self.children.is_some() {
            return Err(QuadTreeError::AlreadySplit);
        }
        if self.level >= self.config.max_level {
            return Err(QuadTreeError::DepthLimit {
                level: self.level,
                max_level: self.config.max_level,
            });
        }
        self.children = Some(self.make_children());
        self.redistribute();
        Ok(())
    }

    fn make_children(&self) -> Box<[Self; 4]> {
        tracing::trace!(level = self.level, "splitting node");
        let level = self.level + 1;
        Box::new(Quadrant::ALL.map(|q| Self::new(self.bounds.quadrant(q), level, self.config)))
    }

    pub(crate) fn insert(&mut self, slot: Slot<T, P>) {
        if let Some(children) = self.children.as_deref_mut() {
            let (x, y) = slot.item.origin();
            if let Some(quadrant) = self.bounds.quadrant_of(x, y) {
                children[quadrant.index()].insert(slot);
                return;
            }
        }

        self.items.push(slot);
        // Once split, whatever lands here sits on a midpoint and cannot move down.
        if self.children.is_none()
            && self.items.len() > self.config.max_items
            && self.level < self.config.max_level
        {
            self.children = Some(self.make_children());
            self.redistribute();
        }
    }

    /// Push every classifiable item down into its child. Items on a midpoint
    /// stay here; each item ends up in exactly one place.
    fn redistribute(&mut self) {
        let Some(children) = self.children.as_deref_mut() else {
            return;
        };
        let pending = mem::take(&mut self.items);
        let total = pending.len();
        for slot in pending {
            let (x, y) = slot.item.origin();
            match self.bounds.quadrant_of(x, y) {
                Some(quadrant) => children[quadrant.index()].insert(slot),
                None => self.items.push(slot),
            }
        }
        tracing::trace!(
            level = self.level,
            items = total,
            kept = self.items.len(),
            "redistributed node items"
        );
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
        self.children = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;
    use alloc::vec;

    fn root(max_items: usize, max_level: usize) -> QuadNode<f64, u32> {
        QuadNode::new(
            Rect::new(0.0, 0.0, 400.0, 400.0).unwrap(),
            0,
            QuadTreeConfig::new(max_items, max_level),
        )
    }

    fn put(node: &mut QuadNode<f64, u32>, seq: u64, x: f64, y: f64) {
        node.insert(Slot {
            seq,
            item: Item::Point(Point::new(x, y, u32::try_from(seq).unwrap())),
        });
    }

    fn payloads(items: &[&Item<f64, u32>]) -> Vec<u32> {
        let mut out: Vec<u32> = items.iter().map(|i| *i.data()).collect();
        out.sort_unstable();
        out
    }

    #[test]
    fn split_builds_four_tiling_children() {
        let mut node = root(4, 5);
        node.split().unwrap();
        let children = node.children().unwrap();
        for (child, q) in children.iter().zip(Quadrant::ALL) {
            assert_eq!(child.level(), 1);
            assert_eq!(child.bounds(), node.bounds().quadrant(q));
            assert!(child.is_leaf());
        }
        assert_eq!(node.node_count(), 4);
    }

    #[test]
    fn split_twice_is_an_invalid_state() {
        let mut node = root(4, 5);
        node.split().unwrap();
        assert_eq!(node.split(), Err(QuadTreeError::AlreadySplit));
        assert_eq!(node.node_count(), 4, "failed split must not add children");
    }

    #[test]
    fn split_at_depth_cap_is_rejected() {
        let mut node = root(4, 0);
        assert_eq!(
            node.split(),
            Err(QuadTreeError::DepthLimit {
                level: 0,
                max_level: 0
            })
        );
        assert!(node.is_leaf());
    }

    #[test]
    fn overflow_splits_and_pushes_items_down() {
        let mut node = root(4, 5);
        for (seq, y) in (10..15_i32).enumerate() {
            put(&mut node, seq as u64, 10.0, f64::from(y));
        }
        assert!(!node.is_leaf());
        assert_eq!(node.item_count(), 0);
        assert_eq!(node.children().unwrap().len(), 4);
        // The cluster keeps splitting the NW corner down to level 5.
        assert_eq!(node.node_count(), 20);

        let query = Rect::new(0.0, 0.0, 200.0, 200.0).unwrap();
        assert_eq!(payloads(&node.retrieve(&query)), vec![0, 1, 2, 3, 4]);
        assert_eq!(
            node.find(&(10.0, 10.0)),
            vec![Quadrant::Nw, Quadrant::Nw, Quadrant::Nw, Quadrant::Nw, Quadrant::Nw]
        );
    }

    #[test]
    fn midpoint_item_stays_on_root() {
        let mut node = root(1, 5);
        put(&mut node, 0, 200.0, 200.0);
        put(&mut node, 1, 50.0, 50.0);
        put(&mut node, 2, 350.0, 350.0);
        put(&mut node, 3, 60.0, 60.0);

        assert_eq!(node.quadrant_of(&(200.0, 200.0)), None);
        assert!(!node.is_leaf());
        let on_root: Vec<u32> = node.items().map(|i| *i.data()).collect();
        assert_eq!(on_root, vec![0]);
        assert!(node.find(&(200.0, 200.0)).is_empty());
    }

    #[test]
    fn straddling_items_may_overflow_a_split_node() {
        let mut node = root(2, 5);
        for (seq, y) in [10.0, 20.0, 30.0, 40.0].into_iter().enumerate() {
            put(&mut node, seq as u64, 200.0, y);
        }
        assert!(!node.is_leaf());
        assert_eq!(node.item_count(), 4);
        assert_eq!(node.node_count(), 4);

        put(&mut node, 9, 300.0, 50.0);
        assert_eq!(node.item_count(), 4);
        assert_eq!(node.child(Quadrant::Ne).unwrap().item_count(), 1);
    }

    #[test]
    fn midpoint_inserts_into_a_split_node_stay_put() {
        let mut node = root(2, 5);
        for seq in 0..3 {
            put(&mut node, seq, 10.0 * (seq + 1) as f64, 10.0 * (seq + 1) as f64);
        }
        let nodes = node.node_count();
        assert!(nodes > 0);

        for seq in 3..2003 {
            put(&mut node, seq, 200.0, (seq % 400) as f64);
        }
        assert_eq!(node.item_count(), 2000);
        assert_eq!(node.node_count(), nodes);
        assert_eq!(node.child(Quadrant::Nw).unwrap().item_count(), 0);
        let hits = payloads(&node.retrieve(&(10.0, 10.0)));
        assert_eq!(hits.len(), 2002);
        assert_eq!(hits[..2], [0, 1]);
    }

    #[test]
    fn forced_split_pushes_existing_items_down() {
        let mut node = root(4, 5);
        put(&mut node, 0, 10.0, 10.0);
        put(&mut node, 1, 300.0, 300.0);
        put(&mut node, 2, 200.0, 200.0);
        node.split().unwrap();

        let on_root: Vec<u32> = node.items().map(|i| *i.data()).collect();
        assert_eq!(on_root, vec![2]);
        assert_eq!(node.child(Quadrant::Nw).unwrap().item_count(), 1);
        assert_eq!(node.child(Quadrant::Se).unwrap().item_count(), 1);
    }

    #[test]
    fn depth_cap_tolerates_overflow() {
        let mut node = root(2, 3);
        for seq in 0..20 {
            put(&mut node, seq, 30.0, 30.0);
        }
        let mut deepest = &node;
        while let Some(child) = deepest.child(Quadrant::Nw) {
            deepest = child;
        }
        assert_eq!(deepest.level(), 3);
        assert_eq!(deepest.item_count(), 20);
    }

    #[test]
    fn retrieve_visits_one_child_for_a_contained_query() {
        let mut node = root(1, 1);
        put(&mut node, 0, 100.0, 100.0);
        put(&mut node, 1, 300.0, 300.0);

        let nw_only = Rect::new(10.0, 10.0, 20.0, 20.0).unwrap();
        assert_eq!(payloads(&node.retrieve(&nw_only)), vec![0]);

        let across = Rect::new(150.0, 150.0, 100.0, 100.0).unwrap();
        assert_eq!(payloads(&node.retrieve(&across)), vec![0, 1]);
    }

    #[test]
    fn contains_point_only_for_leaves() {
        let mut node = root(4, 5);
        assert!(node.contains_point(400.0, 0.0));
        assert!(!node.contains_point(401.0, 0.0));
        node.split().unwrap();
        assert!(!node.contains_point(10.0, 10.0));
        assert!(node.child(Quadrant::Nw).unwrap().contains_point(10.0, 10.0));
    }

    #[test]
    fn clear_discards_children_and_items() {
        let mut node = root(1, 5);
        for seq in 0..10 {
            put(&mut node, seq, 10.0 * seq as f64 + 1.0, 7.0);
        }
        node.clear();
        assert!(node.is_leaf());
        assert_eq!(node.item_count(), 0);
        assert_eq!(node.node_count(), 0);
        assert!(node.retrieve(&node.bounds()).is_empty());
    }
}
