// Copyright 2025 the Quadtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Depth-first traversal over the nodes of a tree.
//!
//! This is the surface a plotting or debugging collaborator consumes: every
//! node's bounds, its depth, whether it is a leaf, and the items it stores.
//! Nothing here knows how anything is drawn.

use core::fmt::Debug;

use smallvec::SmallVec;

use crate::node::QuadNode;
use crate::types::Scalar;

/// Pre-order iterator over nodes, visiting children NE, NW, SW, SE.
///
/// Created by [`QuadTree::depth_first`][crate::QuadTree::depth_first].
pub struct DepthFirst<'a, T, P> {
    stack: SmallVec<[&'a QuadNode<T, P>; 16]>,
}

impl<T: Scalar, P> Debug for DepthFirst<'_, T, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DepthFirst")
            .field("pending", &self.stack.len())
            .finish_non_exhaustive()
    }
}

impl<'a, T, P> DepthFirst<'a, T, P> {
    pub(crate) fn new(root: &'a QuadNode<T, P>) -> Self {
        let mut stack = SmallVec::new();
        stack.push(root);
        Self { stack }
    }
}

impl<'a, T: Scalar, P> Iterator for DepthFirst<'a, T, P> {
    type Item = &'a QuadNode<T, P>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some(children) = node.children() {
            // Reversed so NE comes off the stack first.
            self.stack.extend(children.iter().rev());
        }
        Some(node)
    }
}
