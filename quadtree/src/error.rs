// Copyright 2025 the Quadtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by all fallible operations.

use thiserror::Error;

/// Errors reported by tree construction and by operations with invalid input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum QuadTreeError {
    /// A tuning parameter is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Which constraint was violated.
        reason: &'static str,
    },

    /// A rectangle was given a negative (or NaN) width or height.
    #[error("rectangle width and height must be non-negative")]
    InvalidExtent,

    /// `split` was called on a node that already has children.
    #[error("node is already split")]
    AlreadySplit,

    /// `split` was called on a node at the maximum depth.
    #[error("node at level {level} cannot split (max level {max_level})")]
    DepthLimit {
        /// Level of the node.
        level: usize,
        /// Configured maximum level.
        max_level: usize,
    },

    /// A neighbour search radius was negative (or NaN).
    #[error("search radius must be non-negative")]
    InvalidRadius,
}
