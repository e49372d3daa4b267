// Copyright 2025 the Quadtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tuning parameters shared by every node of a tree.

use crate::error::QuadTreeError;

/// Limits controlling when and how deep nodes subdivide.
///
/// Each child inherits its parent's configuration unchanged.
///
/// ```rust
/// use quadtree::QuadTreeConfig;
///
/// let config = QuadTreeConfig::default().with_max_items(4).with_max_level(5);
/// assert!(config.validate().is_ok());
/// assert!(config.with_max_items(0).validate().is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QuadTreeConfig {
    /// Items a node may hold before it splits. Must be at least 1.
    pub max_items: usize,
    /// Deepest level a node may have; the root is level 0.
    ///
    /// `0` disables subdivision: the tree is one flat bucket.
    pub max_level: usize,
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self {
            max_items: 10,
            max_level: 4,
        }
    }
}

impl QuadTreeConfig {
    /// Create a configuration from both limits.
    pub const fn new(max_items: usize, max_level: usize) -> Self {
        Self {
            max_items,
            max_level,
        }
    }

    /// Set the per-node item limit.
    #[must_use]
    pub const fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// Set the maximum depth.
    #[must_use]
    pub const fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    /// Check the limits.
    ///
    /// # Errors
    ///
    /// Returns [`QuadTreeError::InvalidConfig`] when `max_items` is zero.
    pub fn validate(&self) -> Result<(), QuadTreeError> {
        if self.max_items == 0 {
            return Err(QuadTreeError::InvalidConfig {
                reason: "max_items must be at least 1",
            });
        }
        Ok(())
    }
}
