// Copyright 2025 the Quadtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree: a region quadtree over 2D points and rectangles.
//!
//! Build a [`QuadTree`] over a known bounding rectangle, insert items, and
//! answer region queries faster than a scan over everything stored.
//!
//! - [`QuadTree::retrieve`]: candidates that *might* overlap a region (a superset).
//! - [`QuadTree::retrieve_intersections`]: items whose bounds really intersect a region.
//! - [`QuadTree::nearest_neighbors`]: points within a radius, closest first.
//! - [`QuadTree::depth_first`]: every node with its bounds and items, for plotting or debugging.
//!
//! It is generic over the scalar type `T` (`f32`, `f64`, `i64`) and the payload `P`,
//! and does not depend on any geometry crate. With the `kurbo` feature,
//! [`Rect`] converts into `kurbo::Rect` and back with `TryFrom`.
//!
//! # Example
//!
//! ```rust
//! use quadtree::{QuadTree, QuadTreeConfig, Rect};
//!
//! let bounds = Rect::new(0.0_f64, 0.0, 400.0, 400.0).unwrap();
//! let config = QuadTreeConfig::default().with_max_items(4).with_max_level(5);
//! let mut tree = QuadTree::new(bounds, config).unwrap();
//!
//! tree.insert_point(10.0, 10.0, "a");
//! tree.insert_point(30.0, 40.0, "b");
//! tree.insert_rect(Rect::new(300.0, 300.0, 20.0, 20.0).unwrap(), "c");
//!
//! let hits = tree.retrieve_intersections(&Rect::new(0.0, 0.0, 50.0, 50.0).unwrap());
//! assert_eq!(hits.len(), 2);
//!
//! let near = tree.nearest_neighbors(&(0.0, 0.0), 20.0, 5).unwrap();
//! assert_eq!(*near[0].data(), "a");
//! ```
//!
//! ## How items are placed
//!
//! Each node decides locally, using its midpoints, which of its four quadrants
//! (NE, NW, SW, SE; "north" is smaller y) an item belongs to. Only the item's
//! origin is looked at, so a rectangle goes wherever its minimum corner goes.
//! An item exactly on a midpoint belongs to no single quadrant and stays on
//! the node it reached. A node splits once it holds more than
//! [`QuadTreeConfig::max_items`] items, unless it sits at
//! [`QuadTreeConfig::max_level`], where overflow is tolerated.
//!
//! The origin-only placement means a rectangle that extends from one quadrant
//! into another is invisible to queries that only touch its far part. Points
//! never have this problem.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs in coordinates. Rectangle extents and search
//! radii are validated and rejected when negative or NaN.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod error;
mod node;
mod traverse;
mod tree;
mod types;
pub(crate) mod util;

pub use config::QuadTreeConfig;
pub use error::QuadTreeError;
pub use node::QuadNode;
pub use traverse::DepthFirst;
pub use tree::QuadTree;
pub use types::{Item, Locate, Point, Quadrant, Rect, Scalar, ScalarAcc};
