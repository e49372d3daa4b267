// Copyright 2025 the Quadtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Load `{x, y, value}` records from JSON and run the three kinds of query.
//!
//! Run:
//! - `cargo run -p quadtree_demos --example json_points [path/to/data.json]`

use anyhow::Context as _;
use quadtree::{QuadTree, Rect};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Record {
    x: f64,
    y: f64,
    value: i64,
}

#[derive(Debug, Deserialize)]
struct DataSet {
    data: Vec<Record>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| {
        concat!(env!("CARGO_MANIFEST_DIR"), "/data/example_data.json").to_owned()
    });
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let set: DataSet = serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;

    let mut tree = QuadTree::with_limits(Rect::new(0.0, 0.0, 400.0, 400.0)?, 4, 5)?;
    for record in set.data {
        tree.insert_point(record.x, record.y, record.value);
    }

    let window = Rect::new(200.0, 200.0, 50.0, 50.0)?;
    let candidates = tree.retrieve(&window);
    let intersecting = tree.retrieve_intersections(&window);
    let neighbours = tree.nearest_neighbors(&(225.0, 225.0), 25.0, 10)?;

    println!("collide ------------ {}", candidates.len());
    println!("intersects --------- {}", intersecting.len());
    println!("nearest neighbors -- {}", neighbours.len());
    for point in neighbours {
        println!("  ({}, {}) -> {}", point.x(), point.y(), point.data());
    }
    println!("{tree:?}");
    Ok(())
}
