// Copyright 2025 the Quadtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plot a quadtree of random points as SVG.
//!
//! Walks the tree depth-first and draws every node's bounds plus its stored
//! points, using `kurbo` for the geometry and its SVG path output.
//!
//! Run:
//! - `cargo run -p quadtree_demos --example plot_svg > tree.svg`

use std::fmt::Write as _;

use kurbo::{Circle, Shape};
use quadtree::{QuadTree, QuadTreeConfig, Rect};
use rand::Rng;

const SIDE: f64 = 400.0;
const TOLERANCE: f64 = 0.1;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let bounds = Rect::new(0.0, 0.0, SIDE, SIDE)?;
    let mut tree = QuadTree::new(bounds, QuadTreeConfig::new(4, 5))?;
    let mut rng = rand::rng();
    for i in 0..1000_u32 {
        tree.insert_point(rng.random_range(0.0..SIDE), rng.random_range(0.0..SIDE), i);
    }
    tree.insert_point(15.0, 325.0, 1000);

    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {SIDE} {SIDE}">"#
    )?;
    for node in tree.depth_first() {
        let outline = kurbo::Rect::from(node.bounds()).to_path(TOLERANCE);
        writeln!(
            svg,
            r#"  <path d="{}" fill="none" stroke="grey" stroke-width="0.5"/>"#,
            outline.to_svg()
        )?;
        for item in node.items() {
            let Some(point) = item.as_point() else {
                continue;
            };
            let dot = Circle::new((point.x(), point.y()), 1.5).to_path(TOLERANCE);
            writeln!(svg, r#"  <path d="{}" fill="black"/>"#, dot.to_svg())?;
        }
    }
    svg.push_str("</svg>\n");
    print!("{svg}");

    tracing::info!(
        items = tree.len(),
        nodes = tree.node_num(),
        path = ?tree.find(&(15.0, 325.0)),
        "plotted quadtree"
    );
    Ok(())
}
