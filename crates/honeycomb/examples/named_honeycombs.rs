//! Print geometry and skeleton sizes for a handful of named Coxeter groups.
//!
//! Usage:
//!   cargo run -p honeycomb --example named_honeycombs
//!   cargo run -p honeycomb --example named_honeycombs -- 4
//!
//! The optional argument is the depth bound used for infinite groups (default 3);
//! finite groups are expanded to closure.

use honeycomb::api::{fundamental_simplex, NO_RELATION_GRAM};
use honeycomb::prelude::*;

const NAMED: &[(&str, &str)] = &[
    ("tetrahedron", "3,3"),
    ("cube", "4,3"),
    ("icosahedron", "3,5"),
    ("5-cell", "3,3,3"),
    ("tesseract", "4,3,3"),
    ("120-cell", "5,3,3"),
    ("square tiling", "4,4"),
    ("hexagonal tiling", "6,3"),
    ("cubic honeycomb", "4,3,4"),
    ("heptagonal tiling", "7,3"),
    ("order-4 dodecahedral", "5,3,4"),
    ("order-5 cubic", "4,3,5"),
    ("paracompact tetrahedral", "inf,3,3"),
];

fn main() {
    let depth = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(3);
    println!(
        "{:<24} {:<10} {:>10} {:>9} {:>9} {:>6}",
        "name", "diagram", "geometry", "vertices", "edges", "depth"
    );
    for &(name, symbol) in NAMED {
        let diagram: CoxeterDiagram = match symbol.parse() {
            Ok(d) => d,
            Err(e) => {
                eprintln!("{name}: {e}");
                continue;
            }
        };
        let finite = fundamental_simplex(&diagram, NO_RELATION_GRAM)
            .map(|s| s.kind == GeometryKind::Spherical)
            .unwrap_or(false);
        let mut cfg = Config::for_diagram(&diagram);
        if !finite {
            cfg = cfg.with_max_depth(depth);
        }
        let mut ctx = GenerationContext::new();
        match ctx.generate(&cfg) {
            Ok(stats) => println!(
                "{:<24} {:<10} {:>10} {:>9} {:>9} {:>6}",
                name,
                symbol,
                stats.kind.to_string(),
                stats.vertices,
                stats.edges,
                stats.max_depth_reached
            ),
            Err(e) => eprintln!("{name}: {e}"),
        }
    }
}
