//! JSON documents written and printed by the CLI.

use anyhow::{Context, Result};
use honeycomb::api::{CoxeterDiagram, Honeycomb, RunStats, Simplex, VertexKind};
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Serialize)]
pub struct VertexDoc {
    pub position: [f64; 3],
    pub color: String,
    pub class: usize,
    pub depth: usize,
}

#[derive(Serialize)]
pub struct EdgeDoc {
    pub a: usize,
    pub b: usize,
    pub color: String,
    pub mirror: usize,
}

#[derive(Serialize)]
pub struct StatsDoc {
    pub chambers: usize,
    pub vertices: usize,
    pub edges: usize,
    pub max_depth_reached: usize,
    pub bound_hit: bool,
    pub near_threshold: usize,
    pub skipped_classes: Vec<usize>,
}

/// Renderer input: positions in the unit ball (or affine patch), colors as `#rrggbb`.
#[derive(Serialize)]
pub struct HoneycombDoc {
    pub diagram: String,
    pub geometry: String,
    pub stats: StatsDoc,
    pub vertices: Vec<VertexDoc>,
    pub edges: Vec<EdgeDoc>,
}

impl HoneycombDoc {
    pub fn new(diagram: String, stats: &RunStats, hc: &Honeycomb) -> Self {
        Self {
            diagram,
            geometry: stats.kind.to_string(),
            stats: StatsDoc {
                chambers: stats.chambers,
                vertices: stats.vertices,
                edges: stats.edges,
                max_depth_reached: stats.max_depth_reached,
                bound_hit: stats.bound_hit,
                near_threshold: stats.near_threshold,
                skipped_classes: stats.skipped_classes.clone(),
            },
            vertices: hc
                .vertices
                .iter()
                .map(|v| VertexDoc {
                    position: [v.position.x, v.position.y, v.position.z],
                    color: v.color.to_hex(),
                    class: v.class,
                    depth: v.depth,
                })
                .collect(),
            edges: hc
                .edges
                .iter()
                .map(|e| EdgeDoc {
                    a: e.a,
                    b: e.b,
                    color: e.color.to_hex(),
                    mirror: e.mirror,
                })
                .collect(),
        }
    }
}

/// Classification summary of a diagram.
#[derive(Serialize)]
pub struct ClassifyDoc {
    pub diagram: String,
    pub geometry: String,
    pub gram: Vec<Vec<f64>>,
    pub pivot: usize,
    pub vertex_kinds: Vec<String>,
}

impl ClassifyDoc {
    pub fn new(diagram: &CoxeterDiagram, no_relation: f64, simplex: &Simplex) -> Self {
        let gram = diagram.gram(no_relation);
        Self {
            diagram: diagram.to_string(),
            geometry: simplex.kind.to_string(),
            gram: gram
                .row_iter()
                .map(|row| row.iter().copied().collect())
                .collect(),
            pivot: simplex.pivot,
            vertex_kinds: simplex.vertex_kinds.iter().map(|k| kind_name(*k).to_string()).collect(),
        }
    }
}

fn kind_name(kind: VertexKind) -> &'static str {
    match kind {
        VertexKind::Finite => "finite",
        VertexKind::Ideal => "ideal",
        VertexKind::UltraIdeal => "ultra-ideal",
    }
}

/// Write `doc` as pretty JSON, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, doc: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(doc)?)
        .with_context(|| format!("writing {}", path.display()))
}
