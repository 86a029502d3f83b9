//! Orbit expansion: grow the vertex/edge skeleton of a honeycomb.
//!
//! Purpose
//! - Starting from the fundamental simplex, visit its images under the group
//!   breadth-first and collect the orbit of every renderable simplex vertex,
//!   together with the edges joining a vertex to its mirror image.
//!
//! Algorithm
//! - The frontier holds chambers (images of the simplex with their own walls).
//!   Popping a chamber reflects all its vertices across each of its walls:
//!   vertices on the wall map to themselves and are rejected by the registry,
//!   the opposite vertex yields a new image and the edge to it.
//! - The chamber across a wall is enqueued one level deeper if it was not seen
//!   before and it satisfies the growth bound. Infinite groups terminate only
//!   through the bound.
//!
//! Failure
//! - All validation happens before the first registration: an `Err` leaves the
//!   context exactly as it was.

mod chamber;
mod types;

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::color::Color;
use crate::coxeter::{classify, CoxeterDiagram};
use crate::error::Error;
use crate::geometry::GeometryKind;
use crate::registry::{ChamberSet, EdgeStore, VertexId, VertexStore};
use crate::simplex::Simplex;
use chamber::Chamber;

pub use types::{ColorPolicy, Config, GrowthBound, Honeycomb, RenderEdge, RenderVertex, RunStats};

/// Depth that maps to the end of the gradient when no depth bound is set.
const DEFAULT_DEPTH_SCALE: usize = 8;

/// Registries of one honeycomb, owned by the caller.
///
/// Vertices and edges accumulate across `generate` calls until `reset`.
#[derive(Clone, Debug)]
pub struct GenerationContext {
    vertices: VertexStore,
    edges: EdgeStore,
    chambers: ChamberSet,
}

impl Default for GenerationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationContext {
    pub fn new() -> Self {
        Self {
            vertices: VertexStore::new(crate::cfg::TOKEN_TOLERANCE),
            edges: EdgeStore::new(),
            chambers: ChamberSet::default(),
        }
    }

    /// Drop every registered vertex, edge and chamber.
    pub fn reset(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.chambers.clear();
    }

    /// `reset` followed by `generate`.
    pub fn regenerate(&mut self, cfg: &Config) -> Result<RunStats, Error> {
        let plan = Plan::prepare(cfg)?;
        self.reset();
        self.run(cfg, plan)
    }

    /// Expand the diagram of `cfg` into the registries.
    pub fn generate(&mut self, cfg: &Config) -> Result<RunStats, Error> {
        let plan = Plan::prepare(cfg)?;
        self.run(cfg, plan)
    }

    #[inline]
    pub fn vertices(&self) -> &VertexStore {
        &self.vertices
    }

    #[inline]
    pub fn edges(&self) -> &EdgeStore {
        &self.edges
    }

    /// Flat copy of the registries for a renderer.
    pub fn honeycomb(&self) -> Honeycomb {
        Honeycomb {
            vertices: self
                .vertices
                .iter()
                .map(|v| RenderVertex {
                    position: v.position,
                    color: v.color,
                    class: v.class,
                    depth: v.depth,
                })
                .collect(),
            edges: self
                .edges
                .iter()
                .map(|e| RenderEdge {
                    a: e.a.0,
                    b: e.b.0,
                    color: e.color,
                    mirror: e.mirror,
                })
                .collect(),
        }
    }

    fn run(&mut self, cfg: &Config, plan: Plan) -> Result<RunStats, Error> {
        if !self.vertices.set_tolerance(cfg.tolerance) {
            return Err(Error::config(format!(
                "registry holds vertices quantized with tolerance {:e}, requested {:e}; reset first",
                self.vertices.tolerance(),
                cfg.tolerance
            )));
        }
        let Plan { kind, simplex } = plan;
        let n = simplex.rank();
        let tol = cfg.tolerance;
        let near_before = self.vertices.near_threshold();
        self.chambers.clear();

        let skipped: Vec<usize> = (0..n).filter(|&k| !simplex.is_finite(k)).collect();
        for &k in &skipped {
            warn!(class = k, kind = ?simplex.vertex_kinds[k], "orbit class is not a point of the space; skipped");
        }
        debug!(%kind, rank = n, pivot = simplex.pivot, "fundamental simplex ready");

        let colors = Palette::new(cfg, n);
        let ids: Vec<Option<VertexId>> = (0..n)
            .map(|k| {
                simplex.is_finite(k).then(|| {
                    let v = &simplex.vertices[k];
                    self.vertices
                        .register(v.clone(), kind.project(v), colors.vertex(k, 0), k, 0)
                        .id
                })
            })
            .collect();
        let root = Chamber::fundamental(&simplex, ids);
        self.chambers.insert(&root.center(), tol);

        let mut stats = RunStats {
            kind,
            chambers: 0,
            vertices: 0,
            edges: 0,
            max_depth_reached: 0,
            bound_hit: false,
            near_threshold: 0,
            skipped_classes: skipped,
        };
        let mut queue = VecDeque::from([root]);
        while let Some(chamber) = queue.pop_front() {
            stats.chambers += 1;
            stats.max_depth_reached = stats.max_depth_reached.max(chamber.depth);
            let depth = chamber.depth + 1;
            for i in 0..n {
                let images = chamber.reflected_vertices(i);
                let ids: Vec<Option<VertexId>> = chamber
                    .ids
                    .iter()
                    .zip(&images)
                    .enumerate()
                    .map(|(k, (src, image))| {
                        let src = (*src)?;
                        let reg = self.vertices.register(
                            image.clone(),
                            kind.project(image),
                            colors.vertex(k, depth),
                            k,
                            depth,
                        );
                        let color = colors.edge(&self.vertices, i, src, reg.id);
                        self.edges.register(&self.vertices, src, reg.id, color, i);
                        Some(reg.id)
                    })
                    .collect();

                let next = chamber.neighbor(i, images, ids);
                let center = next.center();
                if self.chambers.contains(&center, tol) {
                    continue;
                }
                if !self.within_bound(&cfg.bound, kind, &next) {
                    stats.bound_hit = true;
                    continue;
                }
                self.chambers.insert(&center, tol);
                queue.push_back(next);
            }
        }

        stats.vertices = self.vertices.len();
        stats.edges = self.edges.len();
        stats.near_threshold = self.vertices.near_threshold() - near_before;
        if stats.near_threshold > 0 {
            warn!(
                count = stats.near_threshold,
                tolerance = tol,
                "vertex tokens close to a quantization boundary; results may depend on rounding"
            );
        }
        debug!(
            chambers = stats.chambers,
            vertices = stats.vertices,
            edges = stats.edges,
            depth = stats.max_depth_reached,
            bound_hit = stats.bound_hit,
            "expansion finished"
        );
        Ok(stats)
    }

    fn within_bound(&self, bound: &GrowthBound, kind: GeometryKind, chamber: &Chamber) -> bool {
        if bound.max_depth.is_some_and(|d| chamber.depth > d) {
            return false;
        }
        if bound.max_vertices.is_some_and(|m| self.vertices.len() >= m) {
            return false;
        }
        if let Some(r) = bound.max_radius {
            if kind.distance_from_origin(&chamber.visible_center()) > r {
                return false;
            }
        }
        true
    }
}

/// Validated inputs of a run.
struct Plan {
    kind: GeometryKind,
    simplex: Simplex,
}

impl Plan {
    fn prepare(cfg: &Config) -> Result<Self, Error> {
        if !(cfg.tolerance.is_finite() && cfg.tolerance > 0.0 && cfg.tolerance < 1.0) {
            return Err(Error::config(format!(
                "tolerance must lie in (0, 1), got {}",
                cfg.tolerance
            )));
        }
        if !(cfg.no_relation_gram <= -1.0) {
            return Err(Error::config(format!(
                "no-relation Gram entry must be <= -1, got {}",
                cfg.no_relation_gram
            )));
        }
        if let Some(r) = cfg.bound.max_radius {
            if r.is_nan() || r < 0.0 {
                return Err(Error::config(format!("max_radius must be >= 0, got {r}")));
            }
        }

        let diagram = CoxeterDiagram::new(cfg.relations.clone())?;
        let gram = diagram.gram(cfg.no_relation_gram);
        let kind = classify(&gram, cfg.simplex.signature_eps)?;
        if kind != GeometryKind::Spherical && cfg.bound.is_unbounded() {
            return Err(Error::config(format!(
                "{kind} diagram {diagram} has an infinite group; set a depth, radius or vertex bound"
            )));
        }
        let simplex = Simplex::from_gram(&gram, kind, &cfg.simplex)?;
        Ok(Self { kind, simplex })
    }
}

/// Color assignment for one run.
struct Palette {
    policy: ColorPolicy,
    classes: usize,
    depth_scale: usize,
}

impl Palette {
    fn new(cfg: &Config, classes: usize) -> Self {
        Self {
            policy: cfg.color,
            classes,
            depth_scale: cfg.bound.max_depth.unwrap_or(DEFAULT_DEPTH_SCALE).max(1),
        }
    }

    fn vertex(&self, class: usize, depth: usize) -> Color {
        match self.policy {
            ColorPolicy::Orbit => Color::categorical(class, self.classes),
            ColorPolicy::Depth => Color::gradient(depth as f32 / self.depth_scale as f32),
        }
    }

    fn edge(&self, vertices: &VertexStore, mirror: usize, a: VertexId, b: VertexId) -> Color {
        match self.policy {
            ColorPolicy::Orbit => Color::categorical(mirror, self.classes),
            ColorPolicy::Depth => vertices.get(a).color.mix(vertices.get(b).color),
        }
    }
}

#[cfg(test)]
mod tests;
