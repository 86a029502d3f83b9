//! Run configuration, statistics and renderer-facing output.

use nalgebra::Vector3;

use crate::cfg::{NO_RELATION_GRAM, TOKEN_TOLERANCE};
use crate::color::Color;
use crate::coxeter::{CoxeterDiagram, Order};
use crate::geometry::GeometryKind;
use crate::simplex::SimplexCfg;

/// Where the expansion stops. Unset fields do not limit; infinite groups need
/// at least one of them.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GrowthBound {
    /// Deepest chamber (reflection-word length) that is still expanded.
    pub max_depth: Option<usize>,
    /// Largest intrinsic distance from the origin of an expanded chamber's centroid.
    pub max_radius: Option<f64>,
    /// No chamber is enqueued once the registry holds this many vertices
    /// (earlier runs without a reset count too). The chambers
    /// already queued still register their images, so the final count may exceed it.
    pub max_vertices: Option<usize>,
}

impl GrowthBound {
    #[inline]
    pub fn is_unbounded(&self) -> bool {
        self.max_depth.is_none() && self.max_radius.is_none() && self.max_vertices.is_none()
    }
}

/// How vertices and edges are colored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorPolicy {
    /// Vertices by orbit class, edges by the mirror they cross.
    #[default]
    Orbit,
    /// Vertices by discovery depth, edges by the mean of their endpoints.
    Depth,
}

/// One generation run.
#[derive(Clone, Debug)]
pub struct Config {
    /// Relation matrix; validated by `generate`.
    pub relations: Vec<Vec<Order>>,
    /// Gram entry for `Order::Infinite` (must be <= -1).
    pub no_relation_gram: f64,
    /// Quantization step of canonical tokens.
    pub tolerance: f64,
    pub bound: GrowthBound,
    pub color: ColorPolicy,
    pub simplex: SimplexCfg,
}

impl Config {
    pub fn new(relations: Vec<Vec<Order>>) -> Self {
        Self {
            relations,
            no_relation_gram: NO_RELATION_GRAM,
            tolerance: TOKEN_TOLERANCE,
            bound: GrowthBound::default(),
            color: ColorPolicy::default(),
            simplex: SimplexCfg::default(),
        }
    }

    pub fn for_diagram(diagram: &CoxeterDiagram) -> Self {
        Self::new(diagram.rows().to_vec())
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.bound.max_depth = Some(depth);
        self
    }

    pub fn with_max_radius(mut self, radius: f64) -> Self {
        self.bound.max_radius = Some(radius);
        self
    }

    pub fn with_max_vertices(mut self, count: usize) -> Self {
        self.bound.max_vertices = Some(count);
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_color(mut self, color: ColorPolicy) -> Self {
        self.color = color;
        self
    }
}

/// Summary of a finished run.
///
/// `chambers`, `max_depth_reached` and `near_threshold` describe this run alone;
/// `vertices` and `edges` are registry totals, which include what earlier runs
/// registered if the context was not reset in between.
#[derive(Clone, Debug, PartialEq)]
pub struct RunStats {
    pub kind: GeometryKind,
    /// Chambers popped from the frontier.
    pub chambers: usize,
    /// Vertices in the registry after the run.
    pub vertices: usize,
    /// Edges in the registry after the run.
    pub edges: usize,
    pub max_depth_reached: usize,
    /// Whether any chamber was left out because of the growth bound.
    pub bound_hit: bool,
    /// Registrations that fell next to a quantization boundary.
    pub near_threshold: usize,
    /// Orbit classes left out because their seed vertex is not a point of the space.
    pub skipped_classes: Vec<usize>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderVertex {
    pub position: Vector3<f64>,
    pub color: Color,
    pub class: usize,
    pub depth: usize,
}

/// Endpoints index `Honeycomb::vertices`.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderEdge {
    pub a: usize,
    pub b: usize,
    pub color: Color,
    pub mirror: usize,
}

/// Flat output for a renderer, in discovery order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Honeycomb {
    pub vertices: Vec<RenderVertex>,
    pub edges: Vec<RenderEdge>,
}
