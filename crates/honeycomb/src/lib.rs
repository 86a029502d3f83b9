//! Vertex/edge skeletons of Coxeter honeycombs.
//!
//! A Coxeter diagram (relation orders between generating mirrors) determines a
//! spherical, Euclidean or hyperbolic reflection group. This crate builds the
//! fundamental simplex of that group, expands the orbit of its vertices under
//! reflections and hands a deduplicated point/line set to a renderer.
//!
//! Layout
//! - `coxeter`: diagrams, Gram matrices, geometry classification.
//! - `simplex`: mirrors and seed vertices of the fundamental domain.
//! - `registry`: canonical vertex/edge/chamber tokens.
//! - `expand`: the bounded breadth-first expansion and its configuration.
//! - `geometry`: ambient models and projection into render space.
//!
//! Usage
//! ```
//! use honeycomb::prelude::*;
//!
//! let diagram: CoxeterDiagram = "4,4".parse().unwrap();
//! let mut ctx = GenerationContext::new();
//! let stats = ctx.generate(&Config::for_diagram(&diagram).with_max_depth(0)).unwrap();
//! assert_eq!(stats.kind, GeometryKind::Euclidean);
//! assert_eq!(ctx.honeycomb().edges.len(), 3);
//! ```

pub mod api;
pub mod cfg;
pub mod color;
pub mod coxeter;
pub mod error;
pub mod expand;
pub mod geometry;
pub mod registry;
pub mod simplex;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::Error;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::color::Color;
    pub use crate::coxeter::{CoxeterDiagram, Order};
    pub use crate::error::Error;
    pub use crate::expand::{
        ColorPolicy, Config, GenerationContext, GrowthBound, Honeycomb, RenderEdge, RenderVertex,
        RunStats,
    };
    pub use crate::geometry::GeometryKind;
}
