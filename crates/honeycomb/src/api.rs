//! Curated surface for tools built on the generator (CLI, demos, benches).
//!
//! Not a stable API; items move when the internals do.

// Diagrams and classification
pub use crate::coxeter::{classify, CoxeterDiagram, Order};
pub use crate::geometry::GeometryKind;
// Fundamental domain
pub use crate::simplex::{Mirror, Simplex, SimplexCfg, VertexKind};
// Expansion and output
pub use crate::color::Color;
pub use crate::expand::{
    ColorPolicy, Config, GenerationContext, GrowthBound, Honeycomb, RenderEdge, RenderVertex,
    RunStats,
};
pub use crate::registry::{EdgeToken, VertexId, VertexToken};
// Defaults
pub use crate::cfg::{NO_RELATION_GRAM, TOKEN_TOLERANCE};
pub use crate::error::Error;

/// Classify a diagram and build its fundamental simplex with default tolerances.
pub fn fundamental_simplex(diagram: &CoxeterDiagram, no_relation: f64) -> Result<Simplex, Error> {
    let cfg = SimplexCfg::default();
    let gram = diagram.gram(no_relation);
    let kind = classify(&gram, cfg.signature_eps)?;
    Simplex::from_gram(&gram, kind, &cfg)
}
