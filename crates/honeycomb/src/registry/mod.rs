//! Canonical registry: the unique vertices, edges and chambers of one run.
//!
//! Purpose
//! - Guarantee a clean output graph: no two vertices share a token, no two
//!   edges share a token (in either orientation), no self-loops.
//! - Preserve first-discovery order so renderers can index stable buffers.
//!
//! Tokens
//! - Vertex: the power-of-two magnitude bucket `e` of `|v|∞` (at least 0), then
//!   the coordinates rounded to a step `tolerance · 2^e`.
//! - Edge: the two endpoint tokens, sorted.
//! - Chamber: the vertex token of the chamber's interior point.
//!
//! The tolerance is the most sensitive knob of the system: too tight splits one
//! point reached by different reflection words, too loose merges distinct points.

mod edge;
mod token;
mod vertex;

use std::collections::HashSet;

use nalgebra::DVector;

pub use edge::{Edge, EdgeStore};
pub use token::{quantize, EdgeToken, Quantized, VertexToken};
pub use vertex::{Registration, Vertex, VertexId, VertexStore};

/// Chambers already expanded during a run (tokens of their interior points).
#[derive(Clone, Debug, Default)]
pub struct ChamberSet {
    tokens: HashSet<VertexToken>,
}

impl ChamberSet {
    /// `true` if the chamber was not seen before.
    pub fn insert(&mut self, center: &DVector<f64>, tolerance: f64) -> bool {
        self.tokens.insert(quantize(center, tolerance).token)
    }

    pub fn contains(&self, center: &DVector<f64>, tolerance: f64) -> bool {
        self.tokens.contains(&quantize(center, tolerance).token)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }
}
