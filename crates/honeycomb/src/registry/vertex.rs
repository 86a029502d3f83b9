//! Append-only vertex store keyed by canonical tokens.

use std::collections::HashMap;

use nalgebra::{DVector, Vector3};

use super::token::{quantize, VertexToken};
use crate::color::Color;

/// Index into the vertex sequence (discovery order).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);

#[derive(Clone, Debug)]
pub struct Vertex {
    pub ambient: DVector<f64>,
    /// Render coordinate (projected, zero-padded to three components).
    pub position: Vector3<f64>,
    pub color: Color,
    /// Index of the simplex vertex this one is an image of.
    pub class: usize,
    /// Depth of the chamber that discovered it.
    pub depth: usize,
    pub token: VertexToken,
}

/// Outcome of `VertexStore::register`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Registration {
    /// `false` when the token was already present; `id` then names the existing entry.
    pub accepted: bool,
    pub id: VertexId,
}

#[derive(Clone, Debug)]
pub struct VertexStore {
    tolerance: f64,
    vertices: Vec<Vertex>,
    index: HashMap<VertexToken, VertexId>,
    near_threshold: usize,
}

impl VertexStore {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            vertices: Vec::new(),
            index: HashMap::new(),
            near_threshold: 0,
        }
    }

    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Change the quantization step. Only allowed while empty, otherwise
    /// existing tokens would no longer be comparable.
    pub(crate) fn set_tolerance(&mut self, tolerance: f64) -> bool {
        if self.vertices.is_empty() {
            self.tolerance = tolerance;
        }
        self.tolerance == tolerance
    }

    /// Insert unless a vertex with the same token exists.
    pub fn register(
        &mut self,
        ambient: DVector<f64>,
        position: Vector3<f64>,
        color: Color,
        class: usize,
        depth: usize,
    ) -> Registration {
        let q = quantize(&ambient, self.tolerance);
        if q.near_threshold {
            self.near_threshold += 1;
            tracing::trace!(token = ?q.token.as_slice(), "vertex token near quantization threshold");
        }
        if let Some(&id) = self.index.get(&q.token) {
            return Registration {
                accepted: false,
                id,
            };
        }
        let id = VertexId(self.vertices.len());
        self.index.insert(q.token.clone(), id);
        self.vertices.push(Vertex {
            ambient,
            position,
            color,
            class,
            depth,
            token: q.token,
        });
        Registration { accepted: true, id }
    }

    /// Look up the entry a point would collapse to.
    pub fn find(&self, ambient: &DVector<f64>) -> Option<VertexId> {
        let q = quantize(ambient, self.tolerance);
        self.index.get(&q.token).copied()
    }

    #[inline]
    pub fn get(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.0]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    /// Registrations (accepted or not) that landed near a rounding boundary.
    #[inline]
    pub fn near_threshold(&self) -> usize {
        self.near_threshold
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.index.clear();
        self.near_threshold = 0;
    }
}
