//! Append-only edge store; an edge is identified by its sorted endpoint tokens.

use std::collections::HashMap;

use super::token::EdgeToken;
use super::vertex::{VertexId, VertexStore};
use crate::color::Color;

#[derive(Clone, Debug)]
pub struct Edge {
    pub a: VertexId,
    pub b: VertexId,
    pub color: Color,
    /// Mirror crossed by the edge.
    pub mirror: usize,
    pub token: EdgeToken,
}

#[derive(Clone, Debug, Default)]
pub struct EdgeStore {
    edges: Vec<Edge>,
    index: HashMap<EdgeToken, usize>,
}

impl EdgeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the edge `a–b` unless it is a self-loop or already present in
    /// either orientation. Returns whether the store changed.
    pub fn register(
        &mut self,
        vertices: &VertexStore,
        a: VertexId,
        b: VertexId,
        color: Color,
        mirror: usize,
    ) -> bool {
        if a == b {
            return false;
        }
        let token = EdgeToken::new(&vertices.get(a).token, &vertices.get(b).token);
        if self.index.contains_key(&token) {
            return false;
        }
        self.index.insert(token.clone(), self.edges.len());
        self.edges.push(Edge {
            a,
            b,
            color,
            mirror,
            token,
        });
        true
    }

    /// Canonical stored edge between `a` and `b`, in either orientation.
    pub fn get(&self, vertices: &VertexStore, a: VertexId, b: VertexId) -> Option<&Edge> {
        let token = EdgeToken::new(&vertices.get(a).token, &vertices.get(b).token);
        self.index.get(&token).map(|&i| &self.edges[i])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn clear(&mut self) {
        self.edges.clear();
        self.index.clear();
    }
}
