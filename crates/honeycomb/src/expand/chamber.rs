//! Chambers: images of the fundamental simplex under the group.

use nalgebra::DVector;

use crate::registry::VertexId;
use crate::simplex::{Mirror, Simplex};

/// `g · simplex` for some group element `g`, kept in explicit coordinates.
///
/// Wall `i` and vertex `k` keep the generator labels of the fundamental simplex,
/// so vertex `k` lies on every wall except wall `k`.
#[derive(Clone, Debug)]
pub(crate) struct Chamber {
    pub walls: Vec<Mirror>,
    pub vertices: Vec<DVector<f64>>,
    /// Registry entry per vertex; `None` for classes that are not rendered.
    pub ids: Vec<Option<VertexId>>,
    pub depth: usize,
}

impl Chamber {
    pub fn fundamental(simplex: &Simplex, ids: Vec<Option<VertexId>>) -> Self {
        Self {
            walls: simplex.mirrors.clone(),
            vertices: simplex.vertices.clone(),
            ids,
            depth: 0,
        }
    }

    /// Interior point: sum of the vertices. Identifies the chamber.
    pub fn center(&self) -> DVector<f64> {
        let n = self.vertices[0].len();
        self.vertices
            .iter()
            .fold(DVector::zeros(n), |acc, v| acc + v)
    }

    /// Sum of the vertices of rendered classes (a point of the space).
    pub fn visible_center(&self) -> DVector<f64> {
        let n = self.vertices[0].len();
        self.vertices
            .iter()
            .zip(&self.ids)
            .filter(|(_, id)| id.is_some())
            .fold(DVector::zeros(n), |acc, (v, _)| acc + v)
    }

    /// Images of the vertices across wall `i` (the neighbor's vertices).
    pub fn reflected_vertices(&self, i: usize) -> Vec<DVector<f64>> {
        let wall = &self.walls[i];
        self.vertices.iter().map(|v| wall.reflect(v)).collect()
    }

    /// Neighbor across wall `i`, given its already reflected vertices.
    pub fn neighbor(&self, i: usize, vertices: Vec<DVector<f64>>, ids: Vec<Option<VertexId>>) -> Self {
        let wall = &self.walls[i];
        Self {
            walls: self.walls.iter().map(|w| wall.reflect_mirror(w)).collect(),
            vertices,
            ids,
            depth: self.depth + 1,
        }
    }
}
