//! Fundamental simplex of a Coxeter group: mirrors and seed vertices.
//!
//! Purpose
//! - Realize a Gram matrix as `n` mirrors in the ambient model of its geometry
//!   and compute the simplex vertices that seed the orbit expansion.
//!
//! Construction
//! - Pick a pivot generator whose complement in G is positive definite, factor
//!   that complement `L Lᵀ` (rows of L are the first n-1 normals, last coordinate 0)
//!   and solve `L y = g` for the pivot normal. The residual `r = 1 - |y|²` fixes the
//!   last coordinate: `√r` (spherical), `√(-r)` (hyperbolic, timelike axis), or none
//!   (Euclidean, homogeneous model with the pivot wall offset from the origin).
//! - Vertex `k` is the common point of every mirror except `k`: column `k` of the
//!   inverse covector matrix. One global sign puts the pivot vertex at `(0,…,0,1)`.
//!
//! Conventions
//! - A mirror is a covector/direction pair with `c·d = 1`; reflection is
//!   `v ↦ v - 2 (c·v) d`. In the metric models `d = m` and `c = η m`, which is
//!   `v - 2 B(v,m)/B(m,m) m` for unit `m`.

use nalgebra::{Cholesky, DMatrix, DVector};

use crate::cfg::{IDEAL_EPS, RESIDUAL_EPS, SIGNATURE_EPS};
use crate::error::Error;
use crate::geometry::GeometryKind;

/// Tolerances for simplex construction.
#[derive(Clone, Copy, Debug)]
pub struct SimplexCfg {
    pub signature_eps: f64,
    pub residual_eps: f64,
    pub ideal_eps: f64,
    /// Distance of the pivot wall from the origin in the Euclidean model.
    pub euclidean_offset: f64,
}

impl Default for SimplexCfg {
    fn default() -> Self {
        Self {
            signature_eps: SIGNATURE_EPS,
            residual_eps: RESIDUAL_EPS,
            ideal_eps: IDEAL_EPS,
            euclidean_offset: 1.0,
        }
    }
}

/// Hyperplane of the ambient space.
#[derive(Clone, Debug, PartialEq)]
pub struct Mirror {
    pub covector: DVector<f64>,
    pub vector: DVector<f64>,
}

impl Mirror {
    /// Signed side value `c·v` (zero on the mirror).
    #[inline]
    pub fn eval(&self, v: &DVector<f64>) -> f64 {
        self.covector.dot(v)
    }

    /// Reflect a point (or direction) across this mirror.
    #[inline]
    pub fn reflect(&self, v: &DVector<f64>) -> DVector<f64> {
        v - &self.vector * (2.0 * self.eval(v))
    }

    /// Image of `other` under the reflection in `self`.
    ///
    /// Directions transform with the reflection; covectors with its inverse,
    /// which is the reflection itself: `c' = c - 2 (c·d_self) c_self`.
    pub fn reflect_mirror(&self, other: &Mirror) -> Mirror {
        Mirror {
            covector: &other.covector
                - &self.covector * (2.0 * other.covector.dot(&self.vector)),
            vector: self.reflect(&other.vector),
        }
    }
}

/// Position of a simplex vertex relative to the model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VertexKind {
    /// Ordinary point of the space.
    Finite,
    /// Hyperbolic point at infinity (`B(v,v) = 0`).
    Ideal,
    /// Hyperbolic point beyond infinity (`B(v,v) > 0`).
    UltraIdeal,
}

/// Fundamental domain of the group.
#[derive(Clone, Debug)]
pub struct Simplex {
    pub kind: GeometryKind,
    /// Mirror `i` belongs to generator `i`.
    pub mirrors: Vec<Mirror>,
    /// Vertex `k` lies on every mirror except mirror `k`.
    pub vertices: Vec<DVector<f64>>,
    pub vertex_kinds: Vec<VertexKind>,
    /// Generator whose complement was factored; its vertex is the model origin.
    pub pivot: usize,
}

impl Simplex {
    /// Build the simplex for a Gram matrix already classified as `kind`.
    pub fn from_gram(gram: &DMatrix<f64>, kind: GeometryKind, cfg: &SimplexCfg) -> Result<Self, Error> {
        let n = gram.nrows();
        if n < 2 || gram.ncols() != n {
            return Err(Error::degenerate(format!(
                "Gram matrix must be square of size >= 2, got {}x{}",
                gram.nrows(),
                gram.ncols()
            )));
        }
        let (pivot, l) = (0..n)
            .rev()
            .find_map(|p| definite_factor(complement(gram, p), cfg.residual_eps).map(|l| (p, l)))
            .ok_or_else(|| {
                Error::degenerate("no generator has a positive definite complement (no finite vertex)")
            })?;
        let others: Vec<usize> = (0..n).filter(|&i| i != pivot).collect();
        let g = DVector::from_iterator(n - 1, others.iter().map(|&i| gram[(pivot, i)]));
        let y = l
            .solve_lower_triangular(&g)
            .ok_or_else(|| Error::degenerate("singular factor for the pivot normal"))?;
        let residual = 1.0 - y.norm_squared();
        let last = match kind {
            GeometryKind::Spherical if residual > cfg.residual_eps => residual.sqrt(),
            GeometryKind::Hyperbolic if residual < -cfg.residual_eps => (-residual).sqrt(),
            GeometryKind::Euclidean if residual.abs() <= cfg.residual_eps => 0.0,
            _ => {
                return Err(Error::degenerate(format!(
                    "factorization residual {residual:.3e} disagrees with {kind} signature"
                )))
            }
        };

        let mut mirrors: Vec<Option<Mirror>> = vec![None; n];
        for (k, &i) in others.iter().enumerate() {
            let mut normal = DVector::zeros(n);
            normal.rows_mut(0, n - 1).copy_from(&l.row(k).transpose());
            mirrors[i] = Some(mirror_from_normal(kind, normal, 0.0));
        }
        let mut normal = DVector::zeros(n);
        normal.rows_mut(0, n - 1).copy_from(&y);
        normal[n - 1] = last;
        mirrors[pivot] = Some(mirror_from_normal(kind, normal, cfg.euclidean_offset));
        let mirrors: Vec<Mirror> = mirrors.into_iter().flatten().collect();

        for i in 0..n {
            for j in 0..n {
                let b = mirrors[i].covector.dot(&mirrors[j].vector);
                if (b - gram[(i, j)]).abs() > cfg.residual_eps.sqrt() {
                    return Err(Error::degenerate(format!(
                        "mirrors ({i},{j}) reproduce {b:.6} instead of {:.6}",
                        gram[(i, j)]
                    )));
                }
            }
        }

        let (vertices, vertex_kinds) = simplex_vertices(&mirrors, kind, pivot, cfg)?;
        Ok(Self {
            kind,
            mirrors,
            vertices,
            vertex_kinds,
            pivot,
        })
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.mirrors.len()
    }

    /// Interior point: sum of the normalized vertices.
    pub fn center(&self) -> DVector<f64> {
        self.vertices
            .iter()
            .fold(DVector::zeros(self.rank()), |acc, v| acc + v)
    }

    /// Whether the orbit of vertex `k` lies inside the model (renderable).
    #[inline]
    pub fn is_finite(&self, k: usize) -> bool {
        self.vertex_kinds[k] == VertexKind::Finite
    }
}

fn complement(gram: &DMatrix<f64>, p: usize) -> DMatrix<f64> {
    gram.clone().remove_row(p).remove_column(p)
}

/// Cholesky factor `L` of a clearly positive definite matrix.
///
/// Semidefinite input can slip through `Cholesky::new` with a tiny pivot; we
/// reject pivots below `sqrt(eps)`.
fn definite_factor(m: DMatrix<f64>, eps: f64) -> Option<DMatrix<f64>> {
    let l = Cholesky::new(m)?.l();
    if l.diagonal().min() <= eps.sqrt() {
        return None;
    }
    Some(l)
}

fn mirror_from_normal(kind: GeometryKind, normal: DVector<f64>, offset: f64) -> Mirror {
    match kind {
        GeometryKind::Euclidean => {
            let n = normal.len();
            let mut covector = normal.clone();
            covector[n - 1] = -offset;
            Mirror {
                covector,
                vector: normal,
            }
        }
        GeometryKind::Spherical | GeometryKind::Hyperbolic => Mirror {
            covector: kind.lower(&normal),
            vector: normal,
        },
    }
}

fn simplex_vertices(
    mirrors: &[Mirror],
    kind: GeometryKind,
    pivot: usize,
    cfg: &SimplexCfg,
) -> Result<(Vec<DVector<f64>>, Vec<VertexKind>), Error> {
    let n = mirrors.len();
    let covectors = DMatrix::from_fn(n, n, |i, j| mirrors[i].covector[j]);
    let inv = covectors
        .try_inverse()
        .ok_or_else(|| Error::degenerate("mirror covectors are linearly dependent"))?;
    let sign = if inv[(n - 1, pivot)] < 0.0 { -1.0 } else { 1.0 };

    let mut vertices = Vec::with_capacity(n);
    let mut kinds = Vec::with_capacity(n);
    for k in 0..n {
        let u: DVector<f64> = inv.column(k) * sign;
        let (v, vk) = match kind {
            GeometryKind::Spherical => (u.normalize(), VertexKind::Finite),
            GeometryKind::Euclidean => {
                let w = u[n - 1];
                if w <= cfg.ideal_eps * u.norm() {
                    return Err(Error::degenerate(format!(
                        "Euclidean vertex {k} lies at infinity (w={w:.3e})"
                    )));
                }
                (u / w, VertexKind::Finite)
            }
            GeometryKind::Hyperbolic => {
                let q = kind.inner(&u, &u);
                let rel = q / u.norm_squared();
                if rel < -cfg.ideal_eps {
                    if u[n - 1] <= 0.0 {
                        return Err(Error::degenerate(format!(
                            "finite vertex {k} lies on the lower sheet"
                        )));
                    }
                    (u / (-q).sqrt(), VertexKind::Finite)
                } else if rel <= cfg.ideal_eps {
                    (u.normalize(), VertexKind::Ideal)
                } else {
                    (u / q.sqrt(), VertexKind::UltraIdeal)
                }
            }
        };
        vertices.push(v);
        kinds.push(vk);
    }
    Ok((vertices, kinds))
}
