use nalgebra::{DVector, Vector3};

/// Constant-curvature geometry of a Coxeter diagram, with its ambient model.
///
/// Ambient vectors have the rank of the diagram as dimension. The last
/// coordinate is special in every model:
/// - Euclidean: homogeneous `w` (affine points have `w = 1`), form `diag(1,…,1,0)`.
/// - Spherical: ordinary coordinate, form `diag(1,…,1,1)`, points on the unit sphere.
/// - Hyperbolic: timelike `t`, form `diag(1,…,1,-1)`, points on the upper sheet
///   `B(v,v) = -1, t > 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Euclidean,
    Spherical,
    Hyperbolic,
}

impl GeometryKind {
    /// Sign of the last diagonal entry of the ambient form.
    #[inline]
    pub fn last_sign(self) -> f64 {
        match self {
            GeometryKind::Euclidean => 0.0,
            GeometryKind::Spherical => 1.0,
            GeometryKind::Hyperbolic => -1.0,
        }
    }

    /// Ambient bilinear form `B(a, b)`.
    pub fn inner(self, a: &DVector<f64>, b: &DVector<f64>) -> f64 {
        let n = a.len();
        let space = a.rows(0, n - 1).dot(&b.rows(0, n - 1));
        space + self.last_sign() * a[n - 1] * b[n - 1]
    }

    /// `η v`: the covector of `v` under the ambient form.
    pub fn lower(self, v: &DVector<f64>) -> DVector<f64> {
        let mut out = v.clone();
        let n = out.len();
        out[n - 1] *= self.last_sign();
        out
    }

    /// Base point of the model: `(0, …, 0, 1)`.
    pub fn origin(self, dim: usize) -> DVector<f64> {
        let mut o = DVector::zeros(dim);
        o[dim - 1] = 1.0;
        o
    }

    /// Map an ambient point to a bounded render coordinate (first three axes,
    /// zero-padded when the geometry has fewer).
    ///
    /// - Euclidean: dehomogenize (divide by `w`, drop it).
    /// - Spherical: identity up to ambient dimension 3; above that the trailing
    ///   coordinates are dropped (orthographic, stays in the closed unit ball).
    /// - Hyperbolic: Poincaré ball `x_i / (1 + t)`; norm < 1 for upper-sheet points.
    pub fn project(self, v: &DVector<f64>) -> Vector3<f64> {
        let n = v.len();
        let last = v[n - 1];
        let (coords, scale) = match self {
            GeometryKind::Euclidean => (n - 1, 1.0 / last),
            GeometryKind::Spherical => (if n <= 3 { n } else { n - 1 }, 1.0),
            GeometryKind::Hyperbolic => (n - 1, 1.0 / (1.0 + last)),
        };
        let mut out = Vector3::zeros();
        for i in 0..coords.min(3) {
            out[i] = v[i] * scale;
        }
        out
    }

    /// Intrinsic distance from `origin()` to the point represented by `v`.
    ///
    /// `v` need not be normalized (any positive multiple gives the same value).
    /// Points outside the model (at infinity, spacelike, past sheet) are infinitely far.
    pub fn distance_from_origin(self, v: &DVector<f64>) -> f64 {
        let n = v.len();
        let last = v[n - 1];
        match self {
            GeometryKind::Euclidean => {
                if last <= 0.0 {
                    return f64::INFINITY;
                }
                v.rows(0, n - 1).norm() / last
            }
            GeometryKind::Spherical => {
                let norm = v.norm();
                if norm == 0.0 {
                    return f64::INFINITY;
                }
                (last / norm).clamp(-1.0, 1.0).acos()
            }
            GeometryKind::Hyperbolic => {
                let q = -self.inner(v, v);
                if q <= 0.0 || last <= 0.0 {
                    return f64::INFINITY;
                }
                (last / q.sqrt()).max(1.0).acosh()
            }
        }
    }
}

impl std::fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            GeometryKind::Euclidean => "euclidean",
            GeometryKind::Spherical => "spherical",
            GeometryKind::Hyperbolic => "hyperbolic",
        })
    }
}
