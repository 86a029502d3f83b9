//! Canonical tokens: quantized coordinates as hashable, ordered keys.

use nalgebra::DVector;

use crate::cfg::{BUCKET_EDGE_EPS, NEAR_THRESHOLD};

/// Magnitude bucket followed by the quantized ambient coordinates.
/// Ordered lexicographically.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexToken(Box<[i64]>);

impl VertexToken {
    #[inline]
    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }
}

/// Unordered pair of vertex tokens, stored sorted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeToken(VertexToken, VertexToken);

impl EdgeToken {
    pub fn new(a: &VertexToken, b: &VertexToken) -> Self {
        if a <= b {
            Self(a.clone(), b.clone())
        } else {
            Self(b.clone(), a.clone())
        }
    }

    #[inline]
    pub fn endpoints(&self) -> (&VertexToken, &VertexToken) {
        (&self.0, &self.1)
    }
}

/// Token plus whether any coordinate sat next to a rounding boundary.
#[derive(Clone, Debug)]
pub struct Quantized {
    pub token: VertexToken,
    pub near_threshold: bool,
}

/// Quantize with step `tol · 2^e`, where `e = round(log2(max(1, |v|∞)))` is
/// the magnitude bucket of `v`. The bucket leads the token and the step is
/// absolute within it, so scaled copies never share a key, while hyperboloid
/// points far from the origin (large, relatively noisy coordinates) still
/// collapse within their bucket.
///
/// Bucket edges sit at `2^(k+1/2)`; lattice and unit-sphere coordinates never
/// land on them.
pub fn quantize(v: &DVector<f64>, tol: f64) -> Quantized {
    let log = v.amax().max(1.0).log2();
    let bucket = log.round();
    let mut near_threshold = ((log - log.floor()) - 0.5).abs() < BUCKET_EDGE_EPS;
    let step = tol * bucket.exp2();
    let token = std::iter::once(bucket as i64)
        .chain(v.iter().map(|&x| {
            let r = x / step;
            if ((r - r.floor()) - 0.5).abs() < NEAR_THRESHOLD {
                near_threshold = true;
            }
            r.round() as i64
        }))
        .collect();
    Quantized {
        token: VertexToken(token),
        near_threshold,
    }
}
