//! Tolerance defaults (internal).
//!
//! Policy
//! - The quantization step is the one knob users are expected to tune; it is
//!   surfaced through `Config::tolerance`. The others stay fixed constants and are
//!   only overridable through `SimplexCfg` for experiments.

/// Quantization step for canonical tokens, relative to the power-of-two
/// magnitude bucket of the point.
pub const TOKEN_TOLERANCE: f64 = 1e-6;
/// Width (in units of one quantization step) around a rounding boundary that
/// counts as a numeric tolerance warning.
pub(crate) const NEAR_THRESHOLD: f64 = 1e-3;
/// Distance of `log2 |v|∞` from a bucket edge that counts as a numeric
/// tolerance warning.
pub(crate) const BUCKET_EDGE_EPS: f64 = 1e-9;
/// Eigenvalue magnitude treated as zero when reading the Gram signature.
pub(crate) const SIGNATURE_EPS: f64 = 1e-9;
/// Allowed residual of the indefinite factorization and of `B(m_i, m_j) ≈ G_ij`.
pub(crate) const RESIDUAL_EPS: f64 = 1e-9;
/// Self-product magnitude under which a hyperbolic vertex is ideal (on the boundary).
pub(crate) const IDEAL_EPS: f64 = 1e-9;
/// Gram entry used for the no-relation sentinel (parallel mirrors).
pub const NO_RELATION_GRAM: f64 = -1.0;
