//! Coxeter diagrams and their Gram matrices.
//!
//! Conventions
//! - A diagram of rank n is an n×n symmetric matrix of relation orders with
//!   ones on the diagonal. `Order::Infinite` is the no-relation sentinel.
//! - `G[i][j] = -cos(π / m_ij)`; the sentinel maps to a configurable value ≤ -1
//!   (parallel mirrors at -1, ultraparallel below).
//! - The geometry is read off the Gram signature: positive definite → spherical,
//!   positive semidefinite with a one-dimensional kernel → Euclidean, exactly one
//!   negative eigenvalue → hyperbolic.

use std::fmt;
use std::str::FromStr;

use nalgebra::{DMatrix, SymmetricEigen};

use crate::error::Error;
use crate::geometry::GeometryKind;

/// Order of the dihedral group generated by two mirrors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Order {
    Finite(u32),
    /// Mirrors that do not generate a finite rotation (parallel or ultraparallel).
    Infinite,
}

impl Order {
    /// Gram entry `-cos(π/m)`, or `no_relation` for the sentinel.
    #[inline]
    pub fn gram_entry(self, no_relation: f64) -> f64 {
        match self {
            Order::Finite(m) => -(std::f64::consts::PI / m as f64).cos(),
            Order::Infinite => no_relation,
        }
    }
}

impl From<u32> for Order {
    fn from(m: u32) -> Self {
        Order::Finite(m)
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Finite(m) => write!(f, "{m}"),
            Order::Infinite => f.write_str("inf"),
        }
    }
}

impl FromStr for Order {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "inf" | "infinity" | "∞" => Ok(Order::Infinite),
            t => t
                .parse::<u32>()
                .map(Order::Finite)
                .map_err(|_| Error::invalid(format!("unparseable relation order {t:?}"))),
        }
    }
}

/// Validated, immutable Coxeter diagram.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoxeterDiagram {
    orders: Vec<Vec<Order>>,
}

impl CoxeterDiagram {
    /// Validate a full relation matrix.
    pub fn new(rows: Vec<Vec<Order>>) -> Result<Self, Error> {
        let n = rows.len();
        if n < 2 {
            return Err(Error::invalid(format!("need at least 2 generators, got {n}")));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(Error::invalid(format!(
                "row {i} has {} entries, expected {n}",
                row.len()
            )));
        }
        for i in 0..n {
            if rows[i][i] != Order::Finite(1) {
                return Err(Error::invalid(format!(
                    "diagonal entry ({i},{i}) is {}, expected 1",
                    rows[i][i]
                )));
            }
            for j in (i + 1)..n {
                if rows[i][j] != rows[j][i] {
                    return Err(Error::invalid(format!(
                        "not symmetric: ({i},{j})={} but ({j},{i})={}",
                        rows[i][j], rows[j][i]
                    )));
                }
                if let Order::Finite(m) = rows[i][j] {
                    if m < 2 {
                        return Err(Error::invalid(format!(
                            "relation order ({i},{j})={m} is below 2"
                        )));
                    }
                }
            }
        }
        Ok(Self { orders: rows })
    }

    /// Linear diagram from a Schläfli symbol: `[p, q, r]` has rank 4 with
    /// `m01=p, m12=q, m23=r` and all non-adjacent pairs commuting.
    pub fn from_schlafli(symbol: &[Order]) -> Result<Self, Error> {
        let n = symbol.len() + 1;
        let mut rows = vec![vec![Order::Finite(2); n]; n];
        for (i, row) in rows.iter_mut().enumerate() {
            row[i] = Order::Finite(1);
        }
        for (i, &m) in symbol.iter().enumerate() {
            rows[i][i + 1] = m;
            rows[i + 1][i] = m;
        }
        Self::new(rows)
    }

    /// Tetrahedral diagram from the six edge orders `[m01, m02, m03, m12, m13, m23]`.
    pub fn goursat(m: [Order; 6]) -> Result<Self, Error> {
        let one = Order::Finite(1);
        Self::new(vec![
            vec![one, m[0], m[1], m[2]],
            vec![m[0], one, m[3], m[4]],
            vec![m[1], m[3], one, m[5]],
            vec![m[2], m[4], m[5], one],
        ])
    }

    /// Number of generating mirrors (= ambient dimension).
    #[inline]
    pub fn rank(&self) -> usize {
        self.orders.len()
    }

    #[inline]
    pub fn order(&self, i: usize, j: usize) -> Order {
        self.orders[i][j]
    }

    #[inline]
    pub fn rows(&self) -> &[Vec<Order>] {
        &self.orders
    }

    pub fn has_no_relation(&self) -> bool {
        self.orders
            .iter()
            .any(|row| row.iter().any(|&m| m == Order::Infinite))
    }

    /// Gram matrix of the mirror normals.
    pub fn gram(&self, no_relation: f64) -> DMatrix<f64> {
        let n = self.rank();
        DMatrix::from_fn(n, n, |i, j| {
            if i == j {
                1.0
            } else {
                self.orders[i][j].gram_entry(no_relation)
            }
        })
    }
}

impl fmt::Display for CoxeterDiagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.orders.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            for (j, m) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{m}")?;
            }
        }
        Ok(())
    }
}

/// Accepts a Schläfli symbol (`"4,3,5"` or `"[4,3,5]"`) or a full matrix with
/// rows separated by `;` (`"1 3 2; 3 1 4; 2 4 1"`).
impl FromStr for CoxeterDiagram {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.contains(';') {
            let rows = s
                .split(';')
                .map(|row| {
                    row.split(|c: char| c == ',' || c.is_whitespace())
                        .filter(|t| !t.is_empty())
                        .map(Order::from_str)
                        .collect::<Result<Vec<_>, _>>()
                })
                .collect::<Result<Vec<_>, _>>()?;
            Self::new(rows)
        } else {
            let inner = s.trim_start_matches('[').trim_end_matches(']');
            let symbol = inner
                .split(',')
                .filter(|t| !t.trim().is_empty())
                .map(Order::from_str)
                .collect::<Result<Vec<_>, _>>()?;
            if symbol.is_empty() {
                return Err(Error::invalid("empty Schläfli symbol"));
            }
            Self::from_schlafli(&symbol)
        }
    }
}

/// Classify the geometry from the signature of the Gram matrix.
pub fn classify(gram: &DMatrix<f64>, eps: f64) -> Result<GeometryKind, Error> {
    let eig = SymmetricEigen::new(gram.clone());
    let scale = eig.eigenvalues.amax().max(1.0);
    let tol = eps * scale;
    let negative = eig.eigenvalues.iter().filter(|&&l| l < -tol).count();
    let zero = eig.eigenvalues.iter().filter(|&&l| l.abs() <= tol).count();
    match (negative, zero) {
        (0, 0) => Ok(GeometryKind::Spherical),
        (0, 1) => Ok(GeometryKind::Euclidean),
        (1, 0) => Ok(GeometryKind::Hyperbolic),
        _ => Err(Error::degenerate(format!(
            "unsupported Gram signature: {negative} negative and {zero} zero eigenvalues"
        ))),
    }
}
