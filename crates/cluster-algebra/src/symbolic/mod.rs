//! Symbolic layer: cluster symbols and the algebra used by elimination.
//!
//! Purpose
//! - Name every cluster variable as a pure function of `(slot, flip count)`
//!   and every lamination (frozen) variable by its index; no global tables.
//! - Abstract the rational-expression capability behind `ExchangeAlgebra` so
//!   the combinatorial core can run against any engine. `LaurentAlgebra` is
//!   the built-in exact engine (multivariate polynomials over ℚ with a
//!   factored denominator).
//!
//! Naming
//! - Display: `x_{<slot><primes>}` and `u_{<k>}` (slots and laminations are
//!   1-based; one prime per flip).
//! - Matrix labels: `x_<slot><primes>` and `u_<k>`.

mod engine;
mod poly;
mod rational;

pub use engine::LaurentAlgebra;
pub use poly::{Monomial, Poly};
pub use rational::RationalFn;

use std::fmt;

use serde::Serialize;

use crate::error::{ClusterError, Result};

/// Algebraic symbol of the cluster algebra.
///
/// Ordering: all mutable symbols by slot then flip count, then laminations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Symbol {
    /// `x_{i,j}`: slot `i` (1-based) after `j` flips.
    Mutable { slot: usize, flips: usize },
    /// `u_k` (1-based).
    Lamination { index: usize },
}

impl Symbol {
    #[inline]
    pub fn mutable(slot: usize, flips: usize) -> Self {
        Symbol::Mutable { slot, flips }
    }
    #[inline]
    pub fn lamination(index: usize) -> Self {
        Symbol::Lamination { index }
    }

    /// Same slot, one more flip.
    pub fn next_flip(&self) -> Option<Symbol> {
        match *self {
            Symbol::Mutable { slot, flips } => Some(Symbol::mutable(slot, flips + 1)),
            Symbol::Lamination { .. } => None,
        }
    }

    /// Exchange-matrix label: `x_1''`, `u_3`.
    pub fn label(&self) -> String {
        match *self {
            Symbol::Mutable { slot, flips } => format!("x_{slot}{}", "'".repeat(flips)),
            Symbol::Lamination { index } => format!("u_{index}"),
        }
    }

    /// Resolve a matrix label (`x_1''`, `u_3`) or display name (`x_{1''}`,
    /// `u_{3}`) to its symbol.
    pub fn parse(name: &str) -> Result<Symbol> {
        let undefined = || ClusterError::UndefinedVariableName {
            name: name.to_string(),
        };
        let (kind, rest) = name.split_once('_').ok_or_else(undefined)?;
        let body = match rest.strip_prefix('{') {
            Some(inner) => inner.strip_suffix('}').ok_or_else(undefined)?,
            None => rest,
        };
        let digits = body.trim_end_matches('\'');
        let primes = body.len() - digits.len();
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(undefined());
        }
        let index: usize = digits.parse().map_err(|_| undefined())?;
        if index == 0 {
            return Err(undefined());
        }
        match kind {
            "x" => Ok(Symbol::mutable(index, primes)),
            "u" if primes == 0 => Ok(Symbol::lamination(index)),
            _ => Err(undefined()),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Symbol::Mutable { slot, flips } => write!(f, "x_{{{slot}{}}}", "'".repeat(flips)),
            Symbol::Lamination { index } => write!(f, "u_{{{index}}}"),
        }
    }
}

impl std::str::FromStr for Symbol {
    type Err = ClusterError;
    fn from_str(s: &str) -> Result<Self> {
        Symbol::parse(s)
    }
}

/// Rational-expression capability consumed by mutation-chain elimination.
///
/// Implementations must treat expressions as values: every operation returns
/// a new expression and leaves its inputs untouched.
pub trait ExchangeAlgebra {
    type Expr: Clone + fmt::Debug + fmt::Display;

    fn symbol(&self, s: Symbol) -> Self::Expr;
    /// Multiplicative identity (the empty product).
    fn one(&self) -> Self::Expr;
    fn mul(&self, a: &Self::Expr, b: &Self::Expr) -> Self::Expr;
    fn add(&self, a: &Self::Expr, b: &Self::Expr) -> Self::Expr;
    fn div(&self, num: &Self::Expr, den: &Self::Expr) -> Result<Self::Expr>;
    /// Replace every occurrence of `s` in `expr` by `value`.
    fn substitute(&self, expr: &Self::Expr, s: Symbol, value: &Self::Expr) -> Result<Self::Expr>;
    /// Expand and cancel common factors.
    fn simplify(&self, expr: &Self::Expr) -> Self::Expr;
    /// Expand the numerator only; the denominator stays factored.
    fn expand_numerator(&self, expr: &Self::Expr) -> Self::Expr;

    /// `base^exp` by repeated multiplication.
    fn pow(&self, base: &Self::Expr, exp: u32) -> Self::Expr {
        let mut acc = self.one();
        for _ in 0..exp {
            acc = self.mul(&acc, base);
        }
        acc
    }

    /// Product of powers; the empty product is `one()`.
    fn product<I>(&self, factors: I) -> Self::Expr
    where
        I: IntoIterator<Item = (Symbol, u32)>,
    {
        factors.into_iter().fold(self.one(), |acc, (s, e)| {
            self.mul(&acc, &self.pow(&self.symbol(s), e))
        })
    }
}
