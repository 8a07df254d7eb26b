//! Sparse multivariate polynomials over ℚ in cluster symbols.
//!
//! Terms are kept in a `BTreeMap` keyed by monomial under a lexicographic term
//! order (smaller `Symbol` = higher priority). The order is compatible with
//! multiplication, which is what makes `div_exact` terminate and succeed
//! exactly when the divisor divides.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use super::Symbol;

/// Product of symbol powers with positive exponents.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Monomial(BTreeMap<Symbol, u32>);

impl Monomial {
    pub fn one() -> Self {
        Self(BTreeMap::new())
    }

    pub fn var(s: Symbol) -> Self {
        Self::power(s, 1)
    }

    pub fn power(s: Symbol, e: u32) -> Self {
        let mut m = BTreeMap::new();
        if e > 0 {
            m.insert(s, e);
        }
        Self(m)
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn degree(&self, s: Symbol) -> u32 {
        self.0.get(&s).copied().unwrap_or(0)
    }

    pub fn powers(&self) -> impl Iterator<Item = (Symbol, u32)> + '_ {
        self.0.iter().map(|(s, e)| (*s, *e))
    }

    pub fn mul(&self, other: &Monomial) -> Monomial {
        let mut out = self.0.clone();
        for (s, e) in &other.0 {
            *out.entry(*s).or_insert(0) += e;
        }
        Monomial(out)
    }

    /// `self / other` if every exponent of `other` fits.
    pub fn div(&self, other: &Monomial) -> Option<Monomial> {
        let mut out = self.0.clone();
        for (s, e) in &other.0 {
            let have = out.get_mut(s)?;
            match (*have).cmp(e) {
                Ordering::Less => return None,
                Ordering::Equal => {
                    out.remove(s);
                }
                Ordering::Greater => *have -= e,
            }
        }
        Some(Monomial(out))
    }

    /// Divide, dropping exponents that would go negative.
    pub(crate) fn saturating_div(&self, other: &Monomial) -> Monomial {
        let out = self
            .0
            .iter()
            .filter_map(|(s, e)| {
                let left = e.saturating_sub(other.degree(*s));
                (left > 0).then_some((*s, left))
            })
            .collect();
        Monomial(out)
    }

    pub fn gcd(&self, other: &Monomial) -> Monomial {
        let out = self
            .0
            .iter()
            .filter_map(|(s, e)| {
                let m = (*e).min(other.degree(*s));
                (m > 0).then_some((*s, m))
            })
            .collect();
        Monomial(out)
    }

    pub fn lcm(&self, other: &Monomial) -> Monomial {
        let mut out = self.0.clone();
        for (s, e) in &other.0 {
            let slot = out.entry(*s).or_insert(0);
            *slot = (*slot).max(*e);
        }
        Monomial(out)
    }

    /// Split off the power of `s`: `self = rest * s^e`.
    pub fn split(&self, s: Symbol) -> (Monomial, u32) {
        let mut rest = self.0.clone();
        let e = rest.remove(&s).unwrap_or(0);
        (Monomial(rest), e)
    }
}

impl Ord for Monomial {
    /// Lexicographic: compare exponents symbol by symbol in increasing
    /// `Symbol` order; the first difference decides.
    fn cmp(&self, other: &Self) -> Ordering {
        let mut a = self.0.iter().peekable();
        let mut b = other.0.iter().peekable();
        loop {
            match (a.peek(), b.peek()) {
                (None, None) => return Ordering::Equal,
                (Some(_), None) => return Ordering::Greater,
                (None, Some(_)) => return Ordering::Less,
                (Some((sa, ea)), Some((sb, eb))) => match sa.cmp(sb) {
                    Ordering::Less => return Ordering::Greater,
                    Ordering::Greater => return Ordering::Less,
                    Ordering::Equal => match ea.cmp(eb) {
                        Ordering::Equal => {
                            a.next();
                            b.next();
                        }
                        o => return o,
                    },
                },
            }
        }
    }
}

impl PartialOrd for Monomial {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_one() {
            return write!(f, "1");
        }
        for (k, (s, e)) in self.0.iter().enumerate() {
            if k > 0 {
                write!(f, "*")?;
            }
            if *e == 1 {
                write!(f, "{s}")?;
            } else {
                write!(f, "{s}^{e}")?;
            }
        }
        Ok(())
    }
}

/// Sparse polynomial with rational coefficients; zero coefficients are never stored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Poly {
    terms: BTreeMap<Monomial, BigRational>,
}

impl Poly {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn one() -> Self {
        Self::constant(BigRational::one())
    }

    pub fn from_int(c: i64) -> Self {
        Self::constant(BigRational::from_integer(BigInt::from(c)))
    }

    pub fn constant(c: BigRational) -> Self {
        Self::term(Monomial::one(), c)
    }

    pub fn var(s: Symbol) -> Self {
        Self::term(Monomial::var(s), BigRational::one())
    }

    pub fn term(m: Monomial, c: BigRational) -> Self {
        let mut p = Self::zero();
        p.add_term(m, c);
        p
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// The value if this polynomial is a constant (zero included).
    pub fn as_constant(&self) -> Option<BigRational> {
        match self.terms.len() {
            0 => Some(BigRational::zero()),
            1 => self
                .terms
                .iter()
                .next()
                .filter(|(m, _)| m.is_one())
                .map(|(_, c)| c.clone()),
            _ => None,
        }
    }

    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// Terms in decreasing term order.
    pub fn terms(&self) -> impl Iterator<Item = (&Monomial, &BigRational)> {
        self.terms.iter().rev()
    }

    /// Largest term under the lexicographic order.
    pub fn leading(&self) -> Option<(&Monomial, &BigRational)> {
        self.terms.iter().next_back()
    }

    pub fn add_term(&mut self, m: Monomial, c: BigRational) {
        if c.is_zero() {
            return;
        }
        let sum = match self.terms.remove(&m) {
            Some(old) => old + c,
            None => c,
        };
        if !sum.is_zero() {
            self.terms.insert(m, sum);
        }
    }

    pub fn add(&self, other: &Poly) -> Poly {
        let mut out = self.clone();
        for (m, c) in &other.terms {
            out.add_term(m.clone(), c.clone());
        }
        out
    }

    pub fn sub(&self, other: &Poly) -> Poly {
        let mut out = self.clone();
        for (m, c) in &other.terms {
            out.add_term(m.clone(), -c.clone());
        }
        out
    }

    pub fn mul(&self, other: &Poly) -> Poly {
        let mut out = Poly::zero();
        for (ma, ca) in &self.terms {
            for (mb, cb) in &other.terms {
                out.add_term(ma.mul(mb), ca * cb);
            }
        }
        out
    }

    pub fn scale(&self, c: &BigRational) -> Poly {
        if c.is_zero() {
            return Poly::zero();
        }
        Poly {
            terms: self
                .terms
                .iter()
                .map(|(m, v)| (m.clone(), v * c))
                .collect(),
        }
    }

    pub fn mul_monomial(&self, m: &Monomial) -> Poly {
        Poly {
            terms: self
                .terms
                .iter()
                .map(|(t, c)| (t.mul(m), c.clone()))
                .collect(),
        }
    }

    /// Divide every term by `m`; caller guarantees `m` divides the content.
    pub(crate) fn strip_monomial(&self, m: &Monomial) -> Poly {
        let mut out = Poly::zero();
        for (t, c) in &self.terms {
            out.add_term(t.saturating_div(m), c.clone());
        }
        out
    }

    pub fn pow(&self, e: u32) -> Poly {
        let mut acc = Poly::one();
        for _ in 0..e {
            acc = acc.mul(self);
        }
        acc
    }

    /// Largest monomial dividing every term (`1` for the zero polynomial).
    pub fn monomial_content(&self) -> Monomial {
        let mut it = self.terms.keys();
        let Some(first) = it.next() else {
            return Monomial::one();
        };
        it.fold(first.clone(), |g, m| g.gcd(m))
    }

    pub fn contains_symbol(&self, s: Symbol) -> bool {
        self.terms.keys().any(|m| m.degree(s) > 0)
    }

    /// Coefficients of `self` as a polynomial in `s`: `self = Σ_e c_e s^e`.
    pub fn split_by(&self, s: Symbol) -> BTreeMap<u32, Poly> {
        let mut out: BTreeMap<u32, Poly> = BTreeMap::new();
        for (m, c) in &self.terms {
            let (rest, e) = m.split(s);
            out.entry(e).or_default().add_term(rest, c.clone());
        }
        out
    }

    /// `(lc, self / lc)` where `lc` is the leading coefficient.
    pub fn monic(&self) -> (BigRational, Poly) {
        match self.leading() {
            Some((_, lc)) => {
                let lc = lc.clone();
                let inv = lc.recip();
                (lc, self.scale(&inv))
            }
            None => (BigRational::one(), Poly::zero()),
        }
    }

    /// Exact quotient `self / d`, or `None` if `d` does not divide `self`.
    pub fn div_exact(&self, d: &Poly) -> Option<Poly> {
        let (lm, lc) = d.leading()?;
        let (lm, lc) = (lm.clone(), lc.clone());
        let mut rem = self.clone();
        let mut quot = Poly::zero();
        while let Some((m, c)) = rem.leading() {
            let qm = m.div(&lm)?;
            let qc = c / &lc;
            let step = Poly::term(qm, qc);
            rem = rem.sub(&step.mul(d));
            quot = quot.add(&step);
        }
        Some(quot)
    }
}

fn fmt_coeff(c: &BigRational) -> String {
    if c.is_integer() {
        c.to_integer().to_string()
    } else {
        format!("{}/{}", c.numer(), c.denom())
    }
}

impl fmt::Display for Poly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        for (k, (m, c)) in self.terms().enumerate() {
            let neg = c.is_negative();
            match (k, neg) {
                (0, true) => write!(f, "-")?,
                (0, false) => {}
                (_, true) => write!(f, " - ")?,
                (_, false) => write!(f, " + ")?,
            }
            let a = c.abs();
            if m.is_one() {
                write!(f, "{}", fmt_coeff(&a))?;
            } else if a.is_one() {
                write!(f, "{m}")?;
            } else {
                write!(f, "{}*{m}", fmt_coeff(&a))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x(slot: usize) -> Poly {
        Poly::var(Symbol::mutable(slot, 0))
    }

    #[test]
    fn lex_order_prefers_lower_symbols() {
        let a = Monomial::var(Symbol::mutable(1, 0));
        let b = Monomial::power(Symbol::mutable(2, 0), 5);
        assert!(a > b);
        assert!(a.mul(&b) > a);
        assert!(Monomial::one() < b);
    }

    #[test]
    fn display_orders_terms_and_signs() {
        let p = x(2).add(&Poly::one());
        assert_eq!(p.to_string(), "x_{2} + 1");
        let q = x(1).mul(&x(1)).scale(&BigRational::from_integer(3.into())).sub(&x(2));
        assert_eq!(q.to_string(), "3*x_{1}^2 - x_{2}");
        assert_eq!(Poly::zero().to_string(), "0");
        let half = Poly::constant(BigRational::new(1.into(), 2.into()));
        assert_eq!(half.to_string(), "1/2");
    }

    #[test]
    fn exact_division_recovers_factors() {
        let f = x(1).add(&x(2));
        let g = x(3).add(&Poly::from_int(2));
        let prod = f.mul(&g);
        assert_eq!(prod.div_exact(&f), Some(g.clone()));
        assert_eq!(prod.div_exact(&g), Some(f));
        assert_eq!(g.div_exact(&x(1)), None);
        assert_eq!(x(1).add(&Poly::one()).div_exact(&x(2).add(&Poly::one())), None);
    }

    #[test]
    fn monomial_content_and_split() {
        let s1 = Symbol::mutable(1, 0);
        let p = x(1).mul(&x(1)).mul(&x(2)).add(&x(1).mul(&x(3)));
        assert_eq!(p.monomial_content(), Monomial::var(s1));
        let parts = p.split_by(s1);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[&2], x(2));
        assert_eq!(parts[&1], x(3));
        assert!(p.contains_symbol(s1));
        assert!(!p.contains_symbol(Symbol::lamination(1)));
    }
}
