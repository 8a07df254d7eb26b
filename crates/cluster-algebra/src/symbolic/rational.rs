//! Rational functions with an expanded numerator and a factored denominator.
//!
//! The denominator is a monomial times a sorted list of polynomial factors.
//! Each factor is monic, has no monomial content and is not constant. Keeping
//! the factors apart lets `simplify` cancel them by exact division instead of a
//! multivariate gcd; for cluster variables the Laurent phenomenon guarantees
//! that every such factor eventually divides the numerator.

use std::fmt;

use super::poly::{Monomial, Poly};
use super::Symbol;

#[derive(Clone, Debug)]
pub struct RationalFn {
    num: Poly,
    mono: Monomial,
    factors: Vec<Poly>,
}

impl RationalFn {
    pub fn from_poly(p: Poly) -> Self {
        Self {
            num: p,
            mono: Monomial::one(),
            factors: Vec::new(),
        }
    }

    pub fn symbol(s: Symbol) -> Self {
        Self::from_poly(Poly::var(s))
    }

    pub fn one() -> Self {
        Self::from_poly(Poly::one())
    }

    pub fn from_int(c: i64) -> Self {
        Self::from_poly(Poly::from_int(c))
    }

    /// Expanded numerator.
    pub fn numer(&self) -> &Poly {
        &self.num
    }

    /// Monomial part of the denominator.
    pub fn denom_monomial(&self) -> &Monomial {
        &self.mono
    }

    /// Non-monomial denominator factors.
    pub fn denom_factors(&self) -> &[Poly] {
        &self.factors
    }

    /// Expanded denominator.
    pub fn denom(&self) -> Poly {
        self.factors
            .iter()
            .fold(Poly::one().mul_monomial(&self.mono), |acc, f| acc.mul(f))
    }

    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    /// Denominator is a monomial.
    pub fn is_laurent(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn mul(&self, other: &RationalFn) -> RationalFn {
        let mut factors = self.factors.clone();
        factors.extend(other.factors.iter().cloned());
        RationalFn {
            num: self.num.mul(&other.num),
            mono: self.mono.mul(&other.mono),
            factors,
        }
        .simplify()
    }

    pub fn add(&self, other: &RationalFn) -> RationalFn {
        let mono = self.mono.lcm(&other.mono);
        let mut factors = self.factors.clone();
        let mut pool = self.factors.clone();
        for f in &other.factors {
            match pool.iter().position(|g| g == f) {
                Some(i) => {
                    pool.swap_remove(i);
                }
                None => factors.push(f.clone()),
            }
        }
        let lift = |r: &RationalFn| -> Poly {
            let mut missing = factors.clone();
            for f in &r.factors {
                if let Some(i) = missing.iter().position(|g| g == f) {
                    missing.swap_remove(i);
                }
            }
            let scale = mono.saturating_div(&r.mono);
            missing
                .iter()
                .fold(r.num.mul_monomial(&scale), |acc, f| acc.mul(f))
        };
        let num = lift(self).add(&lift(other));
        RationalFn { num, mono, factors }.simplify()
    }

    /// Multiplicative inverse, `None` for zero.
    pub fn inv(&self) -> Option<RationalFn> {
        if self.num.is_zero() {
            return None;
        }
        let content = self.num.monomial_content();
        let rest = self.num.strip_monomial(&content);
        let (lc, monic) = rest.monic();
        let factors = if monic.as_constant().is_some() {
            Vec::new()
        } else {
            vec![monic]
        };
        Some(
            RationalFn {
                num: self.denom().scale(&lc.recip()),
                mono: content,
                factors,
            }
            .simplify(),
        )
    }

    pub fn div(&self, other: &RationalFn) -> Option<RationalFn> {
        Some(self.mul(&other.inv()?))
    }

    pub fn pow(&self, e: u32) -> RationalFn {
        let mut acc = RationalFn::one();
        for _ in 0..e {
            acc = acc.mul(self);
        }
        acc
    }

    pub fn contains_symbol(&self, s: Symbol) -> bool {
        self.num.contains_symbol(s)
            || self.mono.degree(s) > 0
            || self.factors.iter().any(|f| f.contains_symbol(s))
    }

    /// Replace `s` by `value` everywhere. `None` if a denominator collapses to zero.
    pub fn substitute(&self, s: Symbol, value: &RationalFn) -> Option<RationalFn> {
        if !self.contains_symbol(s) {
            return Some(self.clone());
        }
        let num = substitute_poly(&self.num, s, value);
        let (rest, e) = self.mono.split(s);
        let den = self.factors.iter().fold(
            RationalFn::from_poly(Poly::one().mul_monomial(&rest)).mul(&value.pow(e)),
            |acc, f| acc.mul(&substitute_poly(f, s, value)),
        );
        num.div(&den)
    }

    /// Cancel denominator factors that divide the numerator, then the common
    /// monomial part.
    pub fn simplify(self) -> RationalFn {
        let RationalFn {
            mut num,
            mono,
            factors,
        } = self;
        if num.is_zero() {
            return RationalFn::from_poly(num);
        }
        let mut kept = Vec::with_capacity(factors.len());
        for f in factors {
            match num.div_exact(&f) {
                Some(q) => num = q,
                None => kept.push(f),
            }
        }
        let g = num.monomial_content().gcd(&mono);
        let num = num.strip_monomial(&g);
        let mono = mono.saturating_div(&g);
        kept.sort();
        RationalFn {
            num,
            mono,
            factors: kept,
        }
    }
}

/// `p` with `s` replaced by `value`, grouped by the power of `s`.
fn substitute_poly(p: &Poly, s: Symbol, value: &RationalFn) -> RationalFn {
    let parts = p.split_by(s);
    let mut acc = RationalFn::from_poly(Poly::zero());
    let mut power = RationalFn::one();
    let mut at = 0u32;
    for (e, coeff) in parts {
        while at < e {
            power = power.mul(value);
            at += 1;
        }
        acc = acc.add(&RationalFn::from_poly(coeff).mul(&power));
    }
    acc
}

impl PartialEq for RationalFn {
    /// Equality as rational functions (cross-multiplied).
    fn eq(&self, other: &Self) -> bool {
        self.num.mul(&other.denom()) == other.num.mul(&self.denom())
    }
}

impl From<Poly> for RationalFn {
    fn from(p: Poly) -> Self {
        RationalFn::from_poly(p)
    }
}

impl From<Symbol> for RationalFn {
    fn from(s: Symbol) -> Self {
        RationalFn::symbol(s)
    }
}

impl fmt::Display for RationalFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mono.is_one() && self.factors.is_empty() {
            return write!(f, "{}", self.num);
        }
        if self.num.num_terms() > 1 {
            write!(f, "({})", self.num)?;
        } else {
            write!(f, "{}", self.num)?;
        }
        let mut parts: Vec<String> = Vec::new();
        for (s, e) in self.mono.powers() {
            parts.push(if e == 1 {
                s.to_string()
            } else {
                format!("{s}^{e}")
            });
        }
        for g in &self.factors {
            parts.push(format!("({g})"));
        }
        if parts.len() == 1 {
            write!(f, "/{}", parts[0])
        } else {
            write!(f, "/({})", parts.join("*"))
        }
    }
}

impl Default for RationalFn {
    fn default() -> Self {
        RationalFn::from_poly(Poly::zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x(slot: usize) -> RationalFn {
        RationalFn::symbol(Symbol::mutable(slot, 0))
    }

    #[test]
    fn sums_share_denominators() {
        // 1/x1 + 1/x2 = (x1 + x2)/(x1 x2)
        let a = x(1).inv().unwrap();
        let b = x(2).inv().unwrap();
        let s = a.add(&b);
        assert!(s.is_laurent());
        assert_eq!(s.to_string(), "(x_{1} + x_{2})/(x_{1}*x_{2})");
    }

    #[test]
    fn factors_cancel_by_exact_division() {
        let f = x(1).add(&x(2));
        let q = f.mul(&x(3)).div(&f).unwrap();
        assert_eq!(q, x(3));
        assert!(q.is_laurent());
        assert_eq!(q.to_string(), "x_{3}");
    }

    #[test]
    fn substitution_is_laurent_for_exchange_chain() {
        // x1' = (1 + x2)/x1, then x2' = (1 + x1')/x2 = (x1 + x2 + 1)/(x1 x2).
        let x1p = Symbol::mutable(1, 1);
        let e1 = x(2).add(&RationalFn::one()).div(&x(1)).unwrap();
        let e2 = RationalFn::symbol(x1p)
            .add(&RationalFn::one())
            .div(&x(2))
            .unwrap();
        let sub = e2.substitute(x1p, &e1).unwrap();
        assert!(sub.is_laurent());
        assert_eq!(sub.to_string(), "(x_{1} + x_{2} + 1)/(x_{1}*x_{2})");
    }

    #[test]
    fn substituting_into_a_denominator_cancels() {
        // y = (1 + x2)/x1; (x2 + 1)/y == x1
        let y = Symbol::mutable(1, 1);
        let e = x(2).add(&RationalFn::one()).div(&RationalFn::symbol(y)).unwrap();
        let val = x(2).add(&RationalFn::one()).div(&x(1)).unwrap();
        let sub = e.substitute(y, &val).unwrap();
        assert_eq!(sub.to_string(), "x_{1}");
    }

    #[test]
    fn zero_has_no_inverse() {
        assert!(RationalFn::default().inv().is_none());
        let two = RationalFn::from_int(2);
        assert_eq!(two.inv().unwrap().to_string(), "1/2");
    }
}
