//! Built-in exact engine backing `ExchangeAlgebra`.

use crate::error::{ClusterError, Result};

use super::rational::RationalFn;
use super::{ExchangeAlgebra, Symbol};

/// Exact rational-function arithmetic over ℚ.
///
/// Numerators are always expanded; denominators stay factored, so
/// `expand_numerator` is the identity.
#[derive(Clone, Copy, Debug, Default)]
pub struct LaurentAlgebra;

impl ExchangeAlgebra for LaurentAlgebra {
    type Expr = RationalFn;

    fn symbol(&self, s: Symbol) -> RationalFn {
        RationalFn::symbol(s)
    }

    fn one(&self) -> RationalFn {
        RationalFn::one()
    }

    fn mul(&self, a: &RationalFn, b: &RationalFn) -> RationalFn {
        a.mul(b)
    }

    fn add(&self, a: &RationalFn, b: &RationalFn) -> RationalFn {
        a.add(b)
    }

    fn div(&self, num: &RationalFn, den: &RationalFn) -> Result<RationalFn> {
        num.div(den).ok_or_else(|| ClusterError::SingularExpression {
            context: format!("({num}) / ({den})"),
        })
    }

    fn substitute(&self, expr: &RationalFn, s: Symbol, value: &RationalFn) -> Result<RationalFn> {
        expr.substitute(s, value)
            .ok_or_else(|| ClusterError::SingularExpression {
                context: format!("{s} -> {value} in {expr}"),
            })
    }

    fn simplify(&self, expr: &RationalFn) -> RationalFn {
        expr.clone().simplify()
    }

    fn expand_numerator(&self, expr: &RationalFn) -> RationalFn {
        expr.clone()
    }

    fn pow(&self, base: &RationalFn, exp: u32) -> RationalFn {
        base.pow(exp)
    }
}
