//! Mutation-chain elimination: express the cluster variable of a target arc
//! in the initial cluster.
//!
//! Purpose
//! - Walk the diagonals crossed by the arc between two frozen edges, flipping
//!   each in turn on a private snapshot. Every flip records its exchange
//!   relation `x_old * x_new = Π x_i^{b_ik>0} + Π x_i^{-b_ik>0}` read off the
//!   current exchange matrix, and the solved form `x_new = (...) / x_old`.
//! - Back-substitute so every solved form mentions only initial and
//!   lamination symbols; the last one is the target variable.
//!
//! Why this design
//! - The engine's live state is never touched: the chain runs on a clone and
//!   the final snapshot is handed back with the result.
//! - The algebra is a parameter (`ExchangeAlgebra`); `express_target` uses the
//!   built-in exact `LaurentAlgebra`.

use std::fmt;

use tracing::debug;

use crate::error::{ClusterError, Result};
use crate::quiver::Quiver;
use crate::symbolic::{ExchangeAlgebra, LaurentAlgebra, RationalFn, Symbol};
use crate::topology::Edge;

/// `old * new = positive + negative` for one flip of the chain.
#[derive(Clone, Debug)]
pub struct ExchangeRelation<E> {
    /// 0-based slot that was flipped.
    pub slot: usize,
    /// Diagonal before the flip.
    pub edge: Edge,
    pub old: Symbol,
    pub new: Symbol,
    pub positive: E,
    pub negative: E,
    pub rhs: E,
}

impl<E: fmt::Display> fmt::Display for ExchangeRelation<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}*{} = {}", self.old, self.new, self.rhs)
    }
}

/// `lhs = rhs` with `lhs` a freshly created mutable symbol.
#[derive(Clone, Debug)]
pub struct Expression<E> {
    pub lhs: Symbol,
    pub rhs: E,
}

impl<E: fmt::Display> fmt::Display for Expression<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}

/// Result of `express_target`; both lists follow the flip order.
#[derive(Clone, Debug)]
pub struct Elimination<E> {
    pub relations: Vec<ExchangeRelation<E>>,
    /// Solved forms in initial and lamination symbols only.
    pub expressions: Vec<Expression<E>>,
    /// Snapshot after all flips.
    pub quiver: Quiver,
}

impl<E> Elimination<E> {
    /// Expression of the target arc's variable; `None` when the arc crosses
    /// no diagonal.
    pub fn target(&self) -> Option<&Expression<E>> {
        self.expressions.last()
    }
}

impl Quiver {
    /// Express the variable of the arc between frozen edges `start` and `end`
    /// with the built-in exact algebra.
    pub fn express_target(&self, start: usize, end: usize) -> Result<Elimination<RationalFn>> {
        self.express_target_with(&LaurentAlgebra, start, end)
    }

    /// As `express_target`, over any `ExchangeAlgebra`.
    pub fn express_target_with<A: ExchangeAlgebra>(
        &self,
        alg: &A,
        start: usize,
        end: usize,
    ) -> Result<Elimination<A::Expr>> {
        let n = self.n();
        if start == end || start >= n || end >= n {
            return Err(ClusterError::InvalidPath { start, end, n });
        }
        let mut q = self.snapshot();
        let path = q.crossing_clusters(start, end)?;
        debug!(start, end, flips = path.len(), "express target");

        let mut relations = Vec::with_capacity(path.len());
        let mut expressions: Vec<Expression<A::Expr>> = Vec::with_capacity(path.len());
        for edge in path {
            let slot = q.slot_of(edge)?;
            let b = q.exchange_matrix();
            let mut pos = Vec::new();
            let mut neg = Vec::new();
            for (label, v) in b.column(slot) {
                let power = (q.variable(label)?, v.unsigned_abs() as u32);
                match v.signum() {
                    1 => pos.push(power),
                    -1 => neg.push(power),
                    _ => {}
                }
            }
            let positive = alg.product(pos);
            let negative = alg.product(neg);
            let rhs = alg.add(&positive, &negative);
            let flips = q.flip_count(slot).unwrap_or(0);
            let old = Symbol::mutable(slot + 1, flips);
            let new = Symbol::mutable(slot + 1, flips + 1);
            let solved = alg.div(&rhs, &alg.symbol(old))?;
            debug!(slot = slot + 1, %edge, "exchange {old}*{new} = {rhs}");
            expressions.push(Expression {
                lhs: new,
                rhs: solved,
            });
            relations.push(ExchangeRelation {
                slot,
                edge,
                old,
                new,
                positive,
                negative,
                rhs,
            });
            q.flip(edge)?;
        }

        for i in 0..expressions.len() {
            let (done, rest) = expressions.split_at_mut(i);
            let cur = &mut rest[0];
            for prev in done.iter() {
                let substituted = alg.substitute(&cur.rhs, prev.lhs, &prev.rhs)?;
                cur.rhs = alg.simplify(&substituted);
            }
        }
        for e in &mut expressions {
            e.rhs = alg.expand_numerator(&e.rhs);
        }
        Ok(Elimination {
            relations,
            expressions,
            quiver: q,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiver::rand::{random_flips, ReplayToken};
    use crate::quiver::QuiverCfg;
    use proptest::prelude::*;

    #[test]
    fn pentagon_single_flip_is_a_ptolemy_relation() {
        let q = Quiver::new(5).unwrap();
        let elim = q.express_target(0, 2).unwrap();
        assert_eq!(elim.relations.len(), 1);
        assert_eq!(elim.relations[0].to_string(), "x_{1}*x_{1'} = x_{2} + 1");
        assert_eq!(elim.relations[0].edge, Edge::new(0, 2));
        assert_eq!(
            elim.target().unwrap().to_string(),
            "x_{1'} = (x_{2} + 1)/x_{1}"
        );
    }

    #[test]
    fn pentagon_chain_back_substitutes_to_initial_variables() {
        let q = Quiver::new(5).unwrap();
        let elim = q.express_target(0, 3).unwrap();
        let rels: Vec<String> = elim.relations.iter().map(|r| r.to_string()).collect();
        assert_eq!(
            rels,
            vec!["x_{1}*x_{1'} = x_{2} + 1", "x_{2}*x_{2'} = x_{1'} + 1"]
        );
        let exprs: Vec<String> = elim.expressions.iter().map(|e| e.to_string()).collect();
        assert_eq!(
            exprs,
            vec![
                "x_{1'} = (x_{2} + 1)/x_{1}",
                "x_{2'} = (x_{1} + x_{2} + 1)/(x_{1}*x_{2})"
            ]
        );
        assert!(elim.expressions.iter().all(|e| e.rhs.is_laurent()));
    }

    #[test]
    fn live_quiver_is_untouched_and_snapshot_matches_direct_flips() {
        let q = Quiver::new(5).unwrap();
        let before = q.clone();
        let elim = q.express_target(0, 3).unwrap();
        assert_eq!(q, before);

        let mut direct = q.clone();
        direct.flip((0, 2)).unwrap();
        direct.flip((0, 3)).unwrap();
        assert_eq!(elim.quiver, direct);
        assert_eq!(elim.quiver.exchange_matrix(), direct.exchange_matrix());
        assert_eq!(elim.quiver.clusters(), &[Edge::new(1, 3), Edge::new(1, 4)]);
    }

    #[test]
    fn square_relation_has_empty_products() {
        let q = Quiver::new(4).unwrap();
        let elim = q.express_target(0, 2).unwrap();
        assert_eq!(elim.relations[0].to_string(), "x_{1}*x_{1'} = 2");
        assert_eq!(elim.target().unwrap().rhs.to_string(), "2/x_{1}");
    }

    #[test]
    fn arcs_crossing_nothing_give_empty_results() {
        let q = Quiver::new(6).unwrap();
        let elim = q.express_target(0, 1).unwrap();
        assert!(elim.relations.is_empty());
        assert!(elim.target().is_none());
        assert_eq!(elim.quiver, q);
    }

    #[test]
    fn invalid_paths_are_rejected() {
        let q = Quiver::new(5).unwrap();
        for (s, e) in [(2, 2), (0, 5), (7, 1)] {
            assert_eq!(
                q.express_target(s, e).unwrap_err(),
                ClusterError::InvalidPath { start: s, end: e, n: 5 }
            );
        }
    }

    #[test]
    fn principal_coefficients_appear_in_relations() {
        let q = QuiverCfg {
            n: 5,
            principal: true,
            ..QuiverCfg::default()
        }
        .build()
        .unwrap();
        let elim = q.express_target(0, 2).unwrap();
        assert_eq!(
            elim.relations[0].to_string(),
            "x_{1}*x_{1'} = x_{2} + u_{1}"
        );
    }

    #[test]
    fn concurrent_queries_on_a_shared_quiver() {
        let q = Quiver::new(7).unwrap();
        let arcs = [(0, 3), (1, 5), (2, 6), (0, 5)];
        let sequential: Vec<String> = arcs
            .iter()
            .map(|&(s, e)| q.express_target(s, e).unwrap().target().unwrap().to_string())
            .collect();
        let parallel: Vec<String> = std::thread::scope(|scope| {
            let handles: Vec<_> = arcs
                .iter()
                .map(|&(s, e)| {
                    let q = &q;
                    scope.spawn(move || {
                        q.express_target(s, e).unwrap().target().unwrap().to_string()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(sequential, parallel);
    }

    /// Records operations as strings.
    struct Transcript;

    impl ExchangeAlgebra for Transcript {
        type Expr = String;
        fn symbol(&self, s: Symbol) -> String {
            s.to_string()
        }
        fn one(&self) -> String {
            "1".into()
        }
        fn mul(&self, a: &String, b: &String) -> String {
            match (a.as_str(), b.as_str()) {
                ("1", _) => b.clone(),
                (_, "1") => a.clone(),
                _ => format!("{a}*{b}"),
            }
        }
        fn add(&self, a: &String, b: &String) -> String {
            format!("({a} + {b})")
        }
        fn div(&self, num: &String, den: &String) -> Result<String> {
            Ok(format!("{num}/{den}"))
        }
        fn substitute(&self, expr: &String, s: Symbol, value: &String) -> Result<String> {
            Ok(expr.replace(&s.to_string(), &format!("[{value}]")))
        }
        fn simplify(&self, expr: &String) -> String {
            expr.clone()
        }
        fn expand_numerator(&self, expr: &String) -> String {
            expr.clone()
        }
    }

    #[test]
    fn any_algebra_can_drive_the_chain() {
        let q = Quiver::new(5).unwrap();
        let elim = q.express_target_with(&Transcript, 0, 3).unwrap();
        assert_eq!(elim.relations[0].rhs, "(1 + x_{2})");
        assert_eq!(elim.relations[1].rhs, "(1 + x_{1'})");
        assert_eq!(
            elim.target().unwrap().rhs,
            "(1 + [(1 + x_{2})/x_{1}])/x_{2}"
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]
        #[test]
        fn expressions_are_laurent(
            n in 4usize..8,
            seed in any::<u64>(),
            s in any::<usize>(),
            e in any::<usize>(),
            principal in any::<bool>(),
        ) {
            let mut start = Quiver::new(n).unwrap();
            random_flips(&mut start, 10, ReplayToken::new(seed, 5)).unwrap();
            let q = Quiver::from_parts(n, start.clusters().to_vec(), Vec::new(), principal).unwrap();
            let (s, e) = (s % n, e % n);
            prop_assume!(s != e);
            let elim = q.express_target(s, e).unwrap();
            prop_assert_eq!(elim.relations.len(), q.crossing_clusters(s, e).unwrap().len());
            for ex in &elim.expressions {
                prop_assert!(ex.rhs.is_laurent(), "{}", ex);
            }
        }
    }
}
