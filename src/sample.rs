use rand::{seq::index, Rng};

use crate::{
    formula::{Clause, DependencyMap, Lit, Var},
    params::Width,
};

/// A contiguous block of variables `first..first + len`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pool {
    first: usize,
    len: usize,
}

impl Pool {
    pub fn universal(u: usize) -> Self {
        Pool { first: 1, len: u }
    }

    pub fn existential(u: usize, x: usize) -> Self {
        Pool { first: u + 1, len: x }
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, v: Var) -> bool {
        self.first <= v.0 && v.0 < self.first + self.len
    }

    pub fn vars(&self) -> impl Iterator<Item = Var> {
        (self.first..self.first + self.len).map(Var)
    }

    fn var(&self, i: usize) -> Var {
        Var(self.first + i)
    }

    /// `k` distinct variables, uniform over all `C(len, k)` choices.
    pub fn choose<R: Rng>(&self, rng: &mut R, k: usize) -> Vec<Var> {
        index::sample(rng, self.len, k).into_iter().map(|i| self.var(i)).collect()
    }

    /// Every variable independently with probability 1/2; may be empty.
    pub fn any_subset<R: Rng>(&self, rng: &mut R) -> Vec<Var> {
        (0..self.len).filter(|_| rng.gen()).map(|i| self.var(i)).collect()
    }

    /// A subset that always contains at least one variable, uniform over all
    /// `2^len - 1` of them.
    ///
    /// The lowest selected position is the first heads in a run of fair coin
    /// flips (rerun if every flip is tails); each later position is then
    /// taken with probability 1/2.
    pub fn nonempty_subset<R: Rng>(&self, rng: &mut R) -> Vec<Var> {
        assert!(!self.is_empty(), "cannot draw a nonempty subset of an empty pool");
        let lowest = loop {
            if let Some(t) = (0..self.len).find(|_| rng.gen()) {
                break t;
            }
        };
        std::iter::once(lowest)
            .chain((lowest + 1..self.len).filter(|_| rng.gen()))
            .map(|i| self.var(i))
            .collect()
    }

    pub fn subset<R: Rng>(&self, rng: &mut R, width: Width) -> Vec<Var> {
        match width {
            Width::Fixed(k) => self.choose(rng, k),
            Width::Free => self.any_subset(rng),
        }
    }
}

/// Draws the dependency set of every existential variable.
pub fn dependencies<R: Rng>(rng: &mut R, u: usize, x: usize, d: Width) -> DependencyMap {
    let universals = Pool::universal(u);
    Pool::existential(u, x)
        .vars()
        .map(|xvar| {
            let mut deps = universals.subset(rng, d);
            deps.sort_unstable();
            (xvar, deps)
        })
        .collect()
}

/// Shape constraints of a random clause.
#[derive(Clone, Copy, Debug)]
pub struct ClauseSampler {
    universals: Pool,
    existentials: Pool,
    universal_width: Width,
    existential_width: Width,
}

impl ClauseSampler {
    pub fn new(u: usize, v: Width, x: usize, w: Width) -> Self {
        debug_assert!(x > 0);
        debug_assert!(v.fixed().map_or(true, |v| v <= u));
        debug_assert!(w.fixed().map_or(true, |w| 0 < w && w <= x));
        ClauseSampler {
            universals: Pool::universal(u),
            existentials: Pool::existential(u, x),
            universal_width: v,
            existential_width: w,
        }
    }

    /// Picks the variables first, then one sign per variable.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Clause {
        let mut vars = self.universals.subset(rng, self.universal_width);
        vars.extend(match self.existential_width {
            Width::Fixed(k) => self.existentials.choose(rng, k),
            Width::Free => self.existentials.nonempty_subset(rng),
        });
        Clause::new(vars.into_iter().map(|v| Lit::new(v, rng.gen())).collect())
    }
}
