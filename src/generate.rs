use num::BigUint;
use rand::Rng;

use crate::{
    capacity,
    error::{Error, Result},
    formula::{Formula, Instance},
    log::{debug, info, trace},
    params::Dimensions,
    sample::{dependencies, ClauseSampler},
};

enum State {
    Accumulating,
    Done,
}

/// Collects distinct random clauses until the requested number is reached.
pub struct FormulaBuilder {
    sampler: ClauseSampler,
    target: usize,
    max_draws: Option<u64>,
    clauses: Formula,
    draws: u64,
}

impl FormulaBuilder {
    /// `capacity` is the number of distinct clauses `sampler` can produce; it must
    /// be at least `target`.
    pub fn new(sampler: ClauseSampler, target: usize, capacity: &BigUint) -> Self {
        assert!(
            BigUint::from(target) <= *capacity,
            "{target} clauses requested but only {capacity} exist"
        );
        FormulaBuilder {
            sampler,
            target,
            max_draws: None,
            clauses: Formula::with_capacity(target),
            draws: 0,
        }
    }

    /// Fail instead of drawing more than `limit` clauses.
    pub fn max_draws(mut self, limit: Option<u64>) -> Self {
        self.max_draws = limit;
        self
    }

    fn state(&self) -> State {
        if self.clauses.len() == self.target {
            State::Done
        } else {
            State::Accumulating
        }
    }

    fn step<R: Rng>(&mut self, rng: &mut R) -> Result<()> {
        if self.max_draws.is_some_and(|limit| self.draws >= limit) {
            return Err(Error::Stalled {
                draws: self.draws,
                accepted: self.clauses.len(),
                requested: self.target,
            });
        }
        self.draws += 1;
        let clause = self.sampler.sample(rng);
        if !self.clauses.insert(clause) {
            trace!("rejected duplicate clause at draw {}", self.draws);
        }
        Ok(())
    }

    pub fn build<R: Rng>(mut self, rng: &mut R) -> Result<Formula> {
        while let State::Accumulating = self.state() {
            self.step(rng)?;
        }
        debug!(
            "{} clauses after {} draws ({} duplicates)",
            self.clauses.len(),
            self.draws,
            self.draws - self.clauses.len() as u64
        );
        Ok(self.clauses)
    }
}

/// Runs the whole pipeline for already sampled dimensions: feasibility gate,
/// dependency sets, then clauses.
pub fn generate<R: Rng>(
    rng: &mut R,
    dims: &Dimensions,
    max_draws: Option<u64>,
) -> Result<Instance> {
    dims.validate()?;
    let space = capacity::check(dims)?;

    let deps = dependencies(rng, dims.universals, dims.existentials, dims.dependencies);
    let sampler = ClauseSampler::new(
        dims.universals,
        dims.universal_width,
        dims.existentials,
        dims.existential_width,
    );
    let clauses =
        FormulaBuilder::new(sampler, dims.clauses, &space).max_draws(max_draws).build(rng)?;
    info!(
        "generated {} clauses over {} universal and {} existential variables",
        clauses.len(),
        dims.universals,
        dims.existentials
    );

    Ok(Instance::new(dims.universals, dims.existentials, deps, clauses))
}
