use num::{integer::binomial, BigUint, One};

use crate::{
    error::{Error, Result},
    log::{info, warn},
    params::{Dimensions, Width},
};

/// Clause shapes over a pool of `n` variables: `C(n, k) 2^k` for a fixed width
/// `k`, `3^n` when every variable may be absent, positive or negative.
fn shapes(n: usize, width: Width) -> BigUint {
    match width {
        Width::Fixed(k) => binomial(BigUint::from(n), BigUint::from(k)) << k,
        Width::Free => num::pow(BigUint::from(3u32), n),
    }
}

pub fn universal_shapes(u: usize, v: Width) -> BigUint {
    shapes(u, v)
}

/// Like [`universal_shapes`], without the empty existential side.
pub fn existential_shapes(x: usize, w: Width) -> BigUint {
    match w {
        Width::Fixed(0) => BigUint::default(),
        Width::Fixed(_) => shapes(x, w),
        Width::Free => shapes(x, w) - BigUint::one(),
    }
}

/// Number of distinct clauses the clause sampler can produce.
pub fn capacity(u: usize, v: Width, x: usize, w: Width) -> BigUint {
    universal_shapes(u, v) * existential_shapes(x, w)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feasibility {
    Feasible,
    /// More than half of all clauses are requested.
    NearCapacity,
    Infeasible,
}

pub fn feasibility(requested: usize, capacity: &BigUint) -> Feasibility {
    let m = BigUint::from(requested);
    if &m > capacity {
        Feasibility::Infeasible
    } else if m << 1 > *capacity {
        Feasibility::NearCapacity
    } else {
        Feasibility::Feasible
    }
}

/// Rejects requests that cannot be met and warns about those close to the limit.
pub fn check(dims: &Dimensions) -> Result<BigUint> {
    let p =
        capacity(dims.universals, dims.universal_width, dims.existentials, dims.existential_width);
    info!("{} distinct clauses available, {} requested", p, dims.clauses);
    match feasibility(dims.clauses, &p) {
        Feasibility::Infeasible => {
            return Err(Error::Infeasible { requested: dims.clauses, capacity: p });
        }
        Feasibility::NearCapacity => warn!(
            "requesting {} of {} possible clauses; sampling will be slow and the \
             formula will vary little",
            dims.clauses,
            p
        ),
        Feasibility::Feasible => {}
    }
    Ok(p)
}
