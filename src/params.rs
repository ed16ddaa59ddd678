use std::{fmt::Display, str::FromStr};

use rand::Rng;

use crate::{
    error::{Error, Result},
    log::debug,
};

/// Number of variables a clause side (or dependency set) draws from its pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Width {
    Fixed(usize),
    /// Any size, each variable of the pool chosen independently.
    Free,
}

impl Width {
    pub fn fixed(&self) -> Option<usize> {
        match self {
            Width::Fixed(n) => Some(*n),
            Width::Free => None,
        }
    }

    fn map(self, f: impl FnOnce(usize) -> usize) -> Self {
        match self {
            Width::Fixed(n) => Width::Fixed(f(n)),
            Width::Free => Width::Free,
        }
    }
}

impl FromStr for Width {
    type Err = String;

    fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("free") {
            return Ok(Width::Free);
        }
        s.parse().map(Width::Fixed).map_err(|_| format!("expected an integer or `free`, got `{s}`"))
    }
}

impl Display for Width {
    fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
        match self {
            Width::Fixed(n) => write!(f, "{}", n),
            Width::Free => write!(f, "free"),
        }
    }
}

/// Concrete shape of one instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    pub universals: usize,
    pub existentials: usize,
    pub clauses: usize,
    pub universal_width: Width,
    pub existential_width: Width,
    pub dependencies: Width,
}

/// Largest count jitter may push a variable or clause count to.
pub const MAX_PARAM: usize = u32::MAX as usize;

/// Nominal parameters, each perturbed by up to `jitter` of its value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Params {
    pub nominal: Dimensions,
    pub jitter: f64,
}

impl Dimensions {
    pub fn validate(&self) -> Result<()> {
        if self.existentials == 0 {
            return Err(Error::invalid('x', "need at least one existential variable"));
        }
        if let Width::Fixed(v) = self.universal_width {
            if v > self.universals {
                return Err(Error::invalid(
                    'v',
                    format!("width {v} exceeds the {} universal variables", self.universals),
                ));
            }
        }
        if let Width::Fixed(w) = self.existential_width {
            if w == 0 {
                return Err(Error::invalid('w', "clauses need at least one existential literal"));
            }
            if w > self.existentials {
                return Err(Error::invalid(
                    'w',
                    format!("width {w} exceeds the {} existential variables", self.existentials),
                ));
            }
        }
        if let Width::Fixed(d) = self.dependencies {
            if d > self.universals {
                return Err(Error::invalid(
                    'd',
                    format!("{d} dependencies exceed the {} universal variables", self.universals),
                ));
            }
        }
        Ok(())
    }

    /// Pulls widths back inside their pools after jitter moved the pool sizes.
    fn normalize(mut self) -> Self {
        if self.existentials == 0 {
            debug!("raising existential count from 0 to 1");
            self.existentials = 1;
        }
        let (u, x) = (self.universals, self.existentials);
        let clamp = |name: &str, n: usize, lo: usize, hi: usize| {
            let c = n.clamp(lo, hi);
            if c != n {
                debug!("clamping {name} from {n} to {c}");
            }
            c
        };
        self.universal_width = self.universal_width.map(|v| clamp("universal width", v, 0, u));
        self.existential_width =
            self.existential_width.map(|w| clamp("existential width", w, 1, x));
        self.dependencies = self.dependencies.map(|d| clamp("dependency size", d, 0, u));
        self
    }
}

impl Params {
    pub fn new(nominal: Dimensions, jitter: f64) -> Result<Self> {
        if !jitter.is_finite() || jitter < 0. {
            let reason = format!("jitter must be a nonnegative number, got {jitter}");
            return Err(Error::invalid('s', reason));
        }
        nominal.validate()?;
        for (flag, p) in
            [('u', nominal.universals), ('x', nominal.existentials), ('m', nominal.clauses)]
        {
            let hi = (p as f64 * (1. + jitter)).floor();
            if hi > MAX_PARAM as f64 {
                let reason = format!("jitter {jitter} lets -{flag} {p} exceed {MAX_PARAM}");
                return Err(Error::invalid('s', reason));
            }
        }
        Ok(Params { nominal, jitter })
    }

    /// Draws the concrete dimensions of one instance.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Dimensions {
        let n = &self.nominal;
        let s = self.jitter;
        let dims = Dimensions {
            universals: sample_param(rng, n.universals, s),
            existentials: sample_param(rng, n.existentials, s),
            clauses: sample_param(rng, n.clauses, s),
            universal_width: n.universal_width.map(|v| sample_param(rng, v, s)),
            existential_width: n.existential_width.map(|w| sample_param(rng, w, s)),
            dependencies: n.dependencies.map(|d| sample_param(rng, d, s)),
        }
        .normalize();
        debug!("sampled dimensions {dims:?}");
        dims
    }
}

/// Uniform integer in `[floor(p(1-s)), floor(p(1+s))]`.
pub fn sample_param<R: Rng>(rng: &mut R, p: usize, s: f64) -> usize {
    if s == 0. {
        return p;
    }
    let lo = (p as f64 * (1. - s)).floor().max(0.) as usize;
    let hi = (p as f64 * (1. + s)).floor() as usize;
    rng.gen_range(lo..=hi)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn dims(u: usize, x: usize, m: usize, v: Width, w: Width, d: Width) -> Dimensions {
        Dimensions {
            universals: u,
            existentials: x,
            clauses: m,
            universal_width: v,
            existential_width: w,
            dependencies: d,
        }
    }

    #[test]
    fn no_jitter_is_identity() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for p in [0, 1, 7, 1000] {
            assert_eq!(sample_param(&mut rng, p, 0.), p);
        }
    }

    #[test]
    fn jitter_stays_in_band() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut seen = [false; 16];
        for _ in 0..2000 {
            let n = sample_param(&mut rng, 10, 0.5);
            assert!((5..=15).contains(&n));
            seen[n] = true;
        }
        assert!(seen[5] && seen[15]);
    }

    #[test]
    fn large_jitter_floors_at_zero() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..500 {
            assert!(sample_param(&mut rng, 4, 3.) <= 16);
        }
    }

    #[test]
    fn width_parsing() {
        assert_eq!("3".parse::<Width>(), Ok(Width::Fixed(3)));
        assert_eq!("free".parse::<Width>(), Ok(Width::Free));
        assert_eq!("FREE".parse::<Width>(), Ok(Width::Free));
        assert!("-1".parse::<Width>().is_err());
        assert!("wide".parse::<Width>().is_err());
        assert_eq!(Width::Fixed(2).to_string(), "2");
    }

    #[test]
    fn validation() {
        use Width::*;
        assert!(dims(6, 12, 50, Fixed(3), Fixed(4), Fixed(3)).validate().is_ok());
        assert!(dims(0, 3, 10, Free, Fixed(2), Free).validate().is_ok());

        let label = |d: Dimensions| match d.validate() {
            Err(Error::InvalidParameter { flag, .. }) => flag,
            r => panic!("expected invalid parameter, got {r:?}"),
        };
        assert_eq!(label(dims(6, 0, 50, Free, Free, Free)), 'x');
        assert_eq!(label(dims(2, 4, 50, Fixed(3), Free, Free)), 'v');
        assert_eq!(label(dims(2, 4, 50, Free, Fixed(0), Free)), 'w');
        assert_eq!(label(dims(2, 4, 50, Free, Fixed(5), Free)), 'w');
        assert_eq!(label(dims(2, 4, 50, Free, Free, Fixed(3))), 'd');
    }

    #[test]
    fn negative_jitter_rejected() {
        let d = dims(6, 12, 50, Width::Free, Width::Free, Width::Free);
        assert!(matches!(Params::new(d, -0.1), Err(Error::InvalidParameter { flag: 's', .. })));
        assert!(matches!(Params::new(d, f64::NAN), Err(Error::InvalidParameter { flag: 's', .. })));
    }

    #[test]
    fn huge_jitter_rejected() {
        let d = dims(6, 12, 50, Width::Fixed(3), Width::Fixed(4), Width::Fixed(3));
        assert!(matches!(Params::new(d, 1e20), Err(Error::InvalidParameter { flag: 's', .. })));
        let zero = dims(0, 1, 0, Width::Free, Width::Free, Width::Free);
        assert!(Params::new(zero, 1e20).is_err());
        assert!(Params::new(dims(0, 1, 0, Width::Free, Width::Free, Width::Free), 1e6).is_ok());
    }

    #[test]
    fn free_widths_are_not_perturbed() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let d = dims(6, 12, 50, Width::Free, Width::Free, Width::Free);
        let p = Params::new(d, 0.9).unwrap();
        for _ in 0..100 {
            let s = p.sample(&mut rng);
            assert_eq!(s.universal_width, Width::Free);
            assert_eq!(s.existential_width, Width::Free);
            assert_eq!(s.dependencies, Width::Free);
        }
    }

    #[test]
    fn sampled_dimensions_stay_valid() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let d = dims(3, 2, 10, Width::Fixed(3), Width::Fixed(2), Width::Fixed(3));
        let p = Params::new(d, 1.).unwrap();
        for _ in 0..500 {
            p.sample(&mut rng).validate().unwrap();
        }
    }
}
