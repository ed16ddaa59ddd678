use std::fmt::Display;

use indexmap::{IndexMap, IndexSet};

/// A variable id. Universals are numbered `1..=u`, existentials `u+1..=u+x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Var(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Lit {
    var: Var,
    negative: bool,
}

impl Lit {
    pub fn new(var: Var, positive: bool) -> Self {
        Lit { var, negative: !positive }
    }

    pub fn var(&self) -> Var {
        self.var
    }
}

/// A disjunction of literals over pairwise distinct variables.
///
/// Literals are kept sorted by variable, so two clauses built from the same
/// literals in any order are equal and hash alike.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Clause(Vec<Lit>);

impl Clause {
    pub fn new(mut lits: Vec<Lit>) -> Self {
        lits.sort_unstable();
        debug_assert!(lits.windows(2).all(|w| w[0].var != w[1].var));
        Clause(lits)
    }

    pub fn lits(&self) -> &[Lit] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub type Formula = IndexSet<Clause>;

/// Universal variables each existential may depend on, ascending by existential.
pub type DependencyMap = IndexMap<Var, Vec<Var>>;

#[derive(Debug)]
pub struct Instance {
    universals: usize,
    existentials: usize,
    deps: DependencyMap,
    clauses: Formula,
}

impl Instance {
    pub(crate) fn new(
        universals: usize,
        existentials: usize,
        deps: DependencyMap,
        clauses: Formula,
    ) -> Self {
        debug_assert_eq!(deps.len(), existentials);
        Instance { universals, existentials, deps, clauses }
    }

    pub fn num_vars(&self) -> usize {
        self.universals + self.existentials
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn universals(&self) -> impl Iterator<Item = Var> {
        (1..=self.universals).map(Var)
    }

    pub fn existentials(&self) -> impl Iterator<Item = Var> {
        (self.universals + 1..=self.universals + self.existentials).map(Var)
    }

    pub fn is_universal(&self, v: Var) -> bool {
        1 <= v.0 && v.0 <= self.universals
    }

    pub fn is_existential(&self, v: Var) -> bool {
        self.universals < v.0 && v.0 <= self.num_vars()
    }

    pub fn dependencies(&self) -> &DependencyMap {
        &self.deps
    }

    pub fn clauses(&self) -> &Formula {
        &self.clauses
    }

    /// Existentials with an empty dependency set.
    pub fn independent(&self) -> Vec<Var> {
        self.deps.iter().filter(|(_, d)| d.is_empty()).map(|(x, _)| *x).collect()
    }
}

impl Display for Var {
    fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for Lit {
    fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
        if self.negative {
            write!(f, "-{}", self.var)
        } else {
            write!(f, "{}", self.var)
        }
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
        for l in &self.0 {
            write!(f, "{} ", l)?;
        }
        write!(f, "0")
    }
}
