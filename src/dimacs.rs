use std::io::{self, Write};

use crate::formula::{Instance, Var};

fn write_vars<W: Write>(
    out: &mut W,
    prefix: &str,
    vars: impl IntoIterator<Item = Var>,
) -> io::Result<()> {
    write!(out, "{prefix}")?;
    for v in vars {
        write!(out, " {v}")?;
    }
    writeln!(out, " 0")
}

/// Writes `inst` in the DQDIMACS dialect read by DQBF solvers.
///
/// Existentials without dependencies get a plain `e` line, unless every
/// existential is independent, in which case neither `e` nor `a` is written.
pub fn write_instance<W: Write>(out: &mut W, inst: &Instance) -> io::Result<()> {
    writeln!(out, "p cnf {} {}", inst.num_vars(), inst.num_clauses())?;

    let independent = inst.independent();
    let all_independent = independent.len() == inst.dependencies().len();
    if !independent.is_empty() && !all_independent {
        write_vars(out, "e", independent)?;
    }
    if inst.universals().next().is_some() && !all_independent {
        write_vars(out, "a", inst.universals())?;
    }

    for (xvar, deps) in inst.dependencies() {
        if !deps.is_empty() {
            write_vars(out, &format!("d {xvar}"), deps.iter().copied())?;
        }
    }

    for c in inst.clauses() {
        writeln!(out, "{c}")?;
    }
    Ok(())
}
