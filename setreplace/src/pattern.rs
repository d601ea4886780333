//! Rewrite patterns.

use crate::Atom;
use alloc::vec::Vec;
use core::fmt::{self, Display};

/// Pattern variable.
///
/// Variables are numbered locally to their rule, starting from zero.
/// They are resolved to atoms only within a match.
pub type Var = usize;

/// Element of a pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatternAtom {
    /// matches only the given atom
    Atom(Atom),
    /// matches any atom, but all occurrences of the same variable
    /// in a rule must match the same atom
    Var(Var),
}

/// Tuple of pattern atoms.
///
/// This may be nonlinear; e.g. `{x, x}` is a valid pattern.
pub type Pattern = Vec<PatternAtom>;

impl PatternAtom {
    pub fn var(&self) -> Option<Var> {
        match self {
            Self::Var(v) => Some(*v),
            Self::Atom(_) => None,
        }
    }
}

/// Return the variables of a pattern, possibly with duplicates.
pub fn vars(pattern: &[PatternAtom]) -> impl Iterator<Item = Var> + '_ {
    pattern.iter().filter_map(PatternAtom::var)
}

impl Display for PatternAtom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Atom(a) => a.fmt(f),
            Self::Var(v) => write!(f, "v{}", v),
        }
    }
}
