//! Atoms and their allocation.

/// Opaque identifier used as element of expressions.
pub type Atom = u64;

/// Issuer of fresh atoms.
///
/// Every atom returned by [`Allocator::fresh`] is strictly greater than
/// the seed and than every atom returned before.
///
/// ~~~
/// # use setreplace::Allocator;
/// let mut atoms = Allocator::seeded(&[3, 7, 2]);
/// assert_eq!(atoms.fresh(), 8);
/// assert_eq!(atoms.fresh(), 9);
/// assert_eq!(Allocator::seeded(&[]).fresh(), 1);
/// ~~~
#[derive(Clone, Debug, Default)]
pub struct Allocator {
    last: Atom,
}

impl Allocator {
    /// Create an allocator whose first fresh atom is `seed + 1`.
    pub fn new(seed: Atom) -> Self {
        Self { last: seed }
    }

    /// Create an allocator that never returns any of the given atoms.
    pub fn seeded<'a>(atoms: impl IntoIterator<Item = &'a Atom>) -> Self {
        Self::new(atoms.into_iter().copied().max().unwrap_or(0))
    }

    /// Return a new atom.
    pub fn fresh(&mut self) -> Atom {
        self.last = match self.last.checked_add(1) {
            Some(next) => next,
            None => panic!("atom space exhausted"),
        };
        self.last
    }

    /// Return the greatest atom that was returned or excluded so far.
    pub fn last(&self) -> Atom {
        self.last
    }
}
