//! Index from atoms to the active expressions containing them.

use crate::{Atom, ExpressionId};
use im::{OrdMap, OrdSet};

/// Immutable HashMap for fast cloning of indices.
type FnvHashMap<K, V> = im::hashmap::HashMap<K, V, fnv::FnvBuildHasher>;

/// Active expressions by contained atom and by arity.
///
/// This allows the matcher to consider only expressions that
/// share an atom with the current partial match,
/// instead of scanning all active expressions for every pattern.
/// All sets iterate in increasing expression ID order.
#[derive(Clone, Debug, Default)]
pub struct AtomIndex {
    atoms: FnvHashMap<Atom, OrdSet<ExpressionId>>,
    arities: OrdMap<usize, OrdSet<ExpressionId>>,
}

impl AtomIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an active expression with the given atoms.
    pub fn add(&mut self, id: ExpressionId, atoms: &[Atom]) {
        for atom in atoms {
            self.atoms
                .entry(*atom)
                .or_insert_with(OrdSet::new)
                .insert(id);
        }
        self.arities
            .entry(atoms.len())
            .or_insert_with(OrdSet::new)
            .insert(id);
    }

    /// Unregister an expression previously registered with the same atoms.
    pub fn remove(&mut self, id: ExpressionId, atoms: &[Atom]) {
        for atom in atoms {
            if let Some(ids) = self.atoms.get_mut(atom) {
                ids.remove(&id);
                if ids.is_empty() {
                    self.atoms.remove(atom);
                }
            }
        }
        if let Some(ids) = self.arities.get_mut(&atoms.len()) {
            ids.remove(&id);
            if ids.is_empty() {
                self.arities.remove(&atoms.len());
            }
        }
    }

    /// Return the active expressions containing the atom.
    pub fn containing(&self, atom: Atom) -> Option<&OrdSet<ExpressionId>> {
        self.atoms.get(&atom)
    }

    /// Return the active expressions with the given number of atoms.
    pub fn with_arity(&self, arity: usize) -> Option<&OrdSet<ExpressionId>> {
        self.arities.get(&arity)
    }
}

#[test]
fn incremental() {
    use alloc::vec::Vec;
    let ids = |set: Option<&OrdSet<ExpressionId>>| -> Vec<ExpressionId> {
        set.map(|s| s.iter().copied().collect()).unwrap_or_default()
    };

    let mut index = AtomIndex::new();
    index.add(0, &[1, 2]);
    index.add(1, &[2, 2]);
    index.add(2, &[2, 3, 4]);
    assert_eq!(ids(index.containing(2)), [0, 1, 2]);
    assert_eq!(ids(index.with_arity(2)), [0, 1]);

    index.remove(1, &[2, 2]);
    assert_eq!(ids(index.containing(2)), [0, 2]);
    assert_eq!(ids(index.with_arity(2)), [0]);

    index.remove(0, &[1, 2]);
    assert!(index.containing(1).is_none());
    assert!(index.with_arity(2).is_none());
    assert_eq!(ids(index.with_arity(3)), [2]);
}
