//! Storage of all expressions ever created.

use crate::{Atom, EventId, Expression, ExpressionId, Generation};
use alloc::vec::Vec;
use im::{OrdSet, Vector};

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// the expression was already consumed by the given event
    AlreadyDestroyed(ExpressionId, EventId),
    Unknown(ExpressionId),
}

/// Expressions in order of creation, tagged with their lifecycle.
///
/// Expressions are never removed from the store;
/// consuming an expression only marks it as inactive.
/// The store is built from persistent collections,
/// making its cloning cheap.
#[derive(Clone, Debug, Default)]
pub struct Store {
    exprs: Vector<Expression>,
    active: OrdSet<ExpressionId>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an active expression created by the given event and return its ID.
    pub fn add(&mut self, atoms: Vec<Atom>, event: EventId, generation: Generation) -> ExpressionId {
        let id = self.exprs.len();
        self.exprs.push_back(Expression {
            atoms,
            created_by: event,
            destroyed_by: None,
            generation,
        });
        self.active.insert(id);
        id
    }

    /// Mark an expression as consumed by the given event.
    pub fn deactivate(&mut self, id: ExpressionId, event: EventId) -> Result<(), Error> {
        let expr = self.exprs.get_mut(id).ok_or(Error::Unknown(id))?;
        if let Some(by) = expr.destroyed_by {
            return Err(Error::AlreadyDestroyed(id, by));
        }
        expr.destroyed_by = Some(event);
        self.active.remove(&id);
        Ok(())
    }

    /// Return the IDs of all active expressions in increasing order.
    pub fn active_ids(&self) -> impl Iterator<Item = ExpressionId> + '_ {
        self.active.iter().copied()
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn is_active(&self, id: ExpressionId) -> bool {
        self.active.contains(&id)
    }

    pub fn get(&self, id: ExpressionId) -> Option<&Expression> {
        self.exprs.get(id)
    }

    pub fn tuple(&self, id: ExpressionId) -> Option<&[Atom]> {
        self.get(id).map(|expr| &expr.atoms[..])
    }

    /// Return all expressions, including inactive ones, in order of creation.
    pub fn iter(&self) -> impl Iterator<Item = (ExpressionId, &Expression)> {
        self.exprs.iter().enumerate()
    }

    /// Return the number of expressions ever added.
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}

impl core::ops::Index<ExpressionId> for Store {
    type Output = Expression;

    fn index(&self, id: ExpressionId) -> &Self::Output {
        &self.exprs[id]
    }
}

#[test]
fn lifecycle() {
    use alloc::vec;

    let mut store = Store::new();
    let a = store.add(vec![1, 2], 0, 0);
    let b = store.add(vec![2, 3], 0, 0);
    assert_eq!((a, b), (0, 1));
    assert_eq!(store.active_ids().collect::<Vec<_>>(), [0, 1]);

    assert_eq!(store.deactivate(a, 1), Ok(()));
    assert!(!store.is_active(a));
    assert_eq!(store[a].destroyed_by, Some(1));
    assert_eq!(store.active_ids().collect::<Vec<_>>(), [1]);
    assert_eq!(store.active_len(), 1);

    // history remains queryable
    assert_eq!(store.tuple(a), Some(&[1, 2][..]));
    assert_eq!(store.len(), 2);

    let c = store.add(vec![1, 3], 1, 1);
    assert_eq!(c, 2);
    assert_eq!(store.active_ids().collect::<Vec<_>>(), [1, 2]);
}

#[test]
fn double_consumption() {
    let mut store = Store::new();
    let a = store.add(alloc::vec![1], 0, 0);
    store.deactivate(a, 1).unwrap();
    assert_eq!(store.deactivate(a, 2), Err(Error::AlreadyDestroyed(a, 1)));
    // the first consumer is retained
    assert_eq!(store[a].destroyed_by, Some(1));
    assert_eq!(store.deactivate(5, 2), Err(Error::Unknown(5)));
}
