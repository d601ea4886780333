//! Expressions and the events that create and destroy them.

use crate::Atom;
use alloc::vec::Vec;
use core::fmt::{self, Display};

/// Position of an expression in the order of creation.
pub type ExpressionId = usize;

/// Sequence number of an event.
pub type EventId = usize;

/// Length of the longest chain of events that led to an expression.
pub type Generation = usize;

/// The pseudo-event that creates the initial expressions.
pub const INITIAL_EVENT: EventId = 0;

/// Tuple of atoms, together with its lifecycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expression {
    pub atoms: Vec<Atom>,
    pub created_by: EventId,
    /// event that consumed the expression, if any
    pub destroyed_by: Option<EventId>,
    pub generation: Generation,
}

impl Expression {
    /// Return true if no event consumed the expression yet.
    pub fn is_active(&self) -> bool {
        self.destroyed_by.is_none()
    }

    pub fn arity(&self) -> usize {
        self.atoms.len()
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        setreplace_parse::cmd::format(core::slice::from_ref(&self.atoms), f)
    }
}
