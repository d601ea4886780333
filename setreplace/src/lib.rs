#![no_std]
#![forbid(unsafe_code)]

//! Hypergraph evolution by set rewriting.
//!
//! This library evolves a set of *expressions*, being tuples of *atoms*,
//! by repeatedly applying *rules*.
//! A rule consists of input patterns and output patterns.
//! An *event* applies a rule by finding expressions that match its inputs,
//! consuming these expressions, and
//! creating new expressions from the outputs.
//! Variables that occur only in outputs are bound to fresh atoms.
//! This is the generative engine behind Wolfram model evolution.
//!
//! # Usage
//!
//! The following example evolves a set of two expressions by one rule.
//! The rule is read from a string by the parser in [`setreplace_parse`].
//!
//! ~~~
//! # use setreplace::{Error, Set, scope::Problem};
//! use setreplace_parse::CmdIter;
//! let cmds = "
//!     rule {x, y}, {x, z} -> {x, z}, {x, w}, {y, w}, {z, w}.
//!     init {1, 1}, {1, 1}.
//! ";
//! let cmds = CmdIter::new(cmds).map(|cmd| cmd.unwrap());
//! let mut set: Set = Problem::from_commands(cmds)?.into_set(Default::default());
//!
//! assert_eq!(set.replace_n(2), 2);
//! assert_eq!(set.expressions().len(), 2 + 2 * 2);
//! # Ok::<_, Error>(())
//! ~~~
//!
//! # Organisation
//!
//! The state of an evolution consists of
//! a [`Store`] holding all expressions ever created,
//! an [`AtomIndex`] from atoms to the active expressions containing them,
//! an [`Allocator`] for fresh atoms, and
//! the sequence of [`Event`]s applied so far.
//! These are combined in an [`Evolution`], which finds matches via
//! [`Matches`] and commits events.
//! A [`Set`] pairs an evolution with its rules and [`Config`].
//!
//! Matching is deterministic:
//! rules are tried in the order in which they are given, and
//! for every rule, the inputs are matched in the order given by
//! [`Rule::order`] against expressions in increasing ID order.
//! Therefore, two evolutions from the same rules and
//! initial expressions yield the same events.

extern crate alloc;
#[macro_use]
extern crate log;

mod atom;
mod config;
pub mod error;
mod event;
mod expression;
mod index;
mod matching;
pub mod pattern;
pub mod rule;
pub mod scope;
mod set;
pub mod store;

pub use atom::{Allocator, Atom};
pub use config::Config;
pub use error::Error;
pub use event::{Event, Evolution};
pub use expression::{EventId, Expression, ExpressionId, Generation, INITIAL_EVENT};
pub use index::AtomIndex;
pub use matching::{Match, Matches};
pub use pattern::{Pattern, PatternAtom, Var};
pub use rule::Rule;
pub use set::Set;
pub use store::Store;
