//! Parser for hypergraph rewriting rules and initial states.
//!
//! A file consists of commands, each terminated by a period.
//! A `rule` command introduces a rewriting rule that
//! replaces tuples matching its left-hand side by its right-hand side.
//! An `init` command adds tuples to the initial state.
//! Identifiers are pattern variables and numbers are literal atoms.
//!
//! Example usage:
//!
//! ~~~
//! use setreplace_parse::{CmdIter, Command, Error};
//!
//! let cmds = "rule {x, y}, {y, z} -> {x, z}, {z, w}. init {1, 2}, {2, 3}.";
//! let cmds: Result<Vec<_>, _> = CmdIter::new(cmds).collect();
//! let cmds = cmds?;
//! assert_eq!(cmds.len(), 2);
//! assert!(matches!(&cmds[1], Command::Init(tuples) if tuples.len() == 2));
//! # Ok::<_, Error>(())
//! ~~~
#![no_std]

extern crate alloc;

pub mod cmd;
mod cmditer;
pub mod lex;

pub use cmd::{Command, Elem, Error, Rule, Tuple};
pub use cmditer::CmdIter;
pub use lex::Token;

use logos::Logos;

/// Lex a string, omitting whitespace and comments.
pub fn lex(s: &str) -> impl Iterator<Item = Token<'_>> {
    Token::lexer(s).filter(|token| *token != Token::Space)
}
