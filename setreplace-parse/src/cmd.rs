//! Commands and their parsing from tokens.

use crate::Token;
use alloc::vec::Vec;
use core::fmt::{self, Display};
use core::iter::Peekable;

/// Element of a tuple.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Elem<S> {
    /// pattern variable, scoped to its rule
    Var(S),
    /// literal atom
    Atom(u64),
}

/// Sequence of elements enclosed in braces, such as `{x, 1, y}`.
pub type Tuple<S> = Vec<Elem<S>>;

/// Rewriting rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule<S> {
    /// left-hand side (tuples to match with)
    pub lhs: Vec<Tuple<S>>,
    /// right-hand side (tuples to replace with)
    pub rhs: Vec<Tuple<S>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command<S> {
    /// Add a rewriting rule
    Rule(Rule<S>),
    /// Add tuples to the initial state
    Init(Vec<Vec<u64>>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    ExpectedCmd,
    ExpectedLBrace,
    ExpectedElem,
    ExpectedAtom,
    ExpectedCommaOrRBrace,
    ExpectedCommaOrArrow,
    ExpectedCommaOrDot,
    ExpectedDot,
    AtomOverflow,
    UnknownToken,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::ExpectedCmd => "expected command",
            Self::ExpectedLBrace => "expected '{'",
            Self::ExpectedElem => "expected identifier or number",
            Self::ExpectedAtom => "expected number",
            Self::ExpectedCommaOrRBrace => "expected ',' or '}'",
            Self::ExpectedCommaOrArrow => "expected ',' or '->'",
            Self::ExpectedCommaOrDot => "expected ',' or '.'",
            Self::ExpectedDot => "expected '.'",
            Self::AtomOverflow => "number too large",
            Self::UnknownToken => "unknown token",
        };
        s.fmt(f)
    }
}

/// Take the next token, failing on tokens that could not be lexed.
fn advance<'s, I>(iter: &mut Peekable<I>) -> Result<Option<Token<'s>>, Error>
where
    I: Iterator<Item = Token<'s>>,
{
    match iter.next() {
        Some(Token::Error) => Err(Error::UnknownToken),
        next => Ok(next),
    }
}

fn nat(s: &str) -> Result<u64, Error> {
    s.parse().map_err(|_| Error::AtomOverflow)
}

impl<'s> Elem<&'s str> {
    fn parse<I>(iter: &mut Peekable<I>) -> Result<Self, Error>
    where
        I: Iterator<Item = Token<'s>>,
    {
        match advance(iter)? {
            Some(Token::Ident(s)) => Ok(Self::Var(s)),
            Some(Token::Nat(n)) => Ok(Self::Atom(nat(n)?)),
            _ => Err(Error::ExpectedElem),
        }
    }
}

/// Parse a tuple whose elements are parsed by `elem`.
fn tuple<'s, I, E>(iter: &mut Peekable<I>, elem: E) -> Result<Vec<E::Output>, Error>
where
    I: Iterator<Item = Token<'s>>,
    E: ParseElem<'s>,
{
    if advance(iter)? != Some(Token::LBrace) {
        return Err(Error::ExpectedLBrace);
    }
    let mut elems = Vec::new();
    if let Some(Token::RBrace) = iter.peek() {
        iter.next();
        return Ok(elems);
    }
    loop {
        elems.push(elem.parse(iter)?);
        match advance(iter)? {
            Some(Token::Comma) => (),
            Some(Token::RBrace) => return Ok(elems),
            _ => return Err(Error::ExpectedCommaOrRBrace),
        }
    }
}

/// Parse elements of rule tuples or of initial tuples.
trait ParseElem<'s>: Copy {
    type Output;
    fn parse<I>(self, iter: &mut Peekable<I>) -> Result<Self::Output, Error>
    where
        I: Iterator<Item = Token<'s>>;
}

#[derive(Clone, Copy)]
struct RuleElem;

#[derive(Clone, Copy)]
struct InitElem;

impl<'s> ParseElem<'s> for RuleElem {
    type Output = Elem<&'s str>;
    fn parse<I>(self, iter: &mut Peekable<I>) -> Result<Self::Output, Error>
    where
        I: Iterator<Item = Token<'s>>,
    {
        Elem::parse(iter)
    }
}

impl<'s> ParseElem<'s> for InitElem {
    type Output = u64;
    fn parse<I>(self, iter: &mut Peekable<I>) -> Result<Self::Output, Error>
    where
        I: Iterator<Item = Token<'s>>,
    {
        match advance(iter)? {
            Some(Token::Nat(n)) => nat(n),
            _ => Err(Error::ExpectedAtom),
        }
    }
}

/// Parse a nonempty comma-separated sequence of tuples,
/// returning the sequence and the token that followed it.
fn tuples<'s, I, E>(
    iter: &mut Peekable<I>,
    elem: E,
) -> Result<(Vec<Vec<E::Output>>, Option<Token<'s>>), Error>
where
    I: Iterator<Item = Token<'s>>,
    E: ParseElem<'s>,
{
    let mut tuples = Vec::new();
    loop {
        tuples.push(tuple(iter, elem)?);
        match advance(iter)? {
            Some(Token::Comma) => (),
            next => return Ok((tuples, next)),
        }
    }
}

/// Parse a possibly empty sequence of tuples terminated by a period.
fn tuples_dot<'s, I, E>(iter: &mut Peekable<I>, elem: E) -> Result<Vec<Vec<E::Output>>, Error>
where
    I: Iterator<Item = Token<'s>>,
    E: ParseElem<'s>,
{
    if let Some(Token::Dot) = iter.peek() {
        iter.next();
        return Ok(Vec::new());
    }
    match tuples(iter, elem)? {
        (tuples, Some(Token::Dot)) => Ok(tuples),
        (_, None) => Err(Error::ExpectedDot),
        _ => Err(Error::ExpectedCommaOrDot),
    }
}

impl<'s> Command<&'s str> {
    /// Parse a command including its terminating period.
    pub fn parse<I>(iter: &mut Peekable<I>) -> Result<Self, Error>
    where
        I: Iterator<Item = Token<'s>>,
    {
        match advance(iter)? {
            Some(Token::Rule) => {
                let lhs = match tuples(iter, RuleElem)? {
                    (lhs, Some(Token::Arrow)) => lhs,
                    _ => return Err(Error::ExpectedCommaOrArrow),
                };
                let rhs = tuples_dot(iter, RuleElem)?;
                Ok(Self::Rule(Rule { lhs, rhs }))
            }
            Some(Token::Init) => Ok(Self::Init(tuples_dot(iter, InitElem)?)),
            _ => Err(Error::ExpectedCmd),
        }
    }

    /// Parse a single command from a string.
    pub fn parse_str(s: &'s str) -> Result<Self, Error> {
        let mut iter = crate::lex(s).peekable();
        let cmd = Self::parse(&mut iter)?;
        match iter.next() {
            None => Ok(cmd),
            Some(_) => Err(Error::ExpectedCmd),
        }
    }
}

impl<S: Display> Display for Elem<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Var(v) => v.fmt(f),
            Self::Atom(a) => a.fmt(f),
        }
    }
}

/// Write tuples as `{a, b}, {c}`.
pub fn format<T: Display>(tuples: &[Vec<T>], f: &mut fmt::Formatter) -> fmt::Result {
    for (i, tuple) in tuples.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{{")?;
        for (j, elem) in tuple.iter().enumerate() {
            if j > 0 {
                write!(f, ", ")?;
            }
            elem.fmt(f)?;
        }
        write!(f, "}}")?;
    }
    Ok(())
}

impl<S: Display> Display for Rule<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        format(&self.lhs, f)?;
        write!(f, " -> ")?;
        format(&self.rhs, f)
    }
}

impl<S: Display> Display for Command<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Rule(rule) => write!(f, "rule {}.", rule),
            Self::Init(tuples) if tuples.is_empty() => write!(f, "init."),
            Self::Init(tuples) => {
                write!(f, "init ")?;
                format(tuples, f)?;
                write!(f, ".")
            }
        }
    }
}

#[test]
fn positive() -> Result<(), Error> {
    use alloc::vec;
    use Elem::{Atom, Var};

    let cmd = Command::parse_str("rule {x, y}, {y, z} -> {x, z}, {z, w}.")?;
    let lhs = vec![vec![Var("x"), Var("y")], vec![Var("y"), Var("z")]];
    let rhs = vec![vec![Var("x"), Var("z")], vec![Var("z"), Var("w")]];
    assert_eq!(cmd, Command::Rule(Rule { lhs, rhs }));

    let cmd = Command::parse_str("rule {1, x} -> .")?;
    let lhs = vec![vec![Atom(1), Var("x")]];
    assert_eq!(cmd, Command::Rule(Rule { lhs, rhs: vec![] }));

    let cmd = Command::parse_str("init {1, 2}, {}, {3}.")?;
    assert_eq!(cmd, Command::Init(vec![vec![1, 2], vec![], vec![3]]));

    assert_eq!(Command::parse_str("init.")?, Command::Init(vec![]));
    Ok(())
}

#[test]
fn negative() {
    use Error::*;
    let parse_err = |s: &str| Command::parse_str(s).unwrap_err();
    assert_eq!(parse_err("."), ExpectedCmd);
    assert_eq!(parse_err("rule ->"), ExpectedLBrace);
    assert_eq!(parse_err("rule {x y}"), ExpectedCommaOrRBrace);
    assert_eq!(parse_err("rule {x} ."), ExpectedCommaOrArrow);
    assert_eq!(parse_err("rule {x} -> {x} {y}."), ExpectedCommaOrDot);
    assert_eq!(parse_err("rule {x} -> {x}"), ExpectedDot);
    assert_eq!(parse_err("rule {,} -> ."), ExpectedElem);
    assert_eq!(parse_err("init {x}."), ExpectedAtom);
    assert_eq!(parse_err("init {99999999999999999999}."), AtomOverflow);
    assert_eq!(parse_err("init {1 # 2}."), UnknownToken);
    assert_eq!(parse_err("init . init ."), ExpectedCmd);
}

#[test]
fn display() -> Result<(), Error> {
    use alloc::string::ToString;
    let s = "rule {x, 1}, {} -> {x, w}.";
    assert_eq!(Command::parse_str(s)?.to_string(), s);
    let s = "init {1, 2}, {3}.";
    assert_eq!(Command::parse_str(s)?.to_string(), s);
    Ok(())
}
