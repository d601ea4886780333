use crate::{Command, Error, Token};
use logos::Logos;

/// Tokens of a lexer without whitespace and comments.
struct Tokens<'s> {
    lexer: logos::Lexer<'s, Token<'s>>,
    /// whether the last returned token was a period
    dot: bool,
}

impl<'s> Iterator for Tokens<'s> {
    type Item = Token<'s>;
    fn next(&mut self) -> Option<Self::Item> {
        let next = self.lexer.find(|token| *token != Token::Space);
        self.dot = next == Some(Token::Dot);
        next
    }
}

/// Lazy iterator over the commands of a string.
///
/// After a command fails to parse,
/// the iterator skips everything up to the next period and
/// continues with the command after it.
pub struct CmdIter<'s> {
    tokens: Tokens<'s>,
}

impl<'s> CmdIter<'s> {
    pub fn new(s: &'s str) -> Self {
        Self {
            tokens: Tokens {
                lexer: Token::lexer(s),
                dot: false,
            },
        }
    }

    fn recover(&mut self) {
        if !self.tokens.dot {
            self.tokens.find(|token| *token == Token::Dot);
        }
    }
}

impl<'s> Iterator for CmdIter<'s> {
    type Item = Result<Command<&'s str>, Error>;
    fn next(&mut self) -> Option<Self::Item> {
        // a command never leaves a token peeked behind,
        // so the peekable adapter can be dropped after each command
        let mut tokens = (&mut self.tokens).peekable();
        tokens.peek()?;
        let cmd = Command::parse(&mut tokens);
        if cmd.is_err() {
            self.recover()
        }
        Some(cmd)
    }
}

#[test]
fn sequence() {
    let s = "(; header ;) rule {x} -> {x, x}.\ninit {1}.\n";
    let cmds: Result<alloc::vec::Vec<_>, _> = CmdIter::new(s).collect();
    assert_eq!(cmds.map(|cmds| cmds.len()), Ok(2));
    assert_eq!(CmdIter::new("   (; nothing ;)  ").count(), 0);
}

#[test]
fn recovery() {
    let s = "rule {x} {y}. init {1}.";
    let mut cmds = CmdIter::new(s);
    assert_eq!(cmds.next(), Some(Err(Error::ExpectedCommaOrArrow)));
    assert_eq!(cmds.next(), Some(Ok(Command::Init(alloc::vec![alloc::vec![1]]))));
    assert_eq!(cmds.next(), None);

    // the period that caused the error is not skipped twice
    let mut cmds = CmdIter::new("rule {x} . init.");
    assert_eq!(cmds.next(), Some(Err(Error::ExpectedCommaOrArrow)));
    assert_eq!(cmds.next(), Some(Ok(Command::Init(alloc::vec![]))));
}
