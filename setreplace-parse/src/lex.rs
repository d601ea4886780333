use core::fmt::{self, Display};
use logos::{Lexer, Logos};

#[derive(Logos, Clone, Debug, PartialEq, Eq)]
pub enum Token<'s> {
    #[token("rule")]
    Rule,

    #[token("init")]
    Init,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token(",")]
    Comma,

    #[token("->")]
    Arrow,

    #[token(".")]
    Dot,

    #[regex("[a-zA-Z_][a-zA-Z0-9_']*")]
    Ident(&'s str),

    #[regex("[0-9]+")]
    Nat(&'s str),

    #[regex(r"[ \t\r\n\f]+")]
    #[token("(;", comment)]
    Space,

    /// unknown input, including unterminated comments
    #[error]
    Error,
}

impl<'s> Display for Token<'s> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let s = match self {
            Self::Rule => "rule",
            Self::Init => "init",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::Comma => ",",
            Self::Arrow => "->",
            Self::Dot => ".",
            Self::Ident(s) | Self::Nat(s) => *s,
            Self::Space => " ",
            Self::Error => return Err(Default::default()),
        };
        s.fmt(f)
    }
}

/// Skip a comment, which may contain nested comments.
fn comment<'s>(lex: &mut Lexer<'s, Token<'s>>) -> Option<()> {
    let mut depth = 1;
    while depth > 0 {
        let rest = lex.remainder();
        let pos = rest.find(|c: char| c == '(' || c == ';')?;
        let len = match &rest[pos..] {
            r if r.starts_with("(;") => {
                depth += 1;
                2
            }
            r if r.starts_with(";)") => {
                depth -= 1;
                2
            }
            _ => 1,
        };
        lex.bump(pos + len);
    }
    Some(())
}

#[test]
fn keywords_and_idents() {
    let tokens: alloc::vec::Vec<_> = crate::lex("rule rules init_ x' 42").collect();
    assert_eq!(
        tokens,
        [
            Token::Rule,
            Token::Ident("rules"),
            Token::Ident("init_"),
            Token::Ident("x'"),
            Token::Nat("42")
        ]
    );
}

#[test]
fn nested_comments() {
    let tokens: alloc::vec::Vec<_> = crate::lex("{ (; a (; b ;) c ;) }").collect();
    assert_eq!(tokens, [Token::LBrace, Token::RBrace]);

    // unterminated comment
    let tokens: alloc::vec::Vec<_> = crate::lex("(; (; ;)").collect();
    assert_eq!(tokens, [Token::Error]);
}
