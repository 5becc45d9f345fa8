use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::error::ExprError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    // Single-character tokens
    Bang,
    Greater,
    Less,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Comma,
    Dot,

    // Two-character tokens
    PipePipe,
    AmpAmp,
    QuestionQuestion,
    QuestionDot,
    EqualEqual,
    BangEqual,
    GreaterEqual,
    LessEqual,

    // Keywords
    True,
    False,
    Null,

    // Literals and identifiers
    Number,
    String,
    Identifier,

    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Bang => "'!'",
            TokenKind::Greater => "'>'",
            TokenKind::Less => "'<'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::LeftBracket => "'['",
            TokenKind::RightBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Dot => "'.'",
            TokenKind::PipePipe => "'||'",
            TokenKind::AmpAmp => "'&&'",
            TokenKind::QuestionQuestion => "'??'",
            TokenKind::QuestionDot => "'?.'",
            TokenKind::EqualEqual => "'=='",
            TokenKind::BangEqual => "'!='",
            TokenKind::GreaterEqual => "'>='",
            TokenKind::LessEqual => "'<='",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::Null => "'null'",
            TokenKind::Number => "number literal",
            TokenKind::String => "string literal",
            TokenKind::Identifier => "identifier",
            TokenKind::Eof => "end of input",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub offset: usize,
}

/// Ordered token rules; the first pattern that matches the remaining input
/// wins. Two-character operators precede their one-character prefixes and
/// keywords precede the identifier rule, so priority encodes specificity.
fn token_rules() -> &'static [(Regex, Option<TokenKind>)] {
    static RULES: OnceLock<Vec<(Regex, Option<TokenKind>)>> = OnceLock::new();
    RULES.get_or_init(|| {
        let rule = |pattern: &str, kind: Option<TokenKind>| {
            (Regex::new(pattern).expect("valid token regex"), kind)
        };
        vec![
            rule(r"^\s+", None),
            rule(r"^\|\|", Some(TokenKind::PipePipe)),
            rule(r"^&&", Some(TokenKind::AmpAmp)),
            rule(r"^\?\?", Some(TokenKind::QuestionQuestion)),
            rule(r"^\?\.", Some(TokenKind::QuestionDot)),
            rule(r"^==", Some(TokenKind::EqualEqual)),
            rule(r"^!=", Some(TokenKind::BangEqual)),
            rule(r"^>=", Some(TokenKind::GreaterEqual)),
            rule(r"^<=", Some(TokenKind::LessEqual)),
            rule(r"^!", Some(TokenKind::Bang)),
            rule(r"^>", Some(TokenKind::Greater)),
            rule(r"^<", Some(TokenKind::Less)),
            rule(r"^\+", Some(TokenKind::Plus)),
            rule(r"^-", Some(TokenKind::Minus)),
            rule(r"^\*", Some(TokenKind::Star)),
            rule(r"^/", Some(TokenKind::Slash)),
            rule(r"^%", Some(TokenKind::Percent)),
            rule(r"^\(", Some(TokenKind::LeftParen)),
            rule(r"^\)", Some(TokenKind::RightParen)),
            rule(r"^\[", Some(TokenKind::LeftBracket)),
            rule(r"^\]", Some(TokenKind::RightBracket)),
            rule(r"^\.", Some(TokenKind::Dot)),
            rule(r"^,", Some(TokenKind::Comma)),
            rule(r"^true\b", Some(TokenKind::True)),
            rule(r"^false\b", Some(TokenKind::False)),
            rule(r"^null\b", Some(TokenKind::Null)),
            rule(r"^[0-9]+(\.[0-9]+)?", Some(TokenKind::Number)),
            rule(
                r#"^("([^"\\]|\\.)*"|'([^'\\]|\\.)*')"#,
                Some(TokenKind::String),
            ),
            rule(r"^[A-Za-z_$][A-Za-z0-9_$]*", Some(TokenKind::Identifier)),
        ]
    })
}

/// Tokenizes expression source text. Whitespace produces no token; a
/// trailing `Eof` token is always appended.
pub fn lex(source: &str) -> Result<Vec<Token>, ExprError> {
    let mut tokens = Vec::new();
    let mut cursor = 0;

    while let Some(character) = source[cursor..].chars().next() {
        let remaining = &source[cursor..];
        let matched = token_rules()
            .iter()
            .find_map(|(pattern, kind)| pattern.find(remaining).map(|m| (m.as_str(), *kind)));

        let Some((text, kind)) = matched else {
            return Err(ExprError::Lex {
                character,
                offset: cursor,
            });
        };

        if let Some(kind) = kind {
            tokens.push(Token {
                kind,
                text: text.to_string(),
                offset: cursor,
            });
        }
        cursor += text.len();
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        text: String::new(),
        offset: source.len(),
    });
    Ok(tokens)
}
