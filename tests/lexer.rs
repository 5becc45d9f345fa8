use rule_expr::{lex, ExprError, TokenKind};

fn kinds(input: &str) -> Vec<TokenKind> {
    lex(input).unwrap().into_iter().map(|t| t.kind).collect()
}

#[test]
fn lexes_single_character_punctuation_and_operators() {
    let cases = [
        ("!", TokenKind::Bang),
        (">", TokenKind::Greater),
        ("<", TokenKind::Less),
        ("+", TokenKind::Plus),
        ("-", TokenKind::Minus),
        ("*", TokenKind::Star),
        ("/", TokenKind::Slash),
        ("%", TokenKind::Percent),
        ("(", TokenKind::LeftParen),
        (")", TokenKind::RightParen),
        ("[", TokenKind::LeftBracket),
        ("]", TokenKind::RightBracket),
        (",", TokenKind::Comma),
        (".", TokenKind::Dot),
    ];
    for (input, expected) in cases {
        assert_eq!(kinds(input), vec![expected, TokenKind::Eof], "input {input:?}");
    }
}

#[test]
fn lexes_two_character_operators() {
    let cases = [
        ("||", TokenKind::PipePipe),
        ("&&", TokenKind::AmpAmp),
        ("??", TokenKind::QuestionQuestion),
        ("?.", TokenKind::QuestionDot),
        ("==", TokenKind::EqualEqual),
        ("!=", TokenKind::BangEqual),
        (">=", TokenKind::GreaterEqual),
        ("<=", TokenKind::LessEqual),
    ];
    for (input, expected) in cases {
        assert_eq!(kinds(input), vec![expected, TokenKind::Eof], "input {input:?}");
    }
}

#[test]
fn lexes_keywords_as_whole_words_only() {
    assert_eq!(kinds("true"), vec![TokenKind::True, TokenKind::Eof]);
    assert_eq!(kinds("false"), vec![TokenKind::False, TokenKind::Eof]);
    assert_eq!(kinds("null"), vec![TokenKind::Null, TokenKind::Eof]);

    // A keyword prefix of a longer identifier is an identifier.
    assert_eq!(kinds("truety"), vec![TokenKind::Identifier, TokenKind::Eof]);
    assert_eq!(
        kinds("null_value"),
        vec![TokenKind::Identifier, TokenKind::Eof]
    );
}

#[test]
fn lexes_literals_and_identifiers() {
    assert_eq!(kinds("10"), vec![TokenKind::Number, TokenKind::Eof]);
    assert_eq!(kinds("3.14"), vec![TokenKind::Number, TokenKind::Eof]);
    assert_eq!(kinds("\"hello\""), vec![TokenKind::String, TokenKind::Eof]);
    assert_eq!(kinds("'hello'"), vec![TokenKind::String, TokenKind::Eof]);
    assert_eq!(kinds("x"), vec![TokenKind::Identifier, TokenKind::Eof]);
    assert_eq!(kinds("$_var9"), vec![TokenKind::Identifier, TokenKind::Eof]);
}

#[test]
fn string_escapes_are_kept_as_written() {
    let tokens = lex(r#""a\"b\n""#).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].text, r#""a\"b\n""#);
}

#[test]
fn numbers_take_no_sign() {
    // The minus is a separate token; signs are unary operators.
    assert_eq!(
        kinds("-5"),
        vec![TokenKind::Minus, TokenKind::Number, TokenKind::Eof]
    );
}

#[test]
fn lexes_compound_expressions() {
    assert_eq!(
        kinds("(a >= 10) && b"),
        vec![
            TokenKind::LeftParen,
            TokenKind::Identifier,
            TokenKind::GreaterEqual,
            TokenKind::Number,
            TokenKind::RightParen,
            TokenKind::AmpAmp,
            TokenKind::Identifier,
            TokenKind::Eof,
        ]
    );
    assert_eq!(
        kinds("user.age > 18"),
        vec![
            TokenKind::Identifier,
            TokenKind::Dot,
            TokenKind::Identifier,
            TokenKind::Greater,
            TokenKind::Number,
            TokenKind::Eof,
        ]
    );
    assert_eq!(
        kinds("a ?? b || c"),
        vec![
            TokenKind::Identifier,
            TokenKind::QuestionQuestion,
            TokenKind::Identifier,
            TokenKind::PipePipe,
            TokenKind::Identifier,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn token_texts_reproduce_the_input_without_whitespace() {
    let input = "total + round(price * 1.2) >= limit[0]";
    let rebuilt: String = lex(input)
        .unwrap()
        .iter()
        .map(|t| t.text.as_str())
        .collect();
    let expected: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    assert_eq!(rebuilt, expected);
}

#[test]
fn records_token_offsets() {
    let tokens = lex("a + b").unwrap();
    let offsets: Vec<usize> = tokens.iter().map(|t| t.offset).collect();
    assert_eq!(offsets, vec![0, 2, 4, 5]);
}

#[test]
fn appends_eof_with_empty_text() {
    let tokens = lex("").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
    assert_eq!(tokens[0].text, "");
    assert_eq!(tokens[0].offset, 0);
}

#[test]
fn rejects_unknown_characters_with_offset() {
    let err = lex("a @").unwrap_err();
    match err {
        ExprError::Lex { character, offset } => {
            assert_eq!(character, '@');
            assert_eq!(offset, 2);
        }
        other => panic!("expected lex error, got {other:?}"),
    }
}

#[test]
fn rejects_lone_halves_of_two_character_operators() {
    for input in ["=", "&", "|", "?"] {
        let err = lex(input).unwrap_err();
        assert!(
            matches!(err, ExprError::Lex { offset: 0, .. }),
            "input {input:?} gave {err:?}"
        );
    }
}
