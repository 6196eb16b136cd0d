use ast::ast::Position;
use lexer::{tokenize, Keyword, LexicalError, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

fn texts(source: &str) -> Vec<String> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|token| token.text)
        .collect()
}

#[test]
fn declaration_tokens() {
    let _ = env_logger::try_init();
    let src = include_str!("./files/double.az");
    let tokens = tokenize(src).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].text, "double");
    assert_eq!(tokens[0].position, Position::new(1, 1));
    let main = tokens.iter().find(|t| t.text == "main").unwrap();
    assert_eq!(main.position, Position::new(3, 1));
}

#[test]
fn keywords_and_booleans() {
    assert_eq!(
        kinds("if true then let in else of false iffy"),
        vec![
            TokenKind::Keyword(Keyword::If),
            TokenKind::Bool(true),
            TokenKind::Keyword(Keyword::Then),
            TokenKind::Keyword(Keyword::Let),
            TokenKind::Keyword(Keyword::In),
            TokenKind::Keyword(Keyword::Else),
            TokenKind::Keyword(Keyword::Of),
            TokenKind::Bool(false),
            TokenKind::Identifier,
        ]
    );
}

#[test]
fn longest_operator_wins() {
    assert_eq!(
        texts("a<-b<=c<d**e*f==g=h!^i!j"),
        vec!["a", "<-", "b", "<=", "c", "<", "d", "**", "e", "*", "f", "==", "g", "=", "h", "!^", "i", "!", "j"]
    );
}

#[test]
fn integers_have_no_leading_zeros() {
    assert_eq!(kinds("0 42"), vec![TokenKind::Int(0), TokenKind::Int(42)]);
    assert_eq!(texts("007"), vec!["0", "0", "7"]);
}

#[test]
fn string_escapes_decode_to_code_points() {
    assert_eq!(
        kinds(r#""a\n\"é""#),
        vec![TokenKind::Str(vec![97, 10, 34, 233])]
    );
}

#[test]
fn columns_are_one_based_per_line() {
    let tokens = tokenize("x: Int = 1\n  y").unwrap();
    let positions: Vec<_> = tokens.iter().map(|t| t.position).collect();
    assert_eq!(
        positions,
        vec![
            Position::new(1, 1),
            Position::new(1, 2),
            Position::new(1, 4),
            Position::new(1, 8),
            Position::new(1, 10),
            Position::new(2, 3),
        ]
    );
}

#[test]
fn unrecognized_character() {
    let err = tokenize("x: Int = 1 $ 2").unwrap_err();
    assert!(matches!(
        err,
        LexicalError::UnrecognizedCharacter { character: '$', .. }
    ));
    assert_eq!(err.position(), Position::new(1, 12));
}

#[test]
fn unterminated_string() {
    let err = tokenize("s: [Int] = \"abc\nmain").unwrap_err();
    assert!(matches!(err, LexicalError::MalformedString { .. }));
    assert_eq!(err.position(), Position::new(1, 12));
}

#[test]
fn bad_escape() {
    let err = tokenize(r#"s: [Int] = "a\qb""#).unwrap_err();
    assert!(matches!(err, LexicalError::MalformedString { .. }));
}

#[test]
fn integer_out_of_range() {
    let err = tokenize("99999999999999999999").unwrap_err();
    assert!(matches!(err, LexicalError::IntegerOutOfRange { .. }));
}
