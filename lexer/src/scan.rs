use crate::error::LexicalError;
use crate::token::{Keyword, Token, TokenKind};
use ast::ast::Position;
use log::{debug, info};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "./tokens.pest"]
struct AzorScanner;

pub fn build_tokens(source: &str) -> Result<Vec<Token>, LexicalError> {
    let pairs = AzorScanner::parse(Rule::program, source).map_err(Box::new)?;
    let tokens = pairs
        .filter(|pair| pair.as_rule() != Rule::EOI)
        .map(scan_token)
        .collect::<Result<Vec<_>, _>>()?;
    info!("Scanned {} tokens", tokens.len());
    Ok(tokens)
}

fn scan_token(pair: Pair<Rule>) -> Result<Token, LexicalError> {
    let (line, column) = pair.line_col();
    let position = Position::new(line, column);
    let text = pair.as_str();
    let kind = match pair.as_rule() {
        Rule::word => match text {
            "true" => TokenKind::Bool(true),
            "false" => TokenKind::Bool(false),
            _ => Keyword::from_word(text)
                .map(TokenKind::Keyword)
                .unwrap_or(TokenKind::Identifier),
        },
        Rule::integer => {
            let val = text
                .parse()
                .map_err(|_| LexicalError::IntegerOutOfRange {
                    literal: text.to_string(),
                    position,
                })?;
            TokenKind::Int(val)
        }
        Rule::string => TokenKind::Str(
            unescape(text).ok_or(LexicalError::MalformedString { position })?,
        ),
        Rule::operator => TokenKind::Operator,
        Rule::punctuation => TokenKind::Punctuation,
        Rule::bad_string => return Err(LexicalError::MalformedString { position }),
        _ => {
            let character = text.chars().next().unwrap_or_default();
            return Err(LexicalError::UnrecognizedCharacter {
                character,
                position,
            });
        }
    };
    debug!("Token {:?} {:?} at {}", kind, text, position);
    Ok(Token {
        kind,
        text: text.to_string(),
        position,
    })
}

/// Decodes a quoted literal into code points.
fn unescape(literal: &str) -> Option<Vec<i64>> {
    let body = literal.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = vec![];
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        let c = match c {
            '\\' => match chars.next()? {
                't' => '\t',
                'r' => '\r',
                'n' => '\n',
                '\\' => '\\',
                '"' => '"',
                _ => return None,
            },
            c => c,
        };
        out.push(i64::from(u32::from(c)));
    }
    Some(out)
}
