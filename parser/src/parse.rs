use crate::error::ParsingError;
use crate::info_parse;
use crate::precedence::{self, Suffix, LOWEST, PREFIX};
use ast::ast::{
    Binding, Condition, Decl, Expr, ExprKind, Literal, Name, Position, Program, TypeNode,
    TypeNodeKind, UnaryOp,
};
use lexer::{Keyword, Token, TokenKind};
use log::{debug, info};

pub(crate) type PResult<T> = Result<T, ParsingError>;

const CLOSERS: [&str; 3] = [")", "]", "}"];

pub fn build_ast(tokens: &[Token]) -> PResult<Program> {
    let mut parser = Parser::new(tokens);
    let mut decls = vec![];
    while parser.peek().is_some() {
        decls.push(parser.parse_decl()?);
    }
    info!("Found {} decls", decls.len());
    Ok(decls)
}

pub(crate) struct Parser<'t> {
    tokens: &'t [Token],
    index: usize,
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t [Token]) -> Parser<'t> {
        Parser { tokens, index: 0 }
    }

    pub(crate) fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.index)
    }

    pub(crate) fn peek_is(&self, symbol: &str) -> bool {
        self.peek().is_some_and(|token| token.is(symbol))
    }

    fn peek_keyword(&self, keyword: Keyword) -> bool {
        self.peek().is_some_and(|token| token.is_keyword(keyword))
    }

    /// Position of the lookahead, or of the last token once input is exhausted.
    pub(crate) fn current_position(&self) -> Position {
        self.peek()
            .or(self.tokens.last())
            .map(|token| token.position)
            .unwrap_or_default()
    }

    pub(crate) fn next(&mut self, expected: &str) -> PResult<&'t Token> {
        let token = self.peek().ok_or_else(|| ParsingError::UnexpectedEof {
            expected: expected.to_string(),
            position: self.current_position(),
        })?;
        self.index += 1;
        Ok(token)
    }

    pub(crate) fn expect(&mut self, symbol: &str) -> PResult<&'t Token> {
        let token = self.next(&format!("'{}'", symbol))?;
        if token.is(symbol) {
            return Ok(token);
        }
        if CLOSERS.contains(&symbol) && CLOSERS.iter().any(|closer| token.is(closer)) {
            return Err(ParsingError::MismatchedDelimiter {
                expected: symbol.to_string(),
                found: token.text.clone(),
                position: token.position,
            });
        }
        Err(ParsingError::UnexpectedToken {
            expected: format!("'{}'", symbol),
            found: token.describe(),
            position: token.position,
        })
    }

    fn expect_keyword(&mut self, keyword: Keyword, spelled: &str) -> PResult<&'t Token> {
        let token = self.next(&format!("'{}'", spelled))?;
        if token.is_keyword(keyword) {
            return Ok(token);
        }
        Err(ParsingError::UnexpectedToken {
            expected: format!("'{}'", spelled),
            found: token.describe(),
            position: token.position,
        })
    }

    pub(crate) fn expect_identifier(&mut self, expected: &str) -> PResult<Name> {
        let token = self.next(expected)?;
        match token.kind {
            TokenKind::Identifier => Ok(Name {
                name: token.text.clone(),
                position: token.position,
            }),
            _ => Err(ParsingError::UnexpectedToken {
                expected: expected.to_string(),
                found: token.describe(),
                position: token.position,
            }),
        }
    }

    /// Comma separated items up to and including `close`. The flag reports
    /// whether the series ended with a trailing comma.
    pub(crate) fn series<T>(
        &mut self,
        close: &str,
        mut item: impl FnMut(&mut Self) -> PResult<T>,
    ) -> PResult<(Vec<T>, bool)> {
        let mut items = vec![];
        let mut trailing = false;
        loop {
            if self.peek_is(close) {
                self.index += 1;
                return Ok((items, trailing));
            }
            items.push(item(self)?);
            if self.peek_is(",") {
                self.index += 1;
                trailing = true;
            } else {
                self.expect(close)?;
                return Ok((items, false));
            }
        }
    }

    fn parse_decl(&mut self) -> PResult<Decl> {
        let label = self.expect_identifier("a declaration name")?;
        debug!("Parsing declaration {} at {}", label.name, label.position);
        let generics = if self.peek_is("{") {
            self.generic_names()?
        } else {
            vec![]
        };
        let signature = if self.peek_is("(") {
            self.index += 1;
            let params = self.params()?;
            if !self.peek_is(":") {
                return Err(ParsingError::MissingAnnotation {
                    label: label.name,
                    position: self.current_position(),
                });
            }
            self.index += 1;
            let ret = self.parse_type()?;
            TypeNode {
                kind: TypeNodeKind::Function {
                    generics,
                    params,
                    ret: Box::new(ret),
                },
                position: label.position,
            }
        } else if self.peek_is(":") {
            if let Some(generic) = generics.first() {
                return Err(ParsingError::GenericsWithoutParams {
                    position: generic.position,
                });
            }
            self.index += 1;
            self.parse_type()?
        } else {
            return Err(ParsingError::MissingAnnotation {
                label: label.name,
                position: self.current_position(),
            });
        };
        self.expect("=")?;
        let body = self.parse_expr(LOWEST)?;
        Ok(Decl {
            label: label.name,
            position: label.position,
            signature,
            body,
        })
    }

    pub(crate) fn parse_expr(&mut self, min_precedence: u8) -> PResult<Expr> {
        let node = self.grab_expr()?;
        self.check_suffixes(node, min_precedence)
    }

    fn grab_expr(&mut self) -> PResult<Expr> {
        let token = self.next("an expression")?;
        info_parse!("Expression", token);
        let position = token.position;
        let kind = match &token.kind {
            TokenKind::Int(val) => ExprKind::Literal(Literal::Int(*val)),
            TokenKind::Bool(val) => ExprKind::Literal(Literal::Bool(*val)),
            TokenKind::Str(points) => ExprKind::Literal(Literal::String(points.clone())),
            TokenKind::Identifier => ExprKind::Identifier(token.text.clone()),
            TokenKind::Keyword(Keyword::If) => return self.parse_if(position),
            TokenKind::Keyword(Keyword::Let) => return self.parse_let(position),
            _ if token.is("-") => {
                ExprKind::Unary(UnaryOp::Neg, Box::new(self.parse_expr(PREFIX)?))
            }
            _ if token.is("!") => {
                ExprKind::Unary(UnaryOp::Not, Box::new(self.parse_expr(PREFIX)?))
            }
            _ if token.is("(") => {
                let (mut es, trailing) = self.series(")", |p| p.parse_expr(LOWEST))?;
                if es.len() == 1 && !trailing {
                    return Ok(es.remove(0));
                }
                ExprKind::Tuple(es)
            }
            _ if token.is("[") => {
                let (es, _) = self.series("]", |p| p.parse_expr(LOWEST))?;
                let annotation = if self.peek_keyword(Keyword::Of) {
                    let of = self.next("'of'")?;
                    if !es.is_empty() {
                        return Err(ParsingError::AnnotatedNonEmptyList {
                            position: of.position,
                        });
                    }
                    Some(self.parse_type()?)
                } else {
                    None
                };
                ExprKind::List(es, annotation)
            }
            _ => {
                return Err(ParsingError::UnexpectedToken {
                    expected: "an expression".to_string(),
                    found: token.describe(),
                    position,
                })
            }
        };
        Ok(Expr::new(kind, position))
    }

    fn check_suffixes(&mut self, mut node: Expr, min_precedence: u8) -> PResult<Expr> {
        while let Some((suffix, power)) = self.peek().and_then(precedence::suffix) {
            if power <= min_precedence {
                break;
            }
            let token = self.next("a suffix")?;
            info_parse!("Suffix", token);
            node = match suffix {
                Suffix::Generics => {
                    let (generics, _) = self.series("}", Self::parse_type)?;
                    if !self.peek_is("(") {
                        return Err(ParsingError::DanglingGenerics {
                            position: self.current_position(),
                        });
                    }
                    self.index += 1;
                    self.call(node, Some(generics))?
                }
                Suffix::Call => self.call(node, None)?,
                Suffix::Cons => {
                    let tail = self.parse_expr(suffix.operand_power(power))?;
                    Expr::new(
                        ExprKind::Cons(Box::new(node), Box::new(tail)),
                        token.position,
                    )
                }
                Suffix::Binary(op) => {
                    let right = self.parse_expr(suffix.operand_power(power))?;
                    Expr::new(
                        ExprKind::BinOp(Box::new(node), op, Box::new(right)),
                        token.position,
                    )
                }
            };
        }
        Ok(node)
    }

    /// Arguments of a call whose opening parenthesis was just consumed.
    fn call(&mut self, callee: Expr, generics: Option<Vec<TypeNode>>) -> PResult<Expr> {
        let (args, _) = self.series(")", |p| p.parse_expr(LOWEST))?;
        let position = callee.position;
        Ok(Expr::new(
            ExprKind::Call {
                callee: Box::new(callee),
                args,
                generics,
            },
            position,
        ))
    }

    fn parse_if(&mut self, position: Position) -> PResult<Expr> {
        let test = self.parse_expr(LOWEST)?;
        let condition = if self.peek_is("<-") {
            self.index += 1;
            let (head, tail) = match test.kind {
                ExprKind::Cons(head, tail) => (binding_name(*head)?, binding_name(*tail)?),
                _ => {
                    return Err(ParsingError::InvalidUnpack {
                        found: test.to_string(),
                        position: test.position,
                    })
                }
            };
            let list = self.parse_expr(LOWEST)?;
            Condition::Unpack {
                head,
                tail,
                list: Box::new(list),
            }
        } else {
            Condition::Bool(Box::new(test))
        };
        self.expect_keyword(Keyword::Then, "then")?;
        let ethen = self.parse_expr(LOWEST)?;
        self.expect_keyword(Keyword::Else, "else")?;
        let eelse = self.parse_expr(LOWEST)?;
        Ok(Expr::new(
            ExprKind::If(condition, Box::new(ethen), Box::new(eelse)),
            position,
        ))
    }

    fn parse_let(&mut self, position: Position) -> PResult<Expr> {
        let pattern = self.parse_expr(LOWEST)?;
        let binding = match pattern.kind {
            ExprKind::Identifier(name) => Binding::Name(Name {
                name,
                position: pattern.position,
            }),
            ExprKind::Tuple(es) => Binding::Tuple(
                es.into_iter()
                    .map(binding_name)
                    .collect::<PResult<Vec<_>>>()?,
            ),
            _ => {
                return Err(ParsingError::InvalidPattern {
                    found: pattern.to_string(),
                    position: pattern.position,
                })
            }
        };
        self.expect("<-")?;
        let value = self.parse_expr(LOWEST)?;
        self.expect_keyword(Keyword::In, "in")?;
        let body = self.parse_expr(LOWEST)?;
        Ok(Expr::new(
            ExprKind::Let(binding, Box::new(value), Box::new(body)),
            position,
        ))
    }
}

fn binding_name(e: Expr) -> PResult<Name> {
    match e.kind {
        ExprKind::Identifier(name) => Ok(Name {
            name,
            position: e.position,
        }),
        _ => Err(ParsingError::InvalidPattern {
            found: e.to_string(),
            position: e.position,
        }),
    }
}
