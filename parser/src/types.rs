use crate::error::ParsingError;
use crate::info_parse;
use crate::parse::{PResult, Parser};
use ast::ast::{Name, Param, TypeNode, TypeNodeKind};
use lexer::TokenKind;

impl<'t> Parser<'t> {
    /// `{G, ..}? atom ( '(' params ')' )?`; the parameter list turns `atom`
    /// into the return type of a function declarator.
    pub(crate) fn parse_type(&mut self) -> PResult<TypeNode> {
        let generics = if self.peek_is("{") {
            self.generic_names()?
        } else {
            vec![]
        };
        let atom = self.type_atom()?;
        if self.peek_is("(") {
            self.next("'('")?;
            let params = self.params()?;
            let position = generics.first().map_or(atom.position, |g| g.position);
            return Ok(TypeNode {
                kind: TypeNodeKind::Function {
                    generics,
                    params,
                    ret: Box::new(atom),
                },
                position,
            });
        }
        if let Some(generic) = generics.first() {
            return Err(ParsingError::GenericsWithoutParams {
                position: generic.position,
            });
        }
        Ok(atom)
    }

    fn type_atom(&mut self) -> PResult<TypeNode> {
        let token = self.next("a type")?;
        info_parse!("Type", token);
        let position = token.position;
        let kind = match token.kind {
            TokenKind::Identifier => match token.text.as_str() {
                "Int" => TypeNodeKind::Int,
                "Bool" => TypeNodeKind::Bool,
                name => TypeNodeKind::GenericRef(name.to_string()),
            },
            _ if token.is("[") => {
                let inner = self.parse_type()?;
                self.expect("]")?;
                TypeNodeKind::List(Box::new(inner))
            }
            _ if token.is("(") => {
                let (mut ts, trailing) = self.series(")", Self::parse_type)?;
                if ts.len() == 1 && !trailing {
                    return Ok(ts.remove(0));
                }
                TypeNodeKind::Tuple(ts)
            }
            _ => {
                return Err(ParsingError::UnexpectedToken {
                    expected: "a type".to_string(),
                    found: token.describe(),
                    position,
                })
            }
        };
        Ok(TypeNode { kind, position })
    }

    pub(crate) fn generic_names(&mut self) -> PResult<Vec<Name>> {
        self.expect("{")?;
        let (names, _) = self.series("}", |p| p.expect_identifier("a generic name"))?;
        Ok(names)
    }

    /// Parameters of a declarator whose opening parenthesis was just consumed.
    pub(crate) fn params(&mut self) -> PResult<Vec<Param>> {
        let (params, _) = self.series(")", |p| {
            let name = p.expect_identifier("a parameter name")?;
            p.expect(":")?;
            let annotation = p.parse_type()?;
            Ok(Param { name, annotation })
        })?;
        Ok(params)
    }
}
