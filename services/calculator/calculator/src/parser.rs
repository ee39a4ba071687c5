use calculator_client::ComputeOperation;

use crate::ast::Ast;
use crate::error::ParseError;
use crate::lexer::{LexMode, Lexer, Token};

impl Token {
    fn additive(self) -> Option<ComputeOperation> {
        match self {
            Token::Plus => Some(ComputeOperation::Add),
            Token::Minus => Some(ComputeOperation::Sub),
            _ => None,
        }
    }

    fn multiplicative(self) -> Option<ComputeOperation> {
        match self {
            Token::Star => Some(ComputeOperation::Mul),
            Token::Slash => Some(ComputeOperation::Div),
            _ => None,
        }
    }
}

/// Recursive descent parser over a lazy token stream
///
/// ```text
/// expression := term (('+' | '-') term)*
/// term       := factor (('*' | '/') factor)*
/// factor     := NUMBER | '(' expression ')' | '-' factor
/// ```
///
/// Binary operators are left-associative, unary minus binds tightest.
///
/// Both the nesting of parentheses and unary minus and the height of the
/// resulting tree are capped at [`MAX_DEPTH`].
pub struct Parser<'a> {
    tokens: Lexer<'a>,
    lookahead: Option<Token>,
    depth: usize,
}

/// Deepest tree or nesting accepted by [`Parser`]
pub const MAX_DEPTH: usize = 256;

fn bounded(height: usize) -> Result<usize, ParseError> {
    if height > MAX_DEPTH {
        return Err(ParseError::TooDeep(MAX_DEPTH));
    }
    Ok(height)
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Lexer<'a>) -> Parser<'a> {
        Parser {
            tokens,
            lookahead: None,
            depth: 0,
        }
    }

    pub fn parse(mut self) -> Result<Ast, ParseError> {
        if self.peek()?.is_none() {
            return Err(ParseError::Empty);
        }

        let (ast, _) = self.expression()?;
        match self.bump()? {
            Some(token) => Err(ParseError::TrailingToken(token)),
            None => Ok(ast),
        }
    }

    fn peek(&mut self) -> Result<Option<Token>, ParseError> {
        if self.lookahead.is_none() {
            self.lookahead = self.tokens.next().transpose()?;
        }
        Ok(self.lookahead)
    }

    fn bump(&mut self) -> Result<Option<Token>, ParseError> {
        match self.lookahead.take() {
            Some(token) => Ok(Some(token)),
            None => self.tokens.next().transpose(),
        }
    }

    // Each production returns the parsed tree along with its height

    fn expression(&mut self) -> Result<(Ast, usize), ParseError> {
        let (mut acc, mut height) = self.term()?;
        while let Some(op) = self.peek()?.and_then(Token::additive) {
            self.bump()?;
            let (rhs, rhs_height) = self.term()?;
            height = bounded(height.max(rhs_height) + 1)?;
            acc = Ast::binary(op, acc, rhs);
        }
        Ok((acc, height))
    }

    fn term(&mut self) -> Result<(Ast, usize), ParseError> {
        let (mut acc, mut height) = self.factor()?;
        while let Some(op) = self.peek()?.and_then(Token::multiplicative) {
            self.bump()?;
            let (rhs, rhs_height) = self.factor()?;
            height = bounded(height.max(rhs_height) + 1)?;
            acc = Ast::binary(op, acc, rhs);
        }
        Ok((acc, height))
    }

    fn factor(&mut self) -> Result<(Ast, usize), ParseError> {
        match self.bump()? {
            Some(Token::Number(v)) => Ok((Ast::Literal(v), 0)),
            Some(Token::Minus) => {
                let (operand, height) = self.nested(Self::factor)?;
                Ok((Ast::negate(operand), bounded(height + 1)?))
            }
            Some(Token::LParen) => {
                let inner = self.nested(Self::expression)?;
                match self.bump()? {
                    Some(Token::RParen) => Ok(inner),
                    Some(token) => Err(ParseError::UnexpectedToken(token)),
                    None => Err(ParseError::UnclosedParen),
                }
            }
            Some(token) => Err(ParseError::UnexpectedToken(token)),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    fn nested<F>(&mut self, production: F) -> Result<(Ast, usize), ParseError>
    where
        F: FnOnce(&mut Self) -> Result<(Ast, usize), ParseError>,
    {
        self.depth = bounded(self.depth + 1)?;
        let result = production(self);
        self.depth -= 1;
        result
    }
}

pub fn parse(input: &str, mode: LexMode) -> Result<Ast, ParseError> {
    Parser::new(Lexer::new(input, mode)).parse()
}
