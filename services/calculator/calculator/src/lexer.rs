use derive_more::Display;
use nom::IResult;
use nom::{
    branch::alt,
    character::complete::{char, digit1},
    combinator::{map_res, recognize, value},
    sequence::separated_pair,
};
use serde::Deserialize;

use calculator_client::ComputeValue;

use crate::error::ParseError;

#[derive(Debug, Display, Clone, Copy, PartialEq)]
pub enum Token {
    #[display(fmt = "{}", _0)]
    Number(ComputeValue),
    #[display(fmt = "+")]
    Plus,
    #[display(fmt = "-")]
    Minus,
    #[display(fmt = "*")]
    Star,
    #[display(fmt = "/")]
    Slash,
    #[display(fmt = "(")]
    LParen,
    #[display(fmt = ")")]
    RParen,
}

/// What to do with characters that aren't part of any token
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LexMode {
    /// Skip the character and carry on
    Permissive,
    /// Report the character as a parse error
    Strict,
}

impl Default for LexMode {
    fn default() -> Self {
        LexMode::Permissive
    }
}

fn parse_number(i: &str) -> IResult<&str, Token> {
    let decimal = separated_pair(digit1, char('.'), digit1);

    alt((
        map_res(recognize(decimal), |digit_str: &str| {
            digit_str
                .parse()
                .map(|v| Token::Number(ComputeValue::Float(v)))
        }),
        map_res(digit1, |digit_str: &str| {
            digit_str
                .parse()
                .map(ComputeValue::Int)
                .or_else(|_| digit_str.parse().map(ComputeValue::Float))
                .map(Token::Number)
        }),
    ))(i)
}

fn parse_symbol(i: &str) -> IResult<&str, Token> {
    alt((
        value(Token::Plus, char('+')),
        value(Token::Minus, char('-')),
        value(Token::Star, char('*')),
        value(Token::Slash, char('/')),
        value(Token::LParen, char('(')),
        value(Token::RParen, char(')')),
    ))(i)
}

/// Lazily splits an expression into tokens
///
/// Cloning a lexer restarts from the clone's position
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    rest: &'a str,
    mode: LexMode,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str, mode: LexMode) -> Lexer<'a> {
        Lexer { rest: input, mode }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.rest = self.rest.trim_start_matches(&[' ', '\t'][..]);

            if let Ok((rest, token)) = alt((parse_number, parse_symbol))(self.rest) {
                self.rest = rest;
                return Some(Ok(token));
            }

            let mut chars = self.rest.chars();
            let c = chars.next()?;
            self.rest = chars.as_str();

            match self.mode {
                LexMode::Permissive => trace!("Skipping unrecognised character {:?}", c),
                LexMode::Strict => return Some(Err(ParseError::UnknownCharacter(c))),
            }
        }
    }
}

pub fn tokenize(input: &str, mode: LexMode) -> Result<Vec<Token>, ParseError> {
    Lexer::new(input, mode).collect()
}
