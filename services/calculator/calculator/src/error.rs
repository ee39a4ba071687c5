use derive_more::Display;

use calculator_client::ComputeError;
use telemetry::IsErr;

use crate::lexer::Token;

#[derive(Debug, Display, Clone, PartialEq)]
pub enum ParseError {
    #[display(fmt = "Empty expression")]
    Empty,

    #[display(fmt = "Unexpected end of expression")]
    UnexpectedEnd,

    #[display(fmt = "Unexpected token \"{}\"", _0)]
    UnexpectedToken(Token),

    #[display(fmt = "Missing closing parenthesis")]
    UnclosedParen,

    #[display(fmt = "Unexpected token \"{}\" after expression", _0)]
    TrailingToken(Token),

    #[display(fmt = "Unknown character '{}'", _0)]
    UnknownCharacter(char),

    #[display(fmt = "Expression nested deeper than {} levels", _0)]
    TooDeep(usize),
}

impl std::error::Error for ParseError {}

// Malformed input is expected while an expression is being typed, an
// expression too deep to evaluate is not
impl IsErr for ParseError {
    fn is_err(&self) -> bool {
        matches!(self, ParseError::TooDeep(_))
    }
}

#[derive(Debug, Display, Clone, PartialEq)]
pub enum EngineError {
    #[display(fmt = "Parse Error: {}", _0)]
    Parse(ParseError),

    #[display(fmt = "{}", _0)]
    Arithmetic(ComputeError),
}

impl std::error::Error for EngineError {}

impl IsErr for EngineError {
    fn is_err(&self) -> bool {
        match self {
            EngineError::Parse(e) => e.is_err(),
            EngineError::Arithmetic(_) => true,
        }
    }
}

impl From<ParseError> for EngineError {
    fn from(e: ParseError) -> Self {
        EngineError::Parse(e)
    }
}

impl From<ComputeError> for EngineError {
    fn from(e: ComputeError) -> Self {
        EngineError::Arithmetic(e)
    }
}
