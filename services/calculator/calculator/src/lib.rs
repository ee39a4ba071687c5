#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

pub use ast::Ast;
pub use classify::{category, classify, MEMORY_MARKER};
pub use config::{Config, EngineConfig};
pub use engine::Engine;
pub use error::{EngineError, ParseError};
pub use lexer::{tokenize, LexMode, Lexer, Token};
pub use parser::{parse, Parser};
pub use session::Session;
pub use store::SessionStore;

mod ast;
mod classify;
pub mod config;
mod engine;
mod error;
mod lexer;
mod parser;
mod session;
mod store;
mod tree;
