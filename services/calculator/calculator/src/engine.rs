use calculator_client::{
    Action, CalculatorResponse, Classification, ComputeValue, Evaluation, ResultValue, TreeNode,
    ERROR_RESULT, NO_MEMORY_RESULT,
};
use telemetry::{IsErr, Measure};

use crate::ast::Ast;
use crate::classify;
use crate::config::EngineConfig;
use crate::error::{EngineError, ParseError};
use crate::parser;
use crate::session::Session;

lazy_static! {
    static ref PARSE_MEASURE: Measure = Measure::new("engine", "parse");
    static ref EVALUATE_MEASURE: Measure = Measure::new("engine", "evaluate");
}

/// Stateless entry point for evaluating expressions and driving sessions
///
/// Nothing here panics on bad input: failures come back as values.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Engine {
        Engine { config }
    }

    pub fn parse(&self, text: &str) -> Result<Ast, ParseError> {
        PARSE_MEASURE.time(|| parser::parse(text, self.config.lex_mode))
    }

    fn eval(&self, ast: &Ast) -> Result<ComputeValue, EngineError> {
        EVALUATE_MEASURE.time(|| ast.eval().map_err(EngineError::from))
    }

    pub fn evaluate(&self, text: &str) -> Result<ComputeValue, EngineError> {
        let ast = self.parse(text)?;
        self.eval(&ast)
    }

    pub fn evaluate_buffer(&self, text: &str) -> Evaluation {
        match self.evaluate(text) {
            Ok(v) => Evaluation {
                result: Some(v),
                error: None,
            },
            Err(EngineError::Parse(e)) if !e.is_err() => {
                debug!("Unable to parse {:?}: {}", text, e);
                Evaluation::default()
            }
            Err(e) => Evaluation {
                result: None,
                error: Some(e.to_string()),
            },
        }
    }

    pub fn classify(&self, text: &str) -> Vec<Classification> {
        classify::classify(text)
    }

    pub fn serialize_tree(&self, text: &str) -> Option<TreeNode> {
        self.parse(text).ok().map(|ast| TreeNode::from(&ast))
    }

    /// Applies `action` to `session` and reports the re-evaluated buffer
    ///
    /// The edit always lands before evaluation so a failed evaluation leaves
    /// the edited buffer in place. Successful evaluations are stored in the
    /// session's memory register.
    pub fn apply_action(&self, session: &mut Session, action: Action) -> CalculatorResponse {
        debug!("Applying {:?} to {:?}", action, session.buffer());

        let applied = session.edit(&action);
        let mut response = CalculatorResponse {
            expression: session.buffer().to_string(),
            classifications: self.classify(session.buffer()),
            ..Default::default()
        };

        if !applied {
            response.result = Some(ResultValue::Text(NO_MEMORY_RESULT.to_string()));
            return response;
        }

        if session.buffer().is_empty() {
            return response;
        }

        let ast = match self.parse(session.buffer()) {
            Ok(ast) => ast,
            Err(e) if e.is_err() => {
                warn!("Rejected {:?}: {}", session.buffer(), e);
                response.result = Some(ResultValue::Text(ERROR_RESULT.to_string()));
                response.error = Some(e.to_string());
                return response;
            }
            Err(e) => {
                debug!("Unable to parse {:?}: {}", session.buffer(), e);
                return response;
            }
        };
        response.tree = Some(TreeNode::from(&ast));

        match self.eval(&ast) {
            Ok(v) => {
                session.remember(v);
                response.result = Some(ResultValue::Number(v));
            }
            Err(e) => {
                warn!("Failed to evaluate {:?}: {}", session.buffer(), e);
                response.result = Some(ResultValue::Text(ERROR_RESULT.to_string()));
                response.error = Some(e.to_string());
            }
        }
        response
    }
}
