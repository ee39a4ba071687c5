use std::ops::{Add, Mul, Neg, Sub};

use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum_macros::{Display as StrumDisplay, EnumString};

/// Result sentinel reported when evaluation fails with an arithmetic error
pub const ERROR_RESULT: &str = "Error";

/// Result reported when recalling an empty memory register
pub const NO_MEMORY_RESULT: &str = "No value in memory";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, StrumDisplay, EnumString)]
#[serde(rename_all = "snake_case")]
pub enum ComputeOperation {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
    #[strum(serialize = "/")]
    Div,
}

impl ComputeOperation {
    pub fn apply(
        self,
        left: ComputeValue,
        right: ComputeValue,
    ) -> Result<ComputeValue, ComputeError> {
        let value = match self {
            Self::Add => left + right,
            Self::Sub => left - right,
            Self::Mul => left * right,
            Self::Div => left.checked_div(right)?,
        };
        value.finite()
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum ComputeError {
    #[display(fmt = "Division by zero")]
    DivisionByZero,

    #[display(fmt = "Result out of range")]
    Overflow,
}

impl std::error::Error for ComputeError {}

/// A numeric value that stays integral for as long as the arithmetic allows
#[derive(Debug, Display, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(untagged)]
pub enum ComputeValue {
    Int(i64),
    Float(f64),
}

impl ComputeValue {
    pub fn as_float(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Float(f) => f,
        }
    }

    /// Rejects infinities and NaN, which have no JSON representation
    pub fn finite(self) -> Result<Self, ComputeError> {
        match self {
            Self::Float(f) if !f.is_finite() => Err(ComputeError::Overflow),
            v => Ok(v),
        }
    }

    pub fn is_zero(self) -> bool {
        self.as_float() == 0.0
    }

    /// True division: integral only when the quotient is exact
    pub fn checked_div(self, rhs: Self) -> Result<Self, ComputeError> {
        if rhs.is_zero() {
            return Err(ComputeError::DivisionByZero);
        }
        Ok(match (self, rhs) {
            (Self::Int(l), Self::Int(r)) if l.checked_rem(r) == Some(0) => l
                .checked_div(r)
                .map(Self::Int)
                .unwrap_or_else(|| Self::Float(l as f64 / r as f64)),
            (l, r) => Self::Float(l.as_float() / r.as_float()),
        })
    }
}

// Integer overflow promotes to floating point instead of wrapping
macro_rules! op {
    ( $t: ty, $f: ident, $checked: ident ) => {
        impl $t for ComputeValue {
            type Output = ComputeValue;

            fn $f(self, rhs: Self) -> Self::Output {
                match (self, rhs) {
                    (Self::Int(l), Self::Int(r)) => l
                        .$checked(r)
                        .map(Self::Int)
                        .unwrap_or_else(|| Self::Float((l as f64).$f(r as f64))),
                    (l, r) => Self::Float(l.as_float().$f(r.as_float())),
                }
            }
        }
    };
}

op!(Add, add, checked_add);
op!(Sub, sub, checked_sub);
op!(Mul, mul, checked_mul);

impl Neg for ComputeValue {
    type Output = ComputeValue;

    fn neg(self) -> Self::Output {
        match self {
            Self::Int(i) => i
                .checked_neg()
                .map(Self::Int)
                .unwrap_or_else(|| Self::Float(-(i as f64))),
            Self::Float(f) => Self::Float(-f),
        }
    }
}

/// An editing action applied to a calculator session
///
/// Anything that isn't one of the named commands is appended to the input
#[derive(Debug, Clone, PartialEq, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    Backspace,
    Clear,
    Recall,
    #[strum(serialize = "=")]
    Evaluate,
    #[strum(default)]
    Append(String),
}

impl Action {
    pub fn from_key(key: &str) -> Action {
        key.parse().unwrap_or_else(|_| Action::Append(key.to_string()))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct CalculatorRequest {
    #[serde(default)]
    pub session: Option<String>,
    pub action: String,
}

impl CalculatorRequest {
    pub fn action(&self) -> Action {
        Action::from_key(&self.action)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    IntegerDigit,
    DecimalPoint,
    Operator,
    Parenthesis,
    MemoryRecall,
    Unknown,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Classification {
    pub character: char,
    pub category: Category,
}

/// A labeled tree for visualising a parsed expression
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct TreeNode {
    pub label: String,
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(label: impl Into<String>, children: Vec<TreeNode>) -> TreeNode {
        TreeNode {
            label: label.into(),
            children,
        }
    }

    pub fn leaf(label: impl Into<String>) -> TreeNode {
        Self::new(label, Vec::new())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ResultValue {
    Number(ComputeValue),
    Text(String),
}

/// Outcome of evaluating an expression outside of a session
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub struct Evaluation {
    pub result: Option<ComputeValue>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub struct CalculatorResponse {
    pub expression: String,
    pub result: Option<ResultValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub classifications: Vec<Classification>,
    #[serde(default)]
    pub tree: Option<TreeNode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        use crate::ComputeValue::*;

        assert_eq!(Int(2) + Int(3), Int(5));
        assert_eq!(Int(2) - Float(0.5), Float(1.5));
        assert_eq!(Int(4) * Int(-3), Int(-12));
        assert_eq!(Int(i64::MAX) + Int(1), Float(i64::MAX as f64 + 1.0));
        assert_eq!(-Int(i64::MIN), Float(-(i64::MIN as f64)));
        assert_eq!(-Float(2.5), Float(-2.5));
    }

    #[test]
    fn test_division() {
        use crate::ComputeValue::*;

        assert_eq!(Int(6).checked_div(Int(3)), Ok(Int(2)));
        assert_eq!(Int(7).checked_div(Int(2)), Ok(Float(3.5)));
        assert_eq!(Float(1.0).checked_div(Int(4)), Ok(Float(0.25)));
        assert_eq!(
            Int(i64::MIN).checked_div(Int(-1)),
            Ok(Float(-(i64::MIN as f64)))
        );
        assert_eq!(Int(5).checked_div(Int(0)), Err(ComputeError::DivisionByZero));
        assert_eq!(
            Int(5).checked_div(Float(0.0)),
            Err(ComputeError::DivisionByZero)
        );
    }

    #[test]
    fn test_overflow() {
        use crate::ComputeValue::*;

        let huge = Float(f64::MAX);
        assert_eq!(ComputeOperation::Mul.apply(huge, Int(2)), Err(ComputeError::Overflow));
        assert_eq!(ComputeOperation::Add.apply(huge, huge), Err(ComputeError::Overflow));
        assert_eq!(
            ComputeOperation::Div.apply(huge, Float(0.5)),
            Err(ComputeError::Overflow)
        );
        assert_eq!(Float(f64::NAN).finite(), Err(ComputeError::Overflow));
        assert_eq!(Float(f64::INFINITY).finite(), Err(ComputeError::Overflow));
        assert_eq!(ComputeOperation::Sub.apply(huge, huge), Ok(Float(0.0)));
        assert_eq!(
            ComputeOperation::Mul.apply(Int(i64::MAX), Int(2)),
            Ok(Float(i64::MAX as f64 * 2.0))
        );
    }

    #[test]
    fn test_operation_symbols() {
        assert_eq!(ComputeOperation::Add.to_string(), "+");
        assert_eq!(ComputeOperation::Div.to_string(), "/");
        assert_eq!("*".parse::<ComputeOperation>(), Ok(ComputeOperation::Mul));
        assert_eq!(
            ComputeOperation::Sub.apply(ComputeValue::Int(1), ComputeValue::Int(3)),
            Ok(ComputeValue::Int(-2))
        );
    }

    #[test]
    fn test_value_display() {
        assert_eq!(ComputeValue::Int(42).to_string(), "42");
        assert_eq!(ComputeValue::Float(2.5).to_string(), "2.5");
        assert_eq!(ComputeValue::Float(-0.25).to_string(), "-0.25");
    }

    #[test]
    fn test_action() {
        assert_eq!(Action::from_key("backspace"), Action::Backspace);
        assert_eq!(Action::from_key("clear"), Action::Clear);
        assert_eq!(Action::from_key("recall"), Action::Recall);
        assert_eq!(Action::from_key("="), Action::Evaluate);
        assert_eq!(Action::from_key("7"), Action::Append("7".to_string()));
        assert_eq!(Action::from_key("2*(3+4)"), Action::Append("2*(3+4)".to_string()));
    }

    #[test]
    fn test_wire_format() -> Result<(), Box<dyn std::error::Error>> {
        let request: CalculatorRequest = serde_json::from_str(r#"{"action": "+"}"#)?;
        assert_eq!(request.session, None);
        assert_eq!(request.action(), Action::Append("+".to_string()));

        let response = CalculatorResponse {
            expression: "1+1.5".to_string(),
            result: Some(ResultValue::Number(ComputeValue::Float(2.5))),
            error: None,
            classifications: vec![Classification {
                character: '1',
                category: Category::IntegerDigit,
            }],
            tree: Some(TreeNode::new("+", vec![TreeNode::leaf("1"), TreeNode::leaf("1.5")])),
        };

        let value = serde_json::to_value(&response)?;
        assert_eq!(value["result"], serde_json::json!(2.5));
        assert!(value.get("error").is_none());
        assert_eq!(value["classifications"][0]["category"], "integer_digit");
        assert_eq!(value["tree"]["children"][1]["label"], "1.5");

        let error = CalculatorResponse {
            result: Some(ResultValue::Text(ERROR_RESULT.to_string())),
            error: Some("Division by zero".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&error)?;
        assert_eq!(value["result"], "Error");
        assert_eq!(value["tree"], serde_json::Value::Null);

        let parsed: CalculatorResponse = serde_json::from_value(serde_json::to_value(&response)?)?;
        assert_eq!(parsed, response);
        Ok(())
    }
}
