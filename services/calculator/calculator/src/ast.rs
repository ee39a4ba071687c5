use calculator_client::{ComputeError, ComputeOperation, ComputeValue};

#[derive(Debug, Clone, PartialEq)]
pub enum Ast {
    Literal(ComputeValue),
    Binary(ComputeOperation, Box<Ast>, Box<Ast>),
    Negate(Box<Ast>),
}

impl Ast {
    pub fn binary(op: ComputeOperation, left: Ast, right: Ast) -> Ast {
        Ast::Binary(op, Box::new(left), Box::new(right))
    }

    pub fn negate(operand: Ast) -> Ast {
        Ast::Negate(Box::new(operand))
    }

    /// Folds the tree bottom-up, evaluating left operands before right ones
    ///
    /// The parser bounds the height of the tree, so the recursion here is
    /// bounded too.
    pub fn eval(&self) -> Result<ComputeValue, ComputeError> {
        match self {
            Ast::Literal(v) => v.finite(),
            Ast::Negate(operand) => Ok(-operand.eval()?),
            Ast::Binary(op, l, r) => {
                let left = l.eval()?;
                let right = r.eval()?;
                op.apply(left, right)
            }
        }
    }
}
