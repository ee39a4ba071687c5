use calculator_client::TreeNode;

use crate::ast::Ast;

impl From<&Ast> for TreeNode {
    fn from(ast: &Ast) -> Self {
        match ast {
            Ast::Literal(v) => TreeNode::leaf(v.to_string()),
            Ast::Negate(operand) => TreeNode::new("-", vec![TreeNode::from(operand.as_ref())]),
            Ast::Binary(op, l, r) => TreeNode::new(
                op.to_string(),
                vec![TreeNode::from(l.as_ref()), TreeNode::from(r.as_ref())],
            ),
        }
    }
}
