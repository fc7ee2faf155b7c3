use crate::ast::{BoolOperator, Expression};
use serde::Serialize;

/// A node of the parsed query tree.
///
/// A leaf holds exactly one expression; an internal node holds a boolean
/// operator and always two children.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    /// Single comparison
    ///
    /// # Example
    /// ```text
    /// status=200
    /// ```
    Leaf(Expression),

    /// Two subtrees joined by `and` / `or`
    ///
    /// # Example
    /// ```text
    /// status=200 and method=GET
    /// ```
    Internal {
        bool_operator: BoolOperator,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn leaf(expression: Expression) -> Self {
        Node::Leaf(expression)
    }

    pub fn internal(bool_operator: BoolOperator, left: Node, right: Node) -> Self {
        Node::Internal {
            bool_operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn expression(&self) -> Option<&Expression> {
        match self {
            Node::Leaf(expr) => Some(expr),
            Node::Internal { .. } => None,
        }
    }

    pub fn bool_operator(&self) -> Option<BoolOperator> {
        match self {
            Node::Internal { bool_operator, .. } => Some(*bool_operator),
            Node::Leaf(_) => None,
        }
    }

    pub fn left(&self) -> Option<&Node> {
        match self {
            Node::Internal { left, .. } => Some(left),
            Node::Leaf(_) => None,
        }
    }

    pub fn right(&self) -> Option<&Node> {
        match self {
            Node::Internal { right, .. } => Some(right),
            Node::Leaf(_) => None,
        }
    }

    /// All expressions, left to right.
    pub fn expressions(&self) -> Vec<&Expression> {
        let mut out = vec![];
        self.collect_expressions(&mut out);
        out
    }

    fn collect_expressions<'a>(&'a self, out: &mut Vec<&'a Expression>) {
        match self {
            Node::Leaf(expr) => out.push(expr),
            Node::Internal { left, right, .. } => {
                left.collect_expressions(out);
                right.collect_expressions(out);
            }
        }
    }

    /// Height of the tree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}
