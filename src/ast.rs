use std::fmt;

use crate::interpreter::value::Number;

/// An abstract syntax tree (AST) node representing a formula.
///
/// The set of variants is closed and every node owns its children, so a tree
/// has no cycles and no sharing. Evaluation only reads the tree; the same
/// `Expr` can be evaluated any number of times, from any number of
/// independent contexts.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal.
    Number {
        /// The literal value.
        value: Number,
        /// Line number in the source code.
        line:  usize,
    },
    /// A binary arithmetic operation.
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number of the operator.
        line:  usize,
    },
    /// Assignment to a bare variable, `x = value`.
    Assign {
        /// Name of the variable being bound.
        name:  String,
        /// The value expression.
        value: Box<Self>,
        /// Line number of the `=`.
        line:  usize,
    },
    /// Assignment to a list element, `container[index] = value`.
    IndexAssign {
        /// Expression producing the list.
        container: Box<Self>,
        /// Expression producing the index.
        index:     Box<Self>,
        /// The value expression.
        value:     Box<Self>,
        /// Line number of the `=`.
        line:      usize,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A call, `callee(arguments...)`. The callee is any expression.
    Call {
        /// Expression producing the function.
        callee:    Box<Self>,
        /// Arguments, in source order.
        arguments: Vec<Self>,
        /// Line number of the `(`.
        line:      usize,
    },
    /// A list literal, `[elements...]`.
    Array {
        /// Elements, in source order.
        elements: Vec<Self>,
        /// Line number of the `[`.
        line:     usize,
    },
    /// Indexing expression, `container[index]`.
    Index {
        /// Expression producing the list.
        container: Box<Self>,
        /// Expression producing the index.
        index:     Box<Self>,
        /// Line number of the `[`.
        line:      usize,
    },
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// True division (`/`)
    Div,
    /// Exponentiation (`^`), left-associative
    Pow,
}

impl BinaryOperator {
    /// Applies the operator to two numbers.
    ///
    /// # Example
    /// ```
    /// use numfields::{Number, ast::BinaryOperator};
    ///
    /// let two = Number::Integer(2);
    /// assert_eq!(BinaryOperator::Pow.apply(two, Number::Integer(3)), Number::Integer(8));
    /// assert_eq!(BinaryOperator::Div.apply(two, Number::Integer(4)), Number::real(0.5));
    /// ```
    #[must_use]
    pub fn apply(self, left: Number, right: Number) -> Number {
        match self {
            Self::Add => left + right,
            Self::Sub => left - right,
            Self::Mul => left * right,
            Self::Div => left / right,
            Self::Pow => left.pow(right),
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
        };
        write!(f, "{operator}")
    }
}

/// One line of a rendered tree: either a node or an operator leaf.
enum TreeItem<'a> {
    Node(&'a Expr),
    Operator(BinaryOperator),
}

impl Expr {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use numfields::ast::Expr;
    ///
    /// let expr = Expr::Variable { name: "x".to_string(),
    ///                             line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Number { line, .. }
            | Self::BinaryOp { line, .. }
            | Self::Assign { line, .. }
            | Self::IndexAssign { line, .. }
            | Self::Variable { line, .. }
            | Self::Call { line, .. }
            | Self::Array { line, .. }
            | Self::Index { line, .. } => *line,
        }
    }

    /// Renders the tree with box-drawing connectors, one node per line.
    ///
    /// Binary operators appear as a leaf between their operands.
    ///
    /// # Example
    /// ```
    /// use numfields::{interpreter::lexer::scan, interpreter::parser::parse};
    ///
    /// let tree = parse(&scan("x = 1 + 2").unwrap()).unwrap();
    /// assert_eq!(tree.tree(),
    ///            "└── Assign x\n    └── BinaryOp\n        ├── Number 1\n        ├── +\n        \
    ///             └── Number 2\n");
    /// ```
    #[must_use]
    pub fn tree(&self) -> String {
        let mut out = String::new();
        write_tree(&mut out, &TreeItem::Node(self), "", true);
        out
    }

    fn label(&self) -> String {
        match self {
            Self::Number { value, .. } => format!("Number {value}"),
            Self::BinaryOp { .. } => "BinaryOp".to_string(),
            Self::Assign { name, .. } => format!("Assign {name}"),
            Self::IndexAssign { .. } => "IndexAssign".to_string(),
            Self::Variable { name, .. } => format!("Variable {name}"),
            Self::Call { .. } => "Call".to_string(),
            Self::Array { .. } => "Array".to_string(),
            Self::Index { .. } => "Index".to_string(),
        }
    }

    fn children(&self) -> Vec<TreeItem<'_>> {
        match self {
            Self::Number { .. } | Self::Variable { .. } => Vec::new(),
            Self::BinaryOp { left, op, right, .. } => {
                vec![TreeItem::Node(left), TreeItem::Operator(*op), TreeItem::Node(right)]
            },
            Self::Assign { value, .. } => vec![TreeItem::Node(value)],
            Self::IndexAssign { container,
                                index,
                                value,
                                .. } => {
                vec![TreeItem::Node(container), TreeItem::Node(index), TreeItem::Node(value)]
            },
            Self::Call { callee, arguments, .. } => {
                std::iter::once(TreeItem::Node(callee)).chain(arguments.iter().map(TreeItem::Node))
                                                       .collect()
            },
            Self::Array { elements, .. } => elements.iter().map(TreeItem::Node).collect(),
            Self::Index { container, index, .. } => {
                vec![TreeItem::Node(container), TreeItem::Node(index)]
            },
        }
    }
}

fn write_tree(out: &mut String, item: &TreeItem<'_>, indent: &str, is_last: bool) {
    let (label, children) = match item {
        TreeItem::Node(expr) => (expr.label(), expr.children()),
        TreeItem::Operator(op) => (op.to_string(), Vec::new()),
    };

    out.push_str(indent);
    out.push_str(if is_last { "└── " } else { "├── " });
    out.push_str(&label);
    out.push('\n');

    let child_indent = format!("{indent}{}", if is_last { "    " } else { "│   " });
    let count = children.len();
    for (i, child) in children.iter().enumerate() {
        write_tree(out, child, &child_indent, i + 1 == count);
    }
}
