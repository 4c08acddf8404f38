//! Syntax trees of arithmetic expressions.
//!
//! A [`Node`] is an immutable tree that exclusively owns its children.
//! It is observed through a [`Visitor`], which is how
//! [`print`] and [`evaluate`] are defined.
//!
//! ~~~
//! use monparse::ast::{self, Node};
//! let node = Node::mult(Node::number(2), Node::bracket(Node::add(Node::number(3), Node::number(4))));
//! assert_eq!(ast::print(&node), "2 * (3 + 4)");
//! assert_eq!(ast::evaluate(&node), 14);
//! ~~~

use core::fmt::{self, Display, Formatter};

/// An arithmetic expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Node {
    Number(i64),
    Add(Box<Node>, Box<Node>),
    Mult(Box<Node>, Box<Node>),
    Bracket(Box<Node>),
}

impl Node {
    /// A literal.
    ///
    /// The grammar only produces non-negative literals, and a negative one
    /// prints as `-n`, which does not parse back.
    pub fn number(n: i64) -> Self {
        Self::Number(n)
    }

    pub fn add(l: Node, r: Node) -> Self {
        Self::Add(Box::new(l), Box::new(r))
    }

    pub fn mult(l: Node, r: Node) -> Self {
        Self::Mult(Box::new(l), Box::new(r))
    }

    pub fn bracket(inner: Node) -> Self {
        Self::Bracket(Box::new(inner))
    }

    /// Fold the tree bottom-up with the given visitor.
    pub fn accept<V: Visitor>(&self, v: &mut V) -> V::Output {
        match self {
            Self::Number(n) => v.number(*n),
            Self::Add(l, r) => {
                let (l, r) = (l.accept(v), r.accept(v));
                v.add(l, r)
            }
            Self::Mult(l, r) => {
                let (l, r) = (l.accept(v), r.accept(v));
                v.mult(l, r)
            }
            Self::Bracket(inner) => {
                let inner = inner.accept(v);
                v.bracket(inner)
            }
        }
    }
}

/// Structural recursion over a [`Node`].
///
/// Every method receives the already visited children of the node.
pub trait Visitor {
    type Output;

    fn number(&mut self, n: i64) -> Self::Output;
    fn add(&mut self, l: Self::Output, r: Self::Output) -> Self::Output;
    fn mult(&mut self, l: Self::Output, r: Self::Output) -> Self::Output;
    fn bracket(&mut self, inner: Self::Output) -> Self::Output;
}

/// Computes the value of an expression.
///
/// Arithmetic wraps around on overflow, so evaluation is total.
pub struct Evaluator;

impl Visitor for Evaluator {
    type Output = i64;

    fn number(&mut self, n: i64) -> i64 {
        n
    }

    fn add(&mut self, l: i64, r: i64) -> i64 {
        l.wrapping_add(r)
    }

    fn mult(&mut self, l: i64, r: i64) -> i64 {
        l.wrapping_mul(r)
    }

    fn bracket(&mut self, inner: i64) -> i64 {
        inner
    }
}

/// Renders an expression with single spaces around operators.
///
/// A sum that is a direct operand of a product is put into parentheses,
/// so that the text parses back to a tree with the same value
/// even if the tree was built without a [`Node::Bracket`].
pub struct Printer;

/// Output of the [`Printer`].
pub struct Printed {
    pub text: String,
    /// Is this an unbracketed sum?
    sum: bool,
}

impl Printed {
    fn operand(self) -> String {
        if self.sum {
            format!("({})", self.text)
        } else {
            self.text
        }
    }
}

impl Visitor for Printer {
    type Output = Printed;

    fn number(&mut self, n: i64) -> Printed {
        Printed {
            text: n.to_string(),
            sum: false,
        }
    }

    fn add(&mut self, l: Printed, r: Printed) -> Printed {
        Printed {
            text: format!("{} + {}", l.text, r.text),
            sum: true,
        }
    }

    fn mult(&mut self, l: Printed, r: Printed) -> Printed {
        Printed {
            text: format!("{} * {}", l.operand(), r.operand()),
            sum: false,
        }
    }

    fn bracket(&mut self, inner: Printed) -> Printed {
        Printed {
            text: format!("({})", inner.text),
            sum: false,
        }
    }
}

/// Canonical textual rendering of a tree.
///
/// For trees whose literals are all non-negative, the text parses back
/// to a tree with the same value.
pub fn print(node: &Node) -> String {
    node.accept(&mut Printer).text
}

/// Arithmetic value of a tree.
pub fn evaluate(node: &Node) -> i64 {
    node.accept(&mut Evaluator)
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&print(self))
    }
}
