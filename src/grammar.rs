//! A recursive-descent parser for sums and products of integers.
//!
//! The grammar is
//!
//! ~~~ text
//! expression ::= term '+' expression | term
//! term       ::= factor '*' term | factor
//! factor     ::= number | '(' expression ')'
//! ~~~
//!
//! Every production is one function that composes combinators,
//! and every production skips leading whitespace.
//! Both alternatives of `expression` (and of `term`) start with the same operand,
//! which is parsed only once; the compound alternative is preferred,
//! so that a whole chain `a + b + c` is consumed by one call of [`expression`].
//! The operators are therefore right-associative: `1 + 2 + 3` is `1 + (2 + 3)`.
//! If the operator or its right operand is missing,
//! the production yields the first operand alone, as if the
//! alternatives had been tried in order.
//!
//! The recursion depth of [`expression`] grows with the length of operator chains
//! and with bracket nesting; very large inputs can exhaust the stack.
//! [`expression_flat`] accepts the same language and yields the same trees,
//! but folds operator chains in a loop.
//!
//! ~~~
//! use monparse::{ast::Node, grammar, Outcome};
//! let n = Node::number;
//! assert_eq!(
//!     grammar::parse("2*(3 + 4)"),
//!     Outcome::success(Node::mult(n(2), Node::bracket(Node::add(n(3), n(4)))), ""),
//! );
//! assert!(grammar::parse("").is_failure());
//! ~~~

use tracing::{event, Level};

use crate::ast::Node;
use crate::prec_climb::{self, Associativity};
use crate::str::{digit_run, end, literal, skip_space};
use crate::{lazy, sequence3, unit, Combinator, Outcome, Parser};

/// `expression ::= term '+' expression | term`
pub fn expression<'a>() -> impl Parser<&'a str, O = Node> {
    let sum = term().then(right_operand("+", lazy!(expression)));
    skip_space(sum.map(|(t, e)| match e {
        Some(e) => Node::add(t, e),
        None => t,
    }))
}

/// `term ::= factor '*' term | factor`
pub fn term<'a>() -> impl Parser<&'a str, O = Node> {
    let product = factor().then(right_operand("*", lazy!(term)));
    skip_space(product.map(|(f, t)| match t {
        Some(t) => Node::mult(f, t),
        None => f,
    }))
}

/// `op rhs`, yielding `rhs`, or nothing (without consuming input) if that fails.
fn right_operand<'a, P>(op: &str, rhs: P) -> impl Parser<&'a str, O = Option<Node>>
where
    P: Parser<&'a str, O = Node>,
{
    let tail = literal(op).then(rhs).map(|(_, rhs)| Some(rhs));
    tail.or(unit(None))
}

/// `factor ::= number | '(' expression ')'`
pub fn factor<'a>() -> impl Parser<&'a str, O = Node> {
    skip_space(number_expr().or(bracket_expr()))
}

pub fn number_expr<'a>() -> impl Parser<&'a str, O = Node> {
    digit_run().map(Node::number)
}

pub fn bracket_expr<'a>() -> impl Parser<&'a str, O = Node> {
    sequence3(
        literal("("),
        lazy!(expression),
        literal(")"),
        |_: char, e: Node, _: char| Node::bracket(e),
    )
}

/// Parse an expression from the start of `input`.
///
/// Input after the expression is left in the remainder;
/// use [`parse_complete`] to reject it.
pub fn parse(input: &str) -> Outcome<Node, &str> {
    let outcome = expression().parse(input);
    log_outcome("parse", input, &outcome);
    outcome
}

/// Parse an expression that spans all of `input`, up to trailing whitespace.
///
/// Leftover input is reported as failure with code `"end"`,
/// whose remainder is the leftover input without leading whitespace.
///
/// ~~~
/// use monparse::{grammar, Outcome};
/// assert!(grammar::parse("1 + ").is_success());
/// assert_eq!(grammar::parse_complete("1 + "), Outcome::failure("end", "+ "));
/// ~~~
pub fn parse_complete(input: &str) -> Outcome<Node, &str> {
    let complete = expression().then(skip_space(end())).map(|(node, ())| node);
    let outcome = complete.parse(input);
    log_outcome("parse_complete", input, &outcome);
    outcome
}

/// Binary operators of the grammar, for [`prec_climb`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Mult,
}

impl prec_climb::Op for BinOp {
    fn precedence(&self) -> usize {
        match self {
            Self::Add => 0,
            Self::Mult => 1,
        }
    }

    fn associativity(&self) -> Associativity {
        Associativity::Right
    }
}

impl prec_climb::Expr<BinOp> for Node {
    fn from_op(lhs: Self, op: BinOp, rhs: Self) -> Self {
        match op {
            BinOp::Add => Node::add(lhs, rhs),
            BinOp::Mult => Node::mult(lhs, rhs),
        }
    }
}

fn bin_op<'a>() -> impl Parser<&'a str, O = BinOp> {
    let add = literal("+").map(|_| BinOp::Add);
    add.or(literal("*").map(|_| BinOp::Mult))
}

/// `expression ::= factor (('+' | '*') factor)*`, folded by precedence.
///
/// This accepts the same inputs as [`expression`], with the same outcomes.
pub fn expression_flat<'a>() -> impl Parser<&'a str, O = Node> {
    let tail = bin_op().then(lazy!(factor_flat)).many();
    let chain = lazy!(factor_flat).then(tail);
    skip_space(chain.map(|(head, tail)| prec_climb::climb(head, tail)))
}

fn factor_flat<'a>() -> impl Parser<&'a str, O = Node> {
    let bracket = sequence3(
        literal("("),
        lazy!(expression_flat),
        literal(")"),
        |_: char, e: Node, _: char| Node::bracket(e),
    );
    skip_space(number_expr().or(bracket))
}

/// Like [`parse`], but using [`expression_flat`].
pub fn parse_flat(input: &str) -> Outcome<Node, &str> {
    let outcome = expression_flat().parse(input);
    log_outcome("parse_flat", input, &outcome);
    outcome
}

fn log_outcome(entry: &str, input: &str, outcome: &Outcome<Node, &str>) {
    match outcome {
        Outcome::Success { value, remainder } => {
            event!(Level::DEBUG, entry, input, remainder = *remainder, node = ?value, "parsed");
        }
        Outcome::Failure { code, remainder } => {
            event!(
                Level::DEBUG,
                entry,
                input,
                code = code.as_str(),
                remainder = *remainder,
                "parse failed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(x: i64) -> Node {
        Node::number(x)
    }

    #[test]
    fn compound_alternative_first() {
        assert_eq!(
            parse("1+2+3"),
            Outcome::success(Node::add(n(1), Node::add(n(2), n(3))), "")
        );
        assert_eq!(
            parse("2*3+4"),
            Outcome::success(Node::add(Node::mult(n(2), n(3)), n(4)), "")
        );
    }

    #[test]
    fn leading_whitespace_is_invisible() {
        assert_eq!(parse("  \t7"), Outcome::success(n(7), ""));
        assert_eq!(parse(" ( 7 ) "), Outcome::success(Node::bracket(n(7)), " "));
    }

    #[test]
    fn leftover_input_stays_in_remainder() {
        assert_eq!(parse("1 + "), Outcome::success(n(1), " + "));
        assert_eq!(parse("1 2"), Outcome::success(n(1), " 2"));
    }

    #[test]
    fn failure_reports_last_alternative() {
        assert_eq!(parse(""), Outcome::failure("literal:(", ""));
        assert_eq!(parse("(1"), Outcome::failure("literal:)", ""));
        assert_eq!(parse("+"), Outcome::failure("literal:(", "+"));
    }

    #[test]
    fn complete_parse_allows_trailing_space() {
        assert_eq!(parse_complete(" 1 * 2 \n"), Outcome::success(Node::mult(n(1), n(2)), ""));
        assert_eq!(parse_complete("1 )"), Outcome::failure("end", ")"));
    }

    #[test]
    fn flat_agrees_on_leftovers() {
        for input in ["1 + ", "1*2+", "1+2*", "1+2*(", "(1", "", "1 2"] {
            assert_eq!(parse_flat(input), parse(input), "input {input:?}");
        }
    }

    #[test]
    fn deep_nesting_parses_in_one_pass() {
        let depth = 30;
        let input = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        let expected = (0..depth).fold(n(1), |node, _| Node::bracket(node));
        assert_eq!(parse(&input), Outcome::success(expected.clone(), ""));
        assert_eq!(parse_complete(&input), Outcome::success(expected, ""));

        let unclosed = format!("{}1", "(".repeat(depth));
        assert_eq!(parse(&unclosed), Outcome::failure("literal:)", ""));
        assert_eq!(parse_flat(&unclosed), parse(&unclosed));
    }

    #[test]
    fn flat_handles_long_chains() {
        let input = vec!["1"; 1_000].join(" + ");
        let (node, rest) = parse_flat(&input).into_result().unwrap();
        assert_eq!(rest, "");
        assert_eq!(crate::ast::evaluate(&node), 1_000);
    }
}
