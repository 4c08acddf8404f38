//! Monadic parser combinators, and an arithmetic grammar built from them.
//!
//! The crate is organised bottom-up:
//!
//! * [`Outcome`] is what every parser returns.
//! * [`Parser`] is the trait of everything that turns input into an [`Outcome`].
//!   [`unit`] and [`Combinator::bind`] make parsers a monad,
//!   and every other combinator in [`combinator`] is built on top of these.
//! * [`str`] contains primitive parsers for string slices.
//! * [`grammar`] encodes a small BNF for sums and products of integers,
//!   yielding [`ast::Node`]s that can be printed and evaluated.
//!
//! ~~~
//! use monparse::{ast, grammar, Outcome};
//! let (node, rest) = grammar::parse("2*(3 + 4)").into_result().unwrap();
//! assert_eq!(rest, "");
//! assert_eq!(ast::evaluate(&node), 14);
//! assert_eq!(ast::print(&node), "2 * (3 + 4)");
//! ~~~
#![forbid(unsafe_code)]

pub mod ast;
pub mod combinator;
pub mod grammar;
pub mod outcome;
pub mod prec_climb;
pub mod str;

#[doc(inline)]
pub use combinator::{bind, choice, many, many1, map, sequence, sequence3, Combinator};
#[doc(inline)]
pub use outcome::{Failure, Outcome, ParseError};

/// A parser takes input and yields an [`Outcome`].
///
/// This is the rhyme of Fritz Ruehr, "a parser for things is a function from strings
/// to lists of pairs of things and strings", with two changes:
///
/// * The input is generalised to any type `I`; most parsers in this crate use `&str`.
/// * Instead of a list of pairs, there is exactly one [`Outcome`],
///   which in case of failure additionally says *why* and *where* parsing stopped.
///
/// [`Parser::parse`] takes `&self`, so the same parser can be run on many inputs
/// (also from several threads at once, if it is [`Sync`]).
/// Running a parser twice on the same input yields the same outcome.
pub trait Parser<I> {
    type O;

    /// Parse a value of type [`Self::O`].
    fn parse(&self, input: I) -> Outcome<Self::O, I>;
}

impl<I, P: Parser<I> + ?Sized> Parser<I> for &P {
    type O = P::O;

    fn parse(&self, input: I) -> Outcome<Self::O, I> {
        (**self).parse(input)
    }
}

/// Input that can tell how much of it is left.
///
/// Repetition uses this to stop when a parser succeeds without consuming anything.
pub trait Input: Copy {
    fn remaining(&self) -> usize;
}

impl Input for &str {
    fn remaining(&self) -> usize {
        self.len()
    }
}

/// Construct a parser from a function.
///
/// ~~~
/// use monparse::{from_fn, Outcome, Parser};
/// let first = from_fn(|input: &str| match input.chars().next() {
///     Some(c) => Outcome::success(c, &input[c.len_utf8()..]),
///     None => Outcome::failure("empty", input),
/// });
/// assert_eq!(first.parse("ab"), Outcome::success('a', "b"));
/// ~~~
pub fn from_fn<I, O, F: Fn(I) -> Outcome<O, I>>(f: F) -> FromFn<F> {
    FromFn(f)
}

/// A parser that returns the outcome of the function `F` called with the given input.
///
/// This is returned by [`from_fn`].
#[derive(Clone)]
pub struct FromFn<F>(F);

impl<I, O, F: Fn(I) -> Outcome<O, I>> Parser<I> for FromFn<F> {
    type O = O;

    fn parse(&self, input: I) -> Outcome<Self::O, I> {
        self.0(input)
    }
}

/// Lazily construct a parser from a function.
///
/// This is how recursive parsers refer to themselves:
/// `lazy!(p)` expands to `from_fn(|input| p().parse(input))`, whose type
/// does not mention the type of `p()`, so the recursion does not produce
/// an infinitely large parser type.
///
/// ~~~
/// use monparse::{lazy, Combinator, Outcome, Parser, str::literal};
/// // nested := '(' nested ')' | ε, yielding the nesting depth
/// fn nested<'a>() -> impl Parser<&'a str, O = usize> {
///     let inner = literal("(").bind(|_| lazy!(nested));
///     let deeper = inner.bind(|n| literal(")").map(move |_| n + 1));
///     deeper.or(monparse::unit(0))
/// }
/// assert_eq!(nested().parse("((()))"), Outcome::success(3, ""));
/// ~~~
#[macro_export]
macro_rules! lazy {
    ($p:expr) => {
        $crate::from_fn(|input| $crate::Parser::parse(&$p(), input))
    };
}

/// Return a parser that consumes nothing and yields a clone of `value`.
///
/// Together with [`Combinator::bind`], this makes parsers a monad.
pub fn unit<O: Clone>(value: O) -> Unit<O> {
    Unit(value)
}

/// A parser returned by [`unit`].
#[derive(Clone)]
pub struct Unit<O>(O);

impl<I, O: Clone> Parser<I> for Unit<O> {
    type O = O;

    fn parse(&self, input: I) -> Outcome<Self::O, I> {
        Outcome::success(self.0.clone(), input)
    }
}

/// Return a parser that always fails with `code`, without consuming input.
pub fn fail<O>(code: impl Into<String>) -> Fail<O> {
    Fail(code.into(), core::marker::PhantomData)
}

/// A parser returned by [`fail`].
pub struct Fail<O>(String, core::marker::PhantomData<fn() -> O>);

impl<I, O> Parser<I> for Fail<O> {
    type O = O;

    fn parse(&self, input: I) -> Outcome<Self::O, I> {
        Outcome::failure(self.0.clone(), input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_consumes_nothing() {
        assert_eq!(unit('x').parse("abc"), Outcome::success('x', "abc"));
        assert_eq!(unit(1).parse(&[1, 2][..]), Outcome::success(1, &[1, 2][..]));
    }

    #[test]
    fn fail_keeps_input() {
        let p = fail::<()>("nope");
        assert_eq!(p.parse("abc"), Outcome::failure("nope", "abc"));
    }

    #[test]
    fn parser_can_be_run_repeatedly() {
        let p = unit(7u8);
        let by_ref = &p;
        assert_eq!(by_ref.parse("a"), p.parse("a"));
        assert_eq!(p.parse("a"), Outcome::success(7, "a"));
    }
}
