//! Create new parsers by combining existing ones.
//!
//! There are two flavours of combinators:
//!
//! * Combinators in the [`Combinator`] trait:
//!   These take a fixed number of parsers; for example,
//!   [`Combinator::many`] takes one parser and
//!   [`Combinator::or`] takes two parsers.
//! * Free functions: These either take tuples of parsers ([`choice`], [`sequence`])
//!   or mirror the trait methods for use in prefix position ([`bind`], [`many`], ...).
//!
//! # Overview
//!
//! Here, `a`, `b` and `c` are languages that are recognised by parsers of the same name.
//!
//! | Language             | Parser
//! | :------------------- | :----------------------
//! | `ab`                 | [`a.then(b)`](Combinator::then)
//! | `abc`                | [`sequence((a, b, c))`](sequence) or [`sequence3(a, b, c, f)`](sequence3)
//! | <code>a\|b</code>    | [`a.or(b)`](Combinator::or)
//! | <code>a\|b\|c</code> | [`a.or(b).or(c)`](Combinator::or) or [`choice((a, b, c))`](choice)
//! | `a*`                 | [`a.many()`](Combinator::many)
//! | `a+`                 | [`a.many1()`](Combinator::many1)
//!
//! All of these can be written with [`Combinator::bind`] and [`unit`](crate::unit) alone;
//! for example, `a.then(b)` behaves like
//! `a.bind(|x| b.map(move |y| (x.clone(), y)))`.
//! The dedicated types exist because they do not need to clone intermediate outputs.
//!
//! Parser `p`                                       | `p.parse(i)`
//! :----------------------------------------------- | :---------------------------------------------
//! [`a.map(f)`](Combinator::map)                    | <code>a.parse(i).map(f)</code>
//! [`a.bind(f)`](Combinator::bind)                  | <code>a.parse(i).and_then(\|y, rest\| f(y).parse(rest))</code>
//! [`a.with_code(c)`](Combinator::with_code)        | <code>a.parse(i).with_code(c)</code>
//! [`a.filter_map(c, f)`](Combinator::filter_map)   | like `a.map(f)`, but fails with `c` at `i` when `f` yields `None`
use crate::outcome::success_or_return;
use crate::{Input, Outcome, Parser};

/// A combinator combines parsers to form new ones.
///
/// Every [`Parser`] implements the [`Combinator`] trait.
/// To use the [`Combinator`] trait, import it as follows:
///
/// ~~~
/// use monparse::Combinator;
/// ~~~
pub trait Combinator<I>: Parser<I>
where
    Self: Sized,
{
    /// Apply a function to the output of the parser.
    fn map<O, F: Fn(Self::O) -> O>(self, f: F) -> Map<Self, F> {
        Map(self, f)
    }

    /// Run the parser, then create a second parser from its output and run it on the rest.
    ///
    /// On failure of the first parser, its failure is returned unchanged.
    fn bind<P: Parser<I>, F: Fn(Self::O) -> P>(self, f: F) -> Bind<Self, F> {
        Bind(self, f)
    }

    /// If the first parser succeeds, return its outcome, otherwise
    /// run the second parser on the *same* input.
    ///
    /// The expression `p0.or(p1)/*...*/.or(pn)` is equivalent to
    /// `choice((p0, p1,/*..., */pn))`.
    fn or<P: Parser<I, O = Self::O>>(self, other: P) -> Choice<(Self, P)>
    where
        I: Clone,
    {
        Choice((self, other))
    }

    /// If both parsers succeed one after the other, return the pair of their outputs.
    fn then<P: Parser<I>>(self, other: P) -> Sequence<(Self, P)> {
        Sequence((self, other))
    }

    /// On failure, replace the failure code by `code`.
    ///
    /// The remainder of the failure stays where it was.
    fn with_code(self, code: impl Into<String>) -> WithCode<Self> {
        WithCode(self, code.into())
    }

    /// If `f` yields `Some(y)` for the parser output, succeed with `y`,
    /// else fail with `code` at the input where the parser started.
    fn filter_map<O, F: Fn(Self::O) -> Option<O>>(
        self,
        code: impl Into<String>,
        f: F,
    ) -> FilterMap<Self, F>
    where
        I: Clone,
    {
        FilterMap(self, code.into(), f)
    }

    /// Apply the parser as often as possible, collecting its outputs.
    ///
    /// The resulting parser never fails.
    fn many(self) -> Many<Self>
    where
        I: Input,
    {
        Many(self)
    }

    /// Like [`Combinator::many`], but demand at least one match.
    fn many1(self) -> Many1<Self>
    where
        I: Input,
    {
        Many1(self)
    }
}

impl<I, T: Parser<I>> Combinator<I> for T {}

/// Apply a function to the output of a parser; see [`Combinator::map`].
pub fn map<P, F>(p: P, f: F) -> Map<P, F> {
    Map(p, f)
}

/// Sequence a parser with a parser-producing function; see [`Combinator::bind`].
pub fn bind<P, F>(p: P, f: F) -> Bind<P, F> {
    Bind(p, f)
}

/// Apply a parser as often as possible; see [`Combinator::many`].
pub fn many<P>(p: P) -> Many<P> {
    Many(p)
}

/// Apply a parser at least once and then as often as possible; see [`Combinator::many1`].
pub fn many1<P>(p: P) -> Many1<P> {
    Many1(p)
}

/// A parser returned by [`Combinator::map`].
#[derive(Clone)]
pub struct Map<P, F>(P, F);

impl<I, P: Parser<I>, O, F: Fn(P::O) -> O> Parser<I> for Map<P, F> {
    type O = O;

    fn parse(&self, input: I) -> Outcome<Self::O, I> {
        self.0.parse(input).map(&self.1)
    }
}

/// A parser returned by [`Combinator::bind`].
#[derive(Clone)]
pub struct Bind<P, F>(P, F);

impl<I, P1: Parser<I>, P2: Parser<I>, F: Fn(P1::O) -> P2> Parser<I> for Bind<P1, F> {
    type O = P2::O;

    fn parse(&self, input: I) -> Outcome<Self::O, I> {
        let (y, rest) = success_or_return!(self.0.parse(input));
        self.1(y).parse(rest)
    }
}

/// A parser returned by [`Combinator::with_code`].
#[derive(Clone)]
pub struct WithCode<P>(P, String);

impl<I, P: Parser<I>> Parser<I> for WithCode<P> {
    type O = P::O;

    fn parse(&self, input: I) -> Outcome<Self::O, I> {
        match self.0.parse(input) {
            Outcome::Failure { remainder, .. } => Outcome::failure(self.1.clone(), remainder),
            ok => ok,
        }
    }
}

/// A parser returned by [`Combinator::filter_map`].
#[derive(Clone)]
pub struct FilterMap<P, F>(P, String, F);

impl<I: Clone, P: Parser<I>, O, F: Fn(P::O) -> Option<O>> Parser<I> for FilterMap<P, F> {
    type O = O;

    fn parse(&self, input: I) -> Outcome<Self::O, I> {
        let (y, rest) = success_or_return!(self.0.parse(input.clone()));
        match self.2(y) {
            Some(y) => Outcome::success(y, rest),
            None => Outcome::failure(self.1.clone(), input),
        }
    }
}

/// A parser returned by [`Combinator::many`].
///
/// Repetition ends at the first failure of the inner parser,
/// whose failure is discarded, and the input from before that attempt is kept.
/// It also ends after a match that consumed nothing;
/// such a match is part of the output once.
#[derive(Clone)]
pub struct Many<P>(P);

impl<I: Input, P: Parser<I>> Parser<I> for Many<P> {
    type O = Vec<P::O>;

    fn parse(&self, mut input: I) -> Outcome<Self::O, I> {
        let mut out = Vec::new();
        while let Outcome::Success { value, remainder } = self.0.parse(input) {
            out.push(value);
            let progress = remainder.remaining() < input.remaining();
            input = remainder;
            if !progress {
                break;
            }
        }
        Outcome::success(out, input)
    }
}

/// A parser returned by [`Combinator::many1`].
#[derive(Clone)]
pub struct Many1<P>(P);

impl<I: Input, P: Parser<I>> Parser<I> for Many1<P> {
    type O = Vec<P::O>;

    fn parse(&self, input: I) -> Outcome<Self::O, I> {
        let (first, rest) = success_or_return!(self.0.parse(input));
        if rest.remaining() >= input.remaining() {
            return Outcome::success(vec![first], rest);
        }
        Many(&self.0).parse(rest).map(|mut tail| {
            tail.insert(0, first);
            tail
        })
    }
}

/// A parser returned by [`choice`].
#[derive(Clone)]
pub struct Choice<T>(T);

/// Return the outcome of the first provided parser that succeeds.
///
/// Every alternative is tried on the same input.
/// If all fail, the failure of the last alternative is returned.
///
/// ~~~
/// use monparse::{choice, Outcome, Parser, str::predicate_char};
/// let digit = predicate_char(|c| c.is_ascii_digit());
/// let alpha = predicate_char(|c| c.is_ascii_alphabetic());
/// let parser = choice((digit, alpha));
/// assert_eq!(parser.parse("1a"), Outcome::success('1', "a"));
/// assert_eq!(parser.parse("a1"), Outcome::success('a', "1"));
/// assert_eq!(parser.parse("?"), Outcome::failure("predicate", "?"));
/// ~~~
pub fn choice<T>(t: T) -> Choice<T> {
    Choice(t)
}

/// A parser returned by [`sequence`].
#[derive(Clone)]
pub struct Sequence<T>(T);

/// Return the outputs of all provided parsers, if all succeed one after the other.
///
/// This behaves like nested [`Combinator::bind`]s:
/// the first failure is returned as is and partial outputs are discarded.
///
/// ~~~
/// use monparse::{sequence, Outcome, Parser, str::{digit_run, literal}};
/// let parser = sequence((digit_run(), literal("*"), digit_run()));
/// assert_eq!(parser.parse("6 *7!"), Outcome::success((6, '*', 7), "!"));
/// assert_eq!(parser.parse("6 + 7"), Outcome::failure("literal:*", "+ 7"));
/// ~~~
pub fn sequence<T>(t: T) -> Sequence<T> {
    Sequence(t)
}

/// Generate parsing code for `Choice<(P0, P1, ..., Pn)>`.
///
/// The input has to be cloned for all but the last parser,
/// which is able to consume the input.
macro_rules! impl_choice {
    ($input:ident, $head:ident $($tail:ident)+) => {
        if let ok @ Outcome::Success { .. } = $head.parse($input.clone()) {
            return ok;
        }
        impl_choice!($input, $($tail)+)
    };
    ($input:ident, $head:ident) => {
        return $head.parse($input)
    };
}

/// Generate `impl`s for `Choice<(P0, P1, ..., Pn)>` and `Sequence<(P0, P1, ..., Pn)>`.
macro_rules! impl_sequence_choice {
    ($($acc:ident)+; $head:ident $($tail:ident)*) => {
        impl_sequence_choice!($($acc)+      ;          );
        impl_sequence_choice!($($acc)+ $head; $($tail)*);
    };
    ($($parser:ident)+;) => {
        #[allow(non_snake_case)]
        impl<I, $($parser: Parser<I>),+> Parser<I> for Sequence<($($parser),+,)> {
            type O = ($($parser::O),+,);

            fn parse(&self, input: I) -> Outcome<Self::O, I> {
                let Self(($($parser),+,)) = self;
                $(let ($parser, input) = success_or_return!($parser.parse(input));)+
                Outcome::success(($($parser),+,), input)
            }
        }

        #[allow(non_snake_case)]
        impl<I: Clone, O, $($parser: Parser<I, O = O>),+> Parser<I> for Choice<($($parser),+,)> {
            type O = O;

            fn parse(&self, input: I) -> Outcome<Self::O, I> {
                let Self(($($parser),+,)) = self;
                impl_choice!(input, $($parser)*);
            }
        }
    }
}
impl_sequence_choice!(P1; P2 P3 P4 P5 P6 P7 P8 P9);

/// Run three parsers in sequence and combine their outputs.
///
/// This is `p1.bind(|a| p2.bind(|b| p3.bind(|c| unit(combine(a, b, c)))))`.
/// On failure, the remainder is the one of the failing parser.
pub fn sequence3<P1, P2, P3, F>(p1: P1, p2: P2, p3: P3, combine: F) -> Sequence3<P1, P2, P3, F> {
    Sequence3(Sequence((p1, p2, p3)), combine)
}

/// A parser returned by [`sequence3`].
#[derive(Clone)]
pub struct Sequence3<P1, P2, P3, F>(Sequence<(P1, P2, P3)>, F);

impl<I, P1, P2, P3, O, F> Parser<I> for Sequence3<P1, P2, P3, F>
where
    P1: Parser<I>,
    P2: Parser<I>,
    P3: Parser<I>,
    F: Fn(P1::O, P2::O, P3::O) -> O,
{
    type O = O;

    fn parse(&self, input: I) -> Outcome<Self::O, I> {
        self.0.parse(input).map(|(a, b, c)| self.1(a, b, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::str::{digit_run, predicate_char};
    use crate::{fail, unit};

    fn digit() -> impl Parser<&'static str, O = char> {
        predicate_char(|c| c.is_ascii_digit())
    }

    #[test]
    fn or_retries_on_original_input() {
        let ab = sequence((predicate_char(|c| c == 'a'), predicate_char(|c| c == 'b')));
        let a_only = predicate_char(|c| c == 'a').map(|a| (a, a));
        let p = ab.or(a_only);
        assert_eq!(p.parse("ac"), Outcome::success(('a', 'a'), "c"));
    }

    #[test]
    fn choice_reports_last_failure() {
        let p = choice((fail::<char>("first"), digit(), fail("last")));
        assert_eq!(p.parse("x"), Outcome::failure("last", "x"));
        assert_eq!(p.parse("1"), Outcome::success('1', ""));
    }

    #[test]
    fn sequence_fails_at_deepest_point() {
        let p = sequence3(digit(), digit(), digit(), |a: char, b: char, c: char| [a, b, c]);
        assert_eq!(p.parse("12x4"), Outcome::failure("predicate", "x4"));
        assert_eq!(p.parse("1234"), Outcome::success(['1', '2', '3'], "4"));
    }

    #[test]
    fn many_and_many1() {
        assert_eq!(digit().many().parse("x"), Outcome::success(vec![], "x"));
        assert_eq!(
            digit().many().parse("12x"),
            Outcome::success(vec!['1', '2'], "x")
        );
        assert_eq!(digit().many1().parse("x"), Outcome::failure("predicate", "x"));
        assert_eq!(many1(digit()).parse("7"), Outcome::success(vec!['7'], ""));
    }

    #[test]
    fn many_terminates_without_progress() {
        assert_eq!(many(unit(0)).parse("abc"), Outcome::success(vec![0], "abc"));
        assert_eq!(many1(unit(0)).parse("abc"), Outcome::success(vec![0], "abc"));
    }

    #[test]
    fn bind_short_circuits() {
        let p = digit().bind(|_| -> crate::Fail<char> { panic!("must not be called") });
        assert_eq!(p.parse("x"), Outcome::failure("predicate", "x"));
    }

    #[test]
    fn filter_map_fails_at_start() {
        let even = digit_run().filter_map("odd", |n| (n % 2 == 0).then_some(n));
        assert_eq!(even.parse("42 "), Outcome::success(42, " "));
        assert_eq!(even.parse("41 "), Outcome::failure("odd", "41 "));
    }

    #[test]
    fn with_code_keeps_remainder() {
        let p = sequence((digit(), digit())).with_code("two-digits");
        assert_eq!(p.parse("1x"), Outcome::failure("two-digits", "x"));
    }
}
