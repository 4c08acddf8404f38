//! Primitive parsers for [`&str`] input.
//!
//! None of the parsers here skips whitespace on its own,
//! except for [`literal`], which is meant for operator and bracket tokens.
//! Wrap a parser in [`skip_space`] to make leading whitespace invisible to it.

use crate::outcome::success_or_return;
use crate::{many1, Combinator, Input, Outcome, Parser};

/// Consume one character if it satisfies `test`.
///
/// Fails with code `"predicate"` otherwise, also on empty input.
///
/// ~~~
/// use monparse::{Outcome, Parser, str::predicate_char};
/// let upper = predicate_char(|c| c.is_uppercase());
/// assert_eq!(upper.parse("Ab"), Outcome::success('A', "b"));
/// assert_eq!(upper.parse("ab"), Outcome::failure("predicate", "ab"));
/// assert_eq!(upper.parse(""), Outcome::failure("predicate", ""));
/// ~~~
pub fn predicate_char<F: Fn(char) -> bool>(test: F) -> PredicateChar<F> {
    PredicateChar(test)
}

/// A parser returned by [`predicate_char`].
#[derive(Clone)]
pub struct PredicateChar<F>(F);

impl<'a, F: Fn(char) -> bool> Parser<&'a str> for PredicateChar<F> {
    type O = char;

    fn parse(&self, input: &'a str) -> Outcome<Self::O, &'a str> {
        match input.chars().next() {
            Some(c) if self.0(c) => Outcome::success(c, &input[c.len_utf8()..]),
            _ => Outcome::failure("predicate", input),
        }
    }
}

/// Collect the longest prefix whose characters satisfy `test`.
///
/// This never fails; the prefix may be empty.
pub fn take_while0<F: Fn(char) -> bool>(test: F) -> TakeWhile0<F> {
    TakeWhile0(test)
}

/// A parser returned by [`take_while0`].
#[derive(Clone)]
pub struct TakeWhile0<F>(F);

impl<'a, F: Fn(char) -> bool> Parser<&'a str> for TakeWhile0<F> {
    type O = &'a str;

    fn parse(&self, input: &'a str) -> Outcome<Self::O, &'a str> {
        let len = input
            .char_indices()
            .find(|(_, c)| !self.0(*c))
            .map_or(input.len(), |(i, _)| i);
        Outcome::success(&input[..len], &input[len..])
    }
}

/// Skip leading ASCII whitespace, then run `p`.
///
/// Skipping is idempotent: `skip_space(skip_space(p))` behaves like `skip_space(p)`.
///
/// ~~~
/// use monparse::{Outcome, Parser, str::{digit_run, skip_space}};
/// assert_eq!(skip_space(digit_run()).parse(" \t12 "), Outcome::success(12, " "));
/// ~~~
pub fn skip_space<P>(p: P) -> SkipSpace<P> {
    SkipSpace(p)
}

/// A parser returned by [`skip_space`].
#[derive(Clone)]
pub struct SkipSpace<P>(P);

impl<'a, P: Parser<&'a str>> Parser<&'a str> for SkipSpace<P> {
    type O = P::O;

    fn parse(&self, input: &'a str) -> Outcome<Self::O, &'a str> {
        let (_space, rest) = success_or_return!(space().parse(input));
        self.0.parse(rest)
    }
}

fn is_space(c: char) -> bool {
    c.is_ascii_whitespace()
}

fn space() -> TakeWhile0<fn(char) -> bool> {
    take_while0(is_space as fn(char) -> bool)
}

/// Parse a fixed one-character token, skipping whitespace before it.
///
/// Fails with code `"literal:<token>"`, where the remainder is
/// the input after the skipped whitespace.
///
/// # Panics
///
/// If `token` does not consist of exactly one character.
/// This is a mistake in the grammar, not in the parsed input.
///
/// ~~~
/// use monparse::{Outcome, Parser, str::literal};
/// assert_eq!(literal("+").parse("  + 1"), Outcome::success('+', " 1"));
/// assert_eq!(literal("+").parse("  * 1"), Outcome::failure("literal:+", "* 1"));
/// ~~~
///
/// ~~~ should_panic
/// monparse::str::literal("**");
/// ~~~
pub fn literal<'a>(token: &str) -> impl Parser<&'a str, O = char> + Clone {
    let mut chars = token.chars();
    let ch = match (chars.next(), chars.next()) {
        (Some(ch), None) => ch,
        _ => panic!("literal token must be exactly one character, got {token:?}"),
    };
    skip_space(predicate_char(move |c| c == ch)).with_code(format!("literal:{ch}"))
}

/// Run `p` and return the part of the input that it consumed.
pub fn consumed<P>(p: P) -> Consumed<P> {
    Consumed(p)
}

/// A parser returned by [`consumed`].
#[derive(Clone)]
pub struct Consumed<P>(P);

impl<'a, P: Parser<&'a str>> Parser<&'a str> for Consumed<P> {
    type O = &'a str;

    fn parse(&self, input: &'a str) -> Outcome<Self::O, &'a str> {
        let (_y, rest) = success_or_return!(self.0.parse(input));
        // `rest` is a suffix of `input`
        let len = input.len() - rest.len();
        Outcome::success(&input[..len], rest)
    }
}

/// Parse a non-empty run of ASCII digits as an integer.
///
/// Fails with code `"digit-run"` if there is no leading digit and
/// with `"integer-overflow"` (at the first digit) if the number does not fit into an [`i64`].
///
/// ~~~
/// use monparse::{Outcome, Parser, str::digit_run};
/// assert_eq!(digit_run().parse("042+"), Outcome::success(42, "+"));
/// assert_eq!(digit_run().parse("+1"), Outcome::failure("digit-run", "+1"));
/// assert_eq!(
///     digit_run().parse("99999999999999999999"),
///     Outcome::failure("integer-overflow", "99999999999999999999"),
/// );
/// ~~~
pub fn digit_run<'a>() -> impl Parser<&'a str, O = i64> + Clone {
    let digits = consumed(many1(predicate_char(|c| c.is_ascii_digit()))).with_code("digit-run");
    digits.filter_map("integer-overflow", |s: &str| s.parse::<i64>().ok())
}

/// Succeed without consuming anything if the input is exhausted.
///
/// Fails with code `"end"` otherwise.
pub fn end() -> End {
    End
}

/// A parser returned by [`end`].
#[derive(Clone, Copy, Debug)]
pub struct End;

impl<I: Input> Parser<I> for End {
    type O = ();

    fn parse(&self, input: I) -> Outcome<Self::O, I> {
        if input.remaining() == 0 {
            Outcome::success((), input)
        } else {
            Outcome::failure("end", input)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicate_char_on_multibyte() {
        let p = predicate_char(|c| c == 'λ');
        assert_eq!(p.parse("λx"), Outcome::success('λ', "x"));
    }

    #[test]
    fn take_while0_may_be_empty() {
        let p = take_while0(|c| c == 'a');
        assert_eq!(p.parse("aab"), Outcome::success("aa", "b"));
        assert_eq!(p.parse("b"), Outcome::success("", "b"));
        assert_eq!(p.parse("aa"), Outcome::success("aa", ""));
    }

    #[test]
    fn skip_space_is_idempotent() {
        let once = skip_space(literal("("));
        let twice = skip_space(skip_space(literal("(")));
        for input in ["", " ", "  (", "(x", " \n x"] {
            assert_eq!(once.parse(input), twice.parse(input));
        }
    }

    #[test]
    fn literal_failure_code() {
        assert_eq!(literal(")").parse(""), Outcome::failure("literal:)", ""));
    }

    #[test]
    #[should_panic(expected = "exactly one character")]
    fn literal_rejects_empty_token() {
        let _ = literal("");
    }

    #[test]
    fn digit_run_does_not_skip_space() {
        assert_eq!(digit_run().parse(" 1"), Outcome::failure("digit-run", " 1"));
    }

    #[test]
    fn end_only_on_empty_input() {
        assert_eq!(end().parse(""), Outcome::success((), ""));
        assert_eq!(end().parse("x"), Outcome::failure("end", "x"));
    }
}
