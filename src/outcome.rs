//! The result of running a parser.
//!
//! Where a parser in the style of Hutton and Meijer returns a list of
//! pairs of things and strings, we return exactly one [`Outcome`]:
//! either a thing together with the rest of the input, or
//! a diagnostic code together with the input at the point of failure.
//!
//! ~~~
//! use monparse::Outcome;
//! let ok: Outcome<u8, &str> = Outcome::success(1, "rest");
//! assert_eq!(ok.map(|n| n + 1), Outcome::success(2, "rest"));
//!
//! let err: Outcome<u8, &str> = Outcome::failure("predicate", "?!");
//! assert_eq!(err.clone().map(|n| n + 1), err);
//! ~~~

use thiserror::Error;

/// Outcome of a parser run on some input `I`.
///
/// The `remainder` is always a suffix of the input given to the parser.
/// For a [`Outcome::Failure`], it is the point where parsing failed,
/// which is not necessarily the input that the parser started with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<O, I> {
    /// The parser recognised `value` and left `remainder` unconsumed.
    Success { value: O, remainder: I },
    /// The parser rejected the input; `code` tells which parser did so.
    Failure { code: String, remainder: I },
}

/// The failure part of an [`Outcome`], returned by [`Outcome::into_result`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure<I> {
    pub code: String,
    pub remainder: I,
}

impl<O, I> Outcome<O, I> {
    pub fn success(value: O, remainder: I) -> Self {
        Self::Success { value, remainder }
    }

    pub fn failure(code: impl Into<String>, remainder: I) -> Self {
        Self::Failure {
            code: code.into(),
            remainder,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Apply a function to a successful value, keeping failures verbatim.
    pub fn map<U>(self, f: impl FnOnce(O) -> U) -> Outcome<U, I> {
        match self {
            Self::Success { value, remainder } => Outcome::Success {
                value: f(value),
                remainder,
            },
            Self::Failure { code, remainder } => Outcome::Failure { code, remainder },
        }
    }

    /// Continue with the value and remainder of a success, short-circuit on failure.
    pub fn and_then<U>(self, f: impl FnOnce(O, I) -> Outcome<U, I>) -> Outcome<U, I> {
        match self {
            Self::Success { value, remainder } => f(value, remainder),
            Self::Failure { code, remainder } => Outcome::Failure { code, remainder },
        }
    }

    /// Replace the code of a failure.
    pub fn with_code(self, code: impl Into<String>) -> Self {
        match self {
            Self::Failure { remainder, .. } => Self::failure(code, remainder),
            ok => ok,
        }
    }

    pub fn value(&self) -> Option<&O> {
        match self {
            Self::Success { value, .. } => Some(value),
            Self::Failure { .. } => None,
        }
    }

    pub fn into_value(self) -> Option<O> {
        match self {
            Self::Success { value, .. } => Some(value),
            Self::Failure { .. } => None,
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { code, .. } => Some(code),
        }
    }

    pub fn remainder(&self) -> &I {
        match self {
            Self::Success { remainder, .. } | Self::Failure { remainder, .. } => remainder,
        }
    }

    pub fn into_result(self) -> Result<(O, I), Failure<I>> {
        match self {
            Self::Success { value, remainder } => Ok((value, remainder)),
            Self::Failure { code, remainder } => Err(Failure { code, remainder }),
        }
    }
}

/// A parse failure located in the original input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("parse failed ({code}) at offset {offset}")]
pub struct ParseError {
    pub code: String,
    /// Byte offset of the failure point in the original input.
    pub offset: usize,
}

impl ParseError {
    /// Locate a failure whose remainder is a suffix of `input`.
    pub fn new(input: &str, failure: Failure<&str>) -> Self {
        Self {
            code: failure.code,
            offset: input.len().saturating_sub(failure.remainder.len()),
        }
    }
}

/// Unpack a success into `(value, remainder)`, or return the failure from the enclosing function.
macro_rules! success_or_return {
    ($outcome:expr) => {
        match $outcome {
            $crate::Outcome::Success { value, remainder } => (value, remainder),
            $crate::Outcome::Failure { code, remainder } => {
                return $crate::Outcome::Failure { code, remainder }
            }
        }
    };
}
pub(crate) use success_or_return;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_keeps_failure_verbatim() {
        let f: Outcome<u32, &str> = Outcome::failure("digit-run", "x1");
        assert_eq!(f.map(|n| n * 2), Outcome::failure("digit-run", "x1"));
    }

    #[test]
    fn and_then_threads_remainder() {
        let o: Outcome<u32, &str> = Outcome::success(3, "abc");
        let next = o.and_then(|n, rest| Outcome::success(n + rest.len() as u32, &rest[1..]));
        assert_eq!(next, Outcome::success(6, "bc"));
    }

    #[test]
    fn parse_error_offset() {
        let input = "1 + x";
        let failure = Failure {
            code: "literal:(".to_string(),
            remainder: &input[4..],
        };
        let e = ParseError::new(input, failure);
        assert_eq!(e.offset, 4);
        assert_eq!(e.to_string(), "parse failed (literal:() at offset 4");
    }
}
