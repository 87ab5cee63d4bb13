//! Pseudo-numbers for inexact delta assertions
//!
//! Sometimes a test knows only the sign of a refcount change, not its exact
//! size. A [`PseudoNum`] stands in for such a constrained-but-inexact delta:
//! - `Positive` matches any delta `> 0`
//! - `Negative` matches any delta `< 0`
//! - `NonNegative` matches any delta `>= 0`
//! - `NonPositive` matches any delta `<= 0`
//! - `Any` matches every delta
//!
//! Pseudo-numbers are not numbers: no arithmetic, ordering, or comparison
//! with integers exists on the type, so using one where an actual count is
//! needed fails at compile time. Their only capability is
//! [`matches`](PseudoNum::matches).

use std::fmt;

/// A stand-in for an unspecified delta, constrained to a sign class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PseudoNum {
    /// Strictly greater than zero
    Positive,
    /// Strictly less than zero
    Negative,
    /// Zero or greater
    NonNegative,
    /// Zero or less
    NonPositive,
    /// Matches everything
    Any,
}

impl PseudoNum {
    /// Whether `actual` falls in this pseudo-number's class
    pub fn matches(self, actual: i64) -> bool {
        match self {
            PseudoNum::Positive => actual > 0,
            PseudoNum::Negative => actual < 0,
            PseudoNum::NonNegative => actual >= 0,
            PseudoNum::NonPositive => actual <= 0,
            PseudoNum::Any => true,
        }
    }

    /// The sign-swapped pseudo-number
    ///
    /// `Positive` ↔ `Negative`, `NonNegative` ↔ `NonPositive`; `Any` is its
    /// own swap. `p.negated().matches(x)` equals `p.matches(-x)` for every
    /// `x` that negates without overflow.
    pub fn negated(self) -> Self {
        match self {
            PseudoNum::Positive => PseudoNum::Negative,
            PseudoNum::Negative => PseudoNum::Positive,
            PseudoNum::NonNegative => PseudoNum::NonPositive,
            PseudoNum::NonPositive => PseudoNum::NonNegative,
            PseudoNum::Any => PseudoNum::Any,
        }
    }

    /// The predicate complement, except that `Any` stays `Any`
    ///
    /// `Positive` ↔ `NonPositive`, `Negative` ↔ `NonNegative`. For the four
    /// sign classes, `p.complement().matches(x) == !p.matches(x)`.
    pub fn complement(self) -> Self {
        match self {
            PseudoNum::Positive => PseudoNum::NonPositive,
            PseudoNum::NonPositive => PseudoNum::Positive,
            PseudoNum::Negative => PseudoNum::NonNegative,
            PseudoNum::NonNegative => PseudoNum::Negative,
            PseudoNum::Any => PseudoNum::Any,
        }
    }
}

impl fmt::Display for PseudoNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PseudoNum::Positive => "Positive",
            PseudoNum::Negative => "Negative",
            PseudoNum::NonNegative => "NonNegative",
            PseudoNum::NonPositive => "NonPositive",
            PseudoNum::Any => "Any",
        };
        f.write_str(name)
    }
}

/// An expected delta: an exact integer or a pseudo-number
///
/// This is the value type accepted by
/// [`Tracker::assert_delta`](crate::Tracker::assert_delta). Integers and
/// [`PseudoNum`] convert into it, so homogeneous argument lists can be
/// written directly; mixed lists spell out the variants:
///
/// ```
/// use zaehler::{Expected, PseudoNum};
///
/// let exact: Expected = 1.into();
/// let loose: Expected = PseudoNum::NonNegative.into();
/// assert!(exact.matches(1));
/// assert!(loose.matches(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// The delta must equal this value exactly
    Exact(i64),
    /// The delta must fall in the pseudo-number's class
    Pseudo(PseudoNum),
}

impl Expected {
    /// Whether `actual` satisfies this expectation
    pub fn matches(self, actual: i64) -> bool {
        match self {
            Expected::Exact(value) => actual == value,
            Expected::Pseudo(pseudo) => pseudo.matches(actual),
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Exact(value) => write!(f, "{value}"),
            Expected::Pseudo(pseudo) => write!(f, "{pseudo}"),
        }
    }
}

impl From<PseudoNum> for Expected {
    fn from(pseudo: PseudoNum) -> Self {
        Expected::Pseudo(pseudo)
    }
}

macro_rules! impl_expected_from_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Expected {
                fn from(value: $ty) -> Self {
                    Expected::Exact(value as i64)
                }
            }
        )*
    };
}

impl_expected_from_int!(i8, i16, i32, i64, isize, u8, u16, u32);
