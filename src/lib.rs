//! Zaehler - scoped reference-count tracking for tests of refcounted objects
//!
//! This library wraps a block of test code with a tracker bound to a fixed
//! set of refcounted objects, snapshots every object's strong count at scope
//! entry and exit, and asserts the observed deltas against expected values.
//! It is meant for tests of code that manipulates `Rc`/`Arc` handles (FFI
//! shims, handle caches, intrusive registries) where a refcount off by one
//! is a bug the compiler cannot catch.
//!
//! # Features
//!
//! - **One-shot lifecycle**: a tracker moves created → entered → exited,
//!   exactly once; fresh windows over the same objects come from `spawn`
//! - **Exact and inexact assertions**: expected deltas are integers or
//!   [`PseudoNum`] sign-class matchers (positive, negative, non-negative,
//!   non-positive, any)
//! - **Broadcast or positional**: one expected value applies to every
//!   tracked object, or one value per object in tracked order
//! - **Panic-safe scoping**: [`Tracker::track`] takes the exit snapshot even
//!   when the scope body panics
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use zaehler::{PseudoNum, Tracker};
//!
//! let a = Rc::new("spam");
//! let b = Rc::new("eggs");
//!
//! let mut tracker = Tracker::new([a.clone(), b.clone()]);
//! let _held = tracker.track(|| b.clone())?;
//!
//! // `b` gained exactly one reference, `a` none.
//! tracker.assert_delta([0, 1])?;
//!
//! // Assertions repeat freely; inexact matchers work too.
//! tracker.assert_delta([PseudoNum::Any, PseudoNum::Positive])?;
//! # Ok::<(), zaehler::TrackError>(())
//! ```
//!
//! The deltas a tracker reports are differences, so the strong reference the
//! tracker itself holds to each object (which keeps the object alive for the
//! whole measurement) cancels out and never shows up in an assertion.

mod count;
mod error;
mod pseudo;
mod track;

pub use count::{AnyHandle, RefCounted};
pub use error::{TrackError, TrackResult};
pub use pseudo::{Expected, PseudoNum};
pub use track::{State, Tracker};

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn basic_tracking() {
        let a = Rc::new(42);
        let mut tracker = Tracker::new([a.clone()]);
        let _held = tracker.track(|| a.clone()).unwrap();
        tracker.assert_delta([1]).unwrap();
    }

    #[test]
    fn no_change_no_error() {
        let a = Rc::new(1);
        let b = Rc::new(2);
        let mut tracker = Tracker::new([a.clone(), b.clone()]);
        tracker.track(|| ()).unwrap();
        tracker.assert_equal_rc().unwrap();
    }

    #[test]
    fn matcher_assertion() {
        let a = Rc::new(0);
        let mut tracker = Tracker::new([a.clone()]);
        let _held = tracker.track(|| (a.clone(), a.clone())).unwrap();
        tracker.assert_delta([PseudoNum::Positive]).unwrap();
    }
}
