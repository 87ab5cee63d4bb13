//! Scoped reference-count tracker
//!
//! A [`Tracker`] is bound to a fixed, ordered set of refcounted handles. It
//! snapshots every object's strong count when the scope is entered, again
//! when it is exited, and afterwards answers assertions about the per-object
//! delta. The lifecycle is one-shot: created → entered → exited, never
//! backwards, never reused. A fresh window over the same objects comes from
//! [`Tracker::spawn`], not from re-entering.
//!
//! The tracker keeps one strong reference of its own to each object, so the
//! snapshots include that reference at both ends and it cancels out of every
//! delta. It also guarantees the objects outlive the measurement.

use crate::count::RefCounted;
use crate::error::{TrackError, TrackResult};
use crate::pseudo::Expected;
use std::fmt;

/// Lifecycle state of a [`Tracker`]
///
/// Transitions are strictly forward: `Created → Entered → Exited`. Each
/// transition happens exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Constructed, no counts taken yet
    Created,
    /// Entry snapshot taken, scope body running
    Entered,
    /// Exit snapshot taken, assertions available
    Exited,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            State::Created => "created",
            State::Entered => "entered",
            State::Exited => "exited",
        };
        f.write_str(name)
    }
}

/// Tracks the strong-reference counts of a fixed set of objects across a scope
///
/// The handle order given at construction defines the positional order of
/// delta arguments in [`assert_delta`](Tracker::assert_delta).
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use zaehler::Tracker;
///
/// let a = Rc::new("spam");
/// let b = Rc::new("eggs");
///
/// let mut tracker = Tracker::new([a.clone(), b.clone()]);
/// tracker.enter()?;
/// let _extra = b.clone();
/// tracker.exit()?;
/// tracker.assert_delta([0, 1])?;
/// # Ok::<(), zaehler::TrackError>(())
/// ```
pub struct Tracker<H: RefCounted> {
    handles: Vec<H>,
    state: State,
    before: Vec<usize>,
    after: Vec<usize>,
}

impl<H: RefCounted> Tracker<H> {
    /// Create a tracker bound to `handles`, in state [`State::Created`]
    ///
    /// Each handle is a strong reference held until the tracker is dropped.
    /// An empty handle set is legal but degenerate: assertions pass
    /// vacuously.
    pub fn new<I: IntoIterator<Item = H>>(handles: I) -> Self {
        Self {
            handles: handles.into_iter().collect(),
            state: State::Created,
            before: Vec::new(),
            after: Vec::new(),
        }
    }

    /// Number of tracked objects
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Current lifecycle state
    pub fn state(&self) -> State {
        self.state
    }

    fn require(&self, required: State) -> TrackResult<()> {
        if self.state == required {
            Ok(())
        } else {
            Err(TrackError::State {
                required,
                actual: self.state,
            })
        }
    }

    fn snapshot(&self) -> Vec<usize> {
        self.handles.iter().map(RefCounted::strong_count).collect()
    }

    /// Take the entry snapshot and move to [`State::Entered`]
    ///
    /// Fails with [`TrackError::State`] unless the tracker is freshly
    /// created; an exited tracker cannot be entered again.
    pub fn enter(&mut self) -> TrackResult<()> {
        self.require(State::Created)?;
        self.before = self.snapshot();
        self.state = State::Entered;
        Ok(())
    }

    /// Take the exit snapshot and move to [`State::Exited`]
    ///
    /// Fails with [`TrackError::State`] unless the tracker is currently
    /// entered. Both snapshots are immutable once taken, so assertions can
    /// be repeated any number of times with consistent results.
    pub fn exit(&mut self) -> TrackResult<()> {
        self.require(State::Entered)?;
        self.after = self.snapshot();
        self.state = State::Exited;
        Ok(())
    }

    /// Run `body` between the entry and exit snapshots
    ///
    /// The exit snapshot is taken even if `body` panics; the panic then
    /// continues unwinding. This is the scoped form of
    /// [`enter`](Tracker::enter)/[`exit`](Tracker::exit), and the one to
    /// prefer when the scope body can fail.
    ///
    /// # Example
    ///
    /// ```
    /// use std::rc::Rc;
    /// use zaehler::Tracker;
    ///
    /// let a = Rc::new(42);
    /// let mut tracker = Tracker::new([a.clone()]);
    /// let _held = tracker.track(|| a.clone())?;
    /// tracker.assert_delta([1])?;
    /// # Ok::<(), zaehler::TrackError>(())
    /// ```
    pub fn track<R>(&mut self, body: impl FnOnce() -> R) -> TrackResult<R> {
        self.enter()?;
        let guard = ExitGuard(self);
        let value = body();
        drop(guard);
        Ok(value)
    }

    /// Per-object deltas, `final - initial`, in handle order
    ///
    /// Fails with [`TrackError::State`] unless the tracker has exited.
    pub fn deltas(&self) -> TrackResult<Vec<i64>> {
        self.require(State::Exited)?;
        Ok(self.raw_deltas().collect())
    }

    /// The entry snapshot, if one has been taken
    pub fn initial_counts(&self) -> Option<&[usize]> {
        (self.state != State::Created).then_some(self.before.as_slice())
    }

    /// The exit snapshot, if one has been taken
    pub fn final_counts(&self) -> Option<&[usize]> {
        (self.state == State::Exited).then_some(self.after.as_slice())
    }

    fn raw_deltas(&self) -> impl Iterator<Item = i64> + '_ {
        self.before
            .iter()
            .zip(&self.after)
            .map(|(&before, &after)| after as i64 - before as i64)
    }

    /// Assert the per-object deltas against expected values
    ///
    /// `expected` is either exactly one value, broadcast to every tracked
    /// object, or exactly one value per tracked object, matched positionally
    /// in handle order. Values are integers or
    /// [`PseudoNum`](crate::PseudoNum) matchers, anything convertible into
    /// [`Expected`]. A single-object tracker given one value takes the
    /// broadcast reading; the two are indistinguishable.
    ///
    /// Fails with [`TrackError::State`] unless exited (asserting while
    /// still inside the scope is a usage error), with [`TrackError::Arity`]
    /// on a count mismatch, and with [`TrackError::Assertion`] naming the
    /// lowest failing index otherwise.
    pub fn assert_delta<I>(&self, expected: I) -> TrackResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Expected>,
    {
        self.require(State::Exited)?;
        let expected: Vec<Expected> = expected.into_iter().map(Into::into).collect();
        let tracked = self.handles.len();
        if expected.len() != 1 && expected.len() != tracked {
            return Err(TrackError::Arity {
                given: expected.len(),
                tracked,
            });
        }
        for (index, actual) in self.raw_deltas().enumerate() {
            let want = if expected.len() == 1 {
                expected[0]
            } else {
                expected[index]
            };
            if !want.matches(actual) {
                return Err(TrackError::Assertion {
                    index,
                    expected: want,
                    actual,
                });
            }
        }
        Ok(())
    }

    /// Assert that no tracked object's refcount changed
    ///
    /// Shorthand for broadcasting an exact delta of zero.
    pub fn assert_equal_rc(&self) -> TrackResult<()> {
        self.assert_delta([Expected::Exact(0)])
    }
}

impl<H: RefCounted + Clone> Tracker<H> {
    /// Create a fresh tracker over the same objects, in state
    /// [`State::Created`]
    ///
    /// No counts are copied. Intended for nesting a narrower measurement
    /// window inside this tracker's scope without re-listing the objects;
    /// the spawned tracker is fully independent and may be used in any
    /// state of its parent.
    ///
    /// # Example
    ///
    /// ```
    /// use std::rc::Rc;
    /// use zaehler::Tracker;
    ///
    /// let a = Rc::new(1);
    /// let b = Rc::new(2);
    /// let mut outer = Tracker::new([a.clone(), b.clone()]);
    /// outer.enter()?;
    /// let _kept = a.clone();
    /// let mut inner = outer.spawn();
    /// let held = inner.track(|| b.clone())?;
    /// inner.assert_delta([0, 1])?;
    /// // Release the inner tracker's own handles before the outer snapshot.
    /// drop(inner);
    /// drop(held);
    /// outer.exit()?;
    /// outer.assert_delta([1, 0])?;
    /// # Ok::<(), zaehler::TrackError>(())
    /// ```
    pub fn spawn(&self) -> Self {
        Tracker::new(self.handles.iter().cloned())
    }
}

impl<H: RefCounted> fmt::Debug for Tracker<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracker")
            .field("tracked", &self.handles.len())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Takes the exit snapshot on drop, so `track` exits even on unwind
struct ExitGuard<'a, H: RefCounted>(&'a mut Tracker<H>);

impl<H: RefCounted> Drop for ExitGuard<'_, H> {
    fn drop(&mut self) {
        // State is Entered whenever this guard exists, so exit cannot fail.
        let _ = self.0.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn state_progression() {
        let a = Rc::new(0);
        let mut t = Tracker::new([a.clone()]);
        assert_eq!(t.state(), State::Created);
        t.enter().unwrap();
        assert_eq!(t.state(), State::Entered);
        t.exit().unwrap();
        assert_eq!(t.state(), State::Exited);
    }

    #[test]
    fn snapshots_gated_by_state() {
        let a = Rc::new(0);
        let mut t = Tracker::new([a.clone()]);
        assert!(t.initial_counts().is_none());
        assert!(t.final_counts().is_none());
        t.enter().unwrap();
        assert_eq!(t.initial_counts(), Some(&[2usize][..]));
        assert!(t.final_counts().is_none());
        t.exit().unwrap();
        assert_eq!(t.final_counts(), Some(&[2usize][..]));
        assert_eq!(t.deltas().unwrap(), vec![0]);
    }

    #[test]
    fn own_reference_cancels_out() {
        // The tracker's clone raises the absolute counts but never the delta.
        let a = Rc::new(0);
        assert_eq!(Rc::strong_count(&a), 1);
        let mut t = Tracker::new([a.clone()]);
        assert_eq!(Rc::strong_count(&a), 2);
        t.enter().unwrap();
        t.exit().unwrap();
        t.assert_delta([0]).unwrap();
        drop(t);
        assert_eq!(Rc::strong_count(&a), 1);
    }

    #[test]
    fn state_display() {
        assert_eq!(State::Created.to_string(), "created");
        assert_eq!(State::Entered.to_string(), "entered");
        assert_eq!(State::Exited.to_string(), "exited");
    }
}
