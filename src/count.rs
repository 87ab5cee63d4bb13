//! Reference-count sources and tracked handles
//!
//! This module defines the single primitive the tracker needs from the
//! surrounding runtime: reading the current strong-reference count of an
//! object. `Rc` and `Arc` provide it out of the box; custom refcounted
//! handles participate by implementing [`RefCounted`].
//!
//! A tracker holds its handles by value, so every tracked object stays alive
//! for as long as the tracker does. Without that guarantee an object could be
//! dropped mid-scope and its address reused by an unrelated allocation,
//! silently corrupting the measurement.

use std::rc::Rc;
use std::sync::Arc;

/// A handle whose strong-reference count can be read
///
/// The count must reflect the runtime's current strong count at the moment of
/// the call, and reading it must not itself change the count. For `Rc` and
/// `Arc` both hold trivially. Custom handles backed by a runtime that caches
/// small values in shared singletons may report noisy counts for those
/// values; the tracker documents this, it does not compensate for it.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use zaehler::RefCounted;
///
/// let a = Rc::new(42);
/// let b = a.clone();
/// assert_eq!(a.strong_count(), 2);
/// drop(b);
/// assert_eq!(a.strong_count(), 1);
/// ```
pub trait RefCounted {
    /// Current number of live strong references to the underlying object
    fn strong_count(&self) -> usize;
}

impl<T: ?Sized> RefCounted for Rc<T> {
    fn strong_count(&self) -> usize {
        Rc::strong_count(self)
    }
}

impl<T: ?Sized> RefCounted for Arc<T> {
    fn strong_count(&self) -> usize {
        Arc::strong_count(self)
    }
}

/// Object-safe shim for cloning behind a `dyn` pointer
trait ErasedHandle {
    fn strong_count(&self) -> usize;
    fn clone_boxed(&self) -> Box<dyn ErasedHandle>;
}

impl<H: RefCounted + Clone + 'static> ErasedHandle for H {
    fn strong_count(&self) -> usize {
        RefCounted::strong_count(self)
    }

    fn clone_boxed(&self) -> Box<dyn ErasedHandle> {
        Box::new(self.clone())
    }
}

/// Type-erased tracked handle
///
/// A [`Tracker`](crate::Tracker) is generic over one handle type. `AnyHandle`
/// erases the concrete type so that differently-typed objects can be tracked
/// by the same tracker. Cloning an `AnyHandle` clones the underlying handle,
/// which takes one more strong reference, exactly like cloning the handle
/// directly.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use std::sync::Arc;
/// use zaehler::{AnyHandle, Tracker};
///
/// let a = Rc::new("spam");
/// let b = Arc::new(7u32);
/// let tracker = Tracker::new([AnyHandle::new(a.clone()), AnyHandle::new(b.clone())]);
/// assert_eq!(tracker.len(), 2);
/// ```
pub struct AnyHandle(Box<dyn ErasedHandle>);

impl AnyHandle {
    pub fn new<H: RefCounted + Clone + 'static>(handle: H) -> Self {
        Self(Box::new(handle))
    }
}

impl Clone for AnyHandle {
    fn clone(&self) -> Self {
        Self(self.0.clone_boxed())
    }
}

impl RefCounted for AnyHandle {
    fn strong_count(&self) -> usize {
        self.0.strong_count()
    }
}

impl std::fmt::Debug for AnyHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AnyHandle")
            .field(&self.0.strong_count())
            .finish()
    }
}
