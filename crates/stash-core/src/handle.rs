//! The opaque pointer-sized element type.

use std::fmt;
use std::num::NonZeroUsize;
use std::ptr::NonNull;

/// An opaque, non-null, pointer-sized reference stored by the containers.
///
/// Containers never dereference a `Handle` and never copy the pointee;
/// ownership of whatever it points at stays with the caller. Because the
/// pointer is non-null, `Option<Handle>` is still exactly one word wide,
/// which is how the containers represent a nulled slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Handle(NonNull<()>);

impl Handle {
    /// Wrap a typed pointer.
    #[inline]
    pub fn from_ptr<T>(ptr: NonNull<T>) -> Self {
        Self(ptr.cast())
    }

    /// Wrap a shared reference. The handle does not borrow `value`.
    #[inline]
    pub fn from_ref<T>(value: &T) -> Self {
        Self(NonNull::from(value).cast())
    }

    /// Build a handle from a bare non-zero address.
    ///
    /// Useful for index-like handles and tests; the address is never
    /// dereferenced by this crate.
    #[inline]
    pub fn from_addr(addr: NonZeroUsize) -> Self {
        Self(NonNull::<u8>::dangling().with_addr(addr).cast())
    }

    /// The handle as a raw pointer of the caller's choosing.
    #[inline]
    pub fn as_ptr<T>(self) -> *mut T {
        self.0.as_ptr().cast()
    }

    /// The handle's address.
    #[inline]
    pub fn addr(self) -> usize {
        self.0.as_ptr().addr()
    }
}

impl<T> From<NonNull<T>> for Handle {
    fn from(ptr: NonNull<T>) -> Self {
        Self::from_ptr(ptr)
    }
}

impl From<NonZeroUsize> for Handle {
    fn from(addr: NonZeroUsize) -> Self {
        Self::from_addr(addr)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.addr())
    }
}
