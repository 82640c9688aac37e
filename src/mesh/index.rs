//! Arena handles for mesh elements.
//!
//! Vertices, half-edges and faces live in flat arenas and are addressed by
//! typed indices. The integer width is a type parameter so that small
//! polygons can use `u16` handles and very large ones `u64`.

use std::fmt::{self, Debug};
use std::hash::Hash;

/// Integer types usable as arena indices.
///
/// Implemented for `u16`, `u32` and `u64`.
pub trait MeshIndex: Copy + Eq + Ord + Hash + Debug + Send + Sync + 'static {
    /// Largest index that can address an element.
    const MAX: Self;

    /// Sentinel standing in for a null link.
    const INVALID: Self;

    /// Convert from usize.
    ///
    /// # Panics
    /// Panics in debug builds if the value does not fit.
    fn from_usize(v: usize) -> Self;

    /// Convert to usize.
    fn to_usize(self) -> usize;

    /// Check that this is not the sentinel.
    fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

macro_rules! impl_mesh_index {
    ($ty:ty) => {
        impl MeshIndex for $ty {
            const MAX: Self = <$ty>::MAX - 1;
            const INVALID: Self = <$ty>::MAX;

            #[inline]
            fn from_usize(v: usize) -> Self {
                debug_assert!(
                    v <= Self::MAX as usize,
                    "index {} too large for {}",
                    v,
                    stringify!($ty)
                );
                v as $ty
            }

            #[inline]
            fn to_usize(self) -> usize {
                self as usize
            }
        }
    };
}

impl_mesh_index!(u16);
impl_mesh_index!(u32);
impl_mesh_index!(u64);

/// Handle of a vertex.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct VertexId<I: MeshIndex = u32>(I);

/// Handle of a half-edge.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct HalfEdgeId<I: MeshIndex = u32>(I);

/// Handle of a face.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct FaceId<I: MeshIndex = u32>(I);

macro_rules! impl_handle {
    ($name:ident, $tag:literal) => {
        impl<I: MeshIndex> $name<I> {
            /// Create a handle from an arena slot.
            #[inline]
            pub fn new(index: usize) -> Self {
                Self(I::from_usize(index))
            }

            /// The null handle.
            #[inline]
            pub fn invalid() -> Self {
                Self(I::INVALID)
            }

            /// Arena slot of this handle.
            #[inline]
            pub fn index(self) -> usize {
                self.0.to_usize()
            }

            /// Check that this is not the null handle.
            #[inline]
            pub fn is_valid(self) -> bool {
                self.0.is_valid()
            }
        }

        impl<I: MeshIndex> Debug for $name<I> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", $tag, self.index())
                } else {
                    write!(f, "{}(INVALID)", $tag)
                }
            }
        }

        impl<I: MeshIndex> Default for $name<I> {
            fn default() -> Self {
                Self::invalid()
            }
        }

        impl<I: MeshIndex> From<usize> for $name<I> {
            fn from(v: usize) -> Self {
                Self::new(v)
            }
        }
    };
}

impl_handle!(VertexId, "V");
impl_handle!(HalfEdgeId, "HE");
impl_handle!(FaceId, "F");
