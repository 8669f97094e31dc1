//! Lane permutations.
//!
//! Compile-time shuffles implement [`Swizzle`], usually through the
//! [`swizzle!`](crate::swizzle!) macro. Runtime shuffles go through
//! [`Pack::permute`].

use crate::backend::{Register, Width};
use crate::pack::Pack;

/// A lane permutation fixed at compile time: output lane `i` is input lane `INDICES[i]`.
pub trait Swizzle<const N: usize> {
    const INDICES: [usize; N];
}

/// Number of indices in a `swizzle!` list.
#[doc(hidden)]
pub const fn count(indices: &[usize]) -> usize {
    indices.len()
}

/// Shuffles the lanes of a pack by a literal index list.
///
/// The list length must equal the lane count and every index must be in
/// range; both are checked at compile time.
///
/// ```
/// use pixelflow_simd::{swizzle, Pack};
///
/// let v = Pack::<f32, 4>::from_array([1.0, 2.0, 3.0, 4.0]);
/// assert_eq!(swizzle!(v, [3, 3, 0, 1]).to_array(), [4.0, 4.0, 1.0, 2.0]);
/// ```
#[macro_export]
macro_rules! swizzle {
    ($pack:expr, [$($i:expr),+ $(,)?]) => {{
        struct Indices;
        impl $crate::swizzle::Swizzle<{ $crate::swizzle::count(&[$($i),+]) }> for Indices {
            const INDICES: [usize; $crate::swizzle::count(&[$($i),+])] = [$($i),+];
        }
        ($pack).swizzle::<Indices>()
    }};
}

impl<T, const N: usize, R> Pack<T, N, R>
where
    T: Width<N>,
    R: Register<T, N>,
{
    /// Applies a compile-time permutation.
    #[inline(always)]
    pub fn swizzle<S: Swizzle<N>>(self) -> Self {
        const {
            let mut i = 0;
            while i < N {
                assert!(S::INDICES[i] < N, "swizzle index out of range");
                i += 1;
            }
        };
        let a = self.to_array();
        Self::from_array(core::array::from_fn(|i| a[S::INDICES[i]]))
    }

    /// Lanes in reverse order.
    #[inline(always)]
    pub fn reverse(self) -> Self {
        let a = self.to_array();
        Self::from_array(core::array::from_fn(|i| a[N - 1 - i]))
    }

    /// Lane `i` becomes lane `(i + k) mod N` of `self`.
    #[inline(always)]
    pub fn rotate_left(self, k: usize) -> Self {
        let a = self.to_array();
        Self::from_array(core::array::from_fn(|i| a[(i + k) % N]))
    }

    /// Inverse of [`Pack::rotate_left`].
    #[inline(always)]
    pub fn rotate_right(self, k: usize) -> Self {
        self.rotate_left(N - k % N)
    }

    /// `[a0, b0, a1, b1, ...]` from the lower halves of `self` and `other`.
    #[inline(always)]
    pub fn interleave_lo(self, other: Self) -> Self {
        let (a, b) = (self.to_array(), other.to_array());
        Self::from_array(core::array::from_fn(|i| if i % 2 == 0 { a[i / 2] } else { b[i / 2] }))
    }

    /// `[a(N/2), b(N/2), ...]` from the upper halves of `self` and `other`.
    #[inline(always)]
    pub fn interleave_hi(self, other: Self) -> Self {
        let (a, b) = (self.to_array(), other.to_array());
        let h = N / 2;
        Self::from_array(core::array::from_fn(|i| if i % 2 == 0 { a[h + i / 2] } else { b[h + i / 2] }))
    }

    /// Runtime shuffle: lane `i` is lane `idx[i] mod N` of `self`.
    #[inline(always)]
    pub fn permute(self, idx: Pack<u32, N>) -> Self
    where
        u32: Width<N>,
    {
        let (a, idx) = (self.to_array(), idx.to_array());
        Self::from_array(core::array::from_fn(|i| a[idx[i] as usize % N]))
    }
}

#[cfg(test)]
mod tests {
    use crate::Pack;

    #[test]
    fn test_swizzle_macro() {
        let v = Pack::<i32, 4>::from_array([10, 20, 30, 40]);
        assert_eq!(crate::swizzle!(v, [0, 0, 2, 2]).to_array(), [10, 10, 30, 30]);
        let p = Pack::<f64, 2>::from_array([1.0, 2.0]);
        assert_eq!(crate::swizzle!(p, [1, 0]).to_array(), [2.0, 1.0]);
    }

    #[test]
    fn test_reverse_and_rotate() {
        let v = Pack::<u32, 8>::sequential(0);
        assert_eq!(v.reverse().to_array(), [7, 6, 5, 4, 3, 2, 1, 0]);
        assert_eq!(v.rotate_left(3).to_array(), [3, 4, 5, 6, 7, 0, 1, 2]);
        assert_eq!(v.rotate_right(3).to_array(), [5, 6, 7, 0, 1, 2, 3, 4]);
        assert_eq!(v.rotate_right(8), v);
        assert_eq!(v.rotate_left(11), v.rotate_left(3));
    }

    #[test]
    fn test_interleave() {
        let a = Pack::<f32, 4>::from_array([0.0, 1.0, 2.0, 3.0]);
        let b = Pack::<f32, 4>::from_array([10.0, 11.0, 12.0, 13.0]);
        assert_eq!(a.interleave_lo(b).to_array(), [0.0, 10.0, 1.0, 11.0]);
        assert_eq!(a.interleave_hi(b).to_array(), [2.0, 12.0, 3.0, 13.0]);
    }

    #[test]
    fn test_permute_wraps_indices() {
        let v = Pack::<i32, 4>::from_array([5, 6, 7, 8]);
        let idx = Pack::<u32, 4>::from_array([3, 4, 9, u32::MAX]);
        assert_eq!(v.permute(idx).to_array(), [8, 5, 6, 8]);
    }
}
