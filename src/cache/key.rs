//! Key Equality Module
//!
//! Defines the equality capability every cache key must provide.

// == Equally ==
/// Structural equality between two keys.
///
/// This is the only contract a key has to satisfy. Hashing and ordering are
/// not required; keys that can also be hashed may opt into the hashed index
/// (see [`HashIndex`](crate::cache::HashIndex)), which still confirms every
/// candidate with `equally`.
///
/// With the hashed index, `Hash` must agree with this method: two keys that
/// are `equally` must produce the same hash. Otherwise they land in different
/// buckets and the cache holds both. Keys that cannot guarantee this belong in
/// a [`ScanLruCache`](crate::cache::ScanLruCache).
///
/// # Example
/// ```
/// use lru_ttl_cache::cache::Equally;
///
/// struct ProfileKey {
///     profile_id: u64,
///     site_id: u64,
/// }
///
/// impl Equally for ProfileKey {
///     fn equally(&self, other: &Self) -> bool {
///         self.profile_id == other.profile_id && self.site_id == other.site_id
///     }
/// }
/// ```
pub trait Equally {
    /// Returns true when `self` and `other` identify the same entry.
    fn equally(&self, other: &Self) -> bool;
}

/// Implements [`Equally`] for types whose `PartialEq` already expresses key
/// identity.
#[macro_export]
macro_rules! impl_equally_via_eq {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::cache::Equally for $ty {
                #[inline]
                fn equally(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )+
    };
}

impl_equally_via_eq!(
    bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, String,
    &'static str
);

impl<A: Equally, B: Equally> Equally for (A, B) {
    fn equally(&self, other: &Self) -> bool {
        self.0.equally(&other.0) && self.1.equally(&other.1)
    }
}

impl<T: Equally> Equally for Vec<T> {
    fn equally(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.equally(b))
    }
}
