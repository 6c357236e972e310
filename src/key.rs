use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::hash::BuildHasher;
use core::hash::BuildHasherDefault;
use core::hash::Hash;
use core::hash::Hasher;

/// Multiplier used to fold successive writes into a hash code.
const FOLD: i64 = 31;

/// A key that can be stored in a [`ProbingTable`](crate::ProbingTable).
///
/// Keys hash through their [`Hash`] impl and compare through [`Eq`]. A key may
/// additionally report itself as *absent* (the `None` of an `Option`, a null
/// pointer); absent keys are rejected by every keyed operation with
/// [`Error::InvalidArgument`](crate::Error::InvalidArgument) and are never
/// stored.
pub trait Key: Hash + Eq {
    /// Returns `true` if this key stands for "no key at all".
    #[inline]
    fn is_absent(&self) -> bool {
        false
    }
}

macro_rules! present_keys {
    ($($t:ty),* $(,)?) => {
        $(impl Key for $t {})*
    };
}

present_keys!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, bool, char, str, String, (),
);

impl<T: Key + ?Sized> Key for &T {
    #[inline]
    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

impl<T: Key + ?Sized> Key for Box<T> {
    #[inline]
    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

impl<T: Key + ?Sized> Key for Rc<T> {
    #[inline]
    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

impl<T: Key + ?Sized> Key for Arc<T> {
    #[inline]
    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

impl<T: Hash + Eq> Key for Vec<T> {}

impl<T: Hash + Eq> Key for [T] {}

impl<T: Hash + Eq, const N: usize> Key for [T; N] {}

impl<T: Hash + Eq> Key for Option<T> {
    #[inline]
    fn is_absent(&self) -> bool {
        self.is_none()
    }
}

impl<T: ?Sized> Key for *const T {
    #[inline]
    fn is_absent(&self) -> bool {
        self.is_null()
    }
}

impl<T: ?Sized> Key for *mut T {
    #[inline]
    fn is_absent(&self) -> bool {
        self.is_null()
    }
}

macro_rules! tuple_keys {
    ($($name:ident)+) => {
        impl<$($name: Hash + Eq),+> Key for ($($name,)+) {}
    };
}

tuple_keys!(A);
tuple_keys!(A B);
tuple_keys!(A B C);
tuple_keys!(A B C D);

/// Hasher producing signed, deterministic hash codes.
///
/// Every value written is folded in as `code * 31 + value`. Integer writes are
/// sign-extended, so any integer key that fits in an `i64` hashes to itself.
/// Wider 128-bit values fold the XOR of their two halves. Byte slices fold one
/// byte at a time.
#[derive(Debug, Default, Clone, Copy)]
pub struct HashCode {
    code: i64,
}

impl HashCode {
    #[inline(always)]
    fn fold(&mut self, value: i64) {
        self.code = self.code.wrapping_mul(FOLD).wrapping_add(value);
    }

    /// Returns the signed hash code accumulated so far.
    #[inline]
    pub fn code(&self) -> i64 {
        self.code
    }
}

impl Hasher for HashCode {
    #[inline]
    fn finish(&self) -> u64 {
        self.code as u64
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.fold(i64::from(b));
        }
    }

    #[inline]
    fn write_u8(&mut self, i: u8) {
        self.fold(i64::from(i));
    }

    #[inline]
    fn write_u16(&mut self, i: u16) {
        self.fold(i64::from(i));
    }

    #[inline]
    fn write_u32(&mut self, i: u32) {
        self.fold(i64::from(i));
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.fold(i as i64);
    }

    #[inline]
    fn write_u128(&mut self, i: u128) {
        match i64::try_from(i) {
            Ok(small) => self.fold(small),
            Err(_) => self.fold((i as u64 ^ (i >> 64) as u64) as i64),
        }
    }

    #[inline]
    fn write_usize(&mut self, i: usize) {
        self.fold(i as i64);
    }

    #[inline]
    fn write_i8(&mut self, i: i8) {
        self.fold(i64::from(i));
    }

    #[inline]
    fn write_i16(&mut self, i: i16) {
        self.fold(i64::from(i));
    }

    #[inline]
    fn write_i32(&mut self, i: i32) {
        self.fold(i64::from(i));
    }

    #[inline]
    fn write_i64(&mut self, i: i64) {
        self.fold(i);
    }

    #[inline]
    fn write_i128(&mut self, i: i128) {
        match i64::try_from(i) {
            Ok(small) => self.fold(small),
            Err(_) => self.fold((i as u64 ^ (i >> 64) as u64) as i64),
        }
    }

    #[inline]
    fn write_isize(&mut self, i: isize) {
        self.fold(i as i64);
    }
}

/// The one hasher builder tables use. There is no way to swap it out.
pub type BuildHashCode = BuildHasherDefault<HashCode>;

/// Computes the signed hash code of `key`.
#[inline]
pub fn hash_code<Q: Hash + ?Sized>(key: &Q) -> i64 {
    BuildHashCode::default().hash_one(key) as i64
}
