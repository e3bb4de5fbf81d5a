//! Hashing strategies for the persistent collections.
//!
//! The default strategy is structural: `Eq` for equality and a blake3-backed
//! `Hasher` for a stable, order-sensitive hash. Custom strategies pair a user
//! equality closure with a user hash closure. Two strategies are "the same"
//! when both are structural or when they hold the very same closures.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::rc::Rc;

use crate::id::ObjectId;

/// `std::hash::Hasher` over blake3, so hashes do not depend on a random seed.
#[derive(Clone, Default)]
pub struct StableHasher {
    inner: blake3::Hasher,
}

impl StableHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Hasher for StableHasher {
    fn write(&mut self, bytes: &[u8]) {
        self.inner.update(bytes);
    }

    fn finish(&self) -> u64 {
        let out = self.inner.finalize();
        let mut word = [0u8; 8];
        word.copy_from_slice(&out.as_bytes()[..8]);
        u64::from_le_bytes(word)
    }
}

/// Structural hash of any `Hash` value.
pub fn stable_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut h = StableHasher::new();
    value.hash(&mut h);
    h.finish()
}

pub type EqFn<T> = Rc<dyn Fn(&T, &T) -> bool>;
pub type HashFn<T> = Rc<dyn Fn(&T) -> u64>;

/// An (equality, hash) pair. Equality must be an equivalence relation and
/// equal values must hash alike.
pub struct Hashing<T> {
    eq: EqFn<T>,
    hash: HashFn<T>,
    structural: bool,
}

impl<T: 'static> Hashing<T> {
    /// `Eq` + stable structural hash.
    pub fn structural() -> Self
    where
        T: Hash + Eq,
    {
        Self {
            eq: Rc::new(|a: &T, b: &T| a == b),
            hash: Rc::new(|v: &T| stable_hash(v)),
            structural: true,
        }
    }

    pub fn custom<E, H>(eq: E, hash: H) -> Self
    where
        E: Fn(&T, &T) -> bool + 'static,
        H: Fn(&T) -> u64 + 'static,
    {
        Self {
            eq: Rc::new(eq),
            hash: Rc::new(hash),
            structural: false,
        }
    }

    /// Keep `PartialEq` but bucket with a caller-supplied hash.
    pub fn with_hash<H>(hash: H) -> Self
    where
        T: PartialEq,
        H: Fn(&T) -> u64 + 'static,
    {
        Self::custom(|a: &T, b: &T| a == b, hash)
    }

    /// Compare and hash by a projected key.
    pub fn by_key<K, F>(selector: F) -> Self
    where
        K: Hash + Eq,
        F: Fn(&T) -> K + 'static,
    {
        let selector = Rc::new(selector);
        let for_hash = Rc::clone(&selector);
        Self::custom(
            move |a: &T, b: &T| selector(a) == selector(b),
            move |v: &T| stable_hash(&for_hash(v)),
        )
    }
}

impl<T> Hashing<T> {
    pub fn eq(&self, a: &T, b: &T) -> bool {
        (self.eq)(a, b)
    }

    pub fn hash(&self, value: &T) -> u64 {
        (self.hash)(value)
    }

    pub fn is_structural(&self) -> bool {
        self.structural
    }

    pub fn same_as(&self, other: &Hashing<T>) -> bool {
        if self.structural || other.structural {
            return self.structural && other.structural;
        }
        Rc::ptr_eq(&self.eq, &other.eq) && Rc::ptr_eq(&self.hash, &other.hash)
    }
}

impl<T> Clone for Hashing<T> {
    fn clone(&self) -> Self {
        Self {
            eq: Rc::clone(&self.eq),
            hash: Rc::clone(&self.hash),
            structural: self.structural,
        }
    }
}

impl<T: Hash + Eq + 'static> Default for Hashing<T> {
    fn default() -> Self {
        Self::structural()
    }
}

impl<T> fmt::Debug for Hashing<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.structural { "structural" } else { "custom" };
        f.debug_struct("Hashing").field("kind", &kind).finish()
    }
}

/// Shares a value and compares/hashes it by identity rather than by content.
///
/// Clones keep the identity; two separately wrapped equal values do not.
pub struct Identity<T> {
    id: ObjectId,
    value: Rc<T>,
}

impl<T> Identity<T> {
    pub fn new(value: T) -> Self {
        Self {
            id: ObjectId::next(),
            value: Rc::new(value),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn get(&self) -> &T {
        &self.value
    }
}

impl<T> Clone for Identity<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            value: Rc::clone(&self.value),
        }
    }
}

impl<T> PartialEq for Identity<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Identity<T> {}

impl<T> Hash for Identity<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> Deref for Identity<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: fmt::Debug> fmt::Debug for Identity<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Identity")
            .field(&self.id.get())
            .field(&self.value)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_hash_is_order_sensitive() {
        assert_eq!(stable_hash(&[1, 2, 3]), stable_hash(&[1, 2, 3]));
        assert_ne!(stable_hash(&[1, 2, 3]), stable_hash(&[3, 2, 1]));
    }

    #[test]
    fn test_same_as() {
        let a = Hashing::<i32>::structural();
        let b = Hashing::<i32>::structural();
        assert!(a.same_as(&b));

        let c = Hashing::<i32>::custom(|x, y| x == y, |x| *x as u64);
        assert!(!a.same_as(&c));
        assert!(c.same_as(&c.clone()));
        let d = Hashing::<i32>::custom(|x, y| x == y, |x| *x as u64);
        assert!(!c.same_as(&d));
    }

    #[test]
    fn test_by_key() {
        let h = Hashing::<(i32, &'static str)>::by_key(|p| p.0);
        assert!(h.eq(&(1, "a"), &(1, "b")));
        assert_eq!(h.hash(&(1, "a")), h.hash(&(1, "b")));
        assert!(!h.eq(&(1, "a"), &(2, "a")));
    }

    #[test]
    fn test_identity_compares_by_token() {
        let a = Identity::new(String::from("x"));
        let b = Identity::new(String::from("x"));
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert_eq!(stable_hash(&a), stable_hash(&a.clone()));
        assert_eq!(&*a, "x");
    }
}
