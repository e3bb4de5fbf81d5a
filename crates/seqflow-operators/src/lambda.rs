//! Ready-made closures for the common pipeline steps.
//!
//! ```ignore
//! use seqflow::lambda;
//!
//! let total = xrange(1, 10, 1)?
//!     .filter(lambda::is_odd::<i64>())
//!     .map(lambda::multiply_by(3))
//!     .fold(0, lambda::add::<i64>());
//! ```
//!
//! Predicates take `&T` so they plug into `filter`, `skip_while`,
//! `take_while`, `any` and `all`. Projections take `T` by value for `map`;
//! binary combinators fit `fold` and `zip`.

use std::ops::{Add, Div, Mul, Rem};

use seqflow_collections::IndexedView;
use seqflow_core::error::{Error, Result};

/// Odd under `%`. Negative odd numbers count as odd.
pub fn is_odd<T>() -> impl Fn(&T) -> bool
where
    T: Copy + Rem<Output = T> + PartialEq + From<u8>,
{
    |x: &T| *x % T::from(2) != T::from(0)
}

pub fn is_even<T>() -> impl Fn(&T) -> bool
where
    T: Copy + Rem<Output = T> + PartialEq + From<u8>,
{
    |x: &T| *x % T::from(2) == T::from(0)
}

pub fn is_equal_to<T: PartialEq>(y: T) -> impl Fn(&T) -> bool {
    move |x: &T| *x == y
}

/// Pairwise equality, for `zip`.
pub fn are_equal<T: PartialEq>() -> impl Fn(T, T) -> bool {
    |a: T, b: T| a == b
}

pub fn is_greater_than<T: PartialOrd>(y: T) -> impl Fn(&T) -> bool {
    move |x: &T| *x > y
}

pub fn is_greater_than_or_equal<T: PartialOrd>(y: T) -> impl Fn(&T) -> bool {
    move |x: &T| *x >= y
}

pub fn is_less_than<T: PartialOrd>(y: T) -> impl Fn(&T) -> bool {
    move |x: &T| *x < y
}

pub fn is_less_than_or_equal<T: PartialOrd>(y: T) -> impl Fn(&T) -> bool {
    move |x: &T| *x <= y
}

/// `x + y`.
pub fn plus<T>(y: T) -> impl Fn(T) -> T
where
    T: Add<Output = T> + Clone,
{
    move |x: T| x + y.clone()
}

/// `x * y`.
pub fn multiply_by<T>(y: T) -> impl Fn(T) -> T
where
    T: Mul<Output = T> + Clone,
{
    move |x: T| x * y.clone()
}

/// `x / y`. A zero divisor (`T::default()`) is rejected up front, floats
/// included.
pub fn divide_by<T>(y: T) -> Result<impl Fn(T) -> T>
where
    T: Div<Output = T> + Clone + PartialEq + Default,
{
    if y == T::default() {
        return Err(Error::invalid("divide_by needs a non-zero divisor"));
    }
    Ok(move |x: T| x / y.clone())
}

/// `a + b`, for `fold`.
pub fn add<T: Add<Output = T>>() -> impl Fn(T, T) -> T {
    |a: T, b: T| a + b
}

/// `a * b`, for `fold`.
pub fn multiply<T: Mul<Output = T>>() -> impl Fn(T, T) -> T {
    |a: T, b: T| a * b
}

pub fn identity<T>() -> impl Fn(T) -> T {
    |x: T| x
}

/// Looks `key` up in each keyed element (`Dictionary`, `Collection`,
/// `GroupedCollection`). Absent keys give `None`.
pub fn select_key<C, K>(key: K) -> impl Fn(C) -> Option<C::Output>
where
    C: IndexedView<K>,
{
    move |c: C| c.lookup(&key).ok()
}

/// Projects each element through a borrowing accessor and clones the result.
///
/// `people.map(select_property(|p: &Person| &p.name))`
pub fn select_property<T, U, F>(get: F) -> impl Fn(T) -> U
where
    U: Clone,
    F: Fn(&T) -> &U,
{
    move |x: T| get(&x).clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parity_handles_negatives() {
        let odd = is_odd::<i64>();
        let even = is_even::<i64>();
        assert!(odd(&-3));
        assert!(!odd(&-4));
        assert!(even(&0));
        assert!(even(&-4));
        assert!(is_odd::<u8>()(&255));
    }

    #[test]
    fn test_comparisons() {
        assert!(is_greater_than(2)(&3));
        assert!(!is_greater_than(3)(&3));
        assert!(is_greater_than_or_equal(3)(&3));
        assert!(is_less_than(1.5)(&1.0));
        assert!(is_less_than_or_equal("b")(&"b"));
        assert!(is_equal_to(String::from("x"))(&"x".to_string()));
        assert!(are_equal()(4, 4));
    }

    #[test]
    fn test_divide_by_rejects_zero() {
        assert!(matches!(divide_by(0), Err(Error::InvalidArgument(_))));
        assert!(matches!(divide_by(0.0), Err(Error::InvalidArgument(_))));
        let halve = divide_by(2.0).unwrap();
        assert_eq!(halve(5.0), 2.5);
    }
}
