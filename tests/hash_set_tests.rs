//! Persistent hash set tests

use seqflow::hash::stable_hash;
use seqflow::prelude::*;

fn mod_ten() -> Hashing<i32> {
    Hashing::custom(|a: &i32, b: &i32| a == b, |x: &i32| (x % 10) as u64)
}

#[test]
fn test_add_existing_returns_same_set() {
    let s: HashSet<i32> = vec![1, 2, 3].into_iter().collect();

    let same = s.add(2);
    assert!(same.ptr_eq(&s));

    let bigger = s.add(4);
    assert!(!bigger.ptr_eq(&s));
    assert_eq!(bigger.to_vec(), vec![1, 2, 3, 4]);
    assert_eq!(s.len(), 3);
    assert!(!s.contains(&4));
}

#[test]
fn test_remove_absent_returns_same_set() {
    let s = set(vec![1, 2, 3]);

    assert!(s.remove(&9).ptr_eq(&s));
    assert!(s.remove_many(Vec::<i32>::new()).ptr_eq(&s));
    assert!(s.add_many(vec![1, 3]).ptr_eq(&s));

    let smaller = s.remove(&2);
    assert_eq!(smaller.to_vec(), vec![1, 3]);
    assert!(s.contains(&2));
}

#[test]
fn test_remove_many_accepts_borrowed_items() {
    let s = set(vec![1, 2, 3, 4]);
    let keep = s.remove_many(&[2, 4]);
    assert_eq!(keep.to_vec(), vec![1, 3]);
}

#[test]
fn test_colliding_hashes_share_a_bucket() {
    let s = set_with(vec![11, 2, 21, 12, 1], mod_ten());

    // Buckets in first-seen order (1s, then 2s), insertion order inside.
    assert_eq!(s.to_vec(), vec![11, 21, 1, 2, 12]);
    assert!(s.contains(&21));
    assert!(!s.contains(&31));

    let without = s.remove(&21);
    assert_eq!(without.to_vec(), vec![11, 1, 2, 12]);
    assert_eq!(without.len(), 4);
}

#[test]
fn test_bucket_removed_when_emptied() {
    let s = set_with(vec![5, 6], mod_ten());
    let only_six = s.remove(&5);
    assert_eq!(only_six.to_vec(), vec![6]);

    // A re-added member starts a new bucket at the end.
    let again = only_six.add(15);
    assert_eq!(again.to_vec(), vec![6, 15]);
}

#[test]
fn test_set_factory_reuses_matching_strategy() {
    let structural = set(vec![1, 2, 3]);
    assert!(set(structural.clone()).ptr_eq(&structural));
    assert!(set(&structural).ptr_eq(&structural));

    let custom = mod_ten();
    let a = set_with(vec![1, 2], custom.clone());
    assert!(set_with(a.clone(), custom.clone()).ptr_eq(&a));

    // Different closures, even if they behave the same, force a rebuild.
    let rebuilt = set_with(a.clone(), mod_ten());
    assert!(!rebuilt.ptr_eq(&a));
    assert_eq!(rebuilt.to_vec(), a.to_vec());

    let to_structural = set(a.clone());
    assert!(!to_structural.ptr_eq(&a));
    assert!(to_structural.hashing().is_structural());
}

#[test]
fn test_union() {
    let a = set(vec![1, 2]);
    let b = set(vec![2, 3]);
    assert_eq!(a.union(&b).to_vec(), vec![1, 2, 3]);
    assert!(a.union(&set(vec![1])).ptr_eq(&a));
}

#[test]
fn test_structural_hash_is_order_sensitive() {
    let pairs = set(vec![vec![1, 2], vec![2, 1], vec![1, 2]]);
    assert_eq!(pairs.len(), 2);
    assert_ne!(stable_hash(&vec![1, 2]), stable_hash(&vec![2, 1]));
}

#[test]
fn test_identity_members() {
    let a = Identity::new("payload".to_string());
    let b = Identity::new("payload".to_string());

    let s = set(vec![a.clone(), b.clone(), a.clone()]);
    assert_eq!(s.len(), 2);
    assert!(s.contains(&a));
    assert!(!s.contains(&Identity::new("payload".to_string())));
}

#[test]
fn test_set_as_sequence() {
    let s = set(vec![4, 5, 6]);
    let doubled = s.seq().map(|x| x * 2).to_vec();
    assert_eq!(doubled, vec![8, 10, 12]);

    let seq = sequence(vec![1, 2, 3]).except(&s.add(2));
    assert_eq!(seq.to_vec(), vec![1, 3]);
}
