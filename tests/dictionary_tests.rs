//! Persistent dictionary tests

use seqflow::prelude::*;

fn sample() -> Dictionary<&'static str, i32> {
    dictionary(vec![("one", 1), ("two", 2), ("three", 3)]).expect("unique keys")
}

#[test]
fn test_from_pairs_rejects_duplicates() {
    let res = Dictionary::from_pairs(vec![("a", 1), ("b", 2), ("a", 3)]);
    assert!(matches!(res, Err(Error::DuplicateKey(_))));
}

#[test]
fn test_add_rejects_existing_key() {
    let d = sample();
    assert!(matches!(d.add("two", 22), Err(Error::DuplicateKey(_))));

    let d2 = d.add("four", 4).expect("new key");
    assert_eq!(d2.len(), 4);
    assert_eq!(d.len(), 3);
    assert_eq!(d2.get("four"), Some(&4));
}

#[test]
fn test_add_many_is_all_or_nothing() {
    let d = sample();
    let res = d.add_many(vec![("five", 5), ("five", 55)]);
    assert!(matches!(res, Err(Error::DuplicateKey(_))));
    assert!(!d.contains_key("five"));

    assert!(d.add_many(Vec::new()).expect("empty batch").ptr_eq(&d));
}

#[test]
fn test_set_keeps_position_and_upserts() {
    let d = sample().set("one", 100).set("zero", 0);
    assert_eq!(
        d.to_vec(),
        vec![("one", 100), ("two", 2), ("three", 3), ("zero", 0)]
    );

    let many = sample().set_many(vec![("three", 30), ("four", 4)]);
    assert_eq!(many.keys(), vec!["one", "two", "three", "four"]);
    assert_eq!(many.values(), vec![1, 2, 30, 4]);
}

#[test]
fn test_remove_ignores_absent_keys() {
    let d = sample();
    assert!(d.remove("missing").ptr_eq(&d));
    assert!(d.remove_many(["nope", "nada"].iter().copied()).ptr_eq(&d));

    let smaller = d.remove("two");
    assert_eq!(smaller.to_vec(), vec![("one", 1), ("three", 3)]);
    assert_eq!(smaller.get("three"), Some(&3));
    assert!(d.contains_key("two"));
}

#[test]
fn test_remove_many() {
    let d = sample();
    let left = d.remove_many(["one", "three", "ghost"].iter().copied());
    assert_eq!(left.to_vec(), vec![("two", 2)]);
}

#[test]
fn test_map_values() {
    let d = sample().map(|v| v * 10);
    assert_eq!(d.to_vec(), vec![("one", 10), ("two", 20), ("three", 30)]);
    assert_eq!(d.get("two"), Some(&20));
}

#[test]
fn test_item_and_view_access() {
    let d = sample();
    assert_eq!(d.item("one"), Ok(1));
    assert!(matches!(d.item("zero"), Err(Error::OutOfRange(_))));
    assert_eq!(d.get("zero"), None);

    assert_eq!(d.lookup(&"three"), Ok(3));
    assert!(d.has_key(&"two"));
    assert!(!d.has_key(&"ten"));
    assert!(matches!(
        d.assign(&"one", 11),
        Err(Error::UnsupportedOperation(_))
    ));
    assert!(matches!(
        d.unassign(&"one"),
        Err(Error::UnsupportedOperation(_))
    ));
    assert_eq!(d.item("one"), Ok(1));
}

#[test]
fn test_equality_is_order_sensitive() {
    let a = dictionary(vec![(1, 'a'), (2, 'b')]).expect("unique");
    let b = dictionary(vec![(1, 'a'), (2, 'b')]).expect("unique");
    let c = dictionary(vec![(2, 'b'), (1, 'a')]).expect("unique");
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_dictionary_as_sequence_of_pairs() {
    let d = sample();
    let total = d.seq().fold(0, |acc, (_, v)| acc + v);
    assert_eq!(total, 6);

    let keys: Vec<&str> = d.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, vec!["one", "two", "three"]);
}
