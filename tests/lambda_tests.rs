//! Ready-made closure tests

use seqflow::lambda;
use seqflow::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct Person {
    name: String,
    age: u32,
}

fn people() -> Sequence<Person> {
    sequence(vec![
        Person {
            name: "ada".into(),
            age: 36,
        },
        Person {
            name: "bo".into(),
            age: 7,
        },
        Person {
            name: "cy".into(),
            age: 52,
        },
    ])
}

#[test]
fn test_parity_filters() {
    let seq = xrange(-3, 4, 1).expect("xrange");
    assert_eq!(
        seq.filter(lambda::is_odd::<i64>()).to_vec(),
        vec![-3, -1, 1, 3]
    );
    assert_eq!(
        seq.filter(lambda::is_even::<i64>()).to_vec(),
        vec![-2, 0, 2, 4]
    );
}

#[test]
fn test_comparison_predicates() {
    let seq = sequence(vec![1, 3, 5, 3, 1]);
    assert_eq!(seq.filter(lambda::is_equal_to(3)).count(), 2);
    assert_eq!(seq.filter(lambda::is_greater_than(3)).to_vec(), vec![5]);
    assert_eq!(
        seq.filter(lambda::is_greater_than_or_equal(3)).to_vec(),
        vec![3, 5, 3]
    );
    assert_eq!(
        seq.take_while(lambda::is_less_than(5)).to_vec(),
        vec![1, 3]
    );
    assert_eq!(
        seq.skip_while(lambda::is_less_than_or_equal(3)).to_vec(),
        vec![5, 3, 1]
    );
    assert!(seq.all(lambda::is_less_than(6)));
    assert!(!seq.any(lambda::is_greater_than(5)));
}

#[test]
fn test_arithmetic_projections_and_folds() {
    let seq = xrange(1, 4, 1).expect("xrange");
    assert_eq!(seq.map(lambda::plus(10)).to_vec(), vec![11, 12, 13, 14]);
    assert_eq!(seq.map(lambda::multiply_by(3)).to_vec(), vec![3, 6, 9, 12]);
    assert_eq!(seq.fold(0, lambda::add::<i64>()), 10);
    assert_eq!(seq.fold(1, lambda::multiply::<i64>()), 24);
    assert_eq!(seq.map(lambda::identity::<i64>()).to_vec(), seq.to_vec());

    let halves = sequence(vec![1.0, 3.0]).map(lambda::divide_by(2.0).expect("non-zero"));
    assert_eq!(halves.to_vec(), vec![0.5, 1.5]);
}

#[test]
fn test_divide_by_zero_is_invalid() {
    assert!(matches!(lambda::divide_by(0_i32), Err(Error::InvalidArgument(_))));
}

#[test]
fn test_pairwise_equality_with_zip() {
    let left = sequence(vec![1, 2, 3]);
    let right = sequence(vec![1, 0, 3]);
    assert_eq!(
        left.zip(right, lambda::are_equal::<i32>()).to_vec(),
        vec![true, false, true]
    );
}

#[test]
fn test_select_key_on_dictionaries_and_collections() {
    let rows = sequence(vec![
        dictionary(vec![("id", 1), ("score", 9)]).expect("unique"),
        dictionary(vec![("id", 2)]).expect("unique"),
    ]);
    assert_eq!(
        rows.map(lambda::select_key("score")).to_vec(),
        vec![Some(9), None]
    );

    let chunks = xrange(1, 5, 1).expect("xrange").chunk(2).expect("chunk");
    assert_eq!(
        chunks.map(lambda::select_key(1_usize)).to_vec(),
        vec![Some(2), Some(4), None]
    );
}

#[test]
fn test_select_property() {
    let names = people().map(lambda::select_property(|p: &Person| &p.name));
    assert_eq!(names.implode(","), "ada,bo,cy");

    let adults = people()
        .map(lambda::select_property(|p: &Person| &p.age))
        .filter(lambda::is_greater_than_or_equal(18));
    assert_eq!(adults.to_vec(), vec![36, 52]);
}
