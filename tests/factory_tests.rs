//! Factory function tests

mod common;

use common::counted_sequence;
use seqflow::prelude::*;

#[test]
fn test_xrange_is_inclusive() {
    assert_eq!(xrange(1, 5, 1).expect("xrange").to_vec(), vec![1, 2, 3, 4, 5]);
    assert_eq!(xrange(1, 6, 2).expect("xrange").to_vec(), vec![1, 3, 5]);
    assert_eq!(xrange(0, 0, 1).expect("xrange").to_vec(), vec![0]);
}

#[test]
fn test_xrange_counts_down_when_start_exceeds_end() {
    assert_eq!(xrange(5, 1, 2).expect("xrange").to_vec(), vec![5, 3, 1]);
    assert_eq!(xrange(-1, -3, 1).expect("xrange").to_vec(), vec![-1, -2, -3]);
}

#[test]
fn test_xrange_rejects_non_positive_step() {
    assert!(matches!(xrange(1, 5, 0), Err(Error::InvalidArgument(_))));
    assert!(matches!(xrange(5, 1, -1), Err(Error::InvalidArgument(_))));
}

#[test]
fn test_xrange_at_the_edges_of_i64() {
    let top = xrange(i64::MAX - 1, i64::MAX, 1).expect("xrange");
    assert_eq!(top.to_vec(), vec![i64::MAX - 1, i64::MAX]);

    let bottom = xrange(i64::MIN + 2, i64::MIN, 5).expect("xrange");
    assert_eq!(bottom.to_vec(), vec![i64::MIN + 2]);
}

#[test]
fn test_repeat() {
    let twice = repeat(vec![1, 2], 2).expect("repeat");
    assert_eq!(twice.to_vec(), vec![1, 2, 1, 2]);

    let none = repeat(vec![1, 2], 0).expect("repeat");
    assert!(none.ptr_eq(&Sequence::empty()));

    assert!(matches!(repeat(vec![1], -1), Err(Error::InvalidArgument(_))));
    assert_eq!(repeat(Vec::<i32>::new(), 3).expect("repeat").count(), 0);
}

#[test]
fn test_repeat_single_pass_source_pulls_once() {
    let (seq, pulls) = counted_sequence(vec!['x', 'y']);
    let thrice = repeat(&seq, 3).expect("repeat");
    assert_eq!(thrice.implode(""), "xyxyxy");
    assert_eq!(pulls.get(), 2);
}

#[test]
fn test_infinite_cycles() {
    let letters = infinite(vec!['a', 'b', 'c']).take(5).expect("take");
    assert_eq!(letters.to_vec(), vec!['a', 'b', 'c', 'a', 'b']);
}

#[test]
fn test_infinite_over_empty_stays_empty() {
    let nothing = infinite(Vec::<u8>::new());
    assert_eq!(nothing.take(3).expect("take").count(), 0);
    assert_eq!(nothing.first_or_none(), None);
}

#[test]
fn test_infinite_over_single_pass_source() {
    let (seq, pulls) = counted_sequence(vec![1, 2, 3]);
    let cycled = infinite(seq).take(7).expect("take");
    assert_eq!(cycled.to_vec(), vec![1, 2, 3, 1, 2, 3, 1]);
    assert_eq!(pulls.get(), 3);
}

#[test]
fn test_pick() {
    assert_eq!(pick(vec![1, 2, 3], 4).expect("pick"), vec![1, 2, 3]);
    assert_eq!(pick(vec![1, 2, 3], 2).expect("pick"), vec![1, 2]);
    assert!(pick(vec![1, 2, 3], 0).expect("pick").is_empty());
    assert!(matches!(pick(vec![1], -1), Err(Error::InvalidArgument(_))));
    assert_eq!(pick(infinite([7]), 3).expect("pick"), vec![7, 7, 7]);
}

#[test]
fn test_sequence_passes_sequences_through() {
    let seq = sequence(vec![1, 2]);
    assert!(sequence(seq.clone()).ptr_eq(&seq));
    assert!(sequence(&seq).ptr_eq(&seq));
}

#[test]
fn test_collect_and_sources() {
    let c = collect([3, 1, 2]);
    assert_eq!(c, vec![3, 1, 2]);
    assert_eq!(c.len(), 3);

    let from_iter = collect(source((1..=3).map(|x| x * x)));
    assert_eq!(from_iter, vec![1, 4, 9]);

    let from_slice = sequence(&[5, 6][..]);
    assert_eq!(from_slice.to_vec(), vec![5, 6]);
}

#[test]
fn test_collection_views() {
    let c = collect(vec!['p', 'q']);
    assert_eq!(c.lookup(&1), Ok('q'));
    assert!(matches!(c.lookup(&2), Err(Error::OutOfRange(_))));
    assert!(matches!(c.assign(&0, 'z'), Err(Error::UnsupportedOperation(_))));
    assert_eq!(c.seq().implode(""), "pq");
}
