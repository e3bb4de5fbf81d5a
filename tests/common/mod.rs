//! Shared helpers for the integration tests.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use seqflow::prelude::*;

/// A memoized single-pass source over `items` plus a counter of how many
/// elements were actually pulled from it.
pub fn counted_sequence<T: Clone + 'static>(items: Vec<T>) -> (Sequence<T>, Rc<Cell<usize>>) {
    let pulls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&pulls);
    let seq = sequence(source(
        items
            .into_iter()
            .inspect(move |_| counter.set(counter.get() + 1)),
    ));
    (seq, pulls)
}

/// A memoized source that records every element it hands out, in order.
pub fn logged_sequence<T: Clone + 'static>(items: Vec<T>) -> (Sequence<T>, Rc<RefCell<Vec<T>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let seq = sequence(source(
        items
            .into_iter()
            .inspect(move |x| sink.borrow_mut().push(x.clone())),
    ));
    (seq, log)
}
