//! Inner hash join.
//!
//! Building is lazy: both sides are grouped by key when a traversal starts,
//! not when the join is constructed. Output order is left first-seen key
//! order, then left-major cross product within a key.

use std::hash::Hash;
use std::rc::Rc;

use seqflow_collections::{Collection, GroupedCollection};

use crate::sequence::Sequence;
use crate::traits::{BoxedPull, Operator, Pull};

pub struct HashJoinOp<L, R, K, O> {
    left: Sequence<L>,
    right: Sequence<R>,
    left_key: Rc<dyn Fn(&L) -> K>,
    right_key: Rc<dyn Fn(&R) -> K>,
    result: Rc<dyn Fn(L, R) -> O>,
}

impl<L, R, K, O> HashJoinOp<L, R, K, O> {
    pub fn new(
        left: Sequence<L>,
        right: Sequence<R>,
        left_key: Rc<dyn Fn(&L) -> K>,
        right_key: Rc<dyn Fn(&R) -> K>,
        result: Rc<dyn Fn(L, R) -> O>,
    ) -> Self {
        Self {
            left,
            right,
            left_key,
            right_key,
            result,
        }
    }
}

struct HashJoinPull<L, R, K, O> {
    left: Sequence<L>,
    right: Sequence<R>,
    left_key: Rc<dyn Fn(&L) -> K>,
    right_key: Rc<dyn Fn(&R) -> K>,
    result: Rc<dyn Fn(L, R) -> O>,
    /// Matched (left group, right group) pairs, built on first rewind.
    matched: Option<Vec<(Collection<L>, Collection<R>)>>,
    group: usize,
    i: usize,
    j: usize,
}

impl<L, R, K, O> HashJoinPull<L, R, K, O>
where
    L: Clone + 'static,
    R: Clone + 'static,
    K: Hash + Eq + Clone + 'static,
{
    fn build(&self) -> Vec<(Collection<L>, Collection<R>)> {
        let lk = Rc::clone(&self.left_key);
        let rk = Rc::clone(&self.right_key);
        let left = GroupedCollection::from_keyed(self.left.iter().map(|x| (lk(&x), x)));
        let right = GroupedCollection::from_keyed(self.right.iter().map(|x| (rk(&x), x)));

        let matched: Vec<_> = left
            .iter()
            .filter(|g| right.contains_key(g.key()))
            .map(|g| (g.items().clone(), right.get(g.key()).items().clone()))
            .collect();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            left_keys = left.len(),
            right_keys = right.len(),
            matched_keys = matched.len(),
            rows = matched.iter().map(|(l, r)| l.len() * r.len()).sum::<usize>(),
            "hash join built"
        );
        matched
    }
}

impl<L, R, K, O> Pull<O> for HashJoinPull<L, R, K, O>
where
    L: Clone + 'static,
    R: Clone + 'static,
    K: Hash + Eq + Clone + 'static,
{
    fn rewind(&mut self) {
        if self.matched.is_none() {
            self.matched = Some(self.build());
        }
        self.group = 0;
        self.i = 0;
        self.j = 0;
    }

    fn valid(&mut self) -> bool {
        self.matched
            .as_ref()
            .is_some_and(|m| self.group < m.len())
    }

    fn current(&mut self) -> Option<O> {
        let (lefts, rights) = self.matched.as_ref()?.get(self.group)?;
        let l = lefts.get(self.i)?.clone();
        let r = rights.get(self.j)?.clone();
        Some((self.result)(l, r))
    }

    fn advance(&mut self) {
        let Some((lefts, rights)) = self.matched.as_ref().and_then(|m| m.get(self.group)) else {
            return;
        };
        self.j += 1;
        if self.j >= rights.len() {
            self.j = 0;
            self.i += 1;
            if self.i >= lefts.len() {
                self.i = 0;
                self.group += 1;
            }
        }
    }
}

impl<L, R, K, O> Operator<O> for HashJoinOp<L, R, K, O>
where
    L: Clone + 'static,
    R: Clone + 'static,
    K: Hash + Eq + Clone + 'static,
    O: 'static,
{
    fn name(&self) -> &'static str {
        "hash_join"
    }

    fn open(&self) -> BoxedPull<O> {
        Box::new(HashJoinPull {
            left: self.left.clone(),
            right: self.right.clone(),
            left_key: Rc::clone(&self.left_key),
            right_key: Rc::clone(&self.right_key),
            result: Rc::clone(&self.result),
            matched: None,
            group: 0,
            i: 0,
            j: 0,
        })
    }

    fn lineage(&self, out: &mut Vec<&'static str>) {
        self.left.lineage_into(out);
        self.right.lineage_into(out);
        out.push(self.name());
    }
}
