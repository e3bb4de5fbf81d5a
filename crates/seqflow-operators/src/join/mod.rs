//! Join operators. Only the inner hash join exists today.

pub mod hash;

pub use hash::HashJoinOp;
