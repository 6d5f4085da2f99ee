//! The two core computations: balance calculation and greedy settlement
//! suggestion. Both are pure functions over immutable snapshots.

pub mod balances;
pub mod settlement;
