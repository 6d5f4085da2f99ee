//! # split-engine
//!
//! Group expense splitting, balance, and settlement suggestion engine.
//!
//! Groups of members log shared expenses with per-member splits and
//! record settlement payments; the engine computes each member's net
//! balance and proposes a short list of transfers that zeroes the group
//! out, using greedy largest-creditor / largest-debtor matching.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: members, groups, expenses, payments,
//!   money utilities, and the derived balance sheet
//! - **engine** — Balance calculation and greedy settlement suggestion
//! - **graph** — Gross who-owes-whom debt view over raw expenses
//! - **store** — Repository boundary and the read-only query surface
//! - **simulation** — Random scenario generation for tests and benchmarks
//!
//! Everything is synchronous and pure: both computations operate on
//! immutable snapshots and allocate fresh results per call.

pub mod core;
pub mod engine;
pub mod graph;
pub mod simulation;
pub mod store;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::balance::BalanceSheet;
    pub use crate::core::expense::{even_splits, Expense, Split};
    pub use crate::core::group::{Group, GroupId};
    pub use crate::core::member::MemberId;
    pub use crate::core::money::CurrencyCode;
    pub use crate::core::payment::{Payment, PaymentStatus};
    pub use crate::engine::balances::{BalanceEngine, BalanceReport};
    pub use crate::engine::settlement::{SettlementEngine, SettlementPlan, SettlementSuggestion};
    pub use crate::store::repository::{ExpenseStore, GroupQueries, InMemoryStore};
}
