use crate::core::expense::{Expense, ExpenseError};
use crate::core::group::{Group, GroupId};
use crate::core::member::MemberId;
use crate::core::payment::Payment;
use crate::engine::balances::{BalanceEngine, BalanceReport};
use crate::engine::settlement::{SettlementEngine, SettlementPlan};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Errors from recording data into a store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unknown group: {0}")]
    UnknownGroup(GroupId),
    #[error("invalid expense: {0}")]
    InvalidExpense(#[from] ExpenseError),
    #[error("payment amount must be positive, got {0}")]
    NonPositivePayment(rust_decimal::Decimal),
}

/// Read-side capabilities the engines need from a data source.
///
/// The engines never own or mutate this state; they are handed immutable
/// snapshots per group. Implementations are free to be backed by anything
/// — the crate ships an in-memory one.
///
/// Filtering by group happens here: callers of the engines receive only
/// the records that belong to the requested group.
pub trait ExpenseStore {
    /// The group record itself, if it exists. Lets an API layer
    /// distinguish "group not found" from "group with no data".
    fn group(&self, group: &GroupId) -> Option<&Group>;

    /// Official member roster of a group. Empty for unknown groups.
    fn members(&self, group: &GroupId) -> BTreeSet<MemberId>;

    /// All expenses recorded against a group.
    fn expenses(&self, group: &GroupId) -> Vec<Expense>;

    /// All payments recorded against a group, regardless of status.
    fn payments(&self, group: &GroupId) -> Vec<Payment>;
}

/// In-memory store with insert-time validation.
///
/// Validation lives at this boundary on purpose: the balance engine does
/// pure arithmetic and accepts anything, so malformed expenses must be
/// rejected (or flagged) before they are recorded.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    groups: BTreeMap<GroupId, Group>,
    expenses: Vec<Expense>,
    payments: Vec<Payment>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_group(&mut self, group: Group) {
        self.groups.insert(group.id().clone(), group);
    }

    /// Record an expense after validating it against the group roster.
    pub fn add_expense(&mut self, expense: Expense) -> Result<(), StoreError> {
        let group = self
            .groups
            .get(expense.group())
            .ok_or_else(|| StoreError::UnknownGroup(expense.group().clone()))?;
        expense.validate(group.members())?;
        self.expenses.push(expense);
        Ok(())
    }

    /// Record a payment. Status transitions are not this crate's job:
    /// the payment arrives already stamped pending, completed, or failed.
    pub fn add_payment(&mut self, payment: Payment) -> Result<(), StoreError> {
        if !self.groups.contains_key(payment.group()) {
            return Err(StoreError::UnknownGroup(payment.group().clone()));
        }
        if payment.amount() <= rust_decimal::Decimal::ZERO {
            return Err(StoreError::NonPositivePayment(payment.amount()));
        }
        self.payments.push(payment);
        Ok(())
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }
}

impl ExpenseStore for InMemoryStore {
    fn group(&self, group: &GroupId) -> Option<&Group> {
        self.groups.get(group)
    }

    fn members(&self, group: &GroupId) -> BTreeSet<MemberId> {
        self.groups
            .get(group)
            .map(|g| g.members().clone())
            .unwrap_or_default()
    }

    fn expenses(&self, group: &GroupId) -> Vec<Expense> {
        self.expenses
            .iter()
            .filter(|e| e.group() == group)
            .cloned()
            .collect()
    }

    fn payments(&self, group: &GroupId) -> Vec<Payment> {
        self.payments
            .iter()
            .filter(|p| p.group() == group)
            .cloned()
            .collect()
    }
}

/// The read-only query surface over a store: the two entry points the
/// presentation layer calls.
///
/// Both recompute from scratch on every call — balances are derived data
/// and are never cached here, so a result can never be stale.
pub struct GroupQueries<'a, S: ExpenseStore> {
    store: &'a S,
}

impl<'a, S: ExpenseStore> GroupQueries<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Net balances for a group. An unknown group yields an empty report
    /// ("group has no data"), not an error; use [`ExpenseStore::group`]
    /// to surface not-found distinctly.
    pub fn compute_balances(&self, group: &GroupId) -> BalanceReport {
        let roster = self.store.members(group);
        let expenses = self.store.expenses(group);
        let payments = self.store.payments(group);
        BalanceEngine::compute(&roster, &expenses, &payments)
    }

    /// Settlement plan for a group, derived from freshly computed
    /// balances. Unknown group yields an empty plan.
    pub fn suggest_settlements(&self, group: &GroupId) -> SettlementPlan {
        let report = self.compute_balances(group);
        SettlementEngine::suggest(report.sheet())
    }
}
