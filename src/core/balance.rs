use crate::core::expense::Expense;
use crate::core::member::MemberId;
use crate::core::money::is_settled;
use crate::core::payment::Payment;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Net balance of every member in one group.
///
/// A positive balance means the member is owed (net creditor).
/// A negative balance means the member owes (net debtor).
///
/// A sheet is always derived, never stored: it is recomputed from the
/// group's expenses and completed payments whenever it is needed. For
/// validated input the values sum to zero — every amount credited to a
/// payer is debited across the splits, and every payment moves equal
/// amounts in opposite directions. A sheet that fails `is_balanced`
/// signals corrupted upstream data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// MemberId -> net balance. Ordered so iteration and serialization
    /// are deterministic.
    balances: BTreeMap<MemberId, Decimal>,
}

impl BalanceSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a member appears, defaulting to zero.
    /// Inactive roster members still show up in the result this way.
    pub fn ensure_member(&mut self, member: MemberId) {
        self.balances.entry(member).or_insert(Decimal::ZERO);
    }

    /// Apply an expense: the payer is credited the full amount, each split
    /// member is debited their share. Members not seen before (roster or
    /// not) are initialized to zero on first touch.
    pub fn apply_expense(&mut self, expense: &Expense) {
        *self
            .balances
            .entry(expense.paid_by().clone())
            .or_insert(Decimal::ZERO) += expense.amount();
        for split in expense.splits() {
            *self
                .balances
                .entry(split.member.clone())
                .or_insert(Decimal::ZERO) -= split.amount;
        }
    }

    /// Apply a payment: paying off debt moves the sender up toward zero
    /// and reduces the receiver's claim by the same amount.
    /// Anything other than a completed payment is ignored entirely.
    pub fn apply_payment(&mut self, payment: &Payment) {
        if !payment.affects_balances() {
            return;
        }
        self.apply_transfer(payment.from(), payment.to(), payment.amount());
    }

    /// Apply a settling transfer: the paying debtor moves up toward zero,
    /// the receiving creditor moves down toward zero. Backs both completed
    /// payments and settlement-plan replay.
    pub fn apply_transfer(&mut self, from: &MemberId, to: &MemberId, amount: Decimal) {
        *self
            .balances
            .entry(from.clone())
            .or_insert(Decimal::ZERO) += amount;
        *self.balances.entry(to.clone()).or_insert(Decimal::ZERO) -= amount;
    }

    /// Net balance of a member, zero if unknown.
    pub fn balance(&self, member: &MemberId) -> Decimal {
        self.balances.get(member).copied().unwrap_or(Decimal::ZERO)
    }

    /// All balances in member order.
    pub fn iter(&self) -> impl Iterator<Item = (&MemberId, Decimal)> {
        self.balances.iter().map(|(m, &b)| (m, b))
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Zero-sum check: the fundamental correctness invariant.
    /// Compared through the shared epsilon, never by exact equality.
    pub fn is_balanced(&self) -> bool {
        let sum: Decimal = self.balances.values().sum();
        is_settled(sum)
    }

    /// Sum of positive balances: the total amount still owed to creditors.
    pub fn total_outstanding(&self) -> Decimal {
        self.balances
            .values()
            .filter(|b| **b > Decimal::ZERO)
            .sum()
    }

    /// Members owed money, largest balance first. Balances within epsilon
    /// of zero are excluded. Ties break by member id so the order is fixed.
    pub fn creditors(&self) -> Vec<(MemberId, Decimal)> {
        let mut creditors: Vec<(MemberId, Decimal)> = self
            .balances
            .iter()
            .filter(|(_, b)| **b > Decimal::ZERO && !is_settled(**b))
            .map(|(m, &b)| (m.clone(), b))
            .collect();
        creditors.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        creditors
    }

    /// Members owing money, most negative first, same epsilon and
    /// tie-break rules as `creditors`.
    pub fn debtors(&self) -> Vec<(MemberId, Decimal)> {
        let mut debtors: Vec<(MemberId, Decimal)> = self
            .balances
            .iter()
            .filter(|(_, b)| **b < Decimal::ZERO && !is_settled(**b))
            .map(|(m, &b)| (m.clone(), b))
            .collect();
        debtors.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        debtors
    }
}
