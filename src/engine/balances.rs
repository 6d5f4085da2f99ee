use crate::core::balance::BalanceSheet;
use crate::core::expense::Expense;
use crate::core::member::MemberId;
use crate::core::payment::Payment;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Result of computing a group's balances, with spend totals alongside
/// the raw sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceReport {
    /// Net position of each member.
    sheet: BalanceSheet,
    /// Sum of all expense totals.
    total_spend: Decimal,
}

impl BalanceReport {
    /// The computed balance sheet.
    pub fn sheet(&self) -> &BalanceSheet {
        &self.sheet
    }

    /// Net balance of a specific member.
    pub fn balance(&self, member: &MemberId) -> Decimal {
        self.sheet.balance(member)
    }

    /// Total amount spent by the group.
    pub fn total_spend(&self) -> Decimal {
        self.total_spend
    }

    /// Total still owed to creditors after completed payments.
    pub fn total_outstanding(&self) -> Decimal {
        self.sheet.total_outstanding()
    }

    /// Share of the group's spend still unsettled, for display.
    pub fn outstanding_ratio(&self) -> f64 {
        if self.total_spend == Decimal::ZERO {
            return 0.0;
        }
        let ratio = self.total_outstanding() / self.total_spend;
        ratio.to_string().parse::<f64>().unwrap_or(0.0)
    }

    /// Verify the zero-sum invariant holds.
    pub fn is_valid(&self) -> bool {
        self.sheet.is_balanced()
    }
}

impl std::fmt::Display for BalanceReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Balance Report ===")?;
        writeln!(f, "Total Spend:       {}", self.total_spend)?;
        writeln!(f, "Outstanding:       {}", self.total_outstanding())?;
        writeln!(f, "Outstanding %:     {:.1}%", self.outstanding_ratio() * 100.0)?;
        writeln!(f, "Valid:             {}", self.is_valid())?;
        writeln!(f, "\nBalances:")?;
        for (member, balance) in self.sheet.iter() {
            let status = if balance > Decimal::ZERO {
                "is owed"
            } else if balance < Decimal::ZERO {
                "owes"
            } else {
                "settled"
            };
            writeln!(f, "  {:<16} {:>12}  ({})", member, balance, status)?;
        }
        Ok(())
    }
}

/// The balance calculator.
///
/// A pure function over an immutable snapshot: no side effects, fresh
/// output on every call, result independent of input ordering.
pub struct BalanceEngine;

impl BalanceEngine {
    /// Compute net balances for one group.
    ///
    /// # Algorithm
    ///
    /// 1. Every roster member starts at zero, so inactive members appear
    ///    rather than being absent.
    /// 2. Per expense: payer +total, each split member −share. Members
    ///    outside the roster are accepted defensively and initialized to
    ///    zero on first touch.
    /// 3. Per payment with status `completed`: sender −amount, receiver
    ///    +amount. Pending and failed payments are skipped whole.
    ///
    /// The calculator does no validation: an unbalanced expense propagates
    /// its imbalance into the sheet, where `BalanceReport::is_valid`
    /// exposes it instead of masking it.
    pub fn compute(
        roster: &BTreeSet<MemberId>,
        expenses: &[Expense],
        payments: &[Payment],
    ) -> BalanceReport {
        let mut sheet = BalanceSheet::new();
        let mut total_spend = Decimal::ZERO;

        for member in roster {
            sheet.ensure_member(member.clone());
        }
        for expense in expenses {
            sheet.apply_expense(expense);
            total_spend += expense.amount();
        }
        for payment in payments {
            sheet.apply_payment(payment);
        }

        log::debug!(
            "computed balances for {} members over {} expenses, {} payments (outstanding {})",
            sheet.len(),
            expenses.len(),
            payments.len(),
            sheet.total_outstanding()
        );

        BalanceReport { sheet, total_spend }
    }
}
