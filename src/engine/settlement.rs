use crate::core::balance::BalanceSheet;
use crate::core::member::MemberId;
use crate::core::money::{is_settled, round_to_cents};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A proposed transfer from one member to another.
///
/// Ephemeral output: a suggestion is a plan entry, not an executed
/// transaction, and is never persisted. `amount` is always positive and
/// rounded to cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementSuggestion {
    pub from: MemberId,
    pub to: MemberId,
    pub amount: Decimal,
}

impl std::fmt::Display for SettlementSuggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} pays {} to {}", self.from, self.amount, self.to)
    }
}

/// An ordered list of suggested transfers that would settle a group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettlementPlan {
    suggestions: Vec<SettlementSuggestion>,
}

impl SettlementPlan {
    pub fn suggestions(&self) -> &[SettlementSuggestion] {
        &self.suggestions
    }

    pub fn len(&self) -> usize {
        self.suggestions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    /// Total amount moved if every suggestion is executed.
    pub fn total_transferred(&self) -> Decimal {
        self.suggestions.iter().map(|s| s.amount).sum()
    }

    /// Replay the plan against a sheet: each suggestion moves the debtor
    /// up and the creditor down by its amount. Executing a full plan
    /// drives every balance to within epsilon of zero.
    pub fn replay(&self, sheet: &BalanceSheet) -> BalanceSheet {
        let mut settled = sheet.clone();
        for suggestion in &self.suggestions {
            settled.apply_transfer(&suggestion.from, &suggestion.to, suggestion.amount);
        }
        settled
    }
}

impl std::fmt::Display for SettlementPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.suggestions.is_empty() {
            return writeln!(f, "Nothing to settle.");
        }
        writeln!(f, "=== Settlement Plan ({} transfers) ===", self.len())?;
        for (i, suggestion) in self.suggestions.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, suggestion)?;
        }
        writeln!(f, "Total transferred: {}", self.total_transferred())
    }
}

/// The settlement suggester.
///
/// Greedy largest-creditor / largest-debtor matching. This is a deliberate
/// approximation: the true minimum-transfer settlement is a hard
/// combinatorial problem, and greedy largest-match is the standard
/// practical compromise. It guarantees at most
/// `creditors + debtors - 1` transfers.
pub struct SettlementEngine;

impl SettlementEngine {
    /// Produce a settlement plan for a balance sheet.
    ///
    /// # Algorithm
    ///
    /// 1. Partition members into creditors (balance > 0) and debtors
    ///    (balance < 0), excluding anyone within epsilon of zero.
    /// 2. Creditors sorted largest first, debtors most negative first;
    ///    ties break by member id, so the output is deterministic.
    /// 3. Repeatedly pair the current largest creditor with the current
    ///    largest debtor; the transfer is `min(credit, -debt)` rounded to
    ///    cents (half-up).
    /// 4. Move both parties toward zero and advance past anyone whose
    ///    residual drops below epsilon.
    /// 5. Stop without emitting if a computed transfer is not positive —
    ///    the guard against drift producing spurious transfers.
    ///
    /// An empty sheet yields an empty plan. A lone non-zero balance (which
    /// a balanced sheet cannot produce, but corrupted input can) yields no
    /// suggestion: with one side of the match missing the loop never runs.
    pub fn suggest(sheet: &BalanceSheet) -> SettlementPlan {
        let mut creditors = sheet.creditors();
        let mut debtors = sheet.debtors();
        let mut suggestions = Vec::new();

        let mut i = 0;
        let mut j = 0;
        while i < debtors.len() && j < creditors.len() {
            let pay = round_to_cents(creditors[j].1.min(-debtors[i].1));
            if pay <= Decimal::ZERO {
                break;
            }
            suggestions.push(SettlementSuggestion {
                from: debtors[i].0.clone(),
                to: creditors[j].0.clone(),
                amount: pay,
            });
            debtors[i].1 += pay;
            creditors[j].1 -= pay;
            if is_settled(debtors[i].1) {
                i += 1;
            }
            if is_settled(creditors[j].1) {
                j += 1;
            }
        }

        log::debug!(
            "settlement plan: {} transfers for {} creditors, {} debtors",
            suggestions.len(),
            creditors.len(),
            debtors.len()
        );

        SettlementPlan { suggestions }
    }
}
