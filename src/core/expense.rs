use crate::core::group::GroupId;
use crate::core::member::MemberId;
use crate::core::money::{round_to_cents, SETTLEMENT_EPSILON};
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;
use uuid::Uuid;

/// One member's share of an expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    pub member: MemberId,
    pub amount: Decimal,
}

impl Split {
    pub fn new(member: MemberId, amount: Decimal) -> Self {
        Self { member, amount }
    }
}

/// Validation failures for an expense record.
///
/// Raised at the storage boundary when an expense is recorded; the balance
/// engine itself never rejects input, so malformed records must be caught
/// here before they reach it.
#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error("expense amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),
    #[error("split share for {member} must not be negative, got {amount}")]
    NegativeShare { member: MemberId, amount: Decimal },
    #[error("splits sum to {split_total} but expense total is {total}")]
    UnbalancedSplits { total: Decimal, split_total: Decimal },
    #[error("split names {member} with share {amount}, but they are not in the group")]
    UnknownSplitMember { member: MemberId, amount: Decimal },
}

/// A shared expense: one member paid the total, each split entry records
/// how much of it another member owes back.
///
/// Expenses are immutable once recorded — this is the atomic unit of
/// monetary movement from "paid by one" to "owed by many".
///
/// # Examples
///
/// ```
/// use split_engine::core::expense::{Expense, Split};
/// use split_engine::core::group::GroupId;
/// use split_engine::core::member::MemberId;
/// use rust_decimal_macros::dec;
///
/// let dinner = Expense::new(
///     GroupId::new("g1"),
///     MemberId::new("alice"),
///     dec!(120),
///     vec![
///         Split::new(MemberId::new("alice"), dec!(40)),
///         Split::new(MemberId::new("bob"), dec!(40)),
///         Split::new(MemberId::new("carol"), dec!(40)),
///     ],
/// );
/// assert_eq!(dinner.split_total(), dec!(120));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    id: Uuid,
    group: GroupId,
    paid_by: MemberId,
    amount: Decimal,
    splits: Vec<Split>,
    description: Option<String>,
    category: Option<String>,
    date: DateTime<Utc>,
    note: Option<String>,
}

impl Expense {
    pub fn new(group: GroupId, paid_by: MemberId, amount: Decimal, splits: Vec<Split>) -> Self {
        Self {
            id: Uuid::new_v4(),
            group,
            paid_by,
            amount,
            splits,
            description: None,
            category: None,
            date: Utc::now(),
            note: None,
        }
    }

    /// Create an expense with a specific ID (useful for testing / determinism).
    pub fn with_id(
        id: Uuid,
        group: GroupId,
        paid_by: MemberId,
        amount: Decimal,
        splits: Vec<Split>,
    ) -> Self {
        Self {
            id,
            ..Self::new(group, paid_by, amount, splits)
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn group(&self) -> &GroupId {
        &self.group
    }

    pub fn paid_by(&self) -> &MemberId {
        &self.paid_by
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn splits(&self) -> &[Split] {
        &self.splits
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Sum of all split shares.
    pub fn split_total(&self) -> Decimal {
        self.splits.iter().map(|s| s.amount).sum()
    }

    /// Difference between the expense total and the split sum.
    /// Zero (within epsilon) for a well-formed expense.
    pub fn split_imbalance(&self) -> Decimal {
        self.amount - self.split_total()
    }

    /// Check this record against a group roster.
    ///
    /// Rejects non-positive totals, negative shares, split sums that
    /// disagree with the total beyond epsilon, and non-zero shares
    /// attributed to members outside the roster. Zero-share entries for
    /// unknown members are tolerated: they occur as placeholders in real
    /// data and contribute nothing to any balance.
    pub fn validate(&self, roster: &BTreeSet<MemberId>) -> Result<(), ExpenseError> {
        if self.amount <= Decimal::ZERO {
            return Err(ExpenseError::NonPositiveAmount(self.amount));
        }
        for split in &self.splits {
            if split.amount < Decimal::ZERO {
                return Err(ExpenseError::NegativeShare {
                    member: split.member.clone(),
                    amount: split.amount,
                });
            }
            if !roster.contains(&split.member) {
                if split.amount > Decimal::ZERO {
                    return Err(ExpenseError::UnknownSplitMember {
                        member: split.member.clone(),
                        amount: split.amount,
                    });
                }
                log::warn!(
                    "expense {} carries a zero-share placeholder for non-member {}",
                    self.id,
                    split.member
                );
            }
        }
        if self.split_imbalance().abs() > SETTLEMENT_EPSILON {
            return Err(ExpenseError::UnbalancedSplits {
                total: self.amount,
                split_total: self.split_total(),
            });
        }
        Ok(())
    }
}

/// Divide an amount evenly across members, in cents.
///
/// The base share is the total divided down to whole cents; leftover
/// cents go to the members listed first, one each, so the shares always
/// sum exactly to the total and differ by at most one cent
/// (80 over three members → 26.67 / 26.67 / 26.66).
pub fn even_splits(amount: Decimal, members: &[MemberId]) -> Vec<Split> {
    if members.is_empty() {
        return Vec::new();
    }
    let total = round_to_cents(amount);
    let count = Decimal::from(members.len());
    let cent = Decimal::new(1, 2);
    let base = (total / count).round_dp_with_strategy(2, RoundingStrategy::ToZero);
    let leftover_cents = ((total - base * count) / cent)
        .to_usize()
        .unwrap_or(0);

    members
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let share = if i < leftover_cents { base + cent } else { base };
            Split::new(m.clone(), share)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn roster() -> BTreeSet<MemberId> {
        ["alice", "bob", "carol"].map(MemberId::new).into()
    }

    fn dinner() -> Expense {
        Expense::new(
            GroupId::new("g1"),
            MemberId::new("alice"),
            dec!(120),
            vec![
                Split::new(MemberId::new("alice"), dec!(40)),
                Split::new(MemberId::new("bob"), dec!(40)),
                Split::new(MemberId::new("carol"), dec!(40)),
            ],
        )
        .with_description("Dinner at Restaurant")
        .with_category("food")
    }

    #[test]
    fn test_split_total_and_imbalance() {
        let e = dinner();
        assert_eq!(e.split_total(), dec!(120));
        assert_eq!(e.split_imbalance(), Decimal::ZERO);
    }

    #[test]
    fn test_validate_well_formed() {
        assert!(dinner().validate(&roster()).is_ok());
    }

    #[test]
    fn test_validate_rejects_unbalanced() {
        let e = Expense::new(
            GroupId::new("g1"),
            MemberId::new("alice"),
            dec!(100),
            vec![Split::new(MemberId::new("bob"), dec!(40))],
        );
        assert!(matches!(
            e.validate(&roster()),
            Err(ExpenseError::UnbalancedSplits { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_negative_share() {
        let e = Expense::new(
            GroupId::new("g1"),
            MemberId::new("alice"),
            dec!(10),
            vec![
                Split::new(MemberId::new("alice"), dec!(20)),
                Split::new(MemberId::new("bob"), dec!(-10)),
            ],
        );
        assert!(matches!(
            e.validate(&roster()),
            Err(ExpenseError::NegativeShare { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_nonpositive_total() {
        let e = Expense::new(
            GroupId::new("g1"),
            MemberId::new("alice"),
            Decimal::ZERO,
            vec![],
        );
        assert!(matches!(
            e.validate(&roster()),
            Err(ExpenseError::NonPositiveAmount(_))
        ));
    }

    #[test]
    fn test_validate_unknown_member_nonzero_share() {
        let e = Expense::new(
            GroupId::new("g1"),
            MemberId::new("alice"),
            dec!(80),
            vec![
                Split::new(MemberId::new("alice"), dec!(40)),
                Split::new(MemberId::new("mallory"), dec!(40)),
            ],
        );
        assert!(matches!(
            e.validate(&roster()),
            Err(ExpenseError::UnknownSplitMember { .. })
        ));
    }

    #[test]
    fn test_validate_tolerates_zero_share_placeholder() {
        let e = Expense::new(
            GroupId::new("g1"),
            MemberId::new("alice"),
            dec!(80),
            vec![
                Split::new(MemberId::new("mallory"), Decimal::ZERO),
                Split::new(MemberId::new("alice"), dec!(40)),
                Split::new(MemberId::new("bob"), dec!(40)),
            ],
        );
        assert!(e.validate(&roster()).is_ok());
    }

    #[test]
    fn test_fixed_id_and_date_serialize_deterministically() {
        use chrono::TimeZone;
        let id = Uuid::parse_str("7f1c2a9e-4b3d-4e5f-8a6b-0c1d2e3f4a5b").unwrap();
        let date = Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap();
        let e = Expense::with_id(
            id,
            GroupId::new("g1"),
            MemberId::new("alice"),
            dec!(120),
            vec![Split::new(MemberId::new("alice"), dec!(120))],
        )
        .with_date(date);

        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("7f1c2a9e-4b3d-4e5f-8a6b-0c1d2e3f4a5b"));

        let back: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id(), id);
        assert_eq!(back.date(), date);
        assert_eq!(back.amount(), dec!(120));
    }

    #[test]
    fn test_even_splits_exact() {
        let members = ["alice", "bob", "carol"].map(MemberId::new);
        let splits = even_splits(dec!(120), &members);
        assert!(splits.iter().all(|s| s.amount == dec!(40)));
    }

    #[test]
    fn test_even_splits_distributes_leftover_cents() {
        let members = ["alice", "bob", "carol"].map(MemberId::new);
        let splits = even_splits(dec!(80), &members);
        assert_eq!(splits[0].amount, dec!(26.67));
        assert_eq!(splits[1].amount, dec!(26.67));
        assert_eq!(splits[2].amount, dec!(26.66));
        let total: Decimal = splits.iter().map(|s| s.amount).sum();
        assert_eq!(total, dec!(80));
    }

    #[test]
    fn test_even_splits_empty() {
        assert!(even_splits(dec!(80), &[]).is_empty());
    }
}
