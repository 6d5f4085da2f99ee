use crate::core::group::GroupId;
use crate::core::member::MemberId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Execution state of a settlement payment.
///
/// State transitions happen outside this crate (a payments collaborator
/// moves pending → completed/failed); the engine only reads the status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

/// A recorded transfer between two members of a group.
///
/// Payments are immutable records of money that already moved (or failed
/// to), not instructions. Only `completed` payments affect balances;
/// pending and failed payments have no partial effect of any kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    id: Uuid,
    group: GroupId,
    from: MemberId,
    to: MemberId,
    amount: Decimal,
    status: PaymentStatus,
    date: DateTime<Utc>,
    note: Option<String>,
}

impl Payment {
    pub fn new(
        group: GroupId,
        from: MemberId,
        to: MemberId,
        amount: Decimal,
        status: PaymentStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            group,
            from,
            to,
            amount,
            status,
            date: Utc::now(),
            note: None,
        }
    }

    /// Create a payment with a specific ID (useful for testing / determinism).
    pub fn with_id(
        id: Uuid,
        group: GroupId,
        from: MemberId,
        to: MemberId,
        amount: Decimal,
        status: PaymentStatus,
    ) -> Self {
        Self {
            id,
            ..Self::new(group, from, to, amount, status)
        }
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

    pub fn from(&self) -> &MemberId {
        &self.from
    }

    pub fn to(&self) -> &MemberId {
        &self.to
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Whether this payment counts toward balances.
    pub fn affects_balances(&self) -> bool {
        self.status == PaymentStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn payment(status: PaymentStatus) -> Payment {
        Payment::new(
            GroupId::new("g1"),
            MemberId::new("bob"),
            MemberId::new("alice"),
            dec!(40),
            status,
        )
    }

    #[test]
    fn test_only_completed_affects_balances() {
        assert!(payment(PaymentStatus::Completed).affects_balances());
        assert!(!payment(PaymentStatus::Pending).affects_balances());
        assert!(!payment(PaymentStatus::Failed).affects_balances());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&PaymentStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
        let parsed: PaymentStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(parsed, PaymentStatus::Pending);
    }

    #[test]
    fn test_fixed_id_and_date_round_trip() {
        use chrono::TimeZone;
        let id = Uuid::parse_str("0a1b2c3d-4e5f-4a6b-8c7d-9e0f1a2b3c4d").unwrap();
        let date = Utc.with_ymd_and_hms(2026, 3, 15, 9, 30, 0).unwrap();
        let p = Payment::with_id(
            id,
            GroupId::new("g1"),
            MemberId::new("bob"),
            MemberId::new("alice"),
            dec!(40),
            PaymentStatus::Completed,
        )
        .with_date(date);

        let json = serde_json::to_string(&p).unwrap();
        let back: Payment = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id(), id);
        assert_eq!(back.date(), date);
        assert_eq!(back.status(), PaymentStatus::Completed);
    }

    #[test]
    fn test_payment_accessors() {
        let p = payment(PaymentStatus::Completed).with_note("hotel share");
        assert_eq!(p.from().as_str(), "bob");
        assert_eq!(p.to().as_str(), "alice");
        assert_eq!(p.amount(), dec!(40));
        assert_eq!(p.note(), Some("hotel share"));
    }
}
